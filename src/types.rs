//! Core types and data structures for the reconciliation engine

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which side of the reconciliation a movement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Movement taken from the bank statement
    Bank,
    /// Movement taken from the internal ledger
    Internal,
}

/// One normalized transaction line from either the bank statement or the
/// internal ledger.
///
/// Movements are produced upstream by a normalizer and are immutable once
/// constructed: the engine only reads them and allocates new output
/// structures. Amounts must be signed, non-zero, and rounded to cent
/// precision; dates carry no time component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// Calendar date of the movement (day precision)
    pub date: NaiveDate,
    /// Signed amount at cent precision; never zero
    pub amount: BigDecimal,
    /// Free-text description, possibly empty
    pub description: String,
    /// Which side this movement came from
    pub origin: Origin,
    /// Optional provenance (source file or sheet name); informational only,
    /// never consulted by the matching phases
    pub origin_label: Option<String>,
}

impl Movement {
    /// Create a new movement
    pub fn new(
        date: NaiveDate,
        amount: BigDecimal,
        description: impl Into<String>,
        origin: Origin,
    ) -> Self {
        Self {
            date,
            amount,
            description: description.into(),
            origin,
            origin_label: None,
        }
    }

    /// Attach a provenance label (source file/sheet name)
    pub fn with_origin_label(mut self, label: impl Into<String>) -> Self {
        self.origin_label = Some(label.into());
        self
    }
}

/// How a match record was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Identical (date, amount) key and a shared numeric reference in the
    /// descriptions
    ExactMatch,
    /// Identical (date, amount) key but no shared reference; flagged for
    /// review
    ExactNoTextOverlap,
    /// Within tolerances and sharing a numeric reference in the descriptions
    SuggestedByNumber,
    /// Within the configured amount/day tolerances only
    SuggestedByTolerance,
    /// Sum of a date group on one side explains a date group on the other
    SuggestedGroup,
}

impl MatchStatus {
    /// Fixed human-readable review hint for this status
    pub fn suggested_action(&self) -> &'static str {
        match self {
            MatchStatus::ExactMatch => "Exact date/amount match with a shared reference number",
            MatchStatus::ExactNoTextOverlap => {
                "Exact date/amount match; descriptions share no reference, review"
            }
            MatchStatus::SuggestedByNumber => {
                "Shares a reference number in the description; review"
            }
            MatchStatus::SuggestedByTolerance => "Within configured tolerances; review manually",
            MatchStatus::SuggestedGroup => "Review summed group of movements",
        }
    }

    /// Whether this status came from the exact key phase
    pub fn is_exact(&self) -> bool {
        matches!(
            self,
            MatchStatus::ExactMatch | MatchStatus::ExactNoTextOverlap
        )
    }
}

/// One resolved pairing (or group pairing) produced by the engine.
///
/// Group records carry synthetic sides: the amount is the group sum and the
/// description joins up to the first three member descriptions, annotated
/// with the member count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub bank_date: NaiveDate,
    pub bank_amount: BigDecimal,
    pub bank_description: String,
    pub internal_date: NaiveDate,
    pub internal_amount: BigDecimal,
    pub internal_description: String,
    pub status: MatchStatus,
    /// Human-readable hint tied to `status`
    pub suggested_action: String,
}

impl MatchRecord {
    /// Build a one-to-one record from a bank and an internal movement
    pub fn paired(bank: &Movement, internal: &Movement, status: MatchStatus) -> Self {
        Self {
            bank_date: bank.date,
            bank_amount: bank.amount.clone(),
            bank_description: bank.description.clone(),
            internal_date: internal.date,
            internal_amount: internal.amount.clone(),
            internal_description: internal.description.clone(),
            status,
            suggested_action: status.suggested_action().to_string(),
        }
    }

    /// Build a group record from synthetic sides (group sums and joined
    /// descriptions)
    pub fn grouped(
        bank_date: NaiveDate,
        bank_total: BigDecimal,
        bank_description: String,
        internal_date: NaiveDate,
        internal_total: BigDecimal,
        internal_description: String,
    ) -> Self {
        let status = MatchStatus::SuggestedGroup;
        Self {
            bank_date,
            bank_amount: bank_total,
            bank_description,
            internal_date,
            internal_amount: internal_total,
            internal_description,
            status,
            suggested_action: status.suggested_action().to_string(),
        }
    }
}

/// Configuration for one reconciliation run.
///
/// Immutable value object; negative tolerances are rejected at construction
/// rather than discovered mid-algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationParameters {
    /// Maximum absolute amount difference for tolerant and grouped matching
    pub amount_tolerance: BigDecimal,
    /// Maximum date distance in days for tolerant and cross-date grouped
    /// matching
    pub day_tolerance: i64,
    /// Enable the grouped (many-to-one) reconciliation phase
    pub allow_group_reconciliation: bool,
    /// Allow the grouped phase to pair groups on different dates, consulted
    /// only when the same-day search found nothing
    pub allow_cross_date_groups: bool,
}

impl ReconciliationParameters {
    /// Create a validated parameter set
    pub fn new(
        amount_tolerance: BigDecimal,
        day_tolerance: i64,
        allow_group_reconciliation: bool,
        allow_cross_date_groups: bool,
    ) -> ReconcileResult<Self> {
        if amount_tolerance < BigDecimal::from(0) {
            return Err(ReconcileError::InvalidParameter(format!(
                "amount_tolerance must be non-negative, got {}",
                amount_tolerance
            )));
        }
        if day_tolerance < 0 {
            return Err(ReconcileError::InvalidParameter(format!(
                "day_tolerance must be non-negative, got {}",
                day_tolerance
            )));
        }
        Ok(Self {
            amount_tolerance,
            day_tolerance,
            allow_group_reconciliation,
            allow_cross_date_groups,
        })
    }

    /// Whether the tolerant suggestion phase should run at all
    pub fn tolerances_enabled(&self) -> bool {
        self.amount_tolerance > BigDecimal::from(0) || self.day_tolerance > 0
    }
}

impl Default for ReconciliationParameters {
    fn default() -> Self {
        Self {
            amount_tolerance: BigDecimal::from(0),
            day_tolerance: 0,
            allow_group_reconciliation: false,
            allow_cross_date_groups: false,
        }
    }
}

/// Final partition produced by one reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    /// All match records, in phase order (exact, then tolerant, then
    /// grouped), each phase preserving bank-side iteration order
    pub matches: Vec<MatchRecord>,
    /// Bank movements not claimed by any match, in original relative order
    pub unmatched_bank: Vec<Movement>,
    /// Internal movements not claimed by any match, in original relative
    /// order
    pub unmatched_internal: Vec<Movement>,
}

impl ReconciliationOutcome {
    /// True when neither side has residual movements
    pub fn is_fully_reconciled(&self) -> bool {
        self.unmatched_bank.is_empty() && self.unmatched_internal.is_empty()
    }

    /// Number of exact-phase records
    pub fn exact_match_count(&self) -> usize {
        self.matches.iter().filter(|m| m.status.is_exact()).count()
    }

    /// Number of suggestion records (tolerant and grouped)
    pub fn suggestion_count(&self) -> usize {
        self.matches.len() - self.exact_match_count()
    }
}

/// Errors that can occur when configuring or running a reconciliation
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Invalid movement: {0}")]
    InvalidMovement(String),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parameters_reject_negative_amount_tolerance() {
        let result = ReconciliationParameters::new(dec("-0.01"), 0, false, false);
        assert!(matches!(result, Err(ReconcileError::InvalidParameter(_))));
    }

    #[test]
    fn test_parameters_reject_negative_day_tolerance() {
        let result = ReconciliationParameters::new(dec("1.00"), -1, false, false);
        assert!(matches!(result, Err(ReconcileError::InvalidParameter(_))));
    }

    #[test]
    fn test_parameters_tolerances_enabled() {
        let disabled = ReconciliationParameters::default();
        assert!(!disabled.tolerances_enabled());

        let by_amount = ReconciliationParameters::new(dec("0.50"), 0, false, false).unwrap();
        assert!(by_amount.tolerances_enabled());

        let by_days = ReconciliationParameters::new(dec("0"), 2, false, false).unwrap();
        assert!(by_days.tolerances_enabled());
    }

    #[test]
    fn test_suggested_action_follows_status() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let bank = Movement::new(date, dec("5000.00"), "Transferencia 1461", Origin::Bank);
        let internal = Movement::new(date, dec("5000.00"), "Pago 1461", Origin::Internal);

        let record = MatchRecord::paired(&bank, &internal, MatchStatus::ExactMatch);
        assert_eq!(
            record.suggested_action,
            MatchStatus::ExactMatch.suggested_action()
        );
        assert!(record.status.is_exact());
    }

    #[test]
    fn test_movement_origin_label() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let movement = Movement::new(date, dec("-120.50"), "Debito automatico", Origin::Bank)
            .with_origin_label("extracto_marzo.xlsx");
        assert_eq!(
            movement.origin_label.as_deref(),
            Some("extracto_marzo.xlsx")
        );
    }
}
