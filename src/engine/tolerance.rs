//! Tolerant suggestion phase.
//!
//! Pairs pending bank movements with pending internal movements inside the
//! configured date and amount windows. Suggestions are a review list, not a
//! partition: one movement may appear in several pairs.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::text::extract_numbers;
use crate::types::{MatchRecord, MatchStatus, Movement, ReconciliationParameters};

/// Produce one suggestion record per (bank, internal) pair whose dates fall
/// within `day_tolerance` of each other and whose amounts differ by at most
/// `amount_tolerance`. Pairs sharing a numeric reference in their
/// descriptions are upgraded to [`MatchStatus::SuggestedByNumber`].
pub(crate) fn suggest_by_tolerance(
    pending_bank: &[&Movement],
    pending_internal: &[&Movement],
    params: &ReconciliationParameters,
) -> Vec<MatchRecord> {
    let mut by_date: HashMap<NaiveDate, Vec<&Movement>> = HashMap::new();
    for &movement in pending_internal {
        by_date.entry(movement.date).or_default().push(movement);
    }

    let mut out = Vec::new();
    for bank_movement in pending_bank {
        let bank_numbers = extract_numbers(&bank_movement.description);

        // Closed window [date - d, date + d], walked day by day ascending
        for offset in -params.day_tolerance..=params.day_tolerance {
            let day = bank_movement.date + Duration::days(offset);
            let Some(candidates) = by_date.get(&day) else {
                continue;
            };
            for internal_movement in candidates {
                let difference = (&internal_movement.amount - &bank_movement.amount).abs();
                if difference > params.amount_tolerance {
                    continue;
                }
                let status = if !bank_numbers.is_empty()
                    && !bank_numbers.is_disjoint(&extract_numbers(&internal_movement.description))
                {
                    MatchStatus::SuggestedByNumber
                } else {
                    MatchStatus::SuggestedByTolerance
                };
                out.push(MatchRecord::paired(bank_movement, internal_movement, status));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Origin;
    use bigdecimal::BigDecimal;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn params(amount: &str, days: i64) -> ReconciliationParameters {
        ReconciliationParameters::new(dec(amount), days, false, false).unwrap()
    }

    fn movement(y: i32, m: u32, d: u32, amount: &str, desc: &str, origin: Origin) -> Movement {
        Movement::new(date(y, m, d), dec(amount), desc, origin)
    }

    #[test]
    fn test_window_is_inclusive_on_both_tolerances() {
        let b = movement(2023, 12, 24, "1000.00", "pago", Origin::Bank);
        let i = movement(2023, 12, 25, "1001.00", "cobro", Origin::Internal);

        let out = suggest_by_tolerance(&[&b], &[&i], &params("2.0", 2));

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].status, MatchStatus::SuggestedByTolerance);
    }

    #[test]
    fn test_zero_day_tolerance_excludes_adjacent_dates() {
        let b = movement(2023, 12, 24, "1000.00", "pago", Origin::Bank);
        let i = movement(2023, 12, 25, "1001.00", "cobro", Origin::Internal);

        let out = suggest_by_tolerance(&[&b], &[&i], &params("2.0", 0));

        assert!(out.is_empty());
    }

    #[test]
    fn test_amount_outside_tolerance_excluded() {
        let b = movement(2023, 12, 24, "1000.00", "pago", Origin::Bank);
        let i = movement(2023, 12, 24, "1003.00", "cobro", Origin::Internal);

        let out = suggest_by_tolerance(&[&b], &[&i], &params("2.0", 0));

        assert!(out.is_empty());
    }

    #[test]
    fn test_shared_reference_number_upgrades_status() {
        let b = movement(2025, 1, 10, "1000.00", "Transferencia ref 4412", Origin::Bank);
        let i = movement(2025, 1, 11, "1000.50", "Cobro 4412", Origin::Internal);

        let out = suggest_by_tolerance(&[&b], &[&i], &params("1.0", 1));

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].status, MatchStatus::SuggestedByNumber);
    }

    #[test]
    fn test_one_movement_may_appear_in_several_pairs() {
        let b = movement(2025, 1, 10, "1000.00", "pago", Origin::Bank);
        let i1 = movement(2025, 1, 10, "1000.50", "cobro a", Origin::Internal);
        let i2 = movement(2025, 1, 11, "999.50", "cobro b", Origin::Internal);

        let out = suggest_by_tolerance(&[&b], &[&i1, &i2], &params("1.0", 1));

        assert_eq!(out.len(), 2);
    }
}
