//! Reconciliation engine: phase orchestration over two movement lists.
//!
//! Four sequential phases over the bank and internal lists:
//!
//! 1. Exact key matching on `(date, amount)` with one-to-one consumption
//! 2. Tolerant suggestions within the configured amount/day windows
//! 3. Grouped (many-to-one) matching of same-day sums, with a cross-date
//!    fallback
//! 4. Residual computation of the movements no phase claimed
//!
//! Each invocation is a pure function of its inputs: no movement is ever
//! mutated, consumption is tracked by position, and identical inputs yield
//! identical output.

mod grouping;
mod tolerance;

use std::collections::{HashMap, HashSet, VecDeque};

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::text::extract_numbers;
use crate::types::{
    MatchRecord, MatchStatus, Movement, ReconcileResult, ReconciliationOutcome,
    ReconciliationParameters,
};
use crate::utils::validation;

/// Lookup key for the exact phase
type ExactKey = (NaiveDate, BigDecimal);

fn exact_key(movement: &Movement) -> ExactKey {
    (movement.date, movement.amount.round(2))
}

/// Reconciliation engine for one parameter set.
///
/// Holds no mutable state; `reconcile` may be called repeatedly and from
/// independent threads.
#[derive(Debug, Clone)]
pub struct Reconciler {
    params: ReconciliationParameters,
}

impl Reconciler {
    /// Create an engine for the given parameters
    pub fn new(params: ReconciliationParameters) -> Self {
        Self { params }
    }

    /// Run all phases over the two movement lists.
    ///
    /// Returns the match records in phase order plus the residual movements
    /// on each side in their original relative order. The only error
    /// condition is a precondition violation (a zero-amount movement that
    /// should have been dropped upstream); "nothing matched" is a normal
    /// outcome, not an error.
    pub fn reconcile(
        &self,
        bank: &[Movement],
        internal: &[Movement],
    ) -> ReconcileResult<ReconciliationOutcome> {
        validation::validate_movements(bank)?;
        validation::validate_movements(internal)?;

        let mut matches: Vec<MatchRecord> = Vec::new();

        // Phase 1: exact key matching. The index maps each key to a FIFO
        // queue of internal positions so duplicate same-day/same-amount
        // movements resolve one-to-one instead of re-matching a single
        // surviving candidate.
        let mut index: HashMap<ExactKey, VecDeque<usize>> = HashMap::new();
        for (position, movement) in internal.iter().enumerate() {
            index
                .entry(exact_key(movement))
                .or_default()
                .push_back(position);
        }

        let mut common_keys: HashSet<ExactKey> = HashSet::new();
        let mut consumed_bank = vec![false; bank.len()];
        let mut consumed_internal = vec![false; internal.len()];

        for (position, bank_movement) in bank.iter().enumerate() {
            let key = exact_key(bank_movement);
            let Some(queue) = index.get_mut(&key) else {
                continue;
            };
            common_keys.insert(key);
            let Some(internal_position) = queue.pop_front() else {
                continue;
            };
            let internal_movement = &internal[internal_position];
            // The status split discriminates on shared numeric references:
            // a common word alone ("transferencia" on both sides) is too
            // weak a signal at exact-key strength.
            let bank_numbers = extract_numbers(&bank_movement.description);
            let status = if !bank_numbers.is_empty()
                && !bank_numbers.is_disjoint(&extract_numbers(&internal_movement.description))
            {
                MatchStatus::ExactMatch
            } else {
                MatchStatus::ExactNoTextOverlap
            };
            matches.push(MatchRecord::paired(bank_movement, internal_movement, status));
            consumed_bank[position] = true;
            consumed_internal[internal_position] = true;
        }

        // Pending pools for the weaker phases. Movements whose key exists on
        // both sides are excluded even when not individually consumed, so
        // exact-matchable keys are never re-offered to tolerant or grouped
        // matching.
        let pending_bank: Vec<&Movement> = bank
            .iter()
            .enumerate()
            .filter(|(position, movement)| {
                !consumed_bank[*position] && !common_keys.contains(&exact_key(movement))
            })
            .map(|(_, movement)| movement)
            .collect();
        let pending_internal: Vec<&Movement> = internal
            .iter()
            .enumerate()
            .filter(|(position, movement)| {
                !consumed_internal[*position] && !common_keys.contains(&exact_key(movement))
            })
            .map(|(_, movement)| movement)
            .collect();

        let exact_len = matches.len();

        // Phase 2: tolerant suggestions. Not one-to-one; a movement may
        // appear in several suggested pairs for human review.
        if self.params.tolerances_enabled() {
            matches.extend(tolerance::suggest_by_tolerance(
                &pending_bank,
                &pending_internal,
                &self.params,
            ));
        }

        // Phase 3: grouped reconciliation over the same pending pools.
        if self.params.allow_group_reconciliation {
            matches.extend(grouping::suggest_groups(
                &pending_bank,
                &pending_internal,
                &self.params,
            ));
        }

        // Phase 4: residuals. A pending movement is resolved when its
        // (date, amount, description) triple appears in a phase 2-3 record
        // on its side, or when its date was consumed by a qualifying group.
        let suggestions = &matches[exact_len..];
        let used_bank: HashSet<(NaiveDate, &BigDecimal, &str)> = suggestions
            .iter()
            .map(|r| (r.bank_date, &r.bank_amount, r.bank_description.as_str()))
            .collect();
        let used_internal: HashSet<(NaiveDate, &BigDecimal, &str)> = suggestions
            .iter()
            .map(|r| {
                (
                    r.internal_date,
                    &r.internal_amount,
                    r.internal_description.as_str(),
                )
            })
            .collect();
        let grouped_bank_dates: HashSet<NaiveDate> = suggestions
            .iter()
            .filter(|r| r.status == MatchStatus::SuggestedGroup)
            .map(|r| r.bank_date)
            .collect();
        let grouped_internal_dates: HashSet<NaiveDate> = suggestions
            .iter()
            .filter(|r| r.status == MatchStatus::SuggestedGroup)
            .map(|r| r.internal_date)
            .collect();

        let unmatched_bank: Vec<Movement> = pending_bank
            .iter()
            .filter(|m| !grouped_bank_dates.contains(&m.date))
            .filter(|m| !used_bank.contains(&(m.date, &m.amount, m.description.as_str())))
            .map(|m| (*m).clone())
            .collect();
        let unmatched_internal: Vec<Movement> = pending_internal
            .iter()
            .filter(|m| !grouped_internal_dates.contains(&m.date))
            .filter(|m| !used_internal.contains(&(m.date, &m.amount, m.description.as_str())))
            .map(|m| (*m).clone())
            .collect();

        Ok(ReconciliationOutcome {
            matches,
            unmatched_bank,
            unmatched_internal,
        })
    }
}

/// Reconcile two movement lists with the given parameters.
///
/// Convenience wrapper around [`Reconciler::reconcile`].
pub fn reconcile(
    bank: &[Movement],
    internal: &[Movement],
    params: &ReconciliationParameters,
) -> ReconcileResult<ReconciliationOutcome> {
    Reconciler::new(params.clone()).reconcile(bank, internal)
}
