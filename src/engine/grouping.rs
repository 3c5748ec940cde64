//! Grouped reconciliation phase.
//!
//! A single internal deposit often aggregates several individual bank-side
//! movements from the same business day, or vice versa. This phase groups
//! each side's pending movements by date and compares group sums. Same-day
//! pairings run first; the cross-date search is a fallback that only runs
//! when the same-day search found nothing.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::types::{MatchRecord, Movement, ReconciliationParameters};

/// How many member descriptions the synthetic group text carries
const GROUP_DESCRIPTION_MEMBERS: usize = 3;

/// Produce one [`MatchRecord`] per qualifying (bank group, internal group)
/// pair. A pair qualifies when the dates agree (exactly, or within
/// `day_tolerance` during the cross-date fallback), the sums differ by at
/// most `amount_tolerance`, and at least one side has more than one member.
pub(crate) fn suggest_groups(
    pending_bank: &[&Movement],
    pending_internal: &[&Movement],
    params: &ReconciliationParameters,
) -> Vec<MatchRecord> {
    let bank_groups = group_by_date(pending_bank);
    let internal_groups = group_by_date(pending_internal);

    let same_day = pair_groups(&bank_groups, &internal_groups, params, false);
    if !same_day.is_empty() || !params.allow_cross_date_groups {
        return same_day;
    }
    pair_groups(&bank_groups, &internal_groups, params, true)
}

/// Group movements by date, preserving first-occurrence order of the dates
/// and insertion order within each group
fn group_by_date<'a>(movements: &[&'a Movement]) -> Vec<(NaiveDate, Vec<&'a Movement>)> {
    let mut grouped: Vec<(NaiveDate, Vec<&Movement>)> = Vec::new();
    let mut positions: HashMap<NaiveDate, usize> = HashMap::new();
    for &movement in movements {
        match positions.get(&movement.date) {
            Some(&position) => grouped[position].1.push(movement),
            None => {
                positions.insert(movement.date, grouped.len());
                grouped.push((movement.date, vec![movement]));
            }
        }
    }
    grouped
}

fn pair_groups(
    bank_groups: &[(NaiveDate, Vec<&Movement>)],
    internal_groups: &[(NaiveDate, Vec<&Movement>)],
    params: &ReconciliationParameters,
    allow_cross_date: bool,
) -> Vec<MatchRecord> {
    let mut out = Vec::new();
    for (bank_date, bank_group) in bank_groups {
        let bank_sum: BigDecimal = bank_group.iter().map(|m| &m.amount).sum();

        for (internal_date, internal_group) in internal_groups {
            // A 1-to-1 "group" is not a group; it belongs to the exact and
            // tolerant phases.
            if bank_group.len() == 1 && internal_group.len() == 1 {
                continue;
            }

            let dates_ok = bank_date == internal_date
                || (allow_cross_date
                    && (*bank_date - *internal_date).num_days().abs() <= params.day_tolerance);
            if !dates_ok {
                continue;
            }

            let internal_sum: BigDecimal = internal_group.iter().map(|m| &m.amount).sum();
            if (&bank_sum - &internal_sum).abs() > params.amount_tolerance {
                continue;
            }

            out.push(MatchRecord::grouped(
                *bank_date,
                bank_sum.clone(),
                group_description(bank_group),
                *internal_date,
                internal_sum,
                group_description(internal_group),
            ));
        }
    }
    out
}

/// Synthetic description: up to the first three member descriptions joined,
/// annotated with the member count
fn group_description(members: &[&Movement]) -> String {
    let joined = members
        .iter()
        .take(GROUP_DESCRIPTION_MEMBERS)
        .map(|m| m.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    format!("[Group of {} movements] {}...", members.len(), joined)
}
