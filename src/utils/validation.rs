//! Precondition checks for engine inputs
//!
//! The engine assumes the upstream normalizer already dropped zero and
//! malformed rows. When that contract is broken the run fails fast with a
//! descriptive error instead of silently coercing, because the matching
//! phases rely on well-formed comparable keys and silently dropping
//! movements would corrupt the residual-set invariant.

use bigdecimal::BigDecimal;

use crate::types::{Movement, ReconcileError, ReconcileResult};

/// Validate a single movement against the engine's preconditions
pub fn validate_movement(movement: &Movement) -> ReconcileResult<()> {
    if movement.amount == BigDecimal::from(0) {
        return Err(ReconcileError::InvalidMovement(format!(
            "zero amount on {} (\"{}\"); zero rows must be dropped upstream",
            movement.date, movement.description
        )));
    }
    Ok(())
}

/// Validate a whole input side before any phase runs
pub fn validate_movements(movements: &[Movement]) -> ReconcileResult<()> {
    for movement in movements {
        validate_movement(movement)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Origin;
    use chrono::NaiveDate;

    #[test]
    fn test_zero_amount_rejected() {
        let movement = Movement::new(
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            BigDecimal::from(0),
            "ajuste",
            Origin::Bank,
        );
        assert!(matches!(
            validate_movement(&movement),
            Err(ReconcileError::InvalidMovement(_))
        ));
    }

    #[test]
    fn test_signed_amounts_accepted() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let credit = Movement::new(date, "1500.25".parse().unwrap(), "cobro", Origin::Internal);
        let debit = Movement::new(date, "-301.10".parse().unwrap(), "pago", Origin::Internal);
        assert!(validate_movements(&[credit, debit]).is_ok());
    }
}
