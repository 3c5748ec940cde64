//! Basic reconciliation example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::{
    reconcile, Movement, Origin, ReconciliationParameters,
};

fn dec(s: &str) -> BigDecimal {
    s.parse().expect("valid decimal literal")
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Reconciliation Core - Basic Example\n");

    // Movements as they would arrive from the upstream normalizer
    let bank = vec![
        Movement::new(day(2025, 1, 10), dec("5000.00"), "Transferencia 1461 Ref 5678", Origin::Bank)
            .with_origin_label("extracto_enero.xlsx"),
        Movement::new(day(2025, 1, 12), dec("-320.40"), "Debito automatico luz", Origin::Bank)
            .with_origin_label("extracto_enero.xlsx"),
        Movement::new(day(2025, 1, 20), dec("1500.00"), "PAG cliente A", Origin::Bank)
            .with_origin_label("extracto_enero.xlsx"),
        Movement::new(day(2025, 1, 20), dec("1500.00"), "PAG cliente B", Origin::Bank)
            .with_origin_label("extracto_enero.xlsx"),
    ];
    let internal = vec![
        Movement::new(day(2025, 1, 10), dec("5000.00"), "Pago 1461", Origin::Internal)
            .with_origin_label("libro_mayor.csv"),
        Movement::new(day(2025, 1, 13), dec("-320.00"), "Servicio electrico", Origin::Internal)
            .with_origin_label("libro_mayor.csv"),
        Movement::new(day(2025, 1, 20), dec("3000.00"), "Cobranza clientes", Origin::Internal)
            .with_origin_label("libro_mayor.csv"),
    ];

    let params = ReconciliationParameters::new(dec("0.50"), 1, true, false)?;
    let outcome = reconcile(&bank, &internal, &params)?;

    println!(
        "Matches ({} exact, {} suggested):",
        outcome.exact_match_count(),
        outcome.suggestion_count()
    );
    for record in &outcome.matches {
        println!(
            "  [{:?}] {} {} \"{}\"  <->  {} {} \"{}\"",
            record.status,
            record.bank_date,
            record.bank_amount,
            record.bank_description,
            record.internal_date,
            record.internal_amount,
            record.internal_description,
        );
        println!("    hint: {}", record.suggested_action);
    }

    println!("\nUnmatched bank movements ({}):", outcome.unmatched_bank.len());
    for movement in &outcome.unmatched_bank {
        println!("  {} {} \"{}\"", movement.date, movement.amount, movement.description);
    }

    println!(
        "\nUnmatched internal movements ({}):",
        outcome.unmatched_internal.len()
    );
    for movement in &outcome.unmatched_internal {
        println!("  {} {} \"{}\"", movement.date, movement.amount, movement.description);
    }

    if outcome.is_fully_reconciled() {
        println!("\nFully reconciled.");
    }

    Ok(())
}
