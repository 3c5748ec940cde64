//! # Reconciliation Core
//!
//! A reconciliation engine for matching bank statement movements against an
//! internal ledger under uncertainty about exact amount, date, and
//! description formatting.
//!
//! ## Features
//!
//! - **Exact matching**: one-to-one pairing on identical (date, amount)
//!   keys, with a weaker flagged variant when descriptions share no
//!   reference number
//! - **Tolerant suggestions**: review candidates within configurable amount
//!   and day windows, upgraded when descriptions share a reference number
//! - **Grouped matching**: many-to-one pairing of same-day amount sums, with
//!   an optional cross-date fallback
//! - **Deterministic residuals**: movements no phase claimed, surfaced in
//!   their original order
//!
//! The engine is a pure, single-threaded computation: it holds no shared
//! state, never mutates its inputs, and identical inputs always produce
//! identical output. Input normalization (column mapping, encoding repair,
//! currency parsing) and result presentation are the caller's concern.
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{reconcile, Movement, Origin, ReconciliationParameters};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
//! let bank = vec![Movement::new(
//!     date,
//!     "5000.00".parse::<BigDecimal>().unwrap(),
//!     "Transferencia 1461 Ref 5678",
//!     Origin::Bank,
//! )];
//! let internal = vec![Movement::new(
//!     date,
//!     "5000.00".parse::<BigDecimal>().unwrap(),
//!     "Pago 1461",
//!     Origin::Internal,
//! )];
//!
//! let outcome = reconcile(&bank, &internal, &ReconciliationParameters::default()).unwrap();
//! assert!(outcome.is_fully_reconciled());
//! ```

pub mod engine;
pub mod text;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use engine::{reconcile, Reconciler};
pub use text::{extract_numbers, strip_diacritics, TokenMatcher};
pub use types::*;
