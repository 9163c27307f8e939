//! # Reconcile Core
//!
//! A financial reconciliation library that matches a batch of target
//! amounts against a batch of transaction amounts by finding subsets of
//! transactions that sum to each target.
//!
//! ## Features
//!
//! - **Exact matching**: pairwise equality scan over scaled integer cents
//! - **Subset-sum solving**: a polynomial dynamic-programming solver that
//!   reconstructs one witness subset per target, with negative-amount
//!   support, plus an exhaustive brute-force baseline
//! - **Exact money arithmetic**: decimal amounts scaled to integer minor
//!   units before any summation
//! - **Match reporting**: per-target results, per-target failures, and
//!   run metadata in one serializable report
//! - **Benchmarking**: a harness timing both solvers over graded input
//!   sizes
//! - **Ingestion abstraction**: source-agnostic design with a trait-based
//!   dataset boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use reconcile_core::{Reconciler, Target, Transaction};
//! use std::str::FromStr;
//!
//! let transactions = vec![
//!     Transaction::new(
//!         "T1".to_string(),
//!         BigDecimal::from_str("75.00").unwrap(),
//!         "Invoice payment".to_string(),
//!     ),
//!     Transaction::new(
//!         "T2".to_string(),
//!         BigDecimal::from_str("25.00").unwrap(),
//!         "Partial refund".to_string(),
//!     ),
//! ];
//! let targets = vec![Target::new(
//!     "G1".to_string(),
//!     BigDecimal::from_str("100.00").unwrap(),
//!     "REF-100".to_string(),
//! )];
//!
//! let report = Reconciler::new().reconcile(&transactions, &targets).unwrap();
//!
//! assert!(report.results[0].exists);
//! assert_eq!(report.results[0].matched_transaction_ids, vec!["T1", "T2"]);
//! ```

pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
