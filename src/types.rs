//! Core types and data structures for the reconciliation engine

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// A single financial transaction to be reconciled against targets
///
/// Transactions are created once at ingestion and never mutated afterwards.
/// Identifiers must be unique within a reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction (e.g. "T1")
    pub id: String,
    /// Monetary amount of the transaction
    pub amount: BigDecimal,
    /// Free-text description of the transaction
    pub description: String,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(id: String, amount: BigDecimal, description: String) -> Self {
        Self {
            id,
            amount,
            description,
        }
    }
}

/// A target amount to be reconciled against one or more transactions
///
/// Same lifecycle as [`Transaction`]: created once at ingestion, never
/// mutated, unique identifier within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Unique identifier for the target (e.g. "G1")
    pub id: String,
    /// Monetary amount to reconcile
    pub amount: BigDecimal,
    /// External reference for the target (invoice number, remittance id, etc.)
    pub reference: String,
}

impl Target {
    /// Create a new target
    pub fn new(id: String, amount: BigDecimal, reference: String) -> Self {
        Self {
            id,
            amount,
            reference,
        }
    }
}

/// Outcome of running a subset-sum solver for a single target
///
/// Produced once per (target, solver run) and never mutated. The witness in
/// `matched_transaction_ids` is one valid subset, not necessarily the
/// smallest one; ids appear in the order the solver used them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Identifier of the target this result belongs to
    pub target_id: String,
    /// Whether any non-empty subset of transactions sums to the target
    pub exists: bool,
    /// Identifiers of the matched transactions, in order of use (empty when
    /// no match exists)
    pub matched_transaction_ids: Vec<String>,
    /// Sum of the matched transaction amounts (zero when no match exists)
    pub matched_sum: BigDecimal,
}

impl MatchResult {
    /// Create a result for a target with no matching subset
    pub fn no_match(target_id: String) -> Self {
        Self {
            target_id,
            exists: false,
            matched_transaction_ids: Vec::new(),
            matched_sum: BigDecimal::from(0),
        }
    }

    /// Number of transactions in the witness subset
    pub fn matched_count(&self) -> usize {
        self.matched_transaction_ids.len()
    }
}

/// A single (target, transaction) pair with equal amounts
///
/// Exact matches are not disjoint: one transaction may satisfy several
/// targets and one target may be satisfied by several transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactMatch {
    /// Identifier of the matched target
    pub target_id: String,
    /// Identifier of the matched transaction
    pub transaction_id: String,
    /// The shared amount
    pub amount: BigDecimal,
}

/// A target the engine could not solve for, with the reason
///
/// Recorded in the report instead of aborting the run; the remaining
/// targets are still processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetFailure {
    /// Identifier of the failed target
    pub target_id: String,
    /// Human-readable failure reason
    pub reason: String,
}

/// Configuration for the reconciliation engine and its solvers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Multiplier converting monetary values into integer minor units
    /// (100 = cents)
    pub scale_factor: u32,
    /// Absolute tolerance for floating-point sum comparisons in the
    /// brute-force path
    pub tolerance: f64,
    /// Largest transaction set the brute-force enumerator may be invoked on
    pub brute_force_size_ceiling: usize,
    /// Stop the subset-sum solver at the first transaction that reaches the
    /// target (never changes existence, only the chosen witness)
    pub early_exit_on_first_witness: bool,
}

impl ReconcileConfig {
    /// Default scale factor: work in cents
    pub const DEFAULT_SCALE_FACTOR: u32 = 100;
    /// Single tolerance policy for every floating comparison in the crate
    pub const DEFAULT_TOLERANCE: f64 = 1e-6;
    /// Default safety bound for the exponential brute-force path
    pub const DEFAULT_BRUTE_FORCE_CEILING: usize = 25;
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            scale_factor: Self::DEFAULT_SCALE_FACTOR,
            tolerance: Self::DEFAULT_TOLERANCE,
            brute_force_size_ceiling: Self::DEFAULT_BRUTE_FORCE_CEILING,
            early_exit_on_first_witness: true,
        }
    }
}

/// Errors that can occur in the reconciliation engine
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount out of range after scaling: {0}")]
    AmountOutOfRange(String),
    #[error("Transaction set of size {size} exceeds brute-force ceiling of {ceiling}")]
    SizeCeilingExceeded { size: usize, ceiling: usize },
    #[error("Duplicate identifier: {0}")]
    DuplicateId(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Dataset source error: {0}")]
    Source(String),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
