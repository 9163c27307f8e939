//! Traits for dataset ingestion, solver abstraction, and optional
//! classification

use async_trait::async_trait;
use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Ingestion boundary for the reconciliation engine
///
/// Source format (spreadsheet, CSV, database) is an external concern; the
/// engine only requires two in-memory batches with parallel identifiers.
/// Implement this trait to feed the engine from any backend.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Load the full transaction batch for one run
    async fn load_transactions(&self) -> ReconcileResult<Vec<Transaction>>;

    /// Load the full target batch for one run
    async fn load_targets(&self) -> ReconcileResult<Vec<Target>>;
}

/// A subset-sum solver viewed as a callable black box
///
/// The benchmark harness drives both solver implementations through this
/// trait without knowing which algorithm sits behind it.
pub trait SubsetMatcher: Send + Sync {
    /// Short name used when reporting timings
    fn name(&self) -> &'static str;

    /// Whether any non-empty subset of `amounts` sums to `target`
    fn subset_exists(&self, amounts: &[BigDecimal], target: &BigDecimal)
        -> ReconcileResult<bool>;
}

/// Engineered features for one (transaction, target) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairFeatures {
    /// Identifier of the transaction in the pair
    pub transaction_id: String,
    /// Identifier of the target in the pair
    pub target_id: String,
    /// Transaction amount
    pub transaction_amount: BigDecimal,
    /// Target amount
    pub target_amount: BigDecimal,
    /// Absolute difference between the two amounts
    pub amount_difference: BigDecimal,
    /// Whether the amounts are exactly equal
    pub is_exact_match: bool,
}

/// A pair scored by a classifier with its estimated match likelihood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPair {
    pub transaction_id: String,
    pub target_id: String,
    /// Likelihood in [0, 1] that the pair belongs together
    pub score: f64,
}

/// Output of a completed classifier stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierReport {
    /// One scored entry per evaluated pair
    pub scored: Vec<ScoredPair>,
}

/// Outcome of the capability-gated classifier stage
///
/// A classifier that was never configured yields `Skipped` — a defined
/// result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassifierOutcome {
    /// A classifier was configured and produced a report
    Completed(ClassifierReport),
    /// No classifier was configured for this run
    Skipped,
}

impl ClassifierOutcome {
    /// Whether a classifier actually ran
    pub fn was_run(&self) -> bool {
        matches!(self, ClassifierOutcome::Completed(_))
    }
}

/// Trait for scoring (transaction, target) pairs by match likelihood
pub trait MatchClassifier: Send + Sync {
    /// Score every feature row; one [`ScoredPair`] per input row
    fn classify(&self, features: &[PairFeatures]) -> ReconcileResult<ClassifierReport>;
}

/// Reference classifier scoring pairs by amount proximity
///
/// Exact amounts score 1.0; otherwise the score decays with the absolute
/// difference. Stands in for externally trained models, which are out of
/// scope for this crate.
pub struct AmountProximityClassifier;

impl MatchClassifier for AmountProximityClassifier {
    fn classify(&self, features: &[PairFeatures]) -> ReconcileResult<ClassifierReport> {
        let scored = features
            .iter()
            .map(|pair| {
                let difference = pair
                    .amount_difference
                    .to_f64()
                    .unwrap_or(f64::INFINITY)
                    .abs();
                ScoredPair {
                    transaction_id: pair.transaction_id.clone(),
                    target_id: pair.target_id.clone(),
                    score: 1.0 / (1.0 + difference),
                }
            })
            .collect();

        Ok(ClassifierReport { scored })
    }
}
