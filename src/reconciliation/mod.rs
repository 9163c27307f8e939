//! Reconciliation engine orchestrating the matching passes
//!
//! One engine run takes a transaction batch and a target batch, performs
//! the exact-match pass, solves every target with the subset-sum solver,
//! optionally runs a configured classifier, and assembles everything into
//! a single report. All state flows through explicit parameters; the
//! engine keeps nothing between runs.

pub mod benchmark;
pub mod brute_force;
pub mod exact;
pub mod subset_sum;

pub use benchmark::*;
pub use brute_force::*;
pub use exact::*;
pub use subset_sum::*;

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::traits::{ClassifierOutcome, MatchClassifier, PairFeatures};
use crate::types::*;
use crate::utils::scale::descale_amount;
use crate::utils::validation;

/// Full output of one reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Unique identifier of this run
    pub run_id: Uuid,
    /// Every (target, transaction) pair with equal amounts
    pub exact_matches: Vec<ExactMatch>,
    /// One subset-sum result per solvable target
    pub results: Vec<MatchResult>,
    /// Targets that failed with a per-target error (e.g. scaling range)
    pub failures: Vec<TargetFailure>,
    /// Outcome of the optional classifier stage
    pub classifier: ClassifierOutcome,
    /// Number of transactions in the batch
    pub transaction_count: usize,
    /// Number of targets in the batch
    pub target_count: usize,
    /// When the report was generated
    pub generated_at: NaiveDateTime,
}

impl ReconciliationReport {
    /// Number of targets with a matching subset
    pub fn matched_targets(&self) -> usize {
        self.results.iter().filter(|r| r.exists).count()
    }

    /// One-line summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Reconciled {} targets against {} transactions: {} matched, {} exact pairs, {} failed",
            self.target_count,
            self.transaction_count,
            self.matched_targets(),
            self.exact_matches.len(),
            self.failures.len()
        )
    }
}

/// Reconciliation engine
///
/// Holds the run configuration and an optional classifier capability. Each
/// [`reconcile`](Reconciler::reconcile) call is a pure function of its
/// inputs.
pub struct Reconciler {
    config: ReconcileConfig,
    classifier: Option<Box<dyn MatchClassifier>>,
}

impl Reconciler {
    /// Create an engine with the default configuration and no classifier
    pub fn new() -> Self {
        Self {
            config: ReconcileConfig::default(),
            classifier: None,
        }
    }

    /// Create an engine with a custom configuration
    pub fn with_config(config: ReconcileConfig) -> Self {
        Self {
            config,
            classifier: None,
        }
    }

    /// Create an engine with a classifier capability
    pub fn with_classifier(config: ReconcileConfig, classifier: Box<dyn MatchClassifier>) -> Self {
        Self {
            config,
            classifier: Some(classifier),
        }
    }

    /// The engine's configuration
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Reconcile a batch of targets against a batch of transactions
    ///
    /// Runs the exact pass, then the subset-sum solver per target. A target
    /// that fails with a range error is recorded in the report and the run
    /// continues with the remaining targets; only batch-level problems
    /// (duplicate identifiers, classifier failure) abort the run.
    pub fn reconcile(
        &self,
        transactions: &[Transaction],
        targets: &[Target],
    ) -> ReconcileResult<ReconciliationReport> {
        validation::validate_batch(transactions, targets)?;

        let exact_matches = exact::match_exact(transactions, targets, &self.config);

        let amounts: Vec<BigDecimal> = transactions
            .iter()
            .map(|transaction| transaction.amount.clone())
            .collect();
        let solver = SubsetSumSolver::from_config(&self.config);

        let mut results = Vec::new();
        let mut failures = Vec::new();

        for target in targets {
            match solver.solve(&amounts, &target.amount) {
                Ok(solution) if solution.exists => {
                    let matched_transaction_ids = solution
                        .indices
                        .iter()
                        .map(|&index| transactions[index].id.clone())
                        .collect();

                    results.push(MatchResult {
                        target_id: target.id.clone(),
                        exists: true,
                        matched_transaction_ids,
                        matched_sum: descale_amount(
                            solution.matched_minor_units,
                            self.config.scale_factor,
                        ),
                    });
                }
                Ok(_) => results.push(MatchResult::no_match(target.id.clone())),
                Err(err) => {
                    warn!(target_id = %target.id, %err, "target failed, run continues");
                    failures.push(TargetFailure {
                        target_id: target.id.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let classifier = match &self.classifier {
            Some(classifier) => {
                let features = build_pair_features(transactions, targets);
                ClassifierOutcome::Completed(classifier.classify(&features)?)
            }
            None => ClassifierOutcome::Skipped,
        };

        Ok(ReconciliationReport {
            run_id: Uuid::new_v4(),
            exact_matches,
            results,
            failures,
            classifier,
            transaction_count: transactions.len(),
            target_count: targets.len(),
            generated_at: chrono::Utc::now().naive_utc(),
        })
    }

    /// Ceiling-guarded brute-force existence check for one target
    ///
    /// The exponential enumerator is only invoked when the transaction set
    /// is within the configured size ceiling; larger sets are rejected
    /// outright rather than risking an unbounded run.
    pub fn brute_force_check(
        &self,
        transactions: &[Transaction],
        target: &Target,
    ) -> ReconcileResult<bool> {
        if transactions.len() > self.config.brute_force_size_ceiling {
            return Err(ReconcileError::SizeCeilingExceeded {
                size: transactions.len(),
                ceiling: self.config.brute_force_size_ceiling,
            });
        }

        let amounts: Vec<BigDecimal> = transactions
            .iter()
            .map(|transaction| transaction.amount.clone())
            .collect();

        BruteForceSolver::from_config(&self.config).exists(&amounts, &target.amount)
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

/// Build engineered features for every (transaction, target) pair
///
/// The cross join feeds the optional classifier stage; amounts are
/// compared at full decimal precision.
pub fn build_pair_features(transactions: &[Transaction], targets: &[Target]) -> Vec<PairFeatures> {
    let mut features = Vec::with_capacity(transactions.len() * targets.len());

    for transaction in transactions {
        for target in targets {
            let amount_difference = (&transaction.amount - &target.amount).abs();
            let is_exact_match = amount_difference == BigDecimal::from(0);

            features.push(PairFeatures {
                transaction_id: transaction.id.clone(),
                target_id: target.id.clone(),
                transaction_amount: transaction.amount.clone(),
                target_amount: target.amount.clone(),
                amount_difference,
                is_exact_match,
            });
        }
    }

    features
}
