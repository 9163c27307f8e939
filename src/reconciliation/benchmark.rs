//! Timing harness comparing the solvers over graded input sizes
//!
//! Drives the brute-force enumerator and the dynamic-programming solver as
//! black boxes over prefix samples of a transaction corpus, averaging
//! wall-clock time over repeated runs. The brute-force column is only
//! attempted at or below a safety threshold; above it the field is
//! explicitly absent rather than zero or an error, because an unbounded
//! exponential run could otherwise hang the harness.

use std::time::{Duration, Instant};

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reconciliation::{BruteForceSolver, SubsetSumSolver};
use crate::traits::SubsetMatcher;
use crate::types::{ReconcileConfig, ReconcileError, ReconcileResult};

/// One row of the benchmark table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Number of transactions the solvers were given
    pub input_size: usize,
    /// Average brute-force time, absent above the safety threshold
    pub brute_force: Option<Duration>,
    /// Average dynamic-programming time
    pub dp: Duration,
}

/// Benchmark harness over both solver implementations
pub struct BenchmarkHarness {
    /// Input sizes to sample from the corpus, one record each
    pub sizes: Vec<usize>,
    /// Number of timed runs averaged per record
    pub repeats: u32,
    /// Largest input size the brute-force solver is timed at
    pub brute_force_threshold: usize,
}

impl BenchmarkHarness {
    /// Default input sizes
    pub const DEFAULT_SIZES: [usize; 4] = [50, 100, 200, 400];
    /// Default number of repeats per record
    pub const DEFAULT_REPEATS: u32 = 5;
    /// Default brute-force safety threshold
    pub const DEFAULT_BRUTE_FORCE_THRESHOLD: usize = 100;

    /// Create a harness with default sizes, repeats, and threshold
    pub fn new() -> Self {
        Self {
            sizes: Self::DEFAULT_SIZES.to_vec(),
            repeats: Self::DEFAULT_REPEATS,
            brute_force_threshold: Self::DEFAULT_BRUTE_FORCE_THRESHOLD,
        }
    }

    /// Create a harness with custom input sizes
    pub fn with_sizes(sizes: Vec<usize>) -> Self {
        Self {
            sizes,
            ..Self::new()
        }
    }

    /// Create a harness with explicit options; `repeats` is clamped to at
    /// least one run
    pub fn with_options(sizes: Vec<usize>, repeats: u32, brute_force_threshold: usize) -> Self {
        Self {
            sizes,
            repeats: repeats.max(1),
            brute_force_threshold,
        }
    }

    /// Time both solvers over each configured input size
    ///
    /// Each record samples a deterministic prefix of the corpus and pairs
    /// it with a target chosen by rotating through the candidate list.
    /// Sizes larger than the corpus use the whole corpus.
    pub fn run(
        &self,
        corpus: &[BigDecimal],
        targets: &[BigDecimal],
        config: &ReconcileConfig,
    ) -> ReconcileResult<Vec<BenchmarkRecord>> {
        if targets.is_empty() {
            return Err(ReconcileError::Validation(
                "Benchmark requires at least one candidate target".to_string(),
            ));
        }

        let brute_force = BruteForceSolver::from_config(config);
        let dp = SubsetSumSolver::from_config(config);

        let mut records = Vec::with_capacity(self.sizes.len());

        for (round, &size) in self.sizes.iter().enumerate() {
            let sample = &corpus[..size.min(corpus.len())];
            let target = &targets[round % targets.len()];

            let brute_force_time = if sample.len() <= self.brute_force_threshold {
                Some(self.timed_run(&brute_force, sample, target)?)
            } else {
                debug!(
                    size = sample.len(),
                    threshold = self.brute_force_threshold,
                    "brute-force timing skipped"
                );
                None
            };

            let dp_time = self.timed_run(&dp, sample, target)?;

            records.push(BenchmarkRecord {
                input_size: sample.len(),
                brute_force: brute_force_time,
                dp: dp_time,
            });
        }

        Ok(records)
    }

    fn timed_run(
        &self,
        solver: &dyn SubsetMatcher,
        amounts: &[BigDecimal],
        target: &BigDecimal,
    ) -> ReconcileResult<Duration> {
        let mut total = Duration::ZERO;

        for _ in 0..self.repeats {
            let start = Instant::now();
            solver.subset_exists(amounts, target)?;
            total += start.elapsed();
        }

        debug!(solver = solver.name(), size = amounts.len(), "timed run complete");
        Ok(total / self.repeats)
    }
}

impl Default for BenchmarkHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn corpus(len: usize) -> Vec<BigDecimal> {
        // Deterministic cent-valued amounts
        (0..len)
            .map(|i| BigDecimal::from_str(&format!("{}.25", i + 1)).unwrap())
            .collect()
    }

    #[test]
    fn test_records_cover_every_size() {
        let harness = BenchmarkHarness::with_options(vec![2, 4, 8], 1, 8);
        let targets = vec![BigDecimal::from_str("1.25").unwrap()];

        let records = harness
            .run(&corpus(8), &targets, &ReconcileConfig::default())
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|r| r.input_size).collect::<Vec<_>>(),
            vec![2, 4, 8]
        );
        assert!(records.iter().all(|r| r.brute_force.is_some()));
    }

    #[test]
    fn test_brute_force_skipped_above_threshold() {
        let harness = BenchmarkHarness::with_options(vec![2, 6], 1, 4);
        let targets = vec![BigDecimal::from_str("1.25").unwrap()];

        let records = harness
            .run(&corpus(6), &targets, &ReconcileConfig::default())
            .unwrap();

        assert!(records[0].brute_force.is_some());
        assert!(records[1].brute_force.is_none());
    }

    #[test]
    fn test_oversized_sample_is_clamped_to_corpus() {
        let harness = BenchmarkHarness::with_options(vec![100], 1, 0);
        let targets = vec![BigDecimal::from_str("1.25").unwrap()];

        let records = harness
            .run(&corpus(5), &targets, &ReconcileConfig::default())
            .unwrap();

        assert_eq!(records[0].input_size, 5);
        assert!(records[0].brute_force.is_none());
    }

    #[test]
    fn test_empty_target_list_is_rejected() {
        let harness = BenchmarkHarness::new();

        let result = harness.run(&corpus(5), &[], &ReconcileConfig::default());
        assert!(matches!(result, Err(ReconcileError::Validation(_))));
    }
}
