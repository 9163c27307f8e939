//! Scaled-integer subset-sum solver with witness reconstruction
//!
//! The production algorithm of the crate. Amounts are rescaled to integer
//! minor units, then a reachable-sum dynamic program walks the transaction
//! list once, tracking for every sum that some subset can produce the
//! first predecessor pair that produced it. Reachable sums live in an
//! unbounded integer domain, so negative amounts (refunds, chargebacks)
//! and negative targets work unchanged; a fixed 0..target table would not
//! represent them.
//!
//! Complexity is O(n · R) where R is the number of distinct reachable
//! sums, with memory proportional to R.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::traits::SubsetMatcher;
use crate::types::{ReconcileConfig, ReconcileResult};
use crate::utils::scale::{scale_amount, scale_amounts};

/// Outcome of solving one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsetSumSolution {
    /// Whether any non-empty subset of the transactions reaches the target
    pub exists: bool,
    /// Positions of the chosen transactions in the input, in order of use
    /// (empty when `exists` is false)
    pub indices: Vec<usize>,
    /// The reached sum in minor units (zero when `exists` is false)
    pub matched_minor_units: i64,
}

impl SubsetSumSolution {
    fn unreachable() -> Self {
        Self {
            exists: false,
            indices: Vec::new(),
            matched_minor_units: 0,
        }
    }
}

/// Predecessor map over reachable sums for a single solve call
///
/// Maps each reachable minor-unit sum to the first `(previous_sum, index)`
/// pair that produced it, or to no predecessor for the base sum 0 (the
/// empty subset). Keys other than 0 are never overwritten: the index keeps
/// first-reachable-path semantics, which makes the chosen witness
/// deterministic for a given input order. Discarded when the call returns.
struct ReachabilityIndex {
    predecessors: BTreeMap<i64, Option<(i64, usize)>>,
}

impl ReachabilityIndex {
    fn new() -> Self {
        let mut predecessors = BTreeMap::new();
        predecessors.insert(0, None);
        Self { predecessors }
    }

    /// Sums reachable so far, in ascending order
    fn snapshot(&self) -> Vec<i64> {
        self.predecessors.keys().copied().collect()
    }

    /// Record the first path reaching `sum`; later paths are ignored
    fn insert_first(&mut self, sum: i64, previous_sum: i64, index: usize) {
        if let Entry::Vacant(entry) = self.predecessors.entry(sum) {
            entry.insert(Some((previous_sum, index)));
        }
    }

    fn len(&self) -> usize {
        self.predecessors.len()
    }

    /// Walk predecessor links from an arrival event back to sum 0,
    /// returning the used indices in their original order of use
    fn reconstruct(&self, arrival: (i64, usize)) -> Vec<usize> {
        let (mut current, index) = arrival;
        let mut indices = vec![index];

        while let Some(Some((previous_sum, index))) = self.predecessors.get(&current) {
            indices.push(*index);
            current = *previous_sum;
        }

        indices.reverse();
        indices
    }
}

/// Subset-sum solver over scaled integer minor units
pub struct SubsetSumSolver {
    /// Multiplier converting monetary values into minor units
    pub scale_factor: u32,
    /// Stop scanning transactions once the target has been reached
    pub early_exit: bool,
}

impl SubsetSumSolver {
    /// Create a solver with the default scale factor and early exit enabled
    pub fn new() -> Self {
        Self {
            scale_factor: ReconcileConfig::DEFAULT_SCALE_FACTOR,
            early_exit: true,
        }
    }

    /// Create a solver with explicit options
    pub fn with_options(scale_factor: u32, early_exit: bool) -> Self {
        Self {
            scale_factor,
            early_exit,
        }
    }

    /// Create a solver from an engine configuration
    pub fn from_config(config: &ReconcileConfig) -> Self {
        Self {
            scale_factor: config.scale_factor,
            early_exit: config.early_exit_on_first_witness,
        }
    }

    /// Determine whether a non-empty subset of `amounts` sums exactly to
    /// `target`, and reconstruct one witness subset if so
    ///
    /// Amounts or targets outside the representable integer range after
    /// scaling fail with a range error. An unreachable target is a normal
    /// result, not an error.
    pub fn solve(
        &self,
        amounts: &[BigDecimal],
        target: &BigDecimal,
    ) -> ReconcileResult<SubsetSumSolution> {
        let values = scale_amounts(amounts, self.scale_factor)?;
        let target_units = scale_amount(target, self.scale_factor)?;

        let mut reachable = ReachabilityIndex::new();
        // First (previous_sum, index) event that reached the target. Kept
        // outside the index so that a zero target still needs a non-empty
        // subset: the base entry for sum 0 never counts as an arrival.
        let mut arrival: Option<(i64, usize)> = None;

        for (index, &value) in values.iter().enumerate() {
            // Extend only the sums reachable before this transaction.
            // Scanning the live map while inserting would let the same
            // transaction appear twice in one derivation.
            let snapshot = reachable.snapshot();

            for &sum in &snapshot {
                let Some(next) = sum.checked_add(value) else {
                    continue;
                };

                reachable.insert_first(next, sum, index);
                if arrival.is_none() && next == target_units {
                    arrival = Some((sum, index));
                }
            }

            if self.early_exit && arrival.is_some() {
                break;
            }
        }

        let solution = match arrival {
            Some(event) => SubsetSumSolution {
                exists: true,
                indices: reachable.reconstruct(event),
                matched_minor_units: target_units,
            },
            None => SubsetSumSolution::unreachable(),
        };

        debug!(
            exists = solution.exists,
            reachable_sums = reachable.len(),
            transactions = values.len(),
            "subset-sum solve finished"
        );

        Ok(solution)
    }

    /// Whether a non-empty subset reaches the target
    pub fn exists(&self, amounts: &[BigDecimal], target: &BigDecimal) -> ReconcileResult<bool> {
        Ok(self.solve(amounts, target)?.exists)
    }
}

impl Default for SubsetSumSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SubsetMatcher for SubsetSumSolver {
    fn name(&self) -> &'static str {
        "dp"
    }

    fn subset_exists(
        &self,
        amounts: &[BigDecimal],
        target: &BigDecimal,
    ) -> ReconcileResult<bool> {
        self.exists(amounts, target)
    }
}
