//! Exhaustive subset-sum search over transaction amounts
//!
//! The correctness baseline for the dynamic-programming solver. Subsets
//! are enumerated in increasing cardinality r = 1…n; within one
//! cardinality, index combinations are visited in lexicographic order, so
//! the first subset found is canonical for a given input order. Sums are
//! compared in floating point within the configured absolute tolerance.
//!
//! Exhaustive means no false negatives, at O(2^n) cost. Callers are
//! responsible for bounding the input size
//! ([`ReconcileConfig::brute_force_size_ceiling`]); the enumerator itself
//! never refuses work.

use bigdecimal::{BigDecimal, ToPrimitive};

use crate::traits::SubsetMatcher;
use crate::types::{ReconcileConfig, ReconcileError, ReconcileResult};

/// Brute-force subset-sum enumerator
pub struct BruteForceSolver {
    /// Absolute tolerance for floating-point sum comparison
    pub tolerance: f64,
}

impl BruteForceSolver {
    /// Create a solver with the default tolerance
    pub fn new() -> Self {
        Self {
            tolerance: ReconcileConfig::DEFAULT_TOLERANCE,
        }
    }

    /// Create a solver with a custom tolerance
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Create a solver from an engine configuration
    pub fn from_config(config: &ReconcileConfig) -> Self {
        Self {
            tolerance: config.tolerance,
        }
    }

    /// Find the first non-empty subset whose sum falls within tolerance of
    /// the target, returning its indices in ascending order
    ///
    /// The empty subset is never considered: a zero target over no
    /// transactions reports no match.
    pub fn find_subset(
        &self,
        amounts: &[BigDecimal],
        target: &BigDecimal,
    ) -> ReconcileResult<Option<Vec<usize>>> {
        let values = to_floats(amounts)?;
        let target = target
            .to_f64()
            .ok_or_else(|| ReconcileError::AmountOutOfRange(target.to_string()))?;

        for cardinality in 1..=values.len() {
            let mut combination: Vec<usize> = (0..cardinality).collect();

            loop {
                let sum: f64 = combination.iter().map(|&index| values[index]).sum();
                if (sum - target).abs() < self.tolerance {
                    return Ok(Some(combination));
                }

                if !next_combination(&mut combination, values.len()) {
                    break;
                }
            }
        }

        Ok(None)
    }

    /// Whether any non-empty subset sums to the target within tolerance
    pub fn exists(&self, amounts: &[BigDecimal], target: &BigDecimal) -> ReconcileResult<bool> {
        Ok(self.find_subset(amounts, target)?.is_some())
    }
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SubsetMatcher for BruteForceSolver {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn subset_exists(
        &self,
        amounts: &[BigDecimal],
        target: &BigDecimal,
    ) -> ReconcileResult<bool> {
        self.exists(amounts, target)
    }
}

fn to_floats(amounts: &[BigDecimal]) -> ReconcileResult<Vec<f64>> {
    amounts
        .iter()
        .map(|amount| {
            amount
                .to_f64()
                .ok_or_else(|| ReconcileError::AmountOutOfRange(amount.to_string()))
        })
        .collect()
}

/// Advance `combination` to the next lexicographic r-combination of 0..n,
/// returning false once the last combination has been visited
fn next_combination(combination: &mut [usize], n: usize) -> bool {
    let r = combination.len();
    let mut i = r;

    while i > 0 {
        i -= 1;
        if combination[i] != i + n - r {
            combination[i] += 1;
            for j in i + 1..r {
                combination[j] = combination[j - 1] + 1;
            }
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn decimals(values: &[&str]) -> Vec<BigDecimal> {
        values
            .iter()
            .map(|v| BigDecimal::from_str(v).unwrap())
            .collect()
    }

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_single_element_match() {
        let solver = BruteForceSolver::new();
        let amounts = decimals(&["10.00", "25.50", "40.00"]);

        let subset = solver.find_subset(&amounts, &dec("25.50")).unwrap();
        assert_eq!(subset, Some(vec![1]));
    }

    #[test]
    fn test_multi_element_match() {
        let solver = BruteForceSolver::new();
        let amounts = decimals(&["10.00", "25.50", "40.00"]);

        let subset = solver.find_subset(&amounts, &dec("65.50")).unwrap();
        assert_eq!(subset, Some(vec![1, 2]));
    }

    #[test]
    fn test_smaller_cardinality_wins() {
        // 3.00 is reachable as [0, 1] and as the single element at index 2;
        // cardinality-first enumeration must return the single element.
        let solver = BruteForceSolver::new();
        let amounts = decimals(&["1.00", "2.00", "3.00"]);

        let subset = solver.find_subset(&amounts, &dec("3.00")).unwrap();
        assert_eq!(subset, Some(vec![2]));
    }

    #[test]
    fn test_lexicographic_order_within_cardinality() {
        // Both [0, 2] and [1, 3] sum to 5.00; [0, 2] comes first in
        // lexicographic index order.
        let solver = BruteForceSolver::new();
        let amounts = decimals(&["2.00", "4.00", "3.00", "1.00"]);

        let subset = solver.find_subset(&amounts, &dec("5.00")).unwrap();
        assert_eq!(subset, Some(vec![0, 2]));
    }

    #[test]
    fn test_no_match() {
        let solver = BruteForceSolver::new();
        let amounts = decimals(&["10.00", "20.00"]);

        assert!(!solver.exists(&amounts, &dec("15.00")).unwrap());
    }

    #[test]
    fn test_empty_input_never_matches() {
        let solver = BruteForceSolver::new();

        assert!(!solver.exists(&[], &dec("0")).unwrap());
        assert!(!solver.exists(&[], &dec("10.00")).unwrap());
    }

    #[test]
    fn test_zero_target_requires_non_empty_subset() {
        let solver = BruteForceSolver::new();

        // No zero-sum subset: no match even though the target is zero
        assert!(!solver.exists(&decimals(&["10.00", "20.00"]), &dec("0")).unwrap());

        // A genuine zero-sum pair does match
        let subset = solver
            .find_subset(&decimals(&["50.00", "-50.00"]), &dec("0"))
            .unwrap();
        assert_eq!(subset, Some(vec![0, 1]));
    }

    #[test]
    fn test_negative_amounts() {
        let solver = BruteForceSolver::new();
        let amounts = decimals(&["100.00", "-40.00", "15.00"]);

        let subset = solver.find_subset(&amounts, &dec("60.00")).unwrap();
        assert_eq!(subset, Some(vec![0, 1]));
    }

    #[test]
    fn test_tolerance_bounds_the_comparison() {
        let amounts = decimals(&["0.10", "0.20"]);

        // 0.1 + 0.2 != 0.3 in binary floating point; the tolerance absorbs it
        assert!(BruteForceSolver::new().exists(&amounts, &dec("0.30")).unwrap());

        // An implausibly tight tolerance rejects the same sum
        let strict = BruteForceSolver::with_tolerance(1e-18);
        assert!(!strict.exists(&amounts, &dec("0.30")).unwrap());
    }
}
