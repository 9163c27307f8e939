//! Exact amount matching between transactions and targets
//!
//! A cross-join equality filter, O(n·m). Amounts are compared as scaled
//! integer minor units so that equality is exact. The output is not
//! disjoint: one transaction may satisfy several targets and one target
//! may be satisfied by several transactions.

use tracing::warn;

use crate::types::{ExactMatch, ReconcileConfig, Target, Transaction};
use crate::utils::scale::scale_amount;

/// Find every (target, transaction) pair with equal amounts
///
/// Records whose amounts cannot be scaled (out of integer range) are
/// skipped for this pass with a warning; they never abort the scan.
pub fn match_exact(
    transactions: &[Transaction],
    targets: &[Target],
    config: &ReconcileConfig,
) -> Vec<ExactMatch> {
    let transaction_cents: Vec<Option<i64>> = transactions
        .iter()
        .map(|transaction| {
            scale_amount(&transaction.amount, config.scale_factor)
                .map_err(|err| {
                    warn!(transaction_id = %transaction.id, %err, "transaction skipped in exact pass");
                })
                .ok()
        })
        .collect();

    let mut matches = Vec::new();

    for target in targets {
        let target_cents = match scale_amount(&target.amount, config.scale_factor) {
            Ok(cents) => cents,
            Err(err) => {
                warn!(target_id = %target.id, %err, "target skipped in exact pass");
                continue;
            }
        };

        for (transaction, cents) in transactions.iter().zip(&transaction_cents) {
            if *cents == Some(target_cents) {
                matches.push(ExactMatch {
                    target_id: target.id.clone(),
                    transaction_id: transaction.id.clone(),
                    amount: transaction.amount.clone(),
                });
            }
        }
    }

    matches
}
