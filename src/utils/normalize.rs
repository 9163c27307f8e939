//! Amount normalization and raw record ingestion
//!
//! Converts currency-formatted strings into exact decimal values and turns
//! raw tabular rows into [`Transaction`] and [`Target`] batches. Records
//! with a missing or unparseable amount are excluded and logged; a bad row
//! never aborts ingestion of the rest.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::types::{ReconcileError, ReconcileResult, Target, Transaction};

/// A raw tabular row before normalization
///
/// `text` carries the description column for transactions and the reference
/// column for targets. `id` is optional; rows without one receive a
/// sequential identifier during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Amount column as it appeared in the source (may be absent)
    pub amount: Option<String>,
    /// Description or reference column
    pub text: String,
    /// Identifier column, if the source provides one
    pub id: Option<String>,
}

impl RawRecord {
    /// Create a raw record without an identifier
    pub fn new(amount: Option<String>, text: String) -> Self {
        Self {
            amount,
            text,
            id: None,
        }
    }

    /// Create a raw record with a source-provided identifier
    pub fn with_id(amount: Option<String>, text: String, id: String) -> Self {
        Self {
            amount,
            text,
            id: Some(id),
        }
    }
}

/// Parse a currency-formatted string into an exact decimal value
///
/// Strips a leading currency symbol, thousands separators, and surrounding
/// whitespace. Anything that does not parse as a decimal afterwards is an
/// [`ReconcileError::InvalidAmount`].
pub fn normalize_amount(raw: &str) -> ReconcileResult<BigDecimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Err(ReconcileError::InvalidAmount(raw.to_string()));
    }

    BigDecimal::from_str(&cleaned).map_err(|_| ReconcileError::InvalidAmount(raw.to_string()))
}

/// Normalize raw rows into transactions, excluding invalid records
///
/// Surviving rows without a source identifier are labeled "T1", "T2", …
/// in order of appearance.
pub fn normalize_transactions(records: &[RawRecord]) -> Vec<Transaction> {
    let mut transactions = Vec::with_capacity(records.len());

    for record in records {
        match parse_record_amount(record) {
            Some(amount) => {
                let id = record
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("T{}", transactions.len() + 1));
                transactions.push(Transaction::new(id, amount, record.text.clone()));
            }
            None => {
                warn!(text = %record.text, "transaction excluded: missing or invalid amount");
            }
        }
    }

    transactions
}

/// Normalize raw rows into targets, excluding invalid records
///
/// Surviving rows without a source identifier are labeled "G1", "G2", …
/// in order of appearance.
pub fn normalize_targets(records: &[RawRecord]) -> Vec<Target> {
    let mut targets = Vec::with_capacity(records.len());

    for record in records {
        match parse_record_amount(record) {
            Some(amount) => {
                let id = record
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("G{}", targets.len() + 1));
                targets.push(Target::new(id, amount, record.text.clone()));
            }
            None => {
                warn!(text = %record.text, "target excluded: missing or invalid amount");
            }
        }
    }

    targets
}

fn parse_record_amount(record: &RawRecord) -> Option<BigDecimal> {
    record
        .amount
        .as_deref()
        .and_then(|raw| normalize_amount(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_currency_formatted_amounts() {
        assert_eq!(
            normalize_amount("$1,234.56").unwrap(),
            BigDecimal::from_str("1234.56").unwrap()
        );
        assert_eq!(
            normalize_amount("  42.00 ").unwrap(),
            BigDecimal::from_str("42.00").unwrap()
        );
        assert_eq!(
            normalize_amount("-17.25").unwrap(),
            BigDecimal::from_str("-17.25").unwrap()
        );
    }

    #[test]
    fn test_invalid_amounts_are_rejected() {
        for raw in ["", "   ", "abc", "$", "12.3.4"] {
            assert!(
                matches!(normalize_amount(raw), Err(ReconcileError::InvalidAmount(_))),
                "expected rejection for {raw:?}"
            );
        }
    }

    #[test]
    fn test_normalize_transactions_excludes_bad_rows() {
        let records = vec![
            RawRecord::new(Some("$100.00".to_string()), "Invoice".to_string()),
            RawRecord::new(None, "Missing amount".to_string()),
            RawRecord::new(Some("oops".to_string()), "Garbage amount".to_string()),
            RawRecord::new(Some("250.75".to_string()), "Wire".to_string()),
        ];

        let transactions = normalize_transactions(&records);

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].id, "T1");
        assert_eq!(transactions[0].description, "Invoice");
        assert_eq!(transactions[1].id, "T2");
        assert_eq!(
            transactions[1].amount,
            BigDecimal::from_str("250.75").unwrap()
        );
    }

    #[test]
    fn test_source_ids_are_preserved() {
        let records = vec![RawRecord::with_id(
            Some("10.00".to_string()),
            "Deposit".to_string(),
            "BANK-77".to_string(),
        )];

        let transactions = normalize_transactions(&records);
        assert_eq!(transactions[0].id, "BANK-77");
    }

    #[test]
    fn test_normalize_targets_labels_sequentially() {
        let records = vec![
            RawRecord::new(Some("60.00".to_string()), "REF-1".to_string()),
            RawRecord::new(None, "REF-2".to_string()),
            RawRecord::new(Some("75.00".to_string()), "REF-3".to_string()),
        ];

        let targets = normalize_targets(&records);

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].id, "G1");
        assert_eq!(targets[1].id, "G2");
        assert_eq!(targets[1].reference, "REF-3");
    }
}
