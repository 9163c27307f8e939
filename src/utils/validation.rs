//! Validation utilities

use std::collections::HashSet;

use crate::types::{ReconcileError, ReconcileResult, Target, Transaction};

/// Validate that a record identifier is usable
pub fn validate_record_id(id: &str) -> ReconcileResult<()> {
    if id.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Record ID cannot be empty".to_string(),
        ));
    }

    if id.len() > 50 {
        return Err(ReconcileError::Validation(
            "Record ID cannot exceed 50 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that every identifier in the batch is unique
pub fn validate_unique_ids<'a, I>(ids: I) -> ReconcileResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ReconcileError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

/// Validate a full reconciliation batch before the engine runs
///
/// Transaction and target identifiers are checked independently; a target
/// may legitimately share an identifier scheme with a transaction.
pub fn validate_batch(transactions: &[Transaction], targets: &[Target]) -> ReconcileResult<()> {
    for transaction in transactions {
        validate_record_id(&transaction.id)?;
    }
    for target in targets {
        validate_record_id(&target.id)?;
    }

    validate_unique_ids(transactions.iter().map(|t| t.id.as_str()))?;
    validate_unique_ids(targets.iter().map(|t| t.id.as_str()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn transaction(id: &str) -> Transaction {
        Transaction::new(id.to_string(), BigDecimal::from(10), "test".to_string())
    }

    #[test]
    fn test_empty_id_is_rejected() {
        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("   ").is_err());
        assert!(validate_record_id("T1").is_ok());
    }

    #[test]
    fn test_duplicate_transaction_ids_are_rejected() {
        let transactions = vec![transaction("T1"), transaction("T2"), transaction("T1")];

        let result = validate_batch(&transactions, &[]);
        assert!(matches!(result, Err(ReconcileError::DuplicateId(id)) if id == "T1"));
    }

    #[test]
    fn test_unique_batch_passes() {
        let transactions = vec![transaction("T1"), transaction("T2")];
        let targets = vec![Target::new(
            "G1".to_string(),
            BigDecimal::from(10),
            "ref".to_string(),
        )];

        assert!(validate_batch(&transactions, &targets).is_ok());
    }
}
