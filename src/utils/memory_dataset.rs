//! In-memory dataset source for testing and development

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::traits::DatasetSource;
use crate::types::{ReconcileError, ReconcileResult, Target, Transaction};

/// In-memory dataset source backing the engine in tests and demos
#[derive(Debug, Clone)]
pub struct MemoryDataset {
    transactions: Arc<RwLock<Vec<Transaction>>>,
    targets: Arc<RwLock<Vec<Target>>>,
}

impl MemoryDataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self {
            transactions: Arc::new(RwLock::new(Vec::new())),
            targets: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a dataset pre-populated with both batches
    pub fn with_data(transactions: Vec<Transaction>, targets: Vec<Target>) -> Self {
        Self {
            transactions: Arc::new(RwLock::new(transactions)),
            targets: Arc::new(RwLock::new(targets)),
        }
    }

    /// Append a transaction to the dataset
    pub fn push_transaction(&self, transaction: Transaction) {
        self.transactions.write().unwrap().push(transaction);
    }

    /// Append a target to the dataset
    pub fn push_target(&self, target: Target) {
        self.targets.write().unwrap().push(target);
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.transactions.write().unwrap().clear();
        self.targets.write().unwrap().clear();
    }
}

impl Default for MemoryDataset {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatasetSource for MemoryDataset {
    async fn load_transactions(&self) -> ReconcileResult<Vec<Transaction>> {
        self.transactions
            .read()
            .map(|batch| batch.clone())
            .map_err(|_| ReconcileError::Source("transaction batch lock poisoned".to_string()))
    }

    async fn load_targets(&self) -> ReconcileResult<Vec<Target>> {
        self.targets
            .read()
            .map(|batch| batch.clone())
            .map_err(|_| ReconcileError::Source("target batch lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    #[tokio::test]
    async fn test_memory_dataset_round_trip() {
        let dataset = MemoryDataset::new();
        dataset.push_transaction(Transaction::new(
            "T1".to_string(),
            BigDecimal::from(100),
            "Deposit".to_string(),
        ));
        dataset.push_target(Target::new(
            "G1".to_string(),
            BigDecimal::from(100),
            "REF-1".to_string(),
        ));

        let transactions = dataset.load_transactions().await.unwrap();
        let targets = dataset.load_targets().await.unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(targets.len(), 1);
        assert_eq!(transactions[0].id, "T1");

        dataset.clear();
        assert!(dataset.load_transactions().await.unwrap().is_empty());
    }
}
