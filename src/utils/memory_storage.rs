//! In-memory storage implementation for testing

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    transactions: Arc<RwLock<HashMap<String, Transaction>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            transactions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.accounts.write().unwrap().clear();
        self.transactions.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStorage for MemoryStorage {
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()> {
        self.accounts
            .write()
            .unwrap()
            .insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn get_account(&self, account_id: &str) -> LedgerResult<Option<Account>> {
        Ok(self.accounts.read().unwrap().get(account_id).cloned())
    }

    async fn list_accounts(&self, account_type: Option<AccountType>) -> LedgerResult<Vec<Account>> {
        let accounts = self.accounts.read().unwrap();
        let filtered: Vec<Account> = accounts
            .values()
            .filter(|account| {
                account_type
                    .as_ref()
                    .is_none_or(|t| &account.account_type == t)
            })
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn update_account(&mut self, account: &Account) -> LedgerResult<()> {
        if self.accounts.read().unwrap().contains_key(&account.id) {
            self.accounts
                .write()
                .unwrap()
                .insert(account.id.clone(), account.clone());
            Ok(())
        } else {
            Err(LedgerError::AccountNotFound(account.id.clone()))
        }
    }

    async fn delete_account(&mut self, account_id: &str) -> LedgerResult<()> {
        if self.accounts.write().unwrap().remove(account_id).is_some() {
            Ok(())
        } else {
            Err(LedgerError::AccountNotFound(account_id.to_string()))
        }
    }

    async fn save_transaction(&mut self, transaction: &Transaction) -> LedgerResult<()> {
        self.transactions
            .write()
            .unwrap()
            .insert(transaction.id.clone(), transaction.clone());
        Ok(())
    }

    async fn get_transaction(&self, transaction_id: &str) -> LedgerResult<Option<Transaction>> {
        Ok(self
            .transactions
            .read()
            .unwrap()
            .get(transaction_id)
            .cloned())
    }

    async fn get_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<Transaction>> {
        let transactions = self.transactions.read().unwrap();
        let filtered: Vec<Transaction> = transactions
            .values()
            .filter(|txn| {
                if let Some(start) = start_date {
                    if txn.date < start {
                        return false;
                    }
                }
                if let Some(end) = end_date {
                    if txn.date > end {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn update_transaction(&mut self, transaction: &Transaction) -> LedgerResult<()> {
        if self
            .transactions
            .read()
            .unwrap()
            .contains_key(&transaction.id)
        {
            self.transactions
                .write()
                .unwrap()
                .insert(transaction.id.clone(), transaction.clone());
            Ok(())
        } else {
            Err(LedgerError::TransactionNotFound(transaction.id.clone()))
        }
    }

    async fn delete_transaction(&mut self, transaction_id: &str) -> LedgerResult<()> {
        if self
            .transactions
            .write()
            .unwrap()
            .remove(transaction_id)
            .is_some()
        {
            Ok(())
        } else {
            Err(LedgerError::TransactionNotFound(transaction_id.to_string()))
        }
    }

    async fn account_splits(&self, account_id: &str) -> LedgerResult<Vec<SplitRecord>> {
        let transactions = self.transactions.read().unwrap();

        // HashMap iteration order is arbitrary; sort for the stable order the
        // trait contract requires
        let mut ordered: Vec<&Transaction> = transactions.values().collect();
        ordered.sort_by(|a, b| {
            (a.date, a.created_at, &a.id).cmp(&(b.date, b.created_at, &b.id))
        });

        let mut records = Vec::new();
        for txn in ordered {
            for split in &txn.splits {
                if split.account_id != account_id {
                    continue;
                }
                records.push(SplitRecord {
                    transaction_id: txn.id.clone(),
                    split: split.clone(),
                    date: txn.date,
                    reference: txn.reference.clone(),
                    description: txn.description.clone(),
                    created_at: txn.created_at,
                });
            }
        }

        Ok(records)
    }

    async fn set_split_status(
        &mut self,
        transaction_id: &str,
        split_id: &str,
        status: ReconcileStatus,
    ) -> LedgerResult<()> {
        let mut transactions = self.transactions.write().unwrap();

        let txn = transactions
            .get_mut(transaction_id)
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id.to_string()))?;

        let split = txn
            .splits
            .iter_mut()
            .find(|s| s.id == split_id)
            .ok_or_else(|| LedgerError::SplitNotFound(split_id.to_string()))?;

        split.status = status;
        txn.updated_at = chrono::Utc::now().naive_utc();
        Ok(())
    }

    async fn account_balance(&self, account_id: &str) -> LedgerResult<BigDecimal> {
        if self.accounts.read().unwrap().get(account_id).is_none() {
            return Err(LedgerError::AccountNotFound(account_id.to_string()));
        }

        let transactions = self.transactions.read().unwrap();
        let balance = transactions
            .values()
            .flat_map(|txn| &txn.splits)
            .filter(|split| split.account_id == account_id)
            .map(|split| &split.value)
            .sum();
        Ok(balance)
    }

    async fn cleared_balance(&self, account_id: &str) -> LedgerResult<BigDecimal> {
        if self.accounts.read().unwrap().get(account_id).is_none() {
            return Err(LedgerError::AccountNotFound(account_id.to_string()));
        }

        let transactions = self.transactions.read().unwrap();
        let balance = transactions
            .values()
            .flat_map(|txn| &txn.splits)
            .filter(|split| {
                split.account_id == account_id && split.status != ReconcileStatus::NotReconciled
            })
            .map(|split| &split.value)
            .sum();
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionBuilder;

    #[tokio::test]
    async fn test_account_splits_stable_order() {
        let mut storage = MemoryStorage::new();

        // Insert out of date order
        for (id, day, amount) in [("t3", 20, 5), ("t1", 3, 10), ("t2", 12, 7)] {
            let txn = TransactionBuilder::new(
                id.to_string(),
                NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
                format!("txn {id}"),
            )
            .debit("checking".to_string(), BigDecimal::from(amount))
            .credit("income".to_string(), BigDecimal::from(amount))
            .build()
            .unwrap();
            storage.save_transaction(&txn).await.unwrap();
        }

        let records = storage.account_splits("checking").await.unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);

        // Same call again yields the same sequence
        let again = storage.account_splits("checking").await.unwrap();
        assert_eq!(records, again);
    }

    #[tokio::test]
    async fn test_set_split_status() {
        let mut storage = MemoryStorage::new();
        let txn = TransactionBuilder::new(
            "t1".to_string(),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            "Deposit".to_string(),
        )
        .debit("checking".to_string(), BigDecimal::from(100))
        .credit("income".to_string(), BigDecimal::from(100))
        .build()
        .unwrap();
        let split_id = txn.splits[0].id.clone();
        storage.save_transaction(&txn).await.unwrap();

        storage
            .set_split_status("t1", &split_id, ReconcileStatus::Cleared)
            .await
            .unwrap();

        let stored = storage.get_transaction("t1").await.unwrap().unwrap();
        assert_eq!(
            stored.split(&split_id).unwrap().status,
            ReconcileStatus::Cleared
        );

        // Unknown split id is reported as such
        assert!(matches!(
            storage
                .set_split_status("t1", "missing", ReconcileStatus::Cleared)
                .await,
            Err(LedgerError::SplitNotFound(_))
        ));
    }
}
