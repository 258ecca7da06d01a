//! Main ledger orchestrator that coordinates accounts, transactions and
//! reconciliation sessions

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::ledger::{AccountManager, TransactionManager};
use crate::reconciliation::{ReconcileSession, ReconcileSide};
use crate::traits::*;
use crate::types::*;

/// Main ledger system that orchestrates all accounting operations
pub struct Ledger<S: LedgerStorage> {
    account_manager: AccountManager<S>,
    transaction_manager: TransactionManager<S>,
}

impl<S: LedgerStorage + Clone> Ledger<S> {
    /// Create a new ledger with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            account_manager: AccountManager::new(storage.clone()),
            transaction_manager: TransactionManager::new(storage),
        }
    }

    /// Create a new ledger with custom validators
    pub fn with_validators(
        storage: S,
        account_validator: Box<dyn AccountValidator>,
        transaction_validator: Box<dyn TransactionValidator>,
    ) -> Self {
        Self {
            account_manager: AccountManager::with_validator(storage.clone(), account_validator),
            transaction_manager: TransactionManager::with_validator(storage, transaction_validator),
        }
    }

    // Account operations
    /// Create a new account
    pub async fn create_account(
        &mut self,
        id: String,
        name: String,
        account_type: AccountType,
    ) -> LedgerResult<Account> {
        self.account_manager
            .create_account(id, name, account_type)
            .await
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: &str) -> LedgerResult<Option<Account>> {
        self.account_manager.get_account(account_id).await
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.account_manager.list_accounts().await
    }

    /// List accounts by type
    pub async fn list_accounts_by_type(
        &self,
        account_type: AccountType,
    ) -> LedgerResult<Vec<Account>> {
        self.account_manager
            .list_accounts_by_type(account_type)
            .await
    }

    /// Update an account
    pub async fn update_account(&mut self, account: &Account) -> LedgerResult<()> {
        self.account_manager.update_account(account).await
    }

    /// Delete an account
    pub async fn delete_account(&mut self, account_id: &str) -> LedgerResult<()> {
        self.account_manager.delete_account(account_id).await
    }

    // Transaction operations
    /// Record a new transaction
    pub async fn record_transaction(&mut self, transaction: Transaction) -> LedgerResult<()> {
        self.transaction_manager
            .record_transaction(transaction)
            .await
    }

    /// Get a transaction by ID
    pub async fn get_transaction(&self, transaction_id: &str) -> LedgerResult<Option<Transaction>> {
        self.transaction_manager
            .get_transaction(transaction_id)
            .await
    }

    /// Get all transactions within a date range
    pub async fn get_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<Transaction>> {
        self.transaction_manager
            .get_transactions(start_date, end_date)
            .await
    }

    /// Update a transaction
    pub async fn update_transaction(&mut self, transaction: &Transaction) -> LedgerResult<()> {
        self.transaction_manager
            .update_transaction(transaction)
            .await
    }

    /// Delete a transaction
    pub async fn delete_transaction(&mut self, transaction_id: &str) -> LedgerResult<()> {
        self.transaction_manager
            .delete_transaction(transaction_id)
            .await
    }

    // Balance operations
    /// Get the signed balance of an account
    pub async fn get_account_balance(&self, account_id: &str) -> LedgerResult<BigDecimal> {
        self.account_manager.get_balance(account_id).await
    }

    /// Get the cleared balance of an account
    pub async fn get_cleared_balance(&self, account_id: &str) -> LedgerResult<BigDecimal> {
        self.account_manager.get_cleared_balance(account_id).await
    }

    // Reconciliation
    /// Open a reconciliation session for one side of an account's splits
    ///
    /// The session works against its own handle to the storage backend; the
    /// ledger should not mutate the account's transactions while the session
    /// is live, or the session's rows go stale until its next refresh.
    pub async fn reconcile_session(
        &self,
        account_id: &str,
        side: ReconcileSide,
    ) -> LedgerResult<ReconcileSession<S>> {
        ReconcileSession::new(self.account_manager.storage.clone(), account_id, side).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction::patterns;
    use crate::utils::memory_storage::MemoryStorage;

    #[tokio::test]
    async fn test_ledger_basic_operations() {
        let storage = MemoryStorage::new();
        let mut ledger = Ledger::new(storage);

        // Create accounts
        let checking = ledger
            .create_account(
                "checking".to_string(),
                "Checking".to_string(),
                AccountType::Bank,
            )
            .await
            .unwrap();

        let groceries = ledger
            .create_account(
                "groceries".to_string(),
                "Groceries".to_string(),
                AccountType::Expense,
            )
            .await
            .unwrap();

        // Record a payment out of checking
        let payment = patterns::create_transfer(
            "txn1".to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "Weekly shop".to_string(),
            groceries.id.clone(),
            checking.id.clone(),
            BigDecimal::from(80),
        )
        .unwrap();

        ledger.record_transaction(payment).await.unwrap();

        // Check balances
        let checking_balance = ledger.get_account_balance(&checking.id).await.unwrap();
        let groceries_balance = ledger.get_account_balance(&groceries.id).await.unwrap();

        assert_eq!(checking_balance, BigDecimal::from(-80));
        assert_eq!(groceries_balance, BigDecimal::from(80));

        // Nothing is cleared yet
        let cleared = ledger.get_cleared_balance(&checking.id).await.unwrap();
        assert_eq!(cleared, BigDecimal::from(0));
    }

    #[tokio::test]
    async fn test_transaction_requires_known_accounts() {
        let storage = MemoryStorage::new();
        let mut ledger = Ledger::new(storage);

        let orphan = patterns::create_transfer(
            "txn1".to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "No such accounts".to_string(),
            "a".to_string(),
            "b".to_string(),
            BigDecimal::from(10),
        )
        .unwrap();

        assert!(matches!(
            ledger.record_transaction(orphan).await,
            Err(LedgerError::AccountNotFound(_))
        ));
    }
}
