//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::*;

/// A split joined with the display fields of its parent transaction
///
/// This is the shape the reconcile view works with: one row per split, with
/// the parent transaction's date, reference and description alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRecord {
    /// Id of the parent transaction
    pub transaction_id: String,
    /// The split itself
    pub split: Split,
    /// Parent transaction date
    pub date: NaiveDate,
    /// Parent transaction reference (check number, etc.)
    pub reference: Option<String>,
    /// Parent transaction description
    pub description: String,
    /// Parent transaction creation stamp, used for stable ordering
    pub created_at: NaiveDateTime,
}

/// Storage abstraction for the ledger system
///
/// This trait allows the reconciliation core to work with any storage backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these methods.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Save an account to storage
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()>;

    /// Get an account by ID
    async fn get_account(&self, account_id: &str) -> LedgerResult<Option<Account>>;

    /// List all accounts, optionally filtered by type
    async fn list_accounts(&self, account_type: Option<AccountType>) -> LedgerResult<Vec<Account>>;

    /// Update an account
    async fn update_account(&mut self, account: &Account) -> LedgerResult<()>;

    /// Delete an account (if no transactions reference it)
    async fn delete_account(&mut self, account_id: &str) -> LedgerResult<()>;

    /// Save a transaction to storage
    async fn save_transaction(&mut self, transaction: &Transaction) -> LedgerResult<()>;

    /// Get a transaction by ID
    async fn get_transaction(&self, transaction_id: &str) -> LedgerResult<Option<Transaction>>;

    /// List all transactions within a date range
    async fn get_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<Transaction>>;

    /// Update a transaction
    async fn update_transaction(&mut self, transaction: &Transaction) -> LedgerResult<()>;

    /// Delete a transaction
    async fn delete_transaction(&mut self, transaction_id: &str) -> LedgerResult<()>;

    /// List every split posted to an account, joined with its parent
    /// transaction's display fields
    ///
    /// Implementations must return a stable order: two calls with unchanged
    /// data yield the same sequence. The in-memory backend orders by
    /// transaction date, then creation stamp, then transaction id, then split
    /// position within the transaction.
    async fn account_splits(&self, account_id: &str) -> LedgerResult<Vec<SplitRecord>>;

    /// Set the persisted reconciliation status of one split
    ///
    /// This is the sole mutation path used when committing a reconciliation.
    async fn set_split_status(
        &mut self,
        transaction_id: &str,
        split_id: &str,
        status: ReconcileStatus,
    ) -> LedgerResult<()>;

    /// Signed sum of all split values posted to an account
    async fn account_balance(&self, account_id: &str) -> LedgerResult<BigDecimal>;

    /// Signed sum of split values with status Cleared or Reconciled
    async fn cleared_balance(&self, account_id: &str) -> LedgerResult<BigDecimal>;
}

/// Trait for implementing custom account validation rules
pub trait AccountValidator: Send + Sync {
    /// Validate an account before saving
    fn validate_account(&self, account: &Account) -> LedgerResult<()>;

    /// Validate account deletion (e.g., check for existing transactions)
    fn validate_account_deletion(&self, account_id: &str) -> LedgerResult<()>;
}

/// Trait for implementing custom transaction validation rules
pub trait TransactionValidator: Send + Sync {
    /// Validate a transaction before saving
    fn validate_transaction(&self, transaction: &Transaction) -> LedgerResult<()>;

    /// Validate that all referenced accounts exist
    fn validate_account_references(&self, transaction: &Transaction) -> LedgerResult<()>;
}

/// Default account validator with basic rules
pub struct DefaultAccountValidator;

impl AccountValidator for DefaultAccountValidator {
    fn validate_account(&self, account: &Account) -> LedgerResult<()> {
        if account.id.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Account ID cannot be empty".to_string(),
            ));
        }

        if account.name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Account name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_account_deletion(&self, _account_id: &str) -> LedgerResult<()> {
        // Basic implementation - in a real system you'd check for existing splits
        Ok(())
    }
}

/// Default transaction validator with basic double-entry rules
pub struct DefaultTransactionValidator;

impl TransactionValidator for DefaultTransactionValidator {
    fn validate_transaction(&self, transaction: &Transaction) -> LedgerResult<()> {
        transaction.validate()
    }

    fn validate_account_references(&self, _transaction: &Transaction) -> LedgerResult<()> {
        // Basic implementation - in a real system you'd verify accounts exist in storage
        Ok(())
    }
}
