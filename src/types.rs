//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Account types recognised by the reconciliation engine
///
/// Ordinary accounts reconcile against the monetary value of their splits.
/// `Stock` and `Mutual` accounts reconcile against share quantities instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Checking/savings accounts held at a bank
    Bank,
    /// Cash on hand
    Cash,
    /// Other assets (equipment, receivables, etc.)
    Asset,
    /// Credit cards and lines of credit
    Credit,
    /// Loans and other amounts owed
    Liability,
    /// Owner's interest in the business
    Equity,
    /// Money earned
    Income,
    /// Costs incurred
    Expense,
    /// Individual stock holdings
    Stock,
    /// Mutual fund holdings
    Mutual,
}

impl AccountType {
    /// Whether this account tracks share quantities rather than plain money
    pub fn is_investment(&self) -> bool {
        matches!(self, AccountType::Stock | AccountType::Mutual)
    }
}

/// Progressive reconciliation states a split moves through as the user
/// matches it against a bank statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReconcileStatus {
    /// Never matched against a statement
    NotReconciled,
    /// Matched by the user but not yet part of a finished reconciliation
    Cleared,
    /// Part of a completed reconciliation; immutable to the reconcile view
    Reconciled,
}

impl ReconcileStatus {
    /// Single-character flag used in register and reconcile displays
    pub fn flag_char(&self) -> char {
        match self {
            ReconcileStatus::NotReconciled => 'n',
            ReconcileStatus::Cleared => 'c',
            ReconcileStatus::Reconciled => 'y',
        }
    }
}

/// One leg of a double-entry transaction
///
/// A split carries a signed monetary value against a single account, and for
/// investment accounts a signed share quantity as well. The reconciliation
/// status lives on the split, not the transaction: each leg clears against
/// its own account's statement independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Unique identifier for the split
    pub id: String,
    /// Account this split posts to
    pub account_id: String,
    /// Signed monetary value (positive = debit, negative = credit)
    pub value: BigDecimal,
    /// Signed share quantity, for splits against investment accounts
    pub shares: Option<BigDecimal>,
    /// Persisted reconciliation status
    pub status: ReconcileStatus,
    /// Optional per-split memo
    pub memo: Option<String>,
}

impl Split {
    /// Create a new split with a generated id
    pub fn new(account_id: String, value: BigDecimal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id,
            value,
            shares: None,
            status: ReconcileStatus::NotReconciled,
            memo: None,
        }
    }

    /// Create a new split carrying a share quantity
    pub fn with_shares(account_id: String, value: BigDecimal, shares: BigDecimal) -> Self {
        Self {
            shares: Some(shares),
            ..Self::new(account_id, value)
        }
    }
}

/// Complete transaction made up of two or more splits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction
    pub id: String,
    /// Date when the transaction occurred
    pub date: NaiveDate,
    /// Optional reference (check number, invoice number, etc.)
    pub reference: Option<String>,
    /// Description of the transaction
    pub description: String,
    /// Ordered splits that make up this transaction
    pub splits: Vec<Split>,
    /// Additional metadata
    pub metadata: HashMap<String, String>,
    /// When the transaction was created
    pub created_at: NaiveDateTime,
    /// When the transaction was last updated
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    /// Create a new transaction with no splits
    pub fn new(
        id: String,
        date: NaiveDate,
        description: String,
        reference: Option<String>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            date,
            reference,
            description,
            splits: Vec::new(),
            metadata: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a split to the transaction
    pub fn add_split(&mut self, split: Split) {
        self.splits.push(split);
        self.updated_at = chrono::Utc::now().naive_utc();
    }

    /// Signed sum of all split values
    pub fn imbalance(&self) -> BigDecimal {
        self.splits.iter().map(|s| &s.value).sum()
    }

    /// Check that split values cancel out (debits = credits)
    pub fn is_balanced(&self) -> bool {
        self.imbalance() == BigDecimal::from(0)
    }

    /// Find a split by id
    pub fn split(&self, split_id: &str) -> Option<&Split> {
        self.splits.iter().find(|s| s.id == split_id)
    }

    /// Validate the transaction
    ///
    /// Zero-value splits are legal; they show up on the debit side of a
    /// reconcile view but contribute nothing to balances.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.splits.len() < 2 {
            return Err(LedgerError::InvalidTransaction(
                "Transaction must have at least two splits for double-entry bookkeeping"
                    .to_string(),
            ));
        }

        if !self.is_balanced() {
            return Err(LedgerError::InvalidTransaction(format!(
                "Transaction is not balanced: split values sum to {}",
                self.imbalance()
            )));
        }

        Ok(())
    }
}

/// An account against which splits are posted and reconciled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: String,
    /// Human-readable account name
    pub name: String,
    /// Type of account, which determines reconciliation amount semantics
    pub account_type: AccountType,
    /// Additional metadata
    pub metadata: HashMap<String, String>,
    /// When the account was created
    pub created_at: NaiveDateTime,
    /// When the account was last updated
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Create a new account
    pub fn new(id: String, name: String, account_type: AccountType) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            name,
            account_type,
            metadata: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Errors that can occur in the ledger and reconciliation system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Split not found: {0}")]
    SplitNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Row index {index} out of range ({count} rows)")]
    RowOutOfRange { index: usize, count: usize },
    #[error("Commit failed to clear {} split(s)", .failed.len())]
    CommitIncomplete { failed: Vec<String> },
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flag_chars() {
        assert_eq!(ReconcileStatus::NotReconciled.flag_char(), 'n');
        assert_eq!(ReconcileStatus::Cleared.flag_char(), 'c');
        assert_eq!(ReconcileStatus::Reconciled.flag_char(), 'y');
    }

    #[test]
    fn test_investment_account_types() {
        assert!(AccountType::Stock.is_investment());
        assert!(AccountType::Mutual.is_investment());
        assert!(!AccountType::Bank.is_investment());
        assert!(!AccountType::Expense.is_investment());
    }

    #[test]
    fn test_transaction_balance_check() {
        let mut txn = Transaction::new(
            "txn1".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "Groceries".to_string(),
            None,
        );
        txn.add_split(Split::new("checking".to_string(), BigDecimal::from(-42)));
        assert!(txn.validate().is_err());

        txn.add_split(Split::new("groceries".to_string(), BigDecimal::from(42)));
        assert!(txn.is_balanced());
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_unbalanced_transaction_rejected() {
        let mut txn = Transaction::new(
            "txn2".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            "Broken".to_string(),
            None,
        );
        txn.add_split(Split::new("a".to_string(), BigDecimal::from(10)));
        txn.add_split(Split::new("b".to_string(), BigDecimal::from(-7)));
        assert!(matches!(
            txn.validate(),
            Err(LedgerError::InvalidTransaction(_))
        ));
    }
}
