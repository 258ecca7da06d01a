//! Transaction processing and management

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::traits::*;
use crate::types::*;

/// Transaction manager for handling transaction operations
pub struct TransactionManager<S: LedgerStorage> {
    storage: S,
    validator: Box<dyn TransactionValidator>,
}

impl<S: LedgerStorage> TransactionManager<S> {
    /// Create a new transaction manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultTransactionValidator),
        }
    }

    /// Create a new transaction manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn TransactionValidator>) -> Self {
        Self { storage, validator }
    }

    /// Record a new transaction
    pub async fn record_transaction(&mut self, mut transaction: Transaction) -> LedgerResult<()> {
        // Validate the transaction
        self.validator.validate_transaction(&transaction)?;
        self.validator.validate_account_references(&transaction)?;

        // Verify all referenced accounts exist
        for split in &transaction.splits {
            if self.storage.get_account(&split.account_id).await?.is_none() {
                return Err(LedgerError::AccountNotFound(split.account_id.clone()));
            }
        }

        // Update the transaction timestamp
        transaction.updated_at = chrono::Utc::now().naive_utc();

        self.storage.save_transaction(&transaction).await
    }

    /// Get a transaction by ID
    pub async fn get_transaction(&self, transaction_id: &str) -> LedgerResult<Option<Transaction>> {
        self.storage.get_transaction(transaction_id).await
    }

    /// Get a transaction by ID, returning an error if not found
    pub async fn get_transaction_required(
        &self,
        transaction_id: &str,
    ) -> LedgerResult<Transaction> {
        self.storage
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id.to_string()))
    }

    /// Get all transactions within a date range
    pub async fn get_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<Vec<Transaction>> {
        self.storage.get_transactions(start_date, end_date).await
    }

    /// Update a transaction
    pub async fn update_transaction(&mut self, transaction: &Transaction) -> LedgerResult<()> {
        // Ensure it exists before validating the replacement
        self.get_transaction_required(&transaction.id).await?;

        self.validator.validate_transaction(transaction)?;
        self.validator.validate_account_references(transaction)?;

        self.storage.update_transaction(transaction).await
    }

    /// Delete a transaction
    pub async fn delete_transaction(&mut self, transaction_id: &str) -> LedgerResult<()> {
        // Ensure the transaction exists
        self.get_transaction_required(transaction_id).await?;

        self.storage.delete_transaction(transaction_id).await
    }
}

/// Transaction builder for assembling multi-split transactions
#[derive(Debug)]
pub struct TransactionBuilder {
    transaction: Transaction,
}

impl TransactionBuilder {
    /// Create a new transaction builder
    pub fn new(id: String, date: NaiveDate, description: String) -> Self {
        Self {
            transaction: Transaction::new(id, date, description, None),
        }
    }

    /// Set the reference for the transaction
    pub fn reference(mut self, reference: String) -> Self {
        self.transaction.reference = Some(reference);
        self
    }

    /// Add metadata to the transaction
    pub fn metadata(mut self, key: String, value: String) -> Self {
        self.transaction.metadata.insert(key, value);
        self
    }

    /// Add a debit split (positive value)
    pub fn debit(self, account_id: String, amount: BigDecimal) -> Self {
        self.split(Split::new(account_id, amount))
    }

    /// Add a credit split (negative value)
    pub fn credit(self, account_id: String, amount: BigDecimal) -> Self {
        self.split(Split::new(account_id, -amount))
    }

    /// Add a split carrying a share quantity, for investment accounts
    pub fn shares(self, account_id: String, value: BigDecimal, shares: BigDecimal) -> Self {
        self.split(Split::with_shares(account_id, value, shares))
    }

    /// Add a pre-built split
    pub fn split(mut self, split: Split) -> Self {
        self.transaction.add_split(split);
        self
    }

    /// Build the transaction
    pub fn build(self) -> LedgerResult<Transaction> {
        self.transaction.validate()?;
        Ok(self.transaction)
    }
}

/// Common transaction patterns
pub mod patterns {
    use super::*;

    /// Create a transfer between two accounts (debit `to`, credit `from`)
    pub fn create_transfer(
        id: String,
        date: NaiveDate,
        description: String,
        to_account_id: String,
        from_account_id: String,
        amount: BigDecimal,
    ) -> LedgerResult<Transaction> {
        TransactionBuilder::new(id, date, description)
            .debit(to_account_id, amount.clone())
            .credit(from_account_id, amount)
            .build()
    }

    /// Create a check payment (credit the checking account, debit an expense)
    pub fn create_check_payment(
        id: String,
        date: NaiveDate,
        description: String,
        check_number: String,
        checking_account_id: String,
        expense_account_id: String,
        amount: BigDecimal,
    ) -> LedgerResult<Transaction> {
        TransactionBuilder::new(id, date, description)
            .reference(check_number)
            .debit(expense_account_id, amount.clone())
            .credit(checking_account_id, amount)
            .build()
    }

    /// Create a share purchase (debit the investment account with both cost
    /// and share quantity, credit the funding account)
    pub fn create_share_purchase(
        id: String,
        date: NaiveDate,
        description: String,
        investment_account_id: String,
        funding_account_id: String,
        cost: BigDecimal,
        share_quantity: BigDecimal,
    ) -> LedgerResult<Transaction> {
        TransactionBuilder::new(id, date, description)
            .shares(investment_account_id, cost.clone(), share_quantity)
            .credit(funding_account_id, cost)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_signs_splits() {
        let txn = TransactionBuilder::new(
            "t1".to_string(),
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            "Rent".to_string(),
        )
        .reference("104".to_string())
        .debit("rent".to_string(), BigDecimal::from(900))
        .credit("checking".to_string(), BigDecimal::from(900))
        .build()
        .unwrap();

        assert_eq!(txn.splits[0].value, BigDecimal::from(900));
        assert_eq!(txn.splits[1].value, BigDecimal::from(-900));
        assert_eq!(txn.reference.as_deref(), Some("104"));
    }

    #[test]
    fn test_share_purchase_pattern() {
        let txn = patterns::create_share_purchase(
            "t2".to_string(),
            NaiveDate::from_ymd_opt(2024, 2, 11).unwrap(),
            "Buy ACME".to_string(),
            "brokerage".to_string(),
            "checking".to_string(),
            BigDecimal::from(100),
            BigDecimal::from(4),
        )
        .unwrap();

        assert!(txn.is_balanced());
        assert_eq!(txn.splits[0].shares, Some(BigDecimal::from(4)));
        assert_eq!(txn.splits[1].shares, None);
    }
}
