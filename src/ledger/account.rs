//! Account management functionality

use bigdecimal::BigDecimal;

use crate::traits::*;
use crate::types::*;

/// Account manager for handling account operations
pub struct AccountManager<S: LedgerStorage> {
    pub(crate) storage: S,
    validator: Box<dyn AccountValidator>,
}

impl<S: LedgerStorage> AccountManager<S> {
    /// Create a new account manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultAccountValidator),
        }
    }

    /// Create a new account manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn AccountValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a new account
    pub async fn create_account(
        &mut self,
        id: String,
        name: String,
        account_type: AccountType,
    ) -> LedgerResult<Account> {
        let account = Account::new(id, name, account_type);

        // Validate the account
        self.validator.validate_account(&account)?;

        // Check if account already exists
        if let Some(_existing) = self.storage.get_account(&account.id).await? {
            return Err(LedgerError::Validation(format!(
                "Account with ID '{}' already exists",
                account.id
            )));
        }

        // Save the account
        self.storage.save_account(&account).await?;

        Ok(account)
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: &str) -> LedgerResult<Option<Account>> {
        self.storage.get_account(account_id).await
    }

    /// Get an account by ID, returning an error if not found
    pub async fn get_account_required(&self, account_id: &str) -> LedgerResult<Account> {
        self.storage
            .get_account(account_id)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.storage.list_accounts(None).await
    }

    /// List accounts by type
    pub async fn list_accounts_by_type(
        &self,
        account_type: AccountType,
    ) -> LedgerResult<Vec<Account>> {
        self.storage.list_accounts(Some(account_type)).await
    }

    /// Update an account
    pub async fn update_account(&mut self, account: &Account) -> LedgerResult<()> {
        // Validate the account
        self.validator.validate_account(account)?;

        // Ensure the account exists
        if self.storage.get_account(&account.id).await?.is_none() {
            return Err(LedgerError::AccountNotFound(account.id.clone()));
        }

        self.storage.update_account(account).await
    }

    /// Delete an account
    pub async fn delete_account(&mut self, account_id: &str) -> LedgerResult<()> {
        // Validate deletion
        self.validator.validate_account_deletion(account_id)?;

        // Ensure the account exists
        if self.storage.get_account(account_id).await?.is_none() {
            return Err(LedgerError::AccountNotFound(account_id.to_string()));
        }

        self.storage.delete_account(account_id).await
    }

    /// Get the signed balance of an account (all splits)
    pub async fn get_balance(&self, account_id: &str) -> LedgerResult<BigDecimal> {
        self.storage.account_balance(account_id).await
    }

    /// Get the cleared balance of an account (Cleared and Reconciled splits)
    pub async fn get_cleared_balance(&self, account_id: &str) -> LedgerResult<BigDecimal> {
        self.storage.cleared_balance(account_id).await
    }
}
