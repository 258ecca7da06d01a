//! Validation utilities

use crate::traits::*;
use crate::types::*;

/// Validate that an account ID is valid
pub fn validate_account_id(account_id: &str) -> LedgerResult<()> {
    if account_id.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Account ID cannot be empty".to_string(),
        ));
    }

    if account_id.len() > 50 {
        return Err(LedgerError::Validation(
            "Account ID cannot exceed 50 characters".to_string(),
        ));
    }

    // Check for valid characters (alphanumeric, dashes, underscores)
    if !account_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(LedgerError::Validation(
            "Account ID can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate that an account name is valid
pub fn validate_account_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Account name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(LedgerError::Validation(
            "Account name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a transaction description is valid
pub fn validate_transaction_description(description: &str) -> LedgerResult<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Transaction description cannot be empty".to_string(),
        ));
    }

    if description.len() > 500 {
        return Err(LedgerError::Validation(
            "Transaction description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced transaction validator with detailed checks
pub struct EnhancedTransactionValidator;

impl TransactionValidator for EnhancedTransactionValidator {
    fn validate_transaction(&self, transaction: &Transaction) -> LedgerResult<()> {
        // Basic validation (split count, balance)
        transaction.validate()?;

        // Enhanced validations
        validate_transaction_description(&transaction.description)?;

        for split in &transaction.splits {
            validate_account_id(&split.account_id)?;
        }

        // Split ids must be unique within a transaction; commit addresses
        // splits by (transaction id, split id)
        let mut split_ids = std::collections::HashSet::new();
        for split in &transaction.splits {
            if !split_ids.insert(&split.id) {
                return Err(LedgerError::Validation(format!(
                    "Split id '{}' appears multiple times in transaction",
                    split.id
                )));
            }
        }

        Ok(())
    }

    fn validate_account_references(&self, _transaction: &Transaction) -> LedgerResult<()> {
        // This would typically check if accounts exist in storage
        // For this basic implementation, we assume all accounts exist
        Ok(())
    }
}

/// Enhanced account validator with detailed checks
pub struct EnhancedAccountValidator;

impl AccountValidator for EnhancedAccountValidator {
    fn validate_account(&self, account: &Account) -> LedgerResult<()> {
        validate_account_id(&account.id)?;
        validate_account_name(&account.name)?;

        // Additional validations can be added here
        Ok(())
    }

    fn validate_account_deletion(&self, _account_id: &str) -> LedgerResult<()> {
        // This would typically check if account has any splits posted to it
        // For this basic implementation, we allow deletion
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    #[test]
    fn test_account_id_rules() {
        assert!(validate_account_id("checking-01").is_ok());
        assert!(validate_account_id("").is_err());
        assert!(validate_account_id("has spaces").is_err());
    }

    #[test]
    fn test_duplicate_split_ids_rejected() {
        let mut txn = Transaction::new(
            "t1".to_string(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            "Dup splits".to_string(),
            None,
        );
        let mut a = Split::new("checking".to_string(), BigDecimal::from(10));
        let mut b = Split::new("income".to_string(), BigDecimal::from(-10));
        a.id = "same".to_string();
        b.id = "same".to_string();
        txn.add_split(a);
        txn.add_split(b);

        let validator = EnhancedTransactionValidator;
        assert!(matches!(
            validator.validate_transaction(&txn),
            Err(LedgerError::Validation(_))
        ));
    }
}
