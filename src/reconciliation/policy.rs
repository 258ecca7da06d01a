//! Split amount policy
//!
//! Which number a split reconciles by depends on the owning account: stock
//! and mutual fund accounts reconcile share quantities against a brokerage
//! statement, every other account reconciles monetary value.

use bigdecimal::BigDecimal;

use crate::types::{AccountType, Split};

/// Signed amount a split contributes to a reconciliation of the given account
///
/// For `Stock` and `Mutual` accounts this is the split's share quantity; a
/// split recorded without one falls back to its monetary value. For all other
/// account types it is the monetary value. Pure; assumes the split belongs to
/// an account of the given type.
pub fn reconcile_amount(account_type: &AccountType, split: &Split) -> BigDecimal {
    if account_type.is_investment() {
        match &split.shares {
            Some(shares) => shares.clone(),
            None => split.value.clone(),
        }
    } else {
        split.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinary_account_uses_value() {
        let split = Split::with_shares(
            "brokerage".to_string(),
            BigDecimal::from(100),
            BigDecimal::from(4),
        );
        assert_eq!(
            reconcile_amount(&AccountType::Bank, &split),
            BigDecimal::from(100)
        );
    }

    #[test]
    fn test_investment_account_uses_shares() {
        let split = Split::with_shares(
            "brokerage".to_string(),
            BigDecimal::from(100),
            BigDecimal::from(4),
        );
        assert_eq!(
            reconcile_amount(&AccountType::Stock, &split),
            BigDecimal::from(4)
        );
        assert_eq!(
            reconcile_amount(&AccountType::Mutual, &split),
            BigDecimal::from(4)
        );
    }

    #[test]
    fn test_investment_split_without_shares_falls_back_to_value() {
        let split = Split::new("brokerage".to_string(), BigDecimal::from(250));
        assert_eq!(
            reconcile_amount(&AccountType::Stock, &split),
            BigDecimal::from(250)
        );
    }
}
