//! Split filter for the debit and credit reconcile views

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::ReconcileStatus;

/// Which half of the signed-amount spectrum a reconcile view displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReconcileSide {
    /// Non-negative reconcile amounts (deposits, purchases)
    Debit,
    /// Negative reconcile amounts (withdrawals, sales)
    Credit,
}

/// Whether a split belongs in the view for the given side
///
/// Splits that are already `Reconciled` are never shown; they cannot be
/// re-toggled from the reconcile window. The remaining splits divide by the
/// sign of their reconcile amount: negative amounts are credits, zero and
/// positive amounts are debits. The comparison is exact decimal comparison.
pub fn belongs_to_side(side: ReconcileSide, status: ReconcileStatus, amount: &BigDecimal) -> bool {
    if status == ReconcileStatus::Reconciled {
        return false;
    }

    let zero = BigDecimal::from(0);
    match side {
        ReconcileSide::Credit => *amount < zero,
        ReconcileSide::Debit => *amount >= zero,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconciled_splits_always_excluded() {
        let amount = BigDecimal::from(10);
        assert!(!belongs_to_side(
            ReconcileSide::Debit,
            ReconcileStatus::Reconciled,
            &amount
        ));
        assert!(!belongs_to_side(
            ReconcileSide::Credit,
            ReconcileStatus::Reconciled,
            &(-amount)
        ));
    }

    #[test]
    fn test_negative_amounts_are_credits() {
        let amount = BigDecimal::from(-50);
        assert!(belongs_to_side(
            ReconcileSide::Credit,
            ReconcileStatus::NotReconciled,
            &amount
        ));
        assert!(!belongs_to_side(
            ReconcileSide::Debit,
            ReconcileStatus::NotReconciled,
            &amount
        ));
    }

    #[test]
    fn test_positive_amounts_are_debits() {
        let amount = BigDecimal::from(30);
        assert!(belongs_to_side(
            ReconcileSide::Debit,
            ReconcileStatus::Cleared,
            &amount
        ));
        assert!(!belongs_to_side(
            ReconcileSide::Credit,
            ReconcileStatus::Cleared,
            &amount
        ));
    }

    #[test]
    fn test_zero_amount_is_a_debit() {
        let zero = BigDecimal::from(0);
        assert!(belongs_to_side(
            ReconcileSide::Debit,
            ReconcileStatus::NotReconciled,
            &zero
        ));
        assert!(!belongs_to_side(
            ReconcileSide::Credit,
            ReconcileStatus::NotReconciled,
            &zero
        ));
    }
}
