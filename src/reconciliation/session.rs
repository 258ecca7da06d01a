//! Reconciliation session state machine
//!
//! A session is bound to one account and one side of the reconcile window at
//! construction. `refresh` loads the working set of splits, the user toggles
//! per-row pending flags (through row selection, matching the classic
//! reconcile window interaction), and `commit` promotes pending flags into
//! the splits' persisted status. Until commit, nothing touches storage.

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reconciliation::filter::{belongs_to_side, ReconcileSide};
use crate::reconciliation::policy::reconcile_amount;
use crate::traits::LedgerStorage;
use crate::types::*;

/// Observer notified on every pending-flag toggle
///
/// The enclosing reconcile dialog uses this to recompute the displayed
/// difference between statement balance and reconciled balance.
pub trait ReconcileObserver: Send {
    /// Called after a row's pending flag flips; `pending` is the new value
    fn split_toggled(&mut self, row: &ReconcileRow, pending: bool);
}

/// One display row of a reconcile view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileRow {
    /// Parent transaction of the split
    pub transaction_id: String,
    /// The split this row stands for
    pub split_id: String,
    /// Transaction date
    pub date: NaiveDate,
    /// Transaction reference, empty when the transaction has none
    pub reference: String,
    /// Transaction description
    pub description: String,
    /// Signed reconcile amount (value, or shares for investment accounts)
    pub amount: BigDecimal,
    /// Absolute amount, fixed two-decimal formatting, ready for display
    pub display_amount: String,
    /// The split's persisted status as of the last refresh
    pub status: ReconcileStatus,
    /// Displayed status flag: 'c' while pending, else the persisted flag
    pub flag: char,
}

impl ReconcileRow {
    /// Transaction date formatted for display
    pub fn display_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Working set of splits being reconciled for one account and side
///
/// The session owns its rows and pending flags exclusively; the UI layer
/// reads rows and feeds toggles back through [`toggle_row`] or the row
/// selection hooks. It assumes sequential access: external mutation of the
/// account's transactions invalidates the rows until the next `refresh`.
///
/// [`toggle_row`]: ReconcileSession::toggle_row
pub struct ReconcileSession<S: LedgerStorage> {
    storage: S,
    account_id: String,
    account_type: AccountType,
    side: ReconcileSide,
    rows: Vec<ReconcileRow>,
    pending: Vec<bool>,
    selected_row: Option<usize>,
    observers: Vec<Box<dyn ReconcileObserver>>,
}

impl<S: LedgerStorage> ReconcileSession<S> {
    /// Open a session for an account and side
    ///
    /// The account's type is captured here and fixes the amount semantics for
    /// the session's lifetime. The session starts empty; call
    /// [`refresh`](Self::refresh) to load rows.
    pub async fn new(storage: S, account_id: &str, side: ReconcileSide) -> LedgerResult<Self> {
        let account = storage
            .get_account(account_id)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))?;

        Ok(Self {
            storage,
            account_id: account.id,
            account_type: account.account_type,
            side,
            rows: Vec::new(),
            pending: Vec::new(),
            selected_row: None,
            observers: Vec::new(),
        })
    }

    /// Register an observer for toggle notifications
    pub fn add_observer(&mut self, observer: Box<dyn ReconcileObserver>) {
        self.observers.push(observer);
    }

    /// Rebuild the working set from the account's current splits
    ///
    /// Applies the side filter over the storage's stable split order, resets
    /// every pending flag to false and clears the row selection. Prior
    /// pending state is discarded. Idempotent against unchanged data.
    pub async fn refresh(&mut self) -> LedgerResult<()> {
        let records = self.storage.account_splits(&self.account_id).await?;

        self.rows.clear();
        for record in records {
            let amount = reconcile_amount(&self.account_type, &record.split);
            if !belongs_to_side(self.side, record.split.status, &amount) {
                continue;
            }

            self.rows.push(ReconcileRow {
                transaction_id: record.transaction_id,
                split_id: record.split.id,
                date: record.date,
                reference: record.reference.unwrap_or_default(),
                description: record.description,
                display_amount: format_amount(&amount),
                amount,
                status: record.split.status,
                flag: record.split.status.flag_char(),
            });
        }

        self.pending = vec![false; self.rows.len()];
        self.selected_row = None;
        Ok(())
    }

    /// Flip one row's pending flag
    ///
    /// The sole mutation entry point exposed to the UI layer. While pending,
    /// the row displays the Cleared flag regardless of its persisted status;
    /// toggling back reverts to the persisted flag. Every registered observer
    /// is notified with the affected row.
    pub fn toggle_row(&mut self, index: usize) -> LedgerResult<()> {
        if index >= self.rows.len() {
            return Err(LedgerError::RowOutOfRange {
                index,
                count: self.rows.len(),
            });
        }

        self.pending[index] = !self.pending[index];
        let pending = self.pending[index];

        let row = &mut self.rows[index];
        row.flag = if pending {
            ReconcileStatus::Cleared.flag_char()
        } else {
            row.status.flag_char()
        };

        let row = &self.rows[index];
        for observer in &mut self.observers {
            observer.split_toggled(row, pending);
        }

        Ok(())
    }

    /// Row selection hook: selecting a row toggles it on
    ///
    /// The toggle is bound to the selection transition, not to a checkbox:
    /// selecting records the row and toggles it, and a later
    /// [`unselect_row`](Self::unselect_row) of the same row toggles it again.
    /// A click that selects and then deselects therefore leaves the pending
    /// flag where it started. This mirrors the original reconcile window
    /// behavior and is intentional.
    pub fn select_row(&mut self, index: usize) -> LedgerResult<()> {
        if index >= self.rows.len() {
            return Err(LedgerError::RowOutOfRange {
                index,
                count: self.rows.len(),
            });
        }

        self.selected_row = Some(index);
        self.toggle_row(index)
    }

    /// Row deselection hook: deselecting the selected row toggles it off
    ///
    /// Deselecting any other row is a no-op.
    pub fn unselect_row(&mut self, index: usize) -> LedgerResult<()> {
        if self.selected_row == Some(index) {
            self.toggle_row(index)?;
            self.selected_row = None;
        }
        Ok(())
    }

    /// Sum of absolute reconcile amounts over the pending rows
    ///
    /// Zero when the session is empty or has never been refreshed.
    pub fn reconciled_balance(&self) -> BigDecimal {
        self.rows
            .iter()
            .zip(&self.pending)
            .filter(|(_, pending)| **pending)
            .map(|(row, _)| row.amount.abs())
            .sum()
    }

    /// Promote every pending flag into persisted split status
    ///
    /// Each pending row's split is set to `Cleared`; commit only ever
    /// upgrades, it never downgrades a flag. All rows are attempted even when
    /// some fail, and the splits that could not be written are reported
    /// together via [`LedgerError::CommitIncomplete`]. Pending flags are left
    /// untouched; callers typically discard the session or refresh it.
    pub async fn commit(&mut self) -> LedgerResult<()> {
        let mut failed = Vec::new();

        for (row, pending) in self.rows.iter().zip(&self.pending) {
            if !*pending {
                continue;
            }

            let result = self
                .storage
                .set_split_status(&row.transaction_id, &row.split_id, ReconcileStatus::Cleared)
                .await;
            if result.is_err() {
                failed.push(row.split_id.clone());
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(LedgerError::CommitIncomplete { failed })
        }
    }

    /// The rows currently in the working set, in display order
    pub fn rows(&self) -> &[ReconcileRow] {
        &self.rows
    }

    /// Number of rows in the working set
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The currently selected row, if any
    pub fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }

    /// Whether a row's pending flag is set
    pub fn is_pending(&self, index: usize) -> Option<bool> {
        self.pending.get(index).copied()
    }

    /// Side of the reconcile window this session feeds
    pub fn side(&self) -> ReconcileSide {
        self.side
    }

    /// Id of the account being reconciled
    pub fn account_id(&self) -> &str {
        &self.account_id
    }
}

/// Fixed two-decimal formatting of an amount's absolute value
fn format_amount(amount: &BigDecimal) -> String {
    amount
        .abs()
        .with_scale_round(2, RoundingMode::HalfUp)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;

    async fn empty_session() -> ReconcileSession<MemoryStorage> {
        let mut storage = MemoryStorage::new();
        let account = Account::new(
            "checking".to_string(),
            "Checking".to_string(),
            AccountType::Bank,
        );
        storage.save_account(&account).await.unwrap();
        ReconcileSession::new(storage, "checking", ReconcileSide::Debit)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_balance_is_zero_before_refresh() {
        let session = empty_session().await;
        assert_eq!(session.reconciled_balance(), BigDecimal::from(0));
        assert_eq!(session.row_count(), 0);
    }

    #[tokio::test]
    async fn test_toggle_out_of_range() {
        let mut session = empty_session().await;
        session.refresh().await.unwrap();
        assert!(matches!(
            session.toggle_row(0),
            Err(LedgerError::RowOutOfRange { index: 0, count: 0 })
        ));
    }

    #[tokio::test]
    async fn test_unknown_account_rejected() {
        let storage = MemoryStorage::new();
        let result = ReconcileSession::new(storage, "nope", ReconcileSide::Credit).await;
        assert!(matches!(result, Err(LedgerError::AccountNotFound(_))));
    }

    #[test]
    fn test_amount_formatting() {
        assert_eq!(format_amount(&BigDecimal::from(-50)), "50.00");
        assert_eq!(format_amount(&BigDecimal::from(30)), "30.00");
        assert_eq!(
            format_amount(&"12.345".parse::<BigDecimal>().unwrap()),
            "12.35"
        );
    }
}
