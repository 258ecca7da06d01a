//! # Reconcile Core
//!
//! A bank-statement reconciliation library built on split-level double-entry
//! bookkeeping.
//!
//! ## Features
//!
//! - **Reconciliation sessions**: per-account, per-side working sets with
//!   session-local "mark cleared" flags and explicit two-phase commit
//! - **Debit/credit split filtering**: exact sign-based views over an
//!   account's splits, excluding already-reconciled ones
//! - **Investment-aware amounts**: stock and mutual fund accounts reconcile
//!   share quantities instead of monetary value
//! - **Double-entry ledger**: balanced multi-split transactions with
//!   validation and balance queries
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   storage
//!
//! ## Quick Start
//!
//! ```rust
//! use reconcile_core::utils::MemoryStorage;
//! use reconcile_core::{AccountType, Ledger, ReconcileSide};
//!
//! # async fn demo() -> Result<(), reconcile_core::LedgerError> {
//! let mut ledger = Ledger::new(MemoryStorage::new());
//! ledger
//!     .create_account("checking".into(), "Checking".into(), AccountType::Bank)
//!     .await?;
//!
//! let mut session = ledger
//!     .reconcile_session("checking", ReconcileSide::Debit)
//!     .await?;
//! session.refresh().await?;
//! # Ok(())
//! # }
//! ```

pub mod ledger;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ledger::*;
pub use reconciliation::*;
pub use traits::*;
pub use types::*;

// Re-export transaction patterns for convenience
pub use ledger::transaction::patterns;
