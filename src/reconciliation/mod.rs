//! Bank statement reconciliation
//!
//! The centrepiece is [`ReconcileSession`]: a working set of splits for one
//! account and one side (debit or credit) of the reconcile window, with
//! session-local "mark cleared" flags that are only promoted into the splits'
//! persisted status on an explicit commit.

pub mod filter;
pub mod policy;
pub mod session;

pub use filter::*;
pub use policy::*;
pub use session::*;
