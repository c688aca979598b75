//! Ledger orchestration.
//!
//! [`Ledger`] is the single inbound surface for expense creation, settlement
//! transitions, and balance queries. It combines the membership directory,
//! the pure services, and the storage seam.

pub mod error;
pub mod service;


pub use error::{ErrorKind, LedgerError};
pub use service::{Ledger, SplitTransition};
