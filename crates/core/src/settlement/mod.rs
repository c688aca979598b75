//! Settlement state machine for expense splits.
//!
//! A split moves `Pending → Requested → Settled`, or straight from `Pending`
//! to `Settled` when the payer confirms without waiting for a request.
//! `Settled` is terminal.
//!
//! # Modules
//!
//! - `types` - Split and expense statuses, settlement actions
//! - `error` - Settlement-specific error types
//! - `service` - Transition rules and expense status derivation

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::SettlementError;
pub use service::SettlementService;
pub use types::{ExpenseStatus, SettlementAction, SplitStatus};
