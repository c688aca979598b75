//! Read-side balance aggregation.
//!
//! Balances and debts are pure functions of a team's expenses and splits;
//! nothing here is stored.

pub mod aggregator;
pub mod types;

pub use aggregator::BalanceAggregator;
pub use types::{BalanceReport, Debt};
