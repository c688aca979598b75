//! Shared expenses and their even split into per-debtor shares.
//!
//! # Modules
//!
//! - `types` - Expense, split, and draft types
//! - `error` - Expense validation errors
//! - `allocation` - Even split with the payer absorbing the remainder
//! - `service` - Validation of new expenses against a team roster

pub mod allocation;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod allocation_props;

pub use allocation::{Allocation, SplitAllocation};
pub use error::ExpenseError;
pub use service::ExpenseService;
pub use types::{
    Expense, ExpenseDetail, ExpenseDraft, ExpenseRecord, ExpenseSplit, NewExpense,
};
