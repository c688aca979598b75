//! Ledger storage seam.
//!
//! The ledger never mutates a split directly: every transition goes through
//! [`LedgerStore::compare_and_set_status`], which applies the new status only
//! if the split still has the status the caller observed.

pub mod error;
pub mod memory;

use async_trait::async_trait;
use tally_shared::types::{ExpenseId, SplitId, TeamId};

use crate::expense::types::{ExpenseRecord, ExpenseSplit};
use crate::settlement::types::SplitStatus;

pub use error::StoreError;
pub use memory::InMemoryLedgerStore;

/// Persistence for expenses and splits.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Stores an expense with its splits. Readers see all of it or none of it.
    async fn insert_expense(
        &self,
        expense: &ExpenseRecord,
        splits: &[ExpenseSplit],
    ) -> Result<(), StoreError>;

    /// Looks up an expense.
    async fn find_expense(&self, expense_id: ExpenseId)
    -> Result<Option<ExpenseRecord>, StoreError>;

    /// Lists a team's expenses, oldest first.
    async fn list_expenses(&self, team_id: TeamId) -> Result<Vec<ExpenseRecord>, StoreError>;

    /// Looks up a split.
    async fn find_split(&self, split_id: SplitId) -> Result<Option<ExpenseSplit>, StoreError>;

    /// Lists an expense's splits in creation order.
    async fn list_splits(&self, expense_id: ExpenseId) -> Result<Vec<ExpenseSplit>, StoreError>;

    /// Lists every split of every expense of a team.
    async fn list_team_splits(&self, team_id: TeamId) -> Result<Vec<ExpenseSplit>, StoreError>;

    /// Atomically moves a split from `expected` to `new`.
    ///
    /// Returns the updated split, or `None` if the split does not exist or
    /// its status is no longer `expected`.
    async fn compare_and_set_status(
        &self,
        split_id: SplitId,
        expected: SplitStatus,
        new: SplitStatus,
    ) -> Result<Option<ExpenseSplit>, StoreError>;
}
