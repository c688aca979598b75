//! In-memory ledger store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tally_shared::types::{ExpenseId, SplitId, TeamId};

use crate::expense::types::{ExpenseRecord, ExpenseSplit};
use crate::settlement::types::SplitStatus;
use crate::store::LedgerStore;
use crate::store::error::StoreError;

/// Ledger store backed by sharded concurrent maps.
///
/// Each split lives in its own map entry, so a compare-and-set locks only
/// that entry's shard. Inserts publish the team index entry last: an expense
/// is reachable from its team only once the expense and all of its splits
/// are in place.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    expenses: DashMap<ExpenseId, ExpenseRecord>,
    splits: DashMap<SplitId, ExpenseSplit>,
    expense_splits: DashMap<ExpenseId, Vec<SplitId>>,
    team_expenses: DashMap<TeamId, Vec<ExpenseId>>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_splits(&self, split_ids: &[SplitId]) -> Vec<ExpenseSplit> {
        split_ids
            .iter()
            .filter_map(|id| self.splits.get(id).map(|s| s.value().clone()))
            .collect()
    }

    /// A team's expenses ordered by `(created_at, id)`, independent of
    /// insertion order.
    fn team_records(&self, team_id: TeamId) -> Vec<ExpenseRecord> {
        let ids = self
            .team_expenses
            .get(&team_id)
            .map(|ids| ids.value().clone())
            .unwrap_or_default();

        let mut records: Vec<ExpenseRecord> = ids
            .iter()
            .filter_map(|id| self.expenses.get(id).map(|e| e.value().clone()))
            .collect();
        records.sort_by_key(|e| (e.created_at, e.id));
        records
    }

    fn split_ids(&self, expense_id: ExpenseId) -> Vec<SplitId> {
        self.expense_splits
            .get(&expense_id)
            .map(|ids| ids.value().clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn insert_expense(
        &self,
        expense: &ExpenseRecord,
        splits: &[ExpenseSplit],
    ) -> Result<(), StoreError> {
        if self.expenses.contains_key(&expense.id) {
            return Err(StoreError::Conflict(format!(
                "expense {} already exists",
                expense.id
            )));
        }
        if let Some(split) = splits.iter().find(|s| self.splits.contains_key(&s.id)) {
            return Err(StoreError::Conflict(format!(
                "split {} already exists",
                split.id
            )));
        }

        for split in splits {
            self.splits.insert(split.id, split.clone());
        }

        match self.expense_splits.entry(expense.id) {
            Entry::Occupied(_) => {
                for split in splits {
                    self.splits.remove(&split.id);
                }
                return Err(StoreError::Conflict(format!(
                    "expense {} already exists",
                    expense.id
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(splits.iter().map(|s| s.id).collect());
            }
        }

        self.expenses.insert(expense.id, expense.clone());
        self.team_expenses
            .entry(expense.team_id)
            .or_default()
            .push(expense.id);
        Ok(())
    }

    async fn find_expense(
        &self,
        expense_id: ExpenseId,
    ) -> Result<Option<ExpenseRecord>, StoreError> {
        Ok(self.expenses.get(&expense_id).map(|e| e.value().clone()))
    }

    async fn list_expenses(&self, team_id: TeamId) -> Result<Vec<ExpenseRecord>, StoreError> {
        Ok(self.team_records(team_id))
    }

    async fn find_split(&self, split_id: SplitId) -> Result<Option<ExpenseSplit>, StoreError> {
        Ok(self.splits.get(&split_id).map(|s| s.value().clone()))
    }

    async fn list_splits(&self, expense_id: ExpenseId) -> Result<Vec<ExpenseSplit>, StoreError> {
        Ok(self.collect_splits(&self.split_ids(expense_id)))
    }

    async fn list_team_splits(&self, team_id: TeamId) -> Result<Vec<ExpenseSplit>, StoreError> {
        Ok(self
            .team_records(team_id)
            .into_iter()
            .flat_map(|e| self.collect_splits(&self.split_ids(e.id)))
            .collect())
    }

    async fn compare_and_set_status(
        &self,
        split_id: SplitId,
        expected: SplitStatus,
        new: SplitStatus,
    ) -> Result<Option<ExpenseSplit>, StoreError> {
        let Some(mut split) = self.splits.get_mut(&split_id) else {
            return Ok(None);
        };
        if split.status != expected {
            return Ok(None);
        }
        split.status = new;
        Ok(Some(split.value().clone()))
    }
}
