//! Expense repository: the Postgres ledger store.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::debug;

use tally_core::expense::{ExpenseRecord, ExpenseSplit};
use tally_core::settlement::SplitStatus;
use tally_core::store::{LedgerStore, StoreError};
use tally_shared::types::{ExpenseId, SplitId, TeamId, UserId};

use crate::entities::{expense_splits, expenses, sea_orm_active_enums};

/// Expense repository backed by `expenses` and `expense_splits`.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_record(model: expenses::Model) -> ExpenseRecord {
    ExpenseRecord {
        id: ExpenseId::from_uuid(model.id),
        team_id: TeamId::from_uuid(model.team_id),
        name: model.name,
        description: model.description,
        amount: model.amount,
        payer_id: UserId::from_uuid(model.payer_id),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn to_split(model: expense_splits::Model) -> ExpenseSplit {
    ExpenseSplit {
        id: SplitId::from_uuid(model.id),
        expense_id: ExpenseId::from_uuid(model.expense_id),
        debtor_id: UserId::from_uuid(model.debtor_id),
        amount: model.amount,
        status: model.status.into(),
    }
}

fn store_err(err: DbErr) -> StoreError {
    match err {
        DbErr::RecordNotInserted => StoreError::Conflict(err.to_string()),
        other => StoreError::backend(other),
    }
}

#[async_trait]
impl LedgerStore for ExpenseRepository {
    async fn insert_expense(
        &self,
        expense: &ExpenseRecord,
        splits: &[ExpenseSplit],
    ) -> Result<(), StoreError> {
        let txn = self.db.begin().await.map_err(store_err)?;

        let header = expenses::ActiveModel {
            id: Set(expense.id.into_inner()),
            team_id: Set(expense.team_id.into_inner()),
            name: Set(expense.name.clone()),
            description: Set(expense.description.clone()),
            amount: Set(expense.amount),
            payer_id: Set(expense.payer_id.into_inner()),
            created_at: Set(expense.created_at.into()),
        };
        expenses::Entity::insert(header)
            .exec_without_returning(&txn)
            .await
            .map_err(store_err)?;

        if !splits.is_empty() {
            let rows = splits.iter().zip(0i32..).map(|(split, position)| {
                expense_splits::ActiveModel {
                    id: Set(split.id.into_inner()),
                    expense_id: Set(split.expense_id.into_inner()),
                    debtor_id: Set(split.debtor_id.into_inner()),
                    amount: Set(split.amount),
                    status: Set(split.status.into()),
                    position: Set(position),
                }
            });
            expense_splits::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await
                .map_err(store_err)?;
        }

        txn.commit().await.map_err(store_err)?;
        Ok(())
    }

    async fn find_expense(
        &self,
        expense_id: ExpenseId,
    ) -> Result<Option<ExpenseRecord>, StoreError> {
        expenses::Entity::find_by_id(expense_id.into_inner())
            .one(&self.db)
            .await
            .map(|m| m.map(to_record))
            .map_err(store_err)
    }

    async fn list_expenses(&self, team_id: TeamId) -> Result<Vec<ExpenseRecord>, StoreError> {
        expenses::Entity::find()
            .filter(expenses::Column::TeamId.eq(team_id.into_inner()))
            .order_by_asc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .all(&self.db)
            .await
            .map(|rows| rows.into_iter().map(to_record).collect())
            .map_err(store_err)
    }

    async fn find_split(&self, split_id: SplitId) -> Result<Option<ExpenseSplit>, StoreError> {
        expense_splits::Entity::find_by_id(split_id.into_inner())
            .one(&self.db)
            .await
            .map(|m| m.map(to_split))
            .map_err(store_err)
    }

    async fn list_splits(&self, expense_id: ExpenseId) -> Result<Vec<ExpenseSplit>, StoreError> {
        expense_splits::Entity::find()
            .filter(expense_splits::Column::ExpenseId.eq(expense_id.into_inner()))
            .order_by_asc(expense_splits::Column::Position)
            .all(&self.db)
            .await
            .map(|rows| rows.into_iter().map(to_split).collect())
            .map_err(store_err)
    }

    async fn list_team_splits(&self, team_id: TeamId) -> Result<Vec<ExpenseSplit>, StoreError> {
        expense_splits::Entity::find()
            .join(JoinType::InnerJoin, expense_splits::Relation::Expenses.def())
            .filter(expenses::Column::TeamId.eq(team_id.into_inner()))
            .order_by_asc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .order_by_asc(expense_splits::Column::Position)
            .all(&self.db)
            .await
            .map(|rows| rows.into_iter().map(to_split).collect())
            .map_err(store_err)
    }

    async fn compare_and_set_status(
        &self,
        split_id: SplitId,
        expected: SplitStatus,
        new: SplitStatus,
    ) -> Result<Option<ExpenseSplit>, StoreError> {
        let expected = sea_orm_active_enums::SplitStatus::from(expected);
        let new = sea_orm_active_enums::SplitStatus::from(new);

        let updated = expense_splits::Entity::update_many()
            .col_expr(expense_splits::Column::Status, Expr::value(new.to_value()))
            .filter(expense_splits::Column::Id.eq(split_id.into_inner()))
            .filter(expense_splits::Column::Status.eq(expected.to_value()))
            .exec_with_returning(&self.db)
            .await
            .map_err(store_err)?;

        if updated.is_empty() {
            debug!(split_id = %split_id, expected = %expected.to_value(), "Compare-and-set missed");
        }

        Ok(updated.into_iter().next().map(to_split))
    }
}
