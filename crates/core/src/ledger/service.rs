//! Ledger service.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tally_shared::types::{ExpenseId, SplitId, TeamId, UserId};
use tracing::{debug, info, warn};

use crate::balance::aggregator::BalanceAggregator;
use crate::balance::types::{BalanceReport, Debt};
use crate::expense::service::ExpenseService;
use crate::expense::types::{Expense, ExpenseDetail, ExpenseRecord, ExpenseSplit, NewExpense};
use crate::ledger::error::LedgerError;
use crate::settlement::error::SettlementError;
use crate::settlement::service::SettlementService;
use crate::settlement::types::{ExpenseStatus, SplitStatus};
use crate::store::LedgerStore;
use crate::team::directory::MembershipDirectory;
use crate::team::types::Team;

/// Outcome of a split transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitTransition {
    /// The split after the transition.
    pub split: ExpenseSplit,
    /// The parent expense's status, derived after the transition.
    pub expense_status: ExpenseStatus,
}

/// Expense ledger.
///
/// Cheap to share behind an `Arc`; holds no locks of its own. Split
/// transitions are serialized per split by the store's compare-and-set.
pub struct Ledger {
    store: Arc<dyn LedgerStore>,
    directory: Arc<dyn MembershipDirectory>,
}

impl Ledger {
    /// Creates a ledger over a store and a membership directory.
    pub fn new(store: Arc<dyn LedgerStore>, directory: Arc<dyn MembershipDirectory>) -> Self {
        Self { store, directory }
    }

    // ========== Expenses ==========

    /// Records an expense and its splits.
    ///
    /// The team must exist and `actor` must belong to it. The payer and every
    /// involved user must be members.
    pub async fn create_expense(
        &self,
        actor: UserId,
        input: NewExpense,
    ) -> Result<ExpenseDetail, LedgerError> {
        let team = self.require_member(input.team_id, actor).await?;
        let draft = ExpenseService::prepare(input, &team)?;

        self.store
            .insert_expense(&draft.expense, &draft.splits)
            .await?;

        info!(
            expense_id = %draft.expense.id,
            team_id = %team.id,
            payer_id = %draft.expense.payer_id,
            amount = %draft.expense.amount,
            splits = draft.splits.len(),
            "Expense created"
        );

        let status = SettlementService::expense_status(draft.splits.iter().map(|s| s.status));
        Ok(ExpenseDetail::new(
            draft.expense.with_status(status),
            draft.splits,
        ))
    }

    /// Lists a team's expenses, oldest first.
    pub async fn list_expenses(
        &self,
        actor: UserId,
        team_id: TeamId,
    ) -> Result<Vec<Expense>, LedgerError> {
        self.require_member(team_id, actor).await?;

        let records = self.store.list_expenses(team_id).await?;
        let splits = self.store.list_team_splits(team_id).await?;

        let mut statuses: HashMap<ExpenseId, Vec<SplitStatus>> = HashMap::new();
        for split in &splits {
            statuses.entry(split.expense_id).or_default().push(split.status);
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let status = SettlementService::expense_status(
                    statuses.remove(&record.id).unwrap_or_default(),
                );
                record.with_status(status)
            })
            .collect())
    }

    /// Fetches one expense with its derived status.
    pub async fn get_expense(
        &self,
        actor: UserId,
        expense_id: ExpenseId,
    ) -> Result<Expense, LedgerError> {
        Ok(self.expense_detail(actor, expense_id).await?.expense)
    }

    /// Lists an expense's splits in creation order.
    pub async fn list_splits(
        &self,
        actor: UserId,
        expense_id: ExpenseId,
    ) -> Result<Vec<ExpenseSplit>, LedgerError> {
        Ok(self.expense_detail(actor, expense_id).await?.splits)
    }

    /// Expense with splits, payer share, and settlement progress.
    pub async fn expense_detail(
        &self,
        actor: UserId,
        expense_id: ExpenseId,
    ) -> Result<ExpenseDetail, LedgerError> {
        let record = self.load_expense(expense_id).await?;
        self.require_member(record.team_id, actor).await?;
        self.detail(record).await
    }

    // ========== Settlement ==========

    /// Debtor declares payment of a split: `Pending → Requested`.
    pub async fn request_payment(
        &self,
        split_id: SplitId,
        actor: UserId,
    ) -> Result<SplitTransition, LedgerError> {
        loop {
            let split = self.load_split(split_id).await?;

            let next = SettlementService::request_payment(split.status, split.debtor_id, actor)
                .inspect_err(|err| {
                    warn!(split_id = %split_id, actor = %actor, error = %err, "Payment request rejected");
                })?;

            if let Some(updated) = self
                .store
                .compare_and_set_status(split_id, split.status, next)
                .await?
            {
                info!(split_id = %split_id, debtor_id = %actor, "Payment requested");
                return self.transition_outcome(updated).await;
            }

            debug!(split_id = %split_id, observed = %split.status, "Split changed concurrently, re-reading");
        }
    }

    /// Payer confirms payment of a split: `Pending | Requested → Settled`.
    pub async fn verify_payment(
        &self,
        split_id: SplitId,
        actor: UserId,
    ) -> Result<SplitTransition, LedgerError> {
        let mut split = self.load_split(split_id).await?;
        let expense = self.load_expense(split.expense_id).await?;

        loop {
            let next = SettlementService::verify_payment(split.status, expense.payer_id, actor)
                .inspect_err(|err| {
                    warn!(split_id = %split_id, actor = %actor, error = %err, "Payment verification rejected");
                })?;

            if let Some(updated) = self
                .store
                .compare_and_set_status(split_id, split.status, next)
                .await?
            {
                info!(
                    split_id = %split_id,
                    expense_id = %expense.id,
                    payer_id = %actor,
                    "Payment verified"
                );
                return self.transition_outcome(updated).await;
            }

            debug!(split_id = %split_id, observed = %split.status, "Split changed concurrently, re-reading");
            split = self.load_split(split_id).await?;
        }
    }

    /// Payer settles every outstanding split of an expense at once.
    ///
    /// Splits settled by a concurrent caller are skipped.
    pub async fn settle_expense(
        &self,
        expense_id: ExpenseId,
        actor: UserId,
    ) -> Result<ExpenseDetail, LedgerError> {
        let record = self.load_expense(expense_id).await?;
        if actor != record.payer_id {
            warn!(expense_id = %expense_id, actor = %actor, "Settle rejected: not the payer");
            return Err(SettlementError::NotPayer { actor }.into());
        }

        let splits = self.store.list_splits(expense_id).await?;
        if SettlementService::expense_status(splits.iter().map(|s| s.status))
            == ExpenseStatus::Settled
        {
            return Err(SettlementError::AlreadySettled(expense_id).into());
        }

        let mut settled = 0usize;
        for split in splits.into_iter().filter(ExpenseSplit::is_outstanding) {
            let mut current = split.status;
            while !current.is_terminal() {
                if self
                    .store
                    .compare_and_set_status(split.id, current, SplitStatus::Settled)
                    .await?
                    .is_some()
                {
                    settled += 1;
                    break;
                }
                current = self.load_split(split.id).await?.status;
            }
        }

        info!(expense_id = %expense_id, payer_id = %actor, settled, "Expense settled");
        self.detail(record).await
    }

    // ========== Balances ==========

    /// Net position of every user appearing in the team's expenses.
    ///
    /// Positive means others owe the user.
    pub async fn balances_for_team(
        &self,
        actor: UserId,
        team_id: TeamId,
    ) -> Result<BTreeMap<UserId, Decimal>, LedgerError> {
        let (expenses, splits) = self.team_snapshot(actor, team_id).await?;
        Ok(BalanceAggregator::balances(&expenses, &splits))
    }

    /// Sum of all expense amounts of a team, settled or not.
    pub async fn total_for_team(
        &self,
        actor: UserId,
        team_id: TeamId,
    ) -> Result<Decimal, LedgerError> {
        self.require_member(team_id, actor).await?;
        let expenses = self.store.list_expenses(team_id).await?;
        Ok(BalanceAggregator::total(&expenses))
    }

    /// Pairwise net debts within a team.
    pub async fn debts_for_team(
        &self,
        actor: UserId,
        team_id: TeamId,
    ) -> Result<Vec<Debt>, LedgerError> {
        let (expenses, splits) = self.team_snapshot(actor, team_id).await?;
        Ok(BalanceAggregator::debts(&expenses, &splits))
    }

    /// Total, balances, and debts computed from one read of the team.
    pub async fn balance_report(
        &self,
        actor: UserId,
        team_id: TeamId,
    ) -> Result<BalanceReport, LedgerError> {
        let (expenses, splits) = self.team_snapshot(actor, team_id).await?;
        Ok(BalanceAggregator::report(&expenses, &splits))
    }

    // ========== Helpers ==========

    async fn require_member(&self, team_id: TeamId, actor: UserId) -> Result<Team, LedgerError> {
        let team = self
            .directory
            .find_team(team_id)
            .await?
            .ok_or(LedgerError::TeamNotFound(team_id))?;

        if !team.is_member(actor) {
            warn!(team_id = %team_id, user_id = %actor, "Access denied: not a team member");
            return Err(LedgerError::NotTeamMember {
                team_id,
                user_id: actor,
            });
        }
        Ok(team)
    }

    async fn load_expense(&self, expense_id: ExpenseId) -> Result<ExpenseRecord, LedgerError> {
        self.store
            .find_expense(expense_id)
            .await?
            .ok_or(LedgerError::ExpenseNotFound(expense_id))
    }

    async fn load_split(&self, split_id: SplitId) -> Result<ExpenseSplit, LedgerError> {
        self.store
            .find_split(split_id)
            .await?
            .ok_or(LedgerError::SplitNotFound(split_id))
    }

    async fn detail(&self, record: ExpenseRecord) -> Result<ExpenseDetail, LedgerError> {
        let splits = self.store.list_splits(record.id).await?;
        let status = SettlementService::expense_status(splits.iter().map(|s| s.status));
        Ok(ExpenseDetail::new(record.with_status(status), splits))
    }

    async fn transition_outcome(
        &self,
        split: ExpenseSplit,
    ) -> Result<SplitTransition, LedgerError> {
        let siblings = self.store.list_splits(split.expense_id).await?;
        let expense_status = SettlementService::expense_status(siblings.iter().map(|s| s.status));
        Ok(SplitTransition {
            split,
            expense_status,
        })
    }

    async fn team_snapshot(
        &self,
        actor: UserId,
        team_id: TeamId,
    ) -> Result<(Vec<ExpenseRecord>, Vec<ExpenseSplit>), LedgerError> {
        self.require_member(team_id, actor).await?;
        let expenses = self.store.list_expenses(team_id).await?;
        let splits = self.store.list_team_splits(team_id).await?;
        Ok((expenses, splits))
    }
}
