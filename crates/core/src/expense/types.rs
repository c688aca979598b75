//! Expense domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{ExpenseId, SplitId, TeamId, UserId};

use crate::settlement::types::{ExpenseStatus, SplitStatus};

/// Input for recording a new expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Team the expense belongs to.
    pub team_id: TeamId,
    /// Short label, e.g. "Dinner".
    pub name: String,
    /// Free-form notes. May be empty.
    pub description: String,
    /// Total paid by the payer.
    pub amount: Decimal,
    /// Member who paid.
    pub payer_id: UserId,
    /// Members who share the cost. The payer is always included.
    pub involved_member_ids: Vec<UserId>,
}

/// An expense as stored. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning team.
    pub team_id: TeamId,
    /// Short label.
    pub name: String,
    /// Free-form notes.
    pub description: String,
    /// Total amount, two decimal places.
    pub amount: Decimal,
    /// Member who paid.
    pub payer_id: UserId,
    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
}

impl ExpenseRecord {
    /// Attaches the status derived from the expense's splits.
    #[must_use]
    pub fn with_status(self, status: ExpenseStatus) -> Expense {
        Expense {
            id: self.id,
            team_id: self.team_id,
            name: self.name,
            description: self.description,
            amount: self.amount,
            payer_id: self.payer_id,
            status,
            created_at: self.created_at,
        }
    }
}

/// An expense together with its derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning team.
    pub team_id: TeamId,
    /// Short label.
    pub name: String,
    /// Free-form notes.
    pub description: String,
    /// Total amount, two decimal places.
    pub amount: Decimal,
    /// Member who paid.
    pub payer_id: UserId,
    /// Open while any split is unsettled.
    pub status: ExpenseStatus,
    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
}

/// One debtor's share of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    /// Split ID.
    pub id: SplitId,
    /// Parent expense.
    pub expense_id: ExpenseId,
    /// Member who owes the payer.
    pub debtor_id: UserId,
    /// Amount owed.
    pub amount: Decimal,
    /// Settlement status.
    pub status: SplitStatus,
}

impl ExpenseSplit {
    /// Creates a pending split.
    #[must_use]
    pub fn pending(expense_id: ExpenseId, debtor_id: UserId, amount: Decimal) -> Self {
        Self {
            id: SplitId::new(),
            expense_id,
            debtor_id,
            amount,
            status: SplitStatus::Pending,
        }
    }

    /// Returns true while the debtor still owes this amount.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// A validated expense and its splits, ready to be stored in one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    /// The expense row.
    pub expense: ExpenseRecord,
    /// One pending split per non-payer participant, in participant order.
    pub splits: Vec<ExpenseSplit>,
    /// The payer's own portion, never stored as a split.
    pub payer_share: Decimal,
}

/// Expense with splits and settlement progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDetail {
    /// The expense with its derived status.
    pub expense: Expense,
    /// Splits in creation order.
    pub splits: Vec<ExpenseSplit>,
    /// The payer's own portion.
    pub payer_share: Decimal,
    /// Sum of settled splits.
    pub settled_amount: Decimal,
    /// Sum of splits not yet settled.
    pub outstanding_amount: Decimal,
}

impl ExpenseDetail {
    /// Builds the detail view from an expense and its splits.
    #[must_use]
    pub fn new(expense: Expense, splits: Vec<ExpenseSplit>) -> Self {
        let (settled_amount, outstanding_amount) =
            splits
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(settled, outstanding), s| {
                    if s.is_outstanding() {
                        (settled, outstanding + s.amount)
                    } else {
                        (settled + s.amount, outstanding)
                    }
                });
        let payer_share = expense.amount - settled_amount - outstanding_amount;

        Self {
            expense,
            splits,
            payer_share,
            settled_amount,
            outstanding_amount,
        }
    }
}
