//! Settlement error types.

use thiserror::Error;
use tally_shared::types::{ExpenseId, UserId};

use crate::settlement::types::{SettlementAction, SplitStatus};

/// Errors that can occur while settling splits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// Only the split's debtor may request credit for it.
    #[error("User {actor} is not the debtor of this split")]
    NotDebtor {
        /// The user who attempted the request.
        actor: UserId,
    },

    /// Only the expense payer may verify payment.
    #[error("User {actor} is not the payer of this expense")]
    NotPayer {
        /// The user who attempted the verification.
        actor: UserId,
    },

    /// The action is not legal from the split's current status.
    #[error("Cannot {action} a split that is {from}")]
    InvalidTransition {
        /// The split's current status.
        from: SplitStatus,
        /// The attempted action.
        action: SettlementAction,
    },

    /// Every split of the expense is already settled.
    #[error("Expense {0} is already settled")]
    AlreadySettled(ExpenseId),
}

impl SettlementError {
    /// Returns true for errors caused by the caller's role rather than by state.
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotDebtor { .. } | Self::NotPayer { .. })
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotDebtor { .. } | Self::NotPayer { .. } => 403,
            Self::InvalidTransition { .. } | Self::AlreadySettled(_) => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotDebtor { .. } => "NOT_SPLIT_DEBTOR",
            Self::NotPayer { .. } => "NOT_EXPENSE_PAYER",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::AlreadySettled(_) => "EXPENSE_ALREADY_SETTLED",
        }
    }
}
