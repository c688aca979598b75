//! Ledger error types.
//!
//! Every failure surfaced by [`crate::Ledger`] falls into one [`ErrorKind`].

use thiserror::Error;
use tally_shared::error::AppError;
use tally_shared::types::{ExpenseId, SplitId, TeamId, UserId};

use crate::expense::error::ExpenseError;
use crate::settlement::error::SettlementError;
use crate::store::StoreError;

/// Category of a ledger failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before any state change.
    Validation,
    /// Caller lacks the role the operation requires.
    Authorization,
    /// Operation not legal from the current status.
    InvalidState,
    /// Referenced entity does not exist.
    NotFound,
    /// Infrastructure failure.
    Storage,
}

impl ErrorKind {
    /// Returns the HTTP status code for this kind.
    #[must_use]
    pub const fn http_status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::Authorization => 403,
            Self::NotFound => 404,
            Self::InvalidState => 409,
            Self::Storage => 500,
        }
    }
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// New expense failed validation.
    #[error(transparent)]
    Validation(#[from] ExpenseError),

    /// Settlement transition rejected.
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// Caller is not a member of the team.
    #[error("User {user_id} is not a member of team {team_id}")]
    NotTeamMember {
        /// The team.
        team_id: TeamId,
        /// The caller.
        user_id: UserId,
    },

    /// Team not found.
    #[error("Team {0} not found")]
    TeamNotFound(TeamId),

    /// Expense not found.
    #[error("Expense {0} not found")]
    ExpenseNotFound(ExpenseId),

    /// Split not found.
    #[error("Split {0} not found")]
    SplitNotFound(SplitId),

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Settlement(err) if err.is_authorization() => ErrorKind::Authorization,
            Self::Settlement(_) => ErrorKind::InvalidState,
            Self::NotTeamMember { .. } => ErrorKind::Authorization,
            Self::TeamNotFound(_) | Self::ExpenseNotFound(_) | Self::SplitNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Store(_) => ErrorKind::Storage,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.error_code(),
            Self::Settlement(err) => err.error_code(),
            Self::NotTeamMember { .. } => "NOT_TEAM_MEMBER",
            Self::TeamNotFound(_) => "TEAM_NOT_FOUND",
            Self::ExpenseNotFound(_) => "EXPENSE_NOT_FOUND",
            Self::SplitNotFound(_) => "SPLIT_NOT_FOUND",
            Self::Store(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        self.kind().http_status_code()
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation => Self::Validation(message),
            ErrorKind::Authorization => Self::Forbidden(message),
            ErrorKind::InvalidState => Self::InvalidState(message),
            ErrorKind::NotFound => Self::NotFound(message),
            ErrorKind::Storage => Self::Database(message),
        }
    }
}
