//! Team registry errors.

use thiserror::Error;
use tally_shared::types::{TeamId, UserId};

use crate::store::StoreError;

/// Errors raised when creating teams or growing their membership.
#[derive(Debug, Error)]
pub enum TeamError {
    /// Team name is blank.
    #[error("Team name cannot be empty")]
    EmptyName,

    /// Team does not exist.
    #[error("Team {0} not found")]
    NotFound(TeamId),

    /// User has no directory profile.
    #[error("User {0} not found")]
    UnknownUser(UserId),

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
