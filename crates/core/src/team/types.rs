//! Team domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_shared::types::{TeamId, UserId};

/// A group of users sharing expenses.
///
/// The creator is always the first member. Membership only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team ID.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// User who created the team.
    pub creator_id: UserId,
    /// Member IDs in join order.
    pub members: Vec<UserId>,
    /// When the team was created.
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Creates a team whose only member is its creator.
    #[must_use]
    pub fn new(name: impl Into<String>, creator_id: UserId) -> Self {
        Self {
            id: TeamId::new(),
            name: name.into(),
            creator_id,
            members: vec![creator_id],
            created_at: Utc::now(),
        }
    }

    /// Returns true if the user belongs to the team.
    #[must_use]
    pub fn is_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }
}

/// Directory entry for one member of a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// User ID.
    pub user_id: UserId,
    /// Display name.
    pub username: String,
    /// Contact email.
    pub email: String,
}
