//! Membership directory seams.

use async_trait::async_trait;
use tally_shared::types::{TeamId, UserId};

use crate::store::StoreError;
use crate::team::error::TeamError;
use crate::team::types::{Team, TeamMember};

/// Read-only view of team membership consumed by the ledger.
///
/// Authoritative for payer and debtor validation at expense creation only.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Looks up a team with its member IDs.
    async fn find_team(&self, team_id: TeamId) -> Result<Option<Team>, StoreError>;

    /// Lists the members of a team in join order. Unknown teams have no members.
    async fn get_members(&self, team_id: TeamId) -> Result<Vec<TeamMember>, StoreError>;

    /// Returns true if the user belongs to the team.
    async fn is_member(&self, team_id: TeamId, user_id: UserId) -> Result<bool, StoreError>;

    /// Lists the teams a user belongs to, oldest first.
    async fn teams_for_user(&self, user_id: UserId) -> Result<Vec<Team>, StoreError>;
}

/// Write side of the directory: user profiles, team creation, membership growth.
#[async_trait]
pub trait TeamRegistry: MembershipDirectory {
    /// Creates or refreshes a user's directory profile.
    async fn upsert_user(&self, profile: &TeamMember) -> Result<(), TeamError>;

    /// Creates a team with the creator as its first member.
    async fn create_team(&self, name: &str, creator_id: UserId) -> Result<Team, TeamError>;

    /// Adds a user to a team. Adding an existing member is a no-op.
    async fn add_member(&self, team_id: TeamId, user_id: UserId) -> Result<Team, TeamError>;
}
