//! In-memory membership directory.

use async_trait::async_trait;
use dashmap::DashMap;
use tally_shared::types::{TeamId, UserId};

use crate::store::StoreError;
use crate::team::directory::{MembershipDirectory, TeamRegistry};
use crate::team::error::TeamError;
use crate::team::types::{Team, TeamMember};

/// Directory backed by concurrent maps. Used by tests and embedded setups.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: DashMap<UserId, TeamMember>,
    teams: DashMap<TeamId, Team>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MembershipDirectory for InMemoryDirectory {
    async fn find_team(&self, team_id: TeamId) -> Result<Option<Team>, StoreError> {
        Ok(self.teams.get(&team_id).map(|team| team.value().clone()))
    }

    async fn get_members(&self, team_id: TeamId) -> Result<Vec<TeamMember>, StoreError> {
        let member_ids = match self.teams.get(&team_id) {
            Some(team) => team.members.clone(),
            None => return Ok(Vec::new()),
        };

        Ok(member_ids
            .into_iter()
            .filter_map(|user_id| self.users.get(&user_id).map(|u| u.value().clone()))
            .collect())
    }

    async fn is_member(&self, team_id: TeamId, user_id: UserId) -> Result<bool, StoreError> {
        Ok(self
            .teams
            .get(&team_id)
            .is_some_and(|team| team.is_member(user_id)))
    }

    async fn teams_for_user(&self, user_id: UserId) -> Result<Vec<Team>, StoreError> {
        let mut teams: Vec<Team> = self
            .teams
            .iter()
            .filter(|entry| entry.is_member(user_id))
            .map(|entry| entry.value().clone())
            .collect();
        teams.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(teams)
    }
}

#[async_trait]
impl TeamRegistry for InMemoryDirectory {
    async fn upsert_user(&self, profile: &TeamMember) -> Result<(), TeamError> {
        self.users.insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn create_team(&self, name: &str, creator_id: UserId) -> Result<Team, TeamError> {
        if name.trim().is_empty() {
            return Err(TeamError::EmptyName);
        }
        if !self.users.contains_key(&creator_id) {
            return Err(TeamError::UnknownUser(creator_id));
        }

        let team = Team::new(name.trim(), creator_id);
        self.teams.insert(team.id, team.clone());
        Ok(team)
    }

    async fn add_member(&self, team_id: TeamId, user_id: UserId) -> Result<Team, TeamError> {
        if !self.users.contains_key(&user_id) {
            return Err(TeamError::UnknownUser(user_id));
        }

        let mut team = self
            .teams
            .get_mut(&team_id)
            .ok_or(TeamError::NotFound(team_id))?;
        if !team.is_member(user_id) {
            team.members.push(user_id);
        }
        Ok(team.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> TeamMember {
        TeamMember {
            user_id: UserId::new(),
            username: name.to_string(),
            email: format!("{name}@example.com"),
        }
    }

    #[tokio::test]
    async fn test_create_team_makes_creator_a_member() {
        let directory = InMemoryDirectory::new();
        let alice = profile("alice");
        directory.upsert_user(&alice).await.unwrap();

        let team = directory.create_team("Flatmates", alice.user_id).await.unwrap();

        assert_eq!(team.creator_id, alice.user_id);
        assert_eq!(team.members, vec![alice.user_id]);
        assert!(directory.is_member(team.id, alice.user_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_team_rejects_blank_name_and_unknown_creator() {
        let directory = InMemoryDirectory::new();
        let alice = profile("alice");
        directory.upsert_user(&alice).await.unwrap();

        assert!(matches!(
            directory.create_team("   ", alice.user_id).await,
            Err(TeamError::EmptyName)
        ));
        assert!(matches!(
            directory.create_team("Trip", UserId::new()).await,
            Err(TeamError::UnknownUser(_))
        ));
    }

    #[tokio::test]
    async fn test_add_member_is_idempotent_and_ordered() {
        let directory = InMemoryDirectory::new();
        let alice = profile("alice");
        let bob = profile("bob");
        directory.upsert_user(&alice).await.unwrap();
        directory.upsert_user(&bob).await.unwrap();
        let team = directory.create_team("Trip", alice.user_id).await.unwrap();

        directory.add_member(team.id, bob.user_id).await.unwrap();
        let team = directory.add_member(team.id, bob.user_id).await.unwrap();

        assert_eq!(team.members, vec![alice.user_id, bob.user_id]);
        let members = directory.get_members(team.id).await.unwrap();
        assert_eq!(members, vec![alice.clone(), bob.clone()]);
    }

    #[tokio::test]
    async fn test_add_member_to_missing_team() {
        let directory = InMemoryDirectory::new();
        let alice = profile("alice");
        directory.upsert_user(&alice).await.unwrap();

        let result = directory.add_member(TeamId::new(), alice.user_id).await;
        assert!(matches!(result, Err(TeamError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_teams_for_user() {
        let directory = InMemoryDirectory::new();
        let alice = profile("alice");
        let bob = profile("bob");
        directory.upsert_user(&alice).await.unwrap();
        directory.upsert_user(&bob).await.unwrap();
        let first = directory.create_team("First", alice.user_id).await.unwrap();
        let second = directory.create_team("Second", bob.user_id).await.unwrap();
        directory.add_member(second.id, alice.user_id).await.unwrap();

        let alice_teams = directory.teams_for_user(alice.user_id).await.unwrap();
        assert_eq!(alice_teams.len(), 2);
        assert!(alice_teams.iter().any(|t| t.id == first.id));
        assert!(alice_teams.iter().any(|t| t.id == second.id));

        let bob_teams = directory.teams_for_user(bob.user_id).await.unwrap();
        assert_eq!(bob_teams.len(), 1);
        assert!(directory.get_members(TeamId::new()).await.unwrap().is_empty());
    }
}
