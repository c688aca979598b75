//! Team repository: the Postgres membership directory.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use tally_core::store::StoreError;
use tally_core::team::{MembershipDirectory, Team, TeamError, TeamMember, TeamRegistry};
use tally_shared::types::{TeamId, UserId};

use crate::entities::{team_members, teams, users};

/// Team repository backed by `teams`, `team_members`, and `users`.
#[derive(Debug, Clone)]
pub struct TeamRepository {
    db: DatabaseConnection,
}

impl TeamRepository {
    /// Creates a new team repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Member IDs of the given teams in join order, grouped by team.
    async fn member_ids<C: ConnectionTrait>(
        db: &C,
        team_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<UserId>>, DbErr> {
        let rows = team_members::Entity::find()
            .filter(team_members::Column::TeamId.is_in(team_ids))
            .order_by_asc(team_members::Column::Seq)
            .all(db)
            .await?;

        let mut grouped: HashMap<Uuid, Vec<UserId>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.team_id)
                .or_default()
                .push(UserId::from_uuid(row.user_id));
        }
        Ok(grouped)
    }

    async fn load_team<C: ConnectionTrait>(db: &C, team_id: Uuid) -> Result<Option<Team>, DbErr> {
        let Some(team) = teams::Entity::find_by_id(team_id).one(db).await? else {
            return Ok(None);
        };
        let mut members = Self::member_ids(db, vec![team_id]).await?;
        Ok(Some(to_team(team, members.remove(&team_id).unwrap_or_default())))
    }

    async fn user_exists(&self, user_id: UserId) -> Result<bool, DbErr> {
        let count = users::Entity::find_by_id(user_id.into_inner())
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

fn to_team(team: teams::Model, members: Vec<UserId>) -> Team {
    Team {
        id: TeamId::from_uuid(team.id),
        name: team.name,
        creator_id: UserId::from_uuid(team.creator_id),
        members,
        created_at: team.created_at.with_timezone(&Utc),
    }
}

fn store_err(err: DbErr) -> StoreError {
    StoreError::backend(err)
}

#[async_trait]
impl MembershipDirectory for TeamRepository {
    async fn find_team(&self, team_id: TeamId) -> Result<Option<Team>, StoreError> {
        Self::load_team(&self.db, team_id.into_inner())
            .await
            .map_err(store_err)
    }

    async fn get_members(&self, team_id: TeamId) -> Result<Vec<TeamMember>, StoreError> {
        team_members::Entity::find()
            .filter(team_members::Column::TeamId.eq(team_id.into_inner()))
            .order_by_asc(team_members::Column::Seq)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .map(|rows| {
                rows.into_iter()
                    .filter_map(|(_, user)| {
                        user.map(|u| TeamMember {
                            user_id: UserId::from_uuid(u.id),
                            username: u.username,
                            email: u.email,
                        })
                    })
                    .collect()
            })
            .map_err(store_err)
    }

    async fn is_member(&self, team_id: TeamId, user_id: UserId) -> Result<bool, StoreError> {
        let count = team_members::Entity::find()
            .filter(team_members::Column::TeamId.eq(team_id.into_inner()))
            .filter(team_members::Column::UserId.eq(user_id.into_inner()))
            .count(&self.db)
            .await
            .map_err(store_err)?;

        Ok(count > 0)
    }

    async fn teams_for_user(&self, user_id: UserId) -> Result<Vec<Team>, StoreError> {
        let team_ids: Vec<Uuid> = team_members::Entity::find()
            .filter(team_members::Column::UserId.eq(user_id.into_inner()))
            .all(&self.db)
            .await
            .map_err(store_err)?
            .into_iter()
            .map(|m| m.team_id)
            .collect();

        if team_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = teams::Entity::find()
            .filter(teams::Column::Id.is_in(team_ids.clone()))
            .order_by_asc(teams::Column::CreatedAt)
            .order_by_asc(teams::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err)?;
        let mut members = Self::member_ids(&self.db, team_ids)
            .await
            .map_err(store_err)?;

        Ok(rows
            .into_iter()
            .map(|team| {
                let ids = members.remove(&team.id).unwrap_or_default();
                to_team(team, ids)
            })
            .collect())
    }
}

#[async_trait]
impl TeamRegistry for TeamRepository {
    async fn upsert_user(&self, profile: &TeamMember) -> Result<(), TeamError> {
        let user = users::ActiveModel {
            id: Set(profile.user_id.into_inner()),
            username: Set(profile.username.clone()),
            email: Set(profile.email.clone()),
            created_at: Set(Utc::now().into()),
        };

        users::Entity::insert(user)
            .on_conflict(
                OnConflict::column(users::Column::Id)
                    .update_columns([users::Column::Username, users::Column::Email])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(store_err)?;

        Ok(())
    }

    async fn create_team(&self, name: &str, creator_id: UserId) -> Result<Team, TeamError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TeamError::EmptyName);
        }
        if !self.user_exists(creator_id).await.map_err(store_err)? {
            return Err(TeamError::UnknownUser(creator_id));
        }

        let team_id = TeamId::new();
        let now = Utc::now();

        let txn = self.db.begin().await.map_err(store_err)?;

        teams::ActiveModel {
            id: Set(team_id.into_inner()),
            name: Set(name.to_string()),
            creator_id: Set(creator_id.into_inner()),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(store_err)?;

        team_members::ActiveModel {
            team_id: Set(team_id.into_inner()),
            user_id: Set(creator_id.into_inner()),
            joined_at: Set(now.into()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(store_err)?;

        let team = Self::load_team(&txn, team_id.into_inner())
            .await
            .map_err(store_err)?
            .ok_or(TeamError::NotFound(team_id))?;

        txn.commit().await.map_err(store_err)?;

        Ok(team)
    }

    async fn add_member(&self, team_id: TeamId, user_id: UserId) -> Result<Team, TeamError> {
        if !self.user_exists(user_id).await.map_err(store_err)? {
            return Err(TeamError::UnknownUser(user_id));
        }
        let team = Self::load_team(&self.db, team_id.into_inner())
            .await
            .map_err(store_err)?
            .ok_or(TeamError::NotFound(team_id))?;
        if team.is_member(user_id) {
            return Ok(team);
        }

        let membership = team_members::ActiveModel {
            team_id: Set(team_id.into_inner()),
            user_id: Set(user_id.into_inner()),
            joined_at: Set(Utc::now().into()),
            ..Default::default()
        };

        // A concurrent add of the same user is not an error
        team_members::Entity::insert(membership)
            .on_conflict(
                OnConflict::columns([team_members::Column::TeamId, team_members::Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(store_err)?;

        Self::load_team(&self.db, team_id.into_inner())
            .await
            .map_err(store_err)?
            .ok_or(TeamError::NotFound(team_id))
    }
}
