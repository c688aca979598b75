//! Database seeder for Tally development and testing.
//!
//! Seeds three demo users, a shared team, and one open dinner expense, then
//! prints a bearer token per user for trying the API locally.
//!
//! Reads the same configuration as the server (`config/*`, `TALLY__*`).
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use tally_core::Ledger;
use tally_core::expense::NewExpense;
use tally_core::team::{MembershipDirectory, TeamMember, TeamRegistry};
use tally_db::{ExpenseRepository, TeamRepository};
use tally_shared::types::{TeamId, UserId};
use tally_shared::{AppConfig, JwtService};

const TEAM_NAME: &str = "Weekend Trip";

/// Fixed IDs so repeated runs reuse the same users.
const DEMO_USERS: [(&str, &str, &str); 3] = [
    ("00000000-0000-0000-0000-000000000001", "alice", "alice@tally.dev"),
    ("00000000-0000-0000-0000-000000000002", "bob", "bob@tally.dev"),
    ("00000000-0000-0000-0000-000000000003", "carol", "carol@tally.dev"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Same sources as the server, so printed tokens verify there
    let config = AppConfig::load()?;
    let jwt = JwtService::new(config.jwt.clone());

    println!("Connecting to database...");
    let db = tally_db::connect(&config.database.url).await?;

    let teams = Arc::new(TeamRepository::new(db.clone()));
    let ledger = Ledger::new(Arc::new(ExpenseRepository::new(db)), teams.clone());

    println!("Seeding demo users...");
    let users = seed_users(teams.as_ref()).await?;

    println!("Seeding team...");
    let Some(team_id) = seed_team(teams.as_ref(), &users).await? else {
        println!("  Team '{TEAM_NAME}' already exists, skipping expenses...");
        print_tokens(&jwt, &users)?;
        return Ok(());
    };

    println!("Seeding expenses...");
    let detail = ledger
        .create_expense(
            users[0],
            NewExpense {
                team_id,
                name: "Dinner".to_string(),
                description: "Friday night pizza".to_string(),
                amount: Decimal::new(9000, 2),
                payer_id: users[0],
                involved_member_ids: users[1..].to_vec(),
            },
        )
        .await?;
    println!(
        "  Created expense {} with {} splits",
        detail.expense.id,
        detail.splits.len()
    );

    print_tokens(&jwt, &users)?;
    println!("Seeding complete!");
    Ok(())
}

async fn seed_users(teams: &TeamRepository) -> anyhow::Result<Vec<UserId>> {
    let mut ids = Vec::with_capacity(DEMO_USERS.len());
    for (id, username, email) in DEMO_USERS {
        let profile = TeamMember {
            user_id: UserId::from_uuid(Uuid::parse_str(id)?),
            username: username.to_string(),
            email: email.to_string(),
        };
        teams.upsert_user(&profile).await?;
        println!("  Upserted user: {username}");
        ids.push(profile.user_id);
    }
    Ok(ids)
}

/// Creates the demo team unless the first user already belongs to one with
/// the same name. Returns `None` when it already exists.
async fn seed_team(teams: &TeamRepository, users: &[UserId]) -> anyhow::Result<Option<TeamId>> {
    let Some((&creator, others)) = users.split_first() else {
        anyhow::bail!("no demo users to seed a team with");
    };

    let existing = teams.teams_for_user(creator).await?;
    if existing.iter().any(|t| t.name == TEAM_NAME) {
        return Ok(None);
    }

    let team = teams.create_team(TEAM_NAME, creator).await?;
    for &user_id in others {
        teams.add_member(team.id, user_id).await?;
    }
    println!("  Created team: {TEAM_NAME} ({})", team.id);
    Ok(Some(team.id))
}

fn print_tokens(jwt: &JwtService, users: &[UserId]) -> anyhow::Result<()> {
    println!("Bearer tokens:");
    for ((_, username, _), user_id) in DEMO_USERS.iter().zip(users) {
        println!("  {username}: {}", jwt.generate_access_token(*user_id)?);
    }
    Ok(())
}
