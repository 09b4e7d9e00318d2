//! Demo seed script
//!
//! Provisions the schema and seeds:
//! - 3 teacher accounts: mrodriguez, mchen, principal
//! - 1 welcome announcement, visible from now for one year
//!
//! Usage:
//!   DATABASE_URL=... ./seed-demo [--reset]
//!
//! Environment variables:
//!   DATABASE_URL   PostgreSQL connection string (required)

use anyhow::{Context, Result};
use chrono::{Duration, SecondsFormat, Utc};
use clap::Parser;
use std::env;

use announcements_api::{
    db::{
        self,
        announcements::{AnnouncementStore, PgAnnouncementStore},
        teachers::{demo_teachers, PgTeacherDirectory},
    },
    models::announcement::NewAnnouncement,
    services::timestamps::now_iso,
};

#[derive(Parser)]
#[command(name = "seed-demo", about = "Seed demo teachers and announcements")]
struct Args {
    /// Delete every existing announcement before seeding
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;

    println!("=== Seed Demo ===");

    let pool = db::create_pool(&database_url, 5)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    // 1. Optionally clear announcements
    if args.reset {
        println!("Removing existing announcements...");
        sqlx::query("DELETE FROM announcements")
            .execute(&pool)
            .await
            .context("Failed to clear announcements")?;
    }

    // 2. Teacher accounts
    println!("Upserting teachers...");
    let directory = PgTeacherDirectory::new(pool.clone());
    for teacher in demo_teachers() {
        directory
            .upsert(&teacher)
            .await
            .with_context(|| format!("Failed to upsert teacher {}", teacher.username))?;
    }

    // 3. Welcome announcement
    println!("Inserting welcome announcement...");
    let end_date = (Utc::now() + Duration::days(365)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let store = PgAnnouncementStore::new(pool);
    let id = store
        .insert(NewAnnouncement {
            message: "Welcome to the new school year! Club registrations are open.".into(),
            start_date: None,
            end_date,
            created_by: "principal".into(),
            created_at: now_iso(),
        })
        .await
        .context("Failed to insert announcement")?;

    println!("Done. Announcement id: {id}");
    Ok(())
}
