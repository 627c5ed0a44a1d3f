//! Migration CLI for the news schema (`up`, `down`, `status`, `fresh`, ...).
//!
//! Reads `DATABASE_URL` from the environment or a `.env` file.

use sea_orm_migration::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sea_orm_migration=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Running InBrief schema migrations");
    cli::run_cli(migration::Migrator).await;
}
