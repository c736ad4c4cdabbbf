use std::io;

use anyhow::Context;

mod analytics;
mod auth;
mod cli;
mod config;
mod db;
mod error;
mod models;
mod services;
mod store;

use cli::{Prompter, Shell};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    // Logs go to stderr so they never interleave with the menus on stdout
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mood_journal=warn".into());
    if config.log_json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    let db = db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to open the journal database")?;

    db::migrate(&db)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(database_url = %config.database_url, "Database ready");

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut shell = Shell::new(db.clone(), prompter);
    let result = shell.run().await;

    db.close().await;
    result.context("Terminal session failed")
}
