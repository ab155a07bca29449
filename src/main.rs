//! Binary entry point: wires configuration, database, and the REST API.

use community_ledger::{api, config, core, errors::Result};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application configuration and rate table
    let app_config = config::AppConfig::from_env()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    let rates = config::rates::load_rates(&app_config.rates_path)
        .inspect(|_| info!("Disbursement rate table loaded."))
        .inspect_err(|e| error!("Failed to load rate table: {}", e))?;

    // 4. Initialize database
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;

    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed the bootstrap admin account (if configured)
    if let (Ok(username), Ok(password)) = (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD"))
    {
        core::account::ensure_bootstrap_admin(&db, &username, &password)
            .await
            .inspect_err(|e| error!("Failed to seed bootstrap admin: {}", e))?;
    }

    // 6. Serve the API until shutdown
    api::serve(&app_config, rates, db).await
}
