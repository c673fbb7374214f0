use anyhow::Result;
use dotenvy::dotenv;
use std::env;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ticketrate::api::RatingClient;
use ticketrate::terminal::run_terminal;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn check_env() -> Result<()> {
    let required = ["RATING_API_URL"];
    for key in required {
        if env::var(key).map(|v| v.trim().is_empty()).unwrap_or(true) {
            anyhow::bail!("Missing required environment variable: {}", key);
        }
    }
    info!("All required environment variables are set");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_result = dotenv();
    init_tracing();
    match dotenv_result {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }
    check_env()?;

    let client = RatingClient::from_env()?;
    info!("Using rating endpoint {}", client.base_url());

    let stdin = BufReader::new(tokio::io::stdin());
    let saved = run_terminal(&client, stdin, std::io::stdout()).await?;
    info!("Session finished, {} rating(s) saved", saved);
    Ok(())
}
