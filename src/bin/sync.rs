use anyhow::Result;
use castnotes::{
    config::Config,
    fetcher::{ApiClient, fetch_catalog},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Fetch and assemble the whole catalog, then dump it as JSON
    let client = ApiClient::new(&config)?;
    let catalog = fetch_catalog(&client).await?;
    println!("{}", serde_json::to_string_pretty(&catalog)?);

    Ok(())
}
