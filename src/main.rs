use anyhow::Context;
use quadriga::core::config::ConfigError;
use quadriga::exchanges::quadriga::PublicOrderBook;
use quadriga::{build_client, ExchangeConfig};
use tracing::{info, warn};

#[cfg(feature = "env-file")]
fn load_config() -> Result<ExchangeConfig, ConfigError> {
    ExchangeConfig::from_env_file("QUADRIGA")
}

#[cfg(not(feature = "env-file"))]
fn load_config() -> Result<ExchangeConfig, ConfigError> {
    ExchangeConfig::from_env("QUADRIGA")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let (config, has_credentials) = match load_config() {
        Ok(config) => (config, true),
        Err(e) => {
            // Public endpoints work without real credentials
            warn!("{}; using placeholder credentials", e);
            let config = ExchangeConfig::new(
                "your_api_key".to_string(),
                "your_api_secret".to_string(),
                "your_client_id".to_string(),
            );
            (config, false)
        }
    };

    let client = build_client(config).context("failed to build QuadrigaCX client")?;
    let book = client.default_book();

    println!("=== Ticker ({}) ===", book);
    match client.get_summary(None).await {
        Ok(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
        Err(e) => eprintln!("Failed to get ticker: {}", e),
    }

    println!("\n=== Public order book ({}) ===", book);
    match client.get_public_orders(true, None).await {
        Ok(raw) => {
            let orders: PublicOrderBook =
                serde_json::from_value(raw).context("unexpected order book format")?;
            info!(
                timestamp = orders.timestamp,
                bids = orders.bids.len(),
                asks = orders.asks.len(),
                "fetched order book"
            );
            for [price, amount] in orders.bids.iter().take(5) {
                println!("  bid {:>14} x {}", price, amount);
            }
            for [price, amount] in orders.asks.iter().take(5) {
                println!("  ask {:>14} x {}", price, amount);
            }
        }
        Err(e) => eprintln!("Failed to get order book: {}", e),
    }

    if has_credentials {
        println!("\n=== Balance ===");
        match client.get_balance().await {
            Ok(balance) => println!("{}", serde_json::to_string_pretty(&balance)?),
            Err(e) => eprintln!("Failed to get balance: {}", e),
        }
    }

    Ok(())
}
