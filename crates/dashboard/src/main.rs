use std::sync::Arc;

use anyhow::{Context, Result};
use contract_client::{ContractClient, MockContractClient};
use dashboard::{DashboardConfig, DashboardSession};
use risk_view::{JsonDataset, RiskDataSource, SeedDataset, ViewStatus};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env, init tracing
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    tracing::info!("Starting Flux Cipher Guard risk dashboard");

    // 2. Load configuration
    let config = DashboardConfig::from_env()?;
    tracing::info!("Configuration loaded and validated");
    tracing::info!("  Contract: {}", config.contract_address);
    tracing::info!(
        "  Query: filter={} sort={} search={:?}",
        config.risk_filter.as_str(),
        config.sort_key.as_str(),
        config.search_term
    );

    // 3. Risk data
    let source: Box<dyn RiskDataSource> = match &config.risk_data_path {
        Some(path) => Box::new(JsonDataset::from_path(path)),
        None => Box::new(SeedDataset),
    };
    let dataset = source
        .load()
        .with_context(|| format!("Failed to load risk data from {}", source.source_name()))?;
    tracing::info!("Loaded {} risk records ({})", dataset.len(), source.source_name());

    // 4. Contract client (in-memory until a chain client is wired in)
    let mock = MockContractClient::new(config.contract_address.clone());
    if config.dao_member {
        if let Some(wallet) = &config.wallet_address {
            mock.add_member(wallet.trim(), 100, 10).await;
        }
    }
    let client: Arc<dyn ContractClient> = Arc::new(mock);
    tracing::info!("Contract client: {} ({})", client.client_name(), client.contract_address());

    // 5. Session
    let mut session = DashboardSession::new(dataset, client);
    session.view_mut().set_query(config.initial_query());

    if let Some(wallet) = &config.wallet_address {
        match session.connect(wallet).await {
            Ok(profile) if profile.is_member => {
                tracing::info!(
                    "DAO member: reputation {} / voting power {}",
                    profile.reputation,
                    profile.voting_power
                );
            }
            Ok(_) => tracing::info!("Connected account is not a DAO member"),
            Err(e) => tracing::warn!("Membership lookup failed: {}", e),
        }
    } else {
        tracing::info!("No wallet configured: governance authorization required");
    }

    if config.reveal_all {
        let revealed = session.view_mut().reveal_all();
        tracing::info!("Revealed {} visible risk cards", revealed);
    }

    // 6. Render
    let view = session.view();
    let tiles = session.overview().tiles(view.is_connected());
    tracing::info!(
        "Total risk score: {} ({}) | Active exposures: {} ({}) | Mitigation rate: {} ({})",
        tiles.total_risk_score,
        tiles.risk_score_note,
        tiles.active_exposures,
        tiles.attention_note,
        tiles.mitigation_rate,
        tiles.mitigation_note
    );

    let snapshot = view.snapshot();
    match snapshot.status {
        ViewStatus::Empty => tracing::info!("No risk data available"),
        ViewStatus::NoMatches => tracing::info!("No risks match the current filter"),
        ViewStatus::Showing(count) => {
            tracing::info!(
                "Showing {} risks ({} revealed)",
                count,
                snapshot.summary.revealed_count
            );
            for card in &snapshot.cards {
                tracing::info!("  {}", card);
            }
        }
    }
    tracing::debug!("Snapshot: {}", serde_json::to_string(&snapshot)?);

    // 7. Export
    let csv = view.export_visible();
    std::fs::write(&config.export_path, &csv)
        .with_context(|| format!("Failed to write {}", config.export_path.display()))?;
    tracing::info!(
        "Exported {} viewable rows to {}",
        view.viewable_records().count(),
        config.export_path.display()
    );

    Ok(())
}
