use std::sync::Arc;

use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use riskwatch::api::{self, AppState};
use riskwatch::config::Config;
use riskwatch::monitor::engine::TransactionMonitor;
use riskwatch::monitor::history::InMemoryHistory;
use riskwatch::threat::detector::ThreatDetector;
use riskwatch::wallet::approvals::StaticApprovalSource;
use riskwatch::wallet::security::WalletSecurityChecker;
use riskwatch::watchlist::{self, WatchlistStore};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Initialize structured logging (set RUST_LOG=info for output)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    tracing::info!("Riskwatch scoring engine starting");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // A missing config file runs on the built-in defaults; a malformed one
    // is a hard error.
    let config = if std::path::Path::new(&config_path).exists() {
        let config = Config::load(&config_path)?;
        tracing::info!("Configuration loaded from {}", config_path);
        config
    } else {
        tracing::warn!(path = %config_path, "Config file not found, using defaults");
        Config::default()
    };

    let mut store = WatchlistStore::from_config(&config.threat_detection, &config.wallet);
    if let Some(path) = &config.watchlist_path {
        match watchlist::parse_watchlist_file(path) {
            Ok(entries) => {
                let count = store.merge_entries(&entries);
                tracing::info!(count, "Watchlist entries merged");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load watchlist CSV, continuing without");
            }
        }
    }
    tracing::info!(entries = store.len(), "Reference sets ready");

    let watchlist = Arc::new(store);
    let history = InMemoryHistory::new(config.monitor.max_history_per_user);

    let state = Arc::new(AppState {
        detector: ThreatDetector::new(config.threat_detection.clone(), watchlist.clone()),
        monitor: Mutex::new(TransactionMonitor::new(config.monitor.clone(), history)),
        wallet_checker: WalletSecurityChecker::new(config.wallet.clone(), watchlist),
        approval_source: StaticApprovalSource::demo(),
        high_risk_approval_weight: config.wallet.high_risk_approval_weight,
    });

    api::serve(state, &config.api.host, config.api.port).await?;

    tracing::info!("Riskwatch stopped gracefully");
    Ok(())
}
