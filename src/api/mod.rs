pub mod handlers;
pub mod types;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::monitor::engine::TransactionMonitor;
use crate::monitor::history::InMemoryHistory;
use crate::threat::detector::ThreatDetector;
use crate::wallet::approvals::StaticApprovalSource;
use crate::wallet::security::WalletSecurityChecker;

/// Fixed experience-point bonus for completing the questionnaire.
pub const KYC_XP_AWARD: u32 = 50;

pub struct AppState {
    pub detector: ThreatDetector,
    /// The monitor mutates per-user history; the mutex serializes calls so
    /// interleaved requests cannot read a half-updated average.
    pub monitor: Mutex<TransactionMonitor<InMemoryHistory>>,
    pub wallet_checker: WalletSecurityChecker,
    pub approval_source: StaticApprovalSource,
    pub high_risk_approval_weight: f64,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/threats/scan", post(handlers::scan_transaction))
        .route(
            "/api/v1/users/{user_id}/trades",
            post(handlers::monitor_trade),
        )
        .route(
            "/api/v1/wallets/{address}/security",
            get(handlers::wallet_security),
        )
        .route(
            "/api/v1/wallets/{address}/approvals",
            get(handlers::wallet_approvals),
        )
        .route("/api/v1/kyc/score", post(handlers::score_kyc))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> eyre::Result<()> {
    let app = router(state);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;
    Ok(())
}
