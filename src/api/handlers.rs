use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::kyc::scorer;
use crate::kyc::types::KycAnswers;
use crate::monitor::types::{MonitorResult, TradeRequest};
use crate::threat::types::TransactionRecord;
use crate::wallet::approvals::{self, ApprovalReport};
use crate::wallet::security::WalletReport;

use super::types::*;
use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn api_error(status: StatusCode, msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse { error: msg.into() }),
    )
}

pub async fn health(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    let monitor = state.monitor.lock().await;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        monitored_users: monitor.store().user_count(),
    }))
}

pub async fn scan_transaction(
    State(state): State<Arc<AppState>>,
    Json(tx): Json<TransactionRecord>,
) -> ApiResult<ThreatScanResponse> {
    let report = state.detector.detect(&tx);
    let alert = state.detector.security_alert(&report);

    if let Some(alert) = &alert {
        tracing::warn!(
            severity = alert.severity.as_str(),
            score = report.threat_score,
            action_required = alert.action_required,
            "THREAT ALERT"
        );
    }

    Ok(Json(ThreatScanResponse { report, alert }))
}

pub async fn monitor_trade(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(trade): Json<TradeRequest>,
) -> ApiResult<MonitorResult> {
    let mut monitor = state.monitor.lock().await;
    let result = monitor.monitor(&user_id, &trade);

    if result.should_block {
        tracing::warn!(
            user_id = %result.user_id,
            risk_score = result.risk_score,
            threat_level = result.threat_level.as_str(),
            "TRADE BLOCKED"
        );
    }

    Ok(Json(result))
}

pub async fn wallet_security(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<WalletReport> {
    Ok(Json(state.wallet_checker.check(&address)))
}

pub async fn wallet_approvals(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult<ApprovalReport> {
    Ok(Json(approvals::check_approvals(
        &state.approval_source,
        state.high_risk_approval_weight,
        &address,
    )))
}

pub async fn score_kyc(
    State(_state): State<Arc<AppState>>,
    Json(answers): Json<KycAnswers>,
) -> ApiResult<KycScoreResponse> {
    let assessment = scorer::score_kyc(&answers)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    Ok(Json(KycScoreResponse {
        assessment,
        kyc_status: if answers.regulatory_compliance {
            "approved"
        } else {
            "pending"
        },
        xp_awarded: super::KYC_XP_AWARD,
    }))
}
