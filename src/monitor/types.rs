use serde::{Deserialize, Serialize};

use crate::scoring::{Severity, ThreatLevel};

/// A trade submitted for monitoring. Missing fields never fire rules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradeRequest {
    pub asset: Option<String>,
    pub amount: Option<f64>,
}

/// Anomaly rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyType {
    UnusualAmount,
    RapidFire,
    MultiAssetTrading,
    HighVolatilityAsset,
}

impl AnomalyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnusualAmount => "UNUSUAL_AMOUNT",
            Self::RapidFire => "RAPID_FIRE",
            Self::MultiAssetTrading => "MULTI_ASSET_TRADING",
            Self::HighVolatilityAsset => "HIGH_VOLATILITY_ASSET",
        }
    }
}

/// One fired anomaly rule.
#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
    pub message: String,
}

/// Outcome of monitoring a single trade against the user's history.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorResult {
    pub transaction_id: String,
    pub user_id: String,
    pub risk_score: f64,
    pub threat_level: ThreatLevel,
    pub anomalies: Vec<Anomaly>,
    pub should_block: bool,
}
