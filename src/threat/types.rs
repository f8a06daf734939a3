use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::Severity;

/// A transaction-like record submitted for threat scanning.
/// Every field is optional: a missing field simply never fires a rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRecord {
    pub id: Option<String>,
    pub to: Option<String>,
    pub amount: Option<f64>,
    pub gas_price: Option<f64>,
    pub ip_address: Option<String>,
}

/// Detection rules, in evaluation order. The order is part of the contract:
/// alerts quote the first fired rule by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatType {
    KnownAttacker,
    SuspiciousIp,
    LargeAmount,
    HighGasPrice,
}

impl ThreatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KnownAttacker => "KNOWN_ATTACKER",
            Self::SuspiciousIp => "SUSPICIOUS_IP",
            Self::LargeAmount => "LARGE_AMOUNT",
            Self::HighGasPrice => "HIGH_GAS_PRICE",
        }
    }
}

/// One fired detection rule.
#[derive(Debug, Clone, Serialize)]
pub struct Threat {
    #[serde(rename = "type")]
    pub threat_type: ThreatType,
    pub severity: Severity,
    pub message: String,
}

/// Outcome of scanning a single transaction.
#[derive(Debug, Clone, Serialize)]
pub struct ThreatReport {
    pub transaction_id: Option<String>,
    pub threats_detected: bool,
    pub threats: Vec<Threat>,
    pub threat_score: f64,
    pub should_alert: bool,
}

/// Alert raised for a report whose score crossed the alert threshold.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityAlert {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    pub action_required: bool,
}
