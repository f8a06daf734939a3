use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config::MonitorConfig;
use crate::scoring::{self, Severity, ThreatLevel};

use super::history::{HistoryStore, RecordedTrade};
use super::types::{Anomaly, AnomalyType, MonitorResult, TradeRequest};

/// Evaluates each incoming trade against the user's prior history, then
/// appends it. History-based rules cannot fire on a user's first trade.
pub struct TransactionMonitor<S: HistoryStore> {
    config: MonitorConfig,
    store: S,
}

impl<S: HistoryStore> TransactionMonitor<S> {
    pub fn new(config: MonitorConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn monitor(&mut self, user_id: &str, trade: &TradeRequest) -> MonitorResult {
        self.monitor_at(user_id, trade, Utc::now())
    }

    /// Evaluation with an explicit clock, so tests control the window math.
    pub fn monitor_at(
        &mut self,
        user_id: &str,
        trade: &TradeRequest,
        now: DateTime<Utc>,
    ) -> MonitorResult {
        let mut anomalies = Vec::new();
        let mut score = 0.0;
        let window = Duration::seconds(self.config.recent_window_secs as i64);

        // History-based rules read prior trades only; the current trade is
        // appended after evaluation.
        if let Some(avg) = self.store.average_amount(user_id) {
            if let Some(amount) = trade.amount {
                if amount > avg * self.config.unusual_amount_multiplier {
                    anomalies.push(Anomaly {
                        anomaly_type: AnomalyType::UnusualAmount,
                        severity: Severity::Medium,
                        message: format!(
                            "Transaction {}x larger than user average",
                            self.config.unusual_amount_multiplier
                        ),
                    });
                    score += self.config.unusual_amount_weight;
                }
            }

            let recent = self.store.recent(user_id, window, now);

            if recent.len() >= self.config.rapid_fire_threshold as usize {
                anomalies.push(Anomaly {
                    anomaly_type: AnomalyType::RapidFire,
                    severity: Severity::High,
                    message: "Multiple transactions in short time".to_string(),
                });
                score += self.config.rapid_fire_weight;
            }

            let distinct_assets: HashSet<&str> = recent
                .iter()
                .filter_map(|t| t.asset.as_deref())
                .collect();
            if distinct_assets.len() > self.config.multi_asset_threshold {
                anomalies.push(Anomaly {
                    anomaly_type: AnomalyType::MultiAssetTrading,
                    severity: Severity::Medium,
                    message: "Multiple assets traded simultaneously".to_string(),
                });
                score += self.config.multi_asset_weight;
            }
        }

        if let Some(asset) = &trade.asset {
            if self.config.volatile_assets.iter().any(|a| a == asset) {
                anomalies.push(Anomaly {
                    anomaly_type: AnomalyType::HighVolatilityAsset,
                    severity: Severity::Medium,
                    message: "Asset known for extreme volatility".to_string(),
                });
                score += self.config.volatile_asset_weight;
            }
        }

        // Side effect happens regardless of outcome.
        self.store.append(
            user_id,
            RecordedTrade {
                asset: trade.asset.clone(),
                amount: trade.amount,
                recorded_at: now,
            },
        );

        let risk_score = scoring::cap(score);
        let threat_level =
            ThreatLevel::classify(risk_score, self.config.high_at, self.config.medium_at);

        MonitorResult {
            transaction_id: generate_tx_id(now),
            user_id: user_id.to_string(),
            risk_score,
            threat_level,
            anomalies,
            should_block: threat_level == ThreatLevel::High,
        }
    }
}

/// Fresh per-call identifier: unix millis plus a random base-36 suffix.
/// Unrelated to any externally supplied id.
fn generate_tx_id(now: DateTime<Utc>) -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("TX_{}_{}", now.timestamp_millis(), suffix)
}
