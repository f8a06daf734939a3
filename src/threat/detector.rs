use std::sync::Arc;

use chrono::Utc;

use crate::config::ThreatConfig;
use crate::scoring::{self, Severity};
use crate::watchlist::WatchlistStore;

use super::types::{SecurityAlert, Threat, ThreatReport, ThreatType, TransactionRecord};

/// Scans single transactions against a fixed rule catalog: known-attacker
/// recipients, suspicious origin IPs, outsized amounts, abnormal gas prices.
/// Rules are independent; any subset may fire.
pub struct ThreatDetector {
    config: ThreatConfig,
    watchlist: Arc<WatchlistStore>,
}

impl ThreatDetector {
    pub fn new(config: ThreatConfig, watchlist: Arc<WatchlistStore>) -> Self {
        Self { config, watchlist }
    }

    /// Evaluate all rules in fixed order and aggregate the fired weights.
    pub fn detect(&self, tx: &TransactionRecord) -> ThreatReport {
        let mut threats = Vec::new();
        let mut score = 0.0;

        if let Some(to) = &tx.to {
            if self.watchlist.is_known_attacker(to) {
                threats.push(Threat {
                    threat_type: ThreatType::KnownAttacker,
                    severity: Severity::Critical,
                    message: "Recipient is on attacker watchlist".to_string(),
                });
                score += self.config.attacker_weight;
            }
        }

        if let Some(ip) = &tx.ip_address {
            if self.watchlist.is_suspicious_ip(ip) {
                threats.push(Threat {
                    threat_type: ThreatType::SuspiciousIp,
                    severity: Severity::Medium,
                    message: "Transaction from suspicious IP address".to_string(),
                });
                score += self.config.suspicious_ip_weight;
            }
        }

        if let Some(amount) = tx.amount {
            if amount > self.config.large_amount_threshold {
                threats.push(Threat {
                    threat_type: ThreatType::LargeAmount,
                    severity: Severity::Medium,
                    message: "Transaction amount unusually large".to_string(),
                });
                score += self.config.large_amount_weight;
            }
        }

        if let Some(gas_price) = tx.gas_price {
            if gas_price > self.config.high_gas_threshold {
                threats.push(Threat {
                    threat_type: ThreatType::HighGasPrice,
                    severity: Severity::Low,
                    message: "Unusually high gas price".to_string(),
                });
                score += self.config.high_gas_weight;
            }
        }

        let threat_score = scoring::cap(score);
        ThreatReport {
            transaction_id: tx.id.clone(),
            threats_detected: !threats.is_empty(),
            threats,
            threat_score,
            should_alert: threat_score >= self.config.alert_threshold,
        }
    }

    /// Raise an alert for a report that crossed the alert threshold.
    /// Quotes the first fired threat in evaluation order unless configured
    /// to pick the highest-severity one.
    pub fn security_alert(&self, report: &ThreatReport) -> Option<SecurityAlert> {
        if !report.should_alert {
            return None;
        }

        let quoted = if self.config.alert_picks_highest_severity {
            report.threats.iter().max_by_key(|t| t.severity)
        } else {
            report.threats.first()
        };

        let (severity, message) = match quoted {
            Some(threat) => (threat.severity, threat.message.clone()),
            None => (Severity::Low, String::new()),
        };

        Some(SecurityAlert {
            timestamp: Utc::now(),
            severity,
            message: format!("SECURITY ALERT: {}", message),
            action_required: report.threat_score > self.config.action_required_threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const ATTACKER: &str = "0xATTACKERATTACKERATTACKERATTACKERATTACKER";

    fn test_config() -> ThreatConfig {
        ThreatConfig {
            known_attackers: vec![ATTACKER.to_string()],
            suspicious_ips: vec!["192.168.1.100".to_string(), "10.0.0.50".to_string()],
            ..ThreatConfig::default()
        }
    }

    fn detector_with(config: ThreatConfig) -> ThreatDetector {
        let watchlist = Arc::new(WatchlistStore::from_config(
            &config,
            &Config::default().wallet,
        ));
        ThreatDetector::new(config, watchlist)
    }

    fn detector() -> ThreatDetector {
        detector_with(test_config())
    }

    #[test]
    fn benign_transaction_scores_zero() {
        let report = detector().detect(&TransactionRecord {
            id: Some("tx-1".to_string()),
            to: Some("0x0000000000000000000000000000000000000000".to_string()),
            amount: Some(1_000_000.0),
            gas_price: Some(500.0),
            ip_address: Some("203.0.113.1".to_string()),
        });
        assert!(!report.threats_detected);
        assert!(report.threats.is_empty());
        assert_eq!(report.threat_score, 0.0);
        assert!(!report.should_alert);
    }

    #[test]
    fn attacker_recipient_alone_alerts() {
        let report = detector().detect(&TransactionRecord {
            to: Some(ATTACKER.to_string()),
            amount: Some(500.0),
            gas_price: Some(100.0),
            ip_address: Some("203.0.113.1".to_string()),
            ..Default::default()
        });
        assert_eq!(report.threats.len(), 1);
        assert_eq!(report.threats[0].threat_type, ThreatType::KnownAttacker);
        assert_eq!(report.threats[0].severity, Severity::Critical);
        assert_eq!(report.threat_score, 5.0);
        assert!(report.should_alert);
    }

    #[test]
    fn three_lesser_rules_stack() {
        let report = detector().detect(&TransactionRecord {
            to: Some("0x0000000000000000000000000000000000000000".to_string()),
            amount: Some(5_000_000.0),
            gas_price: Some(800.0),
            ip_address: Some("192.168.1.100".to_string()),
            ..Default::default()
        });
        assert_eq!(report.threats.len(), 3);
        // Evaluation order: IP before amount before gas.
        assert_eq!(report.threats[0].threat_type, ThreatType::SuspiciousIp);
        assert_eq!(report.threats[1].threat_type, ThreatType::LargeAmount);
        assert_eq!(report.threats[2].threat_type, ThreatType::HighGasPrice);
        assert!((report.threat_score - 4.0).abs() < 1e-9);
        assert!(report.should_alert);
    }

    #[test]
    fn missing_fields_never_fire() {
        let report = detector().detect(&TransactionRecord::default());
        assert!(!report.threats_detected);
        assert_eq!(report.threat_score, 0.0);
    }

    #[test]
    fn score_is_capped_at_ten() {
        let mut config = test_config();
        config.attacker_weight = 9.0;
        config.suspicious_ip_weight = 9.0;
        let report = detector_with(config).detect(&TransactionRecord {
            to: Some(ATTACKER.to_string()),
            ip_address: Some("10.0.0.50".to_string()),
            ..Default::default()
        });
        assert_eq!(report.threat_score, 10.0);
    }

    #[test]
    fn no_alert_below_threshold() {
        let det = detector();
        let report = det.detect(&TransactionRecord {
            gas_price: Some(800.0),
            ..Default::default()
        });
        assert!(report.threats_detected);
        assert!(!report.should_alert);
        assert!(det.security_alert(&report).is_none());
    }

    #[test]
    fn alert_quotes_first_fired_threat() {
        let det = detector();
        let report = det.detect(&TransactionRecord {
            ip_address: Some("192.168.1.100".to_string()),
            amount: Some(5_000_000.0),
            ..Default::default()
        });
        assert!(report.should_alert);
        let alert = det.security_alert(&report).unwrap();
        assert_eq!(alert.severity, Severity::Medium);
        assert!(alert.message.contains("suspicious IP"));
        assert!(!alert.action_required);
    }

    #[test]
    fn alert_flag_picks_highest_severity() {
        let mut config = test_config();
        config.alert_picks_highest_severity = true;
        let det = detector_with(config);
        let report = ThreatReport {
            transaction_id: None,
            threats_detected: true,
            threats: vec![
                Threat {
                    threat_type: ThreatType::HighGasPrice,
                    severity: Severity::Low,
                    message: "Unusually high gas price".to_string(),
                },
                Threat {
                    threat_type: ThreatType::KnownAttacker,
                    severity: Severity::Critical,
                    message: "Recipient is on attacker watchlist".to_string(),
                },
            ],
            threat_score: 5.5,
            should_alert: true,
        };
        let alert = det.security_alert(&report).unwrap();
        assert_eq!(alert.severity, Severity::Critical);
        assert!(alert.message.contains("attacker watchlist"));
    }

    #[test]
    fn action_required_above_seven() {
        let det = detector();
        let report = det.detect(&TransactionRecord {
            to: Some(ATTACKER.to_string()),
            ip_address: Some("192.168.1.100".to_string()),
            amount: Some(2_000_000.0),
            ..Default::default()
        });
        // 5 + 2 + 1.5 = 8.5
        assert!((report.threat_score - 8.5).abs() < 1e-9);
        let alert = det.security_alert(&report).unwrap();
        assert!(alert.action_required);
        assert_eq!(alert.severity, Severity::Critical);
    }
}
