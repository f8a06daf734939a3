use std::sync::Arc;

use serde::Serialize;

use crate::config::WalletConfig;
use crate::watchlist::WatchlistStore;

/// Classification of a wallet address. Exactly one applies per check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityStatus {
    Secure,
    Compromised,
    Invalid,
    Unknown,
}

impl SecurityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Secure => "SECURE",
            Self::Compromised => "COMPROMISED",
            Self::Invalid => "INVALID",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletReport {
    pub wallet_address: String,
    pub security_status: SecurityStatus,
    pub risk_score: f64,
    pub can_use: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Classifies wallet addresses against the allowlist, the compromised list,
/// and a structural format check, in that order. First match wins; the
/// allowlist takes precedence over everything else.
pub struct WalletSecurityChecker {
    config: WalletConfig,
    watchlist: Arc<WatchlistStore>,
}

impl WalletSecurityChecker {
    pub fn new(config: WalletConfig, watchlist: Arc<WatchlistStore>) -> Self {
        Self { config, watchlist }
    }

    pub fn check(&self, address: &str) -> WalletReport {
        if self.watchlist.is_allowlisted_wallet(address) {
            return WalletReport {
                wallet_address: address.to_string(),
                security_status: SecurityStatus::Secure,
                risk_score: 0.0,
                can_use: true,
                message: None,
            };
        }

        if self.watchlist.is_compromised_wallet(address) {
            return WalletReport {
                wallet_address: address.to_string(),
                security_status: SecurityStatus::Compromised,
                risk_score: 10.0,
                can_use: false,
                message: Some("Wallet is on compromised list".to_string()),
            };
        }

        if !is_valid_address(address) {
            return WalletReport {
                wallet_address: address.to_string(),
                security_status: SecurityStatus::Invalid,
                risk_score: 10.0,
                can_use: false,
                message: None,
            };
        }

        WalletReport {
            wallet_address: address.to_string(),
            security_status: SecurityStatus::Unknown,
            risk_score: self.config.unknown_wallet_score,
            can_use: true,
            message: Some("New wallet - proceed with caution".to_string()),
        }
    }
}

/// Structural address check: "0x" followed by exactly 40 hex digits.
pub fn is_valid_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn checker() -> WalletSecurityChecker {
        let config = Config::default();
        let watchlist = Arc::new(WatchlistStore::from_config(
            &config.threat_detection,
            &config.wallet,
        ));
        WalletSecurityChecker::new(config.wallet, watchlist)
    }

    #[test]
    fn allowlisted_wallet_is_secure() {
        let report = checker().check("0x1234567890123456789012345678901234567890");
        assert_eq!(report.security_status, SecurityStatus::Secure);
        assert_eq!(report.risk_score, 0.0);
        assert!(report.can_use);
        assert!(report.message.is_none());
    }

    #[test]
    fn compromised_wallet_is_blocked() {
        let report = checker().check("0xDEADDEADDEADDEADDEADDEADDEADDEADDEADDEAD");
        assert_eq!(report.security_status, SecurityStatus::Compromised);
        assert_eq!(report.risk_score, 10.0);
        assert!(!report.can_use);
    }

    #[test]
    fn compromised_check_precedes_format_check() {
        // The second seeded compromised address is not valid hex; it must
        // still classify as COMPROMISED, not INVALID.
        let report = checker().check("0xSCAMSCAMSCAMSCAMSCAMSCAMSCAMSCAMSCAMSCAM");
        assert_eq!(report.security_status, SecurityStatus::Compromised);
    }

    #[test]
    fn malformed_address_is_invalid() {
        let report = checker().check("invalid-wallet-address");
        assert_eq!(report.security_status, SecurityStatus::Invalid);
        assert_eq!(report.risk_score, 10.0);
        assert!(!report.can_use);
    }

    #[test]
    fn unknown_wallet_proceeds_with_caution() {
        let report = checker().check("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd");
        assert_eq!(report.security_status, SecurityStatus::Unknown);
        assert_eq!(report.risk_score, 3.0);
        assert!(report.can_use);
        assert!(report.message.is_some());
    }

    #[test]
    fn allowlist_wins_over_compromised_list() {
        let mut config = Config::default();
        let addr = "0xDEADDEADDEADDEADDEADDEADDEADDEADDEADDEAD".to_string();
        config.wallet.allowlisted_wallets.push(addr.clone());
        let watchlist = Arc::new(WatchlistStore::from_config(
            &config.threat_detection,
            &config.wallet,
        ));
        let checker = WalletSecurityChecker::new(config.wallet, watchlist);
        assert_eq!(checker.check(&addr).security_status, SecurityStatus::Secure);
    }

    #[test]
    fn address_format_validation() {
        assert!(is_valid_address(
            "0x1234567890123456789012345678901234567890"
        ));
        assert!(is_valid_address(
            "0xABCDEFabcdef0123456789ABCDEFabcdef012345"
        ));
        assert!(!is_valid_address("1234567890123456789012345678901234567890"));
        assert!(!is_valid_address("0x12345678901234567890123456789012345678"));
        assert!(!is_valid_address(
            "0x12345678901234567890123456789012345678901"
        ));
        assert!(!is_valid_address(
            "0xGGGG567890123456789012345678901234567890"
        ));
        assert!(!is_valid_address(""));
    }
}
