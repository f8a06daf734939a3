use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Optional CSV file merged into the reference sets at startup.
    pub watchlist_path: Option<String>,
    #[serde(default)]
    pub threat_detection: ThreatConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

// ============================================================
// Threat Detection Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ThreatConfig {
    /// Recipient addresses that always trip the KNOWN_ATTACKER rule.
    #[serde(default)]
    pub known_attackers: Vec<String>,
    /// Origin IPs that trip the SUSPICIOUS_IP rule.
    #[serde(default)]
    pub suspicious_ips: Vec<String>,
    #[serde(default = "default_large_amount_threshold")]
    pub large_amount_threshold: f64,
    #[serde(default = "default_high_gas_threshold")]
    pub high_gas_threshold: f64,
    #[serde(default = "default_attacker_weight")]
    pub attacker_weight: f64,
    #[serde(default = "default_suspicious_ip_weight")]
    pub suspicious_ip_weight: f64,
    #[serde(default = "default_large_amount_weight")]
    pub large_amount_weight: f64,
    #[serde(default = "default_high_gas_weight")]
    pub high_gas_weight: f64,
    /// Score at or above which a scan result requests an alert.
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,
    /// Score strictly above which an alert demands action.
    #[serde(default = "default_action_required_threshold")]
    pub action_required_threshold: f64,
    /// Alerts quote the first threat in evaluation order. Set to true to
    /// quote the highest-severity threat instead.
    #[serde(default)]
    pub alert_picks_highest_severity: bool,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            known_attackers: Vec::new(),
            suspicious_ips: Vec::new(),
            large_amount_threshold: default_large_amount_threshold(),
            high_gas_threshold: default_high_gas_threshold(),
            attacker_weight: default_attacker_weight(),
            suspicious_ip_weight: default_suspicious_ip_weight(),
            large_amount_weight: default_large_amount_weight(),
            high_gas_weight: default_high_gas_weight(),
            alert_threshold: default_alert_threshold(),
            action_required_threshold: default_action_required_threshold(),
            alert_picks_highest_severity: false,
        }
    }
}

fn default_large_amount_threshold() -> f64 {
    1_000_000.0
}

fn default_high_gas_threshold() -> f64 {
    500.0
}

fn default_attacker_weight() -> f64 {
    5.0
}

fn default_suspicious_ip_weight() -> f64 {
    2.0
}

fn default_large_amount_weight() -> f64 {
    1.5
}

fn default_high_gas_weight() -> f64 {
    0.5
}

fn default_alert_threshold() -> f64 {
    3.0
}

fn default_action_required_threshold() -> f64 {
    7.0
}

// ============================================================
// Transaction Monitor Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    /// Prior trades within the recent window needed to trip RAPID_FIRE.
    #[serde(default = "default_rapid_fire_threshold")]
    pub rapid_fire_threshold: u32,
    /// Recent-activity window, in seconds.
    #[serde(default = "default_recent_window_secs")]
    pub recent_window_secs: u64,
    /// UNUSUAL_AMOUNT fires when amount exceeds multiplier x prior average.
    #[serde(default = "default_unusual_amount_multiplier")]
    pub unusual_amount_multiplier: f64,
    /// MULTI_ASSET_TRADING fires when distinct recent assets exceed this.
    #[serde(default = "default_multi_asset_threshold")]
    pub multi_asset_threshold: usize,
    #[serde(default = "default_volatile_assets")]
    pub volatile_assets: Vec<String>,
    #[serde(default = "default_unusual_amount_weight")]
    pub unusual_amount_weight: f64,
    #[serde(default = "default_rapid_fire_weight")]
    pub rapid_fire_weight: f64,
    #[serde(default = "default_multi_asset_weight")]
    pub multi_asset_weight: f64,
    #[serde(default = "default_volatile_asset_weight")]
    pub volatile_asset_weight: f64,
    #[serde(default = "default_high_at")]
    pub high_at: f64,
    #[serde(default = "default_medium_at")]
    pub medium_at: f64,
    /// Oldest entries are dropped once a user's history exceeds this cap.
    #[serde(default = "default_max_history_per_user")]
    pub max_history_per_user: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            rapid_fire_threshold: default_rapid_fire_threshold(),
            recent_window_secs: default_recent_window_secs(),
            unusual_amount_multiplier: default_unusual_amount_multiplier(),
            multi_asset_threshold: default_multi_asset_threshold(),
            volatile_assets: default_volatile_assets(),
            unusual_amount_weight: default_unusual_amount_weight(),
            rapid_fire_weight: default_rapid_fire_weight(),
            multi_asset_weight: default_multi_asset_weight(),
            volatile_asset_weight: default_volatile_asset_weight(),
            high_at: default_high_at(),
            medium_at: default_medium_at(),
            max_history_per_user: default_max_history_per_user(),
        }
    }
}

fn default_rapid_fire_threshold() -> u32 {
    3
}

fn default_recent_window_secs() -> u64 {
    300
}

fn default_unusual_amount_multiplier() -> f64 {
    2.0
}

fn default_multi_asset_threshold() -> usize {
    3
}

fn default_volatile_assets() -> Vec<String> {
    vec!["SHITCOIN".to_string(), "MEME".to_string()]
}

fn default_unusual_amount_weight() -> f64 {
    2.0
}

fn default_rapid_fire_weight() -> f64 {
    3.0
}

fn default_multi_asset_weight() -> f64 {
    1.5
}

fn default_volatile_asset_weight() -> f64 {
    1.5
}

fn default_high_at() -> f64 {
    5.0
}

fn default_medium_at() -> f64 {
    2.0
}

fn default_max_history_per_user() -> usize {
    1000
}

// ============================================================
// Wallet Security Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct WalletConfig {
    #[serde(default = "default_compromised_wallets")]
    pub compromised_wallets: Vec<String>,
    #[serde(default = "default_allowlisted_wallets")]
    pub allowlisted_wallets: Vec<String>,
    /// Score assigned to a wallet unknown to both lists.
    #[serde(default = "default_unknown_wallet_score")]
    pub unknown_wallet_score: f64,
    /// Score added per high-risk token approval.
    #[serde(default = "default_high_risk_approval_weight")]
    pub high_risk_approval_weight: f64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            compromised_wallets: default_compromised_wallets(),
            allowlisted_wallets: default_allowlisted_wallets(),
            unknown_wallet_score: default_unknown_wallet_score(),
            high_risk_approval_weight: default_high_risk_approval_weight(),
        }
    }
}

fn default_compromised_wallets() -> Vec<String> {
    vec![
        "0xDEADDEADDEADDEADDEADDEADDEADDEADDEADDEAD".to_string(),
        "0xSCAMSCAMSCAMSCAMSCAMSCAMSCAMSCAMSCAMSCAM".to_string(),
    ]
}

fn default_allowlisted_wallets() -> Vec<String> {
    vec!["0x1234567890123456789012345678901234567890".to_string()]
}

fn default_unknown_wallet_score() -> f64 {
    3.0
}

fn default_high_risk_approval_weight() -> f64 {
    2.0
}

// ============================================================
// API Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_api_port")]
    pub port: u16,
    #[serde(default = "default_api_host")]
    pub host: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: default_api_port(),
            host: default_api_host(),
        }
    }
}

fn default_api_port() -> u16 {
    3000
}

fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read config file '{}': {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> eyre::Result<()> {
        if self.monitor.rapid_fire_threshold == 0 {
            return Err(eyre::eyre!("monitor.rapid_fire_threshold must be at least 1"));
        }
        if self.monitor.unusual_amount_multiplier <= 0.0 {
            return Err(eyre::eyre!(
                "monitor.unusual_amount_multiplier must be positive"
            ));
        }
        if self.monitor.max_history_per_user == 0 {
            return Err(eyre::eyre!("monitor.max_history_per_user must be at least 1"));
        }
        if self.monitor.medium_at > self.monitor.high_at {
            return Err(eyre::eyre!(
                "monitor.medium_at ({}) must not exceed monitor.high_at ({})",
                self.monitor.medium_at,
                self.monitor.high_at
            ));
        }
        if self.threat_detection.alert_threshold < 0.0 {
            return Err(eyre::eyre!(
                "threat_detection.alert_threshold must not be negative"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_with_defaults() {
        let toml_str = r#"
[threat_detection]
known_attackers = ["0xATTACKERATTACKERATTACKERATTACKERATTACKER"]
suspicious_ips = ["192.168.1.100"]

[monitor]
rapid_fire_threshold = 5

[api]
port = 8080
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.threat_detection.known_attackers.len(), 1);
        assert_eq!(config.threat_detection.attacker_weight, 5.0); // default
        assert_eq!(config.threat_detection.alert_threshold, 3.0); // default
        assert_eq!(config.monitor.rapid_fire_threshold, 5);
        assert_eq!(config.monitor.recent_window_secs, 300); // default
        assert_eq!(config.monitor.volatile_assets, vec!["SHITCOIN", "MEME"]);
        assert_eq!(config.wallet.compromised_wallets.len(), 2); // default
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.api.host, "0.0.0.0"); // default
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: Config = toml::from_str("").unwrap();
        config.validate().unwrap();
        assert_eq!(config.monitor.rapid_fire_threshold, 3);
        assert_eq!(config.threat_detection.large_amount_threshold, 1_000_000.0);
    }

    #[test]
    fn test_validate_zero_rapid_fire() {
        let mut config = Config::default();
        config.monitor.rapid_fire_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_multiplier() {
        let mut config = Config::default();
        config.monitor.unusual_amount_multiplier = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_inverted_levels() {
        let mut config = Config::default();
        config.monitor.medium_at = 6.0;
        config.monitor.high_at = 5.0;
        assert!(config.validate().is_err());
    }
}
