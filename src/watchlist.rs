use std::collections::HashSet;
use std::io::Read;

use crate::config::{ThreatConfig, WalletConfig};

/// A single watchlist CSV row: which list it belongs to and the entry value.
#[derive(Debug, Clone)]
pub struct WatchlistEntry {
    pub list_name: String,
    pub value: String,
}

/// In-memory reference sets consulted by the scoring components.
/// Built once at startup from config plus an optional CSV file, read-only
/// at evaluation time. Matching is exact string equality.
pub struct WatchlistStore {
    attackers: HashSet<String>,
    suspicious_ips: HashSet<String>,
    compromised_wallets: HashSet<String>,
    allowlisted_wallets: HashSet<String>,
}

impl WatchlistStore {
    /// Seed the store from the threat and wallet config sections.
    pub fn from_config(threat: &ThreatConfig, wallet: &WalletConfig) -> Self {
        Self {
            attackers: threat.known_attackers.iter().cloned().collect(),
            suspicious_ips: threat.suspicious_ips.iter().cloned().collect(),
            compromised_wallets: wallet.compromised_wallets.iter().cloned().collect(),
            allowlisted_wallets: wallet.allowlisted_wallets.iter().cloned().collect(),
        }
    }

    /// Merge parsed CSV entries into the sets. Unknown list names are
    /// skipped with a warning. Returns the number of entries applied.
    pub fn merge_entries(&mut self, entries: &[WatchlistEntry]) -> usize {
        let mut count = 0;
        for entry in entries {
            let set = match entry.list_name.as_str() {
                "attacker" => &mut self.attackers,
                "suspicious_ip" => &mut self.suspicious_ips,
                "compromised_wallet" => &mut self.compromised_wallets,
                "allowlisted_wallet" => &mut self.allowlisted_wallets,
                other => {
                    tracing::warn!(list = %other, value = %entry.value, "Unknown watchlist name, skipping");
                    continue;
                }
            };
            if set.insert(entry.value.clone()) {
                count += 1;
            }
        }
        count
    }

    pub fn is_known_attacker(&self, address: &str) -> bool {
        self.attackers.contains(address)
    }

    pub fn is_suspicious_ip(&self, ip: &str) -> bool {
        self.suspicious_ips.contains(ip)
    }

    pub fn is_compromised_wallet(&self, address: &str) -> bool {
        self.compromised_wallets.contains(address)
    }

    pub fn is_allowlisted_wallet(&self, address: &str) -> bool {
        self.allowlisted_wallets.contains(address)
    }

    pub fn len(&self) -> usize {
        self.attackers.len()
            + self.suspicious_ips.len()
            + self.compromised_wallets.len()
            + self.allowlisted_wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a watchlist CSV with columns: list_name, value.
/// Rows with an empty value are skipped.
pub fn parse_watchlist(reader: impl Read) -> eyre::Result<Vec<WatchlistEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let list_name = record.get(0).unwrap_or("").trim().to_string();
        let value = record.get(1).unwrap_or("").trim().to_string();
        if value.is_empty() {
            continue;
        }
        entries.push(WatchlistEntry { list_name, value });
    }

    Ok(entries)
}

/// Parse a watchlist CSV file from disk.
pub fn parse_watchlist_file(path: &str) -> eyre::Result<Vec<WatchlistEntry>> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("Failed to open watchlist CSV '{}': {}", path, e))?;
    let entries = parse_watchlist(file)?;
    tracing::info!(entries = entries.len(), "Parsed watchlist entries");
    Ok(entries)
}
