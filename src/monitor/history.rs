use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

/// A trade as retained in per-user history, stamped at ingestion time.
#[derive(Debug, Clone)]
pub struct RecordedTrade {
    pub asset: Option<String>,
    pub amount: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

/// Per-user trade history consulted by the monitor. Implementations only
/// ever see trades appended strictly after they were evaluated, so all
/// reads reflect prior trades only.
pub trait HistoryStore {
    fn append(&mut self, user_id: &str, trade: RecordedTrade);

    /// Mean amount over all retained trades for the user. `None` when the
    /// user has no history at all. Trades with a missing amount count
    /// toward the denominator with value zero.
    fn average_amount(&self, user_id: &str) -> Option<f64>;

    /// Trades recorded within `window` before `now`, oldest first.
    fn recent(&self, user_id: &str, window: Duration, now: DateTime<Utc>) -> Vec<RecordedTrade>;
}

/// Default in-memory store keyed by user id. Append-only per call, with a
/// retention cap that evicts the oldest entries once a user exceeds it.
pub struct InMemoryHistory {
    trades: HashMap<String, Vec<RecordedTrade>>,
    max_per_user: usize,
}

impl InMemoryHistory {
    pub fn new(max_per_user: usize) -> Self {
        Self {
            trades: HashMap::new(),
            max_per_user,
        }
    }

    pub fn user_count(&self) -> usize {
        self.trades.len()
    }

    pub fn trade_count(&self, user_id: &str) -> usize {
        self.trades.get(user_id).map(|v| v.len()).unwrap_or(0)
    }
}

impl HistoryStore for InMemoryHistory {
    fn append(&mut self, user_id: &str, trade: RecordedTrade) {
        let entries = self.trades.entry(user_id.to_string()).or_default();
        entries.push(trade);
        if entries.len() > self.max_per_user {
            let excess = entries.len() - self.max_per_user;
            entries.drain(..excess);
        }
    }

    fn average_amount(&self, user_id: &str) -> Option<f64> {
        let entries = self.trades.get(user_id)?;
        if entries.is_empty() {
            return None;
        }
        let total: f64 = entries.iter().map(|t| t.amount.unwrap_or(0.0)).sum();
        Some(total / entries.len() as f64)
    }

    fn recent(&self, user_id: &str, window: Duration, now: DateTime<Utc>) -> Vec<RecordedTrade> {
        let cutoff = now - window;
        self.trades
            .get(user_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|t| t.recorded_at > cutoff)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(asset: &str, amount: f64, at: DateTime<Utc>) -> RecordedTrade {
        RecordedTrade {
            asset: Some(asset.to_string()),
            amount: Some(amount),
            recorded_at: at,
        }
    }

    #[test]
    fn average_over_all_retained() {
        let mut store = InMemoryHistory::new(100);
        let now = Utc::now();
        store.append("alice", trade("BTC", 100.0, now));
        store.append("alice", trade("ETH", 300.0, now));
        assert_eq!(store.average_amount("alice"), Some(200.0));
        assert_eq!(store.average_amount("bob"), None);
    }

    #[test]
    fn missing_amount_counts_as_zero() {
        let mut store = InMemoryHistory::new(100);
        let now = Utc::now();
        store.append("alice", trade("BTC", 100.0, now));
        store.append(
            "alice",
            RecordedTrade {
                asset: Some("ETH".to_string()),
                amount: None,
                recorded_at: now,
            },
        );
        assert_eq!(store.average_amount("alice"), Some(50.0));
    }

    #[test]
    fn recent_respects_window() {
        let mut store = InMemoryHistory::new(100);
        let now = Utc::now();
        store.append("alice", trade("BTC", 1.0, now - Duration::seconds(600)));
        store.append("alice", trade("ETH", 1.0, now - Duration::seconds(60)));
        let recent = store.recent("alice", Duration::seconds(300), now);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].asset.as_deref(), Some("ETH"));
    }

    #[test]
    fn retention_cap_drops_oldest() {
        let mut store = InMemoryHistory::new(3);
        let now = Utc::now();
        for i in 0..5 {
            store.append("alice", trade("BTC", i as f64, now));
        }
        assert_eq!(store.trade_count("alice"), 3);
        // Entries 0 and 1 were evicted, leaving 2, 3, 4.
        assert_eq!(store.average_amount("alice"), Some(3.0));
    }
}
