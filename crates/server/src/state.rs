use crate::config::ServerConfig;
use crate::error::ServerResult;
use dashmap::DashMap;
use matcher::{LookupKind, LookupMetrics, Recommender};
use serde::Serialize;
use shoprec::AppConfig;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Recommender shared by every request; read-only after startup
    pub recommender: Arc<Recommender>,

    /// Per-lookup counters behind `/metrics`
    pub stats: Arc<LookupStats>,

    /// Process start, for uptime
    pub started: Instant,
}

impl ServerState {
    /// Load the recommender named by `config.app_config` and build the state
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let app = AppConfig::from_file(&config.app_config)?;
        let recommender = shoprec::load_recommender(&app)?;
        Ok(Self::with_recommender(config, recommender))
    }

    /// Wrap an already built recommender, wiring lookup stats into it
    pub fn with_recommender(config: ServerConfig, recommender: Recommender) -> Self {
        let stats = Arc::new(LookupStats::default());
        let recommender = recommender.with_metrics(stats.clone());
        Self {
            config: Arc::new(config),
            recommender: Arc::new(recommender),
            stats,
            started: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

/// Running totals for one lookup kind
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct LookupTotals {
    pub requests: u64,
    pub results: u64,
    pub total_micros: u64,
}

/// Lookup counters keyed by kind
#[derive(Debug, Default)]
pub struct LookupStats {
    totals: DashMap<LookupKind, LookupTotals>,
}

impl LookupStats {
    /// Current totals, keyed by lookup name
    pub fn snapshot(&self) -> BTreeMap<String, LookupTotals> {
        self.totals
            .iter()
            .map(|entry| (entry.key().to_string(), *entry.value()))
            .collect()
    }
}

impl LookupMetrics for LookupStats {
    fn record_lookup(&self, kind: LookupKind, latency: Duration, result_count: usize) {
        let mut entry = self.totals.entry(kind).or_default();
        let totals = entry.value_mut();
        totals.requests += 1;
        totals.results += result_count as u64;
        totals.total_micros += latency.as_micros() as u64;
    }
}

/// Server metadata for health checks
#[derive(Debug, Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate_per_kind() {
        let stats = LookupStats::default();
        stats.record_lookup(LookupKind::Content, Duration::from_micros(40), 3);
        stats.record_lookup(LookupKind::Content, Duration::from_micros(60), 0);
        stats.record_lookup(LookupKind::TopRaters, Duration::from_micros(5), 10);

        let snapshot = stats.snapshot();
        assert_eq!(
            snapshot["content"],
            LookupTotals {
                requests: 2,
                results: 3,
                total_micros: 100
            }
        );
        assert_eq!(snapshot["top_raters"].results, 10);
        assert!(!snapshot.contains_key("item_audience"));
    }
}
