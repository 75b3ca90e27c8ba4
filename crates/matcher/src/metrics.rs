// Metrics hooks for the lookup layer.
//
// A `LookupMetrics` implementation is handed to a `Recommender` with
// `Recommender::with_metrics`; every public lookup then reports its latency
// and result count. This keeps instrumentation decoupled from any specific
// metrics backend.
use std::fmt;
use std::time::Duration;

/// Which lookup produced a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Content,
    UserRecommendations,
    ItemAudience,
    RatingHistory,
    TopRaters,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupKind::Content => "content",
            LookupKind::UserRecommendations => "user_recommendations",
            LookupKind::ItemAudience => "item_audience",
            LookupKind::RatingHistory => "rating_history",
            LookupKind::TopRaters => "top_raters",
        };
        f.write_str(name)
    }
}

/// Metrics observer for lookups.
pub trait LookupMetrics: Send + Sync {
    /// Record the outcome of a lookup.
    ///
    /// `latency` is the wall-clock time spent in the lookup and
    /// `result_count` the number of rows returned; failed lookups report
    /// zero rows.
    fn record_lookup(&self, kind: LookupKind, latency: Duration, result_count: usize);
}
