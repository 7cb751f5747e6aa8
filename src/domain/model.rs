use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A tracked short link as returned by the provider's listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub name: String,
    /// Running click count embedded on the listing record, when the
    /// provider sends one. Saves a per-link stats request.
    pub clicks_direct: Option<u64>,
}

/// Resolved click count for one link that survived the name filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkStat {
    pub name: String,
    pub clicks: u64,
}

/// Per-link stats ordered by clicks descending, plus the grand total.
#[derive(Debug, Clone)]
pub struct Report {
    pub stats: Vec<LinkStat>,
    pub total: u64,
}

impl Report {
    /// Ties keep their listing order (stable sort).
    pub fn new(mut stats: Vec<LinkStat>) -> Self {
        stats.sort_by(|a, b| b.clicks.cmp(&a.clicks));
        let total = stats.iter().map(|s| s.clicks).sum();
        Self { stats, total }
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Date range for the per-link stats fallback, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StatsWindow {
    /// Window of `days` days ending today (UTC, today included).
    pub fn ending_today(days: u32) -> Self {
        Self::ending_on(Utc::now().date_naive(), days)
    }

    pub fn ending_on(end: NaiveDate, days: u32) -> Self {
        Self {
            start: end - Days::new(u64::from(days)),
            end,
        }
    }
}
