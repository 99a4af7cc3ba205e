use std::time::Duration;

/// SessionOptions - resolved settings for one dashboard session.
///
/// Built by merging CLI flags over the optional config file over the
/// defaults; validated before the session starts.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Cadence of the stats + projects polls.
    pub fast_interval: Duration,
    /// Cadence of the findings table + facet polls.
    pub findings_interval: Duration,
    /// Cadence of the activity/progress correlation poll.
    pub progress_interval: Duration,
    /// Findings table page size.
    pub per_page: u64,
    /// Initial aggregate-view scope (`None` = global).
    pub scope: Option<String>,
    /// Render one snapshot and exit instead of polling.
    pub once: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            fast_interval: Duration::from_secs(5),
            findings_interval: Duration::from_secs(30),
            progress_interval: Duration::from_secs(2),
            per_page: 15,
            scope: None,
            once: false,
        }
    }
}
