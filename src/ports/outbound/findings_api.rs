use crate::live_view::domain::{
    ActivityEntry, DeleteOutcome, FacetOptions, FindingDetail, FindingSummary, FindingsPage,
    FindingsQuery, Project, ScanProgress, StatsSnapshot,
};
use crate::shared::Result;
use async_trait::async_trait;

/// FindingsApi port - one method per remote resource.
///
/// Implementations issue a single network request per call and return a
/// typed snapshot or a classified failure; they never mutate view state.
/// Retry policy is deliberately absent: a failed fetch waits for the
/// next scheduled tick.
///
/// Futures are not required to be `Send`: all fetches resolve on the
/// dashboard's single logical thread of execution.
#[async_trait(?Send)]
pub trait FindingsApi {
    /// Fetches aggregate statistics, optionally scoped to one project.
    async fn stats(&self, scope: Option<&str>) -> Result<StatsSnapshot>;

    /// Fetches the full project list.
    async fn projects(&self) -> Result<Vec<Project>>;

    /// Fetches distinct values for the filter dropdowns.
    async fn filters(&self) -> Result<FacetOptions>;

    /// Fetches one page of the findings table.
    async fn findings_page(&self, query: &FindingsQuery) -> Result<FindingsPage>;

    /// Fallback findings fetch against the simpler, unpaginated endpoint.
    async fn findings_flat(&self, scope: Option<&str>) -> Result<Vec<FindingSummary>>;

    /// Fetches the feed of currently running scans.
    async fn activity(&self) -> Result<Vec<ActivityEntry>>;

    /// Fetches fine-grained progress for one scan.
    async fn scan_progress(&self, scan_id: u64) -> Result<ScanProgress>;

    /// Fetches the full record of a single finding.
    async fn finding_detail(&self, id: u64) -> Result<FindingDetail>;

    /// Deletes a project and everything recorded for it.
    async fn delete_project(&self, repo: &str) -> Result<DeleteOutcome>;
}
