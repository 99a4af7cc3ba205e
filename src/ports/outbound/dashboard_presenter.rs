use crate::live_view::domain::{
    ActivityEntry, FacetOptions, FindingDetail, FindingsPage, ProjectCard, StatsSnapshot,
};

/// DashboardPresenter port - the rendering seam for everything that is
/// not a chart: summary text, the project cards, the findings table and
/// the detail overlay.
///
/// Implementations draw whatever the engine hands them; layout and
/// styling are entirely theirs.
pub trait DashboardPresenter {
    /// Renders the aggregate summary (counts, severity breakdown, AI and
    /// remediation metrics, pipeline health).
    fn render_summary(&self, stats: &StatsSnapshot, scope: Option<&str>);

    /// Renders the project cards with their last known scan progress.
    fn render_projects(&self, projects: &[ProjectCard]);

    /// Renders the feed of currently running scans.
    fn render_activity(&self, activity: &[ActivityEntry]);

    /// Renders one page of the findings table.
    ///
    /// `controls_disabled` is set when the page was synthesized from the
    /// unpaginated fallback endpoint and paging makes no sense for this
    /// render cycle.
    fn render_findings(&self, page: &FindingsPage, total_pages: u64, controls_disabled: bool);

    /// Renders the full record of one finding in the overlay.
    fn render_detail(&self, detail: &FindingDetail);

    /// Renders the available filter values.
    fn render_facets(&self, facets: &FacetOptions);

    /// Shows an informational message.
    fn notice(&self, message: &str);

    /// Surfaces a user-visible error (mutation failures and the like;
    /// per-tick fetch failures only reach the log).
    fn error(&self, message: &str);
}
