use crate::live_view::domain::{
    ActivityEntry, FacetOptions, FindingsPage, FindingsQuery, Project, ProjectCard, ScanProgress,
    StatsSnapshot,
};

/// Findings table filters. Empty fields mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub repo: Option<String>,
    pub tool: Option<String>,
    pub severity: Option<String>,
}

/// Pagination state for the findings table.
///
/// Invariant: `page` stays within `[1, total_pages()]`; `total_pages`
/// has a floor of 1 so an empty table still renders page 1 of 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    /// Set while the last findings render came from the unpaginated
    /// fallback endpoint; cleared on the next paginated success.
    pub controls_disabled: bool,
}

impl Pagination {
    pub fn new(per_page: u64) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            total: 0,
            controls_disabled: false,
        }
    }

    /// `max(1, ceil(total / per_page))`.
    pub fn total_pages(&self) -> u64 {
        (self.total.div_ceil(self.per_page)).max(1)
    }
}

/// The one view-model of the dashboard session.
#[derive(Debug, Default)]
pub struct ViewModel {
    pub filters: Filters,
    pub pagination: Pagination,
    /// Optional single-project scope for the aggregate views; `None`
    /// means global.
    pub selected_scope: Option<String>,
    pub stats: Option<StatsSnapshot>,
    pub projects: Vec<ProjectCard>,
    pub activity: Vec<ActivityEntry>,
    pub findings: Option<FindingsPage>,
    pub facets: FacetOptions,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(15)
    }
}

impl ViewModel {
    pub fn new(per_page: u64, scope: Option<String>) -> Self {
        Self {
            pagination: Pagination::new(per_page),
            selected_scope: scope,
            ..Self::default()
        }
    }

    // --- Filter & pagination composer -----------------------------------

    /// Sets the repository filter; any filter change resets to page 1.
    pub fn set_repo_filter(&mut self, repo: Option<String>) {
        self.filters.repo = repo;
        self.pagination.page = 1;
    }

    /// Sets the tool filter; any filter change resets to page 1.
    pub fn set_tool_filter(&mut self, tool: Option<String>) {
        self.filters.tool = tool;
        self.pagination.page = 1;
    }

    /// Sets the severity filter; any filter change resets to page 1.
    pub fn set_severity_filter(&mut self, severity: Option<String>) {
        self.filters.severity = severity;
        self.pagination.page = 1;
    }

    /// Moves `delta` pages. A move that would land outside
    /// `[1, total_pages]` is a no-op; returns whether the page changed.
    pub fn change_page(&mut self, delta: i64) -> bool {
        let target = self.pagination.page as i64 + delta;
        if target < 1 || target > self.pagination.total_pages() as i64 {
            return false;
        }
        self.pagination.page = target as u64;
        true
    }

    /// Selects the aggregate-view scope (`None` = global).
    pub fn select_scope(&mut self, scope: Option<String>) {
        self.selected_scope = scope;
    }

    /// Composes the query parameters for the next findings fetch from
    /// the current filters and pagination.
    pub fn findings_query(&self) -> FindingsQuery {
        FindingsQuery {
            page: self.pagination.page,
            per_page: self.pagination.per_page,
            repo: self.filters.repo.clone(),
            tool: self.filters.tool.clone(),
            severity: self.filters.severity.clone(),
        }
    }

    // --- Snapshot application (called by the reconciler) ----------------

    /// Replaces the findings page and recomputes pagination. The page is
    /// clamped in case the total shrank under us between polls.
    pub fn apply_findings_page(&mut self, page: FindingsPage) {
        self.pagination.total = page.total;
        self.pagination.controls_disabled = false;
        self.pagination.page = page.page.clamp(1, self.pagination.total_pages());
        self.findings = Some(page);
    }

    /// Replaces the findings with a single page synthesized from the
    /// fallback endpoint, disabling paging for this render cycle.
    pub fn apply_fallback_findings(&mut self, page: FindingsPage) {
        self.pagination.total = page.total;
        self.pagination.page = 1;
        self.pagination.controls_disabled = true;
        self.findings = Some(page);
    }

    /// Replaces the project list, carrying each still-active project's
    /// last known progress over to its new card.
    pub fn apply_projects(&mut self, projects: Vec<Project>) {
        let mut old = std::mem::take(&mut self.projects);
        self.projects = projects
            .into_iter()
            .map(|project| {
                let progress = if project.is_active {
                    old.iter_mut()
                        .find(|card| card.project.name == project.name)
                        .and_then(|card| card.progress.take())
                } else {
                    None
                };
                ProjectCard { project, progress }
            })
            .collect();
    }

    /// Records fresh progress for one project's card. Unknown projects
    /// are ignored (the card may have been deleted mid-tick).
    pub fn apply_progress(&mut self, project: &str, progress: ScanProgress) {
        if let Some(card) = self
            .projects
            .iter_mut()
            .find(|card| card.project.name == project)
        {
            card.progress = Some(progress);
        }
    }

    /// Removes a project card ahead of the server confirming; used by the
    /// optimistic half of the delete flow.
    pub fn remove_project(&mut self, name: &str) {
        self.projects.retain(|card| card.project.name != name);
        if self.selected_scope.as_deref() == Some(name) {
            self.selected_scope = None;
        }
    }
}
