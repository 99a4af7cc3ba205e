use secdash::prelude::*;
use std::cell::RefCell;

/// Mock DashboardPresenter for testing
///
/// Records what was rendered instead of printing it.
#[derive(Default)]
pub struct MockPresenter {
    pub summaries: RefCell<Vec<(u64, Option<String>)>>,
    pub project_renders: RefCell<Vec<Vec<String>>>,
    pub findings_renders: RefCell<Vec<(usize, u64, bool)>>,
    pub details: RefCell<Vec<u64>>,
    pub notices: RefCell<Vec<String>>,
    pub errors: RefCell<Vec<String>>,
}

impl MockPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_findings_render(&self) -> Option<(usize, u64, bool)> {
        self.findings_renders.borrow().last().copied()
    }
}

impl DashboardPresenter for MockPresenter {
    fn render_summary(&self, stats: &StatsSnapshot, scope: Option<&str>) {
        self.summaries
            .borrow_mut()
            .push((stats.total_findings, scope.map(str::to_string)));
    }

    fn render_projects(&self, projects: &[ProjectCard]) {
        self.project_renders.borrow_mut().push(
            projects
                .iter()
                .map(|card| card.project.name.clone())
                .collect(),
        );
    }

    fn render_activity(&self, _activity: &[ActivityEntry]) {}

    fn render_findings(&self, page: &FindingsPage, total_pages: u64, controls_disabled: bool) {
        self.findings_renders
            .borrow_mut()
            .push((page.findings.len(), total_pages, controls_disabled));
    }

    fn render_detail(&self, detail: &FindingDetail) {
        self.details.borrow_mut().push(detail.id);
    }

    fn render_facets(&self, _facets: &FacetOptions) {}

    fn notice(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}
