use async_trait::async_trait;
use secdash::prelude::*;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

/// Mock FindingsApi for testing
///
/// Canned responses are configured with the builder methods; per-resource
/// failure switches simulate transport errors. The mock mutates its own
/// project list on delete so refetch-after-delete reconciles the way a
/// real server would.
pub struct MockFindingsApi {
    /// Successive stats responses; the last one repeats once drained.
    pub stats_responses: RefCell<VecDeque<StatsSnapshot>>,
    pub projects: RefCell<Vec<Project>>,
    pub facets: FacetOptions,
    pub findings: RefCell<Option<FindingsPage>>,
    pub flat_findings: RefCell<Vec<FindingSummary>>,
    pub activity: RefCell<Vec<ActivityEntry>>,
    pub progress: RefCell<HashMap<u64, ScanProgress>>,
    pub detail: Option<FindingDetail>,
    pub delete_outcome: Option<DeleteOutcome>,
    pub fail_stats: Cell<bool>,
    pub fail_findings_page: Cell<bool>,
    pub fail_flat: Cell<bool>,
    pub fail_progress_for: RefCell<Vec<u64>>,
    /// Every findings query the mock has served, for assertions.
    pub queries_seen: RefCell<Vec<FindingsQuery>>,
    /// Every stats scope the mock has served, for assertions.
    pub scopes_seen: RefCell<Vec<Option<String>>>,
}

impl MockFindingsApi {
    pub fn new() -> Self {
        Self {
            stats_responses: RefCell::new(VecDeque::new()),
            projects: RefCell::new(Vec::new()),
            facets: FacetOptions::default(),
            findings: RefCell::new(None),
            flat_findings: RefCell::new(Vec::new()),
            activity: RefCell::new(Vec::new()),
            progress: RefCell::new(HashMap::new()),
            detail: None,
            delete_outcome: None,
            fail_stats: Cell::new(false),
            fail_findings_page: Cell::new(false),
            fail_flat: Cell::new(false),
            fail_progress_for: RefCell::new(Vec::new()),
            queries_seen: RefCell::new(Vec::new()),
            scopes_seen: RefCell::new(Vec::new()),
        }
    }

    pub fn with_stats_json(self, json: &str) -> Self {
        self.stats_responses
            .borrow_mut()
            .push_back(serde_json::from_str(json).unwrap());
        self
    }

    pub fn with_projects_json(self, json: &str) -> Self {
        *self.projects.borrow_mut() = serde_json::from_str(json).unwrap();
        self
    }

    pub fn with_facets_json(mut self, json: &str) -> Self {
        self.facets = serde_json::from_str(json).unwrap();
        self
    }

    pub fn with_findings_json(self, json: &str) -> Self {
        *self.findings.borrow_mut() = Some(serde_json::from_str(json).unwrap());
        self
    }

    pub fn with_flat_findings_json(self, json: &str) -> Self {
        *self.flat_findings.borrow_mut() = serde_json::from_str(json).unwrap();
        self
    }

    pub fn with_activity_json(self, json: &str) -> Self {
        *self.activity.borrow_mut() = serde_json::from_str(json).unwrap();
        self
    }

    pub fn with_progress_json(self, scan_id: u64, json: &str) -> Self {
        self.progress
            .borrow_mut()
            .insert(scan_id, serde_json::from_str(json).unwrap());
        self
    }

    pub fn with_detail_json(mut self, json: &str) -> Self {
        self.detail = Some(serde_json::from_str(json).unwrap());
        self
    }

    pub fn with_delete_outcome_json(mut self, json: &str) -> Self {
        self.delete_outcome = Some(serde_json::from_str(json).unwrap());
        self
    }

    pub fn with_failing_findings_page(self) -> Self {
        self.fail_findings_page.set(true);
        self
    }
}

impl Default for MockFindingsApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl FindingsApi for MockFindingsApi {
    async fn stats(&self, scope: Option<&str>) -> Result<StatsSnapshot> {
        self.scopes_seen
            .borrow_mut()
            .push(scope.map(str::to_string));
        if self.fail_stats.get() {
            anyhow::bail!("mock stats failure");
        }
        let mut responses = self.stats_responses.borrow_mut();
        if responses.len() > 1 {
            Ok(responses.pop_front().unwrap())
        } else {
            Ok(responses.front().cloned().unwrap_or_default())
        }
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.borrow().clone())
    }

    async fn filters(&self) -> Result<FacetOptions> {
        Ok(self.facets.clone())
    }

    async fn findings_page(&self, query: &FindingsQuery) -> Result<FindingsPage> {
        self.queries_seen.borrow_mut().push(query.clone());
        if self.fail_findings_page.get() {
            anyhow::bail!("mock paginated endpoint failure");
        }
        Ok(self.findings.borrow().clone().unwrap_or_default())
    }

    async fn findings_flat(&self, _scope: Option<&str>) -> Result<Vec<FindingSummary>> {
        if self.fail_flat.get() {
            anyhow::bail!("mock flat endpoint failure");
        }
        Ok(self.flat_findings.borrow().clone())
    }

    async fn activity(&self) -> Result<Vec<ActivityEntry>> {
        Ok(self.activity.borrow().clone())
    }

    async fn scan_progress(&self, scan_id: u64) -> Result<ScanProgress> {
        if self.fail_progress_for.borrow().contains(&scan_id) {
            anyhow::bail!("mock progress failure for scan {}", scan_id);
        }
        self.progress
            .borrow()
            .get(&scan_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no progress configured for scan {}", scan_id))
    }

    async fn finding_detail(&self, id: u64) -> Result<FindingDetail> {
        self.detail
            .clone()
            .filter(|detail| detail.id == id)
            .ok_or_else(|| anyhow::anyhow!("no detail configured for finding {}", id))
    }

    async fn delete_project(&self, repo: &str) -> Result<DeleteOutcome> {
        let outcome = self
            .delete_outcome
            .clone()
            .ok_or_else(|| anyhow::anyhow!("mock delete transport failure"))?;
        // Mirror the server: a successful delete removes the project.
        if matches!(outcome.status.as_deref(), Some("success")) {
            self.projects
                .borrow_mut()
                .retain(|project| project.name != repo);
        }
        Ok(outcome)
    }
}
