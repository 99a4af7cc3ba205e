use crate::application::reconciler::Reconciler;
use crate::ports::outbound::{DashboardPresenter, FindingsApi};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// States of the two-step delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteFlow {
    #[default]
    Idle,
    PendingConfirm(String),
    Deleting(String),
}

/// DeleteController - the only writer of destructive mutations.
///
/// Drives `idle -> pending_confirm(repo) -> deleting(repo) -> idle`,
/// with a cancel edge back to idle from the pending state. Whatever the
/// outcome, the flow ends idle; a failed delete leaves the rendered
/// project list untouched.
pub struct DeleteController<A, P> {
    api: Rc<A>,
    presenter: Rc<P>,
    reconciler: Rc<Reconciler>,
    flow: RefCell<DeleteFlow>,
}

impl<A, P> DeleteController<A, P>
where
    A: FindingsApi,
    P: DashboardPresenter,
{
    pub fn new(api: Rc<A>, presenter: Rc<P>, reconciler: Rc<Reconciler>) -> Self {
        Self {
            api,
            presenter,
            reconciler,
            flow: RefCell::new(DeleteFlow::Idle),
        }
    }

    pub fn state(&self) -> DeleteFlow {
        self.flow.borrow().clone()
    }

    /// Asks for confirmation before deleting `repo`. A second request
    /// while one is pending simply retargets the confirmation.
    pub fn request(&self, repo: &str) {
        let mut flow = self.flow.borrow_mut();
        if matches!(*flow, DeleteFlow::Deleting(_)) {
            self.presenter.notice("A deletion is already in progress.");
            return;
        }
        *flow = DeleteFlow::PendingConfirm(repo.to_string());
        self.presenter.notice(&format!(
            "⚠️  Delete project '{}' and all its scans and findings? Type 'y' to confirm, 'no' to cancel.",
            repo
        ));
    }

    /// Abandons a pending confirmation.
    pub fn cancel(&self) {
        let mut flow = self.flow.borrow_mut();
        if matches!(*flow, DeleteFlow::PendingConfirm(_)) {
            self.presenter.notice("Deletion cancelled.");
        }
        *flow = DeleteFlow::Idle;
    }

    /// Executes a pending deletion.
    ///
    /// On success the project is removed from the rendered list
    /// immediately (and the scope reset to global if it pointed at the
    /// victim); the caller is told to trigger a reconciling refetch by
    /// the `true` return. On failure nothing is removed and the server's
    /// message is surfaced.
    pub async fn confirm(&self) -> bool {
        let repo = {
            let mut flow = self.flow.borrow_mut();
            match std::mem::take(&mut *flow) {
                DeleteFlow::PendingConfirm(repo) => {
                    *flow = DeleteFlow::Deleting(repo.clone());
                    repo
                }
                other => {
                    *flow = other;
                    return false;
                }
            }
        };

        let deleted = match self.api.delete_project(&repo).await {
            Ok(outcome) => match outcome.into_result() {
                Ok(message) => {
                    info!(repo = %repo, "project deleted");
                    self.reconciler.view().borrow_mut().remove_project(&repo);
                    self.presenter.notice(&format!("🗑️  {}", message));
                    true
                }
                Err(message) => {
                    self.presenter
                        .error(&format!("Failed to delete '{}': {}", repo, message));
                    false
                }
            },
            Err(error) => {
                self.presenter
                    .error(&format!("Failed to delete '{}': {}", repo, error));
                false
            }
        };

        *self.flow.borrow_mut() = DeleteFlow::Idle;
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::ViewModel;
    use crate::live_view::domain::{
        ActivityEntry, DeleteOutcome, FacetOptions, FindingDetail, FindingSummary, FindingsPage,
        FindingsQuery, Project, ScanProgress, StatsSnapshot,
    };
    use crate::shared::Result;
    use async_trait::async_trait;

    struct StubApi {
        outcome: DeleteOutcome,
        fail_transport: bool,
    }

    #[async_trait(?Send)]
    impl FindingsApi for StubApi {
        async fn stats(&self, _scope: Option<&str>) -> Result<StatsSnapshot> {
            Ok(StatsSnapshot::default())
        }
        async fn projects(&self) -> Result<Vec<Project>> {
            Ok(Vec::new())
        }
        async fn filters(&self) -> Result<FacetOptions> {
            Ok(FacetOptions::default())
        }
        async fn findings_page(&self, _query: &FindingsQuery) -> Result<FindingsPage> {
            Ok(FindingsPage::default())
        }
        async fn findings_flat(&self, _scope: Option<&str>) -> Result<Vec<FindingSummary>> {
            Ok(Vec::new())
        }
        async fn activity(&self) -> Result<Vec<ActivityEntry>> {
            Ok(Vec::new())
        }
        async fn scan_progress(&self, _scan_id: u64) -> Result<ScanProgress> {
            anyhow::bail!("not used")
        }
        async fn finding_detail(&self, _id: u64) -> Result<FindingDetail> {
            anyhow::bail!("not used")
        }
        async fn delete_project(&self, _repo: &str) -> Result<DeleteOutcome> {
            if self.fail_transport {
                anyhow::bail!("connection refused");
            }
            Ok(self.outcome.clone())
        }
    }

    #[derive(Default)]
    struct StubPresenter {
        errors: RefCell<Vec<String>>,
        notices: RefCell<Vec<String>>,
    }

    impl DashboardPresenter for StubPresenter {
        fn render_summary(&self, _stats: &StatsSnapshot, _scope: Option<&str>) {}
        fn render_projects(&self, _projects: &[crate::live_view::domain::ProjectCard]) {}
        fn render_activity(&self, _activity: &[ActivityEntry]) {}
        fn render_findings(&self, _page: &FindingsPage, _total: u64, _disabled: bool) {}
        fn render_detail(&self, _detail: &FindingDetail) {}
        fn render_facets(&self, _facets: &FacetOptions) {}
        fn notice(&self, message: &str) {
            self.notices.borrow_mut().push(message.to_string());
        }
        fn error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }
    }

    fn controller(
        outcome: DeleteOutcome,
        fail_transport: bool,
        scope: Option<String>,
    ) -> (DeleteController<StubApi, StubPresenter>, Rc<Reconciler>) {
        let view = Rc::new(RefCell::new(ViewModel::new(15, scope)));
        let reconciler = Rc::new(Reconciler::new(view));
        let projects: Vec<Project> =
            serde_json::from_str(r#"[{"name": "acme/api"}, {"name": "acme/web"}]"#).unwrap();
        reconciler.view().borrow_mut().apply_projects(projects);
        let controller = DeleteController::new(
            Rc::new(StubApi {
                outcome,
                fail_transport,
            }),
            Rc::new(StubPresenter::default()),
            reconciler.clone(),
        );
        (controller, reconciler)
    }

    fn success_outcome() -> DeleteOutcome {
        serde_json::from_str(r#"{"status": "success", "message": "Deleted 3 scans for acme/api"}"#)
            .unwrap()
    }

    fn error_outcome() -> DeleteOutcome {
        serde_json::from_str(r#"{"status": "error", "error": "not found"}"#).unwrap()
    }

    #[tokio::test]
    async fn test_confirm_without_request_is_a_no_op() {
        let (controller, reconciler) = controller(success_outcome(), false, None);
        assert!(!controller.confirm().await);
        assert_eq!(reconciler.view().borrow().projects.len(), 2);
    }

    #[tokio::test]
    async fn test_successful_delete_removes_project_and_returns_to_idle() {
        let (controller, reconciler) = controller(success_outcome(), false, None);
        controller.request("acme/api");
        assert_eq!(
            controller.state(),
            DeleteFlow::PendingConfirm("acme/api".to_string())
        );

        assert!(controller.confirm().await);
        assert_eq!(controller.state(), DeleteFlow::Idle);
        let view = reconciler.view().borrow();
        assert_eq!(view.projects.len(), 1);
        assert_eq!(view.projects[0].project.name, "acme/web");
    }

    #[tokio::test]
    async fn test_deleting_selected_scope_resets_to_global() {
        let (controller, reconciler) =
            controller(success_outcome(), false, Some("acme/api".to_string()));
        controller.request("acme/api");
        assert!(controller.confirm().await);
        assert!(reconciler.view().borrow().selected_scope.is_none());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_list_untouched_and_surfaces_error() {
        let (controller, reconciler) = controller(error_outcome(), false, None);
        controller.request("acme/api");
        assert!(!controller.confirm().await);

        assert_eq!(controller.state(), DeleteFlow::Idle);
        assert_eq!(reconciler.view().borrow().projects.len(), 2);
        let errors = controller.presenter.errors.borrow();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("not found"));
    }

    #[tokio::test]
    async fn test_transport_failure_behaves_like_a_failed_delete() {
        let (controller, reconciler) = controller(DeleteOutcome::default(), true, None);
        controller.request("acme/api");
        assert!(!controller.confirm().await);
        assert_eq!(controller.state(), DeleteFlow::Idle);
        assert_eq!(reconciler.view().borrow().projects.len(), 2);
        assert_eq!(controller.presenter.errors.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_returns_to_idle() {
        let (controller, _reconciler) = controller(success_outcome(), false, None);
        controller.request("acme/api");
        controller.cancel();
        assert_eq!(controller.state(), DeleteFlow::Idle);
        assert!(!controller.confirm().await, "nothing left to confirm");
    }
}
