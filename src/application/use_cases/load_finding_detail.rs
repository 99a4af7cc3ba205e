use crate::application::reconciler::{Reconciler, Resource};
use crate::live_view::domain::FindingDetail;
use crate::ports::outbound::{DashboardPresenter, FindingsApi};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;

/// DetailLoader - on-demand, non-polled fetch of one finding's full
/// record for the overlay.
///
/// Opening a new record supersedes interest in any still-in-flight
/// lookup; the in-flight request is not cancelled, its late response is
/// discarded through the staleness guard so it can never repopulate the
/// overlay with the wrong record. The last loaded record is kept so the
/// remediation patch can be copied without refetching.
pub struct DetailLoader<A, P> {
    api: Rc<A>,
    presenter: Rc<P>,
    reconciler: Rc<Reconciler>,
    current: RefCell<Option<FindingDetail>>,
}

impl<A, P> DetailLoader<A, P>
where
    A: FindingsApi,
    P: DashboardPresenter,
{
    pub fn new(api: Rc<A>, presenter: Rc<P>, reconciler: Rc<Reconciler>) -> Self {
        Self {
            api,
            presenter,
            reconciler,
            current: RefCell::new(None),
        }
    }

    /// Loads one finding into the overlay.
    pub async fn load(&self, id: u64) {
        let ticket = self.reconciler.issue(Resource::Detail);
        match self.api.finding_detail(id).await {
            Ok(detail) => {
                if self.reconciler.admit(&ticket) {
                    self.presenter.render_detail(&detail);
                    *self.current.borrow_mut() = Some(detail);
                }
            }
            Err(error) => {
                warn!(finding = id, %error, "finding detail fetch failed");
                self.presenter
                    .error(&format!("Could not load finding #{}: {}", id, error));
            }
        }
    }

    /// The last loaded record's remediation patch, if it has one.
    pub fn remediation(&self) -> Option<String> {
        self.current
            .borrow()
            .as_ref()
            .and_then(|detail| detail.remediation_patch.clone())
    }
}
