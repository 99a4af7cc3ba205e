use crate::application::read_models::ViewModel;
use crate::live_view::domain::{
    ActivityEntry, FacetOptions, FindingsPage, Project, ScanProgress, StatsSnapshot,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::debug;

/// The resource types the engine polls, each with its own request
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Stats,
    Projects,
    Filters,
    Findings,
    Activity,
    Progress,
    Detail,
}

impl Resource {
    const COUNT: usize = 7;

    fn index(self) -> usize {
        match self {
            Resource::Stats => 0,
            Resource::Projects => 1,
            Resource::Filters => 2,
            Resource::Findings => 3,
            Resource::Activity => 4,
            Resource::Progress => 5,
            Resource::Detail => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Stats => "stats",
            Resource::Projects => "projects",
            Resource::Filters => "filters",
            Resource::Findings => "findings",
            Resource::Activity => "activity",
            Resource::Progress => "progress",
            Resource::Detail => "detail",
        }
    }
}

/// Tag carried by one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    resource: Resource,
    seq: u64,
}

impl Ticket {
    pub fn resource(&self) -> Resource {
        self.resource
    }
}

/// StalenessGuard - per-resource monotonically increasing counters.
///
/// Issuing a request bumps the resource's counter and tags the request
/// with the new value; a resolved result is admitted only while its tag
/// still equals the counter, i.e. no newer request has been issued since.
/// This is last-request-wins, not last-response-wins, and tolerates
/// out-of-order network completion without serializing fetches.
///
/// Counter compare and assignment run on the single logical thread of
/// the session, so plain `Cell`s suffice; the type is deliberately not
/// `Sync`.
#[derive(Debug, Default)]
pub struct StalenessGuard {
    counters: [Cell<u64>; Resource::COUNT],
}

impl StalenessGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request for `resource`, superseding all earlier ones.
    pub fn issue(&self, resource: Resource) -> Ticket {
        let counter = &self.counters[resource.index()];
        let seq = counter.get() + 1;
        counter.set(seq);
        Ticket { resource, seq }
    }

    /// Whether a result tagged with `ticket` is still current.
    pub fn admit(&self, ticket: &Ticket) -> bool {
        self.counters[ticket.resource.index()].get() == ticket.seq
    }
}

/// Reconciler - the only writer of fetched snapshots into the view-model.
///
/// Every `apply_*` method checks the staleness guard first and silently
/// discards superseded results; on admission the snapshot replaces the
/// corresponding view-model slice wholesale.
pub struct Reconciler {
    view: Rc<RefCell<ViewModel>>,
    guard: StalenessGuard,
}

impl Reconciler {
    pub fn new(view: Rc<RefCell<ViewModel>>) -> Self {
        Self {
            view,
            guard: StalenessGuard::new(),
        }
    }

    pub fn view(&self) -> &Rc<RefCell<ViewModel>> {
        &self.view
    }

    pub fn issue(&self, resource: Resource) -> Ticket {
        self.guard.issue(resource)
    }

    /// Admission check shared by all appliers (and by the detail loader,
    /// whose record lives outside the view-model); logs discarded
    /// results.
    pub fn admit(&self, ticket: &Ticket) -> bool {
        if self.guard.admit(ticket) {
            true
        } else {
            debug!(
                resource = ticket.resource.name(),
                "discarding superseded response"
            );
            false
        }
    }

    pub fn apply_stats(&self, ticket: &Ticket, snapshot: StatsSnapshot) -> bool {
        self.admit(ticket) && {
            self.view.borrow_mut().stats = Some(snapshot);
            true
        }
    }

    pub fn apply_projects(&self, ticket: &Ticket, projects: Vec<Project>) -> bool {
        self.admit(ticket) && {
            self.view.borrow_mut().apply_projects(projects);
            true
        }
    }

    pub fn apply_facets(&self, ticket: &Ticket, facets: FacetOptions) -> bool {
        self.admit(ticket) && {
            self.view.borrow_mut().facets = facets.normalized();
            true
        }
    }

    pub fn apply_findings(&self, ticket: &Ticket, page: FindingsPage) -> bool {
        self.admit(ticket) && {
            self.view.borrow_mut().apply_findings_page(page);
            true
        }
    }

    pub fn apply_fallback_findings(&self, ticket: &Ticket, page: FindingsPage) -> bool {
        self.admit(ticket) && {
            self.view.borrow_mut().apply_fallback_findings(page);
            true
        }
    }

    pub fn apply_activity(&self, ticket: &Ticket, activity: Vec<ActivityEntry>) -> bool {
        self.admit(ticket) && {
            self.view.borrow_mut().activity = activity;
            true
        }
    }

    /// Applies one project's progress from the tick batch tagged by
    /// `ticket`. Within an admitted batch each project updates
    /// independently, so one failed fetch never blocks the others.
    pub fn apply_progress(&self, ticket: &Ticket, project: &str, progress: ScanProgress) -> bool {
        self.admit(ticket) && {
            self.view.borrow_mut().apply_progress(project, progress);
            true
        }
    }
}
