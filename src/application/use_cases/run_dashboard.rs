use crate::application::charts::ChartSet;
use crate::application::dto::SessionOptions;
use crate::application::read_models::ViewModel;
use crate::application::reconciler::{Reconciler, Resource};
use crate::application::scheduler::PollScheduler;
use crate::application::use_cases::{DeleteController, DeleteFlow, DetailLoader};
use crate::live_view::domain::{FindingsPage, Project};
use crate::live_view::services::ProgressCorrelator;
use crate::ports::outbound::{ChartRenderer, DashboardPresenter, FindingsApi};
use crate::shared::Result;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

const HELP: &str = "\
Commands:
  n / next, p / prev       page through the findings table
  repo <name> | repo -     filter findings by repository (- clears)
  tool <name> | tool -     filter findings by tool
  severity <level> | severity -
                           filter findings by severity
  scope <repo> | scope -   switch the aggregate views to one project
  detail <id>              open one finding's full record
  fix                      print the loaded finding's remediation patch
  delete <repo>            delete a project (asks for confirmation)
  y / yes, no / cancel     answer a pending confirmation
  filters                  show available filter values
  r / refresh              refresh everything now
  q / quit                 exit";

/// A user command, parsed from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PrevPage,
    FilterRepo(Option<String>),
    FilterTool(Option<String>),
    FilterSeverity(Option<String>),
    Scope(Option<String>),
    Delete(String),
    Confirm,
    Cancel,
    Detail(u64),
    CopyFix,
    Facets,
    Refresh,
    Help,
    Quit,
}

impl Command {
    /// Parses one trimmed input line; `None` means unrecognized.
    pub fn parse(line: &str) -> Option<Command> {
        let mut words = line.split_whitespace();
        let head = words.next()?;
        let tail = words.next();
        // A lone "-" clears the corresponding filter.
        let value = |tail: Option<&str>| tail.filter(|v| *v != "-").map(str::to_string);

        let command = match (head, tail) {
            ("n" | "next", None) => Command::NextPage,
            ("p" | "prev", None) => Command::PrevPage,
            ("repo", tail) => Command::FilterRepo(value(tail)),
            ("tool", tail) => Command::FilterTool(value(tail)),
            ("severity", tail) => Command::FilterSeverity(value(tail)),
            ("scope", tail) => Command::Scope(value(tail)),
            ("delete", Some(repo)) => Command::Delete(repo.to_string()),
            ("y" | "yes", None) => Command::Confirm,
            ("no" | "cancel", None) => Command::Cancel,
            ("detail" | "open", Some(id)) => Command::Detail(id.parse().ok()?),
            ("fix" | "copy", None) => Command::CopyFix,
            ("filters" | "facets", None) => Command::Facets,
            ("r" | "refresh", None) => Command::Refresh,
            ("h" | "help" | "?", None) => Command::Help,
            ("q" | "quit" | "exit", None) => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// DashboardSession - the live view's composition root.
///
/// Owns the view-model, the reconciler, the chart set and the two
/// user-triggered controllers; registers the three polling cadences and
/// the input loop. Everything runs on one logical thread inside a
/// `LocalSet`, which is what makes the reconciler's counter
/// compare-and-set race-free without locking.
pub struct DashboardSession<A, R, P>
where
    A: FindingsApi + 'static,
    R: ChartRenderer + 'static,
    P: DashboardPresenter + 'static,
{
    api: Rc<A>,
    presenter: Rc<P>,
    charts: Rc<RefCell<ChartSet<R>>>,
    reconciler: Rc<Reconciler>,
    delete: DeleteController<A, P>,
    detail: DetailLoader<A, P>,
    options: SessionOptions,
}

impl<A, R, P> DashboardSession<A, R, P>
where
    A: FindingsApi + 'static,
    R: ChartRenderer + 'static,
    P: DashboardPresenter + 'static,
{
    pub fn new(api: A, renderer: R, presenter: P, options: SessionOptions) -> Self {
        let api = Rc::new(api);
        let presenter = Rc::new(presenter);
        let view = Rc::new(RefCell::new(ViewModel::new(
            options.per_page,
            options.scope.clone(),
        )));
        let reconciler = Rc::new(Reconciler::new(view));
        Self {
            delete: DeleteController::new(api.clone(), presenter.clone(), reconciler.clone()),
            detail: DetailLoader::new(api.clone(), presenter.clone(), reconciler.clone()),
            charts: Rc::new(RefCell::new(ChartSet::new(renderer))),
            api,
            presenter,
            reconciler,
            options,
        }
    }

    /// The shared view-model, for embedding and tests.
    pub fn view(&self) -> Rc<RefCell<ViewModel>> {
        self.reconciler.view().clone()
    }

    pub fn api(&self) -> &Rc<A> {
        &self.api
    }

    pub fn presenter(&self) -> &Rc<P> {
        &self.presenter
    }

    pub fn delete_state(&self) -> DeleteFlow {
        self.delete.state()
    }

    /// Runs the session until quit, ctrl-c, or - in `once` mode - after a
    /// single full refresh.
    pub async fn run(self: Rc<Self>) -> Result<()> {
        self.presenter
            .notice("secdash connected - type 'help' for commands.");

        if self.options.once {
            self.refresh_all().await;
            return Ok(());
        }

        let scheduler = PollScheduler::new();
        let cancel = scheduler.cancellation_token();

        let session = self.clone();
        scheduler.register("stats", self.options.fast_interval, move || {
            let session = session.clone();
            async move { session.refresh_stats().await }
        });
        let session = self.clone();
        scheduler.register("projects", self.options.fast_interval, move || {
            let session = session.clone();
            async move { session.refresh_projects().await }
        });
        let session = self.clone();
        scheduler.register("filters", self.options.findings_interval, move || {
            let session = session.clone();
            async move { session.refresh_facets().await }
        });
        let session = self.clone();
        scheduler.register("findings", self.options.findings_interval, move || {
            let session = session.clone();
            async move { session.refresh_findings().await }
        });
        let session = self.clone();
        scheduler.register("progress", self.options.progress_interval, move || {
            let session = session.clone();
            async move { session.refresh_progress().await }
        });

        let session = self.clone();
        let input_cancel = cancel.clone();
        tokio::task::spawn_local(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                tokio::select! {
                    _ = input_cancel.cancelled() => break,
                    line = lines.next_line() => match line {
                        Ok(Some(line)) => {
                            let trimmed = line.trim();
                            if trimmed.is_empty() {
                                continue;
                            }
                            match Command::parse(trimmed) {
                                Some(Command::Quit) => {
                                    input_cancel.cancel();
                                    break;
                                }
                                Some(command) => session.handle_command(command).await,
                                None => session
                                    .presenter
                                    .notice("Unrecognized command - type 'help'."),
                            }
                        }
                        // stdin closed (piped input ran out); keep polling.
                        Ok(None) => break,
                        Err(error) => {
                            warn!(%error, "input read failed");
                            break;
                        }
                    }
                }
            }
        });

        tokio::select! {
            _ = cancel.cancelled() => {}
            signal = tokio::signal::ctrl_c() => {
                if let Err(error) = signal {
                    warn!(%error, "ctrl-c handler failed");
                }
            }
        }
        scheduler.shutdown();
        self.presenter.notice("Dashboard stopped.");
        Ok(())
    }

    /// Applies one user command. `Quit` is handled by the input loop and
    /// ignored here.
    pub async fn handle_command(&self, command: Command) {
        match command {
            Command::NextPage => self.page(1).await,
            Command::PrevPage => self.page(-1).await,
            Command::FilterRepo(repo) => {
                self.reconciler.view().borrow_mut().set_repo_filter(repo);
                self.tick("findings", self.refresh_findings().await);
            }
            Command::FilterTool(tool) => {
                self.reconciler.view().borrow_mut().set_tool_filter(tool);
                self.tick("findings", self.refresh_findings().await);
            }
            Command::FilterSeverity(severity) => {
                self.reconciler
                    .view()
                    .borrow_mut()
                    .set_severity_filter(severity);
                self.tick("findings", self.refresh_findings().await);
            }
            Command::Scope(scope) => {
                self.reconciler.view().borrow_mut().select_scope(scope);
                self.tick("stats", self.refresh_stats().await);
            }
            Command::Delete(repo) => self.delete.request(&repo),
            Command::Confirm => {
                if self.delete.confirm().await {
                    // Reconcile the optimistic removal against the server.
                    self.tick("projects", self.refresh_projects().await);
                    self.tick("stats", self.refresh_stats().await);
                }
            }
            Command::Cancel => self.delete.cancel(),
            Command::Detail(id) => self.detail.load(id).await,
            Command::CopyFix => match self.detail.remediation() {
                Some(patch) => self
                    .presenter
                    .notice(&format!("📋 Remediation patch:\n{}", patch)),
                None => self
                    .presenter
                    .notice("The loaded finding has no remediation patch."),
            },
            Command::Facets => {
                self.presenter
                    .render_facets(&self.reconciler.view().borrow().facets);
            }
            Command::Refresh => self.refresh_all().await,
            Command::Help => self.presenter.notice(HELP),
            Command::Quit => {}
        }
    }

    async fn page(&self, delta: i64) {
        let moved = self.reconciler.view().borrow_mut().change_page(delta);
        if moved {
            self.tick("findings", self.refresh_findings().await);
        } else {
            self.presenter.notice("No more pages in that direction.");
        }
    }

    /// One full refresh cycle; failures are logged per resource, never
    /// propagated.
    pub async fn refresh_all(&self) {
        self.tick("stats", self.refresh_stats().await);
        self.tick("projects", self.refresh_projects().await);
        self.tick("filters", self.refresh_facets().await);
        self.tick("findings", self.refresh_findings().await);
        self.tick("progress", self.refresh_progress().await);
    }

    fn tick(&self, task: &str, result: Result<()>) {
        if let Err(error) = result {
            warn!(task, %error, "refresh failed");
        }
    }

    /// Fetches stats for the current scope, reconciles and fans out to
    /// the charts and the summary renderer.
    pub async fn refresh_stats(&self) -> Result<()> {
        let scope = self.reconciler.view().borrow().selected_scope.clone();
        let ticket = self.reconciler.issue(Resource::Stats);
        let snapshot = self.api.stats(scope.as_deref()).await?;
        if self.reconciler.apply_stats(&ticket, snapshot) {
            let view = self.reconciler.view().borrow();
            if let Some(stats) = view.stats.as_ref() {
                self.charts.borrow_mut().apply(stats);
                self.presenter
                    .render_summary(stats, view.selected_scope.as_deref());
            }
        }
        Ok(())
    }

    pub async fn refresh_projects(&self) -> Result<()> {
        let ticket = self.reconciler.issue(Resource::Projects);
        let projects = self.api.projects().await?;
        if self.reconciler.apply_projects(&ticket, projects) {
            self.presenter
                .render_projects(&self.reconciler.view().borrow().projects);
        }
        Ok(())
    }

    pub async fn refresh_facets(&self) -> Result<()> {
        let ticket = self.reconciler.issue(Resource::Filters);
        let facets = self.api.filters().await?;
        self.reconciler.apply_facets(&ticket, facets);
        Ok(())
    }

    /// Renders the current findings page through the presenter, carrying
    /// the pagination's page count and the fallback-disabled flag.
    fn render_findings(&self) {
        let view = self.reconciler.view().borrow();
        if let Some(page) = view.findings.as_ref() {
            self.presenter.render_findings(
                page,
                view.pagination.total_pages(),
                view.pagination.controls_disabled,
            );
        }
    }

    /// Fetches the findings page for the current query; a failing
    /// paginated endpoint falls back to the flat one, whose synthesized
    /// single page disables paging for this cycle.
    pub async fn refresh_findings(&self) -> Result<()> {
        let query = self.reconciler.view().borrow().findings_query();
        let ticket = self.reconciler.issue(Resource::Findings);
        match self.api.findings_page(&query).await {
            Ok(page) => {
                if self.reconciler.apply_findings(&ticket, page) {
                    self.render_findings();
                }
            }
            Err(error) => {
                warn!(%error, "paginated findings fetch failed, trying the flat endpoint");
                let rows = self.api.findings_flat(query.repo.as_deref()).await?;
                let page = FindingsPage::from_flat(rows);
                if self.reconciler.apply_fallback_findings(&ticket, page) {
                    self.render_findings();
                }
            }
        }
        Ok(())
    }

    /// One progress tick: refresh the activity feed, join it against the
    /// active projects, and fan out one progress fetch per correlated
    /// scan. A failed fetch for one project never blocks the others.
    pub async fn refresh_progress(&self) -> Result<()> {
        let activity_ticket = self.reconciler.issue(Resource::Activity);
        let activity = self.api.activity().await?;
        if self.reconciler.apply_activity(&activity_ticket, activity) {
            self.presenter
                .render_activity(&self.reconciler.view().borrow().activity);
        }

        let scans = {
            let view = self.reconciler.view().borrow();
            let projects: Vec<Project> = view
                .projects
                .iter()
                .map(|card| card.project.clone())
                .collect();
            ProgressCorrelator::correlate(&projects, &view.activity)
        };
        if scans.is_empty() {
            return Ok(());
        }

        let batch = self.reconciler.issue(Resource::Progress);
        let fetches = scans.into_iter().map(|scan| {
            let api = self.api.clone();
            async move { (scan.project, api.scan_progress(scan.scan_id).await) }
        });
        let mut updated = false;
        for (project, result) in futures::future::join_all(fetches).await {
            match result {
                Ok(progress) => {
                    updated |= self.reconciler.apply_progress(&batch, &project, progress);
                }
                Err(error) => warn!(%project, %error, "scan progress fetch failed"),
            }
        }
        if updated {
            self.presenter
                .render_projects(&self.reconciler.view().borrow().projects);
        }
        Ok(())
    }
}
