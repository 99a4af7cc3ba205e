//! secdash - Live terminal dashboard for security-findings pipelines
//!
//! This library contains the live-view synchronization engine behind the
//! `secdash` binary: it polls several independently-changing resources of
//! a findings API on their own cadences, reconciles the asynchronous,
//! possibly out-of-order responses into one coherent view-model, and fans
//! changes out to mode-aware charts and terminal renderers.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`live_view`): Pure data model and domain services
//! - **Application Layer** (`application`): View-model, reconciler,
//!   scheduler, chart adapter and use cases
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use secdash::prelude::*;
//! use std::rc::Rc;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let api = HttpFindingsApi::new("http://127.0.0.1:8001/api")?;
//! let renderer = TerminalChartRenderer::new();
//! let presenter = TerminalPresenter::new();
//!
//! // Create the session with injected dependencies
//! let options = SessionOptions::default();
//! let session = Rc::new(DashboardSession::new(api, renderer, presenter, options));
//!
//! // Drive it on a single-threaded runtime
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_all()
//!     .build()?;
//! let local = tokio::task::LocalSet::new();
//! runtime.block_on(local.run_until(session.run()))?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod live_view;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{TerminalChartRenderer, TerminalPresenter};
    pub use crate::adapters::outbound::network::HttpFindingsApi;
    pub use crate::application::charts::{ChartMode, ChartSet};
    pub use crate::application::dto::SessionOptions;
    pub use crate::application::read_models::{Filters, Pagination, ViewModel};
    pub use crate::application::reconciler::{Reconciler, Resource, StalenessGuard, Ticket};
    pub use crate::application::scheduler::PollScheduler;
    pub use crate::application::use_cases::{
        Command, DashboardSession, DeleteController, DeleteFlow, DetailLoader,
    };
    pub use crate::live_view::domain::{
        ActiveScan, ActivityEntry, DeleteOutcome, FacetOptions, FindingDetail, FindingSummary,
        FindingsPage, FindingsQuery, Project, ProjectCard, ScanProgress, StatsSnapshot, TrendData,
    };
    pub use crate::live_view::services::ProgressCorrelator;
    pub use crate::ports::outbound::{
        ChartData, ChartKind, ChartRenderer, ChartSpec, DashboardPresenter, FindingsApi,
        SeriesColor, SeriesStyle,
    };
    pub use crate::shared::Result;
}
