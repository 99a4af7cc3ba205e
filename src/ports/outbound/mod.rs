/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (network, terminal, charts).
pub mod chart_renderer;
pub mod dashboard_presenter;
pub mod findings_api;

pub use chart_renderer::{ChartData, ChartKind, ChartRenderer, ChartSpec, SeriesColor, SeriesStyle};
pub use dashboard_presenter::DashboardPresenter;
pub use findings_api::FindingsApi;
