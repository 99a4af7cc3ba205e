mod mock_chart_renderer;
mod mock_findings_api;
mod mock_presenter;

pub use mock_chart_renderer::{ChartOp, MockChartRenderer};
pub use mock_findings_api::MockFindingsApi;
pub use mock_presenter::MockPresenter;
