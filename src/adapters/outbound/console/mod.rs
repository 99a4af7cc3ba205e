mod terminal_charts;
mod terminal_presenter;

pub use terminal_charts::TerminalChartRenderer;
pub use terminal_presenter::TerminalPresenter;
