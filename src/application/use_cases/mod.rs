/// Use cases orchestrating the synchronization engine through ports.
mod delete_project;
mod load_finding_detail;
mod run_dashboard;

pub use delete_project::{DeleteController, DeleteFlow};
pub use load_finding_detail::DetailLoader;
pub use run_dashboard::{Command, DashboardSession};
