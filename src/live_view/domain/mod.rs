pub mod finding;
pub mod project;
pub mod stats;

pub use finding::{
    severity_rank, DeleteOutcome, FacetOptions, FindingDetail, FindingSummary, FindingsPage,
    FindingsQuery,
};
pub use project::{ActiveScan, ActivityEntry, Project, ProjectCard, ScanProgress};
pub use stats::{
    AiMetrics, DevSecOpsMetrics, RepoRisk, SeverityBreakdown, StatsSnapshot, SystemHealth,
    TrendData,
};
