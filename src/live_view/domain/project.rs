use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// One project known to the pipeline, identified by its owner/repo name.
///
/// A project appears when the projects resource returns it; an active
/// project additionally participates in progress correlation until it
/// drops out of the active set.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_run: Option<String>,
}

fn default_provider() -> String {
    "github".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

impl Project {
    /// Parses the server's `last_run` timestamp for display.
    ///
    /// The server emits ISO-8601 with or without an offset depending on
    /// its database driver, so both forms are accepted.
    pub fn last_run_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_run.as_deref()?;
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Some(with_offset.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// One entry of the activity feed: a scan currently in flight.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityEntry {
    pub id: u64,
    pub project: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default = "default_branch")]
    pub branch: String,
}

/// Correlation record joining an active project to its in-flight scan.
///
/// Valid only for the tick it was derived on; the join is re-run from
/// fresh snapshots every progress tick instead of being kept as a
/// mutable cross-reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveScan {
    pub project: String,
    pub scan_id: u64,
}

/// Fine-grained progress of one scan.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanProgress {
    #[serde(default)]
    pub scan_id: Option<u64>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_stage")]
    pub stage: String,
    #[serde(default)]
    pub step_description: String,
    #[serde(default)]
    pub step: u32,
    #[serde(default = "default_total_steps")]
    pub total_steps: u32,
    #[serde(default)]
    pub progress_percent: u32,
}

fn default_status() -> String {
    "processing".to_string()
}

fn default_stage() -> String {
    "Processing".to_string()
}

fn default_total_steps() -> u32 {
    10
}

impl ScanProgress {
    /// Progress capped to 100, whatever the server claims.
    pub fn percent(&self) -> u32 {
        self.progress_percent.min(100)
    }
}

/// A project as displayed: the latest project snapshot plus the last
/// known scan progress.
///
/// `progress` is retained when the activity feed briefly stops listing
/// the scan, so the card does not flicker back to zero between polls;
/// it is dropped only when the project stops being active.
#[derive(Debug, Clone)]
pub struct ProjectCard {
    pub project: Project,
    pub progress: Option<ScanProgress>,
}

impl ProjectCard {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            progress: None,
        }
    }
}
