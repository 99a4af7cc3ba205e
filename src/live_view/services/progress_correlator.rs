use crate::live_view::domain::{ActiveScan, ActivityEntry, Project};

/// ProgressCorrelator - joins the project list and the activity feed.
///
/// The two resources poll independently, so the join is recomputed from
/// the two immutable snapshots on every progress tick instead of being
/// maintained as mutable cross-references. A project that is flagged
/// active but has no activity entry yet (scan finished, or not yet
/// registered) simply produces no record; its last displayed progress is
/// left alone by the caller.
pub struct ProgressCorrelator;

impl ProgressCorrelator {
    /// Derives the set of scans to poll progress for: one record per
    /// active project that the activity feed currently lists.
    ///
    /// When a project has several in-flight scans the newest entry wins,
    /// matching the feed's ordering.
    pub fn correlate(projects: &[Project], activity: &[ActivityEntry]) -> Vec<ActiveScan> {
        projects
            .iter()
            .filter(|project| project.is_active)
            .filter_map(|project| {
                activity
                    .iter()
                    .find(|entry| entry.project == project.name)
                    .map(|entry| ActiveScan {
                        project: project.name.clone(),
                        scan_id: entry.id,
                    })
            })
            .collect()
    }
}
