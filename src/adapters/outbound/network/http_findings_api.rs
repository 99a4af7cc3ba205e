use crate::live_view::domain::{
    ActivityEntry, DeleteOutcome, FacetOptions, FindingDetail, FindingSummary, FindingsPage,
    FindingsQuery, Project, ScanProgress, StatsSnapshot,
};
use crate::ports::outbound::FindingsApi;
use crate::shared::error::DashboardError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HttpFindingsApi adapter - reqwest implementation of the FindingsApi
/// port against the dashboard's JSON-over-HTTP contract.
///
/// Each call issues exactly one request. There is deliberately no retry
/// loop: a failed fetch is reported as a classified failure and the next
/// scheduled tick tries again. Timeout handling is delegated to the
/// client; a timed-out request surfaces as a transport failure.
pub struct HttpFindingsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFindingsApi {
    /// Creates a new API client for `base_url` (e.g.
    /// `http://127.0.0.1:8001/api`).
    pub fn new(base_url: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("secdash/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Appends an optional `repo` scope to a path.
    fn scoped_path(path: &str, scope: Option<&str>) -> String {
        match scope {
            Some(repo) => format!("{}?repo={}", path, urlencoding::encode(repo)),
            None => path.to_string(),
        }
    }

    /// Builds the paginated findings path from one query snapshot.
    fn findings_path(query: &FindingsQuery) -> String {
        let mut path = format!(
            "findings/all?page={}&per_page={}",
            query.page, query.per_page
        );
        for (key, value) in [
            ("repo", &query.repo),
            ("tool", &query.tool),
            ("severity", &query.severity),
        ] {
            if let Some(value) = value {
                path.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
            }
        }
        path
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|error| DashboardError::Transport {
                resource: resource.to_string(),
                details: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Transport {
                resource: resource.to_string(),
                details: format!("server returned status code {}", status),
            }
            .into());
        }

        response
            .json::<T>()
            .await
            .map_err(|error| {
                DashboardError::Schema {
                    resource: resource.to_string(),
                    details: error.to_string(),
                }
                .into()
            })
    }
}

#[async_trait(?Send)]
impl FindingsApi for HttpFindingsApi {
    async fn stats(&self, scope: Option<&str>) -> Result<StatsSnapshot> {
        self.get_json("stats", &Self::scoped_path("stats", scope))
            .await
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        self.get_json("projects", "projects").await
    }

    async fn filters(&self) -> Result<FacetOptions> {
        self.get_json("filters", "filters").await
    }

    async fn findings_page(&self, query: &FindingsQuery) -> Result<FindingsPage> {
        self.get_json("findings", &Self::findings_path(query)).await
    }

    async fn findings_flat(&self, scope: Option<&str>) -> Result<Vec<FindingSummary>> {
        self.get_json("findings", &Self::scoped_path("findings", scope))
            .await
    }

    async fn activity(&self) -> Result<Vec<ActivityEntry>> {
        self.get_json("activity", "activity").await
    }

    async fn scan_progress(&self, scan_id: u64) -> Result<ScanProgress> {
        self.get_json("progress", &format!("scan/{}/progress", scan_id))
            .await
    }

    async fn finding_detail(&self, id: u64) -> Result<FindingDetail> {
        self.get_json("detail", &format!("finding/{}", id)).await
    }

    async fn delete_project(&self, repo: &str) -> Result<DeleteOutcome> {
        let path = format!("project?repo={}", urlencoding::encode(repo));
        let response = self
            .client
            .delete(self.url(&path))
            .send()
            .await
            .map_err(|error| DashboardError::Transport {
                resource: "delete".to_string(),
                details: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Transport {
                resource: "delete".to_string(),
                details: format!("server returned status code {}", status),
            }
            .into());
        }

        response.json::<DeleteOutcome>().await.map_err(|error| {
            DashboardError::Schema {
                resource: "delete".to_string(),
                details: error.to_string(),
            }
            .into()
        })
    }
}
