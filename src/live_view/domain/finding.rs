use serde::Deserialize;

/// One row of the findings table.
#[derive(Debug, Clone, Deserialize)]
pub struct FindingSummary {
    pub id: u64,
    #[serde(default)]
    pub tool: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub ai_confidence: f64,
    #[serde(default)]
    pub ai_verdict: Option<String>,
    #[serde(default)]
    pub has_fix: bool,
}

fn default_location() -> String {
    "-".to_string()
}

/// One page of the findings table, replaced wholesale per fetch because
/// server-side sort and filtering can reorder rows between polls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindingsPage {
    #[serde(default)]
    pub findings: Vec<FindingSummary>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub per_page: u64,
}

impl FindingsPage {
    /// Synthesizes a single-page result from the unpaginated fallback
    /// endpoint's flat list.
    pub fn from_flat(findings: Vec<FindingSummary>) -> Self {
        let total = findings.len() as u64;
        Self {
            per_page: total.max(1),
            findings,
            total,
            page: 1,
        }
    }
}

/// Full record of a single finding, loaded on demand for the overlay.
#[derive(Debug, Clone, Deserialize)]
pub struct FindingDetail {
    pub id: u64,
    #[serde(default)]
    pub tool: String,
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub ai_verdict: Option<String>,
    #[serde(default)]
    pub ai_confidence: f64,
    #[serde(default)]
    pub ai_reasoning: Option<String>,
    #[serde(default)]
    pub remediation_patch: Option<String>,
    #[serde(default)]
    pub pr_url: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Distinct values for the filter dropdowns.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacetOptions {
    #[serde(default)]
    pub repos: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub severities: Vec<String>,
}

impl FacetOptions {
    /// Orders severities Critical > High > Medium > Low with unknown
    /// values last, as the filter dropdown expects.
    pub fn normalized(mut self) -> Self {
        self.severities.sort_by_key(|s| severity_rank(s));
        self
    }
}

/// Rank of a severity label for ordering; unknown labels sort last.
pub fn severity_rank(severity: &str) -> usize {
    match severity {
        "Critical" => 0,
        "High" => 1,
        "Medium" => 2,
        "Low" => 3,
        _ => usize::MAX,
    }
}

/// Query parameters for one findings fetch: the parameter snapshot the
/// request was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingsQuery {
    pub page: u64,
    pub per_page: u64,
    pub repo: Option<String>,
    pub tool: Option<String>,
    pub severity: Option<String>,
}

/// Wire shape of the delete-project response. Success and failure both
/// come back as 200 with different bodies, so classification happens
/// here rather than on the HTTP status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteOutcome {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl DeleteOutcome {
    /// Collapses the response into success-with-message or error-with-message.
    pub fn into_result(self) -> Result<String, String> {
        if let Some(error) = self.error {
            let details = self.details.map(|d| format!(" ({})", d)).unwrap_or_default();
            return Err(format!("{}{}", error, details));
        }
        if matches!(self.status.as_deref(), Some("error")) {
            return Err(self
                .message
                .unwrap_or_else(|| "deletion failed".to_string()));
        }
        Ok(self
            .message
            .unwrap_or_else(|| "project deleted".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_summary_defaults() {
        let finding: FindingSummary = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(finding.location, "-");
        assert_eq!(finding.severity, "");
        assert!(!finding.has_fix);
    }

    #[test]
    fn test_page_from_flat_disables_nothing_but_synthesizes_one_page() {
        let rows: Vec<FindingSummary> =
            serde_json::from_str(r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#).unwrap();
        let page = FindingsPage::from_flat(rows);
        assert_eq!(page.page, 1);
        assert_eq!(page.total, 3);
        assert_eq!(page.per_page, 3);
    }

    #[test]
    fn test_page_from_empty_flat_keeps_per_page_positive() {
        let page = FindingsPage::from_flat(Vec::new());
        assert_eq!(page.total, 0);
        assert_eq!(page.per_page, 1);
    }

    #[test]
    fn test_severity_ordering() {
        let facets = FacetOptions {
            repos: vec![],
            tools: vec![],
            severities: vec![
                "Low".to_string(),
                "Critical".to_string(),
                "Weird".to_string(),
                "High".to_string(),
            ],
        }
        .normalized();
        assert_eq!(facets.severities, vec!["Critical", "High", "Low", "Weird"]);
    }

    #[test]
    fn test_delete_outcome_classification() {
        let ok: DeleteOutcome =
            serde_json::from_str(r#"{"status": "success", "message": "Deleted 3 scans"}"#).unwrap();
        assert_eq!(ok.into_result().unwrap(), "Deleted 3 scans");

        let failed: DeleteOutcome =
            serde_json::from_str(r#"{"error": "Deletion failed", "details": "db locked"}"#)
                .unwrap();
        assert_eq!(
            failed.into_result().unwrap_err(),
            "Deletion failed (db locked)"
        );

        let not_found: DeleteOutcome =
            serde_json::from_str(r#"{"message": "Project not found or already deleted"}"#).unwrap();
        assert!(not_found.into_result().is_ok());
    }
}
