use serde::Deserialize;
use std::collections::BTreeMap;

/// Aggregate statistics snapshot returned by the stats resource.
///
/// A snapshot is a complete replacement value: it is never partially
/// merged into the view. Every field is defaulted so that a payload with
/// missing sections deserializes to zero counts and empty maps instead
/// of failing the whole fetch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total_scans: u64,
    #[serde(default)]
    pub total_findings: u64,
    #[serde(default)]
    pub total_repos: u64,
    #[serde(default)]
    pub severity: SeverityBreakdown,
    #[serde(default)]
    pub ai_metrics: AiMetrics,
    #[serde(default)]
    pub devsecops_metrics: DevSecOpsMetrics,
    #[serde(default)]
    pub system_health: SystemHealth,
}

/// Finding counts per severity level.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeverityBreakdown {
    #[serde(default)]
    pub critical: u64,
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub low: u64,
}

/// AI triage performance counters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiMetrics {
    #[serde(default)]
    pub false_positives: u64,
    #[serde(default)]
    pub auto_fixed: u64,
    #[serde(default)]
    pub efficacy_percent: f64,
    #[serde(default)]
    pub confidence_avg: f64,
}

/// Pipeline health as reported by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemHealth {
    #[serde(default = "unknown")]
    pub database: String,
    #[serde(default = "unknown")]
    pub redis: String,
    #[serde(default = "unknown")]
    pub status: String,
}

impl Default for SystemHealth {
    fn default() -> Self {
        Self {
            database: unknown(),
            redis: unknown(),
            status: unknown(),
        }
    }
}

fn unknown() -> String {
    "unknown".to_string()
}

/// DevSecOps metrics sub-object: remediation times, distributions and the
/// trend data driving the main chart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevSecOpsMetrics {
    #[serde(default)]
    pub mttf_hours: f64,
    #[serde(default)]
    pub mttf_ai_hours: f64,
    #[serde(default)]
    pub mttf_manual_hours: f64,
    #[serde(default)]
    pub ci_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub tool_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub risk_per_repo: Vec<RepoRisk>,
    #[serde(default)]
    pub trend_data: TrendData,
}

/// One entry of the riskiest-projects ranking.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRisk {
    pub repo: String,
    #[serde(default)]
    pub risk: f64,
}

/// Trend data for the main chart, tagged by viewing context.
///
/// The two variants are semantically different aggregations that cannot
/// share one dataset shape: `Global` is a severity time/project series
/// with three parallel arrays, `Scoped` is a single three-value severity
/// breakdown for one project. Consumers match on the variant and never
/// inspect ad hoc fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawTrendData")]
pub enum TrendData {
    Global {
        labels: Vec<String>,
        critical: Vec<u64>,
        high: Vec<u64>,
        medium: Vec<u64>,
    },
    Scoped {
        labels: Vec<String>,
        values: Vec<u64>,
    },
}

impl TrendData {
    /// An empty global trend, used when the payload is missing or carries
    /// an unrecognized mode tag.
    pub fn empty() -> Self {
        TrendData::Global {
            labels: Vec::new(),
            critical: Vec::new(),
            high: Vec::new(),
            medium: Vec::new(),
        }
    }

    pub fn is_scoped(&self) -> bool {
        matches!(self, TrendData::Scoped { .. })
    }
}

impl Default for TrendData {
    fn default() -> Self {
        TrendData::empty()
    }
}

/// Wire shape of `trend_data`.
///
/// The server tags per-project data with `mode: "repo"` and packs the
/// `[critical, high, medium]` triple into the `critical` array; newer
/// deployments say `"scoped"`. Both lift into `TrendData::Scoped`.
#[derive(Debug, Deserialize)]
struct RawTrendData {
    #[serde(default)]
    mode: String,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    critical: Vec<u64>,
    #[serde(default)]
    high: Vec<u64>,
    #[serde(default)]
    medium: Vec<u64>,
}

impl From<RawTrendData> for TrendData {
    fn from(raw: RawTrendData) -> Self {
        match raw.mode.as_str() {
            "repo" | "scoped" => TrendData::Scoped {
                labels: raw.labels,
                values: raw.critical,
            },
            "global" => TrendData::Global {
                labels: raw.labels,
                critical: raw.critical,
                high: raw.high,
                medium: raw.medium,
            },
            _ => TrendData::empty(),
        }
    }
}
