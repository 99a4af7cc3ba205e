use crate::live_view::domain::{StatsSnapshot, TrendData};
use crate::ports::outbound::{
    ChartData, ChartKind, ChartRenderer, ChartSpec, SeriesColor, SeriesStyle,
};

/// The two dataset shapes the trend chart can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    Global,
    Scoped,
}

impl From<&TrendData> for ChartMode {
    fn from(trend: &TrendData) -> Self {
        match trend {
            TrendData::Global { .. } => ChartMode::Global,
            TrendData::Scoped { .. } => ChartMode::Scoped,
        }
    }
}

struct TrendChart<H> {
    handle: H,
    mode: ChartMode,
}

/// ChartSet - the mode-aware adapter between stats snapshots and the
/// opaque chart renderer.
///
/// The trend chart is a state machine over `ChartMode`: an incoming
/// snapshot whose mode matches the live instance is applied as a cheap
/// in-place data update; a differing mode (or no instance yet) tears the
/// chart down and builds a new one, because the two modes are different
/// aggregations that cannot share one dataset shape. A single render
/// must never interpolate between the two shapes.
///
/// The tool-distribution and fix-availability charts are
/// mode-independent and only ever update in place once created.
pub struct ChartSet<R: ChartRenderer> {
    renderer: R,
    trend: Option<TrendChart<R::Handle>>,
    tools: Option<R::Handle>,
    fixes: Option<R::Handle>,
}

impl<R: ChartRenderer> ChartSet<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            trend: None,
            tools: None,
            fixes: None,
        }
    }

    /// Fans one stats snapshot out to all three charts.
    pub fn apply(&mut self, stats: &StatsSnapshot) {
        self.apply_trend(&stats.devsecops_metrics.trend_data);
        self.apply_tools(stats);
        self.apply_fixes(stats);
    }

    /// Current mode of the live trend chart, if any.
    pub fn trend_mode(&self) -> Option<ChartMode> {
        self.trend.as_ref().map(|chart| chart.mode)
    }

    fn apply_trend(&mut self, trend: &TrendData) {
        let mode = ChartMode::from(trend);
        let data = trend_data(trend);

        if let Some(chart) = self.trend.as_mut() {
            if chart.mode == mode {
                self.renderer.update(&mut chart.handle, &data);
                return;
            }
        }
        if let Some(old) = self.trend.take() {
            self.renderer.destroy(old.handle);
        }
        let handle = self.renderer.create(&trend_spec(mode), &data);
        self.trend = Some(TrendChart { handle, mode });
    }

    fn apply_tools(&mut self, stats: &StatsSnapshot) {
        let distribution = &stats.devsecops_metrics.tool_distribution;
        let data = ChartData {
            labels: distribution.keys().cloned().collect(),
            datasets: vec![distribution.values().copied().collect()],
        };
        match self.tools.as_mut() {
            Some(handle) => self.renderer.update(handle, &data),
            None => {
                let spec = ChartSpec {
                    title: "Findings by tool".to_string(),
                    kind: ChartKind::Distribution,
                    legend: true,
                    series: vec![SeriesStyle {
                        name: "findings".to_string(),
                        color: SeriesColor::Info,
                    }],
                };
                self.tools = Some(self.renderer.create(&spec, &data));
            }
        }
    }

    fn apply_fixes(&mut self, stats: &StatsSnapshot) {
        let fixed = stats.ai_metrics.auto_fixed;
        let unfixed = stats.total_findings.saturating_sub(fixed);
        let data = ChartData {
            labels: vec!["AI fixed".to_string(), "Unfixed".to_string()],
            datasets: vec![vec![fixed, unfixed]],
        };
        match self.fixes.as_mut() {
            Some(handle) => self.renderer.update(handle, &data),
            None => {
                let spec = ChartSpec {
                    title: "Fix availability".to_string(),
                    kind: ChartKind::Distribution,
                    legend: true,
                    series: vec![SeriesStyle {
                        name: "findings".to_string(),
                        color: SeriesColor::Ok,
                    }],
                };
                self.fixes = Some(self.renderer.create(&spec, &data));
            }
        }
    }
}

fn severity_series() -> Vec<SeriesStyle> {
    vec![
        SeriesStyle {
            name: "Critical".to_string(),
            color: SeriesColor::Critical,
        },
        SeriesStyle {
            name: "High".to_string(),
            color: SeriesColor::High,
        },
        SeriesStyle {
            name: "Medium".to_string(),
            color: SeriesColor::Medium,
        },
    ]
}

fn trend_spec(mode: ChartMode) -> ChartSpec {
    match mode {
        // Three stacked severity series over the server's label axis,
        // with a shared legend.
        ChartMode::Global => ChartSpec {
            title: "Severity trend".to_string(),
            kind: ChartKind::StackedBars,
            legend: true,
            series: severity_series(),
        },
        // One bar per severity, colored individually; the legend would
        // duplicate the axis labels so it is suppressed.
        ChartMode::Scoped => ChartSpec {
            title: "Severity breakdown".to_string(),
            kind: ChartKind::Bars,
            legend: false,
            series: severity_series(),
        },
    }
}

fn trend_data(trend: &TrendData) -> ChartData {
    match trend {
        TrendData::Global {
            labels,
            critical,
            high,
            medium,
        } => ChartData {
            labels: labels.clone(),
            datasets: vec![critical.clone(), high.clone(), medium.clone()],
        },
        TrendData::Scoped { labels, values } => ChartData {
            labels: labels.clone(),
            datasets: vec![values.clone()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Created { id: u32, spec: ChartSpec, data: ChartData },
        Updated { id: u32, data: ChartData },
        Destroyed { id: u32 },
    }

    #[derive(Default)]
    struct RecordingRenderer {
        next_id: u32,
        ops: Rc<RefCell<Vec<Op>>>,
    }

    impl ChartRenderer for RecordingRenderer {
        type Handle = u32;

        fn create(&mut self, spec: &ChartSpec, data: &ChartData) -> u32 {
            self.next_id += 1;
            self.ops.borrow_mut().push(Op::Created {
                id: self.next_id,
                spec: spec.clone(),
                data: data.clone(),
            });
            self.next_id
        }

        fn update(&mut self, handle: &mut u32, data: &ChartData) {
            self.ops.borrow_mut().push(Op::Updated {
                id: *handle,
                data: data.clone(),
            });
        }

        fn destroy(&mut self, handle: u32) {
            self.ops.borrow_mut().push(Op::Destroyed { id: handle });
        }
    }

    fn global_stats() -> StatsSnapshot {
        serde_json::from_str(
            r#"{
                "total_findings": 30,
                "ai_metrics": {"auto_fixed": 10},
                "devsecops_metrics": {
                    "tool_distribution": {"bandit": 12, "semgrep": 18},
                    "trend_data": {"mode": "global", "labels": ["a/b", "c/d"],
                                   "critical": [1, 2], "high": [3, 4], "medium": [5, 6]}
                }
            }"#,
        )
        .unwrap()
    }

    fn scoped_stats() -> StatsSnapshot {
        serde_json::from_str(
            r#"{
                "total_findings": 8,
                "devsecops_metrics": {
                    "trend_data": {"mode": "repo",
                                   "labels": ["Critical", "High", "Medium"],
                                   "critical": [5, 2, 1]}
                }
            }"#,
        )
        .unwrap()
    }

    fn chart_set() -> (ChartSet<RecordingRenderer>, Rc<RefCell<Vec<Op>>>) {
        let renderer = RecordingRenderer::default();
        let ops = renderer.ops.clone();
        (ChartSet::new(renderer), ops)
    }

    fn creations(ops: &[Op]) -> usize {
        ops.iter().filter(|op| matches!(op, Op::Created { .. })).count()
    }

    fn destructions(ops: &[Op]) -> usize {
        ops.iter()
            .filter(|op| matches!(op, Op::Destroyed { .. }))
            .count()
    }

    #[test]
    fn test_first_snapshot_creates_all_three_charts() {
        let (mut charts, ops) = chart_set();
        charts.apply(&global_stats());
        assert_eq!(creations(&ops.borrow()), 3);
        assert_eq!(destructions(&ops.borrow()), 0);
        assert_eq!(charts.trend_mode(), Some(ChartMode::Global));
    }

    #[test]
    fn test_same_mode_updates_in_place() {
        let (mut charts, ops) = chart_set();
        charts.apply(&global_stats());
        ops.borrow_mut().clear();

        charts.apply(&global_stats());
        let ops = ops.borrow();
        assert_eq!(creations(&ops), 0);
        assert_eq!(destructions(&ops), 0);
        assert_eq!(
            ops.iter()
                .filter(|op| matches!(op, Op::Updated { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn test_mode_switch_destroys_and_recreates_only_the_trend_chart() {
        let (mut charts, ops) = chart_set();
        charts.apply(&global_stats());
        ops.borrow_mut().clear();

        charts.apply(&scoped_stats());
        let recorded = ops.borrow();
        assert_eq!(destructions(&recorded), 1, "only the trend chart dies");
        assert_eq!(creations(&recorded), 1, "only the trend chart is rebuilt");
        assert_eq!(charts.trend_mode(), Some(ChartMode::Scoped));

        // The destroyed handle is the old trend chart (created first).
        assert!(recorded.contains(&Op::Destroyed { id: 1 }));
    }

    #[test]
    fn test_scoped_chart_shape() {
        let (mut charts, ops) = chart_set();
        charts.apply(&scoped_stats());

        let recorded = ops.borrow();
        let trend_creation = recorded
            .iter()
            .find_map(|op| match op {
                Op::Created { spec, data, .. } if spec.kind == ChartKind::Bars => {
                    Some((spec.clone(), data.clone()))
                }
                _ => None,
            })
            .expect("scoped trend chart created");

        let (spec, data) = trend_creation;
        assert!(!spec.legend, "scoped mode suppresses the legend");
        assert_eq!(spec.series.len(), 3, "one color per severity bar");
        assert_eq!(data.labels, vec!["Critical", "High", "Medium"]);
        assert_eq!(data.datasets, vec![vec![5, 2, 1]]);
    }

    #[test]
    fn test_round_trip_mode_flapping_rebuilds_each_time() {
        let (mut charts, ops) = chart_set();
        charts.apply(&global_stats());
        charts.apply(&scoped_stats());
        charts.apply(&global_stats());

        // Two rebuilds after the initial creation.
        assert_eq!(destructions(&ops.borrow()), 2);
        assert_eq!(charts.trend_mode(), Some(ChartMode::Global));
    }
}
