use crate::ports::outbound::{ChartData, ChartKind, ChartRenderer, ChartSpec, SeriesColor};
use owo_colors::OwoColorize;

const BAR_WIDTH: usize = 40;

/// TerminalChartRenderer adapter - draws charts as colored text blocks.
///
/// A "live instance" here is the remembered spec a chart was created
/// with; updates redraw the same structure with fresh data, destruction
/// simply forgets it. The adapter honors the port contract of never
/// changing a chart's structure in place.
pub struct TerminalChartRenderer;

/// Spec captured at creation time; redrawn on every update.
pub struct TerminalChart {
    spec: ChartSpec,
}

impl TerminalChartRenderer {
    pub fn new() -> Self {
        Self
    }

    fn draw(chart: &TerminalChart, data: &ChartData) {
        println!();
        println!("── {} ──", chart.spec.title.bold());
        match chart.spec.kind {
            ChartKind::StackedBars => Self::draw_stacked(chart, data),
            ChartKind::Bars => Self::draw_bars(chart, data),
            ChartKind::Distribution => Self::draw_distribution(data),
        }
        if chart.spec.legend && chart.spec.kind != ChartKind::Distribution {
            let legend: Vec<String> = chart
                .spec
                .series
                .iter()
                .map(|series| paint("■", series.color) + " " + &series.name)
                .collect();
            println!("   {}", legend.join("   "));
        }
    }

    /// One row per label, segments proportional to each series' share.
    fn draw_stacked(chart: &TerminalChart, data: &ChartData) {
        let totals: Vec<u64> = (0..data.labels.len())
            .map(|i| {
                data.datasets
                    .iter()
                    .map(|dataset| dataset.get(i).copied().unwrap_or(0))
                    .sum()
            })
            .collect();
        let scale = totals.iter().copied().max().unwrap_or(0).max(1);

        for (i, label) in data.labels.iter().enumerate() {
            let mut bar = String::new();
            for (series, dataset) in chart.spec.series.iter().zip(&data.datasets) {
                let value = dataset.get(i).copied().unwrap_or(0);
                let cells = (value as usize * BAR_WIDTH) / scale as usize;
                bar.push_str(&paint(&"█".repeat(cells), series.color));
            }
            println!("  {:>24} {} {}", truncate(label, 24), bar, totals[i]);
        }
    }

    /// One row per label, the whole bar colored by that label's series
    /// style.
    fn draw_bars(chart: &TerminalChart, data: &ChartData) {
        let values = data.datasets.first().cloned().unwrap_or_default();
        let scale = values.iter().copied().max().unwrap_or(0).max(1);

        for (i, label) in data.labels.iter().enumerate() {
            let value = values.get(i).copied().unwrap_or(0);
            let cells = (value as usize * BAR_WIDTH) / scale as usize;
            let color = chart
                .spec
                .series
                .get(i)
                .map(|series| series.color)
                .unwrap_or(SeriesColor::Neutral);
            println!(
                "  {:>24} {} {}",
                truncate(label, 24),
                paint(&"█".repeat(cells), color),
                value
            );
        }
    }

    /// Share-of-total rows with percentages.
    fn draw_distribution(data: &ChartData) {
        let values = data.datasets.first().cloned().unwrap_or_default();
        let total: u64 = values.iter().sum();
        if total == 0 {
            println!("  (no data)");
            return;
        }
        for (label, value) in data.labels.iter().zip(&values) {
            let share = *value as f64 / total as f64;
            let cells = (share * BAR_WIDTH as f64).round() as usize;
            println!(
                "  {:>24} {} {:.1}%",
                truncate(label, 24),
                paint(&"▓".repeat(cells), SeriesColor::Info),
                share * 100.0
            );
        }
    }
}

impl Default for TerminalChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for TerminalChartRenderer {
    type Handle = TerminalChart;

    fn create(&mut self, spec: &ChartSpec, data: &ChartData) -> TerminalChart {
        let chart = TerminalChart { spec: spec.clone() };
        Self::draw(&chart, data);
        chart
    }

    fn update(&mut self, handle: &mut TerminalChart, data: &ChartData) {
        Self::draw(handle, data);
    }

    fn destroy(&mut self, _handle: TerminalChart) {}
}

fn paint(text: &str, color: SeriesColor) -> String {
    match color {
        SeriesColor::Critical => text.bright_red().to_string(),
        SeriesColor::High => text.bright_yellow().to_string(),
        SeriesColor::Medium => text.bright_cyan().to_string(),
        SeriesColor::Ok => text.bright_green().to_string(),
        SeriesColor::Info => text.bright_blue().to_string(),
        SeriesColor::Neutral => text.white().to_string(),
    }
}

fn truncate(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        let kept: String = label.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
