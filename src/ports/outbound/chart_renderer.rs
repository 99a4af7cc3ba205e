/// ChartRenderer port - opaque create/update/destroy boundary around the
/// charting backend.
///
/// The engine never reaches into a live chart: a handle is created from a
/// structural spec, updated in place with new data of the same shape, or
/// destroyed. A chart must never receive data of a different structure
/// than it was created with; the adapter layer enforces that by tearing
/// the chart down and recreating it when the structure changes.
pub trait ChartRenderer {
    /// Opaque handle to one live chart instance.
    type Handle;

    /// Creates a chart from its structural spec and initial data.
    fn create(&mut self, spec: &ChartSpec, data: &ChartData) -> Self::Handle;

    /// Replaces a live chart's data without structural changes.
    fn update(&mut self, handle: &mut Self::Handle, data: &ChartData);

    /// Tears a chart down, releasing its handle.
    fn destroy(&mut self, handle: Self::Handle);
}

/// Structural description of a chart: everything that cannot change
/// without recreating the instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    /// Whether a shared legend is drawn. Per-bar colored charts
    /// suppress it.
    pub legend: bool,
    /// One style per dataset - except for `Bars` with a single dataset,
    /// where styles are applied per bar.
    pub series: Vec<SeriesStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Parallel datasets stacked per label.
    StackedBars,
    /// A single dataset, one bar per label.
    Bars,
    /// Share-of-total breakdown over one dataset.
    Distribution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub name: String,
    pub color: SeriesColor,
}

/// Semantic colors; the backend maps them to its own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesColor {
    Critical,
    High,
    Medium,
    Ok,
    Info,
    Neutral,
}

/// Data payload for a chart; structure must match the spec the chart was
/// created with (`datasets.len() == spec.series.len()` for stacked
/// charts, a single dataset otherwise).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Vec<u64>>,
}
