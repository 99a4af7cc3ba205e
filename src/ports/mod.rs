/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) are the interfaces the synchronization
/// engine uses to reach external systems: the findings API, the chart
/// renderer, and the terminal presenter.
pub mod outbound;
