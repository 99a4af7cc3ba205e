mod progress_correlator;

pub use progress_correlator::ProgressCorrelator;
