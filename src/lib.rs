//! Quantitative analysis of vestibulo-ocular reflex (VOR) velocity traces.
//!
//! The core is pure: every call takes a time/head/eye trial and returns a
//! fresh [`MetricsBundle`] in which undefined metrics are `None`.

/// Signal-analysis core.
pub mod analysis;
/// Tunable analysis thresholds.
pub mod config;
/// Tracing subscriber setup.
pub mod logging;
/// Summary text and display series.
pub mod report;
/// Synthetic trial generation.
pub mod synth;
/// Trial traces and test subtypes.
pub mod trace;
/// Analysis window math.
pub mod window;

pub use analysis::metrics::{MetricsBundle, calculate_all_metrics, calculate_all_metrics_with};
pub use analysis::peaks::{Peak, PeakCriteria, find_peaks};
pub use analysis::saccades::{SaccadeResult, detect_saccades, detect_saccades_with};
pub use analysis::spectrum::{SpectralResult, SpectrumEstimator, compute_spectrum};
pub use config::{AnalysisConfig, ConfigError};
pub use trace::{TestSubtype, TraceError, VorTrace};
pub use window::AnalysisWindow;
