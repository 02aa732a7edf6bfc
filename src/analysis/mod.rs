//! Signal-analysis core: spectra, peaks, desaccading, gains and saccade scoring.

pub mod desaccade;
pub mod gain;
pub mod metrics;
pub mod peaks;
pub mod saccades;
pub mod spectrum;
pub(crate) mod stats;
