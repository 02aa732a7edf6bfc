//! One-shot metrics pass over a trial.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::desaccade::desaccade;
use super::gain::{
    auc_gain_left, auc_gain_right, fourier_gain, regression_gain, split_by_polarity,
};
use super::peaks::find_peaks;
use super::saccades::{SaccadeResult, detect_saccades_with};
use super::spectrum::{SpectralResult, SpectrumEstimator};
use super::stats::mean_std_dev;
use crate::config::{AnalysisConfig, HeadPeakSettings};
use crate::trace::TestSubtype;

/// Every metric computed for one trial. `None` marks an undefined value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    /// Eye trace after moving-average desaccading.
    pub desaccaded_eye: Vec<f64>,
    /// Signed area gain over positive-head samples.
    pub gain_auc_left: Option<f64>,
    /// Rectified area gain over negative-head samples.
    pub gain_auc_right: Option<f64>,
    /// Eye-on-head regression slope over positive-head samples.
    pub regression_gain_left: Option<f64>,
    /// Eye-on-head regression slope over negative-head samples.
    pub regression_gain_right: Option<f64>,
    /// Spectral peak gain over positive-head samples.
    pub fourier_gain_left: Option<f64>,
    /// Spectral peak gain over negative-head samples.
    pub fourier_gain_right: Option<f64>,
    /// Spectrum of the full head trace.
    pub head_spectrum: SpectralResult,
    /// Spectrum of the full (raw) eye trace.
    pub eye_spectrum: SpectralResult,
    /// Frequency of the strongest head spectral bin, in Hz.
    pub dominant_head_frequency_hz: Option<f64>,
    /// Saccade markers and PR scores.
    pub saccades: SaccadeResult,
    /// Mean magnitude of head velocity peaks (both directions).
    pub mean_peak_head_velocity: Option<f64>,
    /// Standard deviation of head velocity peak magnitudes.
    pub std_peak_head_velocity: Option<f64>,
}

impl MetricsBundle {
    /// Spectral purity of the head trace.
    pub fn spi_head(&self) -> Option<f64> {
        self.head_spectrum.spectral_purity_index
    }

    /// Spectral purity of the eye trace.
    pub fn spi_eye(&self) -> Option<f64> {
        self.eye_spectrum.spectral_purity_index
    }

    /// Head trace SNR in dB.
    pub fn snr_head(&self) -> Option<f64> {
        self.head_spectrum.snr_db
    }

    /// Eye trace SNR in dB.
    pub fn snr_eye(&self) -> Option<f64> {
        self.eye_spectrum.snr_db
    }
}

/// Compute every metric with the default configuration.
pub fn calculate_all_metrics(
    t: &[f64],
    eye: &[f64],
    head: &[f64],
    subtype: TestSubtype,
) -> MetricsBundle {
    calculate_all_metrics_with(t, eye, head, subtype, &AnalysisConfig::default())
}

/// Compute every metric for one trial.
///
/// Each field is guarded on its own: short or degenerate input leaves that
/// field undefined and the rest are still computed.
pub fn calculate_all_metrics_with(
    t: &[f64],
    eye: &[f64],
    head: &[f64],
    subtype: TestSubtype,
    config: &AnalysisConfig,
) -> MetricsBundle {
    let window = config.desaccade.window_for(subtype);
    debug!(
        samples = head.len(),
        %subtype,
        window,
        "calculating trial metrics"
    );
    let dx = config.sample_interval();
    let desaccaded_eye = desaccade(eye, window);
    let split = split_by_polarity(head, &desaccaded_eye);

    let mut estimator = SpectrumEstimator::new(config.sample_rate_hz);
    let head_spectrum = estimator.estimate(head);
    let eye_spectrum = estimator.estimate(eye);
    let dominant_head_frequency_hz = head_spectrum.peak_frequency();
    let fourier_gain_left = fourier_gain(
        &estimator.estimate(&split.left_head),
        &estimator.estimate(&split.left_eye),
    );
    let fourier_gain_right = fourier_gain(
        &estimator.estimate(&split.right_head),
        &estimator.estimate(&split.right_eye),
    );

    let (mean_peak_head_velocity, std_peak_head_velocity) =
        match head_peak_statistics(head, &config.head_peaks) {
            Some((mean, std)) => (Some(mean), Some(std)),
            None => (None, None),
        };

    let bundle = MetricsBundle {
        gain_auc_left: auc_gain_left(&split.left_head, &split.left_eye, dx),
        gain_auc_right: auc_gain_right(&split.right_head, &split.right_eye, dx),
        regression_gain_left: regression_gain(&split.left_head, &split.left_eye),
        regression_gain_right: regression_gain(&split.right_head, &split.right_eye),
        fourier_gain_left,
        fourier_gain_right,
        head_spectrum,
        eye_spectrum,
        dominant_head_frequency_hz,
        saccades: detect_saccades_with(t, eye, head, subtype, &config.saccade),
        mean_peak_head_velocity,
        std_peak_head_velocity,
        desaccaded_eye,
    };
    debug!(
        auc_left = ?bundle.gain_auc_left,
        auc_right = ?bundle.gain_auc_right,
        fourier_left = ?bundle.fourier_gain_left,
        fourier_right = ?bundle.fourier_gain_right,
        "trial metrics ready"
    );
    bundle
}

/// Mean and standard deviation of head peak magnitudes in both directions.
///
/// Needs more than three head samples and at least two pooled peaks.
pub fn head_peak_statistics(head: &[f64], settings: &HeadPeakSettings) -> Option<(f64, f64)> {
    if head.len() <= 3 {
        return None;
    }
    let criteria = settings.peak_criteria();
    let inverted: Vec<f64> = head.iter().map(|value| -value).collect();
    let magnitudes: Vec<f64> = find_peaks(head, &criteria)
        .into_iter()
        .chain(find_peaks(&inverted, &criteria))
        .map(|peak| peak.height.abs())
        .collect();
    if magnitudes.len() < 2 {
        return None;
    }
    mean_std_dev(&magnitudes)
}
