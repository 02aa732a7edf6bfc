//! Text summary and marker series for presenting a metrics bundle.
//!
//! Any undefined value renders as `-` so a missing metric is never shown as a
//! misleading zero.

use std::fmt;

use serde::Serialize;

use crate::analysis::metrics::MetricsBundle;
use crate::analysis::stats::{interpolate, max_abs};
use crate::trace::VorTrace;

const PLACEHOLDER: &str = "-";

/// Position of one saccade marker on the eye trace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SaccadeMarker {
    /// Saccade peak time in seconds.
    pub time: f64,
    /// Eye velocity at that time, interpolated from the raw trace.
    pub eye_velocity: f64,
}

/// Place each saccade timestamp on the raw eye trace.
pub fn saccade_markers(t: &[f64], eye: &[f64], timestamps: &[f64]) -> Vec<SaccadeMarker> {
    timestamps
        .iter()
        .filter_map(|&time| {
            interpolate(t, eye, time).map(|eye_velocity| SaccadeMarker { time, eye_velocity })
        })
        .collect()
}

/// Summary of one analysed window, ready for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrialSummary<'a> {
    /// First timestamp of the window.
    pub window_start: Option<f64>,
    /// Last timestamp of the window.
    pub window_end: Option<f64>,
    /// Largest absolute head velocity in the window.
    pub max_head_velocity: Option<f64>,
    /// Largest absolute desaccaded eye velocity in the window.
    pub max_eye_velocity: Option<f64>,
    /// Metrics the summary describes.
    pub metrics: &'a MetricsBundle,
}

impl<'a> TrialSummary<'a> {
    /// Summarize `metrics` computed over `trace`.
    pub fn new(trace: &VorTrace, metrics: &'a MetricsBundle) -> Self {
        Self {
            window_start: trace.time().first().copied(),
            window_end: trace.time().last().copied(),
            max_head_velocity: max_abs(trace.head()),
            max_eye_velocity: max_abs(&metrics.desaccaded_eye),
            metrics,
        }
    }

    /// Window length in seconds.
    pub fn duration(&self) -> Option<f64> {
        Some(self.window_end? - self.window_start?)
    }
}

struct Value(Option<f64>, usize);

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value:.prec$}", prec = self.1),
            None => f.write_str(PLACEHOLDER),
        }
    }
}

struct Score(Option<u8>);

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str(PLACEHOLDER),
        }
    }
}

impl fmt::Display for TrialSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.metrics;
        writeln!(
            f,
            "Time window: {}–{} s (Δt = {} s)",
            Value(self.window_start, 2),
            Value(self.window_end, 2),
            Value(self.duration(), 2)
        )?;
        writeln!(
            f,
            "Max Head Vel: {} °/s | Max Eye Vel: {} °/s",
            Value(self.max_head_velocity, 1),
            Value(self.max_eye_velocity, 1)
        )?;
        writeln!(
            f,
            "Dominant Head Freq: {} Hz",
            Value(m.dominant_head_frequency_hz, 2)
        )?;
        writeln!(
            f,
            "SPI Head: {} | Eye: {}   SNR Head: {} dB | Eye: {} dB",
            Value(m.spi_head(), 2),
            Value(m.spi_eye(), 2),
            Value(m.snr_head(), 1),
            Value(m.snr_eye(), 1)
        )?;
        writeln!(
            f,
            "Gain (slope) L: {} | R: {}   AUC Gain L: {} | R: {}   Fourier Gain L: {} | R: {}",
            Value(m.regression_gain_left, 2),
            Value(m.regression_gain_right, 2),
            Value(m.gain_auc_left, 2),
            Value(m.gain_auc_right, 2),
            Value(m.fourier_gain_left, 2),
            Value(m.fourier_gain_right, 2)
        )?;
        write!(
            f,
            "PR Score: L = {} | R = {}",
            Score(m.saccades.left_pr),
            Score(m.saccades.right_pr)
        )
    }
}
