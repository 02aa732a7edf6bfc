//! Trial traces and test subtypes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::metrics::{MetricsBundle, calculate_all_metrics_with};
use crate::config::AnalysisConfig;
use crate::window::AnalysisWindow;

/// Errors raised while building a trace or resolving its test type.
#[derive(Debug, Error, PartialEq)]
pub enum TraceError {
    /// The three channels do not have the same number of samples.
    #[error("Channel lengths differ: time {time}, head {head}, eye {eye}")]
    LengthMismatch {
        /// Time channel length.
        time: usize,
        /// Head channel length.
        head: usize,
        /// Eye channel length.
        eye: usize,
    },
    /// A timestamp is NaN or infinite.
    #[error("Non-finite timestamp at sample {index}")]
    NonFiniteTime {
        /// Offending sample index.
        index: usize,
    },
    /// The test-type label names neither a VVOR nor a VORS test.
    #[error("Test type not supported: {0}")]
    UnsupportedTestType(String),
}

/// Which VOR protocol produced the trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestSubtype {
    /// Visually enhanced VOR; saccades are scored.
    Vvor,
    /// VOR suppression; saccades are not scored.
    Vors,
}

impl TestSubtype {
    /// Resolve a free-text test-type label by case-insensitive token match.
    pub fn from_label(label: &str) -> Result<Self, TraceError> {
        let lower = label.to_lowercase();
        if lower.contains("vvor") || lower.contains("rvvo") {
            Ok(Self::Vvor)
        } else if lower.contains("vors") || lower.contains("srvo") {
            Ok(Self::Vors)
        } else {
            Err(TraceError::UnsupportedTestType(label.to_string()))
        }
    }

    /// Whether saccade and PR scoring applies to this subtype.
    pub fn scores_saccades(self) -> bool {
        matches!(self, Self::Vvor)
    }

    /// Short uppercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vvor => "VVOR",
            Self::Vors => "VORS",
        }
    }
}

impl fmt::Display for TestSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestSubtype {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

/// One trial: time, head velocity and eye velocity channels of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrace")]
pub struct VorTrace {
    time: Vec<f64>,
    head: Vec<f64>,
    eye: Vec<f64>,
}

/// Unchecked channels as they appear on the wire.
#[derive(Deserialize)]
struct RawTrace {
    time: Vec<f64>,
    head: Vec<f64>,
    eye: Vec<f64>,
}

impl TryFrom<RawTrace> for VorTrace {
    type Error = TraceError;

    fn try_from(raw: RawTrace) -> Result<Self, Self::Error> {
        Self::new(raw.time, raw.head, raw.eye)
    }
}

impl VorTrace {
    /// Build a trace, checking channel lengths and timestamps.
    pub fn new(time: Vec<f64>, head: Vec<f64>, eye: Vec<f64>) -> Result<Self, TraceError> {
        if time.len() != head.len() || time.len() != eye.len() {
            return Err(TraceError::LengthMismatch {
                time: time.len(),
                head: head.len(),
                eye: eye.len(),
            });
        }
        if let Some(index) = time.iter().position(|value| !value.is_finite()) {
            return Err(TraceError::NonFiniteTime { index });
        }
        Ok(Self { time, head, eye })
    }

    /// Time channel in seconds.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Head velocity channel in deg/s.
    pub fn head(&self) -> &[f64] {
        &self.head
    }

    /// Eye velocity channel in deg/s.
    pub fn eye(&self) -> &[f64] {
        &self.eye
    }

    /// Number of samples per channel.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True when the trace holds no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Shift the time channel so the first sample sits at zero.
    pub fn normalized(mut self) -> Self {
        if let Some(&first) = self.time.first() {
            for value in &mut self.time {
                *value -= first;
            }
        }
        self
    }

    /// Samples whose timestamps fall inside `window` (inclusive).
    pub fn window(&self, window: &AnalysisWindow) -> Self {
        let mut time = Vec::new();
        let mut head = Vec::new();
        let mut eye = Vec::new();
        for (i, &t) in self.time.iter().enumerate() {
            if window.contains(t) {
                time.push(t);
                head.push(self.head[i]);
                eye.push(self.eye[i]);
            }
        }
        Self { time, head, eye }
    }

    /// Run the full metrics pass over this trace.
    pub fn analyze(&self, subtype: TestSubtype, config: &AnalysisConfig) -> MetricsBundle {
        calculate_all_metrics_with(&self.time, &self.eye, &self.head, subtype, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_case_insensitively() {
        assert_eq!(TestSubtype::from_label("Lateral VVOR"), Ok(TestSubtype::Vvor));
        assert_eq!(TestSubtype::from_label("rvvo left"), Ok(TestSubtype::Vvor));
        assert_eq!(TestSubtype::from_label("VORS horizontal"), Ok(TestSubtype::Vors));
        assert_eq!("SRVO".parse::<TestSubtype>(), Ok(TestSubtype::Vors));
        assert_eq!(
            TestSubtype::from_label("vHIT"),
            Err(TraceError::UnsupportedTestType("vHIT".to_string()))
        );
    }

    #[test]
    fn vvor_tokens_take_precedence() {
        assert_eq!(TestSubtype::from_label("vvor/vors combo"), Ok(TestSubtype::Vvor));
    }

    #[test]
    fn only_vvor_scores_saccades() {
        assert!(TestSubtype::Vvor.scores_saccades());
        assert!(!TestSubtype::Vors.scores_saccades());
        assert_eq!(TestSubtype::Vors.to_string(), "VORS");
    }

    #[test]
    fn mismatched_channels_are_rejected() {
        let err = VorTrace::new(vec![0.0, 1.0], vec![0.0], vec![0.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            TraceError::LengthMismatch {
                time: 2,
                head: 1,
                eye: 2
            }
        );
        let err = VorTrace::new(vec![0.0, f64::NAN], vec![0.0; 2], vec![0.0; 2]).unwrap_err();
        assert_eq!(err, TraceError::NonFiniteTime { index: 1 });
    }

    #[test]
    fn deserialization_applies_channel_checks() {
        let err = serde_json::from_str::<VorTrace>(
            r#"{"time":[0.0,0.004,0.008],"head":[1.0],"eye":[1.0,2.0,3.0]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Channel lengths differ"));

        let trace = VorTrace::new(vec![0.0, 0.004], vec![1.0, -1.0], vec![0.8, -0.8]).unwrap();
        let json = serde_json::to_string(&trace).unwrap();
        assert_eq!(serde_json::from_str::<VorTrace>(&json).unwrap(), trace);
    }

    #[test]
    fn normalized_starts_at_zero() {
        let trace = VorTrace::new(vec![2.0, 2.004, 2.008], vec![1.0; 3], vec![1.0; 3])
            .unwrap()
            .normalized();
        assert_eq!(trace.time()[0], 0.0);
        assert!((trace.time()[2] - 0.008).abs() < 1e-12);
    }

    #[test]
    fn window_keeps_inclusive_range() {
        let time: Vec<f64> = (0..10).map(|i| i as f64 / 10.0).collect();
        let head: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let trace = VorTrace::new(time, head.clone(), head).unwrap();
        let sub = trace.window(&AnalysisWindow::new(0.2, 0.5));
        assert_eq!(sub.head(), &[2.0, 3.0, 4.0, 5.0]);
        assert_eq!(sub.len(), 4);
    }
}
