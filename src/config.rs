//! Tunable analysis thresholds, loadable from TOML.
//!
//! Every field has a serde default so partial files are accepted; the defaults
//! are the clinical constants the analysis was calibrated with.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::peaks::PeakCriteria;
use crate::trace::TestSubtype;

/// Errors that may occur while loading or validating analysis configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config text.
    #[error("Invalid analysis config: {0}")]
    ParseToml(#[from] toml::de::Error),
    /// Failed to parse a TOML config file.
    #[error("Invalid analysis config at {path}: {source}")]
    ParseTomlFile {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize analysis config: {0}")]
    SerializeToml(#[from] toml::ser::Error),
    /// A value is outside its usable range.
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted field name.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Full set of analysis parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Sampling rate of all three channels, in Hz.
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: f64,
    /// Moving-average window lengths used to desaccade the eye trace.
    #[serde(default)]
    pub desaccade: DesaccadeSettings,
    /// Saccade detection and PR scoring thresholds.
    #[serde(default)]
    pub saccade: SaccadeSettings,
    /// Head peak-velocity detection thresholds.
    #[serde(default)]
    pub head_peaks: HeadPeakSettings,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: default_sample_rate_hz(),
            desaccade: DesaccadeSettings::default(),
            saccade: SaccadeSettings::default(),
            head_peaks: HeadPeakSettings::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::ParseTomlFile {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render the config as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the analysis cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0) {
            return Err(ConfigError::Invalid {
                field: "sample_rate_hz",
                reason: "must be a positive number",
            });
        }
        if self.desaccade.vvor_window == 0 {
            return Err(ConfigError::Invalid {
                field: "desaccade.vvor_window",
                reason: "must be at least 1 sample",
            });
        }
        if self.desaccade.vors_window == 0 {
            return Err(ConfigError::Invalid {
                field: "desaccade.vors_window",
                reason: "must be at least 1 sample",
            });
        }
        Ok(())
    }

    /// Time step between samples, in seconds.
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sample_rate_hz
    }
}

/// Moving-average window lengths per test subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesaccadeSettings {
    /// Window for visually enhanced VOR trials.
    #[serde(default = "default_vvor_window")]
    pub vvor_window: usize,
    /// Window for VOR suppression trials.
    #[serde(default = "default_vors_window")]
    pub vors_window: usize,
}

impl Default for DesaccadeSettings {
    fn default() -> Self {
        Self {
            vvor_window: default_vvor_window(),
            vors_window: default_vors_window(),
        }
    }
}

impl DesaccadeSettings {
    /// Window length for `subtype`.
    pub fn window_for(&self, subtype: TestSubtype) -> usize {
        match subtype {
            TestSubtype::Vvor => self.vvor_window,
            TestSubtype::Vors => self.vors_window,
        }
    }
}

/// Thresholds for saccade detection within head half-cycles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaccadeSettings {
    /// Shortest half-cycle segment that is searched.
    #[serde(default = "default_min_segment_samples")]
    pub min_segment_samples: usize,
    /// Minimum peak |head velocity| (deg/s) for a segment to be searched.
    #[serde(default = "default_min_head_velocity")]
    pub min_head_velocity: f64,
    /// Minimum |eye velocity| (deg/s) at a saccade peak.
    #[serde(default = "default_min_saccade_height")]
    pub min_peak_height: f64,
    /// Minimum saccade prominence (deg/s).
    #[serde(default = "default_min_saccade_prominence")]
    pub min_peak_prominence: f64,
    /// Maximum saccade width in samples.
    #[serde(default = "default_max_saccade_width")]
    pub max_peak_width: f64,
    /// Latencies a side needs before its PR score is defined.
    #[serde(default = "default_min_latencies")]
    pub min_latencies: usize,
}

impl Default for SaccadeSettings {
    fn default() -> Self {
        Self {
            min_segment_samples: default_min_segment_samples(),
            min_head_velocity: default_min_head_velocity(),
            min_peak_height: default_min_saccade_height(),
            min_peak_prominence: default_min_saccade_prominence(),
            max_peak_width: default_max_saccade_width(),
            min_latencies: default_min_latencies(),
        }
    }
}

impl SaccadeSettings {
    /// Peak criteria applied to the rectified eye trace.
    pub fn peak_criteria(&self) -> PeakCriteria {
        PeakCriteria::height_and_prominence(self.min_peak_height, self.min_peak_prominence)
            .with_max_width(self.max_peak_width)
    }
}

/// Thresholds for head peak-velocity statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadPeakSettings {
    /// Minimum |head velocity| (deg/s) at a peak.
    #[serde(default = "default_head_peak_height")]
    pub min_height: f64,
    /// Minimum head peak prominence (deg/s).
    #[serde(default = "default_head_peak_prominence")]
    pub min_prominence: f64,
}

impl Default for HeadPeakSettings {
    fn default() -> Self {
        Self {
            min_height: default_head_peak_height(),
            min_prominence: default_head_peak_prominence(),
        }
    }
}

impl HeadPeakSettings {
    /// Peak criteria applied to the head trace and its negation.
    pub fn peak_criteria(&self) -> PeakCriteria {
        PeakCriteria::height_and_prominence(self.min_height, self.min_prominence)
    }
}

fn default_sample_rate_hz() -> f64 {
    250.0
}

fn default_vvor_window() -> usize {
    30
}

fn default_vors_window() -> usize {
    35
}

fn default_min_segment_samples() -> usize {
    4
}

fn default_min_head_velocity() -> f64 {
    15.0
}

fn default_min_saccade_height() -> f64 {
    180.0
}

fn default_min_saccade_prominence() -> f64 {
    130.0
}

fn default_max_saccade_width() -> f64 {
    20.0
}

fn default_min_latencies() -> usize {
    4
}

fn default_head_peak_height() -> f64 {
    30.0
}

fn default_head_peak_prominence() -> f64 {
    10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.sample_rate_hz, 250.0);
        assert_eq!(config.desaccade.window_for(TestSubtype::Vvor), 30);
        assert_eq!(config.desaccade.window_for(TestSubtype::Vors), 35);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = AnalysisConfig::from_toml_str(
            "sample_rate_hz = 500.0\n[saccade]\nmin_peak_height = 150.0\n",
        )
        .unwrap();
        assert_eq!(config.sample_rate_hz, 500.0);
        assert_eq!(config.saccade.min_peak_height, 150.0);
        assert_eq!(config.saccade.min_peak_prominence, 130.0);
        assert_eq!(config.head_peaks, HeadPeakSettings::default());
    }

    #[test]
    fn toml_round_trip_preserves_values() {
        let mut config = AnalysisConfig::default();
        config.desaccade.vors_window = 41;
        let text = config.to_toml_string().unwrap();
        assert_eq!(AnalysisConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = AnalysisConfig::from_toml_str("sample_rate_hz = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "sample_rate_hz",
                ..
            }
        ));
        let err = AnalysisConfig::from_toml_str("[desaccade]\nvvor_window = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        let err = AnalysisConfig::from_toml_str("sample_rate_hz = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[head_peaks]\nmin_height = 40.0").unwrap();
        let config = AnalysisConfig::load(&path).unwrap();
        assert_eq!(config.head_peaks.min_height, 40.0);

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "sample_rate_hz = \"fast\"").unwrap();
        match AnalysisConfig::load(&broken) {
            Err(ConfigError::ParseTomlFile { path, .. }) => assert_eq!(path, broken),
            other => panic!("expected file parse error, got {other:?}"),
        }

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            AnalysisConfig::load(&missing),
            Err(ConfigError::Read { .. })
        ));
    }
}
