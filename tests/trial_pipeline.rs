mod support;

use std::io::Write;

use support::{assert_close, build, trial_with_saccades};

use vor_analysis::{
    AnalysisConfig, AnalysisWindow, ConfigError, TestSubtype,
    report::{TrialSummary, saccade_markers},
    synth::SyntheticTrial,
};

#[test]
fn windowed_trial_recovers_gain() {
    let trace = build(&SyntheticTrial::default());
    let window = AnalysisWindow::new(2.0, 6.0);
    let selected = trace.window(&window).normalized();
    assert_eq!(selected.len(), 1001);
    assert_eq!(selected.time()[0], 0.0);

    let metrics = selected.analyze(TestSubtype::Vvor, &AnalysisConfig::default());
    assert_close(metrics.regression_gain_left, 0.8, 0.05);
    assert_close(metrics.regression_gain_right, 0.8, 0.05);
    assert_close(metrics.gain_auc_left, 0.8, 0.05);
    assert_close(metrics.gain_auc_right, 0.8, 0.05);
    assert_close(metrics.fourier_gain_left, 0.8, 0.1);
    assert_close(metrics.fourier_gain_right, 0.8, 0.1);
    assert_close(metrics.mean_peak_head_velocity, 100.0, 0.5);
    assert_eq!(metrics.desaccaded_eye.len(), selected.len());
}

#[test]
fn config_file_drives_the_analysis() {
    let mut file = tempfile::NamedTempFile::new().expect("temp config");
    writeln!(
        file,
        "sample_rate_hz = 250.0\n\n[saccade]\nmin_peak_height = 400.0"
    )
    .expect("write config");
    let config = AnalysisConfig::load(file.path()).expect("load config");
    assert_eq!(config.saccade.min_peak_height, 400.0);
    assert_eq!(config.desaccade, AnalysisConfig::default().desaccade);

    let trace = build(&trial_with_saccades(vec![30]));
    let metrics = trace.analyze(TestSubtype::Vvor, &config);
    assert!(metrics.saccades.saccade_timestamps.is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let err = AnalysisConfig::from_toml_str("sample_rate_hz = 0.0").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "sample_rate_hz",
            ..
        }
    ));
}

#[test]
fn summary_and_markers_describe_the_trial() {
    let trace = build(&trial_with_saccades(vec![30]));
    let metrics = trace.analyze(TestSubtype::Vvor, &AnalysisConfig::default());
    let markers = saccade_markers(
        trace.time(),
        trace.eye(),
        &metrics.saccades.saccade_timestamps,
    );
    assert_eq!(markers.len(), 9);
    assert!(markers.iter().all(|marker| marker.eye_velocity.abs() > 250.0));

    let text = TrialSummary::new(&trace, &metrics).to_string();
    assert!(text.contains("Dominant Head Freq: 0.50 Hz"));
    assert!(text.contains("PR Score: L = 35 | R = 0"));
}

#[test]
fn bundle_round_trips_through_json() {
    let trace = build(&trial_with_saccades(vec![30, 40]));
    let metrics = trace.analyze(TestSubtype::Vvor, &AnalysisConfig::default());
    let json = serde_json::to_string(&metrics).expect("serialize");
    let restored: vor_analysis::MetricsBundle = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(
        restored.saccades.saccade_timestamps,
        metrics.saccades.saccade_timestamps
    );
    assert_eq!(restored.saccades.left_pr, metrics.saccades.left_pr);
}
