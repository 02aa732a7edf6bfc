mod support;

use support::{assert_close, build, trial_with_saccades};

use vor_analysis::{AnalysisConfig, TestSubtype, detect_saccades};

#[test]
fn one_saccade_per_complete_half_cycle() {
    let trace = build(&trial_with_saccades(vec![30]));
    let result = detect_saccades(trace.time(), trace.eye(), trace.head(), TestSubtype::Vvor);

    // The pulse after the last head crossing has no closing crossing.
    assert_eq!(result.saccade_timestamps.len(), 9);
    for (k, time) in result.saccade_timestamps.iter().enumerate() {
        let onset = k as f64;
        assert!(*time > onset && *time < onset + 0.3, "saccade {k} at {time}");
    }
    assert!(
        result
            .saccade_timestamps
            .windows(2)
            .all(|pair| pair[0] < pair[1])
    );
}

#[test]
fn irregular_latencies_score_higher_than_regular_ones() {
    let trace = build(&trial_with_saccades(vec![30]));
    let result = detect_saccades(trace.time(), trace.eye(), trace.head(), TestSubtype::Vvor);
    assert_eq!(result.left_pr, Some(35));
    assert_eq!(result.right_pr, Some(0));
}

#[test]
fn too_few_latencies_leave_score_undefined() {
    let trace = build(&trial_with_saccades(vec![30]));
    let mut config = AnalysisConfig::default();
    config.saccade.min_latencies = 5;
    let metrics = trace.analyze(TestSubtype::Vvor, &config);
    assert_eq!(metrics.saccades.left_pr, Some(35));
    assert_eq!(metrics.saccades.right_pr, None);
}

#[test]
fn suppression_trials_are_not_scored() {
    let trace = build(&trial_with_saccades(vec![30]));
    let metrics = trace.analyze(TestSubtype::Vors, &AnalysisConfig::default());
    assert!(metrics.saccades.saccade_timestamps.is_empty());
    assert_eq!(metrics.saccades.left_pr, None);
    assert_eq!(metrics.saccades.right_pr, None);
    assert_close(metrics.dominant_head_frequency_hz, 0.5, 0.1);
}

#[test]
fn clean_trial_has_no_saccades() {
    let trace = build(&vor_analysis::synth::SyntheticTrial::default());
    let metrics = trace.analyze(TestSubtype::Vvor, &AnalysisConfig::default());
    assert!(metrics.saccades.saccade_timestamps.is_empty());
    assert_eq!(metrics.saccades.left_pr, None);
}
