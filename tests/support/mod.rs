use vor_analysis::{
    VorTrace,
    synth::{SaccadeInjection, SyntheticTrial},
};

pub const LEFT_LATENCIES: [usize; 5] = [20, 30, 40, 50, 60];

/// Ten seconds of 0.5 Hz head motion with one saccade per half-cycle.
pub fn trial_with_saccades(right_latencies: Vec<usize>) -> SyntheticTrial {
    SyntheticTrial {
        saccades: Some(SaccadeInjection {
            left_latencies: LEFT_LATENCIES.to_vec(),
            right_latencies,
            ..SaccadeInjection::fixed(250.0, 30)
        }),
        ..SyntheticTrial::default()
    }
}

pub fn build(trial: &SyntheticTrial) -> VorTrace {
    trial.build().expect("synthetic trace")
}

pub fn assert_close(actual: Option<f64>, expected: f64, tolerance: f64) {
    let actual = actual.expect("metric defined");
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
