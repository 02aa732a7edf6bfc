//! Synthetic VOR trials for demos, benchmarks and tests.

use std::f64::consts::PI;

use crate::trace::{TraceError, VorTrace};

/// Gaussian saccade pulses added to the eye trace after each half-cycle onset.
#[derive(Clone, Debug, PartialEq)]
pub struct SaccadeInjection {
    /// Pulse peak velocity in deg/s, applied in the direction of head motion.
    pub peak_velocity: f64,
    /// Pulse standard deviation in samples.
    pub sigma_samples: f64,
    /// Latencies (samples after onset) for positive-head half-cycles, cycled.
    pub left_latencies: Vec<usize>,
    /// Latencies (samples after onset) for negative-head half-cycles, cycled.
    pub right_latencies: Vec<usize>,
}

impl SaccadeInjection {
    /// Pulses of `peak_velocity` at a fixed latency on both sides.
    pub fn fixed(peak_velocity: f64, latency_samples: usize) -> Self {
        Self {
            peak_velocity,
            sigma_samples: 2.0,
            left_latencies: vec![latency_samples],
            right_latencies: vec![latency_samples],
        }
    }
}

/// Builder for a sinusoidal head trace with a scaled eye response.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticTrial {
    /// Sample rate in Hz.
    pub sample_rate_hz: f64,
    /// Trial length in seconds.
    pub duration_seconds: f64,
    /// Head oscillation frequency in Hz.
    pub frequency_hz: f64,
    /// Head velocity amplitude in deg/s.
    pub amplitude: f64,
    /// Eye-to-head gain of the slow-phase response.
    pub gain: f64,
    /// Optional saccade pulses.
    pub saccades: Option<SaccadeInjection>,
}

impl Default for SyntheticTrial {
    fn default() -> Self {
        Self {
            sample_rate_hz: 250.0,
            duration_seconds: 10.0,
            frequency_hz: 0.5,
            amplitude: 100.0,
            gain: 0.8,
            saccades: None,
        }
    }
}

impl SyntheticTrial {
    /// Number of samples the trial will hold.
    pub fn sample_count(&self) -> usize {
        (self.duration_seconds * self.sample_rate_hz).round().max(0.0) as usize
    }

    /// Sample index where half-cycle `k` begins.
    pub fn half_cycle_onset(&self, k: usize) -> usize {
        let half_period = self.sample_rate_hz / (2.0 * self.frequency_hz);
        (k as f64 * half_period).round() as usize
    }

    /// Generate the trace.
    ///
    /// The head phase is offset by half a sample so no sample sits exactly on
    /// a zero crossing.
    pub fn build(&self) -> Result<VorTrace, TraceError> {
        let len = self.sample_count();
        let omega = 2.0 * PI * self.frequency_hz / self.sample_rate_hz;
        let time: Vec<f64> = (0..len).map(|i| i as f64 / self.sample_rate_hz).collect();
        let head: Vec<f64> = (0..len)
            .map(|i| self.amplitude * (omega * (i as f64 + 0.5)).sin())
            .collect();
        let mut eye: Vec<f64> = head.iter().map(|value| value * self.gain).collect();
        if let Some(injection) = &self.saccades {
            self.inject(&mut eye, injection);
        }
        VorTrace::new(time, head, eye)
    }

    fn inject(&self, eye: &mut [f64], injection: &SaccadeInjection) {
        if !(self.frequency_hz.is_finite() && self.frequency_hz > 0.0) {
            return;
        }
        let sigma = injection.sigma_samples.max(0.1);
        let reach = (sigma * 4.0).ceil() as usize;
        let mut left_seen = 0usize;
        let mut right_seen = 0usize;
        let mut k = 0usize;
        loop {
            let onset = self.half_cycle_onset(k);
            if onset >= eye.len() {
                break;
            }
            let positive = k % 2 == 0;
            let latencies = if positive {
                &injection.left_latencies
            } else {
                &injection.right_latencies
            };
            let counter = if positive {
                &mut left_seen
            } else {
                &mut right_seen
            };
            if !latencies.is_empty() {
                let latency = latencies[*counter % latencies.len()];
                *counter += 1;
                let center = onset + latency;
                let sign = if positive { 1.0 } else { -1.0 };
                let start = center.saturating_sub(reach);
                let end = (center + reach + 1).min(eye.len());
                for (i, value) in eye.iter_mut().enumerate().take(end).skip(start) {
                    let offset = (i as f64 - center as f64) / sigma;
                    *value += sign * injection.peak_velocity * (-0.5 * offset * offset).exp();
                }
            }
            k += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_trial_has_expected_shape() {
        let trial = SyntheticTrial::default();
        let trace = trial.build().unwrap();
        assert_eq!(trace.len(), 2500);
        assert_eq!(trial.half_cycle_onset(3), 750);
        assert!(trace.head().iter().all(|value| *value != 0.0));
        assert!((trace.eye()[100] - 0.8 * trace.head()[100]).abs() < 1e-12);
    }

    #[test]
    fn pulses_follow_head_direction() {
        let trial = SyntheticTrial {
            saccades: Some(SaccadeInjection::fixed(250.0, 40)),
            ..SyntheticTrial::default()
        };
        let trace = trial.build().unwrap();
        let slow = 0.8 * trace.head()[40];
        assert!((trace.eye()[40] - slow - 250.0).abs() < 1e-9);
        let slow = 0.8 * trace.head()[290];
        assert!((trace.eye()[290] - slow + 250.0).abs() < 1e-9);
    }
}
