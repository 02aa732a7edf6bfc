//! Saccade detection per head half-cycle and periodicity-ratio scoring.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::peaks::find_peaks;
use super::stats::{max_abs, mean_std_dev};
use crate::config::{AnalysisConfig, SaccadeSettings};
use crate::trace::TestSubtype;

/// Shortest trace the detector will look at.
const MIN_TRACE_SAMPLES: usize = 4;
/// Ceiling applied to PR scores.
const MAX_PR_SCORE: f64 = 100.0;

/// Saccade markers and per-side PR scores for one trial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaccadeResult {
    /// PR score over half-cycles opened by a rising head crossing.
    pub left_pr: Option<u8>,
    /// PR score over half-cycles opened by a falling head crossing.
    pub right_pr: Option<u8>,
    /// Time of each detected saccade peak, in order.
    pub saccade_timestamps: Vec<f64>,
}

/// Side of the head movement a half-cycle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Head velocity positive.
    Left,
    /// Head velocity negative.
    Right,
}

/// One head half-cycle bounded by two sign changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfCycle {
    /// First sample of the segment.
    pub start: usize,
    /// One past the last sample of the segment.
    pub end: usize,
    /// Direction of the crossing that opened the segment.
    pub side: Side,
}

impl HalfCycle {
    /// Number of samples in the segment.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the segment holds no samples.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Detect saccades with the default thresholds.
pub fn detect_saccades(t: &[f64], eye: &[f64], head: &[f64], subtype: TestSubtype) -> SaccadeResult {
    detect_saccades_with(t, eye, head, subtype, &AnalysisConfig::default().saccade)
}

/// Detect saccades in every head half-cycle and score latency regularity.
///
/// VORS trials and traces shorter than four samples are not scored.
pub fn detect_saccades_with(
    t: &[f64],
    eye: &[f64],
    head: &[f64],
    subtype: TestSubtype,
    settings: &SaccadeSettings,
) -> SaccadeResult {
    if !subtype.scores_saccades() {
        debug!("saccade scoring skipped for {subtype}");
        return SaccadeResult::default();
    }
    if t.len() < MIN_TRACE_SAMPLES
        || eye.len() < MIN_TRACE_SAMPLES
        || head.len() < MIN_TRACE_SAMPLES
    {
        debug!("saccade scoring skipped: {} samples", head.len());
        return SaccadeResult::default();
    }
    let len = t.len().min(eye.len()).min(head.len());
    let head = &head[..len];
    let criteria = settings.peak_criteria();

    let mut left_latencies = Vec::new();
    let mut right_latencies = Vec::new();
    let mut saccade_timestamps = Vec::new();
    for segment in half_cycles(head) {
        if segment.len() < settings.min_segment_samples {
            continue;
        }
        let peak_head = max_abs(&head[segment.start..segment.end]).unwrap_or(0.0);
        if peak_head < settings.min_head_velocity {
            continue;
        }
        let rectified: Vec<f64> = eye[segment.start..segment.end]
            .iter()
            .map(|value| value.abs())
            .collect();
        let Some(first) = find_peaks(&rectified, &criteria).first().copied() else {
            continue;
        };
        let peak_time = t[segment.start + first.index];
        let latency = peak_time - t[segment.start];
        trace!(
            start = segment.start,
            end = segment.end,
            side = ?segment.side,
            latency,
            "saccade detected"
        );
        saccade_timestamps.push(peak_time);
        match segment.side {
            Side::Left => left_latencies.push(latency),
            Side::Right => right_latencies.push(latency),
        }
    }

    let result = SaccadeResult {
        left_pr: pr_score(&left_latencies, settings.min_latencies),
        right_pr: pr_score(&right_latencies, settings.min_latencies),
        saccade_timestamps,
    };
    debug!(
        saccades = result.saccade_timestamps.len(),
        left_pr = ?result.left_pr,
        right_pr = ?result.right_pr,
        "saccade scoring finished"
    );
    result
}

/// Split `head` into segments between consecutive sign changes.
///
/// The sign indicator is compared circularly, so sample 0 opens a segment when
/// its sign differs from the last sample. Samples before the first crossing
/// and after the last one belong to no segment.
pub fn half_cycles(head: &[f64]) -> Vec<HalfCycle> {
    let len = head.len();
    if len == 0 {
        return Vec::new();
    }
    let positive: Vec<bool> = head.iter().map(|&value| value > 0.0).collect();
    let crossings: Vec<(usize, bool)> = (0..len)
        .filter_map(|i| {
            let previous = positive[(i + len - 1) % len];
            (positive[i] != previous).then_some((i, positive[i]))
        })
        .collect();
    crossings
        .windows(2)
        .map(|pair| {
            let (start, rising) = pair[0];
            HalfCycle {
                start,
                end: pair[1].0,
                side: if rising { Side::Left } else { Side::Right },
            }
        })
        .collect()
}

/// Coefficient of variation of `latencies` as a rounded percentage.
///
/// Needs at least `min_latencies` values and a non-zero mean. Ties round to
/// even; scores above 100 report as 100.
pub fn pr_score(latencies: &[f64], min_latencies: usize) -> Option<u8> {
    if latencies.len() < min_latencies.max(1) {
        return None;
    }
    let (mean, std) = mean_std_dev(latencies)?;
    if mean == 0.0 {
        return None;
    }
    let score = (std / mean * 100.0).round_ties_even();
    if !score.is_finite() {
        return None;
    }
    Some(score.clamp(0.0, MAX_PR_SCORE) as u8)
}
