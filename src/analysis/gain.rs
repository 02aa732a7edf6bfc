//! Polarity split and the three gain estimators (area, regression, spectral).

use super::spectrum::SpectralResult;
use super::stats::{ols_slope, trapezoid};

/// Head and eye samples split by head direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolaritySplit {
    /// Head samples where head velocity is positive.
    pub left_head: Vec<f64>,
    /// Eye samples at the same positions as `left_head`.
    pub left_eye: Vec<f64>,
    /// Head samples where head velocity is negative.
    pub right_head: Vec<f64>,
    /// Eye samples at the same positions as `right_head`.
    pub right_eye: Vec<f64>,
}

/// Partition `head` and `eye` by the sign of `head`; zero samples are dropped.
///
/// When the channels differ in length the eye subsets stay empty.
pub fn split_by_polarity(head: &[f64], eye: &[f64]) -> PolaritySplit {
    let aligned = head.len() == eye.len();
    let mut split = PolaritySplit::default();
    for (i, &h) in head.iter().enumerate() {
        if h > 0.0 {
            split.left_head.push(h);
            if aligned {
                split.left_eye.push(eye[i]);
            }
        } else if h < 0.0 {
            split.right_head.push(h);
            if aligned {
                split.right_eye.push(eye[i]);
            }
        }
    }
    split
}

/// Signed area gain for the positive-head side: ∫eye / ∫head.
///
/// Undefined unless `eye` pairs sample for sample with `head`.
pub fn auc_gain_left(head: &[f64], eye: &[f64], dx: f64) -> Option<f64> {
    if eye.len() != head.len() {
        return None;
    }
    let head_area = guarded_head_area(head, dx)?;
    Some(trapezoid(eye, dx) / head_area)
}

/// Rectified area gain for the negative-head side: ∫|eye| / ∫|head|.
pub fn auc_gain_right(head: &[f64], eye: &[f64], dx: f64) -> Option<f64> {
    if eye.len() != head.len() {
        return None;
    }
    guarded_head_area(head, dx)?;
    let head_abs: Vec<f64> = head.iter().map(|value| value.abs()).collect();
    let eye_abs: Vec<f64> = eye.iter().map(|value| value.abs()).collect();
    Some(trapezoid(&eye_abs, dx) / trapezoid(&head_abs, dx))
}

fn guarded_head_area(head: &[f64], dx: f64) -> Option<f64> {
    if head.len() < 2 {
        return None;
    }
    let area = trapezoid(head, dx);
    (area.abs() > 0.0).then_some(area)
}

/// Least-squares slope of eye against head for one side.
pub fn regression_gain(head: &[f64], eye: &[f64]) -> Option<f64> {
    ols_slope(head, eye)
}

/// Eye amplitude at the head's spectral peak over the head peak amplitude.
pub fn fourier_gain(head: &SpectralResult, eye: &SpectralResult) -> Option<f64> {
    let index = head.peak_index()?;
    let head_peak = head.amplitudes[index];
    if head_peak <= 0.0 {
        return None;
    }
    let eye_amplitude = eye.amplitudes.get(index)?;
    Some(eye_amplitude / head_peak)
}
