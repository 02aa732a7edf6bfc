//! Moving-average desaccading of the eye trace.

/// Smooth `eye` with a centered moving average of `window` samples.
///
/// Samples outside the trace count as zero and every output is divided by the
/// full window length. For even windows the extra sample sits on the left.
/// Traces shorter than the window are returned unchanged.
pub fn desaccade(eye: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    if eye.len() < window {
        return eye.to_vec();
    }
    let len = eye.len() as isize;
    let half = (window / 2) as isize;
    let scale = window as f64;
    (0..len)
        .map(|i| {
            let start = (i - half).max(0);
            let end = (i - half + window as isize).min(len);
            let sum: f64 = eye[start as usize..end as usize].iter().sum();
            sum / scale
        })
        .collect()
}
