//! Small numeric helpers shared by the gain and saccade code.

/// Mean and population standard deviation, or `None` for an empty slice.
pub(crate) fn mean_std_dev(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / count;
    Some((mean, variance.sqrt()))
}

/// Trapezoidal integral of uniformly spaced samples.
pub(crate) fn trapezoid(values: &[f64], dx: f64) -> f64 {
    values
        .windows(2)
        .map(|pair| (pair[0] + pair[1]) * 0.5 * dx)
        .sum()
}

/// Ordinary least-squares slope of `y` against `x`.
///
/// Returns `None` for fewer than two points, mismatched lengths, or a
/// zero-variance `x`.
pub(crate) fn ols_slope(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 || y.len() < 2 || x.len() != y.len() {
        return None;
    }
    let count = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / count;
    let mean_y = y.iter().sum::<f64>() / count;
    let mut sxx = 0.0_f64;
    let mut sxy = 0.0_f64;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        sxx += dx * dx;
        sxy += dx * (yi - mean_y);
    }
    if sxx == 0.0 {
        return None;
    }
    Some(sxy / sxx)
}

/// Index of the first maximum, skipping non-finite values.
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            continue;
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

/// Largest absolute value, or `None` for an empty slice.
pub(crate) fn max_abs(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .filter(|value| value.is_finite())
        .map(|value| value.abs())
        .fold(None, |acc, value| Some(acc.map_or(value, |best: f64| best.max(value))))
}

/// Linear interpolation of `(xs, ys)` at `x`, clamped to the end values.
///
/// `xs` must be non-decreasing.
pub(crate) fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    let len = xs.len().min(ys.len());
    if len == 0 {
        return None;
    }
    if x <= xs[0] {
        return Some(ys[0]);
    }
    if x >= xs[len - 1] {
        return Some(ys[len - 1]);
    }
    let upper = xs[..len].partition_point(|&value| value <= x);
    let lower = upper - 1;
    let span = xs[upper] - xs[lower];
    if span <= 0.0 {
        return Some(ys[lower]);
    }
    let frac = (x - xs[lower]) / span;
    Some(ys[lower] + (ys[upper] - ys[lower]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_dev_is_population_form() {
        let (mean, std) = mean_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((std - 2.0).abs() < 1e-12);
        assert!(mean_std_dev(&[]).is_none());
    }

    #[test]
    fn trapezoid_matches_triangle_area() {
        let area = trapezoid(&[0.0, 1.0, 2.0, 1.0, 0.0], 0.5);
        assert!((area - 2.0).abs() < 1e-12);
        assert_eq!(trapezoid(&[3.0], 1.0), 0.0);
        assert_eq!(trapezoid(&[], 1.0), 0.0);
    }

    #[test]
    fn slope_recovers_linear_relation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| 0.8 * v + 3.0).collect();
        let slope = ols_slope(&x, &y).unwrap();
        assert!((slope - 0.8).abs() < 1e-12);
    }

    #[test]
    fn slope_is_undefined_for_flat_or_short_input() {
        assert!(ols_slope(&[10.0, 10.0, 10.0], &[8.0, 8.0, 8.0]).is_none());
        assert!(ols_slope(&[1.0], &[1.0]).is_none());
        assert!(ols_slope(&[1.0, 2.0], &[1.0]).is_none());
    }

    #[test]
    fn argmax_reports_first_maximum() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn interpolate_clamps_and_blends() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 10.0, 30.0];
        assert_eq!(interpolate(&xs, &ys, -1.0), Some(0.0));
        assert_eq!(interpolate(&xs, &ys, 5.0), Some(30.0));
        assert!((interpolate(&xs, &ys, 1.5).unwrap() - 20.0).abs() < 1e-12);
        assert_eq!(interpolate(&[], &[], 0.0), None);
    }
}
