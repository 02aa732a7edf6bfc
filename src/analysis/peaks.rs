//! Height, prominence and width gated local-maximum search.

use serde::{Deserialize, Serialize};

/// Thresholds a local maximum must satisfy to be reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakCriteria {
    /// Minimum sample value at the peak.
    pub min_height: Option<f64>,
    /// Minimum rise above the higher of the two surrounding valleys.
    pub min_prominence: Option<f64>,
    /// Maximum width in samples, measured at half prominence.
    pub max_width: Option<f64>,
}

impl PeakCriteria {
    /// Criteria gating on height and prominence only.
    pub fn height_and_prominence(min_height: f64, min_prominence: f64) -> Self {
        Self {
            min_height: Some(min_height),
            min_prominence: Some(min_prominence),
            max_width: None,
        }
    }

    /// Add a maximum width gate.
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }
}

/// A detected peak with its shape measurements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// Sample index of the peak.
    pub index: usize,
    /// Sample value at the peak.
    pub height: f64,
    /// Rise above the higher surrounding valley.
    pub prominence: f64,
    /// Width in samples at half prominence.
    pub width: f64,
}

/// Find the local maxima of `values` that satisfy `criteria`, in index order.
pub fn find_peaks(values: &[f64], criteria: &PeakCriteria) -> Vec<Peak> {
    local_maxima(values)
        .into_iter()
        .filter(|&index| criteria.min_height.is_none_or(|min| values[index] >= min))
        .filter_map(|index| {
            let shape = measure(values, index);
            let prominent = criteria
                .min_prominence
                .is_none_or(|min| shape.prominence >= min);
            let narrow = criteria.max_width.is_none_or(|max| shape.width <= max);
            (prominent && narrow).then_some(Peak {
                index,
                height: values[index],
                prominence: shape.prominence,
                width: shape.width,
            })
        })
        .collect()
}

fn local_maxima(values: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if values.len() < 3 {
        return peaks;
    }
    let last = values.len() - 1;
    let mut i = 1usize;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                // Plateaus resolve to their (lower) middle sample.
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}

struct PeakShape {
    prominence: f64,
    width: f64,
}

fn measure(values: &[f64], peak: usize) -> PeakShape {
    let top = values[peak];

    let mut left_base = peak;
    let mut left_min = top;
    let mut i = peak;
    loop {
        if values[i] > top {
            break;
        }
        if values[i] < left_min {
            left_min = values[i];
            left_base = i;
        }
        if i == 0 {
            break;
        }
        i -= 1;
    }

    let mut right_base = peak;
    let mut right_min = top;
    for (offset, &value) in values[peak..].iter().enumerate() {
        if value > top {
            break;
        }
        if value < right_min {
            right_min = value;
            right_base = peak + offset;
        }
    }

    let prominence = top - left_min.max(right_min);
    let width = half_prominence_width(values, peak, prominence, left_base, right_base);
    PeakShape { prominence, width }
}

fn half_prominence_width(
    values: &[f64],
    peak: usize,
    prominence: f64,
    left_base: usize,
    right_base: usize,
) -> f64 {
    let level = values[peak] - prominence * 0.5;

    let mut i = peak;
    while left_base < i && level < values[i] {
        i -= 1;
    }
    let mut left = i as f64;
    if values[i] < level {
        left += (level - values[i]) / (values[i + 1] - values[i]);
    }

    let mut i = peak;
    while i < right_base && level < values[i] {
        i += 1;
    }
    let mut right = i as f64;
    if values[i] < level {
        right -= (level - values[i]) / (values[i - 1] - values[i]);
    }

    right - left
}
