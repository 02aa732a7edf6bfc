//! Single-sided amplitude spectrum with purity and SNR metrics.

use std::fmt;

use rustfft::{FftPlanner, num_complex::Complex};
use serde::{Deserialize, Serialize};

use super::stats::argmax;

/// Single-sided amplitude spectrum of one velocity series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralResult {
    /// Bin frequencies in Hz, `sample_rate * k / N` for `k = 0..=N/2`.
    pub frequencies: Vec<f64>,
    /// Bin amplitudes; interior bins are doubled, DC and the last bin are not.
    pub amplitudes: Vec<f64>,
    /// Peak amplitude over the summed spectrum.
    pub spectral_purity_index: Option<f64>,
    /// Peak against the remaining spectrum, in decibels.
    pub snr_db: Option<f64>,
}

impl SpectralResult {
    /// Result reported for series too short to transform.
    pub fn undefined() -> Self {
        Self::default()
    }

    /// True when no bins were produced.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Index of the first bin holding the largest amplitude.
    pub fn peak_index(&self) -> Option<usize> {
        argmax(&self.amplitudes)
    }

    /// Frequency of the strongest bin.
    pub fn peak_frequency(&self) -> Option<f64> {
        self.peak_index()
            .and_then(|index| self.frequencies.get(index).copied())
    }
}

/// Reusable spectrum estimator that caches FFT plans between calls.
pub struct SpectrumEstimator {
    sample_rate: f64,
    planner: FftPlanner<f64>,
}

impl fmt::Debug for SpectrumEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectrumEstimator")
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}

impl SpectrumEstimator {
    /// Create an estimator for signals sampled at `sample_rate` Hz.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            planner: FftPlanner::new(),
        }
    }

    /// Sample rate the frequency axis is built from.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Compute the single-sided spectrum of `signal`.
    ///
    /// Series with fewer than two samples yield [`SpectralResult::undefined`].
    pub fn estimate(&mut self, signal: &[f64]) -> SpectralResult {
        let len = signal.len();
        if len <= 1 {
            return SpectralResult::undefined();
        }
        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&value| Complex::new(value, 0.0)).collect();
        let fft = self.planner.plan_fft_forward(len);
        fft.process(&mut buffer);

        let bins = len / 2 + 1;
        let scale = len as f64;
        let mut amplitudes: Vec<f64> = buffer[..bins]
            .iter()
            .map(|value| value.norm() / scale)
            .collect();
        let last = bins - 1;
        for amplitude in amplitudes.iter_mut().take(last).skip(1) {
            *amplitude *= 2.0;
        }
        let frequencies = (0..bins)
            .map(|k| self.sample_rate * k as f64 / scale)
            .collect();

        let (spectral_purity_index, snr_db) = purity_and_snr(&amplitudes);
        SpectralResult {
            frequencies,
            amplitudes,
            spectral_purity_index: Some(spectral_purity_index),
            snr_db: Some(snr_db),
        }
    }
}

/// Compute the single-sided spectrum of `signal` sampled at `sample_rate` Hz.
pub fn compute_spectrum(signal: &[f64], sample_rate: f64) -> SpectralResult {
    SpectrumEstimator::new(sample_rate).estimate(signal)
}

fn purity_and_snr(amplitudes: &[f64]) -> (f64, f64) {
    let peak = amplitudes.iter().copied().fold(0.0_f64, f64::max);
    let total: f64 = amplitudes.iter().sum();
    let purity = if total != 0.0 { peak / total } else { 0.0 };
    let noise = total - peak;
    // Clamped to 0 dB when nothing but the peak carries energy.
    let snr = if noise > 0.0 {
        10.0 * (peak / noise).log10()
    } else {
        0.0
    };
    (purity, snr)
}
