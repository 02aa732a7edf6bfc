//! Analysis window math.
//! Keeps the selected time range an explicit value so the analysis never
//! depends on interactive state.

use serde::{Deserialize, Serialize};

/// Smallest window an edge adjustment may produce, in seconds.
pub const MIN_WINDOW_SECONDS: f64 = 0.1;

/// Inclusive time range the analysis is restricted to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    start: f64,
    end: f64,
}

impl AnalysisWindow {
    /// Create a window, ensuring `start` is not greater than `end`.
    pub fn new(start: f64, end: f64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Window spanning the whole time channel, or `None` when it is empty.
    pub fn full(time: &[f64]) -> Option<Self> {
        let first = *time.first()?;
        let last = *time.last()?;
        Some(Self::new(first, last))
    }

    /// Start time in seconds.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Window length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// True when `time` lies inside the window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Move whichever edge is closer to `time`, staying inside `bounds`.
    ///
    /// Edges keep at least [`MIN_WINDOW_SECONDS`] between them where the
    /// bounds allow it.
    pub fn adjust_nearest_edge(self, time: f64, bounds: AnalysisWindow) -> Self {
        if !time.is_finite() {
            return self;
        }
        let mut start = self.start;
        let mut end = self.end;
        if (time - start).abs() < (time - end).abs() {
            start = time.min(end - MIN_WINDOW_SECONDS).max(bounds.start);
        } else {
            end = time.max(start + MIN_WINDOW_SECONDS).min(bounds.end);
        }
        Self::new(start, end)
    }
}
