use serde::{Deserialize, Serialize};

/// Scrub cursor location as a percentage of the full (zoomed) track.
///
/// Always finite and within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct TimelinePosition(f64);

impl TimelinePosition {
    pub const START: TimelinePosition = TimelinePosition(0.0);
    pub const END: TimelinePosition = TimelinePosition(100.0);

    /// Clamp `percent` into range. Non-finite input collapses to 0.
    pub fn new(percent: f64) -> Self {
        Self(clamp_percent(percent))
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

impl From<f64> for TimelinePosition {
    fn from(percent: f64) -> Self {
        Self::new(percent)
    }
}

impl From<TimelinePosition> for f64 {
    fn from(position: TimelinePosition) -> Self {
        position.0
    }
}

/// Clamp to `[0, 100]`, mapping NaN and infinities to 0.
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
