use serde::{Deserialize, Serialize};

use camline_protocol::time::MINUTES_PER_DAY;

/// Horizontal magnification of the track, an integer factor in `[1, 16]`.
///
/// At 1× the whole day fits the viewport; at N× the track is N viewport
/// widths wide. Every constructor and step clamps into range, so a
/// `ZoomLevel` value is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    pub const MIN: ZoomLevel = ZoomLevel(1);
    pub const MAX: ZoomLevel = ZoomLevel(16);

    pub fn new(level: i64) -> Self {
        Self(level.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Move by `delta` levels, saturating at the bounds.
    pub fn step(self, delta: i64) -> Self {
        Self::new(i64::from(self.0) + delta)
    }

    pub fn can_zoom_in(self) -> bool {
        self < Self::MAX
    }

    pub fn can_zoom_out(self) -> bool {
        self > Self::MIN
    }

    /// Tick density on the axis.
    pub fn marks_per_hour(self) -> u32 {
        match self.0 {
            4.. => 60,
            2..=3 => 12,
            _ => 4,
        }
    }

    /// Minutes addressed by the full track when mapping a scrub position to
    /// a time (`1440 / zoom`).
    pub fn addressable_minutes(self) -> f64 {
        f64::from(MINUTES_PER_DAY) / f64::from(self.0)
    }

    /// Full track width for a given viewport width.
    pub fn track_width(self, viewport_width: f64) -> f64 {
        viewport_width * f64::from(self.0)
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<i64> for ZoomLevel {
    fn from(level: i64) -> Self {
        Self::new(level)
    }
}

impl From<ZoomLevel> for u8 {
    fn from(zoom: ZoomLevel) -> Self {
        zoom.0
    }
}

impl std::fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.0)
    }
}
