//! Conversions between pointer pixels, track percentages, and time of day.
//!
//! Percentages are always relative to the *full* zoomed track, never the
//! visible viewport. Scrolling moves the viewport over the track; it shifts
//! how a pointer coordinate lands on the track but leaves the
//! percent ↔ time mapping untouched.

use camline_protocol::TimeOfDay;

use crate::model::ZoomLevel;
use crate::model::position::clamp_percent;

/// Absorbs float error so that exact minutes survive a percent round trip.
const MINUTE_EPSILON: f64 = 1e-6;

/// Where the track sits in host client coordinates.
///
/// `origin_x` is the client x of the left edge of the track's viewport (not
/// shifted by scrolling); `width` is the pixel width of the full zoomed track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackGeometry {
    pub origin_x: f64,
    pub width: f64,
}

impl TrackGeometry {
    pub fn new(origin_x: f64, width: f64) -> Self {
        Self { origin_x, width }
    }

    /// Percent of the track under a pointer at `client_x`.
    pub fn pointer_percent(&self, client_x: f64, scroll_offset: f64) -> f64 {
        pixel_to_percent(client_x, self.origin_x, scroll_offset, self.width)
    }
}

/// Map a pointer x coordinate onto the full track as a percentage.
///
/// A zero, negative or non-finite track width yields 0, as does any
/// non-finite input.
pub fn pixel_to_percent(
    client_x: f64,
    track_origin_x: f64,
    scroll_offset: f64,
    track_width: f64,
) -> f64 {
    if !(track_width.is_finite() && track_width > 0.0) {
        return 0.0;
    }
    let x = client_x - track_origin_x + scroll_offset;
    clamp_percent(x / track_width * 100.0)
}

/// Time of day at a track percentage, truncated to the whole minute.
///
/// The full track addresses `1440 / zoom` minutes from midnight.
pub fn percent_to_time_of_day(percent: f64, zoom: ZoomLevel) -> TimeOfDay {
    let percent = clamp_percent(percent);
    let minutes_total = zoom.addressable_minutes() * (percent / 100.0);
    let minutes = (minutes_total + MINUTE_EPSILON).floor() as u32;
    let hours = (minutes / 60) % 24;
    TimeOfDay::from_seconds(hours * 3600 + (minutes % 60) * 60)
}

/// Track percentage of a time of day, clamped to `[0, 100]`.
///
/// Times past the zoom's addressable window pin to the end of the track.
pub fn time_of_day_to_percent(time: TimeOfDay, zoom: ZoomLevel) -> f64 {
    let minutes = f64::from(time.hour() * 60 + time.minute());
    clamp_percent(minutes / zoom.addressable_minutes() * 100.0)
}

/// Pixel offset of a percentage from the start of the full track.
pub fn percent_to_track_x(percent: f64, track_width: f64) -> f64 {
    if !(track_width.is_finite() && track_width > 0.0) {
        return 0.0;
    }
    clamp_percent(percent) / 100.0 * track_width
}

/// Position of a track pixel within the scrolled viewport.
pub fn track_x_to_viewport_x(track_x: f64, scroll_offset: f64) -> f64 {
    track_x - scroll_offset
}
