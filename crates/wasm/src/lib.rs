use std::error::Error;
use std::time::Duration;

use camline_core::{FixedClock, Input, PointerTarget, Timeline, TimelineConfig, parse_feed};
use camline_protocol::{Point, TimeOfDay, Viewport};
use wasm_bindgen::prelude::*;

/// One timeline widget owned by the page. Free it from JS when the widget
/// unmounts.
///
/// Times passed in as `now_ms` are `performance.now()` readings. Methods
/// returning `bool` report whether the widget needs a redraw, except
/// [`wheel`](Self::wheel), which reports whether the page should
/// `preventDefault()` the event.
#[wasm_bindgen]
pub struct TimelineWidget {
    timeline: Timeline,
}

#[wasm_bindgen]
impl TimelineWidget {
    /// Build a widget from a feed document and an optional config document.
    #[wasm_bindgen(constructor)]
    pub fn new(feed: &[u8], config: Option<String>) -> Result<TimelineWidget, JsError> {
        let timeline = build(feed, config.as_deref()).map_err(to_js)?;
        Ok(Self { timeline })
    }

    pub fn set_viewport(&mut self, x: f64, y: f64, width: f64, height: f64, dpr: f64) -> bool {
        self.timeline
            .set_viewport(Viewport {
                x,
                y,
                width,
                height,
                dpr,
            })
            .needs_redraw()
    }

    /// Height in CSS pixels needed to show every camera row.
    pub fn content_height(&self) -> f64 {
        self.timeline.content_height()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
        self.timeline
            .pointer_down(Point::new(x, y), ms(now_ms))
            .needs_redraw()
    }

    /// Start a scrub on a camera label; also toggles that camera's selection.
    pub fn label_down(&mut self, camera_id: u32, x: f64, now_ms: f64) -> bool {
        let input = Input::PointerDown {
            client_x: x,
            target: PointerTarget::CameraLabel(camera_id),
        };
        self.timeline.handle(input, ms(now_ms)).needs_redraw()
    }

    pub fn pointer_move(&mut self, x: f64, now_ms: f64) -> bool {
        self.timeline
            .handle(Input::PointerMove { client_x: x }, ms(now_ms))
            .needs_redraw()
    }

    pub fn pointer_up(&mut self, now_ms: f64) -> bool {
        self.timeline
            .handle(Input::PointerUp, ms(now_ms))
            .needs_redraw()
    }

    pub fn pointer_leave(&mut self, now_ms: f64) -> bool {
        self.timeline
            .handle(Input::PointerLeave, ms(now_ms))
            .needs_redraw()
    }

    /// Feed a wheel event. `zoom_modifier` is `ctrlKey || metaKey`.
    pub fn wheel(&mut self, delta_y: f64, zoom_modifier: bool, now_ms: f64) -> bool {
        self.timeline
            .handle(
                Input::Wheel {
                    delta_y,
                    zoom_modifier,
                },
                ms(now_ms),
            )
            .consumed
    }

    pub fn zoom_in(&mut self, now_ms: f64) -> bool {
        self.timeline
            .handle(Input::ZoomIn, ms(now_ms))
            .needs_redraw()
    }

    pub fn zoom_out(&mut self, now_ms: f64) -> bool {
        self.timeline
            .handle(Input::ZoomOut, ms(now_ms))
            .needs_redraw()
    }

    /// The track container scrolled to `offset` pixels.
    pub fn scroll_to(&mut self, offset: f64, now_ms: f64) -> bool {
        self.timeline
            .handle(Input::Scroll { offset }, ms(now_ms))
            .needs_redraw()
    }

    pub fn max_scroll(&self) -> f64 {
        self.timeline.max_scroll()
    }

    pub fn start_clock(&mut self, now_ms: f64) {
        self.timeline.start_clock(ms(now_ms));
    }

    /// Offer the page's local wall-clock time; applied when a refresh is due
    /// and the user is not scrubbing.
    pub fn tick(&mut self, now_ms: f64, hours: u32, minutes: u32, seconds: u32) -> bool {
        let Some(time) = TimeOfDay::from_hms(hours, minutes, seconds) else {
            return false;
        };
        self.timeline
            .poll_clock(ms(now_ms), &FixedClock(time))
            .needs_redraw()
    }

    /// When the next clock refresh is due, or `undefined` while scrubbing.
    pub fn next_tick_ms(&self) -> Option<f64> {
        self.timeline
            .ticker()
            .next_due()
            .map(|due| due.as_secs_f64() * 1000.0)
    }

    pub fn zoom(&self) -> u8 {
        self.timeline.zoom().get()
    }

    pub fn can_zoom_in(&self) -> bool {
        self.timeline.zoom().can_zoom_in()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.timeline.zoom().can_zoom_out()
    }

    /// Cursor position as a percentage of the full track.
    pub fn position(&self) -> f64 {
        self.timeline.position().percent()
    }

    pub fn displayed_time(&self) -> String {
        self.timeline.displayed_time_text()
    }

    pub fn is_dragging(&self) -> bool {
        self.timeline.is_dragging()
    }

    pub fn selected_camera(&self) -> Option<u32> {
        self.timeline.selected_camera()
    }

    /// Render commands for the current viewport, as JSON.
    pub fn render(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.timeline.render()).map_err(to_js)
    }

    /// Axis ticks for the current zoom, as JSON.
    pub fn ticks(&self) -> Result<String, JsError> {
        serde_json::to_string(self.timeline.ticks()).map_err(to_js)
    }

    /// Event marker placement for the current zoom, as JSON.
    pub fn markers(&self) -> Result<String, JsError> {
        serde_json::to_string(self.timeline.markers()).map_err(to_js)
    }
}

fn build(feed: &[u8], config: Option<&str>) -> Result<Timeline, Box<dyn Error>> {
    let session = parse_feed(feed)?;
    let config = match config {
        Some(json) => TimelineConfig::from_json(json.as_bytes())?,
        None => TimelineConfig::default(),
    };
    Ok(Timeline::new(session, config)?)
}

/// `performance.now()` milliseconds as host monotonic time. Negative,
/// non-finite or unrepresentable readings map to zero.
fn ms(now_ms: f64) -> Duration {
    Duration::try_from_secs_f64(now_ms / 1000.0).unwrap_or(Duration::ZERO)
}

fn to_js(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_demo_feed() {
        let Ok(timeline) = build(camline_core::DEMO_FEED, None) else {
            panic!("demo feed builds");
        };
        assert_eq!(timeline.session().len(), 3);
    }

    #[test]
    fn rejects_bad_config() {
        let config = r#"{"row_height": -1}"#;
        assert!(build(camline_core::DEMO_FEED, Some(config)).is_err());
        assert!(build(b"not json", None).is_err());
    }

    #[test]
    fn performance_now_maps_to_duration() {
        assert_eq!(ms(1500.0), Duration::from_millis(1500));
        assert_eq!(ms(-3.0), Duration::ZERO);
        assert_eq!(ms(f64::NAN), Duration::ZERO);
        assert_eq!(ms(f64::INFINITY), Duration::ZERO);
        assert_eq!(ms(f64::MAX), Duration::ZERO);
        assert_eq!(ms(1e300), Duration::ZERO);
    }
}
