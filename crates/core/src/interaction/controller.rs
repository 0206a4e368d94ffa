use camline_protocol::{CameraId, TimeOfDay};

use crate::config::TimelineConfig;
use crate::mapping::{TrackGeometry, percent_to_time_of_day};
use crate::model::{TimelinePosition, ZoomLevel};

/// Pointer control state. Clock ticks only reach the displayed time while
/// `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging,
}

/// Where a pointer-down started a scrub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The axis header.
    Track,
    /// A camera's track row. Also toggles its selection.
    Row(CameraId),
    /// A camera's name in the label column. Also toggles its selection.
    CameraLabel(CameraId),
}

/// Host input, already translated into track terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    PointerDown {
        client_x: f64,
        target: PointerTarget,
    },
    PointerMove {
        client_x: f64,
    },
    PointerUp,
    PointerLeave,
    /// A wheel notch. Zooms only when the zoom modifier (ctrl/meta) is held.
    Wheel {
        delta_y: f64,
        zoom_modifier: bool,
    },
    ZoomIn,
    ZoomOut,
    /// The host scrolled the track viewport to `offset` pixels.
    Scroll {
        offset: f64,
    },
    /// Live clock reading.
    ClockTick(TimeOfDay),
}

/// What one input changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Update {
    /// Zoom changed: ticks, marker offsets and track width must be redone.
    pub axis_changed: bool,
    pub cursor_moved: bool,
    pub time_changed: bool,
    pub selection_changed: bool,
    pub scrolled: bool,
    /// New state, when the input caused a transition.
    pub transition: Option<InteractionState>,
    /// The input was used; hosts suppress default handling (page scroll) of
    /// consumed wheel events.
    pub consumed: bool,
}

impl Update {
    pub fn needs_redraw(&self) -> bool {
        self.axis_changed
            || self.cursor_moved
            || self.time_changed
            || self.selection_changed
            || self.scrolled
    }

    /// Combine two updates; the later transition wins.
    pub fn merge(mut self, other: Update) -> Self {
        self.axis_changed |= other.axis_changed;
        self.cursor_moved |= other.cursor_moved;
        self.time_changed |= other.time_changed;
        self.selection_changed |= other.selection_changed;
        self.scrolled |= other.scrolled;
        self.transition = other.transition.or(self.transition);
        self.consumed |= other.consumed;
        self
    }
}

/// Scrub, zoom and selection state of one timeline widget.
#[derive(Debug, Clone)]
pub struct Controller {
    state: InteractionState,
    zoom: ZoomLevel,
    position: TimelinePosition,
    scroll_offset: f64,
    displayed_time: TimeOfDay,
    selected: Option<CameraId>,
    wheel_step: i64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(&TimelineConfig::default())
    }
}

impl Controller {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            zoom: config.initial_zoom,
            position: config.initial_position,
            scroll_offset: 0.0,
            displayed_time: TimeOfDay::MIDNIGHT,
            selected: None,
            wheel_step: config.wheel_zoom_step.max(1),
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == InteractionState::Dragging
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn position(&self) -> TimelinePosition {
        self.position
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn displayed_time(&self) -> TimeOfDay {
        self.displayed_time
    }

    pub fn selected_camera(&self) -> Option<CameraId> {
        self.selected
    }

    /// Apply one input. `track` describes the track at the current zoom and
    /// is only consulted for pointer input.
    pub fn handle(&mut self, input: Input, track: &TrackGeometry) -> Update {
        match input {
            Input::PointerDown { client_x, target } => {
                let mut update = Update {
                    consumed: true,
                    ..Update::default()
                };
                if let PointerTarget::Row(id) | PointerTarget::CameraLabel(id) = target {
                    update = update.merge(self.toggle_selection(id));
                }
                if self.state == InteractionState::Idle {
                    self.state = InteractionState::Dragging;
                    update.transition = Some(InteractionState::Dragging);
                    log::debug!("scrub started from {target:?}");
                }
                update.merge(self.scrub_to(client_x, track))
            }
            Input::PointerMove { client_x } => {
                if self.state != InteractionState::Dragging {
                    return Update::default();
                }
                let update = self.scrub_to(client_x, track);
                Update {
                    consumed: true,
                    ..update
                }
            }
            Input::PointerUp | Input::PointerLeave => {
                if self.state != InteractionState::Dragging {
                    return Update::default();
                }
                self.state = InteractionState::Idle;
                log::debug!("scrub ended at {:.3}%", self.position.percent());
                Update {
                    transition: Some(InteractionState::Idle),
                    consumed: true,
                    ..Update::default()
                }
            }
            Input::Wheel {
                delta_y,
                zoom_modifier,
            } => {
                if !zoom_modifier || !delta_y.is_finite() || delta_y == 0.0 {
                    return Update::default();
                }
                let delta = if delta_y > 0.0 {
                    -self.wheel_step
                } else {
                    self.wheel_step
                };
                // The gesture is ours even when the zoom is already at a bound.
                Update {
                    consumed: true,
                    ..self.set_zoom(self.zoom.step(delta))
                }
            }
            Input::ZoomIn => self.set_zoom(self.zoom.step(1)),
            Input::ZoomOut => self.set_zoom(self.zoom.step(-1)),
            Input::Scroll { offset } => {
                let offset = if offset.is_finite() {
                    offset.max(0.0)
                } else {
                    0.0
                };
                if offset == self.scroll_offset {
                    return Update::default();
                }
                self.scroll_offset = offset;
                Update {
                    scrolled: true,
                    consumed: true,
                    ..Update::default()
                }
            }
            Input::ClockTick(now) => {
                if self.state != InteractionState::Idle {
                    return Update::default();
                }
                log::trace!("clock tick {now}");
                if now == self.displayed_time {
                    return Update::default();
                }
                self.displayed_time = now;
                Update {
                    time_changed: true,
                    consumed: true,
                    ..Update::default()
                }
            }
        }
    }

    fn scrub_to(&mut self, client_x: f64, track: &TrackGeometry) -> Update {
        let position = TimelinePosition::new(track.pointer_percent(client_x, self.scroll_offset));
        let time = percent_to_time_of_day(position.percent(), self.zoom);
        let update = Update {
            cursor_moved: position != self.position,
            time_changed: time != self.displayed_time,
            ..Update::default()
        };
        self.position = position;
        self.displayed_time = time;
        update
    }

    fn set_zoom(&mut self, zoom: ZoomLevel) -> Update {
        if zoom == self.zoom {
            return Update::default();
        }
        log::debug!("zoom {} -> {}", self.zoom, zoom);
        self.zoom = zoom;
        Update {
            axis_changed: true,
            consumed: true,
            ..Update::default()
        }
    }

    fn toggle_selection(&mut self, id: CameraId) -> Update {
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        log::debug!("selected camera {:?}", self.selected);
        Update {
            selection_changed: true,
            ..Update::default()
        }
    }
}
