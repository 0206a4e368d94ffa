//! One timeline widget instance: the session it shows, its configuration,
//! and all of its mutable interaction state.

use std::time::Duration;

use camline_protocol::{CameraId, Point, Rect, RenderCommand, ThemeToken, TimeOfDay, Viewport};

use crate::config::{ConfigError, TimelineConfig};
use crate::interaction::{
    Clock, ClockTicker, Controller, Input, InteractionState, PointerTarget, Update, format_clock,
};
use crate::model::{Session, TimelinePosition, ZoomLevel};
use crate::views::camera_rows::render_camera_rows;
use crate::views::cursor::render_cursor;
use crate::views::markers::{layout_markers, render_markers};
use crate::views::time_axis::{generate_ticks, render_time_axis};
use crate::views::toolbar::render_toolbar;
use crate::views::{FrameLayout, HitTarget, MarkerLayout, Tick};

/// A camera event timeline.
///
/// Hosts feed it input through [`handle`](Self::handle) and
/// [`pointer_down`](Self::pointer_down), drive the live clock with
/// [`poll_clock`](Self::poll_clock), and paint whatever
/// [`render`](Self::render) returns.
#[derive(Debug, Clone)]
pub struct Timeline {
    session: Session,
    config: TimelineConfig,
    controller: Controller,
    ticker: ClockTicker,
    viewport: Viewport,
    ticks: Vec<Tick>,
    markers: Vec<MarkerLayout>,
}

impl Timeline {
    pub fn new(session: Session, config: TimelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let controller = Controller::new(&config);
        let ticker = ClockTicker::new(config.clock_interval());
        let zoom = controller.zoom();
        let width = config.label_width * 7.0;
        let mut timeline = Self {
            ticks: generate_ticks(zoom),
            markers: layout_markers(&session, zoom),
            session,
            config,
            controller,
            ticker,
            viewport: Viewport::new(width, 0.0),
        };
        timeline.viewport.height = timeline.content_height();
        Ok(timeline)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.controller.zoom()
    }

    pub fn position(&self) -> TimelinePosition {
        self.controller.position()
    }

    pub fn state(&self) -> InteractionState {
        self.controller.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    pub fn displayed_time(&self) -> TimeOfDay {
        self.controller.displayed_time()
    }

    /// The displayed time as shown in the toolbar and cursor badge.
    pub fn displayed_time_text(&self) -> String {
        format_clock(self.displayed_time())
    }

    pub fn selected_camera(&self) -> Option<CameraId> {
        self.controller.selected_camera()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.controller.scroll_offset()
    }

    /// Axis ticks for the current zoom.
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Event badge placement for the current zoom.
    pub fn markers(&self) -> &[MarkerLayout] {
        &self.markers
    }

    pub fn ticker(&self) -> &ClockTicker {
        &self.ticker
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Height needed to show every camera row.
    pub fn content_height(&self) -> f64 {
        self.config.toolbar_height
            + self.config.header_height
            + self.session.len() as f64 * self.config.row_height
    }

    pub fn layout(&self) -> FrameLayout {
        FrameLayout::compute(&self.viewport, &self.config, self.session.len())
    }

    /// Place the widget on the host surface. Pointer coordinates are read
    /// relative to this viewport from now on.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Update {
        if viewport == self.viewport {
            return Update::default();
        }
        self.viewport = viewport;
        self.clamp_scroll().merge(Update {
            axis_changed: true,
            ..Update::default()
        })
    }

    /// Furthest the track can scroll before its end leaves the viewport.
    pub fn max_scroll(&self) -> f64 {
        let layout = self.layout();
        (layout.track_width(self.zoom()) - layout.rows.w).max(0.0)
    }

    /// Begin the live clock. The first refresh is due at once.
    pub fn start_clock(&mut self, now: Duration) {
        self.ticker.start(now);
    }

    /// Refresh the displayed time from `clock` when a tick is due.
    pub fn poll_clock(&mut self, now: Duration, clock: &impl Clock) -> Update {
        if !self.ticker.poll(now) {
            return Update::default();
        }
        self.handle(Input::ClockTick(clock.now()), now)
    }

    /// Apply one input. `now` is host monotonic time; it schedules the clock
    /// when a drag ends.
    pub fn handle(&mut self, input: Input, now: Duration) -> Update {
        let input = match input {
            Input::Scroll { offset } => Input::Scroll {
                offset: offset.min(self.max_scroll()),
            },
            other => other,
        };
        let track = self.layout().track_geometry(self.zoom());
        let mut update = self.controller.handle(input, &track);

        match update.transition {
            Some(InteractionState::Dragging) => self.ticker.suspend(),
            Some(InteractionState::Idle) => self.ticker.resume(now),
            None => {}
        }
        if update.axis_changed {
            let zoom = self.zoom();
            self.ticks = generate_ticks(zoom);
            self.markers = layout_markers(&self.session, zoom);
            update = update.merge(self.clamp_scroll());
        }
        update
    }

    /// Scroll the track by `delta` pixels.
    pub fn scroll_by(&mut self, delta: f64, now: Duration) -> Update {
        let offset = self.scroll_offset() + delta;
        self.handle(Input::Scroll { offset }, now)
    }

    /// Route a pointer press at `point` to whatever it landed on.
    pub fn pointer_down(&mut self, point: Point, now: Duration) -> Update {
        let input = match self.hit(point) {
            HitTarget::ZoomIn => Input::ZoomIn,
            HitTarget::ZoomOut => Input::ZoomOut,
            HitTarget::Track { camera } => Input::PointerDown {
                client_x: point.x,
                target: camera.map_or(PointerTarget::Track, PointerTarget::Row),
            },
            HitTarget::CameraLabel(id) => Input::PointerDown {
                client_x: point.x,
                target: PointerTarget::CameraLabel(id),
            },
            HitTarget::Nothing => return Update::default(),
        };
        self.handle(input, now)
    }

    pub fn hit(&self, point: Point) -> HitTarget {
        self.layout().hit(point, &self.session, &self.config)
    }

    /// Draw the whole widget into the current viewport.
    pub fn render(&self) -> Vec<RenderCommand> {
        let layout = self.layout();
        let zoom = self.zoom();
        let track_width = layout.track_width(zoom);
        let scroll = self.scroll_offset();
        let time_text = self.displayed_time_text();
        let config = &self.config;

        let mut commands = vec![
            RenderCommand::BeginGroup {
                id: "timeline".into(),
                label: Some("Camera timeline".into()),
            },
            RenderCommand::DrawRect {
                rect: Rect::new(
                    self.viewport.x,
                    self.viewport.y,
                    self.viewport.width,
                    layout.height(),
                ),
                color: ThemeToken::Background,
                border_color: Some(ThemeToken::Border),
                label: None,
                event_id: None,
            },
        ];
        commands.extend(render_toolbar(&layout, zoom, &time_text, config));
        commands.extend(render_camera_rows(
            &layout,
            &self.session,
            self.selected_camera(),
            config,
        ));
        commands.extend(render_time_axis(
            &self.ticks,
            layout.header,
            track_width,
            scroll,
        ));
        commands.extend(render_markers(
            &self.markers,
            layout.rows,
            config,
            track_width,
            scroll,
        ));
        commands.extend(render_cursor(
            &layout,
            self.position(),
            track_width,
            scroll,
            &time_text,
            config,
        ));
        commands.push(RenderCommand::EndGroup);
        commands
    }

    fn clamp_scroll(&mut self) -> Update {
        let max = self.max_scroll();
        if self.scroll_offset() <= max {
            return Update::default();
        }
        let track = self.layout().track_geometry(self.zoom());
        self.controller.handle(Input::Scroll { offset: max }, &track)
    }
}
