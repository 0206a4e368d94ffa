use camline_protocol::time::MINUTES_PER_DAY;
use camline_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};
use serde::{Deserialize, Serialize};

use crate::mapping::{percent_to_track_x, track_x_to_viewport_x};
use crate::model::ZoomLevel;

/// Tick heights as a fraction of the axis header height.
const HOUR_TICK: f64 = 0.375;
const QUARTER_TICK: f64 = 0.25;
const FIVE_MINUTE_TICK: f64 = 0.1875;
const PLAIN_TICK: f64 = 0.125;
/// Vertical center of tick labels, below the tallest tick.
const LABEL_CENTER: f64 = 0.7;
const FONT_SIZE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickKind {
    Hour,
    QuarterHour,
    FiveMinute,
    Plain,
}

impl TickKind {
    /// Classify a minute within the hour. Checked in precedence order, so the
    /// classes never overlap.
    pub fn classify(minute_in_hour: u32) -> Self {
        if minute_in_hour == 0 {
            Self::Hour
        } else if minute_in_hour % 15 == 0 {
            Self::QuarterHour
        } else if minute_in_hour % 5 == 0 {
            Self::FiveMinute
        } else {
            Self::Plain
        }
    }

    fn height_fraction(self) -> f64 {
        match self {
            Self::Hour => HOUR_TICK,
            Self::QuarterHour => QUARTER_TICK,
            Self::FiveMinute => FIVE_MINUTE_TICK,
            Self::Plain => PLAIN_TICK,
        }
    }
}

/// One mark on the 24-hour axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Offset along the full track, `[0, 100)`.
    pub position_percent: f64,
    pub hour: u32,
    pub minute: u32,
    pub kind: TickKind,
    pub label: Option<String>,
    /// Ticks sitting exactly on a track edge are kept for time math but not drawn.
    pub visible: bool,
}

/// Generate the evenly spaced ticks covering a whole day at `zoom`.
pub fn generate_ticks(zoom: ZoomLevel) -> Vec<Tick> {
    let total = 24 * zoom.marks_per_hour();
    let total_f = f64::from(total);

    (0..total)
        .map(|i| {
            let i = f64::from(i);
            let position_percent = i * 100.0 / total_f;
            let minute_of_day = i * f64::from(MINUTES_PER_DAY) / total_f;
            let hour = (minute_of_day / 60.0).floor() as u32 % 24;
            let minute = minute_of_day.floor() as u32 % 60;
            let kind = TickKind::classify(minute);

            Tick {
                position_percent,
                hour,
                minute,
                kind,
                label: label_for(kind, hour, minute, zoom),
                visible: position_percent != 0.0 && position_percent != 100.0,
            }
        })
        .collect()
}

fn label_for(kind: TickKind, hour: u32, minute: u32, zoom: ZoomLevel) -> Option<String> {
    let show = match kind {
        TickKind::Hour => true,
        TickKind::QuarterHour => zoom.get() >= 2,
        TickKind::FiveMinute => zoom.get() >= 8,
        TickKind::Plain => false,
    };
    show.then(|| format!("{hour:02}:{minute:02}"))
}

/// Render the axis header: background, tick marks, and labels.
///
/// `area` is the header region in viewport coordinates; ticks are placed on a
/// track `track_width` pixels wide scrolled by `scroll_offset`, and culled
/// when they fall outside `area`.
pub fn render_time_axis(
    ticks: &[Tick],
    area: Rect,
    track_width: f64,
    scroll_offset: f64,
) -> Vec<RenderCommand> {
    if area.w <= 0.0 || area.h <= 0.0 || track_width <= 0.0 {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(ticks.len() * 2 + 4);
    commands.push(RenderCommand::BeginGroup {
        id: "time-axis".into(),
        label: Some("Time Axis".into()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: area,
        color: ThemeToken::Background,
        border_color: None,
        label: None,
        event_id: None,
    });

    for tick in ticks.iter().filter(|t| t.visible) {
        let x = area.x
            + track_x_to_viewport_x(
                percent_to_track_x(tick.position_percent, track_width),
                scroll_offset,
            );
        if !area.contains_x(x) {
            continue;
        }

        let tick_height = area.h * tick.kind.height_fraction();
        let color = match tick.kind {
            TickKind::Hour | TickKind::QuarterHour => ThemeToken::TickMajor,
            TickKind::FiveMinute | TickKind::Plain => ThemeToken::TickMinor,
        };
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, area.y),
            to: Point::new(x, area.y + tick_height),
            color,
            width: 1.0,
        });

        if let Some(label) = &tick.label {
            commands.push(RenderCommand::DrawText {
                position: Point::new(x, area.y + area.h * LABEL_CENTER),
                text: label.clone(),
                color: ThemeToken::TickLabel,
                font_size: FONT_SIZE,
                align: TextAlign::Center,
            });
        }
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
