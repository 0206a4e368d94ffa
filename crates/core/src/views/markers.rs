use camline_protocol::{
    CameraId, EventId, EventKind, EventPlacement, Icon, Point, Rect, RenderCommand, TextAlign,
    ThemeToken, TimelineEvent,
};
use serde::{Deserialize, Serialize};

use crate::config::TimelineConfig;
use crate::mapping::{percent_to_track_x, time_of_day_to_percent, track_x_to_viewport_x};
use crate::model::position::clamp_percent;
use crate::model::{Session, ZoomLevel};

/// Badge height as a fraction of the row height.
const BADGE_HEIGHT: f64 = 0.4;
/// Badge top offset as a fraction of the row height.
const BADGE_TOP: f64 = 0.2;

/// How a marker's offset was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementMode {
    /// From the event time through the coordinate mapper; follows zoom.
    Timestamp,
    /// A stored percentage used verbatim; does not follow zoom.
    Literal,
}

/// Where and how to draw one event badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLayout {
    pub event_id: EventId,
    pub camera_id: CameraId,
    pub row: usize,
    pub kind: EventKind,
    pub position_percent: f64,
    pub mode: PlacementMode,
    pub name: String,
    /// Event time, drawn after the name in a muted color.
    pub time_text: Option<String>,
    pub has_overflow: bool,
    /// Draw order; later markers paint over earlier ones at the same spot.
    pub z_index: usize,
}

impl MarkerLayout {
    /// Name and time as one string, for tooltips and accessibility labels.
    pub fn text(&self) -> String {
        match &self.time_text {
            Some(time) => format!("{} {time}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Offset of an event along the full track at `zoom`.
pub fn marker_percent(event: &TimelineEvent, zoom: ZoomLevel) -> (f64, PlacementMode) {
    match event.placement {
        EventPlacement::Timestamp(t) => {
            (time_of_day_to_percent(t, zoom), PlacementMode::Timestamp)
        }
        EventPlacement::LiteralPercent(p) => (clamp_percent(p), PlacementMode::Literal),
    }
}

/// Lay out every event on its camera's row. Events keep feed order; nothing is
/// merged or stacked.
pub fn layout_markers(session: &Session, zoom: ZoomLevel) -> Vec<MarkerLayout> {
    session
        .events()
        .iter()
        .filter_map(|event| {
            let row = session.row_of(event.camera_id)?;
            let (position_percent, mode) = marker_percent(event, zoom);
            Some((event, row, position_percent, mode))
        })
        .enumerate()
        .map(|(z_index, (event, row, position_percent, mode))| MarkerLayout {
            event_id: event.id,
            camera_id: event.camera_id,
            row,
            kind: event.kind,
            position_percent,
            mode,
            name: event.badge_name().to_string(),
            time_text: event.badge_time(),
            has_overflow: event.has_overflow,
            z_index,
        })
        .collect()
}

/// Render event badges over the camera rows.
///
/// `rows_area` is the track region below the axis header, in viewport
/// coordinates. Badges are centered on their offset and clipped to the area.
pub fn render_markers(
    markers: &[MarkerLayout],
    rows_area: Rect,
    config: &TimelineConfig,
    track_width: f64,
    scroll_offset: f64,
) -> Vec<RenderCommand> {
    if markers.is_empty() || rows_area.w <= 0.0 || track_width <= 0.0 {
        return Vec::new();
    }

    let mut ordered: Vec<&MarkerLayout> = markers.iter().collect();
    ordered.sort_by_key(|m| m.z_index);

    let icon_size = config.font_size;
    let badge_h = (config.row_height * BADGE_HEIGHT).max(1.0);
    let padding = config.char_width;

    let mut commands = Vec::with_capacity(markers.len() * 4 + 4);
    commands.push(RenderCommand::BeginGroup {
        id: "markers".into(),
        label: Some("Events".into()),
    });
    commands.push(RenderCommand::SetClip { rect: rows_area });

    for marker in ordered {
        let center_x = rows_area.x
            + track_x_to_viewport_x(
                percent_to_track_x(marker.position_percent, track_width),
                scroll_offset,
            );

        let icon = marker.kind.icon();
        let name_chars = marker.name.chars().count();
        let time_chars = marker.time_text.as_ref().map_or(0, |t| t.chars().count() + 1);
        let text_w = (name_chars + time_chars) as f64 * config.char_width;
        let mut badge_w = text_w + padding * 2.0;
        if icon.is_some() {
            badge_w += icon_size + padding / 2.0;
        }
        if marker.has_overflow {
            badge_w += icon_size + padding / 2.0;
        }

        let left = center_x - badge_w / 2.0;
        if left + badge_w < rows_area.x || left > rows_area.right() {
            continue;
        }

        let top = rows_area.y
            + marker.row as f64 * config.row_height
            + config.row_height * BADGE_TOP;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(left, top, badge_w, badge_h),
            color: marker.kind.theme_token(),
            border_color: None,
            label: Some(marker.text()),
            event_id: Some(marker.event_id),
        });

        let mut cursor_x = left + padding;
        if let Some(icon) = icon {
            commands.push(RenderCommand::DrawIcon {
                position: Point::new(cursor_x, top + (badge_h - icon_size).max(0.0) / 2.0),
                icon,
                color: ThemeToken::EventText,
                size: icon_size,
            });
            cursor_x += icon_size + padding / 2.0;
        }

        let text_y = top + badge_h / 2.0;
        commands.push(RenderCommand::DrawText {
            position: Point::new(cursor_x, text_y),
            text: marker.name.clone(),
            color: ThemeToken::EventText,
            font_size: config.font_size,
            align: TextAlign::Left,
        });
        if let Some(time) = &marker.time_text {
            let time_x = cursor_x + (name_chars + 1) as f64 * config.char_width;
            commands.push(RenderCommand::DrawText {
                position: Point::new(time_x, text_y),
                text: time.clone(),
                color: ThemeToken::EventTimeText,
                font_size: config.font_size,
                align: TextAlign::Left,
            });
        }
        cursor_x += text_w + padding / 2.0;

        if marker.has_overflow {
            commands.push(RenderCommand::DrawIcon {
                position: Point::new(cursor_x, top + (badge_h - icon_size).max(0.0) / 2.0),
                icon: Icon::Overflow,
                color: ThemeToken::EventText,
                size: icon_size,
            });
        }
    }

    commands.push(RenderCommand::ClearClip);
    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use camline_protocol::{Camera, TimeOfDay};

    fn event(id: u32, camera_id: u32, placement: EventPlacement) -> TimelineEvent {
        TimelineEvent {
            id,
            camera_id,
            kind: EventKind::FaceRecognised,
            placement,
            label: None,
            show_time: false,
            has_overflow: false,
        }
    }

    fn at(h: u32, m: u32) -> EventPlacement {
        EventPlacement::Timestamp(TimeOfDay::from_hms(h, m, 0).unwrap())
    }

    fn session(events: Vec<TimelineEvent>) -> Session {
        let cameras = vec![
            Camera {
                id: 1,
                name: "Camera - 01".into(),
            },
            Camera {
                id: 2,
                name: "Camera - 02".into(),
            },
        ];
        Session::new(cameras, events).unwrap()
    }

    #[test]
    fn timestamp_markers_follow_zoom() {
        let s = session(vec![event(1, 1, at(3, 0))]);
        let at_1x = layout_markers(&s, ZoomLevel::new(1));
        let at_4x = layout_markers(&s, ZoomLevel::new(4));
        assert!((at_1x[0].position_percent - 12.5).abs() < 1e-9);
        assert!((at_4x[0].position_percent - 50.0).abs() < 1e-9);
        assert_eq!(at_1x[0].mode, PlacementMode::Timestamp);
    }

    #[test]
    fn literal_markers_ignore_zoom() {
        let s = session(vec![event(1, 2, EventPlacement::LiteralPercent(37.5))]);
        for level in [1, 4, 16] {
            let layout = layout_markers(&s, ZoomLevel::new(level));
            assert!((layout[0].position_percent - 37.5).abs() < f64::EPSILON);
            assert_eq!(layout[0].mode, PlacementMode::Literal);
            assert_eq!(layout[0].row, 1);
        }
    }

    #[test]
    fn literal_percent_is_clamped() {
        let s = session(vec![event(1, 1, EventPlacement::LiteralPercent(140.0))]);
        assert_eq!(layout_markers(&s, ZoomLevel::MIN)[0].position_percent, 100.0);
    }

    #[test]
    fn overlapping_markers_keep_list_order() {
        let s = session(vec![event(7, 1, at(12, 0)), event(3, 1, at(12, 0))]);
        let layout = layout_markers(&s, ZoomLevel::MIN);
        assert_eq!(layout[0].event_id, 7);
        assert_eq!(layout[1].event_id, 3);
        assert!(layout[1].z_index > layout[0].z_index);

        let config = TimelineConfig::default();
        let area = Rect::new(160.0, 56.0, 960.0, 96.0);
        let cmds = render_markers(&layout, area, &config, 960.0, 0.0);
        let drawn: Vec<EventId> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect { event_id, .. } => *event_id,
                _ => None,
            })
            .collect();
        assert_eq!(drawn, vec![7, 3]);
    }

    #[test]
    fn badge_centers_on_event_time() {
        let s = session(vec![event(1, 1, at(12, 0))]);
        let layout = layout_markers(&s, ZoomLevel::MIN);
        let config = TimelineConfig::default();
        let area = Rect::new(100.0, 0.0, 1000.0, 96.0);
        let cmds = render_markers(&layout, area, &config, 1000.0, 0.0);
        let Some(RenderCommand::DrawRect { rect, .. }) = cmds
            .iter()
            .find(|c| matches!(c, RenderCommand::DrawRect { .. }))
        else {
            panic!("badge rect missing");
        };
        let center = rect.x + rect.w / 2.0;
        assert!((center - 600.0).abs() < 1e-9, "center={center}");
    }

    #[test]
    fn overflow_adds_indicator() {
        let mut e = event(1, 1, at(22, 30));
        e.kind = EventKind::MultipleEvents;
        e.has_overflow = true;
        let s = session(vec![e]);
        let layout = layout_markers(&s, ZoomLevel::MIN);
        let cmds = render_markers(
            &layout,
            Rect::new(0.0, 0.0, 800.0, 96.0),
            &TimelineConfig::default(),
            800.0,
            0.0,
        );
        let icons: Vec<Icon> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawIcon { icon, .. } => Some(*icon),
                _ => None,
            })
            .collect();
        assert_eq!(icons, vec![Icon::Overflow]);
    }

    #[test]
    fn scrolled_out_markers_are_culled() {
        let s = session(vec![event(1, 1, at(1, 0)), event(2, 1, at(23, 0))]);
        let layout = layout_markers(&s, ZoomLevel::MIN);
        // 4x-wide track scrolled to its last quarter.
        let cmds = render_markers(
            &layout,
            Rect::new(0.0, 0.0, 500.0, 96.0),
            &TimelineConfig::default(),
            2000.0,
            1500.0,
        );
        let drawn = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawRect { .. }))
            .count();
        assert_eq!(drawn, 1);
    }

    #[test]
    fn shown_time_is_a_separate_muted_span() {
        let mut e = event(1, 1, at(14, 45));
        e.show_time = true;
        let s = session(vec![e, event(2, 2, at(9, 0))]);
        let layout = layout_markers(&s, ZoomLevel::MIN);
        assert_eq!(layout[0].name, "Face Recognised");
        assert_eq!(layout[0].time_text.as_deref(), Some("14:45"));
        assert_eq!(layout[0].text(), "Face Recognised 14:45");
        assert_eq!(layout[1].time_text, None);

        let config = TimelineConfig::default();
        let cmds = render_markers(&layout, Rect::new(0.0, 0.0, 960.0, 96.0), &config, 960.0, 0.0);
        let texts: Vec<(&str, ThemeToken, f64)> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText {
                    text,
                    color,
                    position,
                    ..
                } => Some((text.as_str(), *color, position.x)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[0].0, "Face Recognised");
        assert_eq!(texts[0].1, ThemeToken::EventText);
        assert_eq!(texts[1].0, "14:45");
        assert_eq!(texts[1].1, ThemeToken::EventTimeText);
        // One character of space after the name.
        let gap = texts[1].2 - texts[0].2;
        assert!((gap - 16.0 * config.char_width).abs() < 1e-9, "gap={gap}");
        assert_eq!(texts[2].1, ThemeToken::EventText);
    }

    #[test]
    fn no_markers_renders_nothing() {
        let cmds = render_markers(
            &[],
            Rect::new(0.0, 0.0, 800.0, 96.0),
            &TimelineConfig::default(),
            800.0,
            0.0,
        );
        assert!(cmds.is_empty());
    }
}
