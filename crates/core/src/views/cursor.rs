use camline_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::config::TimelineConfig;
use crate::mapping::{percent_to_track_x, track_x_to_viewport_x};
use crate::model::TimelinePosition;
use crate::views::layout::FrameLayout;

const LINE_WIDTH: f64 = 2.0;

/// Render the scrub cursor: a line through the header and every row, topped by
/// a badge showing the displayed time.
///
/// Nothing is drawn while the cursor is scrolled out of view.
pub fn render_cursor(
    layout: &FrameLayout,
    position: TimelinePosition,
    track_width: f64,
    scroll_offset: f64,
    time_text: &str,
    config: &TimelineConfig,
) -> Vec<RenderCommand> {
    let track = Rect::new(
        layout.header.x,
        layout.header.y,
        layout.header.w,
        layout.rows.bottom() - layout.header.y,
    );
    let x = track.x
        + track_x_to_viewport_x(
            percent_to_track_x(position.percent(), track_width),
            scroll_offset,
        );
    if track.w <= 0.0 || !track.contains_x(x) {
        return Vec::new();
    }

    let badge_w = (time_text.chars().count() as f64 + 2.0) * config.char_width;
    let badge_h = (layout.header.h / 2.0).max(1.0);

    vec![
        RenderCommand::BeginGroup {
            id: "cursor".into(),
            label: Some("Scrub cursor".into()),
        },
        RenderCommand::SetClip { rect: track },
        RenderCommand::DrawLine {
            from: Point::new(x, track.y),
            to: Point::new(x, track.bottom()),
            color: ThemeToken::CursorLine,
            width: LINE_WIDTH,
        },
        RenderCommand::DrawRect {
            rect: Rect::new(x - badge_w / 2.0, track.y, badge_w, badge_h),
            color: ThemeToken::CursorBadge,
            border_color: None,
            label: None,
            event_id: None,
        },
        RenderCommand::DrawText {
            position: Point::new(x, track.y + badge_h / 2.0),
            text: time_text.to_string(),
            color: ThemeToken::CursorBadgeText,
            font_size: config.font_size,
            align: TextAlign::Center,
        },
        RenderCommand::ClearClip,
        RenderCommand::EndGroup,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use camline_protocol::Viewport;

    fn line_x(cmds: &[RenderCommand]) -> Option<f64> {
        cmds.iter().find_map(|c| match c {
            RenderCommand::DrawLine { from, .. } => Some(from.x),
            _ => None,
        })
    }

    #[test]
    fn cursor_spans_header_and_rows() {
        let config = TimelineConfig::default();
        let layout = FrameLayout::compute(&Viewport::new(1160.0, 300.0), &config, 3);
        let cmds = render_cursor(
            &layout,
            TimelinePosition::new(50.0),
            1000.0,
            0.0,
            "12:00:00 pm",
            &config,
        );
        assert_eq!(line_x(&cmds), Some(660.0));
        let Some(RenderCommand::DrawLine { from, to, .. }) = cmds
            .iter()
            .find(|c| matches!(c, RenderCommand::DrawLine { .. }))
        else {
            panic!("cursor line missing");
        };
        assert_eq!(from.y, 24.0);
        assert_eq!(to.y, 200.0);
    }

    #[test]
    fn zoom_moves_cursor_pixels_not_percent() {
        let config = TimelineConfig::default();
        let layout = FrameLayout::compute(&Viewport::new(1160.0, 300.0), &config, 1);
        let pos = TimelinePosition::new(10.0);
        let at_1x = line_x(&render_cursor(&layout, pos, 1000.0, 0.0, "", &config));
        let at_4x = line_x(&render_cursor(&layout, pos, 4000.0, 0.0, "", &config));
        assert_eq!(at_1x, Some(260.0));
        assert_eq!(at_4x, Some(560.0));
    }

    #[test]
    fn scrolled_out_cursor_is_hidden() {
        let config = TimelineConfig::default();
        let layout = FrameLayout::compute(&Viewport::new(1160.0, 300.0), &config, 1);
        let cmds = render_cursor(
            &layout,
            TimelinePosition::new(5.0),
            4000.0,
            2000.0,
            "",
            &config,
        );
        assert!(cmds.is_empty());
    }
}
