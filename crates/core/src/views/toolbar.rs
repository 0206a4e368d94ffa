use camline_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::config::TimelineConfig;
use crate::model::ZoomLevel;
use crate::views::layout::FrameLayout;

const ZOOM_HINT: &str = "Ctrl+scroll to zoom";

/// Render the zoom controls and the live clock readout.
pub fn render_toolbar(
    layout: &FrameLayout,
    zoom: ZoomLevel,
    clock_text: &str,
    config: &TimelineConfig,
) -> Vec<RenderCommand> {
    let bar = layout.toolbar;
    if bar.w <= 0.0 {
        return Vec::new();
    }
    let text_y = bar.y + bar.h / 2.0;
    let cw = config.char_width;

    let text = |x: f64, s: &str, color: ThemeToken, align: TextAlign| RenderCommand::DrawText {
        position: Point::new(x, text_y),
        text: s.to_string(),
        color,
        font_size: config.font_size,
        align,
    };

    let mut commands = vec![
        RenderCommand::BeginGroup {
            id: "toolbar".into(),
            label: Some("Zoom".into()),
        },
        RenderCommand::DrawRect {
            rect: bar,
            color: ThemeToken::Background,
            border_color: None,
            label: None,
            event_id: None,
        },
        text(bar.x + cw, "Zoom:", ThemeToken::ToolbarText, TextAlign::Left),
    ];

    commands.extend(button(layout.zoom_out_button, "−", zoom.can_zoom_out(), config));
    let level_x = (layout.zoom_out_button.right() + layout.zoom_in_button.x) / 2.0;
    commands.push(text(
        level_x,
        &zoom.to_string(),
        ThemeToken::ToolbarText,
        TextAlign::Center,
    ));
    commands.extend(button(layout.zoom_in_button, "+", zoom.can_zoom_in(), config));

    // The hint is dropped when it would run into the clock.
    let hint_x = layout.zoom_in_button.right() + 2.0 * cw;
    let clock_w = clock_text.chars().count() as f64 * cw;
    let hint_w = ZOOM_HINT.chars().count() as f64 * cw;
    if hint_x + hint_w + clock_w + 2.0 * cw <= bar.right() {
        commands.push(text(hint_x, ZOOM_HINT, ThemeToken::ToolbarMuted, TextAlign::Left));
    }
    commands.push(text(
        bar.right() - cw,
        clock_text,
        ThemeToken::ToolbarText,
        TextAlign::Right,
    ));

    commands.push(RenderCommand::EndGroup);
    commands
}

fn button(rect: Rect, glyph: &str, enabled: bool, config: &TimelineConfig) -> [RenderCommand; 2] {
    [
        RenderCommand::DrawRect {
            rect,
            color: if enabled {
                ThemeToken::ButtonBackground
            } else {
                ThemeToken::ButtonDisabled
            },
            border_color: None,
            label: None,
            event_id: None,
        },
        RenderCommand::DrawText {
            position: Point::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0),
            text: glyph.to_string(),
            color: if enabled {
                ThemeToken::ToolbarText
            } else {
                ThemeToken::ToolbarMuted
            },
            font_size: config.font_size,
            align: TextAlign::Center,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use camline_protocol::Viewport;

    fn texts(cmds: &[RenderCommand]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn shows_level_and_clock() {
        let config = TimelineConfig::default();
        let layout = FrameLayout::compute(&Viewport::new(1120.0, 300.0), &config, 3);
        let cmds = render_toolbar(&layout, ZoomLevel::new(4), "01:34:37 am", &config);
        let t = texts(&cmds);
        assert!(t.contains(&"4x"));
        assert!(t.contains(&"01:34:37 am"));
        assert!(t.contains(&ZOOM_HINT));
    }

    #[test]
    fn disables_buttons_at_bounds() {
        let config = TimelineConfig::default();
        let layout = FrameLayout::compute(&Viewport::new(1120.0, 300.0), &config, 3);
        let cmds = render_toolbar(&layout, ZoomLevel::MAX, "", &config);
        let colors: Vec<ThemeToken> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect { rect, color, .. } if rect.w < layout.toolbar.w => {
                    Some(*color)
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            colors,
            vec![ThemeToken::ButtonBackground, ThemeToken::ButtonDisabled]
        );
    }

    #[test]
    fn narrow_toolbar_drops_hint() {
        let config = TimelineConfig::default();
        let layout = FrameLayout::compute(&Viewport::new(200.0, 300.0), &config, 1);
        let cmds = render_toolbar(&layout, ZoomLevel::MIN, "12:00:00 pm", &config);
        assert!(!texts(&cmds).contains(&ZOOM_HINT));
    }
}
