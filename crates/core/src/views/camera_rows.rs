use camline_protocol::{CameraId, Icon, Point, Rect, RenderCommand, TextAlign, ThemeToken};

use crate::config::TimelineConfig;
use crate::model::Session;
use crate::views::layout::FrameLayout;

/// Render the camera name column and the row backgrounds behind the track.
///
/// The selected camera's label and track row are highlighted together.
pub fn render_camera_rows(
    layout: &FrameLayout,
    session: &Session,
    selected: Option<CameraId>,
    config: &TimelineConfig,
) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(session.len() * 6 + 2);

    commands.push(RenderCommand::DrawText {
        position: Point::new(
            layout.corner.x + config.char_width,
            layout.corner.y + layout.corner.h / 2.0,
        ),
        text: "Cameras".into(),
        color: ThemeToken::CameraLabelText,
        font_size: config.font_size,
        align: TextAlign::Left,
    });

    for (row, camera) in session.cameras().iter().enumerate() {
        let y = layout.labels.y + row as f64 * config.row_height;
        let is_selected = selected == Some(camera.id);
        let (label_color, row_color) = if is_selected {
            (ThemeToken::RowSelected, ThemeToken::RowSelected)
        } else {
            (ThemeToken::Background, ThemeToken::RowBackground)
        };

        commands.push(RenderCommand::BeginGroup {
            id: format!("camera-{}", camera.id),
            label: Some(camera.name.clone()),
        });

        if layout.labels.w > 0.0 {
            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(layout.labels.x, y, layout.labels.w, config.row_height),
                color: label_color,
                border_color: None,
                label: None,
                event_id: None,
            });
            let icon_x = layout.labels.x + config.char_width;
            let icon_y = y + (config.row_height - config.font_size).max(0.0) / 2.0;
            commands.push(RenderCommand::DrawIcon {
                position: Point::new(icon_x, icon_y),
                icon: Icon::Camera,
                color: ThemeToken::CameraLabelText,
                size: config.font_size,
            });
            commands.push(RenderCommand::DrawText {
                position: Point::new(
                    icon_x + config.font_size + config.char_width,
                    y + config.row_height / 2.0,
                ),
                text: camera.name.clone(),
                color: ThemeToken::CameraLabelText,
                font_size: config.font_size,
                align: TextAlign::Left,
            });
        }

        if layout.rows.w > 0.0 {
            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(layout.rows.x, y, layout.rows.w, config.row_height),
                color: row_color,
                border_color: Some(ThemeToken::Border),
                label: None,
                event_id: None,
            });
        }

        commands.push(RenderCommand::EndGroup);
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use camline_protocol::{Camera, Viewport};

    fn session() -> Session {
        let cameras = (1..=3)
            .map(|id| Camera {
                id,
                name: format!("Camera - {id:02}"),
            })
            .collect();
        Session::new(cameras, vec![]).unwrap()
    }

    #[test]
    fn one_group_per_camera_in_order() {
        let config = TimelineConfig::default();
        let s = session();
        let layout = FrameLayout::compute(&Viewport::new(1120.0, 300.0), &config, s.len());
        let cmds = render_camera_rows(&layout, &s, None, &config);
        let groups: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::BeginGroup { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(groups, vec!["camera-1", "camera-2", "camera-3"]);
    }

    #[test]
    fn selected_row_is_highlighted() {
        let config = TimelineConfig::default();
        let s = session();
        let layout = FrameLayout::compute(&Viewport::new(1120.0, 300.0), &config, s.len());
        let cmds = render_camera_rows(&layout, &s, Some(2), &config);
        let highlighted: Vec<Rect> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect {
                    rect,
                    color: ThemeToken::RowSelected,
                    ..
                } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(highlighted.len(), 2);
        assert!(highlighted.iter().all(|r| (r.y - (56.0 + 48.0)).abs() < f64::EPSILON));
    }
}
