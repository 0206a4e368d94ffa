use camline_protocol::{CameraId, Point, Rect, Viewport};

use crate::config::TimelineConfig;
use crate::mapping::TrackGeometry;
use crate::model::{Session, ZoomLevel};

/// Characters reserved for the "Zoom:" caption and each zoom button.
const CAPTION_CHARS: f64 = 6.0;
const BUTTON_CHARS: f64 = 3.0;
const LEVEL_CHARS: f64 = 5.0;

/// Regions of one timeline frame, in viewport coordinates.
///
/// ```text
/// ┌──────────────────────── toolbar ────────────────────────┐
/// │ Zoom: [−] 4x [+]                              clock     │
/// ├──── corner ────┬──────────── header (axis) ─────────────┤
/// ├──── labels ────┼──────────── rows (track) ──────────────┤
/// │ Camera - 01    │   ▣ badge        ▣ badge               │
/// │ Camera - 02    │          ▣ badge                       │
/// └────────────────┴────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    pub toolbar: Rect,
    pub zoom_out_button: Rect,
    pub zoom_in_button: Rect,
    pub corner: Rect,
    pub header: Rect,
    pub labels: Rect,
    pub rows: Rect,
}

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    ZoomIn,
    ZoomOut,
    /// Anywhere on the track. `camera` is the row under the pointer; `None`
    /// on the axis header.
    Track { camera: Option<CameraId> },
    CameraLabel(CameraId),
    Nothing,
}

impl FrameLayout {
    pub fn compute(viewport: &Viewport, config: &TimelineConfig, camera_count: usize) -> Self {
        let x = viewport.x;
        let y = viewport.y;
        let cw = config.char_width;
        let label_w = config.label_width.min(viewport.width.max(0.0));
        let track_w = (viewport.width - label_w).max(0.0);
        let header_y = y + config.toolbar_height;
        let rows_y = header_y + config.header_height;
        let rows_h = camera_count as f64 * config.row_height;

        let toolbar = Rect::new(x, y, viewport.width.max(0.0), config.toolbar_height);
        let zoom_out_button = Rect::new(
            x + cw + CAPTION_CHARS * cw,
            y,
            BUTTON_CHARS * cw,
            config.toolbar_height,
        );
        let zoom_in_button = Rect::new(
            zoom_out_button.right() + LEVEL_CHARS * cw,
            y,
            BUTTON_CHARS * cw,
            config.toolbar_height,
        );

        Self {
            toolbar,
            zoom_out_button,
            zoom_in_button,
            corner: Rect::new(x, header_y, label_w, config.header_height),
            header: Rect::new(x + label_w, header_y, track_w, config.header_height),
            labels: Rect::new(x, rows_y, label_w, rows_h),
            rows: Rect::new(x + label_w, rows_y, track_w, rows_h),
        }
    }

    /// Full track width at `zoom`.
    pub fn track_width(&self, zoom: ZoomLevel) -> f64 {
        zoom.track_width(self.rows.w)
    }

    /// Track placement for pointer mapping.
    pub fn track_geometry(&self, zoom: ZoomLevel) -> TrackGeometry {
        TrackGeometry::new(self.rows.x, self.track_width(zoom))
    }

    /// Total height the frame needs.
    pub fn height(&self) -> f64 {
        self.rows.bottom() - self.toolbar.y
    }

    pub fn hit(&self, point: Point, session: &Session, config: &TimelineConfig) -> HitTarget {
        if contains(&self.zoom_in_button, point) {
            return HitTarget::ZoomIn;
        }
        if contains(&self.zoom_out_button, point) {
            return HitTarget::ZoomOut;
        }
        if contains(&self.header, point) {
            return HitTarget::Track { camera: None };
        }
        if contains(&self.rows, point) {
            let camera = self.camera_at(point.y, session, config);
            return HitTarget::Track { camera };
        }
        if contains(&self.labels, point) {
            if let Some(id) = self.camera_at(point.y, session, config) {
                return HitTarget::CameraLabel(id);
            }
        }
        HitTarget::Nothing
    }

    fn camera_at(&self, y: f64, session: &Session, config: &TimelineConfig) -> Option<CameraId> {
        let row = ((y - self.rows.y) / config.row_height).floor() as usize;
        session.cameras().get(row).map(|camera| camera.id)
    }
}

fn contains(rect: &Rect, point: Point) -> bool {
    point.x >= rect.x && point.x < rect.right() && point.y >= rect.y && point.y < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camline_protocol::Camera;

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
    fn regions_stack_vertically() {
        let config = TimelineConfig::default();
        let layout = FrameLayout::compute(&Viewport::new(1120.0, 400.0), &config, 3);
        assert_eq!(layout.header.x, 160.0);
        assert_eq!(layout.header.w, 960.0);
        assert_eq!(layout.rows.y, 56.0);
        assert_eq!(layout.rows.h, 144.0);
        assert_eq!(layout.height(), 200.0);
        assert_eq!(layout.track_width(ZoomLevel::new(4)), 3840.0);
    }

    #[test]
    fn viewport_offset_moves_everything() {
        let config = TimelineConfig::default();
        let mut vp = Viewport::new(800.0, 300.0);
        vp.x = 40.0;
        vp.y = 10.0;
        let layout = FrameLayout::compute(&vp, &config, 1);
        assert_eq!(layout.track_geometry(ZoomLevel::MIN).origin_x, 200.0);
        assert_eq!(layout.toolbar.y, 10.0);
    }

    #[test]
    fn hit_testing() {
        let config = TimelineConfig::default();
        let s = session();
        let layout = FrameLayout::compute(&Viewport::new(1120.0, 400.0), &config, 3);

        let center = |r: Rect| Point::new(r.x + r.w / 2.0, r.y + r.h / 2.0);
        assert_eq!(layout.hit(center(layout.zoom_in_button), &s, &config), HitTarget::ZoomIn);
        assert_eq!(layout.hit(center(layout.zoom_out_button), &s, &config), HitTarget::ZoomOut);
        assert_eq!(
            layout.hit(Point::new(500.0, 40.0), &s, &config),
            HitTarget::Track { camera: None }
        );
        assert_eq!(
            layout.hit(Point::new(500.0, 150.0), &s, &config),
            HitTarget::Track { camera: Some(2) }
        );
        assert_eq!(
            layout.hit(Point::new(500.0, 56.0 + 2.0 * 48.0 + 1.0), &s, &config),
            HitTarget::Track { camera: Some(3) }
        );
        assert_eq!(
            layout.hit(Point::new(20.0, 56.0 + 48.0 + 5.0), &s, &config),
            HitTarget::CameraLabel(2)
        );
        assert_eq!(layout.hit(Point::new(20.0, 40.0), &s, &config), HitTarget::Nothing);
        assert_eq!(layout.hit(Point::new(500.0, 390.0), &s, &config), HitTarget::Nothing);
    }
}
