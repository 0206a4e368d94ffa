pub mod commands;
pub mod feed;
pub mod theme;
pub mod time;
pub mod types;

pub use commands::{Icon, RenderCommand, TextAlign};
pub use feed::{Camera, CameraId, EventId, EventKind, EventPlacement, TimelineEvent};
pub use theme::ThemeToken;
pub use time::{TimeOfDay, TimeParseError};
pub use types::{Point, Rect, Viewport};
