pub mod camera_rows;
pub mod cursor;
pub mod layout;
pub mod markers;
pub mod time_axis;
pub mod toolbar;

pub use layout::{FrameLayout, HitTarget};
pub use markers::{MarkerLayout, PlacementMode};
pub use time_axis::{Tick, TickKind};
