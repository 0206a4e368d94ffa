pub mod position;
pub mod session;
pub mod zoom;

pub use position::TimelinePosition;
pub use session::Session;
pub use zoom::ZoomLevel;
