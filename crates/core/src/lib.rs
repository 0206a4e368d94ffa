//! Time-axis model, coordinate mapping and scrub interaction for a camera
//! event timeline. Hosts feed input in and paint the `RenderCommand`s that
//! come out.

pub mod config;
pub mod feed;
pub mod interaction;
pub mod mapping;
pub mod model;
pub mod svg;
pub mod timeline;
pub mod views;

pub use config::{ConfigError, TimelineConfig};
pub use feed::{DEMO_FEED, FeedError, parse_feed};
pub use interaction::{
    Clock, FixedClock, Input, InteractionState, PointerTarget, SystemClock, Update, format_clock,
};
pub use model::{Session, TimelinePosition, ZoomLevel};
pub use timeline::Timeline;
