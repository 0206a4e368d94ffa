pub mod clock;
pub mod controller;

pub use clock::{Clock, ClockTicker, FixedClock, SystemClock, format_clock};
pub use controller::{Controller, Input, InteractionState, PointerTarget, Update};
