//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (clocks, fixed-step accumulation, frame pacing)
//! - Input events (keyboard → logical signals)

pub mod input;
pub mod time;

pub use input::{InputFrame, InputSignal};
pub use time::{Clock, FixedStep, ManualClock, SystemClock, seed_from_clock};

#[cfg(not(target_arch = "wasm32"))]
pub use input::KeyEdgeFilter;
#[cfg(not(target_arch = "wasm32"))]
pub use time::FramePacer;
