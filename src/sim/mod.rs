//! Gameplay simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - One tick per frame, time passed in explicitly
//! - RNG owned by the session
//! - Obstacles iterated in spawn order

pub mod obstacle;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use obstacle::Obstacle;
pub use player::Player;
pub use rect::Rect;
pub use state::{CrashCause, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, handle_input, tick};
