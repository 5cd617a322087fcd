//! Floppy Bird - a single-screen side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Gameplay simulation (player, obstacles, session state machine)
//! - `renderer`: Scene description plus WebGPU and terminal backends
//! - `platform`: Clock, frame pacing and input mapping
//! - `tuning`: Data-driven gameplay constants
//! - `game`: Session driver shared by the web and terminal frontends

pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Canvas dimensions in logical pixels
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Frame rate of the gameplay loop
    pub const FPS: u32 = 60;
    /// Maximum substeps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Downward acceleration, pixels/tick²
    pub const GRAVITY: f32 = 0.5;
    /// Jump impulse (negative = upward), pixels/tick
    pub const JUMP_VELOCITY: f32 = -10.0;
    /// Player box edge length
    pub const PLAYER_SIZE: f32 = 30.0;

    /// Obstacle scroll speed, pixels/tick
    pub const SCROLL_SPEED: f32 = 3.0;
    /// Wall-clock time between obstacle spawns
    pub const SPAWN_INTERVAL_MS: u64 = 2000;
    /// Vertical opening of each obstacle
    pub const GAP_SIZE: f32 = 200.0;
    /// Obstacle segment width
    pub const OBSTACLE_WIDTH: f32 = 70.0;
}

/// Milliseconds on the frame clock
pub type Millis = u64;
