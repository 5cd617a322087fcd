//! Gameplay tuning
//!
//! Every constant the simulation reads lives in [`Tuning`]. Defaults match
//! the classic 400×600 layout; a JSON document may override any subset of
//! fields. Web builds read it from LocalStorage, native builds from a file.

use std::fmt;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning document is rejected
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// The tuning file could not be read
    Io(std::io::Error),
    /// A field holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "malformed tuning: {}", e),
            TuningError::Io(e) => write!(f, "cannot read tuning: {}", e),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning field `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Io(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Canvas ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Gameplay ticks per second
    pub fps: u32,

    // === Player ===
    pub gravity: f32,
    /// Velocity set by a jump (negative = upward)
    pub jump_velocity: f32,
    pub player_size: f32,

    // === Obstacles ===
    pub scroll_speed: f32,
    pub spawn_interval_ms: u64,
    pub gap_size: f32,
    pub obstacle_width: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: FPS,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            player_size: PLAYER_SIZE,

            scroll_speed: SCROLL_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            gap_size: GAP_SIZE,
            obstacle_width: OBSTACLE_WIDTH,
        }
    }
}

impl Tuning {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "floppy_bird_tuning";

    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the constants are consistent with the screen invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        if !(self.screen_width > 0.0) {
            return invalid("screen_width", "must be positive");
        }
        if !(self.screen_height > 0.0) {
            return invalid("screen_height", "must be positive");
        }
        if self.fps == 0 {
            return invalid("fps", "must be at least 1");
        }
        if !(self.player_size > 0.0) {
            return invalid("player_size", "must be positive");
        }
        if !(self.obstacle_width > 0.0) {
            return invalid("obstacle_width", "must be positive");
        }
        if !(self.scroll_speed > 0.0) {
            return invalid("scroll_speed", "must be positive");
        }
        if !(self.jump_velocity < 0.0) {
            return invalid("jump_velocity", "must be negative (upward)");
        }
        if !(self.gap_size > 0.0) {
            return invalid("gap_size", "must be positive");
        }
        // Gap centers are drawn from [gap, height - gap]
        if self.gap_size * 2.0 > self.screen_height {
            return invalid("gap_size", "must be at most half the screen height");
        }
        // Centers are whole pixels, so the range needs an integer in it
        if self.gap_size.ceil() > (self.screen_height - self.gap_size).floor() {
            return invalid("gap_size", "leaves no whole-pixel gap center");
        }
        if self.player_size >= self.gap_size {
            return invalid("player_size", "must be smaller than the gap");
        }
        Ok(())
    }

    /// Player spawn point: a third of the way across, vertically centered
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            (self.screen_width / 3.0).floor(),
            (self.screen_height / 2.0).floor(),
        )
    }

    /// Wall-clock budget of one frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Load tuning from a JSON file, or defaults when no path is given
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Result<Self, TuningError> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let tuning = Self::from_json(&json)?;
                log::info!("Loaded tuning from {}", path.display());
                Ok(tuning)
            }
            None => {
                log::info!("Using default tuning");
                Ok(Self::default())
            }
        }
    }
}
