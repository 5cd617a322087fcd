//! Clocks and frame pacing

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

use std::cell::Cell;

use crate::Millis;

/// Source of elapsed time for spawn pacing
pub trait Clock {
    /// Milliseconds since the clock was created
    fn now_ms(&self) -> Millis;
}

/// Monotonic wall clock (`Instant` natively, `performance.now()` on the web)
#[derive(Debug, Clone)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    start: Instant,
    #[cfg(target_arch = "wasm32")]
    start: f64,
}

impl SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        Self {
            start: Self::browser_now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn browser_now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> Millis {
        self.start.elapsed().as_millis() as Millis
    }

    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> Millis {
        (Self::browser_now() - self.start).max(0.0) as Millis
    }
}

/// Hand-driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start_ms: Millis) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: Millis) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// Fixed-timestep accumulator.
///
/// Turns variable frame deltas (e.g. from `requestAnimationFrame`) into a
/// whole number of gameplay ticks, capped to avoid a spiral of death.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step_ms: f64,
    accumulator: f64,
    max_substeps: u32,
}

impl FixedStep {
    pub fn new(fps: u32, max_substeps: u32) -> Self {
        Self {
            step_ms: 1000.0 / fps.max(1) as f64,
            accumulator: 0.0,
            max_substeps,
        }
    }

    /// Add `dt_ms` of real time and return how many ticks to run now
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        // Clamp long stalls (tab in background) to a few frames
        let dt_ms = dt_ms.clamp(0.0, self.step_ms * self.max_substeps as f64);
        self.accumulator += dt_ms;

        let mut steps = 0;
        while self.accumulator >= self.step_ms && steps < self.max_substeps {
            self.accumulator -= self.step_ms;
            steps += 1;
        }
        steps
    }
}

/// Blocks the loop once per frame to hold a constant frame rate
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FramePacer {
    frame: Duration,
    frame_start: Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl FramePacer {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            frame_start: Instant::now(),
        }
    }

    /// Sleep out the rest of the current frame and start the next one
    pub fn pace(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

/// RNG seed taken from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// RNG seed taken from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn seed_from_clock() -> u64 {
    js_sys::Date::now() as u64
}
