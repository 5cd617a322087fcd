//! Frontend-independent game driver: one session plus the clock it runs on

use crate::platform::{Clock, InputFrame};
use crate::renderer::Scene;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// What the frontend loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Game<C: Clock> {
    clock: C,
    state: GameState,
}

impl<C: Clock> Game<C> {
    pub fn new(tuning: Tuning, seed: u64, clock: C) -> Self {
        let state = GameState::new(tuning, seed, clock.now_ms());
        log::info!("Session started (seed {})", seed);
        Self { clock, state }
    }

    /// Run one gameplay frame with the input collected since the last one
    pub fn frame(&mut self, input: InputFrame) -> Flow {
        if input.quit {
            log::info!("Quit requested at score {}", self.state.score);
            return Flow::Quit;
        }

        let now = self.clock.now_ms();
        tick(
            &mut self.state,
            &TickInput {
                action: input.action,
            },
            now,
        );

        for event in self.state.drain_events() {
            match event {
                GameEvent::Jumped => log::debug!("Jump at y={}", self.state.player.y()),
                GameEvent::ObstacleSpawned => {
                    if let Some(obstacle) = self.state.obstacles.last() {
                        log::debug!(
                            "Spawned obstacle with gap at y={} (t={}ms)",
                            obstacle.gap_center,
                            now
                        );
                    }
                }
                GameEvent::Scored(score) => log::debug!("Score: {}", score),
                GameEvent::ObstacleDespawned => log::debug!("Obstacle left the screen"),
                GameEvent::Crashed { cause, score } => {
                    log::info!("Game over ({:?}) with score {}", cause, score)
                }
                GameEvent::Restarted => log::debug!("Fresh session in place"),
            }
        }

        Flow::Continue
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scene(&self) -> Scene {
        Scene::from_state(&self.state)
    }
}
