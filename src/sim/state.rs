//! Session state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::obstacle::Obstacle;
use super::player::Player;
use crate::Millis;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; only a reset leaves this phase
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    /// Player box overlapped an obstacle segment
    Obstacle,
    /// Player left the vertical screen range
    OutOfBounds,
}

/// Things that happened during a tick, drained by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    ObstacleSpawned,
    /// Score after the increment
    Scored(u32),
    ObstacleDespawned,
    Crashed { cause: CrashCause, score: u32 },
    Restarted,
}

/// One play session: the player, the obstacle queue and the score.
///
/// Obstacles are kept in spawn order, which is also left-to-right order.
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// RNG seed this session started from
    pub seed: u64,
    rng: Pcg32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    /// Obstacles passed this run
    pub score: u32,
    pub phase: GamePhase,
    /// Clock time of the last obstacle spawn (session start initially)
    pub last_spawn_ms: Millis,
    /// Events recorded since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session started at `now_ms`
    pub fn new(tuning: Tuning, seed: u64, now_ms: Millis) -> Self {
        Self {
            player: Player::new(&tuning),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            obstacles: Vec::new(),
            score: 0,
            phase: GamePhase::Playing,
            last_spawn_ms: now_ms,
            events: Vec::new(),
        }
    }

    /// Build the session that replaces this one after a reset.
    ///
    /// The new session keeps the tuning and continues this session's RNG
    /// stream so consecutive runs see different gaps.
    pub fn restarted(&self, now_ms: Millis) -> Self {
        let mut next = Self::new(self.tuning.clone(), self.seed, now_ms);
        next.rng = self.rng.clone();
        next.events.push(GameEvent::Restarted);
        next
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Append a new obstacle at the right edge
    pub fn spawn_obstacle(&mut self, now_ms: Millis) {
        let obstacle = Obstacle::spawn(&self.tuning, &mut self.rng);
        self.obstacles.push(obstacle);
        self.last_spawn_ms = now_ms;
        self.events.push(GameEvent::ObstacleSpawned);
    }

    /// End the run (no-op when already over)
    pub fn crash(&mut self, cause: CrashCause) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::Crashed {
            cause,
            score: self.score,
        });
    }

    /// Take all events recorded so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(Tuning::default(), 42, 1_000);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.last_spawn_ms, 1_000);
        assert_eq!(state.player.y(), 300.0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_crash_is_sticky_and_logged_once() {
        let mut state = GameState::new(Tuning::default(), 42, 0);
        state.crash(CrashCause::OutOfBounds);
        state.crash(CrashCause::Obstacle);
        assert!(state.is_over());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Crashed {
                cause: CrashCause::OutOfBounds,
                score: 0
            }]
        );
    }

    #[test]
    fn test_restarted_is_fresh() {
        let mut state = GameState::new(Tuning::default(), 42, 0);
        state.spawn_obstacle(2_500);
        state.score = 5;
        state.player.set_y(-40.0);
        state.player.velocity = 9.0;
        state.crash(CrashCause::OutOfBounds);

        let fresh = state.restarted(10_000);
        assert_eq!(fresh.phase, GamePhase::Playing);
        assert_eq!(fresh.score, 0);
        assert!(fresh.obstacles.is_empty());
        assert_eq!(fresh.last_spawn_ms, 10_000);
        assert_eq!(fresh.player.pos, state.tuning.player_start());
        assert_eq!(fresh.player.velocity, 0.0);
        assert_eq!(fresh.events, vec![GameEvent::Restarted]);
        // The old value is untouched
        assert!(state.is_over());
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_spawn_appends_in_order() {
        let mut state = GameState::new(Tuning::default(), 9, 0);
        state.spawn_obstacle(2_001);
        state.obstacles[0].x = 200.0;
        state.spawn_obstacle(4_002);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[0].x, 200.0);
        assert_eq!(state.obstacles[1].x, 400.0);
        assert_eq!(state.last_spawn_ms, 4_002);
    }
}
