//! Per-frame simulation step
//!
//! One call to [`tick`] handles the frame's input and then, while playing,
//! advances the player, spawns, scrolls, scores and prunes obstacles.

use super::state::{CrashCause, GameEvent, GameState};
use crate::Millis;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Action button pressed this frame (jump, or restart after game over)
    pub action: bool,
}

/// Advance the session by one frame at clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: Millis) {
    handle_input(state, input, now_ms);

    if state.is_over() {
        return;
    }

    state.player.update();

    // Spawn pacing is wall-clock based so it holds at any frame rate
    if now_ms.saturating_sub(state.last_spawn_ms) > state.tuning.spawn_interval_ms {
        state.spawn_obstacle(now_ms);
    }

    let hit = update_obstacles(state);
    if hit {
        state.crash(CrashCause::Obstacle);
    }

    let y = state.player.y();
    if y < 0.0 || y > state.tuning.screen_height {
        state.crash(CrashCause::OutOfBounds);
    }
}

/// Apply the action button: restart a finished run, otherwise jump
pub fn handle_input(state: &mut GameState, input: &TickInput, now_ms: Millis) {
    if !input.action {
        return;
    }

    if state.is_over() {
        log::info!("Restarting after score {}", state.score);
        *state = state.restarted(now_ms);
    } else {
        state.player.jump();
        state.events.push(GameEvent::Jumped);
    }
}

/// Scroll every obstacle in spawn order, credit passes and drop the ones
/// that left the screen. Returns true when the player hit a segment.
///
/// Every obstacle is visited exactly once; pruning happens after the pass.
fn update_obstacles(state: &mut GameState) -> bool {
    let GameState {
        player,
        obstacles,
        score,
        events,
        ..
    } = state;

    let mut hit = false;
    for obstacle in obstacles.iter_mut() {
        obstacle.update();

        if obstacle.collides_with(&player.rect) {
            hit = true;
        }

        if !obstacle.passed && obstacle.x < player.x() {
            obstacle.passed = true;
            *score += 1;
            events.push(GameEvent::Scored(*score));
        }
    }

    let before = obstacles.len();
    obstacles.retain(|o| !o.is_off_screen());
    for _ in obstacles.len()..before {
        events.push(GameEvent::ObstacleDespawned);
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::Obstacle;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const JUMP: TickInput = TickInput { action: true };
    const IDLE: TickInput = TickInput { action: false };

    fn new_state() -> GameState {
        GameState::new(Tuning::default(), 12345, 0)
    }

    /// Obstacle whose gap spans 200..400, which contains the start height
    fn open_obstacle(tuning: &Tuning, x: f32) -> Obstacle {
        Obstacle::with_gap(tuning, x, 300.0)
    }

    #[test]
    fn test_tick_applies_gravity() {
        let mut state = new_state();
        tick(&mut state, &IDLE, 16);
        assert_eq!(state.player.velocity, 0.5);
        assert_eq!(state.player.y(), 300.5);
    }

    #[test]
    fn test_action_jumps_while_playing() {
        let mut state = new_state();
        tick(&mut state, &JUMP, 16);
        // Jump sets -10, then gravity adds 0.5 in the same frame
        assert_eq!(state.player.velocity, -9.5);
        assert_eq!(state.player.y(), 290.5);
        assert!(state.drain_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut state = new_state();
        tick(&mut state, &IDLE, 2_000);
        assert!(state.obstacles.is_empty(), "interval must be exceeded, not met");

        tick(&mut state, &IDLE, 2_001);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.last_spawn_ms, 2_001);
        // Spawned then scrolled in the same frame
        assert_eq!(state.obstacles[0].x, 397.0);

        tick(&mut state, &IDLE, 3_000);
        assert_eq!(state.obstacles.len(), 1);
        tick(&mut state, &IDLE, 4_002);
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_collision_with_top_segment_ends_game() {
        let mut state = new_state();
        let tuning = state.tuning.clone();
        // Gap 350..550: top segment spans y 0..350 and covers the player.
        // It stays right of x=133 after scrolling, so nothing is scored.
        state.obstacles.push(Obstacle::with_gap(&tuning, 140.0, 450.0));
        tick(&mut state, &IDLE, 16);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::Crashed {
            cause: CrashCause::Obstacle,
            score: 0
        }));
    }

    #[test]
    fn test_no_collision_inside_gap() {
        let mut state = new_state();
        let tuning = state.tuning.clone();
        state.obstacles.push(open_obstacle(&tuning, 136.0));
        tick(&mut state, &IDLE, 16);
        assert_eq!(state.obstacles[0].x, 133.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_leaving_top_of_screen_ends_game() {
        let mut state = new_state();
        state.player.set_y(-1.0);
        state.player.velocity = -0.5;
        tick(&mut state, &IDLE, 16);
        assert!(state.player.y() < 0.0);
        assert!(state.is_over());
        assert!(state.drain_events().contains(&GameEvent::Crashed {
            cause: CrashCause::OutOfBounds,
            score: 0
        }));
    }

    #[test]
    fn test_falling_below_screen_ends_game() {
        let mut state = new_state();
        let mut frames = 0;
        while !state.is_over() {
            frames += 1;
            tick(&mut state, &IDLE, frames * 16);
            assert!(frames < 1_000, "player never fell out");
        }
        assert!(state.player.y() > state.tuning.screen_height);
    }

    #[test]
    fn test_score_once_per_obstacle() {
        let mut state = new_state();
        let tuning = state.tuning.clone();
        // One step away from crossing x=133
        state.obstacles.push(open_obstacle(&tuning, 135.0));

        tick(&mut state, &JUMP, 16);
        assert_eq!(state.obstacles[0].x, 132.0);
        assert!(state.obstacles[0].passed);
        assert_eq!(state.score, 1);

        tick(&mut state, &IDLE, 32);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_score_not_awarded_at_equal_x() {
        let mut state = new_state();
        let tuning = state.tuning.clone();
        state.obstacles.push(open_obstacle(&tuning, 136.0));
        tick(&mut state, &IDLE, 16);
        assert_eq!(state.obstacles[0].x, 133.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_scoring_still_happens_on_crash_frame() {
        let mut state = new_state();
        let tuning = state.tuning.clone();
        // Passing obstacle plus one that covers the player
        state.obstacles.push(open_obstacle(&tuning, 135.0));
        state.obstacles.push(Obstacle::with_gap(&tuning, 120.0, 450.0));
        tick(&mut state, &IDLE, 16);
        assert!(state.is_over());
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_offscreen_obstacle_removed_without_skipping_neighbors() {
        let mut state = new_state();
        let tuning = state.tuning.clone();
        state.obstacles.push(open_obstacle(&tuning, -69.0)); // -72 after scroll: removed
        state.obstacles.push(open_obstacle(&tuning, -68.0)); // -71: removed
        state.obstacles.push(open_obstacle(&tuning, -60.0)); // -63: kept
        state.obstacles.push(open_obstacle(&tuning, 300.0)); // 297: kept

        tick(&mut state, &IDLE, 16);

        let xs: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![-63.0, 297.0]);
        // Every obstacle scrolled exactly once and the left ones scored
        assert_eq!(state.score, 3);
        let despawned = state
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::ObstacleDespawned)
            .count();
        assert_eq!(despawned, 2);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = new_state();
        state.player.set_y(-5.0);
        tick(&mut state, &IDLE, 16);
        assert!(state.is_over());

        let y = state.player.y();
        for i in 0..10 {
            tick(&mut state, &IDLE, 5_000 + i * 16);
        }
        assert!(state.is_over());
        assert_eq!(state.player.y(), y);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_action_after_game_over_resets() {
        let mut state = new_state();
        let tuning = state.tuning.clone();
        state.obstacles.push(open_obstacle(&tuning, 300.0));
        state.score = 4;
        state.player.set_y(-5.0);
        tick(&mut state, &IDLE, 16);
        assert!(state.is_over());

        tick(&mut state, &JUMP, 9_000);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.last_spawn_ms, 9_000);
        // Fresh player, advanced by the frame's gravity only (no jump on reset)
        assert_eq!(state.player.velocity, 0.5);
        assert_eq!(state.player.y(), 300.5);
        assert!(state.drain_events().contains(&GameEvent::Restarted));
    }

    proptest! {
        #[test]
        fn prop_player_x_fixed_and_score_monotonic(
            seed in any::<u64>(),
            jumps in proptest::collection::vec(any::<bool>(), 1..600),
        ) {
            let mut state = GameState::new(Tuning::default(), seed, 0);
            let start_x = state.player.x();
            let mut last_score = 0;

            for (i, jump) in jumps.into_iter().enumerate() {
                let was_over = state.is_over();
                // Never press while over so the run is never reset
                let input = TickInput { action: jump && !was_over };
                tick(&mut state, &input, (i as u64 + 1) * 17);

                prop_assert_eq!(state.player.x(), start_x);
                prop_assert!(state.score >= last_score);
                prop_assert!(state.score <= last_score + 1);
                if was_over {
                    prop_assert!(state.is_over());
                }
                for obstacle in &state.obstacles {
                    prop_assert!(!obstacle.is_off_screen());
                    prop_assert_eq!(obstacle.passed, obstacle.x < start_x);
                }
                last_score = state.score;
            }
        }
    }
}
