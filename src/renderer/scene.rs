//! Backend-independent description of one rendered frame

use glam::Vec2;

use super::vertex::colors;
use crate::sim::{GameState, Rect};

/// RGBA, components in 0..=1 (sRGB)
pub type Color = [f32; 4];

/// Prompt shown over the frozen playfield after a crash
pub const GAME_OVER_PROMPT: &str = "Game Over! Press SPACE to restart";

/// Top-left of the score text, canvas units
pub const SCORE_POS: Vec2 = Vec2::new(10.0, 10.0);

/// A flat-colored rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledRect {
    pub rect: Rect,
    pub color: Color,
}

/// Where a text overlay is placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAnchor {
    TopLeft(Vec2),
    Center(Vec2),
}

/// What a text overlay shows (lets the web HUD route it to a DOM element)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Score,
    GameOverPrompt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub kind: OverlayKind,
    pub text: String,
    pub anchor: TextAnchor,
    pub color: Color,
}

/// Everything a backend needs to draw a frame, in draw order
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Logical canvas size
    pub size: Vec2,
    pub background: Color,
    pub rects: Vec<FilledRect>,
    pub texts: Vec<TextOverlay>,
}

impl Scene {
    /// Describe the current session: player, then each obstacle's two
    /// segments, then the score and (after a crash) the restart prompt
    pub fn from_state(state: &GameState) -> Self {
        let size = Vec2::new(state.tuning.screen_width, state.tuning.screen_height);

        let mut rects = Vec::with_capacity(1 + state.obstacles.len() * 2);
        rects.push(FilledRect {
            rect: state.player.rect,
            color: colors::PLAYER,
        });
        for obstacle in &state.obstacles {
            for segment in [obstacle.top, obstacle.bottom] {
                rects.push(FilledRect {
                    rect: segment,
                    color: colors::OBSTACLE,
                });
            }
        }

        let mut texts = vec![TextOverlay {
            kind: OverlayKind::Score,
            text: format!("Score: {}", state.score),
            anchor: TextAnchor::TopLeft(SCORE_POS),
            color: colors::TEXT,
        }];
        if state.is_over() {
            texts.push(TextOverlay {
                kind: OverlayKind::GameOverPrompt,
                text: GAME_OVER_PROMPT.to_string(),
                anchor: TextAnchor::Center(size / 2.0),
                color: colors::TEXT,
            });
        }

        Self {
            size,
            background: colors::BACKGROUND,
            rects,
            texts,
        }
    }

    pub fn text(&self, kind: OverlayKind) -> Option<&TextOverlay> {
        self.texts.iter().find(|t| t.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{CrashCause, Obstacle};
    use crate::tuning::Tuning;

    #[test]
    fn test_playing_scene() {
        let mut state = GameState::new(Tuning::default(), 1, 0);
        let tuning = state.tuning.clone();
        state.obstacles.push(Obstacle::with_gap(&tuning, 250.0, 300.0));
        state.score = 3;

        let scene = Scene::from_state(&state);
        assert_eq!(scene.size, Vec2::new(400.0, 600.0));
        assert_eq!(scene.background, colors::BACKGROUND);
        assert_eq!(scene.rects.len(), 3);
        assert_eq!(scene.rects[0].rect, state.player.rect);
        assert_eq!(scene.rects[0].color, colors::PLAYER);
        assert_eq!(scene.rects[1].rect, Rect::new(250.0, 0.0, 70.0, 200.0));
        assert_eq!(scene.rects[2].rect, Rect::new(250.0, 400.0, 70.0, 200.0));
        assert!(scene.rects[1..].iter().all(|r| r.color == colors::OBSTACLE));

        let score = scene.text(OverlayKind::Score).unwrap();
        assert_eq!(score.text, "Score: 3");
        assert_eq!(score.anchor, TextAnchor::TopLeft(Vec2::new(10.0, 10.0)));
        assert!(scene.text(OverlayKind::GameOverPrompt).is_none());
    }

    #[test]
    fn test_game_over_prompt_centered() {
        let mut state = GameState::new(Tuning::default(), 1, 0);
        state.crash(CrashCause::OutOfBounds);

        let scene = Scene::from_state(&state);
        let prompt = scene.text(OverlayKind::GameOverPrompt).unwrap();
        assert_eq!(prompt.text, GAME_OVER_PROMPT);
        assert_eq!(prompt.anchor, TextAnchor::Center(Vec2::new(200.0, 300.0)));
        // Playfield is still drawn underneath
        assert_eq!(scene.rects.len(), 1);
    }
}
