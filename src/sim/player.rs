//! The player character

use glam::Vec2;

use super::rect::Rect;
use crate::tuning::Tuning;

/// The falling/jumping player.
///
/// Horizontal position is fixed at creation; only `pos.y` and `velocity`
/// change afterwards.
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left of the bounding box
    pub pos: Vec2,
    /// Vertical velocity, pixels/tick (positive = downward)
    pub velocity: f32,
    /// Collision box, kept in sync with `pos`
    pub rect: Rect,
    gravity: f32,
    jump_velocity: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let pos = tuning.player_start();
        Self {
            pos,
            velocity: 0.0,
            rect: Rect::new(pos.x, pos.y, tuning.player_size, tuning.player_size),
            gravity: tuning.gravity,
            jump_velocity: tuning.jump_velocity,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Overwrite the velocity with the upward jump impulse
    pub fn jump(&mut self) {
        self.velocity = self.jump_velocity;
    }

    /// Apply one tick of gravity and move
    pub fn update(&mut self) {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;
        self.rect.set_y(self.pos.y);
    }

    /// Place the player at a given height (box follows)
    pub fn set_y(&mut self, y: f32) {
        self.pos.y = y;
        self.rect.set_y(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let player = Player::new(&Tuning::default());
        assert_eq!(player.pos, Vec2::new(133.0, 300.0));
        assert_eq!(player.velocity, 0.0);
        assert_eq!(player.rect, Rect::new(133.0, 300.0, 30.0, 30.0));
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut player = Player::new(&Tuning::default());
        player.update();
        assert_eq!(player.velocity, 0.5);
        assert_eq!(player.y(), 300.5);
        player.update();
        assert_eq!(player.velocity, 1.0);
        assert_eq!(player.y(), 301.5);
        assert_eq!(player.rect.top(), 301.5);
    }

    #[test]
    fn test_jump_overwrites_velocity() {
        let mut player = Player::new(&Tuning::default());
        player.velocity = 7.5;
        player.jump();
        assert_eq!(player.velocity, -10.0);

        // Jumping again does not stack
        player.jump();
        assert_eq!(player.velocity, -10.0);

        player.update();
        assert_eq!(player.velocity, -9.5);
        assert_eq!(player.y(), 290.5);
    }

    #[test]
    fn test_x_never_moves() {
        let mut player = Player::new(&Tuning::default());
        for i in 0..100 {
            if i % 7 == 0 {
                player.jump();
            }
            player.update();
            assert_eq!(player.x(), 133.0);
            assert_eq!(player.rect.left(), 133.0);
        }
    }
}
