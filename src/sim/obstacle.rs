//! Scrolling gated obstacles

use rand::Rng;

use super::rect::Rect;
use crate::tuning::Tuning;

/// A pair of segments (top and bottom) with a vertical gap between them
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Left edge, decreasing every tick
    pub x: f32,
    /// Vertical center of the gap
    pub gap_center: f32,
    pub gap_size: f32,
    /// Segment from the screen top down to the gap
    pub top: Rect,
    /// Segment from the gap down to the screen bottom
    pub bottom: Rect,
    /// Whether the player has been credited for this obstacle
    pub passed: bool,
    scroll_speed: f32,
}

impl Obstacle {
    /// Spawn at the right edge with a random gap center in
    /// `[gap_size, screen_height - gap_size]`
    pub fn spawn<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        let min_center = tuning.gap_size.ceil() as i32;
        let max_center = ((tuning.screen_height - tuning.gap_size).floor() as i32).max(min_center);
        let gap_center = rng.random_range(min_center..=max_center) as f32;
        Self::with_gap(tuning, tuning.screen_width, gap_center)
    }

    /// Build an obstacle at `x` with the gap centered on `gap_center`
    pub fn with_gap(tuning: &Tuning, x: f32, gap_center: f32) -> Self {
        let half_gap = tuning.gap_size / 2.0;
        let top_height = gap_center - half_gap;
        let bottom_y = gap_center + half_gap;
        let bottom_height = tuning.screen_height - bottom_y;

        Self {
            x,
            gap_center,
            gap_size: tuning.gap_size,
            top: Rect::new(x, 0.0, tuning.obstacle_width, top_height),
            bottom: Rect::new(x, bottom_y, tuning.obstacle_width, bottom_height),
            passed: false,
            scroll_speed: tuning.scroll_speed,
        }
    }

    /// Scroll one tick to the left
    pub fn update(&mut self) {
        self.x -= self.scroll_speed;
        self.top.set_x(self.x);
        self.bottom.set_x(self.x);
    }

    /// True when either segment overlaps `rect`
    pub fn collides_with(&self, rect: &Rect) -> bool {
        rect.intersects(&self.top) || rect.intersects(&self.bottom)
    }

    /// True once the right edge has left the screen on the left
    pub fn is_off_screen(&self) -> bool {
        self.x < -self.top.width()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.top.width()
    }
}
