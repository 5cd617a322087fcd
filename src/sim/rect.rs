//! Axis-aligned rectangle geometry for the player and obstacle segments
//!
//! Screen coordinates: origin at the top-left, x grows right, y grows down.
//! A rectangle spans `[x, x + w)` horizontally and `[y, y + h)` vertically.

use glam::Vec2;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// True when the overlap is non-empty on both axes.
    ///
    /// Rectangles that only share an edge do not intersect, and a
    /// zero-height rectangle never intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
            && self.size.x > 0.0
            && self.size.y > 0.0
            && other.size.x > 0.0
            && other.size.y > 0.0
    }

    /// Move the box so its left edge sits at `x`
    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.pos.x = x;
    }

    /// Move the box so its top edge sits at `y`
    #[inline]
    pub fn set_y(&mut self, y: f32) {
        self.pos.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn test_overlap_on_both_axes() {
        let player = Rect::new(133.0, 300.0, 30.0, 30.0);
        let segment = Rect::new(100.0, 0.0, 70.0, 350.0);
        assert!(player.intersects(&segment));
        assert!(segment.intersects(&player));
    }

    #[test]
    fn test_overlap_on_one_axis_only() {
        // Same columns, but the segment ends 50px above the player
        let player = Rect::new(133.0, 300.0, 30.0, 30.0);
        let segment = Rect::new(100.0, 0.0, 70.0, 250.0);
        assert!(!player.intersects(&segment));

        // Same rows, but far to the right
        let segment = Rect::new(300.0, 250.0, 70.0, 100.0);
        assert!(!player.intersects(&segment));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&below));
        assert!(!a.intersects(&right));
    }

    #[test]
    fn test_empty_rect_never_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let flat = Rect::new(2.0, 5.0, 5.0, 0.0);
        assert!(!a.intersects(&flat));
    }

    #[test]
    fn test_containment_intersects() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }
}
