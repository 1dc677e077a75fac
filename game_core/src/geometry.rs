use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn min(&self) -> Vec2 {
        self.pos
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// True when the horizontal extents of the two rectangles touch
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.pos.x <= other.pos.x + other.size.x && self.pos.x + self.size.x >= other.pos.x
    }

    /// True when `outer` fully encloses this rectangle
    pub fn within(&self, outer: &Rect) -> bool {
        self.min().cmpge(outer.min()).all() && self.max().cmple(outer.max()).all()
    }
}

/// Clamp without panicking when the range is inverted; `min` wins.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Inclusive overlap on both axes (touching edges count)
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.pos.x <= b.pos.x + b.size.x
        && a.pos.x + a.size.x >= b.pos.x
        && a.pos.y <= b.pos.y + b.size.y
        && a.pos.y + a.size.y >= b.pos.y
}

/// Overlap that only counts while the ball travels against the paddle's
/// face normal. A ball already moving away from (or past) the paddle never
/// re-collides.
pub fn approach_contact(ball: &Rect, heading: Vec2, paddle: &Rect, face: Vec2) -> bool {
    heading.dot(face) < 0.0 && rects_overlap(ball, paddle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(4.0, 0.0, 10.0), 4.0);
        // Inverted range does not panic
        assert_eq!(clamp(4.0, 10.0, 0.0), 10.0);
    }

    #[test]
    fn test_rects_overlap_requires_both_axes() {
        let paddle = rect(150.0, 400.0, 18.0, 180.0);
        assert!(rects_overlap(&rect(160.0, 450.0, 18.0, 18.0), &paddle));
        // Same x band, above the paddle
        assert!(!rects_overlap(&rect(160.0, 300.0, 18.0, 18.0), &paddle));
        // Same y band, beside the paddle
        assert!(!rects_overlap(&rect(200.0, 450.0, 18.0, 18.0), &paddle));
    }

    #[test]
    fn test_rects_overlap_touching_edges() {
        let paddle = rect(150.0, 400.0, 18.0, 180.0);
        assert!(rects_overlap(&rect(168.0, 400.0, 18.0, 18.0), &paddle));
        assert!(!rects_overlap(&rect(168.1, 400.0, 18.0, 18.0), &paddle));
    }

    #[test]
    fn test_approach_contact_ignores_receding_ball() {
        let paddle = rect(150.0, 400.0, 18.0, 180.0);
        let ball = rect(160.0, 450.0, 18.0, 18.0);
        let face = Vec2::X; // left paddle faces the court on +x
        assert!(approach_contact(&ball, Vec2::NEG_X, &paddle, face));
        assert!(!approach_contact(&ball, Vec2::X, &paddle, face));
        assert!(!approach_contact(&ball, Vec2::ZERO, &paddle, face));
    }

    #[test]
    fn test_rect_within() {
        let court = rect(0.0, 0.0, 1400.0, 1000.0);
        assert!(rect(0.0, 820.0, 18.0, 180.0).within(&court));
        assert!(!rect(0.0, 821.0, 18.0, 180.0).within(&court));
    }

    #[test]
    fn test_overlaps_x() {
        let bottom = rect(610.0, 850.0, 180.0, 18.0);
        assert!(bottom.overlaps_x(&rect(592.0, 982.0, 18.0, 18.0)));
        assert!(bottom.overlaps_x(&rect(790.0, 982.0, 18.0, 18.0)));
        assert!(!bottom.overlaps_x(&rect(591.0, 982.0, 18.0, 18.0)));
        assert!(!bottom.overlaps_x(&rect(800.0, 982.0, 18.0, 18.0)));
    }
}
