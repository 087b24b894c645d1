use crate::Vec2;

/// Axis-aligned rectangle in pixel space, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Vec2<f32>,
    pub size: Vec2<f32>,
}

impl Rect {
    pub fn new(origin: Vec2<f32>, size: Vec2<f32>) -> Self {
        Self { origin, size }
    }

    /// Build from a center point and a size, as detection heads report boxes.
    pub fn from_center(center: Vec2<f32>, size: Vec2<f32>) -> Self {
        Self::new(center - size / 2.0, size)
    }

    pub fn max(&self) -> Vec2<f32> {
        self.origin + self.size
    }

    pub fn area(&self) -> f32 {
        self.size.x.max(0.0) * self.size.y.max(0.0)
    }

    /// Overlapping region, `None` when the rectangles do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min_x = self.origin.x.max(other.origin.x);
        let min_y = self.origin.y.max(other.origin.y);
        let max_x = self.max().x.min(other.max().x);
        let max_y = self.max().y.min(other.max().y);
        if max_x <= min_x || max_y <= min_y {
            return None;
        }
        Some(Rect::new(
            Vec2::new(min_x, min_y),
            Vec2::new(max_x - min_x, max_y - min_y),
        ))
    }

    /// Intersection over union; 0.0 for disjoint or degenerate boxes.
    pub fn iou(&self, other: &Rect) -> f32 {
        let inter = self.intersection(other).map_or(0.0, |r| r.area());
        let union = self.area() + other.area() - inter;
        if union <= 0.0 { 0.0 } else { inter / union }
    }
}
