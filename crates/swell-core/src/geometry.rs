//! Surface-space geometry.

/// A point in surface coordinates (logical pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Size of a drawing surface in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Surface area, or zero for degenerate sizes.
    pub fn area(self) -> f64 {
        let area = self.width * self.height;
        if area.is_finite() && area > 0.0 {
            area
        } else {
            0.0
        }
    }

    /// Whether a point lies on or inside the surface bounds.
    pub fn contains(self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}
