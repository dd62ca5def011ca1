//! Pointer position as seen by the field.

use crate::geometry::{Dimensions, Point};

/// Where hosts listen for pointer movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorTracking {
    /// Only movement over the surface itself; leaving it clears the cursor.
    #[default]
    Surface,
    /// Movement anywhere in the window; positions outside the surface
    /// clear the cursor.
    Window,
}

/// Last known pointer position in surface coordinates, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cursor(Option<Point>);

impl Cursor {
    /// A cursor with no known position.
    pub const fn absent() -> Self {
        Self(None)
    }

    pub const fn at(point: Point) -> Self {
        Self(Some(point))
    }

    pub fn position(&self) -> Option<Point> {
        self.0
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// Record a pointer move. Positions outside `bounds` clear the cursor.
    pub fn track(&mut self, point: Point, bounds: Dimensions) {
        self.0 = bounds.contains(point).then_some(point);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Distance from `point` to the cursor; infinite when absent.
    pub fn distance_to(&self, point: Point) -> f64 {
        self.0.map_or(f64::INFINITY, |cursor| cursor.distance(point))
    }
}
