//! Viewport and pointer geometry.

use swell_core::{CursorTracking, Dimensions, Point};

/// Size of the viewport in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    css_width: f64,
    css_height: f64,
    device_pixel_ratio: f64,
}

impl Viewport {
    /// Negative sizes collapse to zero; a missing or bogus ratio is 1.
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            css_width: sanitize(css_width),
            css_height: sanitize(css_height),
            device_pixel_ratio: ratio,
        }
    }

    /// Logical size the field animates in.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.css_width, self.css_height)
    }

    /// Canvas backing store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        let scale = |v: f64| (v * self.device_pixel_ratio).round() as u32;
        (scale(self.css_width), scale(self.css_height))
    }

    /// Context transform scale mapping CSS pixels to device pixels.
    pub fn scale(&self) -> f64 {
        self.device_pixel_ratio
    }
}

/// Translate a pointer position from client coordinates into the surface,
/// given the surface's top-left corner in client coordinates.
pub fn to_surface(client: Point, origin: Point) -> Point {
    Point::new(client.x - origin.x, client.y - origin.y)
}

/// Read the `data-cursor-tracking` attribute. Anything but `window` means
/// surface tracking.
pub fn parse_tracking(attribute: Option<&str>) -> CursorTracking {
    match attribute.map(str::trim) {
        Some(value) if value.eq_ignore_ascii_case("window") => CursorTracking::Window,
        _ => CursorTracking::Surface,
    }
}
