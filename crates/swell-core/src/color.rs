//! Translucent particle colors.

use std::fmt;

/// An 8-bit RGB color with a floating point alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Create a color, clamping alpha into `0.0..=1.0`.
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Composite this color over an opaque backdrop, dropping alpha.
    ///
    /// Used by hosts that cannot blend on their own (terminal cells).
    pub fn over(self, backdrop: (u8, u8, u8)) -> (u8, u8, u8) {
        let mix = |fg: u8, bg: u8| {
            let v = fg as f32 * self.a + bg as f32 * (1.0 - self.a);
            v.round().clamp(0.0, 255.0) as u8
        };
        (
            mix(self.r, backdrop.0),
            mix(self.g, backdrop.1),
            mix(self.b, backdrop.2),
        )
    }

    /// CSS `rgba()` notation for canvas stroke and fill styles.
    pub fn to_css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Rgba::new(1, 2, 3, 1.5).a, 1.0);
        assert_eq!(Rgba::new(1, 2, 3, -0.2).a, 0.0);
    }

    #[test]
    fn test_css_notation() {
        assert_eq!(Rgba::new(255, 0, 64, 0.5).to_css(), "rgba(255, 0, 64, 0.5)");
        assert_eq!(Rgba::opaque(1, 2, 3).to_css(), "rgba(1, 2, 3, 1)");
    }

    #[test]
    fn test_over_black() {
        let half = Rgba::new(200, 100, 50, 0.5);
        assert_eq!(half.over((0, 0, 0)), (100, 50, 25));
        assert_eq!(Rgba::opaque(9, 8, 7).over((255, 255, 255)), (9, 8, 7));
    }
}
