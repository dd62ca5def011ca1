//! A single drifting circle.

use rand::Rng;
use swell_core::{Cursor, Dimensions, FieldTuning, Point, Rgba};

use crate::surface::Surface;

/// State for a single circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Center x position.
    pub x: f64,
    /// Center y position.
    pub y: f64,
    /// Current radius, never below `original_radius`.
    r: f64,
    /// Radius at spawn time.
    original_radius: f64,
    /// Horizontal velocity in pixels per frame.
    pub dx: f64,
    /// Vertical velocity in pixels per frame.
    pub dy: f64,
    /// Stroke and fill color.
    color: Rgba,
    /// Whether the cursor was in range on the last update.
    highlighted: bool,
}

impl Particle {
    /// Create a particle at rest radius `radius`.
    pub fn new(x: f64, y: f64, radius: f64, dx: f64, dy: f64, color: Rgba) -> Self {
        Self {
            x,
            y,
            r: radius,
            original_radius: radius,
            dx,
            dy,
            color,
            highlighted: false,
        }
    }

    /// Spawn a particle with random size, placement, velocity and color,
    /// fully inside `bounds`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Dimensions, tuning: &FieldTuning) -> Self {
        let radius = rng
            .gen_range(tuning.min_radius..=tuning.max_radius)
            .round()
            .clamp(tuning.min_radius, tuning.max_radius);
        let x = place(rng, bounds.width, radius);
        let y = place(rng, bounds.height, radius);
        let dx = velocity(rng, tuning);
        let dy = velocity(rng, tuning);
        let color = Rgba::new(
            rng.r#gen(),
            rng.r#gen(),
            rng.r#gen(),
            rng.gen_range(tuning.min_alpha..=1.0),
        );
        Self::new(x, y, radius, dx, dy, color)
    }

    pub fn radius(&self) -> f64 {
        self.r
    }

    pub fn original_radius(&self) -> f64 {
        self.original_radius
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Advance one frame: move, bounce off the edges, react to the cursor.
    pub fn update(&mut self, bounds: Dimensions, cursor: &Cursor, tuning: &FieldTuning) {
        self.advance();
        self.reflect(bounds);
        self.respond_to_cursor(cursor, tuning);
    }

    /// Move by one frame of velocity.
    pub fn advance(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }

    /// Point each velocity component away from any edge the circle touches.
    pub fn reflect(&mut self, bounds: Dimensions) {
        self.dx = reflect_axis(self.x, self.r, self.dx, bounds.width);
        self.dy = reflect_axis(self.y, self.r, self.dy, bounds.height);
    }

    /// Grow toward the cap while the cursor is close, otherwise shrink back
    /// to the original radius.
    pub fn respond_to_cursor(&mut self, cursor: &Cursor, tuning: &FieldTuning) {
        let distance = cursor.distance_to(self.center());

        if distance < tuning.proximity_radius {
            // Holds at the cap while the cursor stays in range
            if self.r < tuning.radius_cap {
                self.r = (self.r + tuning.growth_step).min(tuning.radius_cap);
            }
            self.highlighted = true;
        } else if self.r > self.original_radius {
            self.r = (self.r - tuning.growth_step).max(self.original_radius);
            self.highlighted = false;
        } else {
            self.highlighted = false;
        }
    }

    /// Outline the circle, filling it only while highlighted.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.stroke_circle(self.x, self.y, self.r, self.color);
        if self.highlighted {
            surface.fill_circle(self.x, self.y, self.r, self.color);
        }
    }
}

/// New velocity component after checking both edges of one axis.
fn reflect_axis(position: f64, radius: f64, velocity: f64, extent: f64) -> f64 {
    if position + radius >= extent {
        -velocity.abs()
    } else if position - radius <= 0.0 {
        velocity.abs()
    } else {
        velocity
    }
}

/// Random center on one axis keeping the circle inside `[0, extent]`.
fn place<R: Rng + ?Sized>(rng: &mut R, extent: f64, radius: f64) -> f64 {
    if extent > radius * 2.0 {
        rng.gen_range(radius..=extent - radius)
    } else {
        extent / 2.0
    }
}

/// Random nonzero velocity component.
fn velocity<R: Rng + ?Sized>(rng: &mut R, tuning: &FieldTuning) -> f64 {
    let magnitude = rng.gen_range(tuning.min_speed..=tuning.max_speed);
    if rng.gen_bool(0.5) { magnitude } else { -magnitude }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::surface::{CommandBuffer, DrawCommand};

    fn particle(x: f64, y: f64, r: f64, dx: f64, dy: f64) -> Particle {
        Particle::new(x, y, r, dx, dy, Rgba::new(10, 20, 30, 0.75))
    }

    #[test]
    fn test_advance() {
        let mut p = particle(50.0, 50.0, 10.0, 1.5, -2.0);
        p.advance();
        assert_eq!((p.x, p.y), (51.5, 48.0));
    }

    #[test]
    fn test_reflect_far_edges() {
        let bounds = Dimensions::new(100.0, 100.0);
        let mut p = particle(95.0, 95.0, 10.0, 2.0, 1.0);
        p.reflect(bounds);
        assert_eq!((p.dx, p.dy), (-2.0, -1.0));

        // Already heading away: sign stays negative, magnitude unchanged
        p.reflect(bounds);
        assert_eq!((p.dx, p.dy), (-2.0, -1.0));
    }

    #[test]
    fn test_reflect_near_edges() {
        let bounds = Dimensions::new(100.0, 100.0);
        let mut p = particle(10.0, 5.0, 10.0, -1.25, -0.5);
        p.reflect(bounds);
        assert_eq!((p.dx, p.dy), (1.25, 0.5));
    }

    #[test]
    fn test_reflect_axes_are_independent() {
        let bounds = Dimensions::new(100.0, 100.0);
        let mut p = particle(95.0, 50.0, 10.0, 2.0, -1.0);
        p.reflect(bounds);
        assert_eq!((p.dx, p.dy), (-2.0, -1.0));
    }

    #[test]
    fn test_interior_velocity_untouched() {
        let bounds = Dimensions::new(100.0, 100.0);
        let mut p = particle(50.0, 50.0, 10.0, -2.0, 3.0);
        p.reflect(bounds);
        assert_eq!((p.dx, p.dy), (-2.0, 3.0));
    }

    #[test]
    fn test_update_bounces_off_right_wall() {
        let bounds = Dimensions::new(100.0, 100.0);
        let mut p = particle(88.5, 50.0, 10.0, 2.0, 0.5);
        p.update(bounds, &Cursor::absent(), &FieldTuning::default());
        assert_eq!(p.x, 90.5);
        assert_eq!(p.dx, -2.0);
        assert_eq!(p.dy, 0.5);
    }

    #[test]
    fn test_grows_when_cursor_close() {
        let tuning = FieldTuning::default();
        let mut p = particle(50.0, 50.0, 10.0, 0.0, 0.0);
        let cursor = Cursor::at(Point::new(50.0, 149.0));

        p.respond_to_cursor(&cursor, &tuning);
        assert_eq!(p.radius(), 11.0);
        assert!(p.is_highlighted());
    }

    #[test]
    fn test_boundary_distance_does_not_grow() {
        let tuning = FieldTuning::default();
        let mut p = particle(50.0, 50.0, 10.0, 0.0, 0.0);
        let cursor = Cursor::at(Point::new(50.0, 150.0));

        p.respond_to_cursor(&cursor, &tuning);
        assert_eq!(p.radius(), 10.0);
        assert!(!p.is_highlighted());
    }

    #[test]
    fn test_grows_to_cap_then_holds() {
        let tuning = FieldTuning::default();
        let mut p = particle(500.0, 500.0, 10.0, 0.0, 0.0);
        let cursor = Cursor::at(p.center());

        for tick in 1..=190 {
            p.respond_to_cursor(&cursor, &tuning);
            assert_eq!(p.radius(), 10.0 + tick as f64);
            assert!(p.is_highlighted());
        }
        for _ in 0..20 {
            p.respond_to_cursor(&cursor, &tuning);
            assert_eq!(p.radius(), 200.0);
            assert!(p.is_highlighted());
        }
    }

    #[test]
    fn test_shrinks_back_without_cursor() {
        let tuning = FieldTuning::default();
        let mut p = particle(50.0, 50.0, 10.0, 0.0, 0.0);
        let near = Cursor::at(p.center());
        for _ in 0..5 {
            p.respond_to_cursor(&near, &tuning);
        }
        assert_eq!(p.radius(), 15.0);

        let away = Cursor::absent();
        for expected in (10..15).rev() {
            p.respond_to_cursor(&away, &tuning);
            assert_eq!(p.radius(), expected as f64);
            assert!(!p.is_highlighted());
        }
        for _ in 0..10 {
            p.respond_to_cursor(&away, &tuning);
            assert_eq!(p.radius(), 10.0);
        }
    }

    #[test]
    fn test_shrink_never_undershoots() {
        let tuning = FieldTuning {
            growth_step: 4.0,
            ..Default::default()
        };
        let mut p = particle(50.0, 50.0, 10.0, 0.0, 0.0);
        p.respond_to_cursor(&Cursor::at(p.center()), &tuning);
        assert_eq!(p.radius(), 14.0);
        p.respond_to_cursor(&Cursor::absent(), &tuning);
        p.respond_to_cursor(&Cursor::absent(), &tuning);
        assert_eq!(p.radius(), 10.0);
    }

    #[test]
    fn test_draw_fills_only_when_highlighted() {
        let mut buffer = CommandBuffer::new(Dimensions::new(100.0, 100.0));
        let mut p = particle(50.0, 50.0, 10.0, 0.0, 0.0);

        p.draw(&mut buffer);
        assert_eq!(buffer.strokes().count(), 1);
        assert_eq!(buffer.fills().count(), 0);

        p.respond_to_cursor(&Cursor::at(p.center()), &FieldTuning::default());
        p.draw(&mut buffer);
        assert_eq!(buffer.strokes().count(), 2);
        let fill = buffer.fills().next().unwrap();
        assert_eq!(fill.radius, 11.0);
        assert_eq!(fill.color, p.color());
        assert!(matches!(buffer.commands().last(), Some(DrawCommand::Fill(_))));
    }

    #[test]
    fn test_spawn_is_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let tuning = FieldTuning::default();
        let bounds = Dimensions::new(300.0, 200.0);

        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, bounds, &tuning);
            let r = p.radius();
            assert_eq!(r, r.round());
            assert!((10.0..=30.0).contains(&r));
            assert_eq!(r, p.original_radius());
            assert!(p.x - r >= 0.0 && p.x + r <= 300.0);
            assert!(p.y - r >= 0.0 && p.y + r <= 200.0);
            assert!((0.25..=2.5).contains(&p.dx.abs()));
            assert!((0.25..=2.5).contains(&p.dy.abs()));
            assert!((0.5..=1.0).contains(&p.color().a));
            assert!(!p.is_highlighted());
        }
    }

    #[test]
    fn test_spawn_on_tiny_surface_centers() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::spawn(&mut rng, Dimensions::new(12.0, 500.0), &FieldTuning::default());
        assert_eq!(p.x, 6.0);
    }
}
