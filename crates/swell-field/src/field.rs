//! Animation field state management.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swell_core::{Cursor, Dimensions, FieldTuning, Point};

use crate::particle::Particle;
use crate::surface::Surface;

/// The circle field: particles, the cursor they react to, and the surface
/// size they bounce inside.
///
/// The frame driver is the only writer of particle state; pointer handlers
/// only touch the cursor.
#[derive(Debug)]
pub struct AnimationField<R = StdRng> {
    /// Particles in spawn order.
    particles: Vec<Particle>,
    /// Last known pointer position.
    cursor: Cursor,
    /// Current surface size.
    dimensions: Dimensions,
    /// Animation constants.
    tuning: FieldTuning,
    /// Source of spawn randomness.
    rng: R,
    /// Frames drawn so far.
    frames: u64,
}

impl AnimationField<StdRng> {
    /// Create an empty field seeded from `seed`.
    pub fn seeded(dimensions: Dimensions, tuning: FieldTuning, seed: u64) -> Self {
        Self::with_rng(dimensions, tuning, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> AnimationField<R> {
    /// Create an empty field drawing randomness from `rng`.
    ///
    /// Call [`initialize`](Self::initialize) to populate it. Tuning that
    /// fails [`FieldTuning::validate`] is replaced by the defaults.
    pub fn with_rng(dimensions: Dimensions, tuning: FieldTuning, rng: R) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(err) => {
                tracing::warn!(%err, "ignoring invalid tuning");
                FieldTuning::default()
            }
        };
        Self {
            particles: Vec::new(),
            cursor: Cursor::absent(),
            dimensions,
            tuning,
            rng,
            frames: 0,
        }
    }

    /// Bring the population up (or down) to the target for the current size.
    pub fn initialize(&mut self) {
        self.populate();
    }

    /// Adopt a new surface size and grow or truncate the population.
    ///
    /// Surviving particles keep their position, radius, velocity and color.
    pub fn resize(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
        self.populate();
    }

    /// Record a pointer move in surface coordinates. Moves outside the
    /// surface clear the cursor.
    pub fn pointer_moved(&mut self, point: Point) {
        self.cursor.track(point, self.dimensions);
    }

    /// Forget the pointer position.
    pub fn pointer_left(&mut self) {
        self.cursor.clear();
    }

    /// Draw one frame: clear, then update and draw every particle in order.
    ///
    /// A surface whose size differs from the field's resizes the field first.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let size = surface.size();
        if size != self.dimensions {
            self.resize(size);
        }
        surface.clear();
        for particle in &mut self.particles {
            particle.update(self.dimensions, &self.cursor, &self.tuning);
            particle.draw(surface);
        }
        self.frames += 1;
    }

    /// Number of particles the current surface should hold.
    pub fn target_count(&self) -> usize {
        self.tuning.target_count(self.dimensions)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn tuning(&self) -> &FieldTuning {
        &self.tuning
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn populate(&mut self) {
        let target = self.target_count();
        let before = self.particles.len();

        if target < before {
            self.particles.truncate(target);
        } else {
            self.particles.reserve(target - before);
            for _ in before..target {
                let particle = Particle::spawn(&mut self.rng, self.dimensions, &self.tuning);
                self.particles.push(particle);
            }
        }

        if target != before {
            tracing::debug!(
                from = before,
                to = target,
                width = self.dimensions.width,
                height = self.dimensions.height,
                "population changed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CommandBuffer, DrawCommand};

    fn field(width: f64, height: f64) -> AnimationField {
        let mut field =
            AnimationField::seeded(Dimensions::new(width, height), FieldTuning::default(), 42);
        field.initialize();
        field
    }

    #[test]
    fn test_initial_population() {
        assert_eq!(field(1000.0, 1000.0).len(), 150);
        assert_eq!(field(1280.0, 720.0).len(), 138);
    }

    #[test]
    fn test_zero_area_is_empty() {
        let field = field(0.0, 800.0);
        assert!(field.is_empty());
        assert_eq!(field.target_count(), 0);
    }

    #[test]
    fn test_grow_appends_and_keeps_existing() {
        let mut field = field(1000.0, 1000.0);
        let before = field.particles().to_vec();

        field.resize(Dimensions::new(2000.0, 1000.0));
        assert_eq!(field.len(), 300);
        assert_eq!(&field.particles()[..150], &before[..]);
    }

    #[test]
    fn test_shrink_truncates_and_keeps_oldest() {
        let mut field = field(1000.0, 1000.0);
        let mut surface = CommandBuffer::new(field.dimensions());
        for _ in 0..25 {
            field.tick(&mut surface);
        }
        let before = field.particles().to_vec();

        field.resize(Dimensions::new(800.0, 600.0));
        assert_eq!(field.len(), 72);
        assert_eq!(field.particles(), &before[..72]);
    }

    #[test]
    fn test_resize_from_empty_populates() {
        let mut field = field(0.0, 0.0);
        assert!(field.is_empty());
        field.resize(Dimensions::new(640.0, 480.0));
        assert_eq!(field.len(), 46);
    }

    #[test]
    fn test_radius_invariant_over_many_ticks() {
        let mut field = field(1000.0, 1000.0);
        let mut surface = CommandBuffer::new(field.dimensions());

        for frame in 0..600 {
            match frame % 200 {
                0 => field.pointer_moved(Point::new(500.0, 500.0)),
                100 => field.pointer_left(),
                _ => {}
            }
            field.tick(&mut surface);
            for p in field.particles() {
                assert!(p.radius() >= p.original_radius());
                assert!(p.radius() <= 200.0);
            }
        }
        assert_eq!(field.frames(), 600);
    }

    #[test]
    fn test_velocity_magnitudes_never_change() {
        let mut field = field(640.0, 480.0);
        let speeds: Vec<(f64, f64)> = field
            .particles()
            .iter()
            .map(|p| (p.dx.abs(), p.dy.abs()))
            .collect();

        let mut surface = CommandBuffer::new(field.dimensions());
        for _ in 0..1000 {
            field.tick(&mut surface);
        }
        for (p, (sx, sy)) in field.particles().iter().zip(speeds) {
            assert_eq!(p.dx.abs(), sx);
            assert_eq!(p.dy.abs(), sy);
        }
    }

    #[test]
    fn test_tick_draws_every_particle_in_order() {
        let mut field = field(1000.0, 1000.0);
        let mut surface = CommandBuffer::new(field.dimensions());
        field.tick(&mut surface);

        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        let strokes: Vec<_> = surface.strokes().collect();
        assert_eq!(strokes.len(), 150);
        for (shape, particle) in strokes.iter().zip(field.particles()) {
            assert_eq!((shape.x, shape.y), (particle.x, particle.y));
            assert_eq!(shape.radius, particle.radius());
        }
        assert_eq!(surface.fills().count(), 0);
    }

    #[test]
    fn test_cursor_on_center_grows_to_cap() {
        let mut field = field(1000.0, 1000.0);
        let mut surface = CommandBuffer::new(field.dimensions());

        for _ in 0..300 {
            // Follow the first particle so the cursor stays on its center
            let center = field.particles()[0].center();
            field.pointer_moved(center);
            let before = field.particles()[0].radius();
            field.tick(&mut surface);
            let p = &field.particles()[0];
            assert!(p.is_highlighted());
            if before < 200.0 {
                assert!(p.radius() > before);
            } else {
                assert_eq!(p.radius(), 200.0);
            }
        }
        assert_eq!(field.particles()[0].radius(), 200.0);
    }

    #[test]
    fn test_pointer_leave_shrinks_everything_back() {
        let mut field = field(1000.0, 1000.0);
        let mut surface = CommandBuffer::new(field.dimensions());

        for _ in 0..50 {
            let center = field.particles()[0].center();
            field.pointer_moved(center);
            field.tick(&mut surface);
        }
        let first = &field.particles()[0];
        assert_eq!(first.radius(), first.original_radius() + 50.0);

        field.pointer_left();
        assert!(!field.cursor().is_present());
        let mut previous: Vec<f64> = field.particles().iter().map(|p| p.radius()).collect();
        for _ in 0..60 {
            field.tick(&mut surface);
            for (p, prev) in field.particles().iter().zip(&mut previous) {
                let expected = (*prev - 1.0).max(p.original_radius());
                assert_eq!(p.radius(), expected);
                assert!(!p.is_highlighted());
                *prev = p.radius();
            }
        }
        for p in field.particles() {
            assert_eq!(p.radius(), p.original_radius());
        }
        assert_eq!(surface.fills().count(), 0);
    }

    #[test]
    fn test_pointer_outside_surface_clears_cursor() {
        let mut field = field(300.0, 300.0);
        field.pointer_moved(Point::new(10.0, 10.0));
        assert!(field.cursor().is_present());
        field.pointer_moved(Point::new(-5.0, 10.0));
        assert!(!field.cursor().is_present());
    }

    #[test]
    fn test_tick_follows_surface_size() {
        let mut field = field(1000.0, 1000.0);
        let mut surface = CommandBuffer::new(Dimensions::new(800.0, 600.0));

        field.tick(&mut surface);
        assert_eq!(field.dimensions(), Dimensions::new(800.0, 600.0));
        assert_eq!(field.len(), 72);
        assert_eq!(surface.strokes().count(), 72);
    }

    #[test]
    fn test_huge_density_is_capped() {
        let tuning = FieldTuning {
            density: 1e12,
            ..Default::default()
        };
        let mut field = AnimationField::seeded(Dimensions::new(40.0, 24.0), tuning, 7);
        field.initialize();
        assert_eq!(*field.tuning(), FieldTuning::default());
        assert_eq!(field.len(), 0);

        // Even unvalidated density never exceeds one particle per pixel
        let capped = FieldTuning {
            density: 1e12,
            ..Default::default()
        };
        assert_eq!(capped.target_count(Dimensions::new(40.0, 24.0)), 960);
    }

    #[test]
    fn test_invalid_ranges_fall_back_to_defaults() {
        let tuning = FieldTuning {
            min_radius: 50.0,
            max_radius: 10.0,
            min_speed: 3.0,
            max_speed: 1.0,
            ..Default::default()
        };
        let mut field = AnimationField::seeded(Dimensions::new(1000.0, 1000.0), tuning, 3);
        field.initialize();
        assert_eq!(*field.tuning(), FieldTuning::default());
        assert_eq!(field.len(), 150);
    }
}
