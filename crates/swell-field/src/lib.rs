//! Circle field animation for swell.
//!
//! This crate owns the animation itself: a population of translucent
//! circles that drift, bounce off the surface edges, and swell while the
//! pointer is near. Drawing goes through the [`Surface`] trait so the
//! same field runs in a browser canvas and in a terminal.

mod field;
mod particle;
mod surface;

pub use field::AnimationField;
pub use particle::Particle;
pub use surface::{CircleShape, CommandBuffer, DrawCommand, Surface};
