//! Animation constants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Dimensions;

/// Highest accepted density: one particle per square pixel.
pub const MAX_DENSITY: f64 = 1.0;

/// A tuning value outside its accepted range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid setting `{key}`: {reason}")]
pub struct InvalidTuning {
    /// Config key of the offending value.
    pub key: &'static str,
    pub reason: &'static str,
}

fn invalid(key: &'static str, reason: &'static str) -> Result<(), InvalidTuning> {
    Err(InvalidTuning { key, reason })
}

/// Every number that shapes the animation.
///
/// Lengths are in logical pixels and speeds in pixels per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldTuning {
    /// Particles per square pixel of surface.
    pub density: f64,
    /// Smallest radius a particle spawns with.
    pub min_radius: f64,
    /// Largest radius a particle spawns with.
    pub max_radius: f64,
    /// Ceiling for proximity growth.
    pub radius_cap: f64,
    /// Cursor distance below which particles swell.
    pub proximity_radius: f64,
    /// Radius change per frame while growing or shrinking.
    pub growth_step: f64,
    /// Smallest magnitude of a velocity component.
    pub min_speed: f64,
    /// Largest magnitude of a velocity component.
    pub max_speed: f64,
    /// Lowest alpha a particle color spawns with.
    pub min_alpha: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            density: 0.00015,
            min_radius: 10.0,
            max_radius: 30.0,
            radius_cap: 200.0,
            proximity_radius: 100.0,
            growth_step: 1.0,
            min_speed: 0.25,
            max_speed: 2.5,
            min_alpha: 0.5,
        }
    }
}

impl FieldTuning {
    /// Number of particles a surface of this size should hold.
    ///
    /// Density is capped at [`MAX_DENSITY`].
    pub fn target_count(&self, dimensions: Dimensions) -> usize {
        if !(self.density > 0.0) {
            return 0;
        }
        let target = (dimensions.area() * self.density.min(MAX_DENSITY)).floor();
        if target.is_finite() && target > 0.0 {
            target as usize
        } else {
            0
        }
    }

    /// Check that every value is in range and the ranges are ordered.
    pub fn validate(&self) -> Result<(), InvalidTuning> {
        if !(self.density.is_finite() && (0.0..=MAX_DENSITY).contains(&self.density)) {
            return invalid("field.density", "must be within 0..=1");
        }
        if !(self.min_radius > 0.0 && self.min_radius <= self.max_radius) {
            return invalid(
                "field.min_radius",
                "must be > 0 and no larger than field.max_radius",
            );
        }
        if !(self.max_radius < self.radius_cap && self.radius_cap.is_finite()) {
            return invalid(
                "field.radius_cap",
                "must be finite and larger than field.max_radius",
            );
        }
        if !(self.proximity_radius > 0.0) {
            return invalid("field.proximity_radius", "must be > 0");
        }
        if !(self.growth_step > 0.0 && self.growth_step.is_finite()) {
            return invalid("field.growth_step", "must be a finite number > 0");
        }
        if !(self.min_speed > 0.0 && self.min_speed <= self.max_speed && self.max_speed.is_finite())
        {
            return invalid(
                "field.min_speed",
                "must be > 0 and no larger than a finite field.max_speed",
            );
        }
        if !(0.0..=1.0).contains(&self.min_alpha) {
            return invalid("field.min_alpha", "must be within 0..=1");
        }
        Ok(())
    }
}
