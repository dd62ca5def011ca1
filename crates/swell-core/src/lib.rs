//! Core types for the swell circle field.
//!
//! Everything here is plain data shared by the animation crate, the
//! configuration loader, and the terminal and browser hosts.

mod color;
mod cursor;
mod geometry;
mod tuning;

pub use color::Rgba;
pub use cursor::{Cursor, CursorTracking};
pub use geometry::{Dimensions, Point};
pub use tuning::{FieldTuning, InvalidTuning, MAX_DENSITY};
