//! Browser host for the swell circle field.
//!
//! Build with `wasm-pack build crates/swell-web --target web` and load the
//! module from a page containing `<canvas class="canvas"></canvas>`. The
//! canvas is sized to the viewport, scaled for the device pixel ratio, and
//! animated with `requestAnimationFrame` for the lifetime of the page.
//!
//! Set `data-cursor-tracking="window"` on the canvas to track the pointer
//! across the whole window instead of only over the canvas.

mod error;
mod logging;
mod viewport;

#[cfg(target_arch = "wasm32")]
mod host;

pub use error::HostError;
pub use logging::LineWriter;
pub use viewport::{Viewport, parse_tracking, to_surface};

#[cfg(target_arch = "wasm32")]
pub use host::start;
