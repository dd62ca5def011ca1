//! Terminal rendition of the drawing surface.
//!
//! The terminal is treated as a raster of braille dots, two columns by four
//! rows per cell. That ratio plays the role of a device pixel ratio: the
//! field works in dots and ratatui's canvas packs them into cells.

use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Circle, Context, Points},
};
use swell_core::{Dimensions, Point, Rgba};
use swell_field::{CircleShape, CommandBuffer, DrawCommand};

/// Braille dots per cell, horizontally and vertically.
pub const DOTS_PER_CELL: (u16, u16) = (2, 4);

/// Canvas background; colors are blended against it.
const BACKDROP: (u8, u8, u8) = (0, 0, 0);

/// Surface size in dots for a terminal area.
pub fn dot_dimensions(area: Rect) -> Dimensions {
    Dimensions::new(
        f64::from(area.width) * f64::from(DOTS_PER_CELL.0),
        f64::from(area.height) * f64::from(DOTS_PER_CELL.1),
    )
}

/// Dot-space position of the center of a terminal cell.
pub fn cell_center(column: u16, row: u16) -> Point {
    let (dx, dy) = DOTS_PER_CELL;
    Point::new(
        f64::from(column) * f64::from(dx) + f64::from(dx) / 2.0,
        f64::from(row) * f64::from(dy) + f64::from(dy) / 2.0,
    )
}

/// Terminal color for a translucent particle color.
pub fn to_color(color: Rgba) -> Color {
    let (r, g, b) = color.over(BACKDROP);
    Color::Rgb(r, g, b)
}

/// Dot centers covered by a filled circle, clipped to `bounds`, in canvas
/// coordinates (y axis pointing up).
pub fn disc_points(shape: &CircleShape, bounds: Dimensions) -> Vec<(f64, f64)> {
    let min_x = (shape.x - shape.radius).ceil().max(0.0) as i64;
    let max_x = (shape.x + shape.radius).floor().min(bounds.width) as i64;
    let min_y = (shape.y - shape.radius).ceil().max(0.0) as i64;
    let max_y = (shape.y + shape.radius).floor().min(bounds.height) as i64;
    let r2 = shape.radius * shape.radius;

    let mut points = Vec::new();
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            let (px, py) = (x as f64, y as f64);
            let (dx, dy) = (px - shape.x, py - shape.y);
            if dx * dx + dy * dy <= r2 {
                points.push((px, bounds.height - py));
            }
        }
    }
    points
}

/// Build a canvas widget that replays one recorded frame.
pub fn canvas(
    buffer: &CommandBuffer,
    bounds: Dimensions,
) -> Canvas<'_, impl Fn(&mut Context) + '_> {
    Canvas::default()
        .marker(Marker::Braille)
        .background_color(Color::Rgb(BACKDROP.0, BACKDROP.1, BACKDROP.2))
        .x_bounds([0.0, bounds.width])
        .y_bounds([0.0, bounds.height])
        .paint(move |ctx| {
            for command in buffer.commands() {
                match command {
                    DrawCommand::Clear => {}
                    DrawCommand::Stroke(shape) => ctx.draw(&Circle {
                        x: shape.x,
                        y: bounds.height - shape.y,
                        radius: shape.radius,
                        color: to_color(shape.color),
                    }),
                    DrawCommand::Fill(shape) => {
                        let coords = disc_points(shape, bounds);
                        ctx.draw(&Points {
                            coords: &coords,
                            color: to_color(shape.color),
                        });
                    }
                }
            }
        })
}
