//! Drawing surface abstraction.

use swell_core::{Dimensions, Rgba};

/// A 2D raster the field can draw circles on.
pub trait Surface {
    /// Current size in logical pixels.
    fn size(&self) -> Dimensions;

    /// Erase the whole surface.
    fn clear(&mut self);

    /// Outline a full circle.
    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);

    /// Fill a full circle.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);
}

/// A circle as handed to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgba,
}

/// One recorded drawing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    Stroke(CircleShape),
    Fill(CircleShape),
}

/// Surface that records drawing calls for later playback.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    size: Dimensions,
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new(size: Dimensions) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, size: Dimensions) {
        self.size = size;
    }

    /// Commands recorded since the last [`Surface::clear`].
    ///
    /// A clear drops everything before it, so the buffer always holds a
    /// single frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn strokes(&self) -> impl Iterator<Item = &CircleShape> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Stroke(shape) => Some(shape),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = &CircleShape> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Fill(shape) => Some(shape),
            _ => None,
        })
    }
}

impl Surface for CommandBuffer {
    fn size(&self) -> Dimensions {
        self.size
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Stroke(CircleShape {
            x,
            y,
            radius,
            color,
        }));
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Fill(CircleShape {
            x,
            y,
            radius,
            color,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_starts_a_new_frame() {
        let mut buffer = CommandBuffer::new(Dimensions::new(10.0, 10.0));
        let red = Rgba::opaque(255, 0, 0);

        buffer.stroke_circle(1.0, 1.0, 1.0, red);
        buffer.clear();
        buffer.stroke_circle(2.0, 2.0, 1.0, red);
        buffer.fill_circle(2.0, 2.0, 1.0, red);

        assert_eq!(buffer.commands().len(), 3);
        assert_eq!(buffer.commands()[0], DrawCommand::Clear);
        assert_eq!(buffer.strokes().count(), 1);
        assert_eq!(buffer.fills().count(), 1);
    }
}
