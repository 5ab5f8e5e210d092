//! Backend-independent drawing surface. The renderer appends commands here;
//! `pdf` turns them into a content stream.

use crate::fonts::Face;
use crate::model::{Alignment, EmbeddedImage};
use crate::style::Rgb;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub face: Face,
    /// Points, as in the PDF `Tf` operator.
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(face: Face, size: f32, color: Rgb) -> Self {
        Self { face, size, color }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgb,
    /// Millimetres.
    pub width: f32,
    pub round_cap: bool,
}

impl StrokeStyle {
    pub const fn new(color: Rgb, width: f32) -> Self {
        Self {
            color,
            width,
            round_cap: false,
        }
    }

    pub const fn round(color: Rgb, width: f32) -> Self {
        Self {
            color,
            width,
            round_cap: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Fill(Rgb),
    Stroke(StrokeStyle),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageId(pub(crate) usize);

/// One drawing operation. Coordinates are millimetres from the top-left
/// corner; text `y` is the baseline.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
        align: Alignment,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        paint: Paint,
    },
    RoundedRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        stroke: StrokeStyle,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: StrokeStyle,
    },
    Image {
        id: ImageId,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Surface {
    commands: Vec<DrawCommand>,
    images: Vec<EmbeddedImage>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, text: impl Into<String>, x: f32, y: f32, style: TextStyle, align: Alignment) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            style,
            align,
        });
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            w,
            h,
            paint: Paint::Fill(color),
        });
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            w,
            h,
            paint: Paint::Stroke(stroke),
        });
    }

    pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::RoundedRect {
            x,
            y,
            w,
            h,
            radius,
            stroke,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        });
    }

    /// Register a raster once; it can then be drawn by id.
    pub fn add_image(&mut self, image: EmbeddedImage) -> ImageId {
        self.images.push(image);
        ImageId(self.images.len() - 1)
    }

    pub fn draw_image(&mut self, id: ImageId, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::Image { id, x, y, w, h });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn images(&self) -> &[EmbeddedImage] {
        &self.images
    }

    /// Every text string drawn so far, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
