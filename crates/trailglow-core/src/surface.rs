//! Drawing-surface contract and an in-memory recorder.

use glam::{DVec2, Vec4};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
}

/// Minimal immediate-mode 2-D canvas the renderer draws on.
///
/// Stroke, fill, line width and font are sticky state, as on most canvas APIs.
pub trait DrawSurface {
    /// Width and height in surface units.
    fn size(&self) -> DVec2;
    fn clear_rect(&mut self, origin: DVec2, size: DVec2);
    fn set_line_width(&mut self, width: f64);
    fn set_stroke(&mut self, color: Vec4);
    fn set_fill(&mut self, color: Vec4);
    fn set_font(&mut self, font: Font);
    fn stroke_line(&mut self, from: DVec2, to: DVec2);
    /// Fills the oval inscribed in the rectangle at `origin` with `size`.
    fn fill_oval(&mut self, origin: DVec2, size: DVec2);
    fn stroke_text(&mut self, text: &str, at: DVec2);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    ClearRect { origin: DVec2, size: DVec2 },
    SetLineWidth(f64),
    SetStroke(Vec4),
    SetFill(Vec4),
    SetFont(Font),
    StrokeLine { from: DVec2, to: DVec2 },
    FillOval { origin: DVec2, size: DVec2 },
    StrokeText { text: String, at: DVec2 },
}

/// Surface that only remembers what it was asked to draw.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: DVec2,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: DVec2::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands issued since the most recent full clear.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|command| matches!(command, DrawCommand::ClearRect { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn ovals(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillOval { origin, .. } => Some(*origin),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::StrokeLine { from, to } => Some((*from, *to)),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> DVec2 {
        self.size
    }

    fn clear_rect(&mut self, origin: DVec2, size: DVec2) {
        self.commands.push(DrawCommand::ClearRect { origin, size });
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn set_stroke(&mut self, color: Vec4) {
        self.commands.push(DrawCommand::SetStroke(color));
    }

    fn set_fill(&mut self, color: Vec4) {
        self.commands.push(DrawCommand::SetFill(color));
    }

    fn set_font(&mut self, font: Font) {
        self.commands.push(DrawCommand::SetFont(font));
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2) {
        self.commands.push(DrawCommand::StrokeLine { from, to });
    }

    fn fill_oval(&mut self, origin: DVec2, size: DVec2) {
        self.commands.push(DrawCommand::FillOval { origin, size });
    }

    fn stroke_text(&mut self, text: &str, at: DVec2) {
        self.commands.push(DrawCommand::StrokeText {
            text: text.to_owned(),
            at,
        });
    }
}
