use std::fmt::Write as _;
use std::path::Path;

use glam::{DVec2, Vec4};
use trailglow_core::{DrawSurface, Font};

/// Retained surface that can serialize its current contents as SVG.
///
/// A full clear drops everything drawn so far; a partial clear is painted
/// over with the background instead.
pub struct SvgSurface {
    size: DVec2,
    background: Vec4,
    stroke: Vec4,
    fill: Vec4,
    line_width: f64,
    font: Font,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: DVec2::new(width, height),
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),
            stroke: Vec4::ONE,
            fill: Vec4::ONE,
            line_width: 1.0,
            font: Font {
                size: 12.0,
                bold: false,
            },
            elements: Vec::new(),
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.size.x,
            h = self.size.y,
        );
        let _ = writeln!(
            out,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            css_color(self.background)
        );
        for element in &self.elements {
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_svg())
    }
}

impl DrawSurface for SvgSurface {
    fn size(&self) -> DVec2 {
        self.size
    }

    fn clear_rect(&mut self, origin: DVec2, size: DVec2) {
        let covers = origin.cmple(DVec2::ZERO).all() && (origin + size).cmpge(self.size).all();
        if covers {
            self.elements.clear();
        } else {
            self.elements.push(format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                origin.x,
                origin.y,
                size.x,
                size.y,
                css_color(self.background)
            ));
        }
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_stroke(&mut self, color: Vec4) {
        self.stroke = color;
    }

    fn set_fill(&mut self, color: Vec4) {
        self.fill = color;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2) {
        self.elements.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            css_color(self.stroke),
            self.line_width
        ));
    }

    fn fill_oval(&mut self, origin: DVec2, size: DVec2) {
        let radius = size * 0.5;
        let center = origin + radius;
        self.elements.push(format!(
            r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" fill="{}"/>"#,
            center.x,
            center.y,
            radius.x,
            radius.y,
            css_color(self.fill)
        ));
    }

    fn stroke_text(&mut self, text: &str, at: DVec2) {
        let weight = if self.font.bold { "bold" } else { "normal" };
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="{}" font-weight="{}" fill="none" stroke="{}" stroke-width="{}">{}</text>"#,
            at.x,
            at.y,
            self.font.size,
            weight,
            css_color(self.stroke),
            self.line_width,
            escape(text)
        ));
    }
}

fn css_color(color: Vec4) -> String {
    let [r, g, b, a] = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round().to_array();
    format!("rgba({},{},{},{:.3})", r as u8, g as u8, b as u8, a / 255.0)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
