//! Canvas that records drawing commands as an SVG document.

use std::fmt::Write;

use crate::surface::{Canvas, PathData, Stroke, TextStyle, num};

/// Font stack for all chart text.
pub const FONT_FAMILY: &str = "system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif";

/// SVG recorder sized in logical pixels.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Complete the document.
    pub fn finish(self) -> String {
        let (w, h) = (num(self.width), num(self.height));
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">{}</svg>",
            self.body
        )
    }
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            num(x),
            num(y),
            num(width),
            num(height),
            escape(color)
        );
    }

    fn stroke_lines(&mut self, segments: &[(f64, f64, f64, f64)], color: &str, width: f64) {
        if segments.is_empty() {
            return;
        }
        let d = segments
            .iter()
            .map(|&(x1, y1, x2, y2)| format!("M{} {} L{} {}", num(x1), num(y1), num(x2), num(y2)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            self.body,
            "<path d=\"{d}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            escape(color),
            num(width)
        );
    }

    fn fill_path(&mut self, path: &PathData, color: &str, stroke: Option<&Stroke>) {
        if path.is_empty() {
            return;
        }
        let _ = write!(
            self.body,
            "<path d=\"{}\" fill=\"{}\"",
            path.to_svg(),
            escape(color)
        );
        if let Some(stroke) = stroke {
            let _ = write!(
                self.body,
                " stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"",
                escape(&stroke.color),
                num(stroke.opacity),
                num(stroke.width)
            );
        }
        self.body.push_str("/>");
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" xml:space=\"preserve\">{}</text>",
            num(x),
            num(y),
            FONT_FAMILY,
            num(style.size),
            style.weight.as_str(),
            escape(&style.color),
            escape(text)
        );
    }
}

/// Escape text for use in SVG content and attribute values.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() && c != '\t' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
