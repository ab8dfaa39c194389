//! Drawing surface abstraction.
//!
//! Chart drawing is written against [`Canvas`] in logical coordinates; the
//! surface decides how commands are recorded or rasterized.

use std::fmt::Write;

/// One path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    Close,
}

/// A path built from move, line and quadratic curve segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo { x, y });
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo { x, y });
        self
    }

    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::QuadTo { cx, cy, x, y });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// SVG `d` attribute for this path.
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for command in &self.commands {
            if !d.is_empty() {
                d.push(' ');
            }
            // Writing to a String cannot fail
            let _ = match *command {
                PathCommand::MoveTo { x, y } => write!(d, "M{} {}", num(x), num(y)),
                PathCommand::LineTo { x, y } => write!(d, "L{} {}", num(x), num(y)),
                PathCommand::QuadTo { cx, cy, x, y } => {
                    write!(d, "Q{} {} {} {}", num(cx), num(cy), num(x), num(y))
                }
                PathCommand::Close => write!(d, "Z"),
            };
        }
        d
    }
}

/// Format a coordinate without trailing zeros.
pub(crate) fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

/// Rectangle with rounded corners traced with quadratic curves.
///
/// The radius is reduced to fit rectangles narrower or shorter than two radii.
pub fn rounded_rect_path(x: f64, y: f64, width: f64, height: f64, radius: f64) -> PathData {
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    PathData::new()
        .move_to(x + r, y)
        .line_to(x + width - r, y)
        .quad_to(x + width, y, x + width, y + r)
        .line_to(x + width, y + height - r)
        .quad_to(x + width, y + height, x + width - r, y + height)
        .line_to(x + r, y + height)
        .quad_to(x, y + height, x, y + height - r)
        .line_to(x, y + r)
        .quad_to(x, y, x + r, y)
        .close()
}

/// Stroke applied around a filled shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub opacity: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Font and fill for a text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub weight: FontWeight,
    pub color: String,
}

impl TextStyle {
    pub fn new(size: f64, color: impl Into<String>) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
            color: color.into(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }
}

/// A 2D drawing target in logical (unscaled) coordinates.
pub trait Canvas {
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);

    /// Stroke a set of straight line segments with one color.
    fn stroke_lines(&mut self, segments: &[(f64, f64, f64, f64)], color: &str, width: f64);

    /// Fill a closed path, optionally outlining it.
    fn fill_path(&mut self, path: &PathData, color: &str, stroke: Option<&Stroke>);

    /// Draw text with its alphabetic baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_svg() {
        let path = PathData::new()
            .move_to(0.0, 0.0)
            .line_to(10.5, 0.0)
            .quad_to(12.0, 0.0, 12.0, 2.25)
            .close();
        assert_eq!(path.to_svg(), "M0 0 L10.5 0 Q12 0 12 2.25 Z");
    }

    #[test]
    fn test_rounded_rect_uses_quadratic_corners() {
        let path = rounded_rect_path(10.0, 4.0, 100.0, 18.0, 6.0);
        let commands = path.commands();

        assert_eq!(commands.len(), 10);
        assert_eq!(commands[0], PathCommand::MoveTo { x: 16.0, y: 4.0 });
        assert_eq!(
            commands[2],
            PathCommand::QuadTo {
                cx: 110.0,
                cy: 4.0,
                x: 110.0,
                y: 10.0
            }
        );
        let quads = commands
            .iter()
            .filter(|c| matches!(c, PathCommand::QuadTo { .. }))
            .count();
        assert_eq!(quads, 4);
        assert_eq!(commands[9], PathCommand::Close);
    }

    #[test]
    fn test_rounded_rect_radius_shrinks_for_narrow_bars() {
        let path = rounded_rect_path(0.0, 0.0, 6.0, 18.0, 6.0);
        assert_eq!(path.commands()[0], PathCommand::MoveTo { x: 3.0, y: 0.0 });
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(24.0), "24");
        assert_eq!(num(0.125), "0.13");
        assert_eq!(num(-3.5), "-3.5");
    }

    #[test]
    fn test_text_style_bold() {
        let style = TextStyle::new(18.0, "#0f172a").bold();
        assert_eq!(style.weight, FontWeight::Bold);
        assert_eq!(style.weight.as_str(), "bold");
    }
}
