//! PNG export for Pilot timeline charts
//!
//! Draws the same chart geometry the interactive panel uses onto a
//! [`Canvas`], records it as SVG, and rasterizes it with resvg.

pub mod error;
pub mod export;
pub mod rasterize;
pub mod surface;
pub mod svg;

pub use error::{RasterError, RasterResult};
pub use export::{
    CanvasSize, RasterBackend, RasterDrawing, RasterImage, RasterOptions, draw_chart,
    render_static_chart, suggested_file_name,
};
pub use surface::{Canvas, PathCommand, PathData, Stroke, TextStyle, rounded_rect_path};
pub use svg::SvgCanvas;
