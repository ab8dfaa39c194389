//! SVG to PNG rasterization.

use std::sync::{Arc, OnceLock};

use resvg::tiny_skia::{Pixmap, Transform};
use usvg::fontdb;

use crate::error::{RasterError, RasterResult};
use crate::export::CanvasSize;

/// System fonts, loaded once per process.
pub fn font_database() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Rasterize an SVG document into PNG bytes at the given size.
pub fn rasterize_svg(svg: &str, size: &CanvasSize) -> RasterResult<Vec<u8>> {
    let options = usvg::Options {
        fontdb: font_database(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options)?;

    let mut pixmap =
        Pixmap::new(size.pixel_width, size.pixel_height).ok_or(RasterError::Allocation {
            width: size.pixel_width,
            height: size.pixel_height,
        })?;

    let scale = size.transform_scale() as f32;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| RasterError::Encode {
        message: e.to_string(),
    })
}
