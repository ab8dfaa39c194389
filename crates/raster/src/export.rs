//! Static chart export.
//!
//! The canvas size is settled before anything is drawn: the logical size
//! follows from the shared geometry, wide charts are scaled down uniformly
//! to the width cap, and the backing pixel size multiplies in the device
//! pixel ratio. Drawing itself always happens in unscaled coordinates.

use std::path::{Path, PathBuf};

use pilot_core::{
    AgentColors, ChartBackend, ChartGeometry, DEFAULT_MIN_INNER_WIDTH, PlanOptions, Project,
    render_chart,
};

use crate::error::{RasterError, RasterResult};
use crate::rasterize::rasterize_svg;
use crate::surface::{Canvas, Stroke, TextStyle, rounded_rect_path};
use crate::svg::SvgCanvas;

pub const PADDING: f64 = 24.0;
pub const LABEL_WIDTH: f64 = 240.0;
pub const ROW_HEIGHT: f64 = 28.0;
pub const HEADER_HEIGHT: f64 = 44.0;
pub const RULER_HEIGHT: f64 = 28.0;
pub const FOOTER_HEIGHT: f64 = 24.0;
pub const BAR_HEIGHT: f64 = 18.0;
pub const BAR_RADIUS: f64 = 6.0;
const BAR_INSET: f64 = 4.0;
/// Baseline offset for text within a row or ruler cell.
const TEXT_BASELINE: f64 = 18.0;

/// Widest logical image before the chart is scaled down.
pub const DEFAULT_MAX_WIDTH: u32 = 10_000;

const BACKGROUND: &str = "#ffffff";
const INK: &str = "#0f172a";
const GRID: &str = "#e5e7eb";
const RULER_INK: &str = "#334155";
const MUTED_INK: &str = "#64748b";

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub zoom: f64,
    pub min_inner_width: u32,
    pub device_pixel_ratio: f64,
    pub max_width: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            min_inner_width: DEFAULT_MIN_INNER_WIDTH,
            device_pixel_ratio: 1.0,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

impl RasterOptions {
    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            zoom: self.zoom,
            min_inner_width: self.min_inner_width,
        }
    }

    /// Device pixel ratio, with invalid values replaced by 1.
    pub fn effective_device_pixel_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            tracing::warn!(dpr = self.device_pixel_ratio, "ignoring invalid device pixel ratio");
            1.0
        }
    }
}

/// Final dimensions of an exported chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// Unscaled drawing width
    pub content_width: f64,
    /// Unscaled drawing height
    pub content_height: f64,
    /// Width after the width cap
    pub logical_width: u32,
    pub logical_height: u32,
    /// Uniform downscale factor; 1 when under the cap
    pub scale: f64,
    pub device_pixel_ratio: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl CanvasSize {
    /// Size a chart with the given body width and row count.
    pub fn compute(inner_width: u32, rows: usize, options: &RasterOptions) -> Self {
        let content_width = PADDING + LABEL_WIDTH + f64::from(inner_width) + PADDING;
        let content_height = PADDING
            + HEADER_HEIGHT
            + RULER_HEIGHT
            + rows as f64 * ROW_HEIGHT
            + FOOTER_HEIGHT
            + PADDING;

        let max_width = f64::from(options.max_width.max(1));
        let (scale, logical_width, logical_height) = if content_width > max_width {
            let scale = max_width / content_width;
            (scale, max_width, (content_height * scale).round())
        } else {
            (1.0, content_width, content_height)
        };

        let dpr = options.effective_device_pixel_ratio();
        let size = Self {
            content_width,
            content_height,
            logical_width: logical_width as u32,
            logical_height: logical_height as u32,
            scale,
            device_pixel_ratio: dpr,
            pixel_width: ((logical_width * dpr).round() as u32).max(1),
            pixel_height: ((logical_height * dpr).round() as u32).max(1),
        };
        if scale < 1.0 {
            tracing::debug!(
                content_width,
                scale,
                "chart wider than the export cap, scaling down"
            );
        }
        size
    }

    /// Factor from drawing coordinates to backing pixels.
    pub fn transform_scale(&self) -> f64 {
        self.scale * self.device_pixel_ratio
    }
}

/// Draw a chart onto any canvas in unscaled coordinates.
pub fn draw_chart<C>(canvas: &mut C, project: &Project, geometry: &ChartGeometry<'_>, size: &CanvasSize)
where
    C: Canvas + ?Sized,
{
    let plan = &geometry.plan;
    let ppd = f64::from(plan.pixels_per_day);
    let rows = geometry.row_count() as f64;
    let body_left = PADDING + LABEL_WIDTH;
    let text = TextStyle::new(12.0, INK);

    canvas.fill_rect(0.0, 0.0, size.content_width, size.content_height, BACKGROUND);

    // Header
    canvas.fill_text(
        &project.title,
        PADDING,
        PADDING + 20.0,
        &TextStyle::new(18.0, INK).bold(),
    );
    canvas.fill_text(&subtitle(project), PADDING, PADDING + 38.0, &text);

    // Grid and ruler
    let grid_top = PADDING + HEADER_HEIGHT;
    let grid_bottom = grid_top + RULER_HEIGHT + rows * ROW_HEIGHT;
    let step = plan.tick_step_days.max(1) as usize;
    let segments: Vec<_> = (0..=plan.total_days)
        .step_by(step)
        .map(|day| {
            let x = body_left + f64::from(day) * ppd;
            (x, grid_top, x, grid_bottom)
        })
        .collect();
    canvas.stroke_lines(&segments, GRID, 1.0);

    let ruler_text = TextStyle::new(12.0, RULER_INK);
    for tick in plan.ticks() {
        if let Some(label) = &tick.label {
            let x = body_left + f64::from(tick.offset_days) * ppd + 4.0;
            canvas.fill_text(label, x, grid_top + TEXT_BASELINE, &ruler_text);
        }
    }

    // Rows
    let rows_top = grid_top + RULER_HEIGHT;
    let outline = Stroke {
        color: INK.to_string(),
        opacity: f64::from(0x15u8) / 255.0,
        width: 1.0,
    };
    for row in &geometry.rows {
        let y = rows_top + row.bar.row_index as f64 * ROW_HEIGHT;
        canvas.fill_text(&row.label(), PADDING, y + TEXT_BASELINE, &text);

        let x = body_left + f64::from(row.bar.x(plan.pixels_per_day));
        let width = f64::from(row.bar.width(plan.pixels_per_day));
        let bar = rounded_rect_path(x, y + BAR_INSET, width, BAR_HEIGHT, BAR_RADIUS);
        canvas.fill_path(&bar, &row.color, Some(&outline));

        if geometry.shows_bar_label(row) {
            canvas.fill_text(
                &row.task.title,
                x + 8.0,
                y + TEXT_BASELINE,
                &TextStyle::new(12.0, row.text_color()),
            );
        }
    }

    canvas.fill_text(
        &plan.footer(),
        PADDING,
        rows_top + rows * ROW_HEIGHT + 16.0,
        &TextStyle::new(12.0, MUTED_INK),
    );
}

/// `Due: Mar 5, 2024, 6:30 PM · Status: Active`, without the due part when
/// the project has no due date.
pub fn subtitle(project: &Project) -> String {
    let status = format!("Status: {}", project.status.label());
    if project.due_date.is_some() {
        format!("{} · {}", project.due_label(), status)
    } else {
        status
    }
}

/// Suggested download name, e.g. `Launch-gantt.png`.
pub fn suggested_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '-',
            c => c,
        })
        .collect();
    let stem = if stem.is_empty() { "project" } else { stem.as_str() };
    format!("{stem}-gantt.png")
}

/// A chart recorded as SVG with its final size.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterDrawing {
    pub svg: String,
    pub size: CanvasSize,
}

/// Backend that records a chart as SVG.
#[derive(Debug, Clone, Copy)]
pub struct RasterBackend {
    options: RasterOptions,
}

impl RasterBackend {
    pub fn new(options: RasterOptions) -> Self {
        Self { options }
    }
}

impl ChartBackend for RasterBackend {
    type Output = RasterDrawing;

    fn render(&self, project: &Project, geometry: &ChartGeometry<'_>) -> RasterDrawing {
        let size = CanvasSize::compute(geometry.inner_width(), geometry.row_count(), &self.options);
        let mut canvas = SvgCanvas::new(size.content_width, size.content_height);
        draw_chart(&mut canvas, project, geometry, &size);
        RasterDrawing {
            svg: canvas.finish(),
            size,
        }
    }
}

/// An exported chart image.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    /// PNG-encoded pixels
    pub png: Vec<u8>,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub logical_width: u32,
    pub logical_height: u32,
    pub scale: f64,
    pub file_name: String,
}

impl RasterImage {
    /// Write the PNG into `dir` under its suggested name.
    pub fn write_to_dir(&self, dir: &Path) -> RasterResult<PathBuf> {
        let path = dir.join(&self.file_name);
        self.write_to(&path)?;
        Ok(path)
    }

    /// Write the PNG to an exact path.
    pub fn write_to(&self, path: &Path) -> RasterResult<()> {
        std::fs::write(path, &self.png).map_err(|source| RasterError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Render a project's chart to a PNG image.
///
/// Fails with [`RasterError::NoTasks`] or [`RasterError::NoDatedTasks`]
/// when there is nothing to draw.
pub fn render_static_chart<A>(
    project: &Project,
    agents: &A,
    options: RasterOptions,
) -> RasterResult<RasterImage>
where
    A: AgentColors + ?Sized,
{
    let backend = RasterBackend::new(options);
    let drawing = render_chart(project, agents, &options.plan_options(), &backend)?;
    let png = rasterize_svg(&drawing.svg, &drawing.size)?;

    tracing::debug!(
        project = %project.id,
        width = drawing.size.pixel_width,
        height = drawing.size.pixel_height,
        bytes = png.len(),
        "exported chart"
    );
    Ok(RasterImage {
        png,
        pixel_width: drawing.size.pixel_width,
        pixel_height: drawing.size.pixel_height,
        logical_width: drawing.size.logical_width,
        logical_height: drawing.size.logical_height,
        scale: drawing.size.scale,
        file_name: suggested_file_name(&project.title),
    })
}
