//! Layout for the interactive, scrollable chart panel.
//!
//! The builder resolves shared chart geometry into plain pixel boxes that a
//! host UI can draw without knowing anything about dates.

use serde::Serialize;

use crate::color::Contrast;
use crate::geometry::{ChartBackend, ChartGeometry, render_chart};
use crate::models::{AgentColors, Project};
use crate::plan::{DEFAULT_MIN_INNER_WIDTH, PlanOptions};

pub use crate::geometry::EmptyChart;

/// Track inset: a track is this much shorter than its row.
const TRACK_INSET: u32 = 6;

/// Host-supplied sizing for the interactive panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub row_height: u32,
    pub label_column_width: u32,
    pub min_inner_width: u32,
    pub zoom: f64,
    /// Cap on the visible height; content beyond it scrolls
    pub max_panel_height: Option<u32>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            row_height: 30,
            label_column_width: 240,
            min_inner_width: DEFAULT_MIN_INNER_WIDTH,
            zoom: 1.0,
            max_panel_height: None,
        }
    }
}

impl ChartOptions {
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_max_panel_height(mut self, height: u32) -> Self {
        self.max_panel_height = Some(height);
        self
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            zoom: self.zoom,
            min_inner_width: self.min_inner_width,
        }
    }
}

/// A ruler cell in pixels from the start of the chart body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickCell {
    pub x: u32,
    pub width: u32,
    pub label: Option<String>,
}

/// A bar in pixels within its track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarLayout {
    pub x: u32,
    pub width: u32,
    pub color: String,
    pub contrast: Contrast,
    pub text_color: String,
    /// Title drawn inside the bar, when it fits
    pub text: Option<String>,
    pub tooltip: String,
}

/// One task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowLayout {
    pub task_id: String,
    pub label: String,
    /// Distance from the top of the first row
    pub top: u32,
    pub bar: BarLayout,
}

/// Everything the panel needs to draw a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLayout {
    pub title: String,
    pub pixels_per_day: u32,
    pub inner_width: u32,
    pub label_column_width: u32,
    pub row_height: u32,
    pub track_height: u32,
    /// Height of all rows together
    pub content_height: u32,
    /// Visible height after the panel cap
    pub viewport_height: u32,
    pub ticks: Vec<TickCell>,
    pub rows: Vec<RowLayout>,
    pub footer: String,
}

impl ChartLayout {
    /// Full width including the label column.
    pub fn total_width(&self) -> u32 {
        self.label_column_width.saturating_add(self.inner_width)
    }

    /// Whether rows overflow the viewport.
    pub fn scrolls_vertically(&self) -> bool {
        self.content_height > self.viewport_height
    }
}

/// Result of building the interactive chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "chart", rename_all = "snake_case")]
pub enum InteractiveChart {
    Empty(EmptyChart),
    Ready(ChartLayout),
}

impl InteractiveChart {
    pub fn layout(&self) -> Option<&ChartLayout> {
        match self {
            InteractiveChart::Ready(layout) => Some(layout),
            InteractiveChart::Empty(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, InteractiveChart::Empty(_))
    }
}

/// Backend producing [`ChartLayout`] from shared geometry.
#[derive(Debug, Clone, Copy)]
pub struct InteractiveBackend {
    options: ChartOptions,
}

impl InteractiveBackend {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }
}

impl ChartBackend for InteractiveBackend {
    type Output = ChartLayout;

    fn render(&self, project: &Project, geometry: &ChartGeometry<'_>) -> ChartLayout {
        let plan = &geometry.plan;
        let ppd = plan.pixels_per_day;
        let row_height = self.options.row_height;

        let ticks = plan
            .ticks()
            .into_iter()
            .map(|tick| TickCell {
                x: tick.offset_days.saturating_mul(ppd),
                width: tick.span_days.saturating_mul(ppd),
                label: tick.label,
            })
            .collect();

        let rows: Vec<RowLayout> = geometry
            .rows
            .iter()
            .map(|row| RowLayout {
                task_id: row.task.id.clone(),
                label: row.label(),
                top: u32::try_from(row.bar.row_index)
                    .unwrap_or(u32::MAX)
                    .saturating_mul(row_height),
                bar: BarLayout {
                    x: row.bar.x(ppd),
                    width: row.bar.width(ppd),
                    color: row.color.clone(),
                    contrast: row.contrast,
                    text_color: row.text_color().to_string(),
                    text: geometry
                        .shows_bar_label(row)
                        .then(|| row.task.title.clone()),
                    tooltip: row.tooltip(),
                },
            })
            .collect();

        let content_height = u32::try_from(rows.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(row_height);
        let viewport_height = self
            .options
            .max_panel_height
            .map_or(content_height, |cap| content_height.min(cap));

        ChartLayout {
            title: project.title.clone(),
            pixels_per_day: ppd,
            inner_width: plan.inner_width(),
            label_column_width: self.options.label_column_width,
            row_height,
            track_height: row_height.saturating_sub(TRACK_INSET),
            content_height,
            viewport_height,
            ticks,
            rows,
            footer: plan.footer(),
        }
    }
}

/// Build the interactive chart for a project.
pub fn build_interactive_chart<A>(
    project: &Project,
    agents: &A,
    options: ChartOptions,
) -> InteractiveChart
where
    A: AgentColors + ?Sized,
{
    let backend = InteractiveBackend::new(options);
    match render_chart(project, agents, &options.plan_options(), &backend) {
        Ok(layout) => InteractiveChart::Ready(layout),
        Err(empty) => {
            tracing::debug!(project = %project.id, reason = ?empty, "nothing to chart");
            InteractiveChart::Empty(empty)
        }
    }
}
