//! Bar geometry shared by every chart surface.
//!
//! [`ChartGeometry`] is computed once per render and handed to a
//! [`ChartBackend`]. The interactive panel and the raster exporter are both
//! backends, so a bar sits at the same offset with the same color and label
//! whichever surface draws it.

use serde::Serialize;

use crate::color::{Contrast, DEFAULT_BAR_COLOR, contrast_class};
use crate::models::{AgentColors, Project, Task};
use crate::plan::{PlanOptions, ScalePlan};

/// Narrowest bar, in pixels, that carries its title inside.
pub const BAR_LABEL_MIN_WIDTH: u32 = 60;

/// Placement of one bar in day units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BarGeometry {
    /// Row the bar sits on, counting dated tasks only
    pub row_index: usize,
    /// Days from the plan start to the first day of the bar
    pub offset_days: u32,
    /// Days the bar covers; at least 1
    pub span_days: u32,
}

impl BarGeometry {
    /// Left edge in pixels from the start of the chart body.
    pub fn x(&self, pixels_per_day: u32) -> u32 {
        self.offset_days.saturating_mul(pixels_per_day)
    }

    /// Width in pixels.
    pub fn width(&self, pixels_per_day: u32) -> u32 {
        self.span_days.saturating_mul(pixels_per_day)
    }

    /// Whether the bar is wide enough for an in-bar label.
    pub fn fits_label(&self, pixels_per_day: u32) -> bool {
        self.width(pixels_per_day) >= BAR_LABEL_MIN_WIDTH
    }
}

/// One dated task, resolved for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow<'a> {
    pub task: &'a Task,
    pub bar: BarGeometry,
    /// Agent name, only when it resolves to a known agent
    pub agent: Option<&'a str>,
    /// Bar fill as `#rrggbb`
    pub color: String,
    pub contrast: Contrast,
}

impl ChartRow<'_> {
    /// Row label: the title, followed by ` · agent` when assigned.
    pub fn label(&self) -> String {
        match self.agent {
            Some(agent) => format!("{} · {}", self.task.title, agent),
            None => self.task.title.clone(),
        }
    }

    /// Hover text: title, date range (a single date for one-day tasks),
    /// then the agent when assigned.
    pub fn tooltip(&self) -> String {
        let mut text = self.task.title.clone();
        if let Some(start) = self.task.start {
            text.push_str(&format!("\n{start}"));
            if let Some(end) = self.task.effective_end()
                && end != start
            {
                text.push_str(&format!(" → {end}"));
            }
        }
        if let Some(agent) = self.agent {
            text.push_str(&format!("\nAgent: {agent}"));
        }
        text
    }

    /// Hex color for text drawn on the bar.
    pub fn text_color(&self) -> &'static str {
        self.contrast.text_color()
    }
}

/// Why a chart has nothing to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyChart {
    /// The project has no tasks at all
    NoTasks,
    /// Tasks exist but none has a start date
    NoDatedTasks,
}

impl EmptyChart {
    /// Placeholder text for the interactive panel.
    pub fn message(&self) -> &'static str {
        match self {
            EmptyChart::NoTasks => "No tasks to display.",
            EmptyChart::NoDatedTasks => "Tasks need start dates to draw Gantt.",
        }
    }
}

impl std::fmt::Display for EmptyChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Scale plan plus one resolved row per dated task.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry<'a> {
    pub plan: ScalePlan,
    /// In stored task order; undated tasks are skipped
    pub rows: Vec<ChartRow<'a>>,
}

impl<'a> ChartGeometry<'a> {
    /// Plan the chart and place every dated task on it.
    pub fn compute<A>(
        tasks: &'a [Task],
        agents: &A,
        options: &PlanOptions,
    ) -> Result<Self, EmptyChart>
    where
        A: AgentColors + ?Sized,
    {
        if tasks.is_empty() {
            return Err(EmptyChart::NoTasks);
        }
        let plan = ScalePlan::from_tasks(tasks, options).ok_or(EmptyChart::NoDatedTasks)?;

        let rows = tasks
            .iter()
            .filter(|task| task.start.is_some())
            .enumerate()
            .filter_map(|(row_index, task)| {
                let bar = plan.bar_for(row_index, task)?;
                let (agent, color) = resolve_agent(task, agents);
                let contrast = contrast_class(&color);
                Some(ChartRow {
                    task,
                    bar,
                    agent,
                    color,
                    contrast,
                })
            })
            .collect();

        Ok(Self { plan, rows })
    }

    /// Width of the chart body in pixels.
    pub fn inner_width(&self) -> u32 {
        self.plan.inner_width()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether a row's bar should carry an in-bar label.
    pub fn shows_bar_label(&self, row: &ChartRow<'_>) -> bool {
        row.bar.fits_label(self.plan.pixels_per_day)
    }
}

fn resolve_agent<'a, A>(task: &'a Task, agents: &A) -> (Option<&'a str>, String)
where
    A: AgentColors + ?Sized,
{
    let Some(name) = task.agent.as_deref() else {
        return (None, DEFAULT_BAR_COLOR.to_string());
    };
    match agents.agent_color(name) {
        Some(color) => (Some(name), color),
        None => {
            tracing::warn!(task = %task.id, agent = name, "unknown agent, drawing as unassigned");
            (None, DEFAULT_BAR_COLOR.to_string())
        }
    }
}

/// A surface that turns shared chart geometry into its own output.
pub trait ChartBackend {
    type Output;

    fn render(&self, project: &Project, geometry: &ChartGeometry<'_>) -> Self::Output;
}

/// Compute geometry for a project and hand it to a backend.
pub fn render_chart<A, B>(
    project: &Project,
    agents: &A,
    options: &PlanOptions,
    backend: &B,
) -> Result<B::Output, EmptyChart>
where
    A: AgentColors + ?Sized,
    B: ChartBackend,
{
    let geometry = ChartGeometry::compute(&project.tasks, agents, options)?;
    Ok(backend.render(project, &geometry))
}
