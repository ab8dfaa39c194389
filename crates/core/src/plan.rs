//! Timeline scale planning.
//!
//! A [`ScalePlan`] fixes the date span of a chart, its horizontal density
//! in pixels per day, and the spacing of ruler ticks. It is recomputed for
//! every render and shared by every chart surface.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::{add_days, days_between, max_date, min_date};
use crate::geometry::BarGeometry;
use crate::models::Task;

/// Narrowest density at which bars and labels stay readable.
pub const MIN_PIXELS_PER_DAY: u32 = 6;

/// Minimum chart body width used when the host does not give one.
pub const DEFAULT_MIN_INNER_WIDTH: u32 = 700;

/// Inputs to the planner that come from the host rather than the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanOptions {
    /// Horizontal zoom factor; must be positive.
    pub zoom: f64,
    /// Smallest width, in pixels, the chart body may have.
    pub min_inner_width: u32,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            min_inner_width: DEFAULT_MIN_INNER_WIDTH,
        }
    }
}

impl PlanOptions {
    /// The zoom factor, with non-finite or non-positive values replaced by 1.
    pub fn effective_zoom(&self) -> f64 {
        if self.zoom.is_finite() && self.zoom > 0.0 {
            self.zoom
        } else {
            tracing::warn!(zoom = self.zoom, "ignoring invalid zoom factor");
            1.0
        }
    }
}

/// Date span and pixel density of one chart render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScalePlan {
    /// Earliest start date across the tasks.
    pub min_date: NaiveDate,
    /// Latest end (or start) date across the tasks.
    pub max_date: NaiveDate,
    /// Inclusive day count from `min_date` to `max_date`; at least 1.
    pub total_days: u32,
    /// Horizontal density; at least [`MIN_PIXELS_PER_DAY`].
    pub pixels_per_day: u32,
    /// Days between ruler ticks.
    pub tick_step_days: u32,
}

/// One ruler division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tick {
    /// Days from the plan's `min_date` to the start of this division.
    pub offset_days: u32,
    /// Days this division covers (shorter for the trailing remainder).
    pub span_days: u32,
    /// Calendar date at the start of the division.
    pub date: NaiveDate,
    /// Ruler text; `None` on the trailing remainder.
    pub label: Option<String>,
}

impl ScalePlan {
    /// Plan a chart for the given tasks.
    ///
    /// Tasks without a start date are ignored. Returns `None` when no task
    /// has one, in which case there is nothing to draw.
    pub fn from_tasks(tasks: &[Task], options: &PlanOptions) -> Option<Self> {
        let (min, max) = tasks
            .iter()
            .filter(|task| task.start.is_some())
            .fold((None, None), |(min, max), task| {
                (
                    min_date(min, task.start),
                    max_date(max, task.effective_end()),
                )
            });

        Some(Self::for_span(min?, max?, options))
    }

    /// Plan a chart covering `min_date..=max_date`.
    pub fn for_span(min_date: NaiveDate, max_date: NaiveDate, options: &PlanOptions) -> Self {
        let total_days = days_between(min_date, max_date).saturating_add(1);

        let zoomed = (f64::from(base_pixels_per_day(total_days)) * options.effective_zoom()).round();
        let mut pixels_per_day = (zoomed as u32).max(MIN_PIXELS_PER_DAY);

        // Short spans are stretched to the minimum width instead of rendering as a sliver
        if total_days.saturating_mul(pixels_per_day) < options.min_inner_width {
            pixels_per_day = options.min_inner_width.div_ceil(total_days);
        }

        let plan = Self {
            min_date,
            max_date,
            total_days,
            pixels_per_day,
            tick_step_days: tick_step_for(total_days),
        };
        tracing::debug!(
            %min_date,
            %max_date,
            total_days,
            pixels_per_day,
            tick_step = plan.tick_step_days,
            "planned timeline scale"
        );
        plan
    }

    /// Width of the chart body in pixels.
    pub fn inner_width(&self) -> u32 {
        self.total_days.saturating_mul(self.pixels_per_day)
    }

    /// Days from the start of the plan to `date`; zero for earlier dates.
    pub fn offset_days(&self, date: NaiveDate) -> u32 {
        days_between(self.min_date, date)
    }

    /// Bar placement for a task, or `None` if it has no start date.
    pub fn bar_for(&self, row_index: usize, task: &Task) -> Option<BarGeometry> {
        let start = task.start?;
        let end = task.effective_end().unwrap_or(start);
        Some(BarGeometry {
            row_index,
            offset_days: self.offset_days(start),
            span_days: days_between(start, end).saturating_add(1).max(1),
        })
    }

    /// Ruler divisions across the whole span.
    ///
    /// One division per tick step, plus an unlabeled trailing division when
    /// the span is not a whole number of steps.
    pub fn ticks(&self) -> Vec<Tick> {
        let step = self.tick_step_days.max(1);
        let mut ticks = Vec::new();

        let mut offset = 0;
        while offset < self.total_days {
            let date = add_days(self.min_date, i64::from(offset));
            ticks.push(Tick {
                offset_days: offset,
                span_days: step,
                date,
                label: Some(self.tick_label(date)),
            });
            offset += step;
        }

        let leftover = self.total_days % step;
        if leftover > 0 {
            ticks.push(Tick {
                offset_days: offset,
                span_days: leftover,
                date: add_days(self.min_date, i64::from(offset)),
                label: None,
            });
        }

        ticks
    }

    /// Ruler text for a date: `1/10` on daily rulers, `Jan 10` otherwise.
    pub fn tick_label(&self, date: NaiveDate) -> String {
        if self.tick_step_days == 1 {
            date.format("%-m/%-d").to_string()
        } else {
            date.format("%b %-d").to_string()
        }
    }

    /// Summary line, e.g. `Timeline: Jan 1 → Jan 10 (10 days)`.
    pub fn footer(&self) -> String {
        let plural = if self.total_days > 1 { "s" } else { "" };
        format!(
            "Timeline: {} → {} ({} day{})",
            self.min_date.format("%b %-d"),
            self.max_date.format("%b %-d"),
            self.total_days,
            plural
        )
    }
}

/// Base density before zoom, by span length.
fn base_pixels_per_day(total_days: u32) -> u32 {
    if total_days > 180 {
        10
    } else if total_days > 120 {
        12
    } else if total_days > 60 {
        18
    } else {
        28
    }
}

/// Tick spacing that keeps the label count roughly constant.
fn tick_step_for(total_days: u32) -> u32 {
    if total_days <= 60 {
        1
    } else if total_days <= 120 {
        7
    } else {
        14
    }
}

static_assertions::assert_impl_all!(ScalePlan: Send, Sync, Copy);
