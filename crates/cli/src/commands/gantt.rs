//! Gantt command for printing a project's chart layout
//!
//! Implements `pilot gantt <project>`, printing the interactive chart layout
//! as a text summary, or as JSON with `--json` for other front ends.

use clap::Args;
use pilot_core::{ChartOptions, InteractiveChart, JsonStore, build_interactive_chart};

use crate::commands::ChartArgs;
use crate::error::CliResult;
use crate::output::format_chart_layout;

/// Print the Gantt chart layout for a project
#[derive(Debug, Args)]
pub struct GanttCommand {
    /// Project id or title
    pub project: String,

    #[command(flatten)]
    pub chart: ChartArgs,

    /// Row height in pixels
    #[arg(long, default_value_t = 30)]
    pub row_height: u32,

    /// Label column width in pixels
    #[arg(long, default_value_t = 240)]
    pub label_width: u32,

    /// Cap on the visible panel height in pixels
    #[arg(long)]
    pub max_height: Option<u32>,

    /// Print the layout as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of the gantt command
#[derive(Debug)]
pub struct GanttResult {
    pub chart: InteractiveChart,
    pub json: bool,
}

impl std::fmt::Display for GanttResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.json {
            let text = serde_json::to_string_pretty(&self.chart).map_err(|_| std::fmt::Error)?;
            return write!(f, "{text}");
        }
        match &self.chart {
            InteractiveChart::Ready(layout) => write!(f, "{}", format_chart_layout(layout)),
            InteractiveChart::Empty(empty) => write!(f, "{}", empty.message()),
        }
    }
}

impl GanttCommand {
    /// Build the chart layout for the selected project.
    pub fn execute(&self, store: &JsonStore) -> CliResult<GanttResult> {
        let data = store.load()?;
        let project = data.project(&self.project)?;

        let options = ChartOptions {
            row_height: self.row_height,
            label_column_width: self.label_width,
            min_inner_width: data.view.min_inner_width(self.label_width, self.chart.min_width),
            zoom: self.chart.zoom_or(&data.view)?,
            max_panel_height: self.max_height.or(data.view.panel_height),
        };

        Ok(GanttResult {
            chart: build_interactive_chart(project, &data.agents, options),
            json: self.json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{sample_data, temp_store};
    use pilot_core::{CoreError, EmptyChart};

    fn gantt(project: &str) -> GanttCommand {
        GanttCommand {
            project: project.to_string(),
            chart: ChartArgs::default(),
            row_height: 30,
            label_width: 240,
            max_height: None,
            json: false,
        }
    }

    #[test]
    fn test_gantt_text_output() {
        let (store, _dir) = temp_store("gantt-text");
        store.save(&sample_data()).unwrap();

        let result = gantt("launch").execute(&store).unwrap();
        let text = result.to_string();
        assert!(text.starts_with("Launch\n70 px/day"));
        assert!(text.contains("Alpha · Ada"));
        assert!(text.ends_with("Timeline: Jan 1 → Jan 10 (10 days)"));
    }

    #[test]
    fn test_gantt_json_output() {
        let (store, _dir) = temp_store("gantt-json");
        store.save(&sample_data()).unwrap();

        let mut cmd = gantt("p1");
        cmd.json = true;
        let value: serde_json::Value =
            serde_json::from_str(&cmd.execute(&store).unwrap().to_string()).unwrap();
        assert_eq!(value["state"], "ready");
        assert_eq!(value["chart"]["rows"][0]["label"], "Alpha · Ada");
    }

    #[test]
    fn test_gantt_uses_stored_zoom() {
        let (store, _dir) = temp_store("gantt-zoom");
        let mut data = sample_data();
        data.view.zoom = pilot_core::Zoom::new(2.0);
        store.save(&data).unwrap();

        let mut cmd = gantt("p1");
        cmd.chart.min_width = 0;
        let result = cmd.execute(&store).unwrap();
        assert_eq!(result.chart.layout().unwrap().pixels_per_day, 56);
    }

    #[test]
    fn test_gantt_fills_remembered_panel_width() {
        let (store, _dir) = temp_store("gantt-panel");
        let mut data = sample_data();
        data.view.panel_width = Some(1240);
        store.save(&data).unwrap();

        // 1240 px panel minus the 240 px label column, over 10 days
        let layout = gantt("p1").execute(&store).unwrap().chart;
        let layout = layout.layout().unwrap();
        assert_eq!(layout.pixels_per_day, 100);
        assert_eq!(layout.inner_width, 1000);
    }

    #[test]
    fn test_gantt_empty_project() {
        let (store, _dir) = temp_store("gantt-empty");
        store.save(&sample_data()).unwrap();

        let result = gantt("Backlog").execute(&store).unwrap();
        assert_eq!(result.chart, InteractiveChart::Empty(EmptyChart::NoDatedTasks));
        assert_eq!(result.to_string(), "Tasks need start dates to draw Gantt.");
    }

    #[test]
    fn test_gantt_unknown_project() {
        let (store, _dir) = temp_store("gantt-missing");
        store.save(&sample_data()).unwrap();

        let err = gantt("nope").execute(&store).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::Core(CoreError::ProjectNotFound { .. })
        ));
    }
}
