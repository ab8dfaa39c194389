//! Export command for writing a project's chart as a PNG image
//!
//! Implements `pilot export <project>`, rendering the static chart and
//! writing it to `<title>-gantt.png` in the current directory, or to the
//! given `--output` file or directory.

use clap::Args;
use pilot_core::JsonStore;
use pilot_raster::{RasterOptions, render_static_chart};
use std::path::PathBuf;

use crate::commands::ChartArgs;
use crate::error::{CliError, CliResult};

/// Export a project's Gantt chart as PNG
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Project id or title
    pub project: String,

    /// Output file or directory (defaults to the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub chart: ChartArgs,

    /// Device pixel ratio of the backing image
    #[arg(long, default_value_t = 1.0)]
    pub dpr: f64,

    /// Widest image, in logical pixels, before the chart is scaled down
    #[arg(long, default_value_t = pilot_raster::export::DEFAULT_MAX_WIDTH)]
    pub max_width: u32,
}

/// Result of the export command
#[derive(Debug)]
pub struct ExportResult {
    pub path: PathBuf,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub scale: f64,
}

impl std::fmt::Display for ExportResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Export complete!")?;
        writeln!(f, "  Size: {}x{} px", self.pixel_width, self.pixel_height)?;
        if self.scale < 1.0 {
            writeln!(f, "  Scaled to {:.0}% to fit", self.scale * 100.0)?;
        }
        write!(f, "  Output: {}", self.path.display())
    }
}

impl ExportCommand {
    /// Render the chart and write the PNG.
    pub fn execute(&self, store: &JsonStore) -> CliResult<ExportResult> {
        if !self.dpr.is_finite() || self.dpr <= 0.0 {
            return Err(CliError::InvalidArgument {
                message: format!("--dpr must be a positive number, got {}", self.dpr),
            });
        }

        let data = store.load()?;
        let project = data.project(&self.project)?;

        let options = RasterOptions {
            zoom: self.chart.zoom_or(&data.view)?,
            min_inner_width: self.chart.min_width,
            device_pixel_ratio: self.dpr,
            max_width: self.max_width,
        };
        let image = render_static_chart(project, &data.agents, options)?;

        let path = match &self.output {
            Some(path) if path.is_dir() => path.join(&image.file_name),
            Some(path) => path.clone(),
            None => PathBuf::from(&image.file_name),
        };
        image.write_to(&path)?;
        tracing::info!(path = %path.display(), "wrote chart image");

        Ok(ExportResult {
            path,
            pixel_width: image.pixel_width,
            pixel_height: image.pixel_height,
            scale: image.scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{sample_data, temp_store};
    use pilot_raster::RasterError;

    fn export(project: &str, output: Option<PathBuf>) -> ExportCommand {
        ExportCommand {
            project: project.to_string(),
            output,
            chart: ChartArgs::default(),
            dpr: 1.0,
            max_width: 10_000,
        }
    }

    #[test]
    fn test_export_into_directory_uses_suggested_name() {
        let (store, dir) = temp_store("export-dir");
        store.save(&sample_data()).unwrap();

        let result = export("p1", Some(dir.path().to_path_buf()))
            .execute(&store)
            .unwrap();
        assert_eq!(result.path, dir.path().join("Launch-gantt.png"));
        assert!(result.path.exists());
        assert_eq!((result.pixel_width, result.pixel_height), (988, 200));
        assert!(result.to_string().contains("Size: 988x200 px"));
    }

    #[test]
    fn test_export_to_explicit_file() {
        let (store, dir) = temp_store("export-file");
        store.save(&sample_data()).unwrap();

        let target = dir.path().join("chart.png");
        let result = export("Launch", Some(target.clone())).execute(&store).unwrap();
        assert_eq!(result.path, target);
        let bytes = std::fs::read(&target).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_export_rejects_bad_dpr() {
        let (store, _dir) = temp_store("export-dpr");
        let mut cmd = export("p1", None);
        cmd.dpr = 0.0;
        assert!(matches!(
            cmd.execute(&store),
            Err(CliError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_export_project_without_dated_tasks() {
        let (store, dir) = temp_store("export-undated");
        store.save(&sample_data()).unwrap();

        let err = export("Backlog", Some(dir.path().to_path_buf()))
            .execute(&store)
            .unwrap_err();
        assert!(matches!(err, CliError::Raster(RasterError::NoDatedTasks)));
        assert_eq!(err.to_string(), "Tasks need start dates to draw Gantt.");
    }

    #[test]
    fn test_export_result_display_mentions_scaling() {
        let result = ExportResult {
            path: PathBuf::from("Launch-gantt.png"),
            pixel_width: 10_000,
            pixel_height: 80,
            scale: 0.5,
        };
        let text = result.to_string();
        assert!(text.contains("Scaled to 50% to fit"));
        assert!(text.ends_with("Output: Launch-gantt.png"));
    }
}
