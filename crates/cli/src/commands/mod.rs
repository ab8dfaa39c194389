//! CLI commands for Pilot
//!
//! This module contains all subcommand implementations for the pilot CLI.

pub mod export;
pub mod gantt;
pub mod notices;
pub mod projects;
pub mod zoom;

pub use export::ExportCommand;
pub use gantt::GanttCommand;
pub use notices::{NoticesCommand, NoticesOutcome};
pub use projects::ProjectsCommand;
pub use zoom::{ZoomAction, ZoomCommand};

use clap::{Args, Subcommand};
use pilot_core::{DEFAULT_MIN_INNER_WIDTH, JsonStore, ViewSettings, Zoom};

use crate::error::{CliError, CliResult};

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List projects
    Projects(ProjectsCommand),

    /// Print a project's Gantt chart layout
    Gantt(GanttCommand),

    /// Export a project's Gantt chart as PNG
    Export(ExportCommand),

    /// Show projects and tasks due in the next 24 hours
    Notices(NoticesCommand),

    /// Change or show the chart zoom level
    Zoom(ZoomCommand),
}

impl Command {
    /// Execute the command against the given store.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the store cannot be read or written, the
    /// project does not exist, or the chart cannot be rendered.
    pub async fn execute(&self, store: &JsonStore) -> CliResult<String> {
        match self {
            Command::Projects(cmd) => cmd.execute(store).map(|r| r.to_string()),
            Command::Gantt(cmd) => cmd.execute(store).map(|r| r.to_string()),
            Command::Export(cmd) => cmd.execute(store).map(|r| r.to_string()),
            Command::Notices(cmd) => cmd.execute(store).await.map(|r| r.to_string()),
            Command::Zoom(cmd) => cmd.execute(store).map(|r| r.to_string()),
        }
    }
}

/// Scale flags shared by the chart commands
#[derive(Debug, Clone, Args)]
pub struct ChartArgs {
    /// Zoom factor (defaults to the saved zoom)
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Minimum timeline width in pixels
    #[arg(long, default_value_t = DEFAULT_MIN_INNER_WIDTH)]
    pub min_width: u32,
}

impl Default for ChartArgs {
    fn default() -> Self {
        Self {
            zoom: None,
            min_width: DEFAULT_MIN_INNER_WIDTH,
        }
    }
}

impl ChartArgs {
    /// The zoom to draw with: the flag when given, else the saved zoom.
    pub fn zoom_or(&self, view: &ViewSettings) -> CliResult<f64> {
        match self.zoom {
            Some(z) if !z.is_finite() || z <= 0.0 => Err(CliError::InvalidArgument {
                message: format!("--zoom must be a positive number, got {z}"),
            }),
            Some(z) => Ok(Zoom::new(z).value()),
            None => Ok(view.zoom.value()),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveTime;
    use pilot_core::{
        Agent, AgentDirectory, JsonStore, Project, ProjectStatus, StoreData, Task, parse_date,
    };
    use std::path::{Path, PathBuf};

    /// Temporary directory removed on drop
    pub struct TempDir(PathBuf);

    impl TempDir {
        pub fn new(name: &str) -> Self {
            Self(std::env::temp_dir().join(format!(
                "pilot-{}-{}-{:?}-{}",
                name,
                std::process::id(),
                std::thread::current().id(),
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap()
                    .as_nanos()
            )))
        }

        pub fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    /// A store in a fresh directory. The directory is created on first save.
    pub fn temp_store(name: &str) -> (JsonStore, TempDir) {
        let dir = TempDir::new(name);
        let store = JsonStore::new(dir.path().join(pilot_core::STORE_FILE_NAME));
        (store, dir)
    }

    /// Three projects: "Launch" with two dated tasks, "Backlog" with one
    /// undated task, and the completed "Archive".
    pub fn sample_data() -> StoreData {
        let d = |s| parse_date(s).unwrap();

        let launch = Project::new("p1", "Launch")
            .unwrap()
            .with_due(d("2024-03-05"), NaiveTime::from_hms_opt(18, 30, 0))
            .with_tasks(vec![
                Task::new("t1", "Alpha", d("2024-01-01"))
                    .unwrap()
                    .with_end(d("2024-01-03"))
                    .with_agent("Ada"),
                Task::new("t2", "Beta", d("2024-01-10")).unwrap(),
            ]);

        let mut undated = Task::new("t3", "Someday", d("2024-01-01")).unwrap();
        undated.start = None;
        let backlog = Project::new("p2", "Backlog")
            .unwrap()
            .with_tasks(vec![undated]);

        let archive = Project::new("p3", "Archive")
            .unwrap()
            .with_status(ProjectStatus::Complete)
            .with_tasks(vec![
                Task::new("t4", "Wrap up", d("2023-12-01")).unwrap(),
            ]);

        StoreData {
            projects: vec![launch, backlog, archive],
            agents: AgentDirectory::new([Agent::with_color("Ada", "#fde68a")]),
            ..StoreData::default()
        }
    }
}
