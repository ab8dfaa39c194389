//! Test infrastructure for integration tests
//!
//! Provides isolated store setup/teardown and command builder helpers.
//! Each test gets its own store file to ensure no shared state.

use std::path::PathBuf;

use pilot_cli::commands::{
    ChartArgs, ExportCommand, GanttCommand, NoticesCommand, ProjectsCommand, ZoomAction,
    ZoomCommand,
};
use pilot_core::{JsonStore, STORE_FILE_NAME};

/// A store document with two open projects, one completed project and a
/// named agent, written the way a hand-edited store file looks.
pub const SAMPLE_STORE: &str = r##"{
  "projects": [
    {
      "id": "p1",
      "title": "Launch",
      "dueDate": "2024-03-05",
      "dueTime": "18:30",
      "status": "active",
      "tasks": [
        { "id": "t2", "title": "Beta", "start": "2024-01-10" },
        { "id": "t1", "title": "Alpha", "start": "2024-01-01", "end": "2024-01-03", "agent": "Ada" }
      ]
    },
    {
      "id": "p2",
      "title": "Backlog",
      "status": "onhold",
      "tasks": [
        { "id": "t3", "title": "Someday" }
      ]
    },
    {
      "id": "p3",
      "title": "Archive",
      "status": "complete",
      "tasks": []
    }
  ],
  "agents": [
    { "name": "Ada", "color": "#fde68a" },
    "Grace"
  ]
}"##;

/// Test context containing an isolated store and temp directory
pub struct TestContext {
    pub store: JsonStore,
    pub temp_dir: PathBuf,
}

impl TestContext {
    /// Create a new test context with an empty store location.
    ///
    /// Each call creates a uniquely named temp directory using process ID,
    /// thread ID, and nanosecond timestamp to guarantee isolation.
    pub fn new() -> Self {
        Self::with_name("ctx")
    }

    /// Create a new test context with a specific suffix for debugging.
    pub fn with_name(name: &str) -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "pilot-integration-{}-{}-{:?}-{}",
            name,
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&temp_dir).unwrap();

        let store = JsonStore::new(temp_dir.join(STORE_FILE_NAME));
        Self { store, temp_dir }
    }

    /// Create a context whose store holds `SAMPLE_STORE`.
    pub fn with_sample(name: &str) -> Self {
        let ctx = Self::with_name(name);
        ctx.write_store(SAMPLE_STORE);
        ctx
    }

    /// Overwrite the store file with raw text.
    pub fn write_store(&self, text: &str) {
        std::fs::write(self.store.path(), text).unwrap();
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

pub fn projects_cmd(completed: bool) -> ProjectsCommand {
    ProjectsCommand { completed }
}

pub fn gantt_cmd(project: &str) -> GanttCommand {
    GanttCommand {
        project: project.to_string(),
        chart: ChartArgs::default(),
        row_height: 30,
        label_width: 240,
        max_height: None,
        json: false,
    }
}

/// Export into the context's temp directory.
pub fn export_cmd(ctx: &TestContext, project: &str) -> ExportCommand {
    ExportCommand {
        project: project.to_string(),
        output: Some(ctx.temp_dir.clone()),
        chart: ChartArgs::default(),
        dpr: 1.0,
        max_width: 10_000,
    }
}

pub fn notices_cmd() -> NoticesCommand {
    NoticesCommand {
        watch: false,
        json: false,
    }
}

pub fn zoom_cmd(action: ZoomAction) -> ZoomCommand {
    ZoomCommand { action }
}
