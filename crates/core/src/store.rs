//! JSON file store for projects, agents and view settings.
//!
//! The on-disk document uses camelCase keys and empty strings for absent
//! values. Records are validated when loaded: a bad date becomes absent, a
//! record without a title is dropped, and both are logged as warnings.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dates::{DATE_FORMAT, TIME_FORMAT, parse_date, parse_time};
use crate::error::{CoreError, CoreResult};
use crate::models::{Agent, AgentDirectory, Project, ProjectStatus, Task};
use crate::settings::ViewSettings;

/// File name used under the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// Everything a host keeps between runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreData {
    pub projects: Vec<Project>,
    pub agents: AgentDirectory,
    pub view: ViewSettings,
}

impl StoreData {
    /// Find a project by id, or by title ignoring case.
    pub fn project(&self, key: &str) -> CoreResult<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == key)
            .or_else(|| {
                self.projects
                    .iter()
                    .find(|p| p.title.eq_ignore_ascii_case(key))
            })
            .ok_or_else(|| CoreError::ProjectNotFound {
                project: key.to_string(),
            })
    }
}

/// Reads and writes [`StoreData`] at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the store. A missing file reads as an empty store.
    pub fn load(&self) -> CoreResult<StoreData> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "store file missing, starting empty");
                return Ok(StoreData::default());
            }
            Err(source) => {
                return Err(CoreError::ReadStore {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        self.parse(&text)
    }

    /// Parse a store document from text.
    pub fn parse(&self, text: &str) -> CoreResult<StoreData> {
        if text.trim().is_empty() {
            return Ok(StoreData::default());
        }
        let document: StoreDocument =
            serde_json::from_str(text).map_err(|source| CoreError::ParseStore {
                path: self.path.clone(),
                source,
            })?;
        Ok(document.into_data())
    }

    /// Write the store atomically: temp file, sync, rename.
    pub fn save(&self, data: &StoreData) -> CoreResult<()> {
        let document = StoreDocument::from_data(data);
        let json = serde_json::to_string_pretty(&document)
            .map_err(|source| CoreError::EncodeStore { source })?;

        let write_err = |source: std::io::Error| CoreError::WriteStore {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = std::fs::File::create(&tmp_path).map_err(write_err)?;
        file.write_all(json.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        std::fs::rename(&tmp_path, &self.path).map_err(write_err)?;

        tracing::debug!(
            path = %self.path.display(),
            projects = data.projects.len(),
            "saved store"
        );
        Ok(())
    }
}

// =============================================================================
// On-disk records
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoreDocument {
    projects: Vec<ProjectRecord>,
    agents: Vec<AgentRecord>,
    view: ViewSettings,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProjectRecord {
    id: String,
    title: String,
    notes: String,
    due_date: String,
    due_time: String,
    status: String,
    tasks: Vec<TaskRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct TaskRecord {
    id: String,
    title: String,
    notes: String,
    start: String,
    end: String,
    agent: String,
}

/// Agents are either bare names or `{name, color}` objects.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum AgentRecord {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        color: String,
    },
}

impl StoreDocument {
    fn into_data(self) -> StoreData {
        let projects = self
            .projects
            .into_iter()
            .filter_map(ProjectRecord::into_project)
            .collect();

        let agents = AgentDirectory::new(self.agents.into_iter().map(|record| match record {
            AgentRecord::Name(name) => Agent::with_color(name, ""),
            AgentRecord::Full { name, color } => Agent::with_color(name, color),
        }));

        StoreData {
            projects,
            agents,
            view: self.view,
        }
    }

    fn from_data(data: &StoreData) -> Self {
        Self {
            projects: data.projects.iter().map(ProjectRecord::from_project).collect(),
            agents: data
                .agents
                .iter()
                .map(|a| AgentRecord::Full {
                    name: a.name.clone(),
                    color: a.color.clone(),
                })
                .collect(),
            view: data.view,
        }
    }
}

impl ProjectRecord {
    fn into_project(self) -> Option<Project> {
        let mut project = match Project::new(self.id.clone(), self.title) {
            Ok(project) => project,
            Err(e) => {
                tracing::warn!(id = %self.id, error = %e, "dropping project record");
                return None;
            }
        };
        project.notes = self.notes;
        project.due_date = optional_field(&self.due_date, "dueDate", parse_date);
        project.due_time = optional_field(&self.due_time, "dueTime", parse_time);
        project.status = parse_status(&self.status);

        for record in self.tasks {
            if let Some(task) = record.into_task() {
                project.tasks.push(task);
            }
        }
        for task in &mut project.tasks {
            task.clamp_end();
        }
        project.sort_tasks();
        Some(project)
    }

    fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            title: project.title.clone(),
            notes: project.notes.clone(),
            due_date: format_optional(project.due_date.map(|d| d.format(DATE_FORMAT))),
            due_time: format_optional(project.due_time.map(|t| t.format(TIME_FORMAT))),
            status: project.status.as_str().to_string(),
            tasks: project.tasks.iter().map(TaskRecord::from_task).collect(),
        }
    }
}

impl TaskRecord {
    fn into_task(self) -> Option<Task> {
        let title = self.title.trim();
        if title.is_empty() {
            tracing::warn!(id = %self.id, "dropping task record without a title");
            return None;
        }
        Some(Task {
            id: self.id,
            title: title.to_string(),
            notes: self.notes,
            start: optional_field(&self.start, "start", parse_date),
            end: optional_field(&self.end, "end", parse_date),
            agent: Some(self.agent).filter(|a| !a.trim().is_empty()),
        })
    }

    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            notes: task.notes.clone(),
            start: format_optional(task.start.map(|d| d.format(DATE_FORMAT))),
            end: format_optional(task.end.map(|d| d.format(DATE_FORMAT))),
            agent: task.agent.clone().unwrap_or_default(),
        }
    }
}

/// Parse a possibly-empty field; unparseable values are logged and dropped.
fn optional_field<T>(value: &str, field: &str, parse: impl Fn(&str) -> CoreResult<T>) -> Option<T> {
    if value.trim().is_empty() {
        return None;
    }
    match parse(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(field, error = %e, "ignoring malformed field");
            None
        }
    }
}

fn format_optional(value: Option<impl std::fmt::Display>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_status(value: &str) -> ProjectStatus {
    match value {
        "" | "active" => ProjectStatus::Active,
        "onhold" => ProjectStatus::OnHold,
        "complete" => ProjectStatus::Complete,
        other => {
            tracing::warn!(status = other, "unknown project status, using active");
            ProjectStatus::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AgentColors;
    use crate::settings::Zoom;
    use chrono::{NaiveDate, NaiveTime};

    fn temp_store(name: &str) -> (JsonStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "pilot-store-test-{}-{}-{:?}-{}",
            name,
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        (JsonStore::new(dir.join(STORE_FILE_NAME)), dir)
    }

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    const DOCUMENT: &str = r##"{
        "projects": [{
            "id": "p1",
            "title": "Launch",
            "notes": "",
            "dueDate": "2024-03-05",
            "dueTime": "",
            "status": "onhold",
            "tasks": [
                {"id": "t2", "title": "Ship", "start": "2024-01-10", "end": "", "agent": "Grace"},
                {"id": "t1", "title": "Draft", "start": "2024-01-01", "end": "2024-01-03", "agent": "Ada"},
                {"id": "t3", "title": "Backwards", "start": "2024-01-05", "end": "2024-01-02"}
            ]
        }],
        "agents": [{"name": "Ada", "color": "#123456"}, {"name": "Linus"}],
        "view": {"zoom": 1.4}
    }"##;

    #[test]
    fn test_parse_document() {
        let store = JsonStore::new("unused.json");
        let data = store.parse(DOCUMENT).unwrap();

        assert_eq!(data.projects.len(), 1);
        let project = &data.projects[0];
        assert_eq!(project.status, ProjectStatus::OnHold);
        assert_eq!(project.due_date, Some(d("2024-03-05")));
        assert_eq!(project.due_time, None);

        let ids: Vec<&str> = project.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t3", "t2"], "tasks sorted by start");
        assert_eq!(project.tasks[0].end, Some(d("2024-01-03")));
        assert_eq!(project.tasks[1].end, Some(d("2024-01-05")), "end clamped");
        assert_eq!(project.tasks[2].end, None);

        assert_eq!(data.agents.agent_color("Ada").as_deref(), Some("#123456"));
        assert_eq!(data.agents.agent_color("Linus").as_deref(), Some("#ef4444"));
        assert_eq!(data.view.zoom, Zoom::new(1.4));
    }

    #[test]
    fn test_parse_legacy_agent_names() {
        let store = JsonStore::new("unused.json");
        let data = store.parse(r#"{"agents": ["Ada", "Ada", "Linus"]}"#).unwrap();
        assert_eq!(data.agents.len(), 2);
        assert_eq!(data.agents.agent_color("Ada").as_deref(), Some("#f59e0b"));
    }

    #[test]
    fn test_parse_drops_and_sanitizes_bad_records() {
        let store = JsonStore::new("unused.json");
        let data = store
            .parse(
                r#"{"projects": [
                    {"id": "p0", "title": "  "},
                    {"id": "p1", "title": "Ok", "dueDate": "someday", "dueTime": "99:99",
                     "status": "archived",
                     "tasks": [{"id": "t0", "title": ""}, {"id": "t1", "title": "X", "start": "nope"}]}
                ]}"#,
            )
            .unwrap();

        assert_eq!(data.projects.len(), 1);
        let project = &data.projects[0];
        assert_eq!(project.due_date, None);
        assert_eq!(project.due_time, None);
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.tasks.len(), 1);
        assert_eq!(project.tasks[0].start, None);
    }

    #[test]
    fn test_parse_empty_text_is_empty_store() {
        let store = JsonStore::new("unused.json");
        assert_eq!(store.parse("  ").unwrap(), StoreData::default());
    }

    #[test]
    fn test_parse_malformed_json_errors() {
        let store = JsonStore::new("broken.json");
        let result = store.parse("{ not json");
        assert!(matches!(result, Err(CoreError::ParseStore { .. })));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (store, dir) = temp_store("missing");
        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), StoreData::default());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_save_then_load_preserves_data() {
        let (store, dir) = temp_store("save");
        let project = Project::new("p1", "Launch")
            .unwrap()
            .with_due(d("2024-03-05"), NaiveTime::from_hms_opt(18, 30, 0))
            .with_status(ProjectStatus::Complete)
            .with_tasks(vec![
                Task::new("t1", "Draft", d("2024-01-01"))
                    .unwrap()
                    .with_end(d("2024-01-03"))
                    .with_agent("Ada")
                    .with_notes("outline first"),
            ]);
        let mut data = StoreData {
            projects: vec![project],
            agents: AgentDirectory::new(vec![Agent::new("Ada")]),
            view: ViewSettings::default(),
        };
        data.view.zoom = Zoom::new(2.0);
        data.view.panel_height = Some(480);

        store.save(&data).unwrap();
        assert!(store.exists());

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"dueTime\": \"18:30\""));
        assert!(text.contains("\"panelHeight\": 480"));

        assert_eq!(store.load().unwrap(), data);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_project_lookup_by_id_or_title() {
        let store = JsonStore::new("unused.json");
        let data = store.parse(DOCUMENT).unwrap();

        assert_eq!(data.project("p1").unwrap().title, "Launch");
        assert_eq!(data.project("launch").unwrap().id, "p1");
        assert!(matches!(
            data.project("nope"),
            Err(CoreError::ProjectNotFound { .. })
        ));
    }
}
