//! Data models for Pilot projects, tasks and agents
//!
//! These are the validated shapes the chart engine and the due-soon scanner
//! work with. Raw stored records are converted into them by the store.

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::color::color_for;
use crate::dates::at_local;
use crate::error::{CoreError, CoreResult};

/// Time a due date falls on when no time of day was given.
pub const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Project status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    OnHold,
    Complete,
}

impl ProjectStatus {
    /// Returns the string representation used in the store
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::OnHold => "onhold",
            ProjectStatus::Complete => "complete",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Complete => "Complete",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A task on a project timeline
///
/// `start` is required when a task is created, but loaded data may lack it;
/// such tasks are left off charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Opaque unique token
    pub id: String,

    /// Non-empty title
    pub title: String,

    /// Free-form notes
    pub notes: String,

    /// First day of work
    pub start: Option<NaiveDate>,

    /// Last day of work; `None` means a single-day task
    pub end: Option<NaiveDate>,

    /// Name of the assigned agent, if any
    pub agent: Option<String>,
}

impl Task {
    /// Create a task, rejecting an empty title.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDate,
    ) -> CoreResult<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(CoreError::validation("Task title is required"));
        }
        Ok(Self {
            id: id.into(),
            title,
            notes: String::new(),
            start: Some(start),
            end: None,
            agent: None,
        })
    }

    /// Set the end date. An end before the start is clamped to the start.
    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self.clamp_end();
        self
    }

    /// Set the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Assign an agent by name. A blank name leaves the task unassigned.
    pub fn with_agent(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.agent = if name.trim().is_empty() {
            None
        } else {
            Some(name)
        };
        self
    }

    /// Pull an end date that precedes the start back onto the start.
    pub fn clamp_end(&mut self) {
        if let (Some(start), Some(end)) = (self.start, self.end)
            && end < start
        {
            tracing::debug!(task = %self.id, %start, %end, "clamping end date to start");
            self.end = Some(start);
        }
    }

    /// Last day the task occupies: the end date, or the start if absent.
    pub fn effective_end(&self) -> Option<NaiveDate> {
        let start = self.start?;
        Some(self.end.map_or(start, |end| end.max(start)))
    }
}

/// A project owning an ordered list of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub notes: String,
    pub due_date: Option<NaiveDate>,
    /// Time of day on `due_date`; end of day when absent
    pub due_time: Option<NaiveTime>,
    pub status: ProjectStatus,
    /// Sorted by (start, title)
    pub tasks: Vec<Task>,
}

impl Project {
    /// Create an active project with no tasks, rejecting an empty title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> CoreResult<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(CoreError::validation("Project title is required"));
        }
        Ok(Self {
            id: id.into(),
            title,
            notes: String::new(),
            due_date: None,
            due_time: None,
            status: ProjectStatus::Active,
            tasks: Vec::new(),
        })
    }

    /// Set the due date and optional time of day
    pub fn with_due(mut self, date: NaiveDate, time: Option<NaiveTime>) -> Self {
        self.due_date = Some(date);
        self.due_time = time;
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Add tasks, keeping the task order invariant
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        for task in tasks {
            self.upsert_task(task);
        }
        self
    }

    /// Insert a task or replace the one with the same id, then re-sort.
    pub fn upsert_task(&mut self, mut task: Task) {
        task.clamp_end();
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
        self.sort_tasks();
    }

    /// Restore the (start, title) ordering of the task list.
    pub fn sort_tasks(&mut self) {
        self.tasks
            .sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.title.cmp(&b.title)));
    }

    /// Absolute due timestamp, if the project has a due date.
    pub fn due_at(&self) -> Option<DateTime<Local>> {
        let date = self.due_date?;
        Some(at_local(date, self.due_time.unwrap_or(END_OF_DAY)))
    }

    /// `Due: Mar 5, 2024, 6:30 PM`, or `No due date`.
    pub fn due_label(&self) -> String {
        match self.due_date {
            Some(date) => {
                let mut label = format!("Due: {}", date.format("%b %-d, %Y"));
                if let Some(time) = self.due_time {
                    label.push_str(&format!(", {}", time.format("%-I:%M %p")));
                }
                label
            }
            None => "No due date".to_string(),
        }
    }
}

/// Order projects for listing: dated projects by due date, undated ones
/// after them, ties broken by title.
pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| {
        let due = match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        };
        due.then_with(|| a.title.cmp(&b.title))
    });
}

/// Source of agent colors for chart rendering
///
/// Returns `None` for names it does not know; renderers then fall back to
/// unassigned styling.
pub trait AgentColors {
    fn agent_color(&self, name: &str) -> Option<String>;
}

/// A named agent with a display color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub color: String,
}

impl Agent {
    /// An agent with its palette color
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let color = color_for(&name).to_string();
        Self { name, color }
    }

    /// An agent with an explicit color
    pub fn with_color(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// The set of known agents, unique by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentDirectory {
    agents: Vec<Agent>,
}

impl AgentDirectory {
    /// Build a directory; blank names are dropped and the first of any
    /// duplicate names wins.
    pub fn new(agents: impl IntoIterator<Item = Agent>) -> Self {
        let mut directory = Self::default();
        for agent in agents {
            directory.insert(agent);
        }
        directory
    }

    /// Add an agent unless one with the same name already exists.
    pub fn insert(&mut self, agent: Agent) -> bool {
        let name = agent.name.trim();
        if name.is_empty() || self.get(name).is_some() {
            return false;
        }
        let color = if agent.color.trim().is_empty() {
            color_for(name).to_string()
        } else {
            agent.color
        };
        self.agents.push(Agent {
            name: name.to_string(),
            color,
        });
        true
    }

    /// Remove an agent. Tasks still naming it render as unassigned.
    pub fn remove(&mut self, name: &str) -> Option<Agent> {
        let index = self.agents.iter().position(|a| a.name == name)?;
        Some(self.agents.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl AgentColors for AgentDirectory {
    fn agent_color(&self, name: &str) -> Option<String> {
        self.get(name).map(|a| a.color.clone())
    }
}
