//! Due-soon scanning over a rolling 24 hour horizon.
//!
//! The scan is stateless: hosts call [`compute_due_soon`] again on every
//! refresh tick and after every data change.

use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;

use crate::dates::at_local;
use crate::models::{END_OF_DAY, Project};

/// How far ahead of `now` an item counts as due soon.
pub const DUE_SOON_WINDOW: TimeDelta = TimeDelta::hours(24);

/// How often hosts rescan.
pub const NOTICE_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// What a notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Project,
    Task,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Project => "project",
            NoticeKind::Task => "task",
        }
    }
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A project or task falling due within the horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueNotice {
    pub kind: NoticeKind,
    pub project_id: String,
    pub project_title: String,
    /// Set for task notices only
    pub task_id: Option<String>,
    pub title: String,
    pub due_at: DateTime<Local>,
    pub display_text: String,
}

impl DueNotice {
    /// `title` for a project, `title · project` for a task.
    pub fn headline(&self) -> String {
        match self.kind {
            NoticeKind::Project => self.title.clone(),
            NoticeKind::Task => format!("{} · {}", self.title, self.project_title),
        }
    }
}

/// Collect every project and task due between `now` and `now + 24h`,
/// both ends inclusive, ordered by due time.
pub fn compute_due_soon(projects: &[Project], now: DateTime<Local>) -> Vec<DueNotice> {
    let horizon = now + DUE_SOON_WINDOW;
    let in_window = |due: &DateTime<Local>| *due >= now && *due <= horizon;

    let mut notices = Vec::new();
    for project in projects {
        if let (Some(date), Some(due_at)) = (project.due_date, project.due_at())
            && in_window(&due_at)
        {
            let mut display_text = date.format("%b %-d, %Y").to_string();
            if let Some(time) = project.due_time {
                display_text.push_str(&format!(", {}", time.format("%-I:%M %p")));
            }
            notices.push(DueNotice {
                kind: NoticeKind::Project,
                project_id: project.id.clone(),
                project_title: project.title.clone(),
                task_id: None,
                title: project.title.clone(),
                due_at,
                display_text,
            });
        }

        for task in &project.tasks {
            let Some(end) = task.effective_end() else {
                continue;
            };
            let due_at = at_local(end, END_OF_DAY);
            if !in_window(&due_at) {
                continue;
            }
            notices.push(DueNotice {
                kind: NoticeKind::Task,
                project_id: project.id.clone(),
                project_title: project.title.clone(),
                task_id: Some(task.id.clone()),
                title: task.title.clone(),
                due_at,
                display_text: end.format("%b %-d").to_string(),
            });
        }
    }

    // Stable: ties keep project-then-task scan order
    notices.sort_by_key(|notice| notice.due_at);
    tracing::debug!(count = notices.len(), %now, "computed due-soon notices");
    notices
}
