//! Projects command for listing projects
//!
//! Implements `pilot projects`, listing open projects by default or
//! completed ones with `--completed`.

use clap::Args;
use pilot_core::{JsonStore, Project, ProjectStatus, sort_projects};

use crate::error::CliResult;
use crate::output::format_project_table;

/// List projects
#[derive(Debug, Args)]
pub struct ProjectsCommand {
    /// Show completed projects instead of open ones
    #[arg(long)]
    pub completed: bool,
}

/// Result of the projects command
#[derive(Debug)]
pub struct ProjectsResult {
    pub projects: Vec<Project>,
}

impl std::fmt::Display for ProjectsResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_project_table(&self.projects))
    }
}

impl ProjectsCommand {
    /// Load the store and select projects for the requested view.
    pub fn execute(&self, store: &JsonStore) -> CliResult<ProjectsResult> {
        let data = store.load()?;
        let mut projects: Vec<Project> = data
            .projects
            .into_iter()
            .filter(|p| (p.status == ProjectStatus::Complete) == self.completed)
            .collect();
        sort_projects(&mut projects);
        Ok(ProjectsResult { projects })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{sample_data, temp_store};

    #[test]
    fn test_lists_open_projects_sorted() {
        let (store, _dir) = temp_store("projects-open");
        store.save(&sample_data()).unwrap();

        let result = ProjectsCommand { completed: false }.execute(&store).unwrap();
        let titles: Vec<&str> = result.projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Launch", "Backlog"]);
    }

    #[test]
    fn test_lists_completed_projects() {
        let (store, _dir) = temp_store("projects-done");
        store.save(&sample_data()).unwrap();

        let result = ProjectsCommand { completed: true }.execute(&store).unwrap();
        assert_eq!(result.projects.len(), 1);
        assert_eq!(result.projects[0].title, "Archive");
        assert!(result.to_string().contains("Complete"));
    }

    #[test]
    fn test_empty_store() {
        let (store, _dir) = temp_store("projects-empty");
        let result = ProjectsCommand { completed: false }.execute(&store).unwrap();
        assert_eq!(result.to_string(), "No projects found.");
    }
}
