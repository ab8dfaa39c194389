//! Project list panel.
//!
//! Shows either the open or the completed projects, dated projects first,
//! with the selected project highlighted.

use pilot_core::{Project, ProjectStatus, sort_projects};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Which projects the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectsView {
    /// Active and on-hold projects.
    #[default]
    Open,
    Completed,
}

impl ProjectsView {
    pub fn toggle(self) -> Self {
        match self {
            Self::Open => Self::Completed,
            Self::Completed => Self::Open,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Open => " Projects ",
            Self::Completed => " Completed ",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Open => "No open projects",
            Self::Completed => "No completed projects",
        }
    }

    /// Whether a project belongs in this view.
    pub fn includes(self, project: &Project) -> bool {
        (project.status == ProjectStatus::Complete) == (self == Self::Completed)
    }
}

/// The projects in `view`, in list order.
pub fn visible_projects(projects: &[Project], view: ProjectsView) -> Vec<Project> {
    let mut visible: Vec<Project> = projects
        .iter()
        .filter(|p| view.includes(p))
        .cloned()
        .collect();
    sort_projects(&mut visible);
    visible
}

/// Render the project list panel.
pub fn render_projects_panel(
    frame: &mut Frame,
    area: Rect,
    projects: &[Project],
    selected_index: usize,
    view: ProjectsView,
    is_focused: bool,
) {
    let border_color = if is_focused {
        Color::Yellow
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .title(view.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if projects.is_empty() {
        let paragraph = Paragraph::new(view.empty_message())
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = projects
        .iter()
        .enumerate()
        .map(|(i, project)| project_line(project, i == selected_index))
        .collect();

    // Keep the selection visible in short panels
    let visible_rows = area.height.saturating_sub(2) as usize;
    let scroll = selected_index.saturating_sub(visible_rows.saturating_sub(1));

    let list = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(list, area);
}

/// Render one project as a status marker, title and short due date.
fn project_line(project: &Project, is_selected: bool) -> Line<'static> {
    let status_indicator = match project.status {
        ProjectStatus::Active => "[ ]",
        ProjectStatus::OnHold => "[~]",
        ProjectStatus::Complete => "[x]",
    };

    let style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
            .bg(Color::DarkGray)
    } else {
        match project.status {
            ProjectStatus::OnHold => Style::default().fg(Color::DarkGray),
            _ => Style::default().fg(Color::White),
        }
    };

    let mut spans = vec![Span::styled(
        format!("{} {}", status_indicator, project.title),
        style,
    )];
    if let Some(date) = project.due_date {
        spans.push(Span::styled(
            format!("  {}", date.format("%b %-d")),
            Style::default().fg(Color::Magenta),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pilot_core::parse_date;

    fn projects() -> Vec<Project> {
        vec![
            Project::new("p1", "Zeta").unwrap(),
            Project::new("p2", "Launch")
                .unwrap()
                .with_due(parse_date("2024-03-05").unwrap(), None),
            Project::new("p3", "Archive")
                .unwrap()
                .with_status(ProjectStatus::Complete),
            Project::new("p4", "Paused")
                .unwrap()
                .with_status(ProjectStatus::OnHold),
        ]
    }

    #[test]
    fn test_projects_view_toggle() {
        assert_eq!(ProjectsView::Open.toggle(), ProjectsView::Completed);
        assert_eq!(ProjectsView::Completed.toggle(), ProjectsView::Open);
        assert_eq!(ProjectsView::default(), ProjectsView::Open);
    }

    #[test]
    fn test_open_view_lists_dated_first() {
        let visible = visible_projects(&projects(), ProjectsView::Open);
        let titles: Vec<&str> = visible.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Launch", "Paused", "Zeta"]);
    }

    #[test]
    fn test_completed_view() {
        let visible = visible_projects(&projects(), ProjectsView::Completed);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "p3");
    }

    #[test]
    fn test_project_line_shows_due_date() {
        let project = &projects()[1];
        let line = project_line(project, false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[ ] Launch  Mar 5");
    }

    #[test]
    fn test_selected_project_line_is_highlighted() {
        let line = project_line(&projects()[0], true);
        assert_eq!(line.spans[0].style.fg, Some(Color::Yellow));
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_on_hold_marker() {
        let line = project_line(&projects()[3], false);
        assert!(line.spans[0].content.starts_with("[~] Paused"));
    }
}
