//! Output formatting module for pilot
//!
//! Provides table formatting for projects, chart layouts and notices.

use pilot_core::{ChartLayout, DueNotice, Project};

/// Maximum width for title and label columns before truncation
const MAX_TITLE_WIDTH: usize = 32;

/// Truncate a string to the specified maximum width in characters, adding
/// an ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    let count = s.chars().count();
    if count <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{head}...")
    }
}

fn width_of<'a>(header: &str, values: impl Iterator<Item = &'a str>, cap: usize) -> usize {
    values
        .map(|v| v.chars().count().min(cap))
        .max()
        .unwrap_or(0)
        .max(header.len())
}

fn pad(s: &str, width: usize) -> String {
    let count = s.chars().count();
    format!("{s}{}", " ".repeat(width.saturating_sub(count)))
}

/// Format projects into an aligned table.
///
/// ```text
/// ID  Title   Status   Due                    Tasks
/// --  ------  -------  ---------------------  -----
/// p1  Launch  On Hold  Mar 5, 2024, 6:30 PM   3
/// ```
pub fn format_project_table(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let dues: Vec<String> = projects
        .iter()
        .map(|p| {
            let label = p.due_label();
            label.strip_prefix("Due: ").unwrap_or("-").to_string()
        })
        .collect();

    let id_w = width_of("ID", projects.iter().map(|p| p.id.as_str()), usize::MAX);
    let title_w = width_of(
        "Title",
        projects.iter().map(|p| p.title.as_str()),
        MAX_TITLE_WIDTH,
    );
    let status_w = width_of(
        "Status",
        projects.iter().map(|p| p.status.label()),
        usize::MAX,
    );
    let due_w = width_of("Due", dues.iter().map(String::as_str), usize::MAX);

    let mut output = String::new();
    output.push_str(&format!(
        "{}  {}  {}  {}  Tasks\n",
        pad("ID", id_w),
        pad("Title", title_w),
        pad("Status", status_w),
        pad("Due", due_w),
    ));
    output.push_str(&format!(
        "{:->id_w$}  {:->title_w$}  {:->status_w$}  {:->due_w$}  -----\n",
        "", "", "", ""
    ));

    for (project, due) in projects.iter().zip(&dues) {
        output.push_str(&format!(
            "{}  {}  {}  {}  {}\n",
            pad(&project.id, id_w),
            pad(&truncate(&project.title, MAX_TITLE_WIDTH), title_w),
            pad(project.status.label(), status_w),
            pad(due, due_w),
            project.tasks.len(),
        ));
    }

    output.trim_end().to_string()
}

/// Format a chart layout as a text summary with one line per bar.
pub fn format_chart_layout(layout: &ChartLayout) -> String {
    let label_w = width_of(
        "Task",
        layout.rows.iter().map(|r| r.label.as_str()),
        MAX_TITLE_WIDTH,
    );

    let mut output = String::new();
    output.push_str(&format!("{}\n", layout.title));
    output.push_str(&format!(
        "{} px/day, {} px wide, {} rows\n\n",
        layout.pixels_per_day,
        layout.inner_width,
        layout.rows.len()
    ));

    output.push_str(&format!(
        "{}  {:>6}  {:>6}  Color    Text\n",
        pad("Task", label_w),
        "X",
        "Width"
    ));
    output.push_str(&format!(
        "{:->label_w$}  ------  ------  -------  ----\n",
        ""
    ));

    for row in &layout.rows {
        output.push_str(&format!(
            "{}  {:>6}  {:>6}  {}  {}\n",
            pad(&truncate(&row.label, MAX_TITLE_WIDTH), label_w),
            row.bar.x,
            row.bar.width,
            row.bar.color,
            row.bar.text.as_deref().unwrap_or("-"),
        ));
    }

    output.push('\n');
    output.push_str(&layout.footer);
    output
}

/// Format due-soon notices, one per line.
pub fn format_notices(notices: &[DueNotice]) -> String {
    if notices.is_empty() {
        return "Nothing due in the next 24 hours.".to_string();
    }

    let kind_w = notices.iter().map(|n| n.kind.as_str().len()).max().unwrap_or(0);
    notices
        .iter()
        .map(|notice| {
            format!(
                "{}  {}  {}",
                pad(notice.kind.as_str(), kind_w),
                notice.display_text,
                notice.headline()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
