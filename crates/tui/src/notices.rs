//! Notice center: projects and tasks due in the next 24 hours.
//!
//! The list is recomputed from the loaded projects every
//! [`NOTICE_REFRESH_INTERVAL`] and after each reload. It opens as a popup
//! over the main panels; choosing a notice jumps to its project and task.

use std::time::Instant;

use chrono::{DateTime, Local};
use pilot_core::{DueNotice, NOTICE_REFRESH_INTERVAL, Project, compute_due_soon};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Shown when the window is empty.
pub const NOTHING_DUE: &str = "Nothing due in the next 24 hours.";

/// Due-soon state and popup selection.
#[derive(Debug, Default)]
pub struct NoticeCenter {
    notices: Vec<DueNotice>,
    last_scan: Option<Instant>,
    open: bool,
    selected: usize,
}

impl NoticeCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescan `projects` at `now`. `at` records when, for the refresh timer.
    pub fn refresh(&mut self, projects: &[Project], now: DateTime<Local>, at: Instant) {
        self.notices = compute_due_soon(projects, now);
        self.last_scan = Some(at);
        if self.selected >= self.notices.len() {
            self.selected = self.notices.len().saturating_sub(1);
        }
        tracing::debug!(count = self.notices.len(), "refreshed notices");
    }

    /// Whether the refresh interval has passed since the last scan.
    pub fn needs_refresh(&self, at: Instant) -> bool {
        self.last_scan
            .is_none_or(|last| at.saturating_duration_since(last) >= NOTICE_REFRESH_INTERVAL)
    }

    pub fn notices(&self) -> &[DueNotice] {
        &self.notices
    }

    pub fn has_alert(&self) -> bool {
        !self.notices.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&DueNotice> {
        self.notices.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.notices.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// A rectangle centered in `area`, sized by percentage.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Render the notice center popup.
pub fn render_notice_center(frame: &mut Frame, area: Rect, center: &NoticeCenter) {
    let popup = popup_area(area, 60, 50);
    let block = Block::default()
        .title(" Notice Center ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(notice_lines(center.notices(), center.selected_index()))
        .block(block);
    frame.render_widget(paragraph, popup);
}

/// Heading, then two lines per notice: headline and due text.
fn notice_lines(notices: &[DueNotice], selected: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Due in the next 24 hours",
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
    ];

    if notices.is_empty() {
        lines.push(Line::from(Span::styled(
            NOTHING_DUE,
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    for (index, notice) in notices.iter().enumerate() {
        let is_selected = index == selected;
        let prefix = if is_selected { "> " } else { "  " };
        let style = if is_selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!("{prefix}{}", notice.headline()),
            style,
        )));
        lines.push(Line::from(Span::styled(
            format!("    Due: {}", notice.display_text),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}
