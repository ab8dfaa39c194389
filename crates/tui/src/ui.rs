//! UI rendering for the TUI.
//!
//! Provides layout and widget rendering using ratatui.

use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::navigation::render_projects_panel;
use crate::notices::render_notice_center;
use crate::timeline::render_timeline_view;

/// Legend text for keyboard shortcuts.
const LEGEND: &str = " [j/k] Select  [h/l] Scroll  [Tab] Focus  [+/-/0] Zoom  [n] Notices  [e] Export  [c] Completed  [r] Reload  [q] Quit ";

/// Draw the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = create_main_layout(frame.area());

    draw_header(frame, chunks[0], app, Local::now());

    render_projects_panel(
        frame,
        chunks[1],
        app.projects(),
        app.selected_index(),
        app.projects_view(),
        app.focused_panel().is_projects(),
    );

    render_timeline_view(
        frame,
        chunks[2],
        app.chart(),
        app.timeline_state(),
        &app.zoom().to_string(),
        app.focused_panel().is_chart(),
    );

    draw_legend(frame, chunks[3], app.status());

    if app.notices().is_open() {
        render_notice_center(frame, frame.area(), app.notices());
    }
}

/// Create the main layout: header, project list, chart, legend.
fn create_main_layout(area: Rect) -> Vec<Rect> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Clock and notice badge
            Constraint::Min(0),    // Panels
            Constraint::Length(1), // Legend bar
        ])
        .split(area);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[1]);

    vec![rows[0], panels[0], panels[1], rows[2]]
}

/// Header text: app name, then the live clock.
fn header_text(now: DateTime<Local>) -> String {
    format!(" Pilot  {}", now.format("%a, %b %-d, %Y \u{2022} %H:%M:%S"))
}

/// Badge shown while anything is due soon.
fn notice_badge(count: usize) -> Option<String> {
    (count > 0).then(|| format!(" {count} due soon [n] "))
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, now: DateTime<Local>) {
    let mut spans = vec![Span::styled(
        header_text(now),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if let Some(badge) = notice_badge(app.notices().notices().len()) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            badge,
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the legend bar, or the last action's outcome when there is one.
fn draw_legend(frame: &mut Frame, area: Rect, status: Option<&str>) {
    let legend = match status {
        Some(message) if message.starts_with("error:") => Paragraph::new(format!(" {message} "))
            .style(Style::default().fg(Color::White).bg(Color::Red)),
        Some(message) => Paragraph::new(format!(" {message} "))
            .style(Style::default().fg(Color::Black).bg(Color::Green)),
        None => Paragraph::new(LEGEND).style(Style::default().fg(Color::Black).bg(Color::Cyan)),
    };

    frame.render_widget(legend, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    #[test]
    fn test_legend_mentions_zoom_and_export() {
        assert!(LEGEND.contains("Zoom"));
        assert!(LEGEND.contains("Export"));
    }

    #[test]
    fn test_create_main_layout_produces_four_chunks() {
        let area = Rect::new(0, 0, 80, 24);
        let chunks = create_main_layout(area);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].height, 1);
        assert_eq!(chunks[3].height, 1);
        assert_eq!(chunks[1].height, 22);
        assert_eq!(chunks[1].width + chunks[2].width, 80);
    }

    #[test]
    fn test_create_main_layout_small_terminal() {
        let area = Rect::new(0, 0, 20, 3);
        let chunks = create_main_layout(area);
        assert_eq!(chunks.len(), 4);
    }

    #[test]
    fn test_header_text_shows_clock() {
        let now = Local
            .from_local_datetime(
                &chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
                    .unwrap()
                    .and_time(NaiveTime::from_hms_opt(9, 5, 7).unwrap()),
            )
            .single()
            .unwrap();
        assert_eq!(
            header_text(now),
            " Pilot  Tue, Mar 5, 2024 \u{2022} 09:05:07"
        );
    }

    #[test]
    fn test_notice_badge() {
        assert_eq!(notice_badge(0), None);
        assert_eq!(notice_badge(1).as_deref(), Some(" 1 due soon [n] "));
        assert_eq!(notice_badge(3).as_deref(), Some(" 3 due soon [n] "));
    }
}
