//! Chart panel for the selected project.
//!
//! Draws an interactive [`ChartLayout`] in terminal cells. Pixel positions
//! from the layout are mapped to columns at `CELL_WIDTH_PX` pixels per cell,
//! so zooming the layout widens the bars here exactly as it does in the
//! exported image. The timeline scrolls horizontally; rows scroll to keep
//! the selection in view.

use pilot_core::color::Rgb;
use pilot_core::{BarLayout, ChartLayout, InteractiveChart, RowLayout};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Layout pixels per terminal column.
pub const CELL_WIDTH_PX: u32 = 8;

/// Widest the label column gets, in columns.
const MAX_LABEL_WIDTH: u16 = 28;

/// Lines under the rows: a blank spacer and the footer.
const FOOTER_LINES: usize = 2;

/// Lines above the rows: tick labels and the grid rule.
const HEADER_LINES: usize = 2;

/// Columns needed for the whole timeline.
pub fn timeline_columns(layout: &ChartLayout) -> usize {
    layout.inner_width.div_ceil(CELL_WIDTH_PX) as usize
}

/// First column and length (at least 1) of a bar.
pub fn bar_columns(bar: &BarLayout) -> (usize, usize) {
    let start = bar.x / CELL_WIDTH_PX;
    let end = bar.x.saturating_add(bar.width).div_ceil(CELL_WIDTH_PX);
    (start as usize, end.saturating_sub(start).max(1) as usize)
}

/// Terminal color for a `#rrggbb` bar color.
pub fn hex_color(hex: &str) -> Color {
    Rgb::parse(hex)
        .map(|rgb| Color::Rgb(rgb.r, rgb.g, rgb.b))
        .unwrap_or(Color::Blue)
}

/// The visible slice of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Columns reserved for row labels.
    pub label_width: u16,
    /// Columns available to the timeline.
    pub bar_width: usize,
    /// First visible timeline column.
    pub scroll: usize,
}

impl Viewport {
    /// Fit a viewport to `area_width`, clamping the scroll so the end of
    /// the timeline never leaves blank space on the right.
    pub fn new(area_width: u16, total_columns: usize, scroll: usize) -> Self {
        let label_width = MAX_LABEL_WIDTH.min(area_width / 3);
        let bar_width = area_width.saturating_sub(label_width) as usize;
        let max_scroll = total_columns.saturating_sub(bar_width);
        Self {
            label_width,
            bar_width,
            scroll: scroll.min(max_scroll),
        }
    }

    /// Visible position of an absolute timeline column.
    fn visible(&self, column: usize) -> Option<usize> {
        column
            .checked_sub(self.scroll)
            .filter(|pos| *pos < self.bar_width)
    }
}

/// Scroll and selection state the panel draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimelineState {
    pub selected_row: usize,
    pub scroll: usize,
}

/// Render the chart panel: the timeline plus the selected row's details.
pub fn render_timeline_view(
    frame: &mut Frame,
    area: Rect,
    chart: Option<&InteractiveChart>,
    state: TimelineState,
    zoom_label: &str,
    is_focused: bool,
) {
    let border_color = if is_focused {
        Color::Yellow
    } else {
        Color::Cyan
    };

    let title = match chart.and_then(InteractiveChart::layout) {
        Some(layout) => format!(" {} · {} ", layout.title, zoom_label),
        None => format!(" Timeline · {} ", zoom_label),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let layout = match chart {
        None => {
            let paragraph = Paragraph::new("Select a project")
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(paragraph, area);
            return;
        }
        Some(InteractiveChart::Empty(empty)) => {
            let paragraph = Paragraph::new(empty.message())
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(paragraph, area);
            return;
        }
        Some(InteractiveChart::Ready(layout)) => layout,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(area);

    let inner = block.inner(chunks[0]);
    let viewport = Viewport::new(inner.width, timeline_columns(layout), state.scroll);
    let lines = build_chart_lines(layout, &viewport, state.selected_row, inner.height as usize);
    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    render_row_details(frame, chunks[1], layout.rows.get(state.selected_row));
}

/// Rows that fit in `height` terminal lines, capped by the layout's
/// viewport height.
pub fn visible_row_count(layout: &ChartLayout, height: usize) -> usize {
    let by_terminal = height.saturating_sub(HEADER_LINES + FOOTER_LINES).max(1);
    let by_viewport = (layout.viewport_height / layout.row_height.max(1)).max(1) as usize;
    by_terminal.min(by_viewport)
}

/// Every line of the chart body for one frame.
fn build_chart_lines(
    layout: &ChartLayout,
    viewport: &Viewport,
    selected_row: usize,
    height: usize,
) -> Vec<Line<'static>> {
    let row_count = visible_row_count(layout, height);
    let first_row = selected_row.saturating_sub(row_count.saturating_sub(1));

    let mut lines = Vec::with_capacity(row_count + HEADER_LINES + FOOTER_LINES);
    lines.push(build_ruler(layout, viewport));
    lines.push(build_grid(layout, viewport));
    for (index, row) in layout.rows.iter().enumerate().skip(first_row).take(row_count) {
        lines.push(build_row_line(row, viewport, index == selected_row));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        layout.footer.clone(),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Tick labels placed at their columns; a label that would run into the
/// previous one is skipped.
fn build_ruler(layout: &ChartLayout, viewport: &Viewport) -> Line<'static> {
    let mut chars = vec![' '; viewport.bar_width];
    let mut next_free = 0;

    for tick in layout.ticks.iter().filter(|t| t.x < layout.inner_width) {
        let Some(label) = &tick.label else {
            continue;
        };
        let Some(pos) = viewport.visible((tick.x / CELL_WIDTH_PX) as usize) else {
            continue;
        };
        let len = label.width();
        if pos < next_free || pos + len > viewport.bar_width {
            continue;
        }
        for (i, c) in label.chars().enumerate() {
            chars[pos + i] = c;
        }
        next_free = pos + len + 1;
    }

    Line::from(vec![
        Span::raw(" ".repeat(viewport.label_width as usize)),
        Span::styled(
            chars.into_iter().collect::<String>(),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// A rule with a cross at every tick boundary.
fn build_grid(layout: &ChartLayout, viewport: &Viewport) -> Line<'static> {
    let mut chars = vec!['\u{2500}'; viewport.bar_width];
    for tick in layout
        .ticks
        .iter()
        .filter(|t| t.x > 0 && t.x < layout.inner_width)
    {
        if let Some(pos) = viewport.visible((tick.x / CELL_WIDTH_PX) as usize) {
            chars[pos] = '\u{253C}';
        }
    }

    Line::from(vec![
        Span::raw(" ".repeat(viewport.label_width as usize)),
        Span::styled(
            chars.into_iter().collect::<String>(),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Fit `text` to exactly `width` terminal columns.
fn fit(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{text}{}", " ".repeat(width - text_width));
    }

    let budget = if width <= 1 { width } else { width - 1 };
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 1 {
        out.push('\u{2026}');
        used += 1;
    }
    // A wide character that did not fit leaves a gap
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// In-bar text as one entry per terminal column. A wide character is
/// followed by `None` for the column it spills into.
fn text_cells(text: Option<&str>) -> Vec<Option<char>> {
    let mut cells = Vec::new();
    if let Some(text) = text {
        for c in format!(" {text}").chars() {
            match c.width() {
                Some(0) | None => {}
                Some(1) => cells.push(Some(c)),
                Some(_) => {
                    cells.push(Some(c));
                    cells.push(None);
                }
            }
        }
    }
    cells
}

/// A row: its label, then the bar in the task's color with the in-bar
/// text in the contrasting text color.
fn build_row_line(row: &RowLayout, viewport: &Viewport, is_selected: bool) -> Line<'static> {
    let prefix = if is_selected { "> " } else { "  " };
    let label_width = viewport.label_width as usize;
    let label = fit(&format!("{prefix}{}", row.label), label_width);

    let label_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let (start, len) = bar_columns(&row.bar);
    let end = start + len;
    let visible_start = start.max(viewport.scroll);
    let visible_end = end.min(viewport.scroll + viewport.bar_width);

    let mut spans = vec![Span::styled(label, label_style)];

    if visible_start >= visible_end {
        spans.push(Span::raw(" ".repeat(viewport.bar_width)));
        return Line::from(spans);
    }

    // Text starts one column into the bar; the last column stays blank so
    // text never touches the bar end
    let cells = text_cells(row.bar.text.as_deref());
    let text_end = len.saturating_sub(1);
    let mut bar = String::new();
    let mut column = visible_start;
    while column < visible_end {
        let offset = column - start;
        match (offset < text_end).then(|| cells.get(offset)).flatten() {
            Some(Some(c)) if cells.get(offset + 1) == Some(&None) => {
                // Wide: both of its columns must be drawable
                if offset + 1 < text_end && column + 1 < visible_end {
                    bar.push(*c);
                    column += 2;
                    continue;
                }
                bar.push(' ');
            }
            Some(Some(c)) => bar.push(*c),
            _ => bar.push(' '),
        }
        column += 1;
    }

    let mut bar_style = Style::default()
        .bg(hex_color(&row.bar.color))
        .fg(hex_color(&row.bar.text_color));
    if is_selected {
        bar_style = bar_style.add_modifier(Modifier::BOLD);
    }

    spans.push(Span::raw(" ".repeat(visible_start - viewport.scroll)));
    spans.push(Span::styled(bar, bar_style));
    spans.push(Span::raw(
        " ".repeat(viewport.scroll + viewport.bar_width - visible_end),
    ));
    Line::from(spans)
}

/// The selected row's tooltip.
fn render_row_details(frame: &mut Frame, area: Rect, row: Option<&RowLayout>) {
    let block = Block::default()
        .title(" Task ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines: Vec<Line> = match row {
        Some(row) => row
            .bar
            .tooltip
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect(),
        None => vec![Line::from("No task selected")],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
