//! Main application state and event loop.

use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::KeyEvent;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::prelude::*;

use pilot_core::{
    ChartOptions, InteractiveChart, JsonStore, Project, STORE_FILE_NAME, StoreData, ViewSettings,
    Zoom, build_interactive_chart,
};
use pilot_raster::{RasterOptions, render_static_chart};

use crate::error::{TuiError, TuiResult};
use crate::event::{
    is_down, is_enter, is_escape, is_export, is_left, is_notices, is_quit, is_reload, is_right,
    is_tab, is_toggle_completed, is_up, is_zoom_in, is_zoom_out, is_zoom_reset, poll_key,
};
use crate::navigation::{ProjectsView, visible_projects};
use crate::notices::NoticeCenter;
use crate::timeline::{TimelineState, timeline_columns};
use crate::ui;

/// Environment variable name for the store path
pub const PILOT_STORE_ENV: &str = "PILOT_STORE";

/// Columns moved per horizontal scroll step.
const SCROLL_STEP: usize = 8;

/// How long to wait for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The store path from the argument, PILOT_STORE (if non-empty), or
/// `<data dir>/pilot/store.json`.
pub fn resolve_store_path(explicit: Option<&Path>) -> TuiResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(PILOT_STORE_ENV)
        && !env_path.is_empty()
    {
        return Ok(PathBuf::from(env_path));
    }

    dirs::data_dir()
        .map(|dir| dir.join("pilot").join(STORE_FILE_NAME))
        .ok_or(TuiError::NoDataDir)
}

/// The currently focused panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    /// The project list on the left.
    #[default]
    Projects,
    /// The chart on the right.
    Chart,
}

impl FocusedPanel {
    pub fn is_projects(self) -> bool {
        matches!(self, Self::Projects)
    }

    pub fn is_chart(self) -> bool {
        matches!(self, Self::Chart)
    }
}

/// Main application state.
pub struct App {
    store: JsonStore,
    /// Everything loaded from the store.
    data: StoreData,
    /// Which projects the list shows.
    view: ProjectsView,
    /// The listed projects, in display order.
    projects: Vec<Project>,
    selected_index: usize,
    /// Layout for the selected project, if any.
    chart: Option<InteractiveChart>,
    timeline: TimelineState,
    focused_panel: FocusedPanel,
    notices: NoticeCenter,
    /// Result of the last action, shown in the legend bar.
    status: Option<String>,
    /// Where exported images are written.
    export_dir: PathBuf,
    running: bool,
}

impl App {
    /// Open the store and load the initial state.
    ///
    /// # Arguments
    ///
    /// * `store_path` - Optional path to the store. If `None`, uses
    ///   PILOT_STORE or the default path.
    ///
    /// # Errors
    ///
    /// Returns `TuiError::Store` if the store exists but cannot be read.
    pub fn new(store_path: Option<&Path>) -> TuiResult<Self> {
        let path = resolve_store_path(store_path)?;
        let export_dir = std::env::current_dir()?;
        Self::from_store(JsonStore::new(path), export_dir)
    }

    /// Build the app over an explicit store and export directory.
    pub fn from_store(store: JsonStore, export_dir: PathBuf) -> TuiResult<Self> {
        let data = store.load()?;
        tracing::info!(
            path = %store.path().display(),
            projects = data.projects.len(),
            "loaded store"
        );

        let mut app = Self {
            store,
            data,
            view: ProjectsView::default(),
            projects: Vec::new(),
            selected_index: 0,
            chart: None,
            timeline: TimelineState::default(),
            focused_panel: FocusedPanel::default(),
            notices: NoticeCenter::new(),
            status: None,
            export_dir,
            running: true,
        };
        app.refresh_projects(None);
        app.refresh_notices(Instant::now());
        Ok(app)
    }

    // ========================================
    // Accessors
    // ========================================

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.projects.get(self.selected_index)
    }

    pub fn chart(&self) -> Option<&InteractiveChart> {
        self.chart.as_ref()
    }

    pub fn timeline_state(&self) -> TimelineState {
        self.timeline
    }

    pub fn projects_view(&self) -> ProjectsView {
        self.view
    }

    pub fn focused_panel(&self) -> FocusedPanel {
        self.focused_panel
    }

    pub fn notices(&self) -> &NoticeCenter {
        &self.notices
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn zoom(&self) -> Zoom {
        self.data.view.zoom
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    // ========================================
    // Data
    // ========================================

    /// Reread the store, keeping the selected project when it still exists.
    pub fn reload(&mut self) -> TuiResult<String> {
        let keep = self.selected_project().map(|p| p.id.clone());
        self.data = self.store.load()?;
        self.refresh_projects(keep);
        self.refresh_notices(Instant::now());
        Ok(format!("Reloaded {} projects", self.data.projects.len()))
    }

    /// Rebuild the project list, selecting `keep` by id when present.
    fn refresh_projects(&mut self, keep: Option<String>) {
        self.projects = visible_projects(&self.data.projects, self.view);
        let kept = keep.and_then(|id| self.projects.iter().position(|p| p.id == id));
        match kept {
            Some(index) => self.selected_index = index,
            None => {
                self.selected_index = self
                    .selected_index
                    .min(self.projects.len().saturating_sub(1));
                self.timeline = TimelineState::default();
            }
        }
        self.rebuild_chart();
    }

    /// Lay out the selected project's chart at the saved zoom.
    fn rebuild_chart(&mut self) {
        let options = self.data.view.chart_options(ChartOptions::default());
        self.chart = self
            .projects
            .get(self.selected_index)
            .map(|project| build_interactive_chart(project, &self.data.agents, options));

        let rows = self
            .chart
            .as_ref()
            .and_then(InteractiveChart::layout)
            .map_or(0, |layout| layout.rows.len());
        self.timeline.selected_row = self.timeline.selected_row.min(rows.saturating_sub(1));
    }

    fn refresh_notices(&mut self, at: Instant) {
        self.notices.refresh(&self.data.projects, Local::now(), at);
    }

    /// Rescan notices when the refresh interval has passed.
    pub fn tick(&mut self, at: Instant) {
        if self.notices.needs_refresh(at) {
            self.refresh_notices(at);
        }
    }

    // ========================================
    // Project list
    // ========================================

    /// Move selection down in the project list. Clamps at the last item.
    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.projects.len() {
            self.selected_index += 1;
            self.timeline = TimelineState::default();
            self.rebuild_chart();
        }
    }

    /// Move selection up in the project list. Clamps at the first item.
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.timeline = TimelineState::default();
            self.rebuild_chart();
        }
    }

    /// Switch between open and completed projects.
    pub fn toggle_projects_view(&mut self) {
        self.view = self.view.toggle();
        self.selected_index = 0;
        self.refresh_projects(None);
    }

    // ========================================
    // Chart
    // ========================================

    fn chart_columns(&self) -> usize {
        self.chart
            .as_ref()
            .and_then(InteractiveChart::layout)
            .map_or(0, timeline_columns)
    }

    fn chart_rows(&self) -> usize {
        self.chart
            .as_ref()
            .and_then(InteractiveChart::layout)
            .map_or(0, |layout| layout.rows.len())
    }

    pub fn select_next_row(&mut self) {
        if self.timeline.selected_row + 1 < self.chart_rows() {
            self.timeline.selected_row += 1;
        }
    }

    pub fn select_previous_row(&mut self) {
        self.timeline.selected_row = self.timeline.selected_row.saturating_sub(1);
    }

    pub fn scroll_left(&mut self) {
        self.timeline.scroll = self.timeline.scroll.saturating_sub(SCROLL_STEP);
    }

    /// Scroll right, stopping at the last timeline column.
    pub fn scroll_right(&mut self) {
        let last = self.chart_columns().saturating_sub(1);
        self.timeline.scroll = (self.timeline.scroll + SCROLL_STEP).min(last);
    }

    /// Save a new zoom and relayout the chart.
    pub fn set_zoom(&mut self, zoom: Zoom) -> TuiResult<String> {
        if zoom != self.data.view.zoom {
            self.update_view(|view| view.zoom = zoom)?;
        }
        Ok(format!("Zoom: {zoom}"))
    }

    /// Back to 100%, forgetting the remembered panel size.
    pub fn reset_view(&mut self) -> TuiResult<String> {
        let reset = |view: &mut ViewSettings| {
            view.zoom = Zoom::DEFAULT;
            view.reset_panel();
        };
        let mut target = self.data.view;
        reset(&mut target);
        if target != self.data.view {
            self.update_view(reset)?;
        }
        Ok(format!("Zoom: {}", Zoom::DEFAULT))
    }

    /// Apply `change` to the view settings and save.
    ///
    /// The store is reread before writing so edits made elsewhere since the
    /// last load are kept, and the app then works from that fresh copy.
    fn update_view<F>(&mut self, change: F) -> TuiResult<()>
    where
        F: FnOnce(&mut ViewSettings),
    {
        let keep = self.selected_project().map(|p| p.id.clone());
        let mut fresh = self.store.load()?;
        change(&mut fresh.view);
        self.store.save(&fresh)?;

        self.data = fresh;
        self.refresh_projects(keep);
        self.refresh_notices(Instant::now());
        Ok(())
    }

    /// Export the selected project's chart into the export directory.
    pub fn export_selected(&mut self) -> TuiResult<String> {
        let Some(project) = self.selected_project() else {
            return Ok("No project selected".to_string());
        };

        let options = RasterOptions {
            zoom: self.data.view.zoom.value(),
            ..RasterOptions::default()
        };
        let image = render_static_chart(project, &self.data.agents, options)?;
        let path = image.write_to_dir(&self.export_dir)?;
        tracing::info!(path = %path.display(), "exported chart");

        Ok(format!(
            "Exported {} ({}x{} px)",
            path.display(),
            image.pixel_width,
            image.pixel_height
        ))
    }

    // ========================================
    // Notices
    // ========================================

    /// Jump to the selected notice's project, and its task row for task
    /// notices, then close the notice center.
    pub fn open_selected_notice(&mut self) {
        let Some(notice) = self.notices.selected().cloned() else {
            return;
        };
        self.notices.close();

        let Some(project) = self
            .data
            .projects
            .iter()
            .find(|p| p.id == notice.project_id)
        else {
            return;
        };
        if !self.view.includes(project) {
            self.view = self.view.toggle();
        }
        self.timeline = TimelineState::default();
        self.refresh_projects(Some(notice.project_id.clone()));

        if let Some(task_id) = &notice.task_id
            && let Some(row) = self
                .chart
                .as_ref()
                .and_then(InteractiveChart::layout)
                .and_then(|layout| layout.rows.iter().position(|r| &r.task_id == task_id))
        {
            self.timeline.selected_row = row;
        }
        self.focused_panel = FocusedPanel::Chart;
    }

    /// Show the outcome of an action in the legend bar.
    fn report(&mut self, result: TuiResult<String>) {
        self.status = Some(match result {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "action failed");
                format!("error: {e}")
            }
        });
    }

    // ========================================
    // Event loop
    // ========================================

    /// Run the main application loop.
    ///
    /// This initializes the terminal, runs the event loop, and ensures
    /// the terminal is restored on exit (even on panic).
    pub async fn run(&mut self) -> TuiResult<()> {
        let mut terminal = init_terminal()?;

        let _guard = scopeguard::guard((), |()| {
            let _ = restore_terminal();
        });

        let result = self.event_loop(&mut terminal).await;

        drop(_guard);

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> TuiResult<()> {
        while self.running {
            self.tick(Instant::now());
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Some(key) = poll_key(POLL_INTERVAL)? {
                self.handle_key(&key);
            }
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    /// Handle a keyboard event.
    pub fn handle_key(&mut self, key: &KeyEvent) {
        if is_quit(key) {
            self.quit();
            return;
        }

        // The notice center captures navigation while open
        if self.notices.is_open() {
            if is_down(key) {
                self.notices.select_next();
            } else if is_up(key) {
                self.notices.select_previous();
            } else if is_enter(key) {
                self.open_selected_notice();
            } else if is_escape(key) || is_notices(key) {
                self.notices.close();
            }
            return;
        }

        if is_notices(key) {
            self.notices.toggle();
        } else if is_tab(key) {
            self.focused_panel = match self.focused_panel {
                FocusedPanel::Projects => FocusedPanel::Chart,
                FocusedPanel::Chart => FocusedPanel::Projects,
            };
        } else if is_reload(key) {
            let result = self.reload();
            self.report(result);
        } else if is_export(key) {
            let result = self.export_selected();
            self.report(result);
        } else if is_zoom_in(key) {
            let result = self.set_zoom(self.zoom().zoom_in());
            self.report(result);
        } else if is_zoom_out(key) {
            let result = self.set_zoom(self.zoom().zoom_out());
            self.report(result);
        } else if is_zoom_reset(key) {
            let result = self.reset_view();
            self.report(result);
        } else if is_toggle_completed(key) {
            self.toggle_projects_view();
        } else {
            match self.focused_panel {
                FocusedPanel::Projects => {
                    if is_down(key) {
                        self.select_next();
                    } else if is_up(key) {
                        self.select_previous();
                    } else if is_right(key) || is_enter(key) {
                        self.focused_panel = FocusedPanel::Chart;
                    }
                }
                FocusedPanel::Chart => {
                    if is_down(key) {
                        self.select_next_row();
                    } else if is_up(key) {
                        self.select_previous_row();
                    } else if is_left(key) {
                        if self.timeline.scroll == 0 {
                            // At the left edge, go back to the list
                            self.focused_panel = FocusedPanel::Projects;
                        } else {
                            self.scroll_left();
                        }
                    } else if is_right(key) {
                        self.scroll_right();
                    }
                }
            }
        }
    }
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> TuiResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
