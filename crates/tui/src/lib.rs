//! TUI module for Pilot
//!
//! Provides a terminal user interface for browsing projects, their Gantt
//! timelines and the due-soon notice center using ratatui and crossterm.

pub mod app;
pub mod error;
pub mod event;
pub mod navigation;
pub mod notices;
pub mod timeline;
pub mod ui;

pub use app::{App, FocusedPanel, resolve_store_path};
pub use error::{TuiError, TuiResult};
pub use navigation::{ProjectsView, render_projects_panel, visible_projects};
pub use notices::{NoticeCenter, render_notice_center};
pub use timeline::{TimelineState, Viewport, render_timeline_view};
