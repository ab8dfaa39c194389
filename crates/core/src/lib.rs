//! Core engine for Pilot
//!
//! Provides the project/task data model, calendar and color helpers, the
//! timeline scale planner with the bar geometry shared by every chart
//! surface, the interactive layout builder, the due-soon scanner, and the
//! JSON file store.

pub mod color;
pub mod dates;
pub mod due_soon;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod models;
pub mod plan;
pub mod settings;
pub mod store;

pub use color::{AGENT_PALETTE, Contrast, DEFAULT_BAR_COLOR, brightness, color_for, contrast_class};
pub use dates::{add_days, at_local, days_between, max_date, min_date, parse_date, parse_time};
pub use due_soon::{DueNotice, NOTICE_REFRESH_INTERVAL, NoticeKind, compute_due_soon};
pub use error::{CoreError, CoreResult};
pub use geometry::{BarGeometry, ChartBackend, ChartGeometry, ChartRow, EmptyChart, render_chart};
pub use layout::{
    BarLayout, ChartLayout, ChartOptions, InteractiveBackend, InteractiveChart, RowLayout,
    TickCell, build_interactive_chart,
};
pub use models::{
    Agent, AgentColors, AgentDirectory, Project, ProjectStatus, Task, sort_projects,
};
pub use plan::{DEFAULT_MIN_INNER_WIDTH, MIN_PIXELS_PER_DAY, PlanOptions, ScalePlan, Tick};
pub use settings::{ViewSettings, Zoom};
pub use store::{JsonStore, STORE_FILE_NAME, StoreData};
