//! Notices command for listing items due within 24 hours
//!
//! Implements `pilot notices`. With `--watch` the store is reread and the
//! scan repeated every minute until interrupted.

use std::time::Duration;

use chrono::{DateTime, Local};
use clap::Args;
use pilot_core::{DueNotice, JsonStore, NOTICE_REFRESH_INTERVAL, compute_due_soon};

use crate::error::CliResult;
use crate::output::format_notices;

/// Show projects and tasks due in the next 24 hours
#[derive(Debug, Args)]
pub struct NoticesCommand {
    /// Keep running and rescan every minute
    #[arg(long)]
    pub watch: bool,

    /// Print notices as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of one scan
#[derive(Debug)]
pub struct NoticesResult {
    pub notices: Vec<DueNotice>,
    pub json: bool,
}

impl std::fmt::Display for NoticesResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.json {
            let text = serde_json::to_string_pretty(&self.notices).map_err(|_| std::fmt::Error)?;
            write!(f, "{text}")
        } else {
            write!(f, "{}", format_notices(&self.notices))
        }
    }
}

impl NoticesCommand {
    /// Scan the store once at `now`.
    pub fn scan(&self, store: &JsonStore, now: DateTime<Local>) -> CliResult<NoticesResult> {
        let data = store.load()?;
        Ok(NoticesResult {
            notices: compute_due_soon(&data.projects, now),
            json: self.json,
        })
    }

    /// Run the command: a single scan, or the watch loop.
    pub async fn execute(&self, store: &JsonStore) -> CliResult<NoticesOutcome> {
        self.run(store, NOTICE_REFRESH_INTERVAL, None).await
    }

    async fn run(
        &self,
        store: &JsonStore,
        period: Duration,
        max_ticks: Option<u64>,
    ) -> CliResult<NoticesOutcome> {
        if !self.watch {
            return Ok(NoticesOutcome::Scan(self.scan(store, Local::now())?));
        }

        let scans = watch(store, self.json, period, max_ticks, |result| {
            println!("{result}\n");
        })
        .await?;
        tracing::info!(scans, "stopped watching notices");
        Ok(NoticesOutcome::Watched { scans })
    }
}

/// What the notices command leaves to print
#[derive(Debug)]
pub enum NoticesOutcome {
    /// A single scan
    Scan(NoticesResult),
    /// The watch loop ran; every scan was printed as it happened
    Watched { scans: u64 },
}

impl std::fmt::Display for NoticesOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scan(result) => write!(f, "{result}"),
            Self::Watched { .. } => Ok(()),
        }
    }
}

/// Rescan on every tick, handing each result to `emit`.
///
/// Stops after `max_ticks` scans when given, or on Ctrl-C. A store that
/// fails to load is logged and retried on the next tick.
pub async fn watch<F>(
    store: &JsonStore,
    json: bool,
    period: Duration,
    max_ticks: Option<u64>,
    mut emit: F,
) -> CliResult<u64>
where
    F: FnMut(&NoticesResult),
{
    let command = NoticesCommand { watch: true, json };
    let mut interval = tokio::time::interval(period);
    let mut ticks = 0;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match command.scan(store, Local::now()) {
                    Ok(result) => emit(&result),
                    Err(e) => tracing::warn!(error = %e, "notice scan failed"),
                }
                ticks += 1;
                if max_ticks.is_some_and(|max| ticks >= max) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("watch interrupted");
                break;
            }
        }
    }

    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::temp_store;
    use chrono::{Duration as TimeDelta, NaiveTime};
    use pilot_core::{NoticeKind, Project, StoreData, Task, parse_date};

    fn due_today_store(name: &str) -> (JsonStore, crate::commands::test_support::TempDir) {
        let (store, dir) = temp_store(name);
        let today = Local::now().date_naive();
        let project = Project::new("p1", "Launch")
            .unwrap()
            .with_tasks(vec![Task::new("t1", "Draft", today).unwrap()]);
        store
            .save(&StoreData {
                projects: vec![project],
                ..StoreData::default()
            })
            .unwrap();
        (store, dir)
    }

    #[test]
    fn test_scan_finds_task_due_today() {
        let (store, _dir) = due_today_store("notices-today");
        let cmd = NoticesCommand {
            watch: false,
            json: false,
        };
        let now = Local::now().date_naive().and_time(NaiveTime::MIN);
        let now = pilot_core::at_local(now.date(), now.time());

        let result = cmd.scan(&store, now).unwrap();
        assert_eq!(result.notices.len(), 1);
        assert_eq!(result.notices[0].kind, NoticeKind::Task);
        assert!(result.to_string().contains("Draft · Launch"));
    }

    #[test]
    fn test_scan_json_output() {
        let (store, _dir) = temp_store("notices-json");
        let d = |s| parse_date(s).unwrap();
        let project = Project::new("p1", "Launch")
            .unwrap()
            .with_due(d("2024-03-05"), NaiveTime::from_hms_opt(18, 30, 0));
        store
            .save(&StoreData {
                projects: vec![project],
                ..StoreData::default()
            })
            .unwrap();

        let cmd = NoticesCommand {
            watch: false,
            json: true,
        };
        let now = pilot_core::at_local(d("2024-03-05"), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        let value: serde_json::Value =
            serde_json::from_str(&cmd.scan(&store, now).unwrap().to_string()).unwrap();
        assert_eq!(value[0]["kind"], "project");
        assert_eq!(value[0]["display_text"], "Mar 5, 2024, 6:30 PM");
    }

    #[test]
    fn test_scan_nothing_due() {
        let (store, _dir) = due_today_store("notices-none");
        let cmd = NoticesCommand {
            watch: false,
            json: false,
        };
        let later = Local::now() + TimeDelta::days(3);
        assert_eq!(
            cmd.scan(&store, later).unwrap().to_string(),
            "Nothing due in the next 24 hours."
        );
    }

    #[tokio::test]
    async fn test_watch_rescans_each_tick() {
        let (store, _dir) = due_today_store("notices-watch");
        let mut seen = Vec::new();

        let ticks = watch(&store, false, Duration::from_millis(5), Some(3), |result| {
            seen.push(result.notices.len());
        })
        .await
        .unwrap();

        assert_eq!(ticks, 3);
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn test_single_scan_outcome_prints_notices() {
        let (store, _dir) = due_today_store("notices-once");
        let cmd = NoticesCommand {
            watch: false,
            json: false,
        };

        let outcome = cmd.execute(&store).await.unwrap();
        assert!(matches!(outcome, NoticesOutcome::Scan(_)));
    }

    #[tokio::test]
    async fn test_watch_outcome_leaves_nothing_to_print() {
        let (store, _dir) = due_today_store("notices-watch-end");
        let cmd = NoticesCommand {
            watch: true,
            json: false,
        };

        let outcome = cmd
            .run(&store, Duration::from_millis(5), Some(2))
            .await
            .unwrap();
        assert!(matches!(outcome, NoticesOutcome::Watched { scans: 2 }));
        assert_eq!(outcome.to_string(), "");
    }

    #[tokio::test]
    async fn test_watch_survives_unreadable_store() {
        let (store, dir) = temp_store("notices-broken");
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();
        let mut emitted = 0;

        let ticks = watch(&store, false, Duration::from_millis(5), Some(2), |_| {
            emitted += 1;
        })
        .await
        .unwrap();

        assert_eq!(ticks, 2);
        assert_eq!(emitted, 0);
    }
}
