//! Zoom command for adjusting the saved chart zoom
//!
//! Implements `pilot zoom <in|out|reset|show>`. The zoom is stored with the
//! view settings so every chart surface picks it up.

use clap::{Args, ValueEnum};
use pilot_core::{JsonStore, Zoom};

use crate::error::CliResult;

/// Zoom adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ZoomAction {
    /// Zoom in one step
    In,
    /// Zoom out one step
    Out,
    /// Back to 100% and forget the saved panel size
    Reset,
    /// Print the current zoom
    Show,
}

/// Change or show the chart zoom level
#[derive(Debug, Args)]
pub struct ZoomCommand {
    /// What to do with the zoom level
    #[arg(value_enum, default_value_t = ZoomAction::Show)]
    pub action: ZoomAction,
}

/// Result of the zoom command
#[derive(Debug)]
pub struct ZoomResult {
    pub zoom: Zoom,
    pub changed: bool,
}

impl std::fmt::Display for ZoomResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Zoom: {}", self.zoom)
    }
}

impl ZoomCommand {
    /// Apply the action and persist the view settings when they changed.
    ///
    /// Reset also forgets the remembered panel size.
    pub fn execute(&self, store: &JsonStore) -> CliResult<ZoomResult> {
        let mut data = store.load()?;
        let current = data.view;
        let mut view = current;

        match self.action {
            ZoomAction::In => view.zoom = current.zoom.zoom_in(),
            ZoomAction::Out => view.zoom = current.zoom.zoom_out(),
            ZoomAction::Reset => {
                view.zoom = current.zoom.reset();
                view.reset_panel();
            }
            ZoomAction::Show => {}
        }

        let changed = view != current;
        if changed {
            data.view = view;
            store.save(&data)?;
            tracing::debug!(from = %current.zoom, to = %view.zoom, "view settings updated");
        }

        Ok(ZoomResult {
            zoom: view.zoom,
            changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{sample_data, temp_store};
    use pilot_core::ViewSettings;

    fn zoom(action: ZoomAction) -> ZoomCommand {
        ZoomCommand { action }
    }

    #[test]
    fn test_zoom_in_persists() {
        let (store, _dir) = temp_store("zoom-in");
        store.save(&sample_data()).unwrap();

        let result = zoom(ZoomAction::In).execute(&store).unwrap();
        assert!(result.changed);
        assert_eq!(result.to_string(), "Zoom: 120%");
        assert_eq!(store.load().unwrap().view.zoom, Zoom::new(1.2));
    }

    #[test]
    fn test_zoom_out_stops_at_minimum() {
        let (store, _dir) = temp_store("zoom-min");
        let mut data = sample_data();
        data.view.zoom = Zoom::new(Zoom::MIN);
        store.save(&data).unwrap();

        let result = zoom(ZoomAction::Out).execute(&store).unwrap();
        assert!(!result.changed);
        assert_eq!(result.to_string(), "Zoom: 40%");
    }

    #[test]
    fn test_zoom_reset() {
        let (store, _dir) = temp_store("zoom-reset");
        let mut data = sample_data();
        data.view.zoom = Zoom::new(2.4);
        store.save(&data).unwrap();

        let result = zoom(ZoomAction::Reset).execute(&store).unwrap();
        assert_eq!(result.zoom, Zoom::DEFAULT);
        assert_eq!(store.load().unwrap().view.zoom, Zoom::DEFAULT);
    }

    #[test]
    fn test_zoom_reset_forgets_panel_size() {
        let (store, _dir) = temp_store("zoom-reset-panel");
        let mut data = sample_data();
        data.view = ViewSettings {
            zoom: Zoom::new(2.0),
            panel_width: Some(1200),
            panel_height: Some(480),
        };
        store.save(&data).unwrap();

        let result = zoom(ZoomAction::Reset).execute(&store).unwrap();
        assert!(result.changed);
        assert_eq!(store.load().unwrap().view, ViewSettings::default());
    }

    #[test]
    fn test_zoom_reset_at_default_still_clears_panel() {
        let (store, _dir) = temp_store("zoom-reset-default");
        let mut data = sample_data();
        data.view.panel_height = Some(480);
        store.save(&data).unwrap();

        let result = zoom(ZoomAction::Reset).execute(&store).unwrap();
        assert!(result.changed);
        assert_eq!(result.to_string(), "Zoom: 100%");
        assert_eq!(store.load().unwrap().view.panel_height, None);
    }

    #[test]
    fn test_zoom_in_keeps_panel_size() {
        let (store, _dir) = temp_store("zoom-in-panel");
        let mut data = sample_data();
        data.view.panel_width = Some(1200);
        store.save(&data).unwrap();

        zoom(ZoomAction::In).execute(&store).unwrap();
        assert_eq!(store.load().unwrap().view.panel_width, Some(1200));
    }

    #[test]
    fn test_zoom_show_on_missing_store() {
        let (store, _dir) = temp_store("zoom-show");

        let result = zoom(ZoomAction::Show).execute(&store).unwrap();
        assert!(!result.changed);
        assert_eq!(result.to_string(), "Zoom: 100%");
        assert!(!store.exists());
    }
}
