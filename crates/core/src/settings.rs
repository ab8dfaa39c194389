//! View settings persisted by chart hosts.

use serde::{Deserialize, Serialize};

use crate::layout::ChartOptions;

/// Chart zoom factor, kept within `MIN..=MAX` at two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Zoom(f64);

impl Zoom {
    pub const MIN: f64 = 0.4;
    pub const MAX: f64 = 4.0;
    pub const STEP: f64 = 0.2;
    pub const DEFAULT: Zoom = Zoom(1.0);

    /// Clamp a raw factor into range. Non-finite input gives the default.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            tracing::warn!(value, "ignoring non-finite zoom");
            return Self::DEFAULT;
        }
        Self(round2(value.clamp(Self::MIN, Self::MAX)))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + Self::STEP)
    }

    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - Self::STEP)
    }

    pub fn reset(self) -> Self {
        Self::DEFAULT
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<f64> for Zoom {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Zoom> for f64 {
    fn from(zoom: Zoom) -> Self {
        zoom.0
    }
}

impl std::fmt::Display for Zoom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", (self.0 * 100.0).round())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Zoom and remembered panel size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewSettings {
    pub zoom: Zoom,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_height: Option<u32>,
}

impl ViewSettings {
    /// Chart options at this zoom, sized to the remembered panel.
    pub fn chart_options(&self, base: ChartOptions) -> ChartOptions {
        ChartOptions {
            zoom: self.zoom.value(),
            min_inner_width: self.min_inner_width(base.label_column_width, base.min_inner_width),
            max_panel_height: self.panel_height.or(base.max_panel_height),
            ..base
        }
    }

    /// `floor`, widened so the chart body fills a remembered panel beside
    /// the label column.
    pub fn min_inner_width(&self, label_column_width: u32, floor: u32) -> u32 {
        self.panel_width.map_or(floor, |width| {
            width.saturating_sub(label_column_width).max(floor)
        })
    }

    /// Forget the remembered panel size.
    pub fn reset_panel(&mut self) {
        self.panel_width = None;
        self.panel_height = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_steps_and_clamps() {
        let mut zoom = Zoom::default();
        for _ in 0..30 {
            zoom = zoom.zoom_in();
        }
        assert_eq!(zoom.value(), Zoom::MAX);

        for _ in 0..30 {
            zoom = zoom.zoom_out();
        }
        assert_eq!(zoom.value(), Zoom::MIN);
        assert_eq!(zoom.reset(), Zoom::DEFAULT);
    }

    #[test]
    fn test_zoom_steps_stay_on_two_decimals() {
        let zoom = Zoom::default().zoom_in().zoom_in().zoom_in();
        assert_eq!(zoom.value(), 1.6);
        assert_eq!(zoom.zoom_out().value(), 1.4);
    }

    #[test]
    fn test_zoom_rejects_non_finite() {
        assert_eq!(Zoom::new(f64::NAN), Zoom::DEFAULT);
        assert_eq!(Zoom::new(100.0).value(), 4.0);
        assert_eq!(Zoom::new(-1.0).value(), 0.4);
    }

    #[test]
    fn test_zoom_display() {
        assert_eq!(Zoom::new(1.2).to_string(), "120%");
    }

    #[test]
    fn test_view_settings_serde() {
        let settings = ViewSettings {
            zoom: Zoom::new(1.4),
            panel_width: Some(900),
            panel_height: None,
        };
        let json = serde_json::to_value(settings).unwrap();
        assert_eq!(json["zoom"], 1.4);
        assert_eq!(json["panelWidth"], 900);
        assert!(json.get("panelHeight").is_none());

        let parsed: ViewSettings = serde_json::from_str(r#"{"zoom": 9}"#).unwrap();
        assert_eq!(parsed.zoom.value(), 4.0);

        let empty: ViewSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ViewSettings::default());
    }

    #[test]
    fn test_chart_options_from_settings() {
        let mut settings = ViewSettings {
            zoom: Zoom::new(2.0),
            panel_width: Some(800),
            panel_height: Some(400),
        };
        let options = settings.chart_options(ChartOptions::default());
        assert_eq!(options.zoom, 2.0);
        assert_eq!(options.max_panel_height, Some(400));
        assert_eq!(options.row_height, 30);
        // 800 px panel minus the 240 px label column is below the floor
        assert_eq!(options.min_inner_width, 700);

        settings.reset_panel();
        let options = settings.chart_options(ChartOptions::default());
        assert_eq!(options.max_panel_height, None);
        assert_eq!(options.min_inner_width, 700);
    }

    #[test]
    fn test_wide_panel_stretches_chart_body() {
        let settings = ViewSettings {
            panel_width: Some(1200),
            ..ViewSettings::default()
        };
        assert_eq!(settings.min_inner_width(240, 700), 960);
        assert_eq!(settings.min_inner_width(600, 700), 700);
        assert_eq!(ViewSettings::default().min_inner_width(240, 700), 700);

        let options = settings.chart_options(ChartOptions::default());
        assert_eq!(options.min_inner_width, 960);
    }
}
