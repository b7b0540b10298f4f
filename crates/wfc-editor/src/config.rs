//! Editor tuning knobs.
//!
//! Every field has a default, so a host can supply a partial JSON object
//! (or nothing at all) and override only what it cares about.

use crate::history::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wfc_core::{Size, ZoomLimits};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid editor config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("zoom limits must satisfy 0 < min <= max, got min {min} and max {max}")]
    InvalidZoom { min: f32, max: f32 },
    #[error("`{field}` must be a positive zoom factor, got {value}")]
    InvalidFactor { field: &'static str, value: f32 },
}

// ─── Config ──────────────────────────────────────────────────────────────

/// Configuration for a [`WorkflowEditor`](crate::editor::WorkflowEditor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Snapshots kept for undo. Default: **50**.
    pub history_capacity: usize,

    /// Zoom bounds for wheel, keyboard and fit. Default: **0.1 to 3.0**.
    pub zoom: ZoomLimits,

    /// Zoom factor per wheel notch scrolling up. Default: **1.1**.
    pub wheel_zoom_in: f32,

    /// Zoom factor per wheel notch scrolling down. Default: **0.9**.
    pub wheel_zoom_out: f32,

    /// Zoom factor for the keyboard zoom shortcuts. Default: **1.2**.
    pub keyboard_zoom_step: f32,

    /// Screen-space padding kept around the graph by zoom-to-fit.
    pub fit_padding: f32,

    /// Pin grab radius in screen pixels; stays constant while zooming.
    pub pin_hit_radius: f32,

    /// Canvas size in pixels until the host reports the real one.
    pub canvas_size: Size,

    /// Minimap size in pixels. Default: **200×150**.
    pub minimap_size: Size,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            zoom: ZoomLimits::default(),
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            keyboard_zoom_step: 1.2,
            fit_padding: 40.0,
            pin_hit_radius: 10.0,
            canvas_size: Size::new(800.0, 600.0),
            minimap_size: Size::new(200.0, 150.0),
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject zoom settings the viewport math cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ZoomLimits { min, max } = self.zoom;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidZoom { min, max });
        }
        for (field, value) in [
            ("wheelZoomIn", self.wheel_zoom_in),
            ("wheelZoomOut", self.wheel_zoom_out),
            ("keyboardZoomStep", self.keyboard_zoom_step),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidFactor { field, value });
            }
        }
        Ok(())
    }
}
