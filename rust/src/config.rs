//! Configuration types for the layout engine.

use pyo3::prelude::*;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::time_codec::MINUTES_PER_DAY;

/// Errors in a layout configuration. These abort the whole call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("slot height must be positive, got {0}")]
    InvalidSlotHeight(f64),
    #[error("slot duration must be positive, got {0} minutes")]
    InvalidSlotMinutes(u32),
    #[error("gap must not be negative, got {0}")]
    NegativeGap(f64),
    #[error("track width must be positive, got {0}")]
    InvalidTrackWidth(f64),
    #[error("day window {start}..{end} is empty or outside 0..=1440")]
    InvalidDayWindow { start: u16, end: u16 },
    #[error("Unknown window policy: {0}")]
    UnknownWindowPolicy(String),
    #[error("Unknown lane sizing: {0}")]
    UnknownLaneSizing(String),
}

/// What to do with an entry reaching outside the displayed day window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Reject the entry and report it.
    Reject,
    /// Clamp the range to the window edges (lossy).
    Clamp,
}

/// How the lane count (width denominator) of an entry is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaneSizing {
    /// 1 + max column among the entry and its direct overlaps.
    Direct,
    /// 1 + max column over the entry's whole transitive overlap cluster.
    Cluster,
}

/// Grid geometry and layout policy.
#[pyclass]
#[derive(Clone, Debug)]
pub struct LayoutConfig {
    /// Height in pixels of one time slot
    #[pyo3(get, set)]
    pub slot_height_px: f64,
    /// Duration in minutes of one time slot
    #[pyo3(get, set)]
    pub slot_minutes: u32,
    /// Horizontal spacing between side-by-side columns
    #[pyo3(get, set)]
    pub gap_px: f64,
    /// Earliest displayed time, in minutes since midnight
    #[pyo3(get, set)]
    pub day_start_minutes: u16,
    /// Latest displayed time (exclusive), in minutes since midnight
    #[pyo3(get, set)]
    pub day_end_minutes: u16,
    /// Fixed chrome above the grid
    #[pyo3(get, set)]
    pub header_offset_px: f64,
    /// Width of one resource track
    #[pyo3(get, set)]
    pub track_width_px: f64,
    /// Left edge of the resource track
    #[pyo3(get, set)]
    pub track_base_left_px: f64,
    /// Out-of-window handling: "reject" or "clamp"
    #[pyo3(get, set)]
    pub window_policy: String,
    /// Lane count derivation: "direct" or "cluster"
    #[pyo3(get, set)]
    pub lane_sizing: String,
    /// Verbosity level: 0=silent, 1=rejects, 2=steps, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slot_height_px: 40.0,
            slot_minutes: 30,
            gap_px: 2.0,
            day_start_minutes: 8 * 60,
            day_end_minutes: 20 * 60,
            header_offset_px: 0.0,
            track_width_px: 200.0,
            track_base_left_px: 0.0,
            window_policy: "reject".to_string(),
            lane_sizing: "direct".to_string(),
            verbosity: 0,
        }
    }
}

impl LayoutConfig {
    /// Pixels per minute on the vertical time axis.
    #[inline]
    pub fn pixels_per_minute(&self) -> f64 {
        self.slot_height_px / self.slot_minutes as f64
    }

    pub fn window_policy(&self) -> Result<WindowPolicy, ConfigError> {
        match self.window_policy.as_str() {
            "reject" => Ok(WindowPolicy::Reject),
            "clamp" => Ok(WindowPolicy::Clamp),
            other => Err(ConfigError::UnknownWindowPolicy(other.to_string())),
        }
    }

    pub fn lane_sizing(&self) -> Result<LaneSizing, ConfigError> {
        match self.lane_sizing.as_str() {
            "direct" => Ok(LaneSizing::Direct),
            "cluster" => Ok(LaneSizing::Cluster),
            other => Err(ConfigError::UnknownLaneSizing(other.to_string())),
        }
    }

    /// Check every field; called once before any entry is laid out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.slot_height_px > 0.0) {
            return Err(ConfigError::InvalidSlotHeight(self.slot_height_px));
        }
        if self.slot_minutes == 0 {
            return Err(ConfigError::InvalidSlotMinutes(self.slot_minutes));
        }
        if !(self.gap_px >= 0.0) {
            return Err(ConfigError::NegativeGap(self.gap_px));
        }
        if !(self.track_width_px > 0.0) {
            return Err(ConfigError::InvalidTrackWidth(self.track_width_px));
        }
        if self.day_start_minutes >= self.day_end_minutes || self.day_end_minutes > MINUTES_PER_DAY
        {
            return Err(ConfigError::InvalidDayWindow {
                start: self.day_start_minutes,
                end: self.day_end_minutes,
            });
        }
        self.window_policy()?;
        self.lane_sizing()?;
        Ok(())
    }
}

// Floats hash by bit pattern; only used for the layout cache key.
impl Hash for LayoutConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot_height_px.to_bits().hash(state);
        self.slot_minutes.hash(state);
        self.gap_px.to_bits().hash(state);
        self.day_start_minutes.hash(state);
        self.day_end_minutes.hash(state);
        self.header_offset_px.to_bits().hash(state);
        self.track_width_px.to_bits().hash(state);
        self.track_base_left_px.to_bits().hash(state);
        self.window_policy.hash(state);
        self.lane_sizing.hash(state);
    }
}

#[pymethods]
impl LayoutConfig {
    #[new]
    #[pyo3(signature = (
        slot_height_px=None,
        slot_minutes=None,
        gap_px=None,
        day_start_minutes=None,
        day_end_minutes=None,
        header_offset_px=None,
        track_width_px=None,
        track_base_left_px=None,
        window_policy=None,
        lane_sizing=None,
        verbosity=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        slot_height_px: Option<f64>,
        slot_minutes: Option<u32>,
        gap_px: Option<f64>,
        day_start_minutes: Option<u16>,
        day_end_minutes: Option<u16>,
        header_offset_px: Option<f64>,
        track_width_px: Option<f64>,
        track_base_left_px: Option<f64>,
        window_policy: Option<String>,
        lane_sizing: Option<String>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            slot_height_px: slot_height_px.unwrap_or(defaults.slot_height_px),
            slot_minutes: slot_minutes.unwrap_or(defaults.slot_minutes),
            gap_px: gap_px.unwrap_or(defaults.gap_px),
            day_start_minutes: day_start_minutes.unwrap_or(defaults.day_start_minutes),
            day_end_minutes: day_end_minutes.unwrap_or(defaults.day_end_minutes),
            header_offset_px: header_offset_px.unwrap_or(defaults.header_offset_px),
            track_width_px: track_width_px.unwrap_or(defaults.track_width_px),
            track_base_left_px: track_base_left_px.unwrap_or(defaults.track_base_left_px),
            window_policy: window_policy.unwrap_or(defaults.window_policy),
            lane_sizing: lane_sizing.unwrap_or(defaults.lane_sizing),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    #[getter(pixels_per_minute)]
    fn py_pixels_per_minute(&self) -> f64 {
        self.pixels_per_minute()
    }

    fn __repr__(&self) -> String {
        format!(
            "LayoutConfig(slot_height_px={}, slot_minutes={}, day_start_minutes={}, window_policy={:?}, lane_sizing={:?})",
            self.slot_height_px,
            self.slot_minutes,
            self.day_start_minutes,
            self.window_policy,
            self.lane_sizing
        )
    }
}
