//! Effect options: defaults, JSON deserialization, validation.
//!
//! Field names on the wire match the JavaScript-facing API of the original
//! effects (`vectorsCount`, `velocityRate`, ...), so a host page can pass a
//! plain options object through `JSON.stringify` unchanged. All fields are
//! defaulted; only the ones a caller sets need to appear.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_LOAD_TIMEOUT_MS, DEFAULT_TEXT_DELAY_MS, DEFAULT_TEXT_SPEED_MS,
    DEFAULT_TRIGGER_DELAY_MS, DEFAULT_VECTORS_COUNT, MIN_VECTORS,
};
use crate::error::Error;

/// Which event starts an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    /// Start on pointer click on the target.
    Click,
    /// Start when the target scrolls into the visibility band.
    #[default]
    Scroll,
}

/// Optional overlay position override, in CSS pixels. Axes left unset fall
/// back to the target's bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayPosition {
    pub left: Option<f64>,
    pub top: Option<f64>,
}

/// Options for the broken-mirror shatter effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShatterOptions {
    /// Replacement image path revealed beneath the shards. Required.
    pub src: String,
    /// Radial shard divisor; 8–20 recommended.
    #[serde(rename = "vectorsCount")]
    pub vectors_count: u32,
    /// Initial-velocity scale.
    #[serde(rename = "velocityRate")]
    pub velocity_rate: f64,
    /// Gravity scale.
    #[serde(rename = "accelerationRate")]
    pub acceleration_rate: f64,
    /// Stacking order of the transient overlay.
    #[serde(rename = "zIndex")]
    pub z_index: i32,
    /// Overlay position override; unset axes use the target's bounding rect.
    #[serde(rename = "style")]
    pub style: OverlayPosition,
    /// Pause between a scroll trigger and the animation start, in ms.
    #[serde(rename = "delay")]
    pub delay_ms: u64,
    /// Trigger source.
    pub event_mode: EventMode,
    /// Re-arm when the target scrolls fully out of view.
    pub repeat: bool,
    /// Bound on the replacement-image preload, in ms.
    #[serde(rename = "loadTimeout")]
    pub load_timeout_ms: u64,
    /// Reproduce the original implementation's direction-vector bias
    /// (Y component centered against the X center). Off by default.
    #[serde(rename = "legacyCenterSkew")]
    pub legacy_center_skew: bool,
    /// Seed for the tessellation's random source. Unset means a fresh seed
    /// per session; set it for reproducible shatters.
    pub seed: Option<u64>,
}

impl Default for ShatterOptions {
    fn default() -> Self {
        Self {
            src: String::new(),
            vectors_count: DEFAULT_VECTORS_COUNT,
            velocity_rate: 0.5,
            acceleration_rate: 0.5,
            z_index: 0,
            style: OverlayPosition::default(),
            delay_ms: DEFAULT_TRIGGER_DELAY_MS,
            event_mode: EventMode::default(),
            repeat: false,
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
            legacy_center_skew: false,
            seed: None,
        }
    }
}

impl ShatterOptions {
    /// Parse options from a host-provided JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the value does not
    /// deserialize or fails [`ShatterOptions::validate`].
    pub fn from_json(value: serde_json::Value) -> Result<Self, Error> {
        let options: Self =
            serde_json::from_value(value).map_err(|e| Error::invalid(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check required fields and ranges before any side effects happen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `src` is missing or the
    /// shard divisor is below the supported minimum.
    pub fn validate(&self) -> Result<(), Error> {
        if self.src.is_empty() {
            return Err(Error::invalid("src is required"));
        }
        if self.vectors_count < MIN_VECTORS {
            return Err(Error::invalid(format!(
                "vectorsCount must be at least {MIN_VECTORS} (8 or more recommended)"
            )));
        }
        Ok(())
    }
}

/// Options shared by the typewriter and fade-in text effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Per-character reveal time in ms (typewriter) or fade duration
    /// (fade-in).
    #[serde(rename = "speed")]
    pub speed_ms: u64,
    /// Total reveal time in ms; when set it overrides `speed` by dividing
    /// across the character count.
    #[serde(rename = "duration")]
    pub duration_ms: Option<u64>,
    /// Delay before the reveal starts, in ms.
    #[serde(rename = "delay")]
    pub delay_ms: u64,
    /// Trigger source.
    pub event_mode: EventMode,
    /// Re-arm when the target scrolls fully out of view.
    pub repeat: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            speed_ms: DEFAULT_TEXT_SPEED_MS,
            duration_ms: None,
            delay_ms: DEFAULT_TEXT_DELAY_MS,
            event_mode: EventMode::default(),
            repeat: false,
        }
    }
}

impl TextOptions {
    /// Parse options from a host-provided JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the value does not
    /// deserialize.
    pub fn from_json(value: serde_json::Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|e| Error::invalid(e.to_string()))
    }
}
