//! Gesture timing and threshold configuration.
//!
//! Loaded once from an optional TOML file at startup; every field has a
//! default so a partial file (or none at all) is valid.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::gesture::pose::PoseThresholds;

/// Timing, debounce and position settings for the interpreter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum seconds between two lock/unlock toggles.
    pub toggle_cooldown_s: f64,
    /// Consecutive GUN frames before play/pause fires.
    pub gun_frame_req: u32,
    /// Consecutive repeats of a TWO/THREE_FINGERS pose before a track skip.
    pub gesture_stable_req: u32,
    /// Palm above this normalized y raises the volume.
    pub volume_top_thresh: f32,
    /// Palm below this normalized y lowers the volume.
    pub volume_bottom_thresh: f32,
    /// Per-key cooldown for volume presses (seconds).
    pub volume_cooldown_s: f64,
    /// Seconds without any hand before an active session locks itself.
    pub auto_lock_timeout_s: f64,
    /// Global gap after a play/pause or track command (seconds).
    pub discrete_cooldown_s: f64,
    /// Per-key cooldown for play/pause (seconds).
    pub play_pause_cooldown_s: f64,
    /// Per-key cooldown for next/previous track (seconds).
    pub track_cooldown_s: f64,
    /// Pose recognition limits.
    pub thresholds: PoseThresholds,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            toggle_cooldown_s: 1.0,
            gun_frame_req: 3,
            gesture_stable_req: 4,
            volume_top_thresh: 0.35,
            volume_bottom_thresh: 0.65,
            volume_cooldown_s: 0.05,
            auto_lock_timeout_s: 1.2,
            discrete_cooldown_s: 1.2,
            play_pause_cooldown_s: 0.1,
            track_cooldown_s: 0.1,
            thresholds: PoseThresholds::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl GestureConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("toggle_cooldown_s", self.toggle_cooldown_s),
            ("volume_cooldown_s", self.volume_cooldown_s),
            ("auto_lock_timeout_s", self.auto_lock_timeout_s),
            ("discrete_cooldown_s", self.discrete_cooldown_s),
            ("play_pause_cooldown_s", self.play_pause_cooldown_s),
            ("track_cooldown_s", self.track_cooldown_s),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number of seconds, got {value}"
                )));
            }
        }

        if self.gun_frame_req == 0 || self.gesture_stable_req == 0 {
            return Err(ConfigError::Invalid(
                "gun_frame_req and gesture_stable_req must be at least 1".into(),
            ));
        }

        if !(self.volume_top_thresh < self.volume_bottom_thresh) {
            return Err(ConfigError::Invalid(format!(
                "volume_top_thresh ({}) must be below volume_bottom_thresh ({})",
                self.volume_top_thresh, self.volume_bottom_thresh
            )));
        }

        let t = &self.thresholds;
        if !(t.gun_open_below <= t.gun_closed_above) {
            return Err(ConfigError::Invalid(
                "thresholds.gun_open_below must not exceed gun_closed_above".into(),
            ));
        }
        if !(t.static_open_below <= t.static_closed_above) {
            return Err(ConfigError::Invalid(
                "thresholds.static_open_below must not exceed static_closed_above".into(),
            ));
        }
        if !(t.ok_pinch_distance > 0.0) {
            return Err(ConfigError::Invalid(
                "thresholds.ok_pinch_distance must be positive".into(),
            ));
        }

        Ok(())
    }
}
