//! Tunable timing and playback settings
//!
//! # Main Types
//!
//! - [`RecorderConfig`] - Anchor spacing and forced-split threshold used during capture
//! - [`PlaybackSettings`] - Replay speed
//!
//! The anchor interval doubles as the synthetic spacing between anchors on
//! replay, so capture and playback read it from the same place.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{RecordingError, Result};
use crate::types::{ANCHOR_INTERVAL, SEGMENT_THRES};

/// Capture timing policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Minimum milliseconds between accepted anchors
    #[serde(default = "default_anchor_interval")]
    pub anchor_interval_ms: u64,

    /// Milliseconds a segment may span before it is force-split
    #[serde(default = "default_segment_threshold")]
    pub segment_threshold_ms: u64,
}

fn default_anchor_interval() -> u64 {
    ANCHOR_INTERVAL
}

fn default_segment_threshold() -> u64 {
    SEGMENT_THRES
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            anchor_interval_ms: ANCHOR_INTERVAL,
            segment_threshold_ms: SEGMENT_THRES,
        }
    }
}

impl RecorderConfig {
    /// Create with explicit timing
    pub fn new(anchor_interval_ms: u64, segment_threshold_ms: u64) -> Self {
        Self {
            anchor_interval_ms,
            segment_threshold_ms,
        }
    }

    pub fn anchor_interval(&self) -> Duration {
        Duration::from_millis(self.anchor_interval_ms)
    }

    pub fn segment_threshold(&self) -> Duration {
        Duration::from_millis(self.segment_threshold_ms)
    }

    /// Reject settings the recorder cannot honor
    ///
    /// A zero anchor interval would accept every sample, and a threshold at or
    /// below the anchor interval would split on every accepted move.
    pub fn validate(&self) -> Result<()> {
        if self.anchor_interval_ms == 0 {
            return Err(RecordingError::Config(
                "anchor_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.segment_threshold_ms <= self.anchor_interval_ms {
            return Err(RecordingError::Config(format!(
                "segment_threshold_ms ({}) must exceed anchor_interval_ms ({})",
                self.segment_threshold_ms, self.anchor_interval_ms
            )));
        }
        Ok(())
    }
}

/// Replay options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Speed multiplier (1.0 = original timing)
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_speed() -> f64 {
    1.0
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl PlaybackSettings {
    pub const MIN_SPEED: f64 = 0.1;
    pub const MAX_SPEED: f64 = 10.0;

    /// Speed clamped to the supported range
    pub fn clamped_speed(&self) -> f64 {
        if self.speed.is_nan() {
            return 1.0;
        }
        self.speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED)
    }
}
