//! Stroke recording and timed playback
//!
//! This module provides the capture side (turning pointer events into a
//! segmented recording), the text codec for recordings, and the replay side
//! (turning a recording back into timed draw instructions).
//!
//! # Features
//!
//! - Record strokes as segments with throttled anchors and forced splits
//! - Encode and decode recordings as JSON text
//! - Compute an eager playback schedule that reproduces inter-segment pauses
//! - Play a schedule back by polling or on a background thread, with cancellation

pub mod codec;
pub mod player;
pub mod recorder;
pub mod schedule;
pub mod types;

pub use codec::{deserialize, serialize, serialize_pretty};
pub use player::{spawn_playback, PlaybackHandle, PlaybackOutcome, SessionPlayer};
pub use recorder::SegmentRecorder;
pub use schedule::PlaybackSchedule;
pub use types::{ScheduledInstruction, SessionState};
