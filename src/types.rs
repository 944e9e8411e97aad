//! Core data types for handwriting-replay
//!
//! This module contains the fundamental data structures used throughout
//! the crate for representing a captured drawing.
//!
//! # Main Types
//!
//! - [`Position`] - An integer `(x, y)` point in output-surface space
//! - [`Segment`] - A contiguous run of anchors with its lead-in pause and continuity flag
//! - [`Recording`] - The ordered history of segments from one drawing session
//!
//! # Text Representation
//!
//! A [`Position`] serializes as a two-element array and a [`Recording`] as a
//! bare array of segments:
//!
//! ```text
//! [{"anchors":[[0,0],[10,0]],"interval":0,"continuous":false}]
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum time between accepted anchors within a segment, in milliseconds
pub const ANCHOR_INTERVAL: u64 = 10;

/// Maximum time a segment may span before it is force-split, in milliseconds
pub const SEGMENT_THRES: u64 = 100;

/// A point in the renderer's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Position {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [i32; 2] {
    fn from(pos: Position) -> Self {
        [pos.x, pos.y]
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A recorded stroke fragment
///
/// `anchors` is never empty for a segment produced by the recorder or
/// accepted by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Sample points in capture order
    pub anchors: Vec<Position>,
    /// Milliseconds between the end of the previous segment and the first anchor
    pub interval: u64,
    /// Continue the current path instead of lifting the pen
    pub continuous: bool,
}

impl Segment {
    /// Create a segment holding a single anchor
    pub fn new(first: Position, interval: u64, continuous: bool) -> Self {
        Self {
            anchors: vec![first],
            interval,
            continuous,
        }
    }

    /// First anchor of the segment
    pub fn first_anchor(&self) -> Option<Position> {
        self.anchors.first().copied()
    }

    /// Number of anchors
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Check if the segment has no anchors
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Time reserved for this segment's own anchors during replay
    ///
    /// Saturates at [`Duration::MAX`].
    pub fn reservation(&self, anchor_interval: Duration) -> Duration {
        anchor_interval.saturating_mul(u32::try_from(self.anchors.len()).unwrap_or(u32::MAX))
    }
}

/// The full ordered history of one drawing session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recording {
    segments: Vec<Segment>,
}

impl Recording {
    /// Create a new empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the segments in playback order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Append a closed segment
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Remove every segment
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Get the number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the recording is empty
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total number of anchors across all segments
    pub fn anchor_count(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// Number of pen-down strokes (segments that lift the pen first)
    pub fn stroke_count(&self) -> usize {
        self.segments.iter().filter(|s| !s.continuous).count()
    }

    /// Time needed to replay the whole recording, including the final
    /// segment's anchor reservation
    ///
    /// Any `u64` interval decodes, so the total saturates at [`Duration::MAX`].
    pub fn playback_duration(&self, anchor_interval: Duration) -> Duration {
        self.segments.iter().fold(Duration::ZERO, |total, s| {
            total
                .saturating_add(Duration::from_millis(s.interval))
                .saturating_add(s.reservation(anchor_interval))
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl From<Vec<Segment>> for Recording {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl From<Recording> for Vec<Segment> {
    fn from(recording: Recording) -> Self {
        recording.segments
    }
}

impl<'a> IntoIterator for &'a Recording {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
