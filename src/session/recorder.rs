//! Segment recorder for capturing pointer strokes
//!
//! The recorder turns pointer-down / move / up events into a [`Recording`].
//! Two policies shape the output:
//!
//! - **Anchor throttling**: a move arriving less than the anchor interval after
//!   the last accepted anchor is dropped entirely.
//! - **Forced splits**: once a segment has spanned the segment threshold, the
//!   next accepted move closes it and opens a `continuous` segment at that
//!   position, so no single segment covers more than the threshold.
//!
//! Every operation takes the event timestamp explicitly (milliseconds on the
//! capture clock). Guard conditions, such as ending a segment when none is
//! open, are silent no-ops.

use crate::config::RecorderConfig;
use crate::render::DrawInstruction;
use crate::types::{Position, Recording, Segment};

use super::types::SessionState;

/// Segment recorder owning the open segment and the recording history
#[derive(Debug, Clone, Default)]
pub struct SegmentRecorder {
    /// Timing policy
    config: RecorderConfig,
    /// Closed segments in the order they were closed
    recording: Recording,
    /// Segment currently being extended
    open: Option<Segment>,
    /// Timestamp of the open segment's first anchor
    open_since: Option<u64>,
    /// Timestamp of the last accepted anchor
    last_anchor_at: Option<u64>,
    /// Whether the pointer is currently down
    pointer_down: bool,
}

impl SegmentRecorder {
    /// Create a recorder with the default timing policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a specific timing policy
    pub fn with_config(config: RecorderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        if self.pointer_down {
            SessionState::Recording
        } else {
            SessionState::Idle
        }
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Get the closed segments
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Get the segment being extended, if any
    pub fn open_segment(&self) -> Option<&Segment> {
        self.open.as_ref()
    }

    pub fn has_open_segment(&self) -> bool {
        self.open.is_some()
    }

    /// Timestamp of the last accepted anchor
    pub fn last_anchor_time(&self) -> Option<u64> {
        self.last_anchor_at
    }

    /// Take the closed segments, leaving the open segment and timing untouched
    pub fn take_recording(&mut self) -> Recording {
        std::mem::take(&mut self.recording)
    }

    /// Close any open segment and return the full recording
    pub fn finish(mut self) -> Recording {
        self.end_segment();
        self.recording
    }

    /// Open a segment at `pos` unless one is already open
    pub fn start_segment(&mut self, pos: Position, interval: u64, continuous: bool, now: u64) {
        if self.open.is_some() {
            tracing::trace!("start_segment ignored: a segment is already open");
            return;
        }

        tracing::debug!(%pos, interval, continuous, "segment opened");
        self.open = Some(Segment::new(pos, interval, continuous));
        self.open_since = Some(now);
        self.last_anchor_at = Some(now);
    }

    /// Append `pos` to the open segment
    pub fn push_position(&mut self, pos: Position, now: u64) {
        let Some(segment) = self.open.as_mut() else {
            tracing::trace!("push_position ignored: no open segment");
            return;
        };

        segment.anchors.push(pos);
        self.last_anchor_at = Some(now);
    }

    /// Close the open segment and append it to the recording
    pub fn end_segment(&mut self) {
        let Some(segment) = self.open.take() else {
            tracing::trace!("end_segment ignored: no open segment");
            return;
        };

        tracing::debug!(
            anchors = segment.anchors.len(),
            index = self.recording.len(),
            "segment closed"
        );
        self.open_since = None;
        self.recording.push(segment);
    }

    /// Pointer went down at `pos`
    ///
    /// Returns the instruction that starts the live path on the renderer.
    pub fn on_draw_start(&mut self, pos: Position, now: u64) -> DrawInstruction {
        self.pointer_down = true;

        let interval = self
            .last_anchor_at
            .map(|last| now.saturating_sub(last))
            .unwrap_or(0);
        self.start_segment(pos, interval, false, now);

        DrawInstruction::BeginPath(pos)
    }

    /// Pointer moved to `pos` while down
    ///
    /// Returns the line to draw live, or `None` when the move was throttled or
    /// arrived with the pointer up.
    pub fn on_draw_move(&mut self, pos: Position, now: u64) -> Option<DrawInstruction> {
        if !self.pointer_down {
            tracing::trace!("move ignored: pointer is up");
            return None;
        }
        let last = self.last_anchor_at?;

        let since_anchor = now.saturating_sub(last);
        if since_anchor < self.config.anchor_interval_ms {
            return None;
        }

        let span = self
            .open_since
            .map(|start| now.saturating_sub(start))
            .unwrap_or(since_anchor);

        if span < self.config.segment_threshold_ms {
            self.push_position(pos, now);
        } else {
            self.end_segment();
            self.start_segment(pos, since_anchor, true, now);
        }

        Some(DrawInstruction::LineTo(pos))
    }

    /// Pointer went up
    pub fn on_draw_end(&mut self) {
        self.pointer_down = false;
        self.end_segment();
    }

    /// Drop the recording, any open segment and all timing state
    pub fn clear(&mut self) {
        tracing::debug!(segments = self.recording.len(), "recording cleared");
        self.recording.clear();
        self.open = None;
        self.open_since = None;
        self.last_anchor_at = None;
        self.pointer_down = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_tap_produces_single_anchor_segment() {
        let mut recorder = SegmentRecorder::new();
        assert_eq!(recorder.on_draw_start(p(0, 0), 0), DrawInstruction::BeginPath(p(0, 0)));
        assert_eq!(recorder.state(), SessionState::Recording);
        recorder.on_draw_end();

        assert_eq!(
            recorder.recording().segments(),
            &[Segment::new(p(0, 0), 0, false)]
        );
        assert_eq!(recorder.state(), SessionState::Idle);
    }

    #[test]
    fn test_start_segment_is_guarded() {
        let mut recorder = SegmentRecorder::new();
        recorder.start_segment(p(1, 1), 0, false, 0);
        recorder.start_segment(p(9, 9), 42, true, 30);

        assert_eq!(recorder.open_segment(), Some(&Segment::new(p(1, 1), 0, false)));
        assert_eq!(recorder.last_anchor_time(), Some(0));
    }

    #[test]
    fn test_end_segment_twice() {
        let mut recorder = SegmentRecorder::new();
        recorder.start_segment(p(0, 0), 0, false, 0);
        recorder.end_segment();
        recorder.end_segment();

        assert_eq!(recorder.recording().len(), 1);
        assert!(!recorder.has_open_segment());
    }

    #[test]
    fn test_push_without_open_segment() {
        let mut recorder = SegmentRecorder::new();
        recorder.push_position(p(3, 3), 10);

        assert!(recorder.recording().is_empty());
        assert_eq!(recorder.last_anchor_time(), None);
    }

    #[test]
    fn test_throttled_move_records_nothing() {
        let mut recorder = SegmentRecorder::new();
        recorder.on_draw_start(p(0, 0), 0);
        assert_eq!(recorder.on_draw_move(p(1, 0), 5), None);
        assert_eq!(recorder.on_draw_move(p(2, 0), 10), Some(DrawInstruction::LineTo(p(2, 0))));
        assert_eq!(recorder.on_draw_move(p(3, 0), 19), None);

        assert_eq!(recorder.open_segment().map(Segment::len), Some(2));
    }

    #[test]
    fn test_move_with_pointer_up_is_ignored() {
        let mut recorder = SegmentRecorder::new();
        recorder.on_draw_start(p(0, 0), 0);
        recorder.on_draw_end();

        assert_eq!(recorder.on_draw_move(p(50, 50), 500), None);
        assert_eq!(recorder.recording().len(), 1);
        assert!(!recorder.has_open_segment());
    }

    #[test]
    fn test_interval_measured_from_last_anchor() {
        let mut recorder = SegmentRecorder::new();
        recorder.on_draw_start(p(0, 0), 1000);
        recorder.on_draw_move(p(5, 5), 1030);
        recorder.on_draw_end();
        recorder.on_draw_start(p(9, 9), 1500);
        recorder.on_draw_end();

        let segments = recorder.recording().segments();
        assert_eq!(segments[0].interval, 0);
        assert_eq!(segments[1].interval, 470);
        assert!(!segments[1].continuous);
    }

    #[test]
    fn test_long_pause_forces_split() {
        let mut recorder = SegmentRecorder::new();
        recorder.on_draw_start(p(0, 0), 0);
        recorder.on_draw_move(p(1, 0), 20);
        // pointer held still for a while
        let drawn = recorder.on_draw_move(p(2, 0), 180);
        recorder.on_draw_end();

        assert_eq!(drawn, Some(DrawInstruction::LineTo(p(2, 0))));
        let segments = recorder.recording().segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].anchors, vec![p(0, 0), p(1, 0)]);
        assert_eq!(segments[1], Segment::new(p(2, 0), 160, true));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut recorder = SegmentRecorder::new();
        recorder.on_draw_start(p(0, 0), 0);
        recorder.on_draw_end();
        recorder.on_draw_start(p(1, 1), 50);

        recorder.clear();

        assert!(recorder.recording().is_empty());
        assert!(!recorder.has_open_segment());
        assert_eq!(recorder.last_anchor_time(), None);

        // first stroke after a clear starts from a zero interval
        recorder.on_draw_start(p(2, 2), 900);
        recorder.on_draw_end();
        assert_eq!(recorder.recording().segments()[0].interval, 0);
    }

    #[test]
    fn test_finish_closes_open_segment() {
        let mut recorder = SegmentRecorder::new();
        recorder.on_draw_start(p(0, 0), 0);
        recorder.on_draw_move(p(4, 4), 15);

        let recording = recorder.finish();
        assert_eq!(recording.len(), 1);
        assert_eq!(recording.anchor_count(), 2);
    }

    #[test]
    fn test_take_recording_keeps_open_stroke() {
        let mut recorder = SegmentRecorder::new();
        recorder.on_draw_start(p(0, 0), 0);
        recorder.on_draw_end();
        recorder.on_draw_start(p(1, 1), 200);

        let taken = recorder.take_recording();
        assert_eq!(taken.len(), 1);
        assert!(recorder.recording().is_empty());
        assert!(recorder.has_open_segment());

        recorder.on_draw_end();
        assert_eq!(
            recorder.recording().segments(),
            &[Segment::new(p(1, 1), 200, false)]
        );
    }

    #[test]
    fn test_custom_timing() {
        let mut recorder = SegmentRecorder::with_config(RecorderConfig::new(5, 20));
        recorder.on_draw_start(p(0, 0), 0);
        recorder.on_draw_move(p(1, 0), 5);
        recorder.on_draw_move(p(2, 0), 10);
        recorder.on_draw_move(p(3, 0), 15);
        recorder.on_draw_move(p(4, 0), 20);
        recorder.on_draw_end();

        let segments = recorder.recording().segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 4);
        assert_eq!(segments[1], Segment::new(p(4, 0), 5, true));
    }
}
