//! Playback schedule construction
//!
//! A [`PlaybackSchedule`] is computed eagerly from a [`Recording`]: every draw
//! instruction is paired with its offset from playback start. Drivers then only
//! have to wait until each offset and apply the instruction.
//!
//! # Timing
//!
//! The surface is cleared at offset zero. Each segment fires after its
//! `interval` has elapsed past the previous segment's reservation, and then
//! reserves `anchors.len() * anchor_interval` for itself. Within a segment,
//! anchor `i` is drawn `i * anchor_interval` after the segment fires. Only the
//! inter-segment pauses come from the capture; intra-segment spacing is
//! synthetic.

use std::time::Duration;

use crate::render::{DrawInstruction, Renderer};
use crate::types::{Recording, Segment};

use super::types::ScheduledInstruction;

/// Time-ordered list of draw instructions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSchedule {
    entries: Vec<ScheduledInstruction>,
}

impl PlaybackSchedule {
    /// Compute the schedule for a recording
    pub fn build(recording: &Recording, anchor_interval: Duration) -> Self {
        let mut entries = Vec::with_capacity(recording.anchor_count() + 1);
        entries.push(ScheduledInstruction::new(Duration::ZERO, DrawInstruction::Clear));

        let mut total_delay = Duration::ZERO;
        // offsets saturate at Duration::MAX for recordings with huge intervals
        for segment in recording {
            total_delay = total_delay.saturating_add(Duration::from_millis(segment.interval));
            push_segment(&mut entries, segment, total_delay, anchor_interval);
            total_delay = total_delay.saturating_add(segment.reservation(anchor_interval));
        }

        // stable: entries sharing an offset keep insertion order
        entries.sort_by_key(|e| e.offset);

        tracing::debug!(
            segments = recording.len(),
            instructions = entries.len(),
            "playback schedule built"
        );
        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduledInstruction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offset of the last instruction
    pub fn total_duration(&self) -> Duration {
        self.entries
            .last()
            .map(|e| e.offset)
            .unwrap_or(Duration::ZERO)
    }

    /// Index of the first entry with an offset greater than `time`
    pub fn partition_at(&self, time: Duration) -> usize {
        self.entries.partition_point(|e| e.offset <= time)
    }

    /// Entries with `from < offset <= to`
    pub fn due_between(&self, from: Duration, to: Duration) -> &[ScheduledInstruction] {
        let start = self.entries.partition_point(|e| e.offset <= from);
        let end = self.partition_at(to).max(start);
        &self.entries[start..end]
    }

    /// Apply every instruction in order, ignoring timing
    pub fn play_all<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for entry in &self.entries {
            entry.instruction.apply(renderer);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledInstruction> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a PlaybackSchedule {
    type Item = &'a ScheduledInstruction;
    type IntoIter = std::slice::Iter<'a, ScheduledInstruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn push_segment(
    entries: &mut Vec<ScheduledInstruction>,
    segment: &Segment,
    fire_at: Duration,
    anchor_interval: Duration,
) {
    let mut anchors = segment.anchors.iter().enumerate();

    if !segment.continuous {
        let Some((_, &first)) = anchors.next() else {
            return;
        };
        entries.push(ScheduledInstruction::new(
            fire_at,
            DrawInstruction::BeginPath(first),
        ));
    }

    for (i, &pos) in anchors {
        let step = anchor_interval.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX));
        entries.push(ScheduledInstruction::new(
            fire_at.saturating_add(step),
            DrawInstruction::LineTo(pos),
        ));
    }
}
