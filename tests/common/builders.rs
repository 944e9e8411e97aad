//! Test data builders for creating recordings and pointer scripts

use handwriting_replay::{PointerSample, Position, Recording, Segment};

/// Builder for creating test Segments
pub struct SegmentBuilder {
    anchors: Vec<Position>,
    interval: u64,
    continuous: bool,
}

impl SegmentBuilder {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            anchors: vec![Position::new(x, y)],
            interval: 0,
            continuous: false,
        }
    }

    pub fn to(mut self, x: i32, y: i32) -> Self {
        self.anchors.push(Position::new(x, y));
        self
    }

    pub fn interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    pub fn continuous(mut self) -> Self {
        self.continuous = true;
        self
    }

    pub fn build(self) -> Segment {
        Segment {
            anchors: self.anchors,
            interval: self.interval,
            continuous: self.continuous,
        }
    }
}

/// Build a recording from segment builders
pub fn recording(segments: impl IntoIterator<Item = SegmentBuilder>) -> Recording {
    Recording::from(segments.into_iter().map(SegmentBuilder::build).collect::<Vec<_>>())
}

/// Scripted pointer input with explicit timestamps
#[derive(Default)]
pub struct StrokeScript {
    samples: Vec<PointerSample>,
}

impl StrokeScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn down(mut self, x: i32, y: i32, at_ms: u64) -> Self {
        self.samples
            .push(PointerSample::new(Position::new(x, y), true, at_ms));
        self
    }

    pub fn move_to(self, x: i32, y: i32, at_ms: u64) -> Self {
        self.down(x, y, at_ms)
    }

    pub fn up(mut self, at_ms: u64) -> Self {
        let pos = self
            .samples
            .last()
            .map(|s| s.pos)
            .unwrap_or_default();
        self.samples.push(PointerSample::new(pos, false, at_ms));
        self
    }

    /// Horizontal drag sampled every `step_ms`, starting with a down at `start_ms`
    pub fn drag(mut self, start_ms: u64, duration_ms: u64, step_ms: u64) -> Self {
        let mut t = start_ms;
        self = self.down(0, 0, t);
        while t + step_ms <= start_ms + duration_ms {
            t += step_ms;
            self = self.move_to((t - start_ms) as i32, 0, t);
        }
        self
    }

    pub fn samples(&self) -> &[PointerSample] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_builder() {
        let segment = SegmentBuilder::new(0, 0).to(5, 5).interval(40).continuous().build();

        assert_eq!(segment.anchors.len(), 2);
        assert_eq!(segment.interval, 40);
        assert!(segment.continuous);
    }

    #[test]
    fn test_drag_script() {
        let script = StrokeScript::new().drag(0, 30, 10).up(35);
        let times: Vec<u64> = script.samples().iter().map(|s| s.at_ms).collect();
        assert_eq!(times, vec![0, 10, 20, 30, 35]);
        assert!(!script.samples()[4].pointer_down);
    }
}
