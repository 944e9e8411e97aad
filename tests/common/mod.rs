//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use handwriting_replay::Recording;
use std::time::Duration;

/// Default anchor interval as a Duration
pub fn anchor_interval() -> Duration {
    Duration::from_millis(handwriting_replay::ANCHOR_INTERVAL)
}

/// Assert the structural invariants every recording must hold
pub fn assert_recording_valid(recording: &Recording) {
    for (i, segment) in recording.iter().enumerate() {
        assert!(
            !segment.anchors.is_empty(),
            "Segment {} has no anchors: {:?}",
            i,
            segment
        );
    }
}
