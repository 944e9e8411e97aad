//! # handwriting-replay: recordable handwriting
//!
//! Captures freehand pointer or touch input as timed stroke segments, encodes
//! them as JSON text, and replays them with the original pauses so a drawing
//! appears to redraw itself.
//!
//! ## Architecture
//!
//! - **Capture**: samples arrive through a crossbeam channel and are applied in
//!   order to a [`SegmentRecorder`]
//! - **Codec**: [`serialize`] / [`deserialize`] convert a [`Recording`] to and from text
//! - **Schedule**: [`PlaybackSchedule`] pairs each draw instruction with its offset
//! - **Playback**: [`SessionPlayer`] (polled) or [`spawn_playback`] (threaded)
//!   drive a [`Renderer`]
//!
//! Rendering itself is left to the caller: anything that can clear a surface,
//! start a path and draw a straight line implements [`Renderer`].
//!
//! ## Example
//!
//! ```
//! use handwriting_replay::{
//!     deserialize, serialize, InstructionLog, PlaybackSchedule, Position, SegmentRecorder,
//! };
//! use std::time::Duration;
//!
//! let mut recorder = SegmentRecorder::new();
//! recorder.on_draw_start(Position::new(0, 0), 0);
//! recorder.on_draw_move(Position::new(10, 0), 20);
//! recorder.on_draw_end();
//!
//! let text = serialize(recorder.recording());
//! let recording = deserialize(&text).unwrap();
//!
//! let schedule = PlaybackSchedule::build(&recording, Duration::from_millis(10));
//! let mut log = InstructionLog::new();
//! schedule.play_all(&mut log);
//! assert_eq!(log.len(), 3);
//! ```

pub mod capture;
pub mod clock;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use capture::{CaptureSender, CaptureSession, PointerEvent, PointerSample};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{PlaybackSettings, RecorderConfig, ReplayConfig};
pub use error::{RecordingError, Result};
pub use render::{DrawInstruction, InstructionLog, Renderer, TracingRenderer};
pub use session::{
    deserialize, serialize, serialize_pretty, spawn_playback, PlaybackHandle, PlaybackSchedule,
    SegmentRecorder, SessionPlayer, SessionState,
};
pub use types::{Position, Recording, Segment, ANCHOR_INTERVAL, SEGMENT_THRES};
