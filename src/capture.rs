//! Ordered input channel between a sampler and the recorder
//!
//! A sampler (mouse, touch or a scripted log) sends [`PointerSample`]s through
//! a crossbeam channel. The [`CaptureSession`] drains that channel on its own
//! thread, turns `(position, pointer_down)` transitions into down / move / up
//! events, and applies them to a [`SegmentRecorder`] in arrival order. Live
//! draw instructions are echoed to the caller's renderer as they are produced.
//!
//! | was down | now down | event |
//! |----------|----------|-------|
//! | no       | yes      | down  |
//! | yes      | yes      | move  |
//! | yes      | no       | up    |
//! | no       | no       | ignored (hover) |

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, MonotonicClock};
use crate::config::RecorderConfig;
use crate::error::{RecordingError, Result};
use crate::render::Renderer;
use crate::session::SegmentRecorder;
use crate::types::{Position, Recording};

/// One raw sample from the sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Position in the renderer's coordinate space
    pub pos: Position,
    /// Whether the pointer (button or touch) is down
    pub pointer_down: bool,
    /// Milliseconds on the capture clock
    pub at_ms: u64,
}

impl PointerSample {
    pub fn new(pos: Position, pointer_down: bool, at_ms: u64) -> Self {
        Self {
            pos,
            pointer_down,
            at_ms,
        }
    }
}

/// Pointer transition derived from consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down(Position),
    Move(Position),
    Up,
}

/// Sending half of the capture channel, stamping samples with a clock
#[derive(Debug, Clone)]
pub struct CaptureSender<C: Clock = MonotonicClock> {
    tx: Sender<PointerSample>,
    clock: C,
}

impl<C: Clock> CaptureSender<C> {
    /// Send a sample stamped with the current clock time
    pub fn send(&self, pos: Position, pointer_down: bool) -> Result<()> {
        self.send_sample(PointerSample::new(pos, pointer_down, self.clock.now_ms()))
    }

    /// Send a sample that already carries its timestamp
    pub fn send_sample(&self, sample: PointerSample) -> Result<()> {
        self.tx
            .send(sample)
            .map_err(|_| RecordingError::Channel("capture session has shut down".to_string()))
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Consumer of the capture channel, owning the recorder
#[derive(Debug)]
pub struct CaptureSession {
    rx: Receiver<PointerSample>,
    tx: Sender<PointerSample>,
    recorder: SegmentRecorder,
}

impl CaptureSession {
    /// Create a session with an empty recorder
    pub fn new(config: RecorderConfig) -> Self {
        let (tx, rx) = unbounded();
        Self {
            rx,
            tx,
            recorder: SegmentRecorder::with_config(config),
        }
    }

    /// Get a sender stamping samples with wall-clock time
    pub fn sender(&self) -> CaptureSender<MonotonicClock> {
        self.sender_with_clock(MonotonicClock::new())
    }

    /// Get a sender stamping samples with `clock`
    pub fn sender_with_clock<C: Clock>(&self, clock: C) -> CaptureSender<C> {
        CaptureSender {
            tx: self.tx.clone(),
            clock,
        }
    }

    pub fn recorder(&self) -> &SegmentRecorder {
        &self.recorder
    }

    pub fn recording(&self) -> &Recording {
        self.recorder.recording()
    }

    /// Classify a sample against the current pointer state
    pub fn classify(&self, sample: &PointerSample) -> Option<PointerEvent> {
        match (self.recorder.is_pointer_down(), sample.pointer_down) {
            (false, true) => Some(PointerEvent::Down(sample.pos)),
            (true, true) => Some(PointerEvent::Move(sample.pos)),
            (true, false) => Some(PointerEvent::Up),
            (false, false) => None,
        }
    }

    /// Apply one sample to the recorder, echoing live drawing to `renderer`
    pub fn apply_sample<R: Renderer + ?Sized>(&mut self, sample: PointerSample, renderer: &mut R) {
        let Some(event) = self.classify(&sample) else {
            return;
        };

        match event {
            PointerEvent::Down(pos) => {
                self.recorder
                    .on_draw_start(pos, sample.at_ms)
                    .apply(renderer);
            }
            PointerEvent::Move(pos) => {
                if let Some(instruction) = self.recorder.on_draw_move(pos, sample.at_ms) {
                    instruction.apply(renderer);
                }
            }
            PointerEvent::Up => self.recorder.on_draw_end(),
        }
    }

    /// Apply every sample currently queued, without blocking
    ///
    /// Returns the number of samples consumed.
    pub fn pump<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        let mut consumed = 0;
        loop {
            match self.rx.try_recv() {
                Ok(sample) => {
                    self.apply_sample(sample, renderer);
                    consumed += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        consumed
    }

    /// Clear the recording and the surface
    ///
    /// Samples already queued are discarded with it.
    pub fn clear<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let discarded = self.rx.try_iter().count();
        if discarded > 0 {
            tracing::debug!(discarded, "queued samples discarded by clear");
        }
        self.recorder.clear();
        renderer.clear();
    }

    /// Apply everything still queued, close the open segment and return the recording
    pub fn finish<R: Renderer + ?Sized>(mut self, renderer: &mut R) -> Recording {
        self.pump(renderer);
        self.recorder.finish()
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new(RecorderConfig::default())
    }
}
