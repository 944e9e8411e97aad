//! Playback drivers for computed schedules
//!
//! Two drivers execute a [`PlaybackSchedule`]:
//!
//! - [`SessionPlayer`] is polled. The host calls [`SessionPlayer::update`]
//!   from its own loop and every instruction whose offset has been reached on
//!   the player's [`Clock`] is applied. With a [`ManualClock`](crate::clock::ManualClock)
//!   this runs without real waits.
//! - [`spawn_playback`] runs the schedule on a background thread with real
//!   waits and returns a [`PlaybackHandle`].
//!
//! Both can be cancelled mid-playback, which drops every instruction not yet
//! applied. Loading a new schedule into a player, or dropping a handle,
//! cancels the previous playback.

use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};

use crate::clock::{Clock, MonotonicClock};
use crate::config::PlaybackSettings;
use crate::error::{RecordingError, Result};
use crate::render::Renderer;

use super::schedule::PlaybackSchedule;
use super::types::SessionState;

/// Polled player for a playback schedule
#[derive(Debug)]
pub struct SessionPlayer<C: Clock = MonotonicClock> {
    /// Current playback state
    state: SessionState,
    /// The schedule being played
    schedule: Option<PlaybackSchedule>,
    /// Index of the next instruction to apply
    next_index: usize,
    /// Current playback time
    current_time: Duration,
    /// Playback speed multiplier (1.0 = real-time, 2.0 = 2x speed, etc.)
    playback_speed: f64,
    /// Clock reading when playback (re)started
    playback_start: Option<Duration>,
    /// Playback position when started (to handle pause/resume)
    playback_offset: Duration,
    clock: C,
}

impl Default for SessionPlayer<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionPlayer<MonotonicClock> {
    /// Create a player driven by wall-clock time
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl<C: Clock> SessionPlayer<C> {
    /// Create a player driven by `clock`
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: SessionState::Idle,
            schedule: None,
            next_index: 0,
            current_time: Duration::ZERO,
            playback_speed: 1.0,
            playback_start: None,
            playback_offset: Duration::ZERO,
            clock,
        }
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if playing
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Check if paused
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Check if a schedule is loaded
    pub fn has_schedule(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn schedule(&self) -> Option<&PlaybackSchedule> {
        self.schedule.as_ref()
    }

    /// Get current playback time
    pub fn current_time(&self) -> Duration {
        self.current_time
    }

    /// Number of instructions applied so far
    pub fn applied(&self) -> usize {
        self.next_index
    }

    /// Number of instructions still waiting to be applied
    pub fn pending(&self) -> usize {
        self.schedule
            .as_ref()
            .map(|s| s.len().saturating_sub(self.next_index))
            .unwrap_or(0)
    }

    /// Whether every instruction of the loaded schedule has been applied
    pub fn is_finished(&self) -> bool {
        self.has_schedule() && self.pending() == 0
    }

    /// Get playback speed
    pub fn playback_speed(&self) -> f64 {
        self.playback_speed
    }

    /// Set playback speed
    pub fn set_playback_speed(&mut self, speed: f64) {
        // Store current position before changing speed
        if self.is_playing() {
            self.update_playback_time();
            self.playback_offset = self.current_time;
            self.playback_start = Some(self.clock.now());
        }
        self.playback_speed = PlaybackSettings { speed }.clamped_speed();
    }

    /// Get total duration
    pub fn total_duration(&self) -> Duration {
        self.schedule
            .as_ref()
            .map(|s| s.total_duration())
            .unwrap_or(Duration::ZERO)
    }

    /// Get playback progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        let total = self.total_duration();
        if total.is_zero() {
            return if self.is_finished() { 1.0 } else { 0.0 };
        }
        (self.current_time.as_secs_f64() / total.as_secs_f64()).min(1.0)
    }

    /// Load a schedule, cancelling whatever was playing before
    pub fn load(&mut self, schedule: PlaybackSchedule) {
        if self.pending() > 0 {
            tracing::debug!(dropped = self.pending(), "previous playback cancelled");
        }
        self.schedule = Some(schedule);
        self.rewind();
        self.state = SessionState::Stopped;
    }

    /// Unload the current schedule
    pub fn unload(&mut self) {
        self.schedule = None;
        self.rewind();
        self.state = SessionState::Idle;
    }

    /// Drop every instruction not yet applied
    pub fn cancel(&mut self) {
        if let Some(ref schedule) = self.schedule {
            tracing::debug!(dropped = self.pending(), "playback cancelled");
            self.next_index = schedule.len();
        }
        self.playback_start = None;
        if self.schedule.is_some() {
            self.state = SessionState::Stopped;
        }
    }

    /// Start or resume playback
    pub fn play(&mut self) {
        if self.schedule.is_none() {
            return;
        }

        match self.state {
            SessionState::Stopped | SessionState::Paused => {
                self.playback_start = Some(self.clock.now());
                self.playback_offset = self.current_time;
                self.state = SessionState::Playing;
            }
            _ => {}
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == SessionState::Playing {
            self.update_playback_time();
            self.playback_offset = self.current_time;
            self.playback_start = None;
            self.state = SessionState::Paused;
        }
    }

    /// Stop playback and reset to beginning
    pub fn stop(&mut self) {
        self.rewind();
        if self.schedule.is_some() {
            self.state = SessionState::Stopped;
        }
    }

    fn rewind(&mut self) {
        self.next_index = 0;
        self.current_time = Duration::ZERO;
        self.playback_start = None;
        self.playback_offset = Duration::ZERO;
    }

    /// Update playback time based on elapsed clock time
    fn update_playback_time(&mut self) {
        if let Some(start) = self.playback_start {
            let real_elapsed = self.clock.now().saturating_sub(start);
            let playback_elapsed = scale(real_elapsed, self.playback_speed);
            self.current_time = self.playback_offset.saturating_add(playback_elapsed);
        }
    }

    /// Apply every instruction that has come due (call this each frame)
    ///
    /// Returns the number of instructions applied by this call.
    pub fn update<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        if !self.is_playing() {
            return 0;
        }

        self.update_playback_time();

        let Some(ref schedule) = self.schedule else {
            return 0;
        };

        let due = schedule.partition_at(self.current_time).max(self.next_index);
        for entry in &schedule.entries()[self.next_index..due] {
            entry.instruction.apply(renderer);
        }
        let applied = due - self.next_index;
        self.next_index = due;

        if self.next_index >= schedule.len() {
            tracing::debug!(instructions = schedule.len(), "playback finished");
            self.current_time = self.current_time.max(schedule.total_duration());
            self.playback_start = None;
            self.state = SessionState::Stopped;
        }

        applied
    }
}

/// Multiply a duration by `factor`, rounded to the nearest nanosecond
///
/// Results beyond [`Duration::MAX`] (or a NaN product) saturate to it.
fn scale(duration: Duration, factor: f64) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;

    let product = (duration.as_nanos() as f64 * factor).round();
    if product.is_nan() || product >= Duration::MAX.as_nanos() as f64 {
        return Duration::MAX;
    }

    let nanos = product.max(0.0) as u128;
    Duration::new(
        (nanos / NANOS_PER_SEC) as u64,
        (nanos % NANOS_PER_SEC) as u32,
    )
}

/// Result of a threaded playback
#[derive(Debug)]
pub struct PlaybackOutcome<R> {
    /// The renderer handed to [`spawn_playback`]
    pub renderer: R,
    /// Number of instructions applied
    pub applied: usize,
    /// Whether playback stopped before the end of the schedule
    pub cancelled: bool,
}

/// Handle to a playback running on a background thread
///
/// Dropping the handle cancels the playback.
#[derive(Debug)]
pub struct PlaybackHandle<R> {
    cancel_tx: Sender<()>,
    thread: JoinHandle<PlaybackOutcome<R>>,
}

impl<R> PlaybackHandle<R> {
    /// Stop applying instructions as soon as possible
    pub fn cancel(&self) {
        let _ = self.cancel_tx.try_send(());
    }

    /// Whether the playback thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the playback thread and recover the renderer
    pub fn join(self) -> Result<PlaybackOutcome<R>> {
        self.thread
            .join()
            .map_err(|_| RecordingError::Channel("playback thread panicked".to_string()))
    }
}

/// Run `schedule` against `renderer` on a background thread
pub fn spawn_playback<R>(schedule: PlaybackSchedule, renderer: R, speed: f64) -> PlaybackHandle<R>
where
    R: Renderer + Send + 'static,
{
    let speed = PlaybackSettings { speed }.clamped_speed();
    let (cancel_tx, cancel_rx) = bounded::<()>(1);

    let thread = std::thread::spawn(move || {
        let mut renderer = renderer;
        let start = Instant::now();
        let mut applied = 0;

        tracing::debug!(instructions = schedule.len(), speed, "threaded playback started");

        for entry in &schedule {
            let wait = match start.checked_add(scale(entry.offset, 1.0 / speed)) {
                Some(deadline) => cancel_rx.recv_deadline(deadline),
                // past the end of the monotonic clock: only a cancel ends the wait
                None => cancel_rx
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };
            match wait {
                Err(RecvTimeoutError::Timeout) => {
                    entry.instruction.apply(&mut renderer);
                    applied += 1;
                }
                // explicit cancel, or the handle was dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!(
                        applied,
                        dropped = schedule.len() - applied,
                        "threaded playback cancelled"
                    );
                    return PlaybackOutcome {
                        renderer,
                        applied,
                        cancelled: true,
                    };
                }
            }
        }

        tracing::debug!(applied, "threaded playback finished");
        PlaybackOutcome {
            renderer,
            applied,
            cancelled: false,
        }
    });

    PlaybackHandle { cancel_tx, thread }
}
