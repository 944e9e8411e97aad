//! Session state and schedule types

use std::time::Duration;

use crate::render::DrawInstruction;

/// State of capture or playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing in progress
    #[default]
    Idle,
    /// Pointer is down and samples are being recorded
    Recording,
    /// Schedule loaded, not playing
    Stopped,
    /// Playing back a schedule
    Playing,
    /// Playback paused
    Paused,
}

impl SessionState {
    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        matches!(self, SessionState::Recording)
    }

    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionState::Playing)
    }

    /// Check if paused
    pub fn is_paused(&self) -> bool {
        matches!(self, SessionState::Paused)
    }

    /// Display name for the state
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Recording => "Recording",
            SessionState::Stopped => "Stopped",
            SessionState::Playing => "Playing",
            SessionState::Paused => "Paused",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A draw instruction paired with its offset from playback start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledInstruction {
    pub offset: Duration,
    pub instruction: DrawInstruction,
}

impl ScheduledInstruction {
    pub fn new(offset: Duration, instruction: DrawInstruction) -> Self {
        Self {
            offset,
            instruction,
        }
    }
}
