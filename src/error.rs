//! Error handling for handwriting-replay
//!
//! This module defines the error type shared by the codec, configuration
//! loading and the playback drivers, plus a Result alias for use throughout
//! the crate.
//!
//! Recorder guard conditions (starting a segment while one is open, ending
//! one when none is) are not errors and never surface here.

use thiserror::Error;

/// Main error type for handwriting-replay operations
#[derive(Error, Debug)]
pub enum RecordingError {
    /// Text is not well-formed JSON
    #[error("Malformed recording: {0}")]
    Malformed(String),

    /// JSON is well-formed but does not describe a recording
    #[error("Schema error: {0}")]
    Schema(String),

    /// A specific segment violates the recording schema
    #[error("Schema error in segment {index}: {message}")]
    SegmentSchema { index: usize, message: String },

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<RecordingError>,
    },
}

impl RecordingError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        RecordingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether the input text could not be parsed at all
    pub fn is_malformed(&self) -> bool {
        match self {
            RecordingError::Malformed(_) => true,
            RecordingError::WithContext { source, .. } => source.is_malformed(),
            _ => false,
        }
    }

    /// Whether the input parsed but did not match the recording schema
    pub fn is_schema(&self) -> bool {
        match self {
            RecordingError::Schema(_) | RecordingError::SegmentSchema { .. } => true,
            RecordingError::WithContext { source, .. } => source.is_schema(),
            _ => false,
        }
    }
}

/// Result type alias for handwriting-replay operations
pub type Result<T> = std::result::Result<T, RecordingError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| RecordingError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| RecordingError::Io(e).with_context(f()))
    }
}
