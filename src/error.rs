//! Error types for kidtalk
//!
//! Uses thiserror for ergonomic error definitions with clear messages
//! that guide users toward fixing common issues.

use thiserror::Error;

/// Top-level error type for the kidtalk application
#[derive(Error, Debug)]
pub enum KidtalkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio capture error: {0}")]
    Audio(#[from] AudioError),

    #[error("Speech recognition error: {0}")]
    Recognize(#[from] RecognizeError),

    #[error("Unknown game: '{0}'. List games with: kidtalk games")]
    UnknownGame(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to audio capture
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Microphone unavailable: {0}. Check your audio input devices.")]
    DeviceUnavailable(String),

    #[error("Audio connection failed: {0}")]
    Connection(String),

    #[error("Audio stream error: {0}")]
    StreamError(String),

    #[error("Audio stream closed before any frames arrived")]
    StreamClosed,
}

/// Errors related to the speech recognition model
#[derive(Error, Debug)]
pub enum RecognizeError {
    #[error("Voice model not found at {0}\n  Download a model from https://alphacephei.com/vosk/models\n  and place the zip (or extracted directory) there, then run: kidtalk setup")]
    ModelNotFound(String),

    #[error("Voice model failed to load from {0}")]
    ModelLoad(String),

    #[error("Model archive extraction failed: {0}")]
    Extract(String),

    #[error("Recognizer initialization failed: {0}")]
    InitFailed(String),
}

/// Result type alias using KidtalkError
pub type Result<T> = std::result::Result<T, KidtalkError>;
