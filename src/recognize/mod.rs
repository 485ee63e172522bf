//! Streaming speech recognition
//!
//! Wraps the vosk offline recognizer behind a small streaming trait:
//! feed one audio frame at a time, get told when an utterance is
//! complete, or force a final transcript out of partial audio.
//!
//! The acoustic model is expensive to load, so it is initialized
//! lazily once per process and shared read-only across recognizer
//! instances (see [`model`]).

pub mod model;
pub mod vosk;

use crate::audio::AudioFrame;
use crate::config::Config;
use crate::error::RecognizeError;

/// Per-frame recognition outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// Still accumulating audio, no utterance boundary yet
    Partial,
    /// The recognizer judged an utterance complete.
    /// The transcript may be empty (silence, no speech detected).
    Final(String),
}

/// Trait for streaming speech-to-text implementations
pub trait StreamingRecognizer: Send {
    /// Feed one frame of mono 16kHz i16 samples.
    /// Returns `Final` the moment the model reaches an utterance boundary.
    fn feed(&mut self, frame: &AudioFrame) -> RecognitionOutcome;

    /// Force the best transcript out of whatever audio has accumulated.
    /// Returns an empty string if nothing intelligible was captured.
    fn finalize(&mut self) -> String;
}

/// Factory function: a fresh recognizer bound to the shared model
pub fn create_recognizer(config: &Config) -> Result<Box<dyn StreamingRecognizer>, RecognizeError> {
    let model = model::shared_model(config)?;
    let recognizer = vosk::VoskRecognizer::new(model, config.audio.sample_rate as f32)?;
    Ok(Box::new(recognizer))
}
