//! Vosk-backed streaming recognizer
//!
//! One `VoskRecognizer` exists per listen session, bound to the shared
//! process-wide model. `accept_waveform` runs Kaldi decoding incrementally;
//! `DecodingState::Finalized` marks an utterance boundary.

use super::{RecognitionOutcome, StreamingRecognizer};
use crate::audio::AudioFrame;
use crate::error::RecognizeError;
use std::sync::Arc;
use vosk::{DecodingState, Model, Recognizer};

pub struct VoskRecognizer {
    inner: Recognizer,
    // Keeps the shared model alive for the lifetime of the recognizer
    _model: Arc<Model>,
}

impl VoskRecognizer {
    pub fn new(model: Arc<Model>, sample_rate: f32) -> Result<Self, RecognizeError> {
        let inner = Recognizer::new(&model, sample_rate).ok_or_else(|| {
            RecognizeError::InitFailed("could not create vosk recognizer".to_string())
        })?;

        Ok(Self {
            inner,
            _model: model,
        })
    }
}

impl StreamingRecognizer for VoskRecognizer {
    fn feed(&mut self, frame: &AudioFrame) -> RecognitionOutcome {
        match self.inner.accept_waveform(frame) {
            DecodingState::Finalized => {
                let text = self
                    .inner
                    .final_result()
                    .single()
                    .map(|r| r.text.to_string())
                    .unwrap_or_default();
                RecognitionOutcome::Final(text)
            }
            DecodingState::Failed => {
                tracing::warn!("vosk decoding failed on frame, continuing");
                RecognitionOutcome::Partial
            }
            DecodingState::Running => RecognitionOutcome::Partial,
        }
    }

    fn finalize(&mut self) -> String {
        self.inner
            .final_result()
            .single()
            .map(|r| r.text.to_string())
            .unwrap_or_default()
    }
}
