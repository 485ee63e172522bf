//! Audio capture module
//!
//! Provides microphone frame capture using cpal, which works with
//! PipeWire, PulseAudio, and ALSA backends.

pub mod cpal_capture;

use crate::config::AudioConfig;
use crate::error::AudioError;
use tokio::sync::mpsc;

/// One frame of signed 16-bit PCM samples, mono, 16kHz
pub type AudioFrame = Vec<i16>;

/// Trait for audio capture implementations
#[async_trait::async_trait]
pub trait AudioCapture: Send {
    /// Acquire the input device and start capturing.
    /// Returns a channel receiver for fixed-size audio frames.
    /// Frames are full-size except possibly the last one before close.
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, AudioError>;

    /// Release the device. Safe to call before any frame was read,
    /// and idempotent.
    async fn stop(&mut self) -> Result<(), AudioError>;
}

/// Factory function to create audio capture
pub fn create_capture(config: &AudioConfig) -> Result<Box<dyn AudioCapture>, AudioError> {
    Ok(Box::new(cpal_capture::CpalCapture::new(config)?))
}
