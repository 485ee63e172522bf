//! Bounded listen session
//!
//! Captures one spoken answer: opens the microphone, streams frames into
//! the recognizer, and stops at the first complete utterance or when the
//! timeout elapses, whichever comes first. On timeout the recognizer is
//! force-finalized so partial audio still yields a best-effort transcript.
//!
//! The session runs on a background tokio task so the interactive caller
//! is never blocked for the timeout window. Results come back over a
//! channel with a fixed shape: exactly one `Transcript` (possibly empty),
//! then exactly one `Finished`, on every path - early completion, timeout,
//! or device failure. Microphone faults degrade to an empty transcript;
//! they never escape the session.

use crate::audio::{self, AudioCapture};
use crate::config::Config;
use crate::recognize::{self, RecognitionOutcome, StreamingRecognizer};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Notifications delivered to the caller, in order, once each per session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenEvent {
    /// The terminal transcript. Empty means silence or capture failure.
    Transcript(String),
    /// Listening is over; the caller may re-enable its answer control.
    Finished,
}

/// Entry point for answer capture
pub struct Listener {
    config: Config,
}

impl Listener {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Timeout from configuration
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.config.listen.timeout_secs)
    }

    /// Start one listen session on a background task.
    ///
    /// The returned receiver yields `Transcript` then `Finished`, exactly
    /// once each. The caller should not start another session until
    /// `Finished` arrives; the microphone is exclusively held until then.
    pub fn start_listen(&self, timeout: Duration) -> mpsc::Receiver<ListenEvent> {
        let (tx, rx) = mpsc::channel(2);
        let config = self.config.clone();

        tokio::spawn(async move {
            let transcript = capture_transcript(&config, timeout).await;
            deliver(&tx, transcript).await;
        });

        rx
    }
}

/// Send the session's two notifications in their required order.
/// Failures are ignored: a dropped receiver just means the caller
/// stopped caring.
async fn deliver(tx: &mpsc::Sender<ListenEvent>, transcript: String) {
    let _ = tx.send(ListenEvent::Transcript(transcript)).await;
    let _ = tx.send(ListenEvent::Finished).await;
}

/// Run one session with injected components and deliver its
/// notifications. The seam the integration tests drive.
pub async fn run_session_and_notify(
    capture: Box<dyn AudioCapture>,
    recognizer: Box<dyn StreamingRecognizer>,
    timeout: Duration,
    tx: mpsc::Sender<ListenEvent>,
) {
    let transcript = run_session(capture, recognizer, timeout).await;
    deliver(&tx, transcript).await;
}

/// Build the real capture source and recognizer and run one session.
/// Every fault is normalized to an empty transcript here, at the session
/// boundary.
async fn capture_transcript(config: &Config, timeout: Duration) -> String {
    let recognizer = match recognize::create_recognizer(config) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Recognizer unavailable: {}", e);
            return String::new();
        }
    };

    let capture = match audio::create_capture(&config.audio) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Could not create audio capture: {}", e);
            return String::new();
        }
    };

    run_session(capture, recognizer, timeout).await
}

/// Drive one frame-read/feed loop under a wall-clock deadline.
///
/// Exits early on the first non-empty final utterance; on deadline the
/// recognizer is flushed for whatever partial transcript it holds. The
/// capture source is stopped on every exit path before returning.
pub async fn run_session(
    mut capture: Box<dyn AudioCapture>,
    mut recognizer: Box<dyn StreamingRecognizer>,
    timeout: Duration,
) -> String {
    let started = Instant::now();
    let deadline = started + timeout;
    let mut frames: u64 = 0;

    let transcript = match capture.start().await {
        Err(e) => {
            tracing::warn!("Could not open microphone: {}", e);
            String::new()
        }
        Ok(mut frame_rx) => loop {
            match tokio::time::timeout_at(deadline, frame_rx.recv()).await {
                Ok(Some(frame)) => {
                    frames += 1;
                    if let RecognitionOutcome::Final(text) = recognizer.feed(&frame) {
                        // An empty final just means an utterance boundary
                        // with no speech in it; keep listening until the
                        // deadline for a real answer.
                        if !text.is_empty() {
                            tracing::debug!("Utterance complete after {} frames", frames);
                            break text;
                        }
                    }
                }
                Ok(None) => {
                    tracing::debug!("Audio stream closed after {} frames", frames);
                    break recognizer.finalize();
                }
                Err(_) => {
                    tracing::debug!("Listen timeout after {} frames, finalizing", frames);
                    break recognizer.finalize();
                }
            }
        },
    };

    // Teardown runs on every path: early exit, timeout, or open failure
    // (stop is idempotent and safe before any frame was read).
    if let Err(e) = capture.stop().await {
        tracing::warn!("Audio capture stop failed: {}", e);
    }

    tracing::debug!(
        "Listen session done in {:.2}s: {} frames, {:?}",
        started.elapsed().as_secs_f32(),
        frames,
        transcript
    );

    transcript
}
