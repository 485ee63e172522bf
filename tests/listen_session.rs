//! Integration tests for the bounded listen session
//!
//! Drives `run_session` with scripted capture and recognizer fakes to
//! pin down the session contract: early exit on the first real
//! utterance, forced finalize on timeout or stream close, capture
//! teardown on every path, and the Transcript-then-Finished
//! notification order.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use kidtalk::audio::{AudioCapture, AudioFrame};
use kidtalk::error::AudioError;
use kidtalk::listen::{run_session, run_session_and_notify, ListenEvent};
use kidtalk::recognize::{RecognitionOutcome, StreamingRecognizer};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Capture fake that emits a fixed number of frames on a schedule.
/// After the last frame the stream either closes or stays open until
/// the session tears it down.
struct FakeCapture {
    fail_open: bool,
    frame_interval: Duration,
    frame_count: usize,
    hold_open: bool,
    stopped: Arc<AtomicBool>,
}

impl FakeCapture {
    fn new(frame_count: usize, frame_interval: Duration) -> (Self, Arc<AtomicBool>) {
        let stopped = Arc::new(AtomicBool::new(false));
        let capture = Self {
            fail_open: false,
            frame_interval,
            frame_count,
            hold_open: true,
            stopped: stopped.clone(),
        };
        (capture, stopped)
    }

    fn failing() -> (Self, Arc<AtomicBool>) {
        let (mut capture, stopped) = Self::new(0, Duration::ZERO);
        capture.fail_open = true;
        (capture, stopped)
    }

    /// Close the frame channel after the script instead of staying open
    fn closing(mut self) -> Self {
        self.hold_open = false;
        self
    }
}

#[async_trait::async_trait]
impl AudioCapture for FakeCapture {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, AudioError> {
        if self.fail_open {
            return Err(AudioError::DeviceUnavailable("no such device".to_string()));
        }

        let (tx, rx) = mpsc::channel(8);
        let interval = self.frame_interval;
        let count = self.frame_count;
        let hold_open = self.hold_open;

        tokio::spawn(async move {
            for _ in 0..count {
                tokio::time::sleep(interval).await;
                if tx.send(vec![0i16; 1024]).await.is_err() {
                    return;
                }
            }
            if hold_open {
                // Keep the stream alive well past any test timeout
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
        });

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), AudioError> {
        self.stopped.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Recognizer fake that replays a fixed outcome per frame fed.
/// Frames beyond the script report `Partial`.
struct FakeRecognizer {
    script: VecDeque<RecognitionOutcome>,
    final_flush: String,
    finalized: Arc<AtomicBool>,
}

impl FakeRecognizer {
    fn new(script: Vec<RecognitionOutcome>, final_flush: &str) -> (Self, Arc<AtomicBool>) {
        let finalized = Arc::new(AtomicBool::new(false));
        let recognizer = Self {
            script: script.into(),
            final_flush: final_flush.to_string(),
            finalized: finalized.clone(),
        };
        (recognizer, finalized)
    }
}

impl StreamingRecognizer for FakeRecognizer {
    fn feed(&mut self, _frame: &AudioFrame) -> RecognitionOutcome {
        self.script.pop_front().unwrap_or(RecognitionOutcome::Partial)
    }

    fn finalize(&mut self) -> String {
        self.finalized.store(true, Ordering::SeqCst);
        self.final_flush.clone()
    }
}

const FRAME_INTERVAL: Duration = Duration::from_millis(64);

#[tokio::test(start_paused = true)]
async fn session_exits_early_on_first_utterance() {
    let (capture, stopped) = FakeCapture::new(100, FRAME_INTERVAL);
    let (recognizer, finalized) = FakeRecognizer::new(
        vec![
            RecognitionOutcome::Partial,
            RecognitionOutcome::Partial,
            RecognitionOutcome::Final("seven".to_string()),
        ],
        "unused",
    );

    let started = Instant::now();
    let transcript = run_session(
        Box::new(capture),
        Box::new(recognizer),
        Duration::from_secs(5),
    )
    .await;

    assert_eq!(transcript, "seven");
    assert!(stopped.load(Ordering::SeqCst), "capture must be stopped");
    assert!(!finalized.load(Ordering::SeqCst), "no forced finalize needed");
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "should not wait out the timeout"
    );
}

#[tokio::test(start_paused = true)]
async fn empty_final_keeps_listening() {
    let (capture, _stopped) = FakeCapture::new(100, FRAME_INTERVAL);
    let (recognizer, _finalized) = FakeRecognizer::new(
        vec![
            RecognitionOutcome::Final(String::new()),
            RecognitionOutcome::Partial,
            RecognitionOutcome::Final("blue".to_string()),
        ],
        "unused",
    );

    let transcript = run_session(
        Box::new(capture),
        Box::new(recognizer),
        Duration::from_secs(5),
    )
    .await;

    assert_eq!(transcript, "blue");
}

#[tokio::test(start_paused = true)]
async fn timeout_flushes_partial_transcript() {
    let (capture, stopped) = FakeCapture::new(1000, FRAME_INTERVAL);
    let (recognizer, finalized) = FakeRecognizer::new(vec![], "four");

    let started = Instant::now();
    let timeout = Duration::from_secs(2);
    let transcript = run_session(Box::new(capture), Box::new(recognizer), timeout).await;

    assert_eq!(transcript, "four");
    assert!(finalized.load(Ordering::SeqCst), "finalize must be forced");
    assert!(stopped.load(Ordering::SeqCst), "capture must be stopped");

    // The session ends at the deadline, not a frame boundary later
    let elapsed = started.elapsed();
    assert!(elapsed >= timeout);
    assert!(elapsed < timeout + 2 * FRAME_INTERVAL);
}

#[tokio::test(start_paused = true)]
async fn silent_session_times_out_with_empty_transcript() {
    let (capture, _stopped) = FakeCapture::new(1000, FRAME_INTERVAL);
    let (recognizer, _finalized) = FakeRecognizer::new(vec![], "");

    let transcript = run_session(
        Box::new(capture),
        Box::new(recognizer),
        Duration::from_secs(2),
    )
    .await;

    assert_eq!(transcript, "");
}

#[tokio::test(start_paused = true)]
async fn stream_close_forces_finalize() {
    let (capture, stopped) = FakeCapture::new(3, FRAME_INTERVAL);
    let capture = capture.closing();
    let (recognizer, finalized) = FakeRecognizer::new(vec![], "half an answer");

    let started = Instant::now();
    let transcript = run_session(
        Box::new(capture),
        Box::new(recognizer),
        Duration::from_secs(30),
    )
    .await;

    assert_eq!(transcript, "half an answer");
    assert!(finalized.load(Ordering::SeqCst));
    assert!(stopped.load(Ordering::SeqCst));
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "closed stream should end the session immediately"
    );
}

#[tokio::test(start_paused = true)]
async fn open_failure_degrades_to_empty_transcript() {
    let (capture, stopped) = FakeCapture::failing();
    let (recognizer, finalized) = FakeRecognizer::new(vec![], "unused");

    let transcript = run_session(
        Box::new(capture),
        Box::new(recognizer),
        Duration::from_secs(5),
    )
    .await;

    assert_eq!(transcript, "");
    assert!(!finalized.load(Ordering::SeqCst));
    assert!(
        stopped.load(Ordering::SeqCst),
        "stop must run even when open failed"
    );
}

async fn collect_events(
    capture: FakeCapture,
    recognizer: FakeRecognizer,
    timeout: Duration,
) -> Vec<ListenEvent> {
    let (tx, mut rx) = mpsc::channel(2);
    run_session_and_notify(Box::new(capture), Box::new(recognizer), timeout, tx).await;

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn notifies_transcript_then_finished_on_success() {
    let (capture, _stopped) = FakeCapture::new(100, FRAME_INTERVAL);
    let (recognizer, _finalized) = FakeRecognizer::new(
        vec![RecognitionOutcome::Final("giraffe".to_string())],
        "unused",
    );

    let events = collect_events(capture, recognizer, Duration::from_secs(5)).await;
    assert_eq!(
        events,
        vec![
            ListenEvent::Transcript("giraffe".to_string()),
            ListenEvent::Finished,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn notifies_transcript_then_finished_on_timeout() {
    // First frame would arrive after the deadline, so the session
    // times out and flushes an empty transcript.
    let (capture, _stopped) = FakeCapture::new(100, Duration::from_secs(10));
    let (recognizer, finalized) = FakeRecognizer::new(vec![], "");

    let events = collect_events(capture, recognizer, Duration::from_secs(2)).await;
    assert!(finalized.load(Ordering::SeqCst));
    assert_eq!(
        events,
        vec![ListenEvent::Transcript(String::new()), ListenEvent::Finished]
    );
}

#[tokio::test(start_paused = true)]
async fn notifies_transcript_then_finished_on_device_failure() {
    let (capture, _stopped) = FakeCapture::failing();
    let (recognizer, _finalized) = FakeRecognizer::new(vec![], "unused");

    let events = collect_events(capture, recognizer, Duration::from_secs(5)).await;
    assert_eq!(
        events,
        vec![ListenEvent::Transcript(String::new()), ListenEvent::Finished]
    );
}
