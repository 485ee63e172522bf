//! Kidtalk: voice-driven learning games for kids
//!
//! This library provides the core functionality for:
//! - Capturing microphone audio via cpal (PipeWire, PulseAudio, ALSA)
//! - Streaming speech recognition with vosk (offline, local)
//! - Timeout-bounded listen sessions with guaranteed device teardown
//! - Fuzzy answer grading with score-driven difficulty tiers
//! - A single listen-and-grade engine shared by all five games
//!
//! # Architecture
//!
//! ```text
//!   ┌──────────────┐  frames   ┌──────────────┐
//!   │    Audio     │──────────▶│  Recognizer  │
//!   │    (cpal)    │           │    (vosk)    │
//!   └──────────────┘           └──────────────┘
//!          ▲                          │ Partial / Final(text)
//!          │ open/close               ▼
//!   ┌─────────────────────────────────────────┐
//!   │        Bounded Listen Session           │
//!   │  early exit on utterance, finalize on   │
//!   │  timeout, teardown on every path        │
//!   └─────────────────────────────────────────┘
//!                      │ Transcript, then Finished (once each)
//!                      ▼
//!   ┌──────────────┐  grade   ┌──────────────┐
//!   │  GameEngine  │─────────▶│    Grader    │
//!   │ (one loop,   │          │ + ScoreState │
//!   │  five games) │          │   + Tier     │
//!   └──────────────┘          └──────────────┘
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod grade;
pub mod listen;
pub mod recognize;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::{KidtalkError, Result};
pub use grade::{GradingResult, ScoreState, Tier};
pub use listen::{ListenEvent, Listener};
