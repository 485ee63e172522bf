//! Generic listen-and-grade game engine
//!
//! All five games share one round loop: present a stimulus, optionally
//! speak the prompt, capture a spoken answer, grade it, adjust the score.
//! The engine owns that loop once; each game is just a stimulus provider
//! plugged into it.

pub mod catalog;

use crate::grade::{self, GradingResult, ScoreState, Tier};
use crate::listen::{ListenEvent, Listener};
use std::time::Duration;

/// The answer a stimulus expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// A single lowercase word or phrase, matched by containment
    Word(String),
    /// A count, matched as a number word or decimal digits
    Count(u32),
}

impl Answer {
    /// Reveal sentence used in feedback ("It's a cat", "There are 5 items")
    fn reveal(&self) -> String {
        match self {
            Answer::Word(word) => format!("It's a {}", word),
            Answer::Count(n) => format!("There are {} items", n),
        }
    }

    /// Wrong-answer line at the tiers that do not reveal the answer.
    /// Word and count answers phrase it differently.
    fn wrong_message(&self) -> &'static str {
        match self {
            Answer::Word(_) => "Oops! It's wrong. ❌",
            Answer::Count(_) => "Oops! That's not right. ❌",
        }
    }

    /// Text hint shown at the middle tier
    fn hint(&self) -> String {
        match self {
            Answer::Word(word) => {
                let first = word.chars().next().unwrap_or('?');
                format!("Hint: Starts with '{}'", first)
            }
            Answer::Count(n) => match n {
                0..=5 => "Hint: It's a small number (1-5)".to_string(),
                6..=10 => "Hint: It's between 5 and 10".to_string(),
                _ => "Hint: It's more than 10".to_string(),
            },
        }
    }
}

/// One challenge presented to the player
#[derive(Debug, Clone)]
pub struct Stimulus {
    /// Question shown (and spoken, at the voice-hint tier)
    pub prompt: String,
    /// Asset the collaborator UI would present (sound or image file name)
    pub asset: Option<String>,
    /// What counts as the right answer
    pub answer: Answer,
}

/// Source of challenges; each game implements this once
pub trait StimulusProvider: Send {
    /// Short name used on the command line
    fn name(&self) -> &'static str;

    /// Human title shown to the player
    fn title(&self) -> &'static str;

    /// Produce the next challenge. The tier lets providers scale
    /// difficulty (the counting game raises its maximum count).
    fn next(&mut self, tier: Tier) -> Stimulus;
}

/// Phase of the current round; the answer trigger stays disabled
/// while Listening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Listening,
    Answered,
}

/// Everything the front end needs to render the outcome of one round
#[derive(Debug, Clone)]
pub struct RoundReport {
    /// What the recognizer heard (empty on silence/failure)
    pub transcript: String,
    pub result: GradingResult,
    pub score: u32,
    pub tier: Tier,
    /// Status line: "Correct! ...", "Oops! ...", "Didn't catch that..."
    pub feedback: String,
    /// Text hint, present only on a wrong answer at the text-hint tier
    pub hint: Option<String>,
}

/// Text-to-speech hook point.
///
/// Deliberately a no-op that only logs: real speech synthesis belongs to
/// the collaborator layer and is out of scope here. Callers treat this as
/// "the prompt was spoken".
pub fn speak(text: &str) {
    tracing::info!("Speaking: {}", text);
}

/// The shared game loop: wires a stimulus provider to the listener
/// and the grader
pub struct GameEngine {
    provider: Box<dyn StimulusProvider>,
    listener: Listener,
    score: ScoreState,
    phase: RoundPhase,
}

impl GameEngine {
    pub fn new(provider: Box<dyn StimulusProvider>, listener: Listener) -> Self {
        Self {
            provider,
            listener,
            score: ScoreState::new(),
            phase: RoundPhase::Idle,
        }
    }

    pub fn title(&self) -> &'static str {
        self.provider.title()
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn tier(&self) -> Tier {
        self.score.tier()
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Begin a round: pick the next stimulus and, at the voice-hint tier,
    /// speak its prompt.
    pub fn next_stimulus(&mut self) -> Stimulus {
        let stimulus = self.provider.next(self.score.tier());

        if self.score.tier() == Tier::VoiceHints {
            speak(&stimulus.prompt);
        }

        self.phase = RoundPhase::Idle;
        stimulus
    }

    /// Capture and grade one spoken answer for the given stimulus.
    ///
    /// Runs a bounded listen session in the background and waits for its
    /// two notifications; the answer trigger is considered disabled until
    /// this returns (phase goes Listening -> Answered).
    pub async fn answer(&mut self, stimulus: &Stimulus, timeout: Duration) -> RoundReport {
        self.phase = RoundPhase::Listening;

        let mut rx = self.listener.start_listen(timeout);
        let mut transcript = String::new();

        // Transcript always precedes Finished; Finished re-enables the
        // trigger even when the transcript was empty.
        while let Some(event) = rx.recv().await {
            match event {
                ListenEvent::Transcript(text) => transcript = text,
                ListenEvent::Finished => break,
            }
        }

        self.phase = RoundPhase::Answered;

        if !transcript.is_empty() {
            tracing::info!("You said: {:?}", transcript);
        }

        grade_round(stimulus, transcript, &mut self.score)
    }
}

/// Grade one transcript and update the score. Pure apart from the
/// speak() hook, so the whole feedback policy is unit-testable.
fn grade_round(stimulus: &Stimulus, transcript: String, score: &mut ScoreState) -> RoundReport {
    let result = match &stimulus.answer {
        Answer::Word(word) => grade::grade(&transcript, word),
        Answer::Count(n) => grade::grade_count(&transcript, *n),
    };

    // No answer: no penalty, no reveal, player just tries again
    if result == GradingResult::NoAnswer {
        return RoundReport {
            transcript,
            result,
            score: score.score(),
            tier: score.tier(),
            feedback: "Didn't catch that. Try again!".to_string(),
            hint: None,
        };
    }

    score.apply(result);
    let tier = score.tier();

    let (feedback, hint) = match result {
        GradingResult::Correct => {
            let feedback = format!("Correct! {}. ✅", stimulus.answer.reveal());
            if tier == Tier::VoiceHints {
                speak(&format!("Correct! {}", stimulus.answer.reveal()));
            }
            (feedback, None)
        }
        GradingResult::Incorrect => match tier {
            // Easiest tier reveals the answer, spoken and shown
            Tier::VoiceHints => {
                let feedback = format!("Oops! {}. ❌", stimulus.answer.reveal());
                speak(&format!("Oops! {}", stimulus.answer.reveal()));
                (feedback, None)
            }
            Tier::TextHints => (
                stimulus.answer.wrong_message().to_string(),
                Some(stimulus.answer.hint()),
            ),
            Tier::Pro => (stimulus.answer.wrong_message().to_string(), None),
        },
        GradingResult::NoAnswer => unreachable!("handled above"),
    };

    RoundReport {
        transcript,
        result,
        score: score.score(),
        tier,
        feedback,
        hint,
    }
}
