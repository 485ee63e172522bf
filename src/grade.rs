//! Answer grading and score tracking
//!
//! The grader is a deliberately crude containment check: the expected
//! word just has to appear somewhere in the lowercased transcript, and a
//! negation word anywhere in the transcript vetoes the match ("not a
//! cat" is wrong even though "cat" appears). False positives like
//! "category" containing "cat" are accepted behavior, tuned for small
//! children speaking single-word answers, not for linguistic rigor.

/// Outcome of grading one transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradingResult {
    Correct,
    Incorrect,
    /// Empty or whitespace-only transcript: "didn't catch that".
    /// Distinct from Incorrect and never penalized.
    NoAnswer,
}

/// Words that negate an otherwise-matching answer
const NEGATION_MARKERS: [&str; 5] = ["not", "no", "n't", "never", "none"];

/// Spoken number words the counting game accepts
const NUMBER_WORDS: [(&str, u32); 16] = [
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
];

/// Grade a word answer: correct iff the expected word (already lowercase)
/// appears in the normalized transcript and no negation marker does.
pub fn grade(transcript: &str, expected: &str) -> GradingResult {
    if transcript.trim().is_empty() {
        return GradingResult::NoAnswer;
    }

    let normalized = transcript.to_lowercase();
    let normalized = normalized.trim();

    let negated = NEGATION_MARKERS.iter().any(|neg| normalized.contains(neg));
    let contains = normalized.contains(expected);

    if contains && !negated {
        GradingResult::Correct
    } else {
        GradingResult::Incorrect
    }
}

/// Grade a counting answer: correct if the transcript contains the number
/// word for the expected count, or its decimal digits. No negation check.
pub fn grade_count(transcript: &str, expected: u32) -> GradingResult {
    if transcript.trim().is_empty() {
        return GradingResult::NoAnswer;
    }

    let normalized = transcript.to_lowercase();
    let normalized = normalized.trim();

    let word_match = NUMBER_WORDS
        .iter()
        .any(|(word, value)| *value == expected && normalized.contains(word));

    if word_match || normalized.contains(&expected.to_string()) {
        GradingResult::Correct
    } else {
        GradingResult::Incorrect
    }
}

/// Difficulty tier, a pure function of the current score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Score < 10: prompts are also spoken aloud
    VoiceHints,
    /// Score 10-19: text hints only
    TextHints,
    /// Score >= 20: no hints
    Pro,
}

impl Tier {
    pub fn for_score(score: u32) -> Self {
        match score {
            0..=9 => Tier::VoiceHints,
            10..=19 => Tier::TextHints,
            _ => Tier::Pro,
        }
    }

    /// Label shown next to the score
    pub fn label(&self) -> &'static str {
        match self {
            Tier::VoiceHints => "Voice Hint Enabled (Score < 10)",
            Tier::TextHints => "Text Hint Enabled (Score 10 - 19)",
            Tier::Pro => "No Hints - Pro Mode (Score 20+)",
        }
    }
}

/// Per-game score counter. Never goes negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreState {
    score: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tier(&self) -> Tier {
        Tier::for_score(self.score)
    }

    /// Apply one grading result: +5 for correct, -2 (floored at zero) for
    /// incorrect, unchanged for no answer.
    pub fn apply(&mut self, result: GradingResult) {
        match result {
            GradingResult::Correct => self.score += 5,
            GradingResult::Incorrect => self.score = self.score.saturating_sub(2),
            GradingResult::NoAnswer => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containment_match() {
        assert_eq!(grade("It's a cat", "cat"), GradingResult::Correct);
        assert_eq!(grade("CAT", "cat"), GradingResult::Correct);
        assert_eq!(grade("a dog", "cat"), GradingResult::Incorrect);
    }

    #[test]
    fn test_negation_overrides_containment() {
        assert_eq!(grade("not a cat", "cat"), GradingResult::Incorrect);
        assert_eq!(grade("no cat", "cat"), GradingResult::Incorrect);
        assert_eq!(grade("it isn't a cat", "cat"), GradingResult::Incorrect);
        assert_eq!(grade("never a cat", "cat"), GradingResult::Incorrect);
    }

    #[test]
    fn test_blank_transcript_is_no_answer() {
        assert_eq!(grade("", "cat"), GradingResult::NoAnswer);
        assert_eq!(grade("  ", "cat"), GradingResult::NoAnswer);
        assert_eq!(grade("\t\n", "cat"), GradingResult::NoAnswer);
    }

    #[test]
    fn test_substring_false_positive_is_accepted_behavior() {
        // Documented quirk of the containment heuristic
        assert_eq!(grade("category", "cat"), GradingResult::Correct);
    }

    #[test]
    fn test_count_word_match() {
        assert_eq!(grade_count("there are five", 5), GradingResult::Correct);
        assert_eq!(grade_count("three", 5), GradingResult::Incorrect);
        assert_eq!(grade_count("FIVE", 5), GradingResult::Correct);
    }

    #[test]
    fn test_count_digit_match() {
        assert_eq!(grade_count("I see 5 of them", 5), GradingResult::Correct);
        assert_eq!(grade_count("12", 12), GradingResult::Correct);
        assert_eq!(grade_count("4", 5), GradingResult::Incorrect);
    }

    #[test]
    fn test_count_no_negation_check() {
        // The numeric variant deliberately skips the negation veto
        assert_eq!(grade_count("no, five", 5), GradingResult::Correct);
    }

    #[test]
    fn test_count_blank_is_no_answer() {
        assert_eq!(grade_count("", 5), GradingResult::NoAnswer);
        assert_eq!(grade_count("   ", 5), GradingResult::NoAnswer);
    }

    #[test]
    fn test_score_floor_at_zero() {
        let mut state = ScoreState::new();
        state.apply(GradingResult::Incorrect);
        state.apply(GradingResult::Incorrect);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_score_increments_by_five() {
        let mut state = ScoreState::new();
        state.apply(GradingResult::Correct);
        assert_eq!(state.score(), 5);
        state.apply(GradingResult::Correct);
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn test_no_answer_does_not_change_score() {
        let mut state = ScoreState::new();
        state.apply(GradingResult::Correct);
        state.apply(GradingResult::NoAnswer);
        assert_eq!(state.score(), 5);
    }

    #[test]
    fn test_incorrect_decrements_by_two() {
        let mut state = ScoreState::new();
        state.apply(GradingResult::Correct);
        state.apply(GradingResult::Incorrect);
        assert_eq!(state.score(), 3);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_score(0), Tier::VoiceHints);
        assert_eq!(Tier::for_score(9), Tier::VoiceHints);
        assert_eq!(Tier::for_score(10), Tier::TextHints);
        assert_eq!(Tier::for_score(19), Tier::TextHints);
        assert_eq!(Tier::for_score(20), Tier::Pro);
        assert_eq!(Tier::for_score(100), Tier::Pro);
    }
}
