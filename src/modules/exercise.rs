//! Target words and checking guesses against them.

use rand::Rng;

use crate::{coding::morse, words};

/// How long a correct answer stays on screen before the next word.
pub const ADVANCE_DELAY: u64 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    None,
    Correct,
    Incorrect,
}

pub struct Exercise<R: Rng> {
    rng: R,
    target: String,
    feedback: Feedback,
    advance_at: Option<u64>,
}

impl<R: Rng> Exercise<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            target: String::new(),
            feedback: Feedback::None,
            advance_at: None,
        }
    }

    /// Picks a new target word.
    /// Cancels a pending advance so it can't skip the new word.
    pub fn next_word(&mut self) -> &str {
        self.target = words::random_word(&mut self.rng).to_owned();
        self.feedback = Feedback::None;
        self.advance_at = None;
        &self.target
    }

    /// Compares a guess with the target, ignoring case and anything that isn't a letter or digit.
    /// A correct guess schedules the next word [`ADVANCE_DELAY`]ms after `now`.
    pub fn check(&mut self, guess: &str, now: u64) -> Feedback {
        self.feedback = match morse::normalize(guess) == morse::normalize(&self.target) {
            true => Feedback::Correct,
            false => Feedback::Incorrect,
        };

        if self.feedback == Feedback::Correct {
            self.advance_at = Some(now + ADVANCE_DELAY);
        }

        self.feedback
    }

    /// Returns true once when the scheduled advance is due.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.advance_at {
            Some(at) if now >= at => {
                self.advance_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn advance_at(&self) -> Option<u64> {
        self.advance_at
    }
}
