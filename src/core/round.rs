use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::core::error::GameError;

/// Where a round currently stands. Transitions only move forward:
/// `InProgress` -> `Won` or `Lost`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RoundStatus::InProgress)
    }
}

/// What a single call to [`RoundEngine::guess`] did.
///
/// This replaces an observer/callback registry: there is exactly one consumer
/// (the round coordinator), so the per-guess classification and any status
/// transition it caused travel together in the return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Letter occurs in the secret. `won` is true when this guess revealed
    /// the last missing letter.
    Correct { won: bool },
    /// Letter does not occur. `lost` is true when this guess spent the last
    /// mistake in the budget.
    Wrong { lost: bool },
    /// Letter was guessed before. Pure query, nothing changed.
    AlreadyUsed { in_word: bool },
    /// Round is already over; the guess was ignored entirely.
    Ignored,
}

impl GuessOutcome {
    /// Whether the guessed letter occurs in the secret. `Ignored` counts as a
    /// miss so callers can treat it like a plain `false` signal.
    pub fn is_hit(self) -> bool {
        matches!(
            self,
            GuessOutcome::Correct { .. } | GuessOutcome::AlreadyUsed { in_word: true }
        )
    }
}

/// How a lost round was lost, when the loss did not come from spending the
/// mistake budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    /// The player abandoned the round.
    Cancelled,
    /// The round deadline elapsed before a letter arrived.
    TimerExpired,
}

impl fmt::Display for LossReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossReason::Cancelled => f.write_str("cancelled"),
            LossReason::TimerExpired => f.write_str("timer-expired"),
        }
    }
}

/// Terminal result of one round, handed from the coordinator to the
/// tournament (or the solo flow).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub status: RoundStatus,
    pub reason: Option<LossReason>,
}

/// Authoritative rule state for a single round.
///
/// Created fresh per round, exclusively owned by the coordinator while the
/// round runs, and discarded afterward; only the [`RoundOutcome`] survives.
#[derive(Debug)]
pub struct RoundEngine {
    secret: String,
    mistakes: u8,
    max_mistakes: u8,
    used: BTreeSet<char>,
    status: RoundStatus,
}

impl RoundEngine {
    /// Starts a round. The secret is canonicalized to uppercase; a blank
    /// secret or a zero mistake budget is rejected with no state created.
    pub fn new(secret: &str, max_mistakes: u8) -> Result<Self, GameError> {
        if secret.trim().is_empty() {
            return Err(GameError::EmptyWord);
        }
        if max_mistakes == 0 {
            return Err(GameError::ZeroMistakeBudget);
        }
        Ok(Self {
            secret: secret.to_uppercase(),
            mistakes: 0,
            max_mistakes,
            used: BTreeSet::new(),
            status: RoundStatus::InProgress,
        })
    }

    /// Applies one guessed letter and reports what happened.
    ///
    /// Duplicate letters answer whether they occur in the secret without
    /// mutating anything; guesses after the round ended are ignored.
    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        let letter = letter.to_ascii_uppercase();
        debug_assert!(letter.is_ascii_alphabetic(), "input sink must filter non-letters");

        if self.status != RoundStatus::InProgress {
            return GuessOutcome::Ignored;
        }
        if self.used.contains(&letter) {
            return GuessOutcome::AlreadyUsed { in_word: self.secret.contains(letter) };
        }

        self.used.insert(letter);
        if self.secret.contains(letter) {
            if self.all_letters_revealed() {
                self.status = RoundStatus::Won;
                debug!(secret = %self.secret, "round won");
                GuessOutcome::Correct { won: true }
            } else {
                GuessOutcome::Correct { won: false }
            }
        } else {
            self.mistakes += 1;
            if self.mistakes >= self.max_mistakes {
                self.status = RoundStatus::Lost;
                debug!(secret = %self.secret, "round lost, mistake budget spent");
                GuessOutcome::Wrong { lost: true }
            } else {
                GuessOutcome::Wrong { lost: false }
            }
        }
    }

    /// The secret with unrevealed letters masked. Non-letter characters
    /// (spaces, hyphens) are always visible and never need guessing.
    pub fn masked_word(&self) -> String {
        self.secret
            .chars()
            .map(|c| {
                if c.is_ascii_alphabetic() && !self.used.contains(&c) {
                    '_'
                } else {
                    c
                }
            })
            .collect()
    }

    /// Administrative loss, used for timeout and abandonment. Unconditional
    /// and safe to call on an already finished round.
    pub fn force_lose(&mut self) {
        self.status = RoundStatus::Lost;
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn mistakes(&self) -> u8 {
        self.mistakes
    }

    pub fn max_mistakes(&self) -> u8 {
        self.max_mistakes
    }

    pub fn used_letters(&self) -> &BTreeSet<char> {
        &self.used
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    fn all_letters_revealed(&self) -> bool {
        self.secret
            .chars()
            .filter(char::is_ascii_alphabetic)
            .all(|c| self.used.contains(&c))
    }
}
