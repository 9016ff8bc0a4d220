//! Game session state machine
//!
//! A session owns one puzzle attempt. It moves from `Playing` to `Won` or
//! `Lost` and never leaves those states. Every guess goes through one of two
//! entry points that converge on the same bookkeeping:
//! - `submit_guess` scores locally against a known target
//! - `submit_scored` accepts verdicts computed by a remote authority

use crate::core::{KeyboardStatus, ScoreError, Verdict, Word, all_exact, score, to_emoji_row};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Attempts allowed when nothing else is configured
pub const DEFAULT_MAX_ATTEMPTS: usize = 6;

/// Lifecycle status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Errors raised by a session when a caller breaks its contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Guess has {actual} letters, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Session is over ({0:?}); no further guesses accepted")]
    Finished(GameStatus),
    #[error("Target word is hidden; verdicts must come from the remote evaluator")]
    TargetHidden,
    #[error("A session needs at least one attempt")]
    NoAttempts,
}

impl From<ScoreError> for GameError {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::LengthMismatch { guess, target } => Self::LengthMismatch {
                expected: target,
                actual: guess,
            },
        }
    }
}

/// A scored guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRow {
    pub word: Word,
    pub verdicts: Vec<Verdict>,
    pub completed: bool,
}

impl GuessRow {
    #[must_use]
    pub fn is_winning(&self) -> bool {
        all_exact(&self.verdicts)
    }

    #[must_use]
    pub fn to_emoji(&self) -> String {
        to_emoji_row(&self.verdicts)
    }
}

/// What the session knows about the word being guessed
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Known(Word),
    Hidden { length: usize },
}

/// One puzzle attempt
#[derive(Debug, Clone)]
pub struct GameSession {
    target: Target,
    max_attempts: usize,
    rows: Vec<GuessRow>,
    status: GameStatus,
    keyboard: KeyboardStatus,
}

impl GameSession {
    /// Start a session against a known target
    ///
    /// # Errors
    /// Returns `GameError::NoAttempts` if `max_attempts` is zero.
    ///
    /// # Examples
    /// ```
    /// use sutom::core::Word;
    /// use sutom::game::{GameSession, GameStatus};
    ///
    /// let mut session = GameSession::new(Word::new("rouge").unwrap(), 6).unwrap();
    /// let row = session.submit_guess(Word::new("rouge").unwrap()).unwrap();
    /// assert!(row.is_winning());
    /// assert_eq!(session.status(), GameStatus::Won);
    /// ```
    pub fn new(target: Word, max_attempts: usize) -> Result<Self, GameError> {
        Self::with_target(Target::Known(target), max_attempts)
    }

    /// Start a session whose target only a remote authority knows
    ///
    /// # Errors
    /// Returns `GameError::NoAttempts` if `max_attempts` is zero, or
    /// `GameError::LengthMismatch` if `length` is zero.
    pub fn hidden(length: usize, max_attempts: usize) -> Result<Self, GameError> {
        if length == 0 {
            return Err(GameError::LengthMismatch {
                expected: 1,
                actual: 0,
            });
        }
        Self::with_target(Target::Hidden { length }, max_attempts)
    }

    fn with_target(target: Target, max_attempts: usize) -> Result<Self, GameError> {
        if max_attempts == 0 {
            return Err(GameError::NoAttempts);
        }

        Ok(Self {
            target,
            max_attempts,
            rows: Vec::with_capacity(max_attempts),
            status: GameStatus::Playing,
            keyboard: KeyboardStatus::new(),
        })
    }

    /// Check that `guess` would be accepted right now, without changing state
    ///
    /// # Errors
    /// `GameError::Finished` once the session is over, `GameError::LengthMismatch`
    /// if the guess has the wrong number of letters.
    pub fn ensure_accepts(&self, guess: &Word) -> Result<(), GameError> {
        if self.status.is_over() {
            return Err(GameError::Finished(self.status));
        }

        if guess.len() != self.word_length() {
            return Err(GameError::LengthMismatch {
                expected: self.word_length(),
                actual: guess.len(),
            });
        }

        Ok(())
    }

    /// Score `guess` locally and record it
    ///
    /// # Errors
    /// Everything `ensure_accepts` rejects, plus `GameError::TargetHidden` when
    /// the target is not known locally.
    pub fn submit_guess(&mut self, guess: Word) -> Result<&GuessRow, GameError> {
        self.ensure_accepts(&guess)?;

        let Target::Known(target) = &self.target else {
            return Err(GameError::TargetHidden);
        };

        let verdicts = score(&guess, target)?;
        Ok(self.record(guess, verdicts))
    }

    /// Record a guess scored elsewhere
    ///
    /// # Errors
    /// Everything `ensure_accepts` rejects, plus `GameError::LengthMismatch` if
    /// the verdict count differs from the word length.
    pub fn submit_scored(
        &mut self,
        guess: Word,
        verdicts: Vec<Verdict>,
    ) -> Result<&GuessRow, GameError> {
        self.ensure_accepts(&guess)?;

        if verdicts.len() != guess.len() {
            return Err(GameError::LengthMismatch {
                expected: guess.len(),
                actual: verdicts.len(),
            });
        }

        Ok(self.record(guess, verdicts))
    }

    fn record(&mut self, guess: Word, verdicts: Vec<Verdict>) -> &GuessRow {
        self.keyboard.observe(guess.letters(), &verdicts);

        let row = GuessRow {
            word: guess,
            verdicts,
            completed: true,
        };

        self.status = if row.is_winning() {
            GameStatus::Won
        } else if self.rows.len() + 1 == self.max_attempts {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        };

        debug!(
            turn = self.rows.len() + 1,
            guess = %row.word,
            feedback = %row.to_emoji(),
            status = ?self.status,
            "guess recorded"
        );

        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }

    /// Make the target known locally
    ///
    /// Used when a remote authority reveals the answer, or when the session
    /// falls back to a local stand-in target.
    ///
    /// # Errors
    /// Returns `GameError::LengthMismatch` if `word` does not fit the session.
    pub fn bind_target(&mut self, word: Word) -> Result<(), GameError> {
        if word.len() != self.word_length() {
            return Err(GameError::LengthMismatch {
                expected: self.word_length(),
                actual: word.len(),
            });
        }
        self.target = Target::Known(word);
        Ok(())
    }

    /// The target, when known locally
    #[must_use]
    pub fn target(&self) -> Option<&Word> {
        match &self.target {
            Target::Known(word) => Some(word),
            Target::Hidden { .. } => None,
        }
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        match &self.target {
            Target::Known(word) => word.len(),
            Target::Hidden { length } => *length,
        }
    }

    #[must_use]
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    #[must_use]
    pub fn rows(&self) -> &[GuessRow] {
        &self.rows
    }

    /// Number of guesses recorded so far
    #[must_use]
    pub fn current_turn(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn attempts_left(&self) -> usize {
        self.max_attempts - self.rows.len()
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardStatus {
        &self.keyboard
    }
}
