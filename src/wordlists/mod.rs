//! Word lists for Sutom puzzles
//!
//! Provides the embedded puzzle pool, split by difficulty tier, and the extra
//! dictionary of words accepted as guesses.

mod embedded;
pub mod loader;

pub use embedded::{
    DICTIONARY, DICTIONARY_COUNT, EASY, EASY_COUNT, HARD, HARD_COUNT, MEDIUM, MEDIUM_COUNT,
};

use crate::core::{Difficulty, Word};
use loader::words_from_slice;
use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

/// Error raised when a word must be drawn from an empty selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Nothing to draw from: the given tier, or the whole pool when `None`
    #[error(
        "No words available{}",
        .0.map(|tier| format!(" for difficulty {tier}")).unwrap_or_default()
    )]
    NoWordsAvailable(Option<Difficulty>),
    #[error("No word of {0} letters available")]
    NoWordOfLength(usize),
}

/// A puzzle word with its tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    pub word: Word,
    pub difficulty: Difficulty,
}

/// Ordered, read-only pool of puzzle words
///
/// Order matters: daily puzzles index into it. Once built it is never mutated,
/// so it can be shared across sessions behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct WordPool {
    entries: Vec<PoolEntry>,
}

impl WordPool {
    #[must_use]
    pub const fn new(entries: Vec<PoolEntry>) -> Self {
        Self { entries }
    }

    /// The pool compiled into the binary: easy words, then medium, then hard
    #[must_use]
    pub fn embedded() -> Self {
        let tiers = [
            (Difficulty::Easy, EASY),
            (Difficulty::Medium, MEDIUM),
            (Difficulty::Hard, HARD),
        ];

        let entries = tiers
            .into_iter()
            .flat_map(|(difficulty, words)| {
                words_from_slice(words)
                    .into_iter()
                    .map(move |word| PoolEntry { word, difficulty })
            })
            .collect();

        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one tier, in pool order
    pub fn tier(&self, difficulty: Difficulty) -> impl Iterator<Item = &PoolEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.difficulty == difficulty)
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.entries.iter().any(|entry| &entry.word == word)
    }

    /// Pick a uniformly random word of the given tier
    ///
    /// # Errors
    /// Returns `PoolError::NoWordsAvailable` if the tier is empty.
    pub fn random<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<&Word, PoolError> {
        let tier: Vec<&PoolEntry> = self.tier(difficulty).collect();
        tier.choose(rng)
            .copied()
            .map(|entry| &entry.word)
            .ok_or(PoolError::NoWordsAvailable(Some(difficulty)))
    }

    /// Deterministic stand-in target for a session that lost its remote authority
    ///
    /// Prefers the tier's fixed placeholder word, then the first tier word of
    /// the required length, then the first pool word of that length.
    ///
    /// # Errors
    /// Returns `PoolError::NoWordOfLength` if no candidate has `length` letters.
    ///
    /// # Examples
    /// ```
    /// use sutom::core::Difficulty;
    /// use sutom::wordlists::WordPool;
    ///
    /// let pool = WordPool::embedded();
    /// let word = pool.placeholder(Difficulty::Easy, 4).unwrap();
    /// assert_eq!(word.text(), "chat");
    /// ```
    pub fn placeholder(&self, difficulty: Difficulty, length: usize) -> Result<Word, PoolError> {
        if let Ok(word) = Word::new(placeholder_text(difficulty))
            && word.len() == length
        {
            return Ok(word);
        }

        self.tier(difficulty)
            .chain(self.entries.iter())
            .find(|entry| entry.word.len() == length)
            .map(|entry| entry.word.clone())
            .ok_or(PoolError::NoWordOfLength(length))
    }
}

/// Fixed per-tier fallback words
#[must_use]
pub const fn placeholder_text(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "chat",
        Difficulty::Medium => "ordinateur",
        Difficulty::Hard => "cacophonie",
    }
}
