//! Word-validity collaborator
//!
//! Decides whether a well-formed guess is an acceptable word. Only consulted
//! while the session is scored locally; a remote authority does its own checks.

use crate::core::Word;
use crate::wordlists::{DICTIONARY, WordPool};
use rustc_hash::FxHashSet;

/// Outcome of a validity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid { reason: String },
}

impl Validity {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

pub trait WordValidator: Send + Sync {
    fn validate(&self, word: &Word) -> Validity;
}

/// Accepts every well-formed word
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl WordValidator for AcceptAll {
    fn validate(&self, _word: &Word) -> Validity {
        Validity::Valid
    }
}

/// Accepts words from a fixed set
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: FxHashSet<String>,
}

impl Dictionary {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|w| Word::new(w).ok())
            .map(|w| w.text().to_string())
            .collect();
        Self { words }
    }

    /// Every puzzle word plus the embedded extra dictionary
    #[must_use]
    pub fn from_pool(pool: &WordPool) -> Self {
        let puzzle_words = pool.entries().iter().map(|entry| entry.word.text());
        Self::new(puzzle_words.chain(DICTIONARY.iter().copied()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordValidator for Dictionary {
    fn validate(&self, word: &Word) -> Validity {
        if self.words.contains(word.text()) {
            Validity::Valid
        } else {
            Validity::Invalid {
                reason: format!("'{}' n'est pas dans la liste de mots", word.text().to_uppercase()),
            }
        }
    }
}
