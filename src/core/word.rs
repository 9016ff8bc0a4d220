//! Sutom word representation
//!
//! A Word is an immutable, lowercased sequence of alphabetic letters. Unlike
//! classic Wordle, words have any length and may carry French accented letters.

use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// A case-normalized word made of alphabetic letters
///
/// Stores the text alongside its letters so scoring can index positions directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    letters: Vec<char>,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Word must contain at least one letter")]
    Empty,
    #[error("Invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Surrounding whitespace is ignored, letters are lowercased and composed
    /// (NFC), so `e` followed by a combining acute accent is the letter `é`.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - The trimmed input is empty
    /// - Any character is not alphabetic
    ///
    /// # Examples
    /// ```
    /// use sutom::core::Word;
    ///
    /// let word = Word::new("Hôpital").unwrap();
    /// assert_eq!(word.text(), "hôpital");
    /// assert_eq!(word.len(), 7);
    ///
    /// assert!(Word::new("").is_err());
    /// assert!(Word::new("ch4t").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, WordError> {
        let letters: Vec<char> = text
            .as_ref()
            .trim()
            .chars()
            .flat_map(char::to_lowercase)
            .nfc()
            .collect();

        if letters.is_empty() {
            return Err(WordError::Empty);
        }

        if let Some((position, &ch)) = letters
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_alphabetic())
        {
            return Err(WordError::InvalidCharacter { ch, position });
        }

        Ok(Self {
            text: letters.iter().collect(),
            letters,
        })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the letters of the word in order
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Number of letters (not bytes)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false: a Word holds at least one letter
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The first letter, shown as a hint at the start of every row
    #[inline]
    #[must_use]
    pub fn first_letter(&self) -> char {
        self.letters[0]
    }

    /// Get the letter at a specific position
    ///
    /// # Panics
    /// Panics if position >= `len()`
    #[inline]
    #[must_use]
    pub fn letter_at(&self, position: usize) -> char {
        self.letters[position]
    }

    /// Check if the word contains a specific letter
    #[inline]
    #[must_use]
    pub fn has_letter(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    /// Count of each letter in the word
    #[must_use]
    pub fn letter_counts(&self) -> FxHashMap<char, usize> {
        let mut counts = FxHashMap::default();
        for &ch in &self.letters {
            *counts.entry(ch).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl std::str::FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
