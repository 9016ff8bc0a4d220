//! Keyboard hint aggregation
//!
//! Folds the verdicts of every scored guess into one best-known status per
//! letter. Statuses only ever move up `Unknown < Absent < Present < Exact`.

use super::{LetterStatus, Verdict};
use rustc_hash::FxHashMap;

/// AZERTY layout with the French accented letters, row by row
pub const FRENCH_LAYOUT: &[&[char]] = &[
    &['a', 'z', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p'],
    &['q', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm'],
    &['w', 'x', 'c', 'v', 'b', 'n'],
    &['é', 'è', 'ê', 'ë', 'à', 'â', 'ç', 'œ'],
    &['ù', 'û', 'ü', 'ô', 'î', 'ï'],
];

/// Best status observed so far for each letter of a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardStatus {
    statuses: FxHashMap<char, LetterStatus>,
}

impl KeyboardStatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one scored row
    ///
    /// Letters and verdicts are paired by position; a verdict only replaces the
    /// recorded status when it ranks higher.
    ///
    /// # Examples
    /// ```
    /// use sutom::core::{KeyboardStatus, LetterStatus, Verdict};
    ///
    /// let mut keyboard = KeyboardStatus::new();
    /// keyboard.observe(&['a', 'b'], &[Verdict::Exact, Verdict::Absent]);
    /// keyboard.observe(&['b', 'a'], &[Verdict::Present, Verdict::Present]);
    ///
    /// assert_eq!(keyboard.status_of('a'), LetterStatus::Exact);
    /// assert_eq!(keyboard.status_of('b'), LetterStatus::Present);
    /// assert_eq!(keyboard.status_of('z'), LetterStatus::Unknown);
    /// ```
    pub fn observe(&mut self, letters: &[char], verdicts: &[Verdict]) {
        debug_assert_eq!(letters.len(), verdicts.len());

        for (&letter, &verdict) in letters.iter().zip(verdicts) {
            let status = self.statuses.entry(letter).or_default();
            *status = (*status).max(LetterStatus::from(verdict));
        }
    }

    /// Best status recorded for `letter`
    #[must_use]
    pub fn status_of(&self, letter: char) -> LetterStatus {
        self.statuses.get(&letter).copied().unwrap_or_default()
    }

    /// Every letter seen so far with its status, sorted by letter
    #[must_use]
    pub fn entries(&self) -> Vec<(char, LetterStatus)> {
        let mut entries: Vec<_> = self.statuses.iter().map(|(&c, &s)| (c, s)).collect();
        entries.sort_unstable_by_key(|&(c, _)| c);
        entries
    }

    /// Number of letters with a recorded status
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
