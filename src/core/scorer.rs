//! Guess scoring
//!
//! Scores a guess against the target one position at a time, resolving repeated
//! letters so that each target letter is credited at most once.

use super::{Verdict, Word};
use thiserror::Error;

/// Error returned when a guess cannot be scored against a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("Guess has {guess} letters but the target has {target}")]
    LengthMismatch { guess: usize, target: usize },
}

/// Score `guess` against `target`
///
/// # Algorithm
/// 1. Start with every position `Absent` and no target slot consumed
/// 2. First pass: mark every exact match and consume its target slot
/// 3. Second pass: for each remaining guess letter, left to right, take the
///    first unconsumed target slot holding the same letter and mark `Present`
///
/// All exact matches are resolved before any misplaced match may consume a
/// slot, so a letter sitting in its exact position elsewhere is never spent on
/// an earlier `Present`.
///
/// # Errors
/// Returns `ScoreError::LengthMismatch` if the words differ in length.
///
/// # Examples
/// ```
/// use sutom::core::{score, Verdict, Word};
///
/// let guess = Word::new("rooms").unwrap();
/// let target = Word::new("error").unwrap();
/// let verdicts = score(&guess, &target).unwrap();
///
/// // R(present) O(present) O(absent) M(absent) S(absent)
/// assert_eq!(
///     verdicts,
///     vec![
///         Verdict::Present,
///         Verdict::Present,
///         Verdict::Absent,
///         Verdict::Absent,
///         Verdict::Absent,
///     ]
/// );
/// ```
pub fn score(guess: &Word, target: &Word) -> Result<Vec<Verdict>, ScoreError> {
    if guess.len() != target.len() {
        return Err(ScoreError::LengthMismatch {
            guess: guess.len(),
            target: target.len(),
        });
    }

    let guess = guess.letters();
    let target = target.letters();
    let mut verdicts = vec![Verdict::Absent; guess.len()];
    let mut consumed = vec![false; target.len()];

    // First pass: exact matches
    for (i, (g, t)) in guess.iter().zip(target).enumerate() {
        if g == t {
            verdicts[i] = Verdict::Exact;
            consumed[i] = true;
        }
    }

    // Second pass: misplaced matches from the unconsumed target slots
    for (i, letter) in guess.iter().enumerate() {
        if verdicts[i].is_exact() {
            continue;
        }

        let slot = target
            .iter()
            .zip(&consumed)
            .position(|(t, &used)| !used && t == letter);

        if let Some(j) = slot {
            verdicts[i] = Verdict::Present;
            consumed[j] = true;
        }
    }

    Ok(verdicts)
}
