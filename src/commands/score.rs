//! Score command
//!
//! Scores one guess against a target without starting a session.

use crate::core::{Verdict, Word, score};
use anyhow::{Context, Result};

/// Result of scoring a word
pub struct ScoreResult {
    pub guess: Word,
    pub target: Word,
    pub verdicts: Vec<Verdict>,
}

/// Score `guess` against `target`
///
/// # Errors
///
/// Returns an error if:
/// - Either word is empty or contains non-letters
/// - The words differ in length
pub fn score_words(guess: &str, target: &str) -> Result<ScoreResult> {
    let guess = Word::new(guess).with_context(|| format!("Invalid guess '{guess}'"))?;
    let target = Word::new(target).with_context(|| format!("Invalid target '{target}'"))?;
    let verdicts = score(&guess, &target)?;

    Ok(ScoreResult {
        guess,
        target,
        verdicts,
    })
}
