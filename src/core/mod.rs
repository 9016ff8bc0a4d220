//! Core domain types for Sutom
//!
//! Words, verdicts, the guess scorer and keyboard aggregation. Everything here
//! is pure: no I/O, no clocks, no randomness.

mod difficulty;
mod keyboard;
mod scorer;
mod verdict;
mod word;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use keyboard::{FRENCH_LAYOUT, KeyboardStatus};
pub use scorer::{ScoreError, score};
pub use verdict::{LetterStatus, Verdict, all_exact, to_emoji_row};
pub use word::{Word, WordError};
