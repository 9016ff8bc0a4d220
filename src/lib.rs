//! Sutom
//!
//! French word-guessing game: guess a word of known length in six attempts,
//! starting from its first letter. Rounds are scored by a remote game server
//! when one is configured, and locally otherwise.
//!
//! # Quick Start
//!
//! ```rust
//! use sutom::core::{Verdict, Word, score};
//!
//! let guess = Word::new("rosée").unwrap();
//! let target = Word::new("rouge").unwrap();
//!
//! let verdicts = score(&guess, &target).unwrap();
//! assert_eq!(verdicts[0], Verdict::Exact);
//! assert_eq!(verdicts[2], Verdict::Absent);
//! ```

// Core domain types
pub mod core;

// Sessions, coordination, daily challenge, persistence
pub mod game;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
