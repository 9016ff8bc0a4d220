//! Word list loading utilities
//!
//! Provides functions to load a puzzle pool from a file or convert the
//! embedded constants.

use super::{PoolEntry, WordPool};
use crate::core::{Difficulty, Word};
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

/// Load a puzzle pool from a file
///
/// Each non-empty line is `difficulty,word`; a bare `word` is filed as medium.
/// Lines starting with `#` are comments. Malformed lines are skipped with a
/// warning, so the resulting pool may be empty.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use sutom::wordlists::loader::load_from_file;
///
/// let pool = load_from_file("words.csv").unwrap();
/// println!("Loaded {} words", pool.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<WordPool> {
    let content = fs::read_to_string(path)?;
    Ok(parse_pool(&content))
}

/// Parse pool entries from `difficulty,word` lines
#[must_use]
pub fn parse_pool(content: &str) -> WordPool {
    let entries = content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }

            let entry = parse_line(trimmed);
            if entry.is_none() {
                warn!(
                    line = index + 1,
                    content = trimmed,
                    "skipping malformed word list line"
                );
            }
            entry
        })
        .collect();

    WordPool::new(entries)
}

fn parse_line(line: &str) -> Option<PoolEntry> {
    let (difficulty, word) = match line.split_once(',') {
        Some((difficulty, word)) => (difficulty.parse().ok()?, word),
        None => (Difficulty::Medium, line),
    };

    Word::new(word).ok().map(|word| PoolEntry { word, difficulty })
}

/// Convert embedded string slice to Word vector
///
/// # Examples
/// ```
/// use sutom::wordlists::loader::words_from_slice;
/// use sutom::wordlists::EASY;
///
/// let words = words_from_slice(EASY);
/// assert_eq!(words.len(), EASY.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
