//! Daily challenge
//!
//! Every player gets the same word on the same UTC day. The word is picked by
//! hashing the date string into a seed and indexing the ordered pool with it.

use super::session::GuessRow;
use super::store::{DailyRecord, StateStore, StoreError};
use super::summary::GameSummary;
use crate::core::{Difficulty, Word};
use crate::wordlists::{PoolError, WordPool};
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The puzzle for one calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPuzzle {
    pub date: NaiveDate,
    pub target: Word,
    pub difficulty: Difficulty,
    /// Session id used when the day is played locally
    pub session_id: String,
}

/// `YYYYMMDD`, the canonical form of a puzzle date
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Seed derived from a date string
///
/// 32-bit wrapping `hash * 31 + unit` over the UTF-16 code units, then the
/// absolute value.
///
/// # Examples
/// ```
/// use sutom::game::date_seed;
///
/// assert_eq!(date_seed(""), 0);
/// assert_eq!(date_seed("a"), 97);
/// assert_eq!(date_seed("20261017"), 1_920_457_593);
/// ```
#[must_use]
pub fn date_seed(key: &str) -> u32 {
    key.encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

/// Picks the daily word from a shared pool
#[derive(Debug, Clone)]
pub struct DailyPuzzleSelector {
    pool: Arc<WordPool>,
}

impl DailyPuzzleSelector {
    #[must_use]
    pub const fn new(pool: Arc<WordPool>) -> Self {
        Self { pool }
    }

    /// The puzzle for `date`; the same date always yields the same puzzle
    ///
    /// # Errors
    /// Returns `PoolError::NoWordsAvailable` if the pool has no words.
    pub fn select_for_date(&self, date: NaiveDate) -> Result<DailyPuzzle, PoolError> {
        if self.pool.is_empty() {
            return Err(PoolError::NoWordsAvailable(None));
        }

        let key = date_key(date);
        let index = date_seed(&key) as usize % self.pool.len();
        let entry = &self.pool.entries()[index];

        Ok(DailyPuzzle {
            date,
            target: entry.word.clone(),
            difficulty: entry.difficulty,
            session_id: format!("daily-{key}"),
        })
    }
}

/// The puzzle day `now` falls in
#[must_use]
pub fn today(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// Start of the next puzzle day
#[must_use]
pub fn next_rollover(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = today(now)
        .checked_add_days(Days::new(1))
        .unwrap_or(NaiveDate::MAX);
    tomorrow.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Countdown until the next puzzle
#[must_use]
pub fn time_until_next(now: DateTime<Utc>) -> Duration {
    (next_rollover(now) - now).to_std().unwrap_or_default()
}

/// Whether today's challenge is still open to the player
///
/// # Errors
/// Returns `StoreError` if stored records cannot be read.
pub fn can_play_today(store: &dyn StateStore, now: DateTime<Utc>) -> Result<bool, StoreError> {
    let today = today(now);

    if let Some(record) = store.load_daily()?
        && record.date == today
        && record.completed
    {
        return Ok(false);
    }

    Ok(!store
        .load_history()?
        .get(&today)
        .is_some_and(|record| record.completed))
}

/// Persist a finished daily round as today's record and in the history
///
/// # Errors
/// Returns `StoreError` if the record cannot be written.
pub fn record_completion(
    store: &dyn StateStore,
    puzzle: &DailyPuzzle,
    summary: &GameSummary,
    rows: &[GuessRow],
    now: DateTime<Utc>,
) -> Result<DailyRecord, StoreError> {
    let record = DailyRecord {
        date: puzzle.date,
        word: summary
            .word
            .clone()
            .unwrap_or_else(|| puzzle.target.text().to_string()),
        difficulty: summary.difficulty.unwrap_or(puzzle.difficulty),
        session_id: summary
            .session_id
            .clone()
            .unwrap_or_else(|| puzzle.session_id.clone()),
        completed: true,
        won: summary.won,
        attempts: summary.attempts,
        guesses: rows.iter().map(|row| row.word.text().to_string()).collect(),
        rows: rows.iter().map(GuessRow::to_emoji).collect(),
        completed_at: Some(now),
    };

    store.save_daily(&record)?;
    store.append_history(&record)?;

    info!(
        date = %record.date,
        won = record.won,
        attempts = record.attempts,
        "daily challenge recorded"
    );
    Ok(record)
}

/// Spoiler-free text to share a daily result
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use sutom::core::Difficulty;
/// use sutom::game::{DailyRecord, share_text};
///
/// let record = DailyRecord {
///     date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
///     word: "haut".to_string(),
///     difficulty: Difficulty::Easy,
///     session_id: "daily-20261017".to_string(),
///     completed: true,
///     won: true,
///     attempts: 2,
///     guesses: vec![],
///     rows: vec!["🟩⬜🟨⬜".to_string(), "🟩🟩🟩🟩".to_string()],
///     completed_at: None,
/// };
/// assert_eq!(
///     share_text(&record),
///     "Sutom Défi Quotidien 20261017\n🟢 EASY 2/6\n🟩⬜🟨⬜\n🟩🟩🟩🟩"
/// );
/// ```
#[must_use]
pub fn share_text(record: &DailyRecord) -> String {
    let score = if record.won {
        record.attempts.to_string()
    } else {
        "X".to_string()
    };

    let mut text = format!(
        "Sutom Défi Quotidien {}\n{} {} {score}/6",
        date_key(record.date),
        record.difficulty.emoji(),
        record.difficulty.as_str().to_uppercase(),
    );
    for row in &record.rows {
        text.push('\n');
        text.push_str(row);
    }
    text
}
