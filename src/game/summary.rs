//! End-of-round summaries and personal statistics

use super::remote::{RemoteSummary, WordStats};
use super::store::DailyRecord;
use crate::core::{Difficulty, Word};
use std::time::Duration;

/// Where a summary came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    /// Reported by the remote authority
    Remote,
    /// Computed for a round played locally from the start
    Local,
    /// Computed locally because the remote could not provide one
    Synthesized,
}

/// What the player sees when a round ends
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    pub session_id: Option<String>,
    pub won: bool,
    pub attempts: usize,
    pub elapsed: Duration,
    /// The answer, when known
    pub word: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub definition: Option<String>,
    pub word_stats: Option<WordStats>,
    pub source: SummarySource,
}

impl GameSummary {
    /// Summary computed on this side of the wire
    #[must_use]
    pub fn local(
        source: SummarySource,
        won: bool,
        attempts: usize,
        elapsed: Duration,
        word: Option<&Word>,
    ) -> Self {
        Self {
            session_id: None,
            won,
            attempts,
            elapsed,
            word: word.map(|w| w.text().to_string()),
            difficulty: None,
            definition: None,
            word_stats: None,
            source,
        }
    }
}

impl From<RemoteSummary> for GameSummary {
    fn from(summary: RemoteSummary) -> Self {
        Self {
            session_id: Some(summary.session_id),
            won: summary.won,
            attempts: summary.attempts,
            elapsed: summary.game_time,
            word: Some(summary.word),
            difficulty: summary.difficulty,
            definition: summary.definition,
            word_stats: summary.word_stats,
            source: SummarySource::Remote,
        }
    }
}

/// Personal daily-challenge statistics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PersonalStats {
    pub total: usize,
    pub wins: usize,
    /// Percentage in `0.0..=100.0`
    pub win_rate: f64,
    pub current_streak: usize,
    pub max_streak: usize,
    pub average_attempts: f64,
}

impl PersonalStats {
    /// Compute statistics over a daily history, in any order
    ///
    /// # Examples
    /// ```
    /// use sutom::game::PersonalStats;
    ///
    /// let stats = PersonalStats::from_history(&[]);
    /// assert_eq!(stats.total, 0);
    /// assert_eq!(stats.win_rate, 0.0);
    /// ```
    #[must_use]
    pub fn from_history(history: &[DailyRecord]) -> Self {
        let mut records: Vec<&DailyRecord> = history.iter().collect();
        records.sort_by_key(|record| record.date);

        let total = records.len();
        let wins = records.iter().filter(|record| record.won).count();
        let win_rate = if total > 0 {
            wins as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        let current_streak = records.iter().rev().take_while(|record| record.won).count();

        let mut max_streak = 0;
        let mut run = 0;
        for record in &records {
            if record.won {
                run += 1;
                max_streak = max_streak.max(run);
            } else {
                run = 0;
            }
        }

        let completed: Vec<_> = records.iter().filter(|record| record.completed).collect();
        let average_attempts = if completed.is_empty() {
            0.0
        } else {
            completed.iter().map(|record| record.attempts).sum::<usize>() as f64
                / completed.len() as f64
        };

        Self {
            total,
            wins,
            win_rate,
            current_streak,
            max_streak,
            average_attempts,
        }
    }
}
