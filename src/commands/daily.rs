//! Daily challenge command
//!
//! One puzzle per UTC day; a finished day is recorded and cannot be replayed.

use super::simple::{RoundEnd, play_round};
use crate::game::{
    Collaborators, DailyRecord, SessionCoordinator, StateStore, can_play_today,
    record_completion, share_text, time_until_next, today,
};
use crate::output::{print_countdown, print_share};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::io::BufRead;

/// Play today's challenge if it is still open
///
/// Returns the stored record when a round is completed, `None` when the day
/// was already played or the player quit.
///
/// # Errors
/// Returns an error if the store cannot be read or written, the puzzle cannot
/// be started, or input fails.
pub fn run_daily<R: BufRead>(
    collaborators: &Collaborators,
    store: &dyn StateStore,
    now: DateTime<Utc>,
    input: &mut R,
) -> Result<Option<DailyRecord>> {
    if !can_play_today(store, now).context("Failed to read daily record")? {
        println!("\n✅ Défi du jour déjà terminé.");
        if let Some(record) = store.load_daily().context("Failed to read daily record")? {
            print_share(&share_text(&record));
        }
        print_countdown(time_until_next(now));
        return Ok(None);
    }

    let date = today(now);
    let coordinator =
        SessionCoordinator::start_daily(date, collaborators).context("Failed to start daily challenge")?;
    let difficulty = coordinator.difficulty();

    println!(
        "\n{} {}  {} {}",
        "Défi Quotidien".bright_cyan().bold(),
        date.format("%d/%m/%Y"),
        difficulty.emoji(),
        difficulty.label()
    );

    let RoundEnd::Finished(summary) = play_round(&coordinator, input)? else {
        return Ok(None);
    };

    let Some(puzzle) = coordinator.daily_puzzle() else {
        return Ok(None);
    };
    let rows = coordinator.snapshot().rows;
    let record = record_completion(store, puzzle, &summary, &rows, now)
        .context("Failed to save daily result")?;

    print_share(&share_text(&record));
    print_countdown(time_until_next(now));
    Ok(Some(record))
}
