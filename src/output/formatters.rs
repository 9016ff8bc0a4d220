//! Formatting utilities for terminal output

use crate::core::{FRENCH_LAYOUT, KeyboardStatus, LetterStatus, Verdict};
use colored::{ColoredString, Colorize};
use std::time::Duration;

/// Color one letter according to its verdict
#[must_use]
pub fn colored_letter(letter: char, verdict: Verdict) -> ColoredString {
    let cell = format!(" {} ", letter.to_uppercase());
    match verdict {
        Verdict::Exact => cell.black().on_green().bold(),
        Verdict::Present => cell.black().on_yellow().bold(),
        Verdict::Absent => cell.white().on_bright_black(),
    }
}

/// A scored row as colored letter cells
#[must_use]
pub fn colored_row(letters: &[char], verdicts: &[Verdict]) -> String {
    letters
        .iter()
        .zip(verdicts)
        .map(|(&letter, &verdict)| colored_letter(letter, verdict).to_string())
        .collect()
}

/// Row still to be played: the hint letter then dots
///
/// # Examples
/// ```
/// use sutom::output::formatters::masked_row;
///
/// assert_eq!(masked_row(Some('c'), 4), "C . . .");
/// assert_eq!(masked_row(None, 3), ". . .");
/// ```
#[must_use]
pub fn masked_row(first_letter: Option<char>, length: usize) -> String {
    (0..length)
        .map(|position| match first_letter {
            Some(letter) if position == 0 => letter.to_uppercase().to_string(),
            _ => ".".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// AZERTY keyboard, one string per row, keys colored by what is known
#[must_use]
pub fn keyboard_rows(keyboard: &KeyboardStatus) -> Vec<String> {
    FRENCH_LAYOUT
        .iter()
        .map(|row| {
            row.iter()
                .map(|&key| {
                    let label = key.to_uppercase().to_string();
                    let styled = match keyboard.status_of(key) {
                        LetterStatus::Exact => label.black().on_green(),
                        LetterStatus::Present => label.black().on_yellow(),
                        LetterStatus::Absent => label.bright_black().strikethrough(),
                        LetterStatus::Unknown => label.normal(),
                    };
                    styled.to_string()
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Minutes and seconds, or hours when it matters
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

/// Create a progress bar string
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
