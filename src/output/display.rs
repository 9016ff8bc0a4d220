//! Display functions for command results

use super::formatters::{
    colored_row, create_progress_bar, format_duration, keyboard_rows, masked_row,
};
use crate::core::{Verdict, Word, to_emoji_row};
use crate::game::{
    Authority, DailyServerStats, GameSummary, PersonalStats, ServerStats, SessionSnapshot,
    SummarySource,
};
use colored::Colorize;
use std::time::Duration;

/// Print the board: played rows, then the next row to fill
pub fn print_board(snapshot: &SessionSnapshot) {
    println!();
    for row in &snapshot.rows {
        println!(
            "  {}  {}",
            colored_row(row.word.letters(), &row.verdicts),
            row.to_emoji()
        );
    }

    if !snapshot.status.is_over() {
        println!(
            "  {}",
            masked_row(snapshot.first_letter, snapshot.word_length).bright_black()
        );
        println!(
            "\n  Essai {}/{}",
            snapshot.current_turn + 1,
            snapshot.max_attempts
        );
    }
}

/// Print the AZERTY keyboard with known letters highlighted
pub fn print_keyboard(snapshot: &SessionSnapshot) {
    println!();
    for (indent, row) in keyboard_rows(&snapshot.keyboard).iter().enumerate() {
        println!("  {}{row}", " ".repeat(indent));
    }
}

/// Print a one-line notice when scoring left the remote evaluator
pub fn print_authority(authority: Authority) {
    match authority {
        Authority::Remote => {}
        Authority::Local => println!("{}", "Mode hors ligne".bright_black()),
        Authority::Degraded => println!(
            "{}",
            "⚠ Serveur indisponible, partie poursuivie en local".yellow()
        ),
    }
}

/// Print the end-of-round summary
pub fn print_summary(summary: &GameSummary) {
    println!("\n{}", "═".repeat(60).cyan());
    if summary.won {
        println!(
            "{}",
            format!("🎉 Bravo ! Trouvé en {} essai(s)", summary.attempts)
                .green()
                .bold()
        );
    } else {
        println!("{}", "❌ Perdu !".red().bold());
    }
    println!("{}", "═".repeat(60).cyan());

    if let Some(word) = &summary.word {
        println!(
            "\n   Mot:          {}",
            word.to_uppercase().bright_yellow().bold()
        );
    }
    if let Some(difficulty) = summary.difficulty {
        println!("   Difficulté:   {} {}", difficulty.emoji(), difficulty.label());
    }
    println!("   Durée:        {}", format_duration(summary.elapsed));
    if let Some(definition) = &summary.definition {
        println!("   Définition:   {}", definition.italic());
    }

    if let Some(stats) = &summary.word_stats {
        println!("\n📊 {}", "Statistiques du mot:".bright_cyan().bold());
        println!("   Parties:          {}", stats.total_attempts);
        println!("   Taux de réussite: {:.1}%", stats.success_rate);
        println!("   Essais moyens:    {:.1}", stats.average_attempts);
    }

    if summary.source == SummarySource::Synthesized {
        println!(
            "\n{}",
            "(résumé calculé localement, serveur injoignable)".bright_black()
        );
    }
}

/// Print personal daily statistics
pub fn print_stats(stats: &PersonalStats) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "DÉFI QUOTIDIEN".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n   Défis joués:      {}", stats.total);
    println!("   Victoires:        {}", stats.wins.to_string().green());
    println!(
        "   Taux de victoire: [{}] {}",
        create_progress_bar(stats.win_rate, 100.0, 20).green(),
        format!("{:.0}%", stats.win_rate).bright_yellow()
    );
    println!("   Série actuelle:   {}", stats.current_streak);
    println!("   Meilleure série:  {}", stats.max_streak);
    println!("   Essais moyens:    {:.1}", stats.average_attempts);
}

/// Print what the server reports across all players
pub fn print_server_stats(server: Option<&ServerStats>, daily: Option<&DailyServerStats>) {
    if let Some(daily) = daily {
        println!("\n🌍 {}", "Défi du jour, tous joueurs:".bright_cyan().bold());
        println!("   Participants:     {}", daily.total_participants);
        println!("   Terminés:         {}", daily.total_completed);
        println!("   Victoires:        {}", daily.total_won);
        println!("   Taux de victoire: {:.1}%", daily.win_rate);
        println!("   Essais moyens:    {:.1}", daily.average_attempts);
        let average_time =
            Duration::try_from_secs_f64(daily.average_game_time / 1000.0).unwrap_or_default();
        println!("   Durée moyenne:    {}", format_duration(average_time));

        let most = daily.attempts_distribution.iter().copied().max().unwrap_or(0);
        for (index, &count) in daily.attempts_distribution.iter().enumerate() {
            println!(
                "   {} [{}] {count}",
                index + 1,
                create_progress_bar(count as f64, most as f64, 20).green()
            );
        }
    }

    if let Some(server) = server {
        println!("\n📡 {}", "Serveur:".bright_cyan().bold());
        println!("   Parties:          {}", server.total_sessions);
        if let Some(daily_sessions) = server.daily_sessions {
            println!("   Défis quotidiens: {daily_sessions}");
        }
        println!("   Taux de victoire: {:.1}%", server.win_rate);
        println!("   Essais moyens:    {:.1}", server.average_attempts);
    }
}

pub fn print_countdown(until_next: Duration) {
    println!(
        "\n⏳ Prochain défi dans {}",
        format_duration(until_next).bright_yellow()
    );
}

/// Print the verdicts of scoring one word against another
pub fn print_score(guess: &Word, target: &Word, verdicts: &[Verdict]) {
    println!(
        "\n  {} → {}",
        guess.text().to_uppercase().bright_white().bold(),
        target.text().to_uppercase().bright_yellow()
    );
    println!(
        "  {}  {}",
        colored_row(guess.letters(), verdicts),
        to_emoji_row(verdicts)
    );
}

pub fn print_share(text: &str) {
    println!("\n{}", "Partager:".bright_cyan().bold());
    for line in text.lines() {
        println!("  {line}");
    }
}
