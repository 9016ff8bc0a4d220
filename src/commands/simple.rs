//! Simple interactive CLI mode
//!
//! Line-based classic game without the TUI

use crate::game::{
    Authority, Collaborators, GameConfig, GameSummary, SessionCoordinator, StateStore, SubmitError,
};
use crate::output::{print_authority, print_board, print_keyboard, print_summary};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::warn;

/// How a round left the player
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEnd {
    Finished(GameSummary),
    Quit,
}

/// Play one round on a coordinator, reading guesses line by line
///
/// End of input counts as quitting.
///
/// # Errors
/// Returns an error if reading input or writing the prompt fails.
pub fn play_round<R: BufRead>(coordinator: &SessionCoordinator, input: &mut R) -> Result<RoundEnd> {
    let snapshot = coordinator.snapshot();
    let mut authority = snapshot.authority;
    print_authority(authority);
    print_board(&snapshot);

    loop {
        let Some(line) = prompt(input, "Votre mot")? else {
            return Ok(RoundEnd::Quit);
        };

        if matches!(line.to_lowercase().as_str(), "quit" | "exit" | ":q") {
            return Ok(RoundEnd::Quit);
        }

        match coordinator.submit(&line) {
            Ok(outcome) => {
                if outcome.authority == Authority::Degraded && authority != Authority::Degraded {
                    print_authority(outcome.authority);
                }
                authority = outcome.authority;

                let snapshot = coordinator.snapshot();
                print_board(&snapshot);
                if let Some(summary) = outcome.summary {
                    print_summary(&summary);
                    return Ok(RoundEnd::Finished(summary));
                }
                print_keyboard(&snapshot);
            }
            Err(SubmitError::Busy) => println!("⏳ Vérification en cours..."),
            Err(err) => println!("❌ {err}"),
        }
    }
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if a round cannot be started or if there's an I/O error
/// reading user input.
pub fn run_simple(
    config: &GameConfig,
    collaborators: &Collaborators,
    store: &dyn StateStore,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    SUTOM - Partie classique                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Trouvez le mot en 6 essais. La première lettre est donnée.");
    println!("  🟩 bien placée   🟨 mal placée   ⬜ absente");
    println!("Tapez 'quit' pour quitter.\n");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut rng = rand::rng();

    loop {
        let coordinator = SessionCoordinator::start_classic(config, collaborators, &mut rng)
            .context("Failed to start a round")?;
        if let Err(err) = store.set_last_difficulty(coordinator.difficulty()) {
            warn!(error = %err, "could not remember difficulty");
        }

        if play_round(&coordinator, &mut input)? == RoundEnd::Quit {
            break;
        }

        let again = prompt(&mut input, "Rejouer ? (o/n)")?.unwrap_or_default();
        if !matches!(again.to_lowercase().as_str(), "o" | "oui" | "y" | "yes") {
            break;
        }
    }

    println!("\n👋 À bientôt !\n");
    Ok(())
}

/// Print a prompt and read one trimmed line; `None` at end of input
pub(crate) fn prompt<R: BufRead>(input: &mut R, label: &str) -> io::Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
