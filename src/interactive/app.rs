//! TUI application state and logic

use crate::core::Difficulty;
use crate::game::{
    Authority, Collaborators, GameConfig, SessionCoordinator, SessionSnapshot, StateStore,
    SubmitError,
};
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use tracing::warn;

/// Application state
pub struct App {
    collaborators: Collaborators,
    store: Arc<dyn StateStore>,
    config: GameConfig,
    coordinator: SessionCoordinator,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub input_mode: InputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Typing,
    RoundOver,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Warning,
    Error,
}

/// Results over the rounds played in this run
#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    /// Wins by number of attempts; index 0 unused
    pub guess_distribution: [usize; 7],
}

impl App {
    /// Start the first round
    ///
    /// # Errors
    /// Returns an error if no round can be started with `config`.
    pub fn new(
        config: GameConfig,
        collaborators: Collaborators,
        store: Arc<dyn StateStore>,
    ) -> Result<Self> {
        let coordinator = start_round(&config, &collaborators, store.as_ref())?;

        let mut app = Self {
            collaborators,
            store,
            config,
            coordinator,
            input_buffer: String::new(),
            messages: Vec::new(),
            stats: Statistics::default(),
            should_quit: false,
            input_mode: InputMode::Typing,
        };
        app.announce_round();
        Ok(app)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.coordinator.snapshot()
    }

    fn announce_round(&mut self) {
        let snapshot = self.coordinator.snapshot();
        self.add_message(
            &format!(
                "Nouveau mot de {} lettres ({} {})",
                snapshot.word_length,
                snapshot.difficulty.emoji(),
                snapshot.difficulty.label()
            ),
            MessageStyle::Info,
        );
        match snapshot.authority {
            Authority::Remote => {}
            Authority::Local => self.add_message("Mode hors ligne", MessageStyle::Info),
            Authority::Degraded => self.add_message(
                "Serveur indisponible, partie locale",
                MessageStyle::Warning,
            ),
        }
    }

    /// Add a typed letter, up to the word length
    pub fn push_letter(&mut self, letter: char) {
        if !letter.is_alphabetic() {
            return;
        }
        let length = self.coordinator.snapshot().word_length;
        if self.input_buffer.chars().count() < length {
            self.input_buffer.extend(letter.to_lowercase());
        }
    }

    pub fn submit(&mut self) {
        let before = self.coordinator.authority();

        match self.coordinator.submit(&self.input_buffer) {
            Ok(outcome) => {
                self.input_buffer.clear();

                if outcome.authority == Authority::Degraded && before != Authority::Degraded {
                    self.add_message(
                        "Serveur indisponible, la partie continue en local",
                        MessageStyle::Warning,
                    );
                }

                if let Some(summary) = outcome.summary {
                    self.stats.total_games += 1;
                    if summary.won {
                        self.stats.games_won += 1;
                        if summary.attempts < self.stats.guess_distribution.len() {
                            self.stats.guess_distribution[summary.attempts] += 1;
                        }
                        let celebration = match summary.attempts {
                            1 => "🎯 Du premier coup ! Extraordinaire !",
                            2 => "🔥 Magnifique ! Deux essais !",
                            3 => "✨ Splendide ! Trois essais !",
                            4 => "👏 Bravo ! Quatre essais !",
                            5 => "🎉 Bien joué ! Cinq essais !",
                            _ => "😅 Ouf ! Juste à temps !",
                        };
                        self.add_message(celebration, MessageStyle::Success);
                    } else {
                        let word = summary.word.as_deref().unwrap_or("?").to_uppercase();
                        self.add_message(&format!("Perdu ! Le mot était {word}"), MessageStyle::Error);
                    }
                    self.add_message(
                        "'n' nouvelle partie, 1/2/3 change la difficulté, 'q' quitter",
                        MessageStyle::Info,
                    );
                    self.input_mode = InputMode::RoundOver;
                }
            }
            Err(SubmitError::Busy) => {
                self.add_message("Vérification en cours...", MessageStyle::Info);
            }
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
    }

    /// Start a new round, optionally at another difficulty
    ///
    /// A fixed target only applies to the first round; later rounds draw.
    pub fn new_game(&mut self, difficulty: Option<Difficulty>) {
        if let Some(difficulty) = difficulty {
            self.config.difficulty = Some(difficulty);
        }
        self.config.override_target = None;

        match start_round(&self.config, &self.collaborators, self.store.as_ref()) {
            Ok(coordinator) => {
                self.coordinator = coordinator;
                self.input_buffer.clear();
                self.messages.clear();
                self.input_mode = InputMode::Typing;
                self.announce_round();
            }
            Err(err) => self.add_message(&format!("{err:#}"), MessageStyle::Error),
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    /// Apply one key press
    pub fn on_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::RoundOver => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('n') | KeyCode::Enter => self.new_game(None),
                KeyCode::Char('1') => self.new_game(Some(Difficulty::Easy)),
                KeyCode::Char('2') => self.new_game(Some(Difficulty::Medium)),
                KeyCode::Char('3') => self.new_game(Some(Difficulty::Hard)),
                _ => {}
            },
            InputMode::Typing => match code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Char(c) => self.push_letter(c),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Enter => self.submit(),
                _ => {}
            },
        }
    }
}

fn start_round(
    config: &GameConfig,
    collaborators: &Collaborators,
    store: &dyn StateStore,
) -> Result<SessionCoordinator> {
    let coordinator = SessionCoordinator::start_classic(config, collaborators, &mut rand::rng())
        .context("Failed to start a round")?;
    if let Err(err) = store.set_last_difficulty(coordinator.difficulty()) {
        warn!(error = %err, "could not remember difficulty");
    }
    Ok(coordinator)
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.on_key(key.code, key.modifiers);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
