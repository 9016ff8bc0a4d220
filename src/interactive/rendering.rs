//! TUI rendering with ratatui
//!
//! Board, keyboard and messages for the Sutom interface.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{FRENCH_LAYOUT, LetterStatus, Verdict};
use crate::game::{Authority, SessionSnapshot};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let snapshot = app.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, &snapshot, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Board
            Constraint::Percentage(45), // Keyboard and messages
        ])
        .split(chunks[1]);

    render_board(f, app, &snapshot, main_chunks[0]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(main_chunks[1]);

    render_keyboard(f, &snapshot, side_chunks[0]);
    render_messages(f, app, side_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, &snapshot, chunks[3]);
}

fn render_header(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let title = format!(
        "🎯 SUTOM  {} {}",
        snapshot.difficulty.emoji(),
        snapshot.difficulty.label()
    );
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn verdict_style(verdict: Verdict) -> Style {
    let (fg, bg) = match verdict {
        Verdict::Exact => (Color::Black, Color::Green),
        Verdict::Present => (Color::Black, Color::Yellow),
        Verdict::Absent => (Color::White, Color::DarkGray),
    };
    Style::new().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

fn cell(letter: char) -> String {
    format!(" {} ", letter.to_uppercase())
}

/// One board line per attempt: played rows, the row being typed, then empty rows
fn board_lines<'a>(app: &App, snapshot: &SessionSnapshot) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = snapshot
        .rows
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .word
                .letters()
                .iter()
                .zip(&row.verdicts)
                .flat_map(|(&letter, &verdict)| {
                    [Span::styled(cell(letter), verdict_style(verdict)), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    if !snapshot.status.is_over() {
        let typed: Vec<char> = app.input_buffer.chars().collect();
        let spans: Vec<Span> = (0..snapshot.word_length)
            .flat_map(|position| {
                let span = match (typed.get(position), snapshot.first_letter) {
                    (Some(&letter), _) => Span::styled(
                        cell(letter),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    (None, Some(hint)) if position == 0 => {
                        Span::styled(cell(hint), Style::default().fg(Color::Red))
                    }
                    _ => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                };
                [span, Span::raw(" ")]
            })
            .collect();
        lines.push(Line::from(spans));
    }

    while lines.len() < snapshot.max_attempts {
        lines.push(Line::from(Span::styled(
            " . ".repeat(snapshot.word_length),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

fn render_board(f: &mut Frame, app: &App, snapshot: &SessionSnapshot, area: Rect) {
    let lines = board_lines(app, snapshot)
        .into_iter()
        .flat_map(|line| [line, Line::default()])
        .collect::<Vec<_>>();

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(format!(
                " Essai {}/{} ",
                (snapshot.current_turn + 1).min(snapshot.max_attempts),
                snapshot.max_attempts
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_keyboard(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let lines: Vec<Line> = FRENCH_LAYOUT
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .flat_map(|&key| {
                    let style = match snapshot.keyboard.status_of(key) {
                        LetterStatus::Exact => Style::new().fg(Color::Black).bg(Color::Green),
                        LetterStatus::Present => Style::new().fg(Color::Black).bg(Color::Yellow),
                        LetterStatus::Absent => Style::new().fg(Color::DarkGray),
                        LetterStatus::Unknown => Style::new().fg(Color::White),
                    };
                    [Span::styled(key.to_uppercase().to_string(), style), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Clavier ")
            .borders(Borders::ALL),
    );
    f.render_widget(keyboard, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Warning => Style::default().fg(Color::Yellow),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::RoundOver => (
            " Partie terminée | 'n' nouvelle partie, 1/2/3 difficulté, 'q' quitter ",
            String::new(),
            Color::Green,
        ),
        InputMode::Typing => (
            " Votre mot | Entrée pour valider, Échap pour quitter ",
            app.input_buffer.to_uppercase(),
            Color::Yellow,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, snapshot: &SessionSnapshot, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mode_text = match snapshot.authority {
        Authority::Remote => "En ligne",
        Authority::Local => "Hors ligne",
        Authority::Degraded => "Hors ligne (serveur indisponible)",
    };
    let mode = Paragraph::new(mode_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(mode, chunks[0]);

    let stats_text = format!(
        "Parties: {} | Victoires: {:.0}%",
        app.stats.total_games,
        if app.stats.total_games > 0 {
            app.stats.games_won as f64 / app.stats.total_games as f64 * 100.0
        } else {
            0.0
        }
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);
}
