//! Watch command implementation - Interactive TUI viewer.

// CLI watch uses intentional casts for display and timing
#![allow(clippy::cast_possible_truncation)]

use super::{entropy_seed, CliError};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ludo::game::{symbol, EffectKind, PlayerId};
use ludo::render::{display_cell, narrate};
use ludo::TurnEngine;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::stdout;
use std::path::Path;
use std::time::{Duration, Instant};

const LOG_LINES: usize = 60;

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the board cannot be loaded or the TUI fails.
pub(crate) fn execute(
    board: &Path,
    players: u8,
    speed: u64,
    seed: Option<u64>,
) -> Result<(), CliError> {
    let board = ludo::game::Board::load(board)
        .map_err(|e| CliError::new(format!("failed to load {}: {e}", board.display())))?;

    let seed = seed.unwrap_or_else(entropy_seed);
    let engine = TurnEngine::new(board, players, seed)?;

    run_tui(engine, speed)
}

/// App state for the TUI.
struct App {
    engine: TurnEngine,
    paused: bool,
    speed_ms: u64,
    last_step: Instant,
    log: Vec<String>,
}

impl App {
    fn new(engine: TurnEngine, speed_ms: u64) -> Self {
        Self {
            engine,
            paused: true, // Start paused
            speed_ms,
            last_step: Instant::now(),
            log: Vec::new(),
        }
    }

    fn step_forward(&mut self) {
        if let Some(record) = self.engine.advance() {
            self.log.extend(narrate(&record));
            if self.log.len() > LOG_LINES {
                self.log.drain(..self.log.len() - LOG_LINES);
            }
        }
        self.last_step = Instant::now();
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    fn increase_speed(&mut self) {
        self.speed_ms = self.speed_ms.saturating_sub(100).max(50);
    }

    fn decrease_speed(&mut self) {
        self.speed_ms = (self.speed_ms + 100).min(2000);
    }

    fn restart(&mut self) {
        self.engine.restart();
        self.log.clear();
        self.paused = true;
    }

    fn should_auto_step(&self) -> bool {
        !self.paused
            && !self.engine.is_over()
            && self.last_step.elapsed() >= Duration::from_millis(self.speed_ms)
    }
}

fn run_tui(engine: TurnEngine, speed: u64) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(engine, speed);

    loop {
        // Draw
        terminal
            .draw(|f| ui(f, &app))
            .map_err(|e| CliError::new(e.to_string()))?;

        // Auto-step if needed
        if app.should_auto_step() {
            app.step_forward();
        }

        // Handle input with timeout
        if event::poll(Duration::from_millis(50)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char(' ') => app.toggle_pause(),
                KeyCode::Right | KeyCode::Char('n' | 'l') => {
                    app.paused = true;
                    app.step_forward();
                }
                KeyCode::Char('+' | '=') => app.increase_speed(),
                KeyCode::Char('-') => app.decrease_speed(),
                KeyCode::Char('r') => app.restart(),
                _ => {}
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(12),    // Main content
            Constraint::Length(3),  // Footer
        ])
        .split(f.area());

    // Header
    render_header(f, chunks[0], app);

    // Main content - board, log, players
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(chunks[1]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(4)])
        .split(main_chunks[0]);

    render_board(f, left_chunks[0], app);
    render_log(f, left_chunks[1], app);
    render_players(f, main_chunks[1], app);

    // Footer
    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let status = if app.engine.is_over() {
        "GAME OVER"
    } else if app.paused {
        "PAUSED"
    } else {
        "RUNNING"
    };

    let title = format!(
        " Ludo | Turn {} | {} | Speed: {}ms | Seed: {} ",
        app.engine.turns_played(),
        status,
        app.speed_ms,
        app.engine.seed()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let board = app.engine.board();
    let roster = app.engine.roster();

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..10 {
        let mut spans = Vec::new();
        for col in 0..10 {
            let cell = display_cell(row, col);
            let (text, style) = if let Some(player) = roster.occupant(cell) {
                (
                    format!("{}{cell}", symbol(player)),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                match board.jump(cell) {
                    Some((_, EffectKind::Ladder)) => {
                        (format!("L{cell}"), Style::default().fg(Color::Green))
                    }
                    Some((_, EffectKind::Snake)) => {
                        (format!("S{cell}"), Style::default().fg(Color::Red))
                    }
                    None => (cell.to_string(), Style::default().fg(Color::DarkGray)),
                }
            };
            spans.push(Span::styled(format!("{text:<5}"), style));
        }
        lines.push(Line::from(spans));
    }

    let board_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));

    f.render_widget(board_widget, area);
}

fn render_log(f: &mut Frame, area: Rect, app: &App) {
    let visible = (area.height as usize).saturating_sub(2);
    let start = app.log.len().saturating_sub(visible);
    let lines: Vec<Line> = app.log[start..]
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();

    let log_widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Turns "));

    f.render_widget(log_widget, area);
}

fn render_players(f: &mut Frame, area: Rect, app: &App) {
    let roster = app.engine.roster();
    let mut lines = Vec::new();

    lines.push(Line::from(""));
    for player in roster.players() {
        let color = player_color(player);
        let status = match roster.rank(player) {
            Some(rank) => format!("finished, rank {rank}"),
            None if roster.position(player) == 0 => "at home".to_string(),
            None => format!("at cell {}", roster.position(player)),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("Player {} ", symbol(player)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(status),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Active: {} / {}",
        roster.active_count(),
        roster.player_count()
    )));

    let players_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Players "))
        .wrap(Wrap { trim: false });

    f.render_widget(players_widget, area);
}

fn player_color(player: PlayerId) -> Color {
    match player % 8 {
        0 => Color::Red,
        1 => Color::Blue,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Magenta,
        5 => Color::Cyan,
        6 => Color::LightRed,
        _ => Color::LightBlue,
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.engine.is_over() {
        " [q] Quit  [r] Restart "
    } else {
        " [q] Quit  [Space] Pause  [n/→] Step  [+/-] Speed  [r] Restart "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
