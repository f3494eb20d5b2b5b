//! Puzzle rendering.

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use strictly_blocker::{
    Coord, MoveOutcome, Puzzle, Renderer, EMPTY_GLYPH, OBSTACLE_GLYPH, PLAYER_GLYPH,
    TRANSPORTER_GLYPH,
};
use tracing::{info, warn};

/// Draws one frame: the board, then a status panel.
pub fn draw(f: &mut Frame, puzzle: &Puzzle, last: Option<&MoveOutcome>, moves: usize) {
    let grid = puzzle.grid();
    let board_width = u16::try_from(*grid.width()).unwrap_or(u16::MAX).saturating_add(2);
    let board_height = u16::try_from(*grid.height()).unwrap_or(u16::MAX).saturating_add(2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(board_height), Constraint::Length(5)])
        .split(f.area());

    render_board(f, center_rect(chunks[0], board_width, board_height), puzzle);
    render_status(f, chunks[1], puzzle, last, moves);
}

fn render_board(f: &mut Frame, area: Rect, puzzle: &Puzzle) {
    let grid = puzzle.grid();
    let lines: Vec<Line> = (0..*grid.height())
        .map(|y| {
            let spans: Vec<Span> = (0..*grid.width())
                .map(|x| glyph_span(puzzle.glyph_at(Coord::new(x, y))))
                .collect();
            Line::from(spans)
        })
        .collect();

    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(board, area);
}

fn glyph_span(glyph: char) -> Span<'static> {
    let style = match glyph {
        PLAYER_GLYPH => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        OBSTACLE_GLYPH => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        TRANSPORTER_GLYPH => Style::default().fg(Color::Magenta),
        EMPTY_GLYPH => Style::default().fg(Color::DarkGray),
        _ => Style::default(),
    };
    Span::styled(glyph.to_string(), style)
}

fn render_status(
    f: &mut Frame,
    area: Rect,
    puzzle: &Puzzle,
    last: Option<&MoveOutcome>,
    moves: usize,
) {
    let obstacles = puzzle.obstacles();
    let outcome = last.map_or_else(|| "ready".to_string(), ToString::to_string);
    let outcome_style = match last {
        Some(MoveOutcome::Rejected(_)) => Style::default().fg(Color::Red),
        Some(MoveOutcome::Transported { .. }) => Style::default().fg(Color::Green),
        _ => Style::default(),
    };

    let lines = vec![
        Line::from(Span::styled(outcome, outcome_style)),
        Line::from(format!(
            "Moves: {moves} | Removed: {}/{}",
            obstacles.removed_count(),
            obstacles.len()
        )),
        Line::from(Span::styled(
            "Arrows / WASD / HJKL: Move | q: Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let status = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(horizontal[1])[1]
}

/// Renderer that owns the terminal for the length of a game.
///
/// Raw mode and the alternate screen are restored on drop.
pub struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    moves: usize,
}

impl TerminalRenderer {
    /// Switches the terminal into raw mode on the alternate screen.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info!("Terminal ready");
        Ok(Self { terminal, moves: 0 })
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Renderer for TerminalRenderer {
    type Error = io::Error;

    fn render(&mut self, puzzle: &Puzzle, last: Option<&MoveOutcome>) -> Result<(), Self::Error> {
        if last.is_some() {
            self.moves += 1;
        }
        let moves = self.moves;
        self.terminal.draw(|f| draw(f, puzzle, last, moves))?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(error) = self.restore() {
            warn!(%error, "Failed to restore terminal");
        }
    }
}
