use std::io::{self, Stdout};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Terminal;

use crate::engine::{Board, PlayerCell};

const ELAPSED_DISPLAY_CAP: u64 = 9999;

/// Terminal renderer: owns the ratatui terminal plus a small cached view of
/// what is on screen, so each render call can redraw a full frame without
/// touching the board. The timer thread updates only the cached elapsed
/// seconds, which is what keeps it off the engine entirely.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TermGuard,
    view: ViewState,
}

#[derive(Default)]
struct ViewState {
    rows: usize,
    cols: usize,
    mines: usize,
    cells: Vec<PlayerCell>,
    flags_remaining: i32,
    elapsed: u64,
    cursor: (usize, usize),
    message: Option<String>,
}

impl Tui {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let guard = TermGuard;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            _guard: guard,
            view: ViewState::default(),
        })
    }

    /// Sizes the view for a new game: all cells covered, full flag budget,
    /// timer at zero, cursor at the origin.
    pub fn attach(&mut self, rows: usize, cols: usize, mines: usize) -> io::Result<()> {
        self.view = ViewState {
            rows,
            cols,
            mines,
            cells: vec![PlayerCell::Hidden; rows * cols],
            flags_remaining: mines as i32,
            elapsed: 0,
            cursor: (0, 0),
            message: None,
        };
        self.draw()
    }

    pub fn render_grid(&mut self, board: &Board) -> io::Result<()> {
        for row in 0..self.view.rows {
            for col in 0..self.view.cols {
                self.view.cells[row * self.view.cols + col] = board.player_cell(row, col);
            }
        }
        self.draw()
    }

    pub fn render_flags(&mut self, flags_remaining: i32) -> io::Result<()> {
        self.view.flags_remaining = flags_remaining;
        self.draw()
    }

    pub fn render_elapsed(&mut self, secs: u64) -> io::Result<()> {
        self.view.elapsed = secs.min(ELAPSED_DISPLAY_CAP);
        self.draw()
    }

    /// Centered modal that blocks until enter (or q) is pressed. The caller
    /// holds the renderer lock for the whole wait, so timer frames are
    /// dropped rather than drawn over the message.
    pub fn show_message(&mut self, text: &str) -> io::Result<()> {
        self.view.message = Some(text.to_string());
        self.draw()?;
        loop {
            match read_key()? {
                KeyCode::Enter | KeyCode::Char('q') => break,
                _ => {}
            }
        }
        self.view.message = None;
        self.draw()
    }

    pub fn set_cursor(&mut self, row: usize, col: usize) -> io::Result<()> {
        self.view.cursor = (row, col);
        self.draw()
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.view.cursor
    }

    pub fn draw_menu(&mut self, items: &[&str], highlight: usize) -> io::Result<()> {
        self.terminal.draw(|f| {
            let root = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(items.len() as u16 + 2),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ])
                .split(f.size());

            let title = Paragraph::new("M I N E S W E E P E R")
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(title, root[0]);

            let lines: Vec<Line> = items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let style = if i == highlight {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    Line::from(Span::styled(*item, style))
                })
                .collect();
            let menu = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(menu, root[1]);

            let hint = Paragraph::new("[press enter to make selection]")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(hint, root[2]);
        })?;
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        self.terminal.draw(|f| ui(f, &self.view))?;
        Ok(())
    }
}

/// Blocks until a key press and returns its code. Non-key events (resize,
/// focus) are swallowed.
pub fn read_key() -> io::Result<KeyCode> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key.code);
            }
        }
    }
}

fn ui(f: &mut ratatui::Frame, view: &ViewState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    let header = Paragraph::new("Arrows/HJKL move • g reveal • f flag • s solve • ? help • q quit")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Minesweeper"));
    f.render_widget(header, root[0]);

    let area = centered_grid_area(root[1], view.cols as u16, view.rows as u16);
    draw_grid(f, view, area);

    let footer = Paragraph::new(format!(
        "Flags: {}   Mines: {}   Time: {}s",
        view.flags_remaining, view.mines, view.elapsed
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[2]);

    if let Some(text) = &view.message {
        draw_message(f, text);
    }
}

fn centered_grid_area(parent: Rect, cols: u16, rows: u16) -> Rect {
    let cell_w = 2; // one glyph + one space
    let grid_w = cols * cell_w + 2; // +2 for the block borders
    let grid_h = rows + 2;
    let x = parent.x.saturating_add(parent.width.saturating_sub(grid_w) / 2);
    let y = parent.y.saturating_add(parent.height.saturating_sub(grid_h) / 2);
    Rect {
        x,
        y,
        width: grid_w.min(parent.width),
        height: grid_h.min(parent.height),
    }
}

fn draw_grid(f: &mut ratatui::Frame, view: &ViewState, area: Rect) {
    let mut lines: Vec<Line> = Vec::with_capacity(view.rows);
    for row in 0..view.rows {
        let mut spans: Vec<Span> = Vec::with_capacity(view.cols);
        for col in 0..view.cols {
            let cell = view.cells[row * view.cols + col];
            spans.push(cell_span(cell, view.cursor == (row, col)));
        }
        lines.push(Line::from(spans));
    }
    let para = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Board"));
    f.render_widget(para, area);
}

fn cell_span(cell: PlayerCell, selected: bool) -> Span<'static> {
    let (mut ch, mut style) = match cell {
        PlayerCell::Hidden => ('·', Style::default().fg(Color::DarkGray)),
        PlayerCell::Flagged => ('F', Style::default().fg(Color::Yellow)),
        PlayerCell::Exploded => ('*', Style::default().fg(Color::Red)),
        PlayerCell::Revealed(0) => (' ', Style::default().fg(Color::Gray)),
        PlayerCell::Revealed(n) => (
            char::from_digit(n as u32, 10).unwrap_or('?'),
            number_style(n),
        ),
    };

    // Highlight selected cell
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
        if ch == ' ' {
            ch = '·';
        }
    }

    Span::styled(format!("{} ", ch), style)
}

fn number_style(n: u8) -> Style {
    match n {
        1 => Style::default().fg(Color::Blue),
        2 => Style::default().fg(Color::Green),
        3 => Style::default().fg(Color::Red),
        4 => Style::default().fg(Color::Magenta),
        5 => Style::default().fg(Color::Yellow),
        6 => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}

fn draw_message(f: &mut ratatui::Frame, text: &str) {
    let body = format!("{}\n\n[press enter]", text);
    let width = (body.lines().map(|l| l.len()).max().unwrap_or(0) as u16).saturating_add(4);
    let height = (body.lines().count() as u16).saturating_add(2);
    let area = centered_rect(f.size(), width, height);
    f.render_widget(Clear, area);
    let para = Paragraph::new(body).block(Block::default().borders(Borders::ALL));
    f.render_widget(para, area);
}

fn centered_rect(parent: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(parent.width);
    let height = height.min(parent.height);
    let x = parent.x.saturating_add(parent.width.saturating_sub(width) / 2);
    let y = parent.y.saturating_add(parent.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

struct TermGuard;
impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}
