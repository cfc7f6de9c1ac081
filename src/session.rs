use std::io;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use log::debug;

use crate::engine::{Board, GameStatus};
use crate::menu::{Preset, HELP_TEXT};
use crate::solver;
use crate::tui::{self, Tui};

enum Action {
    Move(i32, i32),
    Reveal,
    RevealRandom,
    ToggleFlag,
    VerifyFlags,
    ClearFlags,
    Solve,
    Help,
    Quit,
}

fn map_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Move(0, -1)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Move(0, 1)),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Move(-1, 0)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Move(1, 0)),
        KeyCode::Enter | KeyCode::Char('g') => Some(Action::Reveal),
        KeyCode::Char('r') => Some(Action::RevealRandom),
        KeyCode::Char('f') => Some(Action::ToggleFlag),
        KeyCode::Char('v') => Some(Action::VerifyFlags),
        KeyCode::Char('c') => Some(Action::ClearFlags),
        KeyCode::Char('s') => Some(Action::Solve),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Runs one game: wires key events to board operations and keeps a second
/// thread pushing elapsed time to the renderer once per second.
///
/// The board never leaves this thread. The only state shared with the
/// ticker is the game status (mutex: written after each move, read before
/// each tick) and the renderer itself; the ticker only ever tries the
/// renderer lock and skips the frame on contention, so a modal or a burst
/// of input redraws can never block it into stalling the input thread.
pub fn run(tui: &Arc<Mutex<Tui>>, preset: Preset, seed: Option<u64>) -> io::Result<GameStatus> {
    let mut board = Board::from_seed(preset.rows(), preset.cols(), preset.mines(), seed)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let status = Arc::new(Mutex::new(GameStatus::Pending));

    {
        let mut tui = tui.lock().unwrap();
        tui.attach(board.rows(), board.cols(), board.mine_count())?;
        tui.render_grid(&board)?;
        tui.render_flags(board.flags_remaining())?;
    }

    let ticker = {
        let tui = Arc::clone(tui);
        let status = Arc::clone(&status);
        let start = Instant::now();
        thread::spawn(move || loop {
            if *status.lock().unwrap() != GameStatus::Pending {
                break;
            }
            let secs = start.elapsed().as_secs();
            if let Ok(mut tui) = tui.try_lock() {
                let _ = tui.render_elapsed(secs);
            }
            thread::sleep(Duration::from_secs(1));
        })
    };

    let mut quit = false;
    while !status.lock().unwrap().is_over() {
        let Some(action) = map_key(tui::read_key()?) else {
            continue;
        };
        match action {
            Action::Move(dr, dc) => {
                let (row, col) = tui.lock().unwrap().cursor();
                let (nr, nc) = (row as i32 + dr, col as i32 + dc);
                if board.in_bounds(nr, nc) {
                    tui.lock().unwrap().set_cursor(nr as usize, nc as usize)?;
                }
            }
            Action::Reveal => {
                let (row, col) = tui.lock().unwrap().cursor();
                board.reveal(row, col);
                update_status(&status, &board);
                redraw(tui, &board)?;
            }
            Action::RevealRandom => {
                tui.lock().unwrap().show_message("Computer is making a guess")?;
                board.reveal_random();
                update_status(&status, &board);
                redraw(tui, &board)?;
            }
            Action::ToggleFlag => {
                let (row, col) = tui.lock().unwrap().cursor();
                board.toggle_flag(row, col);
                redraw(tui, &board)?;
            }
            Action::VerifyFlags => {
                let msg = if board.verify_flags() {
                    "Flags are valid"
                } else {
                    "Flags are not valid"
                };
                tui.lock().unwrap().show_message(msg)?;
            }
            Action::ClearFlags => {
                board.clear_flags();
                redraw(tui, &board)?;
            }
            Action::Solve => {
                tui.lock()
                    .unwrap()
                    .show_message("Computer will attempt to solve the puzzle")?;
                // Deductions assume flags mean confirmed mines, so start
                // from an unflagged board.
                board.clear_flags();
                while !status.lock().unwrap().is_over() {
                    if !solver::solve_step(&mut board) {
                        tui.lock().unwrap().show_message("Computer is making a guess")?;
                        board.reveal_random();
                    }
                    update_status(&status, &board);
                    redraw(tui, &board)?;
                }
            }
            Action::Help => {
                tui.lock().unwrap().show_message(HELP_TEXT)?;
            }
            Action::Quit => {
                // the ticker watches the status, so a quit counts as a loss
                *status.lock().unwrap() = GameStatus::Lost;
                quit = true;
            }
        }
    }

    // Ticker exits on its next status check; nothing else to signal.
    let _ = ticker.join();

    let final_status = *status.lock().unwrap();
    debug!("session finished: {:?} (quit: {})", final_status, quit);
    if !quit {
        match final_status {
            GameStatus::Won => {
                tui.lock().unwrap().show_message("YOU WIN!")?;
            }
            GameStatus::Lost => {
                board.reveal_mines();
                let mut tui = tui.lock().unwrap();
                tui.render_grid(&board)?;
                tui.show_message("YOU LOSE :(")?;
            }
            GameStatus::Pending => {}
        }
    }
    Ok(final_status)
}

fn update_status(status: &Arc<Mutex<GameStatus>>, board: &Board) {
    *status.lock().unwrap() = board.status();
}

fn redraw(tui: &Arc<Mutex<Tui>>, board: &Board) -> io::Result<()> {
    let mut tui = tui.lock().unwrap();
    tui.render_grid(board)?;
    tui.render_flags(board.flags_remaining())
}
