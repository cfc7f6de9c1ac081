use log::debug;

use crate::engine::{Board, PlayerCell};

/// One deterministic deduction pass over the whole grid.
///
/// Scans every revealed numbered cell in row-major order and applies two
/// local rules against its Moore neighborhood:
///
/// - saturation: the hint equals covered + flagged neighbors, so every
///   covered neighbor must be a mine and gets flagged;
/// - satisfaction: the hint equals flagged neighbors, so every remaining
///   covered neighbor is safe and gets revealed.
///
/// Returns whether anything changed, so callers can loop until no progress
/// and then fall back to `Board::reveal_random`. Deductions trust flags as
/// confirmed mines; callers should clear suspect flags first.
pub fn solve_step(board: &mut Board) -> bool {
    let mut progressed = false;

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let hint = match board.player_cell(row, col) {
                PlayerCell::Revealed(n @ 1..=8) => n as usize,
                _ => continue,
            };

            let neighbors = board.neighbors(row, col);
            let covered = count(board, &neighbors, PlayerCell::Hidden);
            let flagged = count(board, &neighbors, PlayerCell::Flagged);

            if hint == covered + flagged {
                for &(r, c) in &neighbors {
                    if board.flag(r, c) {
                        progressed = true;
                    }
                }
            }

            // Recount so flags just placed by the saturation rule are seen.
            if hint == count(board, &neighbors, PlayerCell::Flagged) {
                for &(r, c) in &neighbors {
                    if board.player_cell(r, c) == PlayerCell::Hidden {
                        board.reveal(r, c);
                        progressed = true;
                    }
                }
            }
        }
    }

    debug!(
        "solver pass {}",
        if progressed { "made progress" } else { "found no move" }
    );
    progressed
}

fn count(board: &Board, cells: &[(usize, usize)], state: PlayerCell) -> usize {
    cells
        .iter()
        .filter(|&&(r, c)| board.player_cell(r, c) == state)
        .count()
}
