use std::collections::HashSet;

use sweeper::engine::{Board, BoardError, GameStatus, PlayerCell, SolutionCell};

fn neighbors(rows: usize, cols: usize, row: usize, col: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for dr in -1i32..=1 {
        for dc in -1i32..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let nr = row as i32 + dr;
            let nc = col as i32 + dc;
            if nr >= 0 && nc >= 0 && (nr as usize) < rows && (nc as usize) < cols {
                out.push((nr as usize, nc as usize));
            }
        }
    }
    out
}

#[test]
fn mine_count_matches_after_construction() {
    let b = Board::from_seed(10, 10, 10, Some(12345)).expect("board");
    let mut mines = 0;
    for row in 0..b.rows() {
        for col in 0..b.cols() {
            if b.solution_cell(row, col) == SolutionCell::Mine {
                mines += 1;
            }
        }
    }
    assert_eq!(10, mines);
    assert_eq!(10, b.mine_coords().len());
    let unique: HashSet<_> = b.mine_coords().iter().collect();
    assert_eq!(10, unique.len());
}

#[test]
fn hints_match_neighbor_mines() {
    let b = Board::from_seed(8, 8, 10, Some(999)).expect("board");
    for row in 0..b.rows() {
        for col in 0..b.cols() {
            let hint = match b.solution_cell(row, col) {
                SolutionCell::Mine => continue,
                SolutionCell::Hint(n) => n as usize,
            };
            let adjacent = neighbors(b.rows(), b.cols(), row, col)
                .into_iter()
                .filter(|&(r, c)| b.solution_cell(r, c) == SolutionCell::Mine)
                .count();
            assert_eq!(adjacent, hint, "hint mismatch at ({},{})", row, col);
        }
    }
}

#[test]
fn same_seed_gives_same_layout() {
    let a = Board::from_seed(16, 16, 40, Some(7)).expect("board");
    let b = Board::from_seed(16, 16, 40, Some(7)).expect("board");
    assert_eq!(a.mine_coords(), b.mine_coords());
}

#[test]
fn construction_rejects_bad_configs() {
    assert_eq!(Some(BoardError::EmptyBoard), Board::from_seed(0, 5, 0, None).err());
    assert_eq!(Some(BoardError::EmptyBoard), Board::from_seed(5, 0, 0, None).err());
    assert_eq!(
        Some(BoardError::TooManyMines { mines: 4, cells: 4 }),
        Board::from_seed(2, 2, 4, None).err()
    );
    assert_eq!(
        Some(BoardError::InvalidMineLayout),
        Board::with_mine_layout(3, 3, &[(0, 0), (0, 0)]).err()
    );
    assert_eq!(
        Some(BoardError::InvalidMineLayout),
        Board::with_mine_layout(3, 3, &[(3, 0)]).err()
    );
}

#[test]
fn flood_fill_reveals_all_of_a_zero_board() {
    // A mineless 3x3 board is one big zero region full of cycles; a single
    // reveal must uncover all nine cells and terminate.
    let mut b = Board::with_mine_layout(3, 3, &[]).expect("board");
    b.reveal(1, 1);
    for row in 0..3 {
        for col in 0..3 {
            assert_eq!(PlayerCell::Revealed(0), b.player_cell(row, col));
        }
    }
    assert_eq!(GameStatus::Won, b.status());
}

#[test]
fn flood_fill_stops_at_numbered_border() {
    // Single mine in the corner: the whole zero region plus its numbered
    // border opens, only the mine stays covered.
    let mut b = Board::with_mine_layout(5, 5, &[(4, 4)]).expect("board");
    b.reveal(0, 0);
    for row in 0..5 {
        for col in 0..5 {
            match b.player_cell(row, col) {
                PlayerCell::Hidden => assert_eq!((4, 4), (row, col)),
                PlayerCell::Revealed(n) => {
                    let expected = match (row, col) {
                        (3, 3) | (3, 4) | (4, 3) => 1,
                        _ => 0,
                    };
                    assert_eq!(expected, n, "wrong hint shown at ({},{})", row, col);
                }
                other => panic!("unexpected cell {:?} at ({},{})", other, row, col),
            }
        }
    }
    assert_eq!(GameStatus::Won, b.status());
}

#[test]
fn flood_fill_sweeps_flags_back_into_the_budget() {
    let mut b = Board::with_mine_layout(3, 3, &[]).expect("board");
    assert!(b.flag(0, 0));
    assert_eq!(-1, b.flags_remaining());
    b.reveal(1, 1);
    assert_eq!(PlayerCell::Revealed(0), b.player_cell(0, 0));
    assert_eq!(0, b.flags_remaining());
}

#[test]
fn flood_fill_leaves_flagged_numbered_border_alone() {
    let mut b = Board::with_mine_layout(1, 4, &[(0, 3)]).expect("board");
    assert!(b.flag(0, 2));
    b.reveal(0, 0);
    assert_eq!(PlayerCell::Revealed(0), b.player_cell(0, 0));
    assert_eq!(PlayerCell::Revealed(0), b.player_cell(0, 1));
    assert_eq!(PlayerCell::Flagged, b.player_cell(0, 2));
    assert_eq!(0, b.flags_remaining());
}

#[test]
fn flag_unflag_round_trip_restores_budget() {
    let mut b = Board::with_mine_layout(4, 4, &[(0, 0), (3, 3)]).expect("board");
    assert_eq!(2, b.flags_remaining());
    assert!(b.flag(1, 1));
    assert_eq!(1, b.flags_remaining());
    assert!(b.unflag(1, 1));
    assert_eq!(2, b.flags_remaining());

    assert!(b.flag(0, 0));
    assert!(b.flag(3, 3));
    assert_eq!(0, b.flags_remaining());

    // over-flagging is allowed and drives the budget negative
    assert!(b.flag(2, 2));
    assert_eq!(-1, b.flags_remaining());

    b.clear_flags();
    assert_eq!(2, b.flags_remaining());
    assert_eq!(PlayerCell::Hidden, b.player_cell(0, 0));
}

#[test]
fn flagging_is_a_no_op_on_settled_cells() {
    let mut b = Board::with_mine_layout(2, 2, &[(0, 0)]).expect("board");
    b.reveal(1, 1);
    assert!(!b.flag(1, 1));
    b.toggle_flag(1, 1);
    assert_eq!(PlayerCell::Revealed(1), b.player_cell(1, 1));
    assert!(!b.unflag(0, 1));
    assert_eq!(1, b.flags_remaining());
}

#[test]
fn revealing_every_safe_cell_wins() {
    let mut b = Board::with_mine_layout(2, 2, &[(0, 0)]).expect("board");
    b.reveal(0, 1);
    b.reveal(1, 0);
    assert_eq!(GameStatus::Pending, b.status());
    b.reveal(1, 1);
    assert_eq!(GameStatus::Won, b.status());
}

#[test]
fn revealing_a_mine_loses() {
    let mut b = Board::with_mine_layout(2, 2, &[(0, 0)]).expect("board");
    b.reveal(0, 0);
    assert_eq!(PlayerCell::Exploded, b.player_cell(0, 0));
    assert_eq!(GameStatus::Lost, b.status());
}

#[test]
fn revealing_a_flagged_mine_still_detonates() {
    let mut b = Board::with_mine_layout(2, 2, &[(0, 0)]).expect("board");
    assert!(b.flag(0, 0));
    b.reveal(0, 0);
    assert_eq!(PlayerCell::Exploded, b.player_cell(0, 0));
    assert_eq!(GameStatus::Lost, b.status());
}

#[test]
fn revealing_a_flagged_numbered_cell_is_a_no_op() {
    let mut b = Board::with_mine_layout(2, 2, &[(0, 0)]).expect("board");
    assert!(b.flag(1, 1));
    b.reveal(1, 1);
    assert_eq!(PlayerCell::Flagged, b.player_cell(1, 1));
}

#[test]
fn reveal_mines_spares_flagged_mines() {
    let mut b = Board::with_mine_layout(4, 4, &[(0, 0), (3, 3)]).expect("board");
    assert!(b.flag(0, 0));
    b.reveal_mines();
    assert_eq!(PlayerCell::Flagged, b.player_cell(0, 0));
    assert_eq!(PlayerCell::Exploded, b.player_cell(3, 3));
}

#[test]
fn reveal_random_only_picks_covered_cells() {
    let mut b = Board::with_mine_layout(2, 2, &[(0, 0)]).expect("board");
    b.reveal(0, 1);
    b.reveal(1, 0);
    b.reveal(1, 1);
    assert!(b.flag(0, 0));
    // no covered cells remain, so this must not touch the flagged mine
    b.reveal_random();
    assert_eq!(PlayerCell::Flagged, b.player_cell(0, 0));
    assert_eq!(GameStatus::Won, b.status());
}

#[test]
fn verify_flags_rejects_an_overspent_budget() {
    let mut b = Board::with_mine_layout(4, 4, &[(0, 0), (3, 3)]).expect("board");
    assert!(b.flag(1, 1));
    assert!(b.flag(1, 2));
    assert!(b.flag(1, 3));
    assert_eq!(-1, b.flags_remaining());
    assert!(!b.verify_flags());
}

#[test]
fn verify_flags_rejects_too_many_flags_around_a_number() {
    let mut b = Board::with_mine_layout(4, 4, &[(0, 0), (3, 3)]).expect("board");
    b.reveal(1, 1); // hint 1
    assert_eq!(PlayerCell::Revealed(1), b.player_cell(1, 1));
    assert!(b.flag(0, 1));
    assert!(b.flag(1, 0));
    assert_eq!(0, b.flags_remaining());
    assert!(!b.verify_flags());
}

#[test]
fn verify_flags_accepts_a_consistent_arrangement() {
    let mut b = Board::with_mine_layout(4, 4, &[(0, 0), (3, 3)]).expect("board");
    b.reveal(1, 1);
    assert!(b.flag(0, 0));
    assert!(b.verify_flags());
}
