use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be positive")]
    EmptyBoard,
    #[error("mine count {mines} must be less than cell count {cells}")]
    TooManyMines { mines: usize, cells: usize },
    #[error("mine layout contains an out-of-bounds or duplicate coordinate")]
    InvalidMineLayout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolutionCell {
    Mine,
    Hint(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCell {
    Hidden,
    Flagged,
    Revealed(u8),
    Exploded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Pending,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Pending
    }
}

pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub struct Board {
    rows: usize,
    cols: usize,
    mines: usize,
    flags_remaining: i32,
    solution: Vec<SolutionCell>,
    player: Vec<PlayerCell>,
    mine_coords: Vec<(usize, usize)>,
    rng: StdRng,
}

impl Board {
    pub fn new(rows: usize, cols: usize, mines: usize, rng: StdRng) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyBoard);
        }
        let cells = rows * cols;
        if mines >= cells {
            return Err(BoardError::TooManyMines { mines, cells });
        }

        let mut board = Self {
            rows,
            cols,
            mines,
            flags_remaining: mines as i32,
            solution: vec![SolutionCell::Hint(0); cells],
            player: vec![PlayerCell::Hidden; cells],
            mine_coords: Vec::with_capacity(mines),
            rng,
        };
        board.place_mines();
        board.compute_hints();
        debug!("new board: {}x{} with {} mines", rows, cols, mines);
        Ok(board)
    }

    pub fn from_seed(
        rows: usize,
        cols: usize,
        mines: usize,
        seed: Option<u64>,
    ) -> Result<Self, BoardError> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self::new(rows, cols, mines, rng)
    }

    /// Builds a board with an explicit mine set instead of random placement.
    pub fn with_mine_layout(
        rows: usize,
        cols: usize,
        mines: &[(usize, usize)],
    ) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyBoard);
        }
        let cells = rows * cols;
        if mines.len() >= cells {
            return Err(BoardError::TooManyMines {
                mines: mines.len(),
                cells,
            });
        }

        let mut board = Self {
            rows,
            cols,
            mines: mines.len(),
            flags_remaining: mines.len() as i32,
            solution: vec![SolutionCell::Hint(0); cells],
            player: vec![PlayerCell::Hidden; cells],
            mine_coords: Vec::with_capacity(mines.len()),
            rng: StdRng::seed_from_u64(0),
        };
        for &(row, col) in mines {
            if !board.in_bounds(row as i32, col as i32) {
                return Err(BoardError::InvalidMineLayout);
            }
            let i = board.index(row, col);
            if board.solution[i] == SolutionCell::Mine {
                return Err(BoardError::InvalidMineLayout);
            }
            board.solution[i] = SolutionCell::Mine;
            board.mine_coords.push((row, col));
        }
        board.compute_hints();
        Ok(board)
    }

    // Rejection sampling: draw until the cell is free. Mine density stays
    // well under 50% for the supported presets, so draws settle quickly.
    fn place_mines(&mut self) {
        while self.mine_coords.len() < self.mines {
            let row = self.rng.random_range(0..self.rows);
            let col = self.rng.random_range(0..self.cols);
            let i = self.index(row, col);
            if self.solution[i] != SolutionCell::Mine {
                self.solution[i] = SolutionCell::Mine;
                self.mine_coords.push((row, col));
            }
        }
    }

    // Each mine bumps the hint of every in-bounds non-mine neighbor.
    fn compute_hints(&mut self) {
        for k in 0..self.mine_coords.len() {
            let (row, col) = self.mine_coords[k];
            for (nr, nc) in self.neighbors(row, col) {
                let i = self.index(nr, nc);
                if let SolutionCell::Hint(n) = self.solution[i] {
                    self.solution[i] = SolutionCell::Hint(n + 1);
                }
            }
        }
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(8);
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let nr = row as i32 + dr;
            let nc = col as i32 + dc;
            if self.in_bounds(nr, nc) {
                out.push((nr as usize, nc as usize));
            }
        }
        out
    }

    pub fn reveal(&mut self, row: usize, col: usize) {
        let i = self.index(row, col);
        match self.solution[i] {
            // detonation ignores flags: a flagged mine still explodes
            SolutionCell::Mine => self.player[i] = PlayerCell::Exploded,
            SolutionCell::Hint(0) => self.flood_reveal(row, col),
            SolutionCell::Hint(n) => {
                if self.player[i] == PlayerCell::Hidden {
                    self.player[i] = PlayerCell::Revealed(n);
                }
            }
        }
    }

    // Iterative flood fill over a zero-hint region and its numbered border.
    // A cell counts as visited the instant it is marked blank; the grid's
    // 8-connectivity is full of cycles back to already-queued cells.
    fn flood_reveal(&mut self, row: usize, col: usize) {
        let mut stack = vec![(row, col)];
        while let Some((r, c)) = stack.pop() {
            let i = self.index(r, c);
            match self.solution[i] {
                SolutionCell::Hint(0) => {
                    if self.player[i] == PlayerCell::Revealed(0) {
                        continue;
                    }
                    if self.player[i] == PlayerCell::Flagged {
                        // swept flags go back to the budget
                        self.flags_remaining += 1;
                    }
                    self.player[i] = PlayerCell::Revealed(0);
                    for (nr, nc) in self.neighbors(r, c) {
                        if self.player[self.index(nr, nc)] != PlayerCell::Revealed(0) {
                            stack.push((nr, nc));
                        }
                    }
                }
                SolutionCell::Hint(n) => {
                    // numbered border: uncover, but leave flags alone
                    if self.player[i] == PlayerCell::Hidden {
                        self.player[i] = PlayerCell::Revealed(n);
                    }
                }
                SolutionCell::Mine => {}
            }
        }
    }

    /// Reveals one uniformly chosen covered cell, if any remain.
    ///
    /// Enumerates candidates instead of retry-sampling: late in the game
    /// almost every cell is settled and retries would degrade badly.
    pub fn reveal_random(&mut self) {
        let mut hidden = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.player[self.index(row, col)] == PlayerCell::Hidden {
                    hidden.push((row, col));
                }
            }
        }
        if hidden.is_empty() {
            return;
        }
        let (row, col) = hidden[self.rng.random_range(0..hidden.len())];
        debug!("random reveal at ({}, {})", row, col);
        self.reveal(row, col);
    }

    pub fn flag(&mut self, row: usize, col: usize) -> bool {
        let i = self.index(row, col);
        if self.player[i] == PlayerCell::Hidden {
            self.player[i] = PlayerCell::Flagged;
            self.flags_remaining -= 1;
            return true;
        }
        false
    }

    pub fn unflag(&mut self, row: usize, col: usize) -> bool {
        let i = self.index(row, col);
        if self.player[i] == PlayerCell::Flagged {
            self.player[i] = PlayerCell::Hidden;
            self.flags_remaining += 1;
            return true;
        }
        false
    }

    pub fn toggle_flag(&mut self, row: usize, col: usize) {
        match self.player[self.index(row, col)] {
            PlayerCell::Hidden => {
                self.flag(row, col);
            }
            PlayerCell::Flagged => {
                self.unflag(row, col);
            }
            _ => {}
        }
    }

    pub fn clear_flags(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.player[self.index(row, col)] == PlayerCell::Flagged {
                    self.unflag(row, col);
                }
            }
        }
    }

    /// Checks that the current flags could still describe a solution.
    ///
    /// A necessary-condition check only: an over-spent budget or a numbered
    /// cell with more flagged neighbors than its hint is invalid, but a
    /// passing arrangement is not guaranteed to mark actual mines.
    pub fn verify_flags(&self) -> bool {
        if self.flags_remaining < 0 {
            return false;
        }
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let PlayerCell::Revealed(n @ 1..=8) = self.player[self.index(row, col)] {
                    let flagged = self
                        .neighbors(row, col)
                        .into_iter()
                        .filter(|&(r, c)| self.player[self.index(r, c)] == PlayerCell::Flagged)
                        .count();
                    if flagged > n as usize {
                        return false;
                    }
                }
            }
        }
        true
    }

    pub fn status(&self) -> GameStatus {
        let mut revealed = 0;
        for cell in &self.player {
            match cell {
                PlayerCell::Exploded => return GameStatus::Lost,
                PlayerCell::Revealed(_) => revealed += 1,
                _ => {}
            }
        }
        if revealed == self.rows * self.cols - self.mines {
            GameStatus::Won
        } else {
            GameStatus::Pending
        }
    }

    // Loss display: uncover every mine the player had not flagged.
    pub fn reveal_mines(&mut self) {
        for k in 0..self.mine_coords.len() {
            let (row, col) = self.mine_coords[k];
            let i = self.index(row, col);
            if self.player[i] != PlayerCell::Flagged {
                self.player[i] = PlayerCell::Exploded;
            }
        }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

// Public getters for encapsulation
impl Board {
    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn mine_count(&self) -> usize { self.mines }
    pub fn flags_remaining(&self) -> i32 { self.flags_remaining }
    pub fn player_cell(&self, row: usize, col: usize) -> PlayerCell {
        self.player[self.index(row, col)]
    }
    pub fn solution_cell(&self, row: usize, col: usize) -> SolutionCell {
        self.solution[self.index(row, col)]
    }
    pub fn mine_coords(&self) -> &[(usize, usize)] { &self.mine_coords }
}
