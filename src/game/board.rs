use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, CELL_EMPTY, CELL_HIT, CELL_MISS, CELL_OCCUPIED, TOTAL_BOTS};
use crate::error::{AppError, Result};

/// Wire grid: N x N array of small integers (0=Empty, 1=Occupied, 2=Hit, 3=Miss).
pub type Grid = [[u8; BOARD_SIZE]; BOARD_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Occupied,
    Hit,
    Miss,
}

impl CellState {
    pub fn code(self) -> u8 {
        match self {
            CellState::Empty => CELL_EMPTY,
            CellState::Occupied => CELL_OCCUPIED,
            CellState::Hit => CELL_HIT,
            CellState::Miss => CELL_MISS,
        }
    }
}

/// A 5x5 grid of cell states. Used both for a player's own board (which may
/// contain Occupied cells) and for attack overlays (which never do).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[CellState; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Board {
            cells: [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }
}

impl Board {
    /// Decodes a placement grid, accepting only boards with exactly
    /// `TOTAL_BOTS` Occupied cells and every other cell Empty. Hit/Miss
    /// markers in a placement payload are rejected outright.
    pub fn from_placement(grid: &Grid) -> Result<Self> {
        let mut board = Board::default();
        let mut occupied = 0usize;

        for (x, row) in grid.iter().enumerate() {
            for (y, code) in row.iter().enumerate() {
                match *code {
                    CELL_EMPTY => {}
                    CELL_OCCUPIED => {
                        board.cells[x][y] = CellState::Occupied;
                        occupied += 1;
                    }
                    other => {
                        return Err(AppError::InvalidPlacement(format!(
                            "unexpected cell value {} at ({}, {})",
                            other, x, y
                        )));
                    }
                }
            }
        }

        if occupied != TOTAL_BOTS {
            return Err(AppError::InvalidPlacement(format!(
                "expected exactly {} bots, got {}",
                TOTAL_BOTS, occupied
            )));
        }

        Ok(board)
    }

    pub fn get(&self, x: usize, y: usize) -> CellState {
        self.cells[x][y]
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) {
        self.cells[x][y] = state;
    }

    /// Bots still hidden on this board. Hit cells no longer count.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == CellState::Occupied)
            .count()
    }

    pub fn to_grid(&self) -> Grid {
        let mut grid = [[CELL_EMPTY; BOARD_SIZE]; BOARD_SIZE];
        for (x, row) in self.cells.iter().enumerate() {
            for (y, cell) in row.iter().enumerate() {
                grid[x][y] = cell.code();
            }
        }
        grid
    }
}

pub fn in_bounds(x: usize, y: usize) -> bool {
    x < BOARD_SIZE && y < BOARD_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_grid() -> Grid {
        let mut grid = [[0u8; BOARD_SIZE]; BOARD_SIZE];
        grid[0][2] = 1;
        grid[2][0] = 1;
        grid[2][3] = 1;
        grid[3][1] = 1;
        grid[4][2] = 1;
        grid
    }

    #[test]
    fn accepts_exact_bot_count() {
        let board = Board::from_placement(&valid_grid()).unwrap();
        assert_eq!(board.occupied_count(), TOTAL_BOTS);
        assert_eq!(board.get(2, 0), CellState::Occupied);
        assert_eq!(board.get(0, 0), CellState::Empty);
    }

    #[test]
    fn rejects_too_few_bots() {
        let mut grid = valid_grid();
        grid[0][2] = 0;
        let err = Board::from_placement(&grid).unwrap_err();
        assert!(matches!(err, AppError::InvalidPlacement(_)));
    }

    #[test]
    fn rejects_too_many_bots() {
        let mut grid = valid_grid();
        grid[1][1] = 1;
        let err = Board::from_placement(&grid).unwrap_err();
        assert!(matches!(err, AppError::InvalidPlacement(_)));
    }

    #[test]
    fn rejects_hit_and_miss_markers() {
        let mut grid = valid_grid();
        grid[0][0] = 2;
        assert!(matches!(
            Board::from_placement(&grid).unwrap_err(),
            AppError::InvalidPlacement(_)
        ));

        let mut grid = valid_grid();
        grid[0][0] = 3;
        assert!(matches!(
            Board::from_placement(&grid).unwrap_err(),
            AppError::InvalidPlacement(_)
        ));
    }

    #[test]
    fn grid_round_trip_uses_wire_codes() {
        let mut board = Board::from_placement(&valid_grid()).unwrap();
        board.set(0, 2, CellState::Hit);
        board.set(0, 0, CellState::Miss);

        let grid = board.to_grid();
        assert_eq!(grid[0][2], CELL_HIT);
        assert_eq!(grid[0][0], CELL_MISS);
        assert_eq!(grid[2][0], CELL_OCCUPIED);
        assert_eq!(grid[1][1], CELL_EMPTY);
    }

    #[test]
    fn hit_cells_leave_occupied_count() {
        let mut board = Board::from_placement(&valid_grid()).unwrap();
        board.set(0, 2, CellState::Hit);
        assert_eq!(board.occupied_count(), TOTAL_BOTS - 1);
    }

    #[test]
    fn bounds_check() {
        assert!(in_bounds(0, 0));
        assert!(in_bounds(4, 4));
        assert!(!in_bounds(5, 0));
        assert!(!in_bounds(0, 5));
    }
}
