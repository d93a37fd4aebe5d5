use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::error::GameError;
use crate::point_set::PointSet;
use crate::stone::Stone;

/// Serialized board snapshot: row-major cells plus dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: Vec<i8>,
    pub cols: u8,
    pub rows: u8,
}

/// A rectangular Go board stored as a flat row-major array.
///
/// Cells hold +1 (black), -1 (white) or 0 (empty). Dimensions are fixed
/// for the board's lifetime. The scoring core only reads the board; the
/// mutators exist for the play-phase collaborator and test setup.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: Vec<i8>,
    cols: u8,
    rows: u8,
}

impl Board {
    /// Build a board from a rows x cols matrix of cell values.
    pub fn new(cells: Vec<Vec<i8>>) -> Self {
        let rows = cells.len() as u8;
        let cols = if rows == 0 { 0 } else { cells[0].len() as u8 };

        assert!(
            cells.iter().all(|row| row.len() == cols as usize),
            "malformed board matrix"
        );

        Board {
            cells: cells.into_iter().flatten().collect(),
            cols,
            rows,
        }
    }

    /// An empty board with the given dimensions.
    pub fn with_dimensions(cols: u8, rows: u8) -> Self {
        Board {
            cells: vec![0i8; cols as usize * rows as usize],
            cols,
            rows,
        }
    }

    /// Restore a board from a serialized snapshot.
    pub fn from_state(state: BoardState) -> Self {
        assert_eq!(
            state.cells.len(),
            state.cols as usize * state.rows as usize,
            "malformed board state"
        );
        Board {
            cells: state.cells,
            cols: state.cols,
            rows: state.rows,
        }
    }

    pub fn state(&self) -> BoardState {
        BoardState {
            cells: self.cells.clone(),
            cols: self.cols,
            rows: self.rows,
        }
    }

    // -- Accessors --

    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    pub fn on_board(&self, (col, row): Point) -> bool {
        col < self.cols && row < self.rows
    }

    /// The stone at a point, or `None` for an empty cell. Off-board
    /// points also read as `None`; use [`Board::cell`] where the caller
    /// needs bounds rejected.
    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        if self.on_board(point) {
            Stone::from_int(self.cells[self.idx(point)])
        } else {
            None
        }
    }

    /// Bounds-checked cell read.
    pub fn cell(&self, point: Point) -> Result<Option<Stone>, GameError> {
        self.check(point)?;
        Ok(Stone::from_int(self.cells[self.idx(point)]))
    }

    // -- Mutators (play-phase collaborator seam) --

    pub fn set_stone(&mut self, point: Point, stone: Stone) -> Result<(), GameError> {
        self.check(point)?;
        let i = self.idx(point);
        self.cells[i] = stone.to_int();
        Ok(())
    }

    pub fn clear_stone(&mut self, point: Point) -> Result<(), GameError> {
        self.check(point)?;
        let i = self.idx(point);
        self.cells[i] = 0;
        Ok(())
    }

    // -- Connectivity --

    /// The 4-connected neighbors that are on the board.
    pub fn neighbors(&self, (col, row): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if col > 0 {
            result.push((col - 1, row));
        }
        if col + 1 < self.cols {
            result.push((col + 1, row));
        }
        if row > 0 {
            result.push((col, row - 1));
        }
        if row + 1 < self.rows {
            result.push((col, row + 1));
        }
        result
    }

    /// Flood-fill the maximal 4-connected region of cells sharing the
    /// seed's state: a same-colored stone group for an occupied seed, the
    /// connected empty area for an empty one.
    ///
    /// Explicit worklist with a visited bitset; each point is pushed at
    /// most once past the visited check, so ring-shaped regions that wind
    /// back on themselves terminate, and the result is independent of
    /// traversal order.
    pub fn region(&self, seed: Point) -> Result<PointSet, GameError> {
        self.check(seed)?;

        let target = self.cells[self.idx(seed)].signum();
        let mut visited = vec![false; self.cells.len()];
        let mut region = PointSet::new();
        let mut stack = vec![seed];

        while let Some(p) = stack.pop() {
            let pi = self.idx(p);
            if visited[pi] {
                continue;
            }
            visited[pi] = true;
            region.insert(p);
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                if self.cells[ni].signum() == target && !visited[ni] {
                    stack.push(n);
                }
            }
        }

        Ok(region)
    }

    // -- Internal helpers --

    #[inline]
    fn idx(&self, (col, row): Point) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    fn check(&self, point: Point) -> Result<(), GameError> {
        if self.on_board(point) {
            Ok(())
        } else {
            Err(GameError::OutOfRange {
                point,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }
}
