//! Board structure and line-scanning primitives

use super::bitboard::Bitboard;
use super::{Direction, Pos, Stone, TOTAL_CELLS};
use crate::error::BoardError;

/// Game board: one bitboard per color.
///
/// `Board` is `Copy`; speculative placement always works on a copy, so the
/// caller's board is never touched by search, rule checks or hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

/// Result of scanning a contiguous run outward from a cell along one direction.
///
/// The cell itself is not read; `len()` counts it as part of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunInfo {
    pub forward: usize,
    pub backward: usize,
    /// Run ends at the board edge or an opposing stone (forward side)
    pub forward_blocked: bool,
    /// Run ends at the board edge or an opposing stone (backward side)
    pub backward_blocked: bool,
}

impl RunInfo {
    /// Run length including the scanned cell
    #[inline]
    pub fn len(&self) -> usize {
        self.forward + self.backward + 1
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Get stone at position. Off-board positions read as empty.
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is an empty cell of this board
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        pos.in_bounds() && !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone. The only legal mutation of a real game board.
    ///
    /// # Errors
    /// `BoardError::OutOfBounds` if `pos` lies off the board,
    /// `BoardError::OccupiedCell` if the cell already holds a stone.
    pub fn place(&mut self, pos: Pos, stone: Stone) -> Result<(), BoardError> {
        debug_assert_ne!(stone, Stone::Empty, "placing an empty stone");
        if !pos.in_bounds() {
            return Err(BoardError::OutOfBounds {
                row: pos.row.into(),
                col: pos.col.into(),
            });
        }
        if !self.is_empty(pos) {
            return Err(BoardError::OccupiedCell(pos));
        }
        self.place_stone(pos, stone);
        Ok(())
    }

    /// Place by raw coordinates, validating bounds first.
    ///
    /// # Errors
    /// `BoardError::OutOfBounds` or `BoardError::OccupiedCell`.
    pub fn place_at(&mut self, row: i32, col: i32, stone: Stone) -> Result<Pos, BoardError> {
        let pos = Pos::try_new(row, col)?;
        self.place(pos, stone)?;
        Ok(pos)
    }

    /// Unchecked placement for speculative copies
    #[inline]
    pub(crate) fn place_stone(&mut self, pos: Pos, stone: Stone) {
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    /// Copy of this board with one extra stone on an empty cell.
    #[inline]
    pub(crate) fn with_stone(&self, pos: Pos, stone: Stone) -> Board {
        debug_assert!(self.is_empty(pos), "speculative placement on {pos}");
        let mut next = *self;
        next.place_stone(pos, stone);
        next
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Iterate over every occupied cell, black stones first
    pub fn occupied(&self) -> impl Iterator<Item = Pos> {
        self.black.iter_ones().chain(self.white.iter_ones())
    }

    /// Iterate over every empty cell in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..TOTAL_CELLS)
            .map(Pos::from_index)
            .filter(move |&p| self.is_empty(p))
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// No empty cell left (a draw unless someone already won)
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == TOTAL_CELLS
    }

    /// Count `color` stones outward from `pos` in both senses of `dir`.
    ///
    /// Stops at the first non-matching cell or the edge; the cell at `pos` is not
    /// read, so this answers "what if `color` stood here" without a copy.
    pub fn count_run(&self, pos: Pos, color: Stone, dir: Direction) -> RunInfo {
        let (dr, dc) = dir.delta();
        let (forward, forward_blocked) = self.scan(pos, color, dr, dc);
        let (backward, backward_blocked) = self.scan(pos, color, -dr, -dc);
        RunInfo {
            forward,
            backward,
            forward_blocked,
            backward_blocked,
        }
    }

    fn scan(&self, pos: Pos, color: Stone, dr: i32, dc: i32) -> (usize, bool) {
        let mut count = 0;
        let mut cur = pos;
        loop {
            match cur.offset(dr, dc) {
                Some(next) if self.get(next) == color => {
                    count += 1;
                    cur = next;
                }
                Some(next) => return (count, self.get(next) != Stone::Empty),
                None => return (count, true),
            }
        }
    }

    /// True if a `color` stone at `pos` would sit in a run of five or more.
    #[inline]
    pub fn has_five_at(&self, pos: Pos, color: Stone) -> bool {
        Direction::ALL
            .iter()
            .any(|&dir| self.count_run(pos, color, dir).len() >= 5)
    }
}
