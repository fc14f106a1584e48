//! Forbidden-move rules for the restricted color
//!
//! Checked in strict precedence order after a speculative placement:
//! 1. Exactly five in a row: always legal, whatever else the move makes
//! 2. Long connection: six or more in a row
//! 3. Double four: fours (live or dead) in two or more directions
//! 4. Double three: genuine live threes in two or more directions
//!
//! A live three must be extensible into a straight four; string shape alone
//! is not enough (see `eval::patterns`). Each direction contributes at most
//! one shape, so a single line never counts as both a four and a three.

use std::fmt;

use log::trace;

use crate::board::{Board, Direction, Pos, Stone};
use crate::eval::{shape_at, ShapeTag};

use super::cache::{CacheStats, NeighborhoodKey, VerdictCache, DEFAULT_CAPACITY};

/// Why a move is forbidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForbiddenReason {
    None,
    LongConnection,
    DoubleFour,
    DoubleThree,
}

impl fmt::Display for ForbiddenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ForbiddenReason::None => "none",
            ForbiddenReason::LongConnection => "long connection",
            ForbiddenReason::DoubleFour => "double four",
            ForbiddenReason::DoubleThree => "double three",
        };
        f.write_str(s)
    }
}

/// The line that makes a move forbidden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffendingPattern {
    /// A run of six or more
    Overline { direction: Direction, length: usize },
    /// One of the fours or live threes of a double
    Shape { direction: Direction, shape: ShapeTag },
}

/// Result of a forbidden-move check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenVerdict {
    pub is_forbidden: bool,
    pub reason: ForbiddenReason,
    /// Human-readable description (empty when legal)
    pub description: String,
    /// Offending lines, empty when legal
    pub detail: Vec<OffendingPattern>,
}

impl ForbiddenVerdict {
    #[must_use]
    pub fn legal() -> Self {
        Self {
            is_forbidden: false,
            reason: ForbiddenReason::None,
            description: String::new(),
            detail: Vec::new(),
        }
    }

    fn forbidden(
        reason: ForbiddenReason,
        description: String,
        detail: Vec<OffendingPattern>,
    ) -> Self {
        Self {
            is_forbidden: true,
            reason,
            description,
            detail,
        }
    }
}

/// Analyze a placement of `color` at `pos` without any color restriction or
/// caching. The board is read only; the placement is speculative.
///
/// An occupied cell is reported legal here; placing on it is a board error,
/// not a rule violation.
#[must_use]
pub fn analyze_forbidden(board: &Board, pos: Pos, color: Stone) -> ForbiddenVerdict {
    if color == Stone::Empty || !board.is_empty(pos) {
        return ForbiddenVerdict::legal();
    }

    let runs = Direction::ALL.map(|dir| (dir, board.count_run(pos, color, dir).len()));

    // Five takes precedence over every forbidden category
    if runs.iter().any(|&(_, len)| len == 5) {
        return ForbiddenVerdict::legal();
    }

    let overlines: Vec<OffendingPattern> = runs
        .iter()
        .filter(|&&(_, len)| len >= 6)
        .map(|&(direction, length)| OffendingPattern::Overline { direction, length })
        .collect();
    if let Some(&OffendingPattern::Overline { length, .. }) = overlines.first() {
        return ForbiddenVerdict::forbidden(
            ForbiddenReason::LongConnection,
            format!("long connection: {length} stones in a row"),
            overlines,
        );
    }

    let shapes = Direction::ALL.map(|dir| (dir, shape_at(board, pos, dir, color)));

    let fours = offending(&shapes, ShapeTag::is_four);
    if fours.len() >= 2 {
        return ForbiddenVerdict::forbidden(
            ForbiddenReason::DoubleFour,
            "double four: two fours formed at once".to_string(),
            fours,
        );
    }

    let threes = offending(&shapes, |s| s == ShapeTag::LiveThree);
    if threes.len() >= 2 {
        return ForbiddenVerdict::forbidden(
            ForbiddenReason::DoubleThree,
            "double three: two live threes formed at once".to_string(),
            threes,
        );
    }

    ForbiddenVerdict::legal()
}

fn offending(
    shapes: &[(Direction, ShapeTag); 4],
    pred: impl Fn(ShapeTag) -> bool,
) -> Vec<OffendingPattern> {
    shapes
        .iter()
        .filter(|&&(_, shape)| pred(shape))
        .map(|&(direction, shape)| OffendingPattern::Shape { direction, shape })
        .collect()
}

/// Forbidden-move detector bound to one restricted color, with a per-game
/// verdict cache.
///
/// # Example
///
/// ```
/// use renju::board::{Board, Pos, Stone};
/// use renju::rules::{ForbiddenReason, RuleEngine};
///
/// let mut board = Board::new();
/// for (r, c) in [(6, 7), (8, 7), (7, 6), (7, 8)] {
///     board.place(Pos::new(r, c), Stone::Black)?;
/// }
///
/// let mut rules = RuleEngine::new(Stone::Black);
/// let verdict = rules.check_forbidden_move(&board, Pos::new(7, 7), Stone::Black);
/// assert_eq!(verdict.reason, ForbiddenReason::DoubleThree);
/// assert!(!rules.is_forbidden(&board, Pos::new(7, 7), Stone::White));
/// # Ok::<(), renju::BoardError>(())
/// ```
#[derive(Debug)]
pub struct RuleEngine {
    restricted: Stone,
    cache: VerdictCache,
}

impl RuleEngine {
    #[must_use]
    pub fn new(restricted: Stone) -> Self {
        Self::with_capacity(restricted, DEFAULT_CAPACITY)
    }

    /// # Panics
    /// If `capacity < 2`.
    #[must_use]
    pub fn with_capacity(restricted: Stone, capacity: usize) -> Self {
        Self {
            restricted,
            cache: VerdictCache::new(capacity),
        }
    }

    /// The color subject to forbidden-move rules
    #[inline]
    pub fn restricted(&self) -> Stone {
        self.restricted
    }

    /// Full verdict for `color` playing at `pos`.
    ///
    /// Unrestricted colors and occupied cells are always legal and never
    /// touch the cache. Idempotent; the board is never modified.
    pub fn check_forbidden_move(
        &mut self,
        board: &Board,
        pos: Pos,
        color: Stone,
    ) -> ForbiddenVerdict {
        if color != self.restricted || !board.is_empty(pos) {
            return ForbiddenVerdict::legal();
        }

        let key = NeighborhoodKey::new(board, pos, color);
        if let Some(verdict) = self.cache.probe(key) {
            return verdict;
        }

        let verdict = analyze_forbidden(board, pos, color);
        if verdict.is_forbidden {
            trace!("forbidden at {pos}: {}", verdict.reason);
        }
        self.cache.store(key, verdict.clone());
        verdict
    }

    /// Shorthand for `check_forbidden_move(..).is_forbidden`
    #[inline]
    pub fn is_forbidden(&mut self, board: &Board, pos: Pos, color: Stone) -> bool {
        self.check_forbidden_move(board, pos, color).is_forbidden
    }

    /// Legal for `color`: empty and not forbidden.
    #[inline]
    pub fn is_legal(&mut self, board: &Board, pos: Pos, color: Stone) -> bool {
        board.is_empty(pos) && !self.is_forbidden(board, pos, color)
    }

    /// Drop every cached verdict. Call on every new game.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(Stone::Black)
    }
}
