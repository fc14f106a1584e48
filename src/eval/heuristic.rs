//! Heuristic evaluation of board positions
//!
//! Scores come from the shape classifier, summed over every stone and every
//! direction. Windows overlap, so a shape is counted once per stone in it;
//! threats in different directions are independent and add up.

use crate::board::{Board, Direction, Pos, Stone, CENTER};

use super::patterns::{classify, window_at, window_placed, ShapeTag};

/// Tunable evaluation knobs carried by a difficulty policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    /// Bonus per stone per step closer to the center (0 disables)
    pub center_weight: i32,
    /// Percentage applied to shapes at or above a live three (100 = unchanged)
    pub threat_boost_percent: i32,
}

impl EvalWeights {
    /// Plain pattern sum
    pub const PLAIN: EvalWeights = EvalWeights {
        center_weight: 0,
        threat_boost_percent: 100,
    };

    /// Center weighting plus amplified threats
    pub const PATTERN: EvalWeights = EvalWeights {
        center_weight: 2,
        threat_boost_percent: 150,
    };

    #[inline]
    fn shape_value(&self, tag: ShapeTag) -> i32 {
        if tag >= ShapeTag::LiveThree && tag != ShapeTag::Five {
            tag.score() * self.threat_boost_percent / 100
        } else {
            tag.score()
        }
    }
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// Sum of shape scores through an existing `color` stone at `pos`.
#[must_use]
pub fn pattern_score_at(board: &Board, pos: Pos, color: Stone) -> i32 {
    Direction::ALL
        .iter()
        .map(|&dir| classify(&window_at(board, pos, dir, color)).score())
        .sum()
}

/// Sum of shape scores `color` would get by playing on the empty cell `pos`.
#[must_use]
pub fn placement_score(board: &Board, pos: Pos, color: Stone) -> i32 {
    Direction::ALL
        .iter()
        .map(|&dir| classify(&window_placed(board, pos, dir, color)).score())
        .sum()
}

/// Strongest shape `color` would get by playing on `pos`
#[must_use]
pub fn best_shape_at(board: &Board, pos: Pos, color: Stone) -> ShapeTag {
    Direction::ALL
        .iter()
        .map(|&dir| classify(&window_placed(board, pos, dir, color)))
        .max()
        .unwrap_or(ShapeTag::None)
}

/// Total value of every `color` stone on the board.
#[must_use]
pub fn evaluate_board(board: &Board, color: Stone, weights: &EvalWeights) -> i32 {
    let Some(stones) = board.stones(color) else {
        return 0;
    };

    let mut total = 0;
    for pos in stones.iter_ones() {
        for dir in Direction::ALL {
            total += weights.shape_value(classify(&window_at(board, pos, dir, color)));
        }
        if weights.center_weight != 0 {
            total += weights.center_weight * (7 - i32::from(pos.distance(CENTER)));
        }
    }
    total
}

/// Evaluate the board from the perspective of `color`.
///
/// Positive values favour `color`. Symmetric:
/// `evaluate(b, c) == -evaluate(b, c.opponent())`.
#[must_use]
pub fn evaluate(board: &Board, color: Stone, weights: &EvalWeights) -> i32 {
    evaluate_board(board, color, weights) - evaluate_board(board, color.opponent(), weights)
}

/// Static value of an empty cell: what either side would gain by playing it.
///
/// Used to order candidates, so attack and defense both count.
#[must_use]
pub fn evaluate_position(board: &Board, pos: Pos) -> i32 {
    placement_score(board, pos, Stone::Black) + placement_score(board, pos, Stone::White)
}
