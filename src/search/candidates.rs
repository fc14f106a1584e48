//! Candidate move generation
//!
//! Branching is limited to empty cells within Chebyshev distance 2 of some
//! stone, ranked by the static value of the cell for both sides.

use crate::board::{Board, Pos, BOARD_SIZE, CENTER};
use crate::eval::evaluate_position;

/// Chebyshev radius around existing stones
pub const NEIGHBOR_RADIUS: i32 = 2;

/// Empty cells near any stone, deduplicated, in discovery order.
#[must_use]
pub fn neighborhood(board: &Board) -> Vec<Pos> {
    let mut moves = Vec::with_capacity(64);
    let mut seen = [[false; BOARD_SIZE]; BOARD_SIZE];

    for pos in board.occupied() {
        for dr in -NEIGHBOR_RADIUS..=NEIGHBOR_RADIUS {
            for dc in -NEIGHBOR_RADIUS..=NEIGHBOR_RADIUS {
                let Some(p) = pos.offset(dr, dc) else {
                    continue;
                };
                let seen_cell = &mut seen[p.row as usize][p.col as usize];
                if *seen_cell {
                    continue;
                }
                *seen_cell = true;
                if board.is_empty(p) {
                    moves.push(p);
                }
            }
        }
    }
    moves
}

/// Up to `limit` candidate moves, best static value first.
///
/// An empty board yields only the center. Every returned cell is empty.
///
/// # Example
///
/// ```
/// use renju::board::{Board, Pos};
/// use renju::search::candidates;
///
/// assert_eq!(candidates(&Board::new(), 10), vec![Pos::new(7, 7)]);
/// ```
#[must_use]
pub fn candidates(board: &Board, limit: usize) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![CENTER];
    }

    let mut scored: Vec<(Pos, i32)> = neighborhood(board)
        .into_iter()
        .map(|p| (p, evaluate_position(board, p)))
        .collect();
    // Stable sort: equal scores keep discovery order
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(limit);

    debug_assert!(
        scored.iter().all(|&(p, _)| board.is_empty(p)),
        "candidate generator returned an occupied cell"
    );
    scored.into_iter().map(|(p, _)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Stone;

    #[test]
    fn test_empty_board_center_only() {
        assert_eq!(candidates(&Board::new(), 15), vec![CENTER]);
    }

    #[test]
    fn test_single_stone_neighborhood() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        let moves = neighborhood(&board);
        assert_eq!(moves.len(), 24, "5x5 block minus the stone");
        assert!(moves.iter().all(|p| p.distance(Pos::new(7, 7)) <= 2));
    }

    #[test]
    fn test_corner_neighborhood_clipped() {
        let mut board = Board::new();
        board.place_stone(Pos::new(0, 0), Stone::White);
        assert_eq!(neighborhood(&board).len(), 8, "3x3 block minus the stone");
    }

    #[test]
    fn test_overlapping_neighborhoods_deduplicated() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::White);
        let moves = neighborhood(&board);
        // 5x6 block minus two stones
        assert_eq!(moves.len(), 28);
        let mut sorted = moves.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), moves.len());
    }

    #[test]
    fn test_candidates_limit_and_order() {
        let mut board = Board::new();
        for c in 5..8 {
            board.place_stone(Pos::new(7, c), Stone::Black);
        }
        let moves = candidates(&board, 5);
        assert_eq!(moves.len(), 5);
        let scores: Vec<i32> = moves.iter().map(|&p| evaluate_position(&board, p)).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "descending: {scores:?}");
        // Extending the open three is the most valuable cell
        assert!(moves[..2].contains(&Pos::new(7, 4)) && moves[..2].contains(&Pos::new(7, 8)));
    }

    #[test]
    fn test_candidates_never_occupied() {
        let mut board = Board::new();
        for (r, c, s) in [(7, 7, Stone::Black), (8, 8, Stone::White), (6, 8, Stone::Black)] {
            board.place_stone(Pos::new(r, c), s);
        }
        for p in candidates(&board, 100) {
            assert!(board.is_empty(p), "{p} is occupied");
        }
    }
}
