//! Win condition checking
//!
//! Five in a row wins. The restricted color needs exactly five: an overline
//! is a forbidden move for it, never a win. The other color wins with five
//! or more.

use crate::board::{Board, Direction, Pos, Stone};

use super::forbidden::RuleEngine;

/// Every empty cell where `color` would complete five or more.
#[must_use]
pub fn winning_moves(board: &Board, color: Stone) -> Vec<Pos> {
    board
        .empty_cells()
        .filter(|&pos| board.has_five_at(pos, color))
        .collect()
}

/// First winning cell for `color` that is also legal for it.
///
/// For the restricted color this skips overlines, which are forbidden.
pub fn find_winning_move(rules: &mut RuleEngine, board: &Board, color: Stone) -> Option<Pos> {
    winning_moves(board, color)
        .into_iter()
        .find(|&pos| !rules.is_forbidden(board, pos, color))
}

/// Does the line through the existing `color` stone at `pos` make a winning run?
#[inline]
fn wins_through(board: &Board, pos: Pos, color: Stone, restricted: Stone) -> bool {
    Direction::ALL.iter().any(|&dir| {
        let len = board.count_run(pos, color, dir).len();
        if color == restricted {
            len == 5
        } else {
            len >= 5
        }
    })
}

/// Check if the game has a winner.
///
/// Returns `Some(Stone)` for the side holding a winning line, `None` otherwise.
/// A full board with no winner is a draw; see `Board::is_full`.
#[must_use]
pub fn find_winner(board: &Board, restricted: Stone) -> Option<Stone> {
    [Stone::Black, Stone::White].into_iter().find(|&color| {
        board.stones(color).is_some_and(|stones| {
            stones
                .iter_ones()
                .any(|pos| wins_through(board, pos, color, restricted))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(board: &mut Board, cells: &[(u8, u8)], color: Stone) {
        for &(r, c) in cells {
            board.place_stone(Pos::new(r, c), color);
        }
    }

    #[test]
    fn test_winning_moves_open_four() {
        let mut board = Board::new();
        line(&mut board, &[(7, 4), (7, 5), (7, 6), (7, 7)], Stone::White);
        let wins = winning_moves(&board, Stone::White);
        assert_eq!(wins, vec![Pos::new(7, 3), Pos::new(7, 8)]);
        assert!(winning_moves(&board, Stone::Black).is_empty());
    }

    #[test]
    fn test_winning_moves_gap() {
        let mut board = Board::new();
        line(&mut board, &[(2, 2), (3, 3), (5, 5), (6, 6)], Stone::Black);
        assert_eq!(winning_moves(&board, Stone::Black), vec![Pos::new(4, 4)]);
    }

    #[test]
    fn test_find_winning_move_skips_overline_for_restricted() {
        let mut board = Board::new();
        // B B B B _ B: (7,8) makes six
        line(&mut board, &[(7, 4), (7, 5), (7, 6), (7, 7), (7, 9)], Stone::Black);
        board.place_stone(Pos::new(7, 3), Stone::White);
        let mut rules = RuleEngine::new(Stone::Black);
        assert_eq!(winning_moves(&board, Stone::Black), vec![Pos::new(7, 8)]);
        assert_eq!(find_winning_move(&mut rules, &board, Stone::Black), None);

        // White is free to make six
        let mut white_board = Board::new();
        line(&mut white_board, &[(7, 4), (7, 5), (7, 6), (7, 7), (7, 9)], Stone::White);
        assert_eq!(
            find_winning_move(&mut rules, &white_board, Stone::White),
            Some(Pos::new(7, 3))
        );
    }

    #[test]
    fn test_find_winner_five() {
        let mut board = Board::new();
        line(&mut board, &[(0, 10), (1, 11), (2, 12), (3, 13), (4, 14)], Stone::Black);
        assert_eq!(find_winner(&board, Stone::Black), Some(Stone::Black));
    }

    #[test]
    fn test_find_winner_anti_diagonal() {
        let mut board = Board::new();
        line(&mut board, &[(10, 0), (9, 1), (8, 2), (7, 3), (6, 4)], Stone::White);
        assert_eq!(find_winner(&board, Stone::Black), Some(Stone::White));
    }

    #[test]
    fn test_overline_wins_only_for_unrestricted() {
        let cells = [(9, 0), (9, 1), (9, 2), (9, 3), (9, 4), (9, 5)];
        let mut black = Board::new();
        line(&mut black, &cells, Stone::Black);
        assert_eq!(find_winner(&black, Stone::Black), None);

        let mut white = Board::new();
        line(&mut white, &cells, Stone::White);
        assert_eq!(find_winner(&white, Stone::Black), Some(Stone::White));
    }

    #[test]
    fn test_no_winner() {
        let mut board = Board::new();
        line(&mut board, &[(7, 7), (7, 8), (7, 9), (7, 10)], Stone::Black);
        assert_eq!(find_winner(&board, Stone::Black), None);
        assert_eq!(find_winner(&Board::new(), Stone::Black), None);
    }
}
