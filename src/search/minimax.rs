//! Depth-limited minimax with alpha-beta pruning
//!
//! Every ply works on its own copy of the board; nothing is undone. The
//! maximizing side is always the AI color. A forbidden move by the
//! restricted side inside the tree is scored as a loss for that side, since
//! playing it forfeits the game.
//!
//! # Example
//!
//! ```
//! use renju::board::{Board, Pos, Stone};
//! use renju::rules::RuleEngine;
//! use renju::search::{Difficulty, Searcher};
//!
//! let mut board = Board::new();
//! board.place(Pos::new(7, 7), Stone::Black)?;
//!
//! let mut rules = RuleEngine::new(Stone::Black);
//! let policy = Difficulty::Apprentice.policy();
//! let mut searcher = Searcher::new(&mut rules, &policy);
//! let scored = searcher.score_root(&board, Stone::White, policy.search_depth);
//! assert!(!scored.is_empty());
//! # Ok::<(), renju::BoardError>(())
//! ```

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate, EvalWeights, PatternScore};
use crate::rules::RuleEngine;

use super::candidates::candidates;
use super::policy::DifficultyPolicy;
use super::selection::ScoredMove;

/// Score of a decided game. Far above any static evaluation.
pub const WIN_SCORE: i32 = PatternScore::FIVE * 100;

/// Infinity score for alpha-beta bounds
pub const INF: i32 = WIN_SCORE + 1;

/// Minimax searcher borrowing the game's rule engine for legality checks.
pub struct Searcher<'a> {
    rules: &'a mut RuleEngine,
    weights: EvalWeights,
    candidate_limit: usize,
    alpha_beta: bool,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(rules: &'a mut RuleEngine, policy: &DifficultyPolicy) -> Self {
        Self {
            rules,
            weights: policy.eval_weights(),
            candidate_limit: policy.candidate_limit,
            alpha_beta: true,
            nodes: 0,
        }
    }

    /// Disable pruning. Same scores, more nodes.
    #[must_use]
    pub fn without_pruning(mut self) -> Self {
        self.alpha_beta = false;
        self
    }

    /// Nodes visited since construction
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Score every root candidate for `ai`, `depth` plies deep counting the
    /// root move itself.
    ///
    /// Forbidden root moves of the restricted color are left out, never
    /// scored. Each child gets a full window, so scores are exact.
    pub fn score_root(&mut self, board: &Board, ai: Stone, depth: u32) -> Vec<ScoredMove> {
        let mut scored = Vec::with_capacity(self.candidate_limit);
        for pos in candidates(board, self.candidate_limit) {
            if ai == self.rules.restricted() && self.rules.is_forbidden(board, pos, ai) {
                continue;
            }
            let score = self.score_move(board, pos, ai, depth.saturating_sub(1));
            scored.push(ScoredMove { pos, score });
        }
        scored
    }

    /// Value for `color` of playing `pos`, then searching `depth` more plies.
    pub fn score_move(&mut self, board: &Board, pos: Pos, color: Stone, depth: u32) -> i32 {
        let child = board.with_stone(pos, color);
        self.minimax(&child, depth, -INF, INF, false, color, Some(pos))
    }

    /// Minimax value of `board` from `ai`'s point of view.
    ///
    /// `last_move` is the stone just placed; a five through it ends the game.
    #[allow(clippy::too_many_arguments)]
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        ai: Stone,
        last_move: Option<Pos>,
    ) -> i32 {
        self.nodes += 1;

        if let Some(last) = last_move {
            let mover = board.get(last);
            debug_assert_ne!(mover, Stone::Empty, "last move {last} is empty");
            if board.has_five_at(last, mover) {
                return if mover == ai { WIN_SCORE } else { -WIN_SCORE };
            }
        }

        if depth == 0 {
            return evaluate(board, ai, &self.weights);
        }

        let to_move = if maximizing { ai } else { ai.opponent() };
        let moves = candidates(board, self.candidate_limit);
        if moves.is_empty() {
            return evaluate(board, ai, &self.weights);
        }

        let restricted = to_move == self.rules.restricted();
        if maximizing {
            let mut best = -INF;
            for pos in moves {
                let score = if restricted && self.rules.is_forbidden(board, pos, to_move) {
                    -WIN_SCORE
                } else {
                    let child = board.with_stone(pos, to_move);
                    self.minimax(&child, depth - 1, alpha, beta, false, ai, Some(pos))
                };
                best = best.max(score);
                alpha = alpha.max(best);
                if self.alpha_beta && beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INF;
            for pos in moves {
                let score = if restricted && self.rules.is_forbidden(board, pos, to_move) {
                    WIN_SCORE
                } else {
                    let child = board.with_stone(pos, to_move);
                    self.minimax(&child, depth - 1, alpha, beta, true, ai, Some(pos))
                };
                best = best.min(score);
                beta = beta.min(best);
                if self.alpha_beta && beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
