//! Evaluation module for Renju positions
//!
//! This module provides pattern recognition and scoring for board positions.
//! The evaluation considers:
//! - Line shapes through each stone (fives, fours, threes, twos, ones)
//! - Threat amplification for shapes at or above a live three
//! - Positional bonuses (center control)

pub mod heuristic;
pub mod patterns;

pub use heuristic::{
    best_shape_at, evaluate, evaluate_board, evaluate_position, pattern_score_at,
    placement_score, EvalWeights,
};
pub use patterns::{classify, shape_at, window_at, window_placed, LineCell, PatternScore, ShapeTag};
