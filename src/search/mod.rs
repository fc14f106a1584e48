//! Search module for the Renju AI
//!
//! Contains:
//! - Candidate generation around existing stones
//! - Minimax search with alpha-beta pruning
//! - Difficulty presets and their search policies
//! - Seedable final move selection with simulated mistakes

pub mod candidates;
pub mod minimax;
pub mod policy;
pub mod selection;

pub use candidates::{candidates, neighborhood};
pub use minimax::{Searcher, INF, WIN_SCORE};
pub use policy::{Difficulty, DifficultyPolicy};
pub use selection::{select_move, ScoredMove, MISTAKE_POOL};
