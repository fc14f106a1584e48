//! Renju AI engine for five in a row on a 15x15 board
//!
//! A game engine implementing Renju-style rules:
//! - Standard 15x15 board
//! - Five in a row to win
//! - Black (the restricted color) may not play long connections, double fours
//!   or double threes; an exact five always wins
//! - White wins with five or more
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Forbidden moves, verdict cache, win detection and rule text
//! - [`eval`]: Shape classification and position evaluation
//! - [`search`]: Candidate generation, minimax, difficulty presets
//! - [`engine`]: Main AI engine integrating all components
//! - [`hint`]: Ranked move suggestions for a human player
//! - [`config`]: TOML-loadable engine settings
//!
//! # Quick Start
//!
//! ```
//! use renju::{Board, Difficulty, Engine, Pos, Stone};
//!
//! let mut board = Board::new();
//! let mut engine = Engine::with_seed(Difficulty::Apprentice.policy(), 1);
//!
//! board.place(Pos::new(7, 7), Stone::Black)?;
//!
//! // AI responds as White
//! if let Some(pos) = engine.best_move(&board, Stone::White) {
//!     board.place(pos, Stone::White)?;
//!     println!("AI plays at {pos}");
//! }
//! # Ok::<(), renju::BoardError>(())
//! ```
//!
//! # Search Priority
//!
//! The AI engine follows this search priority:
//! 1. Center on an empty board
//! 2. Immediate winning move
//! 3. Block the opponent's immediate win
//! 4. Forced block of a developing threat (strictest preset)
//! 5. Minimax with alpha-beta pruning and seeded move selection
//!
//! The library logs through the `log` facade and never installs a logger.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod hint;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Direction, Pos, Stone, BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{Engine, MoveResult, SearchType};
pub use error::{BoardError, ConfigError, PolicyError};
pub use hint::{Hint, HintLevel, PriorityClass, Suggestion};
pub use rules::{rule_explanation, ForbiddenReason, ForbiddenVerdict, RuleEngine};
pub use search::{Difficulty, DifficultyPolicy};
