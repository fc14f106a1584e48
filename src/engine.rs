//! Main AI engine integrating rules, search and hints
//!
//! The engine finds a move through a priority system:
//!
//! 1. **Opening**: an empty board is always answered with the center
//! 2. **Immediate win**: any legal move that completes five
//! 3. **Block**: stop the opponent's immediate win (weaker presets may miss it)
//! 4. **Forced block**: strictest preset only, pre-empt the opponent's strongest
//!    developing shape
//! 5. **Minimax**: alpha-beta search over ranked candidates, then seeded
//!    selection with simulated mistakes
//!
//! # Example
//!
//! ```
//! use renju::{Board, Difficulty, Engine, Pos, Stone};
//!
//! let mut engine = Engine::with_seed(Difficulty::Novice.policy(), 7);
//! let mut board = Board::new();
//! board.place(Pos::new(7, 7), Stone::Black)?;
//!
//! let result = engine.best_move_with_stats(&board, Stone::White);
//! let reply = result.best_move.expect("board has empty cells");
//! assert!(board.is_empty(reply));
//! println!("{:?} via {:?} in {}ms", reply, result.search_type, result.time_ms);
//! # Ok::<(), renju::BoardError>(())
//! ```

use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Pos, Stone, CENTER};
use crate::config::EngineConfig;
use crate::eval::{best_shape_at, placement_score, ShapeTag};
use crate::hint::{rank_hints, Hint, HintLevel};
use crate::rules::{find_winning_move, CacheStats, ForbiddenVerdict, RuleEngine};
use crate::search::{neighborhood, select_move, DifficultyPolicy, Searcher, WIN_SCORE};

/// Which stage of the decision produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Center point on an empty board
    Opening,
    /// Completes five
    ImmediateWin,
    /// Blocks the opponent's immediate five
    Block,
    /// Pre-empts the opponent's strongest shape (strictest preset only)
    ForcedBlock,
    /// Alpha-beta search result
    Minimax,
    /// No candidate survived; first legal empty cell
    Fallback,
}

/// Result of a move search with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, `None` only when no legal move exists
    pub best_move: Option<Pos>,
    /// Score of the chosen move from the mover's point of view
    pub score: i32,
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn found(pos: Pos, score: i32, search_type: SearchType, start: Instant, nodes: u64) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type,
            time_ms: start.elapsed().as_millis() as u64,
            nodes,
        }
    }

    fn no_move(start: Instant) -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type: SearchType::Fallback,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: 0,
        }
    }
}

/// Game-session engine: one rule engine (and its verdict cache), one policy
/// and one random source.
///
/// Single-threaded. Share across threads only behind exclusive access; the
/// verdict cache is the only mutable state.
pub struct Engine {
    rules: RuleEngine,
    policy: DifficultyPolicy,
    hint_level: HintLevel,
    rng: StdRng,
}

impl Engine {
    /// Engine with Black restricted and an OS-seeded random source.
    #[must_use]
    pub fn new(policy: DifficultyPolicy) -> Self {
        Self {
            rules: RuleEngine::new(Stone::Black),
            policy,
            hint_level: HintLevel::default(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible engine: the same seed gives the same moves.
    #[must_use]
    pub fn with_seed(policy: DifficultyPolicy, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(policy)
        }
    }

    /// Build an engine from validated configuration.
    ///
    /// # Errors
    /// `ConfigError::Validation` if the configuration is invalid.
    pub fn from_config(config: &EngineConfig) -> Result<Self, crate::error::ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            rules: RuleEngine::with_capacity(config.restricted, config.cache_capacity),
            policy: config.policy(),
            hint_level: config.hint_level,
            rng,
        })
    }

    #[inline]
    pub fn policy(&self) -> &DifficultyPolicy {
        &self.policy
    }

    /// The color subject to forbidden-move rules
    #[inline]
    pub fn restricted(&self) -> Stone {
        self.rules.restricted()
    }

    /// Start a new game. Clears the verdict cache; a policy change only takes
    /// effect through here.
    pub fn new_game(&mut self, policy: DifficultyPolicy) {
        self.rules.clear_cache();
        self.policy = policy;
        info!("new game: cache cleared, policy {:?}", self.policy);
    }

    /// Best move for `ai`, or `None` if no legal cell remains.
    #[must_use]
    pub fn best_move(&mut self, board: &Board, ai: Stone) -> Option<Pos> {
        self.best_move_with_stats(board, ai).best_move
    }

    /// Best move with the stage that produced it and search statistics.
    #[must_use]
    pub fn best_move_with_stats(&mut self, board: &Board, ai: Stone) -> MoveResult {
        let start = Instant::now();
        let opponent = ai.opponent();

        // 0. Opening: no branching from an empty board
        if board.is_board_empty() {
            return MoveResult::found(CENTER, 0, SearchType::Opening, start, 1);
        }

        // 1. Immediate win
        if let Some(win) = find_winning_move(&mut self.rules, board, ai) {
            debug!("{ai:?} wins at {win}");
            return MoveResult::found(win, WIN_SCORE, SearchType::ImmediateWin, start, 1);
        }

        // 2. Block the opponent's immediate win, unless this preset slips
        if let Some(threat) = find_winning_move(&mut self.rules, board, opponent) {
            if self.rules.is_legal(board, threat, ai) {
                if self.policy.enhanced_defense || !self.roll_mistake() {
                    debug!("{ai:?} blocks five at {threat}");
                    return MoveResult::found(threat, -WIN_SCORE / 2, SearchType::Block, start, 1);
                }
                debug!("{ai:?} misses the block at {threat}");
            }
        }

        // 3. Forced block of the opponent's strongest developing shape
        if self.policy.enhanced_defense {
            if let Some((pos, shape)) = self.forced_block(board, ai) {
                debug!("{ai:?} pre-empts {} at {pos}", shape.name());
                return MoveResult::found(pos, -shape.score(), SearchType::ForcedBlock, start, 1);
            }
        }

        // 4. Minimax over candidates
        let (scored, nodes) = {
            let mut searcher = Searcher::new(&mut self.rules, &self.policy);
            let scored = searcher.score_root(board, ai, self.policy.search_depth);
            (scored, searcher.nodes())
        };
        if let Some(choice) = select_move(&scored, self.policy.error_rate, &mut self.rng) {
            debug!(
                "{ai:?} minimax picks {} (score {}, {} roots, {nodes} nodes)",
                choice.pos,
                choice.score,
                scored.len()
            );
            return MoveResult::found(choice.pos, choice.score, SearchType::Minimax, start, nodes);
        }

        // 5. Nothing ranked: any legal cell
        match board.empty_cells().find(|&p| !self.rules.is_forbidden(board, p, ai)) {
            Some(pos) => {
                debug!("{ai:?} falls back to {pos}");
                MoveResult::found(pos, 0, SearchType::Fallback, start, nodes)
            }
            None => MoveResult::no_move(start),
        }
    }

    /// Opponent placement reaching at least a live three, strongest first,
    /// that `ai` may legally occupy.
    ///
    /// Returns `None` when `ai` can itself reach an equal or stronger shape:
    /// answering a live three with a live four outranks blocking it, so that
    /// case is left to the search.
    fn forced_block(&mut self, board: &Board, ai: Stone) -> Option<(Pos, ShapeTag)> {
        let opponent = ai.opponent();
        let mut best: Option<(Pos, ShapeTag, i32)> = None;
        let mut own_best = ShapeTag::None;

        for pos in neighborhood(board) {
            if !self.rules.is_legal(board, pos, ai) {
                continue;
            }
            own_best = own_best.max(best_shape_at(board, pos, ai));

            if self.rules.is_forbidden(board, pos, opponent) {
                continue;
            }
            let shape = best_shape_at(board, pos, opponent);
            if shape < ShapeTag::LiveThree {
                continue;
            }
            let weight = placement_score(board, pos, opponent);
            let stronger = match best {
                None => true,
                Some((_, s, w)) => (shape, weight) > (s, w),
            };
            if stronger {
                best = Some((pos, shape, weight));
            }
        }

        best.filter(|&(_, shape, _)| shape > own_best)
            .map(|(pos, shape, _)| (pos, shape))
    }

    fn roll_mistake(&mut self) -> bool {
        self.policy.error_rate > 0.0 && self.rng.random_bool(self.policy.error_rate.min(1.0))
    }

    /// Forbidden-move verdict for `color` at `pos`. Idempotent, never
    /// modifies the board.
    pub fn check_forbidden_move(
        &mut self,
        board: &Board,
        pos: Pos,
        color: Stone,
    ) -> ForbiddenVerdict {
        self.rules.check_forbidden_move(board, pos, color)
    }

    /// Ranked suggestions for `color` at `level`.
    pub fn hint(&mut self, board: &Board, color: Stone, level: HintLevel) -> Hint {
        rank_hints(&mut self.rules, board, color, level)
    }

    /// Suggestions at the configured hint level
    pub fn default_hint(&mut self, board: &Board, color: Stone) -> Hint {
        let level = self.hint_level;
        self.hint(board, color, level)
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.rules.cache_stats()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DifficultyPolicy::default())
    }
}
