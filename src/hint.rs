//! Move advice for a human player
//!
//! Ranks a handful of cells for `color` using the same classifier, rule
//! engine and searcher the AI uses. Never modifies the board.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};
use crate::error::PolicyError;
use crate::eval::{best_shape_at, evaluate_position, PatternScore, ShapeTag};
use crate::rules::{find_winning_move, RuleEngine};
use crate::search::{candidates, DifficultyPolicy, Searcher, WIN_SCORE};

/// How hard the ranker looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintLevel {
    Basic,
    #[default]
    Standard,
    Deep,
}

impl HintLevel {
    pub const ALL: [HintLevel; 3] = [HintLevel::Basic, HintLevel::Standard, HintLevel::Deep];

    /// Plies searched after the suggested move (0 = static value only)
    pub fn depth(self) -> u32 {
        match self {
            HintLevel::Basic => 0,
            HintLevel::Standard => 1,
            HintLevel::Deep => 2,
        }
    }

    /// Suggestions analyzed and returned
    pub fn analysis_count(self) -> usize {
        match self {
            HintLevel::Basic => 3,
            HintLevel::Standard => 5,
            HintLevel::Deep => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HintLevel::Basic => "basic",
            HintLevel::Standard => "standard",
            HintLevel::Deep => "deep",
        }
    }

    fn search_policy(self) -> DifficultyPolicy {
        DifficultyPolicy {
            search_depth: self.depth(),
            candidate_limit: self.analysis_count() + 2,
            error_rate: 0.0,
            use_pattern_search: true,
            enhanced_defense: false,
        }
    }
}

impl fmt::Display for HintLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HintLevel {
    type Err = PolicyError;

    /// Case-insensitive name, or the level's index (`"0"`..`"2"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if let Ok(idx) = key.parse::<usize>() {
            return Self::ALL
                .get(idx)
                .copied()
                .ok_or_else(|| PolicyError::UnknownKey(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|l| l.name() == key)
            .ok_or_else(|| PolicyError::UnknownKey(s.to_string()))
    }
}

/// Suggestion category, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityClass {
    Win,
    Forbidden,
    CriticalDefense,
    Attack,
    Defense,
    GoodAttack,
    Normal,
}

impl PriorityClass {
    /// Fixed confidence, 0..=100
    pub fn confidence(self) -> u8 {
        match self {
            PriorityClass::Win => 100,
            PriorityClass::Forbidden => 0,
            PriorityClass::CriticalDefense => 95,
            PriorityClass::Attack => 85,
            PriorityClass::Defense => 75,
            PriorityClass::GoodAttack => 65,
            PriorityClass::Normal => 50,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PriorityClass::Win => "win",
            PriorityClass::Forbidden => "forbidden",
            PriorityClass::CriticalDefense => "critical_defense",
            PriorityClass::Attack => "attack",
            PriorityClass::Defense => "defense",
            PriorityClass::GoodAttack => "good_attack",
            PriorityClass::Normal => "normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub pos: Pos,
    pub priority: PriorityClass,
    pub confidence: u8,
    pub description: String,
    /// Raw ranking score
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hint {
    /// Best first; empty when nothing worth playing was found
    pub suggestions: Vec<Suggestion>,
    pub explanation: String,
}

/// Rank suggestions for `color` on `board`.
pub fn rank_hints(rules: &mut RuleEngine, board: &Board, color: Stone, level: HintLevel) -> Hint {
    let opponent = color.opponent();
    let count = level.analysis_count();

    let mut picks: Vec<(Pos, Option<i32>)> = Vec::with_capacity(count * 2);
    if let Some(win) = find_winning_move(rules, board, color) {
        picks.push((win, Some(WIN_SCORE)));
    }
    if let Some(block) = find_winning_move(rules, board, opponent) {
        picks.push((block, Some(WIN_SCORE / 2)));
    }
    for pos in candidates(board, count * 2) {
        if board.is_empty(pos) && evaluate_position(board, pos) > 0 {
            picks.push((pos, None));
        }
    }

    let policy = level.search_policy();
    let mut seen = HashSet::new();
    let mut suggestions = Vec::with_capacity(picks.len());
    for (pos, fixed_score) in picks {
        if !seen.insert(pos) {
            continue;
        }
        suggestions.push(analyze(rules, &policy, board, pos, color, fixed_score));
    }

    // Stable: equal scores keep win / block / candidate order
    suggestions.sort_by(|a, b| b.score.cmp(&a.score));
    suggestions.truncate(count);

    let explanation = explain(&suggestions);
    debug!("hint for {color:?} at {level}: {} suggestions", suggestions.len());
    Hint {
        suggestions,
        explanation,
    }
}

fn analyze(
    rules: &mut RuleEngine,
    policy: &DifficultyPolicy,
    board: &Board,
    pos: Pos,
    color: Stone,
    fixed_score: Option<i32>,
) -> Suggestion {
    let verdict = rules.check_forbidden_move(board, pos, color);
    let own = best_shape_at(board, pos, color);
    let threat = best_shape_at(board, pos, color.opponent());

    let (priority, description) = if own == ShapeTag::Five && !verdict.is_forbidden {
        (PriorityClass::Win, "completes five in a row".to_string())
    } else if verdict.is_forbidden {
        (PriorityClass::Forbidden, format!("forbidden move ({})", verdict.description))
    } else if threat >= ShapeTag::LiveFour {
        (PriorityClass::CriticalDefense, format!("must block the opponent's {}", threat.name()))
    } else if own >= ShapeTag::DeadFour {
        (PriorityClass::Attack, format!("attack with a {}", own.name()))
    } else if threat >= ShapeTag::LiveThree {
        (PriorityClass::Defense, format!("defend against the opponent's {}", threat.name()))
    } else if own >= ShapeTag::LiveThree {
        (PriorityClass::GoodAttack, format!("build a {}", own.name()))
    } else {
        (PriorityClass::Normal, "develop your position".to_string())
    };

    let score = match (priority, fixed_score) {
        (PriorityClass::Forbidden, _) => -PatternScore::FIVE,
        (_, Some(score)) => score,
        _ if policy.search_depth == 0 => evaluate_position(board, pos),
        _ => Searcher::new(rules, policy).score_move(board, pos, color, policy.search_depth),
    };

    Suggestion {
        pos,
        priority,
        confidence: priority.confidence(),
        description,
        score,
    }
}

fn explain(suggestions: &[Suggestion]) -> String {
    match suggestions.first() {
        None => "No promising move found.".to_string(),
        Some(best) => format!(
            "Best move {}: {} ({}% confidence). {} option(s) analyzed.",
            best.pos,
            best.description,
            best.confidence,
            suggestions.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{TOTAL_CELLS, CENTER};

    fn board_with(stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new();
        for &(r, c, s) in stones {
            board.place_stone(Pos::new(r, c), s);
        }
        board
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("deep".parse::<HintLevel>(), Ok(HintLevel::Deep));
        assert_eq!("BASIC".parse::<HintLevel>(), Ok(HintLevel::Basic));
        assert_eq!("1".parse::<HintLevel>(), Ok(HintLevel::Standard));
        assert!(matches!("expert".parse::<HintLevel>(), Err(PolicyError::UnknownKey(_))));
    }

    #[test]
    fn test_levels_grow() {
        for pair in HintLevel::ALL.windows(2) {
            assert!(pair[1].depth() > pair[0].depth());
            assert!(pair[1].analysis_count() > pair[0].analysis_count());
        }
    }

    #[test]
    fn test_confidence_table() {
        assert_eq!(PriorityClass::Win.confidence(), 100);
        assert_eq!(PriorityClass::Forbidden.confidence(), 0);
        assert!(PriorityClass::CriticalDefense.confidence() > PriorityClass::Attack.confidence());
        assert!(PriorityClass::GoodAttack.confidence() > PriorityClass::Normal.confidence());
    }

    #[test]
    fn test_full_board_has_no_suggestions() {
        let mut board = Board::new();
        for idx in 0..TOTAL_CELLS {
            // Pattern with no five for either side: alternate colors in pairs of columns per row
            let pos = Pos::from_index(idx);
            let stone = if (pos.col / 2 + pos.row) % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            board.place_stone(pos, stone);
        }
        let mut rules = RuleEngine::default();
        let hint = rank_hints(&mut rules, &board, Stone::Black, HintLevel::Deep);
        assert!(hint.suggestions.is_empty());
        assert_eq!(hint.explanation, "No promising move found.");
    }

    #[test]
    fn test_empty_board_suggests_center() {
        let mut rules = RuleEngine::default();
        let hint = rank_hints(&mut rules, &Board::new(), Stone::Black, HintLevel::Basic);
        assert_eq!(hint.suggestions.len(), 1);
        assert_eq!(hint.suggestions[0].pos, CENTER);
        assert_eq!(hint.suggestions[0].priority, PriorityClass::Normal);
    }

    #[test]
    fn test_win_ranked_first() {
        let board = board_with(&[
            (7, 3, Stone::Black),
            (7, 4, Stone::Black),
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (7, 2, Stone::White),
            // White threatens too
            (10, 3, Stone::White),
            (10, 4, Stone::White),
            (10, 5, Stone::White),
            (10, 6, Stone::White),
            (10, 2, Stone::Black),
        ]);
        for level in HintLevel::ALL {
            let mut rules = RuleEngine::default();
            let hint = rank_hints(&mut rules, &board, Stone::Black, level);
            let first = &hint.suggestions[0];
            assert_eq!(first.pos, Pos::new(7, 7), "level {level}");
            assert_eq!(first.priority, PriorityClass::Win);
            assert_eq!(first.confidence, 100);
            assert!(hint.suggestions.len() <= level.analysis_count());
            assert!(hint.explanation.contains("(7, 7)"));
        }
    }

    #[test]
    fn test_block_is_critical_defense() {
        let board = board_with(&[
            (7, 3, Stone::White),
            (7, 4, Stone::White),
            (7, 5, Stone::White),
            (7, 6, Stone::White),
            (7, 2, Stone::Black),
            (3, 3, Stone::Black),
        ]);
        let mut rules = RuleEngine::default();
        let hint = rank_hints(&mut rules, &board, Stone::Black, HintLevel::Standard);
        let first = &hint.suggestions[0];
        assert_eq!(first.pos, Pos::new(7, 7));
        assert_eq!(first.priority, PriorityClass::CriticalDefense);
    }

    #[test]
    fn test_forbidden_cell_flagged_and_ranked_low() {
        let board = board_with(&[
            (6, 7, Stone::Black),
            (8, 7, Stone::Black),
            (7, 6, Stone::Black),
            (7, 8, Stone::Black),
            (9, 9, Stone::White),
        ]);
        let mut rules = RuleEngine::default();
        let policy = HintLevel::Deep.search_policy();
        let s = analyze(&mut rules, &policy, &board, Pos::new(7, 7), Stone::Black, None);
        assert_eq!(s.priority, PriorityClass::Forbidden);
        assert_eq!(s.confidence, 0);
        assert_eq!(s.score, -PatternScore::FIVE);
        assert!(s.description.contains("double three"));

        let hint = rank_hints(&mut rules, &board, Stone::Black, HintLevel::Deep);
        assert_ne!(hint.suggestions[0].pos, Pos::new(7, 7), "forbidden cell is never the top hint");

        // White is unrestricted: the same cell is a good blocking point
        let s = analyze(&mut rules, &policy, &board, Pos::new(7, 7), Stone::White, None);
        assert_eq!(s.priority, PriorityClass::Defense);
    }

    #[test]
    fn test_hint_does_not_mutate_board() {
        let board = board_with(&[(7, 7, Stone::Black), (7, 8, Stone::White)]);
        let snapshot = board;
        let mut rules = RuleEngine::default();
        let _ = rank_hints(&mut rules, &board, Stone::White, HintLevel::Deep);
        assert_eq!(board, snapshot);
    }
}
