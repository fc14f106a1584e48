//! Final move choice among scored root moves
//!
//! Ties at the best score are broken uniformly at random. With probability
//! `error_rate` a simulated mistake picks one of the strongest moves that are
//! not tied for best instead.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::board::Pos;

/// How many non-best moves a simulated mistake chooses from
pub const MISTAKE_POOL: usize = 4;

/// A root move with its search score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub pos: Pos,
    pub score: i32,
}

/// Pick a move from `ranked`. Returns `None` only if `ranked` is empty.
///
/// If every move ties for best, no mistake is possible and the error roll is
/// skipped.
pub fn select_move<R: Rng + ?Sized>(
    ranked: &[ScoredMove],
    error_rate: f64,
    rng: &mut R,
) -> Option<ScoredMove> {
    let best = ranked.iter().map(|m| m.score).max()?;

    let tied: Vec<ScoredMove> = ranked.iter().copied().filter(|m| m.score == best).collect();
    let mut rest: Vec<ScoredMove> = ranked.iter().copied().filter(|m| m.score != best).collect();

    if error_rate > 0.0 && !rest.is_empty() && rng.random_bool(error_rate.min(1.0)) {
        rest.sort_by(|a, b| b.score.cmp(&a.score));
        rest.truncate(MISTAKE_POOL);
        return rest.choose(rng).copied();
    }
    tied.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scored(moves: &[(u8, u8, i32)]) -> Vec<ScoredMove> {
        moves
            .iter()
            .map(|&(r, c, score)| ScoredMove {
                pos: Pos::new(r, c),
                score,
            })
            .collect()
    }

    #[test]
    fn test_empty_returns_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_move(&[], 0.5, &mut rng), None);
    }

    #[test]
    fn test_error_rate_zero_always_best() {
        let ranked = scored(&[(1, 1, 10), (2, 2, 500), (3, 3, 40)]);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let choice = select_move(&ranked, 0.0, &mut rng).map(|m| m.pos);
            assert_eq!(choice, Some(Pos::new(2, 2)));
        }
    }

    #[test]
    fn test_error_rate_one_never_best() {
        let ranked = scored(&[
            (0, 0, 900),
            (0, 1, 800),
            (0, 2, 700),
            (0, 3, 600),
            (0, 4, 500),
            (0, 5, 1),
        ]);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let choice = select_move(&ranked, 1.0, &mut rng).map(|m| m.pos);
            let choice = choice.expect("non-empty");
            assert_ne!(choice, Pos::new(0, 0), "mistake must not be the best move");
            assert!(
                choice.col >= 1 && choice.col <= 4,
                "mistake drawn from the top four: {choice}"
            );
        }
    }

    #[test]
    fn test_all_tied_skips_mistake() {
        let ranked = scored(&[(4, 4, 7), (5, 5, 7)]);
        let mut rng = StdRng::seed_from_u64(9);
        let choice = select_move(&ranked, 1.0, &mut rng).expect("non-empty");
        assert_eq!(choice.score, 7);
    }

    #[test]
    fn test_ties_broken_among_best_only() {
        let ranked = scored(&[(4, 4, 7), (5, 5, 7), (6, 6, 3)]);
        let mut seen = std::collections::HashSet::new();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let choice = select_move(&ranked, 0.0, &mut rng).expect("non-empty");
            assert_eq!(choice.score, 7);
            seen.insert(choice.pos);
        }
        assert_eq!(seen.len(), 2, "both tied moves should come up");
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let ranked = scored(&[(1, 1, 5), (2, 2, 5), (3, 3, 5), (4, 4, 1)]);
        let pick = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            select_move(&ranked, 0.5, &mut rng)
        };
        assert_eq!(pick(42), pick(42));
    }
}
