//! Difficulty presets and the search policy they select

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::eval::EvalWeights;

/// Named difficulty presets, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Novice,
    #[default]
    Apprentice,
    Journeyman,
    /// Strictest: never skips a block, forced defense enabled
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Novice,
        Difficulty::Apprentice,
        Difficulty::Journeyman,
        Difficulty::Master,
    ];

    #[must_use]
    pub fn policy(self) -> DifficultyPolicy {
        match self {
            Difficulty::Novice => DifficultyPolicy {
                search_depth: 1,
                candidate_limit: 8,
                error_rate: 0.3,
                use_pattern_search: false,
                enhanced_defense: false,
            },
            Difficulty::Apprentice => DifficultyPolicy {
                search_depth: 2,
                candidate_limit: 10,
                error_rate: 0.15,
                use_pattern_search: false,
                enhanced_defense: false,
            },
            Difficulty::Journeyman => DifficultyPolicy {
                search_depth: 2,
                candidate_limit: 12,
                error_rate: 0.05,
                use_pattern_search: true,
                enhanced_defense: false,
            },
            Difficulty::Master => DifficultyPolicy {
                search_depth: 3,
                candidate_limit: 15,
                error_rate: 0.0,
                use_pattern_search: true,
                enhanced_defense: true,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Novice => "novice",
            Difficulty::Apprentice => "apprentice",
            Difficulty::Journeyman => "journeyman",
            Difficulty::Master => "master",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = PolicyError;

    /// Case-insensitive name, or the preset's index (`"0"`..`"3"`).
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
            .find(|d| d.name() == key)
            .ok_or_else(|| PolicyError::UnknownKey(s.to_string()))
    }
}

/// Search parameters for one game. Immutable once the game starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyPolicy {
    /// Plies searched, counting the root move
    pub search_depth: u32,
    /// Candidates kept per node
    pub candidate_limit: usize,
    /// Probability of a simulated mistake, in `[0, 1]`
    pub error_rate: f64,
    /// Center weighting and threat amplification in evaluation
    pub use_pattern_search: bool,
    /// Block the opponent's strongest developing shape even without a win threat
    pub enhanced_defense: bool,
}

impl DifficultyPolicy {
    /// Build a custom policy.
    ///
    /// # Errors
    /// `PolicyError::Invalid` if `candidate_limit` is 0 or `error_rate` is
    /// outside `[0, 1]`.
    pub fn new(
        search_depth: u32,
        candidate_limit: usize,
        error_rate: f64,
        use_pattern_search: bool,
        enhanced_defense: bool,
    ) -> Result<Self, PolicyError> {
        if candidate_limit == 0 {
            return Err(PolicyError::Invalid("candidate_limit must be > 0".to_string()));
        }
        if !(0.0..=1.0).contains(&error_rate) {
            return Err(PolicyError::Invalid(format!(
                "error_rate must be within [0, 1], got {error_rate}"
            )));
        }
        Ok(Self {
            search_depth,
            candidate_limit,
            error_rate,
            use_pattern_search,
            enhanced_defense,
        })
    }

    #[must_use]
    pub fn eval_weights(&self) -> EvalWeights {
        if self.use_pattern_search {
            EvalWeights::PATTERN
        } else {
            EvalWeights::PLAIN
        }
    }
}

impl Default for DifficultyPolicy {
    fn default() -> Self {
        Difficulty::default().policy()
    }
}

impl From<Difficulty> for DifficultyPolicy {
    fn from(d: Difficulty) -> Self {
        d.policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_strictly_stronger() {
        for pair in Difficulty::ALL.windows(2) {
            let (weak, strong) = (pair[0].policy(), pair[1].policy());
            assert!(strong.search_depth >= weak.search_depth);
            assert!(strong.candidate_limit > weak.candidate_limit);
            assert!(strong.error_rate < weak.error_rate);
        }
        let master = Difficulty::Master.policy();
        assert_eq!(master.error_rate, 0.0);
        assert!(master.enhanced_defense);
        assert!(Difficulty::ALL[..3].iter().all(|d| !d.policy().enhanced_defense));
    }

    #[test]
    fn test_parse_names_and_indices() {
        assert_eq!("master".parse::<Difficulty>(), Ok(Difficulty::Master));
        assert_eq!(" Journeyman ".parse::<Difficulty>(), Ok(Difficulty::Journeyman));
        assert_eq!("0".parse::<Difficulty>(), Ok(Difficulty::Novice));
        assert_eq!(
            "grandmaster".parse::<Difficulty>(),
            Err(PolicyError::UnknownKey("grandmaster".to_string()))
        );
        assert!("4".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
    }

    #[test]
    fn test_custom_policy_validation() {
        assert!(DifficultyPolicy::new(2, 10, 0.5, false, false).is_ok());
        assert!(matches!(
            DifficultyPolicy::new(2, 0, 0.5, false, false),
            Err(PolicyError::Invalid(_))
        ));
        assert!(DifficultyPolicy::new(2, 10, 1.5, false, false).is_err());
        assert!(DifficultyPolicy::new(2, 10, f64::NAN, false, false).is_err());
    }

    #[test]
    fn test_eval_weights_follow_pattern_flag() {
        assert_eq!(Difficulty::Novice.policy().eval_weights(), EvalWeights::PLAIN);
        assert_eq!(Difficulty::Master.policy().eval_weights(), EvalWeights::PATTERN);
    }
}
