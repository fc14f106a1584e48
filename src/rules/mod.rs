//! Game rules for Renju-style five in a row
//!
//! This module implements the rule set including:
//! - Win conditions (exactly five for the restricted color, five or more otherwise)
//! - Forbidden moves for the restricted color (long connection, double four,
//!   double three)
//! - A bounded verdict cache keyed on the lines through the queried cell

pub mod cache;
pub mod explanation;
pub mod forbidden;
pub mod win;

// Re-exports for convenient access
pub use cache::{CacheStats, NeighborhoodKey, VerdictCache, DEFAULT_CAPACITY};
pub use explanation::{rule_explanation, RuleEntry, RuleExplanation};
pub use forbidden::{
    analyze_forbidden, ForbiddenReason, ForbiddenVerdict, OffendingPattern, RuleEngine,
};
pub use win::{find_winner, find_winning_move, winning_moves};
