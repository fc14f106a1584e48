//! Static description of the forbidden-move rules, for help screens

use super::forbidden::ForbiddenReason;

/// One forbidden category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEntry {
    pub reason: ForbiddenReason,
    pub name: &'static str,
    pub description: &'static str,
    pub example: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleExplanation {
    pub title: &'static str,
    pub summary: &'static str,
    pub rules: [RuleEntry; 3],
    pub notes: [&'static str; 3],
}

static EXPLANATION: RuleExplanation = RuleExplanation {
    title: "Forbidden moves",
    summary: "Forbidden-move rules apply only to Black, the first player. White may play anywhere.",
    rules: [
        RuleEntry {
            reason: ForbiddenReason::LongConnection,
            name: "Long connection",
            description: "Black may not make a line of six or more stones.",
            example: "\u{25cf}\u{25cf}\u{25cf}\u{25cf}\u{25cf}\u{25cf} (six or more)",
        },
        RuleEntry {
            reason: ForbiddenReason::DoubleFour,
            name: "Double four",
            description: "Black may not make two fours (live or dead) with one move.",
            example: "a single move that forms two fours at once",
        },
        RuleEntry {
            reason: ForbiddenReason::DoubleThree,
            name: "Double three",
            description: "Black may not make two live threes with one move.",
            example: "a single move that forms two live threes at once",
        },
    ],
    notes: [
        "If a move makes five and a forbidden shape at the same time, the five wins.",
        "White is never restricted by forbidden-move rules.",
        "Black loses immediately by playing a forbidden move.",
    ],
};

/// The three forbidden categories, as plain data
#[must_use]
pub fn rule_explanation() -> &'static RuleExplanation {
    &EXPLANATION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explanation_covers_each_reason_once() {
        let exp = rule_explanation();
        let reasons: Vec<_> = exp.rules.iter().map(|r| r.reason).collect();
        assert_eq!(
            reasons,
            vec![
                ForbiddenReason::LongConnection,
                ForbiddenReason::DoubleFour,
                ForbiddenReason::DoubleThree
            ]
        );
        assert!(exp.notes[0].contains("five"));
    }

    #[test]
    fn test_explanation_is_shared_static() {
        assert!(std::ptr::eq(rule_explanation(), rule_explanation()));
        assert_eq!(rule_explanation().rules[0].name, "Long connection");
    }
}
