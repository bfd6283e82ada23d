//! Password policy rules
//!
//! Each rule checks one composition requirement. `RULES` fixes the order in
//! which rules run and in which their violations are reported.

mod printable;
mod special;
mod variety;

use serde::{Deserialize, Serialize};

use crate::specials::{AllowedSpecials, allowed_specials};

pub use printable::printable_rule;
pub use special::special_rule;
pub use variety::{digit_rule, lowercase_rule, uppercase_rule};

/// Minimum number of characters each counted class must contribute.
pub const MIN_CLASS_COUNT: usize = 2;

/// Result type for rule functions.
/// - `Some(message)` - rule violated
/// - `None` - rule satisfied
pub type RuleResult = Option<String>;

pub type RuleFn = fn(&str, &AllowedSpecials) -> RuleResult;

/// The policy, in reporting order.
pub const RULES: [(PolicyRule, RuleFn); 5] = [
    (PolicyRule::AsciiPrintable, printable_rule),
    (PolicyRule::Uppercase, uppercase_rule),
    (PolicyRule::Lowercase, lowercase_rule),
    (PolicyRule::Digit, digit_rule),
    (PolicyRule::Special, special_rule),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyRule {
    AsciiPrintable,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl PolicyRule {
    pub const ALL: [PolicyRule; 5] = [
        PolicyRule::AsciiPrintable,
        PolicyRule::Uppercase,
        PolicyRule::Lowercase,
        PolicyRule::Digit,
        PolicyRule::Special,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PolicyRule::AsciiPrintable => "ascii_printable",
            PolicyRule::Uppercase => "uppercase",
            PolicyRule::Lowercase => "lowercase",
            PolicyRule::Digit => "digit",
            PolicyRule::Special => "special",
        }
    }

    /// Human-readable text for a violation of this rule, naming the
    /// process-wide allowed specials set where relevant.
    pub fn message(self) -> String {
        self.message_for(&allowed_specials())
    }

    /// The special-character message lists `specials` verbatim, so it always
    /// names the same set the rule counts against.
    pub(crate) fn message_for(self, specials: &AllowedSpecials) -> String {
        match self {
            PolicyRule::AsciiPrintable => "only ASCII printable characters (33-126)".to_string(),
            PolicyRule::Uppercase => {
                "password must contain at least two uppercase letters".to_string()
            }
            PolicyRule::Lowercase => {
                "password must contain at least two lowercase letters".to_string()
            }
            PolicyRule::Digit => {
                format!("password must contain at least {} digits", MIN_CLASS_COUNT)
            }
            PolicyRule::Special => format!(
                "password must contain at least {} special characters from: {}",
                MIN_CLASS_COUNT, specials
            ),
        }
    }

    /// Runs this rule against `password`.
    pub(crate) fn evaluate(self, password: &str, specials: &AllowedSpecials) -> RuleResult {
        let rule_fn = RULES[self as usize].1;
        rule_fn(password, specials)
    }
}
