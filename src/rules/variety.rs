//! Character variety section - counts uppercase, lowercase and digits.

use super::{MIN_CLASS_COUNT, PolicyRule, RuleResult};
use crate::charclass::{count, is_digit, is_lower, is_upper};
use crate::specials::AllowedSpecials;

fn class_rule(
    password: &str,
    predicate: fn(char) -> bool,
    rule: PolicyRule,
    specials: &AllowedSpecials,
) -> RuleResult {
    if count(password, predicate) >= MIN_CLASS_COUNT {
        return None;
    }
    Some(rule.message_for(specials))
}

/// At least two of `A`-`Z`.
pub fn uppercase_rule(password: &str, specials: &AllowedSpecials) -> RuleResult {
    class_rule(password, is_upper, PolicyRule::Uppercase, specials)
}

/// At least two of `a`-`z`.
pub fn lowercase_rule(password: &str, specials: &AllowedSpecials) -> RuleResult {
    class_rule(password, is_lower, PolicyRule::Lowercase, specials)
}

/// At least two of `0`-`9`.
pub fn digit_rule(password: &str, specials: &AllowedSpecials) -> RuleResult {
    class_rule(password, is_digit, PolicyRule::Digit, specials)
}
