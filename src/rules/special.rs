//! Special character section - counts members of the allowed specials set.

use super::{MIN_CLASS_COUNT, PolicyRule, RuleResult};
use crate::charclass::count;
use crate::specials::AllowedSpecials;

/// At least two characters drawn from `specials`.
///
/// Punctuation outside the set does not count.
pub fn special_rule(password: &str, specials: &AllowedSpecials) -> RuleResult {
    if count(password, |c| specials.contains(c)) >= MIN_CLASS_COUNT {
        return None;
    }
    Some(PolicyRule::Special.message_for(specials))
}
