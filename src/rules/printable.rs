//! Printable section - every character must be ASCII printable.

use super::{PolicyRule, RuleResult};
use crate::charclass::is_ascii_printable;
use crate::specials::AllowedSpecials;

/// Checks that every character lies in `33..=126`.
///
/// Holds vacuously for an empty password.
pub fn printable_rule(password: &str, specials: &AllowedSpecials) -> RuleResult {
    if password.chars().all(is_ascii_printable) {
        return None;
    }
    Some(PolicyRule::AsciiPrintable.message_for(specials))
}
