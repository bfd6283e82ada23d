//! Password policy validator - runs every rule and collects violations.

use secrecy::{ExposeSecret, SecretString};

use crate::outcome::{Outcome, PasswordOutcome, Violation};
use crate::rules::PolicyRule;
use crate::specials::{AllowedSpecials, allowed_specials};

/// Validates a password against the policy using the process-wide
/// allowed specials set.
///
/// # Returns
/// `Outcome::Accepted` if every rule holds, otherwise `Outcome::Rejected`
/// with one `Violation` per failed rule, in rule order.
pub fn validate_password(password: &SecretString) -> PasswordOutcome {
    validate_password_with(password, &allowed_specials())
}

/// Validates a password against the policy using an explicit specials set.
pub(crate) fn validate_password_with(
    password: &SecretString,
    specials: &AllowedSpecials,
) -> PasswordOutcome {
    let pwd = password.expose_secret();

    // Every rule runs; a failure never stops the ones after it.
    let violations: Vec<Violation> = PolicyRule::ALL
        .iter()
        .filter_map(|rule| {
            rule.evaluate(pwd, specials).map(|message| Violation {
                rule: *rule,
                message,
            })
        })
        .collect();

    if violations.is_empty() {
        return Outcome::Accepted;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        violated = ?violations.iter().map(|v| v.rule.name()).collect::<Vec<_>>(),
        "password rejected by policy"
    );

    Outcome::Rejected(violations)
}

/// Exact code-point equality, with no case folding or Unicode normalization.
pub fn secrets_match(password: &SecretString, confirmation: &SecretString) -> bool {
    password.expose_secret() == confirmation.expose_secret()
}
