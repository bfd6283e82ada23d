//! Allowed specials management module
//!
//! Holds the process-wide set of punctuation characters that count toward
//! the special-character rule. The set is installed once and never replaced,
//! so the rule's predicate and its message always describe the same set.

use serde::Serialize;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

use crate::charclass::is_ascii_printable;

/// Environment variable overriding the built-in set.
pub const SPECIALS_ENV_VAR: &str = "MAINFRAME_ALLOWED_SPECIALS";

/// Built-in set used when nothing else is configured.
pub const DEFAULT_ALLOWED_SPECIALS: &str = "!@#$%^&*()-_=+?";

static ALLOWED_SPECIALS: RwLock<Option<AllowedSpecials>> = RwLock::new(None);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpecialsError {
    #[error("Allowed specials set is empty")]
    Empty,
    #[error("Allowed special {0:?} is not ASCII printable (33-126)")]
    NotPrintable(char),
    #[error("Allowed special {0:?} is a letter or digit")]
    Alphanumeric(char),
}

/// An ordered, duplicate-free set of special characters.
///
/// Members are ASCII printable and never letters or digits, so a special
/// character can only ever count toward the special-character rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowedSpecials {
    chars: String,
}

impl AllowedSpecials {
    /// Parses a set from its textual form, e.g. `"!@#$"`.
    ///
    /// Duplicates collapse; first-occurrence order is kept.
    pub fn parse(set: &str) -> Result<Self, SpecialsError> {
        let mut chars = String::new();
        for c in set.chars() {
            if !is_ascii_printable(c) {
                return Err(SpecialsError::NotPrintable(c));
            }
            if c.is_ascii_alphanumeric() {
                return Err(SpecialsError::Alphanumeric(c));
            }
            if !chars.contains(c) {
                chars.push(c);
            }
        }

        if chars.is_empty() {
            return Err(SpecialsError::Empty);
        }
        Ok(Self { chars })
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(c)
    }

    pub fn as_str(&self) -> &str {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Default for AllowedSpecials {
    fn default() -> Self {
        Self {
            chars: DEFAULT_ALLOWED_SPECIALS.to_string(),
        }
    }
}

impl fmt::Display for AllowedSpecials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chars)
    }
}

/// Returns the textual set to install.
///
/// Priority:
/// 1. Environment variable `MAINFRAME_ALLOWED_SPECIALS`
/// 2. `DEFAULT_ALLOWED_SPECIALS`
pub fn configured_specials() -> String {
    std::env::var(SPECIALS_ENV_VAR)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| DEFAULT_ALLOWED_SPECIALS.to_string())
}

/// Installs the process-wide set from the environment.
///
/// Call once at startup. If a set is already installed it is returned
/// unchanged.
///
/// # Errors
///
/// Returns error if the configured set is empty or contains a character
/// that is not printable ASCII or is a letter or digit.
///
/// # Example
///
/// ```rust,ignore
/// unsafe { std::env::set_var("MAINFRAME_ALLOWED_SPECIALS", "!@#$%"); }
/// let specials = mainframe_validation::init_allowed_specials()?;
/// assert_eq!(specials.as_str(), "!@#$%");
/// ```
pub fn init_allowed_specials() -> Result<AllowedSpecials, SpecialsError> {
    init_allowed_specials_from(&configured_specials())
}

/// Installs the process-wide set from an explicit textual form.
///
/// Use this when the set comes from somewhere other than the environment,
/// such as a server-provided policy document.
pub fn init_allowed_specials_from(set: &str) -> Result<AllowedSpecials, SpecialsError> {
    if let Some(installed) = installed() {
        if installed.as_str() != set {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Allowed specials already installed as {:?}, ignoring {:?}",
                installed.as_str(),
                set
            );
        }
        return Ok(installed);
    }

    let specials = match AllowedSpecials::parse(set) {
        Ok(specials) => specials,
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Allowed specials initialization FAILED: {}", e);
            return Err(e);
        }
    };

    Ok(install(specials))
}

/// Returns the process-wide set, installing the default if nothing has been
/// installed yet.
pub fn allowed_specials() -> AllowedSpecials {
    match installed() {
        Some(specials) => specials,
        None => install(AllowedSpecials::default()),
    }
}

fn installed() -> Option<AllowedSpecials> {
    ALLOWED_SPECIALS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

// First writer wins; a concurrent loser gets the winner's set back.
fn install(specials: AllowedSpecials) -> AllowedSpecials {
    let mut guard = ALLOWED_SPECIALS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let installed = guard.get_or_insert_with(|| {
        #[cfg(feature = "tracing")]
        tracing::info!("Allowed specials initialized: {:?}", specials.as_str());
        specials
    });
    installed.clone()
}

/// Clears the installed set for testing purposes.
#[cfg(test)]
pub fn reset_allowed_specials_for_testing() {
    let mut guard = ALLOWED_SPECIALS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to safely set env var in tests
    fn set_env(key: &str, value: &str) {
        // SAFETY: serialized tests, no other thread reads the environment
        unsafe { std::env::set_var(key, value); }
    }

    /// Helper to safely remove env var in tests
    fn remove_env(key: &str) {
        // SAFETY: serialized tests, no other thread reads the environment
        unsafe { std::env::remove_var(key); }
    }

    #[test]
    fn test_parse_keeps_first_occurrence_order() {
        let specials = AllowedSpecials::parse("!?!#?").unwrap();
        assert_eq!(specials.as_str(), "!?#");
        assert_eq!(specials.len(), 3);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(AllowedSpecials::parse(""), Err(SpecialsError::Empty));
    }

    #[test]
    fn test_parse_rejects_non_printable() {
        assert_eq!(
            AllowedSpecials::parse("! "),
            Err(SpecialsError::NotPrintable(' '))
        );
        assert_eq!(
            AllowedSpecials::parse("§"),
            Err(SpecialsError::NotPrintable('§'))
        );
    }

    #[test]
    fn test_parse_rejects_alphanumeric() {
        assert_eq!(
            AllowedSpecials::parse("!a"),
            Err(SpecialsError::Alphanumeric('a'))
        );
        assert_eq!(
            AllowedSpecials::parse("7"),
            Err(SpecialsError::Alphanumeric('7'))
        );
    }

    #[test]
    fn test_default_is_a_valid_set() {
        assert_eq!(
            AllowedSpecials::parse(DEFAULT_ALLOWED_SPECIALS).unwrap(),
            AllowedSpecials::default()
        );
        assert_eq!(AllowedSpecials::default().to_string(), DEFAULT_ALLOWED_SPECIALS);
    }

    #[test]
    #[serial]
    fn test_configured_specials_default() {
        remove_env(SPECIALS_ENV_VAR);
        assert_eq!(configured_specials(), DEFAULT_ALLOWED_SPECIALS);
    }

    #[test]
    #[serial]
    fn test_configured_specials_from_env() {
        set_env(SPECIALS_ENV_VAR, " #$% ");
        assert_eq!(configured_specials(), "#$%");
        remove_env(SPECIALS_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_init_from_env() {
        reset_allowed_specials_for_testing();
        set_env(SPECIALS_ENV_VAR, "#$%");

        let specials = init_allowed_specials().unwrap();
        assert_eq!(specials.as_str(), "#$%");
        assert_eq!(allowed_specials(), specials);

        remove_env(SPECIALS_ENV_VAR);
        reset_allowed_specials_for_testing();
    }

    #[test]
    #[serial]
    fn test_init_invalid_set_installs_nothing() {
        reset_allowed_specials_for_testing();
        set_env(SPECIALS_ENV_VAR, "abc");

        let result = init_allowed_specials();
        assert!(matches!(result, Err(SpecialsError::Alphanumeric('a'))));
        assert_eq!(installed(), None);

        remove_env(SPECIALS_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_first_install_wins() {
        reset_allowed_specials_for_testing();

        let first = init_allowed_specials_from("!@").unwrap();
        let second = init_allowed_specials_from("#$").unwrap();
        assert_eq!(first, second);
        assert_eq!(allowed_specials().as_str(), "!@");

        reset_allowed_specials_for_testing();
    }

    #[test]
    #[serial]
    fn test_read_before_init_installs_default() {
        reset_allowed_specials_for_testing();

        assert_eq!(allowed_specials(), AllowedSpecials::default());
        // The default is now fixed for the rest of the process.
        assert_eq!(init_allowed_specials_from("#").unwrap(), AllowedSpecials::default());

        reset_allowed_specials_for_testing();
    }
}
