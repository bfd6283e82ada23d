//! Boundary schemas
//!
//! Request and record shapes exchanged with the Mainframe backend, each with
//! the field rules the backend enforces. Decoding checks types (JSON shape,
//! `Z`-suffixed timestamps, hyphenated UUID text); `validate` checks
//! everything else and reports every offending field at once.

mod create_user;
mod datetime;
mod login;
mod role;
mod session;
mod user;

use secrecy::SecretString;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use uuid::{Uuid, Variant, Version};
use validator::ValidateEmail;

use crate::outcome::{FieldErrors, SchemaOutcome};

pub use create_user::CreateUserRequest;
pub use login::{AuthenticatedUser, LoginRequest, LoginResponse};
pub use role::{Role, RoleName};
pub use session::SessionSummary;
pub use user::{User, UserBase};

pub const NAME_MAX_LEN: usize = 50;
pub const USERNAME_MAX_LEN: usize = 50;

/// Username minimum for account creation, full user records and login
/// responses.
pub const USERNAME_MIN_LEN: usize = 1;

/// Username minimum for user summaries and login requests.
// The backend contracts disagree with USERNAME_MIN_LEN; both are kept
// until the backend settles on one.
pub const USERNAME_SUMMARY_MIN_LEN: usize = 3;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed {schema} payload: {source}")]
    Json {
        schema: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A record with backend-defined field rules.
pub trait Schema: DeserializeOwned {
    /// Name used in decode errors and logs.
    const NAME: &'static str;

    /// Every violated rule, keyed by field path.
    fn field_errors(&self) -> FieldErrors;

    fn validate(&self) -> SchemaOutcome {
        let errors = self.field_errors();
        if !errors.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                schema = Self::NAME,
                fields = ?errors.paths().collect::<Vec<_>>(),
                "record rejected"
            );
        }
        errors.into_outcome()
    }

    /// Decodes a JSON payload. Field rules are not applied; call `validate`.
    fn decode(json: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(json).map_err(|source| DecodeError::Json {
            schema: Self::NAME,
            source,
        })
    }
}

/// Length in code points within `min..=max`.
pub(crate) fn check_length(
    errors: &mut FieldErrors,
    path: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    let len = value.chars().count();
    if len < min {
        if min == 1 {
            errors.add(path, "must not be empty");
        } else {
            errors.add(path, format!("must be at least {} characters", min));
        }
    }
    if len > max {
        errors.add(path, format!("must be at most {} characters", max));
    }
}

/// Dot-atom local part and a dotted hostname ending in an alphabetic TLD.
/// IP literals and single-label hosts such as `localhost` are refused.
fn is_console_email(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };
    !hosts.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
        && hosts.iter().all(|label| {
            label.starts_with(|c: char| c.is_ascii_alphanumeric())
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

pub(crate) fn check_email(errors: &mut FieldErrors, path: &str, value: &str) {
    if !value.validate_email() || !is_console_email(value) {
        errors.add(path, "must be a valid email address");
    }
}

pub(crate) fn is_uuid_v7(id: &Uuid) -> bool {
    id.get_version() == Some(Version::SortRand) && id.get_variant() == Variant::RFC4122
}

pub(crate) fn check_uuid_v7(errors: &mut FieldErrors, path: &str, id: &Uuid) {
    if !is_uuid_v7(id) {
        errors.add(path, "must be a valid UUIDv7");
    }
}

/// Parses the 36-character hyphenated UUID text form only. The simple,
/// braced and `urn:uuid:` forms are rejected.
pub(crate) fn parse_hyphenated_uuid(value: &str) -> Option<Uuid> {
    if value.len() != 36 {
        return None;
    }
    Uuid::parse_str(value).ok()
}

/// Parses the hyphenated UUID text form and requires version 7.
pub(crate) fn parse_uuid_v7(value: &str) -> Option<Uuid> {
    parse_hyphenated_uuid(value).filter(is_uuid_v7)
}

/// Decodes an id in hyphenated form. The version is left to `check_uuid_v7`
/// so a wrong version is reported as a field error.
pub(crate) fn deserialize_uuid<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_hyphenated_uuid(&value)
        .ok_or_else(|| D::Error::custom(format!("expected a hyphenated UUID, got {:?}", value)))
}

pub(crate) fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| SecretString::new(s.into_boxed_str()))
}
