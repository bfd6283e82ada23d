//! Timestamps as the backend sends them: ISO-8601 in UTC with a `Z` suffix.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Parses `YYYY-MM-DDTHH:MM:SS[.fff]Z`. Offsets other than `Z` are rejected.
pub(crate) fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
    if !value.ends_with('Z') || value.as_bytes().get(10) != Some(&b'T') {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub(crate) fn deserialize_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_utc(&value).ok_or_else(|| {
        D::Error::custom(format!("expected an ISO-8601 UTC timestamp, got {:?}", value))
    })
}

/// Like `deserialize_utc`, but `null` is allowed. The key itself must be present.
pub(crate) fn deserialize_nullable_utc<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => parse_utc(&value).map(Some).ok_or_else(|| {
            D::Error::custom(format!("expected an ISO-8601 UTC timestamp, got {:?}", value))
        }),
    }
}
