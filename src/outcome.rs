//! Validation outcomes.
//!
//! A rejection is an ordinary value carrying every violation found, ready
//! to be shown to a user without further parsing.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::rules::PolicyRule;

/// Accepted, or Rejected with the collected violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "violations", rename_all = "snake_case")]
pub enum Outcome<E> {
    Accepted,
    Rejected(E),
}

impl<E> Outcome<E> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted)
    }

    pub fn is_rejected(&self) -> bool {
        !self.is_accepted()
    }

    pub fn violations(&self) -> Option<&E> {
        match self {
            Outcome::Accepted => None,
            Outcome::Rejected(violations) => Some(violations),
        }
    }

    pub fn into_result(self) -> Result<(), E> {
        match self {
            Outcome::Accepted => Ok(()),
            Outcome::Rejected(violations) => Err(violations),
        }
    }
}

/// One violated password rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: PolicyRule,
    pub message: String,
}

/// Outcome of validating a single password.
pub type PasswordOutcome = Outcome<Vec<Violation>>;

/// Violation messages keyed by field path (`email`, `roles[2]`, `user.username`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

/// Outcome of validating a request or record.
pub type SchemaOutcome = Outcome<FieldErrors>;

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    /// Appends `messages` to `path`. A field with no messages is not recorded.
    pub fn extend_field<I>(&mut self, path: &str, messages: I)
    where
        I: IntoIterator<Item = String>,
    {
        for message in messages {
            self.add(path, message);
        }
    }

    /// Merges a nested record's errors under `prefix.`.
    pub fn merge_nested(&mut self, prefix: &str, nested: FieldErrors) {
        for (path, messages) in nested.0 {
            self.extend_field(&format!("{}.{}", prefix, path), messages);
        }
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_outcome(self) -> SchemaOutcome {
        if self.is_empty() {
            Outcome::Accepted
        } else {
            Outcome::Rejected(self)
        }
    }
}
