//! User records as returned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::{Role, RoleName, check_roles};
use super::datetime::{deserialize_nullable_utc, deserialize_utc};
use super::{
    NAME_MAX_LEN, Schema, USERNAME_MAX_LEN, USERNAME_MIN_LEN, USERNAME_SUMMARY_MIN_LEN,
    check_email, check_length, check_uuid_v7, deserialize_uuid,
};
use crate::outcome::FieldErrors;

/// Identity fields shared by every user-shaped record.
pub(crate) fn check_identity(
    errors: &mut FieldErrors,
    username: &str,
    username_min: usize,
    email: &str,
    first_name: &str,
    last_name: &str,
) {
    check_length(errors, "username", username, username_min, USERNAME_MAX_LEN);
    check_email(errors, "email", email);
    check_length(errors, "firstName", first_name, 1, NAME_MAX_LEN);
    check_length(errors, "lastName", last_name, 1, NAME_MAX_LEN);
}

/// Summary of a user, as embedded in session listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBase {
    #[serde(deserialize_with = "deserialize_uuid")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_disabled: bool,
    #[serde(deserialize_with = "deserialize_nullable_utc")]
    pub last_login: Option<DateTime<Utc>>,
}

impl Schema for UserBase {
    const NAME: &'static str = "user summary";

    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_uuid_v7(&mut errors, "id", &self.id);
        check_identity(
            &mut errors,
            &self.username,
            USERNAME_SUMMARY_MIN_LEN,
            &self.email,
            &self.first_name,
            &self.last_name,
        );
        errors
    }
}

/// Full user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "deserialize_uuid")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(deserialize_with = "deserialize_nullable_utc")]
    pub last_login: Option<DateTime<Utc>>,
    pub failed_login_attempts: i64,
    #[serde(deserialize_with = "deserialize_nullable_utc")]
    pub last_failed_login_attempt: Option<DateTime<Utc>>,
    pub is_disabled: bool,
    #[serde(deserialize_with = "deserialize_utc")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_utc")]
    pub updated_at: DateTime<Utc>,
    pub roles: Vec<Role>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn has_role(&self, name: RoleName) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }
}

impl Schema for User {
    const NAME: &'static str = "user";

    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_uuid_v7(&mut errors, "id", &self.id);
        check_identity(
            &mut errors,
            &self.username,
            USERNAME_MIN_LEN,
            &self.email,
            &self.first_name,
            &self.last_name,
        );
        check_roles(&mut errors, "roles", &self.roles);
        errors
    }
}
