//! Login request and the authenticated user built from its response.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::role::{Role, RoleName, check_roles};
use super::datetime::deserialize_nullable_utc;
use super::user::check_identity;
use super::{
    Schema, USERNAME_MAX_LEN, USERNAME_MIN_LEN, USERNAME_SUMMARY_MIN_LEN, check_length,
    deserialize_secret,
};
use crate::outcome::{FieldErrors, Outcome, SchemaOutcome};
use crate::policy::validate_password_with;
use crate::specials::{AllowedSpecials, allowed_specials};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecretString,
}

impl LoginRequest {
    pub(crate) fn validate_with(&self, specials: &AllowedSpecials) -> SchemaOutcome {
        self.field_errors_with(specials).into_outcome()
    }

    pub(crate) fn field_errors_with(&self, specials: &AllowedSpecials) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_length(
            &mut errors,
            "username",
            &self.username,
            USERNAME_SUMMARY_MIN_LEN,
            USERNAME_MAX_LEN,
        );
        if let Outcome::Rejected(violations) = validate_password_with(&self.password, specials) {
            errors.extend_field("password", violations.into_iter().map(|v| v.message));
        }
        errors
    }
}

impl Schema for LoginRequest {
    const NAME: &'static str = "login request";

    fn field_errors(&self) -> FieldErrors {
        self.field_errors_with(&allowed_specials())
    }
}

/// What the backend returns on a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(deserialize_with = "deserialize_nullable_utc")]
    pub last_login: Option<DateTime<Utc>>,
    pub roles: Vec<Role>,
}

impl Schema for LoginResponse {
    const NAME: &'static str = "login response";

    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
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

/// A user who has logged in. Only obtainable from a `LoginResponse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    last_login: Option<DateTime<Utc>>,
    roles: Vec<Role>,
}

impl From<LoginResponse> for AuthenticatedUser {
    fn from(response: LoginResponse) -> Self {
        Self {
            username: response.username,
            email: response.email,
            first_name: response.first_name,
            last_name: response.last_name,
            last_login: response.last_login,
            roles: response.roles,
        }
    }
}

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role(&self, name: RoleName) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(RoleName::Administrator)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
