//! Account creation request.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Deserialize;
use uuid::Uuid;

use super::{
    NAME_MAX_LEN, Schema, USERNAME_MAX_LEN, USERNAME_MIN_LEN, check_email, check_length,
    deserialize_secret, parse_uuid_v7,
};
use crate::outcome::{FieldErrors, Outcome, SchemaOutcome};
use crate::policy::{secrets_match, validate_password_with};
use crate::specials::{AllowedSpecials, allowed_specials};

/// Payload of the "create user" form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    #[serde(deserialize_with = "deserialize_secret")]
    pub raw_password: SecretString,
    #[serde(deserialize_with = "deserialize_secret")]
    pub confirm_password: SecretString,
    pub password_expiration: DateTime<Utc>,
    pub roles: Vec<String>,
}

impl CreateUserRequest {
    /// Validates every field against an explicit specials set.
    pub(crate) fn validate_with(&self, specials: &AllowedSpecials) -> SchemaOutcome {
        self.field_errors_with(specials).into_outcome()
    }

    pub(crate) fn field_errors_with(&self, specials: &AllowedSpecials) -> FieldErrors {
        let mut errors = FieldErrors::new();

        check_length(&mut errors, "firstName", &self.first_name, 1, NAME_MAX_LEN);
        check_length(&mut errors, "lastName", &self.last_name, 1, NAME_MAX_LEN);
        check_email(&mut errors, "email", &self.email);
        check_length(
            &mut errors,
            "username",
            &self.username,
            USERNAME_MIN_LEN,
            USERNAME_MAX_LEN,
        );

        for (path, password) in [
            ("rawPassword", &self.raw_password),
            ("confirmPassword", &self.confirm_password),
        ] {
            if let Outcome::Rejected(violations) = validate_password_with(password, specials) {
                errors.extend_field(path, violations.into_iter().map(|v| v.message));
            }
        }
        // A mismatch belongs to confirmPassword, never to rawPassword.
        if !secrets_match(&self.raw_password, &self.confirm_password) {
            errors.add("confirmPassword", "passwords must match");
        }

        // password_expiration is a DateTime, so it is valid once decoded.

        for (index, role) in self.roles.iter().enumerate() {
            if parse_uuid_v7(role).is_none() {
                errors.add(format!("roles[{}]", index), "must be a valid UUIDv7");
            }
        }

        errors
    }

    /// Parsed role identifiers, skipping any that are not valid UUIDv7.
    pub fn role_ids(&self) -> Vec<Uuid> {
        self.roles.iter().filter_map(|r| parse_uuid_v7(r)).collect()
    }
}

impl Schema for CreateUserRequest {
    const NAME: &'static str = "create user request";

    fn field_errors(&self) -> FieldErrors {
        self.field_errors_with(&allowed_specials())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fixtures::*;
    use chrono::TimeZone;
    use serial_test::serial;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn valid_request() -> CreateUserRequest {
        CreateUserRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
            raw_password: secret("AAbb11!!"),
            confirm_password: secret("AAbb11!!"),
            password_expiration: Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap(),
            roles: vec![ROLE_ID.to_string(), OTHER_ROLE_ID.to_string()],
        }
    }

    fn messages(outcome: &SchemaOutcome, path: &str) -> Vec<String> {
        outcome
            .violations()
            .and_then(|e| e.get(path))
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_request_accepted() {
        let request = valid_request();
        assert_eq!(request.validate_with(&AllowedSpecials::default()), Outcome::Accepted);
        assert_eq!(request.role_ids().len(), 2);
    }

    #[test]
    fn test_confirmation_mismatch_attaches_to_confirm_password() {
        let mut request = valid_request();
        request.confirm_password = secret("AAbb11!?");

        let outcome = request.validate_with(&AllowedSpecials::default());
        let errors = outcome.violations().unwrap();
        assert_eq!(errors.paths().collect::<Vec<_>>(), vec!["confirmPassword"]);
        assert_eq!(messages(&outcome, "confirmPassword"), vec!["passwords must match"]);
    }

    #[test]
    fn test_password_violations_reported_per_field() {
        let mut request = valid_request();
        request.raw_password = secret("Abb11!!c");
        request.confirm_password = secret("Abb11!!c");

        let outcome = request.validate_with(&AllowedSpecials::default());
        let expected = vec!["password must contain at least two uppercase letters".to_string()];
        assert_eq!(messages(&outcome, "rawPassword"), expected);
        assert_eq!(messages(&outcome, "confirmPassword"), expected);
    }

    #[test]
    fn test_weak_mismatched_confirmation_gets_both_kinds() {
        let mut request = valid_request();
        request.confirm_password = secret("aabb11!!");

        let outcome = request.validate_with(&AllowedSpecials::default());
        assert!(messages(&outcome, "rawPassword").is_empty());
        assert_eq!(
            messages(&outcome, "confirmPassword"),
            vec![
                "password must contain at least two uppercase letters".to_string(),
                "passwords must match".to_string(),
            ]
        );
    }

    #[test]
    fn test_every_failing_field_reported() {
        let request = CreateUserRequest {
            first_name: String::new(),
            last_name: "x".repeat(51),
            email: "not-an-email".to_string(),
            username: String::new(),
            raw_password: secret(""),
            confirm_password: secret(""),
            password_expiration: Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap(),
            roles: vec![ROLE_ID.to_string(), V4_ID.to_string(), "admin".to_string()],
        };

        let outcome = request.validate_with(&AllowedSpecials::default());
        let errors = outcome.violations().unwrap();
        assert_eq!(
            errors.paths().collect::<Vec<_>>(),
            vec![
                "confirmPassword",
                "email",
                "firstName",
                "lastName",
                "rawPassword",
                "roles[1]",
                "roles[2]",
                "username",
            ]
        );
        // Empty passwords match each other but miss four rules each.
        assert_eq!(messages(&outcome, "rawPassword").len(), 4);
        assert_eq!(messages(&outcome, "confirmPassword").len(), 4);
        assert_eq!(request.role_ids(), vec![Uuid::parse_str(ROLE_ID).unwrap()]);
    }

    #[test]
    fn test_username_limits_for_creation() {
        let mut request = valid_request();
        request.username = "a".to_string();
        assert!(request.validate_with(&AllowedSpecials::default()).is_accepted());

        request.username = "a".repeat(51);
        let outcome = request.validate_with(&AllowedSpecials::default());
        assert_eq!(messages(&outcome, "username"), vec!["must be at most 50 characters"]);
    }

    #[test]
    fn test_decode_camel_case_payload() {
        let json = format!(
            r#"{{
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "username": "ada",
                "rawPassword": "AAbb11!!",
                "confirmPassword": "AAbb11!!",
                "passwordExpiration": "2027-01-01T00:00:00Z",
                "roles": ["{}"]
            }}"#,
            ROLE_ID
        );

        let request = CreateUserRequest::decode(&json).unwrap();
        assert_eq!(request.username, "ada");
        assert_eq!(
            request.password_expiration,
            Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap()
        );
        assert!(request.validate_with(&AllowedSpecials::default()).is_accepted());
    }

    #[test]
    fn test_decode_rejects_invalid_expiration() {
        let json = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "username": "ada",
            "rawPassword": "AAbb11!!",
            "confirmPassword": "AAbb11!!",
            "passwordExpiration": "next tuesday",
            "roles": []
        }"#;

        let result = CreateUserRequest::decode(json);
        assert!(matches!(
            result,
            Err(crate::schema::DecodeError::Json { schema: "create user request", .. })
        ));
    }

    #[test]
    fn test_debug_output_redacts_passwords() {
        let debug = format!("{:?}", valid_request());
        assert!(!debug.contains("AAbb11!!"));
    }

    #[test]
    #[serial]
    fn test_validate_uses_installed_set() {
        crate::specials::reset_allowed_specials_for_testing();
        crate::specials::init_allowed_specials_from("#%").unwrap();

        let outcome = valid_request().validate();
        assert_eq!(
            messages(&outcome, "rawPassword"),
            vec!["password must contain at least 2 special characters from: #%"]
        );

        crate::specials::reset_allowed_specials_for_testing();
    }
}
