//! Active session listing.

use serde::{Deserialize, Serialize};

use super::Schema;
use super::user::UserBase;
use crate::outcome::FieldErrors;

/// A user together with the number of sessions they currently hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub user: UserBase,
    pub active_sessions: i64,
}

impl Schema for SessionSummary {
    const NAME: &'static str = "session summary";

    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.merge_nested("user", self.user.field_errors());
        errors
    }
}
