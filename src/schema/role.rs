//! Roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Schema, check_uuid_v7, deserialize_uuid};
use crate::outcome::FieldErrors;

/// The roles the backend knows about. Unknown names fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleName {
    Administrator,
    #[serde(rename = "Basic User")]
    BasicUser,
    #[serde(rename = "Recipe User")]
    RecipeUser,
}

impl RoleName {
    pub const ALL: [RoleName; 3] = [
        RoleName::Administrator,
        RoleName::BasicUser,
        RoleName::RecipeUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoleName::Administrator => "Administrator",
            RoleName::BasicUser => "Basic User",
            RoleName::RecipeUser => "Recipe User",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(deserialize_with = "deserialize_uuid")]
    pub id: Uuid,
    pub name: RoleName,
}

impl Schema for Role {
    const NAME: &'static str = "role";

    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_uuid_v7(&mut errors, "id", &self.id);
        errors
    }
}

/// Field errors of each role, under `path[i].`.
pub(crate) fn check_roles(errors: &mut FieldErrors, path: &str, roles: &[Role]) {
    for (index, role) in roles.iter().enumerate() {
        errors.merge_nested(&format!("{}[{}]", path, index), role.field_errors());
    }
}
