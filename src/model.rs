//! Student record and request payload.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Store-assigned identifier.
pub type StudentId = i64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
}

/// Body of create and update requests. An `id` sent by the client is accepted and ignored;
/// identifiers only ever come from the store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl StudentPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Student {
    pub fn from_payload(id: StudentId, payload: &StudentPayload) -> Self {
        Self {
            id,
            name: payload.name.clone(),
            email: payload.email.clone(),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student{{id={}, name='{}', email='{}'}}",
            self.id, self.name, self.email
        )
    }
}
