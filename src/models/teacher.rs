use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the teacher directory, keyed by username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub username: String,
    pub display_name: String,
    /// Free-form ("teacher", "admin", ...). Not used for access decisions.
    pub role: String,
}

/// A requester whose identity was found in the teacher directory.
/// Only `AuthService::authorize` hands these out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub display_name: String,
    pub role: String,
}

impl From<Teacher> for AuthenticatedUser {
    fn from(t: Teacher) -> Self {
        Self {
            username: t.username,
            display_name: t.display_name,
            role: t.role,
        }
    }
}

/// Query params carrying the asserted identity.
#[derive(Debug, Default, Deserialize)]
pub struct IdentityQuery {
    pub username: Option<String>,
}
