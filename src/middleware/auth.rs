use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::{
    error::AppError,
    models::teacher::{AuthenticatedUser, IdentityQuery},
    AppState,
};

/// Resolves the `username` query parameter against the teacher directory.
/// Rejects with 401 when it is missing, empty or unknown.
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = Query::<IdentityQuery>::try_from_uri(&parts.uri)
            .map(|Query(q)| q)
            .unwrap_or_default();

        state.auth.authorize(identity.username.as_deref()).await
    }
}
