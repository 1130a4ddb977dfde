use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::auth::jwt::JwtKeys;
use crate::auth::repo_types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Request guard for protected routes: validates the bearer token and
/// confirms the referenced user still exists.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::auth("Access token required"))?;

        // "Bearer <token>"
        let token = auth_header
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| ApiError::auth("Access token required"))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token)?;

        let user = User::find_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(|| ApiError::auth("Invalid token - user not found"))?;

        Ok(CurrentUser {
            id: user.id,
            username: user.username,
        })
    }
}
