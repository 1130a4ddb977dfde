use axum::extract::FromRef;
use tokio::task;
use tracing::warn;

use crate::auth::dto::{LoginData, PublicUser};
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo_types::User;
use crate::error::ApiError;
use crate::state::AppState;

fn validate_registration(username: &str, password: &str) -> Result<(), ApiError> {
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Username and password are required"));
    }
    if username.len() < 3 {
        return Err(ApiError::validation(
            "Username must be at least 3 characters long",
        ));
    }
    if password.len() < 6 {
        return Err(ApiError::validation(
            "Password must be at least 6 characters long",
        ));
    }
    Ok(())
}

/// Register a new user: validate, reject taken usernames, hash, persist.
pub async fn register(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<PublicUser, ApiError> {
    validate_registration(username, password)?;

    if User::find_by_username(&state.db, username).await?.is_some() {
        warn!(username = %username, "registration with taken username");
        return Err(ApiError::conflict("Username already exists"));
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    let plain = password.to_string();
    let hash = task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| ApiError::Internal(e.into()))??;

    let user = User::create(&state.db, username, &hash).await?;
    Ok(PublicUser::from(user))
}

/// Authenticate a user and issue a bearer token. Unknown username and wrong
/// password fail identically so usernames cannot be enumerated.
pub async fn login(state: &AppState, username: &str, password: &str) -> Result<LoginData, ApiError> {
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Username and password are required"));
    }

    let user = match User::find_by_username(&state.db, username).await? {
        Some(u) => u,
        None => {
            warn!(username = %username, "login with unknown username");
            return Err(ApiError::auth("Invalid credentials"));
        }
    };

    let plain = password.to_string();
    let stored = user.password_hash.clone();
    let ok = task::spawn_blocking(move || verify_password(&plain, &stored))
        .await
        .map_err(|e| ApiError::Internal(e.into()))??;

    if !ok {
        warn!(username = %username, user_id = user.id, "login with invalid password");
        return Err(ApiError::auth("Invalid credentials"));
    }

    let keys = JwtKeys::from_ref(state);
    let token = keys.sign(user.id, &user.username)?;

    Ok(LoginData {
        token,
        user: PublicUser::from(user),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_requires_both_fields() {
        let err = validate_registration("", "secret1").unwrap_err();
        assert_eq!(err.to_string(), "Username and password are required");

        let err = validate_registration("alice123", "").unwrap_err();
        assert_eq!(err.to_string(), "Username and password are required");
    }

    #[test]
    fn registration_enforces_minimum_lengths() {
        let err = validate_registration("ab", "secret1").unwrap_err();
        assert_eq!(err.to_string(), "Username must be at least 3 characters long");

        let err = validate_registration("alice123", "12345").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters long");
    }

    #[test]
    fn registration_accepts_boundary_lengths() {
        assert!(validate_registration("abc", "secret").is_ok());
    }
}
