use axum::{
    extract::State,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::auth::dto::{LoginRequest, RegisterRequest};
use crate::auth::services;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = services::register(&state, &payload.username, &payload.password).await?;
    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(ApiResponse::created("User registered successfully", user))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let data = services::login(&state, &payload.username, &payload.password).await?;
    info!(user_id = data.user.id, username = %data.user.username, "user logged in");
    Ok(ApiResponse::ok("Login successful", data))
}
