use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Success envelope shared by every endpoint except the health check.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> (StatusCode, Self) {
        (
            StatusCode::OK,
            Self {
                success: true,
                message: message.into(),
                data: Some(data),
            },
        )
    }

    /// 201 with a payload.
    pub fn created(message: impl Into<String>, data: T) -> (StatusCode, Self) {
        (
            StatusCode::CREATED,
            Self {
                success: true,
                message: message.into(),
                data: Some(data),
            },
        )
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_success_and_data() {
        let (status, body) = ApiResponse::created("Product created successfully", 42);
        assert_eq!(status, StatusCode::CREATED);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Product created successfully");
        assert_eq!(json["data"], 42);
    }
}
