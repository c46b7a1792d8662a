use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] recipebox_shared::Error),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use recipebox_shared::Error;

        let (status, error) = match &self {
            AppError::Domain(Error::Validate(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
            }
            AppError::Domain(Error::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Domain(Error::User(_)) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            AppError::Domain(Error::Server(_)) | AppError::Domain(Error::Unknown(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let message = if status.is_server_error() {
            tracing::error!(err = ?self, "request failed");
            "An unexpected error occurred. Please try again later.".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": error, "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let (status, json) =
            body(recipebox_shared::Error::NotFound("recipe 7".to_owned()).into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "recipe 7 not found");
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let err = recipebox_shared::Error::Unknown(anyhow::anyhow!("disk on fire"));
        let (status, json) = body(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!json["message"].as_str().unwrap().contains("disk"));
    }

    #[tokio::test]
    async fn test_user_error_maps_to_400() {
        let (status, _) = body(AppError::BadRequest("month 13".to_owned())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
