use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Errors that end a single request. None of them affect the process.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Serialization(e) => {
                tracing::error!(error = %e, "Failed to serialize response");
                self.to_string()
            }
            _ => {
                tracing::error!("Internal error: {:?}", self);
                "Internal server error".to_string()
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}
