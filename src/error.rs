use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}", not_found_message(.0))]
    NotFound(Option<String>),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

fn not_found_message(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("not found")
}

impl AppError {
    pub fn not_found() -> Self {
        Self::NotFound(None)
    }

    pub fn not_found_with(message: impl Into<String>) -> Self {
        Self::NotFound(Some(message.into()))
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(None) => StatusCode::NOT_FOUND.into_response(),
            AppError::NotFound(Some(message)) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            },
            AppError::Conflict(message) => {
                (StatusCode::CONFLICT, Json(json!({ "message": message }))).into_response()
            },
            AppError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal Server Error" })),
                )
                    .into_response()
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
