use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoffeeError {
    #[error("Coffee #{0} not found")]
    NotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CoffeeResult<T> = Result<T, CoffeeError>;

/// Convert CoffeeError to AppError for standardized error responses
impl From<CoffeeError> for AppError {
    fn from(err: CoffeeError) -> Self {
        match err {
            CoffeeError::NotFound(_) => AppError::NotFound(err.to_string()),
            CoffeeError::Validation(msg) => AppError::BadRequest(msg),
            CoffeeError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CoffeeError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
