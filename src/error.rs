// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No user identity in request body or session")]
    MissingIdentity,

    #[error("User identity is empty after sanitization")]
    EmptyIdentityAfterSanitization,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Profile store write failed: {0}")]
    StoreWriteFailure(String),

    #[error("Completion service error: {0}")]
    CompletionServiceFailure(String),

    #[error("Completion is not valid JSON: {0}")]
    UnparsableMealPlan(String),

    #[error("Completion has an invalid meal plan shape: {0}")]
    InvalidMealPlanShape(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingIdentity
            | AppError::EmptyIdentityAfterSanitization
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::StoreWriteFailure(_)
            | AppError::CompletionServiceFailure(_)
            | AppError::UnparsableMealPlan(_)
            | AppError::InvalidMealPlanShape(_)
            | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, details) = match &self {
            AppError::MissingIdentity => ("Could not determine user ID.", None),
            AppError::EmptyIdentityAfterSanitization => {
                ("User ID is empty after sanitization.", None)
            }
            AppError::BadRequest(msg) => ("Invalid meal plan request.", Some(msg.clone())),
            AppError::StoreWriteFailure(msg) => {
                tracing::error!(error = %msg, "Profile store write failed");
                ("Failed to create profile.", Some(msg.clone()))
            }
            AppError::CompletionServiceFailure(msg) => {
                tracing::error!(error = %msg, "Completion service error");
                ("Failed to generate meal plan. Please try again later.", None)
            }
            AppError::UnparsableMealPlan(msg) => {
                tracing::error!(error = %msg, "Completion could not be parsed as JSON");
                ("Failed to parse meal plan. Please try again.", None)
            }
            AppError::InvalidMealPlanShape(msg) => {
                tracing::error!(error = %msg, "Completion has an invalid meal plan shape");
                ("Failed to generate meal plan. Please try again later.", None)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                ("Internal Server Error.", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
