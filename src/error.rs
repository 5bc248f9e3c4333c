// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent user-facing notices.

use crate::db::StorageError;
use crate::services::validation::ValidationError;

/// Application error type surfaced by session event handling.
///
/// None of these are fatal: the session keeps running and the user is
/// notified (or, for lookups, nothing happens at all).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid workout input: {0}")]
    Validation(#[from] ValidationError),

    #[error("No map location selected")]
    NoPendingSelection,

    #[error("Map is not available")]
    MapUnavailable,

    #[error("Geolocation unavailable: {0}")]
    Geolocation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Notice shown to the user when a form submission is rejected.
    pub const INVALID_INPUT_NOTICE: &'static str = "Inputs have to be positive numbers!";

    /// Notice shown when the current position cannot be determined.
    pub const NO_POSITION_NOTICE: &'static str = "Could not get your position";

    /// Message suitable for a user-visible notice.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => Self::INVALID_INPUT_NOTICE.to_string(),
            AppError::NoPendingSelection => "Click on the map to pick a location first".to_string(),
            AppError::MapUnavailable | AppError::Geolocation(_) => {
                Self::NO_POSITION_NOTICE.to_string()
            }
            AppError::Storage(_) => "Could not save your workouts".to_string(),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                "Something went wrong".to_string()
            }
        }
    }

    /// Whether this error came from a rejected form submission.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::NoPendingSelection)
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, AppError>;
