use crate::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Rejection of a value before it leaves the models crate.
#[derive(Debug, Clone, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}

impl ModelError {
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        ModelError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ModelError::Validation { message, .. } => message,
        }
    }
}
