use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Client Build Error: {reason} {location}")]
    ClientBuild {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Logger Error: {reason} {location}")]
    Logger {
        location: ErrorLocation,
        reason: String,
    },
}
