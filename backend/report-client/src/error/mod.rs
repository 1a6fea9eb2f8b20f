pub mod client;
pub mod config;

pub use client::{ClientError, FailureKind};
pub use config::ConfigError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
