pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod merger;
pub mod normalizer;
pub mod retry;
pub mod transport;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError, CoreError, FailureKind};
