//! Shared configuration and brand catalogue for the brandfit toolkit.

mod app_config;
pub mod backoff;
mod brands;
mod config;
mod corpus;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use backoff::{Backoff, Transient};
pub use brands::{load_brands, BrandConfig, BrandsFile};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use corpus::CorpusEntry;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brands file {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[from] serde_yaml::Error),

    #[error("brands config validation failed: {0}")]
    Validation(String),
}
