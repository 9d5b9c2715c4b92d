//! CLI error types.

use mdpress_config::ConfigError;
use mdpress_openapi::GenerateError;
use mdpress_site::ResolveError;
use mdpress_source::ScanError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Scan(#[from] ScanError),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Validation(String),
}
