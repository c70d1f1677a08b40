//! CLI error types.

use navfix_config::ConfigError;
use navfix_core::{DocumentError, IndexError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error("{0}")]
    Index(#[from] IndexError),
}
