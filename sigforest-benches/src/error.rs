//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use sigforest_core::{ConnectorError, FormatError};
use sigforest_providers_necklace::NecklaceError;

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic key generation failed.
    #[error("synthetic key generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Loading the generated keys failed.
    #[error("loading synthetic keys failed: {0}")]
    Format(#[from] FormatError),
    /// Connector configuration or search failed.
    #[error("connector failed: {0}")]
    Connector(#[from] ConnectorError),
    /// Necklace walk configuration failed.
    #[error("necklace walk failed: {0}")]
    Necklace(#[from] NecklaceError),
}
