//! Error types for the bluesim library.
//!
//! Every failure during peripheral startup is fatal: the bootstrap sequence
//! either completes as a unit or reports a `SetupError` to its caller. There
//! is no retry and no partially-populated supported state.

use crate::att::StoreError;
use crate::sdp::RegistryError;
use thiserror::Error;

/// Fatal startup failure of the peripheral bootstrap sequence.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("attribute database setup failed: {0}")]
    Store(#[from] StoreError),

    #[error("discovery record registration failed: {0}")]
    Registry(#[from] RegistryError),
}
