//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover user-input errors (missing density or delete mode), missing surfaces, failed
//! attachment creation mid-batch, invalid configuration and host capability failures.
use thiserror::Error;

use crate::host::{HostError, SurfaceId};

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown style '{name}'")]
    UnknownStyle { name: String },

    #[error("no density mode selected")]
    NoDensityModeSelected,

    #[error("surface '{surface}' does not exist")]
    SurfaceNotFound { surface: SurfaceId },

    #[error("failed to create attachment on surface '{surface}': {reason}")]
    AttachmentCreationFailed { surface: SurfaceId, reason: String },

    #[error("no delete mode selected")]
    NoDeleteModeSelected,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
