//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidParameter`] thrown when a caller supplied filter or paging value
//!   is not acceptable (unknown month name, zero page size, ...).
//! - [`Database`] thrown when the underlying store fails.
//! - [`UpstreamFailure`] thrown by the dashboard when one of the aggregates it
//!   combines fails.
//!
//!  [`InvalidParameter`]: EngineError::InvalidParameter
//!  [`Database`]: EngineError::Database
//!  [`UpstreamFailure`]: EngineError::UpstreamFailure
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Upstream failure: {0}")]
    UpstreamFailure(#[source] Box<EngineError>),
}

impl EngineError {
    /// Wraps `self` as the cause of a failed combined read.
    pub(crate) fn upstream(self) -> Self {
        Self::UpstreamFailure(Box::new(self))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidParameter(a), Self::InvalidParameter(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            (Self::UpstreamFailure(a), Self::UpstreamFailure(b)) => a == b,
            _ => false,
        }
    }
}
