//! Error types for sphere packing.

use thiserror::Error;

/// Result type alias for sphere packing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a pack.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid packer configuration (radii, throat, budgets, targets).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Invalid domain extents.
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// The loop budget ran out before the stopping criterion was met.
    ///
    /// Packing never returns this on its own; a partial pack is still a usable
    /// result. Callers that want a hard failure opt in through
    /// [`PackResult::ensure_converged`](crate::result::PackResult::ensure_converged).
    #[error("Loop limit exceeded after {attempts} attempts ({placed} spheres placed)")]
    LoopLimitExceeded {
        /// Attempts performed, including the seed sphere.
        attempts: u64,
        /// Spheres accepted before the budget ran out.
        placed: usize,
    },

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns true for errors raised by configuration validation.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_) | Self::InvalidDomain(_))
    }
}
