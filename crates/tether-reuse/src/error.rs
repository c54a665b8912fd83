//! Registry errors.

use thiserror::Error;

use crate::registry::ReuseKind;

/// Errors from [`ReuseRegistry`](crate::registry::ReuseRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReuseError {
    /// Nothing was registered under this identifier for this kind.
    #[error("no {kind} registered with identifier `{identifier}`")]
    NotRegistered {
        /// Slot that was requested.
        kind: ReuseKind,
        /// Reuse identifier of the requested key.
        identifier: &'static str,
    },
}
