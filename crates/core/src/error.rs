//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (missing
/// references, stock shortfalls, state-machine violations). Infrastructure
/// faults are carried through `Store` unchanged, never reinterpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced customer or product does not exist. The message lists
    /// every missing identifier so the caller can render a precise response.
    #[error("referenced record not found: {0}")]
    ReferenceNotFound(String),

    /// A reservation asked for more units than are available.
    #[error(
        "insufficient stock for product {name} ({product_id}): available {available}, requested {requested}"
    )]
    InsufficientStock {
        product_id: ProductId,
        name: String,
        available: i64,
        requested: i64,
    },

    /// The operation is not permitted in the order's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Malformed input (e.g. unrecognized state name, non-positive quantity).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The order id does not exist.
    #[error("not found")]
    NotFound,

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// An unexpected storage fault, propagated after rollback.
    #[error("store error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn reference_not_found(msg: impl Into<String>) -> Self {
        Self::ReferenceNotFound(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
