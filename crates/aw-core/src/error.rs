//! Shared error type.
//!
//! Sub-crates may define their own error enums and convert `AwError` into
//! them via `From`, or return it directly.  Lifecycle errors belong to
//! `aw-sim`, which owns the run state.  Neither "no path found" nor an
//! out-of-grid placement is an error at the API surface: the first is a
//! `None` route, the second a silent grid no-op.  `OutOfBounds` exists for
//! callers that want to ask explicitly.

use thiserror::Error;

use crate::{AgentId, GridCell};

/// The common error type for `aw-*` crates.
#[derive(Debug, Error)]
pub enum AwError {
    #[error("cell {0} is outside the grid")]
    OutOfBounds(GridCell),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `aw-*` crates.
pub type AwResult<T> = Result<T, AwError>;
