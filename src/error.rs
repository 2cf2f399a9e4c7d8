//! Error types shared by the host contract and the finders.

use std::error::Error as StdError;

use crate::symbols::Symbol;

/// Everything a finder call can fail with.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// The caller's cancellation token fired.
    #[error("operation was cancelled")]
    Cancelled,

    /// Incoming edges formed a cycle, so no order exists.
    #[error(transparent)]
    Cycle(#[from] CycleError),

    /// The symbol host failed. Passed through untouched.
    #[error(transparent)]
    Host(Box<dyn StdError + Send + Sync + 'static>),
}

impl FinderError {
    /// Wrap an arbitrary host failure.
    pub fn host(error: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        FinderError::Host(error.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FinderError::Cancelled)
    }
}

/// Symbols whose predecessors could never all be placed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("incoming edges contain a cycle; {} symbol(s) could not be ordered", unplaced.len())]
pub struct CycleError {
    /// The symbols left over, in input order.
    pub unplaced: Vec<Symbol>,
}

pub type Result<T, E = FinderError> = std::result::Result<T, E>;
