//! Foundation types for the finders.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`], [`ProjectId`], [`AssemblyId`] - Interned identifiers
//! - [`Location`], [`TextRange`] - Declaration positions
//! - [`SymbolPools`] - Pooled symbol sets and edge maps
//!
//! Apart from the symbol container aliases used by the pools, this module has
//! NO dependencies on other modules of the crate.

mod ids;
mod pool;
mod span;

pub use ids::{AssemblyId, FileId, ProjectId};
pub use pool::{
    ObjectPool, PoolConfig, PoolStats, Poolable, PooledEdgeMap, PooledSymbolSet, SymbolPools,
};
pub use span::{Location, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
