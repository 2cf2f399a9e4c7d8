//! # syster-finders
//!
//! Inheritance-symbol graph resolver: given a type or member, find its base
//! types, derived types, overridden, overriding, implemented and implementing
//! symbols across a multi-project workspace, grouped by linked copies and
//! ordered nearest first.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → Combined inheritance relations for one symbol
//!   ↓
//! finders  → Traversal engine, topological sort, the five finders
//!   ↓
//! host     → SymbolHost contract + in-memory Workspace
//!   ↓
//! symbols  → Symbol handles with metadata-aware equality
//!   ↓
//! base     → Primitives (ids, locations, object pools)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use syster_finders::finders::BaseTypeSymbolsFinder;
//! use syster_finders::host::{TypeDecl, WorkspaceBuilder};
//! use tokio_util::sync::CancellationToken;
//!
//! let mut builder = WorkspaceBuilder::with_core_library();
//! let app = builder.add_project("App");
//! let file = builder.add_source_file(app, "Shapes.cs");
//! builder
//!     .declare(file, TypeDecl::interface("IShape"))
//!     .declare(file, TypeDecl::class("Circle").implements("IShape"));
//! let workspace = builder.build();
//!
//! let circle = workspace.lookup(app, "Circle").unwrap();
//! let groups = BaseTypeSymbolsFinder::instance()
//!     .base_type_and_base_interface_symbol_groups(&workspace, circle, &CancellationToken::new())
//!     .await?;
//! ```

/// Foundation types: ids, locations, pools
pub mod base;

/// Error types shared by hosts and finders
pub mod error;

/// Finders: grouping traversal and relation-specific ordering
pub mod finders;

/// The symbol host contract and an in-memory workspace host
pub mod host;

/// IDE features: combined inheritance relations
pub mod ide;

/// Symbol handles and containers
pub mod symbols;

pub use base::{FileId, Location, ProjectId, SymbolPools, TextRange, TextSize};
pub use error::{CycleError, FinderError, Result};
pub use finders::{InheritanceSymbolsFinder, SymbolGroup};
pub use host::{SymbolHost, Workspace, WorkspaceBuilder};
pub use symbols::{Symbol, SymbolKey, SymbolKind};
