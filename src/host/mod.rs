//! The symbol host: everything the finders consume from the workspace.
//!
//! The finders never look at source text. They ask a [`SymbolHost`] about
//! the symbol model (base types, interfaces, overridden members) and run the
//! expensive cross-project searches through it (linked copies, derived types,
//! overrides, implementations).
//!
//! ## Contract
//!
//! - Synchronous methods are pure lookups on already-bound symbols.
//! - Async methods may suspend and must honor the cancellation token by
//!   returning [`FinderError::Cancelled`].
//! - Every ordered list is deterministic for a given workspace.
//!
//! [`Workspace`] is an in-memory host built from declarations. Embedders with
//! their own semantic model implement the trait directly.
//!
//! [`FinderError::Cancelled`]: crate::FinderError::Cancelled

mod decl;
mod workspace;

use async_trait::async_trait;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::error::Result;
use crate::symbols::{Symbol, SymbolKind, SpecialType};

pub use decl::{MemberDecl, MemberModifier, TypeDecl};
pub use workspace::{Workspace, WorkspaceBuilder};

#[async_trait]
pub trait SymbolHost: Send + Sync {
    // ------------------------------------------------------------------
    // Symbol model
    // ------------------------------------------------------------------

    /// Display name, for logging and tests.
    fn name(&self, symbol: Symbol) -> SmolStr;

    fn kind(&self, symbol: Symbol) -> SymbolKind;

    /// The explicit or implicit base class of a type, if any.
    fn base_type(&self, symbol: Symbol) -> Option<Symbol>;

    /// Interfaces a type lists directly.
    fn interfaces(&self, symbol: Symbol) -> Vec<Symbol>;

    /// Every interface a type implements, directly or through bases.
    ///
    /// Topologically sorted: an interface comes before the interfaces it
    /// extends.
    fn all_interfaces(&self, symbol: Symbol) -> Vec<Symbol>;

    fn containing_type(&self, symbol: Symbol) -> Option<Symbol>;

    /// The definition this symbol was constructed from.
    fn original_definition(&self, symbol: Symbol) -> Symbol;

    /// Whether the symbol has at least one declaration in source.
    fn is_in_source(&self, symbol: Symbol) -> bool;

    fn special_type(&self, symbol: Symbol) -> Option<SpecialType>;

    /// The member a member directly overrides.
    fn overridden_member(&self, symbol: Symbol) -> Option<Symbol>;

    /// Interface members this member implements, explicitly or implicitly.
    fn explicit_or_implicit_interface_implementations(&self, symbol: Symbol) -> Vec<Symbol>;

    /// The base class chain of a type, nearest first. A chain that loops is
    /// cut before the first repeated type.
    fn find_base_types(&self, symbol: Symbol) -> Vec<Symbol> {
        let mut chain = Vec::new();
        let mut current = self.base_type(symbol);
        while let Some(base) = current {
            if base == symbol || chain.contains(&base) {
                error!(
                    symbol = %self.name(symbol),
                    looping = %self.name(base),
                    "base type chain loops; cut at the repeated type"
                );
                break;
            }
            chain.push(base);
            current = self.base_type(base);
        }
        chain
    }

    // ------------------------------------------------------------------
    // Workspace searches
    // ------------------------------------------------------------------

    /// Every compilation-context copy of the symbol's declaration, including
    /// the symbol itself.
    async fn find_linked_symbols(
        &self,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>>;

    /// The source declaration behind a metadata symbol, or the input when
    /// there is none.
    async fn find_source_definition(
        &self,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Symbol>;

    /// Every type deriving from or implementing `symbol`, transitively.
    async fn derived_types_and_implementations(
        &self,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>>;

    /// Every member overriding `symbol`, transitively.
    async fn find_overrides(
        &self,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>>;

    /// Every member implementing the interface member `symbol`, and their
    /// overrides.
    async fn implementing_symbols_for_type_member(
        &self,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>>;
}
