//! Inheritance finders.
//!
//! Each finder answers one relation for a symbol and returns the related
//! symbols grouped by logical entity, nearest relation first:
//!
//! | Finder | Relation | Direction |
//! |--------|----------|-----------|
//! | [`BaseTypeSymbolsFinder`] | base classes and interfaces | up |
//! | [`DerivedTypeSymbolsFinder`] | derived types and implementations | down |
//! | [`ImplementedSymbolAndOverriddenSymbolsFinder`] | implemented and overridden members | up |
//! | [`OverridingSymbolsFinder`] | overriding members | down |
//! | [`ImplementingSymbolsFinder`] | members implementing an interface member | down |
//!
//! Down-direction results only contain symbols declared in source. Up-direction
//! results keep metadata symbols, since a metadata base is still worth showing.
//!
//! Finders hold no per-call state. The `instance()` singletons draw from
//! [`SymbolPools::shared`]; `with_pools` gives a finder private pools.

mod base_types;
mod derived_types;
mod group;
mod implemented_overridden;
mod implementing;
mod overriding;
mod toposort;
mod traversal;

pub use base_types::{BaseTypeGroups, BaseTypeSymbolsFinder};
pub use derived_types::DerivedTypeSymbolsFinder;
pub use group::SymbolGroup;
pub use implemented_overridden::{ImplementedAndOverriddenGroups, ImplementedSymbolAndOverriddenSymbolsFinder};
pub use implementing::ImplementingSymbolsFinder;
pub use overriding::OverridingSymbolsFinder;
pub use toposort::topological_sort;
pub use traversal::InheritanceSymbolsFinder;

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::host::SymbolHost;
use crate::symbols::{Symbol, SymbolGroupMap, SymbolSet};

#[cfg(doc)]
use crate::base::SymbolPools;

/// Constructors shared by every finder: a lazily created singleton on the
/// shared pools, and a constructor taking explicit pools.
macro_rules! finder_constructors {
    ($finder:ident) => {
        impl $finder {
            /// The process-wide finder, backed by the shared pools.
            pub fn instance() -> &'static $finder {
                static INSTANCE: std::sync::LazyLock<$finder> =
                    std::sync::LazyLock::new(|| $finder::with_pools(crate::base::SymbolPools::shared()));
                &INSTANCE
            }

            pub fn with_pools(pools: std::sync::Arc<crate::base::SymbolPools>) -> Self {
                Self { pools }
            }
        }
    };
}

pub(crate) use finder_constructors;

/// Run `finder` from `symbol` and return the groups whose key passes `keep`,
/// in discovery order.
pub(crate) async fn collect_groups<F>(
    finder: &F,
    host: &dyn SymbolHost,
    symbol: Symbol,
    token: &CancellationToken,
    mut keep: impl FnMut(Symbol) -> bool,
) -> Result<Vec<SymbolGroup>>
where
    F: InheritanceSymbolsFinder + ?Sized,
{
    let mut groups = SymbolGroupMap::default();
    finder.symbol_groups(host, symbol, &mut groups, token).await?;
    Ok(groups
        .into_iter()
        .filter(|&(key, _)| keep(key))
        .map(|(_, group)| group)
        .collect())
}

/// The member of `members` that `predecessor` stands for: itself, or the
/// source definition of a metadata stand-in.
pub(crate) async fn predecessor_in(
    host: &dyn SymbolHost,
    members: &SymbolSet,
    predecessor: Symbol,
    token: &CancellationToken,
) -> Result<Option<Symbol>> {
    if members.contains(&predecessor) {
        return Ok(Some(predecessor));
    }
    let definition = host.find_source_definition(predecessor, token).await?;
    Ok(members.contains(&definition).then_some(definition))
}
