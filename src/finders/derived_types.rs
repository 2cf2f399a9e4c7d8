//! Types deriving from or implementing a type.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{InheritanceSymbolsFinder, SymbolGroup, collect_groups, predecessor_in, topological_sort};
use crate::base::SymbolPools;
use crate::error::Result;
use crate::host::SymbolHost;
use crate::symbols::Symbol;

#[derive(Clone, Debug)]
pub struct DerivedTypeSymbolsFinder {
    pools: Arc<SymbolPools>,
}

super::finder_constructors!(DerivedTypeSymbolsFinder);

impl DerivedTypeSymbolsFinder {
    /// Source types deriving from or implementing `symbol`, nearest first.
    pub async fn derived_type_symbol_groups(
        &self,
        host: &dyn SymbolHost,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<SymbolGroup>> {
        collect_groups(self, host, symbol, token, |key| host.is_in_source(key)).await
    }
}

#[async_trait]
impl InheritanceSymbolsFinder for DerivedTypeSymbolsFinder {
    fn pools(&self) -> &SymbolPools {
        &self.pools
    }

    async fn associated_symbols(
        &self,
        host: &dyn SymbolHost,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>> {
        let derived = host.derived_types_and_implementations(symbol, token).await?;

        let mut members = self.pools.allocate_set();
        members.extend(derived.iter().copied());

        let mut edges = self.pools.allocate_edge_map();
        for &ty in &derived {
            edges.ensure(ty);
            let supertypes = host.base_type(ty).into_iter().chain(host.interfaces(ty));
            for supertype in supertypes {
                if let Some(predecessor) = predecessor_in(host, &members, supertype, token).await? {
                    edges.add_edge(ty, predecessor);
                }
            }
        }

        Ok(topological_sort(&derived, &edges)?)
    }
}
