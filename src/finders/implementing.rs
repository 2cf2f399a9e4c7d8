//! Members implementing an interface member.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{InheritanceSymbolsFinder, SymbolGroup, collect_groups, predecessor_in, topological_sort};
use crate::base::SymbolPools;
use crate::error::Result;
use crate::host::SymbolHost;
use crate::symbols::Symbol;

#[derive(Clone, Debug)]
pub struct ImplementingSymbolsFinder {
    pools: Arc<SymbolPools>,
}

super::finder_constructors!(ImplementingSymbolsFinder);

impl ImplementingSymbolsFinder {
    /// Source members implementing the interface member `symbol`, and the
    /// members overriding those, nearest first.
    pub async fn implementing_symbol_groups(
        &self,
        host: &dyn SymbolHost,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<SymbolGroup>> {
        collect_groups(self, host, symbol, token, |key| host.is_in_source(key)).await
    }
}

#[async_trait]
impl InheritanceSymbolsFinder for ImplementingSymbolsFinder {
    fn pools(&self) -> &SymbolPools {
        &self.pools
    }

    async fn associated_symbols(
        &self,
        host: &dyn SymbolHost,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>> {
        let implementing = host.implementing_symbols_for_type_member(symbol, token).await?;

        let mut members = self.pools.allocate_set();
        members.extend(implementing.iter().copied());

        let mut edges = self.pools.allocate_edge_map();
        for &member in &implementing {
            edges.ensure(member);
            if let Some(overridden) = host.overridden_member(member) {
                if let Some(predecessor) = predecessor_in(host, &members, overridden, token).await? {
                    edges.add_edge(member, predecessor);
                }
            }
            // Interface members implemented through a derived interface.
            for implemented in host.explicit_or_implicit_interface_implementations(member) {
                if let Some(predecessor) = predecessor_in(host, &members, implemented, token).await? {
                    edges.add_edge(member, predecessor);
                }
            }
        }

        Ok(topological_sort(&implementing, &edges)?)
    }
}
