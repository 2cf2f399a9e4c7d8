//! Interface members a member implements and the members it overrides.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{InheritanceSymbolsFinder, SymbolGroup, topological_sort};
use crate::base::SymbolPools;
use crate::error::Result;
use crate::host::SymbolHost;
use crate::symbols::{Symbol, SymbolGroupMap};

/// Upward member relations split by the kind of the containing type.
#[derive(Clone, Debug, Default)]
pub struct ImplementedAndOverriddenGroups {
    /// Members of interfaces.
    pub implemented: Vec<SymbolGroup>,
    /// Members of classes and structs.
    pub overridden: Vec<SymbolGroup>,
}

impl ImplementedAndOverriddenGroups {
    pub fn is_empty(&self) -> bool {
        self.implemented.is_empty() && self.overridden.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct ImplementedSymbolAndOverriddenSymbolsFinder {
    pools: Arc<SymbolPools>,
}

super::finder_constructors!(ImplementedSymbolAndOverriddenSymbolsFinder);

impl ImplementedSymbolAndOverriddenSymbolsFinder {
    pub async fn implemented_symbol_and_overridden_symbol_groups(
        &self,
        host: &dyn SymbolHost,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<ImplementedAndOverriddenGroups> {
        let mut groups = SymbolGroupMap::default();
        self.symbol_groups(host, symbol, &mut groups, token).await?;

        let mut result = ImplementedAndOverriddenGroups::default();
        for (key, group) in groups {
            let in_interface = host
                .containing_type(key)
                .is_some_and(|container| host.kind(container).is_interface());
            if in_interface {
                result.implemented.push(group);
            } else {
                result.overridden.push(group);
            }
        }
        Ok(result)
    }

    /// Interface members implemented by `member`, checked to actually live in
    /// an interface.
    fn implemented_members(host: &dyn SymbolHost, member: Symbol) -> Vec<Symbol> {
        let implemented = host.explicit_or_implicit_interface_implementations(member);
        debug_assert!(
            implemented.iter().all(|&interface_member| host
                .containing_type(interface_member)
                .is_some_and(|container| host.kind(container).is_interface())),
            "{member:?} implements a member outside any interface"
        );
        implemented
    }
}

#[async_trait]
impl InheritanceSymbolsFinder for ImplementedSymbolAndOverriddenSymbolsFinder {
    fn pools(&self) -> &SymbolPools {
        &self.pools
    }

    async fn associated_symbols(
        &self,
        host: &dyn SymbolHost,
        symbol: Symbol,
        _token: &CancellationToken,
    ) -> Result<Vec<Symbol>> {
        let mut edges = self.pools.allocate_edge_map();
        for implemented in Self::implemented_members(host, symbol) {
            edges.ensure(implemented);
        }

        // Nearest overridden member first; each one follows the one before it.
        let mut chain = self.pools.allocate_set();
        let mut previous = None;
        let mut current = host.overridden_member(symbol);
        while let Some(overridden) = current {
            if overridden == symbol || !chain.insert(overridden) {
                break;
            }
            edges.ensure(overridden);
            if let Some(previous) = previous {
                edges.add_edge(overridden, previous);
            }
            for implemented in Self::implemented_members(host, overridden) {
                edges.add_edge(implemented, overridden);
            }
            previous = Some(overridden);
            current = host.overridden_member(overridden);
        }

        let candidates: Vec<Symbol> = edges.keys().copied().collect();
        Ok(topological_sort(&candidates, &edges)?)
    }
}
