//! Base classes and base interfaces of a type.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{InheritanceSymbolsFinder, SymbolGroup, topological_sort};
use crate::base::SymbolPools;
use crate::error::Result;
use crate::host::SymbolHost;
use crate::symbols::{Symbol, SymbolGroupMap};

/// Base-type groups split by kind.
#[derive(Clone, Debug, Default)]
pub struct BaseTypeGroups {
    /// Base classes, nearest first.
    pub base_types: Vec<SymbolGroup>,
    /// Interfaces implemented directly or through a base, nearest first.
    pub base_interfaces: Vec<SymbolGroup>,
}

impl BaseTypeGroups {
    pub fn is_empty(&self) -> bool {
        self.base_types.is_empty() && self.base_interfaces.is_empty()
    }
}

/// Finds everything a type inherits from.
#[derive(Clone, Debug)]
pub struct BaseTypeSymbolsFinder {
    pools: Arc<SymbolPools>,
}

super::finder_constructors!(BaseTypeSymbolsFinder);

impl BaseTypeSymbolsFinder {
    /// Base classes and base interfaces of `symbol`.
    ///
    /// Error types and the universal roots (`System.Object`,
    /// `System.ValueType`, `System.Enum`) are left out.
    pub async fn base_type_and_base_interface_symbol_groups(
        &self,
        host: &dyn SymbolHost,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<BaseTypeGroups> {
        let mut groups = SymbolGroupMap::default();
        self.symbol_groups(host, symbol, &mut groups, token).await?;

        let mut result = BaseTypeGroups::default();
        for (key, group) in groups {
            let kind = host.kind(key);
            if kind.is_error_type() || host.special_type(key).is_some() {
                continue;
            }
            if kind.is_interface() {
                result.base_interfaces.push(group);
            } else {
                result.base_types.push(group);
            }
        }
        Ok(result)
    }
}

#[async_trait]
impl InheritanceSymbolsFinder for BaseTypeSymbolsFinder {
    fn pools(&self) -> &SymbolPools {
        &self.pools
    }

    async fn associated_symbols(
        &self,
        host: &dyn SymbolHost,
        symbol: Symbol,
        _token: &CancellationToken,
    ) -> Result<Vec<Symbol>> {
        let base_types = host.find_base_types(symbol);
        let all_interfaces = host.all_interfaces(symbol);
        // Interfaces and `object` itself: the interface list is already sorted.
        if base_types.is_empty() {
            return Ok(all_interfaces);
        }

        let mut edges = self.pools.allocate_edge_map();
        let mut previous = None;
        for &base in &base_types {
            edges.ensure(base);
            if let Some(previous) = previous {
                edges.add_edge(base, previous);
            }
            for interface in host.interfaces(base) {
                edges.add_edge(interface, base);
            }
            previous = Some(base);
        }

        for &interface in &all_interfaces {
            edges.ensure(interface);
            for extended in host.interfaces(interface) {
                edges.add_edge(extended, interface);
            }
        }

        let candidates: Vec<Symbol> = base_types.iter().chain(&all_interfaces).copied().collect();
        Ok(topological_sort(&candidates, &edges)?)
    }
}
