//! The breadth-first engine shared by every finder.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::SymbolGroup;
use crate::base::SymbolPools;
use crate::error::{FinderError, Result};
use crate::host::SymbolHost;
use crate::symbols::{Symbol, SymbolGroupMap};

/// A relation between symbols plus the traversal that groups it.
///
/// Implementors supply [`associated_symbols`](Self::associated_symbols): the
/// related symbols of one symbol, nearest first. The provided
/// [`symbol_groups`](Self::symbol_groups) runs it over every linked copy of
/// the seed and groups the results by source definition.
#[async_trait]
pub trait InheritanceSymbolsFinder: Send + Sync {
    /// Pools for the traversal's scratch collections.
    fn pools(&self) -> &SymbolPools;

    /// Related symbols of `symbol`, topologically sorted nearest first.
    async fn associated_symbols(
        &self,
        host: &dyn SymbolHost,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>>;

    /// Collect the groups of every symbol associated with `initial` (or any
    /// of its linked copies) into `groups`, keyed by source definition.
    ///
    /// Groups already in `groups`, or whose key is a member of an existing
    /// group, are left as they are. Host errors and cancellation propagate
    /// unchanged; `groups` then holds whatever was found so far.
    async fn symbol_groups(
        &self,
        host: &dyn SymbolHost,
        initial: Symbol,
        groups: &mut SymbolGroupMap,
        token: &CancellationToken,
    ) -> Result<()> {
        let pools = self.pools();
        let mut visited = pools.allocate_set();
        let mut grouped = pools.allocate_set();
        for group in groups.values() {
            grouped.extend(group.iter().copied());
        }

        let mut queue: VecDeque<Symbol> = host.find_linked_symbols(initial, token).await?.into();
        while let Some(current) = queue.pop_front() {
            if token.is_cancelled() {
                return Err(FinderError::Cancelled);
            }
            if !visited.insert(current) {
                continue;
            }

            trace!(symbol = %host.name(current), context = %current.context(), "expanding");
            let associated = self.associated_symbols(host, current, token).await?;
            for symbol in associated {
                visited.insert(symbol);
                queue.extend(host.find_linked_symbols(symbol, token).await?);

                let definition = host
                    .find_source_definition(host.original_definition(symbol), token)
                    .await?;
                if groups.contains_key(&definition) || grouped.contains(&definition) {
                    continue;
                }

                let linked = host.find_linked_symbols(definition, token).await?;
                let group = SymbolGroup::new(linked).unwrap_or_else(|| SymbolGroup::single(definition));
                grouped.extend(group.iter().copied());
                groups.insert(definition, group);
            }
        }

        debug!(
            initial = %host.name(initial),
            groups = groups.len(),
            expanded = visited.len(),
            "collected symbol groups"
        );
        Ok(())
    }
}
