//! Inheritance relations of one symbol, as an editor margin would show them.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Result;
use crate::finders::{
    BaseTypeSymbolsFinder, DerivedTypeSymbolsFinder, ImplementedSymbolAndOverriddenSymbolsFinder,
    ImplementingSymbolsFinder, OverridingSymbolsFinder, SymbolGroup,
};
use crate::host::SymbolHost;
use crate::symbols::{Symbol, SymbolKind};

/// Every relation that applies to a symbol. Unused buckets stay empty.
#[derive(Clone, Debug, Default)]
pub struct InheritanceRelations {
    pub base_types: Vec<SymbolGroup>,
    pub base_interfaces: Vec<SymbolGroup>,
    pub derived_types: Vec<SymbolGroup>,
    pub implemented: Vec<SymbolGroup>,
    pub overridden: Vec<SymbolGroup>,
    pub overriding: Vec<SymbolGroup>,
    pub implementing: Vec<SymbolGroup>,
}

impl InheritanceRelations {
    /// True when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.base_types.is_empty()
            && self.base_interfaces.is_empty()
            && self.derived_types.is_empty()
            && self.implemented.is_empty()
            && self.overridden.is_empty()
            && self.overriding.is_empty()
            && self.implementing.is_empty()
    }
}

/// Run the finders that apply to `symbol`'s kind.
///
/// - Types: base types and interfaces, derived types.
/// - Interface members: implementing members.
/// - Other members: implemented and overridden members, overriding members.
pub async fn inheritance_relations(
    host: &dyn SymbolHost,
    symbol: Symbol,
    token: &CancellationToken,
) -> Result<InheritanceRelations> {
    let mut relations = InheritanceRelations::default();

    match host.kind(symbol) {
        SymbolKind::Type(_) => {
            let bases = BaseTypeSymbolsFinder::instance()
                .base_type_and_base_interface_symbol_groups(host, symbol, token)
                .await?;
            relations.base_types = bases.base_types;
            relations.base_interfaces = bases.base_interfaces;
            relations.derived_types = DerivedTypeSymbolsFinder::instance()
                .derived_type_symbol_groups(host, symbol, token)
                .await?;
        }
        SymbolKind::Member(_) => {
            let in_interface = host
                .containing_type(symbol)
                .is_some_and(|container| host.kind(container).is_interface());
            if in_interface {
                relations.implementing = ImplementingSymbolsFinder::instance()
                    .implementing_symbol_groups(host, symbol, token)
                    .await?;
            } else {
                let upward = ImplementedSymbolAndOverriddenSymbolsFinder::instance()
                    .implemented_symbol_and_overridden_symbol_groups(host, symbol, token)
                    .await?;
                relations.implemented = upward.implemented;
                relations.overridden = upward.overridden;
                relations.overriding = OverridingSymbolsFinder::instance()
                    .overriding_symbol_groups(host, symbol, token)
                    .await?;
            }
        }
    }

    debug!(symbol = %host.name(symbol), empty = relations.is_empty(), "inheritance relations");
    Ok(relations)
}
