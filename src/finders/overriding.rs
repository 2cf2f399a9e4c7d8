//! Members overriding a member.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{InheritanceSymbolsFinder, SymbolGroup, collect_groups, predecessor_in, topological_sort};
use crate::base::SymbolPools;
use crate::error::Result;
use crate::host::SymbolHost;
use crate::symbols::Symbol;

#[derive(Clone, Debug)]
pub struct OverridingSymbolsFinder {
    pools: Arc<SymbolPools>,
}

super::finder_constructors!(OverridingSymbolsFinder);

impl OverridingSymbolsFinder {
    /// Source members overriding `symbol`, directly or through another
    /// override, nearest first.
    pub async fn overriding_symbol_groups(
        &self,
        host: &dyn SymbolHost,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<SymbolGroup>> {
        collect_groups(self, host, symbol, token, |key| host.is_in_source(key)).await
    }
}

#[async_trait]
impl InheritanceSymbolsFinder for OverridingSymbolsFinder {
    fn pools(&self) -> &SymbolPools {
        &self.pools
    }

    async fn associated_symbols(
        &self,
        host: &dyn SymbolHost,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>> {
        let overrides = host.find_overrides(symbol, token).await?;

        let mut members = self.pools.allocate_set();
        members.extend(overrides.iter().copied());

        let mut edges = self.pools.allocate_edge_map();
        for &member in &overrides {
            edges.ensure(member);
            if let Some(overridden) = host.overridden_member(member) {
                if let Some(predecessor) = predecessor_in(host, &members, overridden, token).await? {
                    edges.add_edge(member, predecessor);
                }
            }
        }

        Ok(topological_sort(&overrides, &edges)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemberDecl, TypeDecl, WorkspaceBuilder};

    #[tokio::test]
    async fn test_overrides_nearest_first() {
        let mut builder = WorkspaceBuilder::with_core_library();
        let project = builder.add_project("App");
        let file = builder.add_source_file(project, "shapes.cs");
        builder
            .declare(file, TypeDecl::class("Square").extends("Rect").member(MemberDecl::method("Area").override_()))
            .declare(file, TypeDecl::class("Rect").extends("Shape").member(MemberDecl::method("Area").override_()))
            .declare(file, TypeDecl::class("Shape").member(MemberDecl::method("Area").abstract_()))
            .declare(file, TypeDecl::class("Circle").extends("Shape").member(MemberDecl::method("Area").override_()));
        let ws = builder.build();

        let shape_area = ws.lookup_member(project, "Shape", "Area").unwrap();
        let groups = OverridingSymbolsFinder::with_pools(Arc::new(SymbolPools::default()))
            .overriding_symbol_groups(&ws, shape_area, &CancellationToken::new())
            .await
            .unwrap();
        let names: Vec<_> = groups.iter().map(|g| ws.name(g.first())).collect();
        // Rect before Square; Circle keeps its input position after Rect.
        assert_eq!(names, vec!["Rect.Area", "Square.Area", "Circle.Area"]);
    }
}
