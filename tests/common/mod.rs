//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use smol_str::SmolStr;
use syster_finders::host::{MemberDecl, TypeDecl};
use syster_finders::symbols::SpecialType;
use syster_finders::{
    FinderError, ProjectId, Result, Symbol, SymbolGroup, SymbolHost, SymbolKind, Workspace, WorkspaceBuilder,
};
use tokio_util::sync::CancellationToken;

/// `interface IBar { void Goo(); }`
/// `class Bar : IBar { public virtual void Goo() {} }`
/// `class Bar2 : Bar { public override void Goo() {} }`
pub fn bar_workspace() -> (Workspace, ProjectId) {
    let mut builder = WorkspaceBuilder::with_core_library();
    let project = builder.add_project("App");
    let file = builder.add_source_file(project, "src/Bar.cs");
    builder
        .declare(file, TypeDecl::interface("IBar").member(MemberDecl::method("Goo")).at(0, 30))
        .declare(
            file,
            TypeDecl::class("Bar")
                .implements("IBar")
                .member(MemberDecl::method("Goo").virtual_())
                .at(32, 90),
        )
        .declare(
            file,
            TypeDecl::class("Bar2")
                .extends("Bar")
                .member(MemberDecl::method("Goo").override_())
                .at(92, 150),
        );
    (builder.build(), project)
}

/// `interface IA {}`, `class A : IA {}`, `class B : A {}` in one shared file
/// compiled by two projects.
pub fn linked_shapes() -> (Workspace, ProjectId, ProjectId) {
    let mut builder = WorkspaceBuilder::with_core_library();
    let modern = builder.add_project("Shapes.net8");
    let legacy = builder.add_project("Shapes.net48");
    let shared = builder.add_file("shared/Shapes.cs");
    builder.link_file(modern, shared).link_file(legacy, shared);
    builder
        .declare(shared, TypeDecl::interface("IA").member(MemberDecl::method("Draw")))
        .declare(
            shared,
            TypeDecl::class("A").implements("IA").member(MemberDecl::method("Draw").virtual_()),
        )
        .declare(shared, TypeDecl::class("B").extends("A").member(MemberDecl::method("Draw").override_()));
    (builder.build(), modern, legacy)
}

pub fn group_names(host: &dyn SymbolHost, groups: &[SymbolGroup]) -> Vec<String> {
    groups.iter().map(|group| host.name(group.first()).to_string()).collect()
}

/// Wraps a [`Workspace`] and scripts failures, cancellation and extra
/// metadata search results.
pub struct ScriptedHost {
    inner: Workspace,
    /// Extra results for `derived_types_and_implementations(of)`.
    pub extra_derived: Vec<(Symbol, Vec<Symbol>)>,
    /// Extra results for `implementing_symbols_for_type_member(of)`.
    pub extra_implementing: Vec<(Symbol, Vec<Symbol>)>,
    /// Fail the n-th search call (1-based) with a host error.
    pub fail_on_call: Option<usize>,
    /// Cancel the token on the n-th search call (1-based).
    pub cancel_on_call: Option<(usize, CancellationToken)>,
    calls: AtomicUsize,
}

impl ScriptedHost {
    pub fn new(inner: Workspace) -> Self {
        Self {
            inner,
            extra_derived: Vec::new(),
            extra_implementing: Vec::new(),
            fail_on_call: None,
            cancel_on_call: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.inner
    }

    /// Number of async search calls made so far.
    pub fn search_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) -> Result<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            return Err(FinderError::host("symbol index offline"));
        }
        if let Some((at, token)) = &self.cancel_on_call {
            if *at == call {
                token.cancel();
                return Err(FinderError::Cancelled);
            }
        }
        Ok(())
    }

    fn extras(table: &[(Symbol, Vec<Symbol>)], symbol: Symbol) -> Vec<Symbol> {
        table
            .iter()
            .filter(|(of, _)| *of == symbol)
            .flat_map(|(_, extra)| extra.iter().copied())
            .collect()
    }
}

#[async_trait]
impl SymbolHost for ScriptedHost {
    fn name(&self, symbol: Symbol) -> SmolStr {
        self.inner.name(symbol)
    }

    fn kind(&self, symbol: Symbol) -> SymbolKind {
        self.inner.kind(symbol)
    }

    fn base_type(&self, symbol: Symbol) -> Option<Symbol> {
        self.inner.base_type(symbol)
    }

    fn interfaces(&self, symbol: Symbol) -> Vec<Symbol> {
        self.inner.interfaces(symbol)
    }

    fn all_interfaces(&self, symbol: Symbol) -> Vec<Symbol> {
        self.inner.all_interfaces(symbol)
    }

    fn containing_type(&self, symbol: Symbol) -> Option<Symbol> {
        self.inner.containing_type(symbol)
    }

    fn original_definition(&self, symbol: Symbol) -> Symbol {
        self.inner.original_definition(symbol)
    }

    fn is_in_source(&self, symbol: Symbol) -> bool {
        self.inner.is_in_source(symbol)
    }

    fn special_type(&self, symbol: Symbol) -> Option<SpecialType> {
        self.inner.special_type(symbol)
    }

    fn overridden_member(&self, symbol: Symbol) -> Option<Symbol> {
        self.inner.overridden_member(symbol)
    }

    fn explicit_or_implicit_interface_implementations(&self, symbol: Symbol) -> Vec<Symbol> {
        self.inner.explicit_or_implicit_interface_implementations(symbol)
    }

    async fn find_linked_symbols(&self, symbol: Symbol, token: &CancellationToken) -> Result<Vec<Symbol>> {
        self.tick()?;
        self.inner.find_linked_symbols(symbol, token).await
    }

    async fn find_source_definition(&self, symbol: Symbol, token: &CancellationToken) -> Result<Symbol> {
        self.tick()?;
        self.inner.find_source_definition(symbol, token).await
    }

    async fn derived_types_and_implementations(
        &self,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>> {
        self.tick()?;
        let mut derived = self.inner.derived_types_and_implementations(symbol, token).await?;
        derived.extend(Self::extras(&self.extra_derived, symbol));
        Ok(derived)
    }

    async fn find_overrides(&self, symbol: Symbol, token: &CancellationToken) -> Result<Vec<Symbol>> {
        self.tick()?;
        self.inner.find_overrides(symbol, token).await
    }

    async fn implementing_symbols_for_type_member(
        &self,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>> {
        self.tick()?;
        let mut implementing = self.inner.implementing_symbols_for_type_member(symbol, token).await?;
        implementing.extend(Self::extras(&self.extra_implementing, symbol));
        Ok(implementing)
    }
}
