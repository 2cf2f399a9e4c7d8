//! In-memory workspace: projects, linked files and metadata assemblies.
//!
//! A [`Workspace`] is built once from declarations and then answers the
//! [`SymbolHost`] contract. It is the host used by the test suite and a
//! reference for embedders wiring their own semantic model.
//!
//! ## Symbol identity
//!
//! - A source declaration gets one [`SymbolKey`] per project compiling its
//!   file. Those keys are the declaration's linked copies.
//! - A metadata declaration gets a single key, whichever project references
//!   its assembly. That is what makes metadata symbols compare equal across
//!   compilations.
//!
//! ## Name resolution
//!
//! Type names resolve against the compilation they appear in: the project's
//! own source first, then its referenced assemblies in order. Metadata
//! declarations resolve against their own assembly, then its references.
//! A name that resolves nowhere becomes an error type.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHashMap};
use smol_str::{SmolStr, format_smolstr};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use async_trait::async_trait;

use super::SymbolHost;
use super::decl::{Decl, DeclBody, DeclId, DeclOrigin, MemberDecl, TypeDecl};
use crate::base::{AssemblyId, FileId, Location, ProjectId};
use crate::error::{FinderError, Result};
use crate::symbols::{SpecialType, Symbol, SymbolKey, SymbolKind, SymbolSet, TypeKind};

/// Qualified type name → key, for one compilation.
type Scope = FxHashMap<SmolStr, SymbolKey>;

#[derive(Clone, Debug)]
struct ProjectData {
    name: SmolStr,
    files: IndexSet<FileId, FxBuildHasher>,
    references: Vec<AssemblyId>,
}

#[derive(Clone, Debug)]
struct AssemblyData {
    name: SmolStr,
    built_from: Option<ProjectId>,
    references: Vec<AssemblyId>,
    types: Vec<DeclId>,
}

/// Which declaration a key denotes and in which compilation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct KeyData {
    decl: DeclId,
    /// `None` for metadata and error types.
    project: Option<ProjectId>,
}

#[derive(Clone, Debug)]
enum Binding {
    Type {
        base: Option<SymbolKey>,
        interfaces: Vec<SymbolKey>,
        members: Vec<SymbolKey>,
    },
    Member {
        container: SymbolKey,
        explicit_interface: Option<SymbolKey>,
    },
}

#[derive(Debug, Default)]
struct KeyInterner {
    keys: Vec<KeyData>,
    index: FxHashMap<KeyData, SymbolKey>,
}

impl KeyInterner {
    fn intern(&mut self, decl: DeclId, project: Option<ProjectId>) -> SymbolKey {
        let data = KeyData { decl, project };
        if let Some(&key) = self.index.get(&data) {
            return key;
        }
        let key = SymbolKey::new(self.keys.len() as u32);
        self.keys.push(data);
        self.index.insert(data, key);
        key
    }

    fn get(&self, decl: DeclId, project: Option<ProjectId>) -> Option<SymbolKey> {
        self.index.get(&KeyData { decl, project }).copied()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Collects projects, files, assemblies and declarations.
#[derive(Debug, Default)]
pub struct WorkspaceBuilder {
    projects: Vec<ProjectData>,
    assemblies: Vec<AssemblyData>,
    /// Path → FileId
    files: IndexMap<SmolStr, FileId, FxBuildHasher>,
    /// Types declared in each file, in declaration order.
    file_types: FxHashMap<FileId, Vec<DeclId>>,
    decls: Vec<Decl>,
    core_library: Option<AssemblyId>,
}

impl WorkspaceBuilder {
    /// Create an empty builder with no core library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a `mscorlib` assembly declaring the universal
    /// base types. Every project and assembly added afterwards references it.
    pub fn with_core_library() -> Self {
        let mut builder = Self::new();
        let core = builder.add_assembly("mscorlib");
        builder
            .declare_in_assembly(core, TypeDecl::class(SpecialType::Object.qualified_name()))
            .declare_in_assembly(core, TypeDecl::class(SpecialType::ValueType.qualified_name()))
            .declare_in_assembly(
                core,
                TypeDecl::class(SpecialType::Enum.qualified_name())
                    .extends(SpecialType::ValueType.qualified_name()),
            );
        builder.core_library = Some(core);
        builder
    }

    pub fn core_library(&self) -> Option<AssemblyId> {
        self.core_library
    }

    pub fn add_assembly(&mut self, name: impl Into<SmolStr>) -> AssemblyId {
        let id = AssemblyId::new(self.assemblies.len() as u32);
        self.assemblies.push(AssemblyData {
            name: name.into(),
            built_from: None,
            references: self.core_library.into_iter().collect(),
            types: Vec::new(),
        });
        id
    }

    pub fn add_assembly_reference(&mut self, assembly: AssemblyId, reference: AssemblyId) -> &mut Self {
        let refs = &mut self.assemblies[assembly.index() as usize].references;
        if !refs.contains(&reference) {
            refs.push(reference);
        }
        self
    }

    /// Mark an assembly as the compiled output of a workspace project, so its
    /// metadata symbols map back to that project's source.
    pub fn set_built_from(&mut self, assembly: AssemblyId, project: ProjectId) -> &mut Self {
        self.assemblies[assembly.index() as usize].built_from = Some(project);
        self
    }

    pub fn add_project(&mut self, name: impl Into<SmolStr>) -> ProjectId {
        let id = ProjectId::new(self.projects.len() as u32);
        self.projects.push(ProjectData {
            name: name.into(),
            files: IndexSet::default(),
            references: self.core_library.into_iter().collect(),
        });
        id
    }

    pub fn add_project_reference(&mut self, project: ProjectId, assembly: AssemblyId) -> &mut Self {
        let refs = &mut self.projects[project.index() as usize].references;
        if !refs.contains(&assembly) {
            refs.push(assembly);
        }
        self
    }

    /// Get or create the FileId for a path.
    pub fn add_file(&mut self, path: impl Into<SmolStr>) -> FileId {
        let path = path.into();
        if let Some(&id) = self.files.get(&path) {
            return id;
        }
        let id = FileId::new(self.files.len() as u32);
        self.files.insert(path, id);
        id
    }

    /// Compile `file` as part of `project`. Linking one file into several
    /// projects gives its declarations one linked copy per project.
    pub fn link_file(&mut self, project: ProjectId, file: FileId) -> &mut Self {
        self.projects[project.index() as usize].files.insert(file);
        self
    }

    /// Add a file and compile it in `project`.
    pub fn add_source_file(&mut self, project: ProjectId, path: impl Into<SmolStr>) -> FileId {
        let file = self.add_file(path);
        self.link_file(project, file);
        file
    }

    /// Declare a type in a source file.
    pub fn declare(&mut self, file: FileId, decl: TypeDecl) -> &mut Self {
        let id = self.alloc_type(DeclOrigin::Source(file), decl);
        self.file_types.entry(file).or_default().push(id);
        self
    }

    /// Declare a type in a metadata assembly.
    pub fn declare_in_assembly(&mut self, assembly: AssemblyId, decl: TypeDecl) -> &mut Self {
        let id = self.alloc_type(DeclOrigin::Metadata(assembly), decl);
        self.assemblies[assembly.index() as usize].types.push(id);
        self
    }

    fn alloc_type(&mut self, origin: DeclOrigin, decl: TypeDecl) -> DeclId {
        let type_id = DeclId(self.decls.len() as u32);
        let member_decls = decl.members.clone();
        self.decls.push(Decl {
            origin,
            body: DeclBody::Type {
                decl,
                members: Vec::with_capacity(member_decls.len()),
            },
        });

        let mut member_ids = Vec::with_capacity(member_decls.len());
        for member in member_decls {
            let id = DeclId(self.decls.len() as u32);
            self.decls.push(Decl {
                origin,
                body: DeclBody::Member {
                    decl: member,
                    container: type_id,
                },
            });
            member_ids.push(id);
        }

        if let DeclBody::Type { members, .. } = &mut self.decls[type_id.index()].body {
            *members = member_ids;
        }
        type_id
    }

    /// Assign symbol keys and bind every name in every compilation.
    pub fn build(self) -> Workspace {
        let WorkspaceBuilder {
            projects,
            assemblies,
            files,
            file_types,
            mut decls,
            core_library: _,
        } = self;

        let mut interner = KeyInterner::default();
        let mut source_types = Vec::new();
        let mut source_members = Vec::new();

        let intern_type =
            |interner: &mut KeyInterner, decls: &[Decl], id: DeclId, project: Option<ProjectId>| {
                let key = interner.intern(id, project);
                let members = match &decls[id.index()].body {
                    DeclBody::Type { members, .. } => members.as_slice(),
                    DeclBody::Member { .. } => &[],
                };
                let member_keys: Vec<SymbolKey> =
                    members.iter().map(|&m| interner.intern(m, project)).collect();
                (key, member_keys)
            };

        // Metadata: one key per declaration.
        for assembly in &assemblies {
            for &id in &assembly.types {
                intern_type(&mut interner, &decls, id, None);
            }
        }

        // Source: one key per (declaration, compiling project).
        for (index, project) in projects.iter().enumerate() {
            let project_id = ProjectId::new(index as u32);
            for file in &project.files {
                for &id in file_types.get(file).map(Vec::as_slice).unwrap_or_default() {
                    let (key, member_keys) = intern_type(&mut interner, &decls, id, Some(project_id));
                    source_types.push(key);
                    source_members.extend(member_keys);
                }
            }
        }

        let type_name = |decls: &[Decl], id: DeclId| -> Option<SmolStr> {
            decls[id.index()].type_decl().map(|d| d.name.clone())
        };

        let project_scopes: Vec<Scope> = projects
            .iter()
            .enumerate()
            .map(|(index, project)| {
                let project_id = ProjectId::new(index as u32);
                let mut scope = Scope::default();
                for file in &project.files {
                    for &id in file_types.get(file).map(Vec::as_slice).unwrap_or_default() {
                        if let (Some(name), Some(key)) =
                            (type_name(&decls, id), interner.get(id, Some(project_id)))
                        {
                            scope.entry(name).or_insert(key);
                        }
                    }
                }
                for assembly in &project.references {
                    add_assembly_types(&mut scope, &assemblies[assembly.index() as usize], &decls, &interner);
                }
                scope
            })
            .collect();

        let assembly_scopes: Vec<Scope> = assemblies
            .iter()
            .map(|assembly| {
                let mut scope = Scope::default();
                add_assembly_types(&mut scope, assembly, &decls, &interner);
                for reference in &assembly.references {
                    add_assembly_types(&mut scope, &assemblies[reference.index() as usize], &decls, &interner);
                }
                scope
            })
            .collect();

        // Bind. Error types are interned on the fly, so the key list grows.
        let mut bindings = Vec::with_capacity(interner.keys.len());
        let mut error_types: FxHashMap<SmolStr, SymbolKey> = FxHashMap::default();
        let mut next = 0;
        while next < interner.keys.len() {
            let data = interner.keys[next];
            next += 1;

            let scope = scope_for(&decls[data.decl.index()], data.project, &project_scopes, &assembly_scopes);
            let mut binder = Binder {
                scope,
                decls: &mut decls,
                interner: &mut interner,
                error_types: &mut error_types,
            };
            bindings.push(binder.bind(data));
        }

        for assembly in &assemblies {
            if let Some(project) = assembly.built_from {
                debug!(
                    assembly = %assembly.name,
                    project = %projects[project.index() as usize].name,
                    "metadata maps back to project source"
                );
            }
        }

        let workspace = Workspace {
            projects,
            assemblies,
            files: files.into_iter().map(|(path, id)| (id, path)).collect(),
            decls,
            keys: interner.keys,
            key_index: interner.index,
            bindings,
            project_scopes,
            source_types,
            source_members,
        };
        debug!(
            projects = workspace.projects.len(),
            assemblies = workspace.assemblies.len(),
            symbols = workspace.keys.len(),
            unresolved = error_types.len(),
            "built workspace"
        );
        workspace
    }
}

fn add_assembly_types(scope: &mut Scope, assembly: &AssemblyData, decls: &[Decl], interner: &KeyInterner) {
    for &id in &assembly.types {
        if let (Some(decl), Some(key)) = (decls[id.index()].type_decl(), interner.get(id, None)) {
            scope.entry(decl.name.clone()).or_insert(key);
        }
    }
}

fn scope_for<'s>(
    decl: &Decl,
    project: Option<ProjectId>,
    project_scopes: &'s [Scope],
    assembly_scopes: &'s [Scope],
) -> Option<&'s Scope> {
    match (project, decl.origin) {
        (Some(project), _) => project_scopes.get(project.index() as usize),
        (None, DeclOrigin::Metadata(assembly)) => assembly_scopes.get(assembly.index() as usize),
        (None, _) => None,
    }
}

struct Binder<'a> {
    scope: Option<&'a Scope>,
    decls: &'a mut Vec<Decl>,
    interner: &'a mut KeyInterner,
    error_types: &'a mut FxHashMap<SmolStr, SymbolKey>,
}

impl Binder<'_> {
    fn bind(&mut self, data: KeyData) -> Binding {
        match self.decls[data.decl.index()].body.clone() {
            DeclBody::Type { decl, members } => {
                let base = match &decl.base {
                    Some(name) => Some(self.resolve(name)),
                    None => self.implicit_base(&decl),
                };
                let interfaces = decl.interfaces.iter().map(|name| self.resolve(name)).collect();
                let members = members
                    .iter()
                    .filter_map(|&m| self.interner.get(m, data.project))
                    .collect();
                Binding::Type {
                    base,
                    interfaces,
                    members,
                }
            }
            DeclBody::Member { decl, container } => {
                let container_key = self.interner.intern(container, data.project);
                let explicit_interface = decl.explicit_interface.as_ref().map(|name| self.resolve(name));
                Binding::Member {
                    container: container_key,
                    explicit_interface,
                }
            }
        }
    }

    fn implicit_base(&self, decl: &TypeDecl) -> Option<SymbolKey> {
        let special = match decl.kind {
            TypeKind::Class => SpecialType::Object,
            TypeKind::Struct => SpecialType::ValueType,
            TypeKind::Enum => SpecialType::Enum,
            TypeKind::Interface | TypeKind::Error => return None,
        };
        if decl.name == SpecialType::Object.qualified_name() {
            return None;
        }
        self.scope?.get(special.qualified_name()).copied()
    }

    fn resolve(&mut self, name: &SmolStr) -> SymbolKey {
        if let Some(&key) = self.scope.and_then(|scope| scope.get(name)) {
            return key;
        }
        if let Some(&key) = self.error_types.get(name) {
            return key;
        }

        debug!(%name, "unresolved type name");
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(Decl {
            origin: DeclOrigin::Unresolved,
            body: DeclBody::Type {
                decl: TypeDecl::new(TypeKind::Error, name.clone()),
                members: Vec::new(),
            },
        });
        let key = self.interner.intern(id, None);
        self.error_types.insert(name.clone(), key);
        key
    }
}

// ============================================================================
// WORKSPACE
// ============================================================================

/// A bound, immutable workspace.
#[derive(Debug)]
pub struct Workspace {
    projects: Vec<ProjectData>,
    assemblies: Vec<AssemblyData>,
    files: FxHashMap<FileId, SmolStr>,
    decls: Vec<Decl>,
    keys: Vec<KeyData>,
    key_index: FxHashMap<KeyData, SymbolKey>,
    /// Indexed by `SymbolKey`.
    bindings: Vec<Binding>,
    project_scopes: Vec<Scope>,
    /// Every source type key, project by project in declaration order.
    source_types: Vec<SymbolKey>,
    source_members: Vec<SymbolKey>,
}

impl Workspace {
    /// Resolve a qualified type name as project `project` sees it.
    pub fn lookup(&self, project: ProjectId, name: &str) -> Option<Symbol> {
        let key = *self.project_scopes.get(project.index() as usize)?.get(name)?;
        Some(self.symbol(key, project))
    }

    /// The first member of `ty` named `name`.
    pub fn member(&self, ty: Symbol, name: &str) -> Option<Symbol> {
        self.type_members(ty.key())
            .iter()
            .copied()
            .find(|&key| self.member_decl(key).is_some_and(|decl| decl.name == name))
            .map(|key| self.symbol(key, ty.context()))
    }

    /// Resolve `Type.Member` as project `project` sees it.
    pub fn lookup_member(&self, project: ProjectId, type_name: &str, member: &str) -> Option<Symbol> {
        self.lookup(project, type_name)
            .and_then(|ty| self.member(ty, member))
    }

    pub fn project_name(&self, project: ProjectId) -> Option<&str> {
        self.projects.get(project.index() as usize).map(|p| p.name.as_str())
    }

    pub fn file_path(&self, file: FileId) -> Option<&str> {
        self.files.get(&file).map(SmolStr::as_str)
    }

    /// Declaration location of a source symbol.
    pub fn location(&self, symbol: Symbol) -> Option<Location> {
        let decl = self.decl(symbol.key())?;
        let DeclOrigin::Source(file) = decl.origin else {
            return None;
        };
        let range = match &decl.body {
            DeclBody::Type { decl, .. } => decl.range,
            DeclBody::Member { decl, .. } => decl.range,
        };
        Some(Location::new(file, range))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn key_data(&self, key: SymbolKey) -> Option<KeyData> {
        self.keys.get(key.index() as usize).copied()
    }

    fn decl(&self, key: SymbolKey) -> Option<&Decl> {
        let data = self.key_data(key)?;
        self.decls.get(data.decl.index())
    }

    fn member_decl(&self, key: SymbolKey) -> Option<&MemberDecl> {
        self.decl(key).and_then(Decl::member_decl)
    }

    fn binding(&self, key: SymbolKey) -> Option<&Binding> {
        self.bindings.get(key.index() as usize)
    }

    fn type_members(&self, key: SymbolKey) -> &[SymbolKey] {
        match self.binding(key) {
            Some(Binding::Type { members, .. }) => members,
            _ => &[],
        }
    }

    /// A handle for `key`. Source keys carry their own project; metadata
    /// keys take the context they were reached from.
    fn symbol(&self, key: SymbolKey, context: ProjectId) -> Symbol {
        let project = self.key_data(key).and_then(|data| data.project);
        Symbol::new(key, project.unwrap_or(context))
    }

    fn source_file(&self, key: SymbolKey) -> Option<FileId> {
        match self.decl(key)?.origin {
            DeclOrigin::Source(file) => Some(file),
            DeclOrigin::Metadata(_) | DeclOrigin::Unresolved => None,
        }
    }

    fn same_signature(&self, a: SymbolKey, b: SymbolKey) -> bool {
        match (self.member_decl(a), self.member_decl(b)) {
            (Some(a), Some(b)) => a.name == b.name && a.kind == b.kind,
            _ => false,
        }
    }

    fn explicit_interface(&self, member: SymbolKey) -> Option<SymbolKey> {
        match self.binding(member) {
            Some(Binding::Member {
                explicit_interface, ..
            }) => *explicit_interface,
            _ => None,
        }
    }

    /// Members of `ty` itself with the same name and kind as `member`.
    fn members_like(&self, ty: Symbol, member: Symbol) -> impl Iterator<Item = SymbolKey> + '_ {
        self.type_members(ty.key())
            .iter()
            .copied()
            .filter(move |&key| self.same_signature(key, member.key()))
    }

    /// The member of `ty` (or its bases) that implements `interface_member`.
    fn implementation_for(&self, ty: Symbol, interface_member: Symbol) -> Option<Symbol> {
        let interface = self.containing_type(interface_member)?;

        for level in std::iter::once(ty).chain(self.find_base_types(ty)) {
            if let Some(explicit) = self
                .members_like(level, interface_member)
                .find(|&key| self.explicit_interface(key) == Some(interface.key()))
            {
                return Some(self.symbol(explicit, level.context()));
            }
            if self.kind(level).is_interface() {
                continue;
            }
            if let Some(implicit) = self
                .members_like(level, interface_member)
                .find(|&key| self.explicit_interface(key).is_none())
            {
                return Some(self.symbol(implicit, level.context()));
            }
        }
        None
    }

    fn collect_all_interfaces(&self, interface: Symbol, visited: &mut SymbolSet, result: &mut Vec<Symbol>) {
        if !visited.insert(interface) {
            return;
        }
        for base in self.interfaces(interface).into_iter().rev() {
            self.collect_all_interfaces(base, visited, result);
        }
        result.push(interface);
    }

    /// The source declaration behind a metadata symbol of a built-from
    /// assembly, or `symbol` itself.
    fn source_definition_of(&self, symbol: Symbol) -> Symbol {
        let Some(decl) = self.decl(symbol.key()) else {
            return symbol;
        };
        let DeclOrigin::Metadata(assembly) = decl.origin else {
            return symbol;
        };
        let Some(project) = self.assemblies[assembly.index() as usize].built_from else {
            return symbol;
        };

        let source_type = |name: &str| -> Option<Symbol> {
            let candidate = self.lookup(project, name)?;
            self.is_in_source(candidate).then_some(candidate)
        };

        let definition = match &decl.body {
            DeclBody::Type { decl, .. } => source_type(&decl.name),
            DeclBody::Member { .. } => self
                .containing_type(symbol)
                .and_then(|container| self.decl(container.key())?.type_decl().map(|d| d.name.clone()))
                .and_then(|name| source_type(&name))
                .and_then(|ty| self.members_like(ty, symbol).next())
                .map(|key| self.symbol(key, project)),
        };
        definition.unwrap_or(symbol)
    }

    /// Whether `a` and `b` denote the same declaration once metadata from a
    /// built-from assembly is mapped back to its source.
    fn same_definition(&self, a: Symbol, b: Symbol) -> bool {
        a == b || self.source_definition_of(a) == self.source_definition_of(b)
    }

    fn overrides_of(&self, symbol: Symbol, token: &CancellationToken) -> Result<Vec<Symbol>> {
        let mut overrides = Vec::new();
        for &key in &self.source_members {
            check_cancelled(token)?;
            let candidate = self.symbol(key, symbol.context());
            if self.same_definition(candidate, symbol) {
                continue;
            }
            let mut seen = SymbolSet::default();
            let mut current = self.overridden_member(candidate);
            while let Some(overridden) = current {
                if self.same_definition(overridden, symbol) {
                    overrides.push(candidate);
                    break;
                }
                if !seen.insert(overridden) {
                    break;
                }
                current = self.overridden_member(overridden);
            }
        }
        Ok(overrides)
    }
}

fn check_cancelled(token: &CancellationToken) -> Result<()> {
    if token.is_cancelled() {
        Err(FinderError::Cancelled)
    } else {
        Ok(())
    }
}

#[async_trait]
impl SymbolHost for Workspace {
    fn name(&self, symbol: Symbol) -> SmolStr {
        let Some(decl) = self.decl(symbol.key()) else {
            return format_smolstr!("<unknown {:?}>", symbol.key());
        };
        match &decl.body {
            DeclBody::Type { decl, .. } => decl.name.clone(),
            DeclBody::Member { decl, .. } => match self.containing_type(symbol) {
                Some(container) => format_smolstr!("{}.{}", self.name(container), decl.name),
                None => decl.name.clone(),
            },
        }
    }

    fn kind(&self, symbol: Symbol) -> SymbolKind {
        match self.decl(symbol.key()).map(|decl| &decl.body) {
            Some(DeclBody::Type { decl, .. }) => SymbolKind::Type(decl.kind),
            Some(DeclBody::Member { decl, .. }) => SymbolKind::Member(decl.kind),
            None => SymbolKind::Type(TypeKind::Error),
        }
    }

    fn base_type(&self, symbol: Symbol) -> Option<Symbol> {
        match self.binding(symbol.key())? {
            Binding::Type { base, .. } => base.map(|key| self.symbol(key, symbol.context())),
            Binding::Member { .. } => None,
        }
    }

    fn interfaces(&self, symbol: Symbol) -> Vec<Symbol> {
        match self.binding(symbol.key()) {
            Some(Binding::Type { interfaces, .. }) => interfaces
                .iter()
                .map(|&key| self.symbol(key, symbol.context()))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn all_interfaces(&self, symbol: Symbol) -> Vec<Symbol> {
        // Post-order from the root base class down, last interface first,
        // then reversed: each interface ends up before the ones it extends.
        let mut levels = self.find_base_types(symbol);
        levels.insert(0, symbol);
        let mut visited = SymbolSet::default();
        let mut result = Vec::new();
        for level in levels.into_iter().rev() {
            for interface in self.interfaces(level).into_iter().rev() {
                self.collect_all_interfaces(interface, &mut visited, &mut result);
            }
        }
        result.reverse();
        result
    }

    fn containing_type(&self, symbol: Symbol) -> Option<Symbol> {
        match self.binding(symbol.key())? {
            Binding::Member { container, .. } => Some(self.symbol(*container, symbol.context())),
            Binding::Type { .. } => None,
        }
    }

    fn original_definition(&self, symbol: Symbol) -> Symbol {
        // No constructed generics in this model.
        symbol
    }

    fn is_in_source(&self, symbol: Symbol) -> bool {
        self.source_file(symbol.key()).is_some()
    }

    fn special_type(&self, symbol: Symbol) -> Option<SpecialType> {
        let decl = self.decl(symbol.key())?;
        if decl.origin == DeclOrigin::Unresolved {
            return None;
        }
        SpecialType::from_qualified_name(&decl.type_decl()?.name)
    }

    fn overridden_member(&self, symbol: Symbol) -> Option<Symbol> {
        let decl = self.member_decl(symbol.key())?;
        if decl.modifier != super::MemberModifier::Override {
            return None;
        }
        let container = self.containing_type(symbol)?;
        self.find_base_types(container).into_iter().find_map(|base| {
            self.members_like(base, symbol)
                .find(|&key| self.explicit_interface(key).is_none())
                .map(|key| self.symbol(key, base.context()))
        })
    }

    fn explicit_or_implicit_interface_implementations(&self, symbol: Symbol) -> Vec<Symbol> {
        let Some(container) = self.containing_type(symbol) else {
            return Vec::new();
        };

        let mut implemented = Vec::new();
        for interface in self.all_interfaces(container) {
            for key in self.members_like(interface, symbol) {
                let interface_member = self.symbol(key, interface.context());
                if self.implementation_for(container, interface_member) == Some(symbol) {
                    implemented.push(interface_member);
                }
            }
        }

        if let Some(explicit) = self.explicit_interface(symbol.key()) {
            if implemented.is_empty() {
                warn!(
                    member = %self.name(symbol),
                    interface = %self.name(self.symbol(explicit, symbol.context())),
                    "explicit implementation matches no interface member"
                );
            }
        }
        implemented
    }

    async fn find_linked_symbols(&self, symbol: Symbol, token: &CancellationToken) -> Result<Vec<Symbol>> {
        check_cancelled(token)?;
        let (Some(file), Some(data)) = (self.source_file(symbol.key()), self.key_data(symbol.key())) else {
            return Ok(vec![symbol]);
        };

        let linked = self
            .projects
            .iter()
            .enumerate()
            .filter(|(_, project)| project.files.contains(&file))
            .filter_map(|(index, _)| {
                let project = ProjectId::new(index as u32);
                self.key_index
                    .get(&KeyData {
                        decl: data.decl,
                        project: Some(project),
                    })
                    .map(|&key| Symbol::new(key, project))
            })
            .collect::<Vec<_>>();

        if linked.is_empty() {
            return Ok(vec![symbol]);
        }
        Ok(linked)
    }

    async fn find_source_definition(&self, symbol: Symbol, token: &CancellationToken) -> Result<Symbol> {
        check_cancelled(token)?;
        Ok(self.source_definition_of(symbol))
    }

    async fn derived_types_and_implementations(
        &self,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>> {
        let is_interface = self.kind(symbol).is_interface();
        let mut derived = Vec::new();
        for &key in &self.source_types {
            check_cancelled(token)?;
            let candidate = self.symbol(key, symbol.context());
            if self.same_definition(candidate, symbol) {
                continue;
            }
            let ancestors = if is_interface {
                self.all_interfaces(candidate)
            } else {
                self.find_base_types(candidate)
            };
            let reaches = ancestors.into_iter().any(|ancestor| self.same_definition(ancestor, symbol));
            if reaches {
                derived.push(candidate);
            }
        }
        Ok(derived)
    }

    async fn find_overrides(&self, symbol: Symbol, token: &CancellationToken) -> Result<Vec<Symbol>> {
        self.overrides_of(symbol, token)
    }

    async fn implementing_symbols_for_type_member(
        &self,
        symbol: Symbol,
        token: &CancellationToken,
    ) -> Result<Vec<Symbol>> {
        let is_interface_member = self
            .containing_type(symbol)
            .is_some_and(|container| self.kind(container).is_interface());
        if !is_interface_member {
            return Ok(Vec::new());
        }

        let mut implementing = SymbolSet::default();
        for &key in &self.source_members {
            check_cancelled(token)?;
            let candidate = self.symbol(key, symbol.context());
            if self.same_definition(candidate, symbol)
                || !self
                    .explicit_or_implicit_interface_implementations(candidate)
                    .into_iter()
                    .any(|implemented| self.same_definition(implemented, symbol))
            {
                continue;
            }
            implementing.insert(candidate);
            implementing.extend(self.overrides_of(candidate, token)?);
        }
        Ok(implementing.into_iter().collect())
    }
}
