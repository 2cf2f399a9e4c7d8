//! Declarations fed to the in-memory [`Workspace`](super::Workspace).
//!
//! These describe what a compiler front end would have bound: a type's kind,
//! the names of its base type and interfaces, and its members. Names are
//! resolved per compilation when the workspace is built.

use std::fmt;

use smol_str::SmolStr;

use crate::base::{AssemblyId, FileId, TextRange, TextSize};
use crate::symbols::{MemberKind, TypeKind};

/// A declared type, as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    /// Fully qualified name, e.g. `Shapes.Circle`.
    pub name: SmolStr,
    pub kind: TypeKind,
    /// Explicit base class. Classes, structs and enums get the universal
    /// base when absent.
    pub base: Option<SmolStr>,
    pub interfaces: Vec<SmolStr>,
    pub members: Vec<MemberDecl>,
    pub range: TextRange,
}

impl TypeDecl {
    pub fn new(kind: TypeKind, name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind,
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            range: TextRange::default(),
        }
    }

    pub fn class(name: impl Into<SmolStr>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn structure(name: impl Into<SmolStr>) -> Self {
        Self::new(TypeKind::Struct, name)
    }

    pub fn enumeration(name: impl Into<SmolStr>) -> Self {
        Self::new(TypeKind::Enum, name)
    }

    pub fn interface(name: impl Into<SmolStr>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    /// Set the base class.
    pub fn extends(mut self, base: impl Into<SmolStr>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Add a directly implemented (or, for interfaces, extended) interface.
    pub fn implements(mut self, interface: impl Into<SmolStr>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.range = range(start, end);
        self
    }
}

/// How a member participates in overriding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MemberModifier {
    #[default]
    None,
    Virtual,
    Abstract,
    Override,
}

/// A declared member of a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: SmolStr,
    pub kind: MemberKind,
    pub modifier: MemberModifier,
    /// Interface named by an explicit implementation (`void IFoo.Bar()`).
    pub explicit_interface: Option<SmolStr>,
    pub range: TextRange,
}

impl MemberDecl {
    pub fn new(kind: MemberKind, name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind,
            modifier: MemberModifier::None,
            explicit_interface: None,
            range: TextRange::default(),
        }
    }

    pub fn method(name: impl Into<SmolStr>) -> Self {
        Self::new(MemberKind::Method, name)
    }

    pub fn property(name: impl Into<SmolStr>) -> Self {
        Self::new(MemberKind::Property, name)
    }

    pub fn event(name: impl Into<SmolStr>) -> Self {
        Self::new(MemberKind::Event, name)
    }

    pub fn indexer() -> Self {
        Self::new(MemberKind::Indexer, "this[]")
    }

    pub fn virtual_(mut self) -> Self {
        self.modifier = MemberModifier::Virtual;
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.modifier = MemberModifier::Abstract;
        self
    }

    pub fn override_(mut self) -> Self {
        self.modifier = MemberModifier::Override;
        self
    }

    pub fn explicit_for(mut self, interface: impl Into<SmolStr>) -> Self {
        self.explicit_interface = Some(interface.into());
        self
    }

    pub fn at(mut self, start: u32, end: u32) -> Self {
        self.range = range(start, end);
        self
    }
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end.max(start)))
}

// ============================================================================
// INTERNAL DECLARATION ARENA
// ============================================================================

/// Index of a declaration in the workspace arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub(crate) struct DeclId(pub u32);

impl DeclId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}

/// Where a declaration came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DeclOrigin {
    Source(FileId),
    Metadata(AssemblyId),
    /// Stand-in for a type name that did not resolve.
    Unresolved,
}

#[derive(Clone, Debug)]
pub(crate) enum DeclBody {
    Type {
        decl: TypeDecl,
        members: Vec<DeclId>,
    },
    Member {
        decl: MemberDecl,
        container: DeclId,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct Decl {
    pub origin: DeclOrigin,
    pub body: DeclBody,
}

impl Decl {
    pub(crate) fn type_decl(&self) -> Option<&TypeDecl> {
        match &self.body {
            DeclBody::Type { decl, .. } => Some(decl),
            DeclBody::Member { .. } => None,
        }
    }

    pub(crate) fn member_decl(&self) -> Option<&MemberDecl> {
        match &self.body {
            DeclBody::Member { decl, .. } => Some(decl),
            DeclBody::Type { .. } => None,
        }
    }
}
