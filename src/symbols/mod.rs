//! Symbol handles and the metadata-aware identity they compare by.
//!
//! A [`Symbol`] is an opaque handle handed out by a [`SymbolHost`]. Two handles
//! are equal exactly when their [`SymbolKey`]s are equal: the host assigns one
//! key to every metadata-equivalent instance (the same metadata type seen from
//! several compilations), and distinct keys to linked source copies (the same
//! declaration compiled by several projects).
//!
//! Every set and map in this crate is keyed by `Symbol`, so this equality is
//! the only one in play.
//!
//! [`SymbolHost`]: crate::host::SymbolHost

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

use crate::base::ProjectId;
use crate::finders::SymbolGroup;

/// Identity of a symbol, shared by all metadata-equivalent instances.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SymbolKey(pub u32);

impl SymbolKey {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolKey({})", self.0)
    }
}

/// A symbol as observed from one compilation context.
///
/// `context` records which project produced this instance. It does not take
/// part in equality, hashing or ordering.
#[derive(Copy, Clone)]
pub struct Symbol {
    key: SymbolKey,
    context: ProjectId,
}

impl Symbol {
    #[inline]
    pub const fn new(key: SymbolKey, context: ProjectId) -> Self {
        Self { key, context }
    }

    /// The metadata-aware identity of this symbol.
    #[inline]
    pub const fn key(self) -> SymbolKey {
        self.key
    }

    /// The project this instance was observed from.
    #[inline]
    pub const fn context(self) -> ProjectId {
        self.context
    }

    /// The same symbol as seen from another project.
    #[inline]
    pub const fn in_context(self, context: ProjectId) -> Self {
        Self { key: self.key, context }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({} in {})", self.key.0, self.context)
    }
}

/// Insertion-ordered set of symbols.
pub type SymbolSet = IndexSet<Symbol, FxBuildHasher>;

/// Incoming edges for topological sorting: symbol → symbols that must precede it.
pub type EdgeMap = IndexMap<Symbol, SymbolSet, FxBuildHasher>;

/// Finder output: original definition → group of its linked copies.
pub type SymbolGroupMap = IndexMap<Symbol, SymbolGroup, FxBuildHasher>;

/// What kind of declaration a symbol denotes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Type(TypeKind),
    Member(MemberKind),
}

impl SymbolKind {
    pub fn is_type(self) -> bool {
        matches!(self, SymbolKind::Type(_))
    }

    pub fn is_member(self) -> bool {
        matches!(self, SymbolKind::Member(_))
    }

    pub fn is_interface(self) -> bool {
        matches!(self, SymbolKind::Type(TypeKind::Interface))
    }

    pub fn is_error_type(self) -> bool {
        matches!(self, SymbolKind::Type(TypeKind::Error))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Enum,
    Interface,
    /// A type reference that could not be resolved.
    Error,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Property,
    Event,
    Indexer,
}

/// Universal base types every class, struct or enum implicitly derives from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecialType {
    /// `System.Object`
    Object,
    /// `System.ValueType`
    ValueType,
    /// `System.Enum`
    Enum,
}

impl SpecialType {
    /// The fully qualified metadata name of this type.
    pub const fn qualified_name(self) -> &'static str {
        match self {
            SpecialType::Object => "System.Object",
            SpecialType::ValueType => "System.ValueType",
            SpecialType::Enum => "System.Enum",
        }
    }

    pub fn from_qualified_name(name: &str) -> Option<Self> {
        match name {
            "System.Object" => Some(SpecialType::Object),
            "System.ValueType" => Some(SpecialType::ValueType),
            "System.Enum" => Some(SpecialType::Enum),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_context() {
        let a = Symbol::new(SymbolKey::new(4), ProjectId::new(0));
        let b = Symbol::new(SymbolKey::new(4), ProjectId::new(1));
        let c = Symbol::new(SymbolKey::new(5), ProjectId::new(0));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_set_deduplicates_metadata_equivalents() {
        let mut set = SymbolSet::default();
        set.insert(Symbol::new(SymbolKey::new(1), ProjectId::new(0)));
        set.insert(Symbol::new(SymbolKey::new(1), ProjectId::new(3)));
        set.insert(Symbol::new(SymbolKey::new(2), ProjectId::new(0)));

        assert_eq!(set.len(), 2);
        // First insertion wins
        assert_eq!(set[0].context(), ProjectId::new(0));
    }

    #[test]
    fn test_in_context_keeps_identity() {
        let a = Symbol::new(SymbolKey::new(9), ProjectId::new(0));
        let b = a.in_context(ProjectId::new(2));
        assert_eq!(a, b);
        assert_eq!(b.context(), ProjectId::new(2));
    }

    #[test]
    fn test_special_type_names() {
        for special in [SpecialType::Object, SpecialType::ValueType, SpecialType::Enum] {
            assert_eq!(SpecialType::from_qualified_name(special.qualified_name()), Some(special));
        }
        assert_eq!(SpecialType::from_qualified_name("System.String"), None);
    }

    #[test]
    fn test_kind_predicates() {
        assert!(SymbolKind::Type(TypeKind::Interface).is_interface());
        assert!(SymbolKind::Type(TypeKind::Error).is_error_type());
        assert!(SymbolKind::Member(MemberKind::Method).is_member());
        assert!(!SymbolKind::Member(MemberKind::Event).is_type());
    }
}
