//! Linked copies of one logical symbol.

use std::fmt;
use std::sync::Arc;

use crate::symbols::{Symbol, SymbolSet};

/// An immutable, non-empty, order-preserving group of linked symbols.
///
/// Cloning is cheap; the members are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct SymbolGroup {
    symbols: Arc<[Symbol]>,
}

impl SymbolGroup {
    /// Build a group from linked copies, dropping duplicates.
    ///
    /// Returns `None` for an empty input.
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Option<Self> {
        let unique: SymbolSet = symbols.into_iter().collect();
        if unique.is_empty() {
            return None;
        }
        Some(Self {
            symbols: unique.into_iter().collect(),
        })
    }

    pub fn single(symbol: Symbol) -> Self {
        Self {
            symbols: Arc::from([symbol]),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// A group holds at least one symbol, so this is always false.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> Symbol {
        self.symbols[0]
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }
}

impl<'a> IntoIterator for &'a SymbolGroup {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for SymbolGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.symbols.iter()).finish()
    }
}
