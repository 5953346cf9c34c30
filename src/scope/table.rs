//! Append-only symbol tables.

use indexmap::IndexMap;

use crate::base::Name;
use super::symbol::{Symbol, SymbolKind};

/// An append-only symbol table, keyed per declaration category.
///
/// Bindings are only ever added, never removed or replaced:
/// - classifier and namespace slots are first-come: a later binding under
///   an occupied name is silently ignored, since whoever feeds the table
///   (the directive resolver) owns the shadow/merge policy and inserts in
///   the order it wants to win;
/// - value and function slots accumulate, preserving insertion order, so
///   overload sets stay intact.
///
/// Backed by [`IndexMap`], so enumeration order is insertion order and
/// therefore deterministic for a fixed insertion sequence.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    classifiers: IndexMap<Name, Symbol>,
    namespaces: IndexMap<Name, Symbol>,
    values: IndexMap<Name, Vec<Symbol>>,
    functions: IndexMap<Name, Vec<Symbol>>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol, routed by its kind.
    pub fn insert(&mut self, symbol: Symbol) {
        match symbol.kind {
            SymbolKind::Classifier => {
                self.classifiers.entry(symbol.name.clone()).or_insert(symbol);
            }
            SymbolKind::Namespace => {
                self.namespaces.entry(symbol.name.clone()).or_insert(symbol);
            }
            SymbolKind::Value => {
                self.values.entry(symbol.name.clone()).or_default().push(symbol);
            }
            SymbolKind::Function => {
                self.functions.entry(symbol.name.clone()).or_default().push(symbol);
            }
        }
    }

    /// Copy every binding of `other` into this table.
    ///
    /// Used to seed a lookup scope from a root namespace's members.
    pub fn absorb(&mut self, other: &SymbolTable) {
        for symbol in other.all() {
            self.insert(symbol);
        }
    }

    /// Look up a classifier by name.
    pub fn classifier(&self, name: &Name) -> Option<&Symbol> {
        self.classifiers.get(name)
    }

    /// Look up a namespace by name.
    pub fn namespace(&self, name: &Name) -> Option<&Symbol> {
        self.namespaces.get(name)
    }

    /// All value bindings under a name, in insertion order.
    pub fn values(&self, name: &Name) -> &[Symbol] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All function bindings under a name, in insertion order.
    pub fn functions(&self, name: &Name) -> &[Symbol] {
        self.functions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every binding in the table: classifiers, namespaces, values, then
    /// functions, each in insertion order.
    pub fn all(&self) -> Vec<Symbol> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.classifiers.values().cloned());
        out.extend(self.namespaces.values().cloned());
        out.extend(self.values.values().flatten().cloned());
        out.extend(self.functions.values().flatten().cloned());
        out
    }

    /// Total number of bindings.
    pub fn len(&self) -> usize {
        self.classifiers.len()
            + self.namespaces.len()
            + self.values.values().map(Vec::len).sum::<usize>()
            + self.functions.values().map(Vec::len).sum::<usize>()
    }

    /// Check if the table has no bindings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
