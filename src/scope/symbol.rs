//! Symbols bound into scopes.

use std::fmt;

use smol_str::SmolStr;

use crate::base::Name;

/// The declaration category a symbol binds under.
///
/// Lookup is per-category: a classifier and a function may share a name
/// without shadowing each other.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SymbolKind {
    /// A class, interface, enum, or type alias.
    Classifier,
    /// A package-like namespace.
    Namespace,
    /// A property or other value binding.
    Value,
    /// A callable.
    Function,
}

impl SymbolKind {
    /// Whether this kind is introduced by classes-only resolution.
    pub fn is_class_like(self) -> bool {
        matches!(self, SymbolKind::Classifier | SymbolKind::Namespace)
    }
}

/// A resolved binding, as produced by the directive resolver.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Symbol {
    /// Simple name the symbol is bound under.
    pub name: Name,
    /// Fully qualified path of the declaration, `::`-separated.
    pub qualified: SmolStr,
    /// Declaration category.
    pub kind: SymbolKind,
}

impl Symbol {
    /// Create a symbol of the given kind.
    pub fn new(kind: SymbolKind, name: impl Into<Name>, qualified: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            qualified: qualified.into(),
            kind,
        }
    }

    /// Shorthand for a classifier symbol.
    pub fn classifier(name: impl Into<Name>, qualified: impl Into<SmolStr>) -> Self {
        Self::new(SymbolKind::Classifier, name, qualified)
    }

    /// Shorthand for a namespace symbol.
    pub fn namespace(name: impl Into<Name>, qualified: impl Into<SmolStr>) -> Self {
        Self::new(SymbolKind::Namespace, name, qualified)
    }

    /// Shorthand for a value symbol.
    pub fn value(name: impl Into<Name>, qualified: impl Into<SmolStr>) -> Self {
        Self::new(SymbolKind::Value, name, qualified)
    }

    /// Shorthand for a function symbol.
    pub fn function(name: impl Into<Name>, qualified: impl Into<SmolStr>) -> Self {
        Self::new(SymbolKind::Function, name, qualified)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({} = {})", self.kind, self.name, self.qualified)
    }
}
