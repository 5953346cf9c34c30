//! Symbol tables the resolution engine feeds.
//!
//! This is the conventional scope abstraction the lazy import machinery
//! composes with:
//! - [`Symbol`], [`SymbolKind`] - resolved bindings, one category each
//! - [`SymbolTable`] - an append-only, per-category table
//!
//! Depends only on `base`.

mod symbol;
mod table;

pub use symbol::{Symbol, SymbolKind};
pub use table::SymbolTable;
