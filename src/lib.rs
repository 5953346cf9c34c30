//! # lumen-resolve
//!
//! Lazy import resolution and member grouping for the Lumen compiler
//! front-end.
//!
//! Import directives are indexed up front but interpreted only when a
//! name query actually needs them, each at most once per granularity;
//! class members are scanned once per class into per-name groups with
//! convention-derived property accessors.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! members → per-class member grouping (fields, methods, accessors)
//! resolve → import directive index + lazy import scope
//!   ↓
//! scope   → append-only symbol tables fed by import resolution
//!   ↓
//! base    → primitives (FileId, Name, source spans)
//! ```
//!
//! Parsing, the type checker (which supplies the
//! [`resolve::DirectiveResolver`]), and diagnostics rendering live in
//! other crates of the front-end.

/// Foundation types: FileId, Name, source spans
pub mod base;

/// Per-class member grouping
pub mod members;

/// Lazy import resolution
pub mod resolve;

/// Symbol tables fed by import resolution
pub mod scope;

// Re-export commonly needed items
pub use base::{FileId, Name};
pub use resolve::{DirectiveResolver, ImportDirective, LazyImportScope, ResolveMode};
pub use scope::{Symbol, SymbolKind, SymbolTable};
