//! Lazy import resolution.
//!
//! Import directives are not interpreted when a file is parsed; they are
//! indexed, and interpreted one by one as name queries actually need
//! them:
//! - [`ImportIndex`] - partitions directives into all-under vs. exact
//! - [`FileImports`] - per-file provider (default imports + the file's)
//! - [`LazyImportScope`] - resolves relevant directives on demand,
//!   at most once per `(directive, mode)` pair
//! - [`Scope`] - tagged scope value dispatching the lookup capability set
//!
//! The work of turning a directive into symbols belongs to the
//! type-checking layer, behind [`DirectiveResolver`].

mod directive;
mod index;
mod scope;

pub use directive::{DirectiveId, ImportDirective, ImportPath};
pub use index::{FileImports, ImportIndex};
pub use scope::{DirectiveResolver, LazyImportScope, ResolveMode, Scope};

use thiserror::Error;

/// Errors from the resolve layer.
///
/// `ReentrantIndexBuild` and `Unsupported` are programming-error class:
/// they report a broken caller invariant, not a name that failed to
/// resolve. Soft misses are `Ok(None)` / empty answers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The lazy partition was queried from within its own build step.
    #[error("import index re-entered during its own construction")]
    ReentrantIndexBuild,

    /// The operation has no meaning for this scope kind.
    #[error("{0} is not supported by an import scope")]
    Unsupported(&'static str),

    /// The external resolver could not interpret a directive.
    #[error("cannot resolve import `{path}`: {message}")]
    Directive { path: String, message: String },
}
