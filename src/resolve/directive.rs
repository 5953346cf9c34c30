//! Import directives and paths.

use std::fmt;

use crate::base::{FileId, Name, TextRange, synthetic_range};

/// Stable index of a directive within an [`ImportIndex`] arena.
///
/// Assigned once when the index takes ownership of its directives, and
/// used as the key for processed-state tracking; two textually identical
/// directives keep distinct ids.
///
/// [`ImportIndex`]: super::ImportIndex
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DirectiveId(u32);

impl DirectiveId {
    /// Create a DirectiveId from a raw index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DirectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DirectiveId({})", self.0)
    }
}

/// The path part of an import directive: `a::b::C`, or `a::b::*` for an
/// all-under ("wildcard") import.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ImportPath {
    segments: Vec<Name>,
    all_under: bool,
}

impl ImportPath {
    /// Build a path from its segments.
    pub fn new(segments: Vec<Name>, all_under: bool) -> Self {
        Self {
            segments,
            all_under,
        }
    }

    /// Parse a `::`-separated path, with a trailing `*` marking an
    /// all-under import. Returns `None` for text that yields no usable
    /// path (empty input, empty segments, a bare `*`).
    pub fn parse(text: &str) -> Option<Self> {
        let (body, all_under) = match text.strip_suffix("::*") {
            Some(body) => (body, true),
            None => (text, false),
        };
        if body.is_empty() || body == "*" {
            return None;
        }

        let mut segments = Vec::new();
        for segment in body.split("::") {
            if segment.is_empty() || segment == "*" {
                return None;
            }
            segments.push(Name::new(segment));
        }
        Some(Self::new(segments, all_under))
    }

    /// Whether this imports everything under the path.
    #[inline]
    pub fn is_all_under(&self) -> bool {
        self.all_under
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    /// The name a non-wildcard path imports: its last segment.
    /// `None` for all-under paths, which import no single name.
    pub fn imported_name(&self) -> Option<&Name> {
        if self.all_under {
            return None;
        }
        self.segments.last()
    }
}

impl fmt::Display for ImportPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("::")?;
            }
            f.write_str(segment.as_str())?;
        }
        if self.all_under {
            f.write_str("::*")?;
        }
        Ok(())
    }
}

/// A parsed import directive.
///
/// `path == None` models a directive whose path was malformed at parse
/// time; indexing drops such a directive unless an alias still keys it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImportDirective {
    /// The file the directive appears in (or is synthesized for).
    pub file: FileId,
    /// Source range of the directive; empty for synthetic directives.
    pub span: TextRange,
    /// The imported path, if one could be derived.
    pub path: Option<ImportPath>,
    /// Explicit `as` alias, if any.
    pub alias: Option<Name>,
}

impl ImportDirective {
    /// Create a directive as parsed from source.
    pub fn new(
        file: FileId,
        span: TextRange,
        path: Option<ImportPath>,
        alias: Option<Name>,
    ) -> Self {
        Self {
            file,
            span,
            path,
            alias,
        }
    }

    /// Synthesize a directive for a compiler default import.
    pub fn synthetic(file: FileId, path: ImportPath) -> Self {
        Self {
            file,
            span: synthetic_range(),
            path: Some(path),
            alias: None,
        }
    }

    /// Whether this is an all-under import.
    pub fn is_all_under(&self) -> bool {
        self.path.as_ref().is_some_and(ImportPath::is_all_under)
    }

    /// The name this directive binds in the importing scope: the explicit
    /// alias if present, otherwise the last segment of a non-wildcard
    /// path. `None` when the directive binds no single name.
    pub fn aliased_name(&self) -> Option<Name> {
        if let Some(alias) = &self.alias {
            return Some(alias.clone());
        }
        self.path.as_ref()?.imported_name().cloned()
    }
}

impl fmt::Display for ImportDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{path}")?,
            None => f.write_str("<malformed>")?,
        }
        if let Some(alias) = &self.alias {
            write!(f, " as {alias}")?;
        }
        Ok(())
    }
}
