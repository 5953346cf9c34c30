//! Indexing of import directives.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::base::{FileId, Name};
use super::ResolveError;
use super::directive::{DirectiveId, ImportDirective, ImportPath};

/// Classifies a flat collection of import directives into "always
/// relevant" (all-under) and "relevant when the queried name matches"
/// (exact, keyed by aliased name) sets, and answers per-name queries.
///
/// The partition is built lazily on the first query and reused for every
/// query after that. The index owns its directives; queries hand back
/// [`DirectiveId`]s and [`ImportIndex::directive`] resolves them.
pub struct ImportIndex {
    directives: Vec<ImportDirective>,
    state: RefCell<IndexState>,
}

/// Build state of the lazy partition.
///
/// `Building` is observable only if constructing the partition re-enters
/// the index, which means an upstream invariant was broken; the query
/// reports it instead of rebuilding or looping.
enum IndexState {
    NotBuilt,
    Building,
    Built(Partition),
}

#[derive(Default)]
struct Partition {
    /// All-under directives, in input order.
    wildcards: Vec<DirectiveId>,
    /// Exact directives keyed by the name they bind.
    exact: FxHashMap<Name, Vec<DirectiveId>>,
    /// Every exact directive in input order, for whole-scope enumeration.
    exact_order: Vec<DirectiveId>,
}

impl ImportIndex {
    /// Take ownership of a directive collection. Ids are assigned by
    /// position; the partition is deferred until the first query.
    pub fn new(directives: Vec<ImportDirective>) -> Self {
        Self {
            directives,
            state: RefCell::new(IndexState::NotBuilt),
        }
    }

    /// The directive behind an id.
    pub fn directive(&self, id: DirectiveId) -> &ImportDirective {
        &self.directives[id.index()]
    }

    /// Number of directives owned by the index, dropped ones included.
    pub fn directive_count(&self) -> usize {
        self.directives.len()
    }

    /// Directives that could bind `name`: every all-under directive (in
    /// input order), followed by the exact directives keyed by `name` (in
    /// input order). A name with no exact match still gets the all-under
    /// set: callers must process those for any query.
    pub fn relevant(&self, name: &Name) -> Result<Vec<DirectiveId>, ResolveError> {
        self.ensure_built()?;
        let state = self.state.borrow();
        let IndexState::Built(partition) = &*state else {
            return Err(ResolveError::ReentrantIndexBuild);
        };

        let mut out = partition.wildcards.clone();
        if let Some(exact) = partition.exact.get(name) {
            out.extend_from_slice(exact);
        }
        Ok(out)
    }

    /// Every indexed directive: all-under first, then all exact
    /// directives in input order. For whole-scope enumeration.
    pub fn all(&self) -> Result<Vec<DirectiveId>, ResolveError> {
        self.ensure_built()?;
        let state = self.state.borrow();
        let IndexState::Built(partition) = &*state else {
            return Err(ResolveError::ReentrantIndexBuild);
        };

        let mut out = partition.wildcards.clone();
        out.extend_from_slice(&partition.exact_order);
        Ok(out)
    }

    fn ensure_built(&self) -> Result<(), ResolveError> {
        {
            let state = self.state.borrow();
            match &*state {
                IndexState::Built(_) => return Ok(()),
                IndexState::Building => return Err(ResolveError::ReentrantIndexBuild),
                IndexState::NotBuilt => {}
            }
        }

        *self.state.borrow_mut() = IndexState::Building;
        let partition = self.build();
        *self.state.borrow_mut() = IndexState::Built(partition);
        Ok(())
    }

    fn build(&self) -> Partition {
        let mut partition = Partition::default();

        for (i, directive) in self.directives.iter().enumerate() {
            let id = DirectiveId::new(i as u32);
            if directive.is_all_under() {
                partition.wildcards.push(id);
            } else if let Some(name) = directive.aliased_name() {
                partition.exact.entry(name).or_default().push(id);
                partition.exact_order.push(id);
            } else {
                // neither a usable path nor an alias
                trace!(file = %directive.file, "dropping unusable import directive");
            }
        }

        debug!(
            wildcards = partition.wildcards.len(),
            exact = partition.exact_order.len(),
            "indexed import directives"
        );
        partition
    }
}

/// Per-file directive provider: the compiler's default imports plus the
/// file's own directives, indexed together.
///
/// The index is built on first use and shared, so several lazy scopes
/// derived from the same file reuse one partition.
pub struct FileImports {
    file: FileId,
    defaults: Vec<ImportPath>,
    directives: Vec<ImportDirective>,
    index: OnceCell<Rc<ImportIndex>>,
}

impl FileImports {
    /// Create a provider for `file`. `defaults` are the default-import
    /// paths every file sees; `directives` are the file's own.
    pub fn new(file: FileId, defaults: Vec<ImportPath>, directives: Vec<ImportDirective>) -> Self {
        Self {
            file,
            defaults,
            directives,
            index: OnceCell::new(),
        }
    }

    /// The file this provider serves.
    pub fn file(&self) -> FileId {
        self.file
    }

    /// The combined index: synthetic directives for the defaults first,
    /// then the file's directives. Memoized.
    pub fn index(&self) -> Rc<ImportIndex> {
        self.index
            .get_or_init(|| {
                let mut all = Vec::with_capacity(self.defaults.len() + self.directives.len());
                for path in &self.defaults {
                    all.push(ImportDirective::synthetic(self.file, path.clone()));
                }
                all.extend(self.directives.iter().cloned());
                Rc::new(ImportIndex::new(all))
            })
            .clone()
    }
}
