//! Lazy, import-backed scopes.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::base::Name;
use crate::scope::{Symbol, SymbolTable};
use super::ResolveError;
use super::directive::{DirectiveId, ImportDirective};
use super::index::ImportIndex;

/// Granularity at which a directive is resolved.
///
/// Classifier, namespace, and enumeration queries only need the class-like
/// symbols a directive introduces; value and function queries need
/// everything. A directive may therefore be resolved twice (once per
/// mode) but never twice in the same mode.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ResolveMode {
    /// Bind only classifiers and namespaces.
    ClassesOnly,
    /// Bind everything the directive introduces.
    Full,
}

impl ResolveMode {
    const fn bit(self) -> u8 {
        match self {
            ResolveMode::ClassesOnly => 1,
            ResolveMode::Full => 2,
        }
    }
}

/// Turns one directive into bindings on an accumulating table.
///
/// Supplied by the type-checking layer. The resolver owns the shadowing /
/// merge policy for names bound by more than one directive; the lazy scope
/// only guarantees call order (all-under before exact) and at-most-once
/// invocation per `(directive, mode)` pair.
pub trait DirectiveResolver {
    /// Bind whatever `directive` introduces at `mode` granularity into
    /// `target`, resolving the directive's path against `lookup`.
    fn resolve(
        &mut self,
        directive: &ImportDirective,
        target: &mut SymbolTable,
        lookup: &SymbolTable,
        mode: ResolveMode,
    ) -> Result<(), ResolveError>;
}

impl<R: DirectiveResolver + ?Sized> DirectiveResolver for &mut R {
    fn resolve(
        &mut self,
        directive: &ImportDirective,
        target: &mut SymbolTable,
        lookup: &SymbolTable,
        mode: ResolveMode,
    ) -> Result<(), ResolveError> {
        (**self).resolve(directive, target, lookup, mode)
    }
}

/// A scope backed by import directives, resolved on demand.
///
/// Each query asks the index which directives could bind the queried
/// name, resolves the ones not yet processed at the required granularity,
/// and then answers from the accumulated table. The processed set and the
/// accumulated table only ever grow; once a `(directive, mode)` pair is
/// processed it stays processed for the life of the scope, so the final
/// accumulated contents do not depend on query order.
pub struct LazyImportScope<R> {
    resolver: R,
    index: Rc<ImportIndex>,
    /// One bitmask per directive id, one bit per mode. Grows on demand.
    processed: Vec<u8>,
    accumulated: SymbolTable,
    /// The table directive paths are resolved against, seeded from the
    /// root namespace at construction. Never mutated afterwards.
    lookup_scope: SymbolTable,
    debug_name: String,
}

impl<R: DirectiveResolver> LazyImportScope<R> {
    /// Create a scope over `index`, resolving directives with `resolver`
    /// against a lookup table seeded from `root`.
    pub fn new(
        resolver: R,
        index: Rc<ImportIndex>,
        root: &SymbolTable,
        debug_name: impl Into<String>,
    ) -> Self {
        let mut lookup_scope = SymbolTable::new();
        lookup_scope.absorb(root);
        Self {
            resolver,
            index,
            processed: Vec::new(),
            accumulated: SymbolTable::new(),
            lookup_scope,
            debug_name: debug_name.into(),
        }
    }

    /// Look up a classifier by name.
    pub fn classifier(&mut self, name: &Name) -> Result<Option<Symbol>, ResolveError> {
        let candidates = self.index.relevant(name)?;
        self.process(&candidates, ResolveMode::ClassesOnly)?;
        Ok(self.accumulated.classifier(name).cloned())
    }

    /// Look up a namespace by name.
    pub fn namespace(&mut self, name: &Name) -> Result<Option<Symbol>, ResolveError> {
        let candidates = self.index.relevant(name)?;
        self.process(&candidates, ResolveMode::ClassesOnly)?;
        Ok(self.accumulated.namespace(name).cloned())
    }

    /// Look up all value bindings under a name.
    pub fn values(&mut self, name: &Name) -> Result<Vec<Symbol>, ResolveError> {
        let candidates = self.index.relevant(name)?;
        self.process(&candidates, ResolveMode::Full)?;
        Ok(self.accumulated.values(name).to_vec())
    }

    /// Look up all function bindings under a name.
    pub fn functions(&mut self, name: &Name) -> Result<Vec<Symbol>, ResolveError> {
        let candidates = self.index.relevant(name)?;
        self.process(&candidates, ResolveMode::Full)?;
        Ok(self.accumulated.functions(name).to_vec())
    }

    /// Enumerate everything importable: resolves every indexed directive
    /// at classes-only granularity, then lists the accumulated bindings.
    pub fn all_symbols(&mut self) -> Result<Vec<Symbol>, ResolveError> {
        let candidates = self.index.all()?;
        self.process(&candidates, ResolveMode::ClassesOnly)?;
        Ok(self.accumulated.all())
    }

    /// Import scopes have no backing fields.
    pub fn property_by_backing_field(&self, _field: &Name) -> Result<Option<Symbol>, ResolveError> {
        Err(ResolveError::Unsupported("backing-field property lookup"))
    }

    /// Import scopes declare no labels.
    pub fn declarations_by_label(&self, _label: &Name) -> Result<Vec<Symbol>, ResolveError> {
        Err(ResolveError::Unsupported("label-scoped declaration lookup"))
    }

    /// Import scopes contribute no implicit receivers.
    pub fn implicit_receivers(&self) -> Result<Vec<Symbol>, ResolveError> {
        Err(ResolveError::Unsupported("implicit-receiver hierarchy lookup"))
    }

    /// The bindings accumulated so far.
    pub fn accumulated(&self) -> &SymbolTable {
        &self.accumulated
    }

    /// The resolver driving this scope.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    fn process(&mut self, candidates: &[DirectiveId], mode: ResolveMode) -> Result<(), ResolveError> {
        for &id in candidates {
            if self.is_processed(id, mode) {
                continue;
            }

            let index = Rc::clone(&self.index);
            let directive = index.directive(id);
            debug!(scope = %self.debug_name, directive = %directive, ?mode, "resolving import");

            let outcome = self.resolver.resolve(
                directive,
                &mut self.accumulated,
                &self.lookup_scope,
                mode,
            );
            // processed even on failure: the resolver may have partially
            // bound, and at-most-once must hold
            self.mark_processed(id, mode);
            outcome?;
        }
        Ok(())
    }

    fn is_processed(&self, id: DirectiveId, mode: ResolveMode) -> bool {
        self.processed
            .get(id.index())
            .is_some_and(|bits| bits & mode.bit() != 0)
    }

    fn mark_processed(&mut self, id: DirectiveId, mode: ResolveMode) {
        if self.processed.len() <= id.index() {
            self.processed.resize(id.index() + 1, 0);
        }
        self.processed[id.index()] |= mode.bit();
    }
}

impl<R> fmt::Debug for LazyImportScope<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LazyImportScope({})", self.debug_name)
    }
}

/// A scope value, selected by kind at construction.
///
/// Downstream code holds one of these wherever "a scope" is expected; the
/// lookup capability set dispatches to the concrete kind.
pub enum Scope<R> {
    /// Ordinary declarations, answered straight from a table.
    Declarations(SymbolTable),
    /// Import directives, resolved lazily.
    Imports(LazyImportScope<R>),
}

impl<R: DirectiveResolver> Scope<R> {
    /// Look up a classifier by name.
    pub fn classifier(&mut self, name: &Name) -> Result<Option<Symbol>, ResolveError> {
        match self {
            Scope::Declarations(table) => Ok(table.classifier(name).cloned()),
            Scope::Imports(scope) => scope.classifier(name),
        }
    }

    /// Look up a namespace by name.
    pub fn namespace(&mut self, name: &Name) -> Result<Option<Symbol>, ResolveError> {
        match self {
            Scope::Declarations(table) => Ok(table.namespace(name).cloned()),
            Scope::Imports(scope) => scope.namespace(name),
        }
    }

    /// Look up all value bindings under a name.
    pub fn values(&mut self, name: &Name) -> Result<Vec<Symbol>, ResolveError> {
        match self {
            Scope::Declarations(table) => Ok(table.values(name).to_vec()),
            Scope::Imports(scope) => scope.values(name),
        }
    }

    /// Look up all function bindings under a name.
    pub fn functions(&mut self, name: &Name) -> Result<Vec<Symbol>, ResolveError> {
        match self {
            Scope::Declarations(table) => Ok(table.functions(name).to_vec()),
            Scope::Imports(scope) => scope.functions(name),
        }
    }

    /// Enumerate every binding the scope can produce.
    pub fn all_symbols(&mut self) -> Result<Vec<Symbol>, ResolveError> {
        match self {
            Scope::Declarations(table) => Ok(table.all()),
            Scope::Imports(scope) => scope.all_symbols(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::resolve::directive::ImportPath;
    use rustc_hash::FxHashMap;

    /// Binds canned symbols per directive text and counts invocations.
    #[derive(Default)]
    struct FakeResolver {
        bindings: FxHashMap<String, Vec<Symbol>>,
        calls: Vec<(String, ResolveMode)>,
    }

    impl FakeResolver {
        fn bind(&mut self, directive: &str, symbols: Vec<Symbol>) {
            self.bindings.insert(directive.to_string(), symbols);
        }
    }

    impl DirectiveResolver for FakeResolver {
        fn resolve(
            &mut self,
            directive: &ImportDirective,
            target: &mut SymbolTable,
            _lookup: &SymbolTable,
            mode: ResolveMode,
        ) -> Result<(), ResolveError> {
            self.calls.push((directive.to_string(), mode));
            if let Some(symbols) = self.bindings.get(&directive.to_string()) {
                for symbol in symbols {
                    if mode == ResolveMode::ClassesOnly && !symbol.kind.is_class_like() {
                        continue;
                    }
                    target.insert(symbol.clone());
                }
            }
            Ok(())
        }
    }

    fn index_of(texts: &[&str]) -> Rc<ImportIndex> {
        let directives = texts
            .iter()
            .map(|text| {
                ImportDirective::new(
                    FileId::new(0),
                    crate::base::synthetic_range(),
                    ImportPath::parse(text),
                    None,
                )
            })
            .collect();
        Rc::new(ImportIndex::new(directives))
    }

    #[test]
    fn test_query_triggers_only_relevant_directives() {
        let mut resolver = FakeResolver::default();
        resolver.bind("a::A", vec![Symbol::classifier("A", "a::A")]);
        resolver.bind("b::B", vec![Symbol::classifier("B", "b::B")]);

        let mut scope = LazyImportScope::new(
            resolver,
            index_of(&["a::A", "b::B"]),
            &SymbolTable::new(),
            "test",
        );

        let found = scope.classifier(&Name::new("A")).unwrap().unwrap();
        assert_eq!(found.qualified.as_str(), "a::A");

        // the directive for B was never touched
        let touched: Vec<_> = scope.resolver().calls.iter().map(|(d, _)| d.clone()).collect();
        assert_eq!(touched, ["a::A"]);
    }

    #[test]
    fn test_modes_are_tracked_separately() {
        let mut resolver = FakeResolver::default();
        resolver.bind(
            "m::x",
            vec![
                Symbol::classifier("x", "m::x"),
                Symbol::value("x", "m::x"),
            ],
        );

        let mut scope =
            LazyImportScope::new(resolver, index_of(&["m::x"]), &SymbolTable::new(), "test");

        let name = Name::new("x");
        assert!(scope.classifier(&name).unwrap().is_some());
        assert_eq!(scope.values(&name).unwrap().len(), 1);

        // one call per mode, not one total and not three
        assert_eq!(
            scope.resolver().calls,
            vec![
                ("m::x".to_string(), ResolveMode::ClassesOnly),
                ("m::x".to_string(), ResolveMode::Full),
            ]
        );
    }

    #[test]
    fn test_repeat_queries_do_not_re_resolve() {
        let mut resolver = FakeResolver::default();
        resolver.bind("m::x", vec![Symbol::classifier("x", "m::x")]);

        // borrowed resolvers work too; the scope releases it on drop
        {
            let mut scope = LazyImportScope::new(
                &mut resolver,
                index_of(&["m::x"]),
                &SymbolTable::new(),
                "test",
            );
            let name = Name::new("x");
            for _ in 0..3 {
                assert!(scope.classifier(&name).unwrap().is_some());
            }
        }
        assert_eq!(resolver.calls.len(), 1);
    }

    #[test]
    fn test_resolver_failure_still_marks_processed() {
        struct FailingResolver {
            calls: usize,
        }
        impl DirectiveResolver for FailingResolver {
            fn resolve(
                &mut self,
                directive: &ImportDirective,
                _target: &mut SymbolTable,
                _lookup: &SymbolTable,
                _mode: ResolveMode,
            ) -> Result<(), ResolveError> {
                self.calls += 1;
                Err(ResolveError::Directive {
                    path: directive.to_string(),
                    message: "no such package".to_string(),
                })
            }
        }

        let mut scope = LazyImportScope::new(
            FailingResolver { calls: 0 },
            index_of(&["missing::X"]),
            &SymbolTable::new(),
            "test",
        );

        let name = Name::new("X");
        assert!(scope.classifier(&name).is_err());
        // at-most-once holds even across a failure
        assert_eq!(scope.classifier(&name).unwrap(), None);
        assert_eq!(scope.resolver().calls, 1);
    }

    #[test]
    fn test_unsupported_operations_signal_not_empty() {
        let scope = LazyImportScope::new(
            FakeResolver::default(),
            index_of(&[]),
            &SymbolTable::new(),
            "test",
        );

        let name = Name::new("x");
        assert!(matches!(
            scope.property_by_backing_field(&name),
            Err(ResolveError::Unsupported(_))
        ));
        assert!(matches!(
            scope.declarations_by_label(&name),
            Err(ResolveError::Unsupported(_))
        ));
        assert!(matches!(
            scope.implicit_receivers(),
            Err(ResolveError::Unsupported(_))
        ));
    }

    #[test]
    fn test_scope_variants_share_the_capability_set() {
        let mut table = SymbolTable::new();
        table.insert(Symbol::classifier("T", "m::T"));
        let mut declarations: Scope<FakeResolver> = Scope::Declarations(table);
        assert!(declarations.classifier(&Name::new("T")).unwrap().is_some());

        let mut resolver = FakeResolver::default();
        resolver.bind("m::T", vec![Symbol::classifier("T", "m::T")]);
        let mut imports = Scope::Imports(LazyImportScope::new(
            resolver,
            index_of(&["m::T"]),
            &SymbolTable::new(),
            "test",
        ));
        assert!(imports.classifier(&Name::new("T")).unwrap().is_some());
    }

    #[test]
    fn test_lookup_scope_is_seeded_from_root() {
        struct RootEchoResolver;
        impl DirectiveResolver for RootEchoResolver {
            fn resolve(
                &mut self,
                _directive: &ImportDirective,
                target: &mut SymbolTable,
                lookup: &SymbolTable,
                _mode: ResolveMode,
            ) -> Result<(), ResolveError> {
                // re-bind whatever the root namespace knows under `core`
                if let Some(symbol) = lookup.namespace(&Name::new("core")) {
                    target.insert(symbol.clone());
                }
                Ok(())
            }
        }

        let mut root = SymbolTable::new();
        root.insert(Symbol::namespace("core", "core"));

        let mut scope = LazyImportScope::new(
            RootEchoResolver,
            index_of(&["core::*"]),
            &root,
            "test",
        );

        assert!(scope.namespace(&Name::new("core")).unwrap().is_some());
    }

    #[test]
    fn test_classes_only_queries_do_not_bind_values() {
        let mut resolver = FakeResolver::default();
        resolver.bind("m::v", vec![Symbol::value("v", "m::v")]);

        let mut scope =
            LazyImportScope::new(resolver, index_of(&["m::v"]), &SymbolTable::new(), "test");

        assert_eq!(scope.classifier(&Name::new("v")).unwrap(), None);
        assert!(scope.accumulated().is_empty());
        // the full-mode query still finds it
        assert_eq!(scope.values(&Name::new("v")).unwrap().len(), 1);
    }
}
