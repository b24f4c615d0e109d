//! The identifier resolver
//!
//! Keeps, for every declaration name, the chain of declarations currently
//! sharing that name, ordered so the innermost shadowing declaration is found
//! first.
//!
//! Most names only ever have one declaration, so a name starts out pointing
//! straight at that declaration and only gets a [`NameEntry`] once a second
//! declaration appears. From then on the name stays in chain form for the
//! resolver's lifetime.

use crate::config::LangOptions;
use crate::context::LookupContext;
use crate::error::ResolveError;
use crate::lookup::{Lookup, LookupMode};
use crate::scope::{ScopeKind, ScopeRef};
use cx_decl::{ContextId, DeclId, DeclTree};
use cx_intern::Symbol;
use la_arena::{Arena, Idx};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Entry ID
pub type EntryId = Idx<NameEntry>;

/// Declarations sharing a name, oldest first
#[derive(Debug, Clone, Default)]
pub struct NameEntry {
    decls: Vec<DeclId>,
}

impl NameEntry {
    /// Declarations in insertion order
    #[must_use]
    pub fn decls(&self) -> &[DeclId] {
        &self.decls
    }

    fn position(&self, decl: DeclId) -> Option<usize> {
        self.decls.iter().rposition(|&candidate| candidate == decl)
    }

    fn push(&mut self, decl: DeclId) {
        self.decls.push(decl);
    }

    /// Put `decl` directly after `shadow`, so lookups see `decl` first
    fn insert_shadowed(&mut self, decl: DeclId, shadow: DeclId) -> Result<(), ResolveError> {
        let index = self
            .position(shadow)
            .ok_or(ResolveError::NotTracked { decl: shadow })?;
        self.decls.insert(index + 1, decl);
        Ok(())
    }

    fn remove(&mut self, decl: DeclId) -> Result<(), ResolveError> {
        let index = self
            .position(decl)
            .ok_or(ResolveError::NotTracked { decl })?;
        self.decls.remove(index);
        Ok(())
    }
}

/// Per-name annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameSlot {
    /// Had a single declaration, which has since been removed
    Vacant,
    /// Exactly one declaration ever, still tracked
    Single(DeclId),
    /// More than one declaration ever
    Chain(EntryId),
}

/// Counters describing the resolver's storage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Names that have ever had a declaration
    pub names: usize,
    /// Names that needed a [`NameEntry`]
    pub entries: usize,
}

/// Tracks shadowed declarations across nested lexical scopes
#[derive(Debug, Clone, Default)]
pub struct IdentifierResolver {
    options: LangOptions,
    slots: FxHashMap<Symbol, NameSlot>,
    entries: Arena<NameEntry>,
}

impl IdentifierResolver {
    /// Create an empty resolver
    #[must_use]
    pub fn new(options: LangOptions) -> Self {
        Self {
            options,
            slots: FxHashMap::default(),
            entries: Arena::new(),
        }
    }

    /// Language options in effect
    #[must_use]
    pub fn options(&self) -> LangOptions {
        self.options
    }

    /// Link `decl` into its name's chain as the most recent declaration
    ///
    /// `decl` must not already be tracked.
    pub fn add_decl(&mut self, tree: &DeclTree, decl: DeclId) {
        debug_assert!(
            !self.is_tracked(tree, decl),
            "{}",
            ResolveError::AlreadyTracked { decl }
        );

        let name = tree.name(decl);
        let slot = match self.slots.get(&name).copied() {
            None => NameSlot::Single(decl),
            Some(NameSlot::Single(previous)) => {
                trace!(?name, ?previous, ?decl, "upgrading name to chain");
                NameSlot::Chain(self.entries.alloc(NameEntry {
                    decls: vec![previous, decl],
                }))
            }
            Some(NameSlot::Vacant) => {
                trace!(?name, ?decl, "refilling vacated name as chain");
                NameSlot::Chain(self.entries.alloc(NameEntry { decls: vec![decl] }))
            }
            Some(NameSlot::Chain(entry)) => {
                self.entries[entry].push(decl);
                NameSlot::Chain(entry)
            }
        };
        trace!(?name, ?decl, "added declaration");
        self.slots.insert(name, slot);
    }

    /// Link `decl` into the chain so that it is found right before `shadow`
    ///
    /// # Errors
    ///
    /// Fails if `decl` is already tracked, if `shadow` is not tracked, or if
    /// the two do not share a name and lookup context. The resolver is left
    /// unchanged on failure.
    pub fn try_add_shadowed_decl(
        &mut self,
        tree: &DeclTree,
        decl: DeclId,
        shadow: DeclId,
    ) -> Result<(), ResolveError> {
        let name = tree.name(decl);
        if tree.name(shadow) != name {
            return Err(ResolveError::NameMismatch { decl, shadow });
        }
        if LookupContext::of_decl(tree, decl) != LookupContext::of_decl(tree, shadow) {
            return Err(ResolveError::ContextMismatch { decl, shadow });
        }
        if self.is_tracked(tree, decl) {
            return Err(ResolveError::AlreadyTracked { decl });
        }

        match self.slots.get(&name).copied() {
            Some(NameSlot::Single(only)) if only == shadow => {
                trace!(?name, ?shadow, ?decl, "upgrading name to chain");
                let entry = self.entries.alloc(NameEntry {
                    decls: vec![shadow, decl],
                });
                self.slots.insert(name, NameSlot::Chain(entry));
                Ok(())
            }
            Some(NameSlot::Chain(entry)) => {
                self.entries[entry].insert_shadowed(decl, shadow)?;
                trace!(?name, ?shadow, ?decl, "added shadowed declaration");
                Ok(())
            }
            Some(NameSlot::Single(_) | NameSlot::Vacant) | None => {
                Err(ResolveError::NotTracked { decl: shadow })
            }
        }
    }

    /// Asserting form of [`Self::try_add_shadowed_decl`]
    ///
    /// # Panics
    ///
    /// Panics if the caller broke the contract.
    #[allow(clippy::panic, reason = "contract violations are compiler bugs")]
    pub fn add_shadowed_decl(&mut self, tree: &DeclTree, decl: DeclId, shadow: DeclId) {
        if let Err(error) = self.try_add_shadowed_decl(tree, decl, shadow) {
            panic!("{error}");
        }
    }

    /// Unlink `decl` from its name's chain
    ///
    /// The declaration itself is untouched; it belongs to the tree.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::NotTracked` if `decl` is not on the chain.
    pub fn try_remove_decl(&mut self, tree: &DeclTree, decl: DeclId) -> Result<(), ResolveError> {
        let name = tree.name(decl);
        match self.slots.get(&name).copied() {
            Some(NameSlot::Single(only)) if only == decl => {
                self.slots.insert(name, NameSlot::Vacant);
            }
            Some(NameSlot::Chain(entry)) => self.entries[entry].remove(decl)?,
            Some(NameSlot::Single(_) | NameSlot::Vacant) | None => {
                return Err(ResolveError::NotTracked { decl });
            }
        }
        trace!(?name, ?decl, "removed declaration");
        Ok(())
    }

    /// Asserting form of [`Self::try_remove_decl`]
    ///
    /// # Panics
    ///
    /// Panics if `decl` is not tracked.
    #[allow(clippy::panic, reason = "contract violations are compiler bugs")]
    pub fn remove_decl(&mut self, tree: &DeclTree, decl: DeclId) {
        if let Err(error) = self.try_remove_decl(tree, decl) {
            panic!("{error}");
        }
    }

    /// Every tracked declaration named `name`, innermost first
    #[must_use]
    pub fn lookup(&self, name: Symbol) -> Lookup<'_> {
        match self.slots.get(&name) {
            None | Some(NameSlot::Vacant) => Lookup::empty(),
            Some(NameSlot::Single(decl)) => Lookup::single(*decl),
            Some(NameSlot::Chain(entry)) => Lookup::chain(self.entries[*entry].decls()),
        }
    }

    /// Declarations named `name` visible from `context`, innermost first
    #[must_use]
    pub fn lookup_in<'res>(
        &'res self,
        tree: &'res DeclTree,
        name: Symbol,
        context: LookupContext,
        mode: LookupMode,
    ) -> Lookup<'res> {
        self.lookup(name).scoped(tree, context, mode)
    }

    /// Whether `decl` is currently on its name's chain
    #[must_use]
    pub fn is_tracked(&self, tree: &DeclTree, decl: DeclId) -> bool {
        self.lookup(tree.name(decl)).any(|candidate| candidate == decl)
    }

    /// Whether `decl` is visible when looking up from `context`
    ///
    /// Inside functions, blocks carry no declaration context of their own, so
    /// when `scope` is supplied the lexical scopes between it and the
    /// function's outermost scope decide visibility of the function's locals.
    #[must_use]
    #[allow(clippy::unused_self, reason = "part of the resolver's query surface")]
    pub fn is_decl_in_scope(
        &self,
        tree: &DeclTree,
        decl: DeclId,
        context: ContextId,
        scope: Option<ScopeRef<'_>>,
    ) -> bool {
        let view = LookupContext::of_context(tree, context);
        let decl_context = LookupContext::of_decl(tree, decl);

        if let Some(scope) = scope
            && is_function_like(tree, context)
        {
            let mut current = Some(scope.skip_transparent(tree));
            while let Some(lexical) = current {
                if lexical.declares(decl) {
                    return true;
                }
                if matches!(
                    lexical.kind(),
                    ScopeKind::Function | ScopeKind::TranslationUnit
                ) {
                    break;
                }
                current = lexical.parent();
            }
            if decl_context == view {
                return false;
            }
        }

        view.is_eq_or_contained_by(decl_context, tree)
    }

    /// Whether `decl` was declared in `scope` itself
    ///
    /// This is the redeclaration check: a new declaration conflicts with
    /// `decl` only if `decl` was declared in the same scope. In C++ a name
    /// from a condition or for-init also conflicts with the outermost block
    /// of the controlled statement.
    #[must_use]
    pub fn is_declared_in_scope(
        &self,
        tree: &DeclTree,
        decl: DeclId,
        context: ContextId,
        scope: ScopeRef<'_>,
    ) -> bool {
        if is_function_like(tree, context) {
            let scope = scope.skip_transparent(tree);
            if scope.declares(decl) {
                return true;
            }
            if self.options.cplusplus
                && let Some(parent) = scope.parent()
                && parent.kind() == ScopeKind::Control
            {
                return parent.declares(decl);
            }
            return false;
        }

        LookupContext::of_decl(tree, decl) == LookupContext::of_context(tree, context)
    }

    /// Storage counters
    #[must_use]
    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            names: self.slots.len(),
            entries: self.entries.len(),
        }
    }
}

fn is_function_like(tree: &DeclTree, context: ContextId) -> bool {
    tree.context(tree.lookup_context(context))
        .kind
        .is_function_or_method()
}
