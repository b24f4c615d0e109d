//! Resolution session for one translation unit
//!
//! The parser drives the session as it enters and leaves scopes. Closing a
//! scope unlinks everything it declared, so at any point the resolver's
//! chains hold exactly the declarations that are lexically open.

use crate::config::LangOptions;
use crate::error::ResolveError;
use crate::resolver::{IdentifierResolver, ResolverStats};
use crate::scope::{ScopeId, ScopeKind, ScopeTree};
use cx_decl::{ContextId, DeclId, DeclTree};
use cx_intern::Symbol;
use tracing::debug;

/// Resolver, scope tree and current position for one translation unit
#[derive(Debug)]
pub struct ResolveSession<'tree> {
    decls: &'tree DeclTree,
    resolver: IdentifierResolver,
    scopes: ScopeTree,
    current: ScopeId,
    /// Declaration context of each open scope, innermost last
    contexts: Vec<ContextId>,
}

impl<'tree> ResolveSession<'tree> {
    /// Start a session positioned at file scope
    #[must_use]
    pub fn new(decls: &'tree DeclTree, options: LangOptions) -> Self {
        let scopes = ScopeTree::new();
        let current = scopes.translation_unit_scope;
        Self {
            decls,
            resolver: IdentifierResolver::new(options),
            scopes,
            current,
            contexts: vec![decls.translation_unit()],
        }
    }

    /// Enter a new innermost scope
    ///
    /// `entity` is the declaration context the scope belongs to. Scopes
    /// without one (plain blocks) inherit the enclosing scope's context.
    pub fn push_scope(&mut self, kind: ScopeKind, entity: Option<ContextId>) -> ScopeId {
        let scope = self.scopes.create_child(self.current, kind, entity);
        let context = entity.unwrap_or_else(|| self.current_context());
        debug!(scope = scope.0, ?kind, "push scope");
        self.contexts.push(context);
        self.current = scope;
        scope
    }

    /// Declare `decl` in the current scope
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::AlreadyTracked` if `decl` is already declared
    /// in this scope or in any open enclosing scope.
    pub fn declare(&mut self, decl: DeclId) -> Result<(), ResolveError> {
        if self.resolver.is_tracked(self.decls, decl) || !self.scopes.add_decl(self.current, decl)
        {
            return Err(ResolveError::AlreadyTracked { decl });
        }
        self.resolver.add_decl(self.decls, decl);
        Ok(())
    }

    /// Leave the current scope, unlinking its declarations newest first
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::PopRootScope` at file scope, or
    /// `ResolveError::NotTracked` if a declaration of the scope was removed
    /// from the resolver behind the session's back. The session is left
    /// unchanged on failure.
    pub fn pop_scope(&mut self) -> Result<ScopeId, ResolveError> {
        let closing = self.scopes.get_scope(self.current);
        let parent = closing.parent.ok_or(ResolveError::PopRootScope)?;

        if let Some(&decl) = closing
            .decls
            .iter()
            .find(|&&decl| !self.resolver.is_tracked(self.decls, decl))
        {
            return Err(ResolveError::NotTracked { decl });
        }
        for &decl in closing.decls.iter().rev() {
            self.resolver.try_remove_decl(self.decls, decl)?;
        }
        debug!(
            scope = self.current.0,
            removed = closing.decls.len(),
            "pop scope"
        );

        self.contexts.pop();
        let closed = self.current;
        self.current = parent;
        Ok(closed)
    }

    /// Innermost declaration of `name` visible from the current scope
    #[must_use]
    pub fn resolve(&self, name: Symbol) -> Option<DeclId> {
        let context = self.current_context();
        let scope = self.scopes.handle(self.current);
        self.resolver.lookup(name).find(|&decl| {
            self.resolver
                .is_decl_in_scope(self.decls, decl, context, Some(scope))
        })
    }

    /// Declaration of `name` that a new declaration in the current scope
    /// would redeclare
    #[must_use]
    pub fn find_redeclaration(&self, name: Symbol) -> Option<DeclId> {
        let context = self.current_context();
        let scope = self.scopes.handle(self.current);
        self.resolver.lookup(name).find(|&decl| {
            self.resolver
                .is_declared_in_scope(self.decls, decl, context, scope)
        })
    }

    /// Current scope
    #[must_use]
    pub fn current_scope(&self) -> ScopeId {
        self.current
    }

    /// Declaration context of the current scope
    #[must_use]
    pub fn current_context(&self) -> ContextId {
        self.contexts
            .last()
            .copied()
            .unwrap_or_else(|| self.decls.translation_unit())
    }

    /// The underlying resolver
    #[must_use]
    pub fn resolver(&self) -> &IdentifierResolver {
        &self.resolver
    }

    /// The scope tree built so far
    #[must_use]
    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    /// Tear the session down and report storage counters
    #[must_use]
    pub fn finish(self) -> ResolverStats {
        let stats = self.resolver.stats();
        debug!(names = stats.names, entries = stats.entries, "finish session");
        stats
    }
}
