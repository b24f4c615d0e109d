//! Lexical scope tree
//!
//! Blocks inside a function do not get declaration contexts of their own,
//! yet shadowing has to be enforced at block granularity. The scope tree
//! records which declarations each lexical scope introduced.

use cx_decl::{ContextId, DeclId, DeclTree};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// Unique identifier for a scope
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct ScopeId(pub u32);

/// Kind of scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// File scope (root)
    TranslationUnit,
    /// Outermost scope of a function body, holding its parameters
    Function,
    /// Compound statement `{ ... }`
    Block,
    /// Condition or init-statement of `if`, `for`, `while` or `switch`
    Control,
    /// Class or struct member scope
    Class,
    /// Function prototype parameter list
    Prototype,
}

/// A single scope in the scope tree
#[derive(Debug, Clone)]
pub struct Scope {
    /// Parent scope (None for the translation unit scope)
    pub parent: Option<ScopeId>,
    /// Kind of scope
    pub kind: ScopeKind,
    /// Declaration context this scope belongs to, if it has one
    pub entity: Option<ContextId>,
    /// Declarations introduced here, in declaration order
    pub decls: IndexSet<DeclId, FxBuildHasher>,
}

impl Scope {
    /// Create a new scope
    fn new(parent: Option<ScopeId>, kind: ScopeKind, entity: Option<ContextId>) -> Self {
        Self {
            parent,
            kind,
            entity,
            decls: IndexSet::default(),
        }
    }
}

/// Scope tree for one translation unit
#[derive(Debug, Clone)]
pub struct ScopeTree {
    /// All scopes in the tree
    scopes: Vec<Scope>,
    /// Translation unit (root) scope
    pub translation_unit_scope: ScopeId,
}

impl ScopeTree {
    /// Create a new scope tree with a translation unit scope
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(None, ScopeKind::TranslationUnit, None)],
            translation_unit_scope: ScopeId(0),
        }
    }

    /// Create a child scope
    pub fn create_child(
        &mut self,
        parent: ScopeId,
        kind: ScopeKind,
        entity: Option<ContextId>,
    ) -> ScopeId {
        let scope_id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(Some(parent), kind, entity));
        scope_id
    }

    /// Record that `decl` was declared in `scope`
    ///
    /// Returns false if the scope already declared it.
    pub fn add_decl(&mut self, scope: ScopeId, decl: DeclId) -> bool {
        self.scopes[scope.0 as usize].decls.insert(decl)
    }

    /// Whether `decl` was declared in `scope`
    #[must_use]
    pub fn declares(&self, scope: ScopeId, decl: DeclId) -> bool {
        self.scopes[scope.0 as usize].decls.contains(&decl)
    }

    /// Get a scope by ID
    #[must_use]
    pub fn get_scope(&self, scope: ScopeId) -> &Scope {
        &self.scopes[scope.0 as usize]
    }

    /// Borrowed cursor positioned at `scope`
    #[must_use]
    pub fn handle(&self, scope: ScopeId) -> ScopeRef<'_> {
        ScopeRef {
            tree: self,
            id: scope,
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A position in a [`ScopeTree`]
#[derive(Debug, Clone, Copy)]
pub struct ScopeRef<'tree> {
    tree: &'tree ScopeTree,
    id: ScopeId,
}

impl ScopeRef<'_> {
    /// ID of the scope
    #[must_use]
    pub fn id(self) -> ScopeId {
        self.id
    }

    /// Kind of the scope
    #[must_use]
    pub fn kind(self) -> ScopeKind {
        self.tree.get_scope(self.id).kind
    }

    /// Declaration context of the scope, if it has one
    #[must_use]
    pub fn entity(self) -> Option<ContextId> {
        self.tree.get_scope(self.id).entity
    }

    /// Whether `decl` was declared in this scope
    #[must_use]
    pub fn declares(self, decl: DeclId) -> bool {
        self.tree.declares(self.id, decl)
    }

    /// Enclosing scope
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.tree.get_scope(self.id).parent.map(|parent| Self {
            tree: self.tree,
            id: parent,
        })
    }

    /// Walk outwards past scopes whose entity is a transparent context
    #[must_use]
    pub fn skip_transparent(self, decls: &DeclTree) -> Self {
        let mut current = self;
        while let Some(entity) = current.entity() {
            if !decls.context(entity).kind.is_transparent() {
                break;
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }
}
