//! Declaration tree
//!
//! Declarations and the declaration contexts that own them, allocated in
//! arenas and addressed by index. Name resolution only ever reads this tree;
//! it never owns or frees a declaration.

use cx_intern::Symbol;
use la_arena::{Arena, Idx};

/// Declaration ID
pub type DeclId = Idx<Decl>;
/// Declaration context ID
pub type ContextId = Idx<DeclContext>;

/// Kind of scope-introducing construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// The whole translation unit
    TranslationUnit,
    /// `namespace ns { ... }`
    Namespace,
    /// `extern "C" { ... }`
    LinkageSpec,
    /// Free function
    Function,
    /// Member function
    Method,
    /// `struct`, `union` or `class`
    Record,
    /// `enum`
    Enum,
    /// Block literal or other nested body with its own context
    Block,
}

impl ContextKind {
    /// Whether this context's names belong to its parent for lookup
    #[must_use]
    pub fn is_transparent(self) -> bool {
        matches!(self, Self::LinkageSpec)
    }

    /// Whether this is a function-like context with block structure inside
    #[must_use]
    pub fn is_function_or_method(self) -> bool {
        matches!(self, Self::Function | Self::Method | Self::Block)
    }
}

/// Kind of declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Variable
    Var,
    /// Function parameter
    Param,
    /// Function or method
    Function,
    /// `typedef` name
    Typedef,
    /// `struct`, `union` or `class` tag
    Record,
    /// Record member
    Field,
    /// `enum` tag
    Enum,
    /// Enumerator constant
    EnumConstant,
    /// Namespace
    Namespace,
    /// Statement label
    Label,
}

impl DeclKind {
    /// Context kind introduced by declarations of this kind, if any
    #[must_use]
    pub fn introduced_context(self) -> Option<ContextKind> {
        match self {
            Self::Function => Some(ContextKind::Function),
            Self::Record => Some(ContextKind::Record),
            Self::Enum => Some(ContextKind::Enum),
            Self::Namespace => Some(ContextKind::Namespace),
            Self::Var
            | Self::Param
            | Self::Typedef
            | Self::Field
            | Self::EnumConstant
            | Self::Label => None,
        }
    }
}

/// A declaration context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclContext {
    /// Kind of context
    pub kind: ContextKind,
    /// Enclosing context (None only for the translation unit)
    pub parent: Option<ContextId>,
    /// Declaration that introduced this context, if any
    pub owner: Option<DeclId>,
}

/// A named declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    /// Declared name
    pub name: Symbol,
    /// Kind of declaration
    pub kind: DeclKind,
    /// Context the declaration was written in
    pub context: ContextId,
}

/// Arena-owned declarations and their contexts
#[derive(Debug, Clone)]
pub struct DeclTree {
    contexts: Arena<DeclContext>,
    decls: Arena<Decl>,
    translation_unit: ContextId,
}

impl DeclTree {
    /// Create a tree holding only the translation unit context
    #[must_use]
    pub fn new() -> Self {
        let mut contexts = Arena::new();
        let translation_unit = contexts.alloc(DeclContext {
            kind: ContextKind::TranslationUnit,
            parent: None,
            owner: None,
        });

        Self {
            contexts,
            decls: Arena::new(),
            translation_unit,
        }
    }

    /// The translation unit context
    #[must_use]
    pub fn translation_unit(&self) -> ContextId {
        self.translation_unit
    }

    /// Add a context nested in `parent`
    pub fn add_context(
        &mut self,
        kind: ContextKind,
        parent: ContextId,
        owner: Option<DeclId>,
    ) -> ContextId {
        self.contexts.alloc(DeclContext {
            kind,
            parent: Some(parent),
            owner,
        })
    }

    /// Add a declaration written in `context`
    pub fn add_decl(&mut self, name: Symbol, kind: DeclKind, context: ContextId) -> DeclId {
        self.decls.alloc(Decl {
            name,
            kind,
            context,
        })
    }

    /// Add a declaration together with the context it introduces
    ///
    /// Kinds that introduce no context get a [`ContextKind::Block`] so callers
    /// always receive somewhere to put nested declarations.
    pub fn add_scoped_decl(
        &mut self,
        name: Symbol,
        kind: DeclKind,
        parent: ContextId,
    ) -> (DeclId, ContextId) {
        let decl = self.add_decl(name, kind, parent);
        let context_kind = kind.introduced_context().unwrap_or(ContextKind::Block);
        let context = self.add_context(context_kind, parent, Some(decl));
        (decl, context)
    }

    /// Get a declaration
    #[must_use]
    pub fn decl(&self, decl: DeclId) -> &Decl {
        &self.decls[decl]
    }

    /// Get a context
    #[must_use]
    pub fn context(&self, context: ContextId) -> &DeclContext {
        &self.contexts[context]
    }

    /// Name of a declaration
    #[must_use]
    pub fn name(&self, decl: DeclId) -> Symbol {
        self.decls[decl].name
    }

    /// Parent of a context
    #[must_use]
    pub fn parent(&self, context: ContextId) -> Option<ContextId> {
        self.contexts[context].parent
    }

    /// Innermost non-transparent context at or above `context`
    #[must_use]
    pub fn lookup_context(&self, context: ContextId) -> ContextId {
        let mut current = context;
        while self.contexts[current].kind.is_transparent() {
            match self.contexts[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    /// Whether `context` is the translation unit
    #[must_use]
    pub fn is_translation_unit(&self, context: ContextId) -> bool {
        self.contexts[context].kind == ContextKind::TranslationUnit
    }
}

impl Default for DeclTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cx_intern::Interner;

    #[test]
    fn test_scoped_decl_introduces_context() {
        let mut interner = Interner::new();
        let mut tree = DeclTree::new();
        let tu = tree.translation_unit();

        let (func, body) = tree.add_scoped_decl(interner.intern("main"), DeclKind::Function, tu);

        assert_eq!(tree.decl(func).context, tu);
        assert_eq!(tree.context(body).kind, ContextKind::Function);
        assert_eq!(tree.context(body).owner, Some(func));
        assert_eq!(tree.parent(body), Some(tu));
        assert_eq!(tree.parent(tu), None);
    }

    #[test]
    fn test_lookup_context_skips_linkage_spec() {
        let mut tree = DeclTree::new();
        let tu = tree.translation_unit();
        let outer = tree.add_context(ContextKind::LinkageSpec, tu, None);
        let inner = tree.add_context(ContextKind::LinkageSpec, outer, None);

        assert_eq!(tree.lookup_context(inner), tu);
        assert!(tree.is_translation_unit(tree.lookup_context(inner)));
    }

    #[test]
    fn test_lookup_context_stops_at_opaque_context() {
        let mut interner = Interner::new();
        let mut tree = DeclTree::new();
        let tu = tree.translation_unit();
        let (_, ns) = tree.add_scoped_decl(interner.intern("ns"), DeclKind::Namespace, tu);

        assert_eq!(tree.lookup_context(ns), ns);
        assert_eq!(tree.context(ns).kind, ContextKind::Namespace);
    }
}
