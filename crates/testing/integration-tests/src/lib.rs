//! Shared fixtures for the resolver integration tests

use cx_decl::{ContextId, DeclId, DeclKind, DeclTree};
use cx_intern::{Interner, Symbol};

/// A translation unit under construction
#[derive(Debug, Default)]
pub struct Unit {
    /// Names seen so far
    pub interner: Interner,
    /// Declarations and contexts
    pub tree: DeclTree,
}

impl Unit {
    /// Empty translation unit
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// File scope context
    #[must_use]
    pub fn tu(&self) -> ContextId {
        self.tree.translation_unit()
    }

    /// Intern `name`
    pub fn name(&mut self, name: &str) -> Symbol {
        self.interner.intern(name)
    }

    /// Declare a variable `name` in `context`
    pub fn var(&mut self, name: &str, context: ContextId) -> DeclId {
        self.decl(name, DeclKind::Var, context)
    }

    /// Declare `name` of the given kind in `context`
    pub fn decl(&mut self, name: &str, kind: DeclKind, context: ContextId) -> DeclId {
        let name = self.interner.intern(name);
        self.tree.add_decl(name, kind, context)
    }

    /// Declare a file-scope function, returning it and its body context
    pub fn function(&mut self, name: &str) -> (DeclId, ContextId) {
        let tu = self.tu();
        self.scoped(name, DeclKind::Function, tu)
    }

    /// Declare a context-introducing declaration inside `parent`
    pub fn scoped(&mut self, name: &str, kind: DeclKind, parent: ContextId) -> (DeclId, ContextId) {
        let name = self.interner.intern(name);
        self.tree.add_scoped_decl(name, kind, parent)
    }

    /// One line per declaration: `#<id> <name> @ <context>`
    #[must_use]
    pub fn render(&self, decls: impl IntoIterator<Item = DeclId>) -> String {
        decls
            .into_iter()
            .map(|decl| {
                let data = self.tree.decl(decl);
                format!(
                    "#{} {} @ {}\n",
                    decl.into_raw().into_u32(),
                    self.interner.resolve(data.name),
                    self.context_label(data.context)
                )
            })
            .collect()
    }

    fn context_label(&self, context: ContextId) -> String {
        let data = self.tree.context(context);
        match data.owner {
            _ if self.tree.is_translation_unit(context) => "<tu>".to_string(),
            Some(owner) => self.interner.resolve(self.tree.name(owner)).to_string(),
            None => format!("<{:?}>", data.kind).to_lowercase(),
        }
    }
}
