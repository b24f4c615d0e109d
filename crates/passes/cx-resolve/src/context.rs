//! Lookup contexts
//!
//! A [`LookupContext`] is the declaration context a name is looked up or
//! declared in, after transparent contexts are skipped. Every
//! translation-unit-level context collapses to the one
//! [`LookupContext::TranslationUnit`] sentinel, so two file-scope
//! declarations always compare equal here even when one of them sits inside
//! an `extern "C"` block.

use cx_decl::{ContextId, DeclId, DeclKind, DeclTree};

/// Context used to scope lookups and shadow insertion
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum LookupContext {
    /// File scope, shared by every top-level construct
    TranslationUnit,
    /// A concrete, non-transparent declaration context
    Context(ContextId),
}

impl LookupContext {
    /// Lookup context for a declaration context
    #[must_use]
    pub fn of_context(tree: &DeclTree, context: ContextId) -> Self {
        let context = tree.lookup_context(context);
        if tree.is_translation_unit(context) {
            Self::TranslationUnit
        } else {
            Self::Context(context)
        }
    }

    /// Lookup context a declaration's name belongs to
    ///
    /// Enumerators are visible in the scope that encloses their enum, not in
    /// the enum itself.
    #[must_use]
    pub fn of_decl(tree: &DeclTree, decl: DeclId) -> Self {
        let decl = tree.decl(decl);
        let context = match decl.kind {
            DeclKind::EnumConstant => tree.parent(decl.context).unwrap_or(decl.context),
            _ => decl.context,
        };
        Self::of_context(tree, context)
    }

    /// Whether this is the translation unit sentinel
    #[must_use]
    pub fn is_translation_unit(self) -> bool {
        matches!(self, Self::TranslationUnit)
    }

    /// Enclosing lookup context; the translation unit has none
    #[must_use]
    pub fn parent(self, tree: &DeclTree) -> Option<Self> {
        match self {
            Self::TranslationUnit => None,
            Self::Context(context) => Some(
                tree.parent(context)
                    .map_or(Self::TranslationUnit, |parent| Self::of_context(tree, parent)),
            ),
        }
    }

    /// Whether `self` is `other` or nested somewhere inside it
    #[must_use]
    pub fn is_eq_or_contained_by(self, other: Self, tree: &DeclTree) -> bool {
        if other.is_translation_unit() {
            return true;
        }

        let mut current = Some(self);
        while let Some(context) = current {
            if context == other {
                return true;
            }
            current = context.parent(tree);
        }
        false
    }
}
