//! Lazy, shadow-ordered lookup sequences

use crate::context::LookupContext;
use cx_decl::{DeclId, DeclTree};
use std::iter::FusedIterator;

/// How far a scoped lookup may look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Only declarations made in the lookup context itself
    CurrentContext,
    /// Declarations made in the lookup context or any context enclosing it
    EnclosingContexts,
}

/// Position inside a name's declarations
#[derive(Debug, Clone)]
enum Cursor<'res> {
    /// Nothing left
    Exhausted,
    /// The name's only declaration, not yet yielded
    Single(DeclId),
    /// `decls[..remaining]` not yet yielded, consumed from the back
    Chain {
        decls: &'res [DeclId],
        remaining: usize,
    },
}

/// Restriction applied by a scoped lookup
#[derive(Debug, Clone, Copy)]
struct Scoping<'tree> {
    tree: &'tree DeclTree,
    context: LookupContext,
    mode: LookupMode,
}

impl Scoping<'_> {
    fn admits(&self, decl: DeclId) -> bool {
        let decl_context = LookupContext::of_decl(self.tree, decl);
        match self.mode {
            LookupMode::CurrentContext => decl_context == self.context,
            LookupMode::EnclosingContexts => {
                self.context.is_eq_or_contained_by(decl_context, self.tree)
            }
        }
    }
}

/// Declarations sharing one name, most recently inserted first
///
/// Each call to `next` consumes the current position. Ask the resolver for a
/// new sequence to start again from the innermost declaration.
#[derive(Debug, Clone)]
pub struct Lookup<'res> {
    cursor: Cursor<'res>,
    scoping: Option<Scoping<'res>>,
}

impl<'res> Lookup<'res> {
    pub(crate) fn empty() -> Self {
        Self {
            cursor: Cursor::Exhausted,
            scoping: None,
        }
    }

    pub(crate) fn single(decl: DeclId) -> Self {
        Self {
            cursor: Cursor::Single(decl),
            scoping: None,
        }
    }

    pub(crate) fn chain(decls: &'res [DeclId]) -> Self {
        Self {
            cursor: Cursor::Chain {
                decls,
                remaining: decls.len(),
            },
            scoping: None,
        }
    }

    pub(crate) fn scoped(
        mut self,
        tree: &'res DeclTree,
        context: LookupContext,
        mode: LookupMode,
    ) -> Self {
        self.scoping = Some(Scoping {
            tree,
            context,
            mode,
        });
        self
    }

    fn advance(&mut self) -> Option<DeclId> {
        match &mut self.cursor {
            Cursor::Exhausted => None,
            Cursor::Single(decl) => {
                let decl = *decl;
                self.cursor = Cursor::Exhausted;
                Some(decl)
            }
            Cursor::Chain { decls, remaining } => {
                if *remaining == 0 {
                    self.cursor = Cursor::Exhausted;
                    return None;
                }
                *remaining -= 1;
                Some(decls[*remaining])
            }
        }
    }
}

impl Iterator for Lookup<'_> {
    type Item = DeclId;

    fn next(&mut self) -> Option<DeclId> {
        loop {
            let decl = self.advance()?;
            match &self.scoping {
                Some(scoping) if !scoping.admits(decl) => {}
                _ => return Some(decl),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let upper = match &self.cursor {
            Cursor::Exhausted => 0,
            Cursor::Single(_) => 1,
            Cursor::Chain { remaining, .. } => *remaining,
        };
        match self.scoping {
            Some(_) => (0, Some(upper)),
            None => (upper, Some(upper)),
        }
    }
}

impl FusedIterator for Lookup<'_> {}
