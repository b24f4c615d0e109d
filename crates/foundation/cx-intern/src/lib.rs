//! Interning for declaration names
//!
//! Every identifier the front end sees is interned once per translation unit.
//! The resolver keys its per-name bookkeeping on the resulting [`Symbol`], so
//! comparing names is a copy-and-compare of a 32-bit key.

pub use lasso::Spur as Symbol;
use lasso::Rodeo;

/// Single-threaded name interner for one translation unit
#[derive(Debug, Default)]
pub struct Interner {
    rodeo: Rodeo,
}

impl Interner {
    /// Create an empty interner
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, returning the existing symbol if it was seen before
    pub fn intern(&mut self, name: &str) -> Symbol {
        self.rodeo.get_or_intern(name)
    }

    /// Look up `name` without interning it
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.rodeo.get(name)
    }

    /// Text of an interned symbol
    #[must_use]
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.rodeo.resolve(&symbol)
    }

    /// Number of distinct names interned so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Whether nothing has been interned yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}
