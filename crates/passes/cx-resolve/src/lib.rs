//! Lexical-scope identifier resolution for the C family front end
//!
//! This crate maps a declaration name to the declarations currently visible
//! under it, modelling C and C++ shadowing: an inner declaration hides, but
//! does not delete, same-named declarations of enclosing scopes.
//!
//! # Architecture
//!
//! - **Identifier resolver**: per-name chains of declarations, innermost
//!   first, with a one-declaration fast path that allocates nothing
//! - **Lookup contexts**: declaration contexts with transparent levels
//!   skipped and one shared translation-unit sentinel
//! - **Scope tree**: block structure inside functions, which declaration
//!   contexts do not capture
//! - **Session**: drives the resolver and scope tree for one translation unit
//!
//! # Usage
//!
//! ```rust,ignore
//! use cx_resolve::{LangOptions, ResolveSession, ScopeKind};
//!
//! let mut session = ResolveSession::new(&decls, LangOptions::c());
//! session.push_scope(ScopeKind::Function, Some(body));
//! session.declare(local)?;
//! let found = session.resolve(name);
//! session.pop_scope()?;
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod lookup;
pub mod resolver;
pub mod scope;
pub mod session;

pub use config::LangOptions;
pub use context::LookupContext;
pub use error::{ConfigError, ResolveError};
pub use lookup::{Lookup, LookupMode};
pub use resolver::{EntryId, IdentifierResolver, NameEntry, ResolverStats};
pub use scope::{Scope, ScopeId, ScopeKind, ScopeRef, ScopeTree};
pub use session::ResolveSession;
