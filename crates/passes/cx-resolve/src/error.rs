//! Error types for identifier resolution

use cx_decl::DeclId;

/// Broken caller contracts on the resolver and its session
///
/// None of these are user-facing diagnostics. Each one means the driver fed
/// the resolver a sequence of operations it cannot be in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Declaration is not on its name's chain
    #[error("declaration {decl:?} is not on the chain for its name")]
    NotTracked {
        /// The declaration that was looked for
        decl: DeclId,
    },

    /// Declaration is already on its name's chain
    #[error("declaration {decl:?} is already on the chain for its name")]
    AlreadyTracked {
        /// The declaration that was added twice
        decl: DeclId,
    },

    /// Shadowed declaration has a different name
    #[error("declaration {decl:?} cannot shadow {shadow:?}: names differ")]
    NameMismatch {
        /// Declaration being inserted
        decl: DeclId,
        /// Declaration it was meant to sit next to
        shadow: DeclId,
    },

    /// Shadowed declaration lives in a different lookup context
    #[error("declaration {decl:?} cannot shadow {shadow:?}: lookup contexts differ")]
    ContextMismatch {
        /// Declaration being inserted
        decl: DeclId,
        /// Declaration it was meant to sit next to
        shadow: DeclId,
    },

    /// Attempt to pop the translation unit scope
    #[error("cannot pop the translation unit scope")]
    PopRootScope,
}

/// Errors loading language options
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Options text is not valid TOML for [`crate::LangOptions`]
    #[error("invalid language options: {0}")]
    Parse(#[from] toml::de::Error),
}
