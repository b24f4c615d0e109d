//! Language options that change scoping rules

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Language dialect switches consulted by the resolver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LangOptions {
    /// C++ mode: names from a condition or for-init cannot be redeclared in
    /// the outermost block of the controlled statement
    pub cplusplus: bool,
}

impl LangOptions {
    /// Options for C
    #[must_use]
    pub fn c() -> Self {
        Self { cplusplus: false }
    }

    /// Options for C++
    #[must_use]
    pub fn cplusplus() -> Self {
        Self { cplusplus: true }
    }

    /// Parse options from TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the text is not valid TOML or a key has
    /// the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
