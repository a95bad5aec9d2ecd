//! Configuration for code generation.

use grove_core::utils::is_plain_identifier;

use crate::GenerateError;

/// Suffix appended to every named production's identifier.
pub const NAMED_SUFFIX: &str = "Node";

/// Name of the generated sum type over all grammar kinds.
pub const ANY_NODE: &str = "AnyNode";

/// Variant of `AnyNode` holding nodes of unregistered kinds.
pub const UNKNOWN_VARIANT: &str = "Unknown";

/// Configuration for type generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Suffix for anonymous tokens (named productions always end in `Node`).
    pub token_suffix: String,
    /// Identifier of the universal base type.
    pub base_type_name: String,
    /// Name recorded in the generated `ModuleRef`; the bootstrap loads each
    /// module name once.
    pub module_name: String,
    /// Crate path the generated source uses for runtime items.
    pub runtime_crate: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            token_suffix: "TokenNode".to_string(),
            base_type_name: "SyntaxNode".to_string(),
            module_name: "generated".to_string(),
            runtime_crate: "grove".to_string(),
        }
    }
}

impl GenerateConfig {
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    pub fn with_token_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.token_suffix = suffix.into();
        self
    }

    pub fn with_base_type_name(mut self, name: impl Into<String>) -> Self {
        self.base_type_name = name.into();
        self
    }

    /// Reject values that would produce uncompilable source.
    pub fn validate(&self) -> Result<(), GenerateError> {
        let check = |option: &'static str, value: &str, allow_empty: bool| {
            if (allow_empty && value.is_empty()) || is_plain_identifier(value) {
                Ok(())
            } else {
                Err(GenerateError::InvalidConfig {
                    option,
                    value: value.to_string(),
                })
            }
        };
        check("token_suffix", &self.token_suffix, true)?;
        check("base_type_name", &self.base_type_name, false)?;
        check("runtime_crate", &self.runtime_crate, false)?;
        Ok(())
    }
}
