//! Loading generated type tables into a registry.

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::PathBuf;

use grove_core::TypeTable;

use crate::error::RegistrationError;
use crate::registry::TypeRegistry;

/// Where a generated type table lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleRef {
    /// Table compiled into a generated Rust module.
    Embedded {
        name: &'static str,
        json: &'static str,
    },
    /// Standalone `.json` table written next to generated code.
    Artifact(PathBuf),
}

impl ModuleRef {
    pub const fn embedded(name: &'static str, json: &'static str) -> Self {
        Self::Embedded { name, json }
    }

    pub fn artifact(path: impl Into<PathBuf>) -> Self {
        Self::Artifact(path.into())
    }

    /// Display name used in errors and logs.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Embedded { name, .. } => Cow::Borrowed(*name),
            Self::Artifact(path) => path.to_string_lossy(),
        }
    }

    fn json(&self) -> Result<Cow<'static, str>, RegistrationError> {
        match self {
            Self::Embedded { json, .. } => Ok(Cow::Borrowed(*json)),
            Self::Artifact(path) => match std::fs::read_to_string(path) {
                Ok(json) => Ok(Cow::Owned(json)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(RegistrationError::NotFound { path: path.clone() })
                }
                Err(source) => Err(RegistrationError::Io {
                    path: path.clone(),
                    source,
                }),
            },
        }
    }

    /// Read and validate the table. Empty tables are rejected.
    pub fn read_table(&self) -> Result<TypeTable, RegistrationError> {
        let json = self.json()?;
        let table =
            TypeTable::from_json(&json).map_err(|source| RegistrationError::Malformed {
                module: self.name().into_owned(),
                source,
            })?;
        if table.is_empty() {
            return Err(RegistrationError::Empty {
                module: self.name().into_owned(),
            });
        }
        Ok(table)
    }
}

/// Tracks which modules have been merged into a registry.
///
/// One bootstrap belongs with one registry; `ensure` loads each module at
/// most once.
#[derive(Debug, Default)]
pub struct Bootstrap {
    loaded: HashSet<ModuleRef>,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `module` into `registry` unless it was already loaded.
    ///
    /// Returns whether the registry changed. A failed load is not recorded,
    /// so it can be retried.
    pub fn ensure(
        &mut self,
        registry: &mut TypeRegistry,
        module: &ModuleRef,
    ) -> Result<bool, RegistrationError> {
        if self.loaded.contains(module) {
            tracing::trace!(module = %module.name(), "module already loaded");
            return Ok(false);
        }
        registry.load(module)?;
        tracing::debug!(module = %module.name(), "loaded module");
        self.loaded.insert(module.clone());
        Ok(true)
    }

    pub fn is_loaded(&self, module: &ModuleRef) -> bool {
        self.loaded.contains(module)
    }
}
