//! Module registration and configuration binding.
//!
//! The CLI bootstrap registers every module it knows about in a
//! [`ModuleRegistry`]; [`ModuleRegistry::bind`] then reads the activation
//! config, checks the dependency graph and hands each active module its
//! configuration.
//!
//! # Config format
//!
//! ```json
//! {
//!   "activeModules": [
//!     { "name": "types", "active": true, "page": 1, "path": "./configs/types.json" },
//!     { "name": "breakingmsg", "active": true, "page": 3, "dependencies": ["breaking"] }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{CommitError, ResultExt, Result, Stage};
use crate::files::FileSource;
use crate::module::{Module, ModuleConfig};

/// Parsed activation config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivationConfig {
    /// Per-module configuration entries.
    pub active_modules: Vec<ModuleConfig>,
}

impl ActivationConfig {
    /// Parse the JSON activation config.
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw)
            .map_err(|e| CommitError::Config(format!("failed to parse module config: {e}")))
    }

    /// Names of active entries, rejecting duplicates.
    fn active_names(&self) -> Result<HashSet<&str>> {
        let mut names = HashSet::new();
        for mc in self.active_modules.iter().filter(|mc| mc.active) {
            if !names.insert(mc.name.as_str()) {
                return Err(CommitError::Config(format!(
                    "module {} is activated more than once",
                    mc.name
                )));
            }
        }
        Ok(names)
    }
}

/// Registration table of candidate modules.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<Box<dyn Module>>,
}

impl ModuleRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module. Registration order is kept as the tie-break order
    /// for modules sharing a priority.
    pub fn register(&mut self, module: Box<dyn Module>) -> &mut Self {
        debug!(module = module.name(), "module registered");
        self.modules.push(module);
        self
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, module: Box<dyn Module>) -> Self {
        let _ = self.register(module);
        self
    }

    /// Names of registered modules in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Read the activation config at `path` and bind it.
    pub fn bind_path(self, path: &Path, files: &dyn FileSource) -> Result<Vec<Box<dyn Module>>> {
        let raw = files.read_file(path).map_err(|e| {
            CommitError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        self.bind(&raw, files)
    }

    /// Bind a raw activation config onto the registered modules.
    ///
    /// Fails as a whole if any active module lists a dependency that is not
    /// active. Every registered module is returned; those without an active
    /// entry stay inactive.
    pub fn bind(self, raw: &[u8], files: &dyn FileSource) -> Result<Vec<Box<dyn Module>>> {
        let config = ActivationConfig::from_slice(raw)?;
        self.bind_config(&config, files)
    }

    /// Bind an already parsed activation config.
    pub fn bind_config(
        mut self,
        config: &ActivationConfig,
        files: &dyn FileSource,
    ) -> Result<Vec<Box<dyn Module>>> {
        let active = config.active_names()?;

        for mc in config.active_modules.iter().filter(|mc| mc.active) {
            let Some(module) = self.modules.iter_mut().find(|m| m.name() == mc.name) else {
                warn!(module = %mc.name, "config names an unknown module, ignoring");
                continue;
            };

            let missing: Vec<String> = mc
                .dependencies
                .iter()
                .filter(|dep| !active.contains(dep.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(CommitError::Dependency {
                    module: mc.name.clone(),
                    missing,
                });
            }

            module.set_config(mc.clone());
            if module.is_active() {
                module.load_config(files).at_stage(&mc.name, Stage::LoadConfig)?;
            }
        }

        info!(
            registered = self.modules.len(),
            active = self.modules.iter().filter(|m| m.is_active()).count(),
            "modules bound"
        );
        Ok(self.modules)
    }
}
