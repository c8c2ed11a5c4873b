//! The module contract.
//!
//! A module contributes at most one interactive field per page and one
//! post-processing mutation to the commit flow. The engine only sees
//! `Box<dyn Module>` and never inspects concrete variants.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::commit::Commit;
use crate::errors::ModuleError;
use crate::files::FileSource;
use crate::form::Field;

/// Per-module configuration from the activation config.
///
/// All fields are optional in JSON; missing ones take their zero value.
///
/// ```json
/// { "name": "types", "page": 2, "position": 1, "active": true,
///   "path": "./configs/types.json", "priority": 1 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleConfig {
    /// Form page the field appears on.
    pub page: i32,
    /// Ordering within the page.
    pub position: i32,
    /// Unique module name.
    pub name: String,
    /// Whether the module takes part in the run.
    pub active: bool,
    /// Location of module-specific auxiliary config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Order of the init and post-processing passes (lower first).
    pub priority: i32,
    /// Run the form built so far once this page is reached.
    pub checkpoint: bool,
    /// Repeat the field on every later page.
    pub pinned: bool,
    /// Modules that must also be active.
    pub dependencies: Vec<String>,
}

impl ModuleConfig {
    /// Inactive config carrying only the module's name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The auxiliary config path, ignoring an empty string.
    pub fn aux_path(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(Path::new)
    }
}

/// Entry of an auxiliary list (types, scopes, co-authors).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Value written to the record.
    pub id: String,
    /// Short display name.
    pub name: String,
    /// One-line title.
    pub title: String,
    /// Longer explanation.
    pub description: String,
    /// Decoration shown next to the name.
    pub emoji: String,
    /// Commit types this item applies to; empty means all.
    pub conditional: Vec<String>,
}

impl Item {
    /// Whether the item applies to `commit_type`.
    pub fn applies_to(&self, commit_type: &str) -> bool {
        self.conditional.is_empty() || self.conditional.iter().any(|t| t == commit_type)
    }
}

/// Find an item by id.
pub fn find_item<'a>(items: &'a [Item], id: &str) -> Option<&'a Item> {
    items.iter().find(|i| i.id == id)
}

/// A pluggable prompt + post-process unit.
pub trait Module {
    /// Unique name, matched against the activation config.
    fn name(&self) -> &str;

    /// Current configuration.
    fn config(&self) -> &ModuleConfig;

    /// Replace the configuration (called once by the registry).
    fn set_config(&mut self, config: ModuleConfig);

    /// Whether the module takes part in the run.
    fn is_active(&self) -> bool {
        self.config().active
    }

    /// Read auxiliary configuration from [`ModuleConfig::path`].
    ///
    /// No-op by default and when no path is configured.
    fn load_config(&mut self, _files: &dyn FileSource) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Seed extras cells or defaults before any field is built.
    fn init_commit_info(&self, _commit: &mut Commit) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Field to show given the record so far; `None` contributes nothing.
    fn new_field(&mut self, commit: &Commit) -> Result<Option<Field>, ModuleError>;

    /// Mutate the record after all input is collected.
    fn post_process(&self, _commit: &mut Commit) -> Result<(), ModuleError> {
        Ok(())
    }
}

impl std::fmt::Debug for dyn Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.config();
        f.debug_struct("Module")
            .field("name", &self.name())
            .field("active", &config.active)
            .field("page", &config.page)
            .field("priority", &config.priority)
            .finish()
    }
}

/// Read and parse a JSON auxiliary file.
pub fn read_json<T: DeserializeOwned>(
    files: &dyn FileSource,
    path: &Path,
) -> Result<T, ModuleError> {
    let raw = read_bytes(files, path)?;
    serde_json::from_slice(&raw).map_err(|source| ModuleError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a plain-text auxiliary file.
pub fn read_text(files: &dyn FileSource, path: &Path) -> Result<String, ModuleError> {
    let raw = read_bytes(files, path)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

fn read_bytes(files: &dyn FileSource, path: &Path) -> Result<Vec<u8>, ModuleError> {
    files.read_file(path).map_err(|source| ModuleError::Io {
        path: path.to_path_buf(),
        source,
    })
}
