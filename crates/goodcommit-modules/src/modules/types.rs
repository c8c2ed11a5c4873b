//! `types`: pick the Conventional Commits type.
//!
//! Options come from the JSON file at `path`:
//!
//! ```json
//! { "types": [{ "id": "feat", "name": "Feature", "title": "A new feature", "emoji": "✨" }] }
//! ```

use goodcommit_core::commit::Commit;
use goodcommit_core::errors::ModuleError;
use goodcommit_core::files::FileSource;
use goodcommit_core::form::{Binding, Field, FieldKind, SelectOption};
use goodcommit_core::module::{Item, Module, ModuleConfig, read_json};
use serde::Deserialize;
use tracing::debug;

/// Module name in the activation config.
pub const NAME: &str = "types";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TypesFile {
    types: Vec<Item>,
}

/// Commit type selector.
pub struct Types {
    config: ModuleConfig,
    items: Vec<Item>,
}

impl Types {
    /// Inactive module with no types.
    pub fn new() -> Self {
        Self {
            config: ModuleConfig::named(NAME),
            items: Vec::new(),
        }
    }

    /// Loaded types.
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl Default for Types {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for Types {
    fn name(&self) -> &str {
        NAME
    }

    fn config(&self) -> &ModuleConfig {
        &self.config
    }

    fn set_config(&mut self, config: ModuleConfig) {
        self.config = config;
    }

    fn load_config(&mut self, files: &dyn FileSource) -> Result<(), ModuleError> {
        if let Some(path) = self.config.aux_path() {
            let file: TypesFile = read_json(files, path)?;
            debug!(count = file.types.len(), "commit types loaded");
            self.items = file.types;
        }
        Ok(())
    }

    fn new_field(&mut self, _commit: &Commit) -> Result<Option<Field>, ModuleError> {
        if self.items.is_empty() {
            return Err(ModuleError::Config("no commit types configured".into()));
        }
        let options = self
            .items
            .iter()
            .map(|i| SelectOption::new(format!("{} {} - {}", i.emoji, i.name, i.title), &i.id))
            .collect();
        Ok(Some(
            Field::new(
                "🪰・Select a Commit Type",
                FieldKind::Select { options },
                Binding::Type,
            )
            .with_description("Following the Conventional Commits specification."),
        ))
    }

    fn post_process(&self, commit: &mut Commit) -> Result<(), ModuleError> {
        if commit.commit_type.trim().is_empty() {
            return Err(ModuleError::Validation("commit type is required".into()));
        }
        commit.commit_type = commit.commit_type.trim().to_lowercase();
        Ok(())
    }
}
