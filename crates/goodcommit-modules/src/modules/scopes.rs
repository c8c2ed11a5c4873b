//! `scopes`: pick the scope(s) that apply to the chosen type.
//!
//! ```json
//! {
//!   "multiSelect": true,
//!   "scopes": [{ "id": "core", "name": "Core", "emoji": "📦", "conditional": ["feat", "fix"] }]
//! }
//! ```
//!
//! A scope with an empty `conditional` list applies to every type. After
//! input the selected ids become the header scope and their names are
//! listed at the top of the body.

use goodcommit_core::commit::Commit;
use goodcommit_core::errors::ModuleError;
use goodcommit_core::files::FileSource;
use goodcommit_core::form::{Binding, Field, FieldKind, SelectOption};
use goodcommit_core::module::{Item, Module, ModuleConfig, find_item, read_json};
use serde::Deserialize;
use tracing::debug;

/// Module name in the activation config.
pub const NAME: &str = "scopes";

/// Placeholder id that never ends up in the header.
const EMPTY_SCOPE: &str = "empty";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ScopesFile {
    multi_select: bool,
    scopes: Vec<Item>,
}

impl Default for ScopesFile {
    fn default() -> Self {
        Self {
            multi_select: true,
            scopes: Vec::new(),
        }
    }
}

/// Scope selector.
pub struct Scopes {
    config: ModuleConfig,
    items: Vec<Item>,
    multi_select: bool,
}

impl Scopes {
    /// Inactive module with no scopes, in multi-select mode.
    pub fn new() -> Self {
        Self {
            config: ModuleConfig::named(NAME),
            items: Vec::new(),
            multi_select: true,
        }
    }

    fn selected<'a>(&self, commit: &'a Commit) -> Vec<&'a str> {
        let ids: Vec<&str> = if self.multi_select {
            commit.scopes.iter().map(String::as_str).collect()
        } else {
            commit.scope.split(',').collect()
        };
        ids.into_iter()
            .map(str::trim)
            .filter(|id| !id.is_empty() && *id != EMPTY_SCOPE)
            .collect()
    }
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for Scopes {
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
            let file: ScopesFile = read_json(files, path)?;
            debug!(count = file.scopes.len(), multi = file.multi_select, "scopes loaded");
            self.items = file.scopes;
            self.multi_select = file.multi_select;
        }
        Ok(())
    }

    fn new_field(&mut self, commit: &Commit) -> Result<Option<Field>, ModuleError> {
        let options: Vec<SelectOption> = self
            .items
            .iter()
            .filter(|i| i.applies_to(&commit.commit_type))
            .map(|i| {
                SelectOption::new(format!("{} {} - {}", i.emoji, i.name, i.description), &i.id)
            })
            .collect();
        if options.is_empty() {
            return Err(ModuleError::Config(format!(
                "no valid scope options found for commit type: {}",
                commit.commit_type
            )));
        }

        let field = if self.multi_select {
            Field::new(
                "🪱・Select Commit Scopes",
                FieldKind::MultiSelect { options },
                Binding::Scopes,
            )
            .with_description("Additional contextual information about the changes. Multiple selections allowed.")
        } else {
            Field::new(
                "🙉・Select a Commit Scope",
                FieldKind::Select { options },
                Binding::Scope,
            )
            .with_description("Additional contextual information about the changes.")
        };
        Ok(Some(field))
    }

    fn post_process(&self, commit: &mut Commit) -> Result<(), ModuleError> {
        let ids: Vec<String> = self
            .selected(commit)
            .into_iter()
            .map(str::to_lowercase)
            .collect();
        if ids.is_empty() {
            commit.scope.clear();
            return Ok(());
        }

        let names: Vec<&str> = ids
            .iter()
            .map(|id| find_item(&self.items, id).map_or(id.as_str(), |i| i.name.as_str()))
            .collect();
        let label = if ids.len() > 1 { "SCOPES" } else { "SCOPE" };

        commit.scope = ids.join(",");
        commit.body = format!("{label}: {}\n{}", names.join(" "), commit.body);
        Ok(())
    }
}
