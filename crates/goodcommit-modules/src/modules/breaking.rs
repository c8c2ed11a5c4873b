//! `breaking`: ask whether the commit breaks compatibility.
//!
//! Only asked for `feat` and `fix` unless the file at `path` lists other
//! types: `{ "types": ["feat", "fix", "refactor"] }`.

use goodcommit_core::commit::Commit;
use goodcommit_core::errors::ModuleError;
use goodcommit_core::files::FileSource;
use goodcommit_core::form::{Binding, Field, FieldKind};
use goodcommit_core::module::{Module, ModuleConfig, read_json};
use serde::Deserialize;

/// Module name in the activation config.
pub const NAME: &str = "breaking";

const DEFAULT_TYPES: [&str; 2] = ["feat", "fix"];

#[derive(Debug, Deserialize)]
struct BreakingFile {
    types: Vec<String>,
}

/// Breaking change confirmation.
pub struct Breaking {
    config: ModuleConfig,
    types: Vec<String>,
}

impl Breaking {
    /// Inactive module asking for `feat` and `fix`.
    pub fn new() -> Self {
        Self {
            config: ModuleConfig::named(NAME),
            types: DEFAULT_TYPES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Whether the question is asked for `commit_type`.
    pub fn applies_to(&self, commit_type: &str) -> bool {
        self.types.iter().any(|t| t == commit_type)
    }
}

impl Default for Breaking {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for Breaking {
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
            let file: BreakingFile = read_json(files, path)?;
            self.types = file.types;
        }
        Ok(())
    }

    fn new_field(&mut self, commit: &Commit) -> Result<Option<Field>, ModuleError> {
        if !self.applies_to(&commit.commit_type) {
            return Ok(None);
        }
        Ok(Some(Field::new(
            "☎️・Does this commit introduce a Breaking Change?",
            FieldKind::Confirm {
                affirmative: "Yes 🚨".into(),
                negative: "No 🏖️".into(),
                gate: false,
            },
            Binding::Breaking,
        )))
    }
}
