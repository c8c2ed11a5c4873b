//! `body`: free-form detail, edited in an external editor on request.

use goodcommit_core::commit::Commit;
use goodcommit_core::errors::ModuleError;
use goodcommit_core::form::{Binding, Field, FieldKind};
use goodcommit_core::module::{Module, ModuleConfig};

use crate::text::sentence;

/// Module name in the activation config.
pub const NAME: &str = "body";

/// Body editor.
pub struct Body {
    config: ModuleConfig,
}

impl Body {
    /// Inactive module.
    pub fn new() -> Self {
        Self {
            config: ModuleConfig::named(NAME),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for Body {
    fn name(&self) -> &str {
        NAME
    }

    fn config(&self) -> &ModuleConfig {
        &self.config
    }

    fn set_config(&mut self, config: ModuleConfig) {
        self.config = config;
    }

    fn new_field(&mut self, _commit: &Commit) -> Result<Option<Field>, ModuleError> {
        Ok(Some(
            Field::new(
                "📖・Write the Commit Body",
                FieldKind::Text {
                    editor: Some("vim".into()),
                },
                Binding::Body,
            )
            .with_description("Provide a more detailed description of the changes."),
        ))
    }

    fn post_process(&self, commit: &mut Commit) -> Result<(), ModuleError> {
        let body = commit.body.trim();
        if !body.is_empty() {
            commit.body = sentence(body);
        }
        Ok(())
    }
}
