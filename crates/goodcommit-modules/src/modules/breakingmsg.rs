//! `breakingmsg`: details of a breaking change, appended to the body as a
//! `BREAKING CHANGE:` paragraph. Depends on `breaking`.

use goodcommit_core::commit::Commit;
use goodcommit_core::errors::ModuleError;
use goodcommit_core::form::{Binding, Field, FieldKind};
use goodcommit_core::module::{Module, ModuleConfig};

use crate::text::sentence;

/// Module name in the activation config.
pub const NAME: &str = "breakingmsg";

/// Extras key holding the answer.
pub const EXTRA_KEY: &str = "breakingmsg";

/// Breaking change details editor.
pub struct BreakingMsg {
    config: ModuleConfig,
}

impl BreakingMsg {
    /// Inactive module.
    pub fn new() -> Self {
        Self {
            config: ModuleConfig::named(NAME),
        }
    }
}

impl Default for BreakingMsg {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for BreakingMsg {
    fn name(&self) -> &str {
        NAME
    }

    fn config(&self) -> &ModuleConfig {
        &self.config
    }

    fn set_config(&mut self, config: ModuleConfig) {
        self.config = config;
    }

    fn init_commit_info(&self, commit: &mut Commit) -> Result<(), ModuleError> {
        let _ = commit.extras.create(EXTRA_KEY);
        Ok(())
    }

    fn new_field(&mut self, commit: &Commit) -> Result<Option<Field>, ModuleError> {
        if !commit.breaking {
            return Ok(None);
        }
        Ok(Some(
            Field::new(
                "💥・Breaking Changes Details",
                FieldKind::Text {
                    editor: Some("vim".into()),
                },
                Binding::Extra(EXTRA_KEY.into()),
            )
            .with_description("Provide detailed information about the breaking changes."),
        ))
    }

    fn post_process(&self, commit: &mut Commit) -> Result<(), ModuleError> {
        if !commit.breaking {
            return Ok(());
        }
        let Some(details) = commit.extras.provided(EXTRA_KEY).map(|d| sentence(d.trim())) else {
            return Ok(());
        };
        commit.body = format!("{}\n\nBREAKING CHANGE: {details}", commit.body);
        commit.extras.set(EXTRA_KEY, details);
        Ok(())
    }
}
