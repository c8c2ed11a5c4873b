//! `description`: the header summary.

use goodcommit_core::commit::Commit;
use goodcommit_core::errors::ModuleError;
use goodcommit_core::form::{Binding, Field, FieldKind};
use goodcommit_core::module::{Module, ModuleConfig};

use crate::text::decapitalize;

/// Module name in the activation config.
pub const NAME: &str = "description";

/// Longest accepted summary.
pub const CHAR_LIMIT: usize = 50;

/// Summary input.
pub struct Description {
    config: ModuleConfig,
}

impl Description {
    /// Inactive module.
    pub fn new() -> Self {
        Self {
            config: ModuleConfig::named(NAME),
        }
    }
}

impl Default for Description {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for Description {
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
                "✏️・Write the Commit Description",
                FieldKind::Input {
                    char_limit: Some(CHAR_LIMIT),
                },
                Binding::Description,
            )
            .with_description(format!(
                "Briefly describe the changes in this commit (max {CHAR_LIMIT} chars)."
            )),
        ))
    }

    fn post_process(&self, commit: &mut Commit) -> Result<(), ModuleError> {
        let trimmed = commit.description.trim();
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(ModuleError::Validation("commit description is required".into()));
        }
        commit.description = decapitalize(trimmed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(input: &str) -> Result<String, ModuleError> {
        let mut commit = Commit {
            description: input.into(),
            ..Commit::default()
        };
        Description::new().post_process(&mut commit)?;
        Ok(commit.description)
    }

    #[test]
    fn trims_period_and_lowercases() {
        assert_eq!(processed("Add widget.").unwrap(), "add widget");
        assert_eq!(processed("  Fix race  ").unwrap(), "fix race");
    }

    #[test]
    fn empty_description_fails_validation() {
        assert!(matches!(processed(""), Err(ModuleError::Validation(_))));
        assert!(matches!(processed(" . "), Err(ModuleError::Validation(_))));
    }

    #[test]
    fn input_is_limited() {
        let field = Description::new().new_field(&Commit::new()).unwrap().unwrap();
        assert_eq!(field.kind, FieldKind::Input { char_limit: Some(50) });
        assert_eq!(field.binding, Binding::Description);
    }
}
