//! `why`: the reason for the change, kept in `extras["why"]` and moved to
//! the top of the body after input.

use goodcommit_core::commit::Commit;
use goodcommit_core::errors::ModuleError;
use goodcommit_core::form::{Binding, Field, FieldKind};
use goodcommit_core::module::{Module, ModuleConfig};

use crate::text::sentence;

/// Module name in the activation config.
pub const NAME: &str = "why";

/// Extras key holding the answer.
pub const EXTRA_KEY: &str = "why";

/// Reason input.
pub struct Why {
    config: ModuleConfig,
}

impl Why {
    /// Inactive module.
    pub fn new() -> Self {
        Self {
            config: ModuleConfig::named(NAME),
        }
    }
}

impl Default for Why {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for Why {
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

    fn new_field(&mut self, _commit: &Commit) -> Result<Option<Field>, ModuleError> {
        Ok(Some(
            Field::new(
                "❔・Why was this change needed?",
                FieldKind::Input {
                    char_limit: Some(100),
                },
                Binding::Extra(EXTRA_KEY.into()),
            )
            .with_description("Explain the reason for this change (max 100 chars)."),
        ))
    }

    fn post_process(&self, commit: &mut Commit) -> Result<(), ModuleError> {
        let Some(why) = commit.extras.provided(EXTRA_KEY).map(|w| sentence(w.trim())) else {
            return Ok(());
        };
        commit.body = format!("WHY: {why}\n\n{}", commit.body);
        commit.extras.set(EXTRA_KEY, why);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_empty_cell() {
        let mut commit = Commit::new();
        Why::new().init_commit_info(&mut commit).unwrap();
        assert_eq!(commit.extras.get(EXTRA_KEY), Some(""));
    }

    #[test]
    fn reason_is_prepended_to_body() {
        let mut commit = Commit {
            body: "Adds the widget.".into(),
            ..Commit::default()
        };
        commit.extras.set(EXTRA_KEY, "users asked for it");
        Why::new().post_process(&mut commit).unwrap();
        assert_eq!(commit.body, "WHY: Users asked for it.\n\nAdds the widget.");
        assert_eq!(commit.extras.get(EXTRA_KEY), Some("Users asked for it."));
    }

    #[test]
    fn empty_or_missing_reason_is_a_no_op() {
        let mut commit = Commit {
            body: "Body.".into(),
            ..Commit::default()
        };
        Why::new().post_process(&mut commit).unwrap();
        let _ = commit.extras.create(EXTRA_KEY);
        Why::new().post_process(&mut commit).unwrap();
        assert_eq!(commit.body, "Body.");
    }
}
