//! `greetings`: confirm the staged files before anything else is asked.
//!
//! Declining the confirmation cancels the run. Usually placed on a
//! checkpoint page so nothing else is built until the user agrees.

use std::rc::Rc;

use goodcommit_core::commit::Commit;
use goodcommit_core::errors::ModuleError;
use goodcommit_core::form::{Binding, Field, FieldKind};
use goodcommit_core::module::{Module, ModuleConfig};
use tracing::debug;

use crate::git::Git;

/// Module name in the activation config.
pub const NAME: &str = "greetings";

/// Staged-files gate.
pub struct Greetings {
    config: ModuleConfig,
    git: Rc<dyn Git>,
}

impl Greetings {
    /// Inactive module querying `git` for staged files.
    pub fn new(git: Rc<dyn Git>) -> Self {
        Self {
            config: ModuleConfig::named(NAME),
            git,
        }
    }
}

impl Module for Greetings {
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
        let staged = self.git.staged_files()?;
        if staged.is_empty() {
            return Err(ModuleError::Lookup("no staged files found".into()));
        }
        debug!(files = staged.len(), "staged files listed");

        Ok(Some(
            Field::new(
                "🐝・Do you want to commit these files?",
                FieldKind::Confirm {
                    affirmative: "Yes".into(),
                    negative: "No".into(),
                    gate: true,
                },
                Binding::Nothing,
            )
            .with_description(format!("\nStaged Files:\n{}", staged.join("\n"))),
        ))
    }
}
