//! `signedoffby`: append a DCO `Signed-off-by` trailer from git config.

use std::rc::Rc;

use goodcommit_core::commit::Commit;
use goodcommit_core::errors::ModuleError;
use goodcommit_core::form::Field;
use goodcommit_core::module::{Module, ModuleConfig};

use crate::git::Git;

/// Module name in the activation config.
pub const NAME: &str = "signedoffby";

/// Sign-off trailer.
pub struct SignedOffBy {
    config: ModuleConfig,
    git: Rc<dyn Git>,
}

impl SignedOffBy {
    /// Inactive module reading identity from `git`.
    pub fn new(git: Rc<dyn Git>) -> Self {
        Self {
            config: ModuleConfig::named(NAME),
            git,
        }
    }
}

impl Module for SignedOffBy {
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
        Ok(None)
    }

    fn post_process(&self, commit: &mut Commit) -> Result<(), ModuleError> {
        let name = self.git.user_name()?;
        let email = self.git.user_email()?;
        commit.footer.push_str(&format!("\nSigned-off-by: {name} <{email}>"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::fixtures;

    #[test]
    fn appends_trailer_to_footer() {
        let mut commit = Commit::new();
        SignedOffBy::new(fixtures::git())
            .post_process(&mut commit)
            .unwrap();
        assert_eq!(commit.footer, "\nSigned-off-by: Nantli <nantli@x.com>");
    }

    #[test]
    fn has_no_field() {
        let mut module = SignedOffBy::new(fixtures::git());
        assert!(module.new_field(&Commit::new()).unwrap().is_none());
    }

    #[test]
    fn missing_identity_fails() {
        let module = SignedOffBy::new(fixtures::broken_git());
        let err = module.post_process(&mut Commit::new()).unwrap_err();
        assert!(matches!(err, ModuleError::Lookup(_)));
    }
}
