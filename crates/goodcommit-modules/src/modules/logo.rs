//! `logo`: a banner note, usually pinned to the top of every page.
//!
//! The banner is read from the plain-text file at `path`; without one a
//! built-in banner is shown.

use goodcommit_core::commit::Commit;
use goodcommit_core::errors::ModuleError;
use goodcommit_core::files::FileSource;
use goodcommit_core::form::Field;
use goodcommit_core::module::{Module, ModuleConfig, read_text};

/// Module name in the activation config.
pub const NAME: &str = "logo";

const DEFAULT_BANNER: &str = "
    ┌─────────────────────────────────────┐
    │  You're gonna like this commit...   │
    └─────────────────────────────────────┘";

/// Banner module.
pub struct Logo {
    config: ModuleConfig,
    art: String,
}

impl Logo {
    /// Inactive module with the default banner.
    pub fn new() -> Self {
        Self {
            config: ModuleConfig::named(NAME),
            art: DEFAULT_BANNER.to_string(),
        }
    }

    /// Text currently shown.
    pub fn art(&self) -> &str {
        &self.art
    }
}

impl Default for Logo {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for Logo {
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
            let art = read_text(files, path)?;
            if !art.trim().is_empty() {
                self.art = art;
            }
        }
        Ok(())
    }

    fn new_field(&mut self, _commit: &Commit) -> Result<Option<Field>, ModuleError> {
        Ok(Some(Field::note(self.art.clone())))
    }
}
