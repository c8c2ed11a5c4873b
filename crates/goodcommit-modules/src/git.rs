//! Git queries used by the built-in modules.
//!
//! Modules never spawn processes themselves; they ask a [`Git`] for the
//! staged file list and the configured identity. [`GitCli`] answers through
//! a [`ProcessRunner`], so tests can swap in canned output.

use std::rc::Rc;

use goodcommit_core::errors::ModuleError;
use goodcommit_core::process::{ProcessRunner, run_checked};
use tracing::debug;

/// Repository facts the built-in modules depend on.
pub trait Git {
    /// `user.name` from git config.
    fn user_name(&self) -> Result<String, ModuleError>;

    /// `user.email` from git config.
    fn user_email(&self) -> Result<String, ModuleError>;

    /// Paths of staged files, one per entry.
    fn staged_files(&self) -> Result<Vec<String>, ModuleError>;
}

/// [`Git`] backed by the `git` executable.
#[derive(Clone)]
pub struct GitCli {
    runner: Rc<dyn ProcessRunner>,
}

impl GitCli {
    /// Query git through `runner`.
    pub fn new(runner: Rc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    fn query(&self, argv: &[&str]) -> Result<String, ModuleError> {
        let output = run_checked(self.runner.as_ref(), argv)
            .map_err(|e| ModuleError::Lookup(e.to_string()))?;
        Ok(output.stdout)
    }

    fn config_value(&self, key: &str) -> Result<String, ModuleError> {
        let value = self.query(&["git", "config", "--get", key])?;
        let value = value.trim();
        if value.is_empty() {
            return Err(ModuleError::Lookup(format!("git config {key} is not set")));
        }
        debug!(key, "git config value read");
        Ok(value.to_string())
    }
}

impl Git for GitCli {
    fn user_name(&self) -> Result<String, ModuleError> {
        self.config_value("user.name")
    }

    fn user_email(&self) -> Result<String, ModuleError> {
        self.config_value("user.email")
    }

    fn staged_files(&self) -> Result<Vec<String>, ModuleError> {
        let out = self.query(&["git", "diff", "--cached", "--name-only"])?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }
}
