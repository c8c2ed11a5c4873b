//! Error types for the commit pipeline.
//!
//! Modules report [`ModuleError`] without knowing their own place in the
//! run; the commiter wraps it into [`CommitError::Module`] together with the
//! module name and the [`Stage`] that failed, so every error that reaches
//! the CLI says who failed and where.

use std::fmt;
use std::path::PathBuf;

use crate::commiter::Phase;

/// Pipeline stage in which a module operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Reading the module's auxiliary configuration.
    LoadConfig,
    /// Seeding the commit record before any field is built.
    Init,
    /// Building the module's interactive field.
    Field,
    /// Mutating the record after the form completed.
    PostProcess,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadConfig => write!(f, "load config"),
            Self::Init => write!(f, "init"),
            Self::Field => write!(f, "field"),
            Self::PostProcess => write!(f, "post-process"),
        }
    }
}

/// Errors raised by a single module.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// Auxiliary configuration is malformed or incomplete.
    #[error("config error: {0}")]
    Config(String),

    /// A required value was left empty or is invalid after input.
    #[error("{0}")]
    Validation(String),

    /// An external lookup (git, filesystem listing) failed.
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// An auxiliary file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An auxiliary JSON file could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the form runner.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The user aborted the form or declined a confirmation gate.
    #[error("cancelled by user")]
    Cancelled,

    /// An answer did not fit the record slot its field is bound to.
    #[error("answer for {binding} has the wrong shape: expected {expected}")]
    Binding {
        /// Display name of the binding.
        binding: String,
        /// The answer shape the binding accepts.
        expected: &'static str,
    },

    /// The prompt backend failed (terminal I/O, editor launch).
    #[error("prompt failed: {0}")]
    Prompt(String),
}

/// Errors surfaced by the registry and the commiter.
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    /// Declarative configuration is unreadable or malformed.
    #[error("config error: {0}")]
    Config(String),

    /// A module was activated without all of its dependencies.
    #[error("module {module} has unmet dependencies: {}", missing.join(", "))]
    Dependency {
        /// Offending module.
        module: String,
        /// Dependency names that are not active.
        missing: Vec<String>,
    },

    /// A module operation failed.
    #[error("module {module} failed during {stage}: {source}")]
    Module {
        /// Module name.
        module: String,
        /// Stage in which it failed.
        stage: Stage,
        /// Underlying module error.
        #[source]
        source: ModuleError,
    },

    /// The user cancelled the interactive form.
    #[error("cancelled by user")]
    Cancelled,

    /// The form runner failed for a reason other than cancellation.
    #[error("form error: {0}")]
    Form(FormError),

    /// A commiter operation was called before the run reached its phase.
    #[error("{operation} called out of order during the {phase:?} phase")]
    OutOfOrder {
        /// Rejected operation.
        operation: &'static str,
        /// Phase the run was in.
        phase: Phase,
    },
}

impl CommitError {
    /// Wrap a module error with its module name and stage.
    pub fn module(module: impl Into<String>, stage: Stage, source: ModuleError) -> Self {
        Self::Module {
            module: module.into(),
            stage,
            source,
        }
    }

    /// Whether this is a post-input validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Module {
                source: ModuleError::Validation(_),
                ..
            }
        )
    }

    /// Whether the user cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Name of the module that failed, if the error is tied to one.
    pub fn module_name(&self) -> Option<&str> {
        match self {
            Self::Dependency { module, .. } | Self::Module { module, .. } => Some(module),
            _ => None,
        }
    }
}

impl From<FormError> for CommitError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Cancelled => Self::Cancelled,
            other => Self::Form(other),
        }
    }
}

/// Convenience result alias for the pipeline.
pub type Result<T> = std::result::Result<T, CommitError>;

/// Extension trait to attach module name and stage to a module result.
pub trait ResultExt<T> {
    /// Wrap the error as [`CommitError::Module`] for `module` at `stage`.
    fn at_stage(self, module: &str, stage: Stage) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, ModuleError> {
    fn at_stage(self, module: &str, stage: Stage) -> Result<T> {
        self.map_err(|e| CommitError::module(module, stage, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_error_lists_missing_names() {
        let err = CommitError::Dependency {
            module: "breakingmsg".into(),
            missing: vec!["breaking".into(), "types".into()],
        };
        assert_eq!(
            err.to_string(),
            "module breakingmsg has unmet dependencies: breaking, types"
        );
        assert_eq!(err.module_name(), Some("breakingmsg"));
    }

    #[test]
    fn validation_error_keeps_module_and_stage() {
        let res: std::result::Result<(), ModuleError> =
            Err(ModuleError::Validation("commit type is required".into()));
        let err = res.at_stage("types", Stage::PostProcess).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.module_name(), Some("types"));
        assert_eq!(
            err.to_string(),
            "module types failed during post-process: commit type is required"
        );
    }

    #[test]
    fn cancelled_form_maps_to_cancelled() {
        let err = CommitError::from(FormError::Cancelled);
        assert!(err.is_cancelled());
        assert!(!err.is_validation());
    }

    #[test]
    fn prompt_failure_maps_to_form() {
        let err = CommitError::from(FormError::Prompt("tty closed".into()));
        assert!(matches!(err, CommitError::Form(FormError::Prompt(ref m)) if m == "tty closed"));
    }
}
