//! Invocation flows: compose and commit, retry a saved message, edit it.
//!
//! A failed `git commit` (hook rejection, nothing staged) saves the message
//! to [`SAVED_MESSAGE_FILE`] so the user can fix the problem, optionally
//! `--edit` the message, and `--retry` without answering the form again.

use std::path::Path;
use std::process::Command;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use goodcommit_core::commiter::{Commiter, GoodCommiter, execute};
use goodcommit_core::errors::CommitError;
use goodcommit_core::files::FileSource;
use goodcommit_core::form::FormRunner;
use goodcommit_core::process::ProcessRunner;
use goodcommit_modules::{Git, builtin_registry};
use tracing::{info, warn};

use crate::settings::Settings;

/// Where the message of a failed commit is kept.
pub const SAVED_MESSAGE_FILE: &str = ".goodcommit_msg.tmp";

/// Result of a completed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
    /// Final commit message.
    pub message: String,
    /// Human-readable summary.
    pub preview: String,
}

/// Outcome of `--retry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// The saved message was committed and the file removed.
    Committed,
    /// The user declined; the file is kept.
    Declined,
}

/// Whether `err` is a user cancellation.
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CommitError>()
        .is_some_and(CommitError::is_cancelled)
}

/// Bind the config, run every module and render the message.
pub fn compose(
    settings: &Settings,
    git: &Rc<dyn Git>,
    files: &dyn FileSource,
    form: &mut dyn FormRunner,
) -> Result<Composed> {
    let modules = builtin_registry(git)
        .bind_path(&settings.config_path, files)
        .with_context(|| {
            format!("failed to load configuration {}", settings.config_path.display())
        })?;

    let mut commiter = GoodCommiter::new();
    commiter
        .load_modules(modules)
        .context("failed to initialize modules")?;
    let message = execute(&mut commiter, form, settings.accessible)?;

    Ok(Composed {
        message,
        preview: commiter.preview(),
    })
}

/// Run `git commit -m <message>`.
///
/// On failure the message is saved to `saved` and the error carries git's
/// combined output.
pub fn commit(process: &dyn ProcessRunner, message: &str, saved: &Path) -> Result<()> {
    let output = process
        .run(&["git", "commit", "-m", message])
        .context("failed to run git commit")?;
    if output.success() {
        info!("commit created");
        return Ok(());
    }

    match std::fs::write(saved, message) {
        Ok(()) => info!(path = %saved.display(), "commit message saved for --retry"),
        Err(e) => warn!(path = %saved.display(), error = %e, "failed to save commit message"),
    }
    bail!(
        "git commit exited with status {}\nOutput:\n{}\nThe message was saved; fix the problem and run `goodcommit --retry`.",
        output.exit_code,
        output.combined().trim_end()
    )
}

/// Commit the saved message after `confirm` accepts it.
pub fn retry(
    process: &dyn ProcessRunner,
    saved: &Path,
    confirm: impl FnOnce(&str) -> Result<bool>,
) -> Result<RetryOutcome> {
    let message = std::fs::read_to_string(saved)
        .with_context(|| format!("failed to read saved commit message {}", saved.display()))?;
    if !confirm(&message)? {
        return Ok(RetryOutcome::Declined);
    }

    let output = process
        .run(&["git", "commit", "-m", message.as_str()])
        .context("failed to run git commit")?;
    if !output.success() {
        bail!(
            "git commit exited with status {}\nOutput:\n{}",
            output.exit_code,
            output.combined().trim_end()
        );
    }

    if let Err(e) = std::fs::remove_file(saved) {
        warn!(path = %saved.display(), error = %e, "failed to remove saved commit message");
    }
    Ok(RetryOutcome::Committed)
}

/// Open the saved message in `editor`, attached to the terminal.
pub fn edit(editor: &str, saved: &Path) -> Result<()> {
    if !saved.exists() {
        bail!("no saved commit message at {}", saved.display());
    }
    let status = Command::new(editor)
        .arg(saved)
        .status()
        .with_context(|| format!("failed to open editor {editor}"))?;
    if !status.success() {
        bail!("editor {editor} exited with {status}");
    }
    Ok(())
}
