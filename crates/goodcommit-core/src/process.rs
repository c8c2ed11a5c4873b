//! Process-execution capability.
//!
//! Used for git lookups by modules and for handing the final message to
//! `git commit`. Commands are passed as argv; nothing goes through a shell.

use std::process::Command;

use tracing::debug;

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
    /// Exit code, `-1` when killed by a signal.
    pub exit_code: i32,
}

impl CommandOutput {
    /// Whether the command exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout followed by stderr, as a user would see them in a terminal.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// Errors from running a command.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The argv was empty.
    #[error("empty command")]
    EmptyCommand,

    /// The program could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited non-zero.
    #[error("{program} exited with status {}: {}", output.exit_code, output.combined().trim())]
    Failed {
        /// Program name.
        program: String,
        /// Captured output.
        output: CommandOutput,
    },
}

/// Runs external commands.
pub trait ProcessRunner {
    /// Run `argv` to completion and capture its output.
    ///
    /// A non-zero exit is reported in [`CommandOutput::exit_code`], not as an
    /// error; use [`run_checked`] when failure should be an error.
    fn run(&self, argv: &[&str]) -> Result<CommandOutput, ProcessError>;
}

/// Run `argv` and turn a non-zero exit into [`ProcessError::Failed`].
pub fn run_checked(
    runner: &dyn ProcessRunner,
    argv: &[&str],
) -> Result<CommandOutput, ProcessError> {
    let output = runner.run(argv)?;
    if output.success() {
        Ok(output)
    } else {
        Err(ProcessError::Failed {
            program: argv.first().copied().unwrap_or_default().to_string(),
            output,
        })
    }
}

/// [`ProcessRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, argv: &[&str]) -> Result<CommandOutput, ProcessError> {
        let (program, args) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;
        debug!(program, ?args, "spawning process");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| ProcessError::Spawn {
                program: (*program).to_string(),
                source,
            })?;

        let exit_code = output.status.code().unwrap_or(-1);
        debug!(program, exit_code, "process completed");

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
        })
    }
}
