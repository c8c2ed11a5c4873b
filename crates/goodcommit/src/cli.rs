//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// What the invocation should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Run the form and commit.
    Commit,
    /// Run the form and print the message only.
    DryRun,
    /// Commit the message saved by a failed run.
    Retry,
    /// Open the saved message in an editor.
    Edit,
}

/// Build a Conventional Commits message interactively and commit it.
#[derive(Debug, Parser)]
#[command(name = "goodcommit", version, about)]
pub struct Args {
    /// Plain prompts for screen readers (also `ACCESSIBLE=true`).
    #[arg(long)]
    pub accessible: bool,

    /// Module activation config (also `GOODCOMMIT_CONFIG_PATH`).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dry run: print the message without committing.
    #[arg(short = 'm', conflicts_with = "retry")]
    pub dry_run: bool,

    /// Commit with the message saved by the last failed run.
    #[arg(long)]
    pub retry: bool,

    /// Edit the message saved by the last failed run.
    #[arg(long, conflicts_with_all = ["retry", "dry_run"])]
    pub edit: bool,

    /// Log filter directive for stderr output.
    #[arg(long, env = "GOODCOMMIT_LOG", default_value = "warn", hide_env_values = true)]
    pub log: String,
}

impl Args {
    /// The requested mode.
    pub fn mode(&self) -> Mode {
        if self.edit {
            Mode::Edit
        } else if self.retry {
            Mode::Retry
        } else if self.dry_run {
            Mode::DryRun
        } else {
            Mode::Commit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("goodcommit").chain(argv.iter().copied()))
    }

    #[test]
    fn defaults_to_commit() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.mode(), Mode::Commit);
        assert!(!args.accessible);
        assert!(args.config.is_none());
    }

    #[test]
    fn short_m_is_dry_run() {
        assert_eq!(parse(&["-m"]).unwrap().mode(), Mode::DryRun);
    }

    #[test]
    fn dry_run_and_retry_conflict() {
        let err = parse(&["-m", "--retry"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn edit_and_retry_modes() {
        assert_eq!(parse(&["--edit"]).unwrap().mode(), Mode::Edit);
        assert_eq!(parse(&["--retry"]).unwrap().mode(), Mode::Retry);
    }

    #[test]
    fn config_path_flag() {
        let args = parse(&["--config", "team.json", "--accessible"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("team.json")));
        assert!(args.accessible);
    }
}
