//! `goodcommit` binary.

#![deny(unsafe_code)]

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Confirm;
use goodcommit::app::{self, RetryOutcome, SAVED_MESSAGE_FILE};
use goodcommit::cli::{Args, Mode};
use goodcommit::logging;
use goodcommit::prompt::DialoguerForm;
use goodcommit::settings::Settings;
use goodcommit_core::files::LocalFiles;
use goodcommit_core::process::{ProcessRunner, SystemProcessRunner};
use goodcommit_modules::{Git, GitCli};
use tracing::debug;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_subscriber(&args.log);
    let settings = Settings::resolve(&args);
    debug!(?settings, mode = ?args.mode(), "starting");

    let saved = Path::new(SAVED_MESSAGE_FILE);
    let process: Rc<dyn ProcessRunner> = Rc::new(SystemProcessRunner);

    match args.mode() {
        Mode::Edit => {
            app::edit(&settings.editor, saved)?;
            println!("Commit message edited, now run 'goodcommit --retry' to commit.");
        }
        Mode::Retry => {
            let outcome = app::retry(process.as_ref(), saved, |message| {
                Confirm::new()
                    .with_prompt(format!("Commit with the following message?\n\n{message}\n"))
                    .default(true)
                    .interact()
                    .context("confirmation prompt failed")
            })?;
            match outcome {
                RetryOutcome::Committed => {
                    println!("Commit successful with the last saved commit message.");
                }
                RetryOutcome::Declined => println!("Commit canceled."),
            }
        }
        mode @ (Mode::Commit | Mode::DryRun) => {
            let git: Rc<dyn Git> = Rc::new(GitCli::new(Rc::clone(&process)));
            let mut form = DialoguerForm::new();
            let composed = match app::compose(&settings, &git, &LocalFiles, &mut form) {
                Ok(composed) => composed,
                Err(e) if app::is_cancelled(&e) => {
                    println!("Commit canceled.");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            println!("\n{}\n", composed.preview);
            if mode == Mode::DryRun {
                println!("{}", composed.message);
                println!("Dry run mode, commit not executed.");
            } else {
                app::commit(process.as_ref(), &composed.message, saved)?;
            }
        }
    }
    Ok(())
}
