//! Commit flow orchestration.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `good_commiter` | Default [`Commiter`]: init pass, paginated form, post-processing |
//! | `pagination` | Page planning with pinning and checkpointed form flushing |
//!
//! A run moves through [`Phase::Initializing`], [`Phase::FormRunning`],
//! [`Phase::PostProcessing`] and [`Phase::Rendered`]. Each operation only
//! runs in the phase the previous one left behind; a call out of order
//! fails with [`CommitError::OutOfOrder`](crate::errors::CommitError::OutOfOrder).
//! A failure leaves the phase where it was and is returned to the caller
//! untouched.

pub mod good_commiter;
pub mod pagination;

pub use good_commiter::GoodCommiter;

use tracing::info;

use crate::errors::Result;
use crate::form::FormRunner;
use crate::module::Module;

/// Progress of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Modules not yet loaded or init pass in progress.
    Initializing,
    /// Init pass done; the form can run.
    FormRunning,
    /// Form done; post-processing can run.
    PostProcessing,
    /// Post-processing done; the message is final.
    Rendered,
}

/// A commit flow driver.
pub trait Commiter {
    /// Store the modules and run the init pass in priority order.
    fn load_modules(&mut self, modules: Vec<Box<dyn Module>>) -> Result<()>;

    /// Build and run the paginated form.
    fn run_form(&mut self, runner: &mut dyn FormRunner, accessible: bool) -> Result<()>;

    /// Run post-processing in priority order.
    fn run_post_processing(&mut self) -> Result<()>;

    /// Human-readable summary of the commit.
    fn preview(&self) -> String;

    /// Final commit message.
    fn render_message(&self) -> String;
}

/// Run the form and post-processing, then render the message.
pub fn execute(
    commiter: &mut dyn Commiter,
    runner: &mut dyn FormRunner,
    accessible: bool,
) -> Result<String> {
    commiter.run_form(runner, accessible)?;
    commiter.run_post_processing()?;
    let message = commiter.render_message();
    info!(bytes = message.len(), "commit message rendered");
    Ok(message)
}
