//! # goodcommit
//!
//! Command-line front end: argument parsing, layered settings, logging, the
//! `dialoguer` form runner and the commit, retry and edit flows.
//!
//! ## Module Overview
//!
//! - [`cli`] — `clap` arguments and the invocation [`cli::Mode`]
//! - [`settings`] — Defaults, environment and flag layering
//! - [`logging`] — `tracing-subscriber` setup on stderr
//! - [`prompt`] — [`prompt::DialoguerForm`], the terminal form runner
//! - [`app`] — Compose, commit, retry and edit
//!
//! ## Crate Position
//!
//! Depends on: goodcommit-core, goodcommit-modules.

#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod logging;
pub mod prompt;
pub mod settings;
