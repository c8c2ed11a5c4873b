//! # goodcommit-core
//!
//! Commit record, module contract, and the paginated form pipeline behind
//! `goodcommit`.
//!
//! A run binds an activation config onto registered [`Module`]s, lets every
//! active module seed the [`Commit`] record, walks the modules' fields page
//! by page through a [`FormRunner`], post-processes the answers and renders
//! a Conventional Commits message.
//!
//! ## Module Overview
//!
//! - [`commit`] — The commit record and its free-form extras
//! - [`module`] — Module trait, per-module config, and auxiliary item lists
//! - [`registry`] — Registration table and activation config binding
//! - [`form`] — Backend-neutral fields, groups, and answer bindings
//! - [`commiter`] — Init pass, pagination, checkpoints, post-processing
//! - [`render`] — Commit message and summary text
//! - [`files`] — File access seam used while loading module configs
//! - [`process`] — Subprocess seam used for git queries and commits
//! - [`errors`] — Error types with module and stage context
//!
//! ## Crate Position
//!
//! Standalone (no goodcommit crate dependencies).
//! Depended on by: goodcommit-modules, goodcommit.

#![deny(unsafe_code)]

pub mod commit;
pub mod commiter;
pub mod errors;
pub mod files;
pub mod form;
pub mod module;
pub mod process;
pub mod registry;
pub mod render;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use commit::{Commit, Extras};
pub use commiter::{Commiter, GoodCommiter, Phase, execute};
pub use errors::{CommitError, FormError, ModuleError, ResultExt, Stage};
pub use form::{Answer, Binding, Field, FieldKind, Form, FormRunner, Group, SelectOption};
pub use module::{Item, Module, ModuleConfig};
pub use registry::{ActivationConfig, ModuleRegistry};
