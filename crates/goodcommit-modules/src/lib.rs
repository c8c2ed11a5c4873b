//! # goodcommit-modules
//!
//! The prompt modules shipped with `goodcommit`.
//!
//! Each module implements [`goodcommit_core::Module`] and is inert until the
//! activation config turns it on. [`builtin_registry`] registers all of
//! them in their canonical order.
//!
//! ## Module Overview
//!
//! - [`modules`] — One submodule per built-in prompt module
//! - [`git`] — Staged files and identity lookups behind a trait
//! - [`text`] — Sentence-case helpers used by the text modules
//!
//! ## Crate Position
//!
//! Depends on: goodcommit-core.
//! Depended on by: goodcommit.

#![deny(unsafe_code)]

use std::rc::Rc;

use goodcommit_core::registry::ModuleRegistry;

pub mod git;
pub mod modules;
pub mod text;

pub use git::{Git, GitCli};

use modules::{
    body::Body, breaking::Breaking, breakingmsg::BreakingMsg, coauthors::CoAuthors,
    description::Description, greetings::Greetings, logo::Logo, scopes::Scopes,
    signedoffby::SignedOffBy, types::Types, why::Why,
};

/// Registry holding every built-in module.
///
/// Registration order doubles as the tie-break order for modules that share
/// a priority.
pub fn builtin_registry(git: &Rc<dyn Git>) -> ModuleRegistry {
    ModuleRegistry::new()
        .with(Box::new(Logo::new()))
        .with(Box::new(Greetings::new(Rc::clone(git))))
        .with(Box::new(Types::new()))
        .with(Box::new(Scopes::new()))
        .with(Box::new(Description::new()))
        .with(Box::new(Why::new()))
        .with(Box::new(Body::new()))
        .with(Box::new(Breaking::new()))
        .with(Box::new(BreakingMsg::new()))
        .with(Box::new(CoAuthors::new(Rc::clone(git))))
        .with(Box::new(SignedOffBy::new(Rc::clone(git))))
}
