//! Built-in modules.
//!
//! | Module | Field | Post-process |
//! |--------|-------|--------------|
//! | [`logo`] | ASCII banner note | — |
//! | [`greetings`] | Staged files confirmation gate | — |
//! | [`types`] | Commit type select | Required, lowercased |
//! | [`scopes`] | Scope (multi-)select filtered by type | Scope string and body prefix |
//! | [`description`] | 50-char summary input | Required, trimmed, lowercased |
//! | [`why`] | 100-char reason input | `WHY:` body prefix |
//! | [`body`] | Editor body | Sentence case |
//! | [`breaking`] | Breaking change confirm | — |
//! | [`breakingmsg`] | Breaking change details | `BREAKING CHANGE:` paragraph |
//! | [`coauthors`] | Co-author multi-select | Trailers and emoji signature |
//! | [`signedoffby`] | — | `Signed-off-by` footer |

pub mod body;
pub mod breaking;
pub mod breakingmsg;
pub mod coauthors;
pub mod description;
pub mod greetings;
pub mod logo;
pub mod scopes;
pub mod signedoffby;
pub mod types;
pub mod why;
