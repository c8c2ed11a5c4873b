//! Commit message rendering.
//!
//! Both functions are pure: they read the record and never mutate it, so
//! calling them repeatedly yields the same text.

use std::fmt::Write;

use crate::commit::Commit;

/// Trailer prefix for co-authors.
pub const CO_AUTHOR_TRAILER: &str = "Co-authored-by: ";

/// Header line: `type(scope)!: description`.
pub fn render_header(commit: &Commit) -> String {
    let mut header = commit.commit_type.clone();
    if !commit.scope.is_empty() {
        let _ = write!(header, "({})", commit.scope);
    }
    if commit.breaking && !commit.commit_type.ends_with('!') {
        header.push('!');
    }
    let _ = write!(header, ": {}", commit.description);
    header
}

/// Final commit message handed to git.
///
/// Header, blank line, body, then one `Co-authored-by` trailer per
/// co-author, then the footer verbatim.
pub fn render_message(commit: &Commit) -> String {
    let mut msg = format!("{}\n\n{}\n", render_header(commit), commit.body);
    for co_author in &commit.co_authored_by {
        let _ = write!(msg, "\n{CO_AUTHOR_TRAILER}{co_author}");
    }
    if !commit.footer.is_empty() {
        msg.push_str(&commit.footer);
    }
    msg
}

/// Human-readable summary shown before committing.
pub fn render_summary(commit: &Commit) -> String {
    let mut out = String::from("COMMIT SUMMARY\n\n");
    let breaking = if commit.breaking { " (breaking)" } else { "" };
    let _ = writeln!(out, "Type: {}{breaking}", commit.commit_type);
    if !commit.scope.is_empty() {
        let _ = writeln!(out, "Scope: {}", commit.scope);
    }
    let _ = writeln!(out, "Description: {}", commit.description);
    if !commit.body.is_empty() {
        let _ = write!(out, "Body:\n\n{}\n", commit.body);
    }
    for co_author in &commit.co_authored_by {
        let _ = write!(out, "\n{CO_AUTHOR_TRAILER}{co_author}");
    }
    if !commit.footer.is_empty() {
        out.push_str(&commit.footer);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
