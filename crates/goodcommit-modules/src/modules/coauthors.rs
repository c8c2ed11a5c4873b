//! `coauthors`: pick co-authors from a team list.
//!
//! ```json
//! { "coauthors": [{ "id": "jane@x.com", "name": "Jane Doe", "emoji": "🦊" }] }
//! ```
//!
//! The committer's own entry (matched by git `user.email`) is never offered.
//! Selected ids become `Name <id>` trailers; when the team uses emojis the
//! body also gets a signature line with the author's and co-authors' emojis.

use std::rc::Rc;

use goodcommit_core::commit::Commit;
use goodcommit_core::errors::ModuleError;
use goodcommit_core::files::FileSource;
use goodcommit_core::form::{Binding, Field, FieldKind, SelectOption};
use goodcommit_core::module::{Item, Module, ModuleConfig, find_item, read_json};
use serde::Deserialize;
use tracing::debug;

use crate::git::Git;

/// Module name in the activation config.
pub const NAME: &str = "coauthors";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CoAuthorsFile {
    coauthors: Vec<Item>,
}

/// Co-author selector.
pub struct CoAuthors {
    config: ModuleConfig,
    items: Vec<Item>,
    git: Rc<dyn Git>,
}

impl CoAuthors {
    /// Inactive module with an empty team.
    pub fn new(git: Rc<dyn Git>) -> Self {
        Self {
            config: ModuleConfig::named(NAME),
            items: Vec::new(),
            git,
        }
    }

    fn emoji_of(&self, id: &str) -> &str {
        find_item(&self.items, id).map_or("", |i| i.emoji.as_str())
    }
}

impl Module for CoAuthors {
    fn name(&self) -> &str {
        NAME
    }

    fn config(&self) -> &ModuleConfig {
        &self.config
    }

    fn set_config(&mut self, config: ModuleConfig) {
        self.config = config;
    }

    fn load_config(&mut self, files: &dyn FileSource) -> Result<(), ModuleError> {
        if let Some(path) = self.config.aux_path() {
            let file: CoAuthorsFile = read_json(files, path)?;
            debug!(count = file.coauthors.len(), "co-authors loaded");
            self.items = file.coauthors;
        }
        Ok(())
    }

    fn new_field(&mut self, _commit: &Commit) -> Result<Option<Field>, ModuleError> {
        let own_email = self.git.user_email()?;
        let options: Vec<SelectOption> = self
            .items
            .iter()
            .filter(|i| i.id != own_email)
            .map(|i| SelectOption::new(format!("{} - {}", i.name, i.id), &i.id))
            .collect();
        if options.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            Field::new(
                "👥・Select Co-Authors",
                FieldKind::MultiSelect { options },
                Binding::CoAuthors,
            )
            .with_description("Choose co-authors for this commit."),
        ))
    }

    fn post_process(&self, commit: &mut Commit) -> Result<(), ModuleError> {
        if commit.co_authored_by.is_empty() {
            return Ok(());
        }
        let ids = std::mem::take(&mut commit.co_authored_by);

        let author_email = self.git.user_email()?;
        let emojis: Vec<&str> = std::iter::once(author_email.as_str())
            .chain(ids.iter().map(String::as_str))
            .map(|id| self.emoji_of(id))
            .filter(|e| !e.is_empty())
            .collect();
        if !emojis.is_empty() {
            commit.body = format!("{}\n\n{}", commit.body, emojis.join(" "));
        }

        commit.co_authored_by = ids
            .iter()
            .map(|id| match find_item(&self.items, id) {
                Some(item) => format!("{} <{}>", item.name, item.id),
                None => id.clone(),
            })
            .collect();
        Ok(())
    }
}
