//! Terminal form runner built on `dialoguer`.
//!
//! Each [`Field`] is asked in order with the matching dialoguer prompt and
//! its answer written back through [`Commit::apply`]. Accessible mode swaps
//! the colourful theme for plain prompts.

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Confirm, Editor, Input, MultiSelect, Select};
use goodcommit_core::commit::Commit;
use goodcommit_core::errors::FormError;
use goodcommit_core::form::{Answer, Field, FieldKind, Form, FormRunner, SelectOption};
use tracing::debug;

/// Interactive [`FormRunner`] for a real terminal.
#[derive(Debug, Default)]
pub struct DialoguerForm;

impl DialoguerForm {
    /// Create a runner.
    pub fn new() -> Self {
        Self
    }
}

fn prompt_error(err: impl std::fmt::Display) -> FormError {
    FormError::Prompt(err.to_string())
}

fn prompt_text(field: &Field) -> String {
    if field.description.is_empty() {
        field.title.clone()
    } else {
        format!("{}\n{}", field.title, field.description.trim_end())
    }
}

fn labels(options: &[SelectOption]) -> Vec<&str> {
    options.iter().map(|o| o.label.as_str()).collect()
}

fn ask(theme: &dyn Theme, field: &Field, current: Answer) -> Result<Answer, FormError> {
    let prompt = prompt_text(field);
    match &field.kind {
        FieldKind::Note => {
            println!("{}", field.title);
            if !field.description.is_empty() {
                println!("{}", field.description);
            }
            Ok(Answer::Empty)
        }
        FieldKind::Select { options } => {
            let default = match &current {
                Answer::Text(v) => options.iter().position(|o| &o.value == v).unwrap_or(0),
                _ => 0,
            };
            let picked = Select::with_theme(theme)
                .with_prompt(prompt)
                .items(&labels(options))
                .default(default)
                .interact_opt()
                .map_err(prompt_error)?
                .ok_or(FormError::Cancelled)?;
            Ok(Answer::Text(options[picked].value.clone()))
        }
        FieldKind::MultiSelect { options } => {
            let chosen: Vec<bool> = match &current {
                Answer::List(values) => options.iter().map(|o| values.contains(&o.value)).collect(),
                _ => vec![false; options.len()],
            };
            let picked = MultiSelect::with_theme(theme)
                .with_prompt(prompt)
                .items(&labels(options))
                .defaults(&chosen)
                .interact_opt()
                .map_err(prompt_error)?
                .ok_or(FormError::Cancelled)?;
            Ok(Answer::List(
                picked.into_iter().map(|i| options[i].value.clone()).collect(),
            ))
        }
        FieldKind::Input { char_limit } => {
            let initial = match current {
                Answer::Text(v) => v,
                _ => String::new(),
            };
            let limit = *char_limit;
            let value: String = Input::with_theme(theme)
                .with_prompt(prompt)
                .with_initial_text(initial)
                .allow_empty(true)
                .validate_with(move |input: &String| -> Result<(), String> {
                    match limit {
                        Some(max) if input.chars().count() > max => {
                            Err(format!("at most {max} characters"))
                        }
                        _ => Ok(()),
                    }
                })
                .interact_text()
                .map_err(prompt_error)?;
            Ok(Answer::Text(value))
        }
        FieldKind::Text { editor } => {
            let initial = match current {
                Answer::Text(v) => v,
                _ => String::new(),
            };
            let Some(editor) = editor else {
                let value: String = Input::with_theme(theme)
                    .with_prompt(prompt)
                    .with_initial_text(initial)
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_error)?;
                return Ok(Answer::Text(value));
            };
            println!("{prompt}");
            let open = Confirm::with_theme(theme)
                .with_prompt(format!("Open {editor}?"))
                .default(true)
                .interact_opt()
                .map_err(prompt_error)?
                .ok_or(FormError::Cancelled)?;
            if !open {
                let value: String = Input::with_theme(theme)
                    .with_prompt(field.title.as_str())
                    .with_initial_text(initial)
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_error)?;
                return Ok(Answer::Text(value));
            }
            let edited = Editor::new()
                .executable(editor)
                .edit(&initial)
                .map_err(prompt_error)?;
            Ok(Answer::Text(edited.unwrap_or(initial)))
        }
        FieldKind::Confirm {
            affirmative,
            negative,
            gate,
        } => {
            let default = matches!(current, Answer::Flag(true)) || *gate;
            let yes = Confirm::with_theme(theme)
                .with_prompt(format!("{prompt}\n[{affirmative} / {negative}]"))
                .default(default)
                .interact_opt()
                .map_err(prompt_error)?
                .ok_or(FormError::Cancelled)?;
            if *gate && !yes {
                return Err(FormError::Cancelled);
            }
            Ok(Answer::Flag(yes))
        }
    }
}

impl FormRunner for DialoguerForm {
    fn run(&mut self, form: &Form, commit: &mut Commit) -> Result<(), FormError> {
        let colorful = ColorfulTheme::default();
        let simple = SimpleTheme;
        let theme: &dyn Theme = if form.accessible { &simple } else { &colorful };
        debug!(groups = form.groups.len(), accessible = form.accessible, "form started");

        for (page, group) in form.groups.iter().enumerate() {
            if page > 0 {
                println!();
            }
            for field in &group.fields {
                let answer = ask(theme, field, commit.current(&field.binding))?;
                if answer != Answer::Empty {
                    commit.apply(&field.binding, answer)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_joins_title_and_description() {
        let field = Field::note("Title").with_description("Help.\n");
        assert_eq!(prompt_text(&field), "Title\nHelp.");
        assert_eq!(prompt_text(&Field::note("Only")), "Only");
    }

    #[test]
    fn labels_in_option_order() {
        let options = vec![SelectOption::new("A", "a"), SelectOption::new("B", "b")];
        assert_eq!(labels(&options), vec!["A", "B"]);
    }
}
