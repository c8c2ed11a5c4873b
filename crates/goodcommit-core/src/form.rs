//! Interactive form abstraction.
//!
//! Modules describe the field they want shown as a [`Field`]; the commiter
//! groups fields into pages ([`Group`]) and pages into a [`Form`], then hands
//! the form to a [`FormRunner`]. The runner owns the terminal and writes each
//! answer straight into the commit record through the field's [`Binding`].

use std::fmt;

use crate::commit::Commit;
use crate::errors::FormError;

/// One selectable entry of a select or multi-select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Text shown to the user.
    pub label: String,
    /// Value written to the record when chosen.
    pub value: String,
}

impl SelectOption {
    /// Create an option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Shape of an interactive field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Pick exactly one option.
    Select {
        /// Available options.
        options: Vec<SelectOption>,
    },
    /// Pick any number of options.
    MultiSelect {
        /// Available options.
        options: Vec<SelectOption>,
    },
    /// Single-line text.
    Input {
        /// Maximum number of characters, if limited.
        char_limit: Option<usize>,
    },
    /// Multi-line text, optionally through an external editor.
    Text {
        /// Editor command used when the user opens one.
        editor: Option<String>,
    },
    /// Yes/no question.
    Confirm {
        /// Label of the "yes" answer.
        affirmative: String,
        /// Label of the "no" answer.
        negative: String,
        /// When set, answering "no" cancels the whole run.
        gate: bool,
    },
    /// Static text; nothing is asked.
    Note,
}

/// Record slot a field writes its answer into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    /// [`Commit::commit_type`].
    Type,
    /// [`Commit::scope`].
    Scope,
    /// [`Commit::scopes`].
    Scopes,
    /// [`Commit::description`].
    Description,
    /// [`Commit::body`].
    Body,
    /// [`Commit::breaking`].
    Breaking,
    /// [`Commit::co_authored_by`].
    CoAuthors,
    /// An [`Extras`](crate::commit::Extras) cell.
    Extra(String),
    /// The answer is not stored (notes, confirmation gates).
    Nothing,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "type"),
            Self::Scope => write!(f, "scope"),
            Self::Scopes => write!(f, "scopes"),
            Self::Description => write!(f, "description"),
            Self::Body => write!(f, "body"),
            Self::Breaking => write!(f, "breaking"),
            Self::CoAuthors => write!(f, "co-authors"),
            Self::Extra(key) => write!(f, "extras[{key}]"),
            Self::Nothing => write!(f, "nothing"),
        }
    }
}

/// A user's answer to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Free text or a single selected value.
    Text(String),
    /// Several selected values.
    List(Vec<String>),
    /// Yes/no.
    Flag(bool),
    /// No value (notes, unbound fields).
    Empty,
}

/// Description of one interactive field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Prompt title.
    pub title: String,
    /// Help text shown under the title.
    pub description: String,
    /// Field shape.
    pub kind: FieldKind,
    /// Where the answer goes.
    pub binding: Binding,
}

impl Field {
    /// Create a field with an empty description.
    pub fn new(title: impl Into<String>, kind: FieldKind, binding: Binding) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            kind,
            binding,
        }
    }

    /// Builder: set the help text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// A static note.
    pub fn note(title: impl Into<String>) -> Self {
        Self::new(title, FieldKind::Note, Binding::Nothing)
    }
}

/// Fields shown together as one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    /// Fields in display order.
    pub fields: Vec<Field>,
}

impl Group {
    /// Build a group from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

/// A sequence of groups run as one blocking interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    /// Groups in display order.
    pub groups: Vec<Group>,
    /// Plain, screen-reader friendly prompts.
    pub accessible: bool,
}

impl Form {
    /// Build a form from groups.
    pub fn new(groups: Vec<Group>) -> Self {
        Self {
            groups,
            accessible: false,
        }
    }

    /// Builder: set accessible mode.
    #[must_use]
    pub fn accessible(mut self, accessible: bool) -> Self {
        self.accessible = accessible;
        self
    }

    /// Total number of fields across groups.
    pub fn field_count(&self) -> usize {
        self.groups.iter().map(|g| g.fields.len()).sum()
    }
}

/// Executes a form against the commit record.
///
/// Implementations block until the user finishes or aborts. Every answer
/// is written with [`Commit::apply`]; a declined confirmation gate and a user
/// abort both return [`FormError::Cancelled`].
pub trait FormRunner {
    /// Run the form, writing answers into `commit`.
    fn run(&mut self, form: &Form, commit: &mut Commit) -> Result<(), FormError>;
}

impl Commit {
    /// Current value of a bound slot, used as the field's default.
    pub fn current(&self, binding: &Binding) -> Answer {
        match binding {
            Binding::Type => Answer::Text(self.commit_type.clone()),
            Binding::Scope => Answer::Text(self.scope.clone()),
            Binding::Scopes => Answer::List(self.scopes.clone()),
            Binding::Description => Answer::Text(self.description.clone()),
            Binding::Body => Answer::Text(self.body.clone()),
            Binding::Breaking => Answer::Flag(self.breaking),
            Binding::CoAuthors => Answer::List(self.co_authored_by.clone()),
            Binding::Extra(key) => Answer::Text(self.extras.get(key).unwrap_or_default().to_string()),
            Binding::Nothing => Answer::Empty,
        }
    }

    /// Write an answer into the bound slot.
    ///
    /// Writing to an extras cell creates it if needed.
    pub fn apply(&mut self, binding: &Binding, answer: Answer) -> Result<(), FormError> {
        match (binding, answer) {
            (Binding::Type, Answer::Text(v)) => self.commit_type = v,
            (Binding::Scope, Answer::Text(v)) => self.scope = v,
            (Binding::Description, Answer::Text(v)) => self.description = v,
            (Binding::Body, Answer::Text(v)) => self.body = v,
            (Binding::Extra(key), Answer::Text(v)) => self.extras.set(key, v),
            (Binding::Scopes, Answer::List(v)) => self.scopes = v,
            (Binding::CoAuthors, Answer::List(v)) => self.co_authored_by = v,
            (Binding::Breaking, Answer::Flag(v)) => self.breaking = v,
            (Binding::Nothing, _) => {}
            (binding, _) => {
                return Err(FormError::Binding {
                    binding: binding.to_string(),
                    expected: expected_shape(binding),
                });
            }
        }
        Ok(())
    }
}

fn expected_shape(binding: &Binding) -> &'static str {
    match binding {
        Binding::Scopes | Binding::CoAuthors => "list",
        Binding::Breaking => "flag",
        Binding::Nothing => "anything",
        _ => "text",
    }
}
