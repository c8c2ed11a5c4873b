//! Shared test doubles for the pipeline.
//!
//! Provides `MockFiles`, `MockRunner`, `ScriptedForm` and `StubModule`,
//! used by the core unit tests and, through the `testutil` feature, by the
//! module crate's tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::commit::Commit;
use crate::errors::{FormError, ModuleError, Stage};
use crate::files::FileSource;
use crate::form::{Answer, Binding, Field, FieldKind, Form, FormRunner};
use crate::module::{Module, ModuleConfig};
use crate::process::{CommandOutput, ProcessError, ProcessRunner};

/// Ordered record of pipeline events shared between doubles.
pub type EventLog = Rc<RefCell<Vec<String>>>;

/// Create an empty event log.
pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// In-memory [`FileSource`].
#[derive(Debug, Default)]
pub struct MockFiles {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MockFiles {
    /// Empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) -> Self {
        let _ = self.files.insert(path.into(), content.as_ref().to_vec());
        self
    }
}

impl FileSource for MockFiles {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
    }
}

/// [`ProcessRunner`] returning canned output per argv.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: HashMap<String, CommandOutput>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl MockRunner {
    /// Runner that knows no commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: answer `argv` with `stdout` and exit code zero.
    #[must_use]
    pub fn with_output(self, argv: &[&str], stdout: &str) -> Self {
        self.with_response(
            argv,
            CommandOutput {
                stdout: stdout.to_string(),
                ..CommandOutput::default()
            },
        )
    }

    /// Builder: answer `argv` with a full output.
    #[must_use]
    pub fn with_response(mut self, argv: &[&str], output: CommandOutput) -> Self {
        let _ = self.responses.insert(argv.join(" "), output);
        self
    }

    /// Every argv run so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, argv: &[&str]) -> Result<CommandOutput, ProcessError> {
        self.calls
            .borrow_mut()
            .push(argv.iter().map(ToString::to_string).collect());
        self.responses
            .get(&argv.join(" "))
            .cloned()
            .ok_or_else(|| ProcessError::Spawn {
                program: argv.first().copied().unwrap_or_default().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no canned response"),
            })
    }
}

/// [`FormRunner`] answering fields from a script.
///
/// Every field whose binding has a scripted answer gets it; other fields
/// keep the record's current value. Each run is recorded as the titles of
/// its fields, grouped per page.
#[derive(Debug, Default)]
pub struct ScriptedForm {
    answers: HashMap<Binding, Answer>,
    runs: Vec<Vec<Vec<String>>>,
    accessible: Vec<bool>,
    cancel_run: Option<usize>,
    log: Option<EventLog>,
}

impl ScriptedForm {
    /// Runner with no scripted answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: answer fields bound to `binding`.
    #[must_use]
    pub fn answer(mut self, binding: Binding, answer: Answer) -> Self {
        let _ = self.answers.insert(binding, answer);
        self
    }

    /// Builder: cancel the run with this zero-based index.
    #[must_use]
    pub fn cancel_on_run(mut self, index: usize) -> Self {
        self.cancel_run = Some(index);
        self
    }

    /// Builder: push `form:<titles>` into a shared log on every run.
    #[must_use]
    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Field titles of every run, per group.
    pub fn runs(&self) -> &[Vec<Vec<String>>] {
        &self.runs
    }

    /// Accessible flag of every run.
    pub fn accessible_flags(&self) -> &[bool] {
        &self.accessible
    }
}

impl FormRunner for ScriptedForm {
    fn run(&mut self, form: &Form, commit: &mut Commit) -> Result<(), FormError> {
        let titles: Vec<Vec<String>> = form
            .groups
            .iter()
            .map(|g| g.fields.iter().map(|f| f.title.clone()).collect())
            .collect();
        if let Some(log) = &self.log {
            log.borrow_mut()
                .push(format!("form:{}", titles.concat().join(",")));
        }
        let index = self.runs.len();
        self.runs.push(titles);
        self.accessible.push(form.accessible);

        if self.cancel_run == Some(index) {
            return Err(FormError::Cancelled);
        }

        for field in form.groups.iter().flat_map(|g| &g.fields) {
            let Some(answer) = self.answers.get(&field.binding) else {
                continue;
            };
            if let (FieldKind::Confirm { gate: true, .. }, Answer::Flag(false)) =
                (&field.kind, answer)
            {
                return Err(FormError::Cancelled);
            }
            commit.apply(&field.binding, answer.clone())?;
        }
        Ok(())
    }
}

/// Configurable module that logs every call.
///
/// Logs `init:<name>`, `field:<name>` and `post:<name>`. By default it is
/// active on page 1 and shows an input bound to `extras[<name>]`.
pub struct StubModule {
    config: ModuleConfig,
    field: Option<Field>,
    log: EventLog,
    fail_at: Option<Stage>,
    visible_when: Option<Box<dyn Fn(&Commit) -> bool>>,
}

impl StubModule {
    /// Active stub on page 1.
    pub fn new(name: &str, log: &EventLog) -> Self {
        let mut config = ModuleConfig::named(name);
        config.active = true;
        config.page = 1;
        Self {
            config,
            field: Some(Field::new(
                name,
                FieldKind::Input { char_limit: None },
                Binding::Extra(name.to_string()),
            )),
            log: Rc::clone(log),
            fail_at: None,
            visible_when: None,
        }
    }

    /// Builder: set the page.
    #[must_use]
    pub fn page(mut self, page: i32) -> Self {
        self.config.page = page;
        self
    }

    /// Builder: set the position.
    #[must_use]
    pub fn position(mut self, position: i32) -> Self {
        self.config.position = position;
        self
    }

    /// Builder: set the priority.
    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.config.priority = priority;
        self
    }

    /// Builder: pin the module.
    #[must_use]
    pub fn pinned(mut self) -> Self {
        self.config.pinned = true;
        self
    }

    /// Builder: mark the page as a checkpoint.
    #[must_use]
    pub fn checkpoint(mut self) -> Self {
        self.config.checkpoint = true;
        self
    }

    /// Builder: set the active flag.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.config.active = active;
        self
    }

    /// Builder: never produce a field.
    #[must_use]
    pub fn no_field(mut self) -> Self {
        self.field = None;
        self
    }

    /// Builder: replace the produced field.
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.field = Some(field);
        self
    }

    /// Builder: fail with a lookup error at `stage`.
    #[must_use]
    pub fn failing_at(mut self, stage: Stage) -> Self {
        self.fail_at = Some(stage);
        self
    }

    /// Builder: only produce the field when `pred` holds.
    #[must_use]
    pub fn visible_when(mut self, pred: impl Fn(&Commit) -> bool + 'static) -> Self {
        self.visible_when = Some(Box::new(pred));
        self
    }

    /// Box the stub for the registry or commiter.
    pub fn boxed(self) -> Box<dyn Module> {
        Box::new(self)
    }

    fn record(&self, stage: Stage, event: &str) -> Result<(), ModuleError> {
        self.log
            .borrow_mut()
            .push(format!("{event}:{}", self.config.name));
        if self.fail_at == Some(stage) {
            return Err(ModuleError::Lookup(format!("{event} failed")));
        }
        Ok(())
    }
}

impl Module for StubModule {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn config(&self) -> &ModuleConfig {
        &self.config
    }

    fn set_config(&mut self, config: ModuleConfig) {
        self.config = config;
    }

    fn load_config(&mut self, _files: &dyn FileSource) -> Result<(), ModuleError> {
        self.record(Stage::LoadConfig, "load")
    }

    fn init_commit_info(&self, _commit: &mut Commit) -> Result<(), ModuleError> {
        self.record(Stage::Init, "init")
    }

    fn new_field(&mut self, commit: &Commit) -> Result<Option<Field>, ModuleError> {
        self.record(Stage::Field, "field")?;
        if let Some(pred) = &self.visible_when {
            if !pred(commit) {
                return Ok(None);
            }
        }
        Ok(self.field.clone())
    }

    fn post_process(&self, _commit: &mut Commit) -> Result<(), ModuleError> {
        self.record(Stage::PostProcess, "post")
    }
}
