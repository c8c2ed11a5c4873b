//! Default commiter.

use tracing::{debug, instrument};

use crate::commit::Commit;
use crate::commiter::pagination::{FormBuffer, plan_pages};
use crate::commiter::{Commiter, Phase};
use crate::errors::{CommitError, ResultExt, Result, Stage};
use crate::form::{FormRunner, Group};
use crate::module::Module;
use crate::render;

/// Default [`Commiter`] owning the commit record for one run.
pub struct GoodCommiter {
    modules: Vec<Box<dyn Module>>,
    commit: Commit,
    phase: Phase,
}

impl GoodCommiter {
    /// Commiter with an empty record and no modules.
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            commit: Commit::new(),
            phase: Phase::Initializing,
        }
    }

    /// The record as it stands.
    pub fn commit(&self) -> &Commit {
        &self.commit
    }

    /// Furthest phase reached.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Loaded modules in registration order.
    pub fn modules(&self) -> &[Box<dyn Module>] {
        &self.modules
    }

    /// Indices of active modules ordered by priority.
    ///
    /// The sort is stable, so modules sharing a priority keep their stored
    /// order and a module only ever runs at its own priority level.
    fn priority_order(modules: &[Box<dyn Module>]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..modules.len())
            .filter(|&i| modules[i].is_active())
            .collect();
        order.sort_by_key(|&i| modules[i].config().priority);
        order
    }

    fn require_phase(&self, expected: Phase, operation: &'static str) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(CommitError::OutOfOrder {
                operation,
                phase: self.phase,
            })
        }
    }
}

impl Default for GoodCommiter {
    fn default() -> Self {
        Self::new()
    }
}

impl Commiter for GoodCommiter {
    #[instrument(skip_all, fields(modules = modules.len()))]
    fn load_modules(&mut self, modules: Vec<Box<dyn Module>>) -> Result<()> {
        self.require_phase(Phase::Initializing, "load_modules")?;
        for index in Self::priority_order(&modules) {
            let module = &modules[index];
            debug!(module = module.name(), priority = module.config().priority, "init");
            module
                .init_commit_info(&mut self.commit)
                .at_stage(module.name(), Stage::Init)?;
        }
        self.modules = modules;
        self.phase = Phase::FormRunning;
        Ok(())
    }

    #[instrument(skip_all, fields(accessible))]
    fn run_form(&mut self, runner: &mut dyn FormRunner, accessible: bool) -> Result<()> {
        self.require_phase(Phase::FormRunning, "run_form")?;
        let pages = plan_pages(
            self.modules
                .iter()
                .enumerate()
                .filter(|(_, m)| m.is_active())
                .map(|(i, m)| (i, m.config())),
        );
        let mut buffer = FormBuffer::new(accessible);

        for page in &pages {
            let mut fields = Vec::new();
            let mut has_own_field = false;
            for &index in &page.slots {
                let module = &mut self.modules[index];
                let name = module.name().to_string();
                let Some(field) = module
                    .new_field(&self.commit)
                    .at_stage(&name, Stage::Field)?
                else {
                    continue;
                };
                if !module.config().pinned && module.is_active() {
                    has_own_field = true;
                }
                fields.push(field);
            }

            if has_own_field {
                debug!(page = page.number, fields = fields.len(), "page queued");
                buffer.push(Group::new(fields));
            } else {
                debug!(page = page.number, "page has no fields of its own, skipped");
            }

            if page.checkpoint {
                debug!(page = page.number, "checkpoint reached");
                buffer.flush(runner, &mut self.commit)?;
            }
        }
        buffer.flush(runner, &mut self.commit)?;

        self.phase = Phase::PostProcessing;
        Ok(())
    }

    #[instrument(skip_all)]
    fn run_post_processing(&mut self) -> Result<()> {
        self.require_phase(Phase::PostProcessing, "run_post_processing")?;
        for index in Self::priority_order(&self.modules) {
            let module = &self.modules[index];
            debug!(module = module.name(), priority = module.config().priority, "post-process");
            module
                .post_process(&mut self.commit)
                .at_stage(module.name(), Stage::PostProcess)?;
        }
        self.phase = Phase::Rendered;
        Ok(())
    }

    fn preview(&self) -> String {
        render::render_summary(&self.commit)
    }

    fn render_message(&self) -> String {
        render::render_message(&self.commit)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commiter::execute;
    use crate::form::{Answer, Binding, Field};
    use crate::testutil::{EventLog, ScriptedForm, StubModule, event_log};
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    fn events(log: &EventLog, prefix: &str) -> Vec<String> {
        log.borrow()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn loaded(modules: Vec<Box<dyn Module>>) -> GoodCommiter {
        let mut commiter = GoodCommiter::new();
        commiter.load_modules(modules).unwrap();
        commiter
    }

    fn formed(modules: Vec<Box<dyn Module>>) -> GoodCommiter {
        let mut commiter = loaded(modules);
        commiter.run_form(&mut ScriptedForm::new(), false).unwrap();
        commiter
    }

    // ── priority passes ──────────────────────────────────────────────────

    #[test]
    fn init_runs_in_priority_order_regardless_of_declaration() {
        let log = event_log();
        let _ = loaded(vec![
            StubModule::new("c", &log).priority(7).boxed(),
            StubModule::new("a", &log).priority(0).boxed(),
            StubModule::new("b", &log).priority(3).boxed(),
        ]);
        assert_eq!(events(&log, "init"), vec!["init:a", "init:b", "init:c"]);
    }

    #[test]
    fn equal_priorities_keep_stored_order() {
        let log = event_log();
        let mut commiter = formed(vec![
            StubModule::new("second", &log).priority(5).boxed(),
            StubModule::new("first", &log).priority(4).boxed(),
            StubModule::new("third", &log).priority(5).boxed(),
        ]);
        commiter.run_post_processing().unwrap();
        assert_eq!(
            events(&log, "post"),
            vec!["post:first", "post:second", "post:third"]
        );
    }

    #[test]
    fn inactive_modules_skip_both_passes() {
        let log = event_log();
        let mut commiter = formed(vec![
            StubModule::new("on", &log).boxed(),
            StubModule::new("off", &log).active(false).boxed(),
        ]);
        commiter.run_post_processing().unwrap();
        assert_eq!(events(&log, "init"), vec!["init:on"]);
        assert_eq!(events(&log, "post"), vec!["post:on"]);
    }

    #[test]
    fn init_failure_aborts_and_names_module() {
        let log = event_log();
        let mut commiter = GoodCommiter::new();
        let err = commiter
            .load_modules(vec![
                StubModule::new("a", &log).failing_at(Stage::Init).boxed(),
                StubModule::new("b", &log).priority(1).boxed(),
            ])
            .unwrap_err();
        assert_matches!(err, CommitError::Module { ref module, stage: Stage::Init, .. } if module == "a");
        assert_eq!(events(&log, "init"), vec!["init:a"]);
        assert_eq!(commiter.phase(), Phase::Initializing);
    }

    #[test]
    fn post_process_stops_at_first_error() {
        let log = event_log();
        let mut commiter = formed(vec![
            StubModule::new("a", &log).priority(1).failing_at(Stage::PostProcess).boxed(),
            StubModule::new("b", &log).priority(2).boxed(),
        ]);
        let err = commiter.run_post_processing().unwrap_err();
        assert_eq!(err.module_name(), Some("a"));
        assert_eq!(events(&log, "post"), vec!["post:a"]);
        assert_eq!(commiter.phase(), Phase::PostProcessing);
    }

    proptest! {
        #[test]
        fn passes_follow_priority_then_declaration(priorities in prop::collection::vec(0i32..6, 1..12)) {
            let log = event_log();
            let modules: Vec<Box<dyn Module>> = priorities
                .iter()
                .enumerate()
                .map(|(i, &p)| StubModule::new(&format!("m{i}"), &log).priority(p).boxed())
                .collect();
            let mut commiter = formed(modules);
            commiter.run_post_processing().unwrap();

            let mut expected: Vec<(i32, usize)> =
                priorities.iter().enumerate().map(|(i, &p)| (p, i)).collect();
            expected.sort_unstable();
            let expected: Vec<String> = expected.iter().map(|(_, i)| format!("m{i}")).collect();

            let strip = |prefix: &str| -> Vec<String> {
                events(&log, prefix)
                    .into_iter()
                    .map(|e| e[prefix.len() + 1..].to_string())
                    .collect()
            };
            prop_assert_eq!(strip("init"), expected.clone());
            prop_assert_eq!(strip("post"), expected);
        }
    }

    // ── form pagination ──────────────────────────────────────────────────

    #[test]
    fn pinned_field_repeats_on_every_later_page() {
        let log = event_log();
        let mut commiter = loaded(vec![
            StubModule::new("logo", &log).page(1).pinned().boxed(),
            StubModule::new("greet", &log).page(1).position(1).boxed(),
            StubModule::new("types", &log).page(2).boxed(),
            StubModule::new("body", &log).page(3).boxed(),
            StubModule::new("why", &log).page(4).boxed(),
        ]);
        let mut runner = ScriptedForm::new();
        commiter.run_form(&mut runner, false).unwrap();

        assert_eq!(
            runner.runs(),
            &[vec![
                vec!["logo".to_string(), "greet".to_string()],
                vec!["logo".to_string(), "types".to_string()],
                vec!["logo".to_string(), "body".to_string()],
                vec!["logo".to_string(), "why".to_string()],
            ]]
        );
        assert_eq!(commiter.phase(), Phase::PostProcessing);
    }

    #[test]
    fn page_without_own_fields_is_not_rendered() {
        let log = event_log();
        let mut commiter = loaded(vec![
            StubModule::new("logo", &log).page(1).pinned().boxed(),
            StubModule::new("silent", &log).page(2).no_field().boxed(),
            StubModule::new("off", &log).page(2).active(false).boxed(),
            StubModule::new("types", &log).page(3).boxed(),
        ]);
        let mut runner = ScriptedForm::new();
        commiter.run_form(&mut runner, false).unwrap();

        assert_eq!(
            runner.runs(),
            &[vec![vec!["logo".to_string(), "types".to_string()]]]
        );
        assert!(!events(&log, "field").contains(&"field:off".to_string()));
    }

    #[test]
    fn checkpoint_runs_form_before_later_fields_are_built() {
        let log = event_log();
        let mut commiter = loaded(vec![
            StubModule::new("p1", &log).page(1).boxed(),
            StubModule::new("p2", &log).page(2).checkpoint().boxed(),
            StubModule::new("p3", &log).page(3).boxed(),
        ]);
        let mut runner = ScriptedForm::new().with_log(log.clone());
        commiter.run_form(&mut runner, true).unwrap();

        let trace: Vec<String> = log
            .borrow()
            .iter()
            .filter(|e| e.starts_with("field") || e.starts_with("form"))
            .cloned()
            .collect();
        assert_eq!(
            trace,
            vec!["field:p1", "field:p2", "form:p1,p2", "field:p3", "form:p3"]
        );
        assert_eq!(runner.accessible_flags(), &[true, true]);
    }

    #[test]
    fn fields_after_checkpoint_see_answers() {
        let log = event_log();
        let mut commiter = loaded(vec![
            StubModule::new("breaking", &log)
                .page(1)
                .checkpoint()
                .with_field(Field::new(
                    "breaking",
                    crate::form::FieldKind::Confirm {
                        affirmative: "Yes".into(),
                        negative: "No".into(),
                        gate: false,
                    },
                    Binding::Breaking,
                ))
                .boxed(),
            StubModule::new("details", &log)
                .page(2)
                .visible_when(|c| c.breaking)
                .boxed(),
        ]);
        let mut runner = ScriptedForm::new().answer(Binding::Breaking, Answer::Flag(true));
        commiter.run_form(&mut runner, false).unwrap();

        assert_eq!(runner.runs().len(), 2);
        assert_eq!(runner.runs()[1], vec![vec!["details".to_string()]]);
    }

    #[test]
    fn field_error_aborts_before_any_form_runs() {
        let log = event_log();
        let mut commiter = loaded(vec![
            StubModule::new("ok", &log).page(1).boxed(),
            StubModule::new("broken", &log).page(2).failing_at(Stage::Field).boxed(),
        ]);
        let mut runner = ScriptedForm::new();
        let err = commiter.run_form(&mut runner, false).unwrap_err();
        assert_matches!(err, CommitError::Module { ref module, stage: Stage::Field, .. } if module == "broken");
        assert!(runner.runs().is_empty());
        assert_eq!(commiter.phase(), Phase::FormRunning);
    }

    #[test]
    fn cancellation_keeps_answers_from_earlier_forms() {
        let log = event_log();
        let mut commiter = loaded(vec![
            StubModule::new("first", &log).page(1).checkpoint().boxed(),
            StubModule::new("second", &log).page(2).boxed(),
        ]);
        let mut runner = ScriptedForm::new()
            .answer(Binding::Extra("first".into()), Answer::Text("kept".into()))
            .answer(Binding::Extra("second".into()), Answer::Text("lost".into()))
            .cancel_on_run(1);
        let err = commiter.run_form(&mut runner, false).unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(commiter.commit().extras.get("first"), Some("kept"));
        assert_eq!(commiter.commit().extras.get("second"), None);
    }

    #[test]
    fn no_active_modules_runs_nothing() {
        let log = event_log();
        let mut commiter = loaded(vec![StubModule::new("off", &log).active(false).boxed()]);
        let mut runner = ScriptedForm::new();
        commiter.run_form(&mut runner, false).unwrap();
        assert!(runner.runs().is_empty());
    }

    // ── phase order ──────────────────────────────────────────────────────

    #[test]
    fn post_processing_before_form_is_rejected() {
        let log = event_log();
        let mut commiter = loaded(vec![StubModule::new("a", &log).boxed()]);
        let err = commiter.run_post_processing().unwrap_err();

        assert_matches!(
            err,
            CommitError::OutOfOrder { operation: "run_post_processing", phase: Phase::FormRunning }
        );
        assert!(events(&log, "post").is_empty());
    }

    #[test]
    fn form_after_failed_load_is_rejected() {
        let log = event_log();
        let mut commiter = GoodCommiter::new();
        let _ = commiter
            .load_modules(vec![StubModule::new("a", &log).failing_at(Stage::Init).boxed()])
            .unwrap_err();

        let mut runner = ScriptedForm::new();
        let err = commiter.run_form(&mut runner, false).unwrap_err();
        assert_matches!(err, CommitError::OutOfOrder { operation: "run_form", .. });
        assert!(runner.runs().is_empty());
    }

    #[test]
    fn modules_load_once() {
        let log = event_log();
        let mut commiter = loaded(vec![StubModule::new("a", &log).boxed()]);
        let err = commiter
            .load_modules(vec![StubModule::new("b", &log).boxed()])
            .unwrap_err();
        assert_matches!(err, CommitError::OutOfOrder { operation: "load_modules", .. });
        assert_eq!(events(&log, "init"), vec!["init:a"]);
    }

    #[test]
    fn form_runs_once() {
        let log = event_log();
        let mut commiter = formed(vec![StubModule::new("a", &log).boxed()]);
        let err = commiter.run_form(&mut ScriptedForm::new(), false).unwrap_err();
        assert_matches!(
            err,
            CommitError::OutOfOrder { phase: Phase::PostProcessing, .. }
        );
    }

    // ── full run ─────────────────────────────────────────────────────────

    #[test]
    fn execute_renders_after_post_processing() {
        let log = event_log();
        let mut commiter = loaded(vec![StubModule::new("why", &log).boxed()]);
        let mut runner = ScriptedForm::new();
        let message = execute(&mut commiter, &mut runner, false).unwrap();

        assert_eq!(message, ": \n\n\n");
        assert_eq!(commiter.phase(), Phase::Rendered);
        assert_eq!(commiter.render_message(), message);
        assert!(commiter.preview().starts_with("COMMIT SUMMARY"));
        assert_eq!(commiter.modules().len(), 1);
    }
}
