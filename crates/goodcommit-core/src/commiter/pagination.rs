//! Page planning and checkpointed form flushing.
//!
//! [`plan_pages`] turns module configs into an ordered list of pages, with
//! pinned modules copied onto every later page. [`FormBuffer`] collects the
//! groups built from those pages and runs them whenever a checkpoint page
//! is reached, and once more at the end.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::commit::Commit;
use crate::errors::FormError;
use crate::form::{Form, FormRunner, Group};
use crate::module::ModuleConfig;

/// One page of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page number from the config.
    pub number: i32,
    /// Module indices in display order (pinned first, then by position).
    pub slots: Vec<usize>,
    /// Whether any module placed on this page is a checkpoint.
    pub checkpoint: bool,
}

/// Lay out active modules into pages.
///
/// `entries` pairs each active module's index with its config. Pages come
/// back in ascending order. A pinned module also lands on every page after
/// its own, up to the highest page any active module uses.
pub fn plan_pages<'a>(entries: impl IntoIterator<Item = (usize, &'a ModuleConfig)>) -> Vec<Page> {
    let entries: Vec<(usize, &ModuleConfig)> = entries.into_iter().collect();
    let Some(max_page) = entries.iter().map(|(_, c)| c.page).max() else {
        return Vec::new();
    };

    let mut by_page: BTreeMap<i32, Vec<(usize, &ModuleConfig)>> = BTreeMap::new();
    for &(index, config) in &entries {
        by_page.entry(config.page).or_default().push((index, config));
    }
    for &(index, config) in entries.iter().filter(|(_, c)| c.pinned) {
        for page in (config.page + 1)..=max_page {
            by_page.entry(page).or_default().push((index, config));
        }
    }

    by_page
        .into_iter()
        .map(|(number, mut slots)| {
            slots.sort_by_key(|(_, c)| (!c.pinned, c.position));
            Page {
                number,
                checkpoint: slots.iter().any(|(_, c)| c.checkpoint),
                slots: slots.into_iter().map(|(index, _)| index).collect(),
            }
        })
        .collect()
}

/// Whether the buffer is collecting groups or running them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// Collecting groups for the next form.
    Accumulating,
    /// Running the pending form.
    Flushing,
}

/// Pending groups between checkpoints.
#[derive(Debug)]
pub struct FormBuffer {
    state: BufferState,
    pending: Vec<Group>,
    accessible: bool,
    forms_run: usize,
}

impl FormBuffer {
    /// Empty buffer for forms in the given accessibility mode.
    pub fn new(accessible: bool) -> Self {
        Self {
            state: BufferState::Accumulating,
            pending: Vec::new(),
            accessible,
            forms_run: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> BufferState {
        self.state
    }

    /// Number of groups waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Number of forms executed so far.
    pub fn forms_run(&self) -> usize {
        self.forms_run
    }

    /// Queue a page's group.
    pub fn push(&mut self, group: Group) {
        self.pending.push(group);
    }

    /// Run the pending groups as one form and start over.
    ///
    /// Nothing is run when no group is pending. The buffer returns to
    /// [`BufferState::Accumulating`] even when the runner fails, with the
    /// pending groups dropped.
    pub fn flush(
        &mut self,
        runner: &mut dyn FormRunner,
        commit: &mut Commit,
    ) -> Result<(), FormError> {
        if self.pending.is_empty() {
            debug!("no pending groups, nothing to run");
            return Ok(());
        }
        self.state = BufferState::Flushing;
        let form = Form::new(std::mem::take(&mut self.pending)).accessible(self.accessible);
        info!(groups = form.groups.len(), fields = form.field_count(), "running form");
        let result = runner.run(&form, commit);
        self.state = BufferState::Accumulating;
        self.forms_run += 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Field;
    use crate::testutil::ScriptedForm;

    fn cfg(name: &str, page: i32, position: i32) -> ModuleConfig {
        ModuleConfig {
            name: name.into(),
            page,
            position,
            active: true,
            ..ModuleConfig::default()
        }
    }

    fn pinned(mut c: ModuleConfig) -> ModuleConfig {
        c.pinned = true;
        c
    }

    fn slots(pages: &[Page]) -> Vec<(i32, Vec<usize>)> {
        pages.iter().map(|p| (p.number, p.slots.clone())).collect()
    }

    #[test]
    fn empty_input_has_no_pages() {
        assert!(plan_pages(std::iter::empty()).is_empty());
    }

    #[test]
    fn pages_ascend_and_sort_by_position() {
        let configs = [cfg("c", 2, 1), cfg("a", 1, 2), cfg("b", 1, 1)];
        let pages = plan_pages(configs.iter().enumerate());
        assert_eq!(slots(&pages), vec![(1, vec![2, 1]), (2, vec![0])]);
    }

    #[test]
    fn pinned_module_repeats_on_later_pages_only() {
        let configs = [
            cfg("types", 2, 1),
            pinned(cfg("logo", 1, 9)),
            cfg("body", 4, 1),
            cfg("greetings", 1, 1),
        ];
        let pages = plan_pages(configs.iter().enumerate());
        assert_eq!(
            slots(&pages),
            vec![
                (1, vec![1, 3]),
                (2, vec![1, 0]),
                (3, vec![1]),
                (4, vec![1, 2]),
            ]
        );
    }

    #[test]
    fn pinned_module_never_precedes_its_page() {
        let configs = [cfg("a", 1, 1), pinned(cfg("logo", 3, 1)), cfg("b", 4, 1)];
        let pages = plan_pages(configs.iter().enumerate());
        assert_eq!(slots(&pages), vec![(1, vec![0]), (3, vec![1]), (4, vec![1, 2])]);
    }

    #[test]
    fn equal_positions_keep_input_order() {
        let configs = [cfg("x", 1, 0), cfg("y", 1, 0), cfg("z", 1, 0)];
        let pages = plan_pages(configs.iter().enumerate());
        assert_eq!(pages[0].slots, vec![0, 1, 2]);
    }

    #[test]
    fn checkpoint_is_page_level() {
        let mut gate = cfg("greetings", 1, 1);
        gate.checkpoint = true;
        let configs = [gate, cfg("types", 1, 2), cfg("body", 2, 1)];
        let pages = plan_pages(configs.iter().enumerate());
        assert!(pages[0].checkpoint);
        assert!(!pages[1].checkpoint);
    }

    #[test]
    fn flush_runs_pending_groups_once() {
        let mut buffer = FormBuffer::new(true);
        let mut runner = ScriptedForm::new();
        let mut commit = Commit::new();

        buffer.push(Group::new(vec![Field::note("one")]));
        buffer.push(Group::new(vec![Field::note("two")]));
        assert_eq!(buffer.pending(), 2);
        buffer.flush(&mut runner, &mut commit).unwrap();

        assert_eq!(buffer.pending(), 0);
        assert_eq!(buffer.forms_run(), 1);
        assert_eq!(buffer.state(), BufferState::Accumulating);
        assert_eq!(runner.runs().len(), 1);
        assert_eq!(runner.accessible_flags(), &[true]);
    }

    #[test]
    fn flush_skips_empty_buffer() {
        let mut buffer = FormBuffer::new(false);
        let mut runner = ScriptedForm::new();
        buffer.flush(&mut runner, &mut Commit::new()).unwrap();
        assert_eq!(buffer.forms_run(), 0);
        assert!(runner.runs().is_empty());
    }

    #[test]
    fn failed_flush_returns_to_accumulating() {
        let mut buffer = FormBuffer::new(false);
        let mut runner = ScriptedForm::new().cancel_on_run(0);
        buffer.push(Group::new(vec![Field::note("one")]));
        let err = buffer.flush(&mut runner, &mut Commit::new()).unwrap_err();
        assert!(matches!(err, FormError::Cancelled));
        assert_eq!(buffer.state(), BufferState::Accumulating);
        assert_eq!(buffer.pending(), 0);
    }
}
