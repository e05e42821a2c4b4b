//! View state for the task screen.
//!
//! `TaskViewModel` owns every piece of mutable screen state: the input
//! buffer, the sorted task list, per-item completion, the completed
//! counter, the celebration trigger and the UI task queue. Every mutation
//! notifies subscribers with a `ViewEvent`; rendering reads a
//! `ViewSnapshot`, which is a pure function of the current state plus the
//! date it is rendered on.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::celebration::{CelebrationOutcome, CelebrationTrigger};
use crate::completion::{CompletionCounter, Completions, ItemState};
use crate::config::Config;
use crate::date_header;
use crate::error::{Error, Result};
use crate::input::InputPanel;
use crate::prefs::CelebrationStore;
use crate::scheduler::TaskQueue;
use crate::task::{self, TaskItem, TaskList};

/// Queue key for the banner auto-hide
pub const HIDE_BANNER_KEY: &str = "celebration.hide_banner";

/// Deferred work run on the UI thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    HideBanner,
}

/// Change notification sent to subscribers after each mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    InputChanged,
    TasksAdded { added: usize },
    ItemToggled { id: Uuid, done: bool, completed: usize },
    SelectionChanged { index: Option<usize> },
    BannerShown,
    BannerHidden,
}

/// One rendered list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: Uuid,
    pub text: String,
    pub done: bool,
    pub selected: bool,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub date_header: String,
    pub banner: Option<String>,
    pub items: Vec<ItemRow>,
    pub completed_count: usize,
    pub completed_label: String,
    pub input: String,
    pub input_cursor: usize,
    pub placeholder: Option<String>,
    pub submit_enabled: bool,
}

pub struct TaskViewModel {
    config: Config,
    input: InputPanel,
    tasks: TaskList,
    completions: Completions,
    counter: CompletionCounter,
    celebration: CelebrationTrigger,
    queue: TaskQueue<UiAction>,
    store: Box<dyn CelebrationStore>,
    selected: Option<usize>,
    subscribers: Vec<Sender<ViewEvent>>,
}

impl TaskViewModel {
    pub fn new(config: Config, store: Box<dyn CelebrationStore>) -> Self {
        let celebration = CelebrationTrigger::from_config(&config.celebration);
        Self {
            config,
            input: InputPanel::new(),
            tasks: TaskList::new(),
            completions: Completions::new(),
            counter: CompletionCounter::new(),
            celebration,
            queue: TaskQueue::new(),
            store,
            selected: None,
            subscribers: Vec::new(),
        }
    }

    /// Receive a `ViewEvent` for every subsequent state change.
    pub fn subscribe(&mut self) -> Receiver<ViewEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: ViewEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn input(&self) -> &InputPanel {
        &self.input
    }

    pub fn store(&self) -> &dyn CelebrationStore {
        self.store.as_ref()
    }

    pub fn completed_count(&self) -> usize {
        self.counter.count()
    }

    pub fn is_banner_visible(&self) -> bool {
        self.celebration.is_banner_visible()
    }

    pub fn item_state(&self, id: Uuid) -> ItemState {
        self.completions.state(id)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&TaskItem> {
        self.selected.and_then(|idx| self.tasks.get(idx))
    }

    // ---------------------------------------------------------------------
    // Input panel
    // ---------------------------------------------------------------------

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input.set_value(value);
        self.notify(ViewEvent::InputChanged);
    }

    pub fn insert_char(&mut self, ch: char) {
        self.input.insert_char(ch);
        self.notify(ViewEvent::InputChanged);
    }

    pub fn backspace(&mut self) {
        if self.input.backspace() {
            self.notify(ViewEvent::InputChanged);
        }
    }

    pub fn delete(&mut self) {
        if self.input.delete() {
            self.notify(ViewEvent::InputChanged);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.input.move_left();
        self.notify(ViewEvent::InputChanged);
    }

    pub fn move_cursor_right(&mut self) {
        self.input.move_right();
        self.notify(ViewEvent::InputChanged);
    }

    pub fn move_cursor_home(&mut self) {
        self.input.move_home();
        self.notify(ViewEvent::InputChanged);
    }

    pub fn move_cursor_end(&mut self) {
        self.input.move_end();
        self.notify(ViewEvent::InputChanged);
    }

    /// Submit is only offered while the input has text.
    pub fn can_submit(&self) -> bool {
        !self.input.is_empty()
    }

    /// Parse the input into new items, merge them into the list and clear
    /// the input. Returns how many items were added.
    pub fn submit(&mut self) -> usize {
        if !self.can_submit() {
            return 0;
        }
        let raw = self.input.take();
        let new_items = task::parse_tasks_with(&raw, self.config.tasks.delimiter);
        let added = new_items.len();
        let selected_id = self.selected_item().map(|item| item.id);

        self.tasks.add_batch(new_items);
        tracing::debug!(added, total = self.tasks.len(), "tasks submitted");

        self.notify(ViewEvent::InputChanged);
        if added > 0 {
            self.notify(ViewEvent::TasksAdded { added });
            let restored = selected_id
                .and_then(|id| self.tasks.position(id))
                .or(if self.tasks.is_empty() { None } else { Some(0) });
            self.set_selected(restored);
        }
        added
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    fn set_selected(&mut self, index: Option<usize>) {
        if self.selected != index {
            self.selected = index;
            self.notify(ViewEvent::SelectionChanged { index });
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.tasks.len() {
            self.set_selected(Some(index));
        }
    }

    /// Move the selection by `delta` rows, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        if self.tasks.is_empty() {
            self.set_selected(None);
            return;
        }
        let max = self.tasks.len().saturating_sub(1);
        let current = self.selected.unwrap_or(0);
        let next = (current as isize + delta).clamp(0, max as isize) as usize;
        self.set_selected(Some(next));
    }

    // ---------------------------------------------------------------------
    // Completion
    // ---------------------------------------------------------------------

    /// Toggle the item with `id` and feed the new count to the celebration
    /// trigger.
    pub fn toggle(&mut self, id: Uuid, now: Instant) -> Result<ItemState> {
        if !self.tasks.contains(id) {
            return Err(Error::TaskNotFound(id.to_string()));
        }

        let delta = self.completions.toggle(id);
        let completed = self.counter.apply(delta);
        let state = self.completions.state(id);
        tracing::debug!(%id, ?state, completed, "item toggled");
        self.notify(ViewEvent::ItemToggled {
            id,
            done: state.is_done(),
            completed,
        });

        if let CelebrationOutcome::Shown { hide_after } =
            self.celebration.on_count_changed(completed, self.store.as_mut())
        {
            let hide_id = self
                .queue
                .schedule(HIDE_BANNER_KEY, now, hide_after, UiAction::HideBanner);
            self.celebration.arm_hide(hide_id);
            self.notify(ViewEvent::BannerShown);
        }

        Ok(state)
    }

    pub fn toggle_at(&mut self, index: usize, now: Instant) -> Result<ItemState> {
        let id = self
            .tasks
            .get(index)
            .map(|item| item.id)
            .ok_or_else(|| Error::TaskNotFound(format!("row {index}")))?;
        self.set_selected(Some(index));
        self.toggle(id, now)
    }

    pub fn toggle_selected(&mut self, now: Instant) -> Result<ItemState> {
        let index = self
            .selected
            .ok_or_else(|| Error::InvalidArgument("no task selected".to_string()))?;
        self.toggle_at(index, now)
    }

    // ---------------------------------------------------------------------
    // Timers
    // ---------------------------------------------------------------------

    /// Run every queued action due at `now`. Returns whether state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for (id, action) in self.queue.drain_due(now) {
            match action {
                UiAction::HideBanner => {
                    if self.celebration.on_hide_fired(id) {
                        tracing::debug!("celebration banner hidden");
                        self.notify(ViewEvent::BannerHidden);
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.next_deadline()
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    pub fn snapshot(&self, today: NaiveDate) -> ViewSnapshot {
        let items = self
            .tasks
            .iter()
            .enumerate()
            .map(|(idx, item)| ItemRow {
                id: item.id,
                text: item.text.clone(),
                done: self.completions.state(item.id).is_done(),
                selected: self.selected == Some(idx),
            })
            .collect();

        let banner = self
            .celebration
            .is_banner_visible()
            .then(|| self.config.display.banner_text.clone());
        let placeholder = self
            .input
            .is_empty()
            .then(|| self.config.display.placeholder.clone());

        ViewSnapshot {
            date_header: date_header::format_long_date(today, &self.config.display.date_format),
            banner,
            items,
            completed_count: self.counter.count(),
            completed_label: self.counter.label(),
            input: self.input.value().to_string(),
            input_cursor: self.input.cursor(),
            placeholder,
            submit_enabled: self.can_submit(),
        }
    }
}
