//! Per-item completion state and the shared completed counter.
//!
//! Completion lives outside `TaskItem`: each item id maps to its own
//! Pending/Done state, and every toggle reports a +1/-1 delta to the
//! counter.

use std::collections::HashMap;

use uuid::Uuid;

/// Completion state of one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemState {
    #[default]
    Pending,
    Done,
}

impl ItemState {
    /// Flip the state and return the delta it reports to the counter.
    pub fn toggle(&mut self) -> CountDelta {
        match self {
            ItemState::Pending => {
                *self = ItemState::Done;
                CountDelta::Increment
            }
            ItemState::Done => {
                *self = ItemState::Pending;
                CountDelta::Decrement
            }
        }
    }

    pub fn is_done(self) -> bool {
        self == ItemState::Done
    }
}

/// Change reported by a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountDelta {
    Increment,
    Decrement,
}

/// Completion states keyed by item id. Unknown ids read as `Pending`.
#[derive(Debug, Clone, Default)]
pub struct Completions {
    states: HashMap<Uuid, ItemState>,
}

impl Completions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: Uuid) -> ItemState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    pub fn toggle(&mut self, id: Uuid) -> CountDelta {
        self.states.entry(id).or_default().toggle()
    }
}

/// Running total of items currently marked Done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionCounter {
    count: usize,
}

impl CompletionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Apply a delta and return the new count.
    pub fn apply(&mut self, delta: CountDelta) -> usize {
        self.count = match delta {
            CountDelta::Increment => self.count + 1,
            CountDelta::Decrement => self.count.saturating_sub(1),
        };
        self.count
    }

    /// Label shown in the input panel badge
    pub fn label(&self) -> String {
        format!("{} completed", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_between_states() {
        let mut state = ItemState::default();
        assert_eq!(state, ItemState::Pending);
        assert_eq!(state.toggle(), CountDelta::Increment);
        assert!(state.is_done());
        assert_eq!(state.toggle(), CountDelta::Decrement);
        assert_eq!(state, ItemState::Pending);
    }

    #[test]
    fn double_toggle_restores_count() {
        let mut completions = Completions::new();
        let mut counter = CompletionCounter::new();
        let id = Uuid::new_v4();

        counter.apply(completions.toggle(id));
        assert_eq!(counter.count(), 1);
        counter.apply(completions.toggle(id));
        assert_eq!(counter.count(), 0);
        assert_eq!(completions.state(id), ItemState::Pending);
    }

    #[test]
    fn counter_tracks_done_items() {
        let mut completions = Completions::new();
        let mut counter = CompletionCounter::new();
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();

        for id in &ids {
            counter.apply(completions.toggle(*id));
        }
        counter.apply(completions.toggle(ids[2]));

        assert_eq!(counter.count(), 3);
        assert_eq!(completions.state(ids[2]), ItemState::Pending);
        assert_eq!(counter.label(), "3 completed");
    }

    #[test]
    fn decrement_never_goes_negative() {
        let mut counter = CompletionCounter::new();
        assert_eq!(counter.apply(CountDelta::Decrement), 0);
    }

    #[test]
    fn unknown_id_reads_pending() {
        let completions = Completions::new();
        assert_eq!(completions.state(Uuid::new_v4()), ItemState::Pending);
    }
}
