//! Deferred work for the UI thread.
//!
//! Entries are keyed: scheduling a key that is already pending replaces the
//! earlier entry, so only the latest one fires. The UI loop drains due
//! entries between input events and uses `next_deadline` to bound its poll.

use std::time::{Duration, Instant};

/// Identifier of a scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduledId(u64);

#[derive(Debug)]
struct Entry<A> {
    id: ScheduledId,
    key: &'static str,
    due: Instant,
    action: A,
}

/// Keyed queue of actions due at a point in time.
#[derive(Debug)]
pub struct TaskQueue<A> {
    entries: Vec<Entry<A>>,
    next_id: u64,
}

impl<A> Default for TaskQueue<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<A> TaskQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to run `delay` after `now`, replacing any pending
    /// entry with the same key.
    pub fn schedule(
        &mut self,
        key: &'static str,
        now: Instant,
        delay: Duration,
        action: A,
    ) -> ScheduledId {
        let replaced = self.cancel_key(key);
        let id = ScheduledId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            key,
            due: now + delay,
            action,
        });
        tracing::debug!(
            key,
            id = id.0,
            replaced,
            delay_ms = delay.as_millis() as u64,
            "scheduled"
        );
        id
    }

    /// Cancel every entry with `key`. Returns whether any was pending.
    pub fn cancel_key(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.key != key);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest due time among pending entries
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Remove and return every entry due at or before `now`, oldest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<(ScheduledId, A)> {
        let mut due = Vec::new();
        let mut pending = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.due <= now {
                due.push(entry);
            } else {
                pending.push(entry);
            }
        }
        self.entries = pending;
        due.sort_by_key(|entry| (entry.due, entry.id));
        due.into_iter().map(|entry| (entry.id, entry.action)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_fire_once_due() {
        let mut queue = TaskQueue::new();
        let start = Instant::now();
        let id = queue.schedule("hide", start, Duration::from_secs(2), "hide banner");

        assert!(queue.drain_due(start + Duration::from_secs(1)).is_empty());
        assert_eq!(queue.len(), 1);

        let fired = queue.drain_due(start + Duration::from_secs(2));
        assert_eq!(fired, vec![(id, "hide banner")]);
        assert!(queue.is_empty());
    }

    #[test]
    fn same_key_replaces_pending_entry() {
        let mut queue = TaskQueue::new();
        let start = Instant::now();
        let first = queue.schedule("hide", start, Duration::from_secs(2), 1);
        let later = start + Duration::from_secs(1);
        let second = queue.schedule("hide", later, Duration::from_secs(2), 2);

        assert_ne!(first, second);
        assert_eq!(queue.len(), 1);
        assert!(queue.drain_due(start + Duration::from_secs(2)).is_empty());
        assert_eq!(queue.drain_due(start + Duration::from_secs(3)), vec![(second, 2)]);
    }

    #[test]
    fn different_keys_coexist_in_due_order() {
        let mut queue = TaskQueue::new();
        let start = Instant::now();
        let late = queue.schedule("a", start, Duration::from_millis(300), "a");
        let early = queue.schedule("b", start, Duration::from_millis(100), "b");

        assert_eq!(queue.next_deadline(), Some(start + Duration::from_millis(100)));
        let fired = queue.drain_due(start + Duration::from_secs(1));
        assert_eq!(fired, vec![(early, "b"), (late, "a")]);
    }

    #[test]
    fn cancel_key_removes_entry() {
        let mut queue = TaskQueue::new();
        let start = Instant::now();
        queue.schedule("hide", start, Duration::from_secs(2), ());
        assert!(queue.cancel_key("hide"));
        assert!(!queue.cancel_key("hide"));
        assert!(queue.next_deadline().is_none());
    }
}
