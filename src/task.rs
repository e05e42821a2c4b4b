//! Task items, the text parser, and the sorted task list.
//!
//! Tasks live for the session only. The list is mutated solely by
//! appending a parsed batch, after which it is re-sorted by text.

use serde::Serialize;
use uuid::Uuid;

/// Default separator between tasks in the input text
pub const DEFAULT_DELIMITER: char = ',';

/// One to-do entry. The text never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskItem {
    pub id: Uuid,
    pub text: String,
}

impl TaskItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}

/// Split `raw` on commas into trimmed, non-empty task items.
pub fn parse_tasks(raw: &str) -> Vec<TaskItem> {
    parse_tasks_with(raw, DEFAULT_DELIMITER)
}

/// Split `raw` on `delimiter` into trimmed, non-empty task items.
///
/// Input order is preserved; stray delimiters and whitespace-only
/// segments produce no items.
pub fn parse_tasks_with(raw: &str, delimiter: char) -> Vec<TaskItem> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(TaskItem::new)
        .collect()
}

/// Task items kept sorted ascending by text.
///
/// Equal texts keep their relative insertion order.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    items: Vec<TaskItem>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `new_items` and re-sort the whole list.
    pub fn add_batch(&mut self, new_items: Vec<TaskItem>) {
        if new_items.is_empty() {
            return;
        }
        self.items.extend(new_items);
        // `sort_by` is stable, which keeps equal texts in append order.
        self.items.sort_by(|left, right| left.text.cmp(&right.text));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskItem> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&TaskItem> {
        self.items.get(index)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.position(id).is_some()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    pub fn as_slice(&self) -> &[TaskItem] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a TaskItem;
    type IntoIter = std::slice::Iter<'a, TaskItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Merge `new_items` into `existing`, returning the sorted result.
pub fn add_batch(existing: Vec<TaskItem>, new_items: Vec<TaskItem>) -> Vec<TaskItem> {
    let mut list = TaskList { items: existing };
    list.add_batch(new_items);
    list.items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn texts(items: &[TaskItem]) -> Vec<&str> {
        items.iter().map(|item| item.text.as_str()).collect()
    }

    #[test]
    fn parse_trims_and_keeps_input_order() {
        let items = parse_tasks("buy milk, walk dog,  read book ");
        assert_eq!(texts(&items), vec!["buy milk", "walk dog", "read book"]);
    }

    #[test]
    fn parse_empty_and_stray_commas_yield_nothing() {
        assert!(parse_tasks("").is_empty());
        assert!(parse_tasks(",, ,").is_empty());
        assert!(parse_tasks("   ").is_empty());
        assert!(parse_tasks("\t,\n").is_empty());
    }

    #[test]
    fn parse_drops_blank_segments_between_items() {
        let items = parse_tasks("a,,  ,b,");
        assert_eq!(texts(&items), vec!["a", "b"]);
    }

    #[test]
    fn parse_keeps_inner_whitespace() {
        let items = parse_tasks("  call   mom  ");
        assert_eq!(texts(&items), vec!["call   mom"]);
    }

    #[test]
    fn parse_with_custom_delimiter() {
        let items = parse_tasks_with("a; b,c ;", ';');
        assert_eq!(texts(&items), vec!["a", "b,c"]);
    }

    #[test]
    fn parse_assigns_unique_ids() {
        let items = parse_tasks("same, same, same");
        let ids: HashSet<Uuid> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn add_batch_sorts_ascending() {
        let mut list = TaskList::new();
        list.add_batch(parse_tasks("buy milk, walk dog,  read book "));
        assert_eq!(list.texts(), vec!["buy milk", "read book", "walk dog"]);

        list.add_batch(parse_tasks("answer email, zebra"));
        assert_eq!(
            list.texts(),
            vec!["answer email", "buy milk", "read book", "walk dog", "zebra"]
        );
    }

    #[test]
    fn add_batch_is_case_sensitive() {
        let mut list = TaskList::new();
        list.add_batch(parse_tasks("apple, Banana, banana, Apple"));
        assert_eq!(list.texts(), vec!["Apple", "Banana", "apple", "banana"]);
    }

    #[test]
    fn add_batch_is_stable_for_equal_text() {
        let first = parse_tasks("dup, a");
        let second = parse_tasks("dup");
        let first_dup = first[0].id;
        let second_dup = second[0].id;

        let merged = add_batch(first, second);
        assert_eq!(texts(&merged), vec!["a", "dup", "dup"]);
        assert_eq!(merged[1].id, first_dup);
        assert_eq!(merged[2].id, second_dup);
    }

    #[test]
    fn add_batch_keeps_every_identity() {
        let existing = parse_tasks("c, a");
        let new_items = parse_tasks("b, a");
        let mut expected: HashSet<Uuid> = existing.iter().map(|item| item.id).collect();
        expected.extend(new_items.iter().map(|item| item.id));

        let merged = add_batch(existing, new_items);
        let actual: HashSet<Uuid> = merged.iter().map(|item| item.id).collect();
        assert_eq!(merged.len(), 4);
        assert_eq!(actual, expected);
        assert!(merged.windows(2).all(|pair| pair[0].text <= pair[1].text));
    }

    #[test]
    fn lookup_by_id() {
        let mut list = TaskList::new();
        list.add_batch(parse_tasks("b, a"));
        let id = list.get(1).map(|item| item.id).expect("second item");
        assert_eq!(list.position(id), Some(1));
        assert!(list.contains(id));
        assert!(!list.contains(Uuid::new_v4()));
    }
}
