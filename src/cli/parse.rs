//! easytask parse command implementation
//!
//! Runs the input parser and sorted merge without a terminal, so the list
//! a submission would produce can be inspected or scripted.

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{self, TaskItem, TaskList};

pub struct ParseOptions {
    pub text: Vec<String>,
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ParseReport<'a> {
    input: &'a str,
    count: usize,
    tasks: &'a [TaskItem],
}

pub fn run(options: ParseOptions) -> Result<()> {
    let delimiter = options.config.tasks.delimiter;
    let separator = delimiter.to_string();
    let raw = options.text.join(separator.as_str());

    let mut list = TaskList::new();
    list.add_batch(task::parse_tasks_with(&raw, delimiter));
    tracing::debug!(count = list.len(), "parsed tasks");

    let report = ParseReport {
        input: &raw,
        count: list.len(),
        tasks: list.as_slice(),
    };

    let mut human = HumanOutput::new(format!("easytask parse: {} task(s)", list.len()));
    for item in &list {
        human.push_detail(item.text.clone());
    }
    if list.is_empty() {
        human.push_warning("input contained no non-empty tasks");
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "parse",
        &report,
        Some(&human),
    )
}
