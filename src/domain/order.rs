//! Recommended execution order
//!
//! Kahn's algorithm over a validated [`TaskGraph`], with a ready set ordered
//! by priority (descending), due date (ascending) and title (ascending).

use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::graph::TaskGraph;
use super::task::TaskInput;

/// Sort key for a task whose dependencies are all placed
///
/// The minimum key is the next task to run.
#[derive(Debug, Clone)]
struct ReadyKey<'a> {
    priority: i32,
    due_date: NaiveDateTime,
    title: &'a str,
    index: usize,
}

impl<'a> ReadyKey<'a> {
    fn new(tasks: &'a [TaskInput], index: usize) -> Self {
        let task = &tasks[index];
        Self {
            priority: task.priority,
            due_date: task.due_date,
            title: task.title.as_str(),
            index,
        }
    }
}

impl Ord for ReadyKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.due_date.cmp(&other.due_date))
            .then_with(|| self.title.cmp(other.title))
    }
}

impl PartialOrd for ReadyKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ReadyKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReadyKey<'_> {}

/// Returns the tasks in recommended execution order
///
/// `graph` must have been built from `tasks`. Every task appears exactly
/// once, after all of its dependencies.
pub fn topological_order<'a>(tasks: &'a [TaskInput], graph: &TaskGraph<'a>) -> Vec<&'a TaskInput> {
    let mut in_degree: Vec<usize> = (0..tasks.len()).map(|i| graph.in_degree(i)).collect();

    let mut ready: BTreeSet<ReadyKey<'a>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, degree)| **degree == 0)
        .map(|(i, _)| ReadyKey::new(tasks, i))
        .collect();

    let mut order = Vec::with_capacity(tasks.len());

    while let Some(next) = ready.pop_first() {
        order.push(&tasks[next.index]);

        for dependent in graph.dependents(next.index) {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.insert(ReadyKey::new(tasks, dependent));
            }
        }
    }

    order
}
