//! Dependency graph for tasks
//!
//! Validates a raw task list and builds the dependency graph the ordering
//! stage runs on. Uses petgraph for storage; edges point from a dependency to
//! its dependent ("dependency must finish before dependent").

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use super::task::TaskInput;

/// Reasons a task set cannot be scheduled
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidSchedule {
    #[error("Duplicate task title '{0}'. Each task must have a unique title.")]
    DuplicateTitle(String),

    #[error("Task '{task}' has invalid dependency: '{dependency}'")]
    UnknownDependency { task: String, dependency: String },

    #[error("Circular dependency detected in task dependencies: {}", .cycle.join(" -> "))]
    CircularDependency { cycle: Vec<String> },
}

/// Traversal state for cycle detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Finished,
}

/// A validated, acyclic dependency graph over a task slice
///
/// Node `i` corresponds to `tasks[i]` of the slice the graph was built from.
#[derive(Debug)]
pub struct TaskGraph<'a> {
    graph: DiGraph<&'a str, ()>,
}

impl<'a> TaskGraph<'a> {
    /// Validates the tasks and builds their graph
    ///
    /// Checks run in a fixed order and stop at the first violation:
    /// duplicate titles, unknown dependencies, then cycles.
    pub fn from_tasks(tasks: &'a [TaskInput]) -> Result<Self, InvalidSchedule> {
        let index = title_index(tasks)?;

        let mut graph = DiGraph::with_capacity(tasks.len(), tasks.len());
        for task in tasks {
            graph.add_node(task.title.as_str());
        }

        for (i, task) in tasks.iter().enumerate() {
            for dep in &task.dependencies {
                let dep_idx = index.get(dep.as_str()).ok_or_else(|| {
                    InvalidSchedule::UnknownDependency {
                        task: task.title.clone(),
                        dependency: dep.clone(),
                    }
                })?;
                // update_edge collapses repeated dependencies into one edge
                graph.update_edge(NodeIndex::new(*dep_idx), NodeIndex::new(i), ());
            }
        }

        let graph = Self { graph };
        if let Some(cycle) = graph.find_cycle() {
            return Err(InvalidSchedule::CircularDependency { cycle });
        }

        Ok(graph)
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the title of the task at `idx`
    pub fn title(&self, idx: usize) -> &'a str {
        self.graph[NodeIndex::new(idx)]
    }

    /// Number of distinct dependencies of the task at `idx`
    pub fn in_degree(&self, idx: usize) -> usize {
        self.graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Incoming)
            .count()
    }

    /// Direct dependencies of the task at `idx`
    pub fn dependencies(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Incoming)
            .map(|n| n.index())
    }

    /// Direct dependents of the task at `idx` (tasks that depend on it)
    pub fn dependents(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Outgoing)
            .map(|n| n.index())
    }

    /// Depth-first search over dependency edges with an explicit stack
    ///
    /// Returns the titles along the first loop found, with the entry title
    /// repeated at the end.
    fn find_cycle(&self) -> Option<Vec<String>> {
        let n = self.len();
        let mut marks = vec![Mark::Unvisited; n];

        for root in 0..n {
            if marks[root] != Mark::Unvisited {
                continue;
            }

            // Each frame is a node plus the dependencies still to explore.
            // The frames on the stack are exactly the in-progress path.
            let mut stack: Vec<(usize, Vec<usize>)> = vec![(root, self.sorted_dependencies(root))];
            marks[root] = Mark::InProgress;

            while let Some((node, pending)) = stack.last_mut() {
                let node = *node;
                match pending.pop() {
                    Some(next) => match marks[next] {
                        Mark::Unvisited => {
                            marks[next] = Mark::InProgress;
                            stack.push((next, self.sorted_dependencies(next)));
                        }
                        Mark::InProgress => {
                            let start = stack.iter().position(|(idx, _)| *idx == next)?;
                            let mut cycle: Vec<String> = stack[start..]
                                .iter()
                                .map(|(idx, _)| self.title(*idx).to_string())
                                .collect();
                            cycle.push(self.title(next).to_string());
                            return Some(cycle);
                        }
                        Mark::Finished => {}
                    },
                    None => {
                        marks[node] = Mark::Finished;
                        stack.pop();
                    }
                }
            }
        }

        None
    }

    /// Dependencies in reverse index order, so popping visits them in input order
    fn sorted_dependencies(&self, idx: usize) -> Vec<usize> {
        let mut deps: Vec<usize> = self.dependencies(idx).collect();
        deps.sort_unstable_by(|a, b| b.cmp(a));
        deps
    }
}

/// Validates a task list without keeping the graph
pub fn validate(tasks: &[TaskInput]) -> Result<(), InvalidSchedule> {
    TaskGraph::from_tasks(tasks).map(|_| ())
}

/// Maps each title to its position, rejecting duplicates
fn title_index(tasks: &[TaskInput]) -> Result<HashMap<&str, usize>, InvalidSchedule> {
    let mut index = HashMap::with_capacity(tasks.len());
    let mut seen = HashSet::with_capacity(tasks.len());

    for (i, task) in tasks.iter().enumerate() {
        if !seen.insert(task.title.as_str()) {
            return Err(InvalidSchedule::DuplicateTitle(task.title.clone()));
        }
        index.insert(task.title.as_str(), i);
    }

    Ok(index)
}
