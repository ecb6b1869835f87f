//! Sequential and parallel task groupings

use serde::Serialize;
use std::fmt;

/// A task reference, or an ordered/unordered collection of groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskGroup {
    /// A single catalog task
    Task(String),

    /// Members run one after another
    Sequence(Vec<TaskGroup>),

    /// Members may run concurrently; declared order is kept for output
    Parallel(Vec<TaskGroup>),
}

impl TaskGroup {
    pub fn task(id: &str) -> Self {
        TaskGroup::Task(id.to_string())
    }

    pub fn sequence(members: Vec<TaskGroup>) -> Self {
        TaskGroup::Sequence(members)
    }

    pub fn parallel(ids: &[&str]) -> Self {
        TaskGroup::Parallel(ids.iter().map(|id| Self::task(id)).collect())
    }

    /// Every task ID in the group, in declaration order, duplicates included
    pub fn task_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        match self {
            TaskGroup::Task(id) => ids.push(id),
            TaskGroup::Sequence(members) | TaskGroup::Parallel(members) => {
                for member in members {
                    member.collect_ids(ids);
                }
            }
        }
    }
}

impl fmt::Display for TaskGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close, members) = match self {
            TaskGroup::Task(id) => return write!(f, "{}", id),
            TaskGroup::Sequence(members) => ("[", "]", members),
            TaskGroup::Parallel(members) => ("{", "}", members),
        };

        write!(f, "{}", open)?;
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", member)?;
        }
        write!(f, "{}", close)
    }
}
