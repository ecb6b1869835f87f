//! Composed pipeline plan

use crate::core::{
    deployment::DeploymentVariant,
    error::{GeneratorError, Result},
    group::TaskGroup,
    task::Task,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Named entry points exposed by the generated task runner.
///
/// Kept apart from task IDs: the `optimize` entry point and the
/// `optimize-assets` task are different things.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Composite {
    Default,
    Build,
    Optimize,
    Rebuild,
    Check,
    Deploy,
}

impl Composite {
    /// Name the task runner registers the entry point under
    pub fn name(&self) -> &'static str {
        match self {
            Composite::Default => "default",
            Composite::Build => "build",
            Composite::Optimize => "optimize",
            Composite::Rebuild => "rebuild",
            Composite::Check => "check",
            Composite::Deploy => "deploy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Composite::Default => "Builds the site, serves it and watches for changes",
            Composite::Build => "Builds the site without serving it",
            Composite::Optimize => "Builds the site with production settings and optimizes it into 'dist'",
            Composite::Rebuild => "Cleans out 'dist', '.tmp' and the Jekyll metadata",
            Composite::Check => "Checks the Jekyll configuration and scripts for errors",
            Composite::Deploy => "Publishes the optimized site, run 'optimize' first",
        }
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pipeline:{}", self.name())
    }
}

/// One entry point and the tasks it runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pipeline {
    pub name: Composite,
    pub group: TaskGroup,
}

/// Everything the emitter needs: the entry points, the tasks they
/// reference, and the deploy target they were composed for
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub variant: DeploymentVariant,

    /// Referenced tasks in catalog order
    pub tasks: Vec<Task>,

    /// Entry points in composition order
    pub pipelines: Vec<Pipeline>,
}

impl Plan {
    /// Get an entry point's task group
    pub fn pipeline(&self, name: Composite) -> Option<&TaskGroup> {
        self.pipelines
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.group)
    }

    /// Get a task by ID
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Transitive dependencies of a task, dependencies first, the task last.
    /// Dependencies the plan does not hold are left out.
    pub fn dependency_chain(&self, id: &str) -> Result<Vec<String>> {
        let tasks: HashMap<&str, &Task> = self.tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        if !tasks.contains_key(id) {
            return Err(GeneratorError::UnknownTask(id.to_string()));
        }

        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        Self::visit(id, &tasks, &mut visited, &mut chain);
        Ok(chain)
    }

    fn visit(
        id: &str,
        tasks: &HashMap<&str, &Task>,
        visited: &mut HashSet<String>,
        chain: &mut Vec<String>,
    ) {
        let Some(task) = tasks.get(id) else {
            return;
        };
        if !visited.insert(id.to_string()) {
            return;
        }

        for dep in &task.dependencies {
            Self::visit(dep, tasks, visited, chain);
        }

        chain.push(id.to_string());
    }
}
