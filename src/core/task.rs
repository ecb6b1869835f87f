//! Task domain model

use serde::Serialize;

/// A single named build or deploy step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Unique task identifier, as registered with the task runner
    pub id: String,

    /// One-line description, emitted as a comment above the task
    pub description: String,

    /// IDs of the tasks that must have run before this one
    pub dependencies: Vec<String>,

    /// The external operation this task delegates to
    pub action: Action,

    /// Whether the task pushes its output into the live preview session
    pub reloads_preview: bool,

    /// Directories the task reads from
    pub reads: Vec<String>,

    /// Directories the task writes into
    pub writes: Vec<String>,
}

/// Reference to an external operation. Never executed here, only rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    /// Move the given paths to the trash
    Trash { paths: Vec<String> },

    /// Run a shell command
    Shell { command: String },

    /// Read a glob, pipe it through plugins and write the result
    Stream(StreamSpec),

    /// A hand-written task-runner function body
    Script { body: String },
}

/// A source → transforms → destination file stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamSpec {
    /// Source glob
    pub source: String,

    /// Plugin invocations applied in order
    pub transforms: Vec<String>,

    /// Destination directory
    pub dest: String,

    /// Label printed by the size reporter
    pub title: String,
}

impl Task {
    /// Create a task with no dependencies, side effects or declared directories
    pub fn new(id: impl Into<String>, description: impl Into<String>, action: Action) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            dependencies: Vec::new(),
            action,
            reloads_preview: false,
            reads: Vec::new(),
            writes: Vec::new(),
        }
    }

    pub fn depends_on(mut self, task_id: impl Into<String>) -> Self {
        self.dependencies.push(task_id.into());
        self
    }

    pub fn reloading_preview(mut self) -> Self {
        self.reloads_preview = true;
        self
    }

    pub fn reading(mut self, dir: impl Into<String>) -> Self {
        self.reads.push(dir.into());
        self
    }

    pub fn writing(mut self, dir: impl Into<String>) -> Self {
        self.writes.push(dir.into());
        self
    }
}

impl Action {
    pub fn trash(paths: &[&str]) -> Self {
        Action::Trash {
            paths: paths.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn shell(command: impl Into<String>) -> Self {
        Action::Shell {
            command: command.into(),
        }
    }

    pub fn script(body: impl Into<String>) -> Self {
        Action::Script { body: body.into() }
    }
}
