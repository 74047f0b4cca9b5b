//! Task registration against an explicit build environment.
//!
//! A build tool hands its hooks an environment object that knows the project
//! directory and accepts named tasks. [`BuildEnv`] is that seam; tasks get
//! the project directory passed in when they run instead of reading it from
//! process-wide state. [`TaskRegistry`] is the implementation the
//! `astyle-task` binary drives.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::formatter::CommandRunner;
use crate::task::{FormatTask, TaskOutcome};
use crate::Result;

/// Alias the format task is registered under
pub const FORMAT_TASK: &str = "format";

/// Action run for a task: receives the project directory and the report sink
pub type TaskAction = Box<dyn FnMut(&Path, &mut dyn Write) -> Result<TaskOutcome>>;

/// What a build hook can see of and do to the build
pub trait BuildEnv {
    /// Root directory of the project being built
    fn project_dir(&self) -> &Path;

    /// Register a task that runs once and is then considered up to date
    fn alias(&mut self, name: &str, action: TaskAction);

    /// Register a task that runs every time it is requested
    fn always_build_alias(&mut self, name: &str, action: TaskAction);
}

struct RegisteredTask {
    name: String,
    always_run: bool,
    up_to_date: bool,
    action: TaskAction,
}

/// Ordered set of named tasks for one build session
pub struct TaskRegistry {
    project_dir: PathBuf,
    tasks: Vec<RegisteredTask>,
}

impl TaskRegistry {
    #[must_use]
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            tasks: Vec::new(),
        }
    }

    /// Names of all registered tasks, in registration order
    #[must_use]
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    /// Whether `name` is registered as always-run, `None` if unknown
    #[must_use]
    pub fn is_always_run(&self, name: &str) -> Option<bool> {
        self.tasks
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.always_run)
    }

    /// Run the task registered as `name`
    ///
    /// Returns `Ok(None)` when the task is not always-run and already
    /// succeeded in this session. A task that returned `Err` stays out of
    /// date. Unknown names are an error.
    pub fn run(&mut self, name: &str, out: &mut dyn Write) -> Result<Option<TaskOutcome>> {
        let Self { project_dir, tasks } = self;

        let Some(idx) = tasks.iter().position(|t| t.name == name) else {
            let known: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
            anyhow::bail!("unknown task '{name}' (available: {})", known.join(", "));
        };
        let task = &mut tasks[idx];

        if task.up_to_date && !task.always_run {
            return Ok(None);
        }

        let outcome = (task.action)(project_dir.as_path(), out)?;
        task.up_to_date = true;
        Ok(Some(outcome))
    }

    fn insert(&mut self, name: &str, always_run: bool, action: TaskAction) {
        let task = RegisteredTask {
            name: name.to_string(),
            always_run,
            up_to_date: false,
            action,
        };
        // Re-registering replaces the earlier action in place
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.name == name) {
            *existing = task;
        } else {
            self.tasks.push(task);
        }
    }
}

impl BuildEnv for TaskRegistry {
    fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn alias(&mut self, name: &str, action: TaskAction) {
        self.insert(name, false, action);
    }

    fn always_build_alias(&mut self, name: &str, action: TaskAction) {
        self.insert(name, true, action);
    }
}

/// Register `task` as the always-run [`FORMAT_TASK`] alias
pub fn register_format_task<E>(env: &mut E, task: FormatTask, runner: Box<dyn CommandRunner>)
where
    E: BuildEnv + ?Sized,
{
    env.always_build_alias(
        FORMAT_TASK,
        Box::new(move |project_dir: &Path, out: &mut dyn Write| {
            task.run(project_dir, runner.as_ref(), out)
        }),
    );
}
