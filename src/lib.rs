//! astyle-task - AStyle formatting task for `PlatformIO` firmware projects
//!
//! Finds the C/C++ sources of a project, runs AStyle over them with the
//! project's options file and reports how many files changed.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod build_env;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod sources;
pub mod summary;
pub mod task;

// Re-export commonly used types
pub use build_env::{register_format_task, BuildEnv, TaskRegistry, FORMAT_TASK};
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::{FormatError, Result};
pub use formatter::{CommandOutput, CommandRunner, SystemRunner};
pub use summary::Summary;
pub use task::{run_format, FormatTask, SkipReason, TaskOutcome};
