//! Invocation of the external formatter.
//!
//! The formatter is a black box: this module only knows its two command
//! line shapes, `<formatter> --version` and
//! `<formatter> --options=<file> <source>...`. Processes are started through
//! the [`CommandRunner`] trait so the task can be driven without a real
//! AStyle installed.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::FormatError;

/// Captured result of a finished child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a program to completion and captures its output
pub trait CommandRunner {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// Returns `Err` only when the process could not be started.
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// [`CommandRunner`] backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Build the argument list for a formatting run
///
/// The options file comes first, then every source in the given order.
#[must_use]
pub fn format_args(options: &Path, files: &[PathBuf]) -> Vec<String> {
    let mut args = Vec::with_capacity(files.len() + 1);
    args.push(format!("--options={}", options.display()));
    args.extend(files.iter().map(|f| f.to_string_lossy().into_owned()));
    args
}

/// A formatter executable together with the runner used to start it
pub struct Formatter<'a, R: CommandRunner + ?Sized> {
    program: &'a str,
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> Formatter<'a, R> {
    #[must_use]
    pub fn new(program: &'a str, runner: &'a R) -> Self {
        Self { program, runner }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        self.program
    }

    /// Check that the formatter can be run, via `--version`
    ///
    /// A missing executable and a non-zero exit both count as unavailable.
    /// The probe's own output is discarded.
    #[must_use]
    pub fn probe(&self) -> bool {
        match self.runner.run(self.program, &["--version".to_string()]) {
            Ok(output) => output.success(),
            Err(_) => false,
        }
    }

    /// Format `files` in place using the options file at `options`
    pub fn format(&self, options: &Path, files: &[PathBuf]) -> Result<CommandOutput, FormatError> {
        let args = format_args(options, files);
        let output = self
            .runner
            .run(self.program, &args)
            .map_err(|source| FormatError::Spawn {
                program: self.program.to_string(),
                source,
            })?;

        if output.success() {
            Ok(output)
        } else {
            Err(FormatError::Failed {
                program: self.program.to_string(),
                code: output.code,
                stdout: output.stdout,
                stderr: output.stderr,
            })
        }
    }
}
