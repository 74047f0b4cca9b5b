//! The `format` build task.
//!
//! One straight pass of guard clauses followed by a single formatter run:
//!
//! 1. Probe the formatter with `--version`
//! 2. Check that the options file exists
//! 3. Collect the sources below the source directory
//! 4. Run the formatter over all of them and report a summary
//!
//! The first three steps are soft: they print why the task stopped and
//! return [`TaskOutcome::Skipped`], so a machine without AStyle can still
//! build. Only a failing formatter run comes back as `Err`, carrying a
//! [`FormatError`](crate::error::FormatError), so the build fails with it.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::FormatError;
use crate::formatter::{CommandRunner, Formatter};
use crate::sources::{collect_sources, compile_patterns};
use crate::summary::Summary;
use crate::Result;

/// Why the task stopped without running the formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The formatter could not be started or failed its version probe
    FormatterMissing,
    /// The options file does not exist at the given path
    OptionsMissing(PathBuf),
    /// No file matched the source patterns
    NoSources,
}

/// Result of a task run that did not fail the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Skipped(SkipReason),
    Completed(Summary),
}

/// The format task with its configuration
#[derive(Debug, Clone, Default)]
pub struct FormatTask {
    pub config: Config,
    /// Print `[DEBUG]` diagnostics to stderr
    pub debug: bool,
}

impl FormatTask {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            debug: false,
        }
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Run the task against `project_dir`, reporting to `out`
    pub fn run<R, W>(&self, project_dir: &Path, runner: &R, out: &mut W) -> Result<TaskOutcome>
    where
        R: CommandRunner + ?Sized,
        W: Write + ?Sized,
    {
        let formatter = Formatter::new(&self.config.formatter, runner);

        if self.debug {
            eprintln!("[DEBUG] Project directory: {}", project_dir.display());
            eprintln!("[DEBUG] Probing formatter: {} --version", formatter.program());
        }
        if !formatter.probe() {
            writeln!(out, "AStyle not found!")?;
            return Ok(TaskOutcome::Skipped(SkipReason::FormatterMissing));
        }

        let options = self.config.options_path(project_dir);
        if !options.exists() {
            writeln!(out, "AStyle config not found: {}", options.display())?;
            return Ok(TaskOutcome::Skipped(SkipReason::OptionsMissing(options)));
        }

        let patterns = compile_patterns(&self.config.patterns)?;
        let source_dir = self.config.source_path(project_dir);
        let files = collect_sources(&source_dir, &patterns, self.config.sort_files);
        if self.debug {
            eprintln!(
                "[DEBUG] Found {} files below {} matching {:?}",
                files.len(),
                source_dir.display(),
                self.config.patterns
            );
            for f in &files {
                eprintln!("[DEBUG]   - {}", f.display());
            }
        }
        if files.is_empty() {
            writeln!(out, "No C/C++ files found to format")?;
            return Ok(TaskOutcome::Skipped(SkipReason::NoSources));
        }

        writeln!(out, "🎨 Formatting {} files with AStyle...", files.len())?;
        writeln!(out, "   Config: {}", options.display())?;

        let output = match formatter.format(&options, &files) {
            Ok(output) => output,
            Err(e) => {
                report_failure(out, &e)?;
                return Err(e.into());
            }
        };

        if !output.stdout.is_empty() {
            writeln!(out, "{}", output.stdout)?;
        }

        let summary = Summary::from_output(&output.stdout);
        writeln!(out, "✅ Done!")?;
        writeln!(out, "   Formatted: {}", summary.formatted)?;
        writeln!(out, "   Unchanged: {}", summary.unchanged)?;

        Ok(TaskOutcome::Completed(summary))
    }
}

/// Run the format task with the default configuration
pub fn run_format<R, W>(project_dir: &Path, runner: &R, out: &mut W) -> Result<TaskOutcome>
where
    R: CommandRunner + ?Sized,
    W: Write + ?Sized,
{
    FormatTask::default().run(project_dir, runner, out)
}

/// Print the failure banner and whatever the formatter said
fn report_failure<W: Write + ?Sized>(out: &mut W, err: &FormatError) -> std::io::Result<()> {
    writeln!(out, "❌ AStyle failed")?;
    if let FormatError::Failed { stdout, stderr, .. } = err {
        if !stdout.is_empty() {
            writeln!(out, "{stdout}")?;
        }
        if !stderr.is_empty() {
            writeln!(out, "{stderr}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::io;

    use crate::formatter::CommandOutput;

    /// Answers the version probe and the formatting run with fixed exit codes
    struct FixedRunner {
        probe_code: Option<i32>,
        format_code: i32,
        stdout: &'static str,
        stderr: &'static str,
    }

    impl CommandRunner for FixedRunner {
        fn run(&self, _program: &str, args: &[String]) -> io::Result<CommandOutput> {
            if args == ["--version"] {
                return match self.probe_code {
                    Some(code) => Ok(CommandOutput {
                        code: Some(code),
                        ..Default::default()
                    }),
                    None => Err(io::Error::new(io::ErrorKind::NotFound, "missing")),
                };
            }
            Ok(CommandOutput {
                code: Some(self.format_code),
                stdout: self.stdout.to_string(),
                stderr: self.stderr.to_string(),
            })
        }
    }

    fn project(with_options: bool, sources: &[&str]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        if with_options {
            fs::create_dir_all(tmp.path().join("scripts")).unwrap();
            fs::write(tmp.path().join("scripts/astyle.cfg"), "--style=allman\n").unwrap();
        }
        for name in sources {
            let path = tmp.path().join("main").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "int x;\n").unwrap();
        }
        tmp
    }

    fn ok_runner(stdout: &'static str) -> FixedRunner {
        FixedRunner {
            probe_code: Some(0),
            format_code: 0,
            stdout,
            stderr: "",
        }
    }

    #[test]
    fn test_missing_formatter_is_soft() {
        let tmp = project(true, &["a.c"]);
        let runner = FixedRunner {
            probe_code: None,
            ..ok_runner("")
        };
        let mut out = Vec::new();
        let outcome = run_format(tmp.path(), &runner, &mut out).unwrap();
        assert_eq!(outcome, TaskOutcome::Skipped(SkipReason::FormatterMissing));
        assert_eq!(String::from_utf8(out).unwrap(), "AStyle not found!\n");
    }

    #[test]
    fn test_failing_probe_is_soft() {
        let tmp = project(true, &["a.c"]);
        let runner = FixedRunner {
            probe_code: Some(127),
            ..ok_runner("")
        };
        let outcome = run_format(tmp.path(), &runner, &mut io::sink()).unwrap();
        assert_eq!(outcome, TaskOutcome::Skipped(SkipReason::FormatterMissing));
    }

    #[test]
    fn test_missing_options_is_soft() {
        let tmp = project(false, &["a.c"]);
        let mut out = Vec::new();
        let outcome = run_format(tmp.path(), &ok_runner(""), &mut out).unwrap();
        let expected = tmp.path().join("scripts/astyle.cfg");
        assert_eq!(
            outcome,
            TaskOutcome::Skipped(SkipReason::OptionsMissing(expected.clone()))
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("AStyle config not found: {}", expected.display())));
    }

    #[test]
    fn test_no_sources_is_soft() {
        let tmp = project(true, &["notes.txt"]);
        let mut out = Vec::new();
        let outcome = run_format(tmp.path(), &ok_runner(""), &mut out).unwrap();
        assert_eq!(outcome, TaskOutcome::Skipped(SkipReason::NoSources));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No C/C++ files found to format\n"
        );
    }

    #[test]
    fn test_summary_is_reported() {
        let tmp = project(true, &["a.c", "b.cpp", "c.h"]);
        let runner = ok_runner("Formatted  a.c\nUnchanged  b.cpp\nUnchanged  c.h\n");
        let mut out = Vec::new();
        let outcome = run_format(tmp.path(), &runner, &mut out).unwrap();
        assert_eq!(
            outcome,
            TaskOutcome::Completed(Summary {
                formatted: 1,
                unchanged: 2
            })
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("🎨 Formatting 3 files with AStyle..."));
        assert!(text.contains("✅ Done!\n   Formatted: 1\n   Unchanged: 2\n"));
    }

    #[test]
    fn test_failure_propagates_with_streams() {
        let tmp = project(true, &["a.c"]);
        let runner = FixedRunner {
            probe_code: Some(0),
            format_code: 1,
            stdout: "Formatted  a.c",
            stderr: "Error: bad option",
        };
        let mut out = Vec::new();
        let err = run_format(tmp.path(), &runner, &mut out).unwrap_err();
        assert!(err.downcast_ref::<FormatError>().is_some());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("❌ AStyle failed\nFormatted  a.c\nError: bad option\n"));
        assert!(!text.contains("✅ Done!"));
    }

    /// Passes the version probe, then fails to start the formatting run
    struct VanishingRunner;

    impl CommandRunner for VanishingRunner {
        fn run(&self, _program: &str, args: &[String]) -> io::Result<CommandOutput> {
            if args == ["--version"] {
                return Ok(CommandOutput {
                    code: Some(0),
                    ..Default::default()
                });
            }
            Err(io::Error::new(io::ErrorKind::NotFound, "astyle: not found"))
        }
    }

    #[test]
    fn test_spawn_failure_after_probe_is_hard() {
        let tmp = project(true, &["a.c"]);
        let mut out = Vec::new();
        let err = run_format(tmp.path(), &VanishingRunner, &mut out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::Spawn { .. })
        ));

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("❌ AStyle failed\n"));
        assert!(!text.contains("✅ Done!"));
    }

    #[test]
    fn test_custom_source_dir_and_patterns() {
        let tmp = project(true, &["a.c"]);
        fs::create_dir_all(tmp.path().join("lib")).unwrap();
        fs::write(tmp.path().join("lib/util.hpp"), "").unwrap();

        let config = Config {
            source_dir: PathBuf::from("lib"),
            patterns: vec!["*.hpp".to_string()],
            ..Default::default()
        };
        let outcome = FormatTask::new(config)
            .run(tmp.path(), &ok_runner("Unchanged  util.hpp\n"), &mut io::sink())
            .unwrap();
        assert_eq!(
            outcome,
            TaskOutcome::Completed(Summary {
                formatted: 0,
                unchanged: 1
            })
        );
    }
}
