//! Command-line interface for astyle-task.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::build_env::FORMAT_TASK;

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Task to run
    pub task: String,

    /// Project root directory
    pub project_dir: Option<PathBuf>,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Formatter executable
    pub formatter: Option<String>,

    /// Formatter options file
    pub options_file: Option<PathBuf>,

    /// Source directory, relative to the project root
    pub source_dir: Option<PathBuf>,

    /// File name patterns (replace the configured list when non-empty)
    pub patterns: Vec<String>,

    /// Keep the filesystem walk order instead of sorting
    pub no_sort: bool,

    /// List registered tasks and exit
    pub list: bool,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("astyle-task")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run AStyle over a firmware project's C/C++ sources")
        .arg(
            Arg::new("task")
                .help("Task to run")
                .value_name("TASK")
                .default_value(FORMAT_TASK),
        )
        .arg(
            Arg::new("project-dir")
                .short('p')
                .long("project-dir")
                .help("Project root directory [default: $PROJECT_DIR, then the current directory]")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides <project>/astyle-task.toml)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("formatter")
                .long("formatter")
                .help("Formatter executable [default: astyle]")
                .value_name("PROGRAM"),
        )
        .arg(
            Arg::new("options-file")
                .long("options-file")
                .help("Formatter options file, relative to the project root [default: scripts/astyle.cfg]")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("source-dir")
                .long("source-dir")
                .help("Directory searched for sources, relative to the project root [default: main]")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .help("File name glob to format (can be repeated, replaces *.c *.cpp *.h)")
                .value_name("GLOB")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("no-sort")
                .long("no-sort")
                .help("Pass files in filesystem walk order instead of sorting them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List registered tasks and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config, discovered files)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        task: matches
            .get_one::<String>("task")
            .cloned()
            .unwrap_or_else(|| FORMAT_TASK.to_string()),
        project_dir: matches.get_one::<PathBuf>("project-dir").cloned(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        formatter: matches.get_one::<String>("formatter").cloned(),
        options_file: matches.get_one::<PathBuf>("options-file").cloned(),
        source_dir: matches.get_one::<PathBuf>("source-dir").cloned(),
        patterns: matches
            .get_many::<String>("pattern")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        no_sort: matches.get_flag("no-sort"),
        list: matches.get_flag("list"),
        debug: matches.get_flag("debug"),
    }
}
