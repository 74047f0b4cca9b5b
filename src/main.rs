//! astyle-task - AStyle formatting task for `PlatformIO` firmware projects

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use astyle_task::{
    parse_args, register_format_task, CliArgs, Config, FormatTask, Result, SystemRunner,
    TaskRegistry,
};

/// Environment variable the build system exports with the project root
const PROJECT_DIR_ENV: &str = "PROJECT_DIR";

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    let project_dir = resolve_project_dir(&args)?;
    let config = build_config(&args, &project_dir)?;

    let mut registry = TaskRegistry::new(project_dir);
    register_format_task(
        &mut registry,
        FormatTask::new(config).with_debug(args.debug),
        Box::new(SystemRunner),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list {
        for name in registry.task_names() {
            let always = if registry.is_always_run(name) == Some(true) {
                " (always run)"
            } else {
                ""
            };
            writeln!(out, "{name}{always}")?;
        }
        return Ok(());
    }

    let outcome = registry.run(&args.task, &mut out)?;
    if args.debug {
        match outcome {
            Some(outcome) => eprintln!("[DEBUG] Task '{}' finished: {outcome:?}", args.task),
            None => eprintln!("[DEBUG] Task '{}' is up to date", args.task),
        }
    }

    Ok(())
}

/// Project root: `--project-dir`, then `$PROJECT_DIR`, then the current directory
fn resolve_project_dir(args: &CliArgs) -> Result<PathBuf> {
    if let Some(dir) = &args.project_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(PROJECT_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    Ok(std::env::current_dir()?)
}

/// Build configuration from the config file and CLI overrides
fn build_config(args: &CliArgs, project_dir: &Path) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else {
        if args.debug {
            eprintln!(
                "[DEBUG] Looking for {} in {}",
                astyle_task::config::CONFIG_FILE_NAME,
                project_dir.display()
            );
        }
        Config::from_project_dir(project_dir)
    };

    // Override with CLI arguments
    if let Some(formatter) = &args.formatter {
        config.formatter.clone_from(formatter);
    }
    if let Some(options_file) = &args.options_file {
        config.options_file.clone_from(options_file);
    }
    if let Some(source_dir) = &args.source_dir {
        config.source_dir.clone_from(source_dir);
    }
    if !args.patterns.is_empty() {
        config.patterns.clone_from(&args.patterns);
    }
    if args.no_sort {
        config.sort_files = false;
    }

    // Print final config in debug mode
    if args.debug {
        print_config_debug(&config);
    }

    // Validate configuration
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Print configuration values in debug mode
fn print_config_debug(config: &Config) {
    eprintln!("[DEBUG] Configuration:");
    eprintln!("[DEBUG]   formatter: {}", config.formatter);
    eprintln!("[DEBUG]   options_file: {}", config.options_file.display());
    eprintln!("[DEBUG]   source_dir: {}", config.source_dir.display());
    eprintln!("[DEBUG]   patterns: {:?}", config.patterns);
    eprintln!("[DEBUG]   sort_files: {}", config.sort_files);
}
