//! Error types and result aliases for astyle-task.
//!
//! This module defines the error handling infrastructure:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate
//! - [`FormatError`]: The one failure the format task surfaces to the build,
//!   kept typed so callers can tell it apart from setup problems

use anyhow::Result as AnyhowResult;
use thiserror::Error;

pub type Result<T> = AnyhowResult<T>;

/// Hard failure of the formatting run itself.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The formatter could not be started at all
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The formatter ran and exited with a non-zero status
    #[error("{program} exited with {}", describe_status(.code))]
    Failed {
        program: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

#[allow(clippy::ref_option)]
fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_display_with_code() {
        let err = FormatError::Failed {
            program: "astyle".to_string(),
            code: Some(2),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "astyle exited with status 2");
    }

    #[test]
    fn test_failed_display_without_code() {
        let err = FormatError::Failed {
            program: "astyle".to_string(),
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_spawn_display() {
        let err = FormatError::Spawn {
            program: "astyle".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to run astyle: not found");
    }
}
