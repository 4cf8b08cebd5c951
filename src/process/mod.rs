//! Process launch abstraction.
//!
//! External programs are started with an explicit program name, argument
//! list and working directory; no shell is involved. Only the exit status
//! and combined trimmed output are observed.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use log::debug;

/// Captured result of one process run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutput {
    pub success: bool,
    /// Exit code, absent when the process was terminated by a signal.
    pub code: Option<i32>,
    /// stdout and stderr, each trimmed, joined with a newline.
    pub output: String,
}

impl ProcessOutput {
    /// Exit code as text for messages ("1", or "signal" when absent).
    pub fn exit_label(&self) -> String {
        match self.code {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Launcher: Send + Sync {
    /// Run `program` with `args` in `cwd`, blocking until it exits.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ProcessOutput>;
}

pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    #[tracing::instrument(skip(self, args))]
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ProcessOutput> {
        debug!("Running {} {:?} in {:?}", program, args, cwd);

        let result = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .with_context(|| format!("Failed to launch {}", program))?;

        let stdout = String::from_utf8_lossy(&result.stdout);
        let stderr = String::from_utf8_lossy(&result.stderr);
        let output = [stdout.trim(), stderr.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        Ok(ProcessOutput {
            success: result.status.success(),
            code: result.status.code(),
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_label() {
        let ok = ProcessOutput {
            success: true,
            code: Some(0),
            output: String::new(),
        };
        let killed = ProcessOutput {
            success: false,
            code: None,
            output: String::new(),
        };
        assert_eq!(ok.exit_label(), "0");
        assert_eq!(killed.exit_label(), "signal");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_output_and_status() {
        let launcher = SystemLauncher;
        let result = launcher
            .run("echo", &["hello".to_string()], Path::new("."))
            .unwrap();
        assert!(result.success);
        assert_eq!(result.code, Some(0));
        assert_eq!(result.output, "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_nonzero_exit() {
        let launcher = SystemLauncher;
        let result = launcher.run("false", &[], Path::new(".")).unwrap();
        assert!(!result.success);
        assert_eq!(result.code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_respects_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        let launcher = SystemLauncher;
        let result = launcher.run("pwd", &[], &canonical).unwrap();
        assert!(result.success);
        assert_eq!(result.output, canonical.display().to_string());
    }

    #[test]
    fn test_run_missing_program_is_error() {
        let launcher = SystemLauncher;
        let result = launcher.run("definitely-not-a-real-program-7d3f", &[], Path::new("."));
        assert!(result.is_err());
    }
}
