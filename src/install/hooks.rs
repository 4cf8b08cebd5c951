//! Per-skill install hooks.
//!
//! After bulk content placement a skill may finalize itself with its own
//! script. Candidates are tried in a fixed precedence order; the first
//! whose file exists runs exactly once, with the skill directory as the
//! working directory.

use std::path::Path;

use anyhow::Result;
use log::debug;

use crate::process::Launcher;
use crate::runtime::Runtime;

/// Candidate hook invocations, in precedence order.
const CANDIDATES: &[(&str, &str)] = &[
    ("bash", "scripts/install.sh"),
    ("python3", "scripts/install.py"),
    ("bash", "install.sh"),
    ("python3", "install.py"),
];

/// Outcome of one skill's hook attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct HookOutcome {
    pub success: bool,
    /// Captured hook output, or a short note when the hook printed nothing
    /// or no hook exists.
    pub detail: String,
}

/// Run the first matching hook inside `skill_dir`.
///
/// A skill without any hook file succeeds with a note; it simply requires
/// no finalization.
pub fn run_hook<R: Runtime, L: Launcher>(
    runtime: &R,
    launcher: &L,
    skill_dir: &Path,
) -> Result<HookOutcome> {
    for (program, script) in CANDIDATES {
        if !runtime.is_file(&skill_dir.join(script)) {
            continue;
        }

        debug!("Running hook {} {} in {:?}", program, script, skill_dir);

        let args = vec![script.to_string()];
        let result = launcher.run(program, &args, skill_dir)?;
        let command = format!("{} {}", program, script);

        if result.success {
            let detail = if result.output.is_empty() {
                format!("ran {}", command)
            } else {
                result.output
            };
            return Ok(HookOutcome {
                success: true,
                detail,
            });
        }

        let detail = if result.output.is_empty() {
            format!("{} failed with exit {}", command, result.exit_label())
        } else {
            result.output
        };
        return Ok(HookOutcome {
            success: false,
            detail,
        });
    }

    Ok(HookOutcome {
        success: true,
        detail: "no install script found".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{MockLauncher, ProcessOutput};
    use crate::runtime::MockRuntime;
    use std::path::PathBuf;

    fn skill_dir() -> PathBuf {
        PathBuf::from("/home/user/.skillsync/skills/demo")
    }

    fn expect_hook_files(runtime: &mut MockRuntime, present: &[&str]) {
        let present: Vec<PathBuf> = present.iter().map(|s| skill_dir().join(s)).collect();
        runtime
            .expect_is_file()
            .returning(move |path| present.iter().any(|p| p == path));
    }

    #[test]
    fn test_first_candidate_wins() {
        let mut runtime = MockRuntime::new();
        let mut launcher = MockLauncher::new();

        expect_hook_files(&mut runtime, &["scripts/install.sh", "install.sh"]);
        launcher
            .expect_run()
            .withf(|program, args, cwd| {
                program == "bash"
                    && args == ["scripts/install.sh"]
                    && cwd == skill_dir().as_path()
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(ProcessOutput {
                    success: true,
                    code: Some(0),
                    output: "configured".to_string(),
                })
            });

        let outcome = run_hook(&runtime, &launcher, &skill_dir()).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.detail, "configured");
    }

    #[test]
    fn test_python_fallback_at_skill_root() {
        let mut runtime = MockRuntime::new();
        let mut launcher = MockLauncher::new();

        expect_hook_files(&mut runtime, &["install.py"]);
        launcher
            .expect_run()
            .withf(|program, args, _| program == "python3" && args == ["install.py"])
            .times(1)
            .returning(|_, _, _| {
                Ok(ProcessOutput {
                    success: true,
                    code: Some(0),
                    output: String::new(),
                })
            });

        let outcome = run_hook(&runtime, &launcher, &skill_dir()).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.detail, "ran python3 install.py");
    }

    #[test]
    fn test_no_hook_is_success() {
        let mut runtime = MockRuntime::new();
        let launcher = MockLauncher::new();

        expect_hook_files(&mut runtime, &[]);

        let outcome = run_hook(&runtime, &launcher, &skill_dir()).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.detail, "no install script found");
    }

    #[test]
    fn test_failing_hook_reports_output() {
        let mut runtime = MockRuntime::new();
        let mut launcher = MockLauncher::new();

        expect_hook_files(&mut runtime, &["scripts/install.sh"]);
        launcher.expect_run().returning(|_, _, _| {
            Ok(ProcessOutput {
                success: false,
                code: Some(2),
                output: "missing dependency: poppler".to_string(),
            })
        });

        let outcome = run_hook(&runtime, &launcher, &skill_dir()).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.detail, "missing dependency: poppler");
    }

    #[test]
    fn test_failing_hook_without_output_reports_exit_code() {
        let mut runtime = MockRuntime::new();
        let mut launcher = MockLauncher::new();

        expect_hook_files(&mut runtime, &["install.sh"]);
        launcher.expect_run().returning(|_, _, _| {
            Ok(ProcessOutput {
                success: false,
                code: Some(1),
                output: String::new(),
            })
        });

        let outcome = run_hook(&runtime, &launcher, &skill_dir()).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.detail, "bash install.sh failed with exit 1");
    }

    #[test]
    fn test_hook_runs_exactly_once() {
        let mut runtime = MockRuntime::new();
        let mut launcher = MockLauncher::new();

        // Even with several candidates present, only the first executes.
        expect_hook_files(
            &mut runtime,
            &["scripts/install.sh", "scripts/install.py", "install.sh"],
        );
        launcher
            .expect_run()
            .times(1)
            .returning(|_, _, _| {
                Ok(ProcessOutput {
                    success: false,
                    code: Some(1),
                    output: "boom".to_string(),
                })
            });

        let outcome = run_hook(&runtime, &launcher, &skill_dir()).unwrap();
        assert!(!outcome.success);
    }
}
