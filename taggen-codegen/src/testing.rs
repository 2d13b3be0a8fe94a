//! Helpers for testing generators. Enabled by the `testing` feature.

use std::{fmt, fs, path::Path, process::Command};

use eyre::Result;

/// A script that exited unsuccessfully, or could not be started.
#[derive(Debug)]
pub struct NodeError {
    pub message: String,
    pub stderr: String,
    pub stdout: String,
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n\nstderr:\n{}\n\nstdout:\n{}",
            self.message, self.stderr, self.stdout
        )
    }
}

impl std::error::Error for NodeError {}

/// Runs a script under `node` inside a directory of generated modules.
///
/// The directory gets a `package.json` marking it as an ES module package,
/// so `import`/`export` load as written.
pub struct NodeChecker {
    script: String,
}

impl NodeChecker {
    /// `script` is relative to the directory passed to [`run`](Self::run).
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
        }
    }

    /// Whether `node` can be started. Tests that need it skip themselves
    /// otherwise.
    pub fn is_available() -> bool {
        Command::new("node")
            .arg("--version")
            .output()
            .is_ok_and(|output| output.status.success())
    }

    /// Run the script and return what it printed.
    pub fn run(&self, dir: &Path) -> Result<String, NodeError> {
        let failed = |message: String| NodeError {
            message,
            stderr: String::new(),
            stdout: String::new(),
        };

        let package = dir.join("package.json");
        if !package.exists() {
            fs::write(&package, "{ \"type\": \"module\" }\n")
                .map_err(|e| failed(format!("failed to write {}: {}", package.display(), e)))?;
        }

        let output = Command::new("node")
            .arg(&self.script)
            .current_dir(dir)
            .output()
            .map_err(|e| failed(format!("failed to start node: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            return Err(NodeError {
                message: format!("node {} exited with {}", self.script, output.status),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                stdout,
            });
        }
        Ok(stdout)
    }
}

/// Compare generated text line by line, panicking with every differing line.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected == actual {
        return;
    }

    let expected: Vec<_> = expected.lines().collect();
    let actual: Vec<_> = actual.lines().collect();
    let diff: String = (0..expected.len().max(actual.len()))
        .filter_map(|i| {
            let want = expected.get(i).copied().unwrap_or("<missing>");
            let got = actual.get(i).copied().unwrap_or("<missing>");
            (want != got).then(|| {
                format!("Line {}:\n  expected: {}\n  actual:   {}\n", i + 1, want, got)
            })
        })
        .collect();

    if diff.is_empty() {
        panic!("Content mismatch in trailing newlines");
    }
    panic!("Content mismatch:\n{}", diff);
}

/// Fill a fresh temporary directory. It is removed when the returned
/// `TempDir` drops.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let dir = tempfile::TempDir::new()?;
    generate(dir.path())?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_content_eq_passes_on_equal() {
        assert_content_eq("a\nb\n", "a\nb\n");
    }

    #[test]
    #[should_panic(expected = "Line 2")]
    fn test_assert_content_eq_reports_line() {
        assert_content_eq("a\nb\n", "a\nc\n");
    }

    #[test]
    #[should_panic(expected = "trailing newlines")]
    fn test_assert_content_eq_notices_trailing_newline() {
        assert_content_eq("a\n", "a\n\n");
    }

    #[test]
    fn test_node_runs_module_script() {
        if !NodeChecker::is_available() {
            eprintln!("node not found, skipping");
            return;
        }

        let dir = generate_to_temp(|dir| {
            fs::write(dir.join("answer.js"), "export const answer = 42\n")?;
            fs::write(
                dir.join("main.js"),
                "import { answer } from './answer.js'\nconsole.log(answer)\n",
            )?;
            Ok(())
        })
        .unwrap();

        let stdout = NodeChecker::new("main.js").run(dir.path()).unwrap();
        assert_eq!(stdout.trim(), "42");
    }

    #[test]
    fn test_node_failure_carries_stderr() {
        if !NodeChecker::is_available() {
            eprintln!("node not found, skipping");
            return;
        }

        let dir = generate_to_temp(|dir| {
            fs::write(dir.join("main.js"), "throw new TypeError('boom')\n")?;
            Ok(())
        })
        .unwrap();

        let err = NodeChecker::new("main.js").run(dir.path()).unwrap_err();
        assert!(err.stderr.contains("TypeError: boom"));
    }
}
