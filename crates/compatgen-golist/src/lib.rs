//! `go list` adapter for package resolution.
//!
//! This crate is intentionally thin: it shells out to `go list` to find the
//! directory of an import path and keeps no other knowledge of the Go
//! toolchain.

use compatgen_source::{PackageResolver, ResolveError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Errors from invoking the Go toolchain.
#[derive(Debug, thiserror::Error)]
pub enum GoListError {
    #[error("go executable is not available in PATH")]
    NotInstalled,

    #[error("go command failed: go {args} ({message})")]
    CommandFailed { args: String, message: String },

    #[error("go list returned no directory for {0}")]
    EmptyOutput(String),
}

/// Thin client around `go list`.
#[derive(Debug, Clone, Default)]
pub struct GoListResolver {
    workdir: Option<PathBuf>,
}

impl GoListResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `go list` from `dir`, so module-relative import paths resolve
    /// against that module.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }

    /// Directory holding the sources of `package`.
    pub fn package_dir(&self, package: &str) -> Result<PathBuf, GoListError> {
        let stdout = run_go(self.workdir.as_deref(), &["list", "-f", "{{ .Dir }}", package])?;
        let dir = first_nonempty_line(&stdout)
            .ok_or_else(|| GoListError::EmptyOutput(package.to_string()))?;
        tracing::debug!(package, dir, "go list resolved package");
        Ok(PathBuf::from(dir))
    }
}

impl PackageResolver for GoListResolver {
    fn resolve(&self, package: &str) -> Result<PathBuf, ResolveError> {
        self.package_dir(package)
            .map_err(|err| into_resolve_error(package, err))
    }
}

fn into_resolve_error(package: &str, err: GoListError) -> ResolveError {
    match err {
        GoListError::NotInstalled => ResolveError::ToolMissing { tool: "go" },
        GoListError::EmptyOutput(package) => ResolveError::EmptyOutput { package },
        err @ GoListError::CommandFailed { .. } => ResolveError::Command {
            package: package.to_string(),
            message: err.to_string(),
        },
    }
}

fn run_go(cwd: Option<&Path>, args: &[&str]) -> Result<String, GoListError> {
    let mut command = Command::new("go");
    command.args(args);
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }
    let output = command.output().map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            GoListError::NotInstalled
        } else {
            GoListError::CommandFailed {
                args: args.join(" "),
                message: err.to_string(),
            }
        }
    })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            "unknown error".to_string()
        } else {
            stderr
        };
        Err(GoListError::CommandFailed {
            args: args.join(" "),
            message,
        })
    }
}

fn first_nonempty_line(input: &str) -> Option<&str> {
    input.lines().map(str::trim).find(|line| !line.is_empty())
}
