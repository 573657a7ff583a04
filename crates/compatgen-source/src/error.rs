//! Error types for reading, rewriting and resolving Go packages.

use compatgen_kernel::CompatError;
use std::path::PathBuf;

/// Failure to map a package identifier to a directory.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("package directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("{tool} executable is not available in PATH")]
    ToolMissing { tool: &'static str },

    #[error("failed to resolve package {package}: {message}")]
    Command { package: String, message: String },

    #[error("resolving package {package} produced no directory")]
    EmptyOutput { package: String },
}

/// Errors from the package pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A declaration in `path` broke the compatibility policy or carries a
    /// malformed tag.
    #[error("{}: {source}", path.display())]
    Compat {
        path: PathBuf,
        #[source]
        source: CompatError,
    },
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures caused by the declarations themselves rather than
    /// by the environment.
    pub fn is_policy_failure(&self) -> bool {
        matches!(self, Self::Compat { .. })
    }
}
