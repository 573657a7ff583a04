//! Mapping package identifiers to directories.

use crate::error::ResolveError;
use std::path::PathBuf;

/// Resolves a package identifier to the directory holding its sources.
pub trait PackageResolver {
    fn resolve(&self, package: &str) -> Result<PathBuf, ResolveError>;
}

/// Treats every identifier as a directory path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryResolver;

impl PackageResolver for DirectoryResolver {
    fn resolve(&self, package: &str) -> Result<PathBuf, ResolveError> {
        let path = PathBuf::from(package);
        if !path.exists() {
            return Err(ResolveError::NotFound { path });
        }
        if !path.is_dir() {
            return Err(ResolveError::NotADirectory { path });
        }
        Ok(path)
    }
}

impl<R: PackageResolver + ?Sized> PackageResolver for &R {
    fn resolve(&self, package: &str) -> Result<PathBuf, ResolveError> {
        (**self).resolve(package)
    }
}

impl<R: PackageResolver + ?Sized> PackageResolver for Box<R> {
    fn resolve(&self, package: &str) -> Result<PathBuf, ResolveError> {
        (**self).resolve(package)
    }
}
