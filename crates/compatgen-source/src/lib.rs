//! # compatgen-source
//!
//! Source layer for the compatibility generator.
//!
//! This crate provides:
//! - `SourceUnit`: a Go file read as untouched lines plus editable
//!   decoration spans (lossless render)
//! - package loading with the type-file filter
//! - `PackageResolver` for mapping package identifiers to directories
//! - `plan` / `commit` / `generate`: whole-run processing with buffered writes
//!
//! It intentionally does not shell out to the Go toolchain. That adapter
//! lives in `compatgen-golist`.
//!
//! ## Data flow
//!
//! ```text
//! package id ──resolve──▶ directory ──load──▶ SourceUnit*
//!     walk_declarations (kernel) ──▶ render ──▶ Plan ──commit──▶ disk
//! ```

pub mod error;
pub mod generate;
pub mod package;
pub mod resolve;
pub mod scan;
pub mod unit;

pub use error::{ResolveError, SourceError};
pub use generate::{
    ChangedFile, GenerateOptions, PackageSummary, PendingWrite, Plan, REPORT_KIND, RunReport,
    commit, generate, plan, plan_directory, process_unit,
};
pub use package::{GENERATED_FILE_PREFIX, NON_TYPE_FILES, is_type_file, load_package, write_unit};
pub use resolve::{DirectoryResolver, PackageResolver};
pub use unit::{STALE_BUILD_DIRECTIVE, SourceUnit};
