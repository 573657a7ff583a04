//! Run the compatibility walk over whole packages.
//!
//! A run happens in two phases. [`plan`] resolves every requested package,
//! walks every unit and renders the changed ones without touching the disk.
//! [`commit`] then writes the rendered units. A policy failure anywhere in
//! the run therefore leaves every file as it was.

use crate::error::SourceError;
use crate::package::{load_package, write_unit};
use crate::resolve::PackageResolver;
use crate::unit::SourceUnit;
use compatgen_kernel::{CompatError, walk_declarations};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

pub const REPORT_KIND: &str = "compatgen.generate.v1";

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Plan only; never write.
    pub dry_run: bool,
}

/// A rendered unit waiting to be written.
#[derive(Debug, Clone)]
pub struct PendingWrite {
    pub path: PathBuf,
    pub contents: String,
    pub previous_digest: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    pub package: String,
    pub directory: PathBuf,
    pub units: usize,
    pub changed_units: usize,
}

/// Everything a run would write, already validated.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub packages: Vec<PackageSummary>,
    pub writes: Vec<PendingWrite>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn unit_count(&self) -> usize {
        self.packages.iter().map(|pkg| pkg.units).sum()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangedFile {
    pub path: PathBuf,
    pub previous_digest: String,
    pub digest: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub schema: u32,
    pub report_kind: &'static str,
    /// `unchanged`, `planned` (dry run with changes) or `written`.
    pub result: &'static str,
    pub dry_run: bool,
    pub packages: Vec<PackageSummary>,
    pub changed_files: Vec<ChangedFile>,
    pub unchanged_files: usize,
}

impl RunReport {
    pub fn has_changes(&self) -> bool {
        !self.changed_files.is_empty()
    }
}

fn content_digest(text: &str) -> String {
    let hash = Sha256::digest(text.as_bytes());
    format!("sha256:{hash:x}")
}

/// Walk one unit. Returns the new text when any decoration changed.
pub fn process_unit(unit: &mut SourceUnit) -> Result<Option<String>, CompatError> {
    let namespace = unit.package().to_string();
    if !walk_declarations(&namespace, &mut unit.declarations)? {
        return Ok(None);
    }
    if unit.strip_stale_build_directive() {
        tracing::debug!(path = %unit.path().display(), "removed stale build directive");
    }
    Ok(Some(unit.render()))
}

/// Walk every unit of the package in `dir`, collecting pending writes.
pub fn plan_directory(
    package: &str,
    dir: &Path,
    writes: &mut Vec<PendingWrite>,
) -> Result<PackageSummary, SourceError> {
    let units = load_package(dir)?;
    let unit_count = units.len();
    let mut changed_units = 0;
    for mut unit in units {
        let previous_digest = content_digest(unit.original());
        let rendered = process_unit(&mut unit).map_err(|source| SourceError::Compat {
            path: unit.path().to_path_buf(),
            source,
        })?;
        if let Some(contents) = rendered {
            tracing::info!(path = %unit.path().display(), "compatibility comments out of date");
            changed_units += 1;
            writes.push(PendingWrite {
                path: unit.path().to_path_buf(),
                contents,
                previous_digest,
            });
        }
    }
    Ok(PackageSummary {
        package: package.to_string(),
        directory: dir.to_path_buf(),
        units: unit_count,
        changed_units,
    })
}

/// Resolve and walk every package. Nothing is written.
pub fn plan<R: PackageResolver>(packages: &[String], resolver: &R) -> Result<Plan, SourceError> {
    let mut plan = Plan::default();
    for package in packages {
        let dir = resolver.resolve(package)?;
        tracing::debug!(package = package.as_str(), dir = %dir.display(), "package resolved");
        let summary = plan_directory(package, &dir, &mut plan.writes)?;
        plan.packages.push(summary);
    }
    Ok(plan)
}

/// Write every pending unit. Stops at the first write failure; units written
/// before it stay written.
pub fn commit(plan: &Plan) -> Result<usize, SourceError> {
    for write in &plan.writes {
        write_unit(&write.path, &write.contents)?;
        tracing::info!(path = %write.path.display(), "compatibility comments written");
    }
    Ok(plan.writes.len())
}

/// Resolve, validate and (unless `dry_run`) rewrite `packages`.
pub fn generate<R: PackageResolver>(
    packages: &[String],
    resolver: &R,
    options: GenerateOptions,
) -> Result<RunReport, SourceError> {
    let plan = plan(packages, resolver)?;
    if !options.dry_run {
        commit(&plan)?;
    }

    let result = match (plan.is_empty(), options.dry_run) {
        (true, _) => "unchanged",
        (false, true) => "planned",
        (false, false) => "written",
    };
    let changed_files = plan
        .writes
        .iter()
        .map(|write| ChangedFile {
            path: write.path.clone(),
            previous_digest: write.previous_digest.clone(),
            digest: content_digest(&write.contents),
        })
        .collect::<Vec<_>>();
    Ok(RunReport {
        schema: 1,
        report_kind: REPORT_KIND,
        result,
        dry_run: options.dry_run,
        unchanged_files: plan.unit_count() - changed_files.len(),
        packages: plan.packages,
        changed_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use compatgen_kernel::{CompatibilityLevel, PolicyViolation, canonical_comment};

    #[test]
    fn process_unit_adds_comment_and_strips_directive() {
        let source = "package v1\n\n// +openshift:compatibility-gen:level=1\ntype Foo struct {\n\tmetav1.TypeMeta `json:\",inline\"`\n}\n\n// +build !ignore_autogenerated\n";
        let mut unit = SourceUnit::parse("foo.go", source).unwrap();
        let rendered = process_unit(&mut unit).unwrap().unwrap();
        assert_eq!(
            rendered,
            format!(
                "package v1\n\n{}\n// +openshift:compatibility-gen:level=1\ntype Foo struct {{\n\tmetav1.TypeMeta `json:\",inline\"`\n}}\n\n",
                canonical_comment(CompatibilityLevel::Level1)
            )
        );
    }

    #[test]
    fn process_unit_leaves_directive_when_unchanged() {
        let source = "package v1\n\ntype FooSpec struct {\n\tA int\n}\n// +build !ignore_autogenerated\n";
        let mut unit = SourceUnit::parse("foo.go", source).unwrap();
        assert_eq!(process_unit(&mut unit).unwrap(), None);
        assert_eq!(unit.render(), source);
    }

    #[test]
    fn process_unit_reports_policy_violation() {
        let source = "package v1beta1\n\n// +openshift:compatibility-gen:level=1\ntype Foo struct {\n\tmetav1.TypeMeta\n}\n";
        let mut unit = SourceUnit::parse("foo.go", source).unwrap();
        let err = process_unit(&mut unit).unwrap_err();
        assert_eq!(
            err,
            CompatError::Policy(PolicyViolation::PrereleaseLevelTooStrong {
                type_name: "Foo".to_string()
            })
        );
    }

    #[test]
    fn previous_digest_hashes_bytes_on_disk() {
        let dir = std::env::temp_dir().join(format!(
            "compatgen-source-digest-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("clock should be after unix epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let source = "package v1\r\n\r\n// +openshift:compatibility-gen:level=1\r\n\t\r\ntype Foo struct {\r\n\tmetav1.TypeMeta\r\n}\r\n";
        std::fs::write(dir.join("types.go"), source).unwrap();

        let mut writes = Vec::new();
        let summary = plan_directory("v1", &dir, &mut writes);
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(summary.unwrap().changed_units, 1);
        assert_eq!(writes[0].previous_digest, content_digest(source));
        assert!(writes[0].contents.contains(&format!(
            "// +openshift:compatibility-gen:level=1\r\n\t\r\n{}\r\ntype Foo struct {{\r\n",
            canonical_comment(CompatibilityLevel::Level1)
        )));
    }

    #[test]
    fn digest_format() {
        assert_eq!(
            content_digest(""),
            "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
