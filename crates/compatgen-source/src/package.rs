//! Loading the type files of one package directory and writing units back.

use crate::error::SourceError;
use crate::unit::SourceUnit;
use std::fs;
use std::path::Path;

/// File-name prefix of generated code.
pub const GENERATED_FILE_PREFIX: &str = "zz_generated";

/// Well-known files that never hold API type declarations.
pub const NON_TYPE_FILES: [&str; 3] = ["doc.go", "register.go", "generated.pb.go"];

/// True if there is a reasonable chance the file contains type definitions.
pub fn is_type_file(name: &str) -> bool {
    name.ends_with(".go")
        && !name.ends_with("_test.go")
        && !name.starts_with(GENERATED_FILE_PREFIX)
        && !NON_TYPE_FILES.contains(&name)
}

/// Parse every type file directly inside `dir`, in file-name order.
pub fn load_package(dir: &Path) -> Result<Vec<SourceUnit>, SourceError> {
    let entries = fs::read_dir(dir).map_err(|err| SourceError::io(dir, err))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| SourceError::io(dir, err))?;
        if !is_type_file(&entry.file_name().to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        // Follows symlinks.
        let metadata = fs::metadata(&path).map_err(|err| SourceError::io(&path, err))?;
        if metadata.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let text = fs::read_to_string(&path).map_err(|err| SourceError::io(&path, err))?;
            SourceUnit::parse(&path, &text).map_err(|message| SourceError::Parse { path, message })
        })
        .collect()
}

/// Overwrite `path` with `contents`. The file keeps its permissions.
pub fn write_unit(path: &Path, contents: &str) -> Result<(), SourceError> {
    fs::write(path, contents).map_err(|err| SourceError::io(path, err))
}
