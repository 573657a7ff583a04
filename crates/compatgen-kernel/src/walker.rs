//! Drive tags → maturity → policy → comment over every API type of a unit.

use crate::comment::ensure_compatibility_comment;
use crate::declaration::{Declaration, is_api_type};
use crate::error::CompatError;
use crate::maturity::Maturity;
use crate::policy::validate;
use crate::tags::extract_tags;

/// Synchronize the compatibility comment of every API type in `declarations`.
///
/// `namespace` is the enclosing package name. Declarations are visited in
/// order; the first error stops the walk. Returns whether any decoration
/// changed.
pub fn walk_declarations(
    namespace: &str,
    declarations: &mut [Declaration],
) -> Result<bool, CompatError> {
    let mut changed = false;
    for declaration in declarations.iter_mut().filter(|decl| is_api_type(decl)) {
        let name = declaration.name.as_str();
        tracing::debug!(type_name = name, namespace, "API type found");
        tracing::trace!(type_name = name, decorations = ?declaration.decorations);

        let tags = extract_tags(name, &declaration.decorations)?;
        let maturity = Maturity::classify(namespace);
        let level = validate(name, &tags, maturity)?;
        tracing::debug!(type_name = name, %maturity, %level, "compatibility level decided");

        changed |= ensure_compatibility_comment(&mut declaration.decorations, level);
    }
    Ok(changed)
}
