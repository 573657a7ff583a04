//! Compatibility tag extraction.
//!
//! Tags follow the Kubernetes comment-tag convention: `// +key` or
//! `// +key=value`, one per line. Only the first occurrence of a key counts.

use crate::error::CompatError;
use crate::level::CompatibilityLevel;

pub const TAG_MARKER: &str = "// +";
pub const LEVEL_TAG_NAME: &str = "openshift:compatibility-gen:level";
pub const INTERNAL_TAG_NAME: &str = "openshift:compatibility-gen:internal";

/// The compatibility-relevant tags of one declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompatibilityTags {
    pub level: Option<CompatibilityLevel>,
    pub internal: bool,
}

/// True for `// +key[=value]` lines.
pub fn is_tag_line(line: &str) -> bool {
    line.starts_with(TAG_MARKER)
}

/// Value of the first `// +key[=value]` line with the given key.
///
/// `Some("")` means the tag is present without a value.
pub fn first_tag_value<'a>(lines: &'a [String], key: &str) -> Option<&'a str> {
    lines.iter().find_map(|line| {
        let rest = line.trim_matches(' ').strip_prefix(TAG_MARKER)?;
        let (tag, value) = rest.split_once('=').unwrap_or((rest, ""));
        (tag == key).then_some(value)
    })
}

/// Extract the level and internal tags of `type_name` from its decorations.
pub fn extract_tags(type_name: &str, lines: &[String]) -> Result<CompatibilityTags, CompatError> {
    let internal = match first_tag_value(lines, INTERNAL_TAG_NAME) {
        None => false,
        Some("") => true,
        Some(value) => parse_bool(value).ok_or_else(|| CompatError::MalformedTag {
            type_name: type_name.to_string(),
            tag: INTERNAL_TAG_NAME,
            value: value.to_string(),
            reason: "not a boolean".to_string(),
        })?,
    };

    let level = first_tag_value(lines, LEVEL_TAG_NAME)
        .map(|value| {
            value
                .parse::<CompatibilityLevel>()
                .map_err(|reason| CompatError::MalformedTag {
                    type_name: type_name.to_string(),
                    tag: LEVEL_TAG_NAME,
                    value: value.to_string(),
                    reason,
                })
        })
        .transpose()?;

    tracing::debug!(type_name, internal, level = ?level, "compatibility tags extracted");
    Ok(CompatibilityTags { level, internal })
}

// Same vocabulary as Go's strconv.ParseBool, which tag authors already use.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
