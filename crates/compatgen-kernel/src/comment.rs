//! The compatibility comment synchronizer.
//!
//! Keeps exactly one `// Compatibility level N: ...` line in a declaration's
//! decorations. The work is split into pure steps so each can be checked on
//! its own:
//!
//! 1. [`find_existing`]: is the comment already there, stale, or missing?
//! 2. [`find_anchor`]: where would a missing comment go?
//! 3. [`splice`]: insert it, with blank-comment separators where needed.
//!
//! Decorations use two layout markers: `"\n"` for an empty source line and
//! `"// "` for an empty comment line (a doc-comment paragraph break). A bare
//! `"//"`, as gofmt leaves it, counts as an empty comment line too.

use crate::level::CompatibilityLevel;
use crate::tags::is_tag_line;

pub const COMPATIBILITY_COMMENT_PREFIX: &str = "// Compatibility level ";
pub const BLANK_LINE: &str = "\n";
pub const BLANK_COMMENT: &str = "// ";

/// State of the compatibility comment within a decoration list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingComment {
    /// The canonical comment is present.
    Current,
    /// A compatibility comment with other wording sits at this index.
    Stale(usize),
    /// No compatibility comment at all.
    Missing,
}

/// The comment line for `level`.
pub fn canonical_comment(level: CompatibilityLevel) -> String {
    format!(
        "{COMPATIBILITY_COMMENT_PREFIX}{}: {}",
        level.number(),
        level.sentence()
    )
}

/// Locate an existing compatibility comment. The first line that is either
/// canonical or carries the prefix decides.
pub fn find_existing(lines: &[String], canonical: &str) -> ExistingComment {
    for (index, line) in lines.iter().enumerate() {
        if line == canonical {
            return ExistingComment::Current;
        }
        if line.starts_with(COMPATIBILITY_COMMENT_PREFIX) {
            return ExistingComment::Stale(index);
        }
    }
    ExistingComment::Missing
}

/// Index at which a new comment should be inserted.
///
/// The comment must stay in the paragraph adjacent to the declaration so it
/// renders as documentation, and ahead of that paragraph's `// +` tags. The
/// backward scan stops at the first empty line; every tag line it passes moves
/// the anchor up to that tag.
pub fn find_anchor(lines: &[String]) -> usize {
    let mut anchor = lines.len();
    for (index, line) in lines.iter().enumerate().rev() {
        if line == BLANK_LINE {
            break;
        }
        if is_tag_line(line) {
            anchor = index;
        }
    }
    anchor
}

/// `"\n"`, or an empty comment line with or without the trailing space.
fn is_paragraph_break(line: &str) -> bool {
    line == BLANK_LINE || line.trim_end() == "//"
}

/// Insert `comment` at `anchor`, framing it with `"// "` so it forms its own
/// doc-comment paragraph. No separator is added next to an existing break,
/// at either end of the list, or before a tag line.
pub fn splice(lines: &[String], anchor: usize, comment: &str) -> Vec<String> {
    let anchor = anchor.min(lines.len());
    let (before, after) = lines.split_at(anchor);

    let mut out = Vec::with_capacity(lines.len() + 3);
    out.extend_from_slice(before);
    if before.last().is_some_and(|line| !is_paragraph_break(line)) {
        out.push(BLANK_COMMENT.to_string());
    }
    out.push(comment.to_string());
    if after
        .first()
        .is_some_and(|line| !is_paragraph_break(line) && !is_tag_line(line))
    {
        out.push(BLANK_COMMENT.to_string());
    }
    out.extend_from_slice(after);
    out
}

/// Make `lines` carry the canonical comment for `level`. Returns whether
/// anything changed.
pub fn ensure_compatibility_comment(lines: &mut Vec<String>, level: CompatibilityLevel) -> bool {
    let canonical = canonical_comment(level);
    match find_existing(lines, &canonical) {
        ExistingComment::Current => false,
        ExistingComment::Stale(index) => {
            lines[index] = canonical;
            true
        }
        ExistingComment::Missing => {
            let anchor = find_anchor(lines);
            *lines = splice(lines, anchor, &canonical);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::CompatibilityLevel::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|line| line.to_string()).collect()
    }

    const LEVEL_1_TAG: &str = "// +openshift:compatibility-gen:level=1";

    #[test]
    fn canonical_text() {
        assert_eq!(
            canonical_comment(Level1),
            "// Compatibility level 1: Stable within a major release for a minimum of 12 months or 3 minor releases (whichever is longer)."
        );
        assert_eq!(
            canonical_comment(Level4),
            "// Compatibility level 4: No compatibility is provided, the API can change at any point for any reason. These capabilities should not be used by applications needing long term support."
        );
    }

    #[test]
    fn inserts_before_adjacent_tag_block() {
        let mut decorations = lines(&["// Foo is a thing.", "// ", LEVEL_1_TAG]);
        assert!(ensure_compatibility_comment(&mut decorations, Level1));
        assert_eq!(
            decorations,
            lines(&[
                "// Foo is a thing.",
                "// ",
                &canonical_comment(Level1),
                LEVEL_1_TAG,
            ])
        );
    }

    #[test]
    fn inserts_after_tags_separated_by_blank_line() {
        // The anchor scan stops at the blank line before reaching the tag,
        // so the comment lands after it. This layout is intended.
        let mut decorations = lines(&[LEVEL_1_TAG, "\n"]);
        assert!(ensure_compatibility_comment(&mut decorations, Level1));
        assert_eq!(
            decorations,
            lines(&[LEVEL_1_TAG, "\n", &canonical_comment(Level1)])
        );
    }

    #[test]
    fn tags_only_gets_comment_first() {
        let mut decorations = lines(&[LEVEL_1_TAG, "// +k8s:deepcopy-gen=true"]);
        assert!(ensure_compatibility_comment(&mut decorations, Level1));
        assert_eq!(
            decorations,
            lines(&[
                &canonical_comment(Level1),
                LEVEL_1_TAG,
                "// +k8s:deepcopy-gen=true",
            ])
        );
    }

    #[test]
    fn prose_gets_paragraph_break() {
        let mut decorations = lines(&["// Foo is a thing."]);
        assert!(ensure_compatibility_comment(&mut decorations, Level2));
        assert_eq!(
            decorations,
            lines(&["// Foo is a thing.", "// ", &canonical_comment(Level2)])
        );
    }

    #[test]
    fn tag_between_prose_lines_moves_anchor_past_prose() {
        let mut decorations = lines(&[
            "// Foo is a thing.",
            "// +genclient",
            "// More about Foo.",
        ]);
        assert!(ensure_compatibility_comment(&mut decorations, Level2));
        assert_eq!(
            decorations,
            lines(&[
                "// Foo is a thing.",
                "// ",
                &canonical_comment(Level2),
                "// +genclient",
                "// More about Foo.",
            ])
        );
    }

    #[test]
    fn empty_decorations() {
        let mut decorations = Vec::new();
        assert!(ensure_compatibility_comment(&mut decorations, Level4));
        assert_eq!(decorations, vec![canonical_comment(Level4)]);
    }

    #[test]
    fn stale_comment_replaced_in_place() {
        let mut decorations = lines(&[
            "// Foo is a thing.",
            "// ",
            "// Compatibility level 3: Will attempt to be as compatible from version to version as possible, but version to version compatibility is not guaranteed.",
            LEVEL_1_TAG,
        ]);
        assert!(ensure_compatibility_comment(&mut decorations, Level1));
        assert_eq!(decorations.len(), 4);
        assert_eq!(decorations[2], canonical_comment(Level1));
        assert_eq!(
            decorations
                .iter()
                .filter(|line| line.starts_with(COMPATIBILITY_COMMENT_PREFIX))
                .count(),
            1
        );
    }

    #[test]
    fn second_run_is_a_no_op() {
        let inputs = [
            lines(&[LEVEL_1_TAG, "\n"]),
            lines(&["// Foo is a thing.", LEVEL_1_TAG]),
            lines(&["// Foo is a thing."]),
            lines(&["// A", "\n", "// B", "// +genclient", "// C"]),
            Vec::new(),
        ];
        for input in inputs {
            let mut decorations = input.clone();
            assert!(ensure_compatibility_comment(&mut decorations, Level1));
            let first = decorations.clone();
            assert!(!ensure_compatibility_comment(&mut decorations, Level1));
            assert_eq!(decorations, first, "input {input:?}");
        }
    }

    #[test]
    fn anchor_stops_at_blank_line() {
        let decorations = lines(&["// +genclient", "\n", "// Foo doc."]);
        assert_eq!(find_anchor(&decorations), 3);
        let decorations = lines(&["// +genclient", "\n", "// +k8s:x", "// Foo doc."]);
        assert_eq!(find_anchor(&decorations), 2);
    }

    #[test]
    fn existing_detection() {
        let canonical = canonical_comment(Level1);
        assert_eq!(
            find_existing(&lines(&["// Foo", &canonical]), &canonical),
            ExistingComment::Current
        );
        assert_eq!(
            find_existing(&lines(&["// Foo", "// Compatibility level 2: old"]), &canonical),
            ExistingComment::Stale(1)
        );
        assert_eq!(
            find_existing(&lines(&["// Foo"]), &canonical),
            ExistingComment::Missing
        );
    }

    #[test]
    fn bare_empty_comment_is_a_paragraph_break() {
        let mut decorations = lines(&["// Foo is a thing.", "//", LEVEL_1_TAG]);
        assert!(ensure_compatibility_comment(&mut decorations, Level1));
        assert_eq!(
            decorations,
            lines(&[
                "// Foo is a thing.",
                "//",
                &canonical_comment(Level1),
                LEVEL_1_TAG,
            ])
        );
    }

    #[test]
    fn splice_respects_existing_breaks() {
        let decorations = lines(&["// A", "// ", "// B"]);
        assert_eq!(
            splice(&decorations, 2, "// X"),
            lines(&["// A", "// ", "// X", "// ", "// B"])
        );
        assert_eq!(
            splice(&decorations, 1, "// X"),
            lines(&["// A", "// ", "// X", "// ", "// B"])
        );
    }
}
