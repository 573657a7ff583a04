//! A Go source file as a sequence of untouched lines plus editable
//! decoration spans.
//!
//! Parsing records, for every top-level single-spec type declaration, the
//! comment lines directly above it. A grouped `type ( ... )` block counts
//! when it holds exactly one spec; its decorations are the lines above
//! `type (`. Blocks with several specs are left alone.
//!
//! Decorations are handed out normalized: no `\r`, and whitespace-only lines
//! become `"\n"`. Rendering aligns the (possibly edited) decorations with the
//! raw lines of their span, re-emits matched lines byte for byte, and gives
//! new lines the file's line ending. Every other line is copied verbatim, so
//! a unit that was not edited renders to exactly its input.

use crate::scan::{LineState, is_blank_line, is_comment_line, scan_lines, strip_trailing_comment};
use compatgen_kernel::comment::BLANK_LINE;
use compatgen_kernel::{Declaration, Field, TypeShape};
use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Build directive that older generators leave after the last declaration.
pub const STALE_BUILD_DIRECTIVE: &str = "// +build !ignore_autogenerated";

/// One parsed Go file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    path: PathBuf,
    package: String,
    original: String,
    /// Raw lines, `\r` included.
    lines: Vec<String>,
    trailing_newline: bool,
    /// New lines end in `\r\n` when the first line does.
    crlf: bool,
    /// Parallel to `spans`.
    pub declarations: Vec<Declaration>,
    spans: Vec<Range<usize>>,
    /// Comment lines after the last top-level code line.
    pub trailing: Vec<String>,
    trailing_span: Range<usize>,
}

impl SourceUnit {
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self, String> {
        let path = path.into();
        let trailing_newline = text.ends_with('\n');
        let crlf = text
            .find('\n')
            .is_some_and(|end| text[..end].ends_with('\r'));
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if trailing_newline {
            lines.pop();
        }
        let states = scan_lines(&lines);

        let package = lines
            .iter()
            .zip(&states)
            .filter(|(_, state)| state.is_top_level())
            .find_map(|(line, _)| package_name(line))
            .ok_or_else(|| "missing package clause".to_string())?;

        let mut declarations = Vec::new();
        let mut spans = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            if !states[index].is_top_level() {
                continue;
            }
            let Some(header) = line.strip_prefix("type ") else {
                continue;
            };
            let header = header.trim_start();
            let spec = match header.strip_prefix('(') {
                Some(group) => single_group_spec(&lines, &states, index, group),
                None => split_type_header(header).map(|(name, rest)| (index, name, rest)),
            };
            let Some((spec_line, name, rest)) = spec else {
                continue;
            };
            let shape = parse_shape(&lines, &states, spec_line, rest)?;
            let span = decoration_span(&lines, &states, index);
            declarations.push(Declaration {
                name: name.to_string(),
                shape,
                decorations: lines[span.clone()].iter().map(|l| decoration(l)).collect(),
            });
            spans.push(span);
        }

        let last_code = (0..lines.len())
            .rev()
            .find(|&i| !is_comment_line(&lines[i], states[i]) && !is_blank_line(&lines[i], states[i]));
        let trailing_span = last_code.map_or(0, |i| i + 1)..lines.len();
        let trailing = lines[trailing_span.clone()]
            .iter()
            .map(|l| decoration(l))
            .collect();

        Ok(Self {
            path,
            package,
            original: text.to_string(),
            lines,
            trailing_newline,
            crlf,
            declarations,
            spans,
            trailing,
            trailing_span,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The text the unit was parsed from.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Name from the `package` clause.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Drop the stale `// +build !ignore_autogenerated` directive from the
    /// trailing comments. Returns whether a line was removed.
    pub fn strip_stale_build_directive(&mut self) -> bool {
        let before = self.trailing.len();
        self.trailing.retain(|line| line != STALE_BUILD_DIRECTIVE);
        self.trailing.len() != before
    }

    /// Render the unit back to source text.
    pub fn render(&self) -> String {
        let mut out: Vec<Cow<'_, str>> = Vec::with_capacity(self.lines.len() + 8);
        let mut replacements = self
            .spans
            .iter()
            .zip(&self.declarations)
            .map(|(span, decl)| (span.clone(), decl.decorations.as_slice()))
            .chain(std::iter::once((
                self.trailing_span.clone(),
                self.trailing.as_slice(),
            )))
            .peekable();

        let mut index = 0;
        while index <= self.lines.len() {
            while let Some((span, decorations)) =
                replacements.next_if(|(span, _)| span.start == index)
            {
                out.extend(render_span(&self.lines[span.clone()], decorations, self.crlf));
                index = span.end.max(index);
            }
            if index == self.lines.len() {
                break;
            }
            out.push(Cow::Borrowed(&self.lines[index]));
            index += 1;
        }

        let mut text = out.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }
}

fn package_name(line: &str) -> Option<String> {
    let rest = line.strip_prefix("package ")?;
    let name = strip_trailing_comment(rest).trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The only spec of a `type (` group as (line, name, rest). `group` is the
/// text after the opening parenthesis. Empty groups and groups with more
/// than one spec yield `None`.
fn single_group_spec<'a>(
    lines: &'a [String],
    states: &[LineState],
    type_line: usize,
    group: &'a str,
) -> Option<(usize, &'a str, &'a str)> {
    if states[type_line + 1].depth == 0 {
        // `type ( Foo struct{ A int } )` on one line.
        let inner = group.trim().strip_suffix(')')?;
        let (name, rest) = split_type_header(inner)?;
        return Some((type_line, name, rest));
    }

    let close = (type_line + 1..lines.len()).find(|&i| states[i + 1].depth == 0)?;
    let mut specs = (type_line + 1..=close).filter(|&i| {
        let state = states[i];
        state.depth == 1
            && !is_comment_line(&lines[i], state)
            && !is_blank_line(&lines[i], state)
            && !state.in_raw_string
            && !state.in_block_comment
            && !lines[i].trim_start().starts_with(')')
    });
    let spec_line = specs.next()?;
    if specs.next().is_some() {
        return None;
    }
    let (name, rest) = split_type_header(&lines[spec_line])?;
    Some((spec_line, name, rest))
}

/// `Name[T any] struct {` → (`Name`, `struct {`). A header that does not
/// start with an identifier yields `None`.
fn split_type_header(header: &str) -> Option<(&str, &str)> {
    let header = header.trim_start();
    let end = header
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(header.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    let (name, mut rest) = header.split_at(end);
    if rest.starts_with('[') {
        let mut depth = 0usize;
        let mut close = None;
        for (i, c) in rest.char_indices() {
            match c {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        rest = &rest[close? + 1..];
    }
    Some((name, rest.trim()))
}

fn is_struct_header(rest: &str) -> bool {
    rest.strip_prefix("struct")
        .is_some_and(|after| after.starts_with('{') || after.starts_with(char::is_whitespace))
}

fn parse_shape(
    lines: &[String],
    states: &[LineState],
    type_line: usize,
    rest: &str,
) -> Result<TypeShape, String> {
    if !is_struct_header(rest) {
        return Ok(TypeShape::Other);
    }

    let base = states[type_line].depth;
    if states[type_line + 1].depth == base {
        // Single-line struct: `struct{}` or `struct{ A int; B string }`.
        let code = strip_trailing_comment(rest);
        let inner = match (code.find('{'), code.rfind('}')) {
            (Some(open), Some(close)) if open < close => &code[open + 1..close],
            _ => "",
        };
        let fields = inner.split(';').filter_map(parse_field).collect();
        return Ok(TypeShape::Struct { fields });
    }

    let end = (type_line + 1..lines.len())
        .find(|&i| states[i + 1].depth == base)
        .ok_or_else(|| format!("line {}: unterminated struct", type_line + 1))?;

    let fields = (type_line + 1..end)
        .filter(|&i| {
            states[i].depth == base + 1 && !states[i].in_raw_string && !states[i].in_block_comment
        })
        .filter_map(|i| parse_field(&lines[i]))
        .collect();
    Ok(TypeShape::Struct { fields })
}

/// One field line: `A, B int`, `Spec FooSpec`, or an embedded `pkg.Type`.
fn parse_field(line: &str) -> Option<Field> {
    let code = strip_trailing_comment(line).trim();
    if code.is_empty() || code.starts_with('}') {
        return None;
    }
    let tokens: Vec<&str> = code.split_whitespace().collect();
    if tokens.len() == 1 {
        return Some(Field::embedded(tokens[0]));
    }
    let last_name = tokens.iter().position(|token| !token.ends_with(','))?;
    let names = tokens[..=last_name]
        .join("")
        .split(',')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    Some(Field {
        names,
        type_expr: tokens[last_name + 1..].join(" "),
    })
}

/// Comment and blank lines directly above `type_line`, without leading
/// blank lines.
fn decoration_span(lines: &[String], states: &[LineState], type_line: usize) -> Range<usize> {
    let mut start = type_line;
    while start > 0 {
        let prev = start - 1;
        if is_comment_line(&lines[prev], states[prev]) || is_blank_line(&lines[prev], states[prev]) {
            start = prev;
        } else {
            break;
        }
    }
    while start < type_line && is_blank_line(&lines[start], states[start]) {
        start += 1;
    }
    start..type_line
}

/// A raw line as the kernel sees it.
fn normalized(raw: &str) -> &str {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    if line.trim().is_empty() {
        BLANK_LINE
    } else {
        line
    }
}

fn decoration(line: &str) -> String {
    normalized(line).to_string()
}

/// Pair each decoration with the raw line it came from, if any, keeping
/// order (longest common subsequence on normalized text).
fn align(raw: &[String], decorations: &[String]) -> Vec<Option<usize>> {
    let (n, m) = (raw.len(), decorations.len());
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if normalized(&raw[i]) == decorations[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut pairs = vec![None; m];
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if normalized(&raw[i]) == decorations[j] {
            pairs[j] = Some(i);
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}

fn render_span<'a>(raw: &'a [String], decorations: &'a [String], crlf: bool) -> Vec<Cow<'a, str>> {
    align(raw, decorations)
        .into_iter()
        .zip(decorations)
        .map(|(matched, line)| match matched {
            Some(i) => Cow::Borrowed(raw[i].as_str()),
            None => {
                let text = if line == BLANK_LINE { "" } else { line.as_str() };
                if crlf {
                    Cow::Owned(format!("{text}\r"))
                } else {
                    Cow::Borrowed(text)
                }
            }
        })
        .collect()
}
