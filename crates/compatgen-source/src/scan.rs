//! Line-level lexical state for Go source.
//!
//! The reader never builds a syntax tree. It only needs to know, for each
//! line, whether it starts at top level and whether it starts inside a raw
//! string or a block comment. Those facts fall out of a single pass that
//! tracks bracket nesting while skipping comments and literals.

/// Lexical state at the start of a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineState {
    /// Combined nesting of `{}`, `()` and `[]`.
    pub depth: usize,
    pub in_raw_string: bool,
    pub in_block_comment: bool,
}

impl LineState {
    /// True when the line starts outside every bracket and literal.
    pub fn is_top_level(&self) -> bool {
        self.depth == 0 && !self.in_raw_string && !self.in_block_comment
    }

    fn in_literal_or_comment(&self) -> bool {
        self.in_raw_string || self.in_block_comment
    }
}

/// State at the start of every line, followed by the state at end of input.
///
/// The result has `lines.len() + 1` entries.
pub fn scan_lines<S: AsRef<str>>(lines: &[S]) -> Vec<LineState> {
    let mut states = Vec::with_capacity(lines.len() + 1);
    let mut state = LineState::default();
    for line in lines {
        states.push(state);
        state = advance(state, line.as_ref());
    }
    states.push(state);
    states
}

fn advance(mut state: LineState, line: &str) -> LineState {
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if state.in_block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                state.in_block_comment = false;
            }
            continue;
        }
        if state.in_raw_string {
            if c == '`' {
                state.in_raw_string = false;
            }
            continue;
        }
        match c {
            '/' if chars.peek() == Some(&'/') => break,
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                state.in_block_comment = true;
            }
            '`' => state.in_raw_string = true,
            '"' | '\'' => skip_quoted(&mut chars, c),
            '{' | '(' | '[' => state.depth += 1,
            '}' | ')' | ']' => state.depth = state.depth.saturating_sub(1),
            _ => {}
        }
    }
    state
}

// Interpreted strings and runes end on the same line.
fn skip_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, quote: char) {
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            c if c == quote => return,
            _ => {}
        }
    }
}

/// True for a line that holds nothing but a `//` comment, given the state at
/// its start.
pub fn is_comment_line(line: &str, state: LineState) -> bool {
    !state.in_literal_or_comment() && line.trim_start().starts_with("//")
}

pub fn is_blank_line(line: &str, state: LineState) -> bool {
    !state.in_literal_or_comment() && line.trim().is_empty()
}

/// Text of `line` before any struct tag, `//` or `/*` comment.
pub fn strip_trailing_comment(line: &str) -> &str {
    let mut end = line.len();
    for marker in ["`", "//", "/*"] {
        if let Some(index) = line.find(marker) {
            end = end.min(index);
        }
    }
    &line[..end]
}
