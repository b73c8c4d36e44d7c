//! The translation buffer: a lazy tree of string fragments that resolves
//! into output text plus a line-map back to source positions.
//!
//! Kept as an owned tree of `Leaf`/`Node` variants rather than a tree of
//! shared string fragments -- the non-destructive operations the emitter
//! needs (`append`, `drop_last`, `append_translations`) read naturally as
//! methods on an owned value.

use std::fmt;

use sk_ast::SourceRange;

/// A position in the *output* text, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn start() -> Self {
        Self { line: 1, col: 1 }
    }

    /// Advance past `s`, incrementing the column per non-newline character
    /// and resetting to column 1 with the line incremented on `\n`.
    pub fn advance(mut self, s: &str) -> Self {
        for ch in s.chars() {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self
    }

    fn advance_mut(&mut self, s: &str) {
        *self = self.advance(s);
    }
}

/// One line-map entry: an output range paired with the source range that
/// produced it, in the exact colon-separated layout the core promises as
/// part of its external output contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMapEntry {
    pub out_line: u32,
    pub out_col: u32,
    pub out_line_end: u32,
    pub out_col_end: u32,
    pub src_line: u32,
    pub src_col: u32,
    pub src_line_end: u32,
    pub src_col_end: u32,
}

impl fmt::Display for LineMapEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}:{}:{}:{}",
            self.out_line,
            self.out_col,
            self.out_line_end,
            self.out_col_end,
            self.src_line,
            self.src_col,
            self.src_line_end,
            self.src_col_end,
        )
    }
}

/// Failure returned by [`Translation::drop_last`] when the trailing
/// literal to remove isn't actually there.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no trailing literal {0:?} to drop")]
pub struct DropLastError(pub String);

#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Leaf(String, Option<SourceRange>),
    Node(Vec<Translation>, Option<SourceRange>),
}

impl Translation {
    pub fn empty() -> Self {
        Translation::Node(Vec::new(), None)
    }

    pub fn leaf(s: impl Into<String>) -> Self {
        Translation::Leaf(s.into(), None)
    }

    pub fn leaf_with_range(s: impl Into<String>, range: SourceRange) -> Self {
        Translation::Leaf(s.into(), Some(range))
    }

    pub fn node_with_range(children: Vec<Translation>, range: SourceRange) -> Self {
        Translation::Node(children, Some(range))
    }

    fn children_mut(&mut self) -> &mut Vec<Translation> {
        match self {
            Translation::Node(children, _) => children,
            Translation::Leaf(..) => {
                panic!("append called on a Translation::Leaf -- build from Translation::empty()")
            }
        }
    }

    /// Append a string or another translation as the last child.
    pub fn append(&mut self, child: impl Into<Translation>) {
        self.children_mut().push(child.into());
    }

    /// Append each item from `items`, inserting `separator` between
    /// consecutive entries.
    pub fn append_translations(&mut self, items: Vec<Translation>, separator: &str) {
        let mut first = true;
        for item in items {
            if !first {
                self.append(separator.to_string());
            }
            first = false;
            self.append(item);
        }
    }

    /// Remove a trailing literal string equal to `s`, if the last child is
    /// exactly that literal leaf. Fails if the last child is absent, is a
    /// `Node`, or is a leaf with different text.
    pub fn drop_last(&mut self, s: &str) -> Result<(), DropLastError> {
        let children = self.children_mut();
        match children.last() {
            Some(Translation::Leaf(text, None)) if text == s => {
                children.pop();
                Ok(())
            }
            _ => Err(DropLastError(s.to_string())),
        }
    }

    /// True iff every leaf in the tree is the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Translation::Leaf(s, _) => s.is_empty(),
            Translation::Node(children, _) => children.iter().all(Translation::is_empty),
        }
    }

    /// Resolve the tree into output text and its line-map, walking leaves
    /// in order and emitting one line-map entry per node that carries a
    /// source range.
    pub fn resolve(&self) -> (String, Vec<LineMapEntry>) {
        let mut out = String::new();
        let mut pos = Position::start();
        let mut entries = Vec::new();
        self.walk(&mut out, &mut pos, &mut entries);
        (out, entries)
    }

    fn walk(&self, out: &mut String, pos: &mut Position, entries: &mut Vec<LineMapEntry>) {
        let start = *pos;
        match self {
            Translation::Leaf(s, range) => {
                out.push_str(s);
                pos.advance_mut(s);
                if let Some(r) = range {
                    entries.push(line_map_entry(start, *pos, r));
                }
            }
            Translation::Node(children, range) => {
                for child in children {
                    child.walk(out, pos, entries);
                }
                if let Some(r) = range {
                    entries.push(line_map_entry(start, *pos, r));
                }
            }
        }
    }
}

fn line_map_entry(start: Position, end: Position, src: &SourceRange) -> LineMapEntry {
    LineMapEntry {
        out_line: start.line,
        out_col: start.col,
        out_line_end: end.line,
        out_col_end: end.col,
        src_line: src.line_start,
        src_col: src.col_start,
        src_line_end: src.line_end,
        src_col_end: src.col_end,
    }
}

impl From<&str> for Translation {
    fn from(s: &str) -> Self {
        Translation::leaf(s)
    }
}

impl From<String> for Translation {
    fn from(s: String) -> Self {
        Translation::leaf(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_associative_over_concatenation() {
        let p = Position::start();
        let s = "hello\nworld";
        let t = " !\n";
        assert_eq!(p.advance(s).advance(t), p.advance(&format!("{s}{t}")));
    }

    #[test]
    fn advance_resets_column_on_newline() {
        let p = Position::start().advance("ab\ncd");
        assert_eq!(p, Position { line: 2, col: 3 });
    }

    #[test]
    fn resolve_concatenates_leaves_in_order() {
        let mut t = Translation::empty();
        t.append("fun f() {\n");
        t.append("    return 1\n");
        t.append("}");
        let (text, _) = t.resolve();
        assert_eq!(text, "fun f() {\n    return 1\n}");
    }

    #[test]
    fn resolve_length_equals_sum_of_leaf_lengths() {
        let mut t = Translation::empty();
        t.append("abc");
        let mut inner = Translation::empty();
        inner.append("de");
        inner.append("fgh");
        t.append(inner);
        let (text, _) = t.resolve();
        assert_eq!(text.len(), "abc".len() + "de".len() + "fgh".len());
    }

    #[test]
    fn drop_last_removes_matching_trailing_literal() {
        let mut t = Translation::empty();
        t.append("a, ");
        t.append("b, ");
        t.drop_last("b, ").unwrap();
        let (text, _) = t.resolve();
        assert_eq!(text, "a, ");
    }

    #[test]
    fn drop_last_fails_when_absent() {
        let mut t = Translation::empty();
        t.append("a");
        assert_eq!(t.drop_last("z"), Err(DropLastError("z".to_string())));
    }

    #[test]
    fn is_empty_true_for_all_empty_leaves() {
        let mut t = Translation::empty();
        t.append("");
        let mut inner = Translation::empty();
        inner.append("");
        t.append(inner);
        assert!(t.is_empty());
        t.append("x");
        assert!(!t.is_empty());
    }

    #[test]
    fn line_map_entry_display_matches_colon_layout() {
        let entry = LineMapEntry {
            out_line: 1,
            out_col: 2,
            out_line_end: 1,
            out_col_end: 5,
            src_line: 10,
            src_col: 3,
            src_line_end: 10,
            src_col_end: 9,
        };
        assert_eq!(entry.to_string(), "1:2:1:5:10:3:10:9");
    }

    #[test]
    fn resolve_emits_entry_for_ranged_leaf() {
        let mut t = Translation::empty();
        t.append(Translation::leaf_with_range(
            "x",
            SourceRange::new(3, 1, 3, 2),
        ));
        let (_, entries) = t.resolve();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].src_line, 3);
    }
}
