use std::fmt;

/// A 1-indexed, half-open source region: `[start, end)`.
///
/// Attached to most AST nodes for diagnostics and for the emitter's
/// line-map. Synthesized nodes (produced by a pass rather than the
/// frontend) may carry no range at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SourceRange {
    pub line_start: u32,
    pub col_start: u32,
    pub line_end: u32,
    pub col_end: u32,
}

impl SourceRange {
    pub fn new(line_start: u32, col_start: u32, line_end: u32, col_end: u32) -> Self {
        Self {
            line_start,
            col_start,
            line_end,
            col_end,
        }
    }

    /// A zero-width range at a single position, useful for synthesized
    /// nodes that still want to point somewhere for diagnostics.
    pub fn point(line: u32, col: u32) -> Self {
        Self::new(line, col, line, col)
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.line_start, self.col_start, self.line_end, self.col_end
        )
    }
}

/// An opaque handle into the frontend's own syntax tree.
///
/// The core never interprets this value; it is forwarded verbatim to the
/// index oracle (`IndexOracle::get_parent_type`) and is ignored by
/// structural equality on AST nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SyntaxHandle(pub u64);
