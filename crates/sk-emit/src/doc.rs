//! A small Wadler-Lindig-style document IR, the intermediate
//! representation between AST-to-doc lowering (`stmt`/`expr`) and the
//! printer. Mirrors the source range so the printer can hand finished
//! text straight to a [`sk_buffer::Translation`] leaf.

use sk_ast::SourceRange;

/// A document node. The printer decides at each `Group` boundary
/// whether to render flat (all on one line) or broken (params each on
/// their own indented line), per the line-limit heuristic.
#[derive(Debug, Clone)]
pub enum Doc {
    /// Literal text, optionally tied back to the source range it came
    /// from (carried through to the output line-map).
    Text(String, Option<SourceRange>),
    /// A space in flat mode, a newline + indent in broken mode.
    Space,
    /// Always a newline + current indentation.
    Hardline,
    /// Two hardlines; used between top-level statements that need a
    /// blank line separating them.
    BlankLine,
    Indent(Box<Doc>),
    /// Try flat; if the flattened width exceeds the configured line
    /// limit, render broken instead. This is a single try-then-break
    /// decision, not a recursive fixed point -- nested groups are each
    /// measured independently, but a group itself never re-measures
    /// after choosing a mode.
    Group(Box<Doc>),
    IfBreak {
        flat: Box<Doc>,
        broken: Box<Doc>,
    },
    Concat(Vec<Doc>),
    Empty,
}

pub fn text(s: impl Into<String>) -> Doc {
    Doc::Text(s.into(), None)
}

pub fn text_with_range(s: impl Into<String>, range: Option<SourceRange>) -> Doc {
    Doc::Text(s.into(), range)
}

pub fn space() -> Doc {
    Doc::Space
}

pub fn hardline() -> Doc {
    Doc::Hardline
}

pub fn blank_line() -> Doc {
    Doc::BlankLine
}

pub fn indent(doc: Doc) -> Doc {
    Doc::Indent(Box::new(doc))
}

pub fn group(doc: Doc) -> Doc {
    Doc::Group(Box::new(doc))
}

pub fn if_break(flat: Doc, broken: Doc) -> Doc {
    Doc::IfBreak {
        flat: Box::new(flat),
        broken: Box::new(broken),
    }
}

pub fn concat(parts: Vec<Doc>) -> Doc {
    Doc::Concat(parts)
}

pub fn empty() -> Doc {
    Doc::Empty
}

/// Joins `parts` with `sep` between consecutive entries (no trailing
/// separator), the doc-level equivalent of `Translation::append_translations`.
pub fn join(parts: Vec<Doc>, sep: Doc) -> Doc {
    let mut out = Vec::with_capacity(parts.len() * 2);
    let mut first = true;
    for part in parts {
        if !first {
            out.push(sep.clone());
        }
        first = false;
        out.push(part);
    }
    Doc::Concat(out)
}
