//! Renders a [`Doc`] tree to a [`sk_buffer::Translation`], deciding at
//! each `Group` boundary whether to lay it out flat or broken.
//!
//! Grounded in `snow-fmt::printer`'s stack-based Wadler-Lindig printer:
//! the same flat-width-measurement-then-push-a-mode-onto-the-stack
//! approach, adapted to build a provenance-carrying `Translation` tree
//! instead of a bare `String`, and to stop short of true recursive
//! fixed-pointing -- each `Group` here is decided once, per spec.md
//! §4.7's "a single 'try flat' pass followed by, if over limit, a single
//! 'break out' pass".

use sk_buffer::Translation;

use crate::doc::Doc;

/// A call or function signature laid out flat beyond this many columns
/// is re-emitted broken (spec.md §4.7: "~100 characters").
pub const LINE_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

struct Cmd<'a> {
    indent: usize,
    mode: Mode,
    doc: &'a Doc,
}

/// Renders `doc` into a `Translation`, indenting with `indentation_string`
/// repeated once per nesting level.
pub fn print(doc: &Doc, indentation_string: &str) -> Translation {
    let mut out = Translation::empty();
    let mut col: usize = 0;
    let mut stack: Vec<Cmd> = vec![Cmd { indent: 0, mode: Mode::Break, doc }];

    while let Some(cmd) = stack.pop() {
        match cmd.doc {
            Doc::Empty => {}

            Doc::Text(s, range) => {
                match range {
                    Some(r) => out.append(Translation::leaf_with_range(s.clone(), *r)),
                    None => out.append(s.clone()),
                }
                col += s.len();
            }

            Doc::Space => match cmd.mode {
                Mode::Flat => {
                    out.append(" ");
                    col += 1;
                }
                Mode::Break => {
                    let line = newline_and_indent(cmd.indent, indentation_string);
                    col = line.len() - line.rfind('\n').map(|i| i + 1).unwrap_or(0);
                    out.append(line);
                }
            },

            Doc::Hardline => {
                let line = newline_and_indent(cmd.indent, indentation_string);
                col = line.len() - line.rfind('\n').map(|i| i + 1).unwrap_or(0);
                out.append(line);
            }

            Doc::BlankLine => {
                let mut line = String::from("\n");
                line.push_str(&newline_and_indent(cmd.indent, indentation_string));
                col = line.len() - line.rfind('\n').map(|i| i + 1).unwrap_or(0);
                out.append(line);
            }

            Doc::Indent(child) => {
                stack.push(Cmd { indent: cmd.indent + 1, mode: cmd.mode, doc: child });
            }

            Doc::Group(child) => {
                let flat_width = measure_flat(child);
                let mode = if col + flat_width <= LINE_LIMIT { Mode::Flat } else { Mode::Break };
                stack.push(Cmd { indent: cmd.indent, mode, doc: child });
            }

            Doc::IfBreak { flat, broken } => match cmd.mode {
                Mode::Flat => stack.push(Cmd { indent: cmd.indent, mode: cmd.mode, doc: flat }),
                Mode::Break => stack.push(Cmd { indent: cmd.indent, mode: cmd.mode, doc: broken }),
            },

            Doc::Concat(parts) => {
                for part in parts.iter().rev() {
                    stack.push(Cmd { indent: cmd.indent, mode: cmd.mode, doc: part });
                }
            }
        }
    }

    out
}

fn newline_and_indent(level: usize, indentation_string: &str) -> String {
    let mut s = String::from("\n");
    s.push_str(&indentation_string.repeat(level));
    s
}

/// Width of `doc` if rendered entirely flat, ignoring indentation (a
/// flat group never breaks internally).
fn measure_flat(doc: &Doc) -> usize {
    match doc {
        Doc::Empty => 0,
        Doc::Text(s, _) => s.len(),
        Doc::Space => 1,
        Doc::Hardline | Doc::BlankLine => usize::MAX / 2,
        Doc::Indent(child) => measure_flat(child),
        Doc::Group(child) => measure_flat(child),
        Doc::IfBreak { flat, .. } => measure_flat(flat),
        Doc::Concat(parts) => parts.iter().map(measure_flat).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::*;

    #[test]
    fn short_group_renders_flat() {
        let doc = group(concat(vec![text("f("), text("a"), text(", "), text("b"), text(")")]));
        let t = print(&doc, "    ");
        let (s, _) = t.resolve();
        assert_eq!(s, "f(a, b)");
    }

    #[test]
    fn a_hardline_forces_an_indented_newline_regardless_of_group_mode() {
        let doc = concat(vec![text("{"), indent(concat(vec![hardline(), text("x")])), hardline(), text("}")]);
        let t = print(&doc, "  ");
        let (s, _) = t.resolve();
        assert_eq!(s, "{\n  x\n}");
    }

    #[test]
    fn blank_line_inserts_one_empty_line_between_statements() {
        let doc = concat(vec![text("a"), blank_line(), text("b")]);
        let t = print(&doc, "  ");
        let (s, _) = t.resolve();
        assert_eq!(s, "a\n\nb");
    }

    #[test]
    fn a_group_whose_flat_width_exceeds_the_limit_breaks() {
        let long_arg = "x".repeat(LINE_LIMIT);
        let doc = group(concat(vec![text("f("), text(long_arg.clone()), if_break(empty(), hardline()), text(")")]));
        let t = print(&doc, "  ");
        let (s, _) = t.resolve();
        assert!(s.contains('\n'));
        assert!(s.contains(&long_arg));
    }
}
