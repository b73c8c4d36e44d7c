//! `EscapeDollarAndQuote` (spec.md §4.5): the target uses `$` to
//! introduce string interpolation, so a literal `$` or `"` inside a
//! non-interpolated string segment must be backslash-escaped before
//! emission, since the source's own escaping rules differ.

use sk_ast::{Expression, ExpressionKind, InterpolationSegment};
use sk_pass::{walk, Parents, Pass};

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '$' || c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub struct EscapeDollarAndQuote;

impl Pass for EscapeDollarAndQuote {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let mut expr = walk::default_expression(self, expr, parents);
        match &mut expr.payload {
            ExpressionKind::StringLiteral { value, .. } => {
                *value = escape(value).into();
            }
            ExpressionKind::InterpolatedString(segments) => {
                for seg in segments.iter_mut() {
                    if let InterpolationSegment::Literal(text) = seg {
                        *text = escape(text).into();
                    }
                }
            }
            _ => {}
        }
        expr
    }
}
