//! Lowers an `Expression` into a `Doc` (spec.md §4.7). Operator
//! precedence and associativity are never re-derived here -- the AST's
//! nesting already reflects it (see `sk_ast::expr`'s module doc), so
//! this module only ever renders the shape it's handed.

use sk_ast::{Expression, ExpressionKind, InterpolationSegment, LabeledExpression};

use crate::doc::{self, concat, empty, group, if_break, indent, join, text, Doc};
use crate::literals;
use crate::printer::LINE_LIMIT;
use crate::typestr::translate_type;

fn leaf(e: &Expression, rendered: String) -> Doc {
    doc::text_with_range(rendered, e.range)
}

/// The connector and base doc for a dot/subscript receiver: an
/// `OptionalChain` wrapper becomes `?.`/`?.get(...)` instead of
/// double-rendering the `?`.
fn receiver(e: &Expression) -> (Doc, bool) {
    match &e.payload {
        ExpressionKind::OptionalChain(inner) => (expr_doc(inner), true),
        _ => (expr_doc(e), false),
    }
}

fn labeled_arg(arg: &LabeledExpression) -> Doc {
    match &arg.label {
        Some(label) => concat(vec![text(format!("{label} = ")), expr_doc(&arg.expression)]),
        None => expr_doc(&arg.expression),
    }
}

/// Renders a parenthesized, comma-joined argument list as a `Group` so
/// the printer can break it out one-argument-per-line if it would
/// otherwise exceed the line limit (spec.md §4.7's line-limit heuristic).
fn arg_list(open: &str, args: &[LabeledExpression], close: &str) -> Doc {
    if args.is_empty() {
        return text(format!("{open}{close}"));
    }
    let items: Vec<Doc> = args.iter().map(labeled_arg).collect();
    group(concat(vec![
        text(open.to_string()),
        indent(concat(vec![
            if_break(empty(), doc::hardline()),
            join(items, if_break(text(", "), concat(vec![text(","), doc::hardline()]))),
        ])),
        if_break(empty(), doc::hardline()),
        text(close.to_string()),
    ]))
}

fn is_word_operator(op: &str) -> bool {
    op.chars().next().map(|c| c.is_alphabetic()).unwrap_or(false)
}

pub fn expr_doc(e: &Expression) -> Doc {
    match &e.payload {
        ExpressionKind::LiteralCode { code, .. } => leaf(e, code.to_string()),

        ExpressionKind::Concatenation(a, b) => concat(vec![expr_doc(a), expr_doc(b)]),

        ExpressionKind::Parentheses(inner) => concat(vec![text("("), expr_doc(inner), text(")")]),

        ExpressionKind::ForceUnwrap(inner) => concat(vec![expr_doc(inner), text("!!")]),

        ExpressionKind::OptionalChain(inner) => concat(vec![expr_doc(inner), text("?")]),

        ExpressionKind::DeclarationReference { name, .. } => leaf(e, name.to_string()),

        ExpressionKind::TypeReference { type_name } => leaf(e, translate_type(type_name)),

        ExpressionKind::Subscript { subscripted, indices, .. } => {
            let (base, is_optional) = receiver(subscripted);
            if is_optional {
                concat(vec![base, text("?.get"), arg_list("(", indices, ")")])
            } else {
                let items: Vec<Doc> = indices.iter().map(labeled_arg).collect();
                concat(vec![base, text("["), join(items, text(", ")), text("]")])
            }
        }

        ExpressionKind::Array { elements, .. } => {
            if elements.is_empty() {
                text("mutableListOf()")
            } else {
                let items: Vec<Doc> = elements.iter().map(expr_doc).collect();
                concat(vec![text("mutableListOf("), join(items, text(", ")), text(")")])
            }
        }

        ExpressionKind::Dictionary { entries, .. } => {
            if entries.is_empty() {
                text("mutableMapOf()")
            } else {
                let items: Vec<Doc> = entries
                    .iter()
                    .map(|(k, v)| concat(vec![expr_doc(k), text(" to "), expr_doc(v)]))
                    .collect();
                concat(vec![text("mutableMapOf("), join(items, text(", ")), text(")")])
            }
        }

        ExpressionKind::ReturnExpression(value) => match value {
            Some(v) => concat(vec![text("return "), expr_doc(v)]),
            None => text("return"),
        },

        ExpressionKind::Dot { receiver: recv, member, .. } => {
            let (base, is_optional) = receiver(recv);
            concat(vec![base, text(if is_optional { "?." } else { "." }), text(member.to_string())])
        }

        ExpressionKind::BinaryOp { operator, lhs, rhs, .. } => {
            concat(vec![expr_doc(lhs), text(format!(" {operator} ")), expr_doc(rhs)])
        }

        ExpressionKind::PrefixUnary { operator, operand, .. } => {
            if is_word_operator(operator) {
                concat(vec![text(format!("{operator} ")), expr_doc(operand)])
            } else {
                concat(vec![text(operator.to_string()), expr_doc(operand)])
            }
        }

        ExpressionKind::PostfixUnary { operator, operand, type_name } => match type_name {
            Some(t) => concat(vec![expr_doc(operand), text(format!(" {operator} ")), text(translate_type(t))]),
            None => concat(vec![expr_doc(operand), text(format!(" {operator}"))]),
        },

        ExpressionKind::TernaryIf { condition, then_expr, else_expr, .. } => group(concat(vec![
            text("if ("),
            expr_doc(condition),
            text(") "),
            expr_doc(then_expr),
            text(" else "),
            expr_doc(else_expr),
        ])),

        ExpressionKind::Call { function, arguments, allows_trailing_closure, .. } => {
            let trailing = *allows_trailing_closure
                && matches!(arguments.last(), Some(a) if matches!(&a.expression.payload, ExpressionKind::Closure { is_trailing: true, .. }));
            if trailing {
                let (head, closure) = arguments.split_at(arguments.len() - 1);
                let closure_doc = expr_doc(&closure[0].expression);
                concat(vec![expr_doc(function), arg_list("(", head, ")"), text(" "), closure_doc])
            } else {
                concat(vec![expr_doc(function), arg_list("(", arguments, ")")])
            }
        }

        ExpressionKind::Closure { parameters, body, .. } => {
            let header = if parameters.is_empty() {
                empty()
            } else {
                concat(vec![text(parameters.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", ")), text(" ->")])
            };
            concat(vec![
                text("{"),
                header,
                indent(concat(vec![doc::hardline(), crate::stmt::statements_doc(body)])),
                doc::hardline(),
                text("}"),
            ])
        }

        ExpressionKind::IntLiteral { value, radix, .. } => leaf(e, literals::render_int(*value, *radix)),
        ExpressionKind::UIntLiteral { value, radix, .. } => leaf(e, literals::render_uint(*value, *radix)),
        ExpressionKind::DoubleLiteral(v) => leaf(e, literals::render_double(*v)),
        ExpressionKind::FloatLiteral(v) => leaf(e, literals::render_float(*v)),
        ExpressionKind::BoolLiteral(v) => leaf(e, literals::render_bool(*v).to_string()),
        ExpressionKind::StringLiteral { value, is_multiline } => leaf(e, literals::render_string(value, *is_multiline)),
        ExpressionKind::CharLiteral(c) => leaf(e, literals::render_char(*c)),
        ExpressionKind::NilLiteral => leaf(e, "null".to_string()),

        ExpressionKind::InterpolatedString(segments) => {
            let mut parts = vec![text("\"")];
            for seg in segments {
                match seg {
                    InterpolationSegment::Literal(s) => parts.push(text(literals::escape_string_body(s))),
                    InterpolationSegment::Expression(inner) => {
                        parts.push(text("${"));
                        parts.push(expr_doc(inner));
                        parts.push(text("}"));
                    }
                }
            }
            parts.push(text("\""));
            concat(parts)
        }

        ExpressionKind::Tuple(elements) => {
            let items: Vec<Doc> = elements.iter().map(labeled_arg).collect();
            concat(vec![text("("), join(items, text(", ")), text(")")])
        }

        ExpressionKind::Error { message } => leaf(e, format!("TODO(\"unresolved: {message}\")")),
    }
}

/// Width this expression would occupy rendered flat, used by callers
/// deciding whether an enclosing construct needs to break (mirrors
/// `printer::measure_flat`, kept separate since it operates pre-Doc).
pub const SIGNATURE_LINE_LIMIT: usize = LINE_LIMIT;
