//! Operator rewrites (spec.md §4.5): renaming operators whose target
//! spelling differs from the source's, and conditional-cast operators
//! that have to drop a redundant nested optional-chain wrapper.

use sk_ast::{Expression, ExpressionKind, Node};
use sk_pass::{walk, Parents, Pass};

fn renamed_operator(op: &str) -> Option<&'static str> {
    match op {
        "??" => Some("?:"),
        "..<" => Some("until"),
        "..." => Some(".."),
        _ => None,
    }
}

/// Renames a small fixed set of source operators to their target
/// spelling. Most operators pass through unchanged; this only covers
/// the ones that differ.
pub struct RenameOperators;

impl Pass for RenameOperators {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let mut expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::BinaryOp { operator, .. } = &mut expr.payload {
            if let Some(renamed) = renamed_operator(operator) {
                *operator = renamed.into();
            }
        }
        expr
    }
}

/// A conditional cast (`as?`) of a receiver that is itself already
/// optional-chained produces a doubly-optional value the target
/// disallows; this unwraps the redundant inner chain, since the cast
/// already propagates the outer optionality.
pub struct OptionalsInConditionalCasts;

impl Pass for OptionalsInConditionalCasts {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let mut expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::PostfixUnary { operator, operand, .. } = &mut expr.payload {
            if operator == "as?" {
                if let ExpressionKind::OptionalChain(inner) = &operand.payload {
                    *operand = inner.clone();
                }
            }
        }
        expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_coalescing_operator_is_renamed() {
        let mut pass = RenameOperators;
        let mut parents = Parents::new();
        let expr = Node::new(ExpressionKind::BinaryOp {
            operator: "??".into(),
            lhs: Box::new(Node::new(ExpressionKind::NilLiteral)),
            rhs: Box::new(Node::new(ExpressionKind::NilLiteral)),
            type_name: None,
        });
        let result = pass.replace_expression(expr, &mut parents);
        assert!(matches!(&result.payload, ExpressionKind::BinaryOp { operator, .. } if operator == "?:"));
    }

    #[test]
    fn half_open_range_operator_is_renamed_to_until() {
        assert_eq!(renamed_operator("..<"), Some("until"));
        assert_eq!(renamed_operator("+"), None);
    }

    #[test]
    fn redundant_optional_chain_under_conditional_cast_is_unwrapped() {
        let mut pass = OptionalsInConditionalCasts;
        let mut parents = Parents::new();
        let expr = Node::new(ExpressionKind::PostfixUnary {
            operator: "as?".into(),
            operand: Box::new(Node::new(ExpressionKind::OptionalChain(Box::new(Node::new(
                ExpressionKind::DeclarationReference {
                    name: "x".into(),
                    type_name: None,
                    is_standard_library: false,
                },
            ))))),
            type_name: None,
        });
        let result = pass.replace_expression(expr, &mut parents);
        if let ExpressionKind::PostfixUnary { operand, .. } = &result.payload {
            assert!(matches!(operand.payload, ExpressionKind::DeclarationReference { .. }));
        } else {
            panic!("expected a PostfixUnary");
        }
    }
}
