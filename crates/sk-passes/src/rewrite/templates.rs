//! Replace templates -- must run first among the rewrite passes so that
//! subsequent passes never see a source-only call form a template was
//! meant to erase (spec.md §4.5).

use sk_ast::{Expression, ExpressionKind, Statement};
use sk_ctx::Context;
use sk_pass::{walk, Parents, Pass};

fn call_pattern_key(expr: &ExpressionKind) -> Option<String> {
    let ExpressionKind::Call { function, arguments, .. } = expr else {
        return None;
    };
    let name = match &function.payload {
        ExpressionKind::DeclarationReference { name, .. } => name.as_str(),
        ExpressionKind::Dot { member, .. } => member.as_str(),
        _ => return None,
    };
    let labels: String = arguments
        .iter()
        .map(|a| format!("{}:", a.label.as_deref().unwrap_or("_")))
        .collect();
    Some(format!("{name}({labels})"))
}

pub struct ReplaceTemplates<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for ReplaceTemplates<'_> {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let expr = walk::default_expression(self, expr, parents);
        if let Some(key) = call_pattern_key(&expr.payload) {
            if let Some(snippet) = self.ctx.lookup_template(&key) {
                return sk_ast::Node::with_provenance(
                    ExpressionKind::LiteralCode {
                        code: snippet.into(),
                        type_name: None,
                    },
                    expr.handle,
                    expr.range,
                );
            }
        }
        expr
    }

    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        walk::default_statement(self, stmt, parents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_ast::Node;
    use sk_ctx::Config;

    #[test]
    fn matching_call_is_replaced_with_registered_snippet() {
        let ctx = Context::new(Config::default());
        ctx.register_template("legacyLog(_:)", "println(it)");
        ctx.freeze();
        let mut pass = ReplaceTemplates { ctx: &ctx };
        let call = Node::new(ExpressionKind::Call {
            function: Box::new(Node::new(ExpressionKind::DeclarationReference {
                name: "legacyLog".into(),
                type_name: None,
                is_standard_library: false,
            })),
            arguments: vec![sk_ast::LabeledExpression {
                label: None,
                expression: Box::new(Node::new(ExpressionKind::StringLiteral {
                    value: "hi".into(),
                    is_multiline: false,
                })),
            }],
            type_name: None,
            allows_trailing_closure: false,
            is_pure: false,
        });
        let mut parents = Parents::new();
        let result = pass.replace_expression(call, &mut parents);
        assert_eq!(
            result.payload,
            ExpressionKind::LiteralCode {
                code: "println(it)".into(),
                type_name: None,
            }
        );
    }
}
