//! Closure rewrites (spec.md §4.5): labeling the implicit return of a
//! multi-statement lambda.

use sk_ast::{Expression, ExpressionKind, Node, Statement, StatementKind};
use sk_pass::{walk, Parents, Pass};

/// The target requires a labeled `return@label` to return from a lambda
/// rather than its enclosing function; every bare `Return` inside a
/// closure body gets labeled with a synthesized name derived from the
/// closure's nesting depth.
#[derive(Default)]
pub struct ReturnsInLambdas {
    depth: usize,
}

fn label_returns(body: &mut [Statement], label: &sk_ast::Ident) {
    for stmt in body.iter_mut() {
        match &mut stmt.payload {
            StatementKind::Return { label: l, .. } => *l = Some(label.clone()),
            StatementKind::If { then_body, else_body, .. } => {
                label_returns(then_body, label);
                if let Some(else_body) = else_body {
                    label_returns(else_body, label);
                }
            }
            StatementKind::Do { body } | StatementKind::Defer { body } => label_returns(body, label),
            _ => {}
        }
    }
}

impl Pass for ReturnsInLambdas {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        if let ExpressionKind::Closure { parameters, mut body, type_name, is_trailing } = expr.payload {
            self.depth += 1;
            let label: sk_ast::Ident = format!("lambda{}", self.depth).into();
            if body.len() > 1 {
                label_returns(&mut body, &label);
            }
            let mut new_body = Vec::with_capacity(body.len());
            for stmt in body {
                new_body.extend(self.replace_statement(stmt, parents));
            }
            self.depth -= 1;
            return Node::with_provenance(
                ExpressionKind::Closure {
                    parameters,
                    body: new_body,
                    type_name,
                    is_trailing,
                },
                expr.handle,
                expr.range,
            );
        }
        walk::default_expression(self, expr, parents)
    }
}
