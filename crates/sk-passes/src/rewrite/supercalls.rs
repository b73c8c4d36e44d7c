//! `SuperCallsToHeaders` (spec.md §4.5): the target requires a
//! superclass constructor call to appear in the subclass constructor's
//! header rather than as a statement in its body.

use sk_ast::{ExpressionKind, Statement, StatementKind};
use sk_pass::{walk, Parents, Pass};

fn is_super_init_call(stmt: &Statement) -> bool {
    matches!(
        &stmt.payload,
        StatementKind::ExpressionStatement(e) if matches!(
            &e.payload,
            ExpressionKind::Call { function, .. } if matches!(
                &function.payload,
                ExpressionKind::Dot { receiver, member, .. }
                    if member == "init" && matches!(receiver.payload, ExpressionKind::DeclarationReference { ref name, .. } if name == "super")
            )
        )
    )
}

pub struct SuperCallsToHeaders;

impl Pass for SuperCallsToHeaders {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [sk_ast::Node { payload: StatementKind::Initializer(init), .. }] = result.as_mut_slice() {
            if let Some(pos) = init.function.body.iter().position(is_super_init_call) {
                let call_stmt = init.function.body.remove(pos);
                if let StatementKind::ExpressionStatement(call_expr) = call_stmt.payload {
                    init.super_call = Some(Box::new(call_expr));
                }
            }
        }
        result
    }
}
