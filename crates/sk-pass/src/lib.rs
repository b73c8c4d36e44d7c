//! The generic tree-rewrite framework every recording, rewrite, and
//! warning pass is built on.
//!
//! A [`Pass`] implements `replace_statement`/`replace_expression` for the
//! node kinds it cares about and falls back to [`walk::default_statement`]
//! / [`walk::default_expression`] for everything else, so overriding one
//! case never requires hand-writing recursion for the other two dozen.

pub mod parents;
pub mod walk;

pub use parents::{Frame, Guard, Parents};

use sk_ast::{SourceFile, Statement, StatementKind};
use tracing::trace;

/// A single transformation over the AST.
///
/// `replace_statement` returns a `Vec<Statement>` rather than a single
/// node because some passes expand one statement into several (or zero)
/// -- `GuardsToIfLets` turning a `guard let` into an `if let`/`else`
/// pair, `RemoveExtensions` splicing an extension's members into its
/// enclosing file, and so on. `replace_expression` always returns
/// exactly one node since the source language has no expression-splicing
/// construct.
pub trait Pass {
    /// A short, human-readable name used in tracing spans and error
    /// messages. Defaults to the Rust type name.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        walk::default_statement(self, stmt, parents)
    }

    fn replace_expression(&mut self, expr: sk_ast::Expression, parents: &mut Parents) -> sk_ast::Expression {
        walk::default_expression(self, expr, parents)
    }
}

/// Runs `pass` over every top-level declaration in `file`, replacing
/// `file.declarations` in place.
///
/// Top-level declarations are not wrapped in a statement frame on the
/// parent stack -- `Parents::is_top_level_node()` reports `true` for
/// them, matching the "file scope" notion passes like `TopLevelConstants`
/// rely on.
pub fn run<P: Pass + ?Sized>(pass: &mut P, file: &mut SourceFile) {
    trace!(pass = pass.name(), file = %file.path, "running pass");
    let mut parents = Parents::new();
    let declarations = std::mem::take(&mut file.declarations);
    file.declarations = declarations
        .into_iter()
        .flat_map(|stmt| pass.replace_statement(stmt, &mut parents))
        .collect();
    debug_assert!(parents.is_top_level_node(), "parent stack must be empty after a full pass");
}

/// Shorthand for a pass that only touches whole files, not individual
/// nodes -- e.g. a recording pass that scans top-level declarations for
/// global names without rewriting anything.
pub trait FileObserver {
    fn observe(&mut self, file: &SourceFile);
}

/// A synthesized `Error` statement, for a pass that detects AST shape it
/// cannot legally continue past (e.g. a `RemoveExtensions`-only pass
/// encountering an `Extension` after that pass has already run).
pub fn error_statement(message: impl Into<smol_str::SmolStr>) -> Statement {
    sk_ast::Node::new(StatementKind::Error { message: message.into() })
}

/// A synthesized `Error` expression, the expression-position counterpart
/// of [`error_statement`].
pub fn error_expression(message: impl Into<smol_str::SmolStr>) -> sk_ast::Expression {
    sk_ast::Node::new(sk_ast::ExpressionKind::Error { message: message.into() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_ast::{ExpressionKind, Node};

    struct NilToZero;

    impl Pass for NilToZero {
        fn replace_expression(&mut self, expr: sk_ast::Expression, parents: &mut Parents) -> sk_ast::Expression {
            let expr = walk::default_expression(self, expr, parents);
            match expr.payload {
                ExpressionKind::NilLiteral => Node::new(ExpressionKind::IntLiteral {
                    value: 0,
                    radix: sk_ast::Radix::Decimal,
                    type_name: None,
                }),
                _ => expr,
            }
        }
    }

    #[test]
    fn default_recursion_reaches_nested_expressions() {
        let mut file = SourceFile {
            path: "t.src".into(),
            declarations: vec![Node::new(StatementKind::Return {
                value: Some(Node::new(ExpressionKind::Parentheses(Box::new(Node::new(
                    ExpressionKind::NilLiteral,
                ))))),
                label: None,
            })],
        };
        run(&mut NilToZero, &mut file);
        match &file.declarations[0].payload {
            StatementKind::Return { value: Some(v), .. } => match &v.payload {
                ExpressionKind::Parentheses(inner) => {
                    assert_eq!(inner.payload, ExpressionKind::IntLiteral {
                        value: 0,
                        radix: sk_ast::Radix::Decimal,
                        type_name: None,
                    });
                }
                other => panic!("unexpected payload: {other:?}"),
            },
            other => panic!("unexpected statement: {other:?}"),
        }
    }

    struct CountCalls(usize);

    impl Pass for CountCalls {
        fn replace_expression(&mut self, expr: sk_ast::Expression, parents: &mut Parents) -> sk_ast::Expression {
            if matches!(expr.payload, ExpressionKind::Call { .. }) {
                self.0 += 1;
            }
            walk::default_expression(self, expr, parents)
        }
    }

    #[test]
    fn nested_calls_are_all_visited() {
        let inner_call = Node::new(ExpressionKind::Call {
            function: Box::new(Node::new(ExpressionKind::DeclarationReference {
                name: "g".into(),
                type_name: None,
                is_standard_library: false,
            })),
            arguments: vec![],
            type_name: None,
            allows_trailing_closure: false,
            is_pure: false,
        });
        let outer_call = Node::new(ExpressionKind::Call {
            function: Box::new(Node::new(ExpressionKind::DeclarationReference {
                name: "f".into(),
                type_name: None,
                is_standard_library: false,
            })),
            arguments: vec![sk_ast::LabeledExpression {
                label: None,
                expression: Box::new(inner_call),
            }],
            type_name: None,
            allows_trailing_closure: false,
            is_pure: false,
        });
        let mut file = SourceFile {
            path: "t.src".into(),
            declarations: vec![Node::new(StatementKind::ExpressionStatement(outer_call))],
        };
        let mut pass = CountCalls(0);
        run(&mut pass, &mut file);
        assert_eq!(pass.0, 2);
    }

    #[test]
    fn top_level_node_flag_holds_for_file_scope_declarations() {
        struct CheckTopLevel(bool);
        impl Pass for CheckTopLevel {
            fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
                self.0 = parents.is_top_level_node();
                walk::default_statement(self, stmt, parents)
            }
        }
        let mut file = SourceFile {
            path: "t.src".into(),
            declarations: vec![Node::new(StatementKind::Break(None))],
        };
        let mut pass = CheckTopLevel(false);
        run(&mut pass, &mut file);
        assert!(pass.0);
    }
}
