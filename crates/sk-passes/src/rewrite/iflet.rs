//! The `if let` family of rewrites: the shadowed-binding simplification,
//! `||` parenthesization, and the if-let hoist itself (spec.md §4.5,
//! worked scenario 2 in §8).

use rustc_hash::FxHashSet;
use sk_ast::{Expression, ExpressionKind, IfCondition, Node, Statement, StatementKind};
use sk_pass::{walk, Parents, Pass};

/// `if let x = x as? T { ... }` -- a binding that only narrows an
/// existing identifier's type -- becomes a plain `is` test, since the
/// target's smart-cast already does the narrowing.
pub struct ShadowedIfLetToIs;

impl Pass for ShadowedIfLetToIs {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [Node { payload: StatementKind::If { conditions, .. }, .. }] = result.as_mut_slice() {
            for cond in conditions.iter_mut() {
                if let IfCondition::Binding(v) = cond {
                    if let Some(init) = &v.initializer {
                        if let ExpressionKind::OptionalChain(inner) = &init.payload {
                            if is_cast_of(inner, &v.name) {
                                if let ExpressionKind::PostfixUnary { type_name: Some(t), .. } = &inner.payload {
                                    *cond = IfCondition::Plain(Node::new(ExpressionKind::BinaryOp {
                                        operator: "is".into(),
                                        lhs: Box::new(Node::new(ExpressionKind::DeclarationReference {
                                            name: v.name.clone(),
                                            type_name: None,
                                            is_standard_library: false,
                                        })),
                                        rhs: Box::new(Node::new(ExpressionKind::TypeReference { type_name: t.clone() })),
                                        type_name: Some("Boolean".into()),
                                    }));
                                }
                            }
                        }
                    }
                }
            }
        }
        result
    }
}

fn is_cast_of(expr: &Expression, name: &str) -> bool {
    matches!(
        &expr.payload,
        ExpressionKind::PostfixUnary { operand, operator, .. }
            if operator == "as?" && matches!(&operand.payload, ExpressionKind::DeclarationReference { name: n, .. } if n == name)
    )
}

/// When an `if` has multiple `&&`-joined conditions, any condition whose
/// top operator is `||` must be parenthesized, since `&&` binds tighter
/// than an unparenthesized `||` in the emitted target.
pub struct ParenthesizeOrInIf;

impl Pass for ParenthesizeOrInIf {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [Node { payload: StatementKind::If { conditions, .. }, .. }] = result.as_mut_slice() {
            if conditions.len() > 1 {
                for cond in conditions.iter_mut() {
                    if let IfCondition::Plain(e) = cond {
                        if matches!(&e.payload, ExpressionKind::BinaryOp { operator, .. } if operator == "||") {
                            let inner = std::mem::replace(e, Node::new(ExpressionKind::NilLiteral));
                            *e = Node::new(ExpressionKind::Parentheses(Box::new(inner)));
                        }
                    }
                }
            }
        }
        result
    }
}

fn not_null_check(name: &sk_ast::Ident) -> Expression {
    Node::new(ExpressionKind::BinaryOp {
        operator: "!=".into(),
        lhs: Box::new(Node::new(ExpressionKind::DeclarationReference {
            name: name.clone(),
            type_name: None,
            is_standard_library: false,
        })),
        rhs: Box::new(Node::new(ExpressionKind::NilLiteral)),
        type_name: Some("Boolean".into()),
    })
}

fn apply_optional_chaining(expr: &mut Expression, seen: &FxHashSet<String>) {
    match &mut expr.payload {
        ExpressionKind::Dot { receiver, .. } | ExpressionKind::Subscript { subscripted: receiver, .. } => {
            apply_optional_chaining(receiver, seen);
            if let ExpressionKind::DeclarationReference { name, .. } = &receiver.payload {
                if seen.contains(name.as_str()) {
                    let inner = std::mem::replace(receiver.as_mut(), Node::new(ExpressionKind::NilLiteral));
                    *receiver.as_mut() = Node::new(ExpressionKind::OptionalChain(Box::new(inner)));
                }
            }
        }
        ExpressionKind::Call { function, arguments, .. } => {
            apply_optional_chaining(function, seen);
            for a in arguments.iter_mut() {
                apply_optional_chaining(&mut a.expression, seen);
            }
        }
        ExpressionKind::Parentheses(inner) | ExpressionKind::ForceUnwrap(inner) | ExpressionKind::OptionalChain(inner) => {
            apply_optional_chaining(inner, seen);
        }
        _ => {}
    }
}

fn rearrange_conditions(conditions: Vec<IfCondition>, hoisted: &mut Vec<Statement>, seen: &mut FxHashSet<String>) -> Vec<IfCondition> {
    let mut result = Vec::with_capacity(conditions.len());
    for cond in conditions {
        match cond {
            IfCondition::Binding(mut v) => {
                if let Some(init) = &mut v.initializer {
                    apply_optional_chaining(init, seen);
                }
                let check = not_null_check(&v.name);
                if seen.insert(v.name.to_string()) {
                    hoisted.push(Node::new(StatementKind::Variable(v)));
                }
                result.push(IfCondition::Plain(check));
            }
            IfCondition::Plain(mut e) => {
                apply_optional_chaining(&mut e, seen);
                result.push(IfCondition::Plain(e));
            }
        }
    }
    result
}

fn process_if_chain<P: Pass + ?Sized>(
    pass: &mut P,
    conditions: Vec<IfCondition>,
    then_body: Vec<Statement>,
    else_body: Option<Vec<Statement>>,
    is_guard: bool,
    parents: &mut Parents,
    hoisted: &mut Vec<Statement>,
    seen: &mut FxHashSet<String>,
) -> Statement {
    let new_conditions = rearrange_conditions(conditions, hoisted, seen);
    let new_then = walk::walk_statements(pass, then_body, parents);
    let new_else = else_body.map(|mut body| {
        if body.len() == 1 && matches!(body[0].payload, StatementKind::If { .. }) {
            let inner = body.pop().expect("checked len == 1 above");
            if let StatementKind::If { conditions, then_body, else_body, is_guard } = inner.payload {
                vec![process_if_chain(pass, conditions, then_body, else_body, is_guard, parents, hoisted, seen)]
            } else {
                unreachable!("matches! guard above already confirmed an If payload")
            }
        } else {
            walk::walk_statements(pass, body, parents)
        }
    });
    Node::new(StatementKind::If {
        conditions: new_conditions,
        then_body: new_then,
        else_body: new_else,
        is_guard,
    })
}

/// Hoists every `if let` binding in an `if`/else-if chain to a statement
/// immediately preceding the `if`, deduplicating by identifier across
/// the chain, and replaces each hoisted condition with a not-null check.
pub struct RearrangeIfLets;

impl Pass for RearrangeIfLets {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        match stmt.payload {
            StatementKind::If { conditions, then_body, else_body, is_guard } => {
                let mut hoisted = Vec::new();
                let mut seen = FxHashSet::default();
                let rebuilt = process_if_chain(self, conditions, then_body, else_body, is_guard, parents, &mut hoisted, &mut seen);
                hoisted.push(rebuilt);
                hoisted
            }
            other => walk::default_statement(self, Node::with_provenance(other, stmt.handle, stmt.range), parents),
        }
    }
}

/// `guard !x` → `if !x`; `guard a != b` → `if a == b`; `guard a == b` →
/// `if a != b`, clearing the guard flag in every case.
pub struct DoubleNegativesInGuards;

impl Pass for DoubleNegativesInGuards {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [Node { payload: StatementKind::If { conditions, is_guard, .. }, .. }] = result.as_mut_slice() {
            if *is_guard && conditions.len() == 1 {
                if let IfCondition::Plain(e) = &mut conditions[0] {
                    negate_in_place(e);
                }
                *is_guard = false;
            }
        }
        result
    }
}

fn negate_in_place(e: &mut Expression) {
    let negated = match &e.payload {
        ExpressionKind::PrefixUnary { operator, operand, .. } if operator == "!" => Some((**operand).clone()),
        ExpressionKind::BinaryOp { operator, lhs, rhs, type_name } if operator == "!=" => Some(Node::new(ExpressionKind::BinaryOp {
            operator: "==".into(),
            lhs: lhs.clone(),
            rhs: rhs.clone(),
            type_name: type_name.clone(),
        })),
        ExpressionKind::BinaryOp { operator, lhs, rhs, type_name } if operator == "==" => Some(Node::new(ExpressionKind::BinaryOp {
            operator: "!=".into(),
            lhs: lhs.clone(),
            rhs: rhs.clone(),
            type_name: type_name.clone(),
        })),
        _ => None,
    };
    if let Some(n) = negated {
        *e = n;
    }
}

/// `if (x == null) { return }` → `x ?: return`.
pub struct NullReturnToElvis;

impl Pass for NullReturnToElvis {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let result = walk::default_statement(self, stmt, parents);
        if let [Node { payload: StatementKind::If { conditions, then_body, else_body: None, is_guard: false }, handle, range }] =
            result.as_slice()
        {
            if let [IfCondition::Plain(cond)] = conditions.as_slice() {
                if let [Node { payload: StatementKind::Return { value: None, label: None }, .. }] = then_body.as_slice() {
                    if let ExpressionKind::BinaryOp { operator, lhs, rhs, .. } = &cond.payload {
                        if operator == "==" && matches!(rhs.payload, ExpressionKind::NilLiteral) {
                            let elvis = Node::with_provenance(
                                ExpressionKind::BinaryOp {
                                    operator: "?:".into(),
                                    lhs: lhs.clone(),
                                    rhs: Box::new(Node::new(ExpressionKind::ReturnExpression(None))),
                                    type_name: None,
                                },
                                *handle,
                                *range,
                            );
                            return vec![Node::new(StatementKind::ExpressionStatement(elvis))];
                        }
                    }
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_ast::{DeclModifiers, VariableDeclaration};

    fn binding(name: &str, call_name: &str) -> IfCondition {
        IfCondition::Binding(VariableDeclaration {
            name: name.into(),
            is_constant: true,
            type_annotation: None,
            initializer: Some(Box::new(Node::new(ExpressionKind::Call {
                function: Box::new(Node::new(ExpressionKind::DeclarationReference {
                    name: call_name.into(),
                    type_name: None,
                    is_standard_library: false,
                })),
                arguments: vec![],
                type_name: None,
                allows_trailing_closure: false,
                is_pure: false,
            }))),
            accessors: None,
            modifiers: DeclModifiers::default(),
        })
    }

    #[test]
    fn hoists_bindings_and_replaces_with_not_null_checks() {
        let conditions = vec![binding("x", "foo")];
        let mut hoisted = Vec::new();
        let mut seen = FxHashSet::default();
        let result = rearrange_conditions(conditions, &mut hoisted, &mut seen);
        assert_eq!(hoisted.len(), 1);
        assert!(matches!(result[0], IfCondition::Plain(_)));
    }

    #[test]
    fn second_binding_referencing_first_gets_optional_chained() {
        let mut seen = FxHashSet::default();
        seen.insert("x".to_string());
        let mut dot_call = Node::new(ExpressionKind::Call {
            function: Box::new(Node::new(ExpressionKind::Dot {
                receiver: Box::new(Node::new(ExpressionKind::DeclarationReference {
                    name: "x".into(),
                    type_name: None,
                    is_standard_library: false,
                })),
                member: "bar".into(),
                type_name: None,
            })),
            arguments: vec![],
            type_name: None,
            allows_trailing_closure: false,
            is_pure: false,
        });
        apply_optional_chaining(&mut dot_call, &seen);
        if let ExpressionKind::Call { function, .. } = &dot_call.payload {
            if let ExpressionKind::Dot { receiver, .. } = &function.payload {
                assert!(matches!(receiver.payload, ExpressionKind::OptionalChain(_)));
                return;
            }
        }
        panic!("expected dot chain receiver to be optional-chained");
    }

    #[test]
    fn double_negative_guard_becomes_if_with_flipped_operator() {
        let mut e = Node::new(ExpressionKind::BinaryOp {
            operator: "!=".into(),
            lhs: Box::new(Node::new(ExpressionKind::NilLiteral)),
            rhs: Box::new(Node::new(ExpressionKind::NilLiteral)),
            type_name: None,
        });
        negate_in_place(&mut e);
        assert!(matches!(&e.payload, ExpressionKind::BinaryOp { operator, .. } if operator == "=="));
    }
}
