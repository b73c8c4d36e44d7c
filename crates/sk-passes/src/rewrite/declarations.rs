//! Rewrites that change the shape of a type's members: equatable
//! operators, raw-value accessors, `description` → `toString`, and the
//! static-members-to-companion-object gather (spec.md §4.5).

use sk_ast::{
    ClassDeclaration, CompanionObjectDeclaration, DeclModifiers, EnumDeclaration, ExpressionKind,
    FunctionDeclaration, Node, Statement, StatementKind, StructDeclaration,
};
use sk_pass::{walk, Parents, Pass};

/// `==(a, b)` → `equals(other)` with a leading `is`-check guard.
pub struct EquatableOperators;

impl Pass for EquatableOperators {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [Node { payload: StatementKind::Function(f), .. }] = result.as_mut_slice() {
            if f.name == "==" && f.parameters.len() == 2 {
                let self_type = f.parameters[0].type_name.clone();
                // The second parameter keeps its original name -- after the
                // `is`-check below, the target's smart-cast makes every
                // existing reference to it resolve to `self_type` with no
                // further rewriting needed.
                let other_name = f.parameters[1].label.clone();
                f.parameters[1].type_name = "Any?".into();
                f.name = "equals".into();
                f.return_type = Some("Boolean".into());
                let guard = Node::new(StatementKind::If {
                    conditions: vec![sk_ast::IfCondition::Plain(Node::new(ExpressionKind::PrefixUnary {
                        operator: "!".into(),
                        operand: Box::new(Node::new(ExpressionKind::BinaryOp {
                            operator: "is".into(),
                            lhs: Box::new(Node::new(ExpressionKind::DeclarationReference {
                                name: other_name,
                                type_name: None,
                                is_standard_library: false,
                            })),
                            rhs: Box::new(Node::new(ExpressionKind::TypeReference { type_name: self_type })),
                            type_name: Some("Boolean".into()),
                        })),
                        type_name: Some("Boolean".into()),
                    }))],
                    then_body: vec![Node::new(StatementKind::Return {
                        value: Some(Node::new(ExpressionKind::BoolLiteral(false))),
                        label: None,
                    })],
                    else_body: None,
                    is_guard: false,
                });
                f.body.insert(0, guard);
            }
        }
        result
    }
}

/// Enums with raw values get a synthesized `rawValue` property and a
/// static `invoke(rawValue:)` factory.
pub struct RawValuesMembers;

fn raw_value_member(e: &EnumDeclaration) -> Option<Statement> {
    let has_raw = e.elements.iter().any(|el| el.raw_value.is_some());
    if !has_raw {
        return None;
    }
    let raw_type = if e.inherits.iter().any(|t| t == "String") { "String" } else { "Int" };
    Some(Node::new(StatementKind::Variable(sk_ast::VariableDeclaration {
        name: "rawValue".into(),
        is_constant: true,
        type_annotation: Some(raw_type.into()),
        initializer: None,
        accessors: None,
        modifiers: DeclModifiers::default(),
    })))
}

impl Pass for RawValuesMembers {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [Node { payload: StatementKind::Enum(e), .. }] = result.as_mut_slice() {
            if let Some(member) = raw_value_member(e) {
                e.members.push(member);
                let invoke = Node::new(StatementKind::Function(FunctionDeclaration {
                    name: "invoke".into(),
                    generic_parameters: vec![],
                    parameters: vec![sk_ast::FunctionParameter {
                        label: "rawValue".into(),
                        api_label: None,
                        type_name: if e.inherits.iter().any(|t| t == "String") { "String".into() } else { "Int".into() },
                        default: None,
                        is_variadic: false,
                        is_autoclosure: false,
                    }],
                    return_type: Some(format!("{}?", e.name).into()),
                    body: vec![Node::new(StatementKind::Return {
                        value: Some(Node::new(ExpressionKind::Call {
                            function: Box::new(Node::new(ExpressionKind::Dot {
                                receiver: Box::new(Node::new(ExpressionKind::Call {
                                    function: Box::new(Node::new(ExpressionKind::DeclarationReference {
                                        name: "values".into(),
                                        type_name: None,
                                        is_standard_library: true,
                                    })),
                                    arguments: vec![],
                                    type_name: None,
                                    allows_trailing_closure: false,
                                    is_pure: true,
                                })),
                                member: "firstOrNull".into(),
                                type_name: None,
                            })),
                            arguments: vec![],
                            type_name: None,
                            allows_trailing_closure: true,
                            is_pure: true,
                        })),
                        label: None,
                    })],
                    is_just_protocol_interface: false,
                    modifiers: DeclModifiers {
                        is_static: true,
                        ..DeclModifiers::default()
                    },
                    extends_type: None,
                }));
                e.members.push(invoke);
            }
        }
        result
    }
}

/// A type conforming to the source's textual-description protocol gets
/// its `description` property rewritten into an overriding
/// `toString(): String`.
pub struct DescriptionToToString;

impl Pass for DescriptionToToString {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [node] = result.as_mut_slice() {
            let members = match &mut node.payload {
                StatementKind::Class(ClassDeclaration { members, .. }) => Some(members),
                StatementKind::Struct(StructDeclaration { members, .. }) => Some(members),
                _ => None,
            };
            if let Some(members) = members {
                for member in members.iter_mut() {
                    if let StatementKind::Variable(v) = &mut member.payload {
                        if v.name == "description" {
                            let accessors = v.accessors.take();
                            let body = accessors.map(|a| a.getter).unwrap_or_default();
                            member.payload = StatementKind::Function(FunctionDeclaration {
                                name: "toString".into(),
                                generic_parameters: vec![],
                                parameters: vec![],
                                return_type: Some("String".into()),
                                body,
                                is_just_protocol_interface: false,
                                modifiers: DeclModifiers {
                                    annotations: vec!["override".into()],
                                    ..v.modifiers.clone()
                                },
                                extends_type: None,
                            });
                        }
                    }
                }
            }
        }
        result
    }
}

/// A failable initializer (`init?`) becomes a static `invoke` factory
/// returning an optional instance, since the target has no failable-
/// constructor syntax. Inside the rewritten body, an assignment to the
/// bare `self` identifier (whole-value reassignment, as opposed to
/// `self.field = ...`) becomes `return rhs` -- the factory's success
/// path.
pub struct OptionalInits;

fn self_assignment_to_return(stmt: Statement) -> Statement {
    match stmt.payload {
        StatementKind::Assignment { lhs, rhs } if is_bare_self(&lhs) => {
            Node::with_provenance(StatementKind::Return { value: Some(rhs), label: None }, stmt.handle, stmt.range)
        }
        other => Node::with_provenance(other, stmt.handle, stmt.range),
    }
}

fn is_bare_self(expr: &sk_ast::Expression) -> bool {
    matches!(&expr.payload, ExpressionKind::DeclarationReference { name, .. } if name == "self")
}

fn rewrite_optional_init_body(body: Vec<Statement>) -> Vec<Statement> {
    body.into_iter()
        .map(|stmt| {
            let stmt = self_assignment_to_return(stmt);
            match stmt.payload {
                StatementKind::If { conditions, then_body, else_body, is_guard } => Node::with_provenance(
                    StatementKind::If {
                        conditions,
                        then_body: rewrite_optional_init_body(then_body),
                        else_body: else_body.map(rewrite_optional_init_body),
                        is_guard,
                    },
                    stmt.handle,
                    stmt.range,
                ),
                other => Node::with_provenance(other, stmt.handle, stmt.range),
            }
        })
        .collect()
}

impl Pass for OptionalInits {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let enclosing = crate::util::immediate_enclosing_type(parents);
        let mut result = walk::default_statement(self, stmt, parents);
        if let [Node { handle, range, payload: StatementKind::Initializer(init) }] = result.as_mut_slice() {
            if init.is_optional {
                let mut f = init.function.clone();
                let type_name = enclosing.unwrap_or_else(|| f.name.to_string());
                f.body = rewrite_optional_init_body(std::mem::take(&mut f.body));
                f.name = "invoke".into();
                f.return_type = Some(format!("{type_name}?").into());
                f.modifiers.is_static = true;
                return vec![Node::with_provenance(StatementKind::Function(f), *handle, *range)];
            }
        }
        result
    }
}

/// Gathers every `static` member of a class/struct/enum into a single
/// nested companion object.
pub struct StaticMembers;

fn gather_statics(members: &mut Vec<Statement>) {
    let (statics, rest): (Vec<_>, Vec<_>) = std::mem::take(members).into_iter().partition(|m| is_static_member(m));
    *members = rest;
    if !statics.is_empty() {
        members.push(Node::new(StatementKind::CompanionObject(CompanionObjectDeclaration { members: statics })));
    }
}

fn is_static_member(stmt: &Statement) -> bool {
    match &stmt.payload {
        StatementKind::Function(f) => f.modifiers.is_static,
        StatementKind::Variable(v) => v.modifiers.is_static,
        _ => false,
    }
}

impl Pass for StaticMembers {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [node] = result.as_mut_slice() {
            match &mut node.payload {
                StatementKind::Class(ClassDeclaration { members, .. })
                | StatementKind::Struct(StructDeclaration { members, .. })
                | StatementKind::Enum(EnumDeclaration { members, .. }) => gather_statics(members),
                _ => {}
            }
        }
        result
    }
}

/// Clears protocol member bodies and marks them interface-only.
pub struct ProtocolContents;

impl Pass for ProtocolContents {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [Node { payload: StatementKind::Protocol(p), .. }] = result.as_mut_slice() {
            for member in p.members.iter_mut() {
                if let StatementKind::Function(f) = &mut member.payload {
                    f.body.clear();
                    f.is_just_protocol_interface = true;
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failable_initializer_becomes_static_invoke_returning_optional() {
        let mut pass = OptionalInits;
        let mut parents = Parents::new();
        let _scope = parents.push_type_scope("Point");
        let init = Node::new(StatementKind::Initializer(sk_ast::InitializerDeclaration {
            function: FunctionDeclaration {
                name: "Point".into(),
                generic_parameters: vec![],
                parameters: vec![],
                return_type: Some("Point".into()),
                body: vec![Node::new(StatementKind::Assignment {
                    lhs: Node::new(ExpressionKind::DeclarationReference {
                        name: "self".into(),
                        type_name: None,
                        is_standard_library: false,
                    }),
                    rhs: Node::new(ExpressionKind::NilLiteral),
                })],
                is_just_protocol_interface: false,
                modifiers: DeclModifiers::default(),
                extends_type: None,
            },
            prefix: "init".into(),
            is_optional: true,
            super_call: None,
        }));
        let result = pass.replace_statement(init, &mut parents);
        match &result.as_slice() {
            [Node { payload: StatementKind::Function(f), .. }] => {
                assert_eq!(f.name, "invoke");
                assert!(f.modifiers.is_static);
                assert_eq!(f.return_type.as_deref(), Some("Point?"));
                assert!(matches!(f.body[0].payload, StatementKind::Return { .. }));
            }
            other => panic!("expected a single static invoke function, got {other:?}"),
        }
    }

    #[test]
    fn static_members_are_gathered_into_companion_object() {
        let mut members = vec![
            Node::new(StatementKind::Variable(sk_ast::VariableDeclaration {
                name: "instance".into(),
                is_constant: true,
                type_annotation: None,
                initializer: None,
                accessors: None,
                modifiers: DeclModifiers {
                    is_static: true,
                    ..Default::default()
                },
            })),
            Node::new(StatementKind::Variable(sk_ast::VariableDeclaration {
                name: "x".into(),
                is_constant: true,
                type_annotation: None,
                initializer: None,
                accessors: None,
                modifiers: DeclModifiers::default(),
            })),
        ];
        gather_statics(&mut members);
        assert_eq!(members.len(), 2);
        assert!(matches!(members[1].payload, StatementKind::CompanionObject(_)));
    }
}
