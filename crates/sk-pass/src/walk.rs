//! Default recursion: reassemble a node unchanged after visiting every
//! child. Every `Pass` override that calls back into these functions
//! continues the traversal; one that doesn't simply replaces a subtree
//! without descending into it.

use sk_ast::{
    ClassDeclaration, CompanionObjectDeclaration, EnumDeclaration, Expression, ExpressionKind,
    ExtensionDeclaration, FunctionDeclaration, IfCondition, InitializerDeclaration,
    ProtocolDeclaration, Statement, StatementKind, StructDeclaration, SwitchCase,
    VariableDeclaration,
};

use crate::parents::Parents;
use crate::Pass;

/// Walks a nested statement list through `pass`, in source order. Public
/// so a pass that overrides a construct containing a statement list
/// (e.g. an `if`'s `then_body`) can still get ordinary default recursion
/// for that list without reimplementing it.
pub fn walk_statements<P: Pass + ?Sized>(pass: &mut P, body: Vec<Statement>, parents: &mut Parents) -> Vec<Statement> {
    parents.enter_statements_scope();
    body.into_iter()
        .flat_map(|s| pass.replace_statement(s, parents))
        .collect()
}

/// Walks a single expression through `pass`. Public for the same reason
/// as [`walk_statements`].
pub fn walk_expr<P: Pass + ?Sized>(pass: &mut P, expr: Expression, parents: &mut Parents) -> Expression {
    pass.replace_expression(expr, parents)
}

fn walk_boxed_expr<P: Pass + ?Sized>(pass: &mut P, expr: Box<Expression>, parents: &mut Parents) -> Box<Expression> {
    Box::new(walk_expr(pass, *expr, parents))
}

fn walk_opt_expr<P: Pass + ?Sized>(
    pass: &mut P,
    expr: Option<Expression>,
    parents: &mut Parents,
) -> Option<Expression> {
    expr.map(|e| walk_expr(pass, e, parents))
}

fn walk_opt_boxed_expr<P: Pass + ?Sized>(
    pass: &mut P,
    expr: Option<Box<Expression>>,
    parents: &mut Parents,
) -> Option<Box<Expression>> {
    expr.map(|e| walk_boxed_expr(pass, e, parents))
}

fn walk_conditions<P: Pass + ?Sized>(
    pass: &mut P,
    conditions: Vec<IfCondition>,
    parents: &mut Parents,
) -> Vec<IfCondition> {
    conditions
        .into_iter()
        .map(|c| match c {
            IfCondition::Plain(e) => IfCondition::Plain(walk_expr(pass, e, parents)),
            IfCondition::Binding(v) => IfCondition::Binding(walk_variable(pass, v, parents)),
        })
        .collect()
}

fn walk_variable<P: Pass + ?Sized>(pass: &mut P, v: VariableDeclaration, parents: &mut Parents) -> VariableDeclaration {
    let _g = parents.push_statement("Variable");
    VariableDeclaration {
        initializer: walk_opt_boxed_expr(pass, v.initializer, parents),
        accessors: v.accessors.map(|a| sk_ast::Accessors {
            getter: walk_statements(pass, a.getter, parents),
            setter: a.setter.map(|(name, body)| (name, walk_statements(pass, body, parents))),
        }),
        ..v
    }
}

fn walk_function<P: Pass + ?Sized>(pass: &mut P, f: FunctionDeclaration, parents: &mut Parents) -> FunctionDeclaration {
    let _g = parents.push_statement("Function");
    FunctionDeclaration {
        body: walk_statements(pass, f.body, parents),
        ..f
    }
}

fn walk_members<P: Pass + ?Sized>(
    pass: &mut P,
    name: &str,
    members: Vec<Statement>,
    parents: &mut Parents,
) -> Vec<Statement> {
    let _scope = parents.push_type_scope(name.to_string());
    walk_statements(pass, members, parents)
}

/// Default recursion for a statement node: visit every child statement
/// and expression, then reassemble unchanged.
pub fn default_statement<P: Pass + ?Sized>(pass: &mut P, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
    let tag = stmt.payload.tag();
    let Statement { handle, range, payload } = stmt;
    let _g = parents.push_statement(tag);

    let payload = match payload {
        StatementKind::Comment(s) => StatementKind::Comment(s),
        StatementKind::ExpressionStatement(e) => StatementKind::ExpressionStatement(walk_expr(pass, e, parents)),
        StatementKind::Typealias(t) => StatementKind::Typealias(t),
        StatementKind::Extension(ExtensionDeclaration {
            type_name,
            generic_parameters,
            inherits,
            members,
        }) => StatementKind::Extension(ExtensionDeclaration {
            members: walk_members(pass, &type_name, members, parents),
            type_name,
            generic_parameters,
            inherits,
        }),
        StatementKind::Import { module } => StatementKind::Import { module },
        StatementKind::Class(ClassDeclaration {
            name,
            generic_parameters,
            inherits,
            members,
            modifiers,
        }) => StatementKind::Class(ClassDeclaration {
            members: walk_members(pass, &name, members, parents),
            name,
            generic_parameters,
            inherits,
            modifiers,
        }),
        StatementKind::CompanionObject(CompanionObjectDeclaration { members }) => {
            StatementKind::CompanionObject(CompanionObjectDeclaration {
                members: walk_statements(pass, members, parents),
            })
        }
        StatementKind::Enum(EnumDeclaration {
            name,
            generic_parameters,
            inherits,
            elements,
            members,
            modifiers,
        }) => StatementKind::Enum(EnumDeclaration {
            members: walk_members(pass, &name, members, parents),
            name,
            generic_parameters,
            inherits,
            elements,
            modifiers,
        }),
        StatementKind::Protocol(ProtocolDeclaration {
            name,
            inherits,
            members,
            modifiers,
        }) => StatementKind::Protocol(ProtocolDeclaration {
            members: walk_members(pass, &name, members, parents),
            name,
            inherits,
            modifiers,
        }),
        StatementKind::Struct(StructDeclaration {
            name,
            generic_parameters,
            inherits,
            members,
            modifiers,
        }) => StatementKind::Struct(StructDeclaration {
            members: walk_members(pass, &name, members, parents),
            name,
            generic_parameters,
            inherits,
            modifiers,
        }),
        StatementKind::Function(f) => StatementKind::Function(walk_function(pass, f, parents)),
        StatementKind::Initializer(InitializerDeclaration {
            function,
            prefix,
            is_optional,
            super_call,
        }) => StatementKind::Initializer(InitializerDeclaration {
            function: walk_function(pass, function, parents),
            super_call: walk_opt_boxed_expr(pass, super_call, parents),
            prefix,
            is_optional,
        }),
        StatementKind::Variable(v) => StatementKind::Variable(walk_variable(pass, v, parents)),
        StatementKind::Do { body } => StatementKind::Do {
            body: walk_statements(pass, body, parents),
        },
        StatementKind::Catch {
            bound_type,
            binding,
            body,
        } => StatementKind::Catch {
            body: walk_statements(pass, body, parents),
            bound_type,
            binding,
        },
        StatementKind::ForEach {
            pattern,
            collection,
            body,
        } => StatementKind::ForEach {
            collection: walk_expr(pass, collection, parents),
            body: walk_statements(pass, body, parents),
            pattern,
        },
        StatementKind::While { conditions, body } => StatementKind::While {
            conditions: walk_conditions(pass, conditions, parents),
            body: walk_statements(pass, body, parents),
        },
        StatementKind::If {
            conditions,
            then_body,
            else_body,
            is_guard,
        } => StatementKind::If {
            conditions: walk_conditions(pass, conditions, parents),
            then_body: walk_statements(pass, then_body, parents),
            else_body: else_body.map(|b| walk_statements(pass, b, parents)),
            is_guard,
        },
        StatementKind::Switch { subject, cases } => StatementKind::Switch {
            subject: walk_expr(pass, subject, parents),
            cases: cases
                .into_iter()
                .map(|c| {
                    let _g = parents.push_statement("SwitchCase");
                    SwitchCase {
                        expressions: c
                            .expressions
                            .into_iter()
                            .map(|e| walk_expr(pass, e, parents))
                            .collect(),
                        statements: walk_statements(pass, c.statements, parents),
                    }
                })
                .collect(),
        },
        StatementKind::Defer { body } => StatementKind::Defer {
            body: walk_statements(pass, body, parents),
        },
        StatementKind::Throw(e) => StatementKind::Throw(walk_expr(pass, e, parents)),
        StatementKind::Return { value, label } => StatementKind::Return {
            value: walk_opt_expr(pass, value, parents),
            label,
        },
        StatementKind::Break(l) => StatementKind::Break(l),
        StatementKind::Continue(l) => StatementKind::Continue(l),
        StatementKind::Assignment { lhs, rhs } => StatementKind::Assignment {
            lhs: walk_expr(pass, lhs, parents),
            rhs: walk_expr(pass, rhs, parents),
        },
        StatementKind::Error { message } => StatementKind::Error { message },
    };

    vec![Statement { handle, range, payload }]
}

/// Default recursion for an expression node.
pub fn default_expression<P: Pass + ?Sized>(pass: &mut P, expr: Expression, parents: &mut Parents) -> Expression {
    let tag = expr.payload.tag();
    let Expression { handle, range, payload } = expr;
    let _g = parents.push_expression(tag);

    let payload = match payload {
        ExpressionKind::LiteralCode { code, type_name } => ExpressionKind::LiteralCode { code, type_name },
        ExpressionKind::Concatenation(a, b) => {
            ExpressionKind::Concatenation(walk_boxed_expr(pass, a, parents), walk_boxed_expr(pass, b, parents))
        }
        ExpressionKind::Parentheses(e) => ExpressionKind::Parentheses(walk_boxed_expr(pass, e, parents)),
        ExpressionKind::ForceUnwrap(e) => ExpressionKind::ForceUnwrap(walk_boxed_expr(pass, e, parents)),
        ExpressionKind::OptionalChain(e) => ExpressionKind::OptionalChain(walk_boxed_expr(pass, e, parents)),
        ExpressionKind::DeclarationReference {
            name,
            type_name,
            is_standard_library,
        } => ExpressionKind::DeclarationReference {
            name,
            type_name,
            is_standard_library,
        },
        ExpressionKind::TypeReference { type_name } => ExpressionKind::TypeReference { type_name },
        ExpressionKind::Subscript {
            subscripted,
            indices,
            type_name,
        } => ExpressionKind::Subscript {
            subscripted: walk_boxed_expr(pass, subscripted, parents),
            indices: indices
                .into_iter()
                .map(|i| sk_ast::LabeledExpression {
                    label: i.label,
                    expression: walk_boxed_expr(pass, i.expression, parents),
                })
                .collect(),
            type_name,
        },
        ExpressionKind::Array { elements, type_name } => ExpressionKind::Array {
            elements: elements.into_iter().map(|e| walk_expr(pass, e, parents)).collect(),
            type_name,
        },
        ExpressionKind::Dictionary { entries, type_name } => ExpressionKind::Dictionary {
            entries: entries
                .into_iter()
                .map(|(k, v)| (walk_expr(pass, k, parents), walk_expr(pass, v, parents)))
                .collect(),
            type_name,
        },
        ExpressionKind::ReturnExpression(e) => ExpressionKind::ReturnExpression(walk_opt_boxed_expr(pass, e, parents)),
        ExpressionKind::Dot {
            receiver,
            member,
            type_name,
        } => ExpressionKind::Dot {
            receiver: walk_boxed_expr(pass, receiver, parents),
            member,
            type_name,
        },
        ExpressionKind::BinaryOp {
            operator,
            lhs,
            rhs,
            type_name,
        } => ExpressionKind::BinaryOp {
            lhs: walk_boxed_expr(pass, lhs, parents),
            rhs: walk_boxed_expr(pass, rhs, parents),
            operator,
            type_name,
        },
        ExpressionKind::PrefixUnary {
            operator,
            operand,
            type_name,
        } => ExpressionKind::PrefixUnary {
            operand: walk_boxed_expr(pass, operand, parents),
            operator,
            type_name,
        },
        ExpressionKind::PostfixUnary {
            operator,
            operand,
            type_name,
        } => ExpressionKind::PostfixUnary {
            operand: walk_boxed_expr(pass, operand, parents),
            operator,
            type_name,
        },
        ExpressionKind::TernaryIf {
            condition,
            then_expr,
            else_expr,
            type_name,
        } => ExpressionKind::TernaryIf {
            condition: walk_boxed_expr(pass, condition, parents),
            then_expr: walk_boxed_expr(pass, then_expr, parents),
            else_expr: walk_boxed_expr(pass, else_expr, parents),
            type_name,
        },
        ExpressionKind::Call {
            function,
            arguments,
            type_name,
            allows_trailing_closure,
            is_pure,
        } => {
            let function = walk_boxed_expr(pass, function, parents);
            let _g = parents.push_expression("CallArguments");
            let arguments = arguments
                .into_iter()
                .map(|a| sk_ast::LabeledExpression {
                    label: a.label,
                    expression: walk_boxed_expr(pass, a.expression, parents),
                })
                .collect();
            ExpressionKind::Call {
                function,
                arguments,
                type_name,
                allows_trailing_closure,
                is_pure,
            }
        }
        ExpressionKind::Closure {
            parameters,
            body,
            type_name,
            is_trailing,
        } => ExpressionKind::Closure {
            body: walk_statements(pass, body, parents),
            parameters,
            type_name,
            is_trailing,
        },
        ExpressionKind::IntLiteral {
            value,
            radix,
            type_name,
        } => ExpressionKind::IntLiteral {
            value,
            radix,
            type_name,
        },
        ExpressionKind::UIntLiteral {
            value,
            radix,
            type_name,
        } => ExpressionKind::UIntLiteral {
            value,
            radix,
            type_name,
        },
        ExpressionKind::DoubleLiteral(v) => ExpressionKind::DoubleLiteral(v),
        ExpressionKind::FloatLiteral(v) => ExpressionKind::FloatLiteral(v),
        ExpressionKind::BoolLiteral(v) => ExpressionKind::BoolLiteral(v),
        ExpressionKind::StringLiteral { value, is_multiline } => {
            ExpressionKind::StringLiteral { value, is_multiline }
        }
        ExpressionKind::CharLiteral(c) => ExpressionKind::CharLiteral(c),
        ExpressionKind::NilLiteral => ExpressionKind::NilLiteral,
        ExpressionKind::InterpolatedString(segments) => ExpressionKind::InterpolatedString(
            segments
                .into_iter()
                .map(|seg| match seg {
                    sk_ast::InterpolationSegment::Literal(s) => sk_ast::InterpolationSegment::Literal(s),
                    sk_ast::InterpolationSegment::Expression(e) => {
                        sk_ast::InterpolationSegment::Expression(walk_expr(pass, e, parents))
                    }
                })
                .collect(),
        ),
        ExpressionKind::Tuple(items) => ExpressionKind::Tuple(
            items
                .into_iter()
                .map(|i| sk_ast::LabeledExpression {
                    label: i.label,
                    expression: walk_boxed_expr(pass, i.expression, parents),
                })
                .collect(),
        ),
        ExpressionKind::Error { message } => ExpressionKind::Error { message },
    };

    Expression { handle, range, payload }
}
