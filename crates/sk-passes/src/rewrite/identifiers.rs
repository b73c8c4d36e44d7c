//! Identifier and reference rewrites: `self` → `this`, implicit-`nil`
//! defaults, anonymous-parameter naming, and inner-type qualification
//! (spec.md §4.5).

use sk_ast::{Expression, ExpressionKind, FunctionDeclaration, Statement};
use sk_pass::{walk, Parents, Pass};

/// Every bare `self` reference becomes `this`.
pub struct SelfToThis;

impl Pass for SelfToThis {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::DeclarationReference { name, type_name, is_standard_library } = &expr.payload {
            if name == "self" {
                return sk_ast::Node::with_provenance(
                    ExpressionKind::DeclarationReference {
                        name: "this".into(),
                        type_name: type_name.clone(),
                        is_standard_library: *is_standard_library,
                    },
                    expr.handle,
                    expr.range,
                );
            }
        }
        expr
    }
}

/// An optional-typed parameter with no explicit default gets an implicit
/// `= null` default (the source language's implicit-`nil`-default rule
/// for `Optional` parameters, which the target has no equivalent for).
pub struct ImplicitNullInOptionals;

fn add_implicit_nulls(f: &mut FunctionDeclaration) {
    for p in f.parameters.iter_mut() {
        if p.default.is_none() && sk_ast::typestr::is_optional(&p.type_name) {
            p.default = Some(Box::new(sk_ast::Node::new(ExpressionKind::NilLiteral)));
        }
    }
}

impl Pass for ImplicitNullInOptionals {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [sk_ast::Node { payload: sk_ast::StatementKind::Function(f), .. }] = result.as_mut_slice() {
            add_implicit_nulls(f);
        }
        if let [sk_ast::Node { payload: sk_ast::StatementKind::Initializer(init), .. }] = result.as_mut_slice() {
            add_implicit_nulls(&mut init.function);
        }
        result
    }
}

/// A closure parameter the source left unnamed (`$0`, `$1`, ...) gets a
/// synthesized name, since the target requires every lambda parameter
/// to be named.
pub struct AnonymousParameterRename;

fn rename_anonymous(params: &mut [sk_ast::Ident]) {
    for (i, p) in params.iter_mut().enumerate() {
        if p.starts_with('$') {
            *p = format!("p{i}").into();
        }
    }
}

impl Pass for AnonymousParameterRename {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let mut expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::Closure { parameters, .. } = &mut expr.payload {
            rename_anonymous(parameters);
        }
        expr
    }
}

/// A reference to a type nested inside another declaration needs the
/// enclosing type's name prefixed on first mention within a sibling
/// scope, since the target does not implicitly search enclosing scopes
/// the way the source does for nested-type lookup.
pub struct InnerTypePrefixes<'ctx> {
    pub ctx: &'ctx sk_ctx::Context,
}

impl Pass for InnerTypePrefixes<'_> {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let mut expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::TypeReference { type_name } = &mut expr.payload {
            if !type_name.contains('.') {
                if let Some(owner) = self.ctx.find_enum_owner(type_name) {
                    *type_name = format!("{owner}.{type_name}").into();
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
    fn self_reference_becomes_this() {
        let mut pass = SelfToThis;
        let mut parents = Parents::new();
        let expr = sk_ast::Node::new(ExpressionKind::DeclarationReference {
            name: "self".into(),
            type_name: None,
            is_standard_library: false,
        });
        let result = pass.replace_expression(expr, &mut parents);
        assert!(matches!(&result.payload, ExpressionKind::DeclarationReference { name, .. } if name == "this"));
    }

    #[test]
    fn optional_parameter_gains_implicit_null_default() {
        let mut f = FunctionDeclaration {
            name: "greet".into(),
            generic_parameters: vec![],
            parameters: vec![sk_ast::FunctionParameter {
                label: "name".into(),
                api_label: None,
                type_name: "String?".into(),
                default: None,
                is_variadic: false,
                is_autoclosure: false,
            }],
            return_type: None,
            body: vec![],
            is_just_protocol_interface: false,
            modifiers: sk_ast::DeclModifiers::default(),
            extends_type: None,
        };
        add_implicit_nulls(&mut f);
        assert!(f.parameters[0].default.is_some());
    }

    #[test]
    fn anonymous_closure_parameters_get_synthesized_names() {
        let mut params: Vec<sk_ast::Ident> = vec!["$0".into(), "$1".into()];
        rename_anonymous(&mut params);
        assert_eq!(params, vec!["p0".to_string(), "p1".to_string()]);
    }
}
