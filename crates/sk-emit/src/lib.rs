//! Serializes a transpiled file's declarations into target source text.
//!
//! This is the last stage of the pipeline (spec.md §4.7): AST -> `Doc`
//! (`stmt`/`expr`) -> `Translation` (`printer`), reading `sk_ctx::Context`
//! for the enum/sealed-class classification and function-translation
//! lookups the lowering needs, and `sk_ctx::Config` for the indentation
//! string.

pub mod doc;
pub mod expr;
pub mod literals;
pub mod printer;
pub mod stmt;
pub mod typestr;

use sk_ast::Statement;
use sk_buffer::Translation;
use sk_ctx::{Config, Context};

/// Emits one file's top-level declarations, returning the resolved
/// source text and its line map (spec.md §4.3's `Translation::resolve`).
pub fn emit_file(declarations: &[Statement], ctx: &Context, config: &Config) -> (String, Vec<sk_buffer::LineMapEntry>) {
    let doc = stmt::file_body_doc(declarations, ctx);
    let translation = printer::print(&doc, &config.indentation_string);
    translation.resolve()
}

/// Emits a single declaration in isolation, mostly useful for tests and
/// for a REPL-style single-statement preview.
pub fn emit_statement(statement: &Statement, ctx: &Context, config: &Config) -> Translation {
    let d = stmt::stmt_doc(statement, ctx, &[]);
    printer::print(&d, &config.indentation_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_ast::{
        Access, DeclModifiers, EnumDeclaration, EnumElement, ExpressionKind, FunctionDeclaration,
        Node, Radix, StatementKind, VariableDeclaration,
    };

    fn ctx() -> Context {
        Context::new(Config::default())
    }

    #[test]
    fn a_constant_declaration_with_an_int_literal_renders_as_val() {
        let v = VariableDeclaration {
            name: "count".into(),
            is_constant: true,
            type_annotation: Some("Int".into()),
            initializer: Some(Box::new(Node::new(ExpressionKind::IntLiteral { value: 3, radix: Radix::Decimal, type_name: Some("Int".into()) }))),
            accessors: None,
            modifiers: DeclModifiers::default(),
        };
        let stmt = Node::new(StatementKind::Variable(v));
        let c = ctx();
        let rendered = emit_statement(&stmt, &c, &Config::default());
        let (s, _) = rendered.resolve();
        assert_eq!(s, "val count: Int = 3");
    }

    #[test]
    fn a_function_with_a_single_return_expression_uses_shorthand_body() {
        let f = FunctionDeclaration {
            name: "double".into(),
            generic_parameters: vec![],
            parameters: vec![sk_ast::FunctionParameter {
                label: "x".into(),
                api_label: None,
                type_name: "Int".into(),
                default: None,
                is_variadic: false,
                is_autoclosure: false,
            }],
            return_type: Some("Int".into()),
            body: vec![Node::new(StatementKind::Return {
                value: Some(Node::new(ExpressionKind::BinaryOp {
                    operator: "*".into(),
                    lhs: Box::new(Node::new(ExpressionKind::DeclarationReference { name: "x".into(), type_name: Some("Int".into()), is_standard_library: false })),
                    rhs: Box::new(Node::new(ExpressionKind::IntLiteral { value: 2, radix: Radix::Decimal, type_name: Some("Int".into()) })),
                    type_name: Some("Int".into()),
                })),
                label: None,
            })],
            is_just_protocol_interface: false,
            modifiers: DeclModifiers::default(),
            extends_type: None,
        };
        let stmt = Node::new(StatementKind::Function(f));
        let c = ctx();
        let rendered = emit_statement(&stmt, &c, &Config::default());
        let (s, _) = rendered.resolve();
        assert_eq!(s, "fun double(x: Int): Int = x * 2");
    }

    #[test]
    fn enum_class_without_raw_values_has_no_primary_constructor() {
        let e = EnumDeclaration {
            name: "Direction".into(),
            generic_parameters: vec![],
            inherits: vec![],
            elements: vec![
                EnumElement { name: "North".into(), associated_values: vec![], raw_value: None, annotations: vec![] },
                EnumElement { name: "South".into(), associated_values: vec![], raw_value: None, annotations: vec![] },
            ],
            members: vec![],
            modifiers: DeclModifiers { explicit_access: Some(Access::Public), ..Default::default() },
        };
        let c = ctx();
        c.mark_enum_class("Direction");
        let stmt = Node::new(StatementKind::Enum(e));
        let rendered = emit_statement(&stmt, &c, &Config::default());
        let (s, _) = rendered.resolve();
        assert_eq!(s, "public enum class Direction {\n    North,\n    South\n}");
    }

    #[test]
    fn sealed_class_renders_each_element_as_a_nested_subclass() {
        let e = EnumDeclaration {
            name: "Shape".into(),
            generic_parameters: vec![],
            inherits: vec![],
            elements: vec![EnumElement {
                name: "circle".into(),
                associated_values: vec![sk_ast::LabeledType { label: Some("radius".into()), type_name: "Double".into() }],
                raw_value: None,
                annotations: vec![],
            }],
            members: vec![],
            modifiers: DeclModifiers::default(),
        };
        let c = ctx();
        c.mark_sealed_class("Shape");
        let stmt = Node::new(StatementKind::Enum(e));
        let rendered = emit_statement(&stmt, &c, &Config::default());
        let (s, _) = rendered.resolve();
        assert!(s.starts_with("sealed class Shape {"));
        assert!(s.contains("data class Circle(val radius: Double) : Shape()"));
    }
}
