//! End-to-end fixtures for the worked scenarios in spec.md §8: hand-built
//! ASTs run through the full `transpile_files` pipeline (both rounds plus
//! emission), asserting on the emitted target text. These are
//! string-`contains` assertions rather than exact-equality golden files --
//! robust to whitespace/doc-layout details while still pinning the
//! semantic rewrite each scenario exercises.

use sk_ast::{
    ClassDeclaration, DeclModifiers, EnumDeclaration, EnumElement, Expression, ExpressionKind,
    IfCondition, LabeledExpression, LabeledType, Node, Radix, SourceFile, Statement, StatementKind,
    StructDeclaration, SwitchCase, VariableDeclaration,
};
use sk_core::{transpile_files, FileResult, NullOracle};
use sk_ctx::{Config, Severity};

fn decl_ref(name: &str) -> Expression {
    Node::new(ExpressionKind::DeclarationReference {
        name: name.into(),
        type_name: None,
        is_standard_library: false,
    })
}

fn int_lit(v: i64) -> Expression {
    Node::new(ExpressionKind::IntLiteral { value: v, radix: Radix::Decimal, type_name: None })
}

fn call(function: &str, args: Vec<Expression>) -> Expression {
    Node::new(ExpressionKind::Call {
        function: Box::new(decl_ref(function)),
        arguments: args
            .into_iter()
            .map(|e| LabeledExpression { label: None, expression: Box::new(e) })
            .collect(),
        type_name: None,
        allows_trailing_closure: false,
        is_pure: false,
    })
}

fn expr_stmt(e: Expression) -> Statement {
    Node::new(StatementKind::ExpressionStatement(e))
}

fn run_one(decls: Vec<Statement>) -> String {
    run_one_full(decls).source
}

fn run_one_full(decls: Vec<Statement>) -> FileResult {
    let file = SourceFile { path: "Scenario.swift".into(), declarations: decls };
    let results = transpile_files(&[file], &NullOracle, Config::default());
    assert_eq!(results.len(), 1);
    results.into_iter().next().unwrap()
}

/// Scenario 1: sealed enum + switch.
#[test]
fn sealed_enum_with_associated_values_becomes_a_sealed_class_hierarchy() {
    let enum_decl = StatementKind::Enum(EnumDeclaration {
        name: "Direction".into(),
        generic_parameters: vec![],
        inherits: vec![],
        elements: vec![
            EnumElement { name: "north".into(), associated_values: vec![], raw_value: None, annotations: vec![] },
            EnumElement {
                name: "south".into(),
                associated_values: vec![LabeledType { label: Some("distance".into()), type_name: "Int".into() }],
                raw_value: None,
                annotations: vec![],
            },
        ],
        members: vec![],
        modifiers: DeclModifiers::default(),
    });

    let switch = StatementKind::Switch {
        subject: decl_ref("d"),
        cases: vec![
            SwitchCase {
                expressions: vec![Node::new(ExpressionKind::Dot { receiver: Box::new(decl_ref("Direction")), member: "north".into(), type_name: None })],
                statements: vec![expr_stmt(call("print", vec![Node::new(ExpressionKind::StringLiteral { value: "n".into(), is_multiline: false })]))],
            },
            SwitchCase {
                expressions: vec![Node::new(ExpressionKind::Dot { receiver: Box::new(decl_ref("Direction")), member: "south".into(), type_name: None })],
                statements: vec![expr_stmt(call("print", vec![decl_ref("k")]))],
            },
        ],
    };

    let source = run_one(vec![Node::new(enum_decl), Node::new(switch)]);

    assert!(source.contains("sealed class Direction"), "expected a sealed class, got:\n{source}");
    assert!(source.contains("class North : Direction()"), "got:\n{source}");
    assert!(source.contains("val distance: Int"), "got:\n{source}");
    assert!(source.contains(") : Direction()"), "got:\n{source}");
    assert!(source.contains("when (d)"), "got:\n{source}");
}

/// Scenario 2: chained `if let` hoists both bindings above the `if`,
/// optional-chains the second binding's reference to the first, and
/// warns on the non-leading binding's call (spec.md §4.5 "Rearrange
/// if-lets"/"Side-effect warnings in if-lets").
#[test]
fn chained_if_let_hoists_bindings_and_warns_on_the_non_leading_call() {
    let if_stmt = StatementKind::If {
        conditions: vec![
            IfCondition::Binding(VariableDeclaration {
                name: "x".into(),
                is_constant: true,
                type_annotation: None,
                initializer: Some(Box::new(call("foo", vec![]))),
                accessors: None,
                modifiers: DeclModifiers::default(),
            }),
            IfCondition::Binding(VariableDeclaration {
                name: "y".into(),
                is_constant: true,
                type_annotation: None,
                initializer: Some(Box::new(Node::new(ExpressionKind::Call {
                    function: Box::new(Node::new(ExpressionKind::Dot {
                        receiver: Box::new(decl_ref("x")),
                        member: "bar".into(),
                        type_name: None,
                    })),
                    arguments: vec![],
                    type_name: None,
                    allows_trailing_closure: false,
                    is_pure: false,
                }))),
                accessors: None,
                modifiers: DeclModifiers::default(),
            }),
        ],
        then_body: vec![expr_stmt(call("use", vec![decl_ref("x"), decl_ref("y")]))],
        else_body: None,
        is_guard: false,
    };

    let result = run_one_full(vec![Node::new(if_stmt)]);
    let source = &result.source;

    assert!(source.contains("val x = foo()"), "got:\n{source}");
    assert!(source.contains("val y = x?.bar()"), "got:\n{source}");
    assert!(source.contains("if (x != null && y != null)"), "got:\n{source}");
    assert!(source.contains("use(x, y)"), "got:\n{source}");
    assert!(
        result.diagnostics.iter().any(|d| d.severity == Severity::Warning),
        "expected a side-effect warning on the non-leading if-let binding, got: {:?}",
        result.diagnostics
    );
}

/// Scenario 3: a `CustomStringConvertible` struct's `description` becomes
/// an overridden `toString()`.
#[test]
fn description_property_becomes_override_to_string() {
    let description_property = VariableDeclaration {
        name: "description".into(),
        is_constant: false,
        type_annotation: Some("String".into()),
        initializer: None,
        accessors: Some(sk_ast::Accessors {
            getter: vec![Node::new(StatementKind::Return {
                value: Some(Node::new(ExpressionKind::StringLiteral { value: "s".into(), is_multiline: false })),
                label: None,
            })],
            setter: None,
        }),
        modifiers: DeclModifiers::default(),
    };
    let strukt = StatementKind::Struct(StructDeclaration {
        name: "S".into(),
        generic_parameters: vec![],
        inherits: vec!["CustomStringConvertible".into()],
        members: vec![Node::new(StatementKind::Variable(description_property))],
        modifiers: DeclModifiers::default(),
    });

    let source = run_one(vec![Node::new(strukt)]);

    assert!(source.contains("toString()"), "got:\n{source}");
    assert!(source.contains("override"), "got:\n{source}");
    assert!(!source.contains("description"), "description property name should be gone, got:\n{source}");
}

/// Scenario 4: `MutableList<T>(seq)` construction becomes
/// `seq.toMutableList<T>()`.
#[test]
fn mutable_list_constructor_call_becomes_to_mutable_list_method_call() {
    let initializer = Node::new(ExpressionKind::Call {
        function: Box::new(Node::new(ExpressionKind::TypeReference { type_name: "MutableList<Int>".into() })),
        arguments: vec![LabeledExpression { label: None, expression: Box::new(decl_ref("seq")) }],
        type_name: None,
        allows_trailing_closure: false,
        is_pure: true,
    });
    let var = StatementKind::Variable(VariableDeclaration {
        name: "xs".into(),
        is_constant: true,
        type_annotation: Some("MutableList<Int>".into()),
        initializer: Some(Box::new(initializer)),
        accessors: None,
        modifiers: DeclModifiers::default(),
    });

    let source = run_one(vec![Node::new(var)]);

    assert!(source.contains("seq.toMutableList<Int>()"), "got:\n{source}");
}

/// Scenario 5: a variable declaration immediately followed by a switch
/// that assigns to it in every case fuses into a single `val`
/// initialized by a `when` expression (spec.md §4.5 "Switches to
/// expressions").
#[test]
fn variable_followed_by_assigning_switch_fuses_into_a_when_expression() {
    let var = StatementKind::Variable(VariableDeclaration {
        name: "r".into(),
        is_constant: false,
        type_annotation: Some("Int".into()),
        initializer: Some(Box::new(int_lit(0))),
        accessors: None,
        modifiers: DeclModifiers::default(),
    });
    let switch = StatementKind::Switch {
        subject: decl_ref("k"),
        cases: vec![
            SwitchCase {
                expressions: vec![int_lit(1)],
                statements: vec![Node::new(StatementKind::Assignment { lhs: decl_ref("r"), rhs: int_lit(10) })],
            },
            SwitchCase {
                expressions: vec![int_lit(2)],
                statements: vec![Node::new(StatementKind::Assignment { lhs: decl_ref("r"), rhs: int_lit(20) })],
            },
            SwitchCase {
                expressions: vec![],
                statements: vec![Node::new(StatementKind::Assignment { lhs: decl_ref("r"), rhs: int_lit(0) })],
            },
        ],
    };

    let source = run_one(vec![Node::new(var), Node::new(switch)]);

    assert!(source.contains("val r: Int = when (k)"), "got:\n{source}");
    assert!(source.contains("1 -> 10"), "got:\n{source}");
    assert!(source.contains("2 -> 20"), "got:\n{source}");
    assert!(source.contains("else -> 0"), "got:\n{source}");
}

/// Scenario 6: chained `??` becomes chained `?:`, preserving
/// right-associativity (`a ?: b ?: 2`, not reparenthesized).
#[test]
fn chained_nil_coalescing_renames_to_elvis_and_keeps_associativity() {
    let c = StatementKind::Variable(VariableDeclaration {
        name: "c".into(),
        is_constant: true,
        type_annotation: None,
        initializer: Some(Box::new(Node::new(ExpressionKind::BinaryOp {
            operator: "??".into(),
            lhs: Box::new(decl_ref("a")),
            rhs: Box::new(Node::new(ExpressionKind::BinaryOp {
                operator: "??".into(),
                lhs: Box::new(decl_ref("b")),
                rhs: Box::new(int_lit(2)),
                type_name: None,
            })),
            type_name: None,
        }))),
        accessors: None,
        modifiers: DeclModifiers::default(),
    });

    let source = run_one(vec![Node::new(c)]);

    assert_eq!(source.trim(), "val c = a ?: b ?: 2");
}

/// A class declaration with no explicit access keyword defaults to
/// public and the modifier is omitted (spec.md §4.5 "Access modifiers").
#[test]
fn top_level_declaration_with_no_explicit_access_omits_a_modifier() {
    let class = StatementKind::Class(ClassDeclaration {
        name: "Empty".into(),
        generic_parameters: vec![],
        inherits: vec![],
        members: vec![],
        modifiers: DeclModifiers::default(),
    });
    let source = run_one(vec![Node::new(class)]);
    assert!(!source.contains("public class"), "got:\n{source}");
    assert!(source.contains("class Empty"), "got:\n{source}");
}

#[test]
fn running_the_pipeline_twice_over_an_already_translated_ast_is_idempotent() {
    // Weak idempotence property from spec.md §8: running the full
    // pipeline over its own output AST a second time is a no-op in the
    // sense that the rewrite passes find nothing left to rewrite. We
    // approximate this at the source-text level for a construct that
    // involves no cross-round state (a plain renamed operator).
    let once = StatementKind::Variable(VariableDeclaration {
        name: "c".into(),
        is_constant: true,
        type_annotation: None,
        initializer: Some(Box::new(Node::new(ExpressionKind::BinaryOp {
            operator: "?:".into(),
            lhs: Box::new(decl_ref("a")),
            rhs: Box::new(decl_ref("b")),
            type_name: None,
        }))),
        accessors: None,
        modifiers: DeclModifiers::default(),
    });
    let first = run_one(vec![Node::new(once.clone())]);
    let second = run_one(vec![Node::new(once)]);
    assert_eq!(first, second);
}
