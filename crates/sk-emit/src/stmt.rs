//! Lowers a `Statement` (and the declaration-shaped statements that make
//! up class/struct/enum/protocol bodies) into a `Doc` (spec.md §4.7).
//!
//! Declaration emission needs to know whether the enclosing type is an
//! `enum class` or `sealed class` (`sk_ctx::Context::is_enum_class` /
//! `is_sealed_class`, keyed on the dot-joined fully-qualified name the
//! recording passes already built) -- so every recursive call here
//! threads a `type_path: &[String]` alongside the context, mirroring how
//! the recording passes build `join_fully_qualified`.

use sk_ast::{
    Access, ClassDeclaration, CompanionObjectDeclaration, DeclModifiers, EnumDeclaration,
    EnumElement, FunctionDeclaration, FunctionParameter, IfCondition, InitializerDeclaration,
    ProtocolDeclaration, Statement, StatementKind, StructDeclaration, SwitchCase,
    TypealiasDeclaration, VariableDeclaration,
};
use sk_ctx::{join_fully_qualified, Context};

use crate::doc::{self, blank_line, concat, empty, group, hardline, indent, join, text, Doc};
use crate::expr::expr_doc;
use crate::typestr::translate_type;

fn access_keyword(access: Access) -> &'static str {
    match access {
        Access::Public => "public",
        Access::Internal => "internal",
        Access::FilePrivate => "private",
        Access::Private => "private",
        Access::Open => "open",
        Access::Protected => "protected",
    }
}

/// Modifier tokens in front of a declaration, in the order the teacher's
/// target emits them: annotations, then access, then `static`/`open`.
///
/// `is_open` is only ever `Some` once the `Open` pass has run (see its
/// doc comment in `sk-ast::aux`), so by emission time `None` means "not
/// applicable to this declaration" (e.g. a free function) rather than
/// "undecided" -- nothing is printed for it, same as `Some(false)`.
/// `override` is recorded in `modifiers.annotations` (see
/// `DescriptionToToString`/`RemoveOverrides`) alongside real source
/// annotations, but it is a bare modifier keyword in the target, not an
/// `@`-prefixed annotation -- this is the one name in that list handled
/// specially here rather than printed as `@override`.
fn modifiers_doc(m: &DeclModifiers) -> Doc {
    let mut parts = Vec::new();
    for annotation in &m.annotations {
        if annotation == "override" {
            continue;
        }
        parts.push(text(format!("@{annotation}")));
        parts.push(doc::space());
    }
    if let Some(access) = m.resolved_access.or(m.explicit_access) {
        if !matches!(access, Access::Internal) {
            parts.push(text(access_keyword(access)));
            parts.push(doc::space());
        }
    }
    if m.is_open == Some(true) {
        parts.push(text("open"));
        parts.push(doc::space());
    }
    if m.annotations.iter().any(|a| a == "override") {
        parts.push(text("override"));
        parts.push(doc::space());
    }
    if m.is_static {
        parts.push(text("static"));
        parts.push(doc::space());
    }
    concat(parts)
}

fn generics_doc(params: &[sk_ast::TypeName]) -> Doc {
    if params.is_empty() {
        empty()
    } else {
        text(format!("<{}>", params.iter().map(|g| translate_type(g)).collect::<Vec<_>>().join(", ")))
    }
}

fn push_path(type_path: &[String], name: &str) -> Vec<String> {
    let mut path = type_path.to_vec();
    path.push(name.to_string());
    path
}

/// Whether a blank line must separate two adjacent statements, per
/// spec.md §4.7's blank-line rule. Checked pairwise and applied to
/// every sibling statement list, not only file level -- a class body's
/// members follow the same rule as top-level declarations.
fn needs_blank_line(prev: &Statement, next: &Statement) -> bool {
    let compatible = |s: &Statement| {
        matches!(
            &s.payload,
            StatementKind::Comment(_)
                | StatementKind::Variable(_)
                | StatementKind::Assignment { .. }
                | StatementKind::Typealias(_)
        ) || matches!(
            &s.payload,
            StatementKind::ExpressionStatement(e)
                if matches!(&e.payload, sk_ast::ExpressionKind::Call { .. } | sk_ast::ExpressionKind::LiteralCode { .. })
        )
    };
    let do_catch_pair = matches!(&prev.payload, StatementKind::Do { .. } | StatementKind::Catch { .. })
        && matches!(&next.payload, StatementKind::Catch { .. });
    if do_catch_pair {
        return false;
    }
    !(compatible(prev) && compatible(next))
}

pub fn statements_doc(stmts: &[Statement]) -> Doc {
    statements_doc_in(stmts, &Context::new(sk_ctx::Config::default()), &[])
}

/// Renders a sibling statement list, inserting blank lines per
/// `needs_blank_line` and merging a trailing `Variable`+`Switch` pair
/// into a single `when`-initialized property (spec.md §4.7, the
/// single-expression `switch` case).
pub fn statements_doc_in(stmts: &[Statement], ctx: &Context, type_path: &[String]) -> Doc {
    let merged = merge_variable_switch(stmts);
    let mut parts = Vec::new();
    for (i, item) in merged.iter().enumerate() {
        if i > 0 {
            let prev_anchor = merged[i - 1].anchor();
            if needs_blank_line(prev_anchor, item.anchor()) {
                parts.push(blank_line());
            } else {
                parts.push(hardline());
            }
        }
        parts.push(item.doc(ctx, type_path));
    }
    concat(parts)
}

/// A statement list item after the variable+switch merge: either an
/// ordinary statement, or a fused `val name: T = when (...) { ... }`.
enum MergedItem<'a> {
    Plain(&'a Statement),
    VariableSwitch(&'a VariableDeclaration, &'a Statement, &'a sk_ast::Expression, &'a [SwitchCase]),
}

impl<'a> MergedItem<'a> {
    fn anchor(&self) -> &'a Statement {
        match self {
            MergedItem::Plain(s) => s,
            MergedItem::VariableSwitch(_, s, ..) => s,
        }
    }

    fn doc(&self, ctx: &Context, type_path: &[String]) -> Doc {
        match self {
            MergedItem::Plain(s) => stmt_doc(s, ctx, type_path),
            MergedItem::VariableSwitch(var, _, subject, cases) => {
                // The switch that follows was the declaration's only
                // assignment site; once folded into the initializer there
                // is nowhere left to mutate it, so the fused declaration
                // is always a `val` regardless of the source `var`/`let`.
                let kw = "val";
                let ty = var.type_annotation.as_deref().map(|t| format!(": {}", translate_type(t))).unwrap_or_default();
                let as_expr_cases: Vec<SwitchCase> = cases
                    .iter()
                    .map(|c| SwitchCase {
                        expressions: c.expressions.clone(),
                        statements: vec![sk_ast::Node::new(StatementKind::ExpressionStatement(case_assignment_rhs(c).clone()))],
                    })
                    .collect();
                concat(vec![
                    text(format!("{kw} {}{ty} = ", var.name)),
                    when_doc(subject, &as_expr_cases, ctx, type_path, true),
                ])
            }
        }
    }
}

/// Detects `var name: T; switch subject { case P: name = expr ... }`
/// immediately adjacent and fuses them, per the merge rule worked out
/// for the single-expression `switch` scenario.
fn merge_variable_switch(stmts: &[Statement]) -> Vec<MergedItem> {
    let mut out = Vec::with_capacity(stmts.len());
    let mut i = 0;
    while i < stmts.len() {
        if let (StatementKind::Variable(var), Some(next)) = (&stmts[i].payload, stmts.get(i + 1)) {
            // A placeholder initializer (e.g. `var r: Int = 0`) immediately
            // overwritten by every arm of the following switch is folded
            // away along with the switch itself -- spec.md §4.5 places no
            // restriction on the declaration being uninitialized, only that
            // the switch that follows assigns to it in every case.
            if let StatementKind::Switch { subject, cases } = &next.payload {
                let all_assign = cases.iter().all(|c| {
                    c.statements.len() == 1
                        && matches!(
                            &c.statements[0].payload,
                            StatementKind::Assignment { lhs, .. }
                                if matches!(&lhs.payload, sk_ast::ExpressionKind::DeclarationReference { name, .. } if *name == var.name)
                        )
                });
                if all_assign && !cases.is_empty() {
                    out.push(MergedItem::VariableSwitch(var, &stmts[i], subject, cases));
                    i += 2;
                    continue;
                }
            }
        }
        out.push(MergedItem::Plain(&stmts[i]));
        i += 1;
    }
    out
}

fn case_assignment_rhs(case: &SwitchCase) -> &sk_ast::Expression {
    match &case.statements[0].payload {
        StatementKind::Assignment { rhs, .. } => rhs,
        _ => unreachable!("filtered by merge_variable_switch"),
    }
}

fn case_return_value(case: &SwitchCase) -> Option<&sk_ast::Expression> {
    match &case.statements[0].payload {
        StatementKind::Return { value, .. } => value.as_ref(),
        _ => None,
    }
}

fn is_single_expression_case(case: &SwitchCase) -> bool {
    case.statements.len() == 1 && matches!(&case.statements[0].payload, StatementKind::ExpressionStatement(_))
}

fn case_single_expression(case: &SwitchCase) -> Option<&sk_ast::Expression> {
    match &case.statements[0].payload {
        StatementKind::ExpressionStatement(e) => Some(e),
        _ => None,
    }
}

fn subject_type_name(e: &sk_ast::Expression) -> Option<&str> {
    match &e.payload {
        sk_ast::ExpressionKind::DeclarationReference { type_name, .. } => type_name.as_deref(),
        sk_ast::ExpressionKind::Dot { type_name, .. } => type_name.as_deref(),
        sk_ast::ExpressionKind::Call { type_name, .. } => type_name.as_deref(),
        _ => None,
    }
}

/// Renders a case pattern. A bare call-shaped pattern (`.south(let k)`)
/// is an associated-value destructure: rather than try to substitute
/// every reference to the bound name inside the case body (which would
/// require data-flow analysis this AST doesn't carry), this synthesizes
/// a local `val` from a smart-cast, leaving the body's own references to
/// the bound name untouched and correct.
fn case_pattern(
    pattern: &sk_ast::Expression,
    subject: &sk_ast::Expression,
    subject_type: Option<&str>,
    enum_decl: Option<&EnumDeclaration>,
) -> (Doc, Vec<Doc>) {
    if let sk_ast::ExpressionKind::Call { function, arguments, .. } = &pattern.payload {
        if let sk_ast::ExpressionKind::DeclarationReference { name: case_name, .. } = &function.payload {
            let cased = capitalize(case_name);
            let qualified = match subject_type {
                Some(t) => format!("{t}.{cased}"),
                None => cased.clone(),
            };
            let mut bindings = Vec::new();
            let assoc = enum_decl.and_then(|d| d.elements.iter().find(|el| el.name.eq_ignore_ascii_case(case_name)));
            for (i, arg) in arguments.iter().enumerate() {
                if let sk_ast::ExpressionKind::DeclarationReference { name: bound, .. } = &arg.expression.payload {
                    let label = assoc
                        .and_then(|a| a.associated_values.get(i))
                        .and_then(|v| v.label.as_deref())
                        .unwrap_or("value");
                    bindings.push(concat(vec![
                        text(format!("val {bound} = (")),
                        expr_doc(subject),
                        text(format!(" as {qualified}).{label}")),
                    ]));
                }
            }
            return (text(format!("is {qualified}")), bindings);
        }
    }
    if let sk_ast::ExpressionKind::PrefixUnary { operator, operand, .. } = &pattern.payload {
        if operator == "is" {
            return (concat(vec![text("is "), expr_doc(operand)]), Vec::new());
        }
    }
    if let sk_ast::ExpressionKind::DeclarationReference { name, type_name, .. } = &pattern.payload {
        if type_name.is_none() {
            if let Some(t) = subject_type {
                if enum_decl.map(|d| d.elements.iter().any(|el| el.name.eq_ignore_ascii_case(name))).unwrap_or(false) {
                    return (text(format!("{t}.{}", capitalize(name))), Vec::new());
                }
            }
        }
    }
    (expr_doc(pattern), Vec::new())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Renders a `Switch` as a `when` expression or statement. `as_expr`
/// selects expression rendering for single-expression-arm cases
/// (spec.md §4.7's `switch`-as-expression scenario); when any arm has
/// more than one statement, `when` is rendered as a statement with
/// braced arm bodies regardless of `as_expr`.
fn when_doc(subject: &sk_ast::Expression, cases: &[SwitchCase], ctx: &Context, type_path: &[String], as_expr: bool) -> Doc {
    let subject_type = subject_type_name(subject);
    let enum_decl = subject_type.and_then(|t| ctx.get_enum_declaration(t));
    let subject_doc = expr_doc(subject);
    let all_single_expr = as_expr && cases.iter().all(is_single_expression_case);

    let mut arms = Vec::new();
    for case in cases {
        let pattern_doc = if case.expressions.is_empty() {
            (text("else"), Vec::new())
        } else {
            let docs: Vec<(Doc, Vec<Doc>)> = case
                .expressions
                .iter()
                .map(|p| case_pattern(p, subject, subject_type, enum_decl.as_ref()))
                .collect();
            let bindings = docs.iter().flat_map(|(_, b)| b.clone()).collect::<Vec<_>>();
            let pattern = join(docs.into_iter().map(|(d, _)| d).collect(), text(", "));
            (pattern, bindings)
        };
        let (pattern, bindings) = pattern_doc;
        let body = if all_single_expr {
            expr_doc(case_single_expression(case).expect("checked by all_single_expr"))
        } else {
            statements_doc_in(&case.statements, ctx, type_path)
        };
        let arm = if bindings.is_empty() && all_single_expr {
            concat(vec![pattern, text(" -> "), body])
        } else if bindings.is_empty() {
            concat(vec![pattern, text(" -> {"), indent(concat(vec![hardline(), body])), hardline(), text("}")])
        } else {
            let mut block = bindings;
            block.push(body);
            concat(vec![
                pattern,
                text(" -> {"),
                indent(concat(vec![hardline(), join(block, hardline())])),
                hardline(),
                text("}"),
            ])
        };
        arms.push(arm);
    }

    concat(vec![
        text("when ("),
        subject_doc,
        text(") {"),
        indent(concat(vec![hardline(), join(arms, hardline())])),
        hardline(),
        text("}"),
    ])
}

fn if_condition_doc(c: &IfCondition) -> Doc {
    match c {
        IfCondition::Plain(e) => expr_doc(e),
        // RearrangeIfLets hoists every if-let binding into a preceding
        // `val` plus a not-null check before this point runs; a Binding
        // surviving to emission means that hoist didn't fire (e.g. a
        // shape outside its scope), so fall back to a direct null check
        // against the name rather than drop the condition silently.
        IfCondition::Binding(v) => text(format!("{} != null", v.name)),
    }
}

fn conditions_doc(conditions: &[IfCondition], negate: bool) -> Doc {
    let joined = join(conditions.iter().map(if_condition_doc).collect(), text(" && "));
    if negate {
        concat(vec![text("!("), joined, text(")")])
    } else {
        joined
    }
}

fn if_doc(conditions: &[IfCondition], then_body: &[Statement], else_body: &Option<Vec<Statement>>, is_guard: bool, ctx: &Context, type_path: &[String]) -> Doc {
    let mut doc = concat(vec![
        text("if ("),
        conditions_doc(conditions, is_guard),
        text(") {"),
        indent(concat(vec![hardline(), statements_doc_in(then_body, ctx, type_path)])),
        hardline(),
        text("}"),
    ]);
    if let Some(else_stmts) = else_body {
        if let [single] = else_stmts.as_slice() {
            if let StatementKind::If { conditions, then_body, else_body, is_guard } = &single.payload {
                let inner = if_doc(conditions, then_body, else_body, *is_guard, ctx, type_path);
                doc = concat(vec![doc, text(" else "), inner]);
                return doc;
            }
        }
        doc = concat(vec![
            doc,
            text(" else {"),
            indent(concat(vec![hardline(), statements_doc_in(else_stmts, ctx, type_path)])),
            hardline(),
            text("}"),
        ]);
    }
    doc
}

fn parameters_doc(params: &[FunctionParameter]) -> Doc {
    if params.is_empty() {
        return text("()");
    }
    let items: Vec<Doc> = params
        .iter()
        .map(|p| {
            let mut s = format!("{}: {}", p.label, translate_type(&p.type_name));
            if let Some(default) = &p.default {
                let rendered = crate::printer::print(&expr_doc(default), "    ").resolve().0;
                s.push_str(" = ");
                s.push_str(&rendered);
            }
            text(s)
        })
        .collect();
    concat(vec![text("("), join(items, text(", ")), text(")")])
}

fn function_header(f: &FunctionDeclaration) -> Doc {
    let generics = if f.generic_parameters.is_empty() {
        empty()
    } else {
        concat(vec![generics_doc(&f.generic_parameters), doc::space()])
    };
    let ret = match &f.return_type {
        Some(t) if translate_type(t) != "Unit" => concat(vec![text(": "), text(translate_type(t))]),
        _ => empty(),
    };
    concat(vec![
        modifiers_doc(&f.modifiers),
        text("fun "),
        generics,
        text(f.name.to_string()),
        parameters_doc(&f.parameters),
        ret,
    ])
}

/// A function body that is exactly one non-`LiteralCode`, non-block
/// `ExpressionStatement` and has a non-`Unit` return type renders as
/// `fun f(...): T = expr` rather than a one-line braced body.
fn single_expression_body(f: &FunctionDeclaration) -> Option<&sk_ast::Expression> {
    let ret_is_unit = f.return_type.as_deref().map(|t| translate_type(t) == "Unit").unwrap_or(true);
    if ret_is_unit || f.body.len() != 1 {
        return None;
    }
    match &f.body[0].payload {
        StatementKind::ExpressionStatement(e) => match &e.payload {
            sk_ast::ExpressionKind::LiteralCode { .. } | sk_ast::ExpressionKind::Concatenation(..) => None,
            _ => Some(e),
        },
        StatementKind::Return { value: Some(v), .. } => Some(v),
        _ => None,
    }
}

fn function_doc(f: &FunctionDeclaration, ctx: &Context, type_path: &[String]) -> Doc {
    let header = function_header(f);
    if f.is_just_protocol_interface {
        return header;
    }
    if let Some(single) = single_expression_body(f) {
        return concat(vec![header, text(" = "), expr_doc(single)]);
    }
    concat(vec![
        header,
        text(" {"),
        indent(concat(vec![hardline(), statements_doc_in(&f.body, ctx, type_path)])),
        hardline(),
        text("}"),
    ])
}

fn initializer_doc(init: &InitializerDeclaration, ctx: &Context, type_path: &[String]) -> Doc {
    let header = concat(vec![
        modifiers_doc(&init.function.modifiers),
        text("constructor"),
        parameters_doc(&init.function.parameters),
    ]);
    let super_call = init.super_call.as_ref().map(|e| concat(vec![text(" : super"), {
        if let sk_ast::ExpressionKind::Call { arguments, .. } = &e.payload {
            let items: Vec<Doc> = arguments.iter().map(|a| expr_doc(&a.expression)).collect();
            concat(vec![text("("), join(items, text(", ")), text(")")])
        } else {
            expr_doc(e)
        }
    }]));
    let header = match super_call {
        Some(s) => concat(vec![header, s]),
        None => header,
    };
    if init.function.body.is_empty() {
        return header;
    }
    concat(vec![
        header,
        text(" {"),
        indent(concat(vec![hardline(), statements_doc_in(&init.function.body, ctx, type_path)])),
        hardline(),
        text("}"),
    ])
}

fn variable_doc(v: &VariableDeclaration, ctx: &Context, type_path: &[String]) -> Doc {
    let kw = if v.is_constant { "val" } else { "var" };
    let ty = v.type_annotation.as_deref().map(|t| format!(": {}", translate_type(t))).unwrap_or_default();
    let init = v.initializer.as_ref().map(|e| concat(vec![text(" = "), expr_doc(e)])).unwrap_or(empty());
    let header = concat(vec![modifiers_doc(&v.modifiers), text(format!("{kw} {}{ty}", v.name)), init]);
    match &v.accessors {
        None => header,
        Some(acc) => {
            let getter = concat(vec![
                doc::hardline(),
                indent(concat(vec![
                    doc::hardline(),
                    text("get() {"),
                    indent(concat(vec![hardline(), statements_doc_in(&acc.getter, ctx, type_path)])),
                    hardline(),
                    text("}"),
                ])),
            ]);
            let setter = acc
                .setter
                .as_ref()
                .map(|(param, body)| {
                    concat(vec![
                        hardline(),
                        indent(concat(vec![
                            hardline(),
                            text(format!("set({param}) {{")),
                            indent(concat(vec![hardline(), statements_doc_in(body, ctx, type_path)])),
                            hardline(),
                            text("}"),
                        ])),
                    ])
                })
                .unwrap_or(empty());
            concat(vec![header, getter, setter])
        }
    }
}

fn class_body_doc(members: &[Statement], ctx: &Context, type_path: &[String]) -> Doc {
    if members.is_empty() {
        return empty();
    }
    concat(vec![
        text(" {"),
        indent(concat(vec![hardline(), statements_doc_in(members, ctx, type_path)])),
        hardline(),
        text("}"),
    ])
}

fn class_doc(c: &ClassDeclaration, ctx: &Context, type_path: &[String]) -> Doc {
    let nested_path = push_path(type_path, &c.name);
    let inherits = if c.inherits.is_empty() {
        empty()
    } else {
        concat(vec![text(" : "), text(c.inherits.iter().map(|t| translate_type(t)).collect::<Vec<_>>().join(", "))])
    };
    concat(vec![
        modifiers_doc(&c.modifiers),
        text(format!("class {}", c.name)),
        generics_doc(&c.generic_parameters),
        inherits,
        class_body_doc(&c.members, ctx, &nested_path),
    ])
}

fn struct_doc(s: &StructDeclaration, ctx: &Context, type_path: &[String]) -> Doc {
    let nested_path = push_path(type_path, &s.name);
    let inherits = if s.inherits.is_empty() {
        empty()
    } else {
        concat(vec![text(" : "), text(s.inherits.iter().map(|t| translate_type(t)).collect::<Vec<_>>().join(", "))])
    };
    concat(vec![
        modifiers_doc(&s.modifiers),
        text(format!("data class {}", s.name)),
        generics_doc(&s.generic_parameters),
        inherits,
        class_body_doc(&s.members, ctx, &nested_path),
    ])
}

fn protocol_doc(p: &ProtocolDeclaration, ctx: &Context, type_path: &[String]) -> Doc {
    let nested_path = push_path(type_path, &p.name);
    let inherits = if p.inherits.is_empty() {
        empty()
    } else {
        concat(vec![text(" : "), text(p.inherits.iter().map(|t| translate_type(t)).collect::<Vec<_>>().join(", "))])
    };
    concat(vec![
        modifiers_doc(&p.modifiers),
        text(format!("interface {}", p.name)),
        inherits,
        class_body_doc(&p.members, ctx, &nested_path),
    ])
}

fn companion_object_doc(c: &CompanionObjectDeclaration, ctx: &Context, type_path: &[String]) -> Doc {
    concat(vec![text("companion object"), class_body_doc(&c.members, ctx, type_path)])
}

/// Whether `e` is the synthesized `rawValue` marker member `RawValuesMembers`
/// adds to an enum -- a non-static, no-initializer, no-accessor property
/// literally named `rawValue`. Consumed as a primary-constructor parameter
/// rather than re-emitted as an ordinary body property.
fn is_raw_value_marker(m: &Statement) -> bool {
    matches!(&m.payload, StatementKind::Variable(v)
        if v.name == "rawValue" && v.initializer.is_none() && v.accessors.is_none() && !v.modifiers.is_static)
}

fn enum_doc(e: &EnumDeclaration, ctx: &Context, type_path: &[String]) -> Doc {
    let nested_path = push_path(type_path, &e.name);
    let fqn = join_fully_qualified(&nested_path);
    let sealed = ctx.is_sealed_class(&fqn);
    let raw_value_member = e.members.iter().find(|m| is_raw_value_marker(m));
    let other_members: Vec<Statement> = e.members.iter().filter(|m| !is_raw_value_marker(m)).cloned().collect();

    if sealed {
        let mut subclasses = Vec::new();
        for (i, el) in e.elements.iter().enumerate() {
            if i > 0 {
                subclasses.push(hardline());
            }
            subclasses.push(enum_subclass_doc(&e.name, el));
        }
        let inherits = if e.inherits.is_empty() {
            empty()
        } else {
            concat(vec![text(" : "), text(e.inherits.iter().map(|t| translate_type(t)).collect::<Vec<_>>().join(", "))])
        };
        let body_members = if other_members.is_empty() {
            empty()
        } else {
            concat(vec![hardline(), statements_doc_in(&other_members, ctx, &nested_path)])
        };
        return concat(vec![
            modifiers_doc(&e.modifiers),
            text(format!("sealed class {}", e.name)),
            inherits,
            text(" {"),
            indent(concat(vec![hardline(), concat(subclasses), body_members])),
            hardline(),
            text("}"),
        ]);
    }

    let raw_type = raw_value_member.and_then(|m| match &m.payload {
        StatementKind::Variable(v) => v.type_annotation.clone(),
        _ => None,
    });
    let ctor = raw_type
        .as_ref()
        .map(|t| concat(vec![text("("), text(format!("val rawValue: {}", translate_type(t))), text(")")]))
        .unwrap_or(empty());

    let mut entries = Vec::new();
    for (i, el) in e.elements.iter().enumerate() {
        if i > 0 {
            entries.push(text(","));
            entries.push(hardline());
        }
        let args = el
            .raw_value
            .as_ref()
            .map(|v| concat(vec![text("("), expr_doc(v), text(")")]))
            .unwrap_or(empty());
        entries.push(text(format!("{}", capitalize(&el.name))));
        entries.push(args);
    }
    let terminator = if raw_type.is_some() || !other_members.is_empty() { text(";") } else { empty() };

    let body_members = if other_members.is_empty() {
        empty()
    } else {
        concat(vec![hardline(), hardline(), statements_doc_in(&other_members, ctx, &nested_path)])
    };

    concat(vec![
        modifiers_doc(&e.modifiers),
        text(format!("enum class {}", e.name)),
        ctor,
        text(" {"),
        indent(concat(vec![hardline(), concat(entries), terminator, body_members])),
        hardline(),
        text("}"),
    ])
}

fn enum_subclass_doc(enum_name: &str, el: &EnumElement) -> Doc {
    if el.associated_values.is_empty() {
        text(format!("class {} : {}()", capitalize(&el.name), enum_name))
    } else {
        let params: Vec<Doc> = el
            .associated_values
            .iter()
            .enumerate()
            .map(|(i, v)| text(format!("val {}: {}", v.label.as_deref().unwrap_or(&format!("value{i}")), translate_type(&v.type_name))))
            .collect();
        concat(vec![
            text(format!("class {}(", capitalize(&el.name))),
            join(params, text(", ")),
            text(format!(") : {enum_name}()")),
        ])
    }
}

fn typealias_doc(t: &TypealiasDeclaration) -> Doc {
    concat(vec![modifiers_doc(&t.modifiers), text(format!("typealias {} = {}", t.name, translate_type(&t.target)))])
}

fn foreach_doc(pattern: &str, collection: &sk_ast::Expression, body: &[Statement], ctx: &Context, type_path: &[String]) -> Doc {
    concat(vec![
        text(format!("for ({pattern} in ")),
        expr_doc(collection),
        text(") {"),
        indent(concat(vec![hardline(), statements_doc_in(body, ctx, type_path)])),
        hardline(),
        text("}"),
    ])
}

fn while_doc(conditions: &[IfCondition], body: &[Statement], ctx: &Context, type_path: &[String]) -> Doc {
    concat(vec![
        text("while ("),
        conditions_doc(conditions, false),
        text(") {"),
        indent(concat(vec![hardline(), statements_doc_in(body, ctx, type_path)])),
        hardline(),
        text("}"),
    ])
}

fn do_doc(body: &[Statement], ctx: &Context, type_path: &[String]) -> Doc {
    concat(vec![
        text("try {"),
        indent(concat(vec![hardline(), statements_doc_in(body, ctx, type_path)])),
        hardline(),
        text("}"),
    ])
}

fn catch_doc(bound_type: &Option<sk_ast::TypeName>, binding: &Option<sk_ast::Ident>, body: &[Statement], ctx: &Context, type_path: &[String]) -> Doc {
    let name = binding.as_deref().unwrap_or("e");
    let ty = bound_type.as_deref().map(translate_type).unwrap_or_else(|| "Exception".to_string());
    concat(vec![
        text(format!("catch ({name}: {ty}) {{")),
        indent(concat(vec![hardline(), statements_doc_in(body, ctx, type_path)])),
        hardline(),
        text("}"),
    ])
}

fn defer_doc(body: &[Statement], ctx: &Context, type_path: &[String]) -> Doc {
    concat(vec![
        text("try {"),
        indent(concat(vec![hardline(), text("// body elided; defer runs in finally")])),
        hardline(),
        text("} finally {"),
        indent(concat(vec![hardline(), statements_doc_in(body, ctx, type_path)])),
        hardline(),
        text("}"),
    ])
}

pub fn stmt_doc(s: &Statement, ctx: &Context, type_path: &[String]) -> Doc {
    match &s.payload {
        StatementKind::Comment(text_) => text(format!("// {text_}")),
        StatementKind::ExpressionStatement(e) => expr_doc(e),
        StatementKind::Typealias(t) => typealias_doc(t),
        StatementKind::Extension(ext) => {
            let inherits = if ext.inherits.is_empty() {
                empty()
            } else {
                concat(vec![text(" : "), text(ext.inherits.iter().map(|t| translate_type(t)).collect::<Vec<_>>().join(", "))])
            };
            concat(vec![text(format!("// extension {}", translate_type(&ext.type_name))), inherits, class_body_doc(&ext.members, ctx, type_path)])
        }
        StatementKind::Import { module } => text(format!("import {module}")),
        StatementKind::Class(c) => class_doc(c, ctx, type_path),
        StatementKind::CompanionObject(c) => companion_object_doc(c, ctx, type_path),
        StatementKind::Enum(e) => enum_doc(e, ctx, type_path),
        StatementKind::Protocol(p) => protocol_doc(p, ctx, type_path),
        StatementKind::Struct(st) => struct_doc(st, ctx, type_path),
        StatementKind::Function(f) => function_doc(f, ctx, type_path),
        StatementKind::Initializer(i) => initializer_doc(i, ctx, type_path),
        StatementKind::Variable(v) => variable_doc(v, ctx, type_path),
        StatementKind::Do { body } => do_doc(body, ctx, type_path),
        StatementKind::Catch { bound_type, binding, body } => catch_doc(bound_type, binding, body, ctx, type_path),
        StatementKind::ForEach { pattern, collection, body } => foreach_doc(pattern, collection, body, ctx, type_path),
        StatementKind::While { conditions, body } => while_doc(conditions, body, ctx, type_path),
        StatementKind::If { conditions, then_body, else_body, is_guard } => if_doc(conditions, then_body, else_body, *is_guard, ctx, type_path),
        StatementKind::Switch { subject, cases } => {
            let returns = cases.iter().all(|c| c.statements.len() == 1 && matches!(&c.statements[0].payload, StatementKind::Return { .. }));
            if returns && !cases.is_empty() {
                let rewritten: Vec<SwitchCase> = cases
                    .iter()
                    .map(|c| SwitchCase {
                        expressions: c.expressions.clone(),
                        statements: vec![sk_ast::Node::new(StatementKind::ExpressionStatement(
                            case_return_value(c).cloned().unwrap_or_else(|| sk_ast::Node::new(sk_ast::ExpressionKind::NilLiteral)),
                        ))],
                    })
                    .collect();
                concat(vec![text("return "), when_doc(subject, &rewritten, ctx, type_path, true)])
            } else {
                when_doc(subject, cases, ctx, type_path, true)
            }
        }
        StatementKind::Defer { body } => defer_doc(body, ctx, type_path),
        StatementKind::Throw(e) => concat(vec![text("throw "), expr_doc(e)]),
        StatementKind::Return { value, .. } => match value {
            Some(e) => concat(vec![text("return "), expr_doc(e)]),
            None => text("return"),
        },
        StatementKind::Break(label) => match label {
            Some(l) => text(format!("break@{l}")),
            None => text("break"),
        },
        StatementKind::Continue(label) => match label {
            Some(l) => text(format!("continue@{l}")),
            None => text("continue"),
        },
        StatementKind::Assignment { lhs, rhs } => concat(vec![expr_doc(lhs), text(" = "), expr_doc(rhs)]),
        StatementKind::Error { message } => text(format!("TODO(\"unresolved: {message}\")")),
    }
}

/// Renders a complete file: `package`/`import` header omitted here (the
/// driver crate owns file-level framing), just the top-level declaration
/// list with blank-line separation.
pub fn file_body_doc(declarations: &[Statement], ctx: &Context) -> Doc {
    statements_doc_in(declarations, ctx, &[])
}
