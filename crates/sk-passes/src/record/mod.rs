//! First-round recording passes (spec.md §4.4). Each one runs over
//! every file before any second-round rewrite pass sees any file, and
//! each is a thin, deliberately narrow `Pass` that records into the
//! shared [`sk_ctx::Context`] and otherwise defers to the default
//! recursion.

use sk_ast::{
    EnumDeclaration, ExpressionKind, FunctionDeclaration, Node, Statement, StatementKind,
};
use sk_ctx::{Context, FunctionTranslation};
use sk_pass::{walk, Parents, Pass};

use crate::util::{fqn_of, immediate_enclosing_type};

/// The two source type names that make an enum raw-representable. Not a
/// general-purpose "is this the standard library" check -- just the two
/// families the implicit-raw-value and clean-inheritance passes care
/// about.
fn is_raw_representable_family(name: &str) -> bool {
    matches!(name, "Int" | "String")
}

fn template_pattern_key(name: &str, parameters: &[sk_ast::FunctionParameter]) -> String {
    let labels: String = parameters
        .iter()
        .map(|p| format!("{}:", p.api_label.as_deref().unwrap_or(p.label.as_str())))
        .collect();
    format!("{name}({labels})")
}

/// 1. Fills in the enclosing type's name as an initializer's return type,
/// since the frontend never supplies one.
pub struct InitializerReturnTypes;

impl Pass for InitializerReturnTypes {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let enclosing = immediate_enclosing_type(parents);
        let mut result = walk::default_statement(self, stmt, parents);
        if let [Node { payload: StatementKind::Initializer(init), .. }] = result.as_mut_slice() {
            if init.function.return_type.is_none() {
                if let Some(name) = enclosing {
                    init.function.return_type = Some(name.into());
                }
            }
        }
        result
    }
}

/// 2. Registers source-to-target snippet templates. A function
/// annotated `template` whose body is exactly one literal-code
/// expression statement records its call signature as the source
/// pattern and the literal code as the target snippet (see the
/// template open question in spec.md §9: the pattern language beyond
/// this exact-match form is not specified and is deliberately not
/// guessed at here).
pub struct TemplateRecording<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for TemplateRecording<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        if let StatementKind::Function(f) = &stmt.payload {
            if f.modifiers.annotations.iter().any(|a| a == "template") {
                if let [Node {
                    payload: StatementKind::ExpressionStatement(expr),
                    ..
                }] = f.body.as_slice()
                {
                    if let ExpressionKind::LiteralCode { code, .. } = &expr.payload {
                        let pattern = template_pattern_key(&f.name, &f.parameters);
                        self.ctx.register_template(pattern, code.to_string());
                    }
                }
            }
        }
        walk::default_statement(self, stmt, parents)
    }
}

/// 3. Adds every protocol name to the context.
pub struct ProtocolRecording<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for ProtocolRecording<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        if let StatementKind::Protocol(p) = &stmt.payload {
            self.ctx.record_protocol(fqn_of(parents, &p.name));
        }
        walk::default_statement(self, stmt, parents)
    }
}

/// 4. Registers the signature of every declared initializer.
pub struct InitializerRecording<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for InitializerRecording<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        if let StatementKind::Initializer(init) = &stmt.payload {
            let type_name = immediate_enclosing_type(parents);
            self.ctx.record_function_translation(FunctionTranslation {
                source_name: init.prefix.to_string(),
                type_name: type_name.map(Into::into),
                prefix: "init".into(),
                parameters: init.function.parameters.clone(),
            });
        }
        walk::default_statement(self, stmt, parents)
    }
}

/// 5. Records `{fully_qualified_type -> [inherited_names]}` for classes,
/// structs, and enums.
pub struct InheritanceRecording<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for InheritanceRecording<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        match &stmt.payload {
            StatementKind::Class(c) => {
                self.ctx.set_inheritances(fqn_of(parents, &c.name), c.inherits.iter().map(|t| t.to_string()).collect());
            }
            StatementKind::Struct(s) => {
                self.ctx.set_inheritances(fqn_of(parents, &s.name), s.inherits.iter().map(|t| t.to_string()).collect());
            }
            StatementKind::Enum(e) => {
                self.ctx.set_inheritances(fqn_of(parents, &e.name), e.inherits.iter().map(|t| t.to_string()).collect());
            }
            _ => {}
        }
        walk::default_statement(self, stmt, parents)
    }
}

/// 6. For enums inheriting from the integer or string family, fills
/// missing `raw_value`s: strings default to the element name; integers
/// are sequential, previous-plus-one, seeded at `-1` so the first
/// unspecified case is `0`; an explicit integer raw value resets the
/// sequence from that value.
pub struct ImplicitRawValues;

impl Pass for ImplicitRawValues {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [Node { payload: StatementKind::Enum(e), .. }] = result.as_mut_slice() {
            fill_implicit_raw_values(e);
        }
        result
    }
}

fn fill_implicit_raw_values(e: &mut EnumDeclaration) {
    let is_int = e.inherits.iter().any(|t| t == "Int");
    let is_string = e.inherits.iter().any(|t| t == "String");
    if !is_int && !is_string {
        return;
    }
    let mut previous_int = -1i64;
    for element in &mut e.elements {
        if let Some(raw) = &element.raw_value {
            if let ExpressionKind::IntLiteral { value, .. } = &raw.payload {
                previous_int = *value;
            }
            continue;
        }
        if is_string {
            element.raw_value = Some(Box::new(Node::new(ExpressionKind::StringLiteral {
                value: element.name.clone(),
                is_multiline: false,
            })));
        } else {
            previous_int += 1;
            element.raw_value = Some(Box::new(Node::new(ExpressionKind::IntLiteral {
                value: previous_int,
                radix: sk_ast::Radix::Decimal,
                type_name: Some("Int".into()),
            })));
        }
    }
}

/// 7. Removes source-only protocol names and raw-representable types
/// from inheritance lists. Must run after [`ImplicitRawValues`] (which
/// still needs to see `Int`/`String` in the list) and before
/// [`EnumRecording`] (which classifies based on "no superclass" after
/// cleaning).
pub struct CleanInheritances<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for CleanInheritances<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [node] = result.as_mut_slice() {
            let inherits = match &mut node.payload {
                StatementKind::Class(c) => Some(&mut c.inherits),
                StatementKind::Struct(s) => Some(&mut s.inherits),
                StatementKind::Enum(e) => Some(&mut e.inherits),
                _ => None,
            };
            if let Some(inherits) = inherits {
                inherits.retain(|name| !self.ctx.is_protocol(name) && !is_raw_representable_family(name));
            }
        }
        result
    }
}

/// 8. Classifies each enum as enum-class (no associated values anywhere
/// and no superclass) or sealed-class (otherwise). Must run after
/// [`CleanInheritances`].
pub struct EnumRecording<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for EnumRecording<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let result = walk::default_statement(self, stmt, parents);
        if let [Node { payload: StatementKind::Enum(e), .. }] = result.as_slice() {
            let fqn = fqn_of(parents, &e.name);
            let has_associated_values = e.elements.iter().any(|el| !el.associated_values.is_empty());
            let has_superclass = !e.inherits.is_empty();
            if has_associated_values || has_superclass {
                self.ctx.mark_sealed_class(fqn.clone());
            } else {
                self.ctx.mark_enum_class(fqn.clone());
            }
            self.ctx.record_enum_declaration(fqn, e.clone());
        }
        result
    }
}

/// 9. Registers every function's signature. For structs with no
/// explicit initializers, synthesizes and registers the memberwise
/// initializer. For sealed-class enums, synthesizes and registers a
/// constructor-like function per element.
pub struct FunctionRecording<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for FunctionRecording<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let type_name = immediate_enclosing_type(parents);
        if let StatementKind::Function(f) = &stmt.payload {
            record_function(self.ctx, f, type_name.clone());
        }
        let result = walk::default_statement(self, stmt, parents);
        if let [Node { payload: StatementKind::Struct(s), .. }] = result.as_slice() {
            let fqn = fqn_of(parents, &s.name);
            let has_initializer = s
                .members
                .iter()
                .any(|m| matches!(m.payload, StatementKind::Initializer(_)));
            if !has_initializer {
                let parameters = s
                    .members
                    .iter()
                    .filter_map(|m| match &m.payload {
                        StatementKind::Variable(v) if v.initializer.is_none() => Some(sk_ast::FunctionParameter {
                            label: v.name.clone(),
                            api_label: None,
                            type_name: v.type_annotation.clone().unwrap_or_else(|| "Any".into()),
                            default: None,
                            is_variadic: false,
                            is_autoclosure: false,
                        }),
                        _ => None,
                    })
                    .collect();
                self.ctx.record_function_translation(FunctionTranslation {
                    source_name: "init".into(),
                    type_name: Some(fqn.into()),
                    prefix: "init".into(),
                    parameters,
                });
            }
        }
        if let [Node { payload: StatementKind::Enum(e), .. }] = result.as_slice() {
            let fqn = fqn_of(parents, &e.name);
            if self.ctx.is_sealed_class(&fqn) {
                for element in &e.elements {
                    let parameters = element
                        .associated_values
                        .iter()
                        .map(|lt| sk_ast::FunctionParameter {
                            label: lt.label.clone().unwrap_or_else(|| "_".into()),
                            api_label: None,
                            type_name: lt.type_name.clone(),
                            default: None,
                            is_variadic: false,
                            is_autoclosure: false,
                        })
                        .collect();
                    self.ctx.record_function_translation(FunctionTranslation {
                        source_name: element.name.to_string(),
                        type_name: Some(format!("{fqn}.{}", element.name).into()),
                        prefix: "init".into(),
                        parameters,
                    });
                }
            }
        }
        result
    }
}

fn record_function(ctx: &Context, f: &FunctionDeclaration, type_name: Option<String>) {
    ctx.record_function_translation(FunctionTranslation {
        source_name: f.name.to_string(),
        type_name: type_name.map(Into::into),
        prefix: "fun".into(),
        parameters: f.parameters.clone(),
    });
}
