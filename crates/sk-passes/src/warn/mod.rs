//! Warning passes (spec.md §4.6): these never rewrite the tree, only
//! push diagnostics to the context for constructs the transpilation
//! renders faithfully but that deserve the author's attention (a
//! standard-library call with no target equivalent, a double optional, a
//! mutable value type, a struct with no memberwise initializer left
//! after rewriting, a native collection literal, or a side effect buried
//! inside an `if let` condition).

use sk_ast::{Expression, ExpressionKind, IfCondition, Statement, StatementKind};
use sk_ctx::Context;
use sk_pass::{walk, Parents, Pass};

/// A call to a standard-library function with no recorded translation
/// and no registered template: the emitter will print the call
/// verbatim, which may not compile in the target.
pub struct StandardLibraryWarning<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for StandardLibraryWarning<'_> {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::Call { function, .. } = &expr.payload {
            if let ExpressionKind::DeclarationReference { name, is_standard_library: true, .. } = &function.payload {
                if self.ctx.get_function_translation(name, None).is_none() && self.ctx.lookup_template(name).is_none() {
                    self.ctx.diagnostics().warn(
                        format!("standard library call '{name}' has no registered translation or template"),
                        expr.range,
                    );
                }
            }
        }
        expr
    }
}

/// `T??` -- a double optional -- has no direct target equivalent and is
/// flattened by the emitter; warn so the author can confirm the
/// flattening is semantically acceptable here.
pub struct DoubleOptionalWarning<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for DoubleOptionalWarning<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let result = walk::default_statement(self, stmt, parents);
        if let [sk_ast::Node { payload: StatementKind::Variable(v), range, .. }] = result.as_slice() {
            if let Some(t) = &v.type_annotation {
                if sk_ast::typestr::is_double_optional(t) {
                    self.ctx.diagnostics().warn(format!("'{}' has a double-optional type '{t}'", v.name), *range);
                }
            }
        }
        result
    }
}

/// A `var` declared with a value-type (struct/enum) type annotation
/// that is itself mutable: the target's value-type equivalent is a
/// `data class`, whose `copy`-on-mutate semantics differ from the
/// source's in-place mutation.
pub struct MutableValueTypeWarning<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for MutableValueTypeWarning<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let result = walk::default_statement(self, stmt, parents);
        if let [sk_ast::Node { payload: StatementKind::Variable(v), range, .. }] = result.as_slice() {
            if !v.is_constant {
                if let Some(t) = &v.type_annotation {
                    if self.ctx.is_enum_class(t) || self.ctx.is_sealed_class(t) {
                        self.ctx.diagnostics().warn(
                            format!("'{}' is a mutable variable of value type '{t}'", v.name),
                            *range,
                        );
                    }
                }
            }
        }
        result
    }
}

/// A struct whose synthesized memberwise initializer was removed by an
/// earlier pass (e.g. because a custom initializer of the same arity
/// already existed) loses construction call sites' positional-argument
/// correspondence; warn rather than silently drop it.
pub struct StructInitializerWarning<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for StructInitializerWarning<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let result = walk::default_statement(self, stmt, parents);
        if let [sk_ast::Node { payload: StatementKind::Struct(s), range, .. }] = result.as_slice() {
            let has_initializer = s.members.iter().any(|m| matches!(m.payload, StatementKind::Initializer(_)));
            if !has_initializer && !s.members.is_empty() {
                self.ctx.diagnostics().warn(format!("struct '{}' has no initializer after rewriting", s.name), *range);
            }
        }
        result
    }
}

/// An `[T]()`/`[K: V]()` collection literal compiles to a mutable
/// target collection even when the source value was never mutated;
/// warn so the author can tighten it to an immutable collection by
/// hand if appropriate.
pub struct NativeCollectionWarning<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for NativeCollectionWarning<'_> {
    fn replace_expression(&mut self, expr: Expression, parents: &mut Parents) -> Expression {
        let expr = walk::default_expression(self, expr, parents);
        if let ExpressionKind::Array { type_name: Some(t), .. } | ExpressionKind::Dictionary { type_name: Some(t), .. } = &expr.payload {
            self.ctx
                .diagnostics()
                .warn(format!("collection literal of type '{t}' is emitted as a mutable collection"), expr.range);
        }
        expr
    }
}

/// Per spec.md §4.5: "before conditions are rearranged, walks every
/// if-let condition after the first and warns on any impure call
/// (consulting the purity set)." The first binding's initializer always
/// runs exactly once regardless of reordering, so only bindings after it
/// are at risk -- and only a call to a function not in the pure-function
/// set (`Context::is_pure`) is actually suspect.
pub struct SideEffectWarningsInIfLets<'ctx> {
    pub ctx: &'ctx Context,
}

/// The callee's name, if `expr` is a call -- either a plain reference
/// (`foo()`) or a method call (`x.bar()`, named by its member).
fn call_target_name(expr: &Expression) -> Option<&str> {
    match &expr.payload {
        ExpressionKind::Call { function, .. } => match &function.payload {
            ExpressionKind::DeclarationReference { name, .. } => Some(name.as_str()),
            ExpressionKind::Dot { member, .. } => Some(member.as_str()),
            _ => None,
        },
        _ => None,
    }
}

impl Pass for SideEffectWarningsInIfLets<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let result = walk::default_statement(self, stmt, parents);
        if let [sk_ast::Node { payload: StatementKind::If { conditions, .. }, range, .. }] = result.as_slice() {
            let bindings = conditions.iter().filter_map(|c| match c {
                IfCondition::Binding(v) => Some(v),
                _ => None,
            });
            for v in bindings.skip(1) {
                if let Some(init) = &v.initializer {
                    if let Some(name) = call_target_name(init) {
                        if !self.ctx.is_pure(name) {
                            self.ctx.diagnostics().warn(
                                format!("'{}' initializer calls '{name}', which is not known to be pure, after the first if-let condition", v.name),
                                *range,
                            );
                        }
                    }
                }
            }
        }
        result
    }
}
