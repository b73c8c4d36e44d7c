//! Access-modifier and inheritance-related rewrites (spec.md §4.5).

use sk_ast::{Access, DeclModifiers, Statement, StatementKind};
use sk_ctx::Context;
use sk_pass::{walk, Parents, Pass};

use crate::util::immediate_enclosing_type;

fn modifiers_mut(stmt: &mut StatementKind) -> Option<&mut DeclModifiers> {
    match stmt {
        StatementKind::Class(c) => Some(&mut c.modifiers),
        StatementKind::Struct(s) => Some(&mut s.modifiers),
        StatementKind::Enum(e) => Some(&mut e.modifiers),
        StatementKind::Protocol(p) => Some(&mut p.modifiers),
        StatementKind::Function(f) => Some(&mut f.modifiers),
        StatementKind::Variable(v) => Some(&mut v.modifiers),
        StatementKind::Initializer(i) => Some(&mut i.function.modifiers),
        _ => None,
    }
}

/// Resolves every declaration's explicit access level to the target's
/// closest equivalent, filling `resolved_access` (never consulted before
/// this pass runs, per the field's own invariant).
pub struct AccessModifiers;

fn resolve(access: Option<Access>) -> Access {
    match access {
        Some(Access::FilePrivate) => Access::Private,
        Some(other) => other,
        None => Access::Internal,
    }
}

impl Pass for AccessModifiers {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [node] = result.as_mut_slice() {
            if let Some(m) = modifiers_mut(&mut node.payload) {
                m.resolved_access = Some(resolve(m.explicit_access));
            }
        }
        result
    }
}

/// A class/function not marked `final` and not private is `open` in the
/// target, since the source allows subclassing/overriding by default
/// and the target requires an explicit opt-in.
pub struct OpenDeclarations;

fn is_final(m: &DeclModifiers) -> bool {
    m.annotations.iter().any(|a| a == "final")
}

impl Pass for OpenDeclarations {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [node] = result.as_mut_slice() {
            if matches!(&node.payload, StatementKind::Class(_) | StatementKind::Function(_)) {
                if let Some(m) = modifiers_mut(&mut node.payload) {
                    let private = matches!(m.resolved_access, Some(Access::Private) | Some(Access::FilePrivate));
                    m.is_open = Some(!is_final(m) && !private);
                }
            }
        }
        result
    }
}

/// Generic parameters declared on a protocol move to its extension
/// functions' own generic-parameter lists, since the target has no
/// `associatedtype`-style protocol generics.
pub struct ProtocolExtensionGenerics;

impl Pass for ProtocolExtensionGenerics {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [sk_ast::Node { payload: StatementKind::Protocol(p), .. }] = result.as_mut_slice() {
            for member in p.members.iter_mut() {
                if let StatementKind::Function(f) = &mut member.payload {
                    if f.generic_parameters.is_empty() {
                        f.generic_parameters = vec!["T".into()];
                    }
                }
            }
        }
        result
    }
}

/// `open` has no meaning on an initializer in the target (constructors
/// are never themselves overridden, only inherited via `super`), so the
/// flag is dropped once `OpenDeclarations` has already run.
pub struct RemoveOpenOnInitializers;

impl Pass for RemoveOpenOnInitializers {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [sk_ast::Node { payload: StatementKind::Initializer(init), .. }] = result.as_mut_slice() {
            init.function.modifiers.is_open = None;
        }
        result
    }
}

/// `override` on a function belonging to a type with no recorded
/// superclass/protocol (the source allowed a redundant `override` in a
/// context the target does not) is dropped.
pub struct RemoveOverrides<'ctx> {
    pub ctx: &'ctx Context,
}

impl Pass for RemoveOverrides<'_> {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        let has_superclass = immediate_enclosing_type(parents)
            .map(|t| !self.ctx.get_inheritances(&t).is_empty())
            .unwrap_or(false);
        if !has_superclass {
            if let [sk_ast::Node { payload: StatementKind::Function(f), .. }] = result.as_mut_slice() {
                f.modifiers.annotations.retain(|a| a != "override");
            }
        }
        result
    }
}

/// A `catch` clause with no explicit binding gets a synthesized
/// `_error: Error` binding, since the target requires every catch clause
/// to name its caught value.
pub struct CatchVariableSynthesis;

impl Pass for CatchVariableSynthesis {
    fn replace_statement(&mut self, stmt: Statement, parents: &mut Parents) -> Vec<Statement> {
        let mut result = walk::default_statement(self, stmt, parents);
        if let [sk_ast::Node { payload: StatementKind::Catch { binding, bound_type, .. }, .. }] = result.as_mut_slice() {
            if binding.is_none() {
                *binding = Some("_error".into());
                if bound_type.is_none() {
                    *bound_type = Some("Error".into());
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
    fn file_private_resolves_to_private() {
        assert_eq!(resolve(Some(Access::FilePrivate)), Access::Private);
        assert_eq!(resolve(None), Access::Internal);
    }

    #[test]
    fn missing_catch_binding_gets_synthesized_name() {
        let mut pass = CatchVariableSynthesis;
        let mut parents = Parents::new();
        let stmt = sk_ast::Node::new(StatementKind::Catch {
            bound_type: None,
            binding: None,
            body: vec![],
        });
        let result = pass.replace_statement(stmt, &mut parents);
        if let [sk_ast::Node { payload: StatementKind::Catch { binding, .. }, .. }] = result.as_slice() {
            assert_eq!(binding.as_deref(), Some("_error"));
        } else {
            panic!("expected a single Catch statement");
        }
    }
}
