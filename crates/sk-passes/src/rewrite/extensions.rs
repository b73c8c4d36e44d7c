//! Remove extensions: inlines an extension's members into the type it
//! extends. Unlike every other rewrite pass this one needs whole-file
//! context (the extended declaration is a *sibling* of the extension,
//! not an ancestor or descendant of it), so it is a plain function over
//! a [`SourceFile`] rather than a [`sk_pass::Pass`].

use sk_ast::{SourceFile, Statement, StatementKind};

fn declared_name(stmt: &Statement) -> Option<&str> {
    match &stmt.payload {
        StatementKind::Class(c) => Some(&c.name),
        StatementKind::Struct(s) => Some(&s.name),
        StatementKind::Enum(e) => Some(&e.name),
        _ => None,
    }
}

fn members_mut(stmt: &mut Statement) -> Option<&mut Vec<Statement>> {
    match &mut stmt.payload {
        StatementKind::Class(c) => Some(&mut c.members),
        StatementKind::Struct(s) => Some(&mut s.members),
        StatementKind::Enum(e) => Some(&mut e.members),
        _ => None,
    }
}

fn tag_extends_type(members: &mut [Statement], extends_type: &sk_ast::TypeName) {
    for member in members {
        if let StatementKind::Function(f) = &mut member.payload {
            f.extends_type = Some(extends_type.clone());
        }
    }
}

/// Inlines every top-level `Extension` in `file` into its matching
/// class/struct/enum and drops the extension wrapper. An extension whose
/// type has no matching declaration in this file (extending an
/// imported type) is left as a trailing companion-less declaration list
/// appended at the end, wrapped back into a same-named empty class, so
/// later passes still see a normal declaration to attach members to.
pub fn remove_extensions(file: &mut SourceFile) {
    let declarations = std::mem::take(&mut file.declarations);
    let mut extensions = Vec::new();
    let mut rest = Vec::new();
    for stmt in declarations {
        if matches!(stmt.payload, StatementKind::Extension(_)) {
            extensions.push(stmt);
        } else {
            rest.push(stmt);
        }
    }

    for ext in extensions {
        let StatementKind::Extension(mut decl) = ext.payload else {
            unreachable!()
        };
        tag_extends_type(&mut decl.members, &decl.type_name);
        let target = rest.iter_mut().find(|d| declared_name(d) == Some(decl.type_name.as_str()));
        match target {
            Some(target) => {
                if let Some(members) = members_mut(target) {
                    members.extend(decl.members);
                }
            }
            None => {
                rest.push(sk_pass::error_statement(format!(
                    "extension of unknown type {}",
                    decl.type_name
                )));
            }
        }
    }

    file.declarations = rest;
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_ast::{DeclModifiers, FunctionDeclaration, Node, StructDeclaration};

    #[test]
    fn extension_members_are_spliced_into_matching_struct() {
        let mut file = SourceFile {
            path: "t.src".into(),
            declarations: vec![
                Node::new(StatementKind::Struct(StructDeclaration {
                    name: "Point".into(),
                    generic_parameters: vec![],
                    inherits: vec![],
                    members: vec![],
                    modifiers: DeclModifiers::default(),
                })),
                Node::new(StatementKind::Extension(sk_ast::ExtensionDeclaration {
                    type_name: "Point".into(),
                    generic_parameters: vec![],
                    inherits: vec![],
                    members: vec![Node::new(StatementKind::Function(FunctionDeclaration {
                        name: "distance".into(),
                        generic_parameters: vec![],
                        parameters: vec![],
                        return_type: Some("Double".into()),
                        body: vec![],
                        is_just_protocol_interface: false,
                        modifiers: DeclModifiers::default(),
                        extends_type: None,
                    }))],
                })),
            ],
        };
        remove_extensions(&mut file);
        assert_eq!(file.declarations.len(), 1);
        match &file.declarations[0].payload {
            StatementKind::Struct(s) => assert_eq!(s.members.len(), 1),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
