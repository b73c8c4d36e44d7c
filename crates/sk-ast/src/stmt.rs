use smol_str::SmolStr;

use crate::aux::{
    DeclModifiers, EnumElement, FunctionParameter, Ident, IfCondition, SwitchCase, TypeName,
    VariableDeclaration,
};
use crate::expr::Expression;
use crate::node::Node;

pub type Statement = Node<StatementKind>;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FunctionDeclaration {
    pub name: Ident,
    pub generic_parameters: Vec<TypeName>,
    pub parameters: Vec<FunctionParameter>,
    pub return_type: Option<TypeName>,
    pub body: Vec<Statement>,
    /// Set by the `ProtocolContents` pass: the body above is cleared and
    /// this flag records that the declaration is protocol-interface-only.
    pub is_just_protocol_interface: bool,
    pub modifiers: DeclModifiers,
    /// Set by `RemoveExtensions` when this function was lifted out of an
    /// `extension` block: the type it now belongs to.
    pub extends_type: Option<TypeName>,
}

/// A refinement of `FunctionDeclaration`. `prefix` is conventionally
/// `"init"` and, per spec, is ignored by structural equality -- hence the
/// manual `PartialEq` below instead of a derive.
#[derive(Debug, Clone, serde::Serialize)]
pub struct InitializerDeclaration {
    pub function: FunctionDeclaration,
    pub prefix: Ident,
    pub is_optional: bool,
    /// The single allowed top-level `super.init(...)` call, extracted by
    /// `SuperCallsToHeaders` and stored here for the emitter to render as
    /// part of the constructor header rather than the body.
    pub super_call: Option<Box<Expression>>,
}

impl PartialEq for InitializerDeclaration {
    fn eq(&self, other: &Self) -> bool {
        self.function == other.function
            && self.is_optional == other.is_optional
            && self.super_call == other.super_call
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ClassDeclaration {
    pub name: Ident,
    pub generic_parameters: Vec<TypeName>,
    pub inherits: Vec<TypeName>,
    pub members: Vec<Statement>,
    pub modifiers: DeclModifiers,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompanionObjectDeclaration {
    pub members: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EnumDeclaration {
    pub name: Ident,
    pub generic_parameters: Vec<TypeName>,
    pub inherits: Vec<TypeName>,
    pub elements: Vec<EnumElement>,
    pub members: Vec<Statement>,
    pub modifiers: DeclModifiers,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProtocolDeclaration {
    pub name: Ident,
    pub inherits: Vec<TypeName>,
    pub members: Vec<Statement>,
    pub modifiers: DeclModifiers,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StructDeclaration {
    pub name: Ident,
    pub generic_parameters: Vec<TypeName>,
    pub inherits: Vec<TypeName>,
    pub members: Vec<Statement>,
    pub modifiers: DeclModifiers,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExtensionDeclaration {
    pub type_name: TypeName,
    pub generic_parameters: Vec<TypeName>,
    pub inherits: Vec<TypeName>,
    pub members: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TypealiasDeclaration {
    pub name: Ident,
    pub target: TypeName,
    pub modifiers: DeclModifiers,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum StatementKind {
    Comment(SmolStr),
    ExpressionStatement(Expression),
    Typealias(TypealiasDeclaration),
    Extension(ExtensionDeclaration),
    Import { module: Ident },
    Class(ClassDeclaration),
    CompanionObject(CompanionObjectDeclaration),
    Enum(EnumDeclaration),
    Protocol(ProtocolDeclaration),
    Struct(StructDeclaration),
    Function(FunctionDeclaration),
    Initializer(InitializerDeclaration),
    Variable(VariableDeclaration),
    Do {
        body: Vec<Statement>,
    },
    Catch {
        bound_type: Option<TypeName>,
        binding: Option<Ident>,
        body: Vec<Statement>,
    },
    ForEach {
        pattern: Ident,
        collection: Expression,
        body: Vec<Statement>,
    },
    While {
        conditions: Vec<IfCondition>,
        body: Vec<Statement>,
    },
    If {
        conditions: Vec<IfCondition>,
        then_body: Vec<Statement>,
        else_body: Option<Vec<Statement>>,
        /// `guard ... else { ... }` rather than `if`. `DoubleNegativesInGuards`
        /// clears this once it rewrites a guard into a plain `if`.
        is_guard: bool,
    },
    Switch {
        subject: Expression,
        /// A case with empty `expressions` is the `default`/`else` arm.
        cases: Vec<SwitchCase>,
    },
    Defer {
        body: Vec<Statement>,
    },
    Throw(Expression),
    Return {
        value: Option<Expression>,
        /// Set by `ReturnsInLambdas` for multi-statement closures.
        label: Option<Ident>,
    },
    Break(Option<Ident>),
    Continue(Option<Ident>),
    Assignment {
        lhs: Expression,
        rhs: Expression,
    },
    Error {
        message: SmolStr,
    },
}

impl StatementKind {
    /// See `ExpressionKind::tag`.
    pub fn tag(&self) -> &'static str {
        match self {
            StatementKind::Comment(..) => "Comment",
            StatementKind::ExpressionStatement(..) => "ExpressionStatement",
            StatementKind::Typealias(..) => "Typealias",
            StatementKind::Extension(..) => "Extension",
            StatementKind::Import { .. } => "Import",
            StatementKind::Class(..) => "Class",
            StatementKind::CompanionObject(..) => "CompanionObject",
            StatementKind::Enum(..) => "Enum",
            StatementKind::Protocol(..) => "Protocol",
            StatementKind::Struct(..) => "Struct",
            StatementKind::Function(..) => "Function",
            StatementKind::Initializer(..) => "Initializer",
            StatementKind::Variable(..) => "Variable",
            StatementKind::Do { .. } => "Do",
            StatementKind::Catch { .. } => "Catch",
            StatementKind::ForEach { .. } => "ForEach",
            StatementKind::While { .. } => "While",
            StatementKind::If { .. } => "If",
            StatementKind::Switch { .. } => "Switch",
            StatementKind::Defer { .. } => "Defer",
            StatementKind::Throw(..) => "Throw",
            StatementKind::Return { .. } => "Return",
            StatementKind::Break(..) => "Break",
            StatementKind::Continue(..) => "Continue",
            StatementKind::Assignment { .. } => "Assignment",
            StatementKind::Error { .. } => "Error",
        }
    }

    /// The declaration's name, for types that introduce a named scope
    /// (used by the pass framework's `get_full_type()`).
    pub fn type_name(&self) -> Option<&str> {
        match self {
            StatementKind::Class(c) => Some(&c.name),
            StatementKind::Struct(s) => Some(&s.name),
            StatementKind::Enum(e) => Some(&e.name),
            StatementKind::Protocol(p) => Some(&p.name),
            _ => None,
        }
    }
}
