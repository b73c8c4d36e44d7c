//! The canonical typed AST shared by every pass in the pipeline.
//!
//! A node is either a [`Statement`] or an [`Expression`], both tagged sums
//! wrapped in [`Node`] for provenance (`handle`, `range`). There is no
//! parent back-reference on nodes -- the pass framework's parent stack
//! (`sk-pass`) is the single source of truth for "what am I nested in",
//! which avoids the cyclic-pointer bookkeeping a class-hierarchy AST
//! usually needs.

pub mod aux;
pub mod expr;
pub mod node;
pub mod range;
pub mod stmt;
pub mod typestr;

pub use aux::{
    Access, Accessors, DeclModifiers, EnumElement, FunctionParameter, Ident, IfCondition,
    LabeledExpression, LabeledType, Radix, SwitchCase, TypeName, VariableDeclaration,
};
pub use expr::{Expression, ExpressionKind, InterpolationSegment};
pub use node::Node;
pub use range::{SourceRange, SyntaxHandle};
pub use stmt::{
    ClassDeclaration, CompanionObjectDeclaration, EnumDeclaration, ExtensionDeclaration,
    FunctionDeclaration, InitializerDeclaration, ProtocolDeclaration, Statement, StatementKind,
    StructDeclaration, TypealiasDeclaration,
};

/// A parsed source file's top-level declarations, as handed to the core
/// by the external frontend. The core never constructs this from text --
/// it only ever receives one.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SourceFile {
    pub path: String,
    pub declarations: Vec<Statement>,
}
