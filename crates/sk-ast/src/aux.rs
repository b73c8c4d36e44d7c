//! Auxiliary records shared by statement and expression payloads.
//!
//! Types are manipulated as opaque strings throughout (per the source-range
//! module's design note): `TypeName` is a cheaply-cloned interned string,
//! never a structured type tree. Passes that need to inspect a type do so
//! with small string helpers (see `sk-emit::type_string`), not by pattern
//! matching a type AST.

use smol_str::SmolStr;

use crate::{Expression, Statement};

pub type Ident = SmolStr;
pub type TypeName = SmolStr;

/// Declared source access level. `Protected` can only arise from an
/// explicit annotation -- the source language has no such keyword, but a
/// pass may synthesize it for target-only constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Access {
    Public,
    Internal,
    FilePrivate,
    Private,
    Open,
    Protected,
}

/// Modifiers shared by every declaration-shaped statement.
///
/// `is_open` and `resolved_access` are populated by the `Open` and
/// `AccessModifiers` passes respectively and must never be consulted
/// before those passes run (spec invariant).
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct DeclModifiers {
    pub explicit_access: Option<Access>,
    pub resolved_access: Option<Access>,
    pub is_static: bool,
    pub is_open: Option<bool>,
    pub annotations: Vec<Ident>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FunctionParameter {
    pub label: Ident,
    pub api_label: Option<Ident>,
    pub type_name: TypeName,
    pub default: Option<Box<Expression>>,
    pub is_variadic: bool,
    /// `@autoclosure` -- the call site wraps the bound argument in a
    /// zero-parameter closure (see the `Autoclosures` rewrite pass).
    pub is_autoclosure: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LabeledExpression {
    pub label: Option<Ident>,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LabeledType {
    pub label: Option<Ident>,
    pub type_name: TypeName,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EnumElement {
    pub name: Ident,
    pub associated_values: Vec<LabeledType>,
    pub raw_value: Option<Box<Expression>>,
    pub annotations: Vec<Ident>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SwitchCase {
    pub expressions: Vec<Expression>,
    /// Non-empty: the source language requires at least one statement per
    /// case (spec invariant).
    pub statements: Vec<Statement>,
}

/// A single `if`/`guard` condition clause.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum IfCondition {
    Plain(Expression),
    Binding(VariableDeclaration),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Accessors {
    pub getter: Vec<Statement>,
    pub setter: Option<(Ident, Vec<Statement>)>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VariableDeclaration {
    pub name: Ident,
    pub is_constant: bool,
    pub type_annotation: Option<TypeName>,
    pub initializer: Option<Box<Expression>>,
    pub accessors: Option<Accessors>,
    pub modifiers: DeclModifiers,
}

/// Radix of an integer literal, preserved through to emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Radix {
    Decimal,
    Hex,
    Binary,
}
