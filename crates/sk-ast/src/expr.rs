use smol_str::SmolStr;

use crate::aux::{Ident, LabeledExpression, Radix, TypeName};
use crate::node::Node;

pub type Expression = Node<ExpressionKind>;

/// An expression node. Binary-operator associativity is not encoded here
/// -- a right-associated chain is simply nested `BinaryOp` nodes, and
/// passes that care about precedence walk the nesting directly.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum ExpressionKind {
    /// An opaque target-language snippet, inserted verbatim by a
    /// template substitution or synthesized by a pass.
    LiteralCode {
        code: SmolStr,
        type_name: Option<TypeName>,
    },
    /// Two expressions emitted back to back with no separator.
    Concatenation(Box<Expression>, Box<Expression>),
    Parentheses(Box<Expression>),
    ForceUnwrap(Box<Expression>),
    OptionalChain(Box<Expression>),
    DeclarationReference {
        name: Ident,
        type_name: Option<TypeName>,
        is_standard_library: bool,
    },
    TypeReference {
        type_name: TypeName,
    },
    Subscript {
        subscripted: Box<Expression>,
        indices: Vec<LabeledExpression>,
        type_name: Option<TypeName>,
    },
    Array {
        elements: Vec<Expression>,
        type_name: Option<TypeName>,
    },
    Dictionary {
        entries: Vec<(Expression, Expression)>,
        type_name: Option<TypeName>,
    },
    ReturnExpression(Option<Box<Expression>>),
    Dot {
        receiver: Box<Expression>,
        member: Ident,
        type_name: Option<TypeName>,
    },
    BinaryOp {
        operator: SmolStr,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
        type_name: Option<TypeName>,
    },
    PrefixUnary {
        operator: SmolStr,
        operand: Box<Expression>,
        type_name: Option<TypeName>,
    },
    PostfixUnary {
        operator: SmolStr,
        operand: Box<Expression>,
        type_name: Option<TypeName>,
    },
    TernaryIf {
        condition: Box<Expression>,
        then_expr: Box<Expression>,
        else_expr: Box<Expression>,
        type_name: Option<TypeName>,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<LabeledExpression>,
        type_name: Option<TypeName>,
        allows_trailing_closure: bool,
        is_pure: bool,
    },
    Closure {
        parameters: Vec<Ident>,
        body: Vec<crate::stmt::Statement>,
        type_name: Option<TypeName>,
        is_trailing: bool,
    },
    IntLiteral {
        value: i64,
        radix: Radix,
        type_name: Option<TypeName>,
    },
    UIntLiteral {
        value: u64,
        radix: Radix,
        type_name: Option<TypeName>,
    },
    DoubleLiteral(f64),
    FloatLiteral(f32),
    BoolLiteral(bool),
    StringLiteral {
        value: SmolStr,
        is_multiline: bool,
    },
    CharLiteral(char),
    NilLiteral,
    InterpolatedString(Vec<InterpolationSegment>),
    Tuple(Vec<LabeledExpression>),
    Error {
        message: SmolStr,
    },
}

/// One piece of an interpolated string literal: either a literal span or
/// an embedded expression (`${...}` on the target side).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum InterpolationSegment {
    Literal(SmolStr),
    Expression(Expression),
}

impl ExpressionKind {
    /// A stable name for the variant, used by the pass framework's parent
    /// stack for coarse "am I inside a call-argument tuple?" queries
    /// instead of a second, hand-maintained tag enum.
    pub fn tag(&self) -> &'static str {
        match self {
            ExpressionKind::LiteralCode { .. } => "LiteralCode",
            ExpressionKind::Concatenation(..) => "Concatenation",
            ExpressionKind::Parentheses(..) => "Parentheses",
            ExpressionKind::ForceUnwrap(..) => "ForceUnwrap",
            ExpressionKind::OptionalChain(..) => "OptionalChain",
            ExpressionKind::DeclarationReference { .. } => "DeclarationReference",
            ExpressionKind::TypeReference { .. } => "TypeReference",
            ExpressionKind::Subscript { .. } => "Subscript",
            ExpressionKind::Array { .. } => "Array",
            ExpressionKind::Dictionary { .. } => "Dictionary",
            ExpressionKind::ReturnExpression(..) => "ReturnExpression",
            ExpressionKind::Dot { .. } => "Dot",
            ExpressionKind::BinaryOp { .. } => "BinaryOp",
            ExpressionKind::PrefixUnary { .. } => "PrefixUnary",
            ExpressionKind::PostfixUnary { .. } => "PostfixUnary",
            ExpressionKind::TernaryIf { .. } => "TernaryIf",
            ExpressionKind::Call { .. } => "Call",
            ExpressionKind::Closure { .. } => "Closure",
            ExpressionKind::IntLiteral { .. } => "IntLiteral",
            ExpressionKind::UIntLiteral { .. } => "UIntLiteral",
            ExpressionKind::DoubleLiteral(..) => "DoubleLiteral",
            ExpressionKind::FloatLiteral(..) => "FloatLiteral",
            ExpressionKind::BoolLiteral(..) => "BoolLiteral",
            ExpressionKind::StringLiteral { .. } => "StringLiteral",
            ExpressionKind::CharLiteral(..) => "CharLiteral",
            ExpressionKind::NilLiteral => "NilLiteral",
            ExpressionKind::InterpolatedString(..) => "InterpolatedString",
            ExpressionKind::Tuple(..) => "Tuple",
            ExpressionKind::Error { .. } => "Error",
        }
    }
}
