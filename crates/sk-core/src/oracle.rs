//! The index oracle (spec.md §6): an external collaborator the
//! frontend supplies alongside each AST. The core only ever calls
//! `get_parent_type` through this trait -- it never constructs one.

use sk_ast::Expression;

/// Type/index information the frontend's compiler front-end already
/// computed and the core would otherwise have to re-derive. Spec.md §1
/// keeps the type inferencer itself out of scope; this is the query
/// surface the core is allowed to lean on instead.
pub trait IndexOracle {
    /// The fully-qualified name of the type `expr` resolves to, as
    /// determined by the frontend's type checker.
    fn get_parent_type(&self, expr: &Expression) -> Option<String>;
}

/// An oracle with no knowledge, for driving the pipeline over ASTs that
/// never query one (unit tests, fixtures built by hand).
pub struct NullOracle;

impl IndexOracle for NullOracle {
    fn get_parent_type(&self, _expr: &Expression) -> Option<String> {
        None
    }
}
