//! The driver crate: the external interface spec.md §6 describes.
//!
//! Wires the other `sk-*` crates together into the two-round pipeline
//! (spec.md §2, §5): [`oracle::IndexOracle`] and [`sk_ctx::Config`] are
//! the inputs alongside a frontend-supplied [`sk_ast::SourceFile`] slice;
//! [`pipeline::transpile_files`] is the entry point, returning one
//! [`pipeline::FileResult`] per input file. [`error::TranspileError`]
//! covers the failure modes spec.md §7 says abort a file outright rather
//! than being recorded as a recoverable `Error*` AST node.

pub mod error;
pub mod oracle;
pub mod pipeline;

pub use error::TranspileError;
pub use oracle::{IndexOracle, NullOracle};
pub use pipeline::{transpile_files, FileResult};
