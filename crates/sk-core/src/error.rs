//! Error kinds for the driver (spec.md §7). Per-node unexpected-shape
//! and match-failure errors stay as `Error*` AST nodes plus a
//! diagnostic -- they never reach this type. `TranspileError` is only
//! for the kinds the pipeline cannot recover from by itself.

use thiserror::Error;

/// Failure modes that abort the run for a file rather than being
/// attached to the AST as a recoverable `Error*` node.
#[derive(Debug, Error)]
pub enum TranspileError {
    /// A pass reached a node variant not listed in its dispatch table
    /// (spec.md §7 "Fatal" kind).
    #[error("fatal: pass {pass} does not handle node kind {node}")]
    Fatal { pass: &'static str, node: &'static str },

    /// The context was asked to record into after it was frozen, or
    /// queried for a post-freeze fact before the first round ran.
    #[error("context in wrong phase: {0}")]
    ContextPhase(String),

    /// A configuration record failed to parse.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
