use crate::range::{SourceRange, SyntaxHandle};

/// A node is its variant payload plus optional provenance.
///
/// Every node carries an optional frontend syntax handle (used only by
/// the index oracle) and an optional source range. Structural equality
/// (`PartialEq`) is defined over the payload alone -- two nodes with
/// identical payloads are equal regardless of where they came from or
/// what the frontend called them. This is what lets a pass construct a
/// synthesized replacement and compare it against what it replaced.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Node<T> {
    pub handle: Option<SyntaxHandle>,
    pub range: Option<SourceRange>,
    pub payload: T,
}

impl<T> Node<T> {
    pub fn new(payload: T) -> Self {
        Self {
            handle: None,
            range: None,
            payload,
        }
    }

    pub fn with_range(payload: T, range: SourceRange) -> Self {
        Self {
            handle: None,
            range: Some(range),
            payload,
        }
    }

    pub fn with_provenance(payload: T, handle: Option<SyntaxHandle>, range: Option<SourceRange>) -> Self {
        Self {
            handle,
            range,
            payload,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Node<U> {
        Node {
            handle: self.handle,
            range: self.range,
            payload: f(self.payload),
        }
    }

    /// True if this node was synthesized by a pass rather than supplied
    /// by the frontend -- it has neither a handle nor a range.
    pub fn is_synthesized(&self) -> bool {
        self.handle.is_none() && self.range.is_none()
    }
}

impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}

impl<T: Eq> Eq for Node<T> {}
