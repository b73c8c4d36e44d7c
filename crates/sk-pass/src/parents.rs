/// What a node is nested inside, coarse enough to answer "am I inside a
/// call-argument tuple?" without a second hand-maintained type hierarchy.
#[derive(Debug, Clone)]
pub enum Frame {
    Statement(&'static str),
    Expression(&'static str),
    /// Pushed when descending into a class/struct/enum/protocol's member
    /// list, so `get_full_type()` can report the dot-joined nesting.
    TypeScope(String),
}

/// The pass framework's parent stack.
///
/// Nodes carry no parent back-reference (spec.md §9's redesign note);
/// instead every visitor pushes a frame on entry and the `Guard` it
/// returns pops it on every exit path, including early returns, since
/// popping happens in `Drop`.
#[derive(Debug, Default)]
pub struct Parents {
    stack: Vec<Frame>,
    replacing_statements: bool,
}

impl Parents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_statement(&mut self, tag: &'static str) -> Guard<'_> {
        self.stack.push(Frame::Statement(tag));
        Guard { parents: self }
    }

    pub fn push_expression(&mut self, tag: &'static str) -> Guard<'_> {
        self.stack.push(Frame::Expression(tag));
        Guard { parents: self }
    }

    pub fn push_type_scope(&mut self, name: impl Into<String>) -> Guard<'_> {
        self.stack.push(Frame::TypeScope(name.into()));
        Guard { parents: self }
    }

    /// Once any statement list below the top level is being walked, the
    /// pass is "replacing statements" for the rest of the traversal.
    pub fn enter_statements_scope(&mut self) {
        self.replacing_statements = true;
    }

    pub fn is_replacing_statements(&self) -> bool {
        self.replacing_statements
    }

    pub fn is_top_level_node(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn parent(&self) -> Option<&Frame> {
        self.stack.last()
    }

    pub fn parents(&self) -> &[Frame] {
        &self.stack
    }

    /// Dot-joined names of enclosing class/struct/enum/protocol
    /// declarations, outermost first.
    pub fn get_full_type(&self) -> String {
        self.stack
            .iter()
            .filter_map(|f| match f {
                Frame::TypeScope(name) => Some(name.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// RAII guard returned by `Parents::push_*`. Pops its frame on drop, so a
/// pass can `let _g = parents.push_statement("If");` and rely on the pop
/// happening regardless of how the enclosing scope exits.
pub struct Guard<'a> {
    parents: &'a mut Parents,
}

impl Drop for Guard<'_> {
    fn drop(&mut self) {
        self.parents.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_pops_on_drop() {
        let mut parents = Parents::new();
        {
            let _g = parents.push_statement("If");
            assert!(!parents.is_top_level_node());
        }
        assert!(parents.is_top_level_node());
    }

    #[test]
    fn full_type_is_dot_joined_outermost_first() {
        let mut parents = Parents::new();
        let _outer = parents.push_type_scope("Outer");
        let _inner = parents.push_type_scope("Inner");
        assert_eq!(parents.get_full_type(), "Outer.Inner");
    }

    #[test]
    fn statements_scope_latches_true() {
        let mut parents = Parents::new();
        assert!(!parents.is_replacing_statements());
        parents.enter_statements_scope();
        assert!(parents.is_replacing_statements());
    }
}
