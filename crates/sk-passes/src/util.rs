use sk_pass::Parents;

/// The fully-qualified name of the type frame at the top of the parent
/// stack, dot-joined with the name supplied for the node currently being
/// visited (used by passes that need the FQN of a declaration they are
/// presently looking at, not just of its enclosing scopes).
pub fn fqn_of(parents: &Parents, own_name: &str) -> String {
    let outer = parents.get_full_type();
    if outer.is_empty() {
        own_name.to_string()
    } else {
        format!("{outer}.{own_name}")
    }
}

/// The immediately-enclosing type's own name (the last segment of
/// `parents.get_full_type()`), or `None` at file scope.
pub fn immediate_enclosing_type(parents: &Parents) -> Option<String> {
    let full = parents.get_full_type();
    full.rsplit('.').next().map(str::to_string).filter(|s| !s.is_empty())
}
