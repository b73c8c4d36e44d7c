//! Type names are opaque strings everywhere in this crate (see the
//! module doc on [`crate::aux`]). This module factors the handful of
//! string-level operations every pass and the emitter need to perform on
//! them, rather than letting each call site re-derive its own splitting
//! logic.

/// Splits a top-level comma list, respecting nesting of `<>`, `()`, and
/// `[]` so that e.g. `"A<B, C>, D"` splits into `["A<B, C>", " D"]`.
fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            c if c == sep && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// True for a type string ending in an unescaped `?` -- `T?`, but not
/// `(A, B)` or a trailing `?` inside nested generics.
pub fn is_optional(ty: &str) -> bool {
    ty.trim_end().ends_with('?') && !ty.trim_end().ends_with("??")
}

/// True when every suffix `?` has been stripped and at least two remain
/// -- `T??`.
pub fn is_double_optional(ty: &str) -> bool {
    ty.trim_end().ends_with("??")
}

/// Strips exactly one trailing `?`.
pub fn strip_optional(ty: &str) -> &str {
    ty.trim_end().strip_suffix('?').unwrap_or(ty.trim_end())
}

pub fn is_parenthesized(ty: &str) -> bool {
    let t = ty.trim();
    t.starts_with('(') && t.ends_with(')')
}

/// Parses `Name<Arg1, Arg2, ...>` into `(Name, [Arg1, Arg2, ...])`. Returns
/// `None` if `ty` has no top-level generic argument list.
pub fn split_generic_args(ty: &str) -> Option<(&str, Vec<&str>)> {
    let t = ty.trim();
    let open = t.find('<')?;
    if !t.ends_with('>') {
        return None;
    }
    let name = &t[..open];
    let inner = &t[open + 1..t.len() - 1];
    let args = split_top_level(inner, ',').into_iter().map(str::trim).collect();
    Some((name, args))
}

/// Parses the source's array-literal type sugar `[T]` (not a tuple, not a
/// dictionary -- those are the `[K:V]` form handled by
/// [`parse_dictionary_sugar`]).
pub fn parse_array_sugar(ty: &str) -> Option<&str> {
    let t = ty.trim();
    if !(t.starts_with('[') && t.ends_with(']')) {
        return None;
    }
    let inner = &t[1..t.len() - 1];
    if split_top_level(inner, ':').len() == 2 {
        return None;
    }
    Some(inner.trim())
}

/// Parses the source's dictionary-literal type sugar `[K: V]`.
pub fn parse_dictionary_sugar(ty: &str) -> Option<(&str, &str)> {
    let t = ty.trim();
    if !(t.starts_with('[') && t.ends_with(']')) {
        return None;
    }
    let inner = &t[1..t.len() - 1];
    let parts = split_top_level(inner, ':');
    if parts.len() != 2 {
        return None;
    }
    Some((parts[0].trim(), parts[1].trim()))
}

/// Parses a parenthesized top-level 2-or-more tuple type `(A, B)`. Plain
/// parenthesization (`(A)`) is not a tuple and returns `None`.
pub fn parse_tuple_type(ty: &str) -> Option<Vec<&str>> {
    let t = ty.trim();
    if !(t.starts_with('(') && t.ends_with(')')) {
        return None;
    }
    let inner = &t[1..t.len() - 1];
    let parts: Vec<&str> = split_top_level(inner, ',').into_iter().map(str::trim).collect();
    if parts.len() < 2 {
        return None;
    }
    Some(parts)
}

/// Parses a function type `(A, B) -> C`.
pub fn parse_function_type(ty: &str) -> Option<(Vec<&str>, &str)> {
    let t = ty.trim().strip_suffix(" throws").unwrap_or(ty.trim());
    if !t.starts_with('(') {
        return None;
    }
    let close = {
        let mut depth = 0i32;
        let mut found = None;
        for (i, c) in t.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        found = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        found?
    };
    let rest = t[close + 1..].trim_start();
    let ret = rest.strip_prefix("->")?.trim();
    let params_inner = &t[1..close];
    let params = if params_inner.trim().is_empty() {
        Vec::new()
    } else {
        split_top_level(params_inner, ',').into_iter().map(str::trim).collect()
    };
    Some((params, ret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_detection() {
        assert!(is_optional("String?"));
        assert!(!is_optional("String??"));
        assert!(is_double_optional("String??"));
        assert_eq!(strip_optional("Int?"), "Int");
    }

    #[test]
    fn generic_args_split_on_top_level_commas_only() {
        let (name, args) = split_generic_args("MutableList<Pair<A, B>, C>").unwrap();
        assert_eq!(name, "MutableList");
        assert_eq!(args, vec!["Pair<A, B>", "C"]);
    }

    #[test]
    fn array_and_dictionary_sugar() {
        assert_eq!(parse_array_sugar("[Int]"), Some("Int"));
        assert_eq!(parse_dictionary_sugar("[String: Int]"), Some(("String", "Int")));
        assert_eq!(parse_array_sugar("[String: Int]"), None);
    }

    #[test]
    fn tuple_and_function_types() {
        assert_eq!(parse_tuple_type("(Int, String)"), Some(vec!["Int", "String"]));
        assert_eq!(parse_tuple_type("(Int)"), None);
        let (params, ret) = parse_function_type("(Int, String) -> Bool").unwrap();
        assert_eq!(params, vec!["Int", "String"]);
        assert_eq!(ret, "Bool");
    }
}
