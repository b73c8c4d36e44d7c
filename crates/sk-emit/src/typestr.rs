//! The type-string rewrite table (spec.md §4.7). Types are opaque
//! strings throughout the pipeline (see `sk_ast::typestr`); this module
//! is where that string gets its final target-language spelling.

use sk_ast::typestr;

/// A handful of scalar names the source and target spell differently.
/// Not part of spec.md's literal bullet list, but needed for the same
/// reason that list exists at all -- passes elsewhere in the pipeline
/// already synthesize "Boolean" and compare against "Character" as
/// target/source spellings respectively (see `EquatableOperators`,
/// `CharactersInSwitches`), so a literal source type string reaching the
/// emitter unrewritten would otherwise slip through unmapped.
fn scalar_rename(name: &str) -> Option<&'static str> {
    match name {
        "Bool" => Some("Boolean"),
        "Character" => Some("Char"),
        _ => None,
    }
}

/// Translates a source type string into its target spelling, recursing
/// into generic arguments, optionals, tuples, and function types.
pub fn translate_type(ty: &str) -> String {
    let t = ty.trim();

    if t == "()" || t == "Void" {
        return "Unit".to_string();
    }

    if typestr::is_double_optional(t) {
        // T?? has no direct target equivalent; the warning pass already
        // flagged it, here we just flatten one level and recurse.
        let once_stripped = t.trim_end();
        return translate_type(&once_stripped[..once_stripped.len() - 1]);
    }

    if typestr::is_optional(t) {
        return format!("{}?", translate_type(typestr::strip_optional(t)));
    }

    if let Some((params, ret)) = typestr::parse_function_type(t) {
        let params_s = params.iter().map(|p| translate_type(p)).collect::<Vec<_>>().join(", ");
        return format!("({params_s}) -> {}", translate_type(ret));
    }

    if let Some(inner) = typestr::parse_array_sugar(t) {
        return format!("List<{}>", translate_type(inner));
    }

    if let Some((k, v)) = typestr::parse_dictionary_sugar(t) {
        return format!("Map<{}, {}>", translate_type(k), translate_type(v));
    }

    if let Some(parts) = typestr::parse_tuple_type(t) {
        if parts.len() == 2 {
            return format!("Pair<{}, {}>", translate_type(parts[0]), translate_type(parts[1]));
        }
        return format!("({})", parts.iter().map(|p| translate_type(p)).collect::<Vec<_>>().join(", "));
    }

    if let Some((name, args)) = typestr::split_generic_args(t) {
        let mapped = match name {
            "Array" => "List",
            "Dictionary" => "Map",
            other => scalar_rename(other).unwrap_or(other),
        };
        let args_s = args.iter().map(|a| translate_type(a)).collect::<Vec<_>>().join(", ");
        return format!("{mapped}<{args_s}>");
    }

    scalar_rename(t).unwrap_or(t).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_and_unit_collapse_to_unit() {
        assert_eq!(translate_type("()"), "Unit");
        assert_eq!(translate_type("Void"), "Unit");
    }

    #[test]
    fn optional_is_preserved_and_double_optional_flattened() {
        assert_eq!(translate_type("String?"), "String?");
        assert_eq!(translate_type("String??"), "String?");
    }

    #[test]
    fn array_and_dictionary_sugar_become_list_and_map() {
        assert_eq!(translate_type("[Int]"), "List<Int>");
        assert_eq!(translate_type("[String: Int]"), "Map<String, Int>");
    }

    #[test]
    fn named_array_and_dictionary_generics_become_list_and_map() {
        assert_eq!(translate_type("Array<Int>"), "List<Int>");
        assert_eq!(translate_type("Dictionary<String, Int>"), "Map<String, Int>");
    }

    #[test]
    fn two_element_tuple_becomes_pair() {
        assert_eq!(translate_type("(Int, String)"), "Pair<Int, String>");
    }

    #[test]
    fn function_type_recurses_into_params_and_return() {
        assert_eq!(translate_type("(Int, ()) -> Void"), "(Int, Unit) -> Unit");
    }

    #[test]
    fn trailing_throws_is_dropped_by_the_underlying_parser() {
        assert_eq!(translate_type("(Int) throws -> Bool"), "(Int) -> Boolean");
    }

    #[test]
    fn scalar_renames_apply_at_top_level_and_nested() {
        assert_eq!(translate_type("Bool"), "Boolean");
        assert_eq!(translate_type("Character"), "Char");
        assert_eq!(translate_type("[Character]"), "List<Char>");
    }

    #[test]
    fn generic_application_recurses_into_nested_arguments() {
        assert_eq!(translate_type("Array<Array<Int>>"), "List<List<Int>>");
    }
}
