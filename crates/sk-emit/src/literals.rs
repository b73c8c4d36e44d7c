//! Literal rendering (spec.md §4.7): radix-preserving integer literals,
//! `u`/`f` suffixes, and string/char escaping.

use sk_ast::Radix;

/// Renders a signed integer literal in its original radix.
pub fn render_int(value: i64, radix: Radix) -> String {
    match radix {
        Radix::Decimal => format!("{value}"),
        Radix::Hex if value < 0 => format!("-0x{:x}", value.unsigned_abs()),
        Radix::Hex => format!("0x{value:x}"),
        Radix::Binary if value < 0 => format!("-0b{:b}", value.unsigned_abs()),
        Radix::Binary => format!("0b{value:b}"),
    }
}

/// Renders an unsigned integer literal with the target's `u` suffix.
pub fn render_uint(value: u64, radix: Radix) -> String {
    match radix {
        Radix::Decimal => format!("{value}u"),
        Radix::Hex => format!("0x{value:x}u"),
        Radix::Binary => format!("0b{value:b}u"),
    }
}

/// Renders a `Double` literal (no suffix; the target's default
/// floating-point literal type).
pub fn render_double(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Renders a `Float` literal with the target's `f` suffix.
pub fn render_float(value: f32) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}f")
    } else {
        format!("{value}f")
    }
}

pub fn render_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Escapes a string body for a plain (non-multiline) double-quoted
/// literal.
pub fn escape_string_body(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '$' => out.push_str("\\$"),
            other => out.push(other),
        }
    }
    out
}

/// Renders a plain string literal; `is_multiline` selects the target's
/// triple-quoted form, which needs no escaping beyond a literal `${`.
pub fn render_string(value: &str, is_multiline: bool) -> String {
    if is_multiline {
        format!("\"\"\"{}\"\"\"", value.replace("${", "\\${"))
    } else {
        format!("\"{}\"", escape_string_body(value))
    }
}

pub fn render_char(c: char) -> String {
    match c {
        '\\' => "'\\\\'".to_string(),
        '\'' => "'\\''".to_string(),
        '\n' => "'\\n'".to_string(),
        '\t' => "'\\t'".to_string(),
        '\r' => "'\\r'".to_string(),
        other => format!("'{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radix_is_preserved_across_int_literal_rendering() {
        assert_eq!(render_int(255, Radix::Hex), "0xff");
        assert_eq!(render_int(5, Radix::Binary), "0b101");
        assert_eq!(render_int(5, Radix::Decimal), "5");
    }

    #[test]
    fn unsigned_literals_get_the_u_suffix() {
        assert_eq!(render_uint(5, Radix::Decimal), "5u");
        assert_eq!(render_uint(255, Radix::Hex), "0xffu");
    }

    #[test]
    fn float_literals_get_the_f_suffix_and_double_literals_do_not() {
        assert_eq!(render_float(1.5), "1.5f");
        assert_eq!(render_double(1.5), "1.5");
        assert_eq!(render_double(2.0), "2.0");
    }

    #[test]
    fn string_escaping_handles_quotes_backslashes_and_dollar_signs() {
        assert_eq!(render_string("a\"b\\c$d", false), "\"a\\\"b\\\\c\\$d\"");
    }

    #[test]
    fn multiline_strings_use_triple_quotes() {
        assert_eq!(render_string("line1\nline2", true), "\"\"\"line1\nline2\"\"\"");
    }
}
