//! The recording, semantic-rewrite, and warning passes that give the
//! generic pass framework (`sk-pass`) its language-specific behavior
//! (spec.md §4.4-§4.6).
//!
//! `record` passes run first, in the documented order, against a
//! mutable [`sk_ctx::Context`] shared across every file in the run.
//! Once every file's first round has finished the context is frozen and
//! `rewrite`/`warn` passes run per-file against the now read-only
//! context.

pub mod record;
pub mod rewrite;
pub mod util;
pub mod warn;

/// The nine recording passes, in the order spec.md §4.4 requires them to
/// run. `ImplicitRawValues` must run before `CleanInheritances`, which
/// must run before `EnumRecording` -- see the inline comments on each
/// struct in [`record`] for why.
pub fn recording_pass_order() -> &'static [&'static str] {
    &[
        "InitializerReturnTypes",
        "TemplateRecording",
        "ProtocolRecording",
        "InitializerRecording",
        "InheritanceRecording",
        "ImplicitRawValues",
        "CleanInheritances",
        "EnumRecording",
        "FunctionRecording",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_pass_order_puts_raw_values_before_clean_inheritances_before_enum_recording() {
        let order = recording_pass_order();
        let raw = order.iter().position(|p| *p == "ImplicitRawValues").unwrap();
        let clean = order.iter().position(|p| *p == "CleanInheritances").unwrap();
        let enum_recording = order.iter().position(|p| *p == "EnumRecording").unwrap();
        assert!(raw < clean);
        assert!(clean < enum_recording);
    }
}
