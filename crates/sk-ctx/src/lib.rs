//! The transpilation context: per-run, cross-file state accumulated by the
//! first-round recording passes and read (never written) by the
//! second-round semantic-rewrite and warning passes.
//!
//! Lifecycle: `new` -> `populate` (first round, parallel across files,
//! guarded by an internal lock) -> `freeze` -> read-only (second round) ->
//! discard. Calling a `record_*` method after `freeze()` is a programming
//! error and panics, since it would mean a second-round pass mutating
//! state a sibling file's second round may already have read.

mod config;
mod diagnostics;
mod registry;
mod templates;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use sk_ast::EnumDeclaration;

pub use config::{CompilationArguments, Config};
pub use diagnostics::{Diagnostic, DiagnosticSink, Severity};
pub use registry::FunctionTranslation;
pub use templates::TemplateRegistry;

use registry::Registry;

pub struct Context {
    pub config: Config,
    registry: Mutex<Registry>,
    diagnostics: DiagnosticSink,
    frozen: AtomicBool,
    passes_run: AtomicUsize,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: Mutex::new(Registry::default()),
            diagnostics: DiagnosticSink::new(),
            frozen: AtomicBool::new(false),
            passes_run: AtomicUsize::new(0),
        }
    }

    fn assert_mutable(&self, what: &str) {
        assert!(
            !self.is_frozen(),
            "context mutated ({what}) after freeze -- first round must finish before the second round starts"
        );
    }

    /// Ends the first round: subsequent `record_*` calls panic.
    pub fn freeze(&self) {
        self.frozen.store(true, Ordering::SeqCst);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::SeqCst)
    }

    /// Called by the pass framework after each pass runs, purely for
    /// observability parity with a production pipeline.
    pub fn record_pass_run(&self, name: &str) {
        let n = self.passes_run.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(pass = name, total_passes_run = n, "pass ran");
    }

    pub fn passes_run(&self) -> usize {
        self.passes_run.load(Ordering::Relaxed)
    }

    // ── Diagnostics ──────────────────────────────────────────────────

    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.diagnostics
    }

    // ── Protocols ────────────────────────────────────────────────────

    pub fn record_protocol(&self, name: impl Into<String>) {
        self.assert_mutable("record_protocol");
        self.registry.lock().protocols.insert(name.into());
    }

    pub fn is_protocol(&self, name: &str) -> bool {
        self.registry.lock().protocols.contains(name)
    }

    // ── Enum classification ─────────────────────────────────────────

    pub fn mark_enum_class(&self, fqn: impl Into<String>) {
        self.assert_mutable("mark_enum_class");
        self.registry.lock().enum_class_names.insert(fqn.into());
    }

    pub fn mark_sealed_class(&self, fqn: impl Into<String>) {
        self.assert_mutable("mark_sealed_class");
        self.registry.lock().sealed_class_names.insert(fqn.into());
    }

    pub fn is_enum_class(&self, fqn: &str) -> bool {
        self.registry.lock().enum_class_names.contains(fqn)
    }

    pub fn is_sealed_class(&self, fqn: &str) -> bool {
        self.registry.lock().sealed_class_names.contains(fqn)
    }

    pub fn record_enum_declaration(&self, fqn: impl Into<String>, decl: EnumDeclaration) {
        self.assert_mutable("record_enum_declaration");
        self.registry.lock().enum_declarations.insert(fqn.into(), decl);
    }

    pub fn get_enum_declaration(&self, fqn: &str) -> Option<EnumDeclaration> {
        self.registry.lock().enum_declarations.get(fqn).cloned()
    }

    /// Finds the dot-joined enclosing scope for a bare nested-enum name,
    /// by scanning recorded enum fully-qualified names for one whose last
    /// segment matches. Used by `InnerTypePrefixes` to qualify a bare
    /// reference to a type nested inside another declaration.
    pub fn find_enum_owner(&self, bare_name: &str) -> Option<String> {
        self.registry
            .lock()
            .enum_declarations
            .keys()
            .find_map(|fqn| {
                let (owner, last) = fqn.rsplit_once('.')?;
                (last == bare_name).then(|| owner.to_string())
            })
    }

    // ── Inheritance ──────────────────────────────────────────────────

    pub fn record_inheritance(&self, fqn: impl Into<String>, inherited: impl Into<String>) {
        self.assert_mutable("record_inheritance");
        self.registry
            .lock()
            .inheritances
            .entry(fqn.into())
            .or_default()
            .push(inherited.into());
    }

    pub fn set_inheritances(&self, fqn: impl Into<String>, inherited: Vec<String>) {
        self.assert_mutable("set_inheritances");
        self.registry.lock().inheritances.insert(fqn.into(), inherited);
    }

    pub fn get_inheritances(&self, fqn: &str) -> Vec<String> {
        self.registry
            .lock()
            .inheritances
            .get(fqn)
            .cloned()
            .unwrap_or_default()
    }

    // ── Function translations ───────────────────────────────────────

    pub fn record_function_translation(&self, translation: FunctionTranslation) {
        self.assert_mutable("record_function_translation");
        self.registry.lock().function_translations.push(translation);
    }

    pub fn get_function_translation(
        &self,
        name: &str,
        type_name: Option<&str>,
    ) -> Option<FunctionTranslation> {
        self.registry
            .lock()
            .get_function_translation(name, type_name)
            .cloned()
    }

    // ── Pure functions ───────────────────────────────────────────────

    pub fn mark_pure(&self, name: impl Into<String>) {
        self.assert_mutable("mark_pure");
        self.registry.lock().pure_functions.insert(name.into());
    }

    pub fn is_pure(&self, name: &str) -> bool {
        self.registry.lock().pure_functions.contains(name)
    }

    // ── Templates ────────────────────────────────────────────────────

    pub fn register_template(&self, source_pattern: impl Into<String>, target_snippet: impl Into<String>) {
        self.assert_mutable("register_template");
        self.registry.lock().templates.register(source_pattern, target_snippet);
    }

    pub fn lookup_template(&self, source_text: &str) -> Option<String> {
        self.registry.lock().templates.lookup(source_text).map(str::to_string)
    }
}

/// Helper for building a dot-joined fully-qualified type name, used by
/// both the recording passes and the pass framework's `get_full_type()`.
pub fn join_fully_qualified(segments: &[impl AsRef<str>]) -> String {
    segments.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_translation_lookup_prefers_most_recent() {
        let ctx = Context::new(Config::default());
        ctx.record_function_translation(FunctionTranslation {
            source_name: "map".into(),
            type_name: Some("Array".into()),
            prefix: "fun".into(),
            parameters: vec![],
        });
        ctx.record_function_translation(FunctionTranslation {
            source_name: "map".into(),
            type_name: Some("Array".into()),
            prefix: "fun".into(),
            parameters: vec![sk_ast::FunctionParameter {
                label: "transform".into(),
                api_label: None,
                type_name: "(T) -> U".into(),
                default: None,
                is_variadic: false,
                is_autoclosure: false,
            }],
        });
        let found = ctx.get_function_translation("map", Some("Array")).unwrap();
        assert_eq!(found.parameters.len(), 1);
    }

    #[test]
    fn implicit_raw_values_sequence_example() {
        // Documents the property test from spec.md §8: unspecified integer
        // raw values are 0, 1, 2, ... unless an explicit value resets the
        // sequence. The sequencing logic itself lives in sk-passes; this
        // just pins the context's role (storing the classification) ahead
        // of that pass running.
        let ctx = Context::new(Config::default());
        ctx.mark_enum_class("Direction");
        assert!(ctx.is_enum_class("Direction"));
        assert!(!ctx.is_sealed_class("Direction"));
    }

    #[test]
    #[should_panic(expected = "mutated")]
    fn record_after_freeze_panics() {
        let ctx = Context::new(Config::default());
        ctx.freeze();
        ctx.record_protocol("Equatable");
    }

    #[test]
    fn join_fully_qualified_dot_joins_segments() {
        assert_eq!(join_fully_qualified(&["Outer", "Inner"]), "Outer.Inner");
    }
}
