use sk_ast::SourceRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub range: Option<SourceRange>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>, range: Option<SourceRange>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            range,
        }
    }

    pub fn error(message: impl Into<String>, range: Option<SourceRange>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            range,
        }
    }
}

/// Accumulates diagnostics across both pipeline rounds. Shared across
/// threads during the parallel first round, so pushes go through a lock
/// (spec.md §5).
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: parking_lot::Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, diagnostic: Diagnostic) {
        tracing::debug!(
            severity = ?diagnostic.severity,
            message = %diagnostic.message,
            "diagnostic"
        );
        self.diagnostics.lock().push(diagnostic);
    }

    pub fn warn(&self, message: impl Into<String>, range: Option<SourceRange>) {
        self.push(Diagnostic::warning(message, range));
    }

    pub fn error(&self, message: impl Into<String>, range: Option<SourceRange>) {
        self.push(Diagnostic::error(message, range));
    }

    pub fn all(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .lock()
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .lock()
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_queryable_independently() {
        let sink = DiagnosticSink::new();
        sink.warn("MutableList usage", None);
        sink.warn("Deprecated construct", None);
        sink.error("unexpected AST structure", None);
        assert_eq!(sink.warning_count(), 2);
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.all().len(), 3);
    }
}
