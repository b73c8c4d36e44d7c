//! Template registry.
//!
//! A template maps a recorded source-language pattern to a target-snippet
//! string. Per spec.md §9's open question, the pattern language is not
//! fully specified by the source this spec was distilled from; we treat a
//! template strictly as an opaque exact-match string, deliberately not
//! inventing a hole/wildcard syntax. Extending this into a real pattern
//! language is left for a future change, not guessed at here.
#[derive(Debug, Default, Clone)]
pub struct TemplateRegistry {
    entries: Vec<(String, String)>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, source_pattern: impl Into<String>, target_snippet: impl Into<String>) {
        self.entries.push((source_pattern.into(), target_snippet.into()));
    }

    /// Exact-match lookup. Returns the most recently registered template
    /// for `source_text`, or `None`.
    pub fn lookup(&self, source_text: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(pattern, _)| pattern == source_text)
            .map(|(_, snippet)| snippet.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_most_recent_registration() {
        let mut reg = TemplateRegistry::new();
        reg.register("Thread.sleep(forTimeInterval:)", "Thread.sleep(it)");
        reg.register("Thread.sleep(forTimeInterval:)", "Thread.sleep(it * 1000)");
        assert_eq!(
            reg.lookup("Thread.sleep(forTimeInterval:)"),
            Some("Thread.sleep(it * 1000)")
        );
    }

    #[test]
    fn lookup_misses_return_none() {
        let reg = TemplateRegistry::new();
        assert_eq!(reg.lookup("anything"), None);
    }
}
