//! In-memory diagnostic trace.
//!
//! Decoders annotate the byte positions they visit with short labels of the
//! form `Entries(<Kind>)[<level>]:key=value,`. The trace is purely
//! observational: nothing in the crate reads it back to make a decision.

use std::fmt;

/// How serious an annotation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Note,
    Error,
}

/// One annotated position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub position: usize,
    pub text: String,
    pub severity: Severity,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Note => write!(f, "{:08x}: {}", self.position, self.text),
            Severity::Error => write!(f, "{:08x}: ###{}", self.position, self.text),
        }
    }
}

/// Annotation sink owned by a zone.
#[derive(Debug, Clone, Default)]
pub struct DebugTrace {
    enabled: bool,
    entries: Vec<TraceEntry>,
    delimiters: Vec<(usize, char)>,
}

impl DebugTrace {
    /// Create a trace; a disabled trace drops everything it is given.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Annotate `position` with an informational label.
    pub fn note(&mut self, position: usize, text: impl Into<String>) {
        self.push(position, text.into(), Severity::Note);
    }

    /// Annotate `position` with an error label.
    pub fn error(&mut self, position: usize, text: impl Into<String>) {
        self.push(position, text.into(), Severity::Error);
    }

    /// Mark a visual separator (record start `[`, record end `]`, field `|`).
    pub fn delimit(&mut self, position: usize, mark: char) {
        if self.enabled {
            self.delimiters.push((position, mark));
        }
    }

    fn push(&mut self, position: usize, text: String, severity: Severity) {
        if !self.enabled || text.is_empty() {
            return;
        }
        self.entries.push(TraceEntry {
            position,
            text,
            severity,
        });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn delimiters(&self) -> &[(usize, char)] {
        &self.delimiters
    }

    pub fn errors(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries
            .iter()
            .filter(|e| e.severity == Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Whether any annotation contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.text.contains(needle))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.delimiters.clear();
    }
}

/// Build the usual `Entries(<kind>)[<level>]:` prefix.
pub fn entry_label(kind: &str, level: usize) -> String {
    format!("Entries({kind})[{level}]:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_trace_drops_annotations() {
        let mut trace = DebugTrace::new(false);
        trace.note(4, "Entries(Foo):");
        trace.error(8, "bad");
        trace.delimit(8, '|');
        assert!(trace.entries().is_empty());
        assert!(trace.delimiters().is_empty());
    }

    #[test]
    fn test_error_entries_render_with_marker() {
        let mut trace = DebugTrace::new(true);
        trace.note(0x10, "Entries(Header):");
        trace.error(0x20, "unexpected size,");
        assert!(trace.has_errors());
        assert_eq!(trace.errors().count(), 1);
        assert_eq!(trace.entries()[1].to_string(), "00000020: ###unexpected size,");
        assert_eq!(trace.entries()[0].to_string(), "00000010: Entries(Header):");
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let mut trace = DebugTrace::new(true);
        trace.note(0, "");
        assert!(trace.entries().is_empty());
    }

    #[test]
    fn test_entry_label() {
        assert_eq!(entry_label("SVGDI", 2), "Entries(SVGDI)[2]:");
    }
}
