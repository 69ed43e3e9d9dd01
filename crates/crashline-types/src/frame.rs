use serde::{Deserialize, Serialize};

/// A raw stack entry as supplied by the host runtime's stack-walking
/// primitive. This is the extraction contract the engine depends on; how the
/// host actually represents a live call stack never leaks past this type.
///
/// When `source_line` is `Some`, the frame normalizer uses it verbatim and
/// skips the on-disk lookup, which keeps synthetic frames deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub file: String,
    pub call_site: String,
    pub line_number: u32,
    pub source_line: Option<String>,
}

impl RawFrame {
    pub fn new(
        file: impl Into<String>,
        call_site: impl Into<String>,
        line_number: u32,
    ) -> Self {
        Self {
            file: file.into(),
            call_site: call_site.into(),
            line_number,
            source_line: None,
        }
    }

    pub fn with_source_line(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = Some(source_line.into());
        self
    }
}

/// A normalized stack frame.
///
/// `location` is the pre-alias file path; alias resolution happens at render
/// time so the same entry can be presented against different registries.
/// Frames carry no identity beyond value equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrameEntry {
    pub location: String,
    pub call_site: String,
    pub line_number: u32,
    /// Source text at `line_number`, empty when unavailable.
    pub source_line: String,
}
