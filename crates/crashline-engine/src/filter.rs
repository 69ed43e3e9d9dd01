use crate::alias::{AliasRegistry, LOCAL_TOKEN};
use crate::error::Result;
use crashline_types::{Chain, ExceptionRecord, StackFrameEntry};
use regex::Regex;

/// Frame-level filter applied before either output path. Text and structured
/// output must run the same filter over the same chain; this type is the
/// single place that decision is made.
#[derive(Debug, Clone, Default)]
pub struct FrameFilter {
    /// Keep only frames whose location resolves to the local-code token.
    pub local_only: bool,
    exclude: Vec<Regex>,
}

impl FrameFilter {
    pub fn new(local_only: bool, exclude_patterns: &[String]) -> Result<Self> {
        let exclude = exclude_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            local_only,
            exclude,
        })
    }

    /// A filter that keeps every frame.
    pub fn none() -> Self {
        Self::default()
    }

    /// Copy of `record` with its frames reduced to the ones this filter
    /// keeps. Type name, message and relationship are never touched; an
    /// empty result is valid.
    pub fn apply(&self, record: &ExceptionRecord, registry: &AliasRegistry) -> ExceptionRecord {
        ExceptionRecord {
            type_name: record.type_name.clone(),
            message: record.message.clone(),
            frames: record
                .frames
                .iter()
                .filter(|frame| self.keeps(frame, registry))
                .cloned()
                .collect(),
            relationship: record.relationship,
        }
    }

    pub fn apply_chain(&self, chain: &Chain, registry: &AliasRegistry) -> Chain {
        Chain {
            records: chain
                .records
                .iter()
                .map(|record| self.apply(record, registry))
                .collect(),
        }
    }

    fn keeps(&self, frame: &StackFrameEntry, registry: &AliasRegistry) -> bool {
        // exclude patterns match the raw location and apply unconditionally
        if self.exclude.iter().any(|p| p.is_match(&frame.location)) {
            return false;
        }
        if self.local_only && registry.resolve(&frame.location).token != LOCAL_TOKEN {
            return false;
        }
        true
    }
}
