use crate::error::{Error, Result};
use crate::frame::StackFrameEntry;
use serde::{Deserialize, Serialize};

/// How a record relates to the record before it in the chain.
///
/// The first record in a chain is always `Root`. A `CausedBy` record was
/// named as the explicit cause of its predecessor; a `Context` record was
/// being handled when its predecessor was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Root,
    CausedBy,
    Context,
}

impl Relationship {
    /// The fixed label used in structured output. `Root` has no label; the
    /// leading record of a chain never appears in a `chain` list.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Relationship::Root => None,
            Relationship::CausedBy => Some("caused_by"),
            Relationship::Context => Some("context"),
        }
    }
}

/// One exception in a chain: metadata plus its own normalized frames,
/// outermost call first, raising frame last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRecord {
    pub type_name: String,
    pub message: String,
    pub frames: Vec<StackFrameEntry>,
    pub relationship: Relationship,
}

/// An ordered, leaf-first sequence of exception records.
///
/// Invariants: length >= 1, no duplicate underlying exception, bounded depth.
/// The chain walker upholds the last two; `Chain::new` enforces the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub records: Vec<ExceptionRecord>,
}

impl Chain {
    pub fn new(records: Vec<ExceptionRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyChain);
        }
        Ok(Self { records })
    }

    /// The exception that was actually raised/reported.
    pub fn leaf(&self) -> &ExceptionRecord {
        &self.records[0]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed chain; present so `len` reads
    /// naturally at call sites.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
