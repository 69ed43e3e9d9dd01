use crate::frame::RawFrame;
use serde::{Deserialize, Serialize};

/// Capability view of an exception-like value.
///
/// The chain walker only ever sees this interface; host exception types are
/// adapted to it at the boundary. `explicit_cause` is the "raised in response
/// to" link, `implicit_context` the "was being handled when" link, which an
/// exception may suppress.
pub trait ErrorLike {
    fn type_name(&self) -> &str;
    fn message(&self) -> String;
    fn explicit_cause(&self) -> Option<&dyn ErrorLike>;
    fn implicit_context(&self) -> Option<&dyn ErrorLike>;
    fn context_suppressed(&self) -> bool;
    fn raw_frames(&self) -> Vec<RawFrame>;
}

/// Identity of an exception value for cycle detection: the address of the
/// trait object's data. Two links to the same underlying value compare equal
/// even when reached through different chains.
pub fn identity(err: &dyn ErrorLike) -> usize {
    err as *const dyn ErrorLike as *const () as usize
}

/// An owned, buildable [`ErrorLike`] implementation.
///
/// This is the general-purpose adapter target: collaborators that capture an
/// exception from their host runtime materialize it as a `CapturedError`
/// (frames, cause/context links and all) and hand it to the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedError {
    pub type_name: String,
    pub message: String,
    pub frames: Vec<RawFrame>,
    pub cause: Option<Box<CapturedError>>,
    pub context: Option<Box<CapturedError>>,
    pub suppress_context: bool,
}

impl CapturedError {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            frames: Vec::new(),
            cause: None,
            context: None,
            suppress_context: false,
        }
    }

    /// Adapt a standard error chain: `source()` links become explicit causes.
    /// Std errors carry no type name or frames, so only messages survive.
    pub fn from_std(type_name: impl Into<String>, err: &dyn std::error::Error) -> Self {
        let mut captured = CapturedError::new(type_name, err.to_string());
        if let Some(source) = err.source() {
            captured.cause = Some(Box::new(CapturedError::from_std("Error", source)));
        }
        captured
    }

    pub fn with_frame(mut self, frame: RawFrame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn caused_by(mut self, cause: CapturedError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn in_context_of(mut self, context: CapturedError) -> Self {
        self.context = Some(Box::new(context));
        self
    }

    pub fn suppressing_context(mut self) -> Self {
        self.suppress_context = true;
        self
    }
}

impl ErrorLike for CapturedError {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn explicit_cause(&self) -> Option<&dyn ErrorLike> {
        self.cause.as_deref().map(|c| c as &dyn ErrorLike)
    }

    fn implicit_context(&self) -> Option<&dyn ErrorLike> {
        self.context.as_deref().map(|c| c as &dyn ErrorLike)
    }

    fn context_suppressed(&self) -> bool {
        self.suppress_context
    }

    fn raw_frames(&self) -> Vec<RawFrame> {
        self.frames.clone()
    }
}

/// Caller-supplied descriptor of the thread an exception escaped from.
/// Attached to output only when explicitly provided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadInfo {
    pub name: String,
    pub daemon: bool,
}
