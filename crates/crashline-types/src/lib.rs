pub mod capture;
pub mod chain;
pub mod error;
pub mod frame;

pub use capture::{CapturedError, ErrorLike, ThreadInfo, identity};
pub use chain::{Chain, ExceptionRecord, Relationship};
pub use error::{Error, Result};
pub use frame::{RawFrame, StackFrameEntry};
