use std::fmt;

/// Result type for crashline-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A chain was constructed with no records
    EmptyChain,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyChain => write!(f, "a chain must contain at least one record"),
        }
    }
}

impl std::error::Error for Error {}
