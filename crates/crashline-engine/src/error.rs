use std::fmt;

/// Result type for crashline-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug)]
pub enum Error {
    /// The reverse parser found no traceback section in its input
    NoTraceback,
    /// An exclude pattern failed to compile
    BadPattern(regex::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoTraceback => write!(f, "no traceback section found in input"),
            Error::BadPattern(err) => write!(f, "invalid exclude pattern: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::BadPattern(err) => Some(err),
            _ => None,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::BadPattern(err)
    }
}
