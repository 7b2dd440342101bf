//! # Error Definitions
//!
//! The four failure families of the registry: schema, lookup, encoding, decoding.
//! Codec errors are wrapped according to the operation that raised them, so a
//! caller can tell a bad document from a bad argument from bad return data.

use abipack::Error as CodecError;

/// Something the registry was asked for but does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    Function(String),
    Event(String),
    /// Neither a function nor an event carries this name.
    Entry(String),
    Selector([u8; 4]),
    Topic([u8; 32]),
}

impl std::fmt::Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFound::Function(name) => write!(f, "function '{}' not found", name),
            NotFound::Event(name) => write!(f, "event '{}' not found", name),
            NotFound::Entry(name) => write!(f, "no function or event named '{}'", name),
            NotFound::Selector(id) => write!(f, "no function with selector 0x{}", hex::encode(id)),
            NotFound::Topic(id) => write!(f, "no event with topic 0x{}", hex::encode(id)),
        }
    }
}

/// Registry failures.
#[derive(Debug)]
pub enum Error {
    /// A type string or tuple component list in the document is invalid.
    Schema(CodecError),
    /// The document is not the expected JSON shape.
    Document(serde_json::Error),
    /// Lookup by name, selector or topic failed.
    NotFound(NotFound),
    /// Values did not match the argument schema. Nothing was emitted.
    Encoding(CodecError),
    /// Return data, log data or call data could not be decoded.
    Decoding(CodecError),
    /// A selector lookup was given fewer than 4 bytes.
    ShortInput(usize),
    /// A log carried a different number of topics than the event declares.
    TopicCount { expected: usize, found: usize },
}

impl Error {
    /// True for failures raised while building a registry.
    pub fn is_schema(&self) -> bool {
        matches!(self, Error::Schema(_) | Error::Document(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Schema(e) => write!(f, "schema error: {}", e),
            Error::Document(e) => write!(f, "schema document error: {}", e),
            Error::NotFound(e) => write!(f, "{}", e),
            Error::Encoding(e) => write!(f, "encoding error: {}", e),
            Error::Decoding(e) => write!(f, "decoding error: {}", e),
            Error::ShortInput(n) => write!(f, "data too short ({} bytes) for selector lookup", n),
            Error::TopicCount { expected, found } => {
                write!(f, "topic count mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Schema(e) | Error::Encoding(e) | Error::Decoding(e) => Some(e),
            Error::Document(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self { Self::Document(e) }
}

impl From<NotFound> for Error {
    fn from(e: NotFound) -> Self { Self::NotFound(e) }
}

/// A specialized Result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;
