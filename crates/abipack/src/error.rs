//! # Error Definitions
//!
//! Every failure the codec can report, from type parsing through encoding
//! and decoding. `ErrorKind` tells the schema layer which stage failed.

/// The stage of the codec a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A type string or tuple component list could not be understood.
    Schema,
    /// A value did not fit the type it was encoded as.
    Encoding,
    /// The input bytes do not describe a value of the expected type.
    Decoding,
}

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Schema
    /// Base type name is not one the codec knows.
    UnknownType(String),
    /// Bit width for `uintN`/`intN` is not a multiple of 8 in 8..=256.
    InvalidBitSize(String),
    /// Width of `bytesN` is outside 1..=32.
    InvalidByteSize(String),
    /// Array suffix is not `[]` or `[N]`.
    MalformedArray(String),
    /// A `tuple` type was given without components.
    MissingComponents(String),

    // Encoding
    /// Number of values does not match the number of types.
    ArgumentCount { expected: usize, found: usize },
    /// Value kind cannot be encoded as the declared type.
    TypeMismatch { expected: String, found: &'static str },
    /// Integer does not fit the declared bit width.
    IntegerOverflow(String),
    /// Fixed bytes value has the wrong length.
    FixedBytesLength { expected: usize, found: usize },
    /// Fixed array or tuple value has the wrong number of elements.
    ArrayLength { expected: usize, found: usize },

    // Decoding
    /// Nothing to decode.
    EmptyInput,
    /// Input length is not a multiple of 32.
    UnalignedInput(usize),
    /// An offset or length points past the end of the buffer.
    OutOfBounds { offset: usize, len: usize },
    /// A length or offset word does not fit in `usize` or exceeds `Limits::max_length`.
    LengthOverflow,
    /// A bool word was neither 0 nor 1.
    InvalidBool,
    /// High or trailing padding bytes were not what the type requires.
    InvalidPadding(String),
    /// String payload is not valid UTF-8.
    InvalidUtf8,

    /// Nesting went deeper than `Limits::max_depth`.
    RecursionLimitExceeded,
}

impl Error {
    /// Classifies this error by codec stage.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownType(_)
            | Error::InvalidBitSize(_)
            | Error::InvalidByteSize(_)
            | Error::MalformedArray(_)
            | Error::MissingComponents(_) => ErrorKind::Schema,

            Error::ArgumentCount { .. }
            | Error::TypeMismatch { .. }
            | Error::IntegerOverflow(_)
            | Error::FixedBytesLength { .. }
            | Error::ArrayLength { .. } => ErrorKind::Encoding,

            Error::EmptyInput
            | Error::UnalignedInput(_)
            | Error::OutOfBounds { .. }
            | Error::LengthOverflow
            | Error::InvalidBool
            | Error::InvalidPadding(_)
            | Error::InvalidUtf8 => ErrorKind::Decoding,

            // Raised while walking values or types; the caller knows which.
            Error::RecursionLimitExceeded => ErrorKind::Decoding,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownType(t) => write!(f, "unknown type: {}", t),
            Error::InvalidBitSize(t) => write!(f, "invalid integer bit size: {}", t),
            Error::InvalidByteSize(t) => write!(f, "invalid fixed bytes size: {}", t),
            Error::MalformedArray(t) => write!(f, "malformed array type: {}", t),
            Error::MissingComponents(t) => write!(f, "tuple type without components: {}", t),
            Error::ArgumentCount { expected, found } => {
                write!(f, "argument count mismatch: expected {}, found {}", expected, found)
            }
            Error::TypeMismatch { expected, found } => {
                write!(f, "cannot encode {} value as {}", found, expected)
            }
            Error::IntegerOverflow(t) => write!(f, "integer out of range for {}", t),
            Error::FixedBytesLength { expected, found } => {
                write!(f, "fixed bytes length mismatch: expected {}, found {}", expected, found)
            }
            Error::ArrayLength { expected, found } => {
                write!(f, "element count mismatch: expected {}, found {}", expected, found)
            }
            Error::EmptyInput => write!(f, "empty input"),
            Error::UnalignedInput(n) => write!(f, "input length {} is not a multiple of 32", n),
            Error::OutOfBounds { offset, len } => {
                write!(f, "read at {} past end of {}-byte buffer", offset, len)
            }
            Error::InvalidPadding(t) => write!(f, "invalid padding for {}", t),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
