//! # Abipack
//!
//! A bounded, schema-directed codec for contract call data.
//!
//! ## Format
//!
//! Everything is laid out in 32-byte big-endian words.
//!
//! - **Static values** (`uintN`, `intN`, `address`, `bool`, `bytesN`, and tuples or
//!   fixed arrays made only of those) are written in place.
//! - **Dynamic values** (`bytes`, `string`, `T[]`, and tuples or fixed arrays holding
//!   any of them) leave a single offset word in the head and append their payload to
//!   the tail. Offsets are measured from the start of the enclosing sequence.
//! - `bytes`, `string` and `T[]` start with a length word.
//!
//! ## Invariants
//! - **No partial output**: values are checked against their types before any byte is written.
//! - **Bounds**: every offset and length read during decoding is checked against the buffer
//!   and against `Limits`.

pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod limits;
pub mod types;
pub mod value;
pub mod word;

pub use cursor::Cursor;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;
pub use limits::Limits;
pub use types::Type;
pub use value::Value;
pub use word::Word;
pub use word::WORD_SIZE;

/// Encodes `values` as a sequence of `types` with default limits.
pub fn encode(types: &[Type], values: &[Value]) -> Result<Vec<u8>> {
    Encoder::new().encode(types, values)
}

/// Decodes a sequence of `types` from `data` with default limits.
pub fn decode(types: &[Type], data: &[u8]) -> Result<Vec<Value>> {
    Decoder::new(data).decode(types)
}
