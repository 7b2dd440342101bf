//! # Abirpc
//!
//! Contract interfaces on top of `abipack`: load a JSON schema document, then
//! encode calls and decode return data and logs by entry name.
//!
//! ## Overview
//! - **Registry**: [`Abi`] holds the constructor, functions and events of one
//!   document. Repeated names are disambiguated with numeric suffixes in document
//!   order; signatures keep the declared name.
//! - **Selectors and topics**: derived from canonical signatures with a caller
//!   supplied [`Hasher256`], [`Keccak256`] by default.
//! - **Errors**: one [`Error`] type, split by the operation that failed.
//!
//! ```rust,ignore
//! let abi = Abi::from_json(r#"[{"name":"send","inputs":[{"name":"amount","type":"uint256"}]}]"#)?;
//! let call = abi.pack("send", &[Value::uint(1)])?;
//! let (function, args) = abi.decode_call(&call)?;
//! ```

pub mod abi;
pub mod argument;
pub mod document;
pub mod error;
pub mod event;
pub mod function;
pub mod hash;
pub mod selector;

pub use abi::Abi;
pub use abi::AbiBuilder;
pub use argument::Argument;
pub use argument::Arguments;
pub use document::Entry;
pub use document::RawArgument;
pub use error::Error;
pub use error::NotFound;
pub use error::Result;
pub use event::Event;
pub use function::Function;
pub use hash::Hasher256;
pub use hash::Keccak256;

pub use abipack::Limits;
pub use abipack::Type;
pub use abipack::Value;
pub use abipack::Word;

#[cfg(test)]
mod tests;
