//! Concrete values fed to the encoder and produced by the decoder.

use crate::word::Word;

/// A value of some `Type`.
///
/// Fixed and dynamic arrays share `Array`; the declared type decides the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Uint(Word),
    /// Two's complement, sign-extended to 256 bits.
    Int(Word),
    Address([u8; 20]),
    Bool(bool),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Tuple(Vec<Value>),
    Array(Vec<Value>),
}

impl Value {
    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Uint(_) => "uint",
            Value::Int(_) => "int",
            Value::Address(_) => "address",
            Value::Bool(_) => "bool",
            Value::FixedBytes(_) => "fixed bytes",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::Tuple(_) => "tuple",
            Value::Array(_) => "array",
        }
    }

    pub fn uint(v: u128) -> Self {
        Value::Uint(Word::from_u128(v))
    }

    pub fn int(v: i128) -> Self {
        Value::Int(Word::from_i128(v))
    }

    pub fn as_word(&self) -> Option<&Word> {
        match self {
            Value::Uint(w) | Value::Int(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_u128(&self) -> Option<u128> {
        match self {
            Value::Uint(w) => w.to_u128(),
            Value::Int(w) if !w.is_negative() => w.to_u128(),
            _ => None,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int(w) => w.to_i128(),
            Value::Uint(w) => w.to_u128().and_then(|v| i128::try_from(v).ok()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&[u8; 20]> {
        match self {
            Value::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Payload of `FixedBytes` or `Bytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::FixedBytes(b) | Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Members of a `Tuple` or elements of an `Array`.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(v) | Value::Array(v) => Some(v),
            _ => None,
        }
    }
}

fn write_hex(f: &mut std::fmt::Formatter<'_>, bytes: &[u8]) -> std::fmt::Result {
    f.write_str("0x")?;
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

fn write_list(f: &mut std::fmt::Formatter<'_>, items: &[Value]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Uint(w) => write!(f, "{}", w),
            Value::Int(w) => f.write_str(&w.to_signed_string()),
            Value::Address(a) => write_hex(f, a),
            Value::Bool(b) => write!(f, "{}", b),
            Value::FixedBytes(b) | Value::Bytes(b) => write_hex(f, b),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_list(f, items)?;
                f.write_str(")")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self { Value::Uint(Word::from_u128(v as u128)) }
        })*
    };
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self { Value::Int(Word::from_i128(v as i128)) }
        })*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128);

impl From<Word> for Value {
    fn from(w: Word) -> Self { Value::Uint(w) }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self { Value::Bool(v) }
}

impl From<[u8; 20]> for Value {
    fn from(v: [u8; 20]) -> Self { Value::Address(v) }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self { Value::Bytes(v) }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self { Value::Bytes(v.to_vec()) }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self { Value::String(v.to_string()) }
}

impl From<String> for Value {
    fn from(v: String) -> Self { Value::String(v) }
}
