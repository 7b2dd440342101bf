//! # Type Descriptors
//!
//! Every encodable type and its canonical textual form.
//!
//! ## Invariants
//! - **Canonical form**: each `Type` renders to exactly one string (`uint` parses to
//!   `uint256`), and two types are equal iff their canonical strings match. Tuple
//!   component names do not take part in equality.
//! - **Array suffixes** apply left to right onto the base: `T[5][]` is a dynamic array
//!   whose element is `T[5]`.

use crate::error::Error;
use crate::error::Result;
use crate::value::Value;
use crate::word::WORD_SIZE;

/// A closed description of an encodable type.
#[derive(Debug, Clone)]
pub enum Type {
    /// `uintN`, N in 8..=256, multiple of 8.
    Uint(usize),
    /// `intN`, N in 8..=256, multiple of 8.
    Int(usize),
    Address,
    Bool,
    /// `bytesN`, N in 1..=32.
    FixedBytes(usize),
    Bytes,
    String,
    /// Named components, in declaration order.
    Tuple(Vec<(String, Type)>),
    FixedArray(Box<Type>, usize),
    Array(Box<Type>),
}

impl Type {
    /// Parses a type string that does not involve `tuple`.
    pub fn parse(s: &str) -> Result<Type> {
        Self::parse_with(s, None)
    }

    /// Parses a type string. `components` describes the tuple at the base of the type
    /// (for `tuple`, `tuple[]`, `tuple[2][]`, ...) and is ignored otherwise.
    pub fn parse_with(s: &str, components: Option<Vec<(String, Type)>>) -> Result<Type> {
        Self::parse_nested(s, components, crate::Limits::DEFAULT_MAX_DEPTH)
    }

    /// Like [`Type::parse_with`], allowing at most `max_depth` array suffixes.
    pub fn parse_nested(s: &str, components: Option<Vec<(String, Type)>>, max_depth: usize) -> Result<Type> {
        let s = s.trim();
        let (base, suffix) = match s.find('[') {
            Some(idx) => (&s[..idx], &s[idx..]),
            None => (s, ""),
        };
        if base.contains(']') {
            return Err(Error::MalformedArray(s.to_string()));
        }
        if suffix.matches('[').count() > max_depth {
            return Err(Error::RecursionLimitExceeded);
        }

        let mut ty = parse_base(base, components, s)?;

        let mut rest = suffix;
        while !rest.is_empty() {
            if !rest.starts_with('[') {
                return Err(Error::MalformedArray(s.to_string()));
            }
            let close = rest.find(']').ok_or_else(|| Error::MalformedArray(s.to_string()))?;
            let inner = &rest[1..close];
            ty = if inner.is_empty() {
                Type::Array(Box::new(ty))
            } else {
                if !inner.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::MalformedArray(s.to_string()));
                }
                let len = inner.parse::<usize>().map_err(|_| Error::MalformedArray(s.to_string()))?;
                Type::FixedArray(Box::new(ty), len)
            };
            rest = &rest[close + 1..];
        }

        Ok(ty)
    }

    /// The canonical string, e.g. `(uint256,uint256)[5][]`.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// True for `bytes`, `string`, `T[]`, and tuples or fixed arrays holding any of them.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Type::Bytes | Type::String | Type::Array(_) => true,
            Type::FixedArray(elem, _) => elem.is_dynamic(),
            Type::Tuple(components) => components.iter().any(|(_, ty)| ty.is_dynamic()),
            _ => false,
        }
    }

    /// Bytes this type occupies in the head of its enclosing sequence.
    ///
    /// One word for scalars and for anything dynamic (its offset); the sum of the
    /// members for static tuples and fixed arrays.
    ///
    /// # Errors
    /// `LengthOverflow` if a fixed array is too large to address.
    pub fn head_size(&self) -> Result<usize> {
        if self.is_dynamic() {
            return Ok(WORD_SIZE);
        }
        match self {
            Type::FixedArray(elem, len) => elem.head_size()?.checked_mul(*len).ok_or(Error::LengthOverflow),
            Type::Tuple(components) => components.iter().try_fold(0usize, |sum, (_, ty)| {
                sum.checked_add(ty.head_size()?).ok_or(Error::LengthOverflow)
            }),
            _ => Ok(WORD_SIZE),
        }
    }

    /// Rejects integer widths and fixed byte sizes that no type string can produce.
    pub(crate) fn check_width(&self) -> Result<()> {
        match self {
            Type::Uint(bits) | Type::Int(bits) if *bits == 0 || *bits > 256 || bits % 8 != 0 => {
                Err(Error::InvalidBitSize(self.to_string()))
            }
            Type::FixedBytes(n) if *n == 0 || *n > WORD_SIZE => Err(Error::InvalidByteSize(self.to_string())),
            _ => Ok(()),
        }
    }

    /// Checks that `value` can be encoded as this type, with default limits.
    pub fn check(&self, value: &Value) -> Result<()> {
        self.check_bounded(value, 0, crate::Limits::DEFAULT_MAX_DEPTH)
    }

    pub(crate) fn check_bounded(&self, value: &Value, depth: usize, max_depth: usize) -> Result<()> {
        if depth > max_depth {
            return Err(Error::RecursionLimitExceeded);
        }
        self.check_width()?;

        match (self, value) {
            (Type::Uint(bits), Value::Uint(w)) => {
                if !w.fits_unsigned(*bits) {
                    return Err(Error::IntegerOverflow(self.to_string()));
                }
            }
            (Type::Uint(bits), Value::Int(w)) => {
                if w.is_negative() || !w.fits_unsigned(*bits) {
                    return Err(Error::IntegerOverflow(self.to_string()));
                }
            }
            (Type::Int(bits), Value::Int(w)) => {
                if !w.fits_signed(*bits) {
                    return Err(Error::IntegerOverflow(self.to_string()));
                }
            }
            (Type::Int(bits), Value::Uint(w)) => {
                if w.is_negative() || !w.fits_signed(*bits) {
                    return Err(Error::IntegerOverflow(self.to_string()));
                }
            }
            (Type::Address, Value::Address(_)) => {}
            (Type::Bool, Value::Bool(_)) => {}
            (Type::FixedBytes(n), Value::FixedBytes(b)) => {
                if b.len() != *n {
                    return Err(Error::FixedBytesLength { expected: *n, found: b.len() });
                }
            }
            (Type::Bytes, Value::Bytes(_)) => {}
            (Type::String, Value::String(_)) => {}
            (Type::Tuple(components), Value::Tuple(items)) => {
                if components.len() != items.len() {
                    return Err(Error::ArrayLength { expected: components.len(), found: items.len() });
                }
                for ((_, ty), item) in components.iter().zip(items) {
                    ty.check_bounded(item, depth + 1, max_depth)?;
                }
            }
            (Type::FixedArray(elem, len), Value::Array(items)) => {
                if *len != items.len() {
                    return Err(Error::ArrayLength { expected: *len, found: items.len() });
                }
                for item in items {
                    elem.check_bounded(item, depth + 1, max_depth)?;
                }
            }
            (Type::Array(elem), Value::Array(items)) => {
                // elements without width would not survive decoding
                if !items.is_empty() && elem.head_size()? == 0 {
                    return Err(Error::ArrayLength { expected: 0, found: items.len() });
                }
                for item in items {
                    elem.check_bounded(item, depth + 1, max_depth)?;
                }
            }
            _ => {
                return Err(Error::TypeMismatch { expected: self.to_string(), found: value.kind() });
            }
        }
        Ok(())
    }
}

fn parse_base(base: &str, components: Option<Vec<(String, Type)>>, full: &str) -> Result<Type> {
    let ty = match base {
        "address" => Type::Address,
        "bool" => Type::Bool,
        "string" => Type::String,
        "bytes" => Type::Bytes,
        "uint" => Type::Uint(256),
        "int" => Type::Int(256),
        "tuple" => {
            let components = components.ok_or_else(|| Error::MissingComponents(full.to_string()))?;
            Type::Tuple(components)
        }
        _ => {
            if let Some(bits) = base.strip_prefix("uint") {
                Type::Uint(parse_bits(bits, full)?)
            } else if let Some(bits) = base.strip_prefix("int") {
                Type::Int(parse_bits(bits, full)?)
            } else if let Some(size) = base.strip_prefix("bytes") {
                Type::FixedBytes(parse_size(size, full)?)
            } else {
                return Err(Error::UnknownType(full.to_string()));
            }
        }
    };
    Ok(ty)
}

fn parse_number(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn parse_bits(digits: &str, full: &str) -> Result<usize> {
    match parse_number(digits) {
        Some(bits) if bits > 0 && bits <= 256 && bits % 8 == 0 => Ok(bits),
        _ => Err(Error::InvalidBitSize(full.to_string())),
    }
}

fn parse_size(digits: &str, full: &str) -> Result<usize> {
    match parse_number(digits) {
        Some(size) if size > 0 && size <= 32 => Ok(size),
        _ => Err(Error::InvalidByteSize(full.to_string())),
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Uint(a), Type::Uint(b)) => a == b,
            (Type::Int(a), Type::Int(b)) => a == b,
            (Type::Address, Type::Address) => true,
            (Type::Bool, Type::Bool) => true,
            (Type::FixedBytes(a), Type::FixedBytes(b)) => a == b,
            (Type::Bytes, Type::Bytes) => true,
            (Type::String, Type::String) => true,
            (Type::Tuple(a), Type::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|((_, x), (_, y))| x == y)
            }
            (Type::FixedArray(a, n), Type::FixedArray(b, m)) => n == m && a == b,
            (Type::Array(a), Type::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Type {}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Uint(bits) => write!(f, "uint{}", bits),
            Type::Int(bits) => write!(f, "int{}", bits),
            Type::Address => f.write_str("address"),
            Type::Bool => f.write_str("bool"),
            Type::FixedBytes(n) => write!(f, "bytes{}", n),
            Type::Bytes => f.write_str("bytes"),
            Type::String => f.write_str("string"),
            Type::Tuple(components) => {
                f.write_str("(")?;
                for (i, (_, ty)) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", ty)?;
                }
                f.write_str(")")
            }
            Type::FixedArray(elem, len) => write!(f, "{}[{}]", elem, len),
            Type::Array(elem) => write!(f, "{}[]", elem),
        }
    }
}

impl std::str::FromStr for Type {
    type Err = Error;

    fn from_str(s: &str) -> Result<Type> {
        Type::parse(s)
    }
}
