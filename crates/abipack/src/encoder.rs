//! # Encoder
//!
//! Turns typed values into head/tail encoded words.
//!
//! ## Algorithm
//! A sequence (top-level arguments, tuple members, array elements) is written into
//! two buffers. Static members go straight into the head. Each dynamic member gets
//! a placeholder word in the head and its payload appended to the tail; the
//! placeholder is recorded as an `OffsetPatch`. Once the head length is final every
//! patch is written as `head_len + tail_pos` and the tail is appended.
//!
//! ## Invariants
//! - **No partial output**: all values are checked against their types first.
//! - **Alignment**: output length is always a multiple of 32.

use crate::error::Error;
use crate::error::Result;
use crate::limits::Limits;
use crate::types::Type;
use crate::value::Value;
use crate::word::Word;
use crate::word::WORD_SIZE;

/// Encodes argument sequences under a set of `Limits`.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    limits: Limits,
}

/// A head slot waiting for the final head length.
struct OffsetPatch {
    head_pos: usize,
    tail_pos: usize,
}

impl Encoder {
    pub fn new() -> Self {
        Self { limits: Limits::new() }
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Encodes `values` as the sequence described by `types`.
    ///
    /// # Errors
    /// `ArgumentCount` if the lengths differ; any type/value mismatch found by the
    /// pre-pass. Nothing is written on failure.
    pub fn encode(&self, types: &[Type], values: &[Value]) -> Result<Vec<u8>> {
        if types.len() != values.len() {
            return Err(Error::ArgumentCount { expected: types.len(), found: values.len() });
        }
        for (ty, value) in types.iter().zip(values) {
            ty.check_bounded(value, 0, self.limits.max_depth)?;
        }
        encode_sequence(types.iter().zip(values))
    }

    /// Encodes one value on its own, as it would appear in a tail.
    ///
    /// For static types this is the in-place head encoding.
    pub fn encode_value(&self, ty: &Type, value: &Value) -> Result<Vec<u8>> {
        ty.check_bounded(value, 0, self.limits.max_depth)?;
        let mut out = Vec::new();
        encode_value(ty, value, &mut out)?;
        Ok(out)
    }
}

fn encode_sequence<'v>(items: impl Iterator<Item = (&'v Type, &'v Value)>) -> Result<Vec<u8>> {
    let mut head = Vec::new();
    let mut tail = Vec::new();
    let mut patches = Vec::new();

    for (ty, value) in items {
        if ty.is_dynamic() {
            patches.push(OffsetPatch { head_pos: head.len(), tail_pos: tail.len() });
            head.extend_from_slice(&[0u8; WORD_SIZE]);
            encode_value(ty, value, &mut tail)?;
        } else {
            encode_value(ty, value, &mut head)?;
        }
    }

    let head_len = head.len();
    for patch in patches {
        let offset = Word::from_usize(head_len + patch.tail_pos);
        head[patch.head_pos..patch.head_pos + WORD_SIZE].copy_from_slice(offset.as_bytes());
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

fn encode_value(ty: &Type, value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match (ty, value) {
        (Type::Uint(_) | Type::Int(_), Value::Uint(w) | Value::Int(w)) => {
            out.extend_from_slice(w.as_bytes());
        }
        (Type::Address, Value::Address(addr)) => {
            out.extend_from_slice(&[0u8; WORD_SIZE - 20]);
            out.extend_from_slice(addr);
        }
        (Type::Bool, Value::Bool(b)) => {
            out.extend_from_slice(Word::from_u128(*b as u128).as_bytes());
        }
        (Type::FixedBytes(_), Value::FixedBytes(bytes)) => {
            write_padded(out, bytes);
        }
        (Type::Bytes, Value::Bytes(bytes)) => {
            out.extend_from_slice(Word::from_usize(bytes.len()).as_bytes());
            write_padded(out, bytes);
        }
        (Type::String, Value::String(s)) => {
            out.extend_from_slice(Word::from_usize(s.len()).as_bytes());
            write_padded(out, s.as_bytes());
        }
        (Type::Tuple(components), Value::Tuple(items)) => {
            let body = encode_sequence(components.iter().map(|(_, ty)| ty).zip(items))?;
            out.extend_from_slice(&body);
        }
        (Type::FixedArray(elem, _), Value::Array(items)) => {
            let body = encode_sequence(std::iter::repeat(elem.as_ref()).zip(items))?;
            out.extend_from_slice(&body);
        }
        (Type::Array(elem), Value::Array(items)) => {
            out.extend_from_slice(Word::from_usize(items.len()).as_bytes());
            let body = encode_sequence(std::iter::repeat(elem.as_ref()).zip(items))?;
            out.extend_from_slice(&body);
        }
        _ => {
            return Err(Error::TypeMismatch { expected: ty.to_string(), found: value.kind() });
        }
    }
    Ok(())
}

/// Writes `bytes` followed by zeros up to the next word boundary.
fn write_padded(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes);
    let pad = padded_len(bytes.len()) - bytes.len();
    out.resize(out.len() + pad, 0);
}

pub(crate) fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}
