//! # Decoder
//!
//! Reads typed values back out of head/tail encoded words.
//!
//! ## Invariants
//! - **Read-only**: the input is borrowed and never modified.
//! - **Bounds**: offsets and lengths are validated before use; a length word may not
//!   promise more elements than the remaining bytes could hold.
//! - **Strict words**: bools must be 0 or 1, and integer, address and byte padding
//!   must be clean. No best-effort value is returned on failure.

use crate::cursor::Cursor;
use crate::encoder::padded_len;
use crate::error::Error;
use crate::error::Result;
use crate::limits::Limits;
use crate::types::Type;
use crate::value::Value;
use crate::word::WORD_SIZE;

/// A decoder over one encoded argument sequence.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    limits: Limits,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: Limits::new() }
    }

    pub fn with_limits(data: &'a [u8], limits: Limits) -> Self {
        Self { data, limits }
    }

    /// Decodes the sequence described by `types`.
    ///
    /// # Errors
    /// `EmptyInput` or `UnalignedInput` before any structural decoding; afterwards
    /// any bounds, length or padding violation.
    pub fn decode(&self, types: &[Type]) -> Result<Vec<Value>> {
        if self.data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.data.len() % WORD_SIZE != 0 {
            return Err(Error::UnalignedInput(self.data.len()));
        }
        self.decode_sequence(Cursor::new(self.data), types.iter(), 0)
    }

    fn decode_sequence<'t>(
        &self,
        base: Cursor<'a>,
        types: impl Iterator<Item = &'t Type>,
        depth: usize,
    ) -> Result<Vec<Value>> {
        let mut head = base;
        let mut values = Vec::new();

        for ty in types {
            if ty.is_dynamic() {
                let offset = head.read_len(&self.limits)?;
                let tail = base.at(offset)?;
                values.push(self.decode_value(tail, ty, depth + 1)?);
            } else {
                values.push(self.decode_value(head, ty, depth + 1)?);
                head.skip(ty.head_size()?)?;
            }
        }

        Ok(values)
    }

    fn decode_value(&self, mut cur: Cursor<'a>, ty: &Type, depth: usize) -> Result<Value> {
        if depth > self.limits.max_depth {
            return Err(Error::RecursionLimitExceeded);
        }
        ty.check_width()?;

        match ty {
            Type::Uint(bits) => {
                let w = cur.read_word()?;
                if !w.fits_unsigned(*bits) {
                    return Err(Error::InvalidPadding(ty.to_string()));
                }
                Ok(Value::Uint(w))
            }
            Type::Int(bits) => {
                let w = cur.read_word()?;
                if !w.fits_signed(*bits) {
                    return Err(Error::InvalidPadding(ty.to_string()));
                }
                Ok(Value::Int(w))
            }
            Type::Address => {
                let w = cur.read_word()?;
                if !w.fits_unsigned(160) {
                    return Err(Error::InvalidPadding(ty.to_string()));
                }
                let mut addr = [0u8; 20];
                addr.copy_from_slice(&w.as_bytes()[WORD_SIZE - 20..]);
                Ok(Value::Address(addr))
            }
            Type::Bool => {
                let w = cur.read_word()?;
                match w.to_u128() {
                    Some(0) => Ok(Value::Bool(false)),
                    Some(1) => Ok(Value::Bool(true)),
                    _ => Err(Error::InvalidBool),
                }
            }
            Type::FixedBytes(n) => {
                let w = cur.read_word()?;
                let (bytes, pad) = w.as_bytes().split_at(*n);
                if pad.iter().any(|b| *b != 0) {
                    return Err(Error::InvalidPadding(ty.to_string()));
                }
                Ok(Value::FixedBytes(bytes.to_vec()))
            }
            Type::Bytes => Ok(Value::Bytes(self.read_blob(&mut cur, ty)?.to_vec())),
            Type::String => {
                let bytes = self.read_blob(&mut cur, ty)?;
                let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
                Ok(Value::String(s.to_string()))
            }
            Type::Tuple(components) => {
                let items = self.decode_sequence(cur, components.iter().map(|(_, ty)| ty), depth)?;
                Ok(Value::Tuple(items))
            }
            Type::FixedArray(elem, len) => {
                if *len > self.limits.max_length {
                    return Err(Error::LengthOverflow);
                }
                let items = self.decode_sequence(cur, std::iter::repeat(elem.as_ref()).take(*len), depth)?;
                Ok(Value::Array(items))
            }
            Type::Array(elem) => {
                let len = cur.read_len(&self.limits)?;
                // zero-width elements count as one word against the remaining input
                let width = elem.head_size()?.max(WORD_SIZE);
                let min = len.checked_mul(width).ok_or(Error::LengthOverflow)?;
                if min > cur.remaining() {
                    return Err(Error::OutOfBounds { offset: cur.pos() + min, len: cur.len() });
                }
                let items = self.decode_sequence(cur, std::iter::repeat(elem.as_ref()).take(len), depth)?;
                Ok(Value::Array(items))
            }
        }
    }

    /// Reads a length-prefixed, zero-padded byte payload.
    fn read_blob(&self, cur: &mut Cursor<'a>, ty: &Type) -> Result<&'a [u8]> {
        let len = cur.read_len(&self.limits)?;
        let bytes = cur.read_bytes(len)?;
        let pad = cur.read_bytes(padded_len(len) - len)?;
        if pad.iter().any(|b| *b != 0) {
            return Err(Error::InvalidPadding(ty.to_string()));
        }
        Ok(bytes)
    }
}
