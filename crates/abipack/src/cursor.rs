use crate::error::Error;
use crate::error::Result;
use crate::limits::Limits;
use crate::word::Word;
use crate::word::WORD_SIZE;

/// A bounds-checked read position within an encoded buffer.
///
/// Cursors are cheap copies. `at` derives a cursor for an offset relative to the
/// current position, which is how head offsets are followed into the tail.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// A cursor `offset` bytes past the current position.
    pub fn at(&self, offset: usize) -> Result<Cursor<'a>> {
        let pos = self.pos.checked_add(offset).ok_or(Error::LengthOverflow)?;
        if pos > self.buf.len() {
            return Err(Error::OutOfBounds { offset: pos, len: self.buf.len() });
        }
        Ok(Cursor { buf: self.buf, pos })
    }

    #[inline]
    fn need(&self, n: usize) -> Result<usize> {
        let end = self.pos.checked_add(n).ok_or(Error::LengthOverflow)?;
        if end > self.buf.len() {
            return Err(Error::OutOfBounds { offset: end, len: self.buf.len() });
        }
        Ok(end)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.need(n)?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn read_word(&mut self) -> Result<Word> {
        let bytes = self.read_bytes(WORD_SIZE)?;
        let mut w = [0u8; WORD_SIZE];
        w.copy_from_slice(bytes);
        Ok(Word(w))
    }

    /// Reads a length or offset word, bounded by `limits.max_length`.
    pub fn read_len(&mut self, limits: &Limits) -> Result<usize> {
        let word = self.read_word()?;
        match word.to_usize() {
            Some(n) if n <= limits.max_length => Ok(n),
            _ => Err(Error::LengthOverflow),
        }
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.pos = self.need(n)?;
        Ok(())
    }

    pub fn as_slice(&self) -> &'a [u8] {
        &self.buf[self.pos.min(self.buf.len())..]
    }
}
