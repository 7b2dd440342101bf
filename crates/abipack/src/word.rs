//! # Words
//!
//! The 32-byte unit every encoded value is built from. Integers of any declared
//! width are carried as a full word: zero-extended when unsigned, sign-extended
//! (two's complement) when signed.

/// Size in bytes of one encoded slot.
pub const WORD_SIZE: usize = 32;

/// A 256-bit big-endian word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word(pub [u8; WORD_SIZE]);

impl Word {
    pub const ZERO: Word = Word([0; WORD_SIZE]);

    pub const fn from_bytes(bytes: [u8; WORD_SIZE]) -> Self {
        Word(bytes)
    }

    pub fn from_u128(v: u128) -> Self {
        let mut w = [0u8; WORD_SIZE];
        w[16..].copy_from_slice(&v.to_be_bytes());
        Word(w)
    }

    /// Sign-extends `v` to 256 bits.
    pub fn from_i128(v: i128) -> Self {
        let fill = if v < 0 { 0xff } else { 0x00 };
        let mut w = [fill; WORD_SIZE];
        w[16..].copy_from_slice(&v.to_be_bytes());
        Word(w)
    }

    pub fn from_usize(v: usize) -> Self {
        Self::from_u128(v as u128)
    }

    /// Zero-extends a big-endian slice of at most 32 bytes.
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > WORD_SIZE {
            return None;
        }
        let mut w = [0u8; WORD_SIZE];
        w[WORD_SIZE - bytes.len()..].copy_from_slice(bytes);
        Some(Word(w))
    }

    pub fn as_bytes(&self) -> &[u8; WORD_SIZE] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// True if the top bit is set, i.e. negative when read as a signed word.
    pub fn is_negative(&self) -> bool {
        self.0[0] & 0x80 != 0
    }

    /// True if the word read as unsigned fits in `bits` bits.
    pub fn fits_unsigned(&self, bits: usize) -> bool {
        let lead = WORD_SIZE.saturating_sub(bits / 8);
        self.0[..lead].iter().all(|b| *b == 0)
    }

    /// True if the word read as two's complement fits in `bits` bits.
    pub fn fits_signed(&self, bits: usize) -> bool {
        let lead = WORD_SIZE.saturating_sub(bits / 8);
        if lead == 0 {
            return true;
        }
        let fill = if self.is_negative() { 0xff } else { 0x00 };
        self.0[..lead].iter().all(|b| *b == fill) && (self.0[lead] & 0x80 != 0) == (fill == 0xff)
    }

    pub fn to_u128(&self) -> Option<u128> {
        if !self.fits_unsigned(128) {
            return None;
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&self.0[16..]);
        Some(u128::from_be_bytes(low))
    }

    pub fn to_i128(&self) -> Option<i128> {
        if !self.fits_signed(128) {
            return None;
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&self.0[16..]);
        Some(i128::from_be_bytes(low))
    }

    pub fn to_usize(&self) -> Option<usize> {
        self.to_u128().and_then(|v| usize::try_from(v).ok())
    }

    /// Two's complement negation, wrapping at 256 bits.
    pub fn negate(&self) -> Word {
        let mut out = [0u8; WORD_SIZE];
        let mut carry = 1u16;
        for i in (0..WORD_SIZE).rev() {
            let v = (!self.0[i]) as u16 + carry;
            out[i] = v as u8;
            carry = v >> 8;
        }
        Word(out)
    }

    /// Decimal rendering of the word read as signed.
    pub fn to_signed_string(&self) -> String {
        if self.is_negative() {
            format!("-{}", self.negate())
        } else {
            self.to_string()
        }
    }
}

impl From<[u8; WORD_SIZE]> for Word {
    fn from(bytes: [u8; WORD_SIZE]) -> Self {
        Word(bytes)
    }
}

impl std::fmt::Display for Word {
    /// Unsigned decimal.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut n = self.0;
        let mut digits = Vec::with_capacity(78);
        while n.iter().any(|b| *b != 0) {
            let mut rem = 0u32;
            for b in n.iter_mut() {
                let cur = (rem << 8) | *b as u32;
                *b = (cur / 10) as u8;
                rem = cur % 10;
            }
            digits.push((b'0' + rem as u8) as char);
        }
        let s: String = digits.iter().rev().collect();
        f.write_str(&s)
    }
}

impl std::fmt::Debug for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Word(0x")?;
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}
