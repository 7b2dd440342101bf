//! Bounds applied while walking types, values and input buffers.

/// Codec limits.
///
/// `max_depth` caps how deeply tuples and arrays may nest. `max_length` caps any
/// length or offset word read from the wire, so a hostile length cannot make the
/// decoder allocate more than the input could possibly describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_depth: usize,
    pub max_length: usize,
}

impl Limits {
    pub const DEFAULT_MAX_DEPTH: usize = 64;
    pub const DEFAULT_MAX_LENGTH: usize = 1 << 24;

    pub fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_length: Self::DEFAULT_MAX_LENGTH,
        }
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = len;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}
