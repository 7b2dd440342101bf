//! # Events
//!
//! A log carries an event in two parts. The topics hold the event's topic hash
//! (unless the event is anonymous) followed by one word per indexed field. The
//! data holds the ABI encoding of the remaining fields.
//!
//! Indexed fields of word-sized types travel as their encoded word. Any other
//! indexed field travels as a hash and cannot be recovered from the log:
//! `bytes` and `string` hash their raw contents, arrays and tuples hash their
//! ABI encoding.

use abipack::Decoder;
use abipack::Encoder;
use abipack::Error as CodecError;
use abipack::Limits;
use abipack::Type;
use abipack::Value;

use crate::argument::Arguments;
use crate::error::Error;
use crate::error::Result;
use crate::hash::Hasher256;
use crate::selector;

/// An event entry of a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    /// Registry key, possibly disambiguated.
    pub name: String,
    /// The name as declared; topics hash this, never the disambiguated key.
    pub raw_name: String,
    pub inputs: Arguments,
    /// Anonymous events do not emit their topic hash.
    pub anonymous: bool,
}

impl Event {
    pub fn new(name: impl Into<String>, inputs: Arguments, anonymous: bool) -> Self {
        let name = name.into();
        Self { raw_name: name.clone(), name, inputs, anonymous }
    }

    /// e.g. `Transfer(address,address,uint256)`.
    pub fn signature(&self) -> String {
        selector::signature(&self.raw_name, &self.inputs)
    }

    pub fn topic<H: Hasher256 + ?Sized>(&self, hasher: &H) -> [u8; 32] {
        selector::topic(hasher, &self.signature())
    }

    /// Number of topics a log of this event carries.
    pub fn topic_count(&self) -> usize {
        let indexed = self.inputs.iter().filter(|a| a.indexed).count();
        if self.anonymous { indexed } else { indexed + 1 }
    }

    /// Builds the topic list for one value per indexed field.
    pub fn encode_topics<H: Hasher256 + ?Sized>(&self, hasher: &H, values: &[Value]) -> Result<Vec<[u8; 32]>> {
        self.encode_topics_with(hasher, values, &Limits::default())
    }

    pub fn encode_topics_with<H: Hasher256 + ?Sized>(
        &self,
        hasher: &H,
        values: &[Value],
        limits: &Limits,
    ) -> Result<Vec<[u8; 32]>> {
        let indexed = self.inputs.indexed();
        if indexed.len() != values.len() {
            return Err(Error::Encoding(CodecError::ArgumentCount {
                expected: indexed.len(),
                found: values.len(),
            }));
        }

        let encoder = Encoder::with_limits(*limits);
        let mut topics = Vec::with_capacity(self.topic_count());
        if !self.anonymous {
            topics.push(self.topic(hasher));
        }
        for (arg, value) in indexed.iter().zip(values) {
            let encoded = encoder.encode_value(&arg.ty, value).map_err(Error::Encoding)?;
            let topic = match &arg.ty {
                ty if is_word(ty) => {
                    let mut word = [0u8; 32];
                    word.copy_from_slice(&encoded);
                    word
                }
                // type-checked above, so exactly one of these is present
                Type::Bytes | Type::String => {
                    let raw = value.as_str().map(str::as_bytes).or_else(|| value.as_bytes());
                    hasher.hash256(raw.unwrap_or_default())
                }
                _ => hasher.hash256(&encoded),
            };
            topics.push(topic);
        }
        Ok(topics)
    }

    /// Recovers the indexed fields from a log's topics, in declaration order.
    ///
    /// Hashed fields come back as 32-byte `FixedBytes`. The caller resolves the
    /// event first, so the leading topic hash is not checked here.
    pub fn decode_topics(&self, topics: &[[u8; 32]]) -> Result<Vec<Value>> {
        let expected = self.topic_count();
        if topics.len() != expected {
            return Err(Error::TopicCount { expected, found: topics.len() });
        }
        let skip = if self.anonymous { 0 } else { 1 };

        let mut values = Vec::with_capacity(expected - skip);
        for (arg, topic) in self.inputs.indexed().iter().zip(&topics[skip..]) {
            if is_word(&arg.ty) {
                let mut decoded = Decoder::new(topic)
                    .decode(std::slice::from_ref(&arg.ty))
                    .map_err(Error::Decoding)?;
                values.extend(decoded.pop());
            } else {
                values.push(Value::FixedBytes(topic.to_vec()));
            }
        }
        Ok(values)
    }
}

/// Types whose topic is their encoded word.
fn is_word(ty: &Type) -> bool {
    matches!(ty, Type::Uint(_) | Type::Int(_) | Type::Address | Type::Bool | Type::FixedBytes(_))
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inputs: Vec<String> = self
            .inputs
            .iter()
            .map(|a| {
                let indexed = if a.indexed { "indexed " } else { "" };
                format!("{} {}{}", a.ty, indexed, a.name)
            })
            .collect();
        write!(f, "event {}({})", self.raw_name, inputs.join(", "))
    }
}
