//! # Argument Schemas
//!
//! Ordered, named, typed parameter lists: a function's inputs or outputs, or an
//! event's fields. Order is the wire order.

use abipack::Decoder;
use abipack::Encoder;
use abipack::Limits;
use abipack::Type;
use abipack::Value;
use indexmap::IndexMap;

use crate::error::Error;
use crate::error::Result;

/// One named parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub ty: Type,
    /// Only meaningful for event fields.
    pub indexed: bool,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self { name: name.into(), ty, indexed: false }
    }

    pub fn indexed(name: impl Into<String>, ty: Type) -> Self {
        Self { name: name.into(), ty, indexed: true }
    }
}

/// An ordered argument schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments(Vec<Argument>);

impl Arguments {
    pub fn new(args: Vec<Argument>) -> Self {
        Self(args)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Argument] {
        &self.0
    }

    pub fn types(&self) -> Vec<Type> {
        self.0.iter().map(|a| a.ty.clone()).collect()
    }

    /// The arguments that travel in log data rather than in topics.
    pub fn non_indexed(&self) -> Arguments {
        self.0.iter().filter(|a| !a.indexed).cloned().collect()
    }

    /// The arguments that travel in topics.
    pub fn indexed(&self) -> Arguments {
        self.0.iter().filter(|a| a.indexed).cloned().collect()
    }

    /// Encodes one value per argument, positionally.
    pub fn pack(&self, values: &[Value]) -> Result<Vec<u8>> {
        self.pack_with(values, &Limits::default())
    }

    pub fn pack_with(&self, values: &[Value], limits: &Limits) -> Result<Vec<u8>> {
        Encoder::with_limits(*limits)
            .encode(&self.types(), values)
            .map_err(Error::Encoding)
    }

    /// Decodes `data` into one value per argument, positionally.
    pub fn unpack(&self, data: &[u8]) -> Result<Vec<Value>> {
        self.unpack_with(data, &Limits::default())
    }

    pub fn unpack_with(&self, data: &[u8], limits: &Limits) -> Result<Vec<Value>> {
        Decoder::with_limits(data, *limits)
            .decode(&self.types())
            .map_err(Error::Decoding)
    }

    /// Decodes `data` keyed by argument name. Arguments without a name are decoded
    /// (they still occupy their slot) but left out of the map.
    pub fn unpack_into_map(&self, data: &[u8]) -> Result<IndexMap<String, Value>> {
        self.unpack_into_map_with(data, &Limits::default())
    }

    pub fn unpack_into_map_with(&self, data: &[u8], limits: &Limits) -> Result<IndexMap<String, Value>> {
        let values = self.unpack_with(data, limits)?;
        Ok(self.name_values(values))
    }

    pub(crate) fn name_values(&self, values: Vec<Value>) -> IndexMap<String, Value> {
        self.0
            .iter()
            .zip(values)
            .filter(|(arg, _)| !arg.name.is_empty())
            .map(|(arg, value)| (arg.name.clone(), value))
            .collect()
    }
}

impl FromIterator<Argument> for Arguments {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
