//! # Schema Registry
//!
//! An [`Abi`] is built once from a schema document and is read-only afterwards.
//! Functions and events are keyed by name in document order. When a name repeats,
//! later declarations are keyed `name0`, `name1`, ... (the first free suffix),
//! while their signatures keep the declared name.

use std::io::Read;
use std::sync::Arc;

use abipack::Limits;
use abipack::Value;
use indexmap::IndexMap;
use tracing::debug;
use tracing::trace;

use crate::document::resolve_all;
use crate::document::Entry;
use crate::error::Error;
use crate::error::NotFound;
use crate::error::Result;
use crate::event::Event;
use crate::function::Function;
use crate::hash::Hasher256;
use crate::hash::Keccak256;

/// Builds an [`Abi`] with a chosen hash function and decoding limits.
///
/// ```rust,ignore
/// let abi = AbiBuilder::new()
///     .limits(Limits::new().max_length(1 << 16))
///     .parse_json(document)?;
/// ```
pub struct AbiBuilder {
    hasher: Arc<dyn Hasher256>,
    limits: Limits,
}

impl AbiBuilder {
    pub fn new() -> Self {
        Self { hasher: Arc::new(Keccak256), limits: Limits::default() }
    }

    /// Replaces the hash used for selectors and topics.
    pub fn hasher(mut self, hasher: impl Hasher256 + 'static) -> Self {
        self.hasher = Arc::new(hasher);
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn parse_json(self, json: &str) -> Result<Abi> {
        let entries: Vec<Entry> = serde_json::from_str(json)?;
        self.build(entries)
    }

    pub fn parse_slice(self, json: &[u8]) -> Result<Abi> {
        let entries: Vec<Entry> = serde_json::from_slice(json)?;
        self.build(entries)
    }

    pub fn read_json<R: Read>(self, reader: R) -> Result<Abi> {
        let entries: Vec<Entry> = serde_json::from_reader(reader)?;
        self.build(entries)
    }

    /// Builds the registry from already-parsed entries.
    ///
    /// # Errors
    /// `Schema` if any type string or component list is invalid. Entries of an
    /// unknown kind are skipped.
    pub fn build(self, entries: Vec<Entry>) -> Result<Abi> {
        let limits = self.limits;
        let mut constructor = Function::default();
        let mut functions: IndexMap<String, Function> = IndexMap::new();
        let mut events: IndexMap<String, Event> = IndexMap::new();

        for entry in entries {
            match entry.kind.as_deref() {
                Some("constructor") => {
                    let inputs = resolve_all(entry.inputs.as_deref(), &limits).map_err(Error::Schema)?;
                    constructor = Function::constructor(inputs);
                }
                None | Some("function") => {
                    let inputs = resolve_all(entry.inputs.as_deref(), &limits).map_err(Error::Schema)?;
                    let outputs = resolve_all(entry.outputs.as_deref(), &limits).map_err(Error::Schema)?;
                    let name = free_name(&functions, &entry.name);
                    if name != entry.name {
                        debug!(declared = %entry.name, key = %name, "disambiguated overloaded function");
                    }
                    let function = Function {
                        name: name.clone(),
                        raw_name: entry.name.clone(),
                        inputs,
                        outputs,
                        constant: entry.is_constant(),
                    };
                    functions.insert(name, function);
                }
                Some("event") => {
                    let inputs = resolve_all(entry.inputs.as_deref(), &limits).map_err(Error::Schema)?;
                    let name = free_name(&events, &entry.name);
                    if name != entry.name {
                        debug!(declared = %entry.name, key = %name, "disambiguated overloaded event");
                    }
                    let event = Event {
                        name: name.clone(),
                        raw_name: entry.name.clone(),
                        inputs,
                        anonymous: entry.anonymous,
                    };
                    events.insert(name, event);
                }
                Some(other) => {
                    debug!(kind = other, name = %entry.name, "skipping unsupported schema entry");
                }
            }
        }

        let selectors = functions.values().map(|f| f.selector(&*self.hasher)).collect();
        let topics = events.values().map(|e| e.topic(&*self.hasher)).collect();
        debug!(functions = functions.len(), events = events.len(), "built abi registry");

        Ok(Abi { constructor, functions, events, selectors, topics, hasher: self.hasher, limits })
    }
}

impl Default for AbiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `declared` if unused, otherwise `declared` followed by the first free index.
fn free_name<V>(taken: &IndexMap<String, V>, declared: &str) -> String {
    if !taken.contains_key(declared) {
        return declared.to_string();
    }
    let mut index = 0usize;
    loop {
        let candidate = format!("{}{}", declared, index);
        if !taken.contains_key(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// A contract interface: its constructor, functions and events.
#[derive(Clone)]
pub struct Abi {
    constructor: Function,
    functions: IndexMap<String, Function>,
    events: IndexMap<String, Event>,
    /// Parallel to `functions`.
    selectors: Vec<[u8; 4]>,
    /// Parallel to `events`.
    topics: Vec<[u8; 32]>,
    hasher: Arc<dyn Hasher256>,
    limits: Limits,
}

impl Abi {
    /// Builds a registry with Keccak-256 and default limits.
    pub fn from_json(json: &str) -> Result<Abi> {
        AbiBuilder::new().parse_json(json)
    }

    pub fn from_slice(json: &[u8]) -> Result<Abi> {
        AbiBuilder::new().parse_slice(json)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Abi> {
        AbiBuilder::new().read_json(reader)
    }

    pub fn builder() -> AbiBuilder {
        AbiBuilder::new()
    }

    /// The constructor; nameless with no inputs when the document declares none.
    pub fn constructor(&self) -> &Function {
        &self.constructor
    }

    pub fn functions(&self) -> &IndexMap<String, Function> {
        &self.functions
    }

    pub fn events(&self) -> &IndexMap<String, Event> {
        &self.events
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn function(&self, name: &str) -> Result<&Function> {
        self.functions.get(name).ok_or_else(|| NotFound::Function(name.to_string()).into())
    }

    pub fn event(&self, name: &str) -> Result<&Event> {
        self.events.get(name).ok_or_else(|| NotFound::Event(name.to_string()).into())
    }

    /// Selector of the function keyed `name`.
    pub fn selector(&self, name: &str) -> Result<[u8; 4]> {
        let index = self.functions.get_index_of(name).ok_or_else(|| NotFound::Function(name.to_string()))?;
        Ok(self.selectors[index])
    }

    /// Topic hash of the event keyed `name`.
    pub fn topic(&self, name: &str) -> Result<[u8; 32]> {
        let index = self.events.get_index_of(name).ok_or_else(|| NotFound::Event(name.to_string()))?;
        Ok(self.topics[index])
    }

    /// Resolves the function addressed by the first 4 bytes of `data`.
    ///
    /// When two functions share a selector the first declared wins.
    pub fn function_by_selector(&self, data: &[u8]) -> Result<&Function> {
        if data.len() < 4 {
            return Err(Error::ShortInput(data.len()));
        }
        let mut id = [0u8; 4];
        id.copy_from_slice(&data[..4]);
        self.selectors
            .iter()
            .position(|s| *s == id)
            .and_then(|index| self.functions.get_index(index))
            .map(|(_, f)| f)
            .ok_or_else(|| NotFound::Selector(id).into())
    }

    pub fn event_by_topic(&self, topic: &[u8; 32]) -> Result<&Event> {
        self.topics
            .iter()
            .position(|t| t == topic)
            .and_then(|index| self.events.get_index(index))
            .map(|(_, e)| e)
            .ok_or_else(|| NotFound::Topic(*topic).into())
    }

    /// Encodes a call: the function's selector followed by its encoded inputs.
    /// The empty name addresses the constructor, whose encoding has no selector.
    pub fn pack(&self, name: &str, values: &[Value]) -> Result<Vec<u8>> {
        if name.is_empty() {
            trace!(args = values.len(), "packing constructor arguments");
            return self.constructor.inputs.pack_with(values, &self.limits);
        }
        let index = self.functions.get_index_of(name).ok_or_else(|| NotFound::Function(name.to_string()))?;
        let function = &self.functions[index];
        let arguments = function.inputs.pack_with(values, &self.limits)?;

        let mut out = Vec::with_capacity(4 + arguments.len());
        out.extend_from_slice(&self.selectors[index]);
        out.extend_from_slice(&arguments);
        trace!(function = name, len = out.len(), "packed call");
        Ok(out)
    }

    /// Decodes `data` as the outputs of function `name`, or failing that, as the
    /// non-indexed fields of event `name`.
    pub fn unpack(&self, name: &str, data: &[u8]) -> Result<Vec<Value>> {
        trace!(entry = name, len = data.len(), "unpacking");
        if let Some(function) = self.functions.get(name) {
            return function.outputs.unpack_with(data, &self.limits);
        }
        if let Some(event) = self.events.get(name) {
            return event.inputs.non_indexed().unpack_with(data, &self.limits);
        }
        Err(NotFound::Entry(name.to_string()).into())
    }

    /// Like [`Abi::unpack`], keyed by argument name. Unnamed arguments are left out.
    pub fn unpack_into_map(&self, name: &str, data: &[u8]) -> Result<IndexMap<String, Value>> {
        trace!(entry = name, len = data.len(), "unpacking into map");
        if let Some(function) = self.functions.get(name) {
            return function.outputs.unpack_into_map_with(data, &self.limits);
        }
        if let Some(event) = self.events.get(name) {
            return event.inputs.non_indexed().unpack_into_map_with(data, &self.limits);
        }
        Err(NotFound::Entry(name.to_string()).into())
    }

    /// Resolves the function addressed by call data and decodes its inputs.
    pub fn decode_call(&self, data: &[u8]) -> Result<(&Function, Vec<Value>)> {
        let function = self.function_by_selector(data)?;
        let args = &data[4..];
        let values = if function.inputs.is_empty() && args.is_empty() {
            Vec::new()
        } else {
            function.inputs.unpack_with(args, &self.limits)?
        };
        trace!(function = %function.name, "decoded call");
        Ok((function, values))
    }

    /// Topics for a log of event `name`, given one value per indexed field.
    pub fn encode_topics(&self, name: &str, values: &[Value]) -> Result<Vec<[u8; 32]>> {
        self.event(name)?.encode_topics_with(&*self.hasher, values, &self.limits)
    }

    /// Decodes a whole log of event `name` into its named fields, in declaration
    /// order. Indexed fields come from `topics`, the rest from `data`.
    pub fn unpack_log(&self, name: &str, topics: &[[u8; 32]], data: &[u8]) -> Result<IndexMap<String, Value>> {
        let event = self.event(name)?;
        let mut indexed = event.decode_topics(topics)?.into_iter();

        let non_indexed = event.inputs.non_indexed();
        let mut plain = if non_indexed.is_empty() && data.is_empty() {
            Vec::new()
        } else {
            non_indexed.unpack_with(data, &self.limits)?
        }
        .into_iter();

        let mut fields = IndexMap::with_capacity(event.inputs.len());
        for arg in &event.inputs {
            let value = if arg.indexed { indexed.next() } else { plain.next() };
            if let Some(value) = value {
                if !arg.name.is_empty() {
                    fields.insert(arg.name.clone(), value);
                }
            }
        }
        trace!(event = name, fields = fields.len(), "unpacked log");
        Ok(fields)
    }
}

impl std::fmt::Debug for Abi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Abi")
            .field("constructor", &self.constructor)
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .field("limits", &self.limits)
            .finish()
    }
}
