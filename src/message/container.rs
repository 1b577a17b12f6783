//! Message container
//!
//! Vec-backed ordered storage. Messages carry a handful of fields, so a
//! linear scan beats hashing and keeps insertion order for encode.

use std::fmt;

use bytes::{Bytes, BytesMut};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{normalize_key, Field};
use crate::config::Config;
use crate::error::Result;
use crate::protocol;

/// One protocol message: ordered fields, Variables and raw decoded lines
#[derive(Debug, Clone, Default)]
pub struct Message {
    /// Ordinary fields in insertion order
    fields: Vec<Field>,

    /// Variables in insertion order, keys stored verbatim
    variables: Vec<(String, String)>,

    /// Lines of the last decode (diagnostic only, never encoded)
    lines: Vec<String>,
}

impl Message {
    /// Create an empty message
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `text` into a fresh message using the default config
    pub fn decoded(text: &str) -> Self {
        Self::decoded_with(text, &Config::default())
    }

    /// Decode `text` into a fresh message
    pub fn decoded_with(text: &str, config: &Config) -> Self {
        let mut message = Self::new();
        message.decode_with(text, config);
        message
    }

    // =========================================================================
    // Fields
    // =========================================================================

    /// Store `value` under `normalize_key(name)`, overwriting any prior
    /// value for that key. An overwritten field keeps its position and
    /// takes the new name casing.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.insert(normalize_key(name), name.to_string(), value.into());
    }

    /// Store under a key that is already normalized
    pub(crate) fn set_normalized(&mut self, key: String, value: impl Into<String>) {
        let name = key.clone();
        self.insert(key, name, value.into());
    }

    fn insert(&mut self, key: String, name: String, value: String) {
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => {
                field.name = name;
                field.value = value;
            }
            None => self.fields.push(Field { key, name, value }),
        }
    }

    /// Get the value stored under `name`, or `None` if never set
    pub fn get(&self, name: &str) -> Option<&str> {
        let key = normalize_key(name);
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// Check whether a field is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a field, returning its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let key = normalize_key(name);
        let pos = self.fields.iter().position(|f| f.key == key)?;
        Some(self.fields.remove(pos).value)
    }

    /// Number of ordinary fields (Variables not counted)
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// True if there are no ordinary fields and no Variables
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.variables.is_empty()
    }

    /// Iterate `(name, value)` pairs in insertion order
    pub fn fields(&self) -> Fields<'_> {
        Fields {
            inner: self.fields.iter(),
        }
    }

    // =========================================================================
    // Variables
    // =========================================================================

    /// Store a variable; an existing variable with the same key is replaced
    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.variables.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.variables.push((key, value)),
        }
    }

    /// Get a variable by exact key
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate `(key, value)` variable pairs in insertion order
    pub fn variables(&self) -> Variables<'_> {
        Variables {
            inner: self.variables.iter(),
        }
    }

    // =========================================================================
    // Wire Format
    // =========================================================================

    /// Raw lines from the last decode
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    /// Decode wire text into this message using the default config
    pub fn decode(&mut self, text: &str) {
        self.decode_with(text, &Config::default());
    }

    /// Decode wire text into this message. Existing fields survive unless a
    /// decoded line overwrites them.
    pub fn decode_with(&mut self, text: &str, config: &Config) {
        protocol::decode(text, self, config);
    }

    /// Decode raw bytes into this message
    pub fn decode_bytes(&mut self, bytes: &[u8], config: &Config) -> Result<()> {
        protocol::decode_bytes(bytes, self, config)
    }

    /// Encode to wire text
    pub fn encode(&self) -> String {
        protocol::encode(self)
    }

    /// Encode to a frozen byte buffer
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();
        protocol::encode_into(self, &mut buf);
        buf.freeze()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        protocol::write_message(self, f)
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Message", 2)?;
        state.serialize_field("fields", &OrderedPairs(self.fields().collect()))?;
        state.serialize_field("variables", &OrderedPairs(self.variables().collect()))?;
        state.end()
    }
}

/// Serializes as a map while keeping insertion order
struct OrderedPairs<'a>(Vec<(&'a str, &'a str)>);

impl Serialize for OrderedPairs<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().copied())
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over a message's ordinary fields
pub struct Fields<'a> {
    inner: std::slice::Iter<'a, Field>,
}

impl<'a> Iterator for Fields<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|f| (f.name.as_str(), f.value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Fields<'_> {}

/// Iterator over a message's Variables
pub struct Variables<'a> {
    inner: std::slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Variables<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Variables<'_> {}
