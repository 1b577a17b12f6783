//! Message Module
//!
//! In-memory form of one protocol message.
//!
//! ## Responsibilities
//! - Ordered ordinary fields (`Key: Value`)
//! - A separate Variables namespace (`Variable: key=value`)
//! - Raw lines of the last decode, for diagnostics
//!
//! ## Key Handling
//! Two forms of a key exist:
//! - the *name*, exactly as given to `set` (a decoded field's name is its
//!   normalized key). This is what encode writes back out.
//! - the *key*, `normalize_key(name)`. Fields are unique per key, so
//!   `Action-ID`, `action_id` and `ACTION_ID` address the same field while
//!   `A-B-C` (`a_b-c`) and `A_B_C` (`a_b_c`) stay distinct.
//!
//! `set` and `get` take names in wire form. Normalization is not
//! idempotent for keys with more than one hyphen: `get("a_b-c")` looks up
//! `a_b_c`, so such a field is reached as `get("A-B-C")`.

mod container;

pub use container::{Fields, Message, Variables};

/// Wire normalization applied to decoded keys: the first `-` becomes `_`,
/// then the whole key is lowercased.
///
/// Only the first hyphen is replaced; `A-B-C` normalizes to `a_b-c`.
pub fn normalize_key(name: &str) -> String {
    name.replacen('-', "_", 1).to_lowercase()
}

/// A stored ordinary field
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Field {
    /// Normalized key (see module docs)
    pub key: String,

    /// Name as last set, emitted by encode
    pub name: String,

    /// Field value, never coerced
    pub value: String,
}
