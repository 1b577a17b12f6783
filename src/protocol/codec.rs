//! Protocol codec
//!
//! Encoding and decoding between `Message` and wire text.
//!
//! ## Wire Format
//!
//! ### Encoded Message
//! ```text
//! ┌───────────────────────────────┐
//! │ <Name>: <value>\r\n      × N   │  ordinary fields, insertion order
//! │ Variable: <k>=<v>\r\n    × M   │  variables, insertion order
//! │ \r\n                           │  terminator
//! └───────────────────────────────┘
//! ```
//!
//! Decoding is best-effort text splitting and never fails on `&str` input.

use std::fmt::{self, Write};

use bytes::{BufMut, BytesMut};

use super::{COMMAND_OUTPUT_KEY, END_COMMAND, EOL, VARIABLE_KEY};
use crate::config::{Config, VariableMode};
use crate::error::Result;
use crate::message::{normalize_key, Message};

/// Normalized form of `VARIABLE_KEY`
const VARIABLE_FIELD: &str = "variable";

// =============================================================================
// Encoding
// =============================================================================

/// Encode a message to wire text
pub fn encode(message: &Message) -> String {
    let mut out = String::with_capacity(encoded_len_hint(message));
    out.extend(wire_parts(message));
    trace_encoded(message);
    out
}

/// Append the wire form of a message to a byte buffer
pub fn encode_into(message: &Message, dst: &mut BytesMut) {
    dst.reserve(encoded_len_hint(message));
    for part in wire_parts(message) {
        dst.put_slice(part.as_bytes());
    }
    trace_encoded(message);
}

/// Write the wire form of a message to any `fmt::Write` sink
pub fn write_message<W: Write>(message: &Message, out: &mut W) -> fmt::Result {
    wire_parts(message).try_for_each(|part| out.write_str(part))
}

/// Wire text of a message as a sequence of string pieces
fn wire_parts<'a>(message: &'a Message) -> impl Iterator<Item = &'a str> + 'a {
    let fields = message
        .fields()
        .flat_map(|(name, value)| [name, ": ", value, EOL]);
    let variables = message
        .variables()
        .flat_map(|(key, value)| [VARIABLE_KEY, ": ", key, "=", value, EOL]);

    fields.chain(variables).chain(std::iter::once(EOL))
}

fn trace_encoded(message: &Message) {
    tracing::trace!(
        "Encoded message with {} fields and {} variables",
        message.field_count(),
        message.variables().len()
    );
}

fn encoded_len_hint(message: &Message) -> usize {
    let fields: usize = message
        .fields()
        .map(|(n, v)| n.len() + v.len() + 4)
        .sum();
    let variables: usize = message
        .variables()
        .map(|(k, v)| VARIABLE_KEY.len() + k.len() + v.len() + 5)
        .sum();
    fields + variables + EOL.len()
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode wire text into `message`
///
/// The text is split on CRLF and each line becomes one assignment:
/// 1. a line containing `--END COMMAND--` is stored whole, marker removed,
///    as `commandoutput`
/// 2. otherwise the key is everything before the first `:`, the value
///    everything after it (later colons belong to the value)
/// 3. a line without `:` uses the whole line as both key and value
///
/// Keys are passed through `normalize_key`; values are trimmed. Lines empty
/// after trimming are skipped. The split lines are kept on the message.
///
/// `commandoutput` is trimmed too, so `"out --END COMMAND--"` yields `"out"`.
pub fn decode(text: &str, message: &mut Message, config: &Config) {
    let lines: Vec<String> = text.split(EOL).map(str::to_owned).collect();

    for (index, line) in lines.iter().enumerate() {
        decode_line(index, line, message, config);
    }

    tracing::debug!(
        "Decoded {} lines into {} fields and {} variables",
        lines.len(),
        message.field_count(),
        message.variables().len()
    );

    message.set_lines(lines);
}

/// Decode raw bytes into `message`
///
/// Invalid UTF-8 is replaced when `config.lossy_utf8` is set, otherwise it
/// is rejected and `message` is left untouched.
pub fn decode_bytes(bytes: &[u8], message: &mut Message, config: &Config) -> Result<()> {
    if config.lossy_utf8 {
        decode(&String::from_utf8_lossy(bytes), message, config);
    } else {
        decode(std::str::from_utf8(bytes)?, message, config);
    }
    Ok(())
}

fn decode_line(index: usize, line: &str, message: &mut Message, config: &Config) {
    if line.trim().is_empty() {
        return;
    }

    let (raw_key, raw_value) = if line.contains(END_COMMAND) {
        tracing::trace!("Line {}: command output sentinel", index);
        (COMMAND_OUTPUT_KEY, line.replacen(END_COMMAND, "", 1))
    } else {
        match line.split_once(':') {
            Some((key, value)) => (key, value.to_string()),
            None => {
                tracing::trace!("Line {}: no separator, using whole line", index);
                (line, line.to_string())
            }
        }
    };

    let key = normalize_key(raw_key);
    let value = raw_value.trim();

    if key == VARIABLE_FIELD && config.variable_mode == VariableMode::Routed {
        let (name, var_value) = value.split_once('=').unwrap_or((value, ""));
        message.set_variable(name.trim(), var_value.trim());
        return;
    }

    message.set_normalized(key, value);
}
