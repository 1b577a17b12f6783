//! Protocol Module
//!
//! Wire format of manager-style text messages.
//!
//! ## Message Format
//! ```text
//! Action: Originate\r\n
//! ActionID: 42\r\n
//! Variable: foo=bar\r\n
//! Variable: baz=1\r\n
//! \r\n
//! ```
//!
//! ### Rules
//! - Lines are delimited by CRLF; a blank line ends the message
//! - Only the first `:` on a line separates key from value
//! - A line containing `--END COMMAND--` is taken whole (marker removed)
//!   as the value of `CommandOutput`
//! - No escaping exists: a value containing CRLF, or a key containing `:`,
//!   cannot be represented unambiguously

mod codec;

pub use codec::{decode, decode_bytes, encode, encode_into, write_message};

/// Line delimiter
pub const EOL: &str = "\r\n";

/// Marker closing the free-text output of a `Command` action
pub const END_COMMAND: &str = "--END COMMAND--";

/// Synthetic field holding a line that carried `END_COMMAND`
pub const COMMAND_OUTPUT_KEY: &str = "CommandOutput";

/// Key of variable lines as written by encode
pub const VARIABLE_KEY: &str = "Variable";
