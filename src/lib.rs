//! # amiwire
//!
//! Codec for the line-oriented text format spoken by manager-style
//! protocols such as the Asterisk Manager Interface:
//! - `Key: Value` lines, CRLF-delimited
//! - `Variable: key=value` lines for channel variables
//! - one blank line terminating each message
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Collaborators (transport, dispatch)             │
//! └──────────────┬──────────────────────────────▲───────────────┘
//!                │ complete message text         │ wire text
//! ┌──────────────▼──────────────┐  ┌────────────┴───────────────┐
//! │           decode            │  │           encode            │
//! │  (sentinel, colon policy)   │  │ (fields, variables, CRLF)   │
//! └──────────────┬──────────────┘  └────────────▲───────────────┘
//!                │                               │
//!                ▼                               │
//!          ┌───────────────────────────────────────────┐
//!          │                 Message                   │
//!          │   fields (ordered) │ variables │ lines    │
//!          └───────────────────────────────────────────┘
//! ```
//!
//! Transport I/O, login sequencing and per-action semantics live outside
//! this crate.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod message;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AmiError, Result};
pub use config::{Config, VariableMode};
pub use message::Message;
pub use protocol::{decode, encode};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of amiwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
