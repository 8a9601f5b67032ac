//! MCP (Model Context Protocol) tool transports.
//!
//! Agents reach their tools over one of two transports; the protocol spoken
//! across them is opaque to this crate — we only supply credentials, URLs
//! and command lines.

mod types;

pub use types::*;
