//! Parsing iptables-style textual rule dumps into [`fw_core`] rules.
//!
//! This crate knows nothing about range slicing or verification; it only
//! turns text into the [`fw_core::Rule`] values that `fw-core` consumes.

pub mod address;
pub mod chain;
pub mod error;
pub mod protocols;
pub mod rule;

pub use chain::extract_chain_rules;
pub use error::ParseError;
pub use rule::parse_rule;
