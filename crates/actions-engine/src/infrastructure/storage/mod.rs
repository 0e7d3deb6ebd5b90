//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration for the replay
//! binary, falls back to defaults when the file does not exist, and writes
//! a default file on request.

pub mod config;
