// Licensed under the Apache-2.0 license

//! MARS Commands Layer
//!
//! Typed command surface: one `mars_cmd_*` function per device command, each
//! a fixed call into the session marshaler.

// Re-export command types for convenience
pub use mars_util_host_command_types::*;

pub mod api;

pub use api::*;
