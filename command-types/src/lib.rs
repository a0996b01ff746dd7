// Licensed under the Apache-2.0 license

//! MARS Command Types
//!
//! Shared command vocabulary for the MARS host library: opcodes, capability
//! property tags, result codes, typed parameters, output locations and the
//! static table of command formats.

#![no_std]

extern crate alloc;

pub mod capability;
pub mod error;
pub mod format;
pub mod params;
pub mod table;

pub use capability::*;
pub use error::*;
pub use format::*;
pub use params::*;
pub use table::*;

use core::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// MARS command codes (opcodes), encoded on the wire as a half-word integer
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
pub enum MarsCommandCode {
    SelfTest = 0,
    CapabilityGet = 1,
    SequenceHash = 2,
    SequenceUpdate = 3,
    SequenceComplete = 4,
    PcrExtend = 5,
    RegRead = 6,
    Derive = 7,
    DpDerive = 8,
    PublicRead = 9,
    Quote = 10,
    Sign = 11,
    SignatureVerify = 12,
}

/// Device-reported status, the first element of every response.
///
/// Zero is success; the named constants cover the codes the library itself
/// interprets. Any other value is carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResultCode(pub u32);

impl ResultCode {
    pub const SUCCESS: Self = Self(0);
    pub const IO: Self = Self(1);
    pub const FAILURE: Self = Self(2);
    pub const BUFFER: Self = Self(4);
    pub const COMMAND: Self = Self(5);
    pub const VALUE: Self = Self(6);
    pub const REG: Self = Self(7);
    pub const SEQ: Self = Self(8);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::SUCCESS => Some("SUCCESS"),
            Self::IO => Some("IO"),
            Self::FAILURE => Some("FAILURE"),
            Self::BUFFER => Some("BUFFER"),
            Self::COMMAND => Some("COMMAND"),
            Self::VALUE => Some("VALUE"),
            Self::REG => Some("REG"),
            Self::SEQ => Some("SEQ"),
            _ => None,
        }
    }
}

impl From<u32> for ResultCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "device code {}", self.0),
        }
    }
}
