// Licensed under the Apache-2.0 license

//! Command Error Types
//!
//! Errors raised while interpreting format descriptors, encoding command
//! arrays and decoding response arrays. None of these originate from the
//! device; device failures travel as [`crate::ResultCode`].

use crate::{ParamTag, ReturnTag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Format descriptor has no return tag
    EmptyDescriptor,

    /// Tag character outside the descriptor vocabulary
    UnsupportedTag(char),

    /// Second descriptor position is not the half-word opcode tag
    MissingCommandTag,

    /// Parameter list length differs from the descriptor
    ParamCountMismatch { expected: usize, actual: usize },

    /// Parameter at `index` has the wrong type
    ParamTypeMismatch { index: usize, expected: ParamTag },

    /// Output location does not match the descriptor return tag
    ReturnShapeMismatch { expected: ReturnTag, actual: ReturnTag },

    /// Mandatory-length capacity larger than the supplied buffer
    CapacityExceedsBuffer { capacity: usize, available: usize },

    /// Encoded command does not fit in the command buffer
    BufferOverflow,

    /// Response is not a CBOR array
    NotAnArray,

    /// Response array is empty
    MissingResultCode,

    /// Response carries no value where the return tag requires one
    MissingValue,

    /// Response element has an unexpected CBOR type
    UnexpectedType { expected: &'static str },

    /// Integer does not fit the requested width
    IntegerOutOfRange(u64),

    /// Returned byte string is larger than the caller capacity
    BufferTooSmall { required: usize, capacity: usize },

    /// Response array has more elements than the return tag allows
    TrailingData,

    /// Response bytes are not well-formed CBOR
    Malformed,
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::EmptyDescriptor => write!(f, "Empty format descriptor"),
            CommandError::UnsupportedTag(tag) => write!(f, "Unsupported tag '{}'", tag),
            CommandError::MissingCommandTag => {
                write!(f, "Second descriptor tag must be 'h' for the command code")
            }
            CommandError::ParamCountMismatch { expected, actual } => write!(
                f,
                "Expected {} parameters, {} supplied",
                expected, actual
            ),
            CommandError::ParamTypeMismatch { index, expected } => write!(
                f,
                "Parameter {} must be '{}'",
                index,
                expected.as_char()
            ),
            CommandError::ReturnShapeMismatch { expected, actual } => write!(
                f,
                "Output must be '{}', got '{}'",
                expected.as_char(),
                actual.as_char()
            ),
            CommandError::CapacityExceedsBuffer {
                capacity,
                available,
            } => write!(
                f,
                "Capacity {} exceeds the {} byte output buffer",
                capacity, available
            ),
            CommandError::BufferOverflow => write!(f, "Command buffer overflow"),
            CommandError::NotAnArray => write!(f, "Response is not an array"),
            CommandError::MissingResultCode => write!(f, "Response has no result code"),
            CommandError::MissingValue => write!(f, "Response has no return value"),
            CommandError::UnexpectedType { expected } => {
                write!(f, "Unexpected element type, expected {}", expected)
            }
            CommandError::IntegerOutOfRange(value) => {
                write!(f, "Integer {} out of range", value)
            }
            CommandError::BufferTooSmall { required, capacity } => write!(
                f,
                "Buffer too small: {} bytes returned, capacity {}",
                required, capacity
            ),
            CommandError::TrailingData => write!(f, "Unexpected trailing response elements"),
            CommandError::Malformed => write!(f, "Malformed CBOR"),
        }
    }
}

/// Result type for command operations
pub type CommandResult<T> = Result<T, CommandError>;
