// Licensed under the Apache-2.0 license

//! Format descriptors and output locations
//!
//! A format descriptor is the compact signature of one command: a return tag,
//! the implicit half-word opcode, then one tag per parameter. `"Xhwx"` reads as
//! "mandatory-length buffer out, opcode, word, byte string".

use crate::{CommandError, CommandResult, Param, ParamTag};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// Shape of the value returned after the result code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnTag {
    /// `-`: result code only
    None,
    Bool,
    Half,
    Word,
    /// `x`: byte string into a caller buffer
    Buffer,
    /// `X`: byte string with authoritative caller length
    MandatoryBuffer,
}

impl ReturnTag {
    pub const fn as_char(self) -> char {
        match self {
            ReturnTag::None => '-',
            ReturnTag::Bool => 'b',
            ReturnTag::Half => 'h',
            ReturnTag::Word => 'w',
            ReturnTag::Buffer => 'x',
            ReturnTag::MandatoryBuffer => 'X',
        }
    }
}

impl TryFrom<char> for ReturnTag {
    type Error = CommandError;

    fn try_from(tag: char) -> Result<Self, Self::Error> {
        match tag {
            '-' => Ok(ReturnTag::None),
            'b' => Ok(ReturnTag::Bool),
            'h' => Ok(ReturnTag::Half),
            'w' => Ok(ReturnTag::Word),
            'x' => Ok(ReturnTag::Buffer),
            'X' => Ok(ReturnTag::MandatoryBuffer),
            other => Err(CommandError::UnsupportedTag(other)),
        }
    }
}

/// Caller-supplied location for the value following the result code
#[derive(Debug)]
pub enum Output<'a> {
    None,
    Bool(&'a mut bool),
    Half(&'a mut u16),
    Word(&'a mut u32),
    /// Capacity is the slice length; the length cell receives the returned
    /// length, or the required length when the buffer is too small.
    Buffer(&'a mut [u8], &'a mut usize),
    /// The length cell is the capacity on input and the decoded length on
    /// output. It is left untouched when decoding fails.
    MandatoryBuffer(&'a mut [u8], &'a mut usize),
}

impl Output<'_> {
    pub fn tag(&self) -> ReturnTag {
        match self {
            Output::None => ReturnTag::None,
            Output::Bool(_) => ReturnTag::Bool,
            Output::Half(_) => ReturnTag::Half,
            Output::Word(_) => ReturnTag::Word,
            Output::Buffer(..) => ReturnTag::Buffer,
            Output::MandatoryBuffer(..) => ReturnTag::MandatoryBuffer,
        }
    }

    /// Reject a mandatory-length capacity that the buffer cannot honour
    pub fn check_capacity(&self) -> CommandResult<()> {
        if let Output::MandatoryBuffer(buf, len) = self {
            if **len > buf.len() {
                return Err(CommandError::CapacityExceedsBuffer {
                    capacity: **len,
                    available: buf.len(),
                });
            }
        }
        Ok(())
    }
}

/// Validate a parameter list and output location against a command signature
pub fn check_shape(
    ret: ReturnTag,
    tags: &[ParamTag],
    params: &[Param<'_>],
    output: &Output<'_>,
) -> CommandResult<()> {
    if tags.len() != params.len() {
        return Err(CommandError::ParamCountMismatch {
            expected: tags.len(),
            actual: params.len(),
        });
    }

    for (index, (tag, param)) in tags.iter().zip(params).enumerate() {
        if param.tag() != *tag {
            return Err(CommandError::ParamTypeMismatch {
                index,
                expected: *tag,
            });
        }
    }

    if output.tag() != ret {
        return Err(CommandError::ReturnShapeMismatch {
            expected: ret,
            actual: output.tag(),
        });
    }

    output.check_capacity()
}

/// Parsed textual format descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDescriptor {
    ret: ReturnTag,
    params: Vec<ParamTag>,
}

impl FormatDescriptor {
    pub fn new(ret: ReturnTag, params: Vec<ParamTag>) -> Self {
        Self { ret, params }
    }

    /// Parse a descriptor such as `"Xhwx"`
    pub fn parse(descriptor: &str) -> CommandResult<Self> {
        let mut chars = descriptor.chars();
        let ret = ReturnTag::try_from(chars.next().ok_or(CommandError::EmptyDescriptor)?)?;

        match chars.next() {
            Some('h') => {}
            Some(other) if ParamTag::try_from(other).is_err() => {
                return Err(CommandError::UnsupportedTag(other))
            }
            _ => return Err(CommandError::MissingCommandTag),
        }

        let params = chars
            .map(ParamTag::try_from)
            .collect::<CommandResult<Vec<_>>>()?;

        Ok(Self { ret, params })
    }

    /// Descriptor implied by an argument list and output location
    pub fn infer(params: &[Param<'_>], output: &Output<'_>) -> Self {
        Self {
            ret: output.tag(),
            params: params.iter().map(Param::tag).collect(),
        }
    }

    pub fn ret(&self) -> ReturnTag {
        self.ret
    }

    pub fn params(&self) -> &[ParamTag] {
        &self.params
    }

    pub fn check(&self, params: &[Param<'_>], output: &Output<'_>) -> CommandResult<()> {
        check_shape(self.ret, &self.params, params, output)
    }
}

impl FromStr for FormatDescriptor {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_descriptor(f, self.ret, &self.params)
    }
}

pub(crate) fn write_descriptor(
    f: &mut fmt::Formatter<'_>,
    ret: ReturnTag,
    params: &[ParamTag],
) -> fmt::Result {
    write!(f, "{}h", ret.as_char())?;
    for tag in params {
        write!(f, "{}", tag.as_char())?;
    }
    Ok(())
}
