// Licensed under the Apache-2.0 license

//! Typed command parameters
//!
//! A command's arguments are a slice of [`Param`] values. Each variant maps to
//! exactly one element of the encoded command array, so the argument count is
//! fixed by construction.

use crate::CommandError;

/// Parameter type tag as written in a format descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamTag {
    Bool,
    Half,
    Word,
    Bytes,
}

impl ParamTag {
    pub const fn as_char(self) -> char {
        match self {
            ParamTag::Bool => 'b',
            ParamTag::Half => 'h',
            ParamTag::Word => 'w',
            ParamTag::Bytes => 'x',
        }
    }
}

impl TryFrom<char> for ParamTag {
    type Error = CommandError;

    fn try_from(tag: char) -> Result<Self, Self::Error> {
        match tag {
            'b' => Ok(ParamTag::Bool),
            'h' => Ok(ParamTag::Half),
            'w' => Ok(ParamTag::Word),
            'x' => Ok(ParamTag::Bytes),
            other => Err(CommandError::UnsupportedTag(other)),
        }
    }
}

/// One command argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param<'a> {
    Bool(bool),
    /// 16-bit unsigned integer on the device side
    Half(u16),
    /// 32-bit unsigned integer on the device side
    Word(u32),
    /// Length-prefixed byte string of exactly this slice
    Bytes(&'a [u8]),
}

impl Param<'_> {
    pub fn tag(&self) -> ParamTag {
        match self {
            Param::Bool(_) => ParamTag::Bool,
            Param::Half(_) => ParamTag::Half,
            Param::Word(_) => ParamTag::Word,
            Param::Bytes(_) => ParamTag::Bytes,
        }
    }
}

impl From<bool> for Param<'_> {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<u16> for Param<'_> {
    fn from(value: u16) -> Self {
        Param::Half(value)
    }
}

impl From<u32> for Param<'_> {
    fn from(value: u32) -> Self {
        Param::Word(value)
    }
}

impl<'a> From<&'a [u8]> for Param<'a> {
    fn from(value: &'a [u8]) -> Self {
        Param::Bytes(value)
    }
}
