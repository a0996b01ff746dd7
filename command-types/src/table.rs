// Licensed under the Apache-2.0 license

//! Static command table
//!
//! One [`CommandFormat`] per implemented device command. The typed command
//! surface executes through these rows, so a parameter list that disagrees
//! with its row is rejected before anything is encoded.

use crate::format::{check_shape, write_descriptor};
use crate::{
    CommandResult, LengthSource, MarsCommandCode, Output, Param, ParamTag, ReturnTag,
};
use core::fmt;

/// Signature of one device command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFormat {
    pub name: &'static str,
    pub code: MarsCommandCode,
    pub ret: ReturnTag,
    pub params: &'static [ParamTag],
    /// Cached length that sizes the returned buffer, if any
    pub output_len: Option<LengthSource>,
}

impl CommandFormat {
    pub const fn new(
        name: &'static str,
        code: MarsCommandCode,
        ret: ReturnTag,
        params: &'static [ParamTag],
    ) -> Self {
        Self {
            name,
            code,
            ret,
            params,
            output_len: None,
        }
    }

    pub const fn with_output_len(self, source: LengthSource) -> Self {
        Self {
            output_len: Some(source),
            ..self
        }
    }

    pub fn check(&self, params: &[Param<'_>], output: &Output<'_>) -> CommandResult<()> {
        check_shape(self.ret, self.params, params, output)
    }
}

impl fmt::Display for CommandFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_descriptor(f, self.ret, self.params)
    }
}

use ParamTag::{Bool as B, Bytes as X, Half as H, Word as W};

pub const SELF_TEST: CommandFormat =
    CommandFormat::new("SelfTest", MarsCommandCode::SelfTest, ReturnTag::None, &[B]);

pub const CAPABILITY_GET: CommandFormat = CommandFormat::new(
    "CapabilityGet",
    MarsCommandCode::CapabilityGet,
    ReturnTag::Half,
    &[H],
);

pub const SEQUENCE_HASH: CommandFormat = CommandFormat::new(
    "SequenceHash",
    MarsCommandCode::SequenceHash,
    ReturnTag::None,
    &[],
);

pub const SEQUENCE_UPDATE: CommandFormat = CommandFormat::new(
    "SequenceUpdate",
    MarsCommandCode::SequenceUpdate,
    ReturnTag::Buffer,
    &[X],
);

pub const SEQUENCE_COMPLETE: CommandFormat = CommandFormat::new(
    "SequenceComplete",
    MarsCommandCode::SequenceComplete,
    ReturnTag::Buffer,
    &[],
);

pub const PCR_EXTEND: CommandFormat = CommandFormat::new(
    "PcrExtend",
    MarsCommandCode::PcrExtend,
    ReturnTag::None,
    &[H, X],
);

pub const REG_READ: CommandFormat = CommandFormat::new(
    "RegRead",
    MarsCommandCode::RegRead,
    ReturnTag::MandatoryBuffer,
    &[H],
)
.with_output_len(LengthSource::Digest);

pub const DERIVE: CommandFormat = CommandFormat::new(
    "Derive",
    MarsCommandCode::Derive,
    ReturnTag::MandatoryBuffer,
    &[W, X],
)
.with_output_len(LengthSource::KeyId);

pub const DP_DERIVE: CommandFormat = CommandFormat::new(
    "DpDerive",
    MarsCommandCode::DpDerive,
    ReturnTag::None,
    &[W, X],
);

pub const QUOTE: CommandFormat = CommandFormat::new(
    "Quote",
    MarsCommandCode::Quote,
    ReturnTag::MandatoryBuffer,
    &[W, X, X],
)
.with_output_len(LengthSource::Signature);

pub const SIGN: CommandFormat = CommandFormat::new(
    "Sign",
    MarsCommandCode::Sign,
    ReturnTag::MandatoryBuffer,
    &[X, X],
)
.with_output_len(LengthSource::Signature);

pub const SIGNATURE_VERIFY: CommandFormat = CommandFormat::new(
    "SignatureVerify",
    MarsCommandCode::SignatureVerify,
    ReturnTag::Bool,
    &[B, X, X, X],
);

/// Every implemented command. `PublicRead` is intentionally absent.
pub const COMMAND_TABLE: &[CommandFormat] = &[
    SELF_TEST,
    CAPABILITY_GET,
    SEQUENCE_HASH,
    SEQUENCE_UPDATE,
    SEQUENCE_COMPLETE,
    PCR_EXTEND,
    REG_READ,
    DERIVE,
    DP_DERIVE,
    QUOTE,
    SIGN,
    SIGNATURE_VERIFY,
];

pub fn lookup(code: MarsCommandCode) -> Option<&'static CommandFormat> {
    COMMAND_TABLE.iter().find(|format| format.code == code)
}
