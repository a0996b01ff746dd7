// Licensed under the Apache-2.0 license

//! Capability query vocabulary

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Property tags accepted by `CapabilityGet`
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
pub enum PropertyTag {
    LenDigest = 1,
    LenSign = 2,
    LenKsym = 3,
    LenKpub = 4,
    LenKprv = 5,
    AlgHash = 6,
    AlgSign = 7,
    AlgSkdf = 8,
    AlgAkdf = 9,
}

/// Fixed lengths discovered once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub digest_len: u16,
    pub signature_len: u16,
    pub key_id_len: u16,
}

/// Which cached length sizes an implicit buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthSource {
    Digest,
    Signature,
    KeyId,
}

impl Capabilities {
    pub fn len_of(&self, source: LengthSource) -> usize {
        match source {
            LengthSource::Digest => self.digest_len as usize,
            LengthSource::Signature => self.signature_len as usize,
            LengthSource::KeyId => self.key_id_len as usize,
        }
    }
}

impl LengthSource {
    /// Property tag that reports this length
    pub fn property(self) -> PropertyTag {
        match self {
            LengthSource::Digest => PropertyTag::LenDigest,
            LengthSource::Signature => PropertyTag::LenSign,
            LengthSource::KeyId => PropertyTag::LenKsym,
        }
    }
}
