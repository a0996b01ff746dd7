// Licensed under the Apache-2.0 license

//! CBOR packing of command and response arrays
//!
//! Commands go out as a definite-length array `[opcode, param...]`. Responses
//! come back as `[result_code, value?]`, definite or indefinite length.

use crate::ResultCodePolicy;
use ciborium::value::Value;
use ciborium_io::Read as _;
use ciborium_ll::{simple, Decoder, Encoder, Header};
use mars_util_host_command_types::{CommandError, CommandResult, Output, Param, ResultCode};
use std::fmt::Write as _;
use std::io::Cursor;

/// Encode `[code, params...]` into `buffer`, returning the encoded length.
///
/// Fails with [`CommandError::BufferOverflow`] rather than truncating.
pub fn encode_command(buffer: &mut [u8], code: u16, params: &[Param<'_>]) -> CommandResult<usize> {
    let mut cursor = Cursor::new(buffer);

    {
        let mut encoder = Encoder::from(&mut cursor);
        encoder
            .push(Header::Array(Some(params.len() + 1)))
            .map_err(|_| CommandError::BufferOverflow)?;
        encoder
            .push(Header::Positive(code as u64))
            .map_err(|_| CommandError::BufferOverflow)?;

        for param in params {
            let pushed = match *param {
                Param::Bool(value) => encoder.push(Header::Simple(if value {
                    simple::TRUE
                } else {
                    simple::FALSE
                })),
                Param::Half(value) => encoder.push(Header::Positive(value as u64)),
                Param::Word(value) => encoder.push(Header::Positive(value as u64)),
                Param::Bytes(value) => encoder.bytes(value, None),
            };
            pushed.map_err(|_| CommandError::BufferOverflow)?;
        }
    }

    Ok(cursor.position() as usize)
}

/// Walks the elements of a response array
struct ArrayReader<'a> {
    decoder: Decoder<&'a [u8]>,
    remaining: Option<usize>,
    done: bool,
}

impl<'a> ArrayReader<'a> {
    fn open(response: &'a [u8]) -> CommandResult<Self> {
        let mut decoder = Decoder::from(response);
        let remaining = match decoder.pull().map_err(|_| CommandError::Malformed)? {
            Header::Array(len) => len,
            _ => return Err(CommandError::NotAnArray),
        };

        Ok(Self {
            decoder,
            remaining,
            done: false,
        })
    }

    fn next(&mut self) -> CommandResult<Option<Header>> {
        if self.done {
            return Ok(None);
        }

        match self.remaining {
            Some(0) => {
                self.done = true;
                Ok(None)
            }
            Some(ref mut left) => {
                *left -= 1;
                self.pull().map(Some)
            }
            None => match self.pull()? {
                Header::Break => {
                    self.done = true;
                    Ok(None)
                }
                header => Ok(Some(header)),
            },
        }
    }

    fn pull(&mut self) -> CommandResult<Header> {
        self.decoder.pull().map_err(|_| CommandError::Malformed)
    }

    fn read_into(&mut self, dest: &mut [u8]) -> CommandResult<()> {
        self.decoder
            .read_exact(dest)
            .map_err(|_| CommandError::Malformed)
    }
}

fn expect_uint(header: Header) -> CommandResult<u64> {
    match header {
        Header::Positive(value) => Ok(value),
        _ => Err(CommandError::UnexpectedType {
            expected: "unsigned integer",
        }),
    }
}

fn expect_bytes_len(header: Header) -> CommandResult<usize> {
    match header {
        Header::Bytes(Some(len)) => Ok(len),
        _ => Err(CommandError::UnexpectedType {
            expected: "definite-length byte string",
        }),
    }
}

/// Decode a response array and write its value into `output`.
///
/// The returned result code is not interpreted here beyond `policy`: with
/// [`ResultCodePolicy::DiscardPayload`] a nonzero code returns before any
/// output is written. Under [`ResultCodePolicy::DecodePayload`] a nonzero
/// code survives a payload that does not fit `output`; only a malformed
/// array loses it.
pub fn decode_response(
    response: &[u8],
    policy: ResultCodePolicy,
    output: Output<'_>,
) -> CommandResult<ResultCode> {
    let mut reader = ArrayReader::open(response)?;

    let header = reader.next()?.ok_or(CommandError::MissingResultCode)?;
    let raw = expect_uint(header)?;
    let code = ResultCode(u32::try_from(raw).map_err(|_| CommandError::IntegerOutOfRange(raw))?);

    if code.is_success() {
        decode_payload(&mut reader, output)?;
        return Ok(code);
    }

    if policy == ResultCodePolicy::DiscardPayload {
        return Ok(code);
    }

    match decode_payload(&mut reader, output) {
        Err(CommandError::Malformed) => Err(CommandError::Malformed),
        Err(err) => {
            log::debug!("Discarding payload of {} response: {}", code, err);
            Ok(code)
        }
        Ok(()) => Ok(code),
    }
}

fn decode_payload(reader: &mut ArrayReader<'_>, output: Output<'_>) -> CommandResult<()> {
    let value = match (reader.next()?, &output) {
        (None, Output::None) => return Ok(()),
        (None, _) => return Err(CommandError::MissingValue),
        (Some(_), Output::None) => return Err(CommandError::TrailingData),
        (Some(header), _) => header,
    };

    match output {
        Output::None => {}
        Output::Bool(dest) => {
            *dest = match value {
                Header::Simple(simple::TRUE) => true,
                Header::Simple(simple::FALSE) => false,
                _ => {
                    return Err(CommandError::UnexpectedType {
                        expected: "boolean",
                    })
                }
            };
        }
        Output::Half(dest) => {
            let raw = expect_uint(value)?;
            *dest = u16::try_from(raw).map_err(|_| CommandError::IntegerOutOfRange(raw))?;
        }
        Output::Word(dest) => {
            let raw = expect_uint(value)?;
            *dest = u32::try_from(raw).map_err(|_| CommandError::IntegerOutOfRange(raw))?;
        }
        Output::Buffer(buf, len) => {
            let required = expect_bytes_len(value)?;
            if required > buf.len() {
                *len = required;
                return Err(CommandError::BufferTooSmall {
                    required,
                    capacity: buf.len(),
                });
            }
            reader.read_into(&mut buf[..required])?;
            *len = required;
        }
        Output::MandatoryBuffer(buf, len) => {
            let required = expect_bytes_len(value)?;
            let capacity = (*len).min(buf.len());
            if required > capacity {
                return Err(CommandError::BufferTooSmall { required, capacity });
            }
            reader.read_into(&mut buf[..required])?;
            *len = required;
        }
    }

    if reader.next()?.is_some() {
        return Err(CommandError::TrailingData);
    }

    Ok(())
}

/// Render encoded CBOR in diagnostic notation for tracing
pub fn render(bytes: &[u8]) -> String {
    match ciborium::de::from_reader::<Value, _>(bytes) {
        Ok(value) => {
            let mut out = String::new();
            render_value(&value, &mut out);
            out
        }
        Err(_) => format!("<malformed h'{}'>", hex::encode(bytes)),
    }
}

fn render_value(value: &Value, out: &mut String) {
    match value {
        Value::Integer(int) => {
            let _ = write!(out, "{}", i128::from(*int));
        }
        Value::Bytes(bytes) => {
            let _ = write!(out, "h'{}'", hex::encode(bytes));
        }
        Value::Float(float) => {
            let _ = write!(out, "{}", float);
        }
        Value::Text(text) => {
            let _ = write!(out, "{:?}", text);
        }
        Value::Bool(flag) => {
            let _ = write!(out, "{}", flag);
        }
        Value::Null => out.push_str("null"),
        Value::Tag(tag, inner) => {
            let _ = write!(out, "{}(", tag);
            render_value(inner, out);
            out.push(')');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_value(item, out);
            }
            out.push(']');
        }
        Value::Map(entries) => {
            out.push('{');
            for (i, (key, val)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_value(key, out);
                out.push_str(": ");
                render_value(val, out);
            }
            out.push('}');
        }
        _ => out.push('?'),
    }
}
