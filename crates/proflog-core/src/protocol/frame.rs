//! Length-prefixed admin socket frames (panic-free).
//!
//! Request:  `len: u32 BE` then `len` body bytes. An empty body selects dump.
//! Response: `status: u8` then `len: u32 BE` then `len` body bytes.
//!
//! Parsing rules:
//! - Never index (`buf[0]`); always use `Buf` and `remaining()` checks.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{ProflogError, Result};

pub const REQUEST_HEADER_LEN: usize = 4;
pub const RESPONSE_HEADER_LEN: usize = 5;

/// Response status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn as_u8(self) -> u8 {
        match self {
            Status::Ok => 0,
            Status::Error => 1,
        }
    }

    pub fn from_u8(b: u8) -> Result<Self> {
        match b {
            0 => Ok(Status::Ok),
            1 => Ok(Status::Error),
            other => Err(ProflogError::BadRequest(format!("unknown response status: {other}"))),
        }
    }
}

/// Decoded response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub status: Status,
    pub len: usize,
}

fn body_len(body: &[u8]) -> Result<u32> {
    u32::try_from(body.len()).map_err(|_| ProflogError::PayloadTooLarge)
}

/// Encode a request frame.
pub fn encode_request(body: &[u8]) -> Result<Bytes> {
    let len = body_len(body)?;
    let mut buf = BytesMut::with_capacity(REQUEST_HEADER_LEN + body.len());
    buf.put_u32(len);
    buf.put_slice(body);
    Ok(buf.freeze())
}

/// Read the body length from a request header.
pub fn decode_request_len(buf: &mut impl Buf) -> Result<usize> {
    if buf.remaining() < REQUEST_HEADER_LEN {
        return Err(ProflogError::BadRequest("request header too short".into()));
    }
    Ok(buf.get_u32() as usize)
}

/// Decode a complete request frame into its body.
pub fn decode_request(mut buf: Bytes) -> Result<Bytes> {
    let len = decode_request_len(&mut buf)?;
    if buf.remaining() < len {
        return Err(ProflogError::BadRequest(format!(
            "request body truncated: want {len}, have {}",
            buf.remaining()
        )));
    }
    Ok(buf.copy_to_bytes(len))
}

/// Encode a response frame.
pub fn encode_response(status: Status, body: &[u8]) -> Result<Bytes> {
    let len = body_len(body)?;
    let mut buf = BytesMut::with_capacity(RESPONSE_HEADER_LEN + body.len());
    buf.put_u8(status.as_u8());
    buf.put_u32(len);
    buf.put_slice(body);
    Ok(buf.freeze())
}

pub fn decode_response_header(buf: &mut impl Buf) -> Result<ResponseHeader> {
    if buf.remaining() < RESPONSE_HEADER_LEN {
        return Err(ProflogError::BadRequest("response header too short".into()));
    }
    let status = Status::from_u8(buf.get_u8())?;
    let len = buf.get_u32() as usize;
    Ok(ResponseHeader { status, len })
}

/// Decode a complete response frame.
pub fn decode_response(mut buf: Bytes) -> Result<(Status, Bytes)> {
    let header = decode_response_header(&mut buf)?;
    if buf.remaining() < header.len {
        return Err(ProflogError::BadRequest(format!(
            "response body truncated: want {}, have {}",
            header.len,
            buf.remaining()
        )));
    }
    Ok((header.status, buf.copy_to_bytes(header.len)))
}
