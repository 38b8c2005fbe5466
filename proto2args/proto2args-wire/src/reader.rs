//! Lazy iterator over the fields of one wire-format message body.

use bytes::Buf;

use crate::{
    error::WireError,
    field::{WireField, WireValue},
};

const VARINT_MAX_BYTES: usize = 10;

/// Single-pass reader yielding each field of a message body in wire order.
///
/// The reader borrows the input span; length-delimited payloads are
/// sub-slices of it, so embedded messages can be walked with a fresh reader
/// without copying. After yielding an error the reader is exhausted.
#[derive(Debug, Clone)]
pub struct FieldReader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    fn read_varint(&mut self) -> Result<u64, WireError> {
        let start = self.offset;
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            if self.offset - start == VARINT_MAX_BYTES {
                return Err(WireError::VarintTooLong { offset: start });
            }
            let Some(&byte) = self.buf.get(self.offset) else {
                return Err(WireError::Truncated { offset: start });
            };
            self.offset += 1;
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        if self.buf.len() - self.offset < len {
            return Err(WireError::Truncated { offset: self.offset });
        }
        let out = &self.buf[self.offset..self.offset + len];
        self.offset += len;
        Ok(out)
    }

    fn read_field(&mut self) -> Result<WireField<'a>, WireError> {
        let key_offset = self.offset;
        let field_key = self.read_varint()?;
        let tag = (field_key >> 3) as u32;
        let wire_type = (field_key & 0x7) as u8;
        if tag == 0 {
            return Err(WireError::ZeroTag { offset: key_offset });
        }
        let value = match wire_type {
            0 => WireValue::Varint(self.read_varint()?),
            1 => {
                let mut bytes = self.take(8)?;
                WireValue::Fixed64(bytes.get_u64_le())
            }
            2 => {
                let len = self.read_varint()? as usize;
                WireValue::LengthDelimited(self.take(len)?)
            }
            5 => {
                let mut bytes = self.take(4)?;
                WireValue::Fixed32(bytes.get_u32_le())
            }
            other => {
                return Err(WireError::UnsupportedWireType {
                    tag,
                    wire_type: other,
                    offset: key_offset,
                });
            }
        };
        Ok(WireField::new(tag, value))
    }
}

impl<'a> Iterator for FieldReader<'a> {
    type Item = Result<WireField<'a>, WireError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset == self.buf.len() {
            return None;
        }
        let item = self.read_field();
        if item.is_err() {
            self.offset = self.buf.len();
        }
        Some(item)
    }
}
