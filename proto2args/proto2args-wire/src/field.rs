//! Decoded wire fields and their typed accessors.

use std::borrow::Cow;

/// Raw payload of one wire field, classified by wire type only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireValue<'a> {
    /// Wire type 0.
    Varint(u64),
    /// Wire type 1.
    Fixed64(u64),
    /// Wire type 2.
    LengthDelimited(&'a [u8]),
    /// Wire type 5.
    Fixed32(u32),
}

/// One decoded `(tag, raw value)` unit from a message body.
///
/// The wire format does not record declared types, so the accessors
/// reinterpret the stored payload for whichever schema type the caller
/// resolved. An accessor applied to a payload of the wrong wire shape
/// returns the zero/empty value of the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireField<'a> {
    pub tag: u32,
    pub value: WireValue<'a>,
}

impl<'a> WireField<'a> {
    pub fn new(tag: u32, value: WireValue<'a>) -> Self {
        Self { tag, value }
    }

    fn raw_bits(&self) -> u64 {
        match self.value {
            WireValue::Varint(v) | WireValue::Fixed64(v) => v,
            WireValue::Fixed32(v) => u64::from(v),
            WireValue::LengthDelimited(_) => 0,
        }
    }

    pub fn as_uint64(&self) -> u64 {
        self.raw_bits()
    }

    pub fn as_uint32(&self) -> u32 {
        self.raw_bits() as u32
    }

    pub fn as_int64(&self) -> i64 {
        self.raw_bits() as i64
    }

    pub fn as_int32(&self) -> i32 {
        self.raw_bits() as i32
    }

    pub fn as_sint32(&self) -> i32 {
        zigzag(self.raw_bits()) as i32
    }

    pub fn as_sint64(&self) -> i64 {
        zigzag(self.raw_bits())
    }

    pub fn as_bool(&self) -> bool {
        self.raw_bits() != 0
    }

    pub fn as_double(&self) -> f64 {
        match self.value {
            WireValue::Fixed64(v) => f64::from_bits(v),
            WireValue::Fixed32(v) => f64::from(f32::from_bits(v)),
            _ => 0.0,
        }
    }

    pub fn as_float(&self) -> f32 {
        match self.value {
            WireValue::Fixed32(v) => f32::from_bits(v),
            _ => 0.0,
        }
    }

    /// Length-delimited payload; for message-typed fields this is the
    /// embedded message body.
    pub fn as_bytes(&self) -> &'a [u8] {
        match self.value {
            WireValue::LengthDelimited(b) => b,
            _ => &[],
        }
    }

    /// Payload as UTF-8 text, replacing invalid sequences.
    pub fn as_string(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

fn zigzag(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}
