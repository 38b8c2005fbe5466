//! Error type for wire-format reading.

/// Error surfaced while walking a wire-format message body.
///
/// Offsets are byte positions into the span the reader was created over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The buffer ended inside a field key, varint, or payload.
    #[error("truncated field at byte {offset}")]
    Truncated { offset: usize },

    /// A varint ran past the 10-byte maximum.
    #[error("varint longer than 10 bytes at byte {offset}")]
    VarintTooLong { offset: usize },

    /// A field key carried tag 0, which the wire format reserves.
    #[error("field key with reserved tag 0 at byte {offset}")]
    ZeroTag { offset: usize },

    /// A wire type with no supported payload shape (groups and the two
    /// unassigned values).
    #[error("unsupported wire type {wire_type} for tag {tag} at byte {offset}")]
    UnsupportedWireType {
        tag: u32,
        wire_type: u8,
        offset: usize,
    },
}
