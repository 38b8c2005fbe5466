//! Low-level protobuf wire-format reading.
//!
//! [`FieldReader`] walks one message body lazily, yielding a [`WireField`]
//! per encoded field in wire order. Payloads are classified by wire type
//! only; interpretation happens when a typed accessor on [`WireField`] is
//! called with the declared schema type in hand.

mod error;
mod field;
mod reader;

pub use error::WireError;
pub use field::{WireField, WireValue};
pub use reader::FieldReader;
