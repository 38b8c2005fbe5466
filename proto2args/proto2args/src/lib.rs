//! Schema-driven decoding of protobuf-encoded trace messages into flat,
//! typed key/value argument records.
//!
//! [`ArgsParser`] resolves a message type by name in a
//! [`DescriptorPool`](proto2args_schema::DescriptorPool), walks the raw wire
//! fields of a payload, and emits one typed value per leaf field through an
//! [`ArgSink`](proto2args_core::ArgSink), building dotted argument paths as
//! it descends into nested messages. Per-path [`FieldOverride`] handlers can
//! take over the decoding of individual fields.

mod error;
mod overrides;
mod parser;
mod path;

pub use error::ParseError;
pub use overrides::{FieldOverride, OverrideRegistry};
pub use parser::{ArgsParser, MAX_NESTING_DEPTH};
pub use path::{KeyPathBuilder, PathMark};

pub use proto2args_core as core;
pub use proto2args_schema as schema;
pub use proto2args_wire as wire;
