//! Runtime protobuf schema registry for proto2args.
//!
//! [`DescriptorPool`] indexes the message, enum, and extension descriptors
//! of a serialized `google.protobuf.FileDescriptorSet` by fully-qualified
//! name, so message types can be resolved at decode time rather than
//! compile time. The pool does not validate schema well-formedness; broken
//! type references are kept verbatim and surface (or fall back) at lookup
//! time.

mod descriptor;
mod error;
mod pool;

pub use descriptor::{EnumDescriptor, FieldDescriptor, FieldType, MessageDescriptor};
pub use error::SchemaError;
pub use pool::DescriptorPool;
