//! Error taxonomy for argument parsing.

use proto2args_wire::WireError;

/// Fatal error aborting an argument parse.
///
/// Recoverable conditions (unknown field tags, fields excluded by an
/// allowlist, enum values without a symbolic name) are handled inline by
/// the parser and never surface here. There is no partial-success variant:
/// a parse either completes or returns the first fatal error, and emissions
/// made before the failure are not rolled back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The requested message type has no descriptor in the pool.
    #[error("no descriptor registered for message type '{type_name}'")]
    SchemaNotFound { type_name: String },

    /// A field's declared type has no argument emission.
    #[error("field '{field}' in message '{message}' has unsupported declared type {type_tag}")]
    UnsupportedFieldType {
        field: String,
        message: String,
        /// Raw `FieldDescriptorProto.type` tag of the declared type.
        type_tag: i32,
    },

    /// Message nesting deeper than [`MAX_NESTING_DEPTH`](crate::MAX_NESTING_DEPTH).
    #[error("message nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    /// The wire reader hit malformed bytes.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// An override handler reported a failure.
    #[error("override handler failed: {message}")]
    Override { message: String },
}
