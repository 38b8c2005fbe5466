//! Error type for descriptor pool construction.

/// Error building a [`DescriptorPool`](crate::DescriptorPool).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema bytes are not a valid serialized `FileDescriptorSet`.
    #[error("failed to decode FileDescriptorSet: {source}")]
    DescriptorSetDecode {
        #[source]
        source: prost::DecodeError,
    },
}
