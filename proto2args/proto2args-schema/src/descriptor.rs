//! Descriptor types resolved from a `FileDescriptorSet`.

use std::collections::HashMap;

use prost_types::field_descriptor_proto::Type as ProtoType;

/// Declared protobuf field type, as written in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

impl FieldType {
    pub(crate) fn from_proto(proto: ProtoType) -> Self {
        match proto {
            ProtoType::Double => Self::Double,
            ProtoType::Float => Self::Float,
            ProtoType::Int64 => Self::Int64,
            ProtoType::Uint64 => Self::Uint64,
            ProtoType::Int32 => Self::Int32,
            ProtoType::Fixed64 => Self::Fixed64,
            ProtoType::Fixed32 => Self::Fixed32,
            ProtoType::Bool => Self::Bool,
            ProtoType::String => Self::String,
            ProtoType::Group => Self::Group,
            ProtoType::Message => Self::Message,
            ProtoType::Bytes => Self::Bytes,
            ProtoType::Uint32 => Self::Uint32,
            ProtoType::Enum => Self::Enum,
            ProtoType::Sfixed32 => Self::Sfixed32,
            ProtoType::Sfixed64 => Self::Sfixed64,
            ProtoType::Sint32 => Self::Sint32,
            ProtoType::Sint64 => Self::Sint64,
        }
    }

    /// Raw `FieldDescriptorProto.type` tag of this declared type.
    pub fn proto_tag(self) -> i32 {
        match self {
            Self::Double => 1,
            Self::Float => 2,
            Self::Int64 => 3,
            Self::Uint64 => 4,
            Self::Int32 => 5,
            Self::Fixed64 => 6,
            Self::Fixed32 => 7,
            Self::Bool => 8,
            Self::String => 9,
            Self::Group => 10,
            Self::Message => 11,
            Self::Bytes => 12,
            Self::Uint32 => 13,
            Self::Enum => 14,
            Self::Sfixed32 => 15,
            Self::Sfixed64 => 16,
            Self::Sint32 => 17,
            Self::Sint64 => 18,
        }
    }
}

/// One field of a message type, including extensions attached to it.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub(crate) name: String,
    pub(crate) tag: u32,
    pub(crate) field_type: FieldType,
    pub(crate) repeated: bool,
    pub(crate) extension: bool,
    pub(crate) resolved_type_name: Option<String>,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> u32 {
        self.tag
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    pub fn is_extension(&self) -> bool {
        self.extension
    }

    /// Fully-qualified name of the message or enum type this field refers
    /// to, or the verbatim reference when resolution failed. `None` for
    /// scalar fields.
    pub fn resolved_type_name(&self) -> Option<&str> {
        self.resolved_type_name.as_deref()
    }
}

/// Message type descriptor: fields and attached extensions, keyed by tag.
#[derive(Debug, Clone, Default)]
pub struct MessageDescriptor {
    pub(crate) full_name: String,
    pub(crate) fields: HashMap<u32, FieldDescriptor>,
}

impl MessageDescriptor {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn find_field_by_tag(&self, tag: u32) -> Option<&FieldDescriptor> {
        self.fields.get(&tag)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }
}

/// Enum type descriptor: value number to symbolic name.
#[derive(Debug, Clone, Default)]
pub struct EnumDescriptor {
    pub(crate) full_name: String,
    pub(crate) names_by_number: HashMap<i32, String>,
}

impl EnumDescriptor {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Symbolic name declared for `number`, if any. With aliased values the
    /// first declaration wins.
    pub fn find_name(&self, number: i32) -> Option<&str> {
        self.names_by_number.get(&number).map(String::as_str)
    }
}
