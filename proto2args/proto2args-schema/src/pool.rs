//! Descriptor pool construction and lookup.

use std::collections::{HashMap, HashSet};

use prost::Message as _;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorSet,
    field_descriptor_proto::Label,
};

use crate::{
    descriptor::{EnumDescriptor, FieldDescriptor, FieldType, MessageDescriptor},
    error::SchemaError,
};

/// Runtime registry of message and enum descriptors, looked up by
/// fully-qualified name (no leading dot).
#[derive(Debug, Clone, Default)]
pub struct DescriptorPool {
    messages: HashMap<String, MessageDescriptor>,
    enums: HashMap<String, EnumDescriptor>,
}

impl DescriptorPool {
    /// Build a pool from serialized `FileDescriptorSet` bytes.
    pub fn from_descriptor_set_bytes(bytes: &[u8]) -> Result<Self, SchemaError> {
        let set = FileDescriptorSet::decode(bytes)
            .map_err(|source| SchemaError::DescriptorSetDecode { source })?;
        Ok(Self::from_descriptor_set(&set))
    }

    /// Build a pool from an in-memory `FileDescriptorSet`.
    pub fn from_descriptor_set(set: &FileDescriptorSet) -> Self {
        let mut pool = Self::default();
        let mut extensions = Vec::new();
        for file in &set.file {
            let package = file.package.as_deref().unwrap_or("");
            for message in &file.message_type {
                pool.register_message(package, message, &mut extensions);
            }
            for enum_proto in &file.enum_type {
                pool.register_enum(package, enum_proto);
            }
            extensions.extend(file.extension.iter().cloned());
        }
        pool.attach_extensions(&extensions);
        pool.resolve_type_names();
        pool
    }

    /// Message descriptor registered under `type_name`. A leading dot (the
    /// protoc absolute-reference marker) is tolerated.
    pub fn find_message(&self, type_name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(type_name.trim_start_matches('.'))
    }

    /// Enum descriptor registered under `type_name`.
    pub fn find_enum(&self, type_name: &str) -> Option<&EnumDescriptor> {
        self.enums.get(type_name.trim_start_matches('.'))
    }

    fn register_message(
        &mut self,
        prefix: &str,
        proto: &DescriptorProto,
        extensions: &mut Vec<FieldDescriptorProto>,
    ) {
        let Some(name) = proto.name.as_deref() else {
            return;
        };
        let full_name = qualify(prefix, name);

        let mut fields = HashMap::with_capacity(proto.field.len());
        for field in &proto.field {
            if let Some(descriptor) = field_from_proto(field, false) {
                fields.insert(descriptor.tag, descriptor);
            }
        }
        for nested in &proto.nested_type {
            self.register_message(&full_name, nested, extensions);
        }
        for enum_proto in &proto.enum_type {
            self.register_enum(&full_name, enum_proto);
        }
        extensions.extend(proto.extension.iter().cloned());

        self.messages
            .insert(full_name.clone(), MessageDescriptor { full_name, fields });
    }

    fn register_enum(&mut self, prefix: &str, proto: &EnumDescriptorProto) {
        let Some(name) = proto.name.as_deref() else {
            return;
        };
        let full_name = qualify(prefix, name);

        let mut names_by_number = HashMap::with_capacity(proto.value.len());
        for value in &proto.value {
            if let (Some(value_name), Some(number)) = (value.name.as_deref(), value.number) {
                names_by_number
                    .entry(number)
                    .or_insert_with(|| value_name.to_string());
            }
        }
        self.enums.insert(
            full_name.clone(),
            EnumDescriptor {
                full_name,
                names_by_number,
            },
        );
    }

    /// Attach extension fields to their extendee's descriptor. Extensions
    /// whose extendee cannot be found are dropped, matching the silent-skip
    /// policy for unrecognized schema content.
    fn attach_extensions(&mut self, extensions: &[FieldDescriptorProto]) {
        for proto in extensions {
            let Some(extendee) = proto.extendee.as_deref() else {
                continue;
            };
            let wanted = extendee.trim_start_matches('.');
            let target = if self.messages.contains_key(wanted) {
                wanted.to_string()
            } else if let Some(found) = unique_suffix_match(self.messages.keys(), wanted) {
                found
            } else {
                continue;
            };
            if let Some(descriptor) = field_from_proto(proto, true)
                && let Some(message) = self.messages.get_mut(&target)
            {
                message.fields.insert(descriptor.tag, descriptor);
            }
        }
    }

    /// Rewrite every field's type reference to a registered fully-qualified
    /// name where possible: exact match after stripping the leading dot,
    /// then unique-suffix match. Unresolvable references stay verbatim.
    fn resolve_type_names(&mut self) {
        let known: HashSet<String> = self
            .messages
            .keys()
            .chain(self.enums.keys())
            .cloned()
            .collect();
        for message in self.messages.values_mut() {
            for field in message.fields.values_mut() {
                let Some(reference) = field.resolved_type_name.as_deref() else {
                    continue;
                };
                if known.contains(reference) {
                    continue;
                }
                if let Some(found) = unique_suffix_match(known.iter(), reference) {
                    field.resolved_type_name = Some(found);
                }
            }
        }
    }
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Find the unique known name ending in `.{wanted}`. Returns `None` when no
/// name matches or the suffix is ambiguous.
fn unique_suffix_match<'a>(
    known: impl Iterator<Item = &'a String>,
    wanted: &str,
) -> Option<String> {
    let suffix = format!(".{wanted}");
    let mut found = None;
    for name in known {
        if name.ends_with(&suffix) {
            if found.is_some() {
                return None;
            }
            found = Some(name.clone());
        }
    }
    found
}

fn field_from_proto(proto: &FieldDescriptorProto, extension: bool) -> Option<FieldDescriptor> {
    let name = proto.name.clone()?;
    let tag = u32::try_from(proto.number?).ok()?;
    let resolved_type_name = proto
        .type_name
        .as_deref()
        .map(|reference| reference.trim_start_matches('.').to_string());
    Some(FieldDescriptor {
        name,
        tag,
        field_type: FieldType::from_proto(proto.r#type()),
        repeated: proto.label() == Label::Repeated,
        extension,
        resolved_type_name,
    })
}
