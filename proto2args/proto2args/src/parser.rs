//! Recursive schema-driven argument parsing.

use std::{
    collections::{HashMap, HashSet},
    ops::{Deref, DerefMut},
};

use proto2args_core::{ArgSink, Key};
use proto2args_schema::{DescriptorPool, FieldDescriptor, FieldType, MessageDescriptor};
use proto2args_wire::{FieldReader, WireField};

use crate::{
    error::ParseError,
    overrides::{FieldOverride, OverrideRegistry},
    path::{KeyPathBuilder, PathMark},
};

/// Defensive bound on message nesting. Traces can come from untrusted
/// producers, so recursion depth must not be payload-controlled.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Decodes wire-format payloads into typed argument emissions using runtime
/// schema lookups.
///
/// An instance holds the in-progress path buffers, so it must not be shared
/// across threads; use one parser per thread or serialize access
/// externally. A parse call runs to completion on the calling stack, and
/// sinks must not re-enter the parser that is emitting to them.
pub struct ArgsParser<'p> {
    pool: &'p DescriptorPool,
    overrides: OverrideRegistry,
    prefix: KeyPathBuilder,
}

impl<'p> ArgsParser<'p> {
    pub fn new(pool: &'p DescriptorPool) -> Self {
        Self {
            pool,
            overrides: OverrideRegistry::new(),
            prefix: KeyPathBuilder::new(),
        }
    }

    /// Register `handler` for the exact flat-key path `path`.
    ///
    /// A matching handler owns the whole field: default decoding is
    /// skipped, including recursion into message-typed fields. Registering
    /// the same path again replaces the previous handler.
    pub fn add_override(&mut self, path: impl Into<String>, handler: impl FieldOverride + 'static) {
        self.overrides.register(path, handler);
    }

    /// Decode `data` as one message of type `type_name`, emitting every
    /// decoded leaf field through `sink`.
    ///
    /// `allowed_tags` restricts which fields of the top-level message are
    /// decoded; extension fields bypass it, and it never applies to nested
    /// messages. Wire fields with no descriptor are skipped silently.
    /// Errors are fail-fast: the first fatal condition aborts the call, and
    /// emissions made before it are not rolled back.
    pub fn parse_message(
        &mut self,
        data: &[u8],
        type_name: &str,
        allowed_tags: Option<&HashSet<u32>>,
        sink: &mut dyn ArgSink,
    ) -> Result<(), ParseError> {
        self.parse_message_at_depth(data, type_name, allowed_tags, sink, 0)
    }

    fn parse_message_at_depth(
        &mut self,
        data: &[u8],
        type_name: &str,
        allowed_tags: Option<&HashSet<u32>>,
        sink: &mut dyn ArgSink,
        depth: usize,
    ) -> Result<(), ParseError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        let pool = self.pool;
        let Some(descriptor) = pool.find_message(type_name) else {
            return Err(ParseError::SchemaNotFound {
                type_name: type_name.to_string(),
            });
        };

        // Occurrence counters for repeated fields, scoped to this message
        // frame; sibling and nested frames count independently.
        let mut repeated_index: HashMap<u32, usize> = HashMap::new();

        for result in FieldReader::new(data) {
            let wire_field = result?;
            let Some(field) = descriptor.find_field_by_tag(wire_field.tag) else {
                // Unknown field, possibly an unrecognized extension.
                continue;
            };
            let is_allowed = field.is_extension()
                || allowed_tags.is_none_or(|tags| tags.contains(&wire_field.tag));
            if !is_allowed {
                continue;
            }
            let index = repeated_index.get(&wire_field.tag).copied().unwrap_or(0);
            self.parse_field(descriptor, field, index, wire_field, sink, depth)?;
            if field.is_repeated() {
                *repeated_index.entry(wire_field.tag).or_insert(0) += 1;
            }
        }
        Ok(())
    }

    fn parse_field(
        &mut self,
        message: &MessageDescriptor,
        field: &FieldDescriptor,
        repeated_index: usize,
        wire_field: WireField<'_>,
        sink: &mut dyn ArgSink,
        depth: usize,
    ) -> Result<(), ParseError> {
        // The key segment carries the occurrence index for repeated fields;
        // the flat segment is always the bare name.
        let mut scope = if field.is_repeated() {
            let segment = format!("{}[{repeated_index}]", field.name());
            ScopedPrefix::push(self, field.name(), &segment)
        } else {
            ScopedPrefix::push(self, field.name(), field.name())
        };

        if let Some(result) = scope.maybe_apply_override(&wire_field, sink) {
            return result;
        }

        if field.field_type() == FieldType::Message {
            let type_name = field.resolved_type_name().unwrap_or_default();
            return scope.parse_message_at_depth(
                wire_field.as_bytes(),
                type_name,
                None,
                sink,
                depth + 1,
            );
        }

        scope.parse_simple_field(message, field, &wire_field, sink)
    }

    /// Run the override registered for the current flat key, if any.
    ///
    /// `None` means no handler is registered and default processing should
    /// proceed; `Some` is the handler's verdict, returned verbatim.
    fn maybe_apply_override(
        &self,
        wire_field: &WireField<'_>,
        sink: &mut dyn ArgSink,
    ) -> Option<Result<(), ParseError>> {
        let handler = self.overrides.lookup(self.prefix.flat_key())?;
        let key = self.prefix.snapshot();
        Some(handler.parse_field(&key, wire_field, sink))
    }

    fn parse_simple_field(
        &self,
        message: &MessageDescriptor,
        field: &FieldDescriptor,
        wire_field: &WireField<'_>,
        sink: &mut dyn ArgSink,
    ) -> Result<(), ParseError> {
        let key = self.prefix.snapshot();
        match field.field_type() {
            FieldType::Int32 | FieldType::Sfixed32 | FieldType::Fixed32 => {
                sink.add_integer(key, i64::from(wire_field.as_int32()));
            }
            FieldType::Sint32 => sink.add_integer(key, i64::from(wire_field.as_sint32())),
            FieldType::Int64 | FieldType::Sfixed64 | FieldType::Fixed64 => {
                sink.add_integer(key, wire_field.as_int64());
            }
            FieldType::Sint64 => sink.add_integer(key, wire_field.as_sint64()),
            FieldType::Uint32 => {
                sink.add_unsigned_integer(key, u64::from(wire_field.as_uint32()));
            }
            FieldType::Uint64 => sink.add_unsigned_integer(key, wire_field.as_uint64()),
            FieldType::Bool => sink.add_boolean(key, wire_field.as_bool()),
            FieldType::Double => sink.add_double(key, wire_field.as_double()),
            FieldType::Float => sink.add_double(key, f64::from(wire_field.as_float())),
            FieldType::String | FieldType::Bytes => {
                sink.add_string(key, &wire_field.as_string());
            }
            FieldType::Enum => self.emit_enum(key, field, wire_field, sink),
            unsupported @ (FieldType::Group | FieldType::Message) => {
                return Err(ParseError::UnsupportedFieldType {
                    field: field.name().to_string(),
                    message: message.full_name().to_string(),
                    type_tag: unsupported.proto_tag(),
                });
            }
        }
        Ok(())
    }

    /// Emit an enum field: the symbolic name when both the enum type and
    /// the value resolve, otherwise the raw integer. Never fails.
    fn emit_enum(
        &self,
        key: Key,
        field: &FieldDescriptor,
        wire_field: &WireField<'_>,
        sink: &mut dyn ArgSink,
    ) {
        let number = wire_field.as_int32();
        let symbol = field
            .resolved_type_name()
            .and_then(|name| self.pool.find_enum(name))
            .and_then(|descriptor| descriptor.find_name(number));
        match symbol {
            Some(name) => sink.add_string(key, name),
            None => sink.add_integer(key, i64::from(number)),
        }
    }
}

/// RAII scope for one path segment pair.
///
/// Pushing appends the segments; dropping truncates both buffers back to
/// their pre-push lengths, so the prefix is restored on success, early
/// return, and error propagation alike. The guard is the only route to the
/// parser while the segment is live.
struct ScopedPrefix<'a, 'p> {
    parser: &'a mut ArgsParser<'p>,
    mark: PathMark,
}

impl<'a, 'p> ScopedPrefix<'a, 'p> {
    fn push(parser: &'a mut ArgsParser<'p>, flat_segment: &str, key_segment: &str) -> Self {
        let mark = parser.prefix.push_segments(flat_segment, key_segment);
        Self { parser, mark }
    }
}

impl<'p> Deref for ScopedPrefix<'_, 'p> {
    type Target = ArgsParser<'p>;

    fn deref(&self) -> &Self::Target {
        &*self.parser
    }
}

impl DerefMut for ScopedPrefix<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.parser
    }
}

impl Drop for ScopedPrefix<'_, '_> {
    fn drop(&mut self) {
        self.parser.prefix.truncate_to(self.mark);
    }
}
