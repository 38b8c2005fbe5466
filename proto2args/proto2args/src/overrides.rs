//! Per-path override handlers that replace default field decoding.

use std::collections::HashMap;

use proto2args_core::{ArgSink, Key};
use proto2args_wire::WireField;

use crate::error::ParseError;

/// Handler owning the decoding of one argument path.
///
/// When a handler is registered for a field's flat key it fully replaces
/// default processing of that field, including recursion into message-typed
/// fields, and its verdict becomes the field's parse result. Handlers run
/// synchronously on the parse stack and must not retain `key` beyond the
/// call.
pub trait FieldOverride {
    fn parse_field(
        &self,
        key: &Key,
        field: &WireField<'_>,
        sink: &mut dyn ArgSink,
    ) -> Result<(), ParseError>;
}

impl<F> FieldOverride for F
where
    F: Fn(&Key, &WireField<'_>, &mut dyn ArgSink) -> Result<(), ParseError>,
{
    fn parse_field(
        &self,
        key: &Key,
        field: &WireField<'_>,
        sink: &mut dyn ArgSink,
    ) -> Result<(), ParseError> {
        self(key, field, sink)
    }
}

/// Exact-path registry of [`FieldOverride`] handlers.
///
/// Paths are matched against the flat key, exactly; there is no prefix or
/// wildcard matching. Registering a path twice keeps the later handler.
#[derive(Default)]
pub struct OverrideRegistry {
    handlers: HashMap<String, Box<dyn FieldOverride>>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, path: impl Into<String>, handler: impl FieldOverride + 'static) {
        self.handlers.insert(path.into(), Box::new(handler));
    }

    pub fn lookup(&self, path: &str) -> Option<&dyn FieldOverride> {
        self.handlers.get(path).map(|handler| handler.as_ref())
    }
}
