//! Typed owned values for decoded arguments.

use std::{fmt, sync::Arc};

/// Value of one decoded argument, mirroring the [`ArgSink`](crate::ArgSink)
/// capability set.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Integer(i64),
    UnsignedInteger(u64),
    Boolean(bool),
    Double(f64),
    String(Arc<str>),
}

impl ArgValue {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Integer(v) => write!(f, "{v}"),
            ArgValue::UnsignedInteger(v) => write!(f, "{v}"),
            ArgValue::Boolean(v) => write!(f, "{v}"),
            ArgValue::Double(v) => write!(f, "{v}"),
            ArgValue::String(s) => f.write_str(s),
        }
    }
}
