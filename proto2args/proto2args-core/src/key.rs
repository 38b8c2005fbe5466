//! Argument path pair emitted with every decoded value.

/// Dotted argument path identifying one decoded field.
///
/// `flat_key` uses bare field names only; `key` additionally carries a
/// bracketed occurrence index for every repeated field on the path, so a
/// field may emit `flat_key = "events.name"` together with
/// `key = "events[2].name"`. Both are owned snapshots taken at the moment of
/// emission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Key {
    pub flat_key: String,
    pub key: String,
}

impl Key {
    pub fn new(flat_key: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            flat_key: flat_key.into(),
            key: key.into(),
        }
    }

    /// Key for a path with no repeated fields, where both forms coincide.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            flat_key: path.clone(),
            key: path,
        }
    }
}
