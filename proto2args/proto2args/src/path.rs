//! Dotted argument-path state shared by both key forms.

use proto2args_core::Key;

/// Pre-push buffer lengths recorded by [`KeyPathBuilder::push_segments`].
#[derive(Debug, Clone, Copy)]
pub struct PathMark {
    flat_len: usize,
    key_len: usize,
}

/// Builds the `flat_key`/`key` path pair incrementally while the parser
/// descends into nested messages.
///
/// Both buffers always describe the path of the field currently being
/// processed. Every push must be paired with a truncation back to the
/// recorded mark when the field's scope ends; the parser guarantees this
/// with a drop guard so the pairing holds on error paths too.
#[derive(Debug, Default)]
pub struct KeyPathBuilder {
    flat_key: String,
    key: String,
}

impl KeyPathBuilder {
    pub fn new() -> Self {
        // Typical argument paths fit without reallocation.
        const DEFAULT_CAPACITY: usize = 64;
        Self {
            flat_key: String::with_capacity(DEFAULT_CAPACITY),
            key: String::with_capacity(DEFAULT_CAPACITY),
        }
    }

    pub fn flat_key(&self) -> &str {
        &self.flat_key
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Owned snapshot of both paths, for emission.
    pub fn snapshot(&self) -> Key {
        Key::new(self.flat_key.clone(), self.key.clone())
    }

    /// Append one segment to each buffer, dot-separated unless the buffer
    /// is empty. The flat segment never carries a repeated-field index; the
    /// key segment may.
    pub fn push_segments(&mut self, flat_segment: &str, key_segment: &str) -> PathMark {
        let mark = PathMark {
            flat_len: self.flat_key.len(),
            key_len: self.key.len(),
        };
        append(&mut self.flat_key, flat_segment);
        append(&mut self.key, key_segment);
        mark
    }

    /// Truncate both buffers back to a mark returned by
    /// [`push_segments`](Self::push_segments).
    pub fn truncate_to(&mut self, mark: PathMark) {
        self.flat_key.truncate(mark.flat_len);
        self.key.truncate(mark.key_len);
    }
}

fn append(buf: &mut String, segment: &str) {
    if !buf.is_empty() {
        buf.push('.');
    }
    buf.push_str(segment);
}
