//! Sentinel-terminated source buffer.
//!
//! The buffer owns the source bytes with a single `0x00` byte appended. The
//! sentinel lets the scanner detect end of input without bounds checks on
//! the hot path; an interior NUL is distinguished from the sentinel by
//! comparing the read position against the source length.

use sv_diagnostics::Span;

/// An immutable, NUL-terminated source buffer.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Source bytes followed by the `0x00` sentinel.
    buf: Vec<u8>,
    /// Length of the source content, excluding the sentinel.
    source_len: u32,
}

impl SourceBuffer {
    /// Copy source text into a sentinel-terminated buffer.
    pub fn new(source: &str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    /// Copy raw source bytes into a sentinel-terminated buffer.
    ///
    /// The input need not be valid UTF-8: BOM detection and the lexer's
    /// malformed-sequence recovery operate below the string level.
    pub fn from_bytes(source: &[u8]) -> Self {
        let mut buf = Vec::with_capacity(source.len() + 1);
        buf.extend_from_slice(source);
        buf.push(0);
        Self {
            buf,
            source_len: u32::try_from(source.len()).unwrap_or(u32::MAX),
        }
    }

    /// Length of the source content in bytes (excludes the sentinel).
    #[must_use]
    pub fn len(&self) -> u32 {
        self.source_len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// The source bytes, without the sentinel.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// The full buffer including the sentinel.
    #[must_use]
    pub(crate) fn sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Slice the source at a span.
    #[must_use]
    pub fn bytes(&self, span: Span) -> &[u8] {
        &self.buf[span.start as usize..span.end as usize]
    }

    /// Slice the source at a span as text.
    ///
    /// The span must cover valid UTF-8, which holds for every span of a
    /// token the lexer classified (anything else comes out as `Unknown`
    /// and should go through [`text_lossy`](Self::text_lossy)).
    #[must_use]
    pub fn text(&self, span: Span) -> &str {
        std::str::from_utf8(self.bytes(span)).expect("token span covers valid UTF-8")
    }

    /// Slice the source at a span, replacing invalid sequences.
    #[must_use]
    pub fn text_lossy(&self, span: Span) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(self.bytes(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_present() {
        let buf = SourceBuffer::new("abc");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.sentinel_bytes().len(), 4);
        assert_eq!(buf.sentinel_bytes()[3], 0);
    }

    #[test]
    fn test_empty_source() {
        let buf = SourceBuffer::new("");
        assert!(buf.is_empty());
        assert_eq!(buf.sentinel_bytes(), &[0]);
    }

    #[test]
    fn test_text_slicing() {
        let buf = SourceBuffer::new("hello world");
        assert_eq!(buf.text(Span::new(0, 5)), "hello");
        assert_eq!(buf.text(Span::new(6, 11)), "world");
    }

    #[test]
    fn test_from_bytes_accepts_invalid_utf8() {
        let buf = SourceBuffer::from_bytes(&[0xFF, 0xFE, b'a']);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.text_lossy(Span::new(2, 3)), "a");
    }

    #[test]
    fn test_interior_nul_kept() {
        let buf = SourceBuffer::new("a\0b");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.as_bytes(), b"a\0b");
    }
}
