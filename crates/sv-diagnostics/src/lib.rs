//! Error handling and diagnostics for the sv-rust frontend.
//!
//! This crate provides:
//! - Source location tracking (`FileId`, `Span`, `SourceLocation`)
//! - Byte offset to line/column mapping (`LineMap`)
//! - The lexical diagnostic code taxonomy (`DiagCode`)
//! - An append-only diagnostic collector (`DiagnosticSink`)
//!
//! Diagnostics are accumulated, never thrown. Each code carries an implicit
//! severity; emission order matches source order.

use miette::{Diagnostic, SourceSpan};
use std::fmt;
use thiserror::Error;

/// A file identifier for tracking source files.
///
/// The mapping from `FileId` to an on-disk path is owned by an external
/// file tracker; nothing in this crate touches the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileId(pub u32);

impl FileId {
    /// The dummy/unknown file ID.
    pub const DUMMY: Self = Self(0);

    /// Check if this is a valid (non-dummy) file ID.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

/// A span in source code (start and end byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: u32,
    /// End byte offset (exclusive)
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A zero-length span at the given offset.
    #[must_use]
    pub const fn point(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// The empty/unknown span.
    pub const DUMMY: Self = Self { start: 0, end: 0 };

    /// Check if this span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Get the length of this span in bytes.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Combine two spans into one that covers both.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end { self.end } else { other.end };
        Self { start, end }
    }

    /// Convert to miette's `SourceSpan`.
    #[must_use]
    pub fn to_source_span(self) -> SourceSpan {
        SourceSpan::new(
            miette::SourceOffset::from(self.start as usize),
            self.len() as usize,
        )
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        span.to_source_span()
    }
}

/// A resolved source location: file, 1-indexed line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    pub file: FileId,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number in bytes (1-indexed).
    pub column: u32,
}

impl SourceLocation {
    #[must_use]
    pub const fn new(file: FileId, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Byte offset to line/column mapping for one source buffer.
///
/// Built once per lexer session from the source text; lookups binary-search
/// the table of line-start offsets.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the first character of each line. `line_starts[0] == 0`.
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build the line table from source bytes.
    ///
    /// A `\r\n` pair starts the next line after the `\n`; a lone `\r` or `\n`
    /// starts it immediately after itself.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        let mut line_starts = vec![0u32];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    line_starts.push(i as u32 + 1);
                }
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line_starts.push(i as u32 + 1);
                }
                _ => {}
            }
            i += 1;
        }
        Self { line_starts }
    }

    /// Resolve a byte offset to a 1-indexed line/column location.
    ///
    /// Offsets past the end of the source resolve to the last line.
    #[must_use]
    pub fn location(&self, file: FileId, offset: u32) -> SourceLocation {
        let line_idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let column = offset - self.line_starts[line_idx] + 1;
        SourceLocation::new(file, line_idx as u32 + 1, column)
    }

    /// Number of lines in the source.
    #[must_use]
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// Lexical diagnostic codes.
///
/// Severity is implicit in the code. Every code recovers locally in the
/// lexer; none of them abort lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagCode {
    UnicodeBom,
    Utf8Char,
    NonPrintableChar,
    EmbeddedNull,
    UnterminatedStringLiteral,
    NewlineInStringLiteral,
    OctalEscapeCodeTooBig,
    InvalidHexEscapeCode,
    UnknownEscapeCode,
    EscapedWhitespace,
    MisplacedDirectiveChar,
    MissingFractionalDigits,
    MissingExponentDigits,
    RealExponentTooLarge,
    SignedLiteralTooLarge,
    IntegerSizeZero,
    IntegerSizeTooLarge,
    MissingVectorBase,
    MissingVectorDigits,
    InvalidUnsizedLiteral,
    UnterminatedBlockComment,
    NestedBlockComment,
    SplitBlockCommentInDirective,
}

impl DiagCode {
    /// Human-readable message for this code.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            DiagCode::UnicodeBom => "Unicode byte order mark at start of file",
            DiagCode::Utf8Char => "UTF-8 sequence in source text",
            DiagCode::NonPrintableChar => "non-printable character in source text",
            DiagCode::EmbeddedNull => "embedded NUL in source text",
            DiagCode::UnterminatedStringLiteral => "unterminated string literal",
            DiagCode::NewlineInStringLiteral => "newline in string literal",
            DiagCode::OctalEscapeCodeTooBig => "octal escape code is too large for a byte",
            DiagCode::InvalidHexEscapeCode => "\\x escape must be followed by a hex digit",
            DiagCode::UnknownEscapeCode => "unknown character escape sequence",
            DiagCode::EscapedWhitespace => "escaped identifier cannot start with whitespace",
            DiagCode::MisplacedDirectiveChar => "` without directive name",
            DiagCode::MissingFractionalDigits => "expected digits after decimal point",
            DiagCode::MissingExponentDigits => "expected exponent digits",
            DiagCode::RealExponentTooLarge => "real literal exponent is too large",
            DiagCode::SignedLiteralTooLarge => "signed integer literal exceeds 32 bits",
            DiagCode::IntegerSizeZero => "size of vector literal cannot be zero",
            DiagCode::IntegerSizeTooLarge => "size of vector literal is too large",
            DiagCode::MissingVectorBase => "expected base specifier after size",
            DiagCode::MissingVectorDigits => "expected digits after base specifier",
            DiagCode::InvalidUnsizedLiteral => "invalid unsized literal",
            DiagCode::UnterminatedBlockComment => "unterminated /* comment",
            DiagCode::NestedBlockComment => "nested block comments are not allowed",
            DiagCode::SplitBlockCommentInDirective => {
                "block comment inside a directive cannot span lines"
            }
        }
    }

    /// The implicit severity of this code.
    #[must_use]
    pub fn severity(self) -> Severity {
        Severity::Error
    }
}

impl fmt::Display for DiagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A recorded lexical error with its location.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{code} at {location}")]
pub struct SyntaxError {
    pub code: DiagCode,
    pub location: SourceLocation,
    #[label("{code}")]
    pub span: SourceSpan,
}

impl SyntaxError {
    #[must_use]
    pub fn new(code: DiagCode, location: SourceLocation, span: Span) -> Self {
        Self {
            code,
            location,
            span: span.into(),
        }
    }
}

/// Append-only collector for lexical diagnostics.
///
/// Single writer per lexing session; readers see errors in source order.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    errors: Vec<SyntaxError>,
}

impl DiagnosticSink {
    /// Create a new empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn add(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }

    /// Record a diagnostic from its parts.
    pub fn add_code(&mut self, code: DiagCode, location: SourceLocation, span: Span) {
        self.add(SyntaxError::new(code, location, span));
    }

    /// All recorded diagnostics, in emission order.
    #[must_use]
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Just the codes, in emission order.
    #[must_use]
    pub fn codes(&self) -> Vec<DiagCode> {
        self.errors.iter().map(|e| e.code).collect()
    }

    /// Check if any diagnostics were recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let a = Span::new(2, 5);
        let b = Span::new(4, 9);
        assert_eq!(a.merge(b), Span::new(2, 9));
        assert_eq!(b.merge(a), Span::new(2, 9));
    }

    #[test]
    fn test_span_len() {
        assert_eq!(Span::new(3, 7).len(), 4);
        assert!(Span::point(3).is_empty());
    }

    #[test]
    fn test_line_map_single_line() {
        let map = LineMap::new(b"hello");
        let loc = map.location(FileId(1), 3);
        assert_eq!(loc.line, 1);
        assert_eq!(loc.column, 4);
    }

    #[test]
    fn test_line_map_lf() {
        let map = LineMap::new(b"ab\ncd\nef");
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.location(FileId(1), 0).line, 1);
        assert_eq!(map.location(FileId(1), 2).line, 1);
        assert_eq!(map.location(FileId(1), 3).line, 2);
        assert_eq!(map.location(FileId(1), 3).column, 1);
        assert_eq!(map.location(FileId(1), 7).line, 3);
        assert_eq!(map.location(FileId(1), 7).column, 2);
    }

    #[test]
    fn test_line_map_crlf() {
        let map = LineMap::new(b"ab\r\ncd");
        assert_eq!(map.line_count(), 2);
        // The \r and \n both belong to line 1
        assert_eq!(map.location(FileId(1), 2).line, 1);
        assert_eq!(map.location(FileId(1), 3).line, 1);
        assert_eq!(map.location(FileId(1), 4).line, 2);
        assert_eq!(map.location(FileId(1), 4).column, 1);
    }

    #[test]
    fn test_line_map_lone_cr() {
        let map = LineMap::new(b"ab\rcd");
        assert_eq!(map.line_count(), 2);
        assert_eq!(map.location(FileId(1), 3).line, 2);
    }

    #[test]
    fn test_line_map_offset_past_end() {
        let map = LineMap::new(b"ab\ncd");
        let loc = map.location(FileId(1), 100);
        assert_eq!(loc.line, 2);
    }

    #[test]
    fn test_sink_preserves_order() {
        let mut sink = DiagnosticSink::new();
        let loc = SourceLocation::new(FileId(1), 1, 1);
        sink.add_code(DiagCode::UnicodeBom, loc, Span::new(0, 3));
        sink.add_code(DiagCode::EmbeddedNull, loc, Span::new(5, 6));
        assert_eq!(
            sink.codes(),
            vec![DiagCode::UnicodeBom, DiagCode::EmbeddedNull]
        );
        assert!(sink.has_errors());
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_diag_code_messages_are_distinct() {
        let codes = [
            DiagCode::UnterminatedStringLiteral,
            DiagCode::NewlineInStringLiteral,
            DiagCode::MissingVectorBase,
            DiagCode::MissingVectorDigits,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a.message(), b.message());
            }
        }
    }
}
