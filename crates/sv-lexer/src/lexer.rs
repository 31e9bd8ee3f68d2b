//! The SystemVerilog lexer.
//!
//! A pull-based tokenizer bound to one source buffer. Each call to
//! [`Lexer::lex`] produces exactly one token with its leading trivia
//! attached; the stream always terminates with `EndOfFile`. Ill-formed
//! input never aborts lexing: every problem is reported to the diagnostic
//! sink and recovered locally by skipping, clamping, or emitting an
//! `Unknown` token.
//!
//! Inside `` `directive `` lines newlines are significant: trivia scanning
//! stops at an unescaped newline and `lex` emits an `EndOfDirective` token
//! before returning to normal lexing.

use crate::arena::{Arena, PayloadRef};
use crate::char_info::{
    digit_value, hex_digit_value, is_ascii, is_binary_digit, is_decimal_digit,
    is_hex_digit, is_horizontal_whitespace, is_identifier_char, is_logic_digit, is_newline,
    is_octal_digit, is_printable, is_whitespace, utf8_continuation_bytes,
};
use crate::cursor::Cursor;
use crate::source::SourceBuffer;
use crate::token::{IdentifierCategory, Token, TokenKind, TokenPayload, Trivia, TriviaKind};
use crate::vector::{LogicBit, NumericBase, VectorBuilder};
use smol_str::SmolStr;
use sv_diagnostics::{DiagCode, DiagnosticSink, FileId, LineMap, Span};
use sv_syntax::{directive_kind, DirectiveKind};

/// Decimal digits that participate in a mantissa. Further digits only
/// shift the decimal point.
const MAX_MANTISSA_DIGITS: u32 = 18;

/// Largest exponent magnitude fed to the power table.
const MAX_EXPONENT: i32 = 511;

/// Successive squarings of ten for binary-decomposition scaling.
const POWERS_OF_TEN: [f64; 9] = [1e1, 1e2, 1e4, 1e8, 1e16, 1e32, 1e64, 1e128, 1e256];

/// Scale `fraction` by `10^exp`, reporting whether the result is finite.
fn compose_double(fraction: f64, exp: i32) -> (f64, bool) {
    let neg = exp < 0;
    let mut exp = exp.unsigned_abs().min(MAX_EXPONENT as u32);

    let mut dbl_exp = 1.0;
    for power in POWERS_OF_TEN {
        if exp == 0 {
            break;
        }
        if exp & 1 != 0 {
            dbl_exp *= power;
        }
        exp >>= 1;
    }

    let result = if neg {
        fraction / dbl_exp
    } else {
        fraction * dbl_exp
    };
    (result, result.is_finite())
}

/// What the lexer does with newlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexingMode {
    /// Ordinary source text; newlines are trivia.
    #[default]
    Normal,
    /// Inside a non-include directive; an unescaped newline ends it.
    Directive,
    /// Inside an `` `include `` directive.
    Include,
}

/// A pull-based lexer over one source buffer.
///
/// Owns the session arena and diagnostic sink for its lifetime; both are
/// handed back by [`into_parts`](Lexer::into_parts).
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    source: &'a SourceBuffer,
    file: FileId,
    mode: LexingMode,
    arena: Arena,
    diagnostics: DiagnosticSink,
    line_map: LineMap,
    trivia_buffer: Vec<Trivia>,
    string_buffer: Vec<u8>,
    builder: VectorBuilder,
}

impl<'a> Lexer<'a> {
    /// Bind a lexer to a source buffer.
    ///
    /// Byte order marks at offset 0 are diagnosed and skipped here; BOM
    /// bytes anywhere else lex as ordinary input.
    pub fn new(
        file: FileId,
        source: &'a SourceBuffer,
        arena: Arena,
        diagnostics: DiagnosticSink,
    ) -> Self {
        let line_map = LineMap::new(source.as_bytes());
        let mut lexer = Self {
            cursor: Cursor::new(source),
            source,
            file,
            mode: LexingMode::Normal,
            arena,
            diagnostics,
            line_map,
            trivia_buffer: Vec::with_capacity(8),
            string_buffer: Vec::with_capacity(64),
            builder: VectorBuilder::new(),
        };

        let bytes = source.as_bytes();
        if bytes.len() >= 2 {
            match (bytes[0], bytes[1]) {
                (0xFF, 0xFE) | (0xFE, 0xFF) => {
                    lexer.cursor.advance(2);
                    lexer.error(DiagCode::UnicodeBom);
                }
                (0xEF, 0xBB) if bytes.len() >= 3 && bytes[2] == 0xBF => {
                    lexer.cursor.advance(3);
                    lexer.error(DiagCode::UnicodeBom);
                }
                _ => {}
            }
        }
        lexer
    }

    /// Lex the next token, with leading trivia attached.
    ///
    /// After the source is exhausted, every further call returns another
    /// `EndOfFile` token.
    pub fn lex(&mut self) -> Token {
        self.trivia_buffer.clear();
        let end_of_directive = self.lex_trivia();
        let trivia = self.arena.alloc_trivia(&self.trivia_buffer);

        self.cursor.set_mark();
        if end_of_directive {
            self.mode = LexingMode::Normal;
            return Token::new(TokenKind::EndOfDirective, self.cursor.lexeme_span(), None, trivia);
        }

        let (kind, payload) = self.lex_token();
        Token::new(kind, self.cursor.lexeme_span(), payload, trivia)
    }

    /// Lex the whole buffer, collecting through the first `EndOfFile`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.lex();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    /// Current lexing mode.
    #[must_use]
    pub fn mode(&self) -> LexingMode {
        self.mode
    }

    /// Current byte offset into the source.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.cursor.pos()
    }

    #[must_use]
    pub fn file(&self) -> FileId {
        self.file
    }

    #[must_use]
    pub fn source(&self) -> &'a SourceBuffer {
        self.source
    }

    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.diagnostics
    }

    /// Give up the session storage.
    #[must_use]
    pub fn into_parts(self) -> (Arena, DiagnosticSink) {
        (self.arena, self.diagnostics)
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    fn lex_token(&mut self) -> (TokenKind, Option<PayloadRef>) {
        let c = self.cursor.peek(0);
        if c == 0 && self.cursor.really_at_end() {
            return (TokenKind::EndOfFile, None);
        }
        self.cursor.advance(1);

        match c {
            0 => {
                // interior NUL, not the sentinel
                self.error(DiagCode::EmbeddedNull);
                (TokenKind::Unknown, Some(self.unknown_payload()))
            }
            b'!' => {
                if self.cursor.consume(b'=') {
                    match self.cursor.peek(0) {
                        b'=' => {
                            self.cursor.advance(1);
                            (TokenKind::SymBangEqEq, None)
                        }
                        b'?' => {
                            self.cursor.advance(1);
                            (TokenKind::SymBangEqQuestion, None)
                        }
                        _ => (TokenKind::SymBangEq, None),
                    }
                } else {
                    (TokenKind::SymBang, None)
                }
            }
            b'"' => {
                let payload = self.lex_string_literal();
                (TokenKind::StringLiteral, Some(payload))
            }
            b'#' => match self.cursor.peek(0) {
                b'#' => {
                    self.cursor.advance(1);
                    (TokenKind::SymHashHash, None)
                }
                b'-' if self.cursor.peek(1) == b'#' => {
                    self.cursor.advance(2);
                    (TokenKind::SymHashMinusHash, None)
                }
                b'=' if self.cursor.peek(1) == b'#' => {
                    self.cursor.advance(2);
                    (TokenKind::SymHashEqHash, None)
                }
                _ => (TokenKind::SymHash, None),
            },
            b'$' => self.lex_dollar_sign(),
            b'%' => {
                if self.cursor.consume(b'=') {
                    (TokenKind::SymPercentEq, None)
                } else {
                    (TokenKind::SymPercent, None)
                }
            }
            b'&' => match self.cursor.peek(0) {
                b'&' => {
                    self.cursor.advance(1);
                    if self.cursor.consume(b'&') {
                        (TokenKind::SymAndAndAnd, None)
                    } else {
                        (TokenKind::SymAndAnd, None)
                    }
                }
                b'=' => {
                    self.cursor.advance(1);
                    (TokenKind::SymAndEq, None)
                }
                _ => (TokenKind::SymAnd, None),
            },
            b'\'' => {
                // either '{ or an unsized numeric literal
                if self.cursor.consume(b'{') {
                    (TokenKind::SymTickBrace, None)
                } else {
                    let payload = self.lex_unsized_numeric_literal();
                    (TokenKind::IntegerLiteral, Some(payload))
                }
            }
            b'(' => {
                if self.cursor.consume(b'*') {
                    (TokenKind::SymLParenStar, None)
                } else {
                    (TokenKind::SymLParen, None)
                }
            }
            b')' => (TokenKind::SymRParen, None),
            b'*' => match self.cursor.peek(0) {
                b'*' => {
                    self.cursor.advance(1);
                    (TokenKind::SymStarStar, None)
                }
                b'=' => {
                    self.cursor.advance(1);
                    (TokenKind::SymStarEq, None)
                }
                b'>' => {
                    self.cursor.advance(1);
                    (TokenKind::SymStarGt, None)
                }
                b')' => {
                    self.cursor.advance(1);
                    (TokenKind::SymStarRParen, None)
                }
                b':' if self.cursor.peek(1) == b':' && self.cursor.peek(2) == b'*' => {
                    self.cursor.advance(3);
                    (TokenKind::SymStarColonColonStar, None)
                }
                _ => (TokenKind::SymStar, None),
            },
            b'+' => match self.cursor.peek(0) {
                b'+' => {
                    self.cursor.advance(1);
                    (TokenKind::SymPlusPlus, None)
                }
                b'=' => {
                    self.cursor.advance(1);
                    (TokenKind::SymPlusEq, None)
                }
                b':' => {
                    self.cursor.advance(1);
                    (TokenKind::SymPlusColon, None)
                }
                _ => (TokenKind::SymPlus, None),
            },
            b',' => (TokenKind::SymComma, None),
            b'-' => match self.cursor.peek(0) {
                b'-' => {
                    self.cursor.advance(1);
                    (TokenKind::SymMinusMinus, None)
                }
                b'=' => {
                    self.cursor.advance(1);
                    (TokenKind::SymMinusEq, None)
                }
                b':' => {
                    self.cursor.advance(1);
                    (TokenKind::SymMinusColon, None)
                }
                b'>' => {
                    self.cursor.advance(1);
                    if self.cursor.consume(b'>') {
                        (TokenKind::SymDoubleArrow, None)
                    } else {
                        (TokenKind::SymArrow, None)
                    }
                }
                _ => (TokenKind::SymMinus, None),
            },
            b'.' => {
                if self.cursor.consume(b'*') {
                    (TokenKind::SymDotStar, None)
                } else {
                    (TokenKind::SymDot, None)
                }
            }
            b'/' => {
                if self.cursor.consume(b'=') {
                    (TokenKind::SymSlashEq, None)
                } else {
                    (TokenKind::SymSlash, None)
                }
            }
            b'0'..=b'9' => {
                // let the numeric scanner look at this digit again
                self.cursor.retreat(1);
                self.lex_numeric_literal()
            }
            b':' => match self.cursor.peek(0) {
                b'=' => {
                    self.cursor.advance(1);
                    (TokenKind::SymColonEq, None)
                }
                b'/' => {
                    self.cursor.advance(1);
                    (TokenKind::SymColonSlash, None)
                }
                b':' => {
                    self.cursor.advance(1);
                    (TokenKind::SymColonColon, None)
                }
                _ => (TokenKind::SymColon, None),
            },
            b';' => (TokenKind::SymSemi, None),
            b'<' => match self.cursor.peek(0) {
                b'=' => {
                    self.cursor.advance(1);
                    (TokenKind::SymLtEq, None)
                }
                b'-' if self.cursor.peek(1) == b'>' => {
                    self.cursor.advance(2);
                    (TokenKind::SymLtMinusGt, None)
                }
                b'<' => {
                    self.cursor.advance(1);
                    match self.cursor.peek(0) {
                        b'<' => {
                            if self.cursor.peek(1) == b'=' {
                                self.cursor.advance(2);
                                (TokenKind::SymLtLtLtEq, None)
                            } else {
                                self.cursor.advance(1);
                                (TokenKind::SymLtLtLt, None)
                            }
                        }
                        b'=' => {
                            self.cursor.advance(1);
                            (TokenKind::SymLtLtEq, None)
                        }
                        _ => (TokenKind::SymLtLt, None),
                    }
                }
                _ => (TokenKind::SymLt, None),
            },
            b'=' => match self.cursor.peek(0) {
                b'=' => {
                    self.cursor.advance(1);
                    match self.cursor.peek(0) {
                        b'=' => {
                            self.cursor.advance(1);
                            (TokenKind::SymEqEqEq, None)
                        }
                        b'?' => {
                            self.cursor.advance(1);
                            (TokenKind::SymEqEqQuestion, None)
                        }
                        _ => (TokenKind::SymEqEq, None),
                    }
                }
                b'>' => {
                    self.cursor.advance(1);
                    (TokenKind::SymFatArrow, None)
                }
                _ => (TokenKind::SymEq, None),
            },
            b'>' => match self.cursor.peek(0) {
                b'=' => {
                    self.cursor.advance(1);
                    (TokenKind::SymGtEq, None)
                }
                b'>' => {
                    self.cursor.advance(1);
                    match self.cursor.peek(0) {
                        b'>' => {
                            if self.cursor.peek(1) == b'=' {
                                self.cursor.advance(2);
                                (TokenKind::SymGtGtGtEq, None)
                            } else {
                                self.cursor.advance(1);
                                (TokenKind::SymGtGtGt, None)
                            }
                        }
                        b'=' => {
                            self.cursor.advance(1);
                            (TokenKind::SymGtGtEq, None)
                        }
                        _ => (TokenKind::SymGtGt, None),
                    }
                }
                _ => (TokenKind::SymGt, None),
            },
            b'?' => (TokenKind::SymQuestion, None),
            b'@' => {
                if self.cursor.consume(b'@') {
                    (TokenKind::SymAtAt, None)
                } else {
                    (TokenKind::SymAt, None)
                }
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => {
                self.scan_identifier();
                let payload = self.identifier_payload(IdentifierCategory::Normal);
                (TokenKind::Identifier, Some(payload))
            }
            b'[' => (TokenKind::SymLBracket, None),
            b'\\' => self.lex_escaped_identifier(),
            b']' => (TokenKind::SymRBracket, None),
            b'^' => match self.cursor.peek(0) {
                b'~' => {
                    self.cursor.advance(1);
                    (TokenKind::SymCaretTilde, None)
                }
                b'=' => {
                    self.cursor.advance(1);
                    (TokenKind::SymCaretEq, None)
                }
                _ => (TokenKind::SymCaret, None),
            },
            b'`' => match self.cursor.peek(0) {
                b'"' => {
                    self.cursor.advance(1);
                    (TokenKind::MacroQuote, None)
                }
                b'`' => {
                    self.cursor.advance(1);
                    (TokenKind::MacroPaste, None)
                }
                b'\\' if self.cursor.peek(1) == b'`' && self.cursor.peek(2) == b'"' => {
                    self.cursor.advance(3);
                    (TokenKind::MacroEscapedQuote, None)
                }
                _ => self.lex_directive(),
            },
            b'{' => (TokenKind::SymLBrace, None),
            b'|' => match self.cursor.peek(0) {
                b'|' => {
                    self.cursor.advance(1);
                    (TokenKind::SymPipePipe, None)
                }
                b'-' if self.cursor.peek(1) == b'>' => {
                    self.cursor.advance(2);
                    (TokenKind::SymPipeArrow, None)
                }
                b'=' => {
                    if self.cursor.peek(1) == b'>' {
                        self.cursor.advance(2);
                        (TokenKind::SymPipeFatArrow, None)
                    } else {
                        self.cursor.advance(1);
                        (TokenKind::SymPipeEq, None)
                    }
                }
                _ => (TokenKind::SymPipe, None),
            },
            b'}' => (TokenKind::SymRBrace, None),
            b'~' => match self.cursor.peek(0) {
                b'&' => {
                    self.cursor.advance(1);
                    (TokenKind::SymTildeAnd, None)
                }
                b'|' => {
                    self.cursor.advance(1);
                    (TokenKind::SymTildePipe, None)
                }
                b'^' => {
                    self.cursor.advance(1);
                    (TokenKind::SymTildeCaret, None)
                }
                _ => (TokenKind::SymTilde, None),
            },
            _ => {
                if is_ascii(c) {
                    self.error(DiagCode::NonPrintableChar);
                } else {
                    // skip the rest of the UTF-8 sequence
                    self.cursor.advance(utf8_continuation_bytes(c));
                    self.error(DiagCode::Utf8Char);
                }
                (TokenKind::Unknown, Some(self.unknown_payload()))
            }
        }
    }

    // ─── Identifiers, directives ─────────────────────────────────────────

    fn scan_identifier(&mut self) {
        while is_identifier_char(self.cursor.peek(0)) {
            self.cursor.advance(1);
        }
    }

    fn lex_dollar_sign(&mut self) -> (TokenKind, Option<PayloadRef>) {
        self.scan_identifier();

        // a lone dollar sign is its own operator
        if self.cursor.lexeme_len() == 1 {
            return (TokenKind::SymDollar, None);
        }

        let payload = self.identifier_payload(IdentifierCategory::System);
        (TokenKind::SystemIdentifier, Some(payload))
    }

    fn lex_escaped_identifier(&mut self) -> (TokenKind, Option<PayloadRef>) {
        let mut c = self.cursor.peek(0);
        if is_whitespace(c) || c == 0 {
            self.error(DiagCode::EscapedWhitespace);
            return (TokenKind::Unknown, Some(self.unknown_payload()));
        }

        while is_printable(c) {
            self.cursor.advance(1);
            c = self.cursor.peek(0);
            if is_whitespace(c) {
                break;
            }
        }

        let payload = self.identifier_payload(IdentifierCategory::Escaped);
        (TokenKind::Identifier, Some(payload))
    }

    fn lex_directive(&mut self) -> (TokenKind, Option<PayloadRef>) {
        self.scan_identifier();

        // a grave character on its own is an error
        if self.cursor.lexeme_len() == 1 {
            self.error(DiagCode::MisplacedDirectiveChar);
            return (TokenKind::Unknown, Some(self.unknown_payload()));
        }

        let text = self.lexeme_text();
        let kind = directive_kind(&text[1..]);
        let payload = self
            .arena
            .alloc_payload(TokenPayload::Directive { text, kind });

        // lexing behavior changes slightly depending on the directive
        match kind {
            DirectiveKind::MacroUsage => (TokenKind::MacroUsage, Some(payload)),
            DirectiveKind::Include => {
                self.mode = LexingMode::Include;
                (TokenKind::Directive, Some(payload))
            }
            _ => {
                self.mode = LexingMode::Directive;
                (TokenKind::Directive, Some(payload))
            }
        }
    }

    // ─── String literals ─────────────────────────────────────────────────

    fn lex_string_literal(&mut self) -> PayloadRef {
        self.string_buffer.clear();

        loop {
            let c = self.cursor.peek(0);
            if c == b'\\' {
                self.cursor.advance(1);
                let c = self.cursor.peek(0);
                self.cursor.advance(1);

                match c {
                    b'n' => self.string_buffer.push(b'\n'),
                    b't' => self.string_buffer.push(b'\t'),
                    b'\\' => self.string_buffer.push(b'\\'),
                    b'"' => self.string_buffer.push(b'"'),
                    b'v' => self.string_buffer.push(0x0B),
                    b'f' => self.string_buffer.push(0x0C),
                    b'a' => self.string_buffer.push(0x07),
                    b'\n' => {}
                    b'\r' => {
                        self.cursor.consume(b'\n');
                    }
                    b'0'..=b'7' => {
                        // octal character code
                        let mut code = u32::from(digit_value(c));
                        let mut d = self.cursor.peek(0);
                        if is_octal_digit(d) {
                            self.cursor.advance(1);
                            code = code * 8 + u32::from(digit_value(d));
                            d = self.cursor.peek(0);
                            if is_octal_digit(d) {
                                self.cursor.advance(1);
                                code = code * 8 + u32::from(digit_value(d));
                            }
                        }
                        if code > 255 {
                            self.error(DiagCode::OctalEscapeCodeTooBig);
                        } else {
                            self.string_buffer.push(code as u8);
                        }
                    }
                    b'x' => {
                        let d = self.cursor.peek(0);
                        self.cursor.advance(1);
                        if !is_hex_digit(d) {
                            self.error(DiagCode::InvalidHexEscapeCode);
                            self.string_buffer.push(d);
                        } else {
                            let mut code = u32::from(hex_digit_value(d));
                            let d = self.cursor.peek(0);
                            if is_hex_digit(d) {
                                self.cursor.advance(1);
                                code = code * 16 + u32::from(hex_digit_value(d));
                            }
                            self.string_buffer.push(code as u8);
                        }
                    }
                    _ => {
                        self.error(DiagCode::UnknownEscapeCode);
                        self.string_buffer.push(c);
                    }
                }
            } else if c == b'"' {
                self.cursor.advance(1);
                break;
            } else if is_newline(c) {
                self.error(DiagCode::NewlineInStringLiteral);
                break;
            } else if c == 0 {
                if self.cursor.really_at_end() {
                    self.error(DiagCode::UnterminatedStringLiteral);
                    break;
                }
                self.error(DiagCode::EmbeddedNull);
                self.cursor.advance(1);
            } else {
                self.cursor.advance(1);
                self.string_buffer.push(c);
            }
        }

        let decoded = self.arena.intern_bytes(&self.string_buffer);
        self.arena
            .alloc_payload(TokenPayload::StringLiteral { decoded })
    }

    // ─── Numeric literals ────────────────────────────────────────────────

    fn lex_numeric_literal(&mut self) -> (TokenKind, Option<PayloadRef>) {
        // skip over leading zeros
        while self.cursor.peek(0) == b'0' {
            self.cursor.advance(1);
        }

        // scan past leading decimal digits; these might be the first part of
        // a fractional number, the size of a vector, or a plain integer
        let mut value = 0u64;
        let mut digits = 0u32;
        self.scan_unsigned_number(&mut value, &mut digits);

        // whitespace normally ends a numeric literal, but it's allowed
        // between the size and the base specifier of a vector literal
        let lookahead = self.find_next_non_whitespace();
        if lookahead > 0 && self.cursor.peek(lookahead) == b'\'' {
            self.cursor.advance(lookahead + 1);
            let payload = self.lex_vector_literal(value);
            return (TokenKind::IntegerLiteral, Some(payload));
        }

        match self.cursor.peek(0) {
            b'\'' => {
                self.cursor.advance(1);
                let payload = self.lex_vector_literal(value);
                (TokenKind::IntegerLiteral, Some(payload))
            }
            b'.' => {
                // fractional digits
                let dec_point = digits;
                self.cursor.advance(1);
                if !is_decimal_digit(self.cursor.peek(0)) {
                    self.error(DiagCode::MissingFractionalDigits);
                }
                let c = self.scan_unsigned_number(&mut value, &mut digits);
                let payload =
                    self.lex_real_literal(value, dec_point, digits, c == b'e' || c == b'E');
                (TokenKind::RealLiteral, Some(payload))
            }
            b'e' | b'E' => {
                // decimal point sits after all scanned digits
                let payload = self.lex_real_literal(value, digits, digits, true);
                (TokenKind::RealLiteral, Some(payload))
            }
            _ => {
                let value = if value > i32::MAX as u64 {
                    self.error(DiagCode::SignedLiteralTooLarge);
                    i32::MAX
                } else {
                    value as i32
                };
                let payload = self.arena.alloc_payload(TokenPayload::Integer { value });
                (TokenKind::IntegerLiteral, Some(payload))
            }
        }
    }

    /// Accumulate decimal digits and underscores. After 18 mantissa digits
    /// the value stops growing but digits keep being counted. Returns the
    /// first byte past the run.
    fn scan_unsigned_number(&mut self, value: &mut u64, digits: &mut u32) -> u8 {
        let mut c = self.cursor.peek(0);
        loop {
            if is_decimal_digit(c) {
                if *digits < MAX_MANTISSA_DIGITS {
                    *value = *value * 10 + u64::from(digit_value(c));
                }
                *digits += 1;
            } else if c != b'_' {
                break;
            }
            self.cursor.advance(1);
            c = self.cursor.peek(0);
        }
        c
    }

    fn lex_real_literal(
        &mut self,
        value: u64,
        dec_point: u32,
        digits: u32,
        has_exponent: bool,
    ) -> PayloadRef {
        let mut neg = false;
        let mut exp_val = 0u64;

        if has_exponent {
            self.cursor.advance(1); // consume e/E

            // skip over leading zeros
            while self.cursor.peek(0) == b'0' {
                self.cursor.advance(1);
            }

            match self.cursor.peek(0) {
                b'+' => self.cursor.advance(1),
                b'-' => {
                    neg = true;
                    self.cursor.advance(1);
                }
                _ => {}
            }

            if !is_decimal_digit(self.cursor.peek(0)) {
                self.error(DiagCode::MissingExponentDigits);
            } else {
                let mut unused_digits = 0;
                self.scan_unsigned_number(&mut exp_val, &mut unused_digits);
            }
        }

        let frac_exp = dec_point as i32 - digits.min(MAX_MANTISSA_DIGITS) as i32;
        let exp_val = exp_val.min(i32::MAX as u64) as i32;
        let exp = if neg {
            frac_exp - exp_val
        } else {
            frac_exp + exp_val
        };

        let (result, finite) = compose_double(value as f64, exp);
        if !finite {
            self.error(DiagCode::RealExponentTooLarge);
        }

        self.arena.alloc_payload(TokenPayload::Real { value: result })
    }

    fn lex_vector_literal(&mut self, size64: u64) -> PayloadRef {
        // error checking on the size, plus coerce to 32 bits
        let mut size32 = 0u32;
        if size64 == 0 {
            self.error(DiagCode::IntegerSizeZero);
        } else if size64 > u64::from(u32::MAX) {
            self.error(DiagCode::IntegerSizeTooLarge);
            size32 = u32::MAX;
        } else {
            size32 = size64 as u32;
        }

        // check for signed specifier
        let mut signed = false;
        let mut c = self.cursor.peek(0);
        if c == b's' || c == b'S' {
            signed = true;
            self.cursor.advance(1);
            c = self.cursor.peek(0);
        }

        self.builder.start(size32, signed);

        // next character needs to be the base
        match c {
            b'd' | b'D' => {
                self.cursor.advance(1);
                self.lex_vector_digits(NumericBase::Decimal, is_decimal_digit, digit_value)
            }
            b'o' | b'O' => {
                self.cursor.advance(1);
                self.lex_vector_digits(NumericBase::Octal, is_octal_digit, digit_value)
            }
            b'h' | b'H' => {
                self.cursor.advance(1);
                self.lex_vector_digits(NumericBase::Hex, is_hex_digit, hex_digit_value)
            }
            b'b' | b'B' => {
                self.cursor.advance(1);
                self.lex_vector_digits(NumericBase::Binary, is_binary_digit, digit_value)
            }
            _ => {
                self.error(DiagCode::MissingVectorBase);
                self.arena.alloc_payload(TokenPayload::Integer { value: 0 })
            }
        }
    }

    fn lex_unsized_numeric_literal(&mut self) -> PayloadRef {
        self.builder.start_unsized();
        let c = self.cursor.peek(0);
        match c {
            b'd' | b'D' => {
                self.cursor.advance(1);
                self.lex_vector_digits(NumericBase::Decimal, is_decimal_digit, digit_value)
            }
            b'o' | b'O' => {
                self.cursor.advance(1);
                self.lex_vector_digits(NumericBase::Octal, is_octal_digit, digit_value)
            }
            b'h' | b'H' => {
                self.cursor.advance(1);
                self.lex_vector_digits(NumericBase::Hex, is_hex_digit, hex_digit_value)
            }
            b'b' | b'B' => {
                self.cursor.advance(1);
                self.lex_vector_digits(NumericBase::Binary, is_binary_digit, digit_value)
            }
            b'0' | b'1' => {
                self.cursor.advance(1);
                let bit = if c == b'1' { LogicBit::One } else { LogicBit::Zero };
                self.arena.alloc_payload(TokenPayload::Bit { value: bit })
            }
            b'x' | b'X' => {
                self.cursor.advance(1);
                self.arena.alloc_payload(TokenPayload::Bit { value: LogicBit::X })
            }
            b'z' | b'Z' => {
                self.cursor.advance(1);
                self.arena.alloc_payload(TokenPayload::Bit { value: LogicBit::Z })
            }
            _ => {
                self.error(DiagCode::InvalidUnsizedLiteral);
                self.arena.alloc_payload(TokenPayload::Integer { value: 0 })
            }
        }
    }

    /// One digit loop shared by every base; the caller picks the digit
    /// predicate and value function.
    fn lex_vector_digits(
        &mut self,
        base: NumericBase,
        is_digit: fn(u8) -> bool,
        value_of: fn(u8) -> u8,
    ) -> PayloadRef {
        // skip leading whitespace
        let lookahead = self.find_next_non_whitespace();
        let c = self.cursor.peek(lookahead);
        if !is_digit(c) && !is_logic_digit(c) {
            self.error(DiagCode::MissingVectorDigits);
            return self.arena.alloc_payload(TokenPayload::Integer { value: 0 });
        }

        self.cursor.advance(lookahead);

        loop {
            let c = self.cursor.peek(0);
            match c {
                b'_' => {}
                b'z' | b'Z' | b'?' => self.builder.add_z(),
                b'x' | b'X' => self.builder.add_x(),
                _ => {
                    if is_digit(c) {
                        self.builder.add_value(value_of(c));
                    } else {
                        let payload = self.builder.finish(base, &mut self.arena);
                        return self.arena.alloc_payload(payload);
                    }
                }
            }
            self.cursor.advance(1);
        }
    }

    // ─── Trivia ──────────────────────────────────────────────────────────

    /// Scan leading trivia. Returns `true` when an unescaped newline ends a
    /// directive, in which case the caller emits `EndOfDirective`.
    fn lex_trivia(&mut self) -> bool {
        loop {
            self.cursor.set_mark();

            match self.cursor.peek(0) {
                b' ' | b'\t' | b'\x0B' | b'\x0C' => {
                    self.cursor.advance(1);
                    self.scan_whitespace();
                }
                b'/' => match self.cursor.peek(1) {
                    b'/' => {
                        self.cursor.advance(2);
                        self.scan_line_comment();
                    }
                    b'*' => {
                        self.cursor.advance(2);
                        if self.scan_block_comment() {
                            return true;
                        }
                    }
                    _ => return false,
                },
                b'\r' => {
                    self.cursor.advance(1);
                    self.cursor.consume(b'\n');
                    self.add_trivia(TriviaKind::EndOfLine);
                    if self.mode != LexingMode::Normal {
                        return true;
                    }
                }
                b'\n' => {
                    self.cursor.advance(1);
                    self.add_trivia(TriviaKind::EndOfLine);
                    if self.mode != LexingMode::Normal {
                        return true;
                    }
                }
                b'\\' => {
                    // inside a directive a backslash escapes the newline
                    if self.mode == LexingMode::Normal || !is_newline(self.cursor.peek(1)) {
                        return false;
                    }
                    self.cursor.advance(1);
                    self.cursor.consume(b'\r');
                    self.cursor.consume(b'\n');
                    self.add_trivia(TriviaKind::EndOfLine);
                }
                _ => return false,
            }
        }
    }

    fn scan_whitespace(&mut self) {
        while is_horizontal_whitespace(self.cursor.peek(0)) {
            self.cursor.advance(1);
        }
        self.add_trivia(TriviaKind::Whitespace);
    }

    fn scan_line_comment(&mut self) {
        loop {
            let c = self.cursor.peek(0);
            if is_newline(c) {
                break;
            }
            if c == 0 {
                if self.cursor.really_at_end() {
                    break;
                }
                self.error(DiagCode::EmbeddedNull);
            }
            self.cursor.advance(1);
        }
        self.add_trivia(TriviaKind::LineComment);
    }

    /// Returns `true` if a newline split the comment while inside a
    /// directive, which ends the directive after the comment.
    fn scan_block_comment(&mut self) -> bool {
        let mut end_of_directive = false;
        loop {
            let c = self.cursor.peek(0);
            if c == 0 {
                if self.cursor.really_at_end() {
                    self.error(DiagCode::UnterminatedBlockComment);
                    break;
                }
                self.error(DiagCode::EmbeddedNull);
                self.cursor.advance(1);
            } else if c == b'*' && self.cursor.peek(1) == b'/' {
                self.cursor.advance(2);
                break;
            } else if c == b'/' && self.cursor.peek(1) == b'*' {
                // nested block comments are disallowed by the standard
                self.cursor.advance(2);
                self.error(DiagCode::NestedBlockComment);
            } else {
                self.cursor.advance(1);
                if self.mode != LexingMode::Normal && is_newline(c) {
                    self.error(DiagCode::SplitBlockCommentInDirective);
                    self.mode = LexingMode::Normal;
                    end_of_directive = true;
                }
            }
        }
        self.add_trivia(TriviaKind::BlockComment);
        end_of_directive
    }

    // ─── Helpers ─────────────────────────────────────────────────────────

    fn add_trivia(&mut self, kind: TriviaKind) {
        self.trivia_buffer
            .push(Trivia::new(kind, self.cursor.lexeme_span()));
    }

    /// Horizontal-whitespace lookahead, in bytes.
    fn find_next_non_whitespace(&self) -> u32 {
        let mut lookahead = 0;
        while is_horizontal_whitespace(self.cursor.peek(lookahead)) {
            lookahead += 1;
        }
        lookahead
    }

    /// Record a diagnostic anchored at the current lexeme.
    fn error(&mut self, code: DiagCode) {
        self.error_span(code, self.cursor.lexeme_span());
    }

    fn error_span(&mut self, code: DiagCode, span: Span) {
        let location = self.line_map.location(self.file, span.start);
        self.diagnostics.add_code(code, location, span);
    }

    /// The current lexeme as interned text. Lossy on the malformed byte
    /// sequences that only `Unknown` tokens can cover.
    fn lexeme_text(&self) -> SmolStr {
        SmolStr::new(String::from_utf8_lossy(self.cursor.lexeme_bytes()))
    }

    fn identifier_payload(&mut self, category: IdentifierCategory) -> PayloadRef {
        let text = self.lexeme_text();
        self.arena
            .alloc_payload(TokenPayload::Identifier { text, category })
    }

    fn unknown_payload(&mut self) -> PayloadRef {
        self.identifier_payload(IdentifierCategory::Unknown)
    }
}
