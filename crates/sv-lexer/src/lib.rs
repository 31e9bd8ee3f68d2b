//! Lexical analyzer for SystemVerilog source text.
//!
//! Converts a raw byte buffer into a stream of tokens annotated with
//! leading trivia and kind-specific payloads, ready for a preprocessor and
//! parser.
//!
//! # Architecture
//!
//! - [`SourceBuffer`]: the NUL-sentinel-terminated input
//! - [`Lexer`]: the pull-based tokenizer; one call to [`Lexer::lex`] yields
//!   one token
//! - [`Arena`]: session storage for payloads, trivia, decoded strings, and
//!   vector digits, addressed by typed keys
//! - `sv_diagnostics::DiagnosticSink`: append-only error collection with
//!   real line/column coordinates
//!
//! Directives switch the lexer into a mode where newlines are significant;
//! an unescaped newline inside a directive produces an `EndOfDirective`
//! token. Include expansion and macro substitution belong to an external
//! preprocessor, which can drive them through [`Lexer::mode`] and
//! [`Lexer::offset`].
//!
//! # Example
//!
//! ```
//! use sv_lexer::{Arena, Lexer, SourceBuffer, TokenKind};
//! use sv_diagnostics::{DiagnosticSink, FileId};
//!
//! let buffer = SourceBuffer::new("assign x = 4'b10xz;");
//! let mut lexer = Lexer::new(FileId(1), &buffer, Arena::new(), DiagnosticSink::new());
//! let tokens = lexer.tokenize();
//! assert_eq!(tokens[0].kind, TokenKind::Identifier); // keywords resolve later
//! assert!(tokens.last().unwrap().is_eof());
//! ```

pub mod char_info;

mod arena;
mod cursor;
mod lexer;
mod source;
mod token;
mod vector;

pub use arena::{Arena, ByteRange, DigitRange, PayloadRef, TriviaRange};
pub use cursor::Cursor;
pub use lexer::{Lexer, LexingMode};
pub use source::SourceBuffer;
pub use token::{IdentifierCategory, Token, TokenKind, TokenPayload, Trivia, TriviaKind};
pub use vector::{LogicBit, LogicDigit, NumericBase, VectorBuilder};
