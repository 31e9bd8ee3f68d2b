//! Token and trivia types for the SystemVerilog lexer.
//!
//! A token is a kind, its source span, an optional arena key for
//! kind-specific data, and the list of leading trivia. The raw lexeme is
//! always the source slice at `span`, byte for byte.

use crate::arena::{ByteRange, DigitRange, PayloadRef, TriviaRange};
use crate::vector::{LogicBit, NumericBase};
use smol_str::SmolStr;
use sv_diagnostics::Span;
use sv_syntax::DirectiveKind;

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    SystemIdentifier,
    Directive,
    MacroUsage,
    IntegerLiteral,
    RealLiteral,
    StringLiteral,
    EndOfFile,
    EndOfDirective,
    Unknown,

    // Macro text escapes
    MacroQuote,        // `"
    MacroPaste,        // ``
    MacroEscapedQuote, // `\`"

    // Symbols
    SymBang,               // !
    SymBangEq,             // !=
    SymBangEqEq,           // !==
    SymBangEqQuestion,     // !=?
    SymHash,               // #
    SymHashHash,           // ##
    SymHashMinusHash,      // #-#
    SymHashEqHash,         // #=#
    SymDollar,             // $
    SymPercent,            // %
    SymPercentEq,          // %=
    SymAnd,                // &
    SymAndAnd,             // &&
    SymAndAndAnd,          // &&&
    SymAndEq,              // &=
    SymTickBrace,          // '{
    SymLParen,             // (
    SymLParenStar,         // (*
    SymRParen,             // )
    SymStar,               // *
    SymStarStar,           // **
    SymStarEq,             // *=
    SymStarGt,             // *>
    SymStarRParen,         // *)
    SymStarColonColonStar, // *::*
    SymPlus,               // +
    SymPlusPlus,           // ++
    SymPlusEq,             // +=
    SymPlusColon,          // +:
    SymComma,              // ,
    SymMinus,              // -
    SymMinusMinus,         // --
    SymMinusEq,            // -=
    SymMinusColon,         // -:
    SymArrow,              // ->
    SymDoubleArrow,        // ->>
    SymDot,                // .
    SymDotStar,            // .*
    SymSlash,              // /
    SymSlashEq,            // /=
    SymColon,              // :
    SymColonColon,         // ::
    SymColonEq,            // :=
    SymColonSlash,         // :/
    SymSemi,               // ;
    SymLt,                 // <
    SymLtEq,               // <=
    SymLtMinusGt,          // <->
    SymLtLt,               // <<
    SymLtLtLt,             // <<<
    SymLtLtEq,             // <<=
    SymLtLtLtEq,           // <<<=
    SymEq,                 // =
    SymEqEq,               // ==
    SymEqEqEq,             // ===
    SymEqEqQuestion,       // ==?
    SymFatArrow,           // =>
    SymGt,                 // >
    SymGtEq,               // >=
    SymGtGt,               // >>
    SymGtGtGt,             // >>>
    SymGtGtEq,             // >>=
    SymGtGtGtEq,           // >>>=
    SymQuestion,           // ?
    SymAt,                 // @
    SymAtAt,               // @@
    SymLBracket,           // [
    SymRBracket,           // ]
    SymCaret,              // ^
    SymCaretTilde,         // ^~
    SymCaretEq,            // ^=
    SymLBrace,             // {
    SymRBrace,             // }
    SymPipe,               // |
    SymPipePipe,           // ||
    SymPipeArrow,          // |->
    SymPipeFatArrow,       // |=>
    SymPipeEq,             // |=
    SymTilde,              // ~
    SymTildeAnd,           // ~&
    SymTildePipe,          // ~|
    SymTildeCaret,         // ~^
}

impl TokenKind {
    /// Human-readable name: the operator text for symbols, a description
    /// otherwise.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::SystemIdentifier => "system identifier",
            TokenKind::Directive => "directive",
            TokenKind::MacroUsage => "macro usage",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::RealLiteral => "real literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::EndOfFile => "end of file",
            TokenKind::EndOfDirective => "end of directive",
            TokenKind::Unknown => "unknown token",

            TokenKind::MacroQuote => "`\"",
            TokenKind::MacroPaste => "``",
            TokenKind::MacroEscapedQuote => "`\\`\"",

            TokenKind::SymBang => "!",
            TokenKind::SymBangEq => "!=",
            TokenKind::SymBangEqEq => "!==",
            TokenKind::SymBangEqQuestion => "!=?",
            TokenKind::SymHash => "#",
            TokenKind::SymHashHash => "##",
            TokenKind::SymHashMinusHash => "#-#",
            TokenKind::SymHashEqHash => "#=#",
            TokenKind::SymDollar => "$",
            TokenKind::SymPercent => "%",
            TokenKind::SymPercentEq => "%=",
            TokenKind::SymAnd => "&",
            TokenKind::SymAndAnd => "&&",
            TokenKind::SymAndAndAnd => "&&&",
            TokenKind::SymAndEq => "&=",
            TokenKind::SymTickBrace => "'{",
            TokenKind::SymLParen => "(",
            TokenKind::SymLParenStar => "(*",
            TokenKind::SymRParen => ")",
            TokenKind::SymStar => "*",
            TokenKind::SymStarStar => "**",
            TokenKind::SymStarEq => "*=",
            TokenKind::SymStarGt => "*>",
            TokenKind::SymStarRParen => "*)",
            TokenKind::SymStarColonColonStar => "*::*",
            TokenKind::SymPlus => "+",
            TokenKind::SymPlusPlus => "++",
            TokenKind::SymPlusEq => "+=",
            TokenKind::SymPlusColon => "+:",
            TokenKind::SymComma => ",",
            TokenKind::SymMinus => "-",
            TokenKind::SymMinusMinus => "--",
            TokenKind::SymMinusEq => "-=",
            TokenKind::SymMinusColon => "-:",
            TokenKind::SymArrow => "->",
            TokenKind::SymDoubleArrow => "->>",
            TokenKind::SymDot => ".",
            TokenKind::SymDotStar => ".*",
            TokenKind::SymSlash => "/",
            TokenKind::SymSlashEq => "/=",
            TokenKind::SymColon => ":",
            TokenKind::SymColonColon => "::",
            TokenKind::SymColonEq => ":=",
            TokenKind::SymColonSlash => ":/",
            TokenKind::SymSemi => ";",
            TokenKind::SymLt => "<",
            TokenKind::SymLtEq => "<=",
            TokenKind::SymLtMinusGt => "<->",
            TokenKind::SymLtLt => "<<",
            TokenKind::SymLtLtLt => "<<<",
            TokenKind::SymLtLtEq => "<<=",
            TokenKind::SymLtLtLtEq => "<<<=",
            TokenKind::SymEq => "=",
            TokenKind::SymEqEq => "==",
            TokenKind::SymEqEqEq => "===",
            TokenKind::SymEqEqQuestion => "==?",
            TokenKind::SymFatArrow => "=>",
            TokenKind::SymGt => ">",
            TokenKind::SymGtEq => ">=",
            TokenKind::SymGtGt => ">>",
            TokenKind::SymGtGtGt => ">>>",
            TokenKind::SymGtGtEq => ">>=",
            TokenKind::SymGtGtGtEq => ">>>=",
            TokenKind::SymQuestion => "?",
            TokenKind::SymAt => "@",
            TokenKind::SymAtAt => "@@",
            TokenKind::SymLBracket => "[",
            TokenKind::SymRBracket => "]",
            TokenKind::SymCaret => "^",
            TokenKind::SymCaretTilde => "^~",
            TokenKind::SymCaretEq => "^=",
            TokenKind::SymLBrace => "{",
            TokenKind::SymRBrace => "}",
            TokenKind::SymPipe => "|",
            TokenKind::SymPipePipe => "||",
            TokenKind::SymPipeArrow => "|->",
            TokenKind::SymPipeFatArrow => "|=>",
            TokenKind::SymPipeEq => "|=",
            TokenKind::SymTilde => "~",
            TokenKind::SymTildeAnd => "~&",
            TokenKind::SymTildePipe => "~|",
            TokenKind::SymTildeCaret => "~^",
        }
    }
}

/// Kinds of syntactically inert source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    LineComment,
    BlockComment,
}

/// One run of trivia, attached to the following token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub span: Span,
}

impl Trivia {
    #[must_use]
    pub const fn new(kind: TriviaKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// How an identifier was written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierCategory {
    Normal,
    Escaped,
    System,
    Unknown,
}

/// Kind-specific token data, stored in the session arena.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenPayload {
    Identifier {
        text: SmolStr,
        category: IdentifierCategory,
    },
    Directive {
        text: SmolStr,
        kind: DirectiveKind,
    },
    StringLiteral {
        /// Decoded content with escapes resolved; may contain arbitrary bytes.
        decoded: ByteRange,
    },
    Integer {
        value: i32,
    },
    Real {
        value: f64,
    },
    Vector {
        /// Declared size in bits, or `None` for an unsized literal.
        size: Option<u32>,
        signed: bool,
        base: NumericBase,
        digits: DigitRange,
    },
    /// A single-bit unsized literal such as `'0` or `'x`.
    Bit {
        value: LogicBit,
    },
}

/// One lexed token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range of the raw lexeme in the source buffer.
    pub span: Span,
    /// Kind-specific data in the session arena.
    pub payload: Option<PayloadRef>,
    /// Leading trivia in the session arena.
    pub trivia: TriviaRange,
}

impl Token {
    #[must_use]
    pub const fn new(
        kind: TokenKind,
        span: Span,
        payload: Option<PayloadRef>,
        trivia: TriviaRange,
    ) -> Self {
        Self {
            kind,
            span,
            payload,
            trivia,
        }
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfFile)
    }
}
