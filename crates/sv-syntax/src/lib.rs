//! Syntax facts for SystemVerilog lexing and parsing.
//!
//! This crate owns the pure lookup tables the rest of the frontend consults:
//! the preprocessor directive table and the keyword set. The lexer only uses
//! the directive table; keywords come out of the lexer as plain identifiers
//! and are reclassified by the parser.

use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::OnceLock;

/// The resolved kind of a backquote directive.
///
/// Any directive name not in the table is a macro usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Include,
    Define,
    Undef,
    UndefineAll,
    Ifdef,
    Ifndef,
    Elsif,
    Else,
    Endif,
    Timescale,
    DefaultNettype,
    Resetall,
    Line,
    Pragma,
    CellDefine,
    EndCellDefine,
    BeginKeywords,
    EndKeywords,
    UnconnectedDrive,
    NoUnconnectedDrive,
    MacroUsage,
}

const DIRECTIVES: &[(&str, DirectiveKind)] = &[
    ("include", DirectiveKind::Include),
    ("define", DirectiveKind::Define),
    ("undef", DirectiveKind::Undef),
    ("undefineall", DirectiveKind::UndefineAll),
    ("ifdef", DirectiveKind::Ifdef),
    ("ifndef", DirectiveKind::Ifndef),
    ("elsif", DirectiveKind::Elsif),
    ("else", DirectiveKind::Else),
    ("endif", DirectiveKind::Endif),
    ("timescale", DirectiveKind::Timescale),
    ("default_nettype", DirectiveKind::DefaultNettype),
    ("resetall", DirectiveKind::Resetall),
    ("line", DirectiveKind::Line),
    ("pragma", DirectiveKind::Pragma),
    ("celldefine", DirectiveKind::CellDefine),
    ("endcelldefine", DirectiveKind::EndCellDefine),
    ("begin_keywords", DirectiveKind::BeginKeywords),
    ("end_keywords", DirectiveKind::EndKeywords),
    ("unconnected_drive", DirectiveKind::UnconnectedDrive),
    ("nounconnected_drive", DirectiveKind::NoUnconnectedDrive),
];

fn directive_table() -> &'static FxHashMap<&'static str, DirectiveKind> {
    static TABLE: OnceLock<FxHashMap<&'static str, DirectiveKind>> = OnceLock::new();
    TABLE.get_or_init(|| DIRECTIVES.iter().copied().collect())
}

/// Resolve a directive name (the identifier after the backquote, without
/// the backquote itself) to its kind.
#[must_use]
pub fn directive_kind(name: &str) -> DirectiveKind {
    directive_table()
        .get(name)
        .copied()
        .unwrap_or(DirectiveKind::MacroUsage)
}

/// The SystemVerilog keyword set.
const KEYWORDS: &[&str] = &[
    "alias",
    "always",
    "always_comb",
    "always_ff",
    "always_latch",
    "and",
    "assert",
    "assign",
    "assume",
    "automatic",
    "before",
    "begin",
    "bind",
    "bins",
    "binsof",
    "bit",
    "break",
    "buf",
    "bufif0",
    "bufif1",
    "byte",
    "case",
    "casex",
    "casez",
    "cell",
    "chandle",
    "class",
    "clocking",
    "cmos",
    "config",
    "const",
    "constraint",
    "context",
    "continue",
    "cover",
    "covergroup",
    "coverpoint",
    "cross",
    "deassign",
    "default",
    "defparam",
    "design",
    "disable",
    "dist",
    "do",
    "edge",
    "else",
    "end",
    "endcase",
    "endclass",
    "endclocking",
    "endconfig",
    "endfunction",
    "endgenerate",
    "endgroup",
    "endinterface",
    "endmodule",
    "endpackage",
    "endprimitive",
    "endprogram",
    "endproperty",
    "endsequence",
    "endspecify",
    "endtable",
    "endtask",
    "enum",
    "event",
    "expect",
    "export",
    "extends",
    "extern",
    "final",
    "first_match",
    "for",
    "force",
    "foreach",
    "forever",
    "fork",
    "forkjoin",
    "function",
    "generate",
    "genvar",
    "highz0",
    "highz1",
    "if",
    "iff",
    "ifnone",
    "ignore_bins",
    "illegal_bins",
    "import",
    "incdir",
    "include",
    "initial",
    "inout",
    "input",
    "inside",
    "instance",
    "int",
    "integer",
    "interface",
    "intersect",
    "join",
    "join_any",
    "join_none",
    "large",
    "let",
    "liblist",
    "library",
    "local",
    "localparam",
    "logic",
    "longint",
    "macromodule",
    "matches",
    "medium",
    "modport",
    "module",
    "nand",
    "negedge",
    "new",
    "nmos",
    "nor",
    "noshowcancelled",
    "not",
    "notif0",
    "notif1",
    "null",
    "or",
    "output",
    "package",
    "packed",
    "parameter",
    "pmos",
    "posedge",
    "primitive",
    "priority",
    "program",
    "property",
    "protected",
    "pull0",
    "pull1",
    "pulldown",
    "pullup",
    "pulsestyle_ondetect",
    "pulsestyle_onevent",
    "pure",
    "rand",
    "randc",
    "randcase",
    "randsequence",
    "rcmos",
    "real",
    "realtime",
    "ref",
    "reg",
    "release",
    "repeat",
    "return",
    "rnmos",
    "rpmos",
    "rtran",
    "rtranif0",
    "rtranif1",
    "scalared",
    "sequence",
    "shortint",
    "shortreal",
    "showcancelled",
    "signed",
    "small",
    "solve",
    "specify",
    "specparam",
    "static",
    "string",
    "strong0",
    "strong1",
    "struct",
    "super",
    "supply0",
    "supply1",
    "table",
    "tagged",
    "task",
    "this",
    "throughout",
    "time",
    "timeprecision",
    "timeunit",
    "tran",
    "tranif0",
    "tranif1",
    "tri",
    "tri0",
    "tri1",
    "triand",
    "trior",
    "trireg",
    "type",
    "typedef",
    "union",
    "unique",
    "unsigned",
    "use",
    "var",
    "vectored",
    "virtual",
    "void",
    "wait",
    "wait_order",
    "wand",
    "weak0",
    "weak1",
    "while",
    "wildcard",
    "wire",
    "with",
    "within",
    "wor",
    "xnor",
    "xor",
];

fn keyword_table() -> &'static FxHashSet<&'static str> {
    static TABLE: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    TABLE.get_or_init(|| KEYWORDS.iter().copied().collect())
}

/// Check whether an identifier is a SystemVerilog keyword.
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    keyword_table().contains(name)
}

/// All SystemVerilog keywords, in alphabetical order.
#[must_use]
pub fn keywords() -> &'static [&'static str] {
    KEYWORDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_lookup() {
        assert_eq!(directive_kind("include"), DirectiveKind::Include);
        assert_eq!(directive_kind("define"), DirectiveKind::Define);
        assert_eq!(directive_kind("timescale"), DirectiveKind::Timescale);
        assert_eq!(directive_kind("endif"), DirectiveKind::Endif);
    }

    #[test]
    fn test_unknown_directive_is_macro_usage() {
        assert_eq!(directive_kind("MY_MACRO"), DirectiveKind::MacroUsage);
        assert_eq!(directive_kind("definex"), DirectiveKind::MacroUsage);
        assert_eq!(directive_kind(""), DirectiveKind::MacroUsage);
    }

    #[test]
    fn test_keyword_lookup() {
        assert!(is_keyword("module"));
        assert!(is_keyword("endmodule"));
        assert!(is_keyword("always_ff"));
        assert!(is_keyword("logic"));
        assert!(!is_keyword("Module"));
        assert!(!is_keyword("my_signal"));
        assert!(!is_keyword(""));
    }

    #[test]
    fn test_keywords_sorted_and_unique() {
        for pair in KEYWORDS.windows(2) {
            assert!(pair[0] < pair[1], "{} >= {}", pair[0], pair[1]);
        }
    }
}
