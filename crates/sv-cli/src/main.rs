//! CLI frontend for the sv-rust lexer.

use clap::{Parser, Subcommand};
use miette::NamedSource;
use std::path::PathBuf;
use sv_diagnostics::{DiagnosticSink, FileId};
use sv_lexer::{Arena, Lexer, SourceBuffer, TokenPayload};

#[derive(Parser)]
#[command(name = "sv-rust")]
#[command(about = "SystemVerilog frontend (Rust implementation)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lex a file and dump its tokens
    Tokens {
        /// Input file
        file: PathBuf,
        /// Also show leading trivia
        #[arg(long)]
        trivia: bool,
        /// Render full diagnostic reports instead of a one-line summary
        #[arg(long)]
        diagnostics: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Tokens {
            file,
            trivia,
            diagnostics,
        } => cmd_tokens(&file, trivia, diagnostics),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_tokens(
    file: &PathBuf,
    show_trivia: bool,
    full_diagnostics: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(file)?;
    let buffer = SourceBuffer::from_bytes(&bytes);

    let start = std::time::Instant::now();
    let mut lexer = Lexer::new(FileId(1), &buffer, Arena::new(), DiagnosticSink::new());
    let tokens = lexer.tokenize();
    tracing::debug!(
        tokens = tokens.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "lexing finished"
    );

    println!("Tokens ({}):", tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        if show_trivia {
            for trivium in lexer.arena().trivia(token.trivia) {
                println!(
                    "        trivia {:?} @ {}..{}",
                    trivium.kind, trivium.span.start, trivium.span.end
                );
            }
        }
        let summary = payload_summary(&lexer, token);
        println!(
            "  {i:4}: {:?} @ {}..{}{summary}",
            token.kind, token.span.start, token.span.end
        );
    }

    let (_, sink) = lexer.into_parts();
    if sink.has_errors() {
        eprintln!("\n{} diagnostic(s):", sink.len());
        let source = String::from_utf8_lossy(buffer.as_bytes()).into_owned();
        let name = file.display().to_string();
        for error in sink.errors() {
            if full_diagnostics {
                let report = miette::Report::new(error.clone())
                    .with_source_code(NamedSource::new(name.clone(), source.clone()));
                eprintln!("{report:?}");
            } else {
                eprintln!("  {error}");
            }
        }
        std::process::exit(1);
    }
    Ok(())
}

fn payload_summary(lexer: &Lexer, token: &sv_lexer::Token) -> String {
    let Some(payload) = token.payload else {
        return String::new();
    };
    match lexer.arena().payload(payload) {
        TokenPayload::Identifier { text, category } => format!("  {text:?} ({category:?})"),
        TokenPayload::Directive { text, kind } => format!("  {text:?} ({kind:?})"),
        TokenPayload::StringLiteral { decoded } => {
            format!(
                "  {:?}",
                String::from_utf8_lossy(lexer.arena().bytes(*decoded))
            )
        }
        TokenPayload::Integer { value } => format!("  = {value}"),
        TokenPayload::Real { value } => format!("  = {value}"),
        TokenPayload::Vector {
            size,
            signed,
            base,
            digits,
        } => {
            format!(
                "  size={size:?} signed={signed} base={base:?} digits={:?}",
                lexer.arena().digits(*digits)
            )
        }
        TokenPayload::Bit { value } => format!("  = {value:?}"),
    }
}
