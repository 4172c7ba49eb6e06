//! Command-line argument parsing and the driver pipeline.
//!
//! The CLI is built on [`clap`] with derive macros. The source path is an
//! optional positional argument so that its absence is reported through the
//! diagnostics sink as `failure: missing source` rather than by clap's
//! usage error, keeping the failure format uniform with every other
//! front-end diagnostic.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser as ClapParser;

use sable_base::{Arena, ByteArena, Interner};
use sable_syntax::check::Checker;
use sable_syntax::dump::dump_scope;
use sable_syntax::{AstArenas, Lexer, Parser, Reporter, Severity, Source, TokenTag};

/// Command-line interface for the Sable front-end.
#[derive(ClapParser, Debug)]
#[command(name = "sablec")]
#[command(about = "The Sable compiler front-end", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Source file to compile.
    pub path: Option<PathBuf>,

    /// Dump the token stream instead of parsing.
    #[arg(long)]
    pub tokens: bool,

    /// Report front-end progress as comments.
    #[arg(long)]
    pub verbose: bool,
}

/// Parses the process arguments and runs the driver against stdout.
pub fn run_cli() -> i32 {
    let cli = Cli::parse();
    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}

/// Runs the driver, writing diagnostics and dumps to `sink`.
///
/// Returns the process exit code: 0 on success, 1 on the first fatal
/// diagnostic.
pub fn run<W: Write>(cli: Cli, sink: &mut W) -> i32 {
    match drive(cli, sink) {
        Ok(code) => code,
        Err(_) => 1,
    }
}

fn drive<W: Write>(cli: Cli, sink: &mut W) -> io::Result<i32> {
    let Some(path) = cli.path else {
        Reporter::new(&mut *sink).report(Severity::Failure, None, "missing source")?;
        return Ok(1);
    };

    let source = match Source::load(&path) {
        Ok(source) => source,
        Err(error) => {
            Reporter::new(&mut *sink).report(
                Severity::Failure,
                None,
                &format!("cannot load {}: {}", path.display(), error),
            )?;
            return Ok(1);
        }
    };

    if cli.tokens {
        return dump_tokens(&source, sink);
    }

    let exprs = Arena::new();
    let values = Arena::new();
    let scopes = Arena::new();
    let stmts = Arena::new();
    let value_lists = Arena::new();
    let labels = Arena::new();
    let routines = Arena::new();
    let text = ByteArena::new();
    let arenas = AstArenas::new(
        &exprs, &values, &scopes, &stmts, &value_lists, &labels, &routines, &text,
    );
    let mut interner = Interner::new();

    let scope = {
        let parse = Parser::new(&source, arenas, &mut interner)
            .and_then(|mut parser| parser.parse_program());
        match parse {
            Ok(scope) => scope,
            Err(error) => {
                Reporter::new(&mut *sink).failure(&source, &error)?;
                return Ok(1);
            }
        }
    };

    if let Err(error) = Checker::new(&interner).check(scope) {
        Reporter::new(&mut *sink).failure(&source, &error)?;
        return Ok(1);
    }

    if cli.verbose {
        Reporter::new(&mut *sink).report(
            Severity::Comment,
            None,
            &format!(
                "parsed {} statements, {} values, {} routines",
                scope.statements.len(),
                scope.values.len(),
                scope.routines.len(),
            ),
        )?;
    }

    let dump = dump_scope(scope, &interner);
    match serde_json::to_string_pretty(&dump) {
        Ok(text) => writeln!(sink, "{}", text)?,
        Err(_) => return Ok(1),
    }
    Ok(0)
}

fn dump_tokens<W: Write>(source: &Source, sink: &mut W) -> io::Result<i32> {
    let mut lexer = Lexer::new(source);
    loop {
        match lexer.next_token() {
            Ok(token) => {
                Reporter::new(&mut *sink).report(
                    Severity::Verbose,
                    Some((source, token.span)),
                    &token.tag.to_string(),
                )?;
                if token.tag == TokenTag::Etx {
                    return Ok(0);
                }
            }
            Err(error) => {
                Reporter::new(&mut *sink).failure(source, &error)?;
                return Ok(1);
            }
        }
    }
}
