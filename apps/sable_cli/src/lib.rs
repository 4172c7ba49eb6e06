//! Sable front-end driver (`sablec`).
//!
//! Reads one source file, runs the tokenizer, parser, and the partial
//! checker over it, and prints the canonical AST dump. With `--tokens` it
//! stops after tokenization and reports the token stream instead.
//!
//! | Invocation | Effect |
//! |------------|--------|
//! | `sablec program.sb` | Parse, check, and dump the AST as JSON |
//! | `sablec --tokens program.sb` | Report each token with its span |
//! | `sablec --verbose program.sb` | Also report scope totals |
//!
//! Diagnostics and dumps both go to standard output. The process exits 0
//! on success and 1 on the first fatal diagnostic.

pub mod cli;

pub use cli::{run, run_cli, Cli};
