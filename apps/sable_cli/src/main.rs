//! Sable front-end driver - standalone binary.
//!
//! This is the entry point for the `sablec` command-line tool.
//!
//! The binary is a thin wrapper around [`sable_cli::run_cli`]; all driver
//! logic lives in the library crate for testability.
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - Any fatal diagnostic (reported to standard output)

fn main() {
    std::process::exit(sable_cli::run_cli());
}
