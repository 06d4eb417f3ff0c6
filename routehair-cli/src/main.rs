//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::error::Error;

#[expect(clippy::print_stderr, reason = "the binary reports failures on stderr")]
fn main() {
    if let Err(err) = routehair_cli::run() {
        eprintln!("routehair: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
