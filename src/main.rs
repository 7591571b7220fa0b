//! Leafy CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = leafy::run() {
        eprintln!("error: {}", leafy::output::json_envelope::error_chain(&e));
        std::process::exit(1);
    }
}
