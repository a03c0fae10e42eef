//! docstore CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. Exits non-zero when
//! a command fails or any response is not a 2xx.

use docstore::cli;

fn main() {
    match cli::run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} ({})", e, e.code());
            std::process::exit(1);
        }
    }
}
