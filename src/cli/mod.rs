//! CLI module for docstore
//!
//! Provides command-line interface for:
//! - one-shot document, index and filter commands
//! - batch: JSON request envelopes from stdin, one per line

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{batch, resolve_config, run, run_command, single};
pub use errors::{CliError, CliResult};
pub use io::{parse_json_arg, parse_value_arg, write_response};
