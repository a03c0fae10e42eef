//! CLI argument definitions using clap
//!
//! Commands:
//! - docstore add <collection> <id> <data-json>
//! - docstore get <collection> <id>
//! - docstore list <collection>
//! - docstore update <collection> <id> <data-json>
//! - docstore delete <collection> <id>
//! - docstore index-add <collection> <field> <id> <value>
//! - docstore index-get <collection> <field> <value>
//! - docstore where <collection> <field> <op> <value>
//! - docstore batch

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::LogFormat;

/// docstore - a minimal JSON document store
#[derive(Parser, Debug)]
#[command(name = "docstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true, env = "DOCSTORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data directory, overrides the configuration file
    #[arg(long, global = true, env = "DOCSTORE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log filter, e.g. `info` or `docstore=debug`
    #[arg(long, global = true, env = "DOCSTORE_LOG")]
    pub log_level: Option<String>,

    /// Log line format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Write containers without indentation
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a document to a collection, creating the collection if needed
    Add {
        collection: String,
        id: String,
        /// Document fields as a JSON object
        data: String,
    },

    /// Print the first document with the given id
    Get { collection: String, id: String },

    /// Print every document of a collection
    List { collection: String },

    /// Merge fields into an existing document
    Update {
        collection: String,
        id: String,
        /// Fields to overwrite as a JSON object
        data: String,
    },

    /// Remove a document
    Delete { collection: String, id: String },

    /// Map a field value to a document id in the index table
    IndexAdd {
        collection: String,
        field: String,
        id: String,
        /// JSON value; anything that is not valid JSON is taken as a string
        value: String,
    },

    /// Look up the document id registered for a field value
    IndexGet {
        collection: String,
        field: String,
        /// JSON value; anything that is not valid JSON is taken as a string
        value: String,
    },

    /// List documents where `<field> <operator> <value>` holds
    Where {
        collection: String,
        field: String,
        /// One of `>`, `<`, `==`
        operator: String,
        /// JSON value; anything that is not valid JSON is taken as a string
        value: String,
    },

    /// Execute JSON requests from stdin, one per line
    Batch,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_where_with_global_flags() {
        let cli = Cli::try_parse_from([
            "docstore", "--data-dir", "/tmp/d", "where", "cars", "hp", ">", "60",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/d")));
        assert_eq!(
            cli.command,
            Command::Where {
                collection: "cars".to_string(),
                field: "hp".to_string(),
                operator: ">".to_string(),
                value: "60".to_string(),
            }
        );
    }

    #[test]
    fn test_kebab_case_index_commands() {
        let cli = Cli::try_parse_from(["docstore", "index-get", "cars", "hp", "100"]).unwrap();
        assert!(matches!(cli.command, Command::IndexGet { .. }));
    }
}
