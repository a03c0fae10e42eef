//! CLI command implementations
//!
//! Every command is turned into a request envelope and handed to the
//! `ApiHandler`, so the CLI reports exactly what any other front-end would.
//! The returned flag tells whether every response was a 2xx.

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};
use tracing::debug;

use crate::api::ApiHandler;
use crate::config::Config;
use crate::database::Database;
use crate::observability;

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{parse_json_arg, parse_value_arg, read_lines, write_response};

/// Main entry point for CLI
pub fn run() -> CliResult<bool> {
    let cli = Cli::parse_args();
    run_command(cli)
}

/// Run a parsed command line against stdin/stdout
pub fn run_command(cli: Cli) -> CliResult<bool> {
    let config = resolve_config(&cli)?;
    observability::init_tracing(&config.log);

    let database = Database::open(&config)?;
    let api = ApiHandler::new(&database);

    let stdout = io::stdout();
    let mut output = stdout.lock();

    match cli.command {
        Command::Batch => {
            let stdin = io::stdin();
            let input = stdin.lock();
            batch(&api, input, &mut output)
        }
        command => single(&api, command, &mut output),
    }
}

/// Config file (if any), then command-line overrides
pub fn resolve_config(cli: &Cli) -> CliResult<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log.format = format;
    }
    if cli.compact {
        config.pretty = false;
    }

    config.validate()?;
    Ok(config)
}

/// Execute one subcommand and print its response
pub fn single<W: Write>(api: &ApiHandler, command: Command, output: &mut W) -> CliResult<bool> {
    let envelope = envelope_for(command)?;
    let response = api.handle_value(envelope);
    write_response(output, &response)?;
    Ok(response.is_success())
}

/// Execute one request per input line, printing one response per line
///
/// A malformed line yields a 400 response and processing continues.
pub fn batch<R: BufRead, W: Write>(api: &ApiHandler, input: R, output: &mut W) -> CliResult<bool> {
    let mut all_ok = true;
    let mut count = 0usize;

    for line in read_lines(input) {
        let response = api.handle_json(&line?);
        write_response(output, &response)?;
        all_ok &= response.is_success();
        count += 1;
    }

    debug!(requests = count, all_ok, "Batch finished");
    Ok(all_ok)
}

/// Request envelope for a one-shot subcommand
fn envelope_for(command: Command) -> CliResult<Value> {
    let envelope = match command {
        Command::Add {
            collection,
            id,
            data,
        } => json!({
            "op": "create",
            "collection": collection,
            "id": id,
            "data": parse_json_arg("data", &data)?,
        }),
        Command::Get { collection, id } => json!({
            "op": "read",
            "collection": collection,
            "id": id,
        }),
        Command::List { collection } => json!({
            "op": "read_all",
            "collection": collection,
        }),
        Command::Update {
            collection,
            id,
            data,
        } => json!({
            "op": "update",
            "collection": collection,
            "id": id,
            "data": parse_json_arg("data", &data)?,
        }),
        Command::Delete { collection, id } => json!({
            "op": "delete",
            "collection": collection,
            "id": id,
        }),
        Command::IndexAdd {
            collection,
            field,
            id,
            value,
        } => json!({
            "op": "add_index",
            "collection": collection,
            "field": field,
            "id": id,
            "value": parse_value_arg(&value),
        }),
        Command::IndexGet {
            collection,
            field,
            value,
        } => json!({
            "op": "query_index",
            "collection": collection,
            "field": field,
            "value": parse_value_arg(&value),
        }),
        Command::Where {
            collection,
            field,
            operator,
            value,
        } => json!({
            "op": "where",
            "collection": collection,
            "field": field,
            "operator": operator,
            "value": parse_value_arg(&value),
        }),
        Command::Batch => json!({ "op": "batch" }),
    };
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use clap::Parser;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn api() -> (TempDir, ApiHandler) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&Config::with_data_dir(dir.path())).unwrap();
        (dir, ApiHandler::new(&db))
    }

    fn run_single(api: &ApiHandler, command: Command) -> (bool, Value) {
        let mut out = Vec::new();
        let ok = single(api, command, &mut out).unwrap();
        let line: Value = serde_json::from_slice(&out).unwrap();
        (ok, line)
    }

    #[test]
    fn test_add_then_where() {
        let (_dir, api) = api();

        let (ok, line) = run_single(
            &api,
            Command::Add {
                collection: "cars".into(),
                id: "1".into(),
                data: r#"{"hp": 100}"#.into(),
            },
        );
        assert!(ok);
        assert_eq!(line["status"], 201);

        let (ok, line) = run_single(
            &api,
            Command::Where {
                collection: "cars".into(),
                field: "hp".into(),
                operator: ">".into(),
                value: "60".into(),
            },
        );
        assert!(ok);
        assert_eq!(line["body"], json!([{"id": "1", "hp": 100}]));
    }

    #[test]
    fn test_missing_document_is_not_success() {
        let (_dir, api) = api();
        let (ok, line) = run_single(
            &api,
            Command::Get {
                collection: "cars".into(),
                id: "nope".into(),
            },
        );
        assert!(!ok);
        assert_eq!(line["status"], 404);
    }

    #[test]
    fn test_invalid_data_argument_is_cli_error() {
        let (_dir, api) = api();
        let mut out = Vec::new();
        let result = single(
            &api,
            Command::Add {
                collection: "cars".into(),
                id: "1".into(),
                data: "not json".into(),
            },
            &mut out,
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_batch_continues_after_bad_line() {
        let (_dir, api) = api();
        let input = Cursor::new(concat!(
            r#"{"op": "create", "collection": "cars", "id": "1", "data": {"hp": 50}}"#,
            "\n",
            "garbage\n",
            "\n",
            r#"{"op": "read", "collection": "cars", "id": "1"}"#,
            "\n",
        ));
        let mut out = Vec::new();

        let all_ok = batch(&api, input, &mut out).unwrap();
        assert!(!all_ok);

        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["status"], 201);
        assert_eq!(lines[1]["status"], 400);
        assert_eq!(lines[2]["body"], json!({"id": "1", "hp": 50}));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("docstore.json");
        std::fs::write(
            &config_path,
            r#"{"data_dir": "from-file", "log": {"level": "warn"}}"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "docstore",
            "--config",
            config_path.to_str().unwrap(),
            "--data-dir",
            "from-flag",
            "--log-format",
            "json",
            "--compact",
            "list",
            "cars",
        ])
        .unwrap();

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.data_dir, std::path::PathBuf::from("from-flag"));
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.log.format, LogFormat::Json);
        assert!(!config.pretty);
    }
}
