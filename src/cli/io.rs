//! JSON I/O handling for CLI
//!
//! - Input: one JSON request envelope per line (batch mode)
//! - Output: one `{"status": <code>, "body": ...}` line per response
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::api::Response;

use super::errors::{CliError, CliResult};

/// Non-blank lines of `input`; blank lines are skipped
pub fn read_lines<R: BufRead>(input: R) -> impl Iterator<Item = CliResult<String>> {
    input
        .lines()
        .map(|line| line.map_err(CliError::from))
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
}

/// Write one response line and flush
pub fn write_response<W: Write>(output: &mut W, response: &Response) -> CliResult<()> {
    writeln!(output, "{}", response.to_json())?;
    output.flush()?;
    Ok(())
}

/// Parse an argument that must be JSON
pub fn parse_json_arg(arg: &'static str, raw: &str) -> CliResult<Value> {
    serde_json::from_str(raw).map_err(|source| CliError::InvalidJson { arg, source })
}

/// Parse a value argument; anything that is not valid JSON is a string
pub fn parse_value_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn test_read_lines_skips_blank_lines() {
        let input = Cursor::new("{\"a\":1}\n\n   \n{\"b\":2}\n");
        let lines: Vec<String> = read_lines(input).map(Result::unwrap).collect();
        assert_eq!(lines, vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn test_write_response_line() {
        let mut out = Vec::new();
        write_response(&mut out, &Response::ok(json!([]))).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"status\":200,\"body\":[]}\n");

        let mut out = Vec::new();
        write_response(&mut out, &Response::message(StatusCode::CREATED, "Index entry added"))
            .unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("{\"status\":201"));
    }

    #[test]
    fn test_value_arg_falls_back_to_string() {
        assert_eq!(parse_value_arg("100"), json!(100));
        assert_eq!(parse_value_arg("\"100\""), json!("100"));
        assert_eq!(parse_value_arg("true"), json!(true));
        assert_eq!(parse_value_arg("Citroën"), json!("Citroën"));
    }

    #[test]
    fn test_json_arg_is_strict() {
        assert_eq!(parse_json_arg("data", "{\"hp\":1}").unwrap(), json!({"hp": 1}));
        let err = parse_json_arg("data", "{hp:1}").unwrap_err();
        assert_eq!(err.code(), "DOCSTORE_CLI_INVALID_JSON");
    }
}
