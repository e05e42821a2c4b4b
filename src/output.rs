//! Human and JSON output for easytask commands.
//!
//! JSON output is a single envelope per invocation:
//!
//! ```text
//! {"schema_version": "easytask.v1", "command": "parse", "status": "success", "data": {...}}
//! {"schema_version": "easytask.v1", "command": "parse", "status": "error", "error": {...}}
//! ```

use std::fmt;

use serde::Serialize;

use crate::error::{exit_codes, Error, Result};

pub const SCHEMA_VERSION: &str = "easytask.v1";

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Plain-text report: a header line followed by optional bullet sections.
#[derive(Debug, Clone, Default)]
pub struct HumanOutput {
    header: String,
    summary: Vec<(String, String)>,
    details: Vec<String>,
    warnings: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            ..Self::default()
        }
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.details.push(value.into());
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }
}

impl fmt::Display for HumanOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header)?;

        let summary: Vec<String> = self
            .summary
            .iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    key.clone()
                } else {
                    format!("{key}: {value}")
                }
            })
            .collect();

        for (title, items) in [
            ("Summary", &summary),
            ("Details", &self.details),
            ("Warnings", &self.warnings),
        ] {
            if items.is_empty() {
                continue;
            }
            write!(f, "\n\n{title}:")?;
            for item in items {
                write!(f, "\n- {item}")?;
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    schema_version: &'static str,
    command: &'a str,
    #[serde(flatten)]
    body: Body<'a, T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    next_steps: Vec<String>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Body<'a, T: Serialize> {
    Success { data: &'a T },
    Error { error: ErrorBody },
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: i32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

fn print_json<T: Serialize>(envelope: &Envelope<'_, T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(())
}

/// Print a successful result: the JSON envelope, the human report, or
/// nothing when quiet.
pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        return print_json(&Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            body: Body::Success { data },
            warnings: human.map(|h| h.warnings.clone()).unwrap_or_default(),
            next_steps: Vec::new(),
        });
    }

    match human {
        Some(human) if !options.quiet => println!("{human}"),
        _ => {}
    }
    Ok(())
}

/// Report a failed command on stdout (JSON) or stderr (human).
pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let next_steps = error_next_steps(err);
    if json {
        return print_json(&Envelope::<()> {
            schema_version: SCHEMA_VERSION,
            command,
            body: Body::Error {
                error: ErrorBody {
                    message: err.to_string(),
                    code: err.exit_code(),
                    kind: error_kind(err),
                    details: err.details(),
                },
            },
            warnings: Vec::new(),
            next_steps,
        });
    }

    eprintln!("error: {err}");
    if let Some(hint) = next_steps.first() {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

/// Best-effort command name for error envelopes, read before clap parses.
pub fn infer_command_name_from_args() -> String {
    infer_command_name(std::env::args().skip(1))
}

fn infer_command_name(args: impl IntoIterator<Item = String>) -> String {
    let mut positional = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "--prefs" => {
                args.next();
            }
            flag if flag.starts_with('-') => {}
            _ => positional.push(arg),
        }
    }

    match positional.as_slice() {
        [] => "ui".to_string(),
        [group, sub, ..] if group == "prefs" => format!("{group} {sub}"),
        [command, ..] => command.clone(),
    }
}

fn error_kind(err: &Error) -> &'static str {
    match err.exit_code() {
        exit_codes::USER_ERROR => "user_error",
        _ => "operation_failed",
    }
}

fn error_next_steps(err: &Error) -> Vec<String> {
    match err {
        Error::InvalidConfig(_) | Error::TomlParse(_) => {
            vec!["fix config.toml (or pass --config) then retry".to_string()]
        }
        Error::LockFailed(path) => vec![format!(
            "another easytask may be writing {}; retry shortly",
            path.display()
        )],
        Error::NoHomeDir(_) => vec!["pass --config and --prefs explicitly".to_string()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn infers_command_names() {
        assert_eq!(infer_command_name(args(&[])), "ui");
        assert_eq!(infer_command_name(args(&["--json", "parse", "a,b"])), "parse");
        assert_eq!(infer_command_name(args(&["prefs", "--json", "show"])), "prefs show");
        assert_eq!(infer_command_name(args(&["prefs"])), "prefs");
        assert_eq!(
            infer_command_name(args(&["--config", "cfg.toml", "parse"])),
            "parse"
        );
    }

    #[test]
    fn error_kind_follows_exit_code() {
        assert_eq!(error_kind(&Error::InvalidArgument("x".into())), "user_error");
        assert_eq!(error_kind(&Error::OperationFailed("x".into())), "operation_failed");
    }

    #[test]
    fn envelope_flattens_status() {
        let data = vec!["a"];
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            command: "parse",
            body: Body::Success { data: &data },
            warnings: Vec::new(),
            next_steps: Vec::new(),
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"][0], "a");
        assert!(value.get("warnings").is_none());

        let envelope = Envelope::<()> {
            schema_version: SCHEMA_VERSION,
            command: "parse",
            body: Body::Error {
                error: ErrorBody {
                    message: "boom".to_string(),
                    code: 4,
                    kind: "operation_failed",
                    details: None,
                },
            },
            warnings: Vec::new(),
            next_steps: vec!["retry".to_string()],
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"]["code"], 4);
        assert_eq!(value["next_steps"][0], "retry");
    }
}
