use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::surface::{RecordedSurface, Surface, SurfaceEvent};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
        _ => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                if let Some(obj) = response.as_object_mut() {
                    obj.extend(extra);
                }
            }

            output_structured(output_format, &response)?;
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
        _ => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            output_structured(output_format, &response)?;
        }
    }
    Ok(())
}

/// Print any serializable value as JSON or YAML
pub fn output_structured<T: Serialize>(output_format: &OutputFormat, value: &T) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        _ => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Surface for the terminal.
///
/// Text output shows events as they happen; structured output collects them
/// so a command can print a single document at the end.
pub struct TerminalSurface {
    output_format: OutputFormat,
    recorded: RecordedSurface,
}

impl TerminalSurface {
    pub fn new(output_format: OutputFormat) -> Self {
        Self {
            output_format,
            recorded: RecordedSurface::new(),
        }
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        self.recorded.events()
    }

    fn is_text(&self) -> bool {
        matches!(self.output_format, OutputFormat::Text)
    }
}

impl Surface for TerminalSurface {
    fn alert(&mut self, message: &str) {
        if self.is_text() {
            eprintln!("! {}", message);
        }
        self.recorded.alert(message);
    }

    fn navigate(&mut self, page: &str) {
        if self.is_text() {
            println!("→ {}", page);
        }
        self.recorded.navigate(page);
    }

    fn set_text(&mut self, element: &str, text: &str) {
        if self.is_text() {
            println!("{}", text);
        }
        self.recorded.set_text(element, text);
    }
}

/// Parse `KEY=VALUE` pairs given on the command line
pub fn parse_assignment(raw: &str) -> anyhow::Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(anyhow::anyhow!("Expected KEY=VALUE, got '{}'", raw)),
    }
}

/// Read a value from stdin when it was not given as an argument
pub fn prompt(label: &str) -> anyhow::Result<String> {
    use std::io::{BufRead, Write};

    eprint!("{}: ", label);
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
