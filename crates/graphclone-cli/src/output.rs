//! Output formatting utilities

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Compact,
}

impl OutputFormat {
    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            Self::Pretty
        } else {
            Self::Compact
        }
    }
}

/// Format output based on format type
///
/// Pretty output is indented by four spaces.
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<String> {
    let text = match format {
        OutputFormat::Pretty => {
            let mut buffer = Vec::new();
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
            data.serialize(&mut serializer)?;
            String::from_utf8(buffer)?
        }
        OutputFormat::Compact => serde_json::to_string(data)?,
    };
    Ok(text)
}
