use serde::{Deserialize, Serialize};

/// Line terminator written after every printed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Layout settings for the printer.
///
/// Every field has a default, so a partial config file (or none at all)
/// yields the canonical two-space, `\n` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintConfig {
    /// Spaces before each entry inside a block.
    #[serde(default = "default_indent")]
    pub indent: usize,
    #[serde(default)]
    pub line_ending: LineEnding,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            line_ending: LineEnding::default(),
        }
    }
}

fn default_indent() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PrintConfig::default();
        assert_eq!(config.indent, 2);
        assert_eq!(config.line_ending, LineEnding::Lf);
        assert_eq!(config.line_ending.as_str(), "\n");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: PrintConfig = serde_json::from_str(r#"{ "line_ending": "crlf" }"#).unwrap();
        assert_eq!(config.indent, 2);
        assert_eq!(config.line_ending, LineEnding::CrLf);
    }

    #[test]
    fn empty_config_is_default() {
        let config: PrintConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PrintConfig::default());
    }
}
