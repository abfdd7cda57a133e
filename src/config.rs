//! Input format configuration.
//!
//! Recordings are plain text: a block of commented header lines naming the
//! channels, then one separator-delimited row of samples per time step.
//! The marker and the separator are carried in a [`FormatConfig`] value that
//! is built once at startup and handed to the parser.

use crate::channels::{GaitError, Result};

/// Default comment marker that introduces a channel-name header line.
pub const DEFAULT_COMMENT: &str = "#";

/// Default field separator between samples on a data row.
pub const DEFAULT_SEPARATOR: &str = ";";

/// Comment marker and field separator used to read a recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    comment: String,
    separator: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            comment: DEFAULT_COMMENT.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl FormatConfig {
    /// Build a configuration from user-supplied marker and separator.
    ///
    /// The separator may be given in escaped form (`\t`), as log writers
    /// commonly store it that way.
    pub fn new(comment: &str, separator: &str) -> Result<Self> {
        if comment.trim().is_empty() {
            return Err(GaitError::InvalidFormat(
                "comment marker must not be empty".to_string(),
            ));
        }

        let separator = unescape_control(separator);
        if separator.is_empty() {
            return Err(GaitError::InvalidFormat(
                "field separator must not be empty".to_string(),
            ));
        }

        Ok(Self {
            comment: comment.to_string(),
            separator,
        })
    }

    #[inline]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    #[inline]
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

/// Replace `\t`, `\n` and `\r` escape sequences with the real characters.
pub fn unescape_control(s: &str) -> String {
    s.replace("\\t", "\t")
        .replace("\\n", "\n")
        .replace("\\r", "\r")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        let cfg = FormatConfig::default();
        assert_eq!(cfg.comment(), "#");
        assert_eq!(cfg.separator(), ";");
    }

    #[test]
    fn test_escaped_tab_separator() {
        let cfg = FormatConfig::new("%", "\\t").unwrap();
        assert_eq!(cfg.comment(), "%");
        assert_eq!(cfg.separator(), "\t");
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(FormatConfig::new("", ";").is_err());
        assert!(FormatConfig::new("#", "").is_err());
        assert!(FormatConfig::new("  ", ";").is_err());
    }
}
