//! Channel log parser.
//!
//! A recording looks like this:
//!
//! ```text
//! # front-left
//! # front-right
//!
//! 0.0;4.1
//! 4.2;0.0
//! ```
//!
//! Header lines name one channel each, data rows hold one sample per channel
//! for one time step.

use crate::config::FormatConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading, extracting or rendering.
#[derive(Error, Debug)]
pub enum GaitError {
    #[error("cannot read {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, GaitError>;

/// One leg or sensor: a name and one sample per time step.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub name: String,
    pub samples: Vec<f64>,
}

impl Channel {
    pub fn new(name: impl Into<String>, samples: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }

    /// Number of time steps recorded on this channel.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// All channels of one recording, indexed by channel then by time step.
///
/// Every channel holds the same number of samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleMatrix {
    channels: Vec<Channel>,
    steps: usize,
}

impl SampleMatrix {
    /// Build a matrix, rejecting channels of differing length.
    pub fn from_channels(channels: Vec<Channel>) -> Result<Self> {
        let steps = channels.first().map_or(0, Channel::len);
        if let Some(ragged) = channels.iter().find(|c| c.len() != steps) {
            return Err(GaitError::InvalidFormat(format!(
                "channel '{}' has {} samples, expected {}",
                ragged.name,
                ragged.len(),
                steps
            )));
        }
        Ok(Self { channels, steps })
    }

    #[inline]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Channel names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.name.as_str())
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn step_count(&self) -> usize {
        self.steps
    }

    /// Total number of samples across all channels.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.channels.len() * self.steps
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Read and parse a recording from disk.
///
/// The whole file is read in one call and the handle is closed before
/// parsing begins.
pub fn read_channels<P: AsRef<Path>>(path: P, config: &FormatConfig) -> Result<SampleMatrix> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| GaitError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", content.len(), path.display());
    parse_channels(&content, config)
}

/// Parse a recording held in memory.
pub fn parse_channels(content: &str, config: &FormatConfig) -> Result<SampleMatrix> {
    if content.trim().is_empty() {
        return Err(GaitError::InvalidFormat("input is empty".to_string()));
    }

    let comment = config.comment();
    let mut lines = content.lines().enumerate().peekable();

    // Header block: contiguous comment lines at the top, one channel each
    let mut names = Vec::new();
    while let Some(&(idx, line)) = lines.peek() {
        let Some(rest) = line.strip_prefix(comment) else {
            break;
        };
        let name = rest.trim();
        if name.is_empty() {
            return Err(GaitError::Parse {
                line: idx + 1,
                message: "header line declares no channel name".to_string(),
            });
        }
        names.push(name.to_string());
        lines.next();
    }

    if names.is_empty() {
        return Err(GaitError::InvalidFormat(format!(
            "no channels declared (expected header lines starting with '{}')",
            comment
        )));
    }

    // The line after the header terminates it; only a blank one is consumed
    if let Some(&(_, line)) = lines.peek() {
        if line.trim().is_empty() {
            lines.next();
        }
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        parse_row(line, idx + 1, config, &mut columns)?;
    }

    let channels = names
        .into_iter()
        .zip(columns)
        .map(|(name, samples)| Channel::new(name, samples))
        .collect();
    let matrix = SampleMatrix::from_channels(channels)?;
    debug!(
        "parsed {} channels x {} steps",
        matrix.channel_count(),
        matrix.step_count()
    );
    Ok(matrix)
}

/// Parse one data row and append its fields to the per-channel columns.
fn parse_row(
    line: &str,
    line_number: usize,
    config: &FormatConfig,
    columns: &mut [Vec<f64>],
) -> Result<()> {
    // Empty edge fields count; each field is trimmed on its own below
    let fields: Vec<&str> = line.split(config.separator()).collect();

    if fields.len() != columns.len() {
        return Err(GaitError::Parse {
            line: line_number,
            message: format!(
                "expected {} fields (one per channel), got {}",
                columns.len(),
                fields.len()
            ),
        });
    }

    for (column, field) in columns.iter_mut().zip(&fields) {
        let field = field.trim();
        let value: f64 = field.parse().map_err(|_| GaitError::Parse {
            line: line_number,
            message: format!("invalid sample value: '{}'", field),
        })?;
        column.push(value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> Result<SampleMatrix> {
        parse_channels(content, &FormatConfig::default())
    }

    #[test]
    fn test_parse_two_channels() {
        let content = "# front-left\n# front-right\n\n0;4\n4;0\n1.5;-2\n";
        let matrix = parse(content).unwrap();

        assert_eq!(matrix.channel_count(), 2);
        assert_eq!(matrix.step_count(), 3);
        assert_eq!(matrix.names().collect::<Vec<_>>(), ["front-left", "front-right"]);
        assert_eq!(matrix.channels()[0].samples, vec![0.0, 4.0, 1.5]);
        assert_eq!(matrix.channels()[1].samples, vec![4.0, 0.0, -2.0]);
    }

    #[test]
    fn test_ragged_row_is_error() {
        let content = "# a\n# b\n\n1;2\n1;2;3\n1;2\n";
        match parse(content) {
            Err(GaitError::Parse { line, message }) => {
                assert_eq!(line, 5);
                assert!(message.contains("expected 2 fields"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_field_is_error() {
        let content = "# a\n\n1\nabc\n";
        match parse(content) {
            Err(GaitError::Parse { line, message }) => {
                assert_eq!(line, 4);
                assert!(message.contains("abc"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse(""), Err(GaitError::InvalidFormat(_))));
        assert!(matches!(parse("  \n\n"), Err(GaitError::InvalidFormat(_))));
    }

    #[test]
    fn test_no_channels_declared() {
        assert!(matches!(parse("1;2\n3;4\n"), Err(GaitError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_header_name() {
        assert!(matches!(
            parse("# a\n#   \n\n1;2\n"),
            Err(GaitError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_header_only_has_zero_steps() {
        let matrix = parse("# a\n# b\n\n").unwrap();
        assert_eq!(matrix.channel_count(), 2);
        assert_eq!(matrix.step_count(), 0);
    }

    #[test]
    fn test_blank_lines_in_data_skipped() {
        let matrix = parse("# a\n\n1\n\n   \n2\n").unwrap();
        assert_eq!(matrix.channels()[0].samples, vec![1.0, 2.0]);
    }

    #[test]
    fn test_missing_blank_terminator_keeps_first_row() {
        let matrix = parse("# a\n# b\n1;2\n3;4\n").unwrap();
        assert_eq!(matrix.step_count(), 2);
        assert_eq!(matrix.channels()[0].samples, vec![1.0, 3.0]);
    }

    #[test]
    fn test_later_comment_line_is_data_error() {
        let content = "# a\n\n1\n# late\n";
        assert!(matches!(parse(content), Err(GaitError::Parse { line: 4, .. })));
    }

    #[test]
    fn test_tab_separator_leading_empty_field() {
        let cfg = FormatConfig::new("#", "\\t").unwrap();
        let err = parse_channels("# a\n# b\n\n\t1\t2\n", &cfg).unwrap_err();
        match err {
            GaitError::Parse { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("got 3"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_tab_separator_trailing_empty_field() {
        let cfg = FormatConfig::new("#", "\\t").unwrap();
        let err = parse_channels("# a\n\n4\t\n0\t\n", &cfg).unwrap_err();
        assert!(matches!(err, GaitError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let matrix = parse("# a\n# b\n\n 1.5 ; -2 \n").unwrap();
        assert_eq!(matrix.channels()[0].samples, vec![1.5]);
        assert_eq!(matrix.channels()[1].samples, vec![-2.0]);
    }

    #[test]
    fn test_non_blank_line_after_header_is_data() {
        // Only a blank line closes the header; anything else must parse as a row
        let err = parse("# a\n# b\n---\n1;2\n").unwrap_err();
        assert!(matches!(err, GaitError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_custom_format() {
        let cfg = FormatConfig::new("%", "\\t").unwrap();
        let matrix = parse_channels("% hind-left\n% hind-right\n\n1\t2\r\n3\t4\r\n", &cfg).unwrap();
        assert_eq!(matrix.channels()[1].name, "hind-right");
        assert_eq!(matrix.channels()[1].samples, vec![2.0, 4.0]);
    }

    #[test]
    fn test_matrix_rejects_ragged_channels() {
        let channels = vec![Channel::new("a", vec![1.0, 2.0]), Channel::new("b", vec![1.0])];
        assert!(SampleMatrix::from_channels(channels).is_err());
    }

    #[test]
    fn test_read_channels_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "# fl\n# fr\n\n0;1\n1;0\n").unwrap();
        file.flush().unwrap();

        let matrix = read_channels(file.path(), &FormatConfig::default()).unwrap();
        assert_eq!(matrix.sample_count(), 4);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_channels("/nonexistent/gait.log", &FormatConfig::default()).unwrap_err();
        assert!(matches!(err, GaitError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/gait.log"));
    }
}
