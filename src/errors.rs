/*!
 * Error types for the srtformat library.
 *
 * Every failure of the formatting pipeline is fatal and surfaces as a
 * `SrtError`; the binary is the only place that turns one into an exit status.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while normalizing an SRT file
#[derive(Error, Debug)]
pub enum SrtError {
    /// Reading or writing the subtitle file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The charset classifier produced no best guess
    #[error("Charset detection failed: no candidate encoding for input")]
    Detect,

    /// Decoding a legacy or UTF-16 encoding hit an illegal byte sequence
    #[error("Failed to decode input as {encoding}: illegal byte sequence")]
    Transcode {
        /// Label of the encoding that was being decoded
        encoding: String,
    },

    /// A non-integer line where a cue index was expected
    #[error("line {line}: expected cue index, found {content:?}")]
    ParseIndex {
        /// 1-based source line
        line: usize,
        /// Trimmed line content
        content: String,
    },

    /// Timestamp line rejected, or input ended where a timestamp was expected
    #[error("line {line}: invalid time format: {content:?}")]
    ParseTime {
        /// 1-based source line
        line: usize,
        /// Trimmed line content (empty at end of input)
        content: String,
    },

    /// Input ended after a timestamp line without any cue text
    #[error("line {line}: unexpected end of input, cue has no text")]
    ParseText {
        /// 1-based line where text was expected
        line: usize,
    },
}

impl SrtError {
    /// Source line of a parse error, if this is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ParseIndex { line, .. } | Self::ParseTime { line, .. } | Self::ParseText { line } => {
                Some(*line)
            }
            _ => None,
        }
    }
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
